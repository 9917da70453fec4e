#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use filament_resistance::{
    config, i18n,
    i18n::keys,
    solver, ui_cli, Quantity, Resistivity,
};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

const RESULT_COLOR: egui::Color32 = egui::Color32::from_rgb(0x00, 0x7a, 0xcc);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(0xc0, 0x39, 0x2b);

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        log::warn!("settings unavailable, using defaults: {e}");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([600.0, 440.0])
        .with_transparent(true);
    if app_cfg.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Resistance for Printed Protopasta",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                log::warn!("{e}");
            }
            cc.egui_ctx.set_pixels_per_point(app_cfg.ui_scale);
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시를 위해 시스템 폰트를 찾아 적용한다.
/// 1) assets/fonts/ 아래 폰트
/// 2) OS별 시스템 CJK 폰트
/// 3) 모두 실패 시 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = vec![
        "assets/fonts/malgun.ttf".into(),
        "assets/fonts/NotoSansKR-Regular.ttf".into(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    candidates.push("/System/Library/Fonts/AppleSDGothicNeo.ttc".into());
    candidates.push("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc".into());
    candidates.push("/usr/share/fonts/truetype/nanum/NanumGothic.ttf".into());

    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "cjk_font");
            log::info!("font loaded: {}", p.display());
            return Ok(());
        }
    }
    Err("CJK font not found. Korean text needs a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    resistivity: Resistivity,
    unknown: Quantity,
    input_resistance: String,
    input_length: String,
    input_area: String,
    result_text: String,
    result_is_error: bool,
    // 설정
    lang_input: String,
    save_as_default: bool,
    settings_status: Option<String>,
    window_alpha: f32,
    ui_scale: f32,
    always_on_top: bool,
    custom_font_path: String,
    font_status: Option<String>,
    show_settings_modal: bool,
    show_help_modal: bool,
    show_formula_modal: bool,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        log::info!("GUI language resolved: {lang_code}");
        Self {
            resistivity: config.default_resistivity,
            unknown: config.default_unknown,
            input_resistance: String::new(),
            input_length: String::new(),
            input_area: String::new(),
            result_text: String::new(),
            result_is_error: false,
            lang_input: config.language.clone(),
            save_as_default: false,
            settings_status: None,
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            ui_scale: config.ui_scale.clamp(0.8, 1.6),
            always_on_top: config.always_on_top,
            custom_font_path: String::new(),
            font_status: None,
            show_settings_modal: false,
            show_help_modal: false,
            show_formula_modal: false,
            tr,
            config,
        }
    }

    fn input_mut(&mut self, quantity: Quantity) -> &mut String {
        match quantity {
            Quantity::Resistance => &mut self.input_resistance,
            Quantity::Length => &mut self.input_length,
            Quantity::Area => &mut self.input_area,
        }
    }

    /// 미지수를 바꾸면 해당 칸을 비우고 비활성화한다.
    fn set_unknown(&mut self, quantity: Quantity) {
        if self.unknown != quantity {
            self.unknown = quantity;
            self.input_mut(quantity).clear();
        }
    }

    fn calculate(&mut self) {
        let result = solver::solve_text(
            self.resistivity,
            Some(self.unknown),
            &self.input_resistance,
            &self.input_length,
            &self.input_area,
        );
        self.result_is_error = result.is_err();
        self.result_text = ui_cli::render_outcome(&self.tr, &result, self.config.precision);
    }

    fn ui_calculator(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::TAB_PROTOPASTA));
        ui.add_space(6.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(tr.t(keys::GROUP_RESISTIVITY)).strong());
            ui.horizontal(|ui| {
                for r in Resistivity::ALL {
                    ui.radio_value(&mut self.resistivity, r, tr.resistivity_label(r));
                }
            });
        });
        ui.add_space(6.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(tr.t(keys::GROUP_UNKNOWN)).strong());
            let mut selected = self.unknown;
            ui.horizontal(|ui| {
                for q in Quantity::ALL {
                    let label = format!("{} ({})", tr.quantity_name(q), q.symbol());
                    ui.radio_value(&mut selected, q, label);
                }
            });
            self.set_unknown(selected);
        });
        ui.add_space(6.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(tr.t(keys::GROUP_INPUTS)).strong());
            egui::Grid::new("inputs_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for q in Quantity::ALL {
                        ui.label(tr.input_label(q));
                        let enabled = q != self.unknown;
                        let field = self.input_mut(q);
                        let resp = ui.add_enabled(
                            enabled,
                            egui::TextEdit::singleline(field).desired_width(200.0),
                        );
                        if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            self.calculate();
                        }
                        ui.end_row();
                    }
                });
        });
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            let button = egui::Button::new(
                egui::RichText::new(tr.t(keys::BUTTON_CALCULATE)).color(egui::Color32::WHITE),
            )
            .fill(RESULT_COLOR)
            .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                self.calculate();
            }
            ui.add_space(10.0);
            if !self.result_text.is_empty() {
                let color = if self.result_is_error {
                    ERROR_COLOR
                } else {
                    RESULT_COLOR
                };
                ui.label(
                    egui::RichText::new(&self.result_text)
                        .size(16.0)
                        .strong()
                        .color(color),
                );
            }
        });
    }

    fn ui_settings(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.label(tr.t(keys::GUI_SETTINGS_LANGUAGE));
        egui::ComboBox::from_id_source("lang_choice")
            .selected_text(&self.lang_input)
            .show_ui(ui, |ui| {
                ui.selectable_value(
                    &mut self.lang_input,
                    "auto".into(),
                    tr.t(keys::GUI_SETTINGS_LANGUAGE_AUTO),
                );
                ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
            });
        ui.separator();
        ui.checkbox(&mut self.save_as_default, tr.t(keys::GUI_SETTINGS_DEFAULTS));
        ui.separator();
        ui.label(tr.t(keys::GUI_SETTINGS_UI_SCALE));
        let scale_slider = egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
        if ui.add(scale_slider).changed() {
            ctx.set_pixels_per_point(self.ui_scale);
        }
        ui.checkbox(&mut self.always_on_top, tr.t(keys::GUI_SETTINGS_ON_TOP));
        ui.label(tr.t(keys::GUI_SETTINGS_ALPHA));
        ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
        ui.separator();
        ui.label(tr.t(keys::GUI_SETTINGS_FONT));
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.custom_font_path);
            if ui.button(tr.t(keys::GUI_SETTINGS_FONT_BROWSE)).clicked() {
                if let Some(path) = FileDialog::new()
                    .add_filter("Font", &["ttf", "ttc", "otf"])
                    .pick_file()
                {
                    self.custom_font_path = path.display().to_string();
                }
            }
            if ui.button(tr.t(keys::GUI_SETTINGS_FONT_LOAD)).clicked() {
                self.font_status = Some(match load_custom_font(ctx, &self.custom_font_path) {
                    Ok(()) => "OK".into(),
                    Err(e) => e,
                });
            }
        });
        if let Some(msg) = &self.font_status {
            ui.small(msg);
        }
        ui.separator();
        if ui.button(tr.t(keys::GUI_SETTINGS_SAVE)).clicked() {
            self.apply_settings();
        }
        if let Some(msg) = &self.settings_status {
            ui.label(msg);
        }
    }

    /// 설정 창의 값을 Config에 반영하고 저장한다. 번역기는 즉시 교체한다.
    fn apply_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        self.config.ui_scale = self.ui_scale;
        self.config.always_on_top = self.always_on_top;
        if self.save_as_default {
            self.config.default_resistivity = self.resistivity;
            self.config.default_unknown = self.unknown;
        }
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr =
            i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.settings_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::GUI_SETTINGS_SAVED),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(tr.t(keys::GUI_FORMULA)).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(tr.t(keys::GUI_SETTINGS)).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(tr.t(keys::GUI_ABOUT)).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            let mut open = true;
            egui::Window::new(tr.t(keys::GUI_SETTINGS))
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| self.ui_settings(ctx, ui));
            self.show_settings_modal = open;
        }

        if self.show_help_modal {
            egui::Window::new(tr.t(keys::GUI_ABOUT))
                .collapsible(false)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(tr.t(keys::GUI_ABOUT_APP));
                    ui.label(format!("Version: {}", env!("CARGO_PKG_VERSION")));
                    ui.separator();
                    ui.label(tr.t(keys::GUI_ABOUT_ORIENTATION));
                });
        }

        if self.show_formula_modal {
            egui::Window::new(tr.t(keys::GUI_FORMULA))
                .collapsible(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.label(tr.t(keys::GUI_FORMULA_RESISTANCE));
                    ui.label(tr.t(keys::GUI_FORMULA_LENGTH));
                    ui.label(tr.t(keys::GUI_FORMULA_AREA));
                    ui.separator();
                    ui.small(tr.t(keys::GUI_FORMULA_UNITS));
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_calculator(ui));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_unknown_clears_its_field() {
        let mut app = GuiApp::new(config::Config::default());
        app.input_length = "10".into();
        app.input_area = "2".into();
        app.set_unknown(Quantity::Length);
        assert!(app.input_length.is_empty());
        assert_eq!(app.input_area, "2");
    }

    #[test]
    fn ui_scale_comes_from_config() {
        let app = GuiApp::new(config::Config {
            ui_scale: 1.25,
            ..config::Config::default()
        });
        assert!((app.ui_scale - 1.25).abs() < f32::EPSILON);
        let app = GuiApp::new(config::Config {
            ui_scale: 5.0,
            ..config::Config::default()
        });
        assert!((app.ui_scale - 1.6).abs() < f32::EPSILON);
    }

    #[test]
    fn calculate_renders_result_label() {
        let mut app = GuiApp::new(config::Config::default());
        app.tr = i18n::Translator::new("en");
        app.input_length = "10".into();
        app.input_area = "2".into();
        app.calculate();
        assert!(!app.result_is_error);
        assert_eq!(app.result_text, "Resistance (R) = 150.0000 Ω");
    }

    #[test]
    fn calculate_reports_bad_input() {
        let mut app = GuiApp::new(config::Config::default());
        app.tr = i18n::Translator::new("en");
        app.input_length = "abc".into();
        app.input_area = "2".into();
        app.calculate();
        assert!(app.result_is_error);
        assert_eq!(app.result_text, "Please enter valid numeric values.");
    }
}
