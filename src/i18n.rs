use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::quantity::Quantity;
use crate::resistivity::Resistivity;
use crate::solver::{Solution, SolveError};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";
    pub const TAB_PROTOPASTA: &str = "general.tab_protopasta";

    pub const GROUP_RESISTIVITY: &str = "group.resistivity";
    pub const GROUP_UNKNOWN: &str = "group.unknown";
    pub const GROUP_INPUTS: &str = "group.inputs";

    pub const RESISTIVITY_XY: &str = "resistivity.xy";
    pub const RESISTIVITY_Z: &str = "resistivity.z";

    pub const QUANTITY_RESISTANCE: &str = "quantity.resistance";
    pub const QUANTITY_LENGTH: &str = "quantity.length";
    pub const QUANTITY_AREA: &str = "quantity.area";

    pub const INPUT_RESISTANCE: &str = "input.resistance";
    pub const INPUT_LENGTH: &str = "input.length";
    pub const INPUT_AREA: &str = "input.area";
    pub const BUTTON_CALCULATE: &str = "button.calculate";

    pub const ERROR_INVALID_INPUT: &str = "error.invalid_input";
    pub const ERROR_DIVISION_BY_ZERO: &str = "error.division_by_zero";
    pub const ERROR_OVERFLOW: &str = "error.overflow";
    pub const ERROR_NO_SELECTION: &str = "error.no_selection";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_RESISTIVITY: &str = "main_menu.resistivity";
    pub const MAIN_MENU_UNKNOWN: &str = "main_menu.unknown";
    pub const MAIN_MENU_CALCULATE: &str = "main_menu.calculate";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const MAIN_MENU_STATUS: &str = "main_menu.status";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_VALUE: &str = "prompt.value";
    pub const RESISTIVITY_OPTIONS: &str = "resistivity.options";
    pub const UNKNOWN_OPTIONS: &str = "unknown.options";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_DEFAULTS: &str = "settings.prompt_defaults";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const HELP_FORMULA: &str = "help.formula";

    pub const GUI_SETTINGS: &str = "gui.settings.title";
    pub const GUI_SETTINGS_LANGUAGE: &str = "gui.settings.language";
    pub const GUI_SETTINGS_LANGUAGE_AUTO: &str = "gui.settings.language_auto";
    pub const GUI_SETTINGS_DEFAULTS: &str = "gui.settings.defaults";
    pub const GUI_SETTINGS_UI_SCALE: &str = "gui.settings.ui_scale";
    pub const GUI_SETTINGS_ALPHA: &str = "gui.settings.alpha";
    pub const GUI_SETTINGS_ON_TOP: &str = "gui.settings.always_on_top";
    pub const GUI_SETTINGS_FONT: &str = "gui.settings.font";
    pub const GUI_SETTINGS_FONT_BROWSE: &str = "gui.settings.font_browse";
    pub const GUI_SETTINGS_FONT_LOAD: &str = "gui.settings.font_load";
    pub const GUI_SETTINGS_SAVE: &str = "gui.settings.save";
    pub const GUI_SETTINGS_SAVED: &str = "gui.settings.saved";
    pub const GUI_FORMULA: &str = "gui.formula.title";
    pub const GUI_FORMULA_RESISTANCE: &str = "gui.formula.resistance";
    pub const GUI_FORMULA_LENGTH: &str = "gui.formula.length";
    pub const GUI_FORMULA_AREA: &str = "gui.formula.area";
    pub const GUI_FORMULA_UNITS: &str = "gui.formula.units";
    pub const GUI_ABOUT: &str = "gui.about.title";
    pub const GUI_ABOUT_APP: &str = "gui.about.app";
    pub const GUI_ABOUT_ORIENTATION: &str = "gui.about.orientation";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if let Some(map) = &overrides {
            log::info!("language pack for {lang_code}: {} entries", map.len());
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    /// 언어팩에서만 키를 조회한다. 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 영어 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or("[missing translation]").to_string()
    }

    pub fn quantity_name(&self, quantity: Quantity) -> String {
        self.t(match quantity {
            Quantity::Resistance => keys::QUANTITY_RESISTANCE,
            Quantity::Length => keys::QUANTITY_LENGTH,
            Quantity::Area => keys::QUANTITY_AREA,
        })
    }

    pub fn resistivity_label(&self, resistivity: Resistivity) -> String {
        self.t(match resistivity {
            Resistivity::XY => keys::RESISTIVITY_XY,
            Resistivity::Z => keys::RESISTIVITY_Z,
        })
    }

    /// 입력 칸 라벨 (예: `Length (cm):`).
    pub fn input_label(&self, quantity: Quantity) -> String {
        self.t(match quantity {
            Quantity::Resistance => keys::INPUT_RESISTANCE,
            Quantity::Length => keys::INPUT_LENGTH,
            Quantity::Area => keys::INPUT_AREA,
        })
    }

    /// 결과를 `Resistance (R) = 150.0000 Ω` 형태로 표시한다.
    pub fn describe_solution(&self, solution: &Solution, precision: usize) -> String {
        let q = solution.quantity;
        format!(
            "{} ({}) = {:.*} {}",
            self.quantity_name(q),
            q.symbol(),
            precision,
            solution.value,
            q.unit()
        )
    }

    /// 사용자에게 보여줄 오류 메시지.
    pub fn describe_error(&self, err: &SolveError) -> String {
        self.t(match err {
            SolveError::InvalidInput(_) => keys::ERROR_INVALID_INPUT,
            SolveError::DivisionByZero => keys::ERROR_DIVISION_BY_ZERO,
            SolveError::Overflow => keys::ERROR_OVERFLOW,
            SolveError::NoSelection => keys::ERROR_NO_SELECTION,
        })
    }
}

/// `{name}` 형태 자리표시자를 채운다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "en-uk" | "en-gb" => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        match parse_toml_to_map(&content) {
            Ok(map) if map.is_empty() => {
                log::warn!("language pack {} has no string entries", path.display());
                None
            }
            Ok(map) => Some(map),
            Err(e) => {
                log::warn!("ignoring malformed language pack {}: {e}", path.display());
                None
            }
        }
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

/// 중첩 테이블을 점(.)으로 이은 키로 펼친다. 문자열이 아닌 값은 건너뛴다.
fn parse_toml_to_map(src: &str) -> Result<HashMap<String, String>, toml::de::Error> {
    let table: toml::Table = toml::from_str(src)?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in &table {
        walk(k, v, &mut map);
    }
    Ok(map)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Resistance for Printed Protopasta",
        TAB_PROTOPASTA => "Printed Protopasta",
        GROUP_RESISTIVITY => "Select Resistivity",
        GROUP_UNKNOWN => "Unknown to Calculate",
        GROUP_INPUTS => "Input Known Values",
        RESISTIVITY_XY => "X/Y Resistivity (30 Ω·cm)",
        RESISTIVITY_Z => "Z Resistivity (115 Ω·cm)",
        QUANTITY_RESISTANCE => "Resistance",
        QUANTITY_LENGTH => "Length",
        QUANTITY_AREA => "Area",
        INPUT_RESISTANCE => "Resistance (Ω):",
        INPUT_LENGTH => "Length (cm):",
        INPUT_AREA => "Area (cm²):",
        BUTTON_CALCULATE => "Calculate",
        ERROR_INVALID_INPUT => "Please enter valid numeric values.",
        ERROR_DIVISION_BY_ZERO => "Error: Division by zero.",
        ERROR_OVERFLOW => "Error: Result is too large to display.",
        ERROR_NO_SELECTION => "Please select an unknown variable.",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        MAIN_MENU_TITLE => "\n=== Resistance for Printed Protopasta ===",
        MAIN_MENU_RESISTIVITY => "1) Select resistivity",
        MAIN_MENU_UNKNOWN => "2) Select unknown",
        MAIN_MENU_CALCULATE => "3) Enter values and calculate",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        MAIN_MENU_STATUS => "Current: {resistivity} | unknown: {unknown}",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        PROMPT_VALUE => "{name} [{unit}]: ",
        RESISTIVITY_OPTIONS => "1) X/Y (30 Ω·cm)  2) Z (115 Ω·cm)",
        UNKNOWN_OPTIONS => "1) Resistance (R)  2) Length (L)  3) Area (A)",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/en-us/ko-kr, enter to keep): ",
        SETTINGS_PROMPT_DEFAULTS => "Use current selection as startup default? (y/N): ",
        SETTINGS_SAVED => "Settings saved.",
        HELP_FORMULA => "R = ρ·L/A  |  L = R·A/ρ  |  A = ρ·L/R  (Ω, cm, cm², Ω·cm)",
        GUI_SETTINGS => "Settings",
        GUI_SETTINGS_LANGUAGE => "Language",
        GUI_SETTINGS_LANGUAGE_AUTO => "System",
        GUI_SETTINGS_DEFAULTS => "Use current selection as startup default",
        GUI_SETTINGS_UI_SCALE => "UI scale",
        GUI_SETTINGS_ALPHA => "Window transparency",
        GUI_SETTINGS_ON_TOP => "Always on top",
        GUI_SETTINGS_FONT => "Custom font (.ttf/.ttc)",
        GUI_SETTINGS_FONT_BROWSE => "Browse…",
        GUI_SETTINGS_FONT_LOAD => "Load font",
        GUI_SETTINGS_SAVE => "Save settings",
        GUI_SETTINGS_SAVED => "Saved.",
        GUI_FORMULA => "Formula reference",
        GUI_FORMULA_RESISTANCE => "Resistance: R = ρ·L / A",
        GUI_FORMULA_LENGTH => "Length: L = R·A / ρ",
        GUI_FORMULA_AREA => "Area: A = ρ·L / R",
        GUI_FORMULA_UNITS => "Units: R in Ω, L in cm, A in cm², ρ in Ω·cm.",
        GUI_ABOUT => "Help / About",
        GUI_ABOUT_APP => "Resistance calculator for 3D-printed conductive Protopasta.",
        GUI_ABOUT_ORIENTATION => {
            "X/Y: current flows along the print layers. Z: current crosses layer boundaries."
        }
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "출력된 Protopasta 저항 계산기",
        TAB_PROTOPASTA => "출력된 Protopasta",
        GROUP_RESISTIVITY => "비저항 선택",
        GROUP_UNKNOWN => "계산할 미지수",
        GROUP_INPUTS => "알고 있는 값 입력",
        RESISTIVITY_XY => "X/Y 비저항 (30 Ω·cm)",
        RESISTIVITY_Z => "Z 비저항 (115 Ω·cm)",
        QUANTITY_RESISTANCE => "저항",
        QUANTITY_LENGTH => "길이",
        QUANTITY_AREA => "면적",
        INPUT_RESISTANCE => "저항 (Ω):",
        INPUT_LENGTH => "길이 (cm):",
        INPUT_AREA => "면적 (cm²):",
        BUTTON_CALCULATE => "계산",
        ERROR_INVALID_INPUT => "올바른 숫자를 입력하세요.",
        ERROR_DIVISION_BY_ZERO => "오류: 0으로 나눌 수 없습니다.",
        ERROR_OVERFLOW => "오류: 결과가 너무 커서 표시할 수 없습니다.",
        ERROR_NO_SELECTION => "미지수를 선택하세요.",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        MAIN_MENU_TITLE => "\n=== 출력된 Protopasta 저항 계산기 ===",
        MAIN_MENU_RESISTIVITY => "1) 비저항 선택",
        MAIN_MENU_UNKNOWN => "2) 미지수 선택",
        MAIN_MENU_CALCULATE => "3) 값 입력 후 계산",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        MAIN_MENU_STATUS => "현재: {resistivity} | 미지수: {unknown}",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        PROMPT_VALUE => "{name} [{unit}]: ",
        RESISTIVITY_OPTIONS => "1) X/Y (30 Ω·cm)  2) Z (115 Ω·cm)",
        UNKNOWN_OPTIONS => "1) 저항 (R)  2) 길이 (L)  3) 면적 (A)",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_PROMPT_LANGUAGE => "언어 (auto/en-us/ko-kr, 유지하려면 엔터): ",
        SETTINGS_PROMPT_DEFAULTS => "현재 선택을 시작 기본값으로 저장할까요? (y/N): ",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        GUI_SETTINGS => "설정",
        GUI_SETTINGS_LANGUAGE => "언어",
        GUI_SETTINGS_LANGUAGE_AUTO => "시스템",
        GUI_SETTINGS_DEFAULTS => "현재 선택을 시작 기본값으로 사용",
        GUI_SETTINGS_UI_SCALE => "UI 배율",
        GUI_SETTINGS_ALPHA => "창 투명도",
        GUI_SETTINGS_ON_TOP => "항상 위",
        GUI_SETTINGS_FONT => "사용자 폰트 (.ttf/.ttc)",
        GUI_SETTINGS_FONT_BROWSE => "찾아보기…",
        GUI_SETTINGS_FONT_LOAD => "폰트 적용",
        GUI_SETTINGS_SAVE => "설정 저장",
        GUI_SETTINGS_SAVED => "저장되었습니다.",
        GUI_FORMULA => "공식 참고",
        GUI_FORMULA_RESISTANCE => "저항: R = ρ·L / A",
        GUI_FORMULA_LENGTH => "길이: L = R·A / ρ",
        GUI_FORMULA_AREA => "면적: A = ρ·L / R",
        GUI_FORMULA_UNITS => "단위: R은 Ω, L은 cm, A는 cm², ρ는 Ω·cm.",
        GUI_ABOUT => "도움말 / 정보",
        GUI_ABOUT_APP => "3D 프린팅한 전도성 Protopasta 저항 계산기.",
        GUI_ABOUT_ORIENTATION => "X/Y: 레이어를 따라 전류가 흐름. Z: 레이어 경계를 가로질러 흐름.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_falls_back_to_english_for_missing_keys() {
        let tr = Translator::new("ko-kr");
        assert_eq!(tr.t(keys::BUTTON_CALCULATE), "계산");
        assert_eq!(tr.t(keys::HELP_FORMULA), en(keys::HELP_FORMULA).unwrap());
    }

    #[test]
    fn unknown_language_uses_english() {
        let tr = Translator::new("fr");
        assert_eq!(tr.lang, Language::En);
        assert_eq!(tr.t(keys::ERROR_DIVISION_BY_ZERO), "Error: Division by zero.");
    }

    #[test]
    fn explicit_language_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en-us")), "ko-kr");
        assert_eq!(resolve_language("auto", Some("en")), "en-us");
    }

    #[test]
    fn nested_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[button]\ncalculate = \"Go\"\n").unwrap();
        assert_eq!(map.get("button.calculate").map(String::as_str), Some("Go"));
    }

    #[test]
    fn pack_without_strings_is_empty_and_malformed_pack_is_error() {
        assert!(parse_toml_to_map("version = 3\n").unwrap().is_empty());
        assert!(parse_toml_to_map("button = [").is_err());
    }

    #[test]
    fn overrides_fall_back_to_base_code_and_skip_empty_packs() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("ko.toml"), "[button]\ncalculate = \"실행\"\n")
            .expect("write");
        std::fs::write(dir.path().join("en.toml"), "version = 1\n").expect("write");
        let dir_str = dir.path().to_str().expect("utf-8 path");

        let map = load_overrides(dir_str, "ko-kr").expect("ko pack");
        assert_eq!(map.get("button.calculate").map(String::as_str), Some("실행"));
        assert!(load_overrides(dir_str, "en-us").is_none());

        let tr = Translator::new_with_pack("ko-kr", Some(dir_str));
        assert_eq!(tr.t(keys::BUTTON_CALCULATE), "실행");
    }

    #[test]
    fn overflow_has_its_own_message() {
        let tr = Translator::new("en");
        assert_eq!(
            tr.describe_error(&SolveError::Overflow),
            "Error: Result is too large to display."
        );
    }

    #[test]
    fn describe_solution_matches_result_label() {
        let tr = Translator::new("en");
        let s = Solution {
            quantity: Quantity::Resistance,
            value: 150.0,
        };
        assert_eq!(tr.describe_solution(&s, 4), "Resistance (R) = 150.0000 Ω");
    }
}
