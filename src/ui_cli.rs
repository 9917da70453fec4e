use std::io::{self, BufRead, Write};

use crate::app::{AppError, Selection};
use crate::config::Config;
use crate::i18n::{fill_template, keys, Translator};
use crate::quantity::Quantity;
use crate::resistivity::Resistivity;
use crate::solver::{self, KnownValues, Solution, SolveError};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Resistivity,
    Unknown,
    Calculate,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator, selection: &Selection) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!(
        "{}",
        fill_template(
            &tr.t(keys::MAIN_MENU_STATUS),
            &[
                ("resistivity", tr.resistivity_label(selection.resistivity)),
                ("unknown", tr.quantity_name(selection.unknown)),
            ],
        )
    );
    for key in [
        keys::MAIN_MENU_RESISTIVITY,
        keys::MAIN_MENU_UNKNOWN,
        keys::MAIN_MENU_CALCULATE,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        if let Some(choice) = parse_menu_choice(&sel) {
            return Ok(choice);
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::Resistivity),
        "2" => Some(MenuChoice::Unknown),
        "3" => Some(MenuChoice::Calculate),
        "4" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 비저항(출력 방향) 선택 메뉴를 처리한다.
pub fn handle_resistivity(tr: &Translator, selection: &mut Selection) -> Result<(), AppError> {
    println!("{}", tr.t(keys::RESISTIVITY_OPTIONS));
    let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => selection.resistivity = Resistivity::XY,
        "2" => selection.resistivity = Resistivity::Z,
        _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
    }
    Ok(())
}

/// 미지수 선택 메뉴를 처리한다.
pub fn handle_unknown(tr: &Translator, selection: &mut Selection) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNKNOWN_OPTIONS));
    let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => selection.unknown = Quantity::Resistance,
        "2" => selection.unknown = Quantity::Length,
        "3" => selection.unknown = Quantity::Area,
        _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
    }
    Ok(())
}

/// 미지수가 아닌 두 값을 입력받아 계산 결과를 출력한다.
/// 계산 오류는 메시지로만 표시하고 메뉴로 돌아간다.
pub fn handle_calculate(
    tr: &Translator,
    config: &Config,
    selection: &Selection,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::HELP_FORMULA));
    let mut known = KnownValues::default();
    for q in selection.unknown.required_inputs() {
        let prompt = fill_template(
            &tr.t(keys::PROMPT_VALUE),
            &[("name", tr.quantity_name(q)), ("unit", q.unit().to_string())],
        );
        let text = read_line(&prompt)?;
        if let Some(v) = solver::parse_field(&text) {
            known = known.with(q, v);
        }
    }
    let result = solver::solve(selection.resistivity, Some(selection.unknown), &known);
    println!("{}", render_outcome(tr, &result, config.precision));
    Ok(())
}

/// 계산 결과 또는 오류를 사용자용 문자열로 만든다.
pub fn render_outcome(
    tr: &Translator,
    result: &Result<Solution, SolveError>,
    precision: usize,
) -> String {
    match result {
        Ok(solution) => tr.describe_solution(solution, precision),
        Err(err) => {
            log::warn!("calculation rejected: {err}");
            tr.describe_error(err)
        }
    }
}

/// `solve` 서브커맨드 한 번의 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    pub text: String,
    pub ok: bool,
}

/// 일회성 계산을 수행한다. 방향/미지수를 생략하면 설정의 기본값을 쓴다.
pub fn run_solve_command(
    tr: &Translator,
    config: &Config,
    orientation: Option<Resistivity>,
    unknown: Option<Quantity>,
    resistance: &str,
    length: &str,
    area: &str,
) -> SolveOutcome {
    let resistivity = orientation.unwrap_or(config.default_resistivity);
    let unknown = unknown.unwrap_or(config.default_unknown);
    let result = solver::solve_text(resistivity, Some(unknown), resistance, length, area);
    SolveOutcome {
        text: render_outcome(tr, &result, config.precision),
        ok: result.is_ok(),
    }
}

/// 설정 메뉴를 처리한다. 저장은 호출 측에서 한다.
pub fn handle_settings(
    tr: &Translator,
    cfg: &mut Config,
    selection: &Selection,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    let lang = read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    if !lang.trim().is_empty() {
        cfg.language = lang.trim().to_string();
    }
    let defaults = read_line(&tr.t(keys::SETTINGS_PROMPT_DEFAULTS))?;
    if matches!(defaults.trim().to_lowercase().as_str(), "y" | "yes") {
        cfg.default_resistivity = selection.resistivity;
        cfg.default_unknown = selection.unknown;
    }
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    read_line_from(&mut io::stdin().lock())
}

/// 한 줄을 읽는다. 입력이 끝났으면(EOF) `UnexpectedEof` 오류를 돌려준다.
fn read_line_from<R: BufRead>(reader: &mut R) -> Result<String, AppError> {
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "end of input",
        )));
    }
    Ok(buf)
}
