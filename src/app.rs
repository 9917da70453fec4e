use std::io;
use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::quantity::Quantity;
use crate::resistivity::Resistivity;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 표준 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Config(e) => write!(f, "settings error: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}


/// 대화형 세션에서 유지되는 선택 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub resistivity: Resistivity,
    pub unknown: Quantity,
}

impl Selection {
    pub fn from_config(config: &Config) -> Self {
        Self {
            resistivity: config.default_resistivity,
            unknown: config.default_unknown,
        }
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
/// 설정 메뉴에서 바꾼 값은 `config_path`에 즉시 저장한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<(), AppError> {
    let mut selection = Selection::from_config(config);
    loop {
        // 메뉴에서 입력이 끝나면 종료로 처리한다.
        let choice = match ui_cli::main_menu(tr, &selection) {
            Ok(choice) => choice,
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => MenuChoice::Exit,
            Err(e) => return Err(e),
        };
        match choice {
            MenuChoice::Resistivity => ui_cli::handle_resistivity(tr, &mut selection)?,
            MenuChoice::Unknown => ui_cli::handle_unknown(tr, &mut selection)?,
            MenuChoice::Calculate => ui_cli::handle_calculate(tr, config, &selection)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config, &selection)?;
                config.save_to(config_path)?;
                let lang = i18n::resolve_language(&config.language, None);
                *tr = Translator::new_with_pack(&lang, config.language_pack_dir.as_deref());
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
