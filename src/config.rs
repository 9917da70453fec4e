use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::quantity::Quantity;
use crate::resistivity::Resistivity;

/// 기본 설정 파일 경로.
pub const CONFIG_FILE: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 시작 시 선택되는 출력 방향(비저항)
    pub default_resistivity: Resistivity,
    /// 시작 시 선택되는 미지수
    pub default_unknown: Quantity,
    /// 언어 코드 (auto/en-us/ko-kr 등)
    pub language: String,
    /// 외부 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// 결과 표시 소수 자릿수
    pub precision: usize,
    /// GUI 창 투명도 (0.3~1.0)
    pub window_alpha: f32,
    /// GUI 배율 (0.8~1.6)
    pub ui_scale: f32,
    pub always_on_top: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_resistivity: Resistivity::XY,
            default_unknown: Quantity::Resistance,
            language: "auto".into(),
            language_pack_dir: None,
            precision: 4,
            window_alpha: 1.0,
            ui_scale: 1.0,
            always_on_top: false,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "file I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(Path::new(CONFIG_FILE))
}

/// 지정한 경로에서 설정을 로드한다. 파일이 없으면 기본값을 저장 후 반환한다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let mut cfg: Config = toml::from_str(&content)?;
        cfg.window_alpha = cfg.window_alpha.clamp(0.3, 1.0);
        cfg.ui_scale = cfg.ui_scale.clamp(0.8, 1.6);
        log::info!("loaded settings from {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        log::info!("created default settings at {}", path.display());
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)?;
        log::info!("saved settings to {}", path.display());
        Ok(())
    }
}
