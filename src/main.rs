use clap::{Parser, Subcommand};
use filament_resistance::{app, config, i18n, ui_cli, Quantity, Resistivity};
use std::path::PathBuf;
use std::process::ExitCode;

/// 출력된 전도성 필라멘트의 저항/길이/면적 계산기 (CLI).
#[derive(Debug, Parser)]
#[command(name = "filament_resistance_cli", version, about)]
struct Cli {
    /// 언어 코드 (auto/en-us/ko-kr)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,

    /// 설정 파일 경로
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 한 번 계산하고 종료한다
    Solve {
        /// 출력 방향: xy 또는 z (생략 시 설정값)
        #[arg(short, long, value_parser = parse_resistivity)]
        orientation: Option<Resistivity>,
        /// 구할 양: r/l/a (생략 시 설정값)
        #[arg(short, long, value_parser = parse_quantity)]
        unknown: Option<Quantity>,
        /// 저항 [Ω]
        #[arg(short = 'r', long, default_value = "", allow_hyphen_values = true)]
        resistance: String,
        /// 길이 [cm]
        #[arg(short = 'l', long, default_value = "", allow_hyphen_values = true)]
        length: String,
        /// 단면적 [cm²]
        #[arg(short = 'a', long, default_value = "", allow_hyphen_values = true)]
        area: String,
    },
}

fn parse_resistivity(s: &str) -> Result<Resistivity, String> {
    Resistivity::from_code(s).ok_or_else(|| format!("unknown orientation '{s}' (use xy or z)"))
}

fn parse_quantity(s: &str) -> Result<Quantity, String> {
    Quantity::from_code(s).ok_or_else(|| format!("unknown quantity '{s}' (use r, l or a)"))
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<ExitCode, app::AppError> {
    let mut cfg = config::load_or_default_at(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    log::debug!("language resolved: {lang}");

    match cli.command {
        Some(Command::Solve {
            orientation,
            unknown,
            resistance,
            length,
            area,
        }) => {
            let outcome = ui_cli::run_solve_command(
                &tr,
                &cfg,
                orientation,
                unknown,
                &resistance,
                &length,
                &area,
            );
            if outcome.ok {
                println!("{}", outcome.text);
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{}", outcome.text);
                Ok(ExitCode::FAILURE)
            }
        }
        None => {
            app::run(&mut cfg, &cli.config, &mut tr)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
