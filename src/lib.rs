//! 핵심 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 계산기를 공유한다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod quantity;
pub mod resistivity;
pub mod solver;
pub mod ui_cli;

pub use quantity::Quantity;
pub use resistivity::Resistivity;
pub use solver::{solve, solve_text, KnownValues, Solution, SolveError};
