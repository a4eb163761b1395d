use thiserror::Error;

/// Errors surfaced by configuration loading and the terminal front-end.
///
/// The simulation itself never fails: placement falls back instead of erroring
/// and unmapped keys are ignored.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("terminal is {have_w}x{have_h}, the board needs at least {need_w}x{need_h}")]
    TerminalTooSmall {
        have_w: u16,
        have_h: u16,
        need_w: u16,
        need_h: u16,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
