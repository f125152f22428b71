use thiserror::Error;
use topasgen::config::ConfigError;
use topasgen::generator::GeneratorError;
use topasgen::layout::LayoutError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
