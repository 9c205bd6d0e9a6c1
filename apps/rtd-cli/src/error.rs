use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Rtd(#[from] rtd_core::RtdError),

    #[error("Scenario error: {0}")]
    Project(#[from] rtd_project::ProjectError),

    #[error("Export error: {0}")]
    Export(#[from] rtd_charts::ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
