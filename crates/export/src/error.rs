use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,

    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("export I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
