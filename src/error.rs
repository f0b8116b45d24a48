use thiserror::Error;

/// Failure talking to the optimization service. Every transport or solver
/// problem collapses into one generic, user-visible message; the run that
/// triggered it is aborted and no partial result is kept.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Error running optimization. Make sure the solver backend is reachable at {base_url}")]
    Backend { base_url: String },
}

/// Failures in the document/CSV export pipeline. `NoTable` is reported
/// distinctly from everything else: it aborts only the export that asked for
/// vector-table mode on a view without tabular content.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no table found in the exported view")]
    NoTable,
    #[error("no bitmap capture in the exported view")]
    NoBitmap,
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render document: {0}")]
    Pdf(String),
    #[error("failed to serialize rows: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode captured bitmap: {0}")]
    Encode(String),
}
