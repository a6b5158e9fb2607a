use dome_kernel::DomeError;

/// Errors while reading a snapshot or a cutting list.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse file: {0}")]
    ParseError(String),

    #[error("unknown file format: {0}")]
    UnknownFormat(String),

    #[error("file version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },

    #[error("stored configuration is invalid: {0}")]
    InvalidConfig(#[from] DomeError),

    #[error("unexpected CSV header: {0}")]
    BadHeader(String),

    #[error("CSV line {line}: {reason}")]
    BadRow { line: usize, reason: String },
}

/// Errors while writing a snapshot.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("serialization failed: {0}")]
    Serialization(String),
}
