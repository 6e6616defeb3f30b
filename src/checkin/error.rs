//! Check-in error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while collecting check-in input.
///
/// None of these are fatal: every variant is shown inside the open modal and
/// the attendant re-initiates the action (re-enter the CPF, pick another
/// file, generate a new code).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckinError {
    /// Malformed CPF or token input.
    #[error("entrada inválida: {0}")]
    InvalidInput(String),

    /// The selected token file is not an accepted image type.
    #[error("tipo de arquivo não suportado: {0}")]
    UnsupportedFileType(String),

    /// The selected token file exceeds the configured size limit.
    #[error("arquivo muito grande: {size} bytes (limite {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    /// The generated code expired before it was used.
    #[error("senha expirada")]
    TimerExpired,

    /// The token file could not be read.
    #[error("não foi possível ler {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// A provider key that is not one of the supported convênios.
    #[error("convênio desconhecido: {0}")]
    UnknownProvider(String),
}

/// Result type alias for check-in operations.
pub type CheckinResult<T> = Result<T, CheckinError>;
