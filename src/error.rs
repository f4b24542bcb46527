//! Build-time error types.
//!
//! Everything here is a configuration error: the registry is static, so a
//! failure means the declaration (or the request made against it) is wrong.
//! The only *runtime* failure lives in the emitted code itself.
use std::path::PathBuf;

/// A malformed static catalog.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate representation `{0}`")]
    DuplicateRepresentation(String),
    #[error("containers `{first}` and `{second}` both abbreviate to `{short_id}`")]
    DuplicateShortId { short_id: String, first: String, second: String },
    #[error("comparison `{op}` names inverse `{inverse}` which is not in the comparison catalog")]
    UnknownInverse { op: String, inverse: String },
    #[error("comparison `{op}` inverts to `{inverse}`, but `{inverse}` inverts to `{back}`")]
    AsymmetricInverse { op: String, inverse: String, back: String },
    #[error("widening target `{0}` is not a registered representation")]
    UnknownWideningTarget(String),
    #[error("widening target `{name}` has category {found}, expected {expected}")]
    WideningCategory { name: String, found: String, expected: String },
}

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("key `{requested}` not present in containers [{known}]")]
    UnknownContainer { requested: String, known: String },
    #[error("invalid generator config at {path}: {message}")]
    Config { path: String, message: String },
    #[error("failed to write `{}`: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
}

pub type Result<T, E = GenError> = std::result::Result<T, E>;
