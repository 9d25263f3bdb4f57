//! Stable error codes shared by every error type in the crate.

/// Machine-readable identity of an error, used as a structured log field.
pub trait ErrorCode {
    /// Stable `E_*` code for this error variant.
    fn error_code(&self) -> &'static str;
}
