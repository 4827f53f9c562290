//! Error types for the scribedown library.
//!
//! A single fatal error enum covers the orchestrator boundary. The two
//! external clients ([`crate::llm`] and [`crate::notion`]) carry their own
//! local error enums and are mapped into [`ScribedownError`] variants at the
//! point where an orchestrator decides how a failure is surfaced.
//!
//! Conversion failures are never propagated past the orchestrator as `Err`:
//! [`crate::convert::convert`] always returns a
//! [`crate::convert::ConversionResult`] carrying an optional error, so a UI
//! or CLI caller can render a message without unwinding. Persistence is
//! different — each destination returns a plain `Result`, and
//! [`crate::persist::persist`] reports both destinations independently.

use std::path::PathBuf;
use thiserror::Error;

/// All errors surfaced by the scribedown library.
#[derive(Debug, Error)]
pub enum ScribedownError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// No completion provider was supplied (missing API key).
    #[error("OpenAI API not initialized. Please check your API key.")]
    NotConfigured,

    /// The remote page store is enabled but missing its credential or target.
    #[error("Notion API key or database ID is missing.")]
    RemoteStoreNotConfigured,

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── External call failures ────────────────────────────────────────────
    /// The chat-completion call failed (network, auth, malformed response).
    ///
    /// The underlying message is passed through verbatim; there is no retry.
    #[error("OpenAI API エラー: {message}")]
    CompletionFailed { message: String },

    /// The remote page-creation call failed.
    #[error("Notion API エラー: {message}")]
    PageCreateFailed { message: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output Markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_failed_carries_underlying_message() {
        let e = ScribedownError::CompletionFailed {
            message: "401 Unauthorized".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("OpenAI API エラー"), "got: {msg}");
        assert!(msg.contains("401 Unauthorized"), "got: {msg}");
    }

    #[test]
    fn page_create_failed_carries_underlying_message() {
        let e = ScribedownError::PageCreateFailed {
            message: "database not found".into(),
        };
        assert!(e.to_string().contains("database not found"));
    }

    #[test]
    fn not_configured_mentions_api_key() {
        let e = ScribedownError::NotConfigured;
        assert!(e.to_string().contains("API key"));
    }

    #[test]
    fn remote_store_not_configured_names_both_missing_pieces() {
        let msg = ScribedownError::RemoteStoreNotConfigured.to_string();
        assert!(msg.contains("API key"), "got: {msg}");
        assert!(msg.contains("database ID"), "got: {msg}");
    }

    #[test]
    fn output_write_failed_shows_path() {
        let e = ScribedownError::OutputWriteFailed {
            path: PathBuf::from("/tmp/notes/x.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/tmp/notes/x.md"));
    }
}
