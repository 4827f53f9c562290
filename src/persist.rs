//! Persistence orchestration: filesystem artifact and remote page.
//!
//! The two destinations are independent by design — a Notion outage must not
//! cost the user their local file, and a read-only disk must not block the
//! page upload. [`persist`] attempts whichever destinations are configured
//! and reports each outcome separately in [`PersistReport`].
//!
//! A dismissed destination picker is a non-error: the user changed their
//! mind, nothing failed. That outcome is [`SaveOutcome::Cancelled`], never
//! an `Err`.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::convert::Document;
use crate::error::ScribedownError;
use crate::llm::CompletionProvider;
use crate::notion::{CreatedPage, PageStore};
use crate::pipeline::chunk::{chunk_blocks, BLOCK_CHUNK_SIZE};
use crate::pipeline::title::{
    derive_title, sanitize_filename_component, truncate_chars, FILENAME_TITLE_CHARS,
    PAGE_TITLE_CHARS,
};

/// Interactive destination picker — an external collaborator (a file dialog
/// in the desktop front-end). Returns `None` when dismissed.
pub trait SavePicker {
    fn pick(&self, suggested: &Path) -> Option<PathBuf>;
}

/// Options for the filesystem destination.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Target directory. Defaults to the current directory.
    pub directory: Option<PathBuf>,
    /// Suggested filename handed to the interactive picker.
    pub suggested_name: Option<String>,
    /// Skip the interactive picker and name the file
    /// `<YYYYMMDD>-<title>.md` automatically.
    pub skip_picker: bool,
}

/// Outcome of the filesystem destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// The interactive picker was dismissed; nothing was written.
    Cancelled,
}

/// Destinations and collaborators for one [`persist`] call.
pub struct PersistTargets<'a> {
    /// Filesystem destination; `None` skips the file write entirely.
    pub file: Option<SaveOptions>,
    /// Picker used when `skip_picker` is false.
    pub picker: Option<&'a dyn SavePicker>,
    /// Remote page store; `None` skips the remote destination.
    pub page_store: Option<&'a dyn PageStore>,
    /// Completion provider for AI title derivation. Optional — titles fall
    /// back to heuristics without it.
    pub completion: Option<&'a dyn CompletionProvider>,
    /// Model used for AI title derivation.
    pub model: String,
}

/// Per-destination outcomes. A `None` field means that destination was not
/// configured for this call.
#[derive(Debug, Default)]
pub struct PersistReport {
    pub file: Option<Result<SaveOutcome, ScribedownError>>,
    pub page: Option<Result<CreatedPage, ScribedownError>>,
}

/// Persist a document to every configured destination.
///
/// Destinations are attempted sequentially (file first) and never roll each
/// other back.
pub async fn persist(doc: &Document, targets: &PersistTargets<'_>) -> PersistReport {
    let mut report = PersistReport::default();

    if let Some(opts) = &targets.file {
        report.file = Some(
            save_markdown(
                &doc.text,
                doc.title.as_deref(),
                opts,
                targets.picker,
                targets.completion,
                &targets.model,
            )
            .await,
        );
    }

    if let Some(store) = targets.page_store {
        report.page = Some(
            save_to_page_store(
                &doc.text,
                doc.title.as_deref(),
                store,
                targets.completion,
                &targets.model,
            )
            .await,
        );
    }

    report
}

/// Write `content` as a Markdown file.
///
/// With `skip_picker`, the filename is `<YYYYMMDD>-<sanitized title>.md` in
/// the configured directory and parents are created as needed. Otherwise the
/// picker chooses the full path and no title derivation happens.
pub async fn save_markdown(
    content: &str,
    known_title: Option<&str>,
    opts: &SaveOptions,
    picker: Option<&dyn SavePicker>,
    completion: Option<&dyn CompletionProvider>,
    model: &str,
) -> Result<SaveOutcome, ScribedownError> {
    let directory = opts
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let path = if opts.skip_picker {
        let title = match known_title {
            Some(t) => t.to_string(),
            None => derive_title(content, model, completion).await,
        };
        let title = sanitize_filename_component(&truncate_chars(&title, FILENAME_TITLE_CHARS));
        let date = chrono::Local::now().format("%Y%m%d");
        directory.join(format!("{date}-{title}.md"))
    } else {
        let suggested =
            directory.join(opts.suggested_name.as_deref().unwrap_or("untitled.md"));
        match picker.and_then(|p| p.pick(&suggested)) {
            Some(path) => path,
            None => {
                debug!("save picker dismissed, nothing written");
                return Ok(SaveOutcome::Cancelled);
            }
        }
    };

    write_atomic(&path, content).await?;
    info!("saved markdown to {}", path.display());
    Ok(SaveOutcome::Saved(path))
}

/// Atomic write: temp file in the target directory, then rename.
async fn write_atomic(path: &Path, content: &str) -> Result<(), ScribedownError> {
    let write_failed = |source: std::io::Error| ScribedownError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
        }
    }

    let tmp_path = path.with_extension("md.tmp");
    tokio::fs::write(&tmp_path, content).await.map_err(write_failed)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_failed)?;
    Ok(())
}

/// Create one remote page from `content`.
///
/// Title derivation uses the 100-character page limit; content is chunked at
/// the 1900-character block ceiling and submitted as ordered paragraph
/// children in a single call.
pub async fn save_to_page_store(
    content: &str,
    known_title: Option<&str>,
    store: &dyn PageStore,
    completion: Option<&dyn CompletionProvider>,
    model: &str,
) -> Result<CreatedPage, ScribedownError> {
    let title = match known_title {
        Some(t) => t.to_string(),
        None => derive_title(content, model, completion).await,
    };
    let title = truncate_chars(&title, PAGE_TITLE_CHARS);

    let blocks = chunk_blocks(content, BLOCK_CHUNK_SIZE);
    debug!(blocks = blocks.len(), "submitting page '{title}'");

    store
        .create_page(&title, &blocks)
        .await
        .map_err(|e| ScribedownError::PageCreateFailed {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DismissingPicker;
    impl SavePicker for DismissingPicker {
        fn pick(&self, _suggested: &Path) -> Option<PathBuf> {
            None
        }
    }

    struct FixedPicker(PathBuf);
    impl SavePicker for FixedPicker {
        fn pick(&self, _suggested: &Path) -> Option<PathBuf> {
            Some(self.0.clone())
        }
    }

    #[tokio::test]
    async fn skip_picker_names_file_from_heading_and_date() {
        let dir = tempfile::tempdir().unwrap();
        let opts = SaveOptions {
            directory: Some(dir.path().to_path_buf()),
            suggested_name: None,
            skip_picker: true,
        };
        let outcome = save_markdown("# 会議メモ\n本文", None, &opts, None, None, "m")
            .await
            .unwrap();

        let SaveOutcome::Saved(path) = outcome else {
            panic!("expected a saved file");
        };
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        let date = chrono::Local::now().format("%Y%m%d").to_string();
        assert_eq!(name, format!("{date}-会議メモ.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# 会議メモ\n本文");
    }

    #[tokio::test]
    async fn skip_picker_sanitizes_illegal_title_characters() {
        let dir = tempfile::tempdir().unwrap();
        let opts = SaveOptions {
            directory: Some(dir.path().to_path_buf()),
            suggested_name: None,
            skip_picker: true,
        };
        let outcome = save_markdown("# a/b:c\nbody", None, &opts, None, None, "m")
            .await
            .unwrap();
        let SaveOutcome::Saved(path) = outcome else {
            panic!("expected a saved file");
        };
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .ends_with("-a-b-c.md"));
    }

    #[tokio::test]
    async fn skip_picker_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("notes/2026");
        let opts = SaveOptions {
            directory: Some(nested.clone()),
            suggested_name: None,
            skip_picker: true,
        };
        let outcome = save_markdown("no heading here", None, &opts, None, None, "m")
            .await
            .unwrap();
        assert!(matches!(outcome, SaveOutcome::Saved(p) if p.starts_with(&nested)));
    }

    #[tokio::test]
    async fn dismissed_picker_is_cancelled_not_error() {
        let opts = SaveOptions::default();
        let outcome = save_markdown("text", None, &opts, Some(&DismissingPicker), None, "m")
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Cancelled);
    }

    #[tokio::test]
    async fn picker_path_is_used_verbatim_without_date_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("chosen.md");
        let picker = FixedPicker(target.clone());
        let opts = SaveOptions::default();
        let outcome = save_markdown("# Heading\nbody", None, &opts, Some(&picker), None, "m")
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Saved(target.clone()));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "# Heading\nbody");
    }
}
