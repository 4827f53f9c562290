//! End-to-end pipeline tests with in-memory collaborators.
//!
//! No network: the completion capability and the page store are replaced by
//! canned implementations that record what the pipeline asked of them.

use async_trait::async_trait;
use std::sync::Mutex;

use scribedown::{
    convert, persist, ConversionConfig, ConversionRequest, Document, InputMode, PersistTargets,
    SaveOptions, SaveOutcome, ScribedownError,
};
use scribedown::llm::{CompletionProvider, CompletionRequest, LlmError};
use scribedown::notion::{CreatedPage, NotionError, PageStore};

// ── Test collaborators ───────────────────────────────────────────────────────

/// Completion provider that records every request and returns a fixed reply.
struct RecordingProvider {
    reply: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingProvider {
    fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for RecordingProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request);
        Ok(self.reply.clone())
    }
}

/// Completion provider that always fails like an auth error.
struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 401,
            body: "Incorrect API key provided".into(),
        })
    }
}

/// Page store that records the submitted title and blocks.
#[derive(Default)]
struct RecordingStore {
    pages: Mutex<Vec<(String, Vec<String>)>>,
}

#[async_trait]
impl PageStore for RecordingStore {
    async fn create_page(
        &self,
        title: &str,
        blocks: &[String],
    ) -> Result<CreatedPage, NotionError> {
        self.pages
            .lock()
            .unwrap()
            .push((title.to_string(), blocks.to_vec()));
        Ok(CreatedPage {
            page_id: "abc-123".into(),
            page_url: "https://notion.so/abc123".into(),
        })
    }
}

/// Page store that always fails.
struct FailingStore;

#[async_trait]
impl PageStore for FailingStore {
    async fn create_page(
        &self,
        _title: &str,
        _blocks: &[String],
    ) -> Result<CreatedPage, NotionError> {
        Err(NotionError::Api {
            status: 404,
            body: "database not found".into(),
        })
    }
}

// ── Conversion scenarios ─────────────────────────────────────────────────────

#[tokio::test]
async fn plain_prose_goes_down_the_conversion_path() {
    let provider = RecordingProvider::replying("# Hello\n\nworld");
    let request = ConversionRequest {
        text: "Hello world".into(),
        wants_summary: false,
        mode: InputMode::Text,
    };

    let result = convert(&request, &ConversionConfig::default(), Some(&provider)).await;

    assert!(result.succeeded());
    assert_eq!(result.text, "# Hello\n\nworld");
    assert!(!result.was_already_markup);
    assert!(!result.was_transcription);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].user.contains("マークダウン形式に変換"));
    assert!(!requests[0].user.contains("# サマリー"));
    assert!(requests[0].user.contains("Hello world"));
    assert_eq!(requests[0].temperature, 0.7);
    assert_eq!(requests[0].model, "gpt-3.5-turbo");
}

#[tokio::test]
async fn transcription_with_summary_uses_summary_instruction() {
    let provider = RecordingProvider::replying("# サマリー\n…");
    let request = ConversionRequest {
        text: "[00:01] Hello\n話者A: Hi".into(),
        wants_summary: true,
        mode: InputMode::Text,
    };

    let result = convert(&request, &ConversionConfig::default(), Some(&provider)).await;

    assert!(result.succeeded());
    assert!(result.was_transcription);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].user.contains("# サマリー"));
    assert!(requests[0].user.contains("# 元の書き起こし"));
    assert!(requests[0].user.contains("[00:01] Hello\n話者A: Hi"));
}

#[tokio::test]
async fn markdown_input_skips_the_provider_entirely() {
    let provider = RecordingProvider::replying("should never be used");
    let request = ConversionRequest {
        text: "# Already formatted\n\n- bullet".into(),
        wants_summary: false,
        mode: InputMode::Markdown,
    };

    let result = convert(&request, &ConversionConfig::default(), Some(&provider)).await;

    assert!(result.succeeded());
    assert!(result.was_already_markup);
    assert_eq!(result.text, "# Already formatted\n\n- bullet");
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn same_text_converts_in_text_mode() {
    let provider = RecordingProvider::replying("converted");
    let request = ConversionRequest {
        text: "# Already formatted\n\n- bullet".into(),
        wants_summary: false,
        mode: InputMode::Text,
    };

    let result = convert(&request, &ConversionConfig::default(), Some(&provider)).await;

    assert!(result.succeeded());
    assert!(!result.was_already_markup);
    assert_eq!(provider.requests().len(), 1);
}

#[tokio::test]
async fn completion_failure_surfaces_the_underlying_message() {
    let request = ConversionRequest::new("Hello world");
    let result = convert(&request, &ConversionConfig::default(), Some(&FailingProvider)).await;

    assert!(!result.succeeded());
    let message = result.error.unwrap().to_string();
    assert!(message.contains("OpenAI API エラー"), "got: {message}");
    assert!(message.contains("Incorrect API key provided"), "got: {message}");
}

#[tokio::test]
async fn custom_summary_prompt_replaces_the_default() {
    let provider = RecordingProvider::replying("ok");
    let config = ConversionConfig::builder()
        .summary_prompt("箇条書きで要約してください。")
        .build()
        .unwrap();
    let request = ConversionRequest {
        text: "(01:30) recap of the week".into(),
        wants_summary: true,
        mode: InputMode::Text,
    };

    convert(&request, &config, Some(&provider)).await;

    let requests = provider.requests();
    assert!(requests[0].user.starts_with("箇条書きで要約してください。"));
    assert!(!requests[0].user.contains("# 元の書き起こし"));
}

// ── Persistence scenarios ────────────────────────────────────────────────────

fn document(text: &str) -> Document {
    Document::new(text, InputMode::Markdown)
}

#[tokio::test]
async fn persist_writes_file_and_page_independently() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordingStore::default();
    let doc = document("# Weekly Notes\n\nbody text");

    let targets = PersistTargets {
        file: Some(SaveOptions {
            directory: Some(dir.path().to_path_buf()),
            suggested_name: None,
            skip_picker: true,
        }),
        picker: None,
        page_store: Some(&store),
        completion: None,
        model: "gpt-3.5-turbo".into(),
    };

    let report = persist(&doc, &targets).await;

    let file = report.file.unwrap().unwrap();
    let SaveOutcome::Saved(path) = file else {
        panic!("expected a saved file");
    };
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .ends_with("-Weekly Notes.md"));

    let page = report.page.unwrap().unwrap();
    assert_eq!(page.page_id, "abc-123");

    let pages = store.pages.lock().unwrap();
    assert_eq!(pages.len(), 1);
    let (title, blocks) = &pages[0];
    assert_eq!(title, "Weekly Notes");
    assert_eq!(blocks, &vec!["# Weekly Notes".to_string(), "body text".to_string()]);
}

#[tokio::test]
async fn page_failure_does_not_block_the_file_write() {
    let dir = tempfile::tempdir().unwrap();
    let doc = document("# Title\n\nbody");

    let targets = PersistTargets {
        file: Some(SaveOptions {
            directory: Some(dir.path().to_path_buf()),
            suggested_name: None,
            skip_picker: true,
        }),
        picker: None,
        page_store: Some(&FailingStore),
        completion: None,
        model: "gpt-3.5-turbo".into(),
    };

    let report = persist(&doc, &targets).await;

    assert!(matches!(report.file, Some(Ok(SaveOutcome::Saved(_)))));
    let page_err = report.page.unwrap().unwrap_err();
    assert!(matches!(page_err, ScribedownError::PageCreateFailed { .. }));
    assert!(page_err.to_string().contains("database not found"));
}

#[tokio::test]
async fn long_content_is_chunked_for_the_page_store() {
    let store = RecordingStore::default();
    let long_paragraph = "x".repeat(4000);
    let doc = document(&format!("# Big\n\n{long_paragraph}"));

    let targets = PersistTargets {
        file: None,
        picker: None,
        page_store: Some(&store),
        completion: None,
        model: "gpt-3.5-turbo".into(),
    };

    let report = persist(&doc, &targets).await;
    assert!(report.file.is_none());
    report.page.unwrap().unwrap();

    let pages = store.pages.lock().unwrap();
    let (_, blocks) = &pages[0];
    // "# Big" plus 4000/1900 → three pieces of the long paragraph.
    assert_eq!(blocks.len(), 4);
    for b in blocks {
        assert!(b.chars().count() <= 1900);
    }
    assert_eq!(blocks[1..].concat(), long_paragraph);
}

#[tokio::test]
async fn page_title_is_truncated_to_one_hundred_chars() {
    let store = RecordingStore::default();
    let heading = "あ".repeat(150);
    let doc = document(&format!("# {heading}\n\nbody"));

    let targets = PersistTargets {
        file: None,
        picker: None,
        page_store: Some(&store),
        completion: None,
        model: "gpt-3.5-turbo".into(),
    };

    persist(&doc, &targets).await.page.unwrap().unwrap();

    let pages = store.pages.lock().unwrap();
    assert_eq!(pages[0].0.chars().count(), 100);
}

#[tokio::test]
async fn known_document_title_short_circuits_derivation() {
    let store = RecordingStore::default();
    let mut doc = document("# Derived Would Be This\n\nbody");
    doc.title = Some("Pinned Title".into());

    let targets = PersistTargets {
        file: None,
        picker: None,
        page_store: Some(&store),
        completion: None,
        model: "gpt-3.5-turbo".into(),
    };

    persist(&doc, &targets).await.page.unwrap().unwrap();
    assert_eq!(store.pages.lock().unwrap()[0].0, "Pinned Title");
}
