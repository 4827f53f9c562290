//! Configuration types for text conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls, serialise them for logging, and
//! diff two runs to understand why their outputs differ.
//!
//! Credentials are deliberately absent: the completion provider and the page
//! store are constructed by the caller and passed in as trait objects, so
//! the config stays safe to log.

use crate::error::ScribedownError;
use serde::{Deserialize, Serialize};

/// Model used when the caller does not pick one. A baseline inexpensive
/// model is the right default for formatting work.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature for conversion and summarisation calls.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Configuration for a conversion run.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use scribedown::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .model("gpt-4o-mini")
///     .summary_prompt("3行で要約してください。")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// LLM model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Sampling temperature. Default: 0.7.
    ///
    /// Formatting work tolerates a little creativity (section names, list
    /// grouping) but should not invent content; 0.7 matches the behaviour
    /// users calibrated against.
    pub temperature: f32,

    /// Maximum tokens the model may generate. `None` leaves the API default.
    pub max_tokens: Option<u32>,

    /// User-supplied summary instruction. When set, it replaces the default
    /// two-section summary prompt for transcription summaries.
    pub summary_prompt: Option<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            summary_prompt: None,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.config.max_tokens = Some(n);
        self
    }

    pub fn summary_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.summary_prompt = Some(prompt.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ScribedownError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(ScribedownError::InvalidConfig(
                "Model identifier must not be empty".into(),
            ));
        }
        if !(0.0..=2.0).contains(&c.temperature) {
            return Err(ScribedownError::InvalidConfig(format!(
                "Temperature must be 0.0–2.0, got {}",
                c.temperature
            )));
        }
        Ok(self.config)
    }
}
