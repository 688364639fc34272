//! Quiz configuration and source factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use vocabquiz_core::traits::VocabularySource;

use crate::file::FileSource;
use crate::sheet::{SheetSource, DEFAULT_SHEET_URL, DEFAULT_TIMEOUT_SECS};

/// Text-to-speech settings for pronouncing words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Whether words can be spoken at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Program invoked with the word as its last argument.
    #[serde(default = "default_speech_command")]
    pub command: String,
    /// Arguments placed before the word.
    #[serde(default = "default_speech_args")]
    pub args: Vec<String>,
}

fn default_true() -> bool {
    true
}
fn default_speech_command() -> String {
    "espeak".to_string()
}
fn default_speech_args() -> Vec<String> {
    vec!["-v".to_string(), "en-us".to_string()]
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_speech_command(),
            args: default_speech_args(),
        }
    }
}

/// Top-level vocabquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// gviz JSON endpoint of the vocabulary sheet.
    #[serde(default = "default_sheet_url")]
    pub sheet_url: String,
    /// Question count pre-filled in setup. Free text, validated on start.
    #[serde(default = "default_count")]
    pub default_count: String,
    /// Topic pre-selected in setup ("all" for every topic).
    #[serde(default = "default_topic")]
    pub default_topic: String,
    /// Feed request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Minimum percentage that earns a celebration.
    #[serde(default = "default_threshold")]
    pub celebrate_threshold: u8,
    #[serde(default)]
    pub speech: SpeechConfig,
}

fn default_sheet_url() -> String {
    DEFAULT_SHEET_URL.to_string()
}
fn default_count() -> String {
    "10".to_string()
}
fn default_topic() -> String {
    "all".to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_threshold() -> u8 {
    80
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            sheet_url: default_sheet_url(),
            default_count: default_count(),
            default_topic: default_topic(),
            request_timeout_secs: default_timeout(),
            celebrate_threshold: default_threshold(),
            speech: SpeechConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_config(config: &mut QuizConfig) {
    config.sheet_url = resolve_env_vars(&config.sheet_url);
    config.default_count = resolve_env_vars(&config.default_count);
    config.default_topic = resolve_env_vars(&config.default_topic);
    config.speech.command = resolve_env_vars(&config.speech.command);
    for arg in &mut config.speech.args {
        *arg = resolve_env_vars(arg);
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `vocabquiz.toml` in the current directory
/// 2. `~/.config/vocabquiz/config.toml`
///
/// Environment variable override: `VOCABQUIZ_SHEET_URL`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("vocabquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizConfig::default(),
    };

    if let Ok(url) = std::env::var("VOCABQUIZ_SHEET_URL") {
        config.sheet_url = url;
    }

    resolve_config(&mut config);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("vocabquiz"))
}

/// Where the corpus should come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// The configured sheet URL, unless overridden.
    Sheet { url: Option<String> },
    /// A saved payload on disk.
    File { path: PathBuf },
}

impl SourceSpec {
    /// Pick a source from command-line overrides: a file wins over a URL.
    pub fn from_overrides(feed_file: Option<PathBuf>, url: Option<String>) -> Self {
        match feed_file {
            Some(path) => SourceSpec::File { path },
            None => SourceSpec::Sheet { url },
        }
    }
}

/// Create a vocabulary source.
pub fn create_source(spec: &SourceSpec, config: &QuizConfig) -> Result<Box<dyn VocabularySource>> {
    match spec {
        SourceSpec::Sheet { url } => {
            let url = url.as_deref().unwrap_or(&config.sheet_url);
            Ok(Box::new(SheetSource::new(url, config.request_timeout_secs)?))
        }
        SourceSpec::File { path } => Ok(Box::new(FileSource::new(path))),
    }
}
