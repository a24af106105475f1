//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Folder storage and lifecycle configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Root directory holding folders and their sidecars.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Maximum folder age in whole days before it is reaped.
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    /// Minimum length of dictionary words used in identifiers.
    #[serde(default = "default_word_min_len")]
    pub word_min_len: usize,
    /// Maximum length of dictionary words used in identifiers.
    #[serde(default = "default_word_max_len")]
    pub word_max_len: usize,
    /// Number of words joined into one identifier.
    #[serde(default = "default_words_per_id")]
    pub words_per_id: usize,
    /// Path to a newline-delimited word list. Uses the built-in list if unset.
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
}

fn default_root() -> PathBuf {
    PathBuf::from("./data/folders")
}

fn default_retention_days() -> i64 {
    7
}

fn default_word_min_len() -> usize {
    3
}

fn default_word_max_len() -> usize {
    6
}

fn default_words_per_id() -> usize {
    3
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            retention_days: default_retention_days(),
            word_min_len: default_word_min_len(),
            word_max_len: default_word_max_len(),
            words_per_id: default_words_per_id(),
            dictionary: None,
        }
    }
}

impl FolderConfig {
    /// Validate folder configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.retention_days < 0 {
            return Err(format!(
                "folders.retention_days must be >= 0, got {}",
                self.retention_days
            ));
        }
        if self.word_min_len == 0 || self.word_min_len > self.word_max_len {
            return Err(format!(
                "folders.word_min_len must be in 1..=word_max_len ({} vs {})",
                self.word_min_len, self.word_max_len
            ));
        }
        if self.words_per_id == 0 || self.words_per_id > crate::identifier::MAX_ID_WORDS {
            return Err(format!(
                "folders.words_per_id must be in 1..={}, got {}",
                crate::identifier::MAX_ID_WORDS,
                self.words_per_id
            ));
        }
        Ok(())
    }
}

/// Credential gate configuration.
///
/// Secrets are a static allow-set: multiple values are valid at once to
/// support rotation and per-client secrets. Only a masked prefix of an
/// accepted secret is ever persisted or logged.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Valid secrets for mutating operations.
    #[serde(default)]
    pub secrets: Vec<String>,
    /// Delay applied before reporting any authentication failure, in seconds.
    /// Uniform across all failure causes so timing leaks nothing.
    #[serde(default = "default_invalid_secret_delay_secs")]
    pub invalid_secret_delay_secs: f64,
    /// Number of leading secret characters kept in metadata for audit.
    #[serde(default = "default_secret_reveal_len")]
    pub secret_reveal_len: usize,
}

fn default_invalid_secret_delay_secs() -> f64 {
    2.0
}

fn default_secret_reveal_len() -> usize {
    3
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secrets: Vec::new(),
            invalid_secret_delay_secs: default_invalid_secret_delay_secs(),
            secret_reveal_len: default_secret_reveal_len(),
        }
    }
}

impl AuthConfig {
    /// Get the failure delay as a Duration. Negative values clamp to zero.
    pub fn invalid_secret_delay(&self) -> Duration {
        Duration::from_secs_f64(self.invalid_secret_delay_secs.max(0.0))
    }

    /// Validate auth configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.secrets.is_empty() || self.secrets.iter().all(|s| s.is_empty()) {
            return Err("auth.secrets must contain at least one non-empty secret".to_string());
        }
        if !self.invalid_secret_delay_secs.is_finite() {
            return Err(format!(
                "auth.invalid_secret_delay_secs must be finite, got {}",
                self.invalid_secret_delay_secs
            ));
        }
        Ok(())
    }

    /// Create a test configuration with a known secret and no failure delay.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            secrets: vec!["s2cr2t".to_string(), "s3cr3t".to_string()],
            invalid_secret_delay_secs: 0.0,
            secret_reveal_len: 3,
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Folder storage and lifecycle configuration.
    #[serde(default)]
    pub folders: FolderConfig,
    /// Credential gate configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.folders.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Create a test configuration with sensible defaults.
    ///
    /// **For testing only.** Uses a relative storage root and dummy secrets.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            folders: FolderConfig::default(),
            auth: AuthConfig::for_testing(),
        }
    }
}
