//! Common test fixtures for the folder store.

use satchel_core::{FolderConfig, FolderMeta, WordCorpus};
use satchel_store::FolderStore;
use tempfile::TempDir;
use time::OffsetDateTime;

/// A folder store rooted in a temporary directory.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestStore {
    pub store: FolderStore,
    pub corpus: WordCorpus,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestStore {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut FolderConfig),
    {
        let temp_dir = tempfile::tempdir().expect("failed to create temp directory");
        let mut config = FolderConfig {
            root: temp_dir.path().join("folders"),
            ..Default::default()
        };
        modifier(&mut config);

        let corpus = WordCorpus::builtin(config.word_min_len, config.word_max_len)
            .expect("failed to load builtin corpus");
        let store = FolderStore::new(config)
            .await
            .expect("failed to open folder store");

        Self {
            store,
            corpus,
            _temp_dir: temp_dir,
        }
    }
}

/// A metadata record as the create handler would build it.
#[allow(dead_code)]
pub fn sample_meta() -> FolderMeta {
    FolderMeta {
        created: OffsetDateTime::now_utc().unix_timestamp(),
        host: Some("203.0.113.7".to_string()),
        user_agent: Some("test-agent".to_string()),
        secret: Some("s2c...".to_string()),
        synthesized: false,
    }
}

/// A metadata record with a creation timestamp shifted into the past.
#[allow(dead_code)]
pub fn aged_meta(age_days: i64) -> FolderMeta {
    FolderMeta {
        created: OffsetDateTime::now_utc().unix_timestamp() - age_days * 86_400,
        ..sample_meta()
    }
}
