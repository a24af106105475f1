//! Filesystem-backed folder store.

use crate::archive;
use crate::error::{StoreError, StoreResult};
use rand::seq::IndexedRandom;
use satchel_core::{validate_filename, FolderConfig, FolderId, FolderMeta, WordCorpus};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::instrument;

/// Suffix of the JSON metadata sidecar.
const META_SUFFIX: &str = ".meta";

/// Suffix of the ZIP archive cache sidecar.
const ARCHIVE_SUFFIX: &str = ".zip";

/// A regular file directly inside a folder.
#[derive(Clone, Debug, Serialize)]
pub struct FileEntry {
    /// File name, relative to the folder.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, seconds since the Unix epoch.
    pub modified: i64,
}

/// Outcome of removing one optional artifact during deletion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The artifact existed and was removed.
    Removed,
    /// The artifact was never created; nothing to do.
    Absent,
    /// Removal failed; the folder itself is already gone.
    Failed(String),
}

/// Per-artifact report for a folder deletion.
#[derive(Clone, Debug)]
pub struct DeleteReport {
    /// Outcome for the `.zip` archive sidecar.
    pub archive: CleanupOutcome,
    /// Outcome for the `.meta` metadata sidecar.
    pub metadata: CleanupOutcome,
}

/// Counters from one retention sweep.
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepStats {
    /// Folders examined.
    pub scanned: usize,
    /// Folders purged for exceeding the retention window.
    pub purged: usize,
    /// Folders whose purge failed (left for the next sweep).
    pub failed: usize,
}

/// Filesystem-backed store for ephemeral drop folders.
///
/// Layout under the root: `<id>/` holds the folder contents, `<id>.meta` the
/// JSON metadata sidecar, `<id>.zip` the archive cache. Archive mutation and
/// deletion are serialized per identifier with an in-process lock; deployments
/// running multiple processes against a shared root need a cross-process lock.
pub struct FolderStore {
    root: PathBuf,
    config: FolderConfig,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FolderStore {
    /// Open the store, creating the root directory and verifying it is
    /// writable. A non-writable root is a fatal deployment error.
    pub async fn new(config: FolderConfig) -> StoreResult<Self> {
        let root = config.root.clone();
        fs::create_dir_all(&root).await?;

        // Writability probe: create and remove a throwaway file.
        let probe = root.join(format!(".probe-{}", std::process::id()));
        fs::write(&probe, b"").await?;
        fs::remove_file(&probe).await?;

        Ok(Self {
            root,
            config,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// The root storage path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The retention window in whole days.
    pub fn retention_days(&self) -> i64 {
        self.config.retention_days
    }

    fn folder_dir(&self, id: &FolderId) -> PathBuf {
        self.root.join(id.as_str())
    }

    fn meta_path(&self, id: &FolderId) -> PathBuf {
        self.root.join(format!("{id}{META_SUFFIX}"))
    }

    fn archive_path(&self, id: &FolderId) -> PathBuf {
        self.root.join(format!("{id}{ARCHIVE_SUFFIX}"))
    }

    /// Get the mutation lock for one identifier.
    async fn lock_for(&self, id: &FolderId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(id.as_str().to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Sample a candidate identifier from the corpus.
    ///
    /// Words are drawn uniformly at random without replacement. ThreadRng is
    /// not held across awaits, so sampling lives in a sync helper.
    fn sample_id(corpus: &WordCorpus, words_per_id: usize) -> FolderId {
        let mut rng = rand::rng();
        let words: Vec<&String> = corpus
            .words()
            .choose_multiple(&mut rng, words_per_id)
            .collect();
        FolderId::from_words(&words)
    }

    /// Allocate a fresh identifier and create its folder and metadata.
    ///
    /// `create_dir` is the atomic create-if-absent primitive: a concurrent
    /// request racing for the same candidate loses with `AlreadyExists` and
    /// this allocator simply resamples. The identifier space (corpus size
    /// raised to the word count) vastly exceeds any realistic folder count,
    /// so the expected number of iterations is one; a degenerate corpus is
    /// rejected at startup, not here.
    ///
    /// The metadata sidecar is written synchronously as part of creation. If
    /// the caller is aborted between the two steps the folder survives with
    /// no sidecar; readers fall back to the directory mtime.
    #[instrument(skip(self, corpus, meta), fields(words = self.config.words_per_id))]
    pub async fn create(
        &self,
        corpus: &WordCorpus,
        meta: FolderMeta,
    ) -> StoreResult<(FolderId, FolderMeta)> {
        let id = loop {
            let candidate = Self::sample_id(corpus, self.config.words_per_id);
            match fs::create_dir(self.folder_dir(&candidate)).await {
                Ok(()) => break candidate,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    tracing::debug!(id = %candidate, "identifier collision, resampling");
                }
                Err(e) => return Err(e.into()),
            }
        };

        self.write_meta(&id, &meta).await?;
        tracing::info!(id = %id, "folder created");
        Ok((id, meta))
    }

    /// Write the metadata sidecar for a folder.
    #[instrument(skip(self, meta), fields(id = %id))]
    pub async fn write_meta(&self, id: &FolderId, meta: &FolderMeta) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(meta)?;
        fs::write(self.meta_path(id), json).await?;
        Ok(())
    }

    /// Read the metadata record for a folder.
    ///
    /// If the sidecar is missing but the folder exists, a record is
    /// synthesized from the directory's modification time; it carries no
    /// provenance fields and is flagged `synthesized`. Malformed JSON and
    /// permission errors propagate.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn read_meta(&self, id: &FolderId) -> StoreResult<FolderMeta> {
        match fs::read(self.meta_path(id)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let dir_meta = fs::metadata(self.folder_dir(id)).await.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        StoreError::NotFound(id.to_string())
                    } else {
                        StoreError::Io(e)
                    }
                })?;
                Ok(FolderMeta::synthesized(unix_mtime(&dir_meta)?))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List a folder's regular files together with its metadata record.
    ///
    /// Files are sorted by modification time, newest first. Subdirectories
    /// and anything else that is not a regular file are excluded.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn folder_info(&self, id: &FolderId) -> StoreResult<(FolderMeta, Vec<FileEntry>)> {
        let mut entries = fs::read_dir(self.folder_dir(id)).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(id.to_string())
            } else {
                StoreError::Io(e)
            }
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let Ok(filename) = entry.file_name().into_string() else {
                continue;
            };
            let metadata = entry.metadata().await?;
            files.push(FileEntry {
                filename,
                size: metadata.len(),
                modified: unix_mtime(&metadata)?,
            });
        }
        files.sort_by(|a, b| b.modified.cmp(&a.modified).then(a.filename.cmp(&b.filename)));

        let meta = self.read_meta(id).await?;
        Ok((meta, files))
    }

    /// Purge all folders older than the retention window.
    ///
    /// Age is counted in whole days since the folder's creation timestamp,
    /// so with retention 0 a folder created today always survives. Purge
    /// failures are logged and counted but do not abort the sweep; the next
    /// sweep retries them.
    #[instrument(skip(self), fields(retention_days = self.config.retention_days))]
    pub async fn sweep(&self) -> StoreResult<SweepStats> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let mut stats = SweepStats::default();

        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Ok(id) = FolderId::parse(&name.to_string_lossy()) else {
                tracing::debug!(name = %name.to_string_lossy(), "skipping foreign directory");
                continue;
            };

            stats.scanned += 1;
            let created = match self.read_meta(&id).await {
                Ok(meta) => meta.created,
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "unreadable metadata, skipping");
                    stats.failed += 1;
                    continue;
                }
            };

            let age_days = (now - created).max(0) / 86_400;
            if age_days <= self.config.retention_days {
                continue;
            }

            match self.delete(&id).await {
                Ok(_) => {
                    tracing::info!(id = %id, age_days, "purged expired folder");
                    stats.purged += 1;
                }
                // Lost a race with an on-demand delete; nothing left to do.
                Err(StoreError::NotFound(_)) => {}
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "failed to purge folder");
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }

    /// Build or extend the folder's ZIP archive and return its path.
    ///
    /// Every regular file currently in the folder whose name is not already
    /// an archive member is appended, keyed by filename. Members are never
    /// pruned when folder files disappear, and a file modified in place is
    /// not re-added: the archive is an append-only snapshot log. Calling
    /// twice without intervening folder changes yields the same member set.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn archive(&self, id: &FolderId) -> StoreResult<PathBuf> {
        let folder = self.folder_dir(id);
        match fs::try_exists(&folder).await {
            Ok(true) => {}
            Ok(false) => return Err(StoreError::NotFound(id.to_string())),
            Err(e) => return Err(e.into()),
        }

        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        let archive_path = self.archive_path(id);
        let result_path = archive_path.clone();
        tokio::task::spawn_blocking(move || archive::build_or_extend(&folder, &archive_path))
            .await
            .map_err(|e| std::io::Error::other(format!("archive task failed: {e}")))??;

        Ok(result_path)
    }

    /// Delete a folder together with its archive and metadata sidecars.
    ///
    /// This is the single choke point for both the retention reaper and the
    /// credential-gated on-demand delete. The folder itself must exist; the
    /// sidecars are optional artifacts and each reports its own outcome so
    /// callers can tell "nothing to do" from "cleanup partially failed".
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: &FolderId) -> StoreResult<DeleteReport> {
        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        fs::remove_dir_all(self.folder_dir(id)).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(id.to_string())
            } else {
                StoreError::Io(e)
            }
        })?;

        let report = DeleteReport {
            archive: remove_artifact(&self.archive_path(id)).await,
            metadata: remove_artifact(&self.meta_path(id)).await,
        };
        if let CleanupOutcome::Failed(reason) = &report.archive {
            tracing::warn!(id = %id, reason, "failed to remove archive sidecar");
        }
        if let CleanupOutcome::Failed(reason) = &report.metadata {
            tracing::warn!(id = %id, reason, "failed to remove metadata sidecar");
        }

        self.locks.lock().await.remove(id.as_str());
        tracing::info!(id = %id, "folder deleted");
        Ok(report)
    }

    /// Resolve a file inside a folder to its filesystem path.
    ///
    /// The filename is validated before any path is built; the target must
    /// exist and be a regular file.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn file_path(&self, id: &FolderId, filename: &str) -> StoreResult<PathBuf> {
        validate_filename(filename).map_err(StoreError::Invalid)?;

        let path = self.folder_dir(id).join(filename);
        let metadata = fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(format!("{id}/{filename}"))
            } else {
                StoreError::Io(e)
            }
        })?;
        if !metadata.is_file() {
            return Err(StoreError::NotFound(format!("{id}/{filename}")));
        }
        Ok(path)
    }
}

/// Modification time of a metadata entry, seconds since the Unix epoch.
fn unix_mtime(metadata: &std::fs::Metadata) -> StoreResult<i64> {
    let modified = metadata.modified()?;
    Ok(OffsetDateTime::from(modified).unix_timestamp())
}

/// Remove one optional sidecar, tolerating its absence.
async fn remove_artifact(path: &Path) -> CleanupOutcome {
    match fs::remove_file(path).await {
        Ok(()) => CleanupOutcome::Removed,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CleanupOutcome::Absent,
        Err(e) => CleanupOutcome::Failed(e.to_string()),
    }
}
