//! Embedded blob persistence
//!
//! Best-effort snapshot storage: the full thought list and tag list are
//! written as two JSON blobs into an embedded RocksDB after every mutation
//! batch and read once at startup. There are no transactions; a missing or
//! corrupt blob is treated as "no prior state", never as an error.

use anyhow::{Context, Result};
use rocksdb::{Options, DB};
use std::path::Path;
use tracing::{info, warn};

use crate::store::Snapshot;
use crate::types::{SemanticTag, Thought};

const THOUGHTS_KEY: &[u8] = b"thoughts";
const TAGS_KEY: &[u8] = b"tags";

/// Key-value blob store for the full graph snapshot.
pub struct BlobStore {
    db: DB,
}

impl BlobStore {
    /// Open (or create) the store at the given directory.
    pub fn open(path: &Path) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path)
            .with_context(|| format!("failed to open blob store at {}", path.display()))?;

        Ok(Self { db })
    }

    /// Load the persisted snapshot.
    ///
    /// Any failure (missing keys, unreadable blobs, schema drift) resets
    /// the affected collection to empty and logs a warning. Startup must
    /// never fail because of stale on-disk state.
    pub fn load(&self) -> Snapshot {
        let thoughts = self.load_blob::<Vec<Thought>>(THOUGHTS_KEY, "thoughts");
        let tags = self.load_blob::<Vec<SemanticTag>>(TAGS_KEY, "tags");

        info!(
            thoughts = thoughts.len(),
            tags = tags.len(),
            "snapshot loaded"
        );

        Snapshot { thoughts, tags }
    }

    fn load_blob<T: serde::de::DeserializeOwned + Default>(&self, key: &[u8], label: &str) -> T {
        match self.db.get(key) {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(e) => {
                    warn!(blob = label, error = %e, "corrupt blob, starting from empty");
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(e) => {
                warn!(blob = label, error = %e, "blob read failed, starting from empty");
                T::default()
            }
        }
    }

    /// Persist a snapshot.
    ///
    /// Guarded against clobbering: an empty snapshot is not written over a
    /// database that already holds state, so a freshly wiped in-memory
    /// store (or a bug upstream) cannot erase the previous session.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if snapshot.is_empty() && self.has_state()? {
            warn!("refusing to overwrite existing state with an empty snapshot");
            return Ok(());
        }

        let thoughts =
            serde_json::to_vec(&snapshot.thoughts).context("failed to serialize thoughts")?;
        let tags = serde_json::to_vec(&snapshot.tags).context("failed to serialize tags")?;

        self.db
            .put(THOUGHTS_KEY, thoughts)
            .context("failed to write thoughts blob")?;
        self.db
            .put(TAGS_KEY, tags)
            .context("failed to write tags blob")?;

        Ok(())
    }

    /// Whether either blob already holds entries. Both keys are probed:
    /// a snapshot can legitimately carry tags without thoughts, and that
    /// state deserves the same overwrite protection.
    fn has_state(&self) -> Result<bool> {
        for key in [THOUGHTS_KEY, TAGS_KEY] {
            let existing = self
                .db
                .get(key)
                .context("failed to probe existing state")?;

            if let Some(bytes) = existing {
                let entries: Vec<serde_json::Value> =
                    serde_json::from_slice(&bytes).unwrap_or_default();
                if !entries.is_empty() {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    /// Flush outstanding writes. Called during graceful shutdown.
    pub fn flush(&self) -> Result<()> {
        self.db.flush().context("failed to flush blob store")
    }
}
