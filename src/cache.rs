//! Disk Cache
//!
//! Key-value store under a cache root: the index at `index.json` (with its
//! fetch timestamp) and one file per skill body under `bodies/`. Entries
//! report their freshness against a TTL but are never auto-deleted, so an
//! offline process can still serve stale data. Writes go through a temp
//! file plus rename; concurrent routers may race and the later write wins,
//! but readers never see a torn file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::{RouterError, RouterResult};
use crate::index::{sha256_hex, SkillIndex};

/// Cache entry state as seen by the three-tier retrieval policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
    Missing,
}

/// On-disk wrapper for the cached index
#[derive(Debug, Serialize, Deserialize)]
struct CachedIndex {
    fetched_at: u64,
    skills_count: usize,
    index: SkillIndex,
}

/// Disk-backed cache over one root directory
#[derive(Debug)]
pub struct CacheStore {
    root: PathBuf,
    index_ttl: Duration,
    body_ttl: Duration,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>, index_ttl_seconds: u64, body_ttl_seconds: u64) -> Self {
        Self {
            root: root.into(),
            index_ttl: Duration::from_secs(index_ttl_seconds),
            body_ttl: Duration::from_secs(body_ttl_seconds),
        }
    }

    /// Load the cached index. Unreadable or unparseable files count as
    /// missing; the next `put_index` replaces them.
    pub fn get_index(&self) -> (Option<SkillIndex>, Freshness) {
        let cached = match self.load_index_file() {
            Ok(cached) => cached,
            Err(RouterError::Io(_)) => return (None, Freshness::Missing),
            Err(e) => {
                tracing::warn!("{e}");
                return (None, Freshness::Missing);
            }
        };

        let age = unix_now().saturating_sub(cached.fetched_at);
        let freshness = if age <= self.index_ttl.as_secs() {
            Freshness::Fresh
        } else {
            Freshness::Stale
        };

        (Some(cached.index), freshness)
    }

    fn load_index_file(&self) -> RouterResult<CachedIndex> {
        let path = self.index_path();
        let text = fs::read_to_string(&path)?;
        serde_json::from_str(&text)
            .map_err(|e| RouterError::cache_corrupt(format!("{}: {e}", path.display())))
    }

    /// Store the index with the current timestamp.
    pub fn put_index(&self, index: &SkillIndex) -> RouterResult<()> {
        fs::create_dir_all(&self.root)?;
        let cached = CachedIndex {
            fetched_at: unix_now(),
            skills_count: index.skills.len(),
            index: index.clone(),
        };
        let text = serde_json::to_string_pretty(&cached)?;
        self.write_atomic(&self.index_path(), text.as_bytes())
    }

    /// Load a cached body for (id, hash). The content is re-hashed on every
    /// read; a mismatch means the file is ignored until overwritten.
    /// Freshness comes from the file's modification time.
    pub fn get_body(&self, id: &str, expected_hash: &str) -> (Option<String>, Freshness) {
        let path = self.body_path(id, expected_hash);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return (None, Freshness::Missing),
        };

        if sha256_hex(content.as_bytes()) != expected_hash {
            tracing::warn!("cached body {} fails its hash check, ignoring", path.display());
            return (None, Freshness::Missing);
        }

        let fresh = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|mtime| SystemTime::now().duration_since(mtime).ok())
            .map_or(true, |age| age <= self.body_ttl);

        let freshness = if fresh { Freshness::Fresh } else { Freshness::Stale };
        (Some(content), freshness)
    }

    /// Store a body under (id, hash).
    pub fn put_body(&self, id: &str, expected_hash: &str, content: &str) -> RouterResult<()> {
        let dir = self.bodies_dir();
        fs::create_dir_all(&dir)?;
        self.write_atomic(&self.body_path(id, expected_hash), content.as_bytes())
    }

    fn index_path(&self) -> PathBuf {
        self.root.join("index.json")
    }

    fn bodies_dir(&self) -> PathBuf {
        self.root.join("bodies")
    }

    fn body_path(&self, id: &str, hash: &str) -> PathBuf {
        self.bodies_dir()
            .join(format!("{}.{}.txt", sanitize(id), sanitize(hash)))
    }

    /// Write-to-temp then rename, so concurrent readers see either the old
    /// or the new content but never a partial file. The temp name carries
    /// the pid to keep racing writers off each other's feet.
    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> RouterResult<()> {
        let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// Keep only filename-safe characters from an id or hash.
fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
