#![forbid(unsafe_code)]

//! Durable "tour seen" flags.
//!
//! A [`FlagStore`] answers whether a named flag is set and sets it. The
//! tour only ever reads its flag once at launch and writes it once when the
//! session ends, see [`TourGate`](crate::TourGate).
//!
//! # File format (`file-store` feature)
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at_unix": 1760000000,
//!   "flags": { "campus_pilot_tutorial_done": true }
//! }
//! ```
//!
//! A missing file means no flag is set. Writes go to a temp file that is
//! then renamed over the target.

use std::collections::BTreeSet;
use std::fmt;
use std::io;

#[cfg(feature = "file-store")]
use std::collections::BTreeMap;
#[cfg(feature = "file-store")]
use std::path::{Path, PathBuf};

/// Current file format version.
#[cfg(feature = "file-store")]
const FORMAT_VERSION: u64 = 1;

/// Errors from reading or writing flags.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error on the backing file.
    Io(io::Error),
    /// Backing file is not valid JSON for this format.
    #[cfg(feature = "file-store")]
    Json(serde_json::Error),
    /// Backing file was written by an incompatible version.
    UnsupportedVersion { found: u64, expected: u64 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "flag store I/O error: {e}"),
            #[cfg(feature = "file-store")]
            Self::Json(e) => write!(f, "flag store parse error: {e}"),
            Self::UnsupportedVersion { found, expected } => write!(
                f,
                "unsupported flag store version: {found} (expected {expected})"
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "file-store")]
            Self::Json(e) => Some(e),
            Self::UnsupportedVersion { .. } => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "file-store")]
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Key/flag persistence.
pub trait FlagStore {
    /// Whether `key` is set.
    fn get(&self, key: &str) -> Result<bool, StoreError>;

    /// Set `key`.
    fn set(&mut self, key: &str) -> Result<(), StoreError>;

    /// Clear `key`. Clearing an unset key is not an error.
    fn clear(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory flags. Counts writes so callers can check write-once behaviour.
#[derive(Debug, Clone, Default)]
pub struct MemoryFlagStore {
    flags: BTreeSet<String>,
    writes: usize,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with `keys` already set.
    pub fn with_flags<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: keys.into_iter().map(Into::into).collect(),
            writes: 0,
        }
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.flags.contains(key))
    }

    fn set(&mut self, key: &str) -> Result<(), StoreError> {
        self.writes += 1;
        self.flags.insert(key.to_owned());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.flags.remove(key);
        Ok(())
    }
}

/// On-disk representation of the flag file.
#[cfg(feature = "file-store")]
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct FlagFile {
    version: u64,
    #[serde(default)]
    saved_at_unix: u64,
    #[serde(default)]
    flags: BTreeMap<String, bool>,
}

/// Flags persisted in a JSON file.
///
/// The file is re-read on every call, so several stores on the same path
/// see each other's writes.
#[cfg(feature = "file-store")]
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    path: PathBuf,
}

#[cfg(feature = "file-store")]
impl FileFlagStore {
    /// Store backed by `path`. The parent directory must exist when writing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, bool>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let file: FlagFile = serde_json::from_str(&contents)?;
        if file.version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: file.version,
                expected: FORMAT_VERSION,
            });
        }
        Ok(file.flags)
    }

    fn save(&self, flags: BTreeMap<String, bool>) -> Result<(), StoreError> {
        let file = FlagFile {
            version: FORMAT_VERSION,
            saved_at_unix: now_unix(),
            flags,
        };
        let json = serde_json::to_string_pretty(&file)?;

        // Atomic write: temp file then rename
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

#[cfg(feature = "file-store")]
impl FlagStore for FileFlagStore {
    fn get(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.load()?.get(key).copied().unwrap_or(false))
    }

    fn set(&mut self, key: &str) -> Result<(), StoreError> {
        let mut flags = self.load()?;
        flags.insert(key.to_owned(), true);
        self.save(flags)
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        let mut flags = self.load()?;
        if flags.remove(key).is_some() {
            self.save(flags)?;
        }
        Ok(())
    }
}

#[cfg(feature = "file-store")]
fn now_unix() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
