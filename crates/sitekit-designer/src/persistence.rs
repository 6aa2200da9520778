//! Layout persistence: a versioned JSON slot plus a debounced autosave
//! manager.
//!
//! The storage key is versioned; a schema change bumps the file name and
//! abandons old data rather than migrating it in place.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use sitekit_core::{EquipmentItem, PersistenceError};

use crate::generator;

/// Current storage slot. Bump the version on any schema change.
pub const LAYOUT_FILE: &str = "site_layout_v3.json";

/// Quiet period after the last change before a debounced write fires.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Backing storage for the equipment catalog.
pub trait LayoutStore {
    /// Reads the stored catalog. `Ok(None)` means no data is present;
    /// parse failures are a hard error for the store, the caller decides
    /// whether to fall back.
    fn load(&self) -> Result<Option<Vec<EquipmentItem>>, PersistenceError>;

    fn save(&mut self, catalog: &[EquipmentItem]) -> Result<(), PersistenceError>;

    /// Removes the stored value entirely.
    fn clear(&mut self) -> Result<(), PersistenceError>;
}

/// Stores the catalog as pretty-printed JSON in a single file under the
/// given directory.
#[derive(Debug, Clone)]
pub struct FileLayoutStore {
    path: PathBuf,
}

impl FileLayoutStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(LAYOUT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LayoutStore for FileLayoutStore {
    fn load(&self) -> Result<Option<Vec<EquipmentItem>>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(PersistenceError::Read(err)),
        };
        let catalog = serde_json::from_str(&text).map_err(PersistenceError::Parse)?;
        Ok(Some(catalog))
    }

    fn save(&mut self, catalog: &[EquipmentItem]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(PersistenceError::Write)?;
        }
        let json = serde_json::to_string_pretty(catalog).map_err(PersistenceError::Parse)?;
        fs::write(&self.path, json).map_err(PersistenceError::Write)?;
        debug!(path = %self.path.display(), items = catalog.len(), "layout saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(PersistenceError::Write(err)),
        }
    }
}

/// Outcome of the most recent write attempt, for display. There is no
/// automatic retry on error; the next change reschedules naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Error,
}

/// Debounced writer over a [`LayoutStore`].
///
/// Single-threaded and tick-driven: `mark_dirty()` arms (or re-arms) one
/// pending deadline, and the session's per-frame `tick()` fires the write
/// once the quiet period has elapsed. Two pending deadlines never coexist.
#[derive(Debug)]
pub struct AutosaveManager<S> {
    store: S,
    deadline: Option<Instant>,
    status: SaveStatus,
    last_saved: Option<DateTime<Utc>>,
}

impl<S: LayoutStore> AutosaveManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            deadline: None,
            status: SaveStatus::Idle,
            last_saved: None,
        }
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    pub fn has_pending_save(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Schedules a write one debounce period from `now`, cancelling any
    /// previously pending write.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.deadline = Some(now + AUTOSAVE_DEBOUNCE);
    }

    /// Fires the pending write if its deadline has passed. Returns whether
    /// a write was attempted.
    pub fn tick(&mut self, now: Instant, catalog: &[EquipmentItem]) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.flush(catalog);
                true
            }
            _ => false,
        }
    }

    /// Writes immediately, bypassing and cancelling the debounce. Used after
    /// discrete actions (delete, duplicate, placement confirm, gesture end)
    /// so a completed action is never lost to a closed session.
    pub fn force_save(&mut self, catalog: &[EquipmentItem]) {
        self.deadline = None;
        self.flush(catalog);
    }

    fn flush(&mut self, catalog: &[EquipmentItem]) {
        self.status = SaveStatus::Saving;
        match self.store.save(catalog) {
            Ok(()) => {
                self.status = SaveStatus::Saved;
                self.last_saved = Some(Utc::now());
            }
            Err(err) => {
                self.status = SaveStatus::Error;
                error!(error = %err, "layout save failed");
            }
        }
    }
}

/// Bootstrap load: a stored catalog with at least one item wins; absence,
/// read failure or a parse failure all fall back to the generator.
pub fn load_or_generate<S: LayoutStore>(store: &S) -> Vec<EquipmentItem> {
    match store.load() {
        Ok(Some(catalog)) if !catalog.is_empty() => {
            info!(items = catalog.len(), "loaded stored layout");
            catalog
        }
        Ok(_) => {
            info!("no stored layout, generating factory layout");
            generator::generate()
        }
        Err(err) => {
            error!(error = %err, "stored layout unreadable, generating factory layout");
            generator::generate()
        }
    }
}
