//! Persistence abstraction: a synchronous string key-value store plus the
//! typed repository that maps domain collections onto fixed keys.

pub mod json_backend;
pub mod repository;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::errors::{CoreError, Result};

pub use json_backend::JsonStore;
pub use repository::Repository;

/// Fixed keys of the persisted state layout.
pub mod keys {
    pub const BUDGET: &str = "budget";
    pub const EXPENSES: &str = "expenses";
    pub const GOALS: &str = "goals";
    pub const PROFILE: &str = "profileData";
    pub const LAST_ALERT_PERCENTAGE: &str = "lastAlertPercentage";
    pub const LAST_TIP_DATE: &str = "lastTipDate";

    /// Every key the reset operation clears, in deletion order.
    pub const ALL: [&str; 6] = [
        BUDGET,
        EXPENSES,
        GOALS,
        PROFILE,
        LAST_ALERT_PERCENTAGE,
        LAST_TIP_DATE,
    ];
}

/// Abstraction over persistence backends holding string values under
/// string keys. At most one logical writer at a time; all operations are
/// synchronous.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store. Cloning yields a handle onto the same map, which
/// lets tests keep a view on state handed to a tracker.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> CoreError {
    CoreError::Storage("store lock poisoned".into())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
