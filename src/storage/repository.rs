use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::{Goal, Ledger, Profile};
use crate::errors::Result;

use super::{keys, KeyValueStore};

/// Typed access to the persisted state layout. Reads fail open: a missing
/// or malformed value decodes to the empty/default state so a corrupt
/// store never takes the application down.
pub struct Repository {
    store: Box<dyn KeyValueStore>,
}

impl Repository {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn load_ledger(&self) -> Ledger {
        match self.raw(keys::EXPENSES) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(ledger) => ledger,
                Err(err) => {
                    warn!(key = keys::EXPENSES, %err, "discarding malformed expenses");
                    Ledger::new()
                }
            },
            None => Ledger::new(),
        }
    }

    pub fn save_ledger(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string(ledger)?;
        self.store.set(keys::EXPENSES, &json)
    }

    pub fn load_budget(&self) -> f64 {
        match self.raw(keys::BUDGET) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(key = keys::BUDGET, value = %raw, "discarding malformed budget");
                0.0
            }),
            None => 0.0,
        }
    }

    pub fn save_budget(&self, budget: f64) -> Result<()> {
        self.store.set(keys::BUDGET, &budget.to_string())
    }

    pub fn load_goals(&self) -> Vec<Goal> {
        match self.raw(keys::GOALS) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(goals) => goals,
                Err(err) => {
                    warn!(key = keys::GOALS, %err, "discarding malformed goals");
                    Vec::new()
                }
            },
            None => Vec::new(),
        }
    }

    pub fn save_goals(&self, goals: &[Goal]) -> Result<()> {
        let json = serde_json::to_string(goals)?;
        self.store.set(keys::GOALS, &json)
    }

    pub fn load_profile(&self) -> Profile {
        match self.raw(keys::PROFILE) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(profile) => profile,
                Err(err) => {
                    warn!(key = keys::PROFILE, %err, "discarding malformed profile");
                    Profile::default()
                }
            },
            None => Profile::default(),
        }
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.store.set(keys::PROFILE, &json)
    }

    /// The highest budget-alert threshold already acknowledged, default 0.
    pub fn last_alert_percentage(&self) -> u32 {
        match self.raw(keys::LAST_ALERT_PERCENTAGE) {
            Some(raw) => raw.trim().parse().unwrap_or(0),
            None => 0,
        }
    }

    pub fn set_last_alert_percentage(&self, percentage: u32) -> Result<()> {
        self.store
            .set(keys::LAST_ALERT_PERCENTAGE, &percentage.to_string())
    }

    pub fn last_tip_date(&self) -> Option<DateTime<Utc>> {
        let raw = self.raw(keys::LAST_TIP_DATE)?;
        match raw.trim().parse() {
            Ok(date) => Some(date),
            Err(_) => {
                warn!(key = keys::LAST_TIP_DATE, value = %raw, "discarding malformed tip date");
                None
            }
        }
    }

    pub fn set_last_tip_date(&self, date: DateTime<Utc>) -> Result<()> {
        self.store.set(keys::LAST_TIP_DATE, &date.to_rfc3339())
    }

    /// Deletes every persisted key, best-effort and sequential; the store
    /// has no multi-key transaction primitive.
    pub fn clear_all(&self) -> Result<()> {
        for key in keys::ALL {
            self.store.remove(key)?;
        }
        Ok(())
    }

    fn raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, %err, "store read failed, treating as absent");
                None
            }
        }
    }
}
