use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An achievement marker recomputed each session from current state.
/// Badges are never persisted; `earned_on` reflects the computing
/// session, not the historical first award.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: BadgeCategory,
    pub earned_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Enumerates the badge groupings shown on the profile screen.
pub enum BadgeCategory {
    Savings,
    Payment,
    Consistency,
    Special,
}

impl fmt::Display for BadgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BadgeCategory::Savings => "Savings",
            BadgeCategory::Payment => "Payment",
            BadgeCategory::Consistency => "Consistency",
            BadgeCategory::Special => "Special",
        };
        f.write_str(label)
    }
}
