//! Levels, XP, and badge awards derived from current state.
//!
//! Both derivations are pure functions recomputed on every load. Nothing
//! here is persisted: a badge whose condition stops holding disappears on
//! the next computation.

use chrono::{DateTime, Utc};

use crate::domain::{Badge, BadgeCategory, Ledger, PaymentMode};

/// XP granted per logged expense.
const XP_PER_EXPENSE: u32 = 10;

/// Derived level state for the profile header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    /// XP accumulated within the current level.
    pub xp_in_level: u32,
    /// XP span of the current level, shown as the denominator.
    pub xp_for_next_level: u32,
    /// Progress through the current level, 0 to 100.
    pub progress_percent: u32,
}

struct BadgeRule {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    category: BadgeCategory,
    earned: fn(&BadgeContext) -> bool,
}

struct BadgeContext<'a> {
    ledger: &'a Ledger,
    budget: f64,
    profile_complete: bool,
}

/// Rules are evaluated in order and independently; a user can hold any
/// subset at once.
const BADGE_RULES: [BadgeRule; 5] = [
    BadgeRule {
        id: "1",
        name: "Expense Tracker",
        description: "Tracked 5 or more expenses",
        icon: "📊",
        category: BadgeCategory::Consistency,
        earned: |ctx| ctx.ledger.expense_count() >= 5,
    },
    BadgeRule {
        id: "2",
        name: "Tracking Pro",
        description: "Tracked 10 or more expenses",
        icon: "🏆",
        category: BadgeCategory::Consistency,
        earned: |ctx| ctx.ledger.expense_count() >= 10,
    },
    BadgeRule {
        id: "3",
        name: "Digital Payer",
        description: "Paid with UPI",
        icon: "📱",
        category: BadgeCategory::Payment,
        earned: |ctx| ctx.ledger.uses_mode(PaymentMode::Upi),
    },
    BadgeRule {
        id: "4",
        name: "Super Saver",
        description: "Kept spending under 70% of budget",
        icon: "💰",
        category: BadgeCategory::Savings,
        earned: |ctx| ctx.budget > 0.0 && ctx.ledger.total_spent() < ctx.budget * 0.7,
    },
    BadgeRule {
        id: "5",
        name: "Profile Master",
        description: "Completed your profile details",
        icon: "👤",
        category: BadgeCategory::Special,
        earned: |ctx| ctx.profile_complete,
    },
];

pub struct GamificationService;

impl GamificationService {
    /// Level and XP derived from how many expenses have been logged.
    ///
    /// The within-level XP takes the modulus against the span of the
    /// level derived one line earlier, so levels beyond 1 are not evenly
    /// spaced. That matches the shipped behavior and must stay in this
    /// exact order: base XP, then level, then the modulus.
    pub fn level_progress(expense_count: usize) -> LevelProgress {
        let base_xp = expense_count as u32 * XP_PER_EXPENSE;
        let level = (base_xp / 100 + 1).max(1);
        let span = level * 100;
        let xp_in_level = base_xp % span;
        let progress = (f64::from(xp_in_level) / f64::from(span) * 100.0).round();
        LevelProgress {
            level,
            xp_in_level,
            xp_for_next_level: span,
            progress_percent: progress.min(100.0) as u32,
        }
    }

    /// Evaluates every badge rule against the current snapshot. `now`
    /// stamps `earned_on` for this session only.
    pub fn badges(
        ledger: &Ledger,
        budget: f64,
        profile_complete: bool,
        now: DateTime<Utc>,
    ) -> Vec<Badge> {
        let ctx = BadgeContext {
            ledger,
            budget,
            profile_complete,
        };
        BADGE_RULES
            .iter()
            .filter(|rule| (rule.earned)(&ctx))
            .map(|rule| Badge {
                id: rule.id.to_string(),
                name: rule.name.to_string(),
                description: rule.description.to_string(),
                icon: rule.icon.to_string(),
                category: rule.category,
                earned_on: now,
            })
            .collect()
    }
}
