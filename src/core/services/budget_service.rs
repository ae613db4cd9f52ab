//! Spend-versus-budget derivations over the ledger.

use std::fmt;

use chrono::NaiveDate;

use crate::core::time::days_in_month;
use crate::domain::Ledger;

/// Categorical reading of today's spend against the daily allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendStatus {
    Good,
    Warning,
    Danger,
}

impl fmt::Display for SpendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpendStatus::Good => "good",
            SpendStatus::Warning => "warning",
            SpendStatus::Danger => "danger",
        };
        f.write_str(label)
    }
}

/// Budget-alert thresholds, ascending. Each fires at most once until a
/// higher one is crossed.
pub const ALERT_THRESHOLDS: [u32; 4] = [25, 50, 75, 90];

/// Derives budget state from the ledger and the configured monthly
/// ceiling. The spend total is lifetime, not calendar-month.
pub struct BudgetService;

impl BudgetService {
    pub fn total_spent(ledger: &Ledger) -> f64 {
        ledger.total_spent()
    }

    /// Percentage of budget spent, capped at 100. A zero budget reads as
    /// zero percent regardless of spend.
    pub fn percent_spent(ledger: &Ledger, budget: f64) -> f64 {
        if budget <= 0.0 {
            return 0.0;
        }
        (ledger.total_spent() / budget * 100.0).min(100.0)
    }

    /// Remaining budget. May go negative; callers decide how to render
    /// overspend.
    pub fn remaining(ledger: &Ledger, budget: f64) -> f64 {
        budget - ledger.total_spent()
    }

    pub fn todays_spend(ledger: &Ledger, today: NaiveDate) -> f64 {
        ledger.spent_on(today)
    }

    /// The monthly budget spread over the days of the current month.
    pub fn daily_budget(budget: f64, today: NaiveDate) -> f64 {
        budget / f64::from(days_in_month(today))
    }

    pub fn today_status(ledger: &Ledger, budget: f64, today: NaiveDate) -> SpendStatus {
        let spend = ledger.spent_on(today);
        let daily = Self::daily_budget(budget, today);
        if spend <= daily * 0.5 {
            SpendStatus::Good
        } else if spend <= daily {
            SpendStatus::Warning
        } else {
            SpendStatus::Danger
        }
    }

    /// Returns the highest alert threshold crossed by `percent` that has
    /// not been acknowledged yet, if any. Crossings are one-shot: a
    /// threshold at or below `last_acknowledged` never re-fires.
    pub fn crossed_threshold(last_acknowledged: u32, percent: f64) -> Option<u32> {
        ALERT_THRESHOLDS
            .iter()
            .copied()
            .filter(|threshold| percent >= f64::from(*threshold) && *threshold > last_acknowledged)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Expense, PaymentMode};
    use chrono::{TimeZone, Utc};

    fn ledger_with_amounts(amounts: &[f64]) -> Ledger {
        let mut ledger = Ledger::new();
        for amount in amounts {
            let date = Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap();
            ledger.record(Expense::new(*amount, PaymentMode::Cash, date));
        }
        ledger
    }

    #[test]
    fn percent_spent_caps_at_hundred_and_guards_zero_budget() {
        let ledger = ledger_with_amounts(&[900.0]);
        assert_eq!(BudgetService::percent_spent(&ledger, 300.0), 100.0);
        assert_eq!(BudgetService::percent_spent(&ledger, 0.0), 0.0);
        let empty = Ledger::new();
        assert_eq!(BudgetService::percent_spent(&empty, 300.0), 0.0);
    }

    #[test]
    fn remaining_goes_negative_on_overspend() {
        let ledger = ledger_with_amounts(&[400.0]);
        assert_eq!(BudgetService::remaining(&ledger, 300.0), -100.0);
    }

    #[test]
    fn today_status_bands_match_the_daily_allowance() {
        // budget 3000 over a 30-day month: daily allowance 100.
        let april_ten = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        assert_eq!(BudgetService::daily_budget(3000.0, april_ten), 100.0);

        let good = ledger_with_amounts(&[40.0]);
        assert_eq!(
            BudgetService::today_status(&good, 3000.0, april_ten),
            SpendStatus::Good
        );
        let warning = ledger_with_amounts(&[90.0]);
        assert_eq!(
            BudgetService::today_status(&warning, 3000.0, april_ten),
            SpendStatus::Warning
        );
        let danger = ledger_with_amounts(&[150.0]);
        assert_eq!(
            BudgetService::today_status(&danger, 3000.0, april_ten),
            SpendStatus::Danger
        );
    }

    #[test]
    fn todays_spend_ignores_other_days() {
        let mut ledger = ledger_with_amounts(&[50.0]);
        let other_day = Utc.with_ymd_and_hms(2025, 4, 9, 23, 0, 0).unwrap();
        ledger.record(Expense::new(500.0, PaymentMode::Card, other_day));
        let april_ten = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        assert_eq!(BudgetService::todays_spend(&ledger, april_ten), 50.0);
    }

    #[test]
    fn threshold_crossings_are_one_shot_per_threshold() {
        // Fresh state: 55% crosses 25 and 50, reports the highest.
        assert_eq!(BudgetService::crossed_threshold(0, 55.0), Some(50));
        // Acknowledged 50: re-evaluating at 55% stays quiet.
        assert_eq!(BudgetService::crossed_threshold(50, 55.0), None);
        // Until 75 is crossed.
        assert_eq!(BudgetService::crossed_threshold(50, 76.0), Some(75));
        // A jump straight past several thresholds reports only the top one.
        assert_eq!(BudgetService::crossed_threshold(0, 95.0), Some(90));
        assert_eq!(BudgetService::crossed_threshold(90, 100.0), None);
    }
}
