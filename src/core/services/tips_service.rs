//! Weekly smart-tip generation.
//!
//! A tip compares the trailing seven days of spend against the seven days
//! before that and surfaces whichever insight applies. Tips are gated to
//! one per week via the persisted last-tip date.

use chrono::{DateTime, Duration, Utc};

use crate::domain::Ledger;

const TIP_INTERVAL_DAYS: i64 = 7;

pub struct TipsService;

impl TipsService {
    /// Whether enough time has passed since the last surfaced tip.
    pub fn due(last_tip: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_tip {
            Some(last) => now.signed_duration_since(last) > Duration::days(TIP_INTERVAL_DAYS),
            None => true,
        }
    }

    /// Produces the tip text for the current ledger snapshot.
    pub fn generate(ledger: &Ledger, now: DateTime<Utc>) -> String {
        if ledger.is_empty() {
            return "Start tracking your expenses to get personalized insights!".into();
        }

        let week_ago = now - Duration::days(TIP_INTERVAL_DAYS);
        let two_weeks_ago = week_ago - Duration::days(TIP_INTERVAL_DAYS);

        let this_week: f64 = ledger
            .iter()
            .filter(|expense| expense.date >= week_ago && expense.date <= now)
            .map(|expense| expense.amount)
            .sum();
        let previous_week: f64 = ledger
            .iter()
            .filter(|expense| expense.date >= two_weeks_ago && expense.date <= week_ago)
            .map(|expense| expense.amount)
            .sum();

        if previous_week > 0.0 && this_week < previous_week {
            let percent_less = ((previous_week - this_week) / previous_week * 100.0).round();
            return format!("You spent {percent_less:.0}% less than last week! Keep going. 🎉");
        }
        if previous_week > 0.0 && this_week > previous_week {
            let percent_more = ((this_week - previous_week) / previous_week * 100.0).round();
            return format!(
                "Your spending increased by {percent_more:.0}% compared to last week. 📈"
            );
        }

        if let Some((mode, amount)) = top_mode_this_week(ledger, week_ago, now) {
            return format!("Top category: {mode} – ₹{amount:.0} this week. 💡");
        }

        "Keep tracking your expenses to see more personalized insights!".into()
    }
}

fn top_mode_this_week(
    ledger: &Ledger,
    week_ago: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<(String, f64)> {
    let mut buckets: Vec<(String, f64)> = Vec::new();
    for expense in ledger
        .iter()
        .filter(|expense| expense.date >= week_ago && expense.date <= now)
    {
        let key = expense.payment_mode.to_string();
        match buckets.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, total)) => *total += expense.amount,
            None => buckets.push((key, expense.amount)),
        }
    }
    buckets
        .into_iter()
        .filter(|(_, total)| *total > 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Expense, PaymentMode};

    fn expense_days_ago(days: i64, amount: f64, mode: PaymentMode, now: DateTime<Utc>) -> Expense {
        Expense::new(amount, mode, now - Duration::days(days))
    }

    #[test]
    fn gating_allows_one_tip_per_week() {
        let now = Utc::now();
        assert!(TipsService::due(None, now));
        assert!(!TipsService::due(Some(now - Duration::days(6)), now));
        assert!(TipsService::due(Some(now - Duration::days(8)), now));
    }

    #[test]
    fn empty_ledger_gets_the_starter_tip() {
        let tip = TipsService::generate(&Ledger::new(), Utc::now());
        assert!(tip.starts_with("Start tracking"), "got: {tip}");
    }

    #[test]
    fn spending_less_than_last_week_is_praised() {
        let now = Utc::now();
        let mut ledger = Ledger::new();
        ledger.record(expense_days_ago(10, 200.0, PaymentMode::Cash, now));
        ledger.record(expense_days_ago(2, 100.0, PaymentMode::Cash, now));
        let tip = TipsService::generate(&ledger, now);
        assert_eq!(tip, "You spent 50% less than last week! Keep going. 🎉");
    }

    #[test]
    fn spending_more_than_last_week_is_flagged() {
        let now = Utc::now();
        let mut ledger = Ledger::new();
        ledger.record(expense_days_ago(10, 100.0, PaymentMode::Cash, now));
        ledger.record(expense_days_ago(2, 150.0, PaymentMode::Card, now));
        let tip = TipsService::generate(&ledger, now);
        assert_eq!(
            tip,
            "Your spending increased by 50% compared to last week. 📈"
        );
    }

    #[test]
    fn quiet_previous_week_falls_back_to_top_mode() {
        let now = Utc::now();
        let mut ledger = Ledger::new();
        ledger.record(expense_days_ago(1, 80.0, PaymentMode::Upi, now));
        ledger.record(expense_days_ago(2, 20.0, PaymentMode::Cash, now));
        let tip = TipsService::generate(&ledger, now);
        assert_eq!(tip, "Top category: UPI – ₹80 this week. 💡");
    }

    #[test]
    fn stale_activity_gets_the_generic_tip() {
        let now = Utc::now();
        let mut ledger = Ledger::new();
        ledger.record(expense_days_ago(30, 500.0, PaymentMode::Card, now));
        let tip = TipsService::generate(&ledger, now);
        assert!(tip.starts_with("Keep tracking"), "got: {tip}");
    }
}
