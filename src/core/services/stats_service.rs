//! Groupings of the ledger for the spending charts.
//!
//! All aggregations are pure functions over the whole ledger; nothing is
//! updated incrementally.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::Ledger;

/// One bucket of a category or payment-mode breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownSlice {
    pub name: String,
    pub total: f64,
    /// Share of the grouped total, rounded to whole percent.
    pub percentage: u32,
}

/// Spend on a single calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySpend {
    pub day: NaiveDate,
    pub total: f64,
}

/// Spend across one Monday-to-Sunday week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySpend {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total: f64,
}

/// Number of day buckets kept by the daily view.
const DAILY_BUCKET_LIMIT: usize = 7;

pub struct StatsService;

impl StatsService {
    /// Groups spend by description, with blank descriptions pooled under
    /// `Uncategorized`. Buckets keep the order in which their keys first
    /// appear during traversal.
    pub fn by_category(ledger: &Ledger) -> Vec<BreakdownSlice> {
        let mut buckets: Vec<(String, f64)> = Vec::new();
        for expense in ledger.iter() {
            accumulate(&mut buckets, expense.category_label(), expense.amount);
        }
        into_slices(buckets)
    }

    /// Groups spend by payment mode.
    pub fn by_payment_mode(ledger: &Ledger) -> Vec<BreakdownSlice> {
        let mut buckets: Vec<(String, f64)> = Vec::new();
        for expense in ledger.iter() {
            accumulate(&mut buckets, &expense.payment_mode.to_string(), expense.amount);
        }
        into_slices(buckets)
    }

    /// Daily totals, ascending by date, truncated to the most recent
    /// seven days that have any spend.
    pub fn by_day(ledger: &Ledger) -> Vec<DailySpend> {
        let mut buckets: Vec<(NaiveDate, f64)> = Vec::new();
        for expense in ledger.iter() {
            let day = expense.date.date_naive();
            match buckets.iter_mut().find(|(existing, _)| *existing == day) {
                Some((_, total)) => *total += expense.amount,
                None => buckets.push((day, expense.amount)),
            }
        }
        buckets.sort_by_key(|(day, _)| *day);
        let skip = buckets.len().saturating_sub(DAILY_BUCKET_LIMIT);
        buckets
            .into_iter()
            .skip(skip)
            .map(|(day, total)| DailySpend { day, total })
            .collect()
    }

    /// Weekly totals keyed by the Monday the week starts on, ascending.
    pub fn by_week(ledger: &Ledger) -> Vec<WeeklySpend> {
        let mut buckets: Vec<(NaiveDate, f64)> = Vec::new();
        for expense in ledger.iter() {
            let start = week_start(expense.date.date_naive());
            match buckets.iter_mut().find(|(existing, _)| *existing == start) {
                Some((_, total)) => *total += expense.amount,
                None => buckets.push((start, expense.amount)),
            }
        }
        buckets.sort_by_key(|(start, _)| *start);
        buckets
            .into_iter()
            .map(|(week_start, total)| WeeklySpend {
                week_start,
                week_end: week_start + Duration::days(6),
                total,
            })
            .collect()
    }
}

fn accumulate(buckets: &mut Vec<(String, f64)>, key: &str, amount: f64) {
    match buckets.iter_mut().find(|(existing, _)| existing == key) {
        Some((_, total)) => *total += amount,
        None => buckets.push((key.to_string(), amount)),
    }
}

fn into_slices(buckets: Vec<(String, f64)>) -> Vec<BreakdownSlice> {
    let grand_total: f64 = buckets.iter().map(|(_, total)| total).sum();
    buckets
        .into_iter()
        .map(|(name, total)| BreakdownSlice {
            name,
            percentage: if grand_total > 0.0 {
                (total / grand_total * 100.0).round() as u32
            } else {
                0
            },
            total,
        })
        .collect()
}

fn week_start(day: NaiveDate) -> NaiveDate {
    let offset = day.weekday().num_days_from_monday();
    day - Duration::days(i64::from(offset))
}
