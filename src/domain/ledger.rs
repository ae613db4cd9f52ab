use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expense::{Expense, PaymentMode};

/// The ordered collection of all recorded expenses, newest first.
///
/// Serializes as a bare JSON array so the persisted value matches the
/// `expenses` key layout exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    /// Records an expense at the front of the ledger and returns its id.
    pub fn record(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.insert(0, expense);
        id
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter()
    }

    /// The newest `limit` expenses, in display order.
    pub fn recent(&self, limit: usize) -> &[Expense] {
        &self.expenses[..limit.min(self.expenses.len())]
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    /// Lifetime sum of all expense amounts. No date filtering.
    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }

    /// Sum of expenses recorded on the given UTC calendar day.
    pub fn spent_on(&self, day: NaiveDate) -> f64 {
        self.expenses
            .iter()
            .filter(|expense| expense.date.date_naive() == day)
            .map(|expense| expense.amount)
            .sum()
    }

    pub fn uses_mode(&self, mode: PaymentMode) -> bool {
        self.expenses
            .iter()
            .any(|expense| expense.payment_mode == mode)
    }
}
