//! Business logic for recording expenses into the ledger.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Expense, Ledger, PaymentMode};
use crate::errors::{CoreError, Result};

/// User-supplied fields for a new expense, before validation.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub amount: f64,
    pub payment_mode: PaymentMode,
    pub description: Option<String>,
}

impl NewExpense {
    pub fn new(amount: f64, payment_mode: PaymentMode) -> Self {
        Self {
            amount,
            payment_mode,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Validated recording of expenses. The ledger keeps newest entries first.
pub struct ExpenseService;

impl ExpenseService {
    /// Records a plain expense submitted through the add-expense form.
    pub fn record(ledger: &mut Ledger, input: NewExpense, now: DateTime<Utc>) -> Result<Uuid> {
        Self::validate_amount(input.amount)?;
        let mut expense = Expense::new(input.amount, input.payment_mode, now);
        if let Some(description) = input.description {
            expense = expense.with_description(description);
        }
        Ok(ledger.record(expense))
    }

    /// Records an expense produced by a confirmed external payment,
    /// carrying the payee details captured from the scanned code.
    pub fn record_payment(
        ledger: &mut Ledger,
        input: NewExpense,
        payee_name: Option<String>,
        payee_address: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Uuid> {
        Self::validate_amount(input.amount)?;
        let mut expense =
            Expense::new(input.amount, input.payment_mode, now).with_payee(payee_name, payee_address);
        if let Some(description) = input.description {
            expense = expense.with_description(description);
        }
        Ok(ledger.record(expense))
    }

    fn validate_amount(amount: f64) -> Result<()> {
        if !(amount > 0.0) {
            return Err(CoreError::Validation(
                "expense amount must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
