use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::core::services::{
    BudgetService, ExpenseService, GamificationService, GoalService, LevelProgress, NewExpense,
    SpendStatus, StatsService, TipsService,
};
use crate::core::time::{Clock, SystemClock};
use crate::domain::{Badge, Expense, Goal, Ledger, PaymentMode, Profile};
use crate::errors::{CoreError, Result};
use crate::payment::{PaymentRequest, ScannedPayee};
use crate::schedule::{CancellationToken, TaskQueue};
use crate::storage::{KeyValueStore, Repository};

/// Seconds between raising a weekly tip and revealing it.
const TIP_REVEAL_DELAY_SECS: i64 = 2;
/// Seconds a completion celebration stays on screen.
const CELEBRATION_SECS: i64 = 5;

/// Delayed UI callbacks the tracker schedules instead of firing timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiTask {
    RevealTip(String),
    DismissCelebration,
}

/// Everything the budget card needs, recomputed from the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverview {
    pub budget: f64,
    pub total_spent: f64,
    pub percent_spent: f64,
    pub remaining: f64,
    pub todays_spend: f64,
    pub daily_budget: f64,
    pub today_status: SpendStatus,
}

/// On-demand export of the full local state. There is no import
/// counterpart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub expenses: Vec<Expense>,
    pub budget: f64,
    pub goals: Vec<Goal>,
    pub profile_data: Profile,
    pub badges: Vec<Badge>,
    pub user_level: u32,
    pub user_xp: u32,
    pub export_date: DateTime<Utc>,
}

/// Facade that coordinates the persisted state, the derivation services,
/// and scheduled UI tasks. Every read recomputes from the store so the
/// tracker mirrors the page-load semantics of the app it powers.
pub struct ExpenseTracker {
    repo: Repository,
    clock: Box<dyn Clock>,
    ui_tasks: TaskQueue<UiTask>,
}

impl ExpenseTracker {
    pub fn new(store: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Self {
        Self {
            repo: Repository::new(store),
            clock,
            ui_tasks: TaskQueue::new(),
        }
    }

    pub fn with_system_clock(store: Box<dyn KeyValueStore>) -> Self {
        Self::new(store, Box::new(SystemClock))
    }

    /// Records an expense from the add-expense form.
    pub fn add_expense(&mut self, input: NewExpense) -> Result<Uuid> {
        let mut ledger = self.repo.load_ledger();
        let id = ExpenseService::record(&mut ledger, input, self.clock.now())?;
        self.repo.save_ledger(&ledger)?;
        debug!(%id, count = ledger.expense_count(), "expense recorded");
        Ok(id)
    }

    /// Outcome of an external payment hand-off. A successful payment is
    /// recorded as a UPI expense carrying the scanned payee; a failed or
    /// cancelled one records nothing.
    pub fn confirm_payment(
        &mut self,
        request: &PaymentRequest,
        payee: Option<ScannedPayee>,
        successful: bool,
    ) -> Result<Option<Uuid>> {
        if !successful {
            debug!("payment cancelled, nothing recorded");
            return Ok(None);
        }
        let mut ledger = self.repo.load_ledger();
        let mut input = NewExpense::new(request.amount, PaymentMode::Upi);
        if let Some(note) = &request.note {
            input = input.with_description(note.clone());
        }
        let (payee_name, payee_address) = match payee {
            Some(scanned) => (scanned.name, Some(scanned.address)),
            None => (
                request.payee_name.clone(),
                Some(request.payee_address.clone()),
            ),
        };
        let id = ExpenseService::record_payment(
            &mut ledger,
            input,
            payee_name,
            payee_address,
            self.clock.now(),
        )?;
        self.repo.save_ledger(&ledger)?;
        debug!(%id, "payment recorded");
        Ok(Some(id))
    }

    pub fn ledger(&self) -> Ledger {
        self.repo.load_ledger()
    }

    pub fn recent_expenses(&self, limit: usize) -> Vec<Expense> {
        self.repo.load_ledger().recent(limit).to_vec()
    }

    pub fn set_budget(&mut self, amount: f64) -> Result<()> {
        if !(amount > 0.0) {
            return Err(CoreError::Validation(
                "budget must be greater than zero".into(),
            ));
        }
        self.repo.save_budget(amount)?;
        debug!(amount, "budget updated");
        Ok(())
    }

    pub fn budget(&self) -> f64 {
        self.repo.load_budget()
    }

    pub fn budget_overview(&self) -> BudgetOverview {
        let ledger = self.repo.load_ledger();
        let budget = self.repo.load_budget();
        let today = self.clock.today();
        BudgetOverview {
            budget,
            total_spent: BudgetService::total_spent(&ledger),
            percent_spent: BudgetService::percent_spent(&ledger, budget),
            remaining: BudgetService::remaining(&ledger, budget),
            todays_spend: BudgetService::todays_spend(&ledger, today),
            daily_budget: BudgetService::daily_budget(budget, today),
            today_status: BudgetService::today_status(&ledger, budget, today),
        }
    }

    /// Raises the next unacknowledged budget alert, if spend has crossed
    /// one, and persists the acknowledgement.
    pub fn check_alert(&mut self) -> Result<Option<u32>> {
        let ledger = self.repo.load_ledger();
        let budget = self.repo.load_budget();
        let percent = BudgetService::percent_spent(&ledger, budget);
        let last = self.repo.last_alert_percentage();
        match BudgetService::crossed_threshold(last, percent) {
            Some(threshold) => {
                self.repo.set_last_alert_percentage(threshold)?;
                debug!(threshold, percent, "budget alert raised");
                Ok(Some(threshold))
            }
            None => Ok(None),
        }
    }

    pub fn goals(&self) -> Vec<Goal> {
        self.repo.load_goals()
    }

    pub fn create_goal(&mut self, name: &str, target_amount: f64) -> Result<Uuid> {
        let mut goals = self.repo.load_goals();
        let id = GoalService::create(&mut goals, name, target_amount)?;
        self.repo.save_goals(&goals)?;
        Ok(id)
    }

    /// Adds funds to a goal. Completing a goal schedules a celebration
    /// dismissal; the returned flag tells the caller to celebrate now.
    pub fn add_goal_funds(&mut self, goal_id: Uuid, amount: f64) -> Result<bool> {
        let mut goals = self.repo.load_goals();
        let completed = GoalService::contribute(&mut goals, goal_id, amount)?;
        self.repo.save_goals(&goals)?;
        if completed {
            self.schedule_celebration_dismissal();
        }
        Ok(completed)
    }

    pub fn profile(&self) -> Profile {
        self.repo.load_profile()
    }

    /// Saves the profile. Returns whether it just became complete for
    /// the first time, which also queues the celebration dismissal.
    pub fn save_profile(&mut self, profile: Profile) -> Result<bool> {
        let was_complete = self.repo.load_profile().is_complete();
        self.repo.save_profile(&profile)?;
        let completed_now = profile.is_complete() && !was_complete;
        if completed_now {
            self.schedule_celebration_dismissal();
        }
        Ok(completed_now)
    }

    pub fn level_progress(&self) -> LevelProgress {
        GamificationService::level_progress(self.repo.load_ledger().expense_count())
    }

    pub fn badges(&self) -> Vec<Badge> {
        let ledger = self.repo.load_ledger();
        let budget = self.repo.load_budget();
        let profile_complete = self.repo.load_profile().is_complete();
        GamificationService::badges(&ledger, budget, profile_complete, self.clock.now())
    }

    pub fn category_breakdown(&self) -> Vec<crate::core::services::BreakdownSlice> {
        StatsService::by_category(&self.repo.load_ledger())
    }

    pub fn payment_breakdown(&self) -> Vec<crate::core::services::BreakdownSlice> {
        StatsService::by_payment_mode(&self.repo.load_ledger())
    }

    pub fn daily_spend(&self) -> Vec<crate::core::services::DailySpend> {
        StatsService::by_day(&self.repo.load_ledger())
    }

    pub fn weekly_spend(&self) -> Vec<crate::core::services::WeeklySpend> {
        StatsService::by_week(&self.repo.load_ledger())
    }

    /// Raises the weekly tip when one is due: stamps the tip date and
    /// schedules the reveal a moment out. Returns the cancellation token
    /// so the owning view can drop the reveal on unmount.
    pub fn weekly_tip(&mut self) -> Result<Option<CancellationToken>> {
        let now = self.clock.now();
        if !TipsService::due(self.repo.last_tip_date(), now) {
            return Ok(None);
        }
        let tip = TipsService::generate(&self.repo.load_ledger(), now);
        self.repo.set_last_tip_date(now)?;
        let token = self.ui_tasks.schedule(
            now + Duration::seconds(TIP_REVEAL_DELAY_SECS),
            UiTask::RevealTip(tip),
        );
        Ok(Some(token))
    }

    /// Drains the UI tasks that are due at the current instant.
    pub fn poll_ui_tasks(&mut self) -> Vec<UiTask> {
        self.ui_tasks.poll(self.clock.now())
    }

    pub fn export(&self) -> ExportDocument {
        let level = self.level_progress();
        ExportDocument {
            expenses: self.repo.load_ledger().expenses().to_vec(),
            budget: self.repo.load_budget(),
            goals: self.repo.load_goals(),
            profile_data: self.repo.load_profile(),
            badges: self.badges(),
            user_level: level.level,
            user_xp: level.xp_in_level,
            export_date: self.clock.now(),
        }
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    /// Deletes every persisted key. Best-effort sequential; the store has
    /// no multi-key transactions.
    pub fn reset(&mut self) -> Result<()> {
        self.repo.clear_all()?;
        debug!("all local data cleared");
        Ok(())
    }

    fn schedule_celebration_dismissal(&mut self) {
        let fire_at = self.clock.now() + Duration::seconds(CELEBRATION_SECS);
        self.ui_tasks.schedule(fire_at, UiTask::DismissCelebration);
    }
}
