pub mod budget_service;
pub mod expense_service;
pub mod gamification_service;
pub mod goal_service;
pub mod stats_service;
pub mod tips_service;

pub use budget_service::{BudgetService, SpendStatus};
pub use expense_service::{ExpenseService, NewExpense};
pub use gamification_service::{GamificationService, LevelProgress};
pub use goal_service::GoalService;
pub use stats_service::{BreakdownSlice, DailySpend, StatsService, WeeklySpend};
pub use tips_service::TipsService;
