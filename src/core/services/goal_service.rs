//! Business logic for savings goals.

use uuid::Uuid;

use crate::domain::Goal;
use crate::errors::{CoreError, Result};

/// Validated creation and funding of savings goals. Goals are never
/// deleted individually; only a full reset removes them.
pub struct GoalService;

impl GoalService {
    /// Appends a new goal with nothing saved yet and returns its id.
    pub fn create(goals: &mut Vec<Goal>, name: &str, target_amount: f64) -> Result<Uuid> {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("goal name must not be empty".into()));
        }
        if !(target_amount > 0.0) {
            return Err(CoreError::Validation(
                "goal target must be greater than zero".into(),
            ));
        }
        let goal = Goal::new(name, target_amount);
        let id = goal.id;
        goals.push(goal);
        Ok(id)
    }

    /// Adds funds to a goal, clamped at its target. Returns whether the
    /// goal is now complete so callers can celebrate.
    pub fn contribute(goals: &mut [Goal], goal_id: Uuid, amount: f64) -> Result<bool> {
        if !(amount > 0.0) {
            return Err(CoreError::Validation(
                "contribution must be greater than zero".into(),
            ));
        }
        let goal = goals
            .iter_mut()
            .find(|goal| goal.id == goal_id)
            .ok_or(CoreError::GoalNotFound(goal_id))?;
        goal.add_funds(amount);
        Ok(goal.is_complete())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_validates_name_and_target() {
        let mut goals = Vec::new();
        let err = GoalService::create(&mut goals, "  ", 500.0).expect_err("blank name");
        assert!(matches!(err, CoreError::Validation(_)));
        let err = GoalService::create(&mut goals, "Bike", 0.0).expect_err("zero target");
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(goals.is_empty());

        GoalService::create(&mut goals, "Bike", 900.0).unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].current_amount, 0.0);
    }

    #[test]
    fn contribute_clamps_and_reports_completion() {
        let mut goals = Vec::new();
        let id = GoalService::create(&mut goals, "Trip to Goa", 5000.0).unwrap();

        assert!(!GoalService::contribute(&mut goals, id, 2000.0).unwrap());
        assert!(GoalService::contribute(&mut goals, id, 4000.0).unwrap());
        assert_eq!(goals[0].current_amount, 5000.0);

        // Monotonic: further contributions never push past the target.
        assert!(GoalService::contribute(&mut goals, id, 1.0).unwrap());
        assert_eq!(goals[0].current_amount, 5000.0);
    }

    #[test]
    fn contribute_rejects_bad_amounts_and_unknown_ids() {
        let mut goals = Vec::new();
        let id = GoalService::create(&mut goals, "Fund", 100.0).unwrap();
        let err = GoalService::contribute(&mut goals, id, -10.0).expect_err("negative amount");
        assert!(matches!(err, CoreError::Validation(_)));

        let missing = Uuid::new_v4();
        let err = GoalService::contribute(&mut goals, missing, 10.0).expect_err("unknown goal");
        assert!(matches!(err, CoreError::GoalNotFound(id) if id == missing));
        assert_eq!(goals[0].current_amount, 0.0);
    }
}
