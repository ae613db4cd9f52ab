use expense_core::{
    core::services::NewExpense,
    core::ExpenseTracker,
    domain::PaymentMode,
    storage::{keys, JsonStore, KeyValueStore},
};
use tempfile::tempdir;

#[test]
fn state_survives_a_tracker_restart() {
    let temp = tempdir().unwrap();

    {
        let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();
        let mut tracker = ExpenseTracker::with_system_clock(Box::new(store));
        tracker.set_budget(5000.0).expect("set budget");
        tracker
            .add_expense(NewExpense::new(750.0, PaymentMode::Card).with_description("Rent share"))
            .expect("record expense");
        tracker.create_goal("Emergency Fund", 10000.0).expect("create goal");
    }

    // A fresh store over the same directory sees everything.
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();
    let tracker = ExpenseTracker::with_system_clock(Box::new(store));
    assert_eq!(tracker.budget(), 5000.0);
    let ledger = tracker.ledger();
    assert_eq!(ledger.expense_count(), 1);
    assert_eq!(ledger.expenses()[0].description.as_deref(), Some("Rent share"));
    assert_eq!(tracker.goals().len(), 1);
}

#[test]
fn stored_layout_matches_the_documented_shapes() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();
    let mut tracker = ExpenseTracker::with_system_clock(Box::new(store.clone()));

    tracker.set_budget(5000.0).unwrap();
    tracker
        .add_expense(NewExpense::new(99.0, PaymentMode::Upi))
        .unwrap();

    // Budget persists as a bare stringified decimal.
    assert_eq!(store.get(keys::BUDGET).unwrap().as_deref(), Some("5000"));

    // Expenses persist as a bare JSON array of camelCase records.
    let raw = store.get(keys::EXPENSES).unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &parsed.as_array().expect("array of expenses")[0];
    assert_eq!(entry["paymentMode"], "UPI");
    assert_eq!(entry["amount"], 99.0);
    assert!(entry["date"].is_string());
}

#[test]
fn corrupt_files_fail_open_to_defaults() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();
    store.set(keys::EXPENSES, "{definitely not json").unwrap();
    store.set(keys::BUDGET, "a fortune").unwrap();

    let tracker = ExpenseTracker::with_system_clock(Box::new(store));
    assert!(tracker.ledger().is_empty());
    assert_eq!(tracker.budget(), 0.0);
}

#[test]
fn reset_removes_the_backing_files() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf())).unwrap();
    let mut tracker = ExpenseTracker::with_system_clock(Box::new(store.clone()));

    tracker.set_budget(100.0).unwrap();
    tracker
        .add_expense(NewExpense::new(10.0, PaymentMode::Cash))
        .unwrap();
    tracker.reset().expect("reset");

    for key in keys::ALL {
        assert_eq!(store.get(key).unwrap(), None, "key `{key}` should be gone");
    }
}
