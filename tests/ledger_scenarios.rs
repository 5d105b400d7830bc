mod common;

use chrono::Duration;
use pocket_ledger::core::services::transaction_service::INVALID_SUBMISSION;
use pocket_ledger::core::services::ServiceError;
use pocket_ledger::ledger::TransactionFilter;

use common::{fixed_clock, session_in, temp_dir};

#[test]
fn salary_and_rent_scenario() {
    let clock = fixed_clock();
    let mut session = session_in(&temp_dir(), clock.clone());

    let salary = session.submit_transaction("Salary", "1000", "income").unwrap();
    clock.advance(Duration::seconds(5));
    let rent = session.submit_transaction("Rent", "400", "expense").unwrap();
    assert!(rent > salary);

    let totals = session.totals();
    assert_eq!(totals.income, 1000.0);
    assert_eq!(totals.expenses, 400.0);
    assert_eq!(totals.balance, 600.0);

    session.select_filter(TransactionFilter::Expenses);
    let visible: Vec<_> = session.visible().map(|txn| txn.id).collect();
    assert_eq!(visible, vec![rent]);

    // Totals ignore the active filter.
    assert_eq!(session.totals().balance, 600.0);

    let removed = session.delete_transaction(rent).unwrap().unwrap();
    assert_eq!(removed.amount, -400.0);
    let totals = session.totals();
    assert_eq!((totals.income, totals.expenses, totals.balance), (1000.0, 0.0, 1000.0));
    assert_eq!(session.visible().count(), 0);
}

#[test]
fn filters_partition_the_ledger_in_order() {
    let clock = fixed_clock();
    let mut session = session_in(&temp_dir(), clock.clone());
    for (desc, amount, kind) in [
        ("Salary", "2500", "income"),
        ("Groceries", "82.40", "expense"),
        ("Refund", "19.99", "income"),
        ("Bus pass", "45", "expense"),
    ] {
        session.submit_transaction(desc, amount, kind).unwrap();
        clock.advance(Duration::milliseconds(1));
    }

    let all: Vec<_> = session.visible().map(|txn| txn.description.clone()).collect();
    assert_eq!(all, ["Salary", "Groceries", "Refund", "Bus pass"]);

    session.select_filter(TransactionFilter::Income);
    let income: Vec<_> = session.visible().map(|txn| txn.description.clone()).collect();
    assert_eq!(income, ["Salary", "Refund"]);
    assert!(session.visible().all(|txn| txn.amount > 0.0));

    session.select_filter(TransactionFilter::Expenses);
    let expenses: Vec<_> = session.visible().map(|txn| txn.description.clone()).collect();
    assert_eq!(expenses, ["Groceries", "Bus pass"]);
    assert!(session.visible().all(|txn| txn.amount < 0.0));
}

#[test]
fn identical_timestamps_still_get_distinct_ids() {
    let clock = fixed_clock();
    let mut session = session_in(&temp_dir(), clock);
    let first = session.submit_transaction("Coffee", "3.5", "expense").unwrap();
    let second = session.submit_transaction("Coffee", "3.5", "expense").unwrap();
    assert_ne!(first, second);

    session.delete_transaction(first).unwrap();
    let remaining: Vec<_> = session.visible().map(|txn| txn.id).collect();
    assert_eq!(remaining, vec![second]);
}

#[test]
fn rejected_submissions_leave_the_ledger_untouched() {
    let mut session = session_in(&temp_dir(), fixed_clock());
    for (desc, amount) in [("", "10"), ("   ", "10"), ("Rent", "0"), ("Rent", "-5"), ("Rent", "ten")] {
        let err = session.submit_transaction(desc, amount, "expense").unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ref m) if m == INVALID_SUBMISSION));
    }
    assert!(session.store().is_empty());
}

#[test]
fn removing_an_unknown_id_is_a_no_op() {
    let mut session = session_in(&temp_dir(), fixed_clock());
    session.submit_transaction("Salary", "1000", "income").unwrap();
    assert!(session.delete_transaction(42).unwrap().is_none());
    assert_eq!(session.store().len(), 1);
}
