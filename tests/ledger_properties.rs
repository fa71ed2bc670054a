mod common;

use common::{lisa_ledger, rent, salary};
use private_bank::{ErrorKind, Ledger, Payment, Transaction, Transfer};

fn mixed_ledger() -> Ledger {
    let mut ledger = lisa_ledger();
    let extras = vec![
        Transaction::from(Payment::new("03.01.2019", "Zinsen", 150.0, 0.05, 0.1).unwrap()),
        Transaction::from(Payment::new("04.01.2019", "Kredit", -300.0, 0.05, 0.1).unwrap()),
        Transaction::transfer(
            Transfer::new("05.01.2019", "Umbuchung", 40.0, "Lisa", "Lisa").unwrap(),
        ),
        Transaction::outgoing(
            Transfer::new("06.01.2019", "Einkauf", 70.0, "Lisa", "Rewe").unwrap(),
        ),
    ];
    for transaction in extras {
        ledger.add_transaction("Lisa", transaction).unwrap();
    }
    ledger
}

#[test]
fn lisa_scenario() {
    let ledger = lisa_ledger();
    assert_eq!(ledger.account_balance("Lisa").unwrap(), 1200.0);

    let credits = ledger.transactions_by_type("Lisa", true).unwrap();
    assert_eq!(credits, vec![salary()]);
    let debits = ledger.transactions_by_type("Lisa", false).unwrap();
    assert_eq!(debits, vec![rent()]);
}

#[test]
fn balance_decomposes_into_credits_and_debits() {
    let ledger = mixed_ledger();
    let credits: f64 = ledger
        .transactions_by_type("Lisa", true)
        .unwrap()
        .iter()
        .map(Transaction::settle)
        .sum();
    let debits: f64 = ledger
        .transactions_by_type("Lisa", false)
        .unwrap()
        .iter()
        .map(Transaction::settle)
        .sum();
    let balance = ledger.account_balance("Lisa").unwrap();
    assert!((balance - (credits + debits)).abs() < 1e-9);
}

#[test]
fn sorted_views_are_monotonic_permutations() {
    let ledger = mixed_ledger();
    let stored = ledger.transactions("Lisa").unwrap();

    let ascending = ledger.transactions_sorted("Lisa", true).unwrap();
    assert!(ascending.windows(2).all(|w| w[0].settle() <= w[1].settle()));
    let descending = ledger.transactions_sorted("Lisa", false).unwrap();
    assert!(descending.windows(2).all(|w| w[0].settle() >= w[1].settle()));

    for view in [&ascending, &descending] {
        assert_eq!(view.len(), stored.len());
        assert!(stored.iter().all(|t| view.contains(t)));
    }
    assert_eq!(ledger.transactions("Lisa").unwrap(), stored);
}

#[test]
fn duplicate_add_leaves_count_unchanged() {
    let mut ledger = lisa_ledger();
    let before = ledger.transactions("Lisa").unwrap().len();
    let err = ledger.add_transaction("Lisa", salary()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateTransaction);
    assert_eq!(ledger.transactions("Lisa").unwrap().len(), before);
}

#[test]
fn bulk_creation_is_all_or_nothing() {
    let mut ledger = lisa_ledger();
    let invalid = Transaction::outgoing(Transfer::without_parties("d", "Leer", 0.0).unwrap());
    let err = ledger
        .create_account_with("X", vec![salary(), invalid])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAttribute);
    assert!(!ledger.all_account_names().contains(&"X".to_string()));

    // The name is free again afterwards.
    ledger.create_account_with("X", vec![salary()]).unwrap();
    assert_eq!(ledger.transactions("X").unwrap(), vec![salary()]);
}

#[test]
fn seeded_accounts_keep_insertion_order() {
    let mut ledger = Ledger::new("Bank", 0.0, 0.0).unwrap();
    ledger
        .create_account_with("Bernd", vec![rent(), salary()])
        .unwrap();
    assert_eq!(ledger.transactions("Bernd").unwrap(), vec![rent(), salary()]);
    assert!(ledger.contains_transaction("Bernd", &rent()));
    assert!(!ledger.contains_transaction("Frank", &rent()));
}

#[test]
fn interest_bound_enforcement() {
    let mut ledger = lisa_ledger();
    let err = ledger.set_outgoing_interest(1.5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(ledger.outgoing_interest(), 0.2);
}

#[test]
fn payment_scenarios() {
    let deposit = Transaction::from(Payment::new("d", "desc", 2000.0, 0.1, 0.2).unwrap());
    assert_eq!(deposit.settle(), 1800.0);
    let withdrawal = Transaction::from(Payment::new("d", "desc", -800.0, 0.2, 0.1).unwrap());
    assert_eq!(withdrawal.settle(), -880.0);
}

#[test]
fn copies_are_independent() {
    let original = lisa_ledger();
    let mut copy = original.clone();
    let purchase = Transaction::outgoing(
        Transfer::new("01.01.2019", "Einkauf", 70.0, "Lisa", "Rewe").unwrap(),
    );
    copy.add_transaction("Lisa", purchase).unwrap();
    copy.create_account("Anna").unwrap();
    assert_eq!(original.transactions("Lisa").unwrap().len(), 2);
    assert_eq!(original.account_count(), 1);
}
