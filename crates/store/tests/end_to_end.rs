use std::io::Cursor;

use proptest::prelude::*;
use reelhouse_core::{CustomerId, DomainError};
use reelhouse_store::loader::{load_customers, load_movies, process_commands};
use reelhouse_store::{CommandError, CommandRegistry, DispatchError, LoadReport, Outcome, Store};

fn seeded(customers: &str, movies: &str) -> Store {
    let mut store = Store::new();
    load_customers(&mut store, Cursor::new(customers)).expect("in-memory read");
    load_movies(&mut store, Cursor::new(movies)).expect("in-memory read");
    store
}

fn replay(store: &mut Store, commands: &str) -> (LoadReport, String) {
    let mut out = Vec::new();
    let report = process_commands(
        store,
        &CommandRegistry::with_defaults(),
        Cursor::new(commands),
        &mut out,
    )
    .expect("in-memory read");
    (report, String::from_utf8(out).expect("reports are utf-8"))
}

#[test]
fn borrow_until_empty_then_show_history() {
    let mut store = seeded("7 Doe Jane\n", "D,1,Smith,Serious Film,2001\n");
    let registry = CommandRegistry::with_defaults();

    assert_eq!(
        registry.execute_line(&mut store, "B 7 D D Smith,Serious Film"),
        Ok(Outcome::Applied)
    );
    let film = store.find_movie('D', "Smith,Serious Film").unwrap();
    assert_eq!(film.stock().available(), 0);

    assert_eq!(
        registry.execute_line(&mut store, "B 7 D D Smith,Serious Film"),
        Err(CommandError::Domain(DomainError::OutOfStock(
            "Serious Film".to_string()
        )))
    );

    let (_, out) = replay(&mut store, "H 7\n");
    assert_eq!(
        out,
        "Transaction history for Jane Doe (ID: 7):\n  \
         1. Borrowed Drama: Smith, Serious Film (2001) Stock: 0 Out: 1\n\n"
    );
}

#[test]
fn loaded_comedy_can_be_found_and_borrowed_three_times() {
    let mut store = seeded("7 Doe Jane\n", "F,3,DirX,Funny Movie,1999\n");
    assert!(store.find_movie('F', "Funny Movie,1999").is_some());

    let (report, _) = replay(
        &mut store,
        "B 7 D F Funny Movie, 1999\n\
         B 7 D F Funny Movie, 1999\n\
         B 7 D F Funny Movie, 1999\n\
         B 7 D F Funny Movie, 1999\n",
    );
    assert_eq!(report, LoadReport { accepted: 3, skipped: 1 });
    assert_eq!(
        store.find_movie('F', "Funny Movie, 1999").unwrap().stock().on_loan(),
        3
    );
}

#[test]
fn unknown_command_is_skipped_and_the_run_continues() {
    let mut store = seeded("7 Doe Jane\n", "F,3,DirX,Funny Movie,1999\n");
    let registry = CommandRegistry::with_defaults();
    assert_eq!(
        registry.execute_line(&mut store, "Z foo"),
        Err(CommandError::Dispatch(DispatchError::UnknownCommand('Z')))
    );

    let (report, out) = replay(&mut store, "Z foo\nI\n");
    assert_eq!(report, LoadReport { accepted: 1, skipped: 1 });
    assert_eq!(
        out,
        "INVENTORY:\nComedy: Funny Movie (1999) Dir: DirX Stock: 3 Out: 0\n\n"
    );
}

#[test]
fn inventory_lists_comedies_then_dramas_then_classics() {
    let mut store = seeded(
        "",
        "C, 10, Victor Fleming, The Wizard of Oz, Judy Garland 7 1939\n\
         D, 10, Phillippe De Broca, King of Hearts, 1967\n\
         F, 10, Nora Ephron, You've Got Mail, 1998\n\
         F, 10, Woody Allen, Annie Hall, 1977\n",
    );
    let (_, out) = replay(&mut store, "I\n");
    assert_eq!(
        out,
        "INVENTORY:\n\
         Comedy: Annie Hall (1977) Dir: Woody Allen Stock: 10 Out: 0\n\
         Comedy: You've Got Mail (1998) Dir: Nora Ephron Stock: 10 Out: 0\n\
         Drama: Phillippe De Broca, King of Hearts (1967) Stock: 10 Out: 0\n\
         Classic: 7 1939 Judy Garland - The Wizard of Oz Dir: Victor Fleming Stock: 10 Out: 0\n\n"
    );
}

#[test]
fn rejected_commands_leave_history_untouched() {
    let mut store = seeded("7 Doe Jane\n", "F,3,DirX,Funny Movie,1999\n");
    let (report, out) = replay(
        &mut store,
        "B 7 V F Funny Movie, 1999\n\
         B 8 D F Funny Movie, 1999\n\
         B 7 D F Sad Movie, 1999\n\
         B 7 D Q Funny Movie, 1999\n\
         B seven D F Funny Movie, 1999\n\
         H 8\n\
         H 7\n",
    );
    assert_eq!(report, LoadReport { accepted: 1, skipped: 6 });
    assert_eq!(
        out,
        "Transaction history for Jane Doe (ID: 7):\nNo transactions found.\n"
    );
    assert!(store.find_customer(CustomerId::new(7)).unwrap().history().is_empty());
}

#[test]
fn later_customer_record_wins_the_id() {
    let mut store = seeded(
        "7 Doe Jane\n7 Roe Richard\n",
        "F,3,DirX,Funny Movie,1999\n",
    );
    assert_eq!(
        store.find_customer(CustomerId::new(7)).unwrap().full_name(),
        "Richard Roe"
    );

    let (_, out) = replay(&mut store, "B 7 D F Funny Movie, 1999\nH 7\n");
    assert!(out.starts_with("Transaction history for Richard Roe (ID: 7):\n"));
}

#[test]
fn negative_customer_id_is_an_unknown_customer() {
    let mut store = seeded("7 Doe Jane\n", "F,3,DirX,Funny Movie,1999\n");
    let registry = CommandRegistry::with_defaults();
    assert_eq!(
        registry.execute_line(&mut store, "B -3 D F Funny Movie, 1999"),
        Err(CommandError::Domain(DomainError::UnknownCustomer(
            CustomerId::new(-3)
        )))
    );
}

#[test]
fn snapshot_reflects_replayed_state() {
    let mut store = seeded("7 Doe Jane\n", "F,3,DirX,Funny Movie,1999\n");
    replay(&mut store, "B 7 D F Funny Movie, 1999\n");

    let json: serde_json::Value =
        serde_json::from_str(&store.snapshot().to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["movies"][0]["stock"]["on_loan"], 1);
    assert_eq!(json["customers"][0]["history"][0]["kind"], "borrow");
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Borrow,
    Return,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Borrow), Just(Op::Return)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: whatever the borrow/return sequence, `0 <= on_loan <= total`,
    /// and only successful commands reach the history.
    #[test]
    fn stock_stays_in_bounds_for_any_command_sequence(
        copies in 0u32..5,
        ops in prop::collection::vec(arb_op(), 0..40)
    ) {
        let mut store = seeded(
            "7 Doe Jane\n",
            &format!("F,{copies},DirX,Funny Movie,1999\n"),
        );
        let registry = CommandRegistry::with_defaults();

        let mut on_loan = 0u32;
        let mut recorded = 0usize;
        for op in ops {
            let (line, expected_ok) = match op {
                Op::Borrow => ("B 7 D F Funny Movie, 1999", on_loan < copies),
                Op::Return => ("R 7 D F Funny Movie, 1999", true),
            };
            let result = registry.execute_line(&mut store, line);
            prop_assert_eq!(result.is_ok(), expected_ok);
            if expected_ok {
                recorded += 1;
                match op {
                    Op::Borrow => on_loan += 1,
                    Op::Return => on_loan = on_loan.saturating_sub(1),
                }
            }

            let stock = store.find_movie('F', "Funny Movie, 1999").unwrap().stock();
            prop_assert!(stock.on_loan() <= stock.total());
            prop_assert_eq!(stock.on_loan(), on_loan);
        }

        let history = store.find_customer(CustomerId::new(7)).unwrap().history();
        prop_assert_eq!(history.len(), recorded);
    }
}
