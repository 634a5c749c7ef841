//! End-to-end placement scenarios through the event-driven engine.

use crate::enclosure::capacity_for;
use crate::test_harness::TestBoard;

#[test]
fn test_move_request_updates_roster_and_emits_persist() {
    let mut board = TestBoard::new()
        .with_enclosure("A1", 0.0, 0.0, 120.0, 90.0)
        .with_enclosure("A2", 140.0, 0.0, 120.0, 90.0)
        .with_occupant("rex", "Rex", Some("A1"));

    board.request_move("rex", "A2");

    assert_eq!(board.enclosure_of("rex").as_deref(), Some("A2"));
    let persisted = board.drain_persist_events();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].occupant_id, "rex");
    assert_eq!(persisted[0].enclosure.as_deref(), Some("A2"));
}

#[test]
fn test_rejected_move_emits_no_persist_and_shows_message() {
    let mut board = TestBoard::new()
        .with_enclosure("A1", 0.0, 0.0, 120.0, 90.0)
        .with_filled_enclosure("A1", 2)
        .with_occupant("rex", "Rex", None);

    board.request_move("rex", "A1");

    assert_eq!(board.enclosure_of("rex"), None);
    assert!(board.drain_persist_events().is_empty());
    assert!(board.status_active());
    assert!(board.status_text().contains("A1"));
}

#[test]
fn test_communal_pen_boundary() {
    let mut board = TestBoard::new()
        .with_enclosure("cs", 0.0, 0.0, 400.0, 300.0)
        .with_filled_enclosure("cs", 69)
        .with_occupant("rex", "Rex", Some("A1"))
        .with_occupant("fido", "Fido", Some("A1"));

    board.request_move("rex", "cs");
    assert_eq!(board.count_in("cs"), 70);

    board.request_move("fido", "cs");
    assert_eq!(board.count_in("cs"), 70);
    assert_eq!(board.enclosure_of("fido").as_deref(), Some("A1"));
    let message = board.status_text();
    assert!(message.contains("cs"), "got: {message}");
    assert!(message.contains("70"), "got: {message}");
}

#[test]
fn test_capacity_invariant_holds_after_arbitrary_sequence() {
    let mut board = TestBoard::new()
        .with_enclosure("A1", 0.0, 0.0, 120.0, 90.0)
        .with_enclosure("A2", 140.0, 0.0, 120.0, 90.0)
        .with_enclosure("cs", 0.0, 120.0, 400.0, 300.0)
        .with_filled_enclosure("A1", 2)
        .with_filled_enclosure("A2", 1)
        .with_filled_enclosure("cs", 3);

    let moves = [
        ("A1-fill-0", "A2"),
        ("A1-fill-1", "A2"),
        ("A2-fill-0", "cs"),
        ("cs-fill-0", "A1"),
        ("cs-fill-1", "A1"),
        ("cs-fill-2", "A1"),
    ];
    for (id, to) in moves {
        board.request_move(id, to);
    }

    for code in ["A1", "A2", "cs"] {
        assert!(
            board.count_in(code) <= capacity_for(code),
            "capacity exceeded in {code}"
        );
    }
}

#[test]
fn test_persist_event_carries_roster_generation() {
    let mut board = TestBoard::new()
        .with_enclosure("A1", 0.0, 0.0, 120.0, 90.0)
        .with_enclosure("A2", 140.0, 0.0, 120.0, 90.0)
        .with_occupant("rex", "Rex", Some("A1"));

    let generation = board.roster().generation;
    board.request_move("rex", "A2");

    let persisted = board.drain_persist_events();
    assert_eq!(persisted[0].generation, generation);
}
