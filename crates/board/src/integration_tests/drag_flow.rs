//! Gesture-to-move wiring through the drag state machine.

use crate::drag::{DragState, GestureEvent};
use crate::selection::Picked;
use crate::test_harness::TestBoard;

fn drag_began(id: &str, origin: Option<&str>) -> GestureEvent {
    GestureEvent::DragBegan {
        occupant_id: id.to_string(),
        origin: origin.map(str::to_string),
    }
}

#[test]
fn test_drag_and_drop_moves_occupant() {
    let mut board = TestBoard::new()
        .with_enclosure("A1", 0.0, 0.0, 120.0, 90.0)
        .with_enclosure("A2", 140.0, 0.0, 120.0, 90.0)
        .with_occupant("rex", "Rex", Some("A1"))
        .with_edit_mode();

    board.gesture(drag_began("rex", Some("A1")));
    assert!(board.app.world().resource::<DragState>().dragging());

    board.gesture(GestureEvent::DroppedOn {
        enclosure: "A2".to_string(),
    });

    assert_eq!(board.enclosure_of("rex").as_deref(), Some("A2"));
    assert_eq!(*board.app.world().resource::<DragState>(), DragState::Idle);
}

#[test]
fn test_drop_into_full_enclosure_leaves_occupant_in_place() {
    let mut board = TestBoard::new()
        .with_enclosure("A1", 0.0, 0.0, 120.0, 90.0)
        .with_enclosure("A2", 140.0, 0.0, 120.0, 90.0)
        .with_filled_enclosure("A2", 2)
        .with_occupant("rex", "Rex", Some("A1"))
        .with_edit_mode();

    board.gesture(drag_began("rex", Some("A1")));
    board.gesture(GestureEvent::DroppedOn {
        enclosure: "A2".to_string(),
    });

    assert_eq!(board.enclosure_of("rex").as_deref(), Some("A1"));
    assert!(board.status_active());
}

#[test]
fn test_aborted_drag_moves_nothing() {
    let mut board = TestBoard::new()
        .with_enclosure("A1", 0.0, 0.0, 120.0, 90.0)
        .with_occupant("rex", "Rex", Some("A1"))
        .with_edit_mode();

    board.gesture(drag_began("rex", Some("A1")));
    board.gesture(GestureEvent::DragAborted);

    assert_eq!(board.enclosure_of("rex").as_deref(), Some("A1"));
    assert!(board.drain_persist_events().is_empty());
}

#[test]
fn test_pending_move_via_taps() {
    let mut board = TestBoard::new()
        .with_enclosure("A1", 0.0, 0.0, 120.0, 90.0)
        .with_enclosure("B3", 140.0, 0.0, 120.0, 90.0)
        .with_occupant("rex", "Rex", Some("A1"))
        .with_edit_mode();

    board.gesture(GestureEvent::TappedOccupant {
        occupant_id: "rex".to_string(),
    });
    board.gesture(GestureEvent::TappedEnclosure {
        enclosure: "B3".to_string(),
    });

    assert_eq!(board.enclosure_of("rex").as_deref(), Some("B3"));
    assert_eq!(*board.app.world().resource::<DragState>(), DragState::Idle);
}

#[test]
fn test_normal_mode_tap_toggles_picked() {
    let mut board = TestBoard::new()
        .with_enclosure("A1", 0.0, 0.0, 120.0, 90.0)
        .with_occupant("rex", "Rex", Some("A1"));

    board.gesture(GestureEvent::TappedOccupant {
        occupant_id: "rex".to_string(),
    });
    assert!(board.app.world().resource::<Picked>().contains("rex"));

    board.gesture(GestureEvent::TappedOccupant {
        occupant_id: "rex".to_string(),
    });
    assert!(!board.app.world().resource::<Picked>().contains("rex"));
}

#[test]
fn test_occupant_in_inactive_enclosure_is_never_picked() {
    let mut board = TestBoard::new()
        .with_enclosure("átmeneti hely", 0.0, 0.0, 400.0, 300.0)
        .with_occupant("rex", "Rex", Some("átmeneti hely"));

    board.gesture(GestureEvent::TappedOccupant {
        occupant_id: "rex".to_string(),
    });

    assert!(!board.app.world().resource::<Picked>().contains("rex"));
}
