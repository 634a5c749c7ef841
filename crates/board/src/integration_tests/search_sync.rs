//! Match state staying in sync with roster mutations.

use bevy::prelude::*;

use crate::occupant::OccupantRoster;
use crate::search::SearchState;
use crate::test_harness::TestBoard;

fn set_query(board: &mut TestBoard, text: &str) {
    let world = board.app.world_mut();
    world.resource_scope(|world, mut search: Mut<SearchState>| {
        let roster = world.resource::<OccupantRoster>();
        search.set_query(roster, text);
    });
    board.tick();
}

#[test]
fn test_match_enclosures_follow_a_move() {
    let mut board = TestBoard::new()
        .with_enclosure("A1", 0.0, 0.0, 120.0, 90.0)
        .with_enclosure("A2", 140.0, 0.0, 120.0, 90.0)
        .with_occupant("rex", "Rex", Some("A1"));

    set_query(&mut board, "rex");
    {
        let search = board.app.world().resource::<SearchState>();
        assert!(search.enclosures_with_matches.contains("A1"));
    }

    board.request_move("rex", "A2");
    board.tick();

    let search = board.app.world().resource::<SearchState>();
    assert!(search.enclosures_with_matches.contains("A2"));
    assert!(!search.enclosures_with_matches.contains("A1"));
}

#[test]
fn test_reload_shrinks_match_list() {
    let mut board = TestBoard::new()
        .with_enclosure("A1", 0.0, 0.0, 120.0, 90.0)
        .with_occupant("rex", "Rex", Some("A1"))
        .with_occupant("trex", "Trex", Some("A1"));

    set_query(&mut board, "rex");
    assert_eq!(
        board.app.world().resource::<SearchState>().match_list.len(),
        2
    );

    // A full reload replaces the roster wholesale.
    board
        .app
        .world_mut()
        .resource_mut::<OccupantRoster>()
        .replace(Vec::new());
    board.tick();

    let search = board.app.world().resource::<SearchState>();
    assert!(search.match_list.is_empty());
    assert_eq!(search.match_index, 0);
}
