mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use board_core::{
    DiagonalRule, DistanceMeasurer, GridlessGrid, HexGrid, HexOrientation, MovementDirection, ObstructionTester,
    Point, Segment, SquareGrid, WallSet,
};
use board_runtime::{
    ForwardError, ForwardMessage, InputEvent, InteractionError, InteractionState, Key,
    NoticeLevel, RuntimeConfig,
};
use common::{SCENE, Table};

fn square() -> SquareGrid {
    SquareGrid::new(5.0, 5.0, DiagonalRule::Equidistant)
}

/// 100px per 5-unit space, so 20px per unit.
fn open_field() -> GridlessGrid {
    GridlessGrid::new(100.0, 5.0)
}

/// Source at (0, 1000) and target at (1000, 1000), both 100px wide.
fn field_pieces(table: &Table) -> (board_core::PieceId, board_core::PieceId) {
    let source = table.place(1, Point::new(-50.0, 950.0), 100.0);
    let target = table.place(2, Point::new(950.0, 950.0), 100.0);
    (source, target)
}

#[tokio::test]
async fn push_on_square_grid_snaps_to_cell() {
    let table = Table::new(square());
    let source = table.place(1, Point::new(0.0, 0.0), 5.0);
    let target = table.place(2, Point::new(5.0, 0.0), 5.0);

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Push, 0.0, 10.0),
        async {
            table.until_listening().await;
            assert!(table.overlay.highlight().is_some());
            assert!(table.overlay.passthrough());
            // Toward the source: not a push, session keeps listening.
            table.click(2.5, 2.5);
            table.click(17.0, 3.0);
        }
    );

    assert!(moved.unwrap());
    assert_eq!(table.top_left(target), Point::new(15.0, 0.0));
    assert_eq!(table.engine.interaction().state(), InteractionState::Idle);
    table.assert_torn_down();
}

#[tokio::test]
async fn continuous_click_short_of_range_clamps_onto_inner_edge() {
    let table = Table::new(open_field());
    let (source, target) = field_pieces(&table);

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Any, 5.0, 15.0),
        async {
            table.until_listening().await;
            assert!(table.overlay.indicator().is_some());
            // Too far out, beyond the tolerance margin.
            table.click(1000.0 + 20.0 * 20.0, 1000.0);
            // 3.9 units out: inside the margin, clamped to 5.
            table.click(1000.0, 1000.0 + 3.9 * 20.0);
        }
    );

    assert!(moved.unwrap());
    let landed = table.top_left(target);
    assert!((landed.x - 950.0).abs() < 1e-9);
    assert!((landed.y - 1050.0).abs() < 1e-9);
    table.assert_torn_down();
}

#[tokio::test]
async fn continuous_push_only_accepts_the_far_band() {
    let table = Table::new(open_field());
    let (source, target) = field_pieces(&table);

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Push, 0.0, 10.0),
        async {
            table.until_listening().await;
            // Toward the source.
            table.click(1000.0 - 5.0 * 20.0, 1000.0);
            // Off to the side of the axis.
            table.click(1000.0, 1000.0 + 5.0 * 20.0);
            table.click(1000.0 + 5.0 * 20.0, 1000.0);
        }
    );

    assert!(moved.unwrap());
    assert_eq!(table.top_left(target), Point::new(1050.0, 950.0));
}

#[tokio::test]
async fn walls_reject_clicks_behind_them() {
    let wall = WallSet::new(vec![Segment::new(
        Point::new(1050.0, 800.0),
        Point::new(1050.0, 1200.0),
    )]);
    let table = Table::with(open_field(), Arc::new(wall), RuntimeConfig::default());
    let (source, target) = field_pieces(&table);

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Any, 0.0, 10.0),
        async {
            table.until_listening().await;
            table.click(1200.0, 1000.0);
            assert_eq!(table.engine.interaction().state(), InteractionState::Listening);
            table.click(1000.0, 1200.0);
        }
    );

    assert!(moved.unwrap());
    assert_eq!(table.top_left(target), Point::new(950.0, 1150.0));
}

/// Open until closed; models a door shutting mid-session.
#[derive(Default)]
struct Door {
    closed: AtomicBool,
}

impl ObstructionTester for Door {
    fn blocked(&self, _a: Point, _b: Point) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[tokio::test]
async fn destination_blocked_after_resolution_is_not_committed() {
    let door = Arc::new(Door::default());
    let table = Table::with(square(), door.clone(), RuntimeConfig::default());
    let source = table.place(1, Point::new(0.0, 0.0), 5.0);
    let target = table.place(2, Point::new(5.0, 0.0), 5.0);

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Push, 0.0, 10.0),
        async {
            table.until_listening().await;
            door.closed.store(true, Ordering::SeqCst);
            table.click(12.0, 2.0);
        }
    );

    assert!(!moved.unwrap());
    assert!(table.board.commits().is_empty());
    assert_eq!(table.notifier.count(NoticeLevel::Warn), 1);
    table.assert_torn_down();
}

#[tokio::test]
async fn nothing_reachable_returns_false_without_listening() {
    let table = Table::new(HexGrid::new(100.0, 5.0, HexOrientation::PointyTop));
    let source = table.place(1, Point::new(0.0, 0.0), 100.0);
    let target = table.place(2, Point::new(300.0, 0.0), 100.0);

    let moved = table
        .engine
        .activate_forced_movement(source, target, MovementDirection::Any, 0.0, 0.0)
        .await;

    assert!(!moved.unwrap());
    assert_eq!(table.overlay.highlights_drawn(), 0);
    assert_eq!(table.notifier.count(NoticeLevel::Warn), 1);
    table.assert_torn_down();
}

#[tokio::test]
async fn large_piece_lands_centered_on_clicked_cell() {
    let grid = SquareGrid::new(100.0, 5.0, DiagonalRule::Equidistant);
    let table = Table::new(grid);
    let source = table.place(1, Point::new(0.0, 300.0), 100.0);
    let target = table.place(2, Point::new(100.0, 0.0), 200.0);

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Any, 0.0, 5.0),
        async {
            table.until_listening().await;
            table.click(350.0, 150.0);
        }
    );

    assert!(moved.unwrap());
    let top_left = table.top_left(target);
    assert_eq!(top_left, Point::new(250.0, 50.0));
    let center = top_left + Point::new(100.0, 100.0);
    assert!(grid.measure(Point::new(200.0, 100.0), center) <= 5.0);
    table.assert_torn_down();
}

#[tokio::test]
async fn escape_cancels_and_tears_down() {
    let table = Table::new(square());
    let source = table.place(1, Point::new(0.0, 0.0), 5.0);
    let target = table.place(2, Point::new(5.0, 0.0), 5.0);
    let mut transitions = table.engine.interaction().transitions();

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Any, 0.0, 10.0),
        async {
            table.until_listening().await;
            table.engine.input().dispatch(InputEvent::PointerMove {
                position: Point::new(1.0, 1.0),
            });
            table.press(Key::Escape);
        }
    );

    assert!(!moved.unwrap());
    assert_eq!(table.top_left(target), Point::new(5.0, 0.0));
    assert_eq!(table.overlay.pans(), vec![Point::new(1.0, 1.0)]);
    table.assert_torn_down();

    let mut seen = Vec::new();
    while let Ok(state) = transitions.try_recv() {
        seen.push(state);
    }
    assert_eq!(
        seen,
        vec![
            InteractionState::Initializing,
            InteractionState::Listening,
            InteractionState::Cancelled,
            InteractionState::Idle,
        ]
    );
}

#[tokio::test]
async fn right_click_cancels_and_suppresses_menu() {
    let table = Table::new(square());
    let source = table.place(1, Point::new(0.0, 0.0), 5.0);
    let target = table.place(2, Point::new(5.0, 0.0), 5.0);

    let (moved, outcome) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Any, 0.0, 10.0),
        async {
            table.until_listening().await;
            table.right_click(40.0, 40.0)
        }
    );

    assert!(!moved.unwrap());
    assert!(outcome.prevent_default);
    assert!(!table.right_click(40.0, 40.0).prevent_default);
    table.assert_torn_down();
}

#[tokio::test]
async fn dropping_the_session_future_tears_down() {
    let table = Table::new(square());
    let source = table.place(1, Point::new(0.0, 0.0), 5.0);
    let target = table.place(2, Point::new(5.0, 0.0), 5.0);

    {
        let session = table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Any, 0.0, 10.0);
        tokio::pin!(session);
        tokio::select! {
            _ = &mut session => panic!("session should still be listening"),
            () = table.until_listening() => {}
        }
        assert_eq!(table.engine.input().listener_count(), 1);
    }

    table.assert_torn_down();
}

#[tokio::test]
async fn overlapping_activation_is_rejected() {
    let table = Table::new(square());
    let source = table.place(1, Point::new(0.0, 0.0), 5.0);
    let target = table.place(2, Point::new(5.0, 0.0), 5.0);

    let (first, second) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Any, 0.0, 10.0),
        async {
            table.until_listening().await;
            let second = table
                .engine
                .activate_forced_movement(source, target, MovementDirection::Any, 0.0, 10.0)
                .await;
            table.press(Key::Escape);
            second
        }
    );

    assert!(!first.unwrap());
    assert!(matches!(second, Err(InteractionError::SessionActive)));
}

#[tokio::test]
async fn missing_piece_is_an_error() {
    let table = Table::new(square());
    let source = table.place(1, Point::new(0.0, 0.0), 5.0);

    let result = table
        .engine
        .activate_forced_movement(source, board_core::PieceId(99), MovementDirection::Any, 0.0, 5.0)
        .await;

    assert!(matches!(result, Err(InteractionError::PieceNotFound(_))));
    assert_eq!(table.engine.interaction().state(), InteractionState::Idle);
}

#[tokio::test]
async fn without_permission_the_move_is_forwarded_once() {
    let table = Table::new(square());
    let source = table.place(1, Point::new(0.0, 0.0), 5.0);
    let target = table.place_foreign(2, Point::new(5.0, 0.0), 5.0);

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Push, 0.0, 10.0),
        async {
            table.until_listening().await;
            table.click(17.0, 3.0);
        }
    );

    assert!(moved.unwrap());
    assert!(table.board.commits().is_empty());
    assert_eq!(
        table.peer.messages(),
        vec![ForwardMessage::MoveToken {
            scene_id: SCENE,
            token_id: target,
            coordinates: Point::new(15.0, 0.0),
            animate: true,
        }]
    );
    let raw: serde_json::Value = serde_json::from_str(&table.peer.payloads()[0]).unwrap();
    assert_eq!(raw["action"], "moveToken");
}

#[tokio::test]
async fn broken_peer_transport_is_an_error() {
    let table = Table::new(square());
    let source = table.place(1, Point::new(0.0, 0.0), 5.0);
    let target = table.place_foreign(2, Point::new(5.0, 0.0), 5.0);
    table.peer.fail_with(ForwardError::NoPeer);

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Push, 0.0, 10.0),
        async {
            table.until_listening().await;
            table.click(17.0, 3.0);
        }
    );

    assert!(matches!(moved, Err(InteractionError::Forward(ForwardError::NoPeer))));
    table.assert_torn_down();
}

#[tokio::test]
async fn commit_failure_is_reported_but_counts_as_resolved() {
    let table = Table::new(square());
    let source = table.place(1, Point::new(0.0, 0.0), 5.0);
    let target = table.place(2, Point::new(5.0, 0.0), 5.0);
    table.board.fail_commits("document locked");

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Push, 0.0, 10.0),
        async {
            table.until_listening().await;
            table.click(17.0, 3.0);
        }
    );

    assert!(moved.unwrap());
    assert_eq!(table.top_left(target), Point::new(5.0, 0.0));
    assert_eq!(table.notifier.count(NoticeLevel::Error), 1);
    table.assert_torn_down();
}

#[tokio::test]
async fn forced_move_strips_history_only_for_the_moved_piece() {
    use board_runtime::{PieceUpdate, UpdateChannel};

    let table = Table::new(square());
    let source = table.place(1, Point::new(0.0, 0.0), 5.0);
    let target = table.place(2, Point::new(5.0, 0.0), 5.0);

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Push, 0.0, 10.0),
        async {
            table.until_listening().await;
            table.click(17.0, 3.0);
        }
    );
    assert!(moved.unwrap());

    // An ordinary move afterwards keeps the host's tracking.
    table
        .board
        .commit(source, PieceUpdate::new(Point::new(0.0, 5.0), false))
        .await
        .unwrap();

    let commits = table.board.commits();
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].0, target);
    assert!(!commits[0].1.fields.contains_key("movementHistory"));
    assert_eq!(commits[1].0, source);
    assert!(commits[1].1.fields.contains_key("movementHistory"));
}

#[tokio::test]
async fn indicator_can_be_disabled() {
    let mut config = RuntimeConfig::default();
    config.show_input_indicator = false;
    let table = Table::with(open_field(), Arc::new(board_core::NoObstruction), config);
    let (source, target) = field_pieces(&table);

    let (moved, ()) = tokio::join!(
        table
            .engine
            .activate_forced_movement(source, target, MovementDirection::Any, 0.0, 10.0),
        async {
            table.until_listening().await;
            assert!(table.overlay.indicator().is_none());
            table.press(Key::Escape);
        }
    );

    assert!(!moved.unwrap());
}
