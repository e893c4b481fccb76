//! Scripted demo: one push, one target selection and one swap against an
//! in-memory board.
//!
//! `SHOVE_TOPOLOGY` picks the board (`square`, `hexagonal`, `continuous`);
//! the `BOARD_*` variables tune the engine.
use std::sync::Arc;

use anyhow::{Context, Result};
use board_core::{Grid, GridTopology, MovementDirection, PieceId, Point, SceneId, UserId};
use board_runtime::memory::{
    MemoryBoard, MemoryTools, RecordingNotifier, RecordingOverlay, RecordingPeer,
};
use board_runtime::{Engine, InputEvent, Key, PieceRecord, PieceRegistry, RuntimeConfig};
use tracing::info;

/// Pixels per grid space.
const GRID_SIZE: f64 = 100.0;
/// Game units per grid space.
const GRID_DISTANCE: f64 = 5.0;

const PLAYER: UserId = UserId(1);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let topology = match std::env::var("SHOVE_TOPOLOGY") {
        Ok(raw) => raw
            .parse::<GridTopology>()
            .ok()
            .with_context(|| format!("unknown topology `{raw}`"))?,
        Err(_) => GridTopology::default(),
    };
    let config = RuntimeConfig::from_env();
    info!(%topology, ?config, "starting demo");

    let board = Arc::new(MemoryBoard::new());
    let knight = place(&board, 1, "Knight", 0.0);
    let ogre = place(&board, 2, "Ogre", 3.0 * GRID_SIZE);

    let overlay = Arc::new(RecordingOverlay::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let tools = Arc::new(MemoryTools::new());
    let engine = Engine::builder()
        .config(config)
        .session(PLAYER, SceneId(1))
        .grid(Arc::new(Grid::for_topology(topology, GRID_SIZE, GRID_DISTANCE)))
        .registry(board.clone())
        .updates(board.clone())
        .peers(Arc::new(RecordingPeer::new()))
        .notifier(notifier.clone())
        .overlay(overlay.clone())
        .tools(tools.clone())
        .build()?;

    // Push the ogre two spaces away from the knight.
    let ogre_center = piece(&board, ogre)?.center();
    let (pushed, ()) = tokio::join!(
        engine.activate_forced_movement(knight, ogre, MovementDirection::Push, 0.0, 10.0),
        async {
            wait_until_listening(&engine).await;
            engine.input().dispatch(InputEvent::primary_click(
                ogre_center + Point::new(2.0 * GRID_SIZE, 0.0),
            ));
        }
    );
    info!(pushed = pushed?, ogre = %piece(&board, ogre)?.top_left, "push finished");

    // Pick one target, confirm with Enter.
    let (selected, ()) = tokio::join!(engine.activate_target_selection(2, "creature"), async {
        engine
            .targeting()
            .subscribe()
            .wait_for(|state| *state == board_runtime::SelectionState::Listening)
            .await
            .ok();
        tools.set_target_count(1);
        engine
            .input()
            .dispatch(InputEvent::TargetsChanged { count: 1 });
        engine.input().dispatch(InputEvent::key(Key::Enter));
    });
    info!(selected = selected?, "target selection finished");

    let outcome = engine.executor().swap(knight, ogre).await?;
    info!(
        %outcome,
        knight = %piece(&board, knight)?.top_left,
        ogre = %piece(&board, ogre)?.top_left,
        "swap finished"
    );

    for (level, message) in notifier.notices() {
        info!(%level, text = %message, "notice");
    }
    info!(
        commits = board.commits().len(),
        overlay_clears = overlay.clears(),
        "demo complete"
    );
    Ok(())
}

fn place(board: &MemoryBoard, id: u32, name: &str, x: f64) -> PieceId {
    let id = PieceId(id);
    board.insert(PieceRecord::new(
        id,
        name,
        Point::new(x, 0.0),
        GRID_SIZE,
        GRID_SIZE,
    ));
    board.grant(PLAYER, id);
    id
}

fn piece(board: &MemoryBoard, id: PieceId) -> Result<PieceRecord> {
    board
        .piece(id)
        .with_context(|| format!("piece {id} missing from board"))
}

async fn wait_until_listening(engine: &Engine) {
    let mut state = engine.interaction().subscribe();
    // The controller outlives this wait, so the channel cannot close.
    let _ = state
        .wait_for(|state| *state == board_runtime::InteractionState::Listening)
        .await;
}
