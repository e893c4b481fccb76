#![allow(dead_code)]

use std::sync::Arc;

use board_core::{GridAdapter, NoObstruction, ObstructionTester, PieceId, Point, SceneId, UserId};
use board_runtime::memory::{
    MemoryBoard, MemoryTools, RecordingNotifier, RecordingOverlay, RecordingPeer,
};
use board_runtime::{
    DispatchOutcome, Engine, InputEvent, InteractionState, Key, PieceRecord, PieceRegistry,
    RuntimeConfig, SelectionState, UpdateChannel,
};

pub const PLAYER: UserId = UserId(2);
pub const SCENE: SceneId = SceneId(1);

/// Engine wired to in-memory collaborators, with handles to inspect them.
pub struct Table {
    pub board: Arc<MemoryBoard>,
    pub overlay: Arc<RecordingOverlay>,
    pub notifier: Arc<RecordingNotifier>,
    pub peer: Arc<RecordingPeer>,
    pub tools: Arc<MemoryTools>,
    pub engine: Engine,
}

impl Table {
    pub fn new(grid: impl GridAdapter + 'static) -> Self {
        Self::with(grid, Arc::new(NoObstruction), RuntimeConfig::default())
    }

    pub fn with(
        grid: impl GridAdapter + 'static,
        obstruction: Arc<dyn ObstructionTester>,
        config: RuntimeConfig,
    ) -> Self {
        let board = Arc::new(MemoryBoard::new());
        let overlay = Arc::new(RecordingOverlay::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let peer = Arc::new(RecordingPeer::new());
        let tools = Arc::new(MemoryTools::new());

        let engine = Engine::builder()
            .config(config)
            .session(PLAYER, SCENE)
            .grid(Arc::new(grid))
            .obstruction(obstruction)
            .registry(board.clone())
            .updates(board.clone())
            .peers(peer.clone())
            .notifier(notifier.clone())
            .overlay(overlay.clone())
            .tools(tools.clone())
            .build()
            .expect("all collaborators provided");

        Self {
            board,
            overlay,
            notifier,
            peer,
            tools,
            engine,
        }
    }

    /// Places a piece the player owns.
    pub fn place(&self, id: u32, top_left: Point, size: f64) -> PieceId {
        let id = self.place_foreign(id, top_left, size);
        self.board.grant(PLAYER, id);
        id
    }

    /// Places a piece the player may not modify.
    pub fn place_foreign(&self, id: u32, top_left: Point, size: f64) -> PieceId {
        let id = PieceId(id);
        self.board
            .insert(PieceRecord::new(id, format!("piece {id}"), top_left, size, size));
        id
    }

    pub fn top_left(&self, id: PieceId) -> Point {
        self.board.piece(id).expect("piece exists").top_left
    }

    pub async fn until_listening(&self) {
        self.engine
            .interaction()
            .subscribe()
            .wait_for(|state| *state == InteractionState::Listening)
            .await
            .expect("controller alive");
    }

    pub async fn until_selecting(&self) {
        self.engine
            .targeting()
            .subscribe()
            .wait_for(|state| *state == SelectionState::Listening)
            .await
            .expect("controller alive");
    }

    pub fn click(&self, x: f64, y: f64) -> DispatchOutcome {
        self.engine
            .input()
            .dispatch(InputEvent::primary_click(Point::new(x, y)))
    }

    pub fn press(&self, key: Key) -> DispatchOutcome {
        self.engine.input().dispatch(InputEvent::key(key))
    }

    pub fn right_click(&self, x: f64, y: f64) -> DispatchOutcome {
        self.engine.input().dispatch(InputEvent::ContextMenu {
            position: Point::new(x, y),
        })
    }

    /// Session left nothing behind.
    pub fn assert_torn_down(&self) {
        assert_eq!(self.engine.input().listener_count(), 0);
        assert!(self.overlay.is_clear());
        assert!(!self.overlay.passthrough());
        assert!(self.board.hooks().is_empty());
    }
}
