// Test doubles for the injected collaborators. Kept in the library (not `tests/`)
// so both unit and integration tests can share them.

use std::cell::{Cell, RefCell};
use std::mem;
use std::rc::Rc;
use std::time::Duration;

use serde_json::Value;

use crate::board::{BoardApi, BoardConfig, BoardFactory, DestMap, Pieces};
use crate::clock::TimeControl;
use crate::controls::GameControls;
use crate::coord::{Col, Coord, Row};
use crate::force::Force;
use crate::game::{GameInfo, GameStatus, Step, Variant};
use crate::i18n::EnglishTranslator;
use crate::node::Node;
use crate::piece::{PieceKind, PieceOnBoard};
use crate::player::{PlayerIdentity, RoundPlayer, User};
use crate::round::{RoundCtrl, RoundData, RoundDeps};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::transport::{SendOptions, Transport};


pub struct RecordingTransport {
    pub sent: RefCell<Vec<(String, Value, SendOptions)>>,
}

impl RecordingTransport {
    pub fn new() -> Rc<Self> { Rc::new(RecordingTransport { sent: RefCell::new(Vec::new()) }) }
}

impl Transport for RecordingTransport {
    fn send(&self, msg_type: &str, data: Value, options: SendOptions) {
        self.sent.borrow_mut().push((msg_type.to_owned(), data, options));
    }
}


pub struct RecordingControls {
    pub triggered: RefCell<Vec<&'static str>>,
}

impl RecordingControls {
    pub fn new() -> Rc<Self> { Rc::new(RecordingControls { triggered: RefCell::new(Vec::new()) }) }
}

impl GameControls for RecordingControls {
    fn abort(&self) { self.triggered.borrow_mut().push("abort"); }
    fn resign_confirm(&self) { self.triggered.borrow_mut().push("resign"); }
    fn draw_accept(&self) { self.triggered.borrow_mut().push("draw"); }
    fn takeback_accept(&self) { self.triggered.borrow_mut().push("takeback"); }

    fn render_table_watch(&self) -> Vec<Node> {
        vec![Node::elem("div").with_class("table-watch")]
    }
    fn render_table_play(&self) -> Vec<Node> {
        vec![Node::elem("div").with_class("table-play")]
    }
    fn render_table_end(&self) -> Vec<Node> {
        vec![Node::elem("div").with_class("table-end")]
    }
}


// Captures scheduled tasks; tests decide when (and whether) they fire.
pub struct ManualScheduler {
    tasks: RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> { Rc::new(ManualScheduler { tasks: RefCell::new(Vec::new()) }) }

    pub fn pending(&self) -> usize { self.tasks.borrow().len() }

    pub fn run_all(&self) {
        let tasks = mem::take(&mut *self.tasks.borrow_mut());
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle {
        let (handle, guarded) = TaskHandle::guard(task);
        self.tasks.borrow_mut().push((delay, guarded));
        handle
    }
}


pub struct StubBoard {
    pub pieces: Pieces,
    pub dests: DestMap,
    pub config: Option<BoardConfig>,
}

impl BoardApi for StubBoard {
    fn pieces(&self) -> &Pieces { &self.pieces }
    fn dests(&self) -> &DestMap { &self.dests }
    fn configure(&mut self, config: BoardConfig) { self.config = Some(config); }
}

// Factory for the lazy board init, plus a cell observing the config it was given.
pub fn stub_board_factory(
    pieces: Pieces, dests: DestMap,
) -> (BoardFactory, Rc<Cell<Option<BoardConfig>>>) {
    let seen_config = Rc::new(Cell::new(None));
    let inner = Rc::clone(&seen_config);
    let factory: BoardFactory = Box::new(move |config| {
        inner.set(Some(config));
        Box::new(StubBoard { pieces, dests, config: Some(config) })
    });
    (factory, seen_config)
}


fn sq(notation: &str) -> Coord { Coord::from_usi(notation).unwrap() }

pub fn standard_pieces() -> Pieces {
    use PieceKind::*;
    let mut pieces = Pieces::new();
    let back_rank = [Lance, Knight, Silver, Gold, King, Gold, Silver, Knight, Lance];
    let rank = |ch| Row::from_algebraic(ch).unwrap();
    for (col, kind) in Col::all().zip(back_rank) {
        pieces.insert(Coord::new(rank('a'), col), PieceOnBoard::new(kind, false, Force::Gote));
        pieces.insert(Coord::new(rank('i'), col), PieceOnBoard::new(kind, false, Force::Sente));
    }
    for col in Col::all() {
        pieces.insert(Coord::new(rank('c'), col), PieceOnBoard::new(Pawn, false, Force::Gote));
        pieces.insert(Coord::new(rank('g'), col), PieceOnBoard::new(Pawn, false, Force::Sente));
    }
    pieces.insert(sq("8b"), PieceOnBoard::new(Rook, false, Force::Gote));
    pieces.insert(sq("2b"), PieceOnBoard::new(Bishop, false, Force::Gote));
    pieces.insert(sq("2h"), PieceOnBoard::new(Rook, false, Force::Sente));
    pieces.insert(sq("8h"), PieceOnBoard::new(Bishop, false, Force::Sente));
    pieces
}

pub fn human_player(force: Force, username: &str, rating: u32) -> RoundPlayer {
    RoundPlayer {
        force,
        identity: PlayerIdentity::Human(User {
            username: username.to_owned(),
            title: None,
            rating: Some(rating),
        }),
        rating_diff: None,
        spectator: false,
    }
}

pub fn sample_round_data() -> RoundData {
    RoundData {
        game: GameInfo {
            variant: Variant::Standard,
            rated: false,
            speed: "Blitz".to_owned(),
            status: GameStatus::Started,
            winner: None,
            turn: Force::Sente,
        },
        player: human_player(Force::Sente, "mio", 1500),
        opponent: human_player(Force::Gote, "kei", 1600),
        steps: vec![
            Step { ply: 1, usi: "7g7f".to_owned(), sfen: String::new() },
            Step { ply: 2, usi: "3c3d".to_owned(), sfen: String::new() },
        ],
        clock: Some(TimeControl {
            initial: Duration::from_secs(300),
            increment: Duration::from_secs(10),
        }),
        correspondence: None,
    }
}


pub struct TestRound {
    pub ctrl: RoundCtrl,
    pub transport: Rc<RecordingTransport>,
    pub controls: Rc<RecordingControls>,
    pub scheduler: Rc<ManualScheduler>,
    pub board_config: Rc<Cell<Option<BoardConfig>>>,
}

pub fn test_round(data: RoundData, dests: DestMap) -> TestRound {
    let transport = RecordingTransport::new();
    let controls = RecordingControls::new();
    let scheduler = ManualScheduler::new();
    let (board_factory, board_config) = stub_board_factory(standard_pieces(), dests);
    let ctrl = RoundCtrl::new(data, RoundDeps {
        transport: transport.clone(),
        controls: controls.clone(),
        trans: Rc::new(EnglishTranslator),
        scheduler: scheduler.clone(),
        board_factory,
    });
    TestRound {
        ctrl,
        transport,
        controls,
        scheduler,
        board_config,
    }
}
