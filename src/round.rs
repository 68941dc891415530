use std::rc::Rc;

use instant::Instant;
use serde::{Deserialize, Serialize};

use crate::board::{BoardApi, BoardConfig, BoardFactory, Pieces};
use crate::clock::{render_clock, render_corres_clock, CorresClock, RoundClock, TimeControl};
use crate::controls::GameControls;
use crate::game::{GameInfo, Step};
use crate::i18n::Translator;
use crate::node::Node;
use crate::player::RoundPlayer;
use crate::scheduler::Scheduler;
use crate::transport::Transport;


// Screen slot, relative to the board: the viewer sits at the bottom.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Position {
    Top,
    Bottom,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundData {
    pub game: GameInfo,
    pub player: RoundPlayer, // the viewer
    pub opponent: RoundPlayer,
    pub steps: Vec<Step>,
    pub clock: Option<TimeControl>,
    pub correspondence: Option<CorresClock>,
}

// Collaborators injected by the host. Everything behind these is out of scope:
// socket plumbing, confirm dialogs, translation bundles, timer wheels.
pub struct RoundDeps {
    pub transport: Rc<dyn Transport>,
    pub controls: Rc<dyn GameControls>,
    pub trans: Rc<dyn Translator>,
    pub scheduler: Rc<dyn Scheduler>,
    pub board_factory: BoardFactory,
}

pub struct RoundCtrl {
    pub data: RoundData,
    pub ply: u32, // currently displayed ply
    pub clock: Option<RoundClock>,
    board: Option<Box<dyn BoardApi>>,
    board_factory: Option<BoardFactory>,
    pub transport: Rc<dyn Transport>,
    pub controls: Rc<dyn GameControls>,
    pub trans: Rc<dyn Translator>,
    pub scheduler: Rc<dyn Scheduler>,
}

impl RoundCtrl {
    pub fn new(data: RoundData, deps: RoundDeps) -> Self {
        let ply = data.steps.last().map_or(0, |step| step.ply);
        let clock = data.clock.map(RoundClock::new);
        RoundCtrl {
            data,
            ply,
            clock,
            board: None,
            board_factory: Some(deps.board_factory),
            transport: deps.transport,
            controls: deps.controls,
            trans: deps.trans,
            scheduler: deps.scheduler,
        }
    }

    pub fn is_playing(&self) -> bool {
        !self.data.player.spectator && self.data.game.playable()
    }

    pub fn is_my_turn(&self) -> bool { self.data.game.turn == self.data.player.force }

    pub fn player_at(&self, position: Position) -> &RoundPlayer {
        match position {
            Position::Bottom => &self.data.player,
            Position::Top => &self.data.opponent,
        }
    }

    pub fn step_at(&self, ply: u32) -> Option<&Step> {
        self.data.steps.iter().find(|step| step.ply == ply)
    }

    pub fn current_step(&self) -> Option<&Step> { self.step_at(self.ply) }

    // Creates the board through the injected factory if it does not exist yet.
    // Returns true when this call performed the initialization.
    pub fn ensure_board(&mut self, config: BoardConfig) -> bool {
        if self.board.is_some() {
            return false;
        }
        match self.board_factory.take() {
            Some(factory) => {
                self.board = Some(factory(config));
                true
            }
            None => false,
        }
    }

    pub fn board(&self) -> Option<&dyn BoardApi> { self.board.as_deref() }

    pub fn pieces(&self) -> Option<&Pieces> { self.board().map(|board| board.pieces()) }

    pub fn legal_usis(&self) -> Vec<String> {
        self.board().map(|board| board.dests().to_usis()).unwrap_or_default()
    }

    // The clock fragment for a screen slot: the real-time clock when there is one,
    // the correspondence clock otherwise, nothing for unclocked games.
    pub fn any_clock(&self, position: Position, now: Instant) -> Option<Node> {
        let force = self.player_at(position).force;
        if let Some(ref clock) = self.clock {
            return Some(render_clock(clock, force, now));
        }
        self.data.correspondence.as_ref().map(|corres| render_corres_clock(corres, force))
    }
}
