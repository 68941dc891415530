use std::mem;
use std::time::Duration;

use instant::Instant;
use itertools::Itertools;
use log::{debug, info};
use serde_json::json;

use crate::board::{render_board_text, render_pieces, BoardConfig, Pieces};
use crate::commands::{
    is_short_command, parse_move_attempt, BoardQuery, Command, PieceQuery, ScanQuery,
    COMMAND_MARKER,
};
use crate::force::Force;
use crate::game::result_text;
use crate::node::Node;
use crate::notation::{render_move, render_moves, MoveStyle};
use crate::notify::{Notify, Redraw};
use crate::player::{player_node, player_text};
use crate::round::{Position, RoundCtrl};
use crate::scheduler::TaskHandle;
use crate::settings::render_move_style_setting;
use crate::transport::SendOptions;


// Screen-reader users miss the initial render; repeat the summary aloud shortly after.
const GREETING_DELAY: Duration = Duration::from_secs(2);
const VARIANT_NOTICE_DELAY: Duration = Duration::from_secs(3);

const UNSUPPORTED_VARIANT_NOTICE: &str = "Sorry, this variant is not supported in blind mode.";

// Non-visual round view: a text-first document replacing the graphical board, plus
// the command interpreter behind the move input.
pub struct RoundNvui {
    notify: Notify,
    move_style: MoveStyle,
    queries: Vec<Box<dyn BoardQuery>>,
    input: String,
    pending: Vec<TaskHandle>,
    greeted: bool,
    variant_advised: bool,
}

impl RoundNvui {
    pub fn new(redraw: Redraw) -> Self {
        RoundNvui {
            notify: Notify::new(redraw),
            move_style: MoveStyle::Usi,
            queries: vec![Box::new(PieceQuery), Box::new(ScanQuery)],
            input: String::new(),
            pending: Vec::new(),
            greeted: false,
            variant_advised: false,
        }
    }

    // The notification cell is shared with the host: inbound server messages and
    // move suggestions land here too.
    pub fn notify(&self) -> &Notify { &self.notify }

    pub fn move_style(&self) -> MoveStyle { self.move_style }
    pub fn set_move_style(&mut self, style: MoveStyle) { self.move_style = style; }

    pub fn input(&self) -> &str { &self.input }
    pub fn set_input(&mut self, text: &str) { self.input = text.to_owned(); }

    // Replaces the board-query chain (piece lookup, then board scan, by default).
    pub fn set_queries(&mut self, queries: Vec<Box<dyn BoardQuery>>) { self.queries = queries; }

    pub fn render(&mut self, ctrl: &mut RoundCtrl) -> Node {
        let now = Instant::now();
        let variant_unsupported = !ctrl.data.game.variant.supported_in_text_mode();

        if ctrl.ensure_board(BoardConfig::text_mode()) {
            info!("text-mode board initialized");
            if variant_unsupported && !self.variant_advised {
                self.variant_advised = true;
                let notify = self.notify.clone();
                self.schedule(ctrl, VARIANT_NOTICE_DELAY, Box::new(move || {
                    notify.set(UNSUPPORTED_VARIANT_NOTICE);
                }));
            }
        }
        if !self.greeted {
            self.greeted = true;
            let notify = self.notify.clone();
            let summary = game_text(ctrl);
            self.schedule(ctrl, GREETING_DELAY, Box::new(move || notify.set(summary)));
        }

        let d = &ctrl.data;
        let trans = ctrl.trans.as_ref();
        let empty = Pieces::new();
        let pieces = ctrl.pieces().unwrap_or(&empty);

        let mut children = vec![
            Node::elem("h1").with_text(game_text(ctrl)),
            Node::elem("h2").with_text("Game info"),
        ];
        for force in [Force::Sente, Force::Gote] {
            let player = if d.player.force == force { &d.player } else { &d.opponent };
            children.push(
                Node::elem("p")
                    .with_text(format!("{} player: ", force.label()))
                    .with_child(player_node(player, trans)),
            );
        }
        children.push(Node::elem("p").with_text(format!(
            "{} {}",
            if d.game.rated { "Rated" } else { "Casual" },
            d.game.perf_label()
        )));
        if let Some(control) = d.clock {
            children.push(Node::elem("p").with_text(format!("Clock: {control}")));
        }

        children.push(Node::elem("h2").with_text("Moves"));
        children.push(
            Node::elem("p")
                .with_class("moves")
                .with_attribute("role", "log")
                .with_attribute("aria-live", "off")
                .with_children(render_moves(&d.steps, self.move_style)),
        );

        children.push(Node::elem("h2").with_text("Pieces"));
        children.push(render_pieces(pieces));

        children.push(Node::elem("h2").with_text("Game status"));
        children.push(
            Node::elem("div")
                .with_class("status")
                .with_attribute("role", "status")
                .with_attribute("aria-live", "assertive")
                .with_attribute("aria-atomic", "true")
                .with_text(if d.game.playable() { "Playing".to_owned() } else { result_text(&d.game) }),
        );

        children.push(Node::elem("h2").with_text("Last move"));
        children.push(
            Node::elem("p")
                .with_class("lastMove")
                .with_attribute("aria-live", "assertive")
                .with_attribute("aria-atomic", "true")
                .with_text(
                    ctrl.current_step()
                        .map(|step| render_move(&step.usi, self.move_style))
                        .unwrap_or_default(),
                ),
        );

        if ctrl.is_playing() {
            children.push(Node::elem("h2").with_text("Move form"));
            let label_key = if ctrl.is_my_turn() { "yourTurn" } else { "waiting" };
            let mut move_input = Node::elem("input")
                .with_class("move")
                .with_attribute("name", "move")
                .with_attribute("type", "text")
                .with_attribute("autocomplete", "off")
                .with_attribute("autofocus", "autofocus");
            if variant_unsupported {
                move_input = move_input
                    .with_attribute("disabled", "disabled")
                    .with_attribute("title", UNSUPPORTED_VARIANT_NOTICE);
            }
            children.push(Node::elem("form").with_child(
                Node::elem("label").with_text(trans.trans(label_key, &[])).with_child(move_input),
            ));
        }

        children.push(Node::elem("h2").with_text("Your clock"));
        children.push(
            Node::elem("div").with_class("botc").with_maybe_child(ctrl.any_clock(Position::Bottom, now)),
        );
        children.push(Node::elem("h2").with_text("Opponent clock"));
        children.push(
            Node::elem("div").with_class("topc").with_maybe_child(ctrl.any_clock(Position::Top, now)),
        );

        children.push(self.notify.render());

        children.push(Node::elem("h2").with_text("Actions"));
        if d.player.spectator {
            children.extend(ctrl.controls.render_table_watch());
        } else if d.game.playable() {
            children.extend(ctrl.controls.render_table_play());
        } else {
            children.extend(ctrl.controls.render_table_end());
        }

        children.push(Node::elem("h2").with_text("Board"));
        children.push(
            Node::elem("pre")
                .with_class("board")
                .with_text(render_board_text(pieces, d.player.force)),
        );

        children.push(Node::elem("h2").with_text("Settings"));
        children.push(
            Node::elem("label")
                .with_text("Move notation")
                .with_child(render_move_style_setting(self.move_style)),
        );

        children.push(Node::elem("h2").with_text("Commands"));
        children.push(self.render_help());

        Node::elem("div").with_class("nvui").with_children(children)
    }

    // Handles a submission of the move input. Never fails: every outcome is either a
    // transport send, a control trigger or a notification. The input is cleared
    // whichever path was taken.
    pub fn submit(&mut self, ctrl: &mut RoundCtrl) {
        let raw = mem::take(&mut self.input);
        let mut input = raw.trim().to_owned();
        if is_short_command(&input) {
            input.insert(0, COMMAND_MARKER);
        }
        match input.strip_prefix(COMMAND_MARKER) {
            Some(command) => self.on_command(ctrl, command),
            None => self.on_move(ctrl, &input),
        }
    }

    fn on_move(&mut self, ctrl: &mut RoundCtrl, input: &str) {
        let attempt = parse_move_attempt(input);
        let legal = ctrl.legal_usis();
        if legal.iter().any(|usi| *usi == attempt.usi) {
            let usi = match attempt.promotion {
                Some(promotion) => format!("{}{}", attempt.usi, promotion),
                None => attempt.usi,
            };
            debug!("submitting move {usi}");
            ctrl.transport.send("move", json!({ "u": usi }), SendOptions { ackable: true });
        } else if ctrl.is_my_turn() {
            self.notify.set(format!("Invalid move: {input}"));
        } else {
            self.notify.set("Not your turn");
        }
    }

    fn on_command(&mut self, ctrl: &mut RoundCtrl, command: &str) {
        debug!("command: {command}");
        match Command::parse(command) {
            Command::Clock => {
                let now = Instant::now();
                let readout = |position| {
                    ctrl.any_clock(position, now)
                        .map(|node| node.text_content())
                        .unwrap_or_default()
                };
                self.notify
                    .set(format!("{}, {}", readout(Position::Bottom), readout(Position::Top)));
            }
            Command::Last => {
                let text = ctrl
                    .current_step()
                    .map(|step| render_move(&step.usi, self.move_style))
                    .unwrap_or_default();
                self.notify.set(text);
            }
            Command::Abort => ctrl.controls.abort(),
            Command::Resign => ctrl.controls.resign_confirm(),
            Command::Draw => ctrl.controls.draw_accept(),
            Command::Takeback => ctrl.controls.takeback_accept(),
            Command::Opponent => {
                self.notify.set(player_text(&ctrl.data.opponent, ctrl.trans.as_ref()));
            }
            Command::Query(query) => {
                let empty = Pieces::new();
                let pieces = ctrl.pieces().unwrap_or(&empty);
                let answer = self
                    .queries
                    .iter()
                    .find_map(|handler| handler.apply(query, pieces, self.move_style));
                match answer {
                    Some(answer) => self.notify.set(answer),
                    None => self.notify.set(format!("Invalid command: {query}")),
                }
            }
        }
    }

    fn render_help(&self) -> Node {
        let mut help = Node::elem("p")
            .with_text("Type these commands in the move input.")
            .with_child(Node::br())
            .with_text("c: Read clocks.")
            .with_child(Node::br())
            .with_text("l: Read last move.")
            .with_child(Node::br());
        for query in &self.queries {
            help = help.with_text(query.help()).with_child(Node::br());
        }
        help.with_text("abort: Abort game.")
            .with_child(Node::br())
            .with_text("resign: Resign game.")
            .with_child(Node::br())
            .with_text("draw: Offer or accept draw.")
            .with_child(Node::br())
            .with_text("takeback: Offer or accept take back.")
            .with_child(Node::br())
    }

    fn schedule(&mut self, ctrl: &RoundCtrl, delay: Duration, task: Box<dyn FnOnce()>) {
        self.pending.push(ctrl.scheduler.schedule(delay, task));
    }
}

// Pending announcements die with the view instead of firing into a torn-down UI.
impl Drop for RoundNvui {
    fn drop(&mut self) {
        for task in &self.pending {
            task.cancel();
        }
    }
}

// One-sentence summary: who you are, the stakes, the time control and the opponent.
pub fn game_text(ctrl: &RoundCtrl) -> String {
    let d = &ctrl.data;
    let status_part = if d.game.status.is_over() {
        "Game over.".to_owned()
    } else if ctrl.is_playing() {
        format!("You play the {} pieces.", d.player.force.label())
    } else {
        "Spectating.".to_owned()
    };
    let parts = [
        status_part,
        if d.game.rated { "Rated".to_owned() } else { "Casual".to_owned() },
        d.clock.map(|control| control.to_string()).unwrap_or_default(),
        d.game.perf_label().to_owned(),
        "game versus".to_owned(),
        player_text(&d.opponent, ctrl.trans.as_ref()),
    ];
    parts.iter().filter(|part| !part.is_empty()).join(" ")
}
