use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use serde_json::json;

use shogi_nvui::board::{BoardConfig, DestMap};
use shogi_nvui::force::Force;
use shogi_nvui::game::GameStatus;
use shogi_nvui::game::Variant;
use shogi_nvui::node::{Element, Node};
use shogi_nvui::nvui::{game_text, RoundNvui};
use shogi_nvui::round::RoundData;
use shogi_nvui::test_util::{sample_round_data, test_round, TestRound};


fn dests() -> DestMap {
    DestMap::from_pairs([("2c", vec!["2d", "2e"]), ("7g", vec!["7f"])])
}

fn view() -> RoundNvui { RoundNvui::new(Rc::new(|| ())) }

fn playing_round() -> TestRound { test_round(sample_round_data(), dests()) }

fn submit(view: &mut RoundNvui, round: &mut TestRound, input: &str) {
    view.set_input(input);
    view.submit(&mut round.ctrl);
}

fn find<'a>(node: &'a Node, pred: impl Fn(&Element) -> bool + 'a) -> Option<&'a Element> {
    let el = node.as_element()?;
    if pred(el) { Some(el) } else { el.find(&pred) }
}


#[test]
fn legal_move_is_sent_ackable() {
    let mut round = playing_round();
    let mut view = view();
    view.render(&mut round.ctrl);
    submit(&mut view, &mut round, "2c2d");

    let sent = round.transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    let (msg_type, data, options) = &sent[0];
    assert_eq!(msg_type, "move");
    assert_eq!(data, &json!({ "u": "2c2d" }));
    assert!(options.ackable);
    assert_eq!(view.input(), "");
    assert_eq!(view.notify().text(), "");
}

#[test]
fn promotion_suffix_is_appended_lowercased() {
    let mut round = playing_round();
    let mut view = view();
    view.render(&mut round.ctrl);
    submit(&mut view, &mut round, "2c2d=P");

    let sent = round.transport.sent.borrow();
    assert_eq!(sent[0].1, json!({ "u": "2c2dp" }));
}

#[test]
fn move_lookup_is_case_insensitive() {
    let mut round = playing_round();
    let mut view = view();
    view.render(&mut round.ctrl);
    submit(&mut view, &mut round, "7G7F");
    assert_eq!(round.transport.sent.borrow()[0].1, json!({ "u": "7g7f" }));
}

#[test]
fn illegal_move_on_my_turn_notifies_invalid() {
    let mut round = playing_round();
    let mut view = view();
    view.render(&mut round.ctrl);
    submit(&mut view, &mut round, "  5e5d ");

    assert!(round.transport.sent.borrow().is_empty());
    assert_eq!(view.notify().text(), "Invalid move: 5e5d");
    assert_eq!(view.input(), "");
}

#[test]
fn illegal_move_off_turn_notifies_not_your_turn() {
    let mut data = sample_round_data();
    data.game.turn = Force::Gote;
    let mut round = test_round(data, dests());
    let mut view = view();
    view.render(&mut round.ctrl);
    submit(&mut view, &mut round, "5e5d");

    assert!(round.transport.sent.borrow().is_empty());
    assert_eq!(view.notify().text(), "Not your turn");
}

#[test]
fn clock_command_reads_both_clocks() {
    let mut round = playing_round();
    let mut view = view();
    let rendered = view.render(&mut round.ctrl);
    submit(&mut view, &mut round, "c");
    assert_eq!(view.notify().text(), "05:00, 05:00");

    // The announcement matches the rendered readouts.
    let botc = find(&rendered, |el| el.has_class("botc")).unwrap();
    assert_eq!(Node::Element(botc.clone()).text_content(), "05:00");

    submit(&mut view, &mut round, "Clock extra text");
    assert_eq!(view.notify().text(), "05:00, 05:00");
}

#[test]
fn last_command_reads_current_move() {
    let mut round = playing_round();
    let mut view = view();
    view.render(&mut round.ctrl);
    submit(&mut view, &mut round, "l");
    assert_eq!(view.notify().text(), "3c3d");
}

#[test]
fn action_commands_trigger_controls() {
    let mut round = playing_round();
    let mut view = view();
    view.render(&mut round.ctrl);
    for command in ["abort", "RESIGN", "draw", "takeback"] {
        submit(&mut view, &mut round, command);
    }
    assert_eq!(
        *round.controls.triggered.borrow(),
        vec!["abort", "resign", "draw", "takeback"]
    );
}

#[test]
fn opponent_command_reads_identity() {
    let mut round = playing_round();
    let mut view = view();
    view.render(&mut round.ctrl);
    submit(&mut view, &mut round, "o");
    assert_eq!(view.notify().text(), "kei rated 1600");
}

#[test]
fn board_queries_and_fallthrough() {
    let mut round = playing_round();
    let mut view = view();
    view.render(&mut round.ctrl);

    submit(&mut view, &mut round, "p k");
    assert_eq!(view.notify().text(), "Sente king: 5i. Gote king: 5a");

    submit(&mut view, &mut round, "/scan e");
    assert_eq!(view.notify().text(), "Rank e: empty");

    submit(&mut view, &mut round, "/xyzzy");
    assert_eq!(view.notify().text(), "Invalid command: xyzzy");
    assert_eq!(view.input(), "");
}

#[test]
fn board_initialized_with_text_mode_config() {
    let mut round = playing_round();
    let mut view = view();
    assert_eq!(round.board_config.get(), None);
    view.render(&mut round.ctrl);
    assert_eq!(round.board_config.get(), Some(BoardConfig::text_mode()));
    // Re-rendering does not recreate the board.
    view.render(&mut round.ctrl);
    assert_eq!(round.board_config.get(), Some(BoardConfig::text_mode()));
}

#[test]
fn greeting_is_scheduled_once_and_announced() {
    let mut round = playing_round();
    let mut view = view();
    view.render(&mut round.ctrl);
    view.render(&mut round.ctrl);
    assert_eq!(round.scheduler.pending(), 1);
    round.scheduler.run_all();
    assert_eq!(view.notify().text(), game_text(&round.ctrl));
}

#[test]
fn unsupported_variant_disables_input_and_advises_once() {
    let mut data = sample_round_data();
    data.game.variant = Variant::Minishogi;
    let mut round = test_round(data, dests());
    let mut view = view();
    let rendered = view.render(&mut round.ctrl);
    view.render(&mut round.ctrl);

    let input = find(&rendered, |el| el.tag == "input").unwrap();
    assert_eq!(input.attr("disabled"), Some("disabled"));

    // Greeting plus one variant advisory, despite two renders.
    assert_eq!(round.scheduler.pending(), 2);
    round.scheduler.run_all();
}

#[test]
fn dropping_the_view_cancels_pending_announcements() {
    let redraws = Rc::new(Cell::new(0));
    let counter = Rc::clone(&redraws);
    let mut round = playing_round();
    let mut view = RoundNvui::new(Rc::new(move || counter.set(counter.get() + 1)));
    view.render(&mut round.ctrl);
    assert_eq!(round.scheduler.pending(), 1);
    drop(view);
    round.scheduler.run_all();
    assert_eq!(redraws.get(), 0);
}

#[test]
fn document_structure() {
    let mut round = playing_round();
    let mut view = view();
    let rendered = view.render(&mut round.ctrl);
    let text = rendered.text_content();

    assert!(text.starts_with("You play the sente pieces. Casual 5 + 10 Blitz game versus kei rated 1600"));
    assert!(text.contains("1 7g7f, 3c3d, "));
    assert!(text.contains("Playing"));
    assert!(text.contains("Clock: 5 + 10"));
    assert!(find(&rendered, |el| el.tag == "form").is_some());
    assert!(find(&rendered, |el| el.has_class("table-play")).is_some());
    assert!(find(&rendered, |el| el.has_class("moves")).is_some());
    let board = find(&rendered, |el| el.has_class("board")).unwrap();
    assert!(Node::Element(board.clone()).text_content().contains("9  8  7"));
}

#[test]
fn spectators_get_watch_table_and_no_form() {
    let mut data = sample_round_data();
    data.player.spectator = true;
    let mut round = test_round(data, dests());
    let mut view = view();
    let rendered = view.render(&mut round.ctrl);

    assert!(find(&rendered, |el| el.tag == "form").is_none());
    assert!(find(&rendered, |el| el.has_class("table-watch")).is_some());
    assert!(game_text(&round.ctrl).starts_with("Spectating."));
}

#[test]
fn finished_game_gets_end_table_and_result_text() {
    let mut data = sample_round_data();
    data.game.status = GameStatus::Mate;
    data.game.winner = Some(Force::Gote);
    let mut round = test_round(data, dests());
    let mut view = view();
    let rendered = view.render(&mut round.ctrl);

    assert!(find(&rendered, |el| el.tag == "form").is_none());
    assert!(find(&rendered, |el| el.has_class("table-end")).is_some());
    let status = find(&rendered, |el| el.has_class("status")).unwrap();
    assert_eq!(Node::Element(status.clone()).text_content(), "Checkmate. Gote is victorious.");
    assert!(game_text(&round.ctrl).starts_with("Game over."));
}

#[test]
fn round_data_round_trips_through_json() {
    let data = sample_round_data();
    let json = serde_json::to_string(&data).unwrap();
    let back: RoundData = serde_json::from_str(&json).unwrap();
    assert_eq!(back.game.turn, data.game.turn);
    assert_eq!(back.steps.len(), data.steps.len());
}
