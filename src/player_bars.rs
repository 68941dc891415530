use enum_map::EnumMap;
use strum::IntoEnumIterator;

use crate::force::Force;
use crate::node::Node;
use crate::tag::{
    find_tag, is_finished, player_name_tag, player_rating_tag, player_title_tag, result_of, Tag,
};


// Inputs for the study player bars. The clock fragments are pre-rendered by the
// analysis clock view; orientation says which side sits at the bottom of the board.
pub struct PlayerBarsInput<'a> {
    pub tags: &'a [Tag],
    pub clocks: Option<EnumMap<Force, Node>>,
    pub bottom_force: Force,
    pub turn: Force,
    pub any_mainline_clock: bool,
    pub embedded: bool,
}

// Builds the two player bars, or nothing when the chapter has no player identity to
// show: no name tags and no clock reading anywhere in the mainline.
pub fn render_player_bars(input: PlayerBarsInput<'_>) -> Option<[Node; 2]> {
    if input.embedded {
        return None;
    }
    let any_name = Force::iter().any(|force| {
        find_tag(input.tags, player_name_tag(force)).is_some_and(|name| !name.is_empty())
    });
    if !any_name && !input.any_mainline_clock {
        return None;
    }
    let ticking = if is_finished(input.tags) { None } else { Some(input.turn) };
    Some([Force::Sente, Force::Gote].map(|force| {
        render_player(&input, force, ticking == Some(force), input.bottom_force != force)
    }))
}

fn render_player(input: &PlayerBarsInput<'_>, force: Force, ticking: bool, top: bool) -> Node {
    let tags = input.tags;
    let name = find_tag(tags, player_name_tag(force)).unwrap_or("");
    let title = find_tag(tags, player_title_tag(force));
    let rating = find_tag(tags, player_rating_tag(force));
    let result = result_of(tags, force);

    let info = Node::elem("span")
        .with_class("info")
        .with_maybe_child(
            title.map(|title| Node::elem("span").with_class("title").with_text(format!("{title} "))),
        )
        .with_child(Node::elem("span").with_class("name").with_text(name))
        .with_maybe_child(
            rating.map(|rating| Node::elem("span").with_class("elo").with_text(rating)),
        );
    let left = Node::elem("div")
        .with_class("left")
        .with_maybe_child(
            result.map(|result| Node::elem("span").with_class("result").with_text(result)),
        )
        .with_child(info);

    Node::elem("div")
        .with_class("study__player")
        .with_class(if top { "study__player-top" } else { "study__player-bot" })
        .with_class_if("ticking", ticking)
        .with_child(left)
        .with_maybe_child(input.clocks.as_ref().map(|clocks| clocks[force].clone()))
}
