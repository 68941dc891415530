use std::collections::BTreeMap;

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::coord::{Coord, Row};
use crate::force::Force;
use crate::node::Node;
use crate::piece::{PieceKind, PieceOnBoard};


pub type Pieces = BTreeMap<Coord, PieceOnBoard>;

// Origin square -> legal destination squares for the currently movable pieces.
// Owned and kept up to date by the external board component; consumed here only for
// textual move validation by string membership.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct DestMap {
    dests: BTreeMap<String, Vec<String>>,
}

impl DestMap {
    pub fn new() -> Self { Self::default() }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, Vec<&'a str>)>) -> Self {
        let dests = pairs
            .into_iter()
            .map(|(orig, dests)| {
                (orig.to_owned(), dests.into_iter().map(str::to_owned).collect())
            })
            .collect();
        DestMap { dests }
    }

    pub fn insert(&mut self, orig: &str, dests: impl IntoIterator<Item = impl Into<String>>) {
        self.dests.insert(orig.to_owned(), dests.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool { self.dests.is_empty() }

    // Flattened origin+destination pairs, lower-cased, e.g. "7g7f".
    pub fn to_usis(&self) -> Vec<String> {
        self.dests
            .iter()
            .flat_map(|(orig, dests)| {
                dests.iter().map(move |dest| format!("{orig}{dest}").to_ascii_lowercase())
            })
            .collect()
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BoardConfig {
    pub animation: bool,
    pub draggable: bool,
    pub coordinates: bool,
}

impl BoardConfig {
    // Text mode needs neither animation nor dragging, and the coordinate overlay
    // would only confuse a screen reader.
    pub fn text_mode() -> Self {
        BoardConfig {
            animation: false,
            draggable: false,
            coordinates: false,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            animation: true,
            draggable: true,
            coordinates: true,
        }
    }
}

// The graphical board component. External collaborator: it owns piece placement and
// the legal-destination map; this crate reads both and pushes configuration.
pub trait BoardApi {
    fn pieces(&self) -> &Pieces;
    fn dests(&self) -> &DestMap;
    fn configure(&mut self, config: BoardConfig);
}

pub type BoardFactory = Box<dyn FnOnce(BoardConfig) -> Box<dyn BoardApi>>;


// Board as text, one rank per line, viewer's side at the bottom. Upper-case letters
// are Sente pieces, lower-case Gote, '+' marks promotion, '.' an empty square.
pub fn render_board_text(pieces: &Pieces, viewer: Force) -> String {
    let header = Coord::visual_cols(viewer)
        .map(|col| format!(" {:>2}", col.to_algebraic()))
        .join("");
    let mut ret = format!(" {header}\n");
    for row in Coord::visual_rows(viewer) {
        ret.push(row.to_algebraic());
        for col in Coord::visual_cols(viewer) {
            let cell = match pieces.get(&Coord::new(row, col)) {
                Some(piece) => piece.letter(),
                None => ".".to_owned(),
            };
            ret.push_str(&format!(" {cell:>2}"));
        }
        ret.push('\n');
    }
    ret
}

// Piece listing, one paragraph per side, kinds in fixed order.
pub fn render_pieces(pieces: &Pieces) -> Node {
    Node::elem("div").with_class("pieces").with_children(Force::iter().map(|force| {
        let listing = PieceKind::iter()
            .filter_map(|kind| {
                let squares = squares_of(pieces, force, kind);
                if squares.is_empty() {
                    None
                } else {
                    Some(format!("{} {}", kind.spoken_name(), squares.iter().join(" ")))
                }
            })
            .join(", ");
        let listing = if listing.is_empty() { "none".to_owned() } else { listing };
        Node::elem("p").with_text(format!("{} pieces: {}.", force.name(), listing))
    }))
}

pub fn squares_of(pieces: &Pieces, force: Force, kind: PieceKind) -> Vec<String> {
    pieces
        .iter()
        .filter(|(_, piece)| piece.force == force && piece.kind == kind)
        .map(|(coord, _)| coord.to_string())
        .collect()
}

// One rank read left to right from the viewer-independent Sente side (file 9 first).
pub fn rank_text(pieces: &Pieces, row: Row) -> String {
    let occupied = Coord::visual_cols(Force::Sente)
        .filter_map(|col| {
            let coord = Coord::new(row, col);
            pieces
                .get(&coord)
                .map(|piece| format!("{} {} {}", coord, piece.force.label(), piece.spoken_name()))
        })
        .join(", ");
    if occupied.is_empty() {
        format!("Rank {}: empty", row.to_algebraic())
    } else {
        format!("Rank {}: {}", row.to_algebraic(), occupied)
    }
}
