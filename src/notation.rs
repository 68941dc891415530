use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::coord::Coord;
use crate::game::Step;
use crate::node::Node;
use crate::piece::PieceKind;


#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStyle {
    Usi,
    Literate,
}

impl MoveStyle {
    pub fn key(self) -> &'static str {
        match self {
            MoveStyle::Usi => "usi",
            MoveStyle::Literate => "literate",
        }
    }
    pub fn label(self) -> &'static str {
        match self {
            MoveStyle::Usi => "USI",
            MoveStyle::Literate => "Literate",
        }
    }
}


// Decomposed USI move: "7g7f", "2b3c+" or a drop "P*5e".
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UsiMove {
    Move { from: Coord, to: Coord, promotion: bool },
    Drop { kind: PieceKind, to: Coord },
}

impl UsiMove {
    pub fn parse(usi: &str) -> Option<Self> {
        if let Some((piece, square)) = usi.split_once('*') {
            let kind = PieceKind::from_usi(piece)?;
            let to = Coord::from_usi(square)?;
            return Some(UsiMove::Drop { kind, to });
        }
        let (body, promotion) = match usi.strip_suffix('+') {
            Some(body) => (body, true),
            None => (usi, false),
        };
        let mut chars = body.chars();
        let from: String = chars.by_ref().take(2).collect();
        let to: String = chars.by_ref().take(2).collect();
        if chars.next().is_some() {
            return None;
        }
        let from = Coord::from_usi(&from)?;
        let to = Coord::from_usi(&to)?;
        Some(UsiMove::Move { from, to, promotion })
    }
}

pub fn render_move(usi: &str, style: MoveStyle) -> String {
    match style {
        MoveStyle::Usi => usi.to_owned(),
        MoveStyle::Literate => match UsiMove::parse(usi) {
            Some(UsiMove::Move { from, to, promotion }) => {
                if promotion {
                    format!("{from} to {to} promoting")
                } else {
                    format!("{from} to {to}")
                }
            }
            Some(UsiMove::Drop { kind, to }) => format!("{} drop at {}", kind.spoken_name(), to),
            // Unparseable server data reads better verbatim than as silence.
            None => usi.to_owned(),
        },
    }
}

// Move log: move-number prefix before odd plies, line break after even plies.
pub fn render_moves(steps: &[Step], style: MoveStyle) -> Vec<Node> {
    let mut ret = Vec::new();
    for step in steps {
        if step.ply % 2 == 1 {
            ret.push(Node::text(format!("{} ", step.ply.div_ceil(2))));
        }
        ret.push(Node::text(format!("{}, ", render_move(&step.usi, style))));
        if step.ply % 2 == 0 {
            ret.push(Node::br());
        }
    }
    ret
}
