use derive_new::new;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::force::Force;
use crate::util::as_single_char;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct PieceOnBoard {
    pub kind: PieceKind,
    pub promoted: bool,
    pub force: Force,
}

impl PieceKind {
    pub fn to_usi_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Lance => 'L',
            PieceKind::Knight => 'N',
            PieceKind::Silver => 'S',
            PieceKind::Gold => 'G',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::King => 'K',
        }
    }

    pub fn from_usi_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'L' => Some(PieceKind::Lance),
            'N' => Some(PieceKind::Knight),
            'S' => Some(PieceKind::Silver),
            'G' => Some(PieceKind::Gold),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn from_usi(notation: &str) -> Option<Self> {
        as_single_char(notation).and_then(Self::from_usi_char)
    }

    pub fn spoken_name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Lance => "lance",
            PieceKind::Knight => "knight",
            PieceKind::Silver => "silver",
            PieceKind::Gold => "gold",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::King => "king",
        }
    }

    pub fn can_promote(self) -> bool {
        !matches!(self, PieceKind::Gold | PieceKind::King)
    }
}

impl PieceOnBoard {
    // Board-text letter: upper-case for Sente, lower-case for Gote, '+' when promoted.
    pub fn letter(self) -> String {
        let ch = match self.force {
            Force::Sente => self.kind.to_usi_char(),
            Force::Gote => self.kind.to_usi_char().to_ascii_lowercase(),
        };
        if self.promoted { format!("+{ch}") } else { ch.to_string() }
    }

    pub fn spoken_name(self) -> String {
        if self.promoted {
            format!("promoted {}", self.kind.spoken_name())
        } else {
            self.kind.spoken_name().to_string()
        }
    }
}
