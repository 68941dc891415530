use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Standard,
    Minishogi,
    Chushogi,
    Annanshogi,
    Kyotoshogi,
    Checkshogi,
}

impl Variant {
    pub fn label(self) -> &'static str {
        match self {
            Variant::Standard => "Standard",
            Variant::Minishogi => "Minishogi",
            Variant::Chushogi => "Chushogi",
            Variant::Annanshogi => "Annan shogi",
            Variant::Kyotoshogi => "Kyoto shogi",
            Variant::Checkshogi => "Check shogi",
        }
    }

    // The text-mode board only knows the regular 9x9 setup.
    pub fn supported_in_text_mode(self) -> bool {
        matches!(self, Variant::Standard | Variant::Checkshogi)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Created,
    Started,
    Aborted,
    Mate,
    Resign,
    Stalemate,
    Timeout,
    Draw,
    Impasse,
    NoStart,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Created | GameStatus::Started)
    }
}


// One ply of the game. Produced by the server; immutable once recorded.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Step {
    pub ply: u32, // 1-based
    pub usi: String,
    pub sfen: String, // position after the move
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameInfo {
    pub variant: Variant,
    pub rated: bool,
    pub speed: String, // "Blitz", "Rapid", "Correspondence", ...
    pub status: GameStatus,
    pub winner: Option<Force>,
    pub turn: Force, // side to move
}

impl GameInfo {
    pub fn playable(&self) -> bool { self.status == GameStatus::Started }

    // What the game is called in summaries: the speed for regular games, the variant
    // name otherwise.
    pub fn perf_label(&self) -> &str {
        if self.variant == Variant::Standard {
            &self.speed
        } else {
            self.variant.label()
        }
    }
}

// Terminal result sentence, e.g. "Checkmate. Gote is victorious."
pub fn result_text(info: &GameInfo) -> String {
    let loser = info.winner.map(Force::opponent);
    let what = match (info.status, loser) {
        (GameStatus::Aborted, _) => "Game aborted.".to_owned(),
        (GameStatus::Mate, _) => "Checkmate.".to_owned(),
        (GameStatus::Resign, Some(loser)) => format!("{} resigned.", loser.name()),
        (GameStatus::Resign, None) => "Resignation.".to_owned(),
        (GameStatus::Stalemate, _) => "Stalemate.".to_owned(),
        (GameStatus::Timeout, Some(loser)) => format!("{} left the game.", loser.name()),
        (GameStatus::Timeout, None) => "Time out.".to_owned(),
        (GameStatus::Draw, _) => "Draw.".to_owned(),
        (GameStatus::Impasse, _) => "Impasse.".to_owned(),
        (GameStatus::NoStart, Some(loser)) => format!("{} didn't move.", loser.name()),
        (GameStatus::NoStart, None) => "Game didn't start.".to_owned(),
        (GameStatus::Created | GameStatus::Started, _) => return "Playing".to_owned(),
    };
    match info.winner {
        Some(winner) => format!("{} {} is victorious.", what, winner.name()),
        None => what,
    }
}
