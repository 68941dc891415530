use itertools::Itertools;
use lazy_static::lazy_static;
use regex_lite::Regex;
use strum::IntoEnumIterator;

use crate::board::{rank_text, squares_of, Pieces};
use crate::coord::Row;
use crate::force::Force;
use crate::notation::MoveStyle;
use crate::piece::PieceKind;
use crate::util::first_token;


pub const COMMAND_MARKER: char = '/';

const SHORT_COMMANDS: [&str; 12] = [
    "c", "clock", "l", "last", "abort", "resign", "draw", "takeback", "o", "opponent", "p", "scan",
];

// True when the first token is a known command word, so the input can be treated as a
// command even without the marker.
pub fn is_short_command(input: &str) -> bool {
    let token = first_token(input).to_ascii_lowercase();
    SHORT_COMMANDS.contains(&token.as_str())
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command<'a> {
    Clock,
    Last,
    Abort,
    Resign,
    Draw,
    Takeback,
    Opponent,
    // Explicit fallthrough: handed to the board queries in order.
    Query(&'a str),
}

impl<'a> Command<'a> {
    // Case-insensitive match on the first token; trailing words are ignored for the
    // fixed commands and kept verbatim for queries.
    pub fn parse(text: &'a str) -> Self {
        match first_token(text).to_ascii_lowercase().as_str() {
            "c" | "clock" => Command::Clock,
            "l" | "last" => Command::Last,
            "abort" => Command::Abort,
            "resign" => Command::Resign,
            "draw" => Command::Draw,
            "takeback" => Command::Takeback,
            "o" | "opponent" => Command::Opponent,
            _ => Command::Query(text),
        }
    }
}


lazy_static! {
    // Move text with an "=X" promotion suffix: optional piece letter, optional origin
    // square, destination square, '=', promotion letter. "2c2d=p", "P7g7f=t".
    static ref PROMOTION_RE: Regex =
        Regex::new(r"^(?i)[PLNSGBRK]?((?:[1-9][a-i])?[1-9][a-i])=([a-zA-Z])$").unwrap();
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MoveAttempt {
    pub usi: String,             // lower-cased origin+destination, used for the legality lookup
    pub promotion: Option<char>, // lower-cased promotion letter
}

pub fn parse_move_attempt(input: &str) -> MoveAttempt {
    if let Some(caps) = PROMOTION_RE.captures(input) {
        let usi = caps.get(1).map(|m| m.as_str().to_ascii_lowercase()).unwrap_or_default();
        let promotion = caps
            .get(2)
            .and_then(|m| m.as_str().chars().next())
            .map(|ch| ch.to_ascii_lowercase());
        return MoveAttempt { usi, promotion };
    }
    MoveAttempt { usi: input.to_ascii_lowercase(), promotion: None }
}


// Board-state queries answering free-form commands. The round view consults them in
// order; the first one that recognizes the command wins.
pub trait BoardQuery {
    fn help(&self) -> &'static str;
    fn apply(&self, command: &str, pieces: &Pieces, style: MoveStyle) -> Option<String>;
}

// "p <letter>": where are the pieces of this type.
pub struct PieceQuery;

lazy_static! {
    static ref PIECE_RE: Regex = Regex::new(r"^(?i)p ([PLNSGBRK])$").unwrap();
}

impl BoardQuery for PieceQuery {
    fn help(&self) -> &'static str { "p: Read locations of a piece type. Example: p k, p S." }

    fn apply(&self, command: &str, pieces: &Pieces, _style: MoveStyle) -> Option<String> {
        let caps = PIECE_RE.captures(command)?;
        let kind = caps
            .get(1)
            .and_then(|m| m.as_str().chars().next())
            .and_then(PieceKind::from_usi_char)?;
        let listing = Force::iter()
            .map(|force| {
                let squares = squares_of(pieces, force, kind);
                let squares = if squares.is_empty() {
                    "none".to_owned()
                } else {
                    squares.iter().join(" ")
                };
                format!("{} {}: {}", force.name(), kind.spoken_name(), squares)
            })
            .join(". ");
        Some(listing)
    }
}

// "scan <rank>": read one rank of the board, file 9 first.
pub struct ScanQuery;

lazy_static! {
    static ref SCAN_RE: Regex = Regex::new(r"^(?i)scan ([a-i])$").unwrap();
}

impl BoardQuery for ScanQuery {
    fn help(&self) -> &'static str { "scan: Read pieces on a rank. Example: scan c." }

    fn apply(&self, command: &str, pieces: &Pieces, _style: MoveStyle) -> Option<String> {
        let row = SCAN_RE
            .captures(command)?
            .get(1)
            .and_then(|m| m.as_str().chars().next())
            .and_then(Row::from_algebraic)?;
        Some(rank_text(pieces, row))
    }
}
