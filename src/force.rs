use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Force {
    Sente,
    Gote,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::Sente => Force::Gote,
            Force::Gote => Force::Sente,
        }
    }

    // Lower-case name, as used in CSS classes and announcements.
    pub fn label(self) -> &'static str {
        match self {
            Force::Sente => "sente",
            Force::Gote => "gote",
        }
    }

    // Capitalized name, as used in tag keys and headings.
    pub fn name(self) -> &'static str {
        match self {
            Force::Sente => "Sente",
            Force::Gote => "Gote",
        }
    }
}
