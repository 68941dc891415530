use serde::{Deserialize, Serialize};

use crate::force::Force;
use crate::i18n::Translator;
use crate::node::Node;


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub title: Option<String>,
    pub rating: Option<u32>,
}

// Exactly one of the three: a human identity, an automated opponent, or nobody.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerIdentity {
    Human(User),
    Engine { level: u8 },
    Anonymous,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RoundPlayer {
    pub force: Force,
    pub identity: PlayerIdentity,
    pub rating_diff: Option<i32>,
    pub spectator: bool,
}

pub fn engine_name(trans: &dyn Translator, level: u8) -> String {
    trans.trans("aiNameLevelAiLevel", &["Engine", &level.to_string()])
}

// Spoken form: "IM Tanigawa rated 2450".
pub fn player_text(player: &RoundPlayer, trans: &dyn Translator) -> String {
    match &player.identity {
        PlayerIdentity::Engine { level } => engine_name(trans, *level),
        PlayerIdentity::Anonymous => "Anonymous".to_owned(),
        PlayerIdentity::Human(user) => {
            let rating = match user.rating {
                Some(rating) => rating.to_string(),
                None => "unknown".to_owned(),
            };
            match &user.title {
                Some(title) => format!("{} {} rated {}", title, user.username, rating),
                None => format!("{} rated {}", user.username, rating),
            }
        }
    }
}

// Display form: profile link, rating and signed rating delta.
pub fn player_node(player: &RoundPlayer, trans: &dyn Translator) -> Node {
    let user = match &player.identity {
        PlayerIdentity::Engine { level } => return Node::text(engine_name(trans, *level)),
        PlayerIdentity::Anonymous => return Node::text("Anonymous"),
        PlayerIdentity::Human(user) => user,
    };
    let link_text = match &user.title {
        Some(title) => format!("{} {}", title, user.username),
        None => user.username.clone(),
    };
    let rating_diff = match player.rating_diff {
        Some(diff) if diff > 0 => format!("+{diff}"),
        Some(diff) if diff < 0 => format!("−{}", -diff), // U+2212 Minus Sign
        _ => String::new(),
    };
    let mut node = Node::elem("span").with_child(
        Node::elem("a")
            .with_attribute("href", &format!("/@/{}", user.username))
            .with_text(link_text),
    );
    if let Some(rating) = user.rating {
        node = node.with_text(format!(" {rating}"));
    }
    node.with_text(format!(" {rating_diff}"))
}
