use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::force::Force;


// Study chapter tag. Keys come from a fixed vocabulary: player names ("Sente", "Gote"),
// titles, ratings and the game result.
#[derive(Clone, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

pub fn find_tag<'a>(tags: &'a [Tag], name: &str) -> Option<&'a str> {
    tags.iter()
        .find(|tag| tag.name.eq_ignore_ascii_case(name))
        .map(|tag| tag.value.as_str())
}

pub fn player_name_tag(force: Force) -> &'static str {
    match force {
        Force::Sente => "Sente",
        Force::Gote => "Gote",
    }
}

pub fn player_title_tag(force: Force) -> &'static str {
    match force {
        Force::Sente => "SenteTitle",
        Force::Gote => "GoteTitle",
    }
}

pub fn player_rating_tag(force: Force) -> &'static str {
    match force {
        Force::Sente => "SenteElo",
        Force::Gote => "GoteElo",
    }
}

// Per-side result marker. Present only once the chapter is finished.
pub fn result_of(tags: &[Tag], force: Force) -> Option<&'static str> {
    let result = find_tag(tags, "Result")?;
    let (sente, gote) = match result {
        "1-0" => ("1", "0"),
        "0-1" => ("0", "1"),
        "1/2-1/2" => ("½", "½"),
        _ => return None,
    };
    Some(match force {
        Force::Sente => sente,
        Force::Gote => gote,
    })
}

pub fn is_finished(tags: &[Tag]) -> bool {
    find_tag(tags, "Result").is_some_and(|result| result != "*")
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Vec<Tag> {
        pairs.iter().map(|&(name, value)| Tag::new(name.to_owned(), value.to_owned())).collect()
    }

    #[test]
    fn tag_lookup_is_case_insensitive() {
        let tags = tags(&[("Sente", "Oyama"), ("GoteElo", "2800")]);
        assert_eq!(find_tag(&tags, "sente"), Some("Oyama"));
        assert_eq!(find_tag(&tags, "GOTEELO"), Some("2800"));
        assert_eq!(find_tag(&tags, "Gote"), None);
    }

    #[test]
    fn result_markers() {
        let finished = tags(&[("Result", "0-1")]);
        assert_eq!(result_of(&finished, Force::Sente), Some("0"));
        assert_eq!(result_of(&finished, Force::Gote), Some("1"));
        assert!(is_finished(&finished));

        let ongoing = tags(&[("Result", "*")]);
        assert_eq!(result_of(&ongoing, Force::Sente), None);
        assert!(!is_finished(&ongoing));

        assert!(!is_finished(&tags(&[("Sente", "Oyama")])));
    }
}
