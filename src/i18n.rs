// Translation lookup is an external service; the client injects its own implementation.
pub trait Translator {
    fn trans(&self, key: &str, args: &[&str]) -> String;
}

// Fallback used when the host provides no translation bundle.
pub struct EnglishTranslator;

impl Translator for EnglishTranslator {
    fn trans(&self, key: &str, args: &[&str]) -> String {
        let arg = |idx: usize| args.get(idx).copied().unwrap_or("");
        match key {
            "aiNameLevelAiLevel" => format!("{} level {}", arg(0), arg(1)),
            "yourTurn" => "Your move".to_owned(),
            "waiting" => "Waiting".to_owned(),
            _ => key.to_owned(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_fallback() {
        let t = EnglishTranslator;
        assert_eq!(t.trans("aiNameLevelAiLevel", &["Engine", "3"]), "Engine level 3");
        assert_eq!(t.trans("unknownKey", &[]), "unknownKey");
    }
}
