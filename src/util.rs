use itertools::Itertools;


// If a string consists of a single character, returns the character. Otherwise returns none.
pub fn as_single_char(s: &str) -> Option<char> {
    s.chars().collect_tuple().map(|(single_char,)| single_char)
}

// First whitespace-separated token, or the whole string if there is none.
pub fn first_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or(s)
}
