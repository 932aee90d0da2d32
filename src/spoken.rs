//! Rewriting spoken operator words into the symbols the calculator
//! understands.

use once_cell::sync::Lazy;
use regex::Regex;

/// Spoken phrases and their replacements. Longer phrases come first so
/// "equals to" isn't half-consumed by "equals".
const PHRASES: &[(&str, &str)] = &[
    (r"multiplied\s+by", "*"),
    (r"divided\s+by", "/"),
    (r"equals\s+to", "="),
    (r"equals", "="),
    (r"plus", "+"),
    (r"minus", "-"),
    (r"times", "*"),
    (r"open", "("),
    (r"close", ")"),
];

/// The compiled [`PHRASES`], built once and shared by every call.
static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    PHRASES
        .iter()
        .filter_map(|&(phrase, symbol)| {
            let pattern = format!(r"\b{}\b", phrase);
            match Regex::new(&pattern) {
                Ok(regex) => Some((regex, symbol)),
                Err(e) => {
                    tracing::error!(%pattern, error = %e, "Skipping bad phrase");
                    None
                },
            }
        })
        .collect()
});

/// Converts a transcript like "calculate open 2 plus 3 close times x" into
/// "calculate ( 2 + 3 ) * x".
pub fn normalize(transcript: &str) -> String {
    let mut text = transcript.to_lowercase();

    for (regex, symbol) in RULES.iter() {
        text = regex.replace_all(&text, *symbol).into_owned();
    }

    tracing::trace!(%transcript, normalized = %text, "Normalized transcript");
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_words_become_symbols() {
        let inputs = vec![
            ("2 plus 3", "2 + 3"),
            ("10 minus 4", "10 - 4"),
            ("6 times 7", "6 * 7"),
            ("6 multiplied by 7", "6 * 7"),
            ("8 divided by 2", "8 / 2"),
            ("x plus 3 equals 5", "x + 3 = 5"),
            ("x equals to 5", "x = 5"),
            ("open 2 plus 3 close times 4", "( 2 + 3 ) * 4"),
            ("Calculate X Plus 1", "calculate x + 1"),
        ];

        for (src, should_be) in inputs {
            let got = normalize(src);

            assert_eq!(got, should_be);
        }
    }

    #[test]
    fn every_phrase_compiles() {
        assert_eq!(RULES.len(), PHRASES.len());
    }

    #[test]
    fn words_are_only_replaced_whole() {
        let got = normalize("reopen closed pluses");

        assert_eq!(got, "reopen closed pluses");
    }

    #[test]
    fn numbers_and_letters_pass_through() {
        let got = normalize("calculate 2 x 3.5");

        assert_eq!(got, "calculate 2 x 3.5");
    }
}
