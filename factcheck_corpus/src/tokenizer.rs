//! Treebank-style word tokenizer.
//!
//! Splits punctuation, brackets, quotes and English clitics (`'s`, `'re`,
//! `n't`, ...) into their own tokens. The possessive clitic becoming a
//! standalone `'s` token is what the category cross-check keys on.

use regex::Regex;
use std::sync::OnceLock;

static DEFAULT_TOKENIZER: OnceLock<Tokenizer> = OnceLock::new();

/// Rewrite rules applied in order before whitespace splitting.
const STARTING_QUOTES: &[(&str, &str)] = &[
    (r#"^""#, "``"),
    (r"(``)", " $1 "),
    (r#"([ (\[{<])("|'')"#, "$1 `` "),
];

const PUNCTUATION: &[(&str, &str)] = &[
    (r"([:,])([^\d])", " $1 $2"),
    (r"([:,])$", " $1 "),
    (r"\.\.\.", " ... "),
    (r"[;@#$%&]", " $0 "),
    (r#"([^.])(\.)([\])}>"']*)\s*$"#, "$1 $2$3 "),
    (r"[?!]", " $0 "),
    (r"([^'])' ", "$1 ' "),
];

const BRACKETS: &[(&str, &str)] = &[(r"[\]\[(){}<>]", " $0 "), (r"--", " -- ")];

const ENDING_QUOTES: &[(&str, &str)] = &[
    (r#"""#, " '' "),
    (r"(\S)('')", "$1 $2 "),
    (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "$1 $2 "),
    (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "$1 $2 "),
];

/// Compiled tokenization rules.
pub struct Tokenizer {
    leading: Vec<(Regex, &'static str)>,
    trailing: Vec<(Regex, &'static str)>,
}

impl Tokenizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            leading: Self::compile(&[STARTING_QUOTES, PUNCTUATION, BRACKETS]),
            trailing: Self::compile(&[ENDING_QUOTES]),
        }
    }

    fn compile(groups: &[&[(&'static str, &'static str)]]) -> Vec<(Regex, &'static str)> {
        groups
            .iter()
            .flat_map(|rules| rules.iter())
            .filter_map(|(pattern, replacement)| Some((Regex::new(pattern).ok()?, *replacement)))
            .collect()
    }

    /// Split `text` into word tokens.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut buffer = text.to_string();
        for (re, replacement) in &self.leading {
            buffer = re.replace_all(&buffer, *replacement).into_owned();
        }

        // Clitic rules need a trailing space to anchor on the last word.
        buffer = format!(" {buffer} ");
        for (re, replacement) in &self.trailing {
            buffer = re.replace_all(&buffer, *replacement).into_owned();
        }

        buffer.split_whitespace().map(str::to_string).collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokenize with the shared default rule set.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    DEFAULT_TOKENIZER.get_or_init(Tokenizer::new).tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_possessive_and_final_period() {
        assert_eq!(
            tokenize("Marie Curie's birth place is Warsaw."),
            vec!["Marie", "Curie", "'s", "birth", "place", "is", "Warsaw", "."]
        );
    }

    #[test]
    fn keeps_pre_split_possessive() {
        assert_eq!(
            tokenize("Paris 's birth place is known"),
            vec!["Paris", "'s", "birth", "place", "is", "known"]
        );
    }

    #[test]
    fn splits_commas_and_contractions() {
        assert_eq!(
            tokenize("They're here, aren't they?"),
            vec!["They", "'re", "here", ",", "are", "n't", "they", "?"]
        );
    }

    #[test]
    fn splits_brackets_and_quotes() {
        assert_eq!(
            tokenize("\"Dune\" (novel) award"),
            vec!["``", "Dune", "''", "(", "novel", ")", "award"]
        );
    }

    #[test]
    fn numbers_keep_inner_commas() {
        assert_eq!(tokenize("1,000 medals"), vec!["1,000", "medals"]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}
