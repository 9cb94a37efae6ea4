use crate::lexicon::Lexicon;

/// Characters allowed at token boundaries. Interior characters are never
/// trimmed, so `node.js` and `ci/cd` survive as whole fragments while
/// `(react),` becomes `react`. Keeping `+` and `#` preserves `c++` and `c#`.
fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+' || c == '#'
}

/// Convert free-form text into a filtered, canonicalized token sequence.
///
/// Lowercase, split on whitespace, trim non-token boundary characters, replace
/// known synonyms with their canonical form, then drop stop words and
/// single-character leftovers. Duplicates are preserved on purpose: term
/// frequency matters to the vectorizer. Never fails; empty input yields an
/// empty sequence.
pub fn tokenize(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut tokens = Vec::new();

    for fragment in lowered.split_whitespace() {
        let trimmed = fragment.trim_matches(|c: char| !is_token_char(c));
        if trimmed.is_empty() {
            continue;
        }

        // Whole-fragment lookup: compound surface forms like `node.js`
        // normalize as a unit instead of being split apart.
        let token = lexicon.canonical(trimmed).unwrap_or(trimmed);

        if token.chars().count() <= 1 || lexicon.is_stop_word(token) {
            continue;
        }

        tokens.push(token.to_string());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> &'static Lexicon {
        Lexicon::builtin()
    }

    #[test]
    fn normalizes_synonyms_to_canonical_tokens() {
        let tokens = tokenize("I use ReactJS and Node.js daily", builtin());
        assert!(tokens.contains(&"react".to_string()));
        assert!(tokens.contains(&"node".to_string()));
        assert!(!tokens.iter().any(|t| t == "reactjs" || t == "node.js"));
    }

    #[test]
    fn trims_boundary_punctuation_only() {
        let tokens = tokenize("(React), \"Node.js\"; [c++] c#!", builtin());
        assert_eq!(tokens, vec!["react", "node", "c++", "c#"]);
    }

    #[test]
    fn drops_stop_words_and_short_tokens() {
        let tokens = tokenize("We are looking for a strong team player", builtin());
        assert!(!tokens.contains(&"we".to_string()));
        assert!(!tokens.contains(&"team".to_string()));
        assert!(!tokens.contains(&"a".to_string()));
        assert!(tokens.contains(&"player".to_string()));
    }

    #[test]
    fn preserves_duplicates_for_frequency_analysis() {
        let tokens = tokenize("rust rust rust", builtin());
        assert_eq!(tokens, vec!["rust", "rust", "rust"]);
    }

    #[test]
    fn keeps_numeric_tokens_above_one_character() {
        let tokens = tokenize("shipped 2021 releases, version 7", builtin());
        assert!(tokens.contains(&"2021".to_string()));
        assert!(!tokens.contains(&"7".to_string()));
    }

    #[test]
    fn empty_and_whitespace_input_yield_no_tokens() {
        assert!(tokenize("", builtin()).is_empty());
        assert!(tokenize("   \t\n  ", builtin()).is_empty());
        assert!(tokenize("!!! ... ???", builtin()).is_empty());
    }

    #[test]
    fn collapses_arbitrary_whitespace() {
        let tokens = tokenize("python\t\tdjango\n\n  flask", builtin());
        assert_eq!(tokens, vec!["python", "django", "flask"]);
    }
}
