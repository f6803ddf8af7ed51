//! `@user` mention extraction.

/// Returns the distinct users mentioned in `content`, in order of first
/// appearance.
///
/// A mention is a whitespace-separated token starting with `@`, followed by
/// letters, digits, `_`, `-` or `.`. Trailing dots are not part of the name,
/// so `@bob.` at the end of a sentence mentions `bob`.
#[must_use]
pub fn extract_mentions(content: &str) -> Vec<String> {
    let mut mentioned: Vec<String> = Vec::new();
    for token in content.split_whitespace() {
        let Some(rest) = token.strip_prefix('@') else {
            continue;
        };
        let name: String = rest
            .chars()
            .take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
            .collect();
        let name = name.trim_end_matches('.');
        if !name.is_empty() && !mentioned.iter().any(|m| m == name) {
            mentioned.push(name.to_owned());
        }
    }
    mentioned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_single_mention() {
        assert_eq!(extract_mentions("hello @bob"), vec!["bob"]);
    }

    #[test]
    fn test_strips_trailing_punctuation() {
        assert_eq!(
            extract_mentions("thanks @bob, see you @carol."),
            vec!["bob", "carol"]
        );
    }

    #[test]
    fn test_keeps_first_appearance_order_without_duplicates() {
        assert_eq!(
            extract_mentions("@carol @bob @carol @bob"),
            vec!["carol", "bob"]
        );
    }

    #[test]
    fn test_ignores_email_addresses_and_bare_at_signs() {
        assert!(extract_mentions("mail me at bob@example.com @ noon").is_empty());
    }

    #[test]
    fn test_allows_dots_dashes_and_underscores_inside_names() {
        assert_eq!(
            extract_mentions("ping @jane.doe and @max_power-2"),
            vec!["jane.doe", "max_power-2"]
        );
    }

    #[test]
    fn test_message_without_mentions_returns_empty_vec() {
        assert!(extract_mentions("just chatting").is_empty());
    }
}
