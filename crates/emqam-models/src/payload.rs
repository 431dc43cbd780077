//! Form payload tokenizer.
//!
//! Login and ACL bodies are `&`-separated `key=value` pairs:
//!
//! ```text
//! username=alice&password=s3cret
//! username=alice&access=publish&topic=sensors/+/temp
//! ```
//!
//! Every pair must contain exactly one `=`. Anything else fails with
//! [`ParseError::MalformedPayload`] instead of being truncated or skipped.
//! Values are taken verbatim: no percent-decoding and no length limits.

/// Separates pairs.
pub const PAIR_SEPARATOR: char = '&';
/// Separates a key from its value.
pub const KEY_VALUE_SEPARATOR: char = '=';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("payload is not valid UTF-8 text")]
    NotText,

    /// The pair at `index` (zero-based) has no `=` or more than one. The pair
    /// itself is not echoed since it may hold a password.
    #[error("malformed payload: pair {index} is not a single key=value")]
    MalformedPayload { index: usize },

    #[error("unknown topic direction {0:?}")]
    UnknownTopicDirection(String),
}

/// A record that can be filled from a form payload.
///
/// `assign` is called once per pair in payload order, so a repeated key
/// overwrites the earlier value. Unrecognized keys must be ignored.
pub trait FormRecord: Default {
    fn assign(&mut self, key: &str, value: &str) -> Result<(), ParseError>;
}

/// Split `text` into `(key, value)` pairs.
///
/// An empty payload has no pairs. Empty segments inside a non-empty payload
/// (`a=1&&b=2`, a trailing `&`) are malformed.
pub fn pairs(text: &str) -> impl Iterator<Item = Result<(&str, &str), ParseError>> {
    let segments = (!text.is_empty()).then(|| text.split(PAIR_SEPARATOR));

    segments
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(index, pair)| match pair.split_once(KEY_VALUE_SEPARATOR) {
            Some((key, value)) if !value.contains(KEY_VALUE_SEPARATOR) => Ok((key, value)),
            _ => Err(ParseError::MalformedPayload { index }),
        })
}

/// Parse a UTF-8 form payload into `T`.
pub fn parse_payload<T: FormRecord>(bytes: &[u8]) -> Result<T, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ParseError::NotText)?;
    parse_text(text)
}

/// Parse an already-decoded form payload into `T`.
pub fn parse_text<T: FormRecord>(text: &str) -> Result<T, ParseError> {
    let mut record = T::default();
    for pair in pairs(text) {
        let (key, value) = pair?;
        record.assign(key, value)?;
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Probe {
        seen: Vec<(String, String)>,
    }

    impl FormRecord for Probe {
        fn assign(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
            self.seen.push((key.to_string(), value.to_string()));
            Ok(())
        }
    }

    fn seen(text: &str) -> Vec<(String, String)> {
        parse_text::<Probe>(text).unwrap().seen
    }

    #[test]
    fn test_pairs_in_order() {
        assert_eq!(
            seen("a=1&b=2&a=3"),
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_payload_has_no_pairs() {
        assert!(seen("").is_empty());
    }

    #[test]
    fn test_empty_key_and_value_are_allowed() {
        assert_eq!(
            seen("=&k="),
            vec![
                (String::new(), String::new()),
                ("k".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_pair_without_separator_is_malformed() {
        assert_eq!(
            parse_text::<Probe>("a=1&oops&b=2"),
            Err(ParseError::MalformedPayload { index: 1 })
        );
    }

    #[test]
    fn test_pair_with_two_separators_is_malformed() {
        assert_eq!(
            parse_text::<Probe>("a=1=2"),
            Err(ParseError::MalformedPayload { index: 0 })
        );
    }

    #[test]
    fn test_empty_segments_are_malformed() {
        assert_eq!(
            parse_text::<Probe>("a=1&&b=2"),
            Err(ParseError::MalformedPayload { index: 1 })
        );
        assert_eq!(
            parse_text::<Probe>("a=1&"),
            Err(ParseError::MalformedPayload { index: 1 })
        );
    }

    #[test]
    fn test_non_utf8_is_not_text() {
        assert_eq!(
            parse_payload::<Probe>(&[b'a', b'=', 0xff, 0xfe]),
            Err(ParseError::NotText)
        );
    }

    #[test]
    fn test_malformed_error_does_not_echo_pair() {
        let err = parse_text::<Probe>("password").unwrap_err();
        assert!(!err.to_string().contains("password"));
    }
}
