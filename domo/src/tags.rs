//! Field tag parsing.
//!
//! A tag is a separator-delimited token list such as `"obar,omitempty"` or
//! `"firstBlahDay,DATE"`. Tokens are classified in order, first match wins:
//! `omitempty`, then one of the six column type names, then a column name.
//! Unrecognised tokens are never rejected; they simply become names.

use crate::types::ColumnType;

pub const DEFAULT_TAG_SEPARATOR: &str = ",";
pub const OMIT_EMPTY: &str = "omitempty";
pub const EXCLUDE: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedTag {
    /// Normalized name candidates in tag order.
    pub names: Vec<String>,
    pub omit_empty: bool,
    /// Explicit column type; the last type token wins.
    pub column_type: Option<ColumnType>,
}

impl ParsedTag {
    /// A sole `-` name drops the field entirely.
    pub fn is_excluded(&self) -> bool {
        self.names.len() == 1 && self.names[0] == EXCLUDE
    }

    /// Keys for the field, falling back to `default` when the tag names nothing.
    pub fn canonical_keys(&self, default: String) -> Vec<String> {
        match self.names.first() {
            Some(first) if !first.is_empty() => self.names.clone(),
            _ => vec![default],
        }
    }
}

/// Splits `tag` on `separator` and classifies every token.
///
/// Tokens are not trimmed: `"obaz, omitempty"` yields the names
/// `["obaz", " omitempty"]`.
pub fn parse_tag<F>(tag: &str, separator: &str, normalize: F) -> ParsedTag
where
    F: Fn(&str) -> String,
{
    let mut parsed = ParsedTag::default();
    for token in tag.split(separator) {
        if token == OMIT_EMPTY {
            parsed.omit_empty = true;
        } else if let Ok(column_type) = token.parse::<ColumnType>() {
            parsed.column_type = Some(column_type);
        } else {
            parsed.names.push(normalize(token));
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tag: &str) -> ParsedTag {
        parse_tag(tag, DEFAULT_TAG_SEPARATOR, str::to_string)
    }

    #[test]
    fn empty_tag_falls_back_to_default_name() {
        let tag = parse("");
        assert_eq!(tag.names, [""]);
        assert!(!tag.is_excluded());
        assert_eq!(tag.canonical_keys("Foo".into()), ["Foo"]);
    }

    #[test]
    fn names_keep_tag_order() {
        let tag = parse("baz,Baz");
        assert_eq!(tag.canonical_keys("Baz".into()), ["baz", "Baz"]);
        assert_eq!(tag.column_type, None);
    }

    #[test]
    fn omitempty_is_not_a_name() {
        let tag = parse("obar,omitempty");
        assert!(tag.omit_empty);
        assert_eq!(tag.names, ["obar"]);
        assert_eq!(tag.column_type, None);
    }

    #[test]
    fn padded_omitempty_is_a_name() {
        let tag = parse("obaz, omitempty");
        assert!(!tag.omit_empty);
        assert_eq!(tag.names, ["obaz", " omitempty"]);
    }

    #[test]
    fn type_token_overrides_without_naming() {
        let tag = parse("DECIMAL");
        assert_eq!(tag.column_type, Some(ColumnType::Decimal));
        assert!(tag.names.is_empty());
        assert_eq!(tag.canonical_keys("Blah".into()), ["Blah"]);

        let tag = parse("firstBlahDay,DATE");
        assert_eq!(tag.column_type, Some(ColumnType::Date));
        assert_eq!(tag.names, ["firstBlahDay"]);
    }

    #[test]
    fn exclusion_needs_a_sole_dash() {
        assert!(parse("-").is_excluded());
        assert!(parse("-,omitempty").is_excluded());
        assert!(parse("-,LONG").is_excluded());
        assert!(!parse("-,other").is_excluded());
    }

    #[test]
    fn normalizer_applies_to_names_only() {
        let tag = parse_tag("Total,LONG,omitempty", ",", |s| s.to_lowercase());
        assert_eq!(tag.names, ["total"]);
        assert_eq!(tag.column_type, Some(ColumnType::Long));
    }

    #[test]
    fn custom_separator() {
        let tag = parse_tag("a;b;DOUBLE", ";", str::to_string);
        assert_eq!(tag.names, ["a", "b"]);
        assert_eq!(tag.column_type, Some(ColumnType::Double));
    }
}
