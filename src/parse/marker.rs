//! Segment marker grammar
//!
//! Markers are HTML comments of the form
//! `<!-- SEGMENT: id="intro", locked="true", dynamic="func:dep1,dep2" -->`.
//! The `SEGMENT` keyword is case-sensitive; attributes are optional, accept
//! single or double quotes, and may appear in any order. Malformed attribute
//! values never fail the parse, they degrade to defaults.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{DynamicFunction, SegmentMetadata};

/// Matches one marker; capture 1 is the attribute body (no `>` allowed)
pub(crate) static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--\s*SEGMENT:([^>]*)-->").unwrap());

/// Matches one `name="value"` or `name='value'` attribute
static ATTR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(\w+)=["']([^"']*)["']"#).unwrap());

/// Typed attribute set extracted from one marker body
///
/// Intermediate form between the raw attribute text and `SegmentMetadata`.
/// Defaults stand in for missing or malformed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerAttrs {
    pub id: Option<String>,
    pub locked: bool,
    pub double_width: bool,
    pub dynamic: Option<DynamicFunction>,
}

impl MarkerAttrs {
    /// Finish the marker: dynamic segments are forced to locked here, so the
    /// invariant holds no matter what the `locked` attribute said.
    pub fn into_metadata(self) -> SegmentMetadata {
        let locked = self.locked || self.dynamic.is_some();
        SegmentMetadata {
            id: self.id,
            locked,
            double_width: self.double_width,
            dynamic: self.dynamic,
        }
    }
}

/// Parse the attribute body of one marker
///
/// Unknown attribute names are ignored; duplicates are last-wins. An empty
/// id normalizes to none so empty strings never become addressable ids.
pub fn parse_marker_attrs(body: &str) -> MarkerAttrs {
    let mut attrs = MarkerAttrs::default();

    for caps in ATTR_RE.captures_iter(body) {
        let name = &caps[1];
        let value = &caps[2];
        match name {
            "id" => {
                attrs.id = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "locked" => attrs.locked = parse_bool(value),
            "double_width" => attrs.double_width = parse_bool(value),
            "dynamic" => {
                attrs.dynamic = parse_dynamic_attr(value);
                if attrs.dynamic.is_none() {
                    log::debug!("ignoring malformed dynamic attribute {:?}", value);
                }
            }
            _ => {}
        }
    }

    attrs
}

/// Case-insensitive "true"; everything else is false
fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Parse `FUNCTION:DEP[,DEP]*`
///
/// Function name and every dependency must be identifiers after trimming;
/// any violation makes the whole value malformed (treated as absent).
fn parse_dynamic_attr(value: &str) -> Option<DynamicFunction> {
    let (function, dep_list) = value.split_once(':')?;
    let function = function.trim();
    if !is_identifier(function) {
        return None;
    }

    let mut deps = Vec::new();
    for dep in dep_list.split(',') {
        let dep = dep.trim();
        if !is_identifier(dep) {
            return None;
        }
        deps.push(dep.to_string());
    }

    Some(DynamicFunction::new(function, deps))
}

/// ASCII letters, digits, underscore; at least one character
fn is_identifier(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_regex_matches_flexible_spacing() {
        assert!(MARKER_RE.is_match(r#"<!-- SEGMENT: id="a" -->"#));
        assert!(MARKER_RE.is_match(r#"<!--SEGMENT:id="a"-->"#));
        assert!(MARKER_RE.is_match("<!--   SEGMENT:   -->"));
    }

    #[test]
    fn test_marker_keyword_is_case_sensitive() {
        assert!(!MARKER_RE.is_match(r#"<!-- segment: id="a" -->"#));
        assert!(!MARKER_RE.is_match(r#"<!-- Segment: id="a" -->"#));
        assert!(!MARKER_RE.is_match("<!-- ordinary comment -->"));
    }

    #[test]
    fn test_full_attribute_set() {
        let attrs = parse_marker_attrs(
            r#" id="total", locked="false", double_width="true", dynamic="difference:price,discount" "#,
        );

        assert_eq!(attrs.id.as_deref(), Some("total"));
        assert!(!attrs.locked);
        assert!(attrs.double_width);
        let dynamic = attrs.dynamic.unwrap();
        assert_eq!(dynamic.function, "difference");
        assert_eq!(dynamic.deps, vec!["price", "discount"]);
    }

    #[test]
    fn test_attribute_order_and_quotes_are_flexible() {
        let attrs = parse_marker_attrs(r#" locked='true' id='intro' "#);

        assert_eq!(attrs.id.as_deref(), Some("intro"));
        assert!(attrs.locked);
    }

    #[test]
    fn test_duplicate_attributes_last_wins() {
        let attrs = parse_marker_attrs(r#" id="first", id="second" "#);

        assert_eq!(attrs.id.as_deref(), Some("second"));
    }

    #[test]
    fn test_unknown_attributes_ignored() {
        let attrs = parse_marker_attrs(r#" id="a", color="red", weight="bold" "#);

        assert_eq!(attrs.id.as_deref(), Some("a"));
        assert!(!attrs.locked);
    }

    #[test]
    fn test_boolean_parsing_degrades_to_false() {
        assert!(parse_marker_attrs(r#" locked="TRUE" "#).locked);
        assert!(parse_marker_attrs(r#" locked="True" "#).locked);
        assert!(!parse_marker_attrs(r#" locked="yes" "#).locked);
        assert!(!parse_marker_attrs(r#" locked="1" "#).locked);
        assert!(!parse_marker_attrs(r#" locked="" "#).locked);
    }

    #[test]
    fn test_empty_id_normalizes_to_none() {
        let attrs = parse_marker_attrs(r#" id="" "#);

        assert_eq!(attrs.id, None);
    }

    #[test]
    fn test_dynamic_single_dep() {
        let attrs = parse_marker_attrs(r#" dynamic="digits_to_words:year" "#);
        let dynamic = attrs.dynamic.unwrap();

        assert_eq!(dynamic.function, "digits_to_words");
        assert_eq!(dynamic.deps, vec!["year"]);
    }

    #[test]
    fn test_dynamic_value_trims_tokens() {
        let attrs = parse_marker_attrs(r#" dynamic=" difference : price , discount " "#);
        let dynamic = attrs.dynamic.unwrap();

        assert_eq!(dynamic.function, "difference");
        assert_eq!(dynamic.deps, vec!["price", "discount"]);
    }

    #[test]
    fn test_malformed_dynamic_values_degrade_to_absent() {
        // No colon, empty function, empty dep list, bad dep token
        assert_eq!(parse_marker_attrs(r#" dynamic="difference" "#).dynamic, None);
        assert_eq!(parse_marker_attrs(r#" dynamic=":price" "#).dynamic, None);
        assert_eq!(parse_marker_attrs(r#" dynamic="difference:" "#).dynamic, None);
        assert_eq!(
            parse_marker_attrs(r#" dynamic="difference:price," "#).dynamic,
            None
        );
        assert_eq!(
            parse_marker_attrs(r#" dynamic="difference:pri ce" "#).dynamic,
            None
        );
    }

    #[test]
    fn test_malformed_dynamic_does_not_lock() {
        let attrs = parse_marker_attrs(r#" dynamic="nope" "#);

        assert!(!attrs.into_metadata().is_locked());
    }

    #[test]
    fn test_dynamic_forces_locked_metadata() {
        let attrs = parse_marker_attrs(r#" locked="false", dynamic="difference:a,b" "#);
        let metadata = attrs.into_metadata();

        assert!(metadata.locked);
        assert!(metadata.is_locked());
    }

    #[test]
    fn test_empty_body_is_all_defaults() {
        let attrs = parse_marker_attrs("");

        assert_eq!(attrs, MarkerAttrs::default());
    }
}
