//! Fragment sanitizer.
//!
//! Strips document-level boilerplate from a component fragment and rewrites
//! hard-coded dark backgrounds so the fragment blends into its card.

use regex::Regex;

use crate::markup::{element_end, enclosing_block, scan_tags};
use crate::rules::SanitizeRules;

/// Errors that can occur when compiling sanitize rules.
#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    #[error("Invalid sanitize rule: {0}")]
    InvalidRule(#[from] regex::Error),
}

/// Compiled sanitizer for a set of rules.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    markers: Option<Regex>,
    authors: Option<Regex>,
    backgrounds: Option<Regex>,
}

impl Sanitizer {
    /// Compile a sanitizer from rules.
    pub fn new(rules: &SanitizeRules) -> Result<Self, SanitizeError> {
        let backgrounds = match alternation(&rules.colors) {
            Some(colors) => Some(Regex::new(&format!(
                r#"(?i)\b(background(?:-color)?)\s*:\s*(?:{colors})\s*([;}}"])"#
            ))?),
            None => None,
        };

        Ok(Self {
            markers: phrase_regex(&rules.markers)?,
            authors: phrase_regex(&rules.authors)?,
            backgrounds,
        })
    }

    /// Sanitize a fragment: remove the footer, remove attribution blocks,
    /// then neutralize background colors.
    pub fn sanitize(&self, fragment: &str) -> String {
        let text = strip_first_footer(fragment);
        let text = self.strip_attribution(&text);
        self.neutralize_backgrounds(&text)
    }

    /// Remove every attribution block and author link.
    pub fn strip_attribution(&self, fragment: &str) -> String {
        let mut text = fragment.to_string();

        if let Some(markers) = &self.markers {
            let mut cursor = 0;
            while let Some((found, found_end)) =
                markers.find_at(&text, cursor).map(|m| (m.start(), m.end()))
            {
                match enclosing_block(&text, found, found_end) {
                    Some((start, end)) => {
                        text.replace_range(start..end, "");
                        cursor = start;
                    }
                    None => cursor = found_end,
                }
            }
        }

        if let Some(authors) = &self.authors {
            let mut cursor = 0;
            loop {
                let Some(open) = scan_tags(&text, cursor).find(|t| t.opens("a")) else {
                    break;
                };
                let start = open.start;
                let open_end = open.end;
                let end = element_end(&text, &open);

                match end {
                    Some(end) if authors.is_match(&text[open_end..end]) => {
                        text.replace_range(start..end, "");
                        cursor = start;
                    }
                    _ => cursor = open_end,
                }
            }
        }

        text
    }

    /// Rewrite configured background colors to `transparent`.
    pub fn neutralize_backgrounds(&self, fragment: &str) -> String {
        match &self.backgrounds {
            Some(re) => re
                .replace_all(fragment, "${1}: transparent${2}")
                .into_owned(),
            None => fragment.to_string(),
        }
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(&SanitizeRules::default()).expect("Default sanitize rules must compile")
    }
}

/// Remove the first `<footer>` element, from its opening tag through its
/// matching close tag. An unclosed footer is left in place.
pub fn strip_first_footer(fragment: &str) -> String {
    let Some(open) = scan_tags(fragment, 0).find(|t| t.opens("footer")) else {
        return fragment.to_string();
    };

    match element_end(fragment, &open) {
        Some(end) => format!("{}{}", &fragment[..open.start], &fragment[end..]),
        None => fragment.to_string(),
    }
}

/// Escaped, `|`-joined alternation of the non-empty items.
fn alternation(items: &[String]) -> Option<String> {
    let escaped: Vec<String> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(regex::escape)
        .collect();

    if escaped.is_empty() {
        None
    } else {
        Some(escaped.join("|"))
    }
}

fn phrase_regex(items: &[String]) -> Result<Option<Regex>, regex::Error> {
    alternation(items)
        .map(|alt| Regex::new(&format!("(?i)(?:{alt})")))
        .transpose()
}
