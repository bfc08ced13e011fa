//! Best-effort tag scanning over raw HTML text.
//!
//! This is not an HTML parser. Tags are recognized by pattern, nesting is
//! tracked only between tags of the same name, and comments, scripts and
//! quoted `>` characters inside attributes are not special-cased.

use regex::Regex;
use std::sync::LazyLock;

/// Block-level elements that may carry an attribution credit.
pub const BLOCK_TAGS: &[&str] = &[
    "div",
    "p",
    "section",
    "aside",
    "header",
    "footer",
    "article",
    "nav",
    "figure",
    "figcaption",
    "blockquote",
    "li",
];

/// Kind of tag found in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<div ...>`
    Open,
    /// `</div>`
    Close,
    /// `<div ... />`
    SelfClosing,
}

/// A tag located in a source string. Offsets are absolute byte positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Tag name as written
    pub name: &'a str,
    /// Offset of the leading `<`
    pub start: usize,
    /// Offset just past the trailing `>`
    pub end: usize,
    /// Open, close or self-closing
    pub kind: TagKind,
}

impl Tag<'_> {
    /// Case-insensitive tag name comparison.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Whether this is an opening tag of the given element.
    pub fn opens(&self, name: &str) -> bool {
        self.kind == TagKind::Open && self.is(name)
    }
}

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9-]*)(?:\s[^>]*|/)?>").expect("Invalid tag regex")
});

/// Iterate over tags in `source`, starting at byte offset `from`.
pub fn scan_tags(source: &str, from: usize) -> impl Iterator<Item = Tag<'_>> + '_ {
    TAG_RE.captures_iter(&source[from..]).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let name = caps.get(2)?.as_str();

        let kind = if !caps[1].is_empty() {
            TagKind::Close
        } else if whole.as_str().ends_with("/>") {
            TagKind::SelfClosing
        } else {
            TagKind::Open
        };

        Some(Tag {
            name,
            start: from + whole.start(),
            end: from + whole.end(),
            kind,
        })
    })
}

/// Find the end of the element opened by `open`, just past its matching
/// close tag. Nested elements of the same name are skipped over.
///
/// Returns `None` when the element is never closed.
pub fn element_end(source: &str, open: &Tag<'_>) -> Option<usize> {
    let mut depth = 1usize;

    for tag in scan_tags(source, open.end) {
        if !tag.is(open.name) {
            continue;
        }

        match tag.kind {
            TagKind::Open => depth += 1,
            TagKind::Close => {
                depth -= 1;
                if depth == 0 {
                    return Some(tag.end);
                }
            }
            TagKind::SelfClosing => {}
        }
    }

    None
}

/// Find the innermost block-level element that fully contains `start..end`.
///
/// Returns the element's span from its opening `<` to just past its close tag.
pub fn enclosing_block(source: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let opens: Vec<Tag<'_>> = scan_tags(&source[..start], 0)
        .filter(|t| t.kind == TagKind::Open && BLOCK_TAGS.iter().any(|b| t.is(b)))
        .collect();

    opens.iter().rev().find_map(|open| {
        let close = element_end(source, open)?;
        (close >= end).then_some((open.start, close))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_open_close_and_self_closing() {
        let source = r#"<div class="a"><br/><span>x</span></div>"#;
        let tags: Vec<_> = scan_tags(source, 0).map(|t| (t.name, t.kind)).collect();

        assert_eq!(
            tags,
            vec![
                ("div", TagKind::Open),
                ("br", TagKind::SelfClosing),
                ("span", TagKind::Open),
                ("span", TagKind::Close),
                ("div", TagKind::Close),
            ]
        );
    }

    #[test]
    fn ignores_comments() {
        let source = "<!-- note --><p>ok</p>";
        let names: Vec<_> = scan_tags(source, 0).map(|t| t.name).collect();

        assert_eq!(names, vec!["p", "p"]);
    }

    #[test]
    fn matches_nested_close_tag() {
        let source = "<div><div>inner</div>outer</div>tail";
        let open = scan_tags(source, 0).next().unwrap();

        let end = element_end(source, &open).unwrap();

        assert_eq!(&source[end..], "tail");
    }

    #[test]
    fn unclosed_element_has_no_end() {
        let source = "<footer><p>never closed</p>";
        let open = scan_tags(source, 0).next().unwrap();

        assert_eq!(element_end(source, &open), None);
    }

    #[test]
    fn tag_names_are_case_insensitive() {
        let source = "<FOOTER>x</footer>";
        let open = scan_tags(source, 0).next().unwrap();

        assert!(open.opens("footer"));
        assert_eq!(element_end(source, &open), Some(source.len()));
    }

    #[test]
    fn finds_innermost_enclosing_block() {
        let source = "<section><p>a</p><div><span>Created by me</span></div></section>";
        let pos = source.find("Created").unwrap();

        let (start, end) = enclosing_block(source, pos, pos + 7).unwrap();

        assert_eq!(&source[start..end], "<div><span>Created by me</span></div>");
    }

    #[test]
    fn no_enclosing_block_outside_elements() {
        let source = "<p>x</p> Created by";
        let pos = source.find("Created").unwrap();

        assert_eq!(enclosing_block(source, pos, pos + 7), None);
    }
}
