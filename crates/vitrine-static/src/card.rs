//! Preview card rendering.

use crate::layout::LayoutConfig;
use crate::templates::{CardContext, TemplateEngine, PREVIEW_SANDBOX};

/// A rendered preview card for one component.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Visible component name
    pub label: String,
    /// Link to the standalone fragment
    pub external_href: String,
    /// Full card markup
    pub markup: String,
}

/// Errors that can occur when rendering a card.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("Failed to render card for {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Builds preview cards.
#[derive(Default)]
pub struct CardBuilder {
    templates: TemplateEngine,
}

impl CardBuilder {
    /// Create a card builder with the built-in card template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a card embedding an already sanitized fragment.
    ///
    /// The fragment is escaped here, once, for the frame's `srcdoc` attribute.
    pub fn build(
        &self,
        name: &str,
        href: &str,
        fragment: &str,
        layout: &LayoutConfig,
    ) -> Result<Card, CardError> {
        let context = CardContext {
            name: html_escape(name),
            href: html_escape(href),
            srcdoc: html_escape(fragment),
            width: format_decimal(layout.container_width_percent),
            height: format_decimal(layout.container_height_percent),
            scale: format_decimal(layout.scale_factor),
            sandbox: PREVIEW_SANDBOX,
        };

        let markup = self
            .templates
            .render_card(&context)
            .map_err(|source| CardError::Render {
                name: name.to_string(),
                source,
            })?;

        Ok(Card {
            label: name.to_string(),
            external_href: href.to_string(),
            markup,
        })
    }
}

/// Escape text for a double-quoted HTML attribute or element body.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Two-decimal rendering with trailing zeros trimmed: `0.75`, `133.33`, `200`.
fn format_decimal(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutResolver;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn unescape(s: &str) -> String {
        s.replace("&quot;", "\"")
            .replace("&#x27;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }

    fn srcdoc(markup: &str) -> &str {
        let start = markup.find("srcdoc=\"").unwrap() + "srcdoc=\"".len();
        let len = markup[start..].find('"').unwrap();
        &markup[start..start + len]
    }

    fn build(name: &str, fragment: &str) -> Card {
        let layout = LayoutResolver::default().resolve(name);
        CardBuilder::new()
            .build(name, &format!("{name}/one.html"), fragment, &layout)
            .unwrap()
    }

    #[test]
    fn escapes_fragment_once() {
        let card = build("Buttons", r#"<p class="x">Tom & Jerry's &amp;</p>"#);

        assert_eq!(
            srcdoc(&card.markup),
            "&lt;p class=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s &amp;amp;&lt;/p&gt;"
        );
    }

    #[test]
    fn escaped_fragment_round_trips() {
        let fragments = [
            "",
            "<!DOCTYPE html><html><body style=\"margin:0\">ok</body></html>",
            "a && b < c > d \"q\" 'q' &amp; &lt;",
            "<script>if (a < b && c) { alert('hi \"there\"'); }</script>",
            "multi\nline\r\n\ttext ✓",
        ];

        for fragment in fragments {
            let card = build("Tabs", fragment);
            assert_eq!(unescape(srcdoc(&card.markup)), fragment);
        }
    }

    proptest! {
        #[test]
        fn any_fragment_round_trips(fragment in any::<String>()) {
            let card = build("Tabs", &fragment);
            prop_assert_eq!(unescape(srcdoc(&card.markup)), fragment);
        }

        #[test]
        fn any_label_stays_inside_its_span(name in any::<String>()) {
            let card = build(&name, "");
            let label = format!(">{}</span>", html_escape(&name));

            prop_assert!(card.markup.contains(&label));
            prop_assert!(!card.markup.contains("<script"));
        }
    }

    #[test]
    fn renders_label_and_link() {
        let card = build("Radio Group", "<div></div>");

        assert_eq!(card.label, "Radio Group");
        assert_eq!(card.external_href, "Radio Group/one.html");
        assert!(card.markup.contains(">Radio Group</span>"));
        assert!(card.markup.contains(r#"href="Radio Group/one.html" target="_blank""#));
    }

    #[test]
    fn escapes_label() {
        let card = build("<b>Bold</b>", "");

        assert!(card.markup.contains(">&lt;b&gt;Bold&lt;/b&gt;</span>"));
        assert!(!card.markup.contains("<b>"));
    }

    #[test]
    fn applies_default_layout() {
        let card = build("Buttons", "");

        assert!(card.markup.contains("w-[133.33%] h-[133.33%]"));
        assert!(card.markup.contains("scale-[0.75]"));
    }

    #[test]
    fn applies_override_layout() {
        let card = build("Fieldset", "");

        assert!(card.markup.contains("w-[181.82%] h-[181.82%]"));
        assert!(card.markup.contains("scale-[0.55]"));
    }

    #[test]
    fn sandboxes_preview() {
        let card = build("Dialog", "<dialog open>hi</dialog>");

        assert!(card.markup.contains(
            r#"sandbox="allow-scripts allow-forms allow-same-origin allow-popups allow-modals""#
        ));
        assert!(!card.markup.contains("allow-top-navigation"));
    }

    #[test]
    fn formats_decimals() {
        assert_eq!(format_decimal(0.75), "0.75");
        assert_eq!(format_decimal(100.0 / 0.75), "133.33");
        assert_eq!(format_decimal(200.0), "200");
        assert_eq!(format_decimal(0.5), "0.5");
        assert_eq!(format_decimal(0.01), "0.01");
        assert_eq!(format_decimal(100.0 / 0.01), "10000");
    }
}
