//! Template engine for rendering preview cards, plus the built-in base page.

use minijinja::{AutoEscape, Environment};

/// Marker in the base page where the generated cards are inserted.
pub const DEFAULT_PLACEHOLDER: &str = "<!-- COMPONENT_GRID_PLACEHOLDER -->";

/// Capabilities granted to every preview frame.
pub const PREVIEW_SANDBOX: &str =
    "allow-scripts allow-forms allow-same-origin allow-popups allow-modals";

/// Pre-escaped values for one card.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CardContext {
    /// Component label
    pub name: String,
    /// Link to the standalone fragment
    pub href: String,
    /// Fragment markup for the `srcdoc` attribute
    pub srcdoc: String,
    /// Frame width percentage
    pub width: String,
    /// Frame height percentage
    pub height: String,
    /// Frame scale factor
    pub scale: String,
    /// Frame `sandbox` capabilities
    pub sandbox: &'static str,
}

/// Template engine using minijinja.
///
/// Auto-escaping is off: the card builder escapes every interpolated value
/// exactly once before it reaches the template.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the card template.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_template_owned("card.html".to_string(), CARD_TEMPLATE.to_string())
            .expect("Failed to add card template");

        Self { env }
    }

    /// Render one preview card.
    pub fn render_card(&self, card: &CardContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("card.html")?;
        tmpl.render(card)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const CARD_TEMPLATE: &str = r##"
<div class="flex flex-col gap-5" data-component="{{ name }}">
    <div class="flex items-center justify-between px-1">
        <span class="text-[11px] font-bold text-white/90 uppercase tracking-[0.2em]">{{ name }}</span>
        <a href="{{ href }}" target="_blank" rel="noopener" class="text-[9px] font-bold text-white/20 hover:text-cyan-400 transition-colors uppercase tracking-widest flex items-center gap-1.5 focus:outline-none">
            showcase <i class="fa-solid fa-arrow-up-right-from-square text-[8px] opacity-40"></i>
        </a>
    </div>
    <div class="group relative h-[380px] bg-[#020202] border border-white/5 rounded-2xl overflow-hidden shadow-2xl transition-all duration-700 hover:border-white/20 hover:bg-[#030303]">
        <div class="w-full h-full flex items-center justify-center p-8">
            <iframe
                srcdoc="{{ srcdoc }}"
                title="{{ name }} preview"
                class="w-[{{ width }}%] h-[{{ height }}%] border-0 origin-center scale-[{{ scale }}] opacity-90 group-hover:opacity-100 transition-opacity duration-700"
                scrolling="no"
                sandbox="{{ sandbox }}">
            </iframe>
            <div class="absolute inset-0 bg-black/10 group-hover:bg-transparent transition-colors duration-700 pointer-events-none"></div>
        </div>
        <div class="absolute inset-x-0 top-0 h-px bg-gradient-to-r from-transparent via-white/10 to-transparent opacity-0 group-hover:opacity-100 transition-opacity" aria-hidden="true"></div>
    </div>
</div>"##;

/// Base page used when no template file is configured.
pub const DEFAULT_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en" class="h-full bg-black">
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>YakaUI - Components</title>
    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?family=Outfit:wght@300;400;500;600;700&display=swap" rel="stylesheet">
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
    <script src="https://cdn.tailwindcss.com"></script>
    <style type="text/tailwindcss">
        @layer base {
            body {
                @apply bg-black text-white antialiased overflow-x-hidden;
                font-family: 'Outfit', sans-serif;
            }
        }

        .content-panel {
            @apply rounded-t-[2.5rem] bg-[#050505]/60 backdrop-blur-[120px] border-t border-white/5 shadow-2xl;
            min-height: 100vh;
        }
    </style>
</head>
<body class="relative min-h-full">
    <header class="flex h-20 items-center justify-between px-10 max-w-7xl mx-auto border-b border-white/5">
        <span class="text-xl font-bold tracking-tight uppercase">YakaUI</span>
        <span class="text-[10px] font-bold text-white/60 tracking-widest uppercase">v1.0</span>
    </header>

    <section class="px-10 pt-10 pb-24 max-w-7xl mx-auto">
        <h1 class="text-[clamp(2rem,4vw,3rem)] font-bold leading-[1.1] tracking-tight max-w-4xl">
            Fully styled, accessible UI components, ready to drop into plain HTML.
        </h1>
    </section>

    <main class="content-panel">
        <div class="max-w-7xl mx-auto px-10 pt-16 w-full">
            <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-x-8 gap-y-20 py-10">
                <!-- COMPONENT_GRID_PLACEHOLDER -->
            </div>
        </div>

        <footer class="border-t border-white/5 mt-auto">
            <div class="max-w-7xl mx-auto px-10 py-12 text-[10px] text-white/20 font-mono uppercase tracking-wider">
                <p>&copy; YakaUI</p>
            </div>
        </footer>
    </main>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CardContext {
        CardContext {
            name: "Buttons".to_string(),
            href: "Buttons/one.html".to_string(),
            srcdoc: "&lt;button&gt;Go&lt;/button&gt;".to_string(),
            width: "133.33".to_string(),
            height: "133.33".to_string(),
            scale: "0.75".to_string(),
            sandbox: PREVIEW_SANDBOX,
        }
    }

    #[test]
    fn renders_card_fields() {
        let html = TemplateEngine::new().render_card(&card()).unwrap();

        assert!(html.contains(r#"<span class="text-[11px] font-bold text-white/90 uppercase tracking-[0.2em]">Buttons</span>"#));
        assert!(html.contains(r#"href="Buttons/one.html""#));
        assert!(html.contains("w-[133.33%] h-[133.33%]"));
        assert!(html.contains("scale-[0.75]"));
    }

    #[test]
    fn does_not_escape_again() {
        let html = TemplateEngine::new().render_card(&card()).unwrap();

        assert!(html.contains(r#"srcdoc="&lt;button&gt;Go&lt;/button&gt;""#));
        assert!(!html.contains("&amp;lt;"));
    }

    #[test]
    fn sandboxes_the_frame() {
        let html = TemplateEngine::new().render_card(&card()).unwrap();

        assert!(html.contains(
            r#"sandbox="allow-scripts allow-forms allow-same-origin allow-popups allow-modals""#
        ));
    }

    #[test]
    fn default_page_has_single_placeholder() {
        assert_eq!(DEFAULT_PAGE.matches(DEFAULT_PLACEHOLDER).count(), 1);
    }
}
