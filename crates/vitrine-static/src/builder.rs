//! Showcase page builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use vitrine_sanitize::{SanitizeError, SanitizeRules, Sanitizer};

use crate::assembler::{AssembleError, Assembler, ComponentEntry, FsFragmentSource};
use crate::layout::{LayoutError, LayoutResolver, LayoutSettings};
use crate::templates::{DEFAULT_PAGE, DEFAULT_PLACEHOLDER};
use crate::writer::{write_document, WriteError};

/// Fragment file names looked for during discovery, in preference order.
const FRAGMENT_FILES: &[&str] = &["one.html", "index.html"];

/// Configuration for building a showcase page.
#[derive(Debug, Clone)]
pub struct ShowcaseConfig {
    /// Directory holding one folder per component
    pub root: PathBuf,

    /// Base template file (built-in page when unset)
    pub template: Option<PathBuf>,

    /// Output file
    pub output: PathBuf,

    /// Insertion marker in the base template
    pub placeholder: String,

    /// Components in display order
    pub components: Vec<ComponentEntry>,

    /// Discover components from the root directory instead of `components`
    pub discover: bool,

    /// Sanitizer rules
    pub sanitize: SanitizeRules,

    /// Preview layout settings
    pub layout: LayoutSettings,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            template: None,
            output: PathBuf::from("index.html"),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            components: default_components(),
            discover: false,
            sanitize: SanitizeRules::default(),
            layout: LayoutSettings::default(),
        }
    }
}

/// The built-in component list.
pub fn default_components() -> Vec<ComponentEntry> {
    [
        ("Buttons", "one.html"),
        ("Checkbox", "one.html"),
        ("Combobox", "one.html"),
        ("Dialog", "one.html"),
        ("Disclosure", "index.html"),
        ("Dropdown", "one.html"),
        ("Fieldset", "one.html"),
        ("Input", "one.html"),
        ("Listbox", "one.html"),
        ("Popover", "one.html"),
        ("Radio Group", "one.html"),
        ("Select", "one.html"),
        ("Tabs", "one.html"),
        ("Textarea", "one.html"),
        ("Transistion", "one.html"),
    ]
    .into_iter()
    .map(|(name, file)| ComponentEntry::new(name, file))
    .collect()
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of cards in the page
    pub cards: usize,

    /// Components left out of the page
    pub skipped: Vec<String>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output file
    pub output: PathBuf,
}

/// Errors that abort a build. Nothing is written when one occurs.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read base template {path}: {message}")]
    TemplateRead { path: String, message: String },

    #[error("Invalid sanitize rules: {0}")]
    Sanitize(#[from] SanitizeError),

    #[error("Invalid layout settings: {0}")]
    Layout(#[from] LayoutError),

    #[error("Malformed base template: {0}")]
    Template(#[from] AssembleError),

    #[error("Failed to discover components: {0}")]
    Discover(String),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Showcase page builder.
pub struct ShowcaseBuilder {
    config: ShowcaseConfig,
    assembler: Assembler,
}

impl ShowcaseBuilder {
    /// Create a builder, compiling sanitize rules and layout settings.
    pub fn new(config: ShowcaseConfig) -> Result<Self, BuildError> {
        let assembler = Assembler::new(
            Sanitizer::new(&config.sanitize)?,
            LayoutResolver::from_settings(&config.layout)?,
            config.placeholder.clone(),
        );

        Ok(Self { config, assembler })
    }

    /// Build the showcase page and write it to the output path.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let template = self.load_template()?;

        let entries = self.entries()?;
        let source = FsFragmentSource::new(&self.config.root);
        let assembly = self.assembler.assemble(&template, &entries, &source)?;

        for skipped in &assembly.skipped {
            tracing::warn!("Skipping {}: {}", skipped.name, skipped.reason);
        }

        write_document(&self.config.output, &assembly.document)?;

        Ok(BuildResult {
            cards: assembly.rendered.len(),
            skipped: assembly.skipped.into_iter().map(|s| s.name).collect(),
            duration_ms: start.elapsed().as_millis() as u64,
            output: self.config.output.clone(),
        })
    }

    /// Components to render, in display order.
    pub fn entries(&self) -> Result<Vec<ComponentEntry>, BuildError> {
        if self.config.discover {
            let found = discover_components(&self.config.root)?;
            tracing::info!(
                "Discovered {} components in {}",
                found.len(),
                self.config.root.display()
            );
            Ok(found)
        } else {
            Ok(self.config.components.clone())
        }
    }

    /// Read the configured base template, or fall back to the built-in page.
    fn load_template(&self) -> Result<String, BuildError> {
        match &self.config.template {
            Some(path) => fs::read_to_string(path).map_err(|e| BuildError::TemplateRead {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
            None => Ok(DEFAULT_PAGE.to_string()),
        }
    }
}

/// Find component directories under `root` that contain a fragment file.
///
/// Entries are ordered by directory name; hidden directories are ignored.
pub fn discover_components(root: &Path) -> Result<Vec<ComponentEntry>, BuildError> {
    if !root.is_dir() {
        return Err(BuildError::Discover(format!(
            "Root directory not found: {}",
            root.display()
        )));
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        if let Some(file) = FRAGMENT_FILES
            .iter()
            .find(|f| entry.path().join(f).is_file())
        {
            entries.push(ComponentEntry::new(name, *file));
        }
    }

    Ok(entries)
}
