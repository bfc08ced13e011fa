//! Showcase assembly: fragments in, one document out.
//!
//! The assembler itself performs no file I/O. Fragments come from a
//! [`FragmentSource`], and the returned document is persisted by the writer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;
use vitrine_sanitize::Sanitizer;

use crate::card::{Card, CardBuilder, CardError};
use crate::layout::LayoutResolver;

/// One component to showcase, in display order.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ComponentEntry {
    /// Display name, also the component's directory name
    pub name: String,

    /// Fragment file name inside the component directory
    pub file: String,
}

impl ComponentEntry {
    /// Create a new entry.
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }

    /// Fragment location under the showcase root.
    pub fn fragment_path(&self, root: &Path) -> PathBuf {
        root.join(&self.name).join(&self.file)
    }

    /// Link to the standalone fragment, relative to the output page.
    pub fn href(&self) -> String {
        format!("{}/{}", self.name, self.file)
    }
}

/// Errors loading a fragment. Each one excludes only its own component.
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    #[error("Fragment not found: {0}")]
    NotFound(String),

    #[error("Failed to read fragment {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Fragment is not valid UTF-8: {0}")]
    Decode(String),
}

/// Where fragment text comes from.
pub trait FragmentSource: Sync {
    /// Load the raw fragment for an entry.
    fn load(&self, entry: &ComponentEntry) -> Result<String, FragmentError>;
}

/// Loads fragments from `<root>/<name>/<file>`.
#[derive(Debug, Clone)]
pub struct FsFragmentSource {
    root: PathBuf,
}

impl FsFragmentSource {
    /// Create a source rooted at a directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FragmentSource for FsFragmentSource {
    fn load(&self, entry: &ComponentEntry) -> Result<String, FragmentError> {
        let path = entry.fragment_path(&self.root);

        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => FragmentError::NotFound(path.display().to_string()),
            _ => FragmentError::Io {
                path: path.display().to_string(),
                source: e,
            },
        })?;

        String::from_utf8(bytes).map_err(|_| FragmentError::Decode(path.display().to_string()))
    }
}

/// Why a component was left out of the document.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error(transparent)]
    Unavailable(#[from] FragmentError),

    #[error(transparent)]
    Render(#[from] CardError),
}

/// A component excluded from the document.
#[derive(Debug)]
pub struct SkippedComponent {
    /// Component display name
    pub name: String,
    /// What went wrong
    pub reason: SkipReason,
}

/// Errors with the base template. These are configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("Placeholder token must not be empty")]
    EmptyPlaceholder,

    #[error("Placeholder {0:?} must be an HTML comment such as <!-- CARDS -->")]
    PlaceholderNotComment(String),

    #[error("Base template does not contain the placeholder {0:?}")]
    MissingPlaceholder(String),

    #[error("Base template contains the placeholder {placeholder:?} {count} times, expected once")]
    DuplicatePlaceholder { placeholder: String, count: usize },
}

/// Result of assembling a showcase.
#[derive(Debug)]
pub struct Assembly {
    /// The final document
    pub document: String,

    /// Names of rendered components, in document order
    pub rendered: Vec<String>,

    /// Components left out, in entry order
    pub skipped: Vec<SkippedComponent>,
}

/// Drives each fragment through sanitize, layout and card rendering, then
/// splices the cards into the base template.
pub struct Assembler {
    sanitizer: Sanitizer,
    layouts: LayoutResolver,
    cards: CardBuilder,
    placeholder: String,
}

impl Assembler {
    /// Create an assembler.
    pub fn new(sanitizer: Sanitizer, layouts: LayoutResolver, placeholder: impl Into<String>) -> Self {
        Self {
            sanitizer,
            layouts,
            cards: CardBuilder::new(),
            placeholder: placeholder.into(),
        }
    }

    /// Check that the template contains the placeholder exactly once.
    ///
    /// The placeholder must be an HTML comment: card markup escapes every
    /// `<`, so a comment token can never reappear from a fragment or label.
    pub fn check_template(&self, template: &str) -> Result<(), AssembleError> {
        if self.placeholder.is_empty() {
            return Err(AssembleError::EmptyPlaceholder);
        }
        if !is_comment(&self.placeholder) {
            return Err(AssembleError::PlaceholderNotComment(
                self.placeholder.clone(),
            ));
        }

        match template.matches(self.placeholder.as_str()).count() {
            1 => Ok(()),
            0 => Err(AssembleError::MissingPlaceholder(self.placeholder.clone())),
            count => Err(AssembleError::DuplicatePlaceholder {
                placeholder: self.placeholder.clone(),
                count,
            }),
        }
    }

    /// Assemble the showcase document.
    ///
    /// Components whose fragment cannot be loaded are skipped; the rest keep
    /// their entry order.
    pub fn assemble(
        &self,
        template: &str,
        entries: &[ComponentEntry],
        source: &dyn FragmentSource,
    ) -> Result<Assembly, AssembleError> {
        self.check_template(template)?;

        // Indexed collect keeps entry order.
        let outcomes: Vec<Result<Card, SkipReason>> = entries
            .par_iter()
            .map(|entry| self.render(entry, source))
            .collect();

        let mut cards = String::new();
        let mut rendered = Vec::new();
        let mut skipped = Vec::new();

        for (entry, outcome) in entries.iter().zip(outcomes) {
            match outcome {
                Ok(card) => {
                    cards.push_str(&card.markup);
                    rendered.push(card.label);
                }
                Err(reason) => skipped.push(SkippedComponent {
                    name: entry.name.clone(),
                    reason,
                }),
            }
        }

        Ok(Assembly {
            document: template.replacen(self.placeholder.as_str(), &cards, 1),
            rendered,
            skipped,
        })
    }

    /// Load, sanitize and render one component.
    fn render(
        &self,
        entry: &ComponentEntry,
        source: &dyn FragmentSource,
    ) -> Result<Card, SkipReason> {
        let raw = source.load(entry)?;
        let cleaned = self.sanitizer.sanitize(&raw);
        let layout = self.layouts.resolve(&entry.name);

        tracing::debug!(
            "Rendering {} at scale {}",
            entry.name,
            layout.scale_factor
        );

        Ok(self
            .cards
            .build(&entry.name, &entry.href(), &cleaned, &layout)?)
    }
}

fn is_comment(token: &str) -> bool {
    let token = token.trim();
    token.len() >= "<!---->".len() && token.starts_with("<!--") && token.ends_with("-->")
}
