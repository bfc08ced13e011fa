//! Showcase page assembler for vitrine.
//!
//! Embeds each component fragment as a sandboxed preview card and splices
//! the cards into a single static page.

pub mod assembler;
pub mod builder;
pub mod card;
pub mod layout;
pub mod templates;
pub mod writer;

pub use assembler::{
    AssembleError, Assembler, Assembly, ComponentEntry, FragmentError, FragmentSource,
    FsFragmentSource, SkipReason, SkippedComponent,
};
pub use builder::{
    default_components, discover_components, BuildError, BuildResult, ShowcaseBuilder,
    ShowcaseConfig,
};
pub use card::{Card, CardBuilder, CardError};
pub use layout::{LayoutConfig, LayoutError, LayoutResolver, LayoutSettings};
pub use writer::{write_document, WriteError};
