//! Structured document model for the position save format.
//!
//! Saved positions travel as a tree of [`Element`]s. Saving builds elements
//! and hands them to a [`PositionLogWriter`]; loading walks an element tree
//! that the surrounding application has already parsed out of a document.
//! Rendering to XML text is supported ([`Element::to_xml`]); parsing XML text
//! back into elements is deliberately someone else's job.

pub mod node;
pub mod writer;

pub use node::{DocumentError, Element};
pub use writer::{MemoryLogWriter, PositionLogWriter, XmlLogWriter};

/// Current version of the position save format.
///
/// Version 1 covers the identifier, units, origin, and desktop size.
/// Version 2 added the custom-units definition.
pub const FORMAT_VERSION: u32 = 2;
