//! Document-writer collaborators.
//!
//! Saving hands finished [`Element`]s to a [`PositionLogWriter`]; where the
//! elements end up (a file, a buffer, a test capture) is the writer's
//! business.

use std::io::Write;

use crate::document::node::{DocumentError, Element};

/// Receives elements produced by a save operation.
pub trait PositionLogWriter {
    /// Writes one top-level element.
    fn write(&mut self, element: &Element) -> Result<(), DocumentError>;
}

/// Renders each element as XML text into an [`io::Write`](std::io::Write) sink.
#[derive(Debug)]
pub struct XmlLogWriter<W: Write> {
    out: W,
}

impl<W: Write> XmlLogWriter<W> {
    /// Wraps an output sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the writer and returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PositionLogWriter for XmlLogWriter<W> {
    fn write(&mut self, element: &Element) -> Result<(), DocumentError> {
        self.out.write_all(element.to_xml().as_bytes())?;
        Ok(())
    }
}

/// Captures written elements in memory.
///
/// The loopback half of a save/load round trip: what a save writes here can
/// be fed straight back into a load.
#[derive(Debug, Default)]
pub struct MemoryLogWriter {
    elements: Vec<Element>,
}

impl MemoryLogWriter {
    /// Creates an empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// The elements written so far, in order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Consumes the writer and returns the captured elements.
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

impl PositionLogWriter for MemoryLogWriter {
    fn write(&mut self, element: &Element) -> Result<(), DocumentError> {
        self.elements.push(element.clone());
        Ok(())
    }
}
