//! The desktop context a saved position was recorded under.
//!
//! A [`PositionDesktop`] snapshots the measurement configuration in effect
//! when positions are recorded: the selected units, the coordinate origin and
//! Y-axis policy, the desktop dimensions, and any custom unit definition.
//! Saved positions reference the snapshot by id, so the same context can be
//! restored when a document is reloaded on a machine whose live configuration
//! has since changed.
//!
//! Identity and content are deliberately separate: equality compares the
//! configuration content and ignores the id, while clones carry both the
//! content and the id of their source. Matching a reference back to its
//! desktop goes through [`PositionDesktop::id`], never through equality.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::document::{DocumentError, Element, PositionLogWriter};
use crate::geometry::{FPoint, FSize};
use crate::position::id::DesktopId;
use crate::units::{AngularUnits, LinearUnits, ScreenProvider, UnitsProvider};

/// A saved measurement-desktop configuration snapshot.
#[derive(Clone)]
pub struct PositionDesktop {
    id: DesktopId,
    /// Units context used to resolve unit tokens when loading.
    units: Rc<dyn UnitsProvider>,
    linear_units: Rc<LinearUnits>,
    angular_units: Rc<AngularUnits>,
    origin: FPoint,
    invert_y: bool,
    screen_size: FSize,
    custom_name: String,
    custom_abbrev: String,
    custom_basis: String,
    custom_factor: f64,
}

impl PositionDesktop {
    /// Snapshots the current provider state under a fresh identifier.
    pub fn new(units: Rc<dyn UnitsProvider>, screen: &dyn ScreenProvider) -> Self {
        Self::with_id(DesktopId::new(), units, screen)
    }

    /// Snapshots the current provider state under a caller-supplied
    /// identifier.
    ///
    /// Used when rebuilding a desktop whose identity must stay stable, e.g.
    /// while reloading a document.
    pub fn with_id(
        id: DesktopId,
        units: Rc<dyn UnitsProvider>,
        screen: &dyn ScreenProvider,
    ) -> Self {
        let linear_units = units.linear_units();
        let angular_units = units.angular_units();
        let origin = units.origin();
        let invert_y = units.is_invert_y();
        Self {
            id,
            units,
            linear_units,
            angular_units,
            origin,
            invert_y,
            screen_size: screen.screen_size(),
            custom_name: String::new(),
            custom_abbrev: String::new(),
            custom_basis: String::new(),
            custom_factor: 0.0,
        }
    }

    /// The identifier of this desktop context.
    pub fn id(&self) -> DesktopId {
        self.id
    }

    /// Reassigns the identifier.
    ///
    /// Content equality is unaffected; only reference matching changes.
    pub fn set_id(&mut self, id: DesktopId) {
        self.id = id;
    }

    /// The linear units the snapshot was taken in.
    pub fn linear_units(&self) -> &LinearUnits {
        &self.linear_units
    }

    /// The angular units the snapshot was taken in.
    pub fn angular_units(&self) -> &AngularUnits {
        &self.angular_units
    }

    /// The coordinate origin of the snapshot.
    pub fn origin(&self) -> FPoint {
        self.origin
    }

    /// Whether the Y axis grows upward from the origin.
    pub fn is_invert_y(&self) -> bool {
        self.invert_y
    }

    /// Desktop dimensions in pixels at snapshot time.
    pub fn screen_size(&self) -> FSize {
        self.screen_size
    }

    /// Display name of the custom unit, empty when none is defined.
    pub fn custom_name(&self) -> &str {
        &self.custom_name
    }

    /// Abbreviation of the custom unit, empty when none is defined.
    pub fn custom_abbrev(&self) -> &str {
        &self.custom_abbrev
    }

    /// Basis units the custom factor scales from, empty when none is defined.
    pub fn custom_basis(&self) -> &str {
        &self.custom_basis
    }

    /// Scale factor of the custom unit, `0.0` when none is defined.
    pub fn custom_factor(&self) -> f64 {
        self.custom_factor
    }

    /// Sets the custom unit display name.
    pub fn set_custom_name(&mut self, name: impl Into<String>) {
        self.custom_name = name.into();
    }

    /// Sets the custom unit abbreviation.
    pub fn set_custom_abbrev(&mut self, abbrev: impl Into<String>) {
        self.custom_abbrev = abbrev.into();
    }

    /// Sets the basis units the custom factor scales from.
    pub fn set_custom_basis(&mut self, basis: impl Into<String>) {
        self.custom_basis = basis.into();
    }

    /// Sets the custom unit scale factor.
    pub fn set_custom_factor(&mut self, factor: f64) {
        self.custom_factor = factor;
    }

    /// Writes this desktop as a `<desktop>` element.
    ///
    /// `version` selects the save-format version: version 1 writes the
    /// identifier, units, origin, and size; version 2 and later additionally
    /// write the custom-unit definition. [`load`](Self::load) accepts exactly
    /// the shape produced here for the same or a lower version.
    ///
    /// # Errors
    ///
    /// Propagates [`DocumentError`] from the writer.
    pub fn save(
        &self,
        writer: &mut dyn PositionLogWriter,
        version: u32,
    ) -> Result<(), DocumentError> {
        let mut desktop = Element::new("desktop").with_attr("id", self.id);

        desktop.add_child(
            Element::new("units")
                .with_attr("length", self.linear_units.units_id().token())
                .with_attr("angle", self.angular_units.units_id().token()),
        );
        if version >= 2 {
            desktop.add_child(
                Element::new("customUnits")
                    .with_attr("name", &self.custom_name)
                    .with_attr("abbrev", &self.custom_abbrev)
                    .with_attr("scaleBasis", &self.custom_basis)
                    .with_attr("scaleFactor", self.custom_factor),
            );
        }
        desktop.add_child(
            Element::new("origin")
                .with_attr("xoffset", self.origin.x)
                .with_attr("yoffset", self.origin.y)
                .with_attr("invertY", self.invert_y),
        );
        desktop.add_child(
            Element::new("size")
                .with_attr("x", self.screen_size.width)
                .with_attr("y", self.screen_size.height),
        );

        writer.write(&desktop)
    }

    /// Reconstructs this desktop from a `<desktop>` element produced by
    /// [`save`](Self::save).
    ///
    /// Unit tokens resolve through the units provider captured at
    /// construction. The custom-unit definition is optional so that version 1
    /// documents load with default custom fields.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] naming the element or attribute that is
    /// missing or unparsable. On error the desktop is left unchanged; every
    /// field parses before any field is committed.
    pub fn load(&mut self, node: &Element) -> Result<(), DocumentError> {
        node.expect_name("desktop")?;
        let id: DesktopId = node.parse_attr("id")?;

        let units = node.require_child("units")?;
        let linear_units = self.units.find_linear(units.parse_attr("length")?);
        let angular_units = self.units.find_angular(units.parse_attr("angle")?);

        let origin_node = node.require_child("origin")?;
        let origin = FPoint::new(
            origin_node.parse_attr("xoffset")?,
            origin_node.parse_attr("yoffset")?,
        );
        let invert_y: bool = origin_node.parse_attr("invertY")?;

        let size_node = node.require_child("size")?;
        let screen_size = FSize::new(size_node.parse_attr("x")?, size_node.parse_attr("y")?);

        let (custom_name, custom_abbrev, custom_basis, custom_factor) =
            match node.child("customUnits") {
                Some(custom) => (
                    custom.require_attr("name")?.to_string(),
                    custom.require_attr("abbrev")?.to_string(),
                    custom.require_attr("scaleBasis")?.to_string(),
                    custom.parse_attr("scaleFactor")?,
                ),
                None => (String::new(), String::new(), String::new(), 0.0),
            };

        self.id = id;
        self.linear_units = linear_units;
        self.angular_units = angular_units;
        self.origin = origin;
        self.invert_y = invert_y;
        self.screen_size = screen_size;
        self.custom_name = custom_name;
        self.custom_abbrev = custom_abbrev;
        self.custom_basis = custom_basis;
        self.custom_factor = custom_factor;

        debug!(id = %self.id, "loaded desktop context");
        Ok(())
    }
}

/// Content equality: every configuration field except the identifier.
impl PartialEq for PositionDesktop {
    fn eq(&self, other: &Self) -> bool {
        self.linear_units.units_id() == other.linear_units.units_id()
            && self.angular_units.units_id() == other.angular_units.units_id()
            && self.origin == other.origin
            && self.invert_y == other.invert_y
            && self.screen_size == other.screen_size
            && self.custom_name == other.custom_name
            && self.custom_abbrev == other.custom_abbrev
            && self.custom_basis == other.custom_basis
            && self.custom_factor == other.custom_factor
    }
}

impl fmt::Debug for PositionDesktop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionDesktop")
            .field("id", &self.id)
            .field("linear_units", &self.linear_units.units_id())
            .field("angular_units", &self.angular_units.units_id())
            .field("origin", &self.origin)
            .field("invert_y", &self.invert_y)
            .field("screen_size", &self.screen_size)
            .field("custom_name", &self.custom_name)
            .field("custom_abbrev", &self.custom_abbrev)
            .field("custom_basis", &self.custom_basis)
            .field("custom_factor", &self.custom_factor)
            .finish()
    }
}
