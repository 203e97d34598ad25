//! Collaborator contracts for the units context and display geometry.
//!
//! [`PositionDesktop`](crate::position::PositionDesktop) snapshots its state
//! from a [`UnitsProvider`] and a [`ScreenProvider`] at construction time.
//! The traits are object-safe so the desktop can hold them behind `Rc` and
//! resolve unit tokens during document loading.

use std::rc::Rc;

use crate::geometry::{FPoint, FSize};
use crate::units::descriptors::{
    AngularUnits, AngularUnitsId, LinearUnits, LinearUnitsId, UnitsCatalog,
};

/// The units context of the surrounding application.
///
/// Exposes the currently selected units, descriptor lookup by identifier, and
/// the origin / Y-inversion policy. Implementations own their descriptors
/// (typically through a [`UnitsCatalog`]); callers receive shared handles and
/// never copy or free them.
pub trait UnitsProvider {
    /// Descriptor of the currently selected linear units.
    fn linear_units(&self) -> Rc<LinearUnits>;

    /// Descriptor of the currently selected angular units.
    fn angular_units(&self) -> Rc<AngularUnits>;

    /// Looks up the descriptor for an arbitrary linear unit.
    fn find_linear(&self, id: LinearUnitsId) -> Rc<LinearUnits>;

    /// Looks up the descriptor for an arbitrary angular unit.
    fn find_angular(&self, id: AngularUnitsId) -> Rc<AngularUnits>;

    /// The current coordinate origin, in the current linear units.
    fn origin(&self) -> FPoint;

    /// Whether the Y axis grows upward from the origin.
    fn is_invert_y(&self) -> bool;
}

/// Display geometry of the desktop being measured.
pub trait ScreenProvider {
    /// Overall size of the virtual screen, in pixels.
    fn screen_size(&self) -> FSize;

    /// Number of physical screens making up the virtual screen.
    fn screen_count(&self) -> usize;
}

// ── Concrete providers ────────────────────────────────────────────────────────

/// Default [`UnitsProvider`] implementation with settable selection and policy.
///
/// Starts out in pixels/degrees with the origin at the top-left corner and no
/// Y inversion, which is the application's initial state before any
/// calibration has been applied.
#[derive(Debug)]
pub struct UnitsSystem {
    catalog: UnitsCatalog,
    linear: LinearUnitsId,
    angular: AngularUnitsId,
    origin: FPoint,
    invert_y: bool,
}

impl UnitsSystem {
    /// Creates a units system in its default state.
    pub fn new() -> Self {
        Self {
            catalog: UnitsCatalog::new(),
            linear: LinearUnitsId::Pixels,
            angular: AngularUnitsId::Degrees,
            origin: FPoint::default(),
            invert_y: false,
        }
    }

    /// Selects the current linear units.
    pub fn set_linear_units(&mut self, id: LinearUnitsId) {
        self.linear = id;
    }

    /// Selects the current angular units.
    pub fn set_angular_units(&mut self, id: AngularUnitsId) {
        self.angular = id;
    }

    /// Moves the coordinate origin.
    pub fn set_origin(&mut self, origin: FPoint) {
        self.origin = origin;
    }

    /// Sets the Y-axis inversion policy.
    pub fn set_invert_y(&mut self, invert: bool) {
        self.invert_y = invert;
    }
}

impl Default for UnitsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitsProvider for UnitsSystem {
    fn linear_units(&self) -> Rc<LinearUnits> {
        self.catalog.linear(self.linear)
    }

    fn angular_units(&self) -> Rc<AngularUnits> {
        self.catalog.angular(self.angular)
    }

    fn find_linear(&self, id: LinearUnitsId) -> Rc<LinearUnits> {
        self.catalog.linear(id)
    }

    fn find_angular(&self, id: AngularUnitsId) -> Rc<AngularUnits> {
        self.catalog.angular(id)
    }

    fn origin(&self) -> FPoint {
        self.origin
    }

    fn is_invert_y(&self) -> bool {
        self.invert_y
    }
}

/// A [`ScreenProvider`] with fixed geometry.
///
/// Used wherever live display enumeration is unavailable or irrelevant:
/// tests, headless runs, and documents reloaded on a different machine.
#[derive(Debug, Clone, Copy)]
pub struct FixedScreen {
    size: FSize,
    count: usize,
}

impl FixedScreen {
    /// A single screen of the given pixel dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: FSize::new(width, height),
            count: 1,
        }
    }

    /// Overrides the number of screens making up the virtual screen.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

impl ScreenProvider for FixedScreen {
    fn screen_size(&self) -> FSize {
        self.size
    }

    fn screen_count(&self) -> usize {
        self.count
    }
}
