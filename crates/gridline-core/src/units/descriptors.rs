//! Unit descriptors and their stable save-format tokens.
//!
//! Every unit the application can measure in has a compact token (e.g. `"px"`)
//! that is written into position documents and config files. Tokens are part
//! of the persisted format and must never change meaning between releases.

use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a units token cannot be resolved.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    /// The token does not name any known linear units.
    #[error("unknown linear units token: {0:?}")]
    UnknownLinear(String),

    /// The token does not name any known angular units.
    #[error("unknown angular units token: {0:?}")]
    UnknownAngular(String),
}

// ── Unit identifiers ──────────────────────────────────────────────────────────

/// Identifies a linear (distance) measurement unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinearUnitsId {
    #[serde(rename = "px")]
    Pixels,
    #[serde(rename = "pt")]
    Points,
    #[serde(rename = "tp")]
    Twips,
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "pc")]
    Picas,
    #[serde(rename = "custom")]
    Custom,
}

impl LinearUnitsId {
    /// All linear unit identifiers, in catalog order.
    pub const ALL: [LinearUnitsId; 8] = [
        LinearUnitsId::Pixels,
        LinearUnitsId::Points,
        LinearUnitsId::Twips,
        LinearUnitsId::Inches,
        LinearUnitsId::Centimeters,
        LinearUnitsId::Millimeters,
        LinearUnitsId::Picas,
        LinearUnitsId::Custom,
    ];

    /// The token written into position documents for this unit.
    pub fn token(self) -> &'static str {
        match self {
            LinearUnitsId::Pixels => "px",
            LinearUnitsId::Points => "pt",
            LinearUnitsId::Twips => "tp",
            LinearUnitsId::Inches => "in",
            LinearUnitsId::Centimeters => "cm",
            LinearUnitsId::Millimeters => "mm",
            LinearUnitsId::Picas => "pc",
            LinearUnitsId::Custom => "custom",
        }
    }

    /// Human-readable label for UI and logging.
    pub fn label(self) -> &'static str {
        match self {
            LinearUnitsId::Pixels => "pixels",
            LinearUnitsId::Points => "points",
            LinearUnitsId::Twips => "twips",
            LinearUnitsId::Inches => "inches",
            LinearUnitsId::Centimeters => "centimeters",
            LinearUnitsId::Millimeters => "millimeters",
            LinearUnitsId::Picas => "picas",
            LinearUnitsId::Custom => "custom",
        }
    }
}

impl FromStr for LinearUnitsId {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinearUnitsId::ALL
            .into_iter()
            .find(|id| id.token() == s)
            .ok_or_else(|| UnitsError::UnknownLinear(s.to_string()))
    }
}

/// Identifies an angular measurement unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngularUnitsId {
    #[serde(rename = "deg")]
    Degrees,
    #[serde(rename = "rad")]
    Radians,
}

impl AngularUnitsId {
    /// All angular unit identifiers, in catalog order.
    pub const ALL: [AngularUnitsId; 2] = [AngularUnitsId::Degrees, AngularUnitsId::Radians];

    /// The token written into position documents for this unit.
    pub fn token(self) -> &'static str {
        match self {
            AngularUnitsId::Degrees => "deg",
            AngularUnitsId::Radians => "rad",
        }
    }

    /// Human-readable label for UI and logging.
    pub fn label(self) -> &'static str {
        match self {
            AngularUnitsId::Degrees => "degrees",
            AngularUnitsId::Radians => "radians",
        }
    }
}

impl FromStr for AngularUnitsId {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AngularUnitsId::ALL
            .into_iter()
            .find(|id| id.token() == s)
            .ok_or_else(|| UnitsError::UnknownAngular(s.to_string()))
    }
}

// ── Descriptors ───────────────────────────────────────────────────────────────

/// Descriptor for one linear measurement unit.
///
/// Descriptors are owned by a [`UnitsCatalog`] and handed out as shared
/// [`Rc`] handles; holders never duplicate or free them.
#[derive(Debug, PartialEq, Eq)]
pub struct LinearUnits {
    id: LinearUnitsId,
    label: &'static str,
}

impl LinearUnits {
    fn new(id: LinearUnitsId) -> Self {
        Self { id, label: id.label() }
    }

    /// The identifier of this unit.
    pub fn units_id(&self) -> LinearUnitsId {
        self.id
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        self.label
    }
}

/// Descriptor for one angular measurement unit.
#[derive(Debug, PartialEq, Eq)]
pub struct AngularUnits {
    id: AngularUnitsId,
    label: &'static str,
}

impl AngularUnits {
    fn new(id: AngularUnitsId) -> Self {
        Self { id, label: id.label() }
    }

    /// The identifier of this unit.
    pub fn units_id(&self) -> AngularUnitsId {
        self.id
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        self.label
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Owns one shared descriptor per unit identifier.
///
/// The catalog is the single authority for descriptor lifetime: everything
/// else in the crate holds `Rc` clones of these entries.
#[derive(Debug)]
pub struct UnitsCatalog {
    linear: Vec<Rc<LinearUnits>>,
    angular: Vec<Rc<AngularUnits>>,
}

impl UnitsCatalog {
    /// Builds the catalog with a descriptor for every known unit.
    pub fn new() -> Self {
        Self {
            linear: LinearUnitsId::ALL
                .into_iter()
                .map(|id| Rc::new(LinearUnits::new(id)))
                .collect(),
            angular: AngularUnitsId::ALL
                .into_iter()
                .map(|id| Rc::new(AngularUnits::new(id)))
                .collect(),
        }
    }

    /// Returns the shared descriptor for a linear unit.
    pub fn linear(&self, id: LinearUnitsId) -> Rc<LinearUnits> {
        // The catalog is total over LinearUnitsId::ALL.
        self.linear
            .iter()
            .find(|u| u.units_id() == id)
            .cloned()
            .unwrap_or_else(|| unreachable!("catalog covers every LinearUnitsId"))
    }

    /// Returns the shared descriptor for an angular unit.
    pub fn angular(&self, id: AngularUnitsId) -> Rc<AngularUnits> {
        self.angular
            .iter()
            .find(|u| u.units_id() == id)
            .cloned()
            .unwrap_or_else(|| unreachable!("catalog covers every AngularUnitsId"))
    }
}

impl Default for UnitsCatalog {
    fn default() -> Self {
        Self::new()
    }
}
