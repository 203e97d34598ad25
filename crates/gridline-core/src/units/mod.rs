//! Measurement units: descriptors, tokens, and the provider contracts.
//!
//! The position model never performs unit conversion. This module only knows
//! *which* units are in effect (as shared descriptors), how they are named in
//! the save format (tokens), and how the surrounding application exposes the
//! current units context ([`UnitsProvider`]) and display geometry
//! ([`ScreenProvider`]).

pub mod descriptors;
pub mod providers;

pub use descriptors::{
    AngularUnits, AngularUnitsId, LinearUnits, LinearUnitsId, UnitsCatalog, UnitsError,
};
pub use providers::{FixedScreen, ScreenProvider, UnitsProvider, UnitsSystem};
