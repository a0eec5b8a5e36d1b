//! Country tiering and magnitude scaling.
//!
//! Countries are ranked by their total value over every date, split into
//! three tiers by rank, and each tier maps to a marker color. Marker radii
//! are log-scaled between the global minimum and maximum value.

pub mod scale;
pub mod tier;
pub mod totals;
pub mod types;

pub use scale::RadiusScale;
pub use tier::{FALLBACK_COLOR, Tier};
pub use totals::classify;
pub use types::{CountryTotal, TierTable};
