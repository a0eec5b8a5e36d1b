//! Data types produced by country classification.

use serde::Serialize;
use std::collections::HashMap;

use super::tier::{FALLBACK_COLOR, Tier};

/// One country's summed value over all dates and coordinates, with its tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryTotal {
    pub rank: usize,
    pub country: String,
    pub total: u64,
    pub tier: Tier,
}

/// Ranked country totals with a name lookup for tier colors.
#[derive(Debug, Clone, Default)]
pub struct TierTable {
    pub(crate) ranked: Vec<CountryTotal>,
    pub(crate) index: HashMap<String, Tier>,
}

impl TierTable {
    pub(crate) fn from_ranked(ranked: Vec<CountryTotal>) -> Self {
        let index = ranked.iter().map(|c| (c.country.clone(), c.tier)).collect();
        Self { ranked, index }
    }

    /// Countries in descending total order.
    pub fn ranked(&self) -> &[CountryTotal] {
        &self.ranked
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn tier_of(&self, country: &str) -> Option<Tier> {
        self.index.get(country).copied()
    }

    /// Marker color for `country`, or [`FALLBACK_COLOR`] if it was never ranked.
    pub fn color_for(&self, country: &str) -> &'static str {
        self.tier_of(country).map(Tier::color).unwrap_or(FALLBACK_COLOR)
    }

    /// Number of countries in `tier`.
    pub fn count(&self, tier: Tier) -> usize {
        self.ranked.iter().filter(|c| c.tier == tier).count()
    }
}
