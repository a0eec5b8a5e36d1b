use std::collections::HashMap;
use tracing::debug;

use super::tier::Tier;
use super::types::{CountryTotal, TierTable};
use crate::reshape::Observation;

/// Sums every observation per country and assigns tiers by rank.
///
/// Countries are ordered by total descending; equal totals are ordered by
/// country name ascending so tier boundaries are deterministic.
#[tracing::instrument(skip(observations), fields(observations = observations.len()))]
pub fn classify(observations: &[Observation]) -> TierTable {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for obs in observations {
        *totals.entry(obs.country.as_str()).or_default() += obs.value;
    }

    let mut sorted: Vec<(&str, u64)> = totals.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let count = sorted.len();
    let ranked: Vec<CountryTotal> = sorted
        .into_iter()
        .enumerate()
        .map(|(rank, (country, total))| CountryTotal {
            rank,
            country: country.to_string(),
            total,
            tier: Tier::for_rank(rank, count),
        })
        .collect();

    let table = TierTable::from_ranked(ranked);
    debug!(
        countries = count,
        top = table.count(Tier::Top),
        middle = table.count(Tier::Middle),
        bottom = table.count(Tier::Bottom),
        "Countries classified"
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(country: &str, day: u32, value: u64) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(2020, 3, day).unwrap(),
            country: country.to_string(),
            lat: 0.0,
            long: 0.0,
            value,
        }
    }

    fn countries(n: usize) -> Vec<Observation> {
        (0..n)
            .map(|i| obs(&format!("C{i:02}"), 1, (i as u64 + 1) * 10))
            .collect()
    }

    #[test]
    fn test_totals_sum_across_dates() {
        let table = classify(&[obs("A", 1, 4), obs("A", 2, 6), obs("B", 1, 3)]);

        let ranked = table.ranked();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].country, "A");
        assert_eq!(ranked[0].total, 10);
        assert_eq!(ranked[1].country, "B");
        assert_eq!(ranked[1].total, 3);
    }

    #[test]
    fn test_nine_countries_split_evenly() {
        let table = classify(&countries(9));
        assert_eq!(table.count(Tier::Top), 3);
        assert_eq!(table.count(Tier::Middle), 3);
        assert_eq!(table.count(Tier::Bottom), 3);
        // Largest totals are the top tier.
        assert_eq!(table.tier_of("C08"), Some(Tier::Top));
        assert_eq!(table.tier_of("C00"), Some(Tier::Bottom));
    }

    #[test]
    fn test_remainder_folds_into_bottom() {
        let table = classify(&countries(10));
        assert_eq!(table.count(Tier::Top), 3);
        assert_eq!(table.count(Tier::Middle), 3);
        assert_eq!(table.count(Tier::Bottom), 4);
    }

    #[test]
    fn test_two_countries_both_bottom() {
        let table = classify(&[obs("A", 1, 100), obs("B", 1, 10)]);
        assert_eq!(table.tier_of("A"), Some(Tier::Bottom));
        assert_eq!(table.tier_of("B"), Some(Tier::Bottom));
        assert_eq!(table.color_for("A"), "green");
    }

    #[test]
    fn test_ties_ordered_by_name() {
        let table = classify(&[obs("Gamma", 1, 5), obs("Alpha", 1, 5), obs("Beta", 1, 5)]);
        let names: Vec<_> = table.ranked().iter().map(|c| c.country.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(table.tier_of("Alpha"), Some(Tier::Top));
        assert_eq!(table.tier_of("Beta"), Some(Tier::Middle));
        assert_eq!(table.tier_of("Gamma"), Some(Tier::Bottom));
    }

    #[test]
    fn test_unknown_country_is_gray() {
        let table = classify(&[obs("A", 1, 1)]);
        assert_eq!(table.tier_of("Atlantis"), None);
        assert_eq!(table.color_for("Atlantis"), "gray");
    }

    #[test]
    fn test_empty_input() {
        let table = classify(&[]);
        assert!(table.is_empty());
    }
}
