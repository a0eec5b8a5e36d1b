use serde::Serialize;

/// Color for a country missing from the tier table.
pub const FALLBACK_COLOR: &str = "gray";

/// Ordinal band assigned by a country's rank among all totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Top,
    Middle,
    Bottom,
}

impl Tier {
    /// Tier for `rank` (0-based, descending total) among `count` countries.
    ///
    /// | Rank                      | Tier   |
    /// |---------------------------|--------|
    /// | `[0, n/3)`                | Top    |
    /// | `[n/3, 2*(n/3))`          | Middle |
    /// | `>= 2*(n/3)`              | Bottom |
    ///
    /// `n/3` truncates, so any remainder lands in Bottom.
    pub fn for_rank(rank: usize, count: usize) -> Tier {
        let third = count / 3;
        match rank {
            r if r < third => Tier::Top,
            r if r < 2 * third => Tier::Middle,
            _ => Tier::Bottom,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Tier::Top => "red",
            Tier::Middle => "darkblue",
            Tier::Bottom => "green",
        }
    }
}
