use serde::{Deserialize, Serialize};

use super::engine::RankedStore;

/// Number of stores shown on the podium.
pub const PODIUM_SIZE: usize = 3;

/// A table row below the podium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// 1-based leaderboard position; the first row is ranked 4.
    pub rank: usize,
    pub entry: RankedStore,
}

/// A ranked leaderboard split for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    /// First, second and third place. Empty places are `None` when fewer
    /// than three stores exist; views render a placeholder for them.
    pub podium: [Option<RankedStore>; PODIUM_SIZE],
    /// Everything after the podium, in ranked order.
    pub table: Vec<TableRow>,
}

impl Standings {
    /// The occupied podium places, best first.
    pub fn podium_entries(&self) -> impl Iterator<Item = &RankedStore> {
        self.podium.iter().flatten()
    }
}

/// Split a ranked sequence into the podium and the remaining table rows.
#[must_use]
pub fn partition(ranked: Vec<RankedStore>) -> Standings {
    let mut podium: [Option<RankedStore>; PODIUM_SIZE] = Default::default();
    let mut table = Vec::with_capacity(ranked.len().saturating_sub(PODIUM_SIZE));

    for (index, entry) in ranked.into_iter().enumerate() {
        match podium.get_mut(index) {
            Some(slot) => *slot = Some(entry),
            None => table.push(TableRow {
                rank: index + 1,
                entry,
            }),
        }
    }

    Standings { podium, table }
}
