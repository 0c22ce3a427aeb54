//! Leaderboard calculations.
//!
//! Everything here is a pure function of its inputs. Data flows one way:
//!
//! ```text
//! transactions ──► StoreStats ──► RankedStore (growth, growth %) ──► Standings
//!                  (stats)        (engine)                           (partition)
//! ```
//!
//! Nothing is cached; callers recompute on every query.

mod dashboard;
mod engine;
mod partition;
mod stats;

pub use dashboard::{GlobalSummary, MonthlyRevenue, monthly_revenue, revenue_position};
pub use engine::{RankedStore, SortKey, rank};
pub use partition::{PODIUM_SIZE, Standings, TableRow, partition};
pub use stats::{StoreStats, compute_stats};
