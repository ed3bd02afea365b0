//! Team composition insight engine
//!
//! Pure, synchronous functions over a roster: role distribution, mutual
//! synergy detection and a priority-ordered composition classification.
//! Nothing here performs I/O or returns errors; malformed entries (no role,
//! no name) are left out of the results.

pub mod composition;
pub mod report;
pub mod roles;
pub mod synergy;

pub use composition::{
    classify_composition, classify_composition_with, CompositionReport, CompositionStatus,
    DiagnosticsMode,
};
pub use report::TeamInsights;
pub use roles::{compute_role_counts, RoleCounts};
pub use synergy::{find_mutual_synergies, MutualSynergy};
