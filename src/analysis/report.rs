//! Combined roster insights

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::composition::{classify_composition_with, CompositionReport, DiagnosticsMode};
use super::roles::{compute_role_counts, RoleCounts};
use super::synergy::{find_mutual_synergies, MutualSynergy};
use crate::types::ResolveCharacter;

/// Everything a view renders about a roster, computed in one pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInsights {
    pub role_counts: RoleCounts,
    pub synergies: Vec<MutualSynergy>,
    pub composition: CompositionReport,
}

impl TeamInsights {
    /// Analyze entries in the order given
    pub fn analyze<E: ResolveCharacter>(entries: &[E], mode: DiagnosticsMode) -> Self {
        let role_counts = compute_role_counts(entries);
        let synergies = find_mutual_synergies(entries);
        let composition = classify_composition_with(&role_counts, mode);

        debug!(
            entries = entries.len(),
            counted = role_counts.total(),
            synergies = synergies.len(),
            status = %composition.status,
            "Roster analyzed"
        );

        Self {
            role_counts,
            synergies,
            composition,
        }
    }

    /// First `limit` synergies, as the builder sidebar shows them
    pub fn synergy_preview(&self, limit: usize) -> &[MutualSynergy] {
        &self.synergies[..self.synergies.len().min(limit)]
    }
}
