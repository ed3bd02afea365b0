//! Role distribution

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::types::{ResolveCharacter, Role};

/// Count of characters per role.
///
/// Only roles seen at least once are stored; [`RoleCounts::get`] reports
/// zero for the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCounts(BTreeMap<Role, usize>);

impl RoleCounts {
    /// Count for a role, zero when absent
    pub fn get(&self, role: Role) -> usize {
        self.0.get(&role).copied().unwrap_or(0)
    }

    /// Add one character of `role`
    pub fn record(&mut self, role: Role) {
        *self.0.entry(role).or_insert(0) += 1;
    }

    /// Number of characters counted
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Roles present, in breakdown order
    pub fn iter(&self) -> impl Iterator<Item = (Role, usize)> + '_ {
        self.0.iter().map(|(role, count)| (*role, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn frontline(&self) -> usize {
        self.get(Role::Frontline)
    }

    pub fn damage(&self) -> usize {
        self.get(Role::Damage)
    }

    pub fn support(&self) -> usize {
        self.get(Role::Support)
    }
}

impl FromIterator<Role> for RoleCounts {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut counts = RoleCounts::default();
        for role in iter {
            counts.record(role);
        }
        counts
    }
}

/// Count roles across a roster.
///
/// Entries without a character or without a role are skipped.
pub fn compute_role_counts<E: ResolveCharacter>(entries: &[E]) -> RoleCounts {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let role = entry.character().and_then(|c| c.role);
            if role.is_none() {
                trace!(index, "Skipping roster entry without a role");
            }
            role
        })
        .collect()
}
