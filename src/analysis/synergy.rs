//! Mutual synergy detection

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Character, ResolveCharacter};

/// Two characters that each declare synergy with the other.
///
/// Names are kept in discovery order (roster order of the scan).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MutualSynergy {
    pub first: String,
    pub second: String,
}

impl MutualSynergy {
    /// Order-independent identity of the pair
    fn key(&self) -> (String, String) {
        if self.first <= self.second {
            (self.first.clone(), self.second.clone())
        } else {
            (self.second.clone(), self.first.clone())
        }
    }
}

impl fmt::Display for MutualSynergy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.first, self.second)
    }
}

/// Find every mutual synergy pair in a roster.
///
/// Pairs are reported once each, in the order the `(i, j)`, `i < j` scan
/// over roster order first meets them. Duplicate characters never pair
/// with themselves.
pub fn find_mutual_synergies<E: ResolveCharacter>(entries: &[E]) -> Vec<MutualSynergy> {
    let named: Vec<(&str, &Character)> = entries
        .iter()
        .filter_map(|entry| entry.character())
        .filter_map(|character| character.display_name().map(|name| (name, character)))
        .collect();

    let mut seen = HashSet::new();
    let mut synergies = Vec::new();

    for (i, (name_a, a)) in named.iter().enumerate() {
        for (name_b, b) in &named[i + 1..] {
            if name_a == name_b {
                continue;
            }
            if !(a.declares_synergy_with(name_b) && b.declares_synergy_with(name_a)) {
                continue;
            }

            let pair = MutualSynergy {
                first: name_a.to_string(),
                second: name_b.to_string(),
            };
            if seen.insert(pair.key()) {
                synergies.push(pair);
            }
        }
    }

    synergies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, RosterEntry, RosterSlot};

    fn hero(name: &str, synergies: &[&str]) -> Character {
        Character::new(name, Role::Damage).with_synergies(synergies.iter().copied())
    }

    #[test]
    fn test_mutual_pair_found_once() {
        let entries = vec![hero("Thor", &["Hela"]), hero("Hela", &["Thor"])];
        let synergies = find_mutual_synergies(&entries);
        assert_eq!(synergies.len(), 1);
        assert_eq!(synergies[0].to_string(), "Thor + Hela");
    }

    #[test]
    fn test_one_sided_declaration_ignored() {
        let entries = vec![hero("Thor", &["Hela"]), hero("Hela", &["Loki"])];
        assert!(find_mutual_synergies(&entries).is_empty());
    }

    #[test]
    fn test_empty_synergy_list_never_participates() {
        let entries = vec![hero("Thor", &["Hela"]), hero("Hela", &[])];
        assert!(find_mutual_synergies(&entries).is_empty());
    }

    #[test]
    fn test_duplicates_do_not_self_pair_or_repeat() {
        let entries = vec![
            hero("Thor", &["Thor", "Hela"]),
            hero("Hela", &["Thor"]),
            hero("Thor", &["Thor", "Hela"]),
        ];
        let synergies = find_mutual_synergies(&entries);
        assert_eq!(synergies.len(), 1);
        assert!(synergies.iter().all(|s| s.first != s.second));
    }

    #[test]
    fn test_discovery_order() {
        let entries = vec![
            hero("A", &["C"]),
            hero("B", &["C"]),
            hero("C", &["A", "B"]),
        ];
        let synergies: Vec<String> = find_mutual_synergies(&entries)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(synergies, vec!["A + C", "B + C"]);
    }

    #[test]
    fn test_nameless_and_unresolved_discarded() {
        let entries: Vec<RosterEntry> = vec![
            RosterSlot::default().into(),
            Character {
                synergies: vec!["Thor".into()],
                ..Default::default()
            }
            .into(),
            hero("Thor", &[""]).into(),
        ];
        assert!(find_mutual_synergies(&entries).is_empty());
    }
}
