//! Composition classification
//!
//! A priority-ordered rule cascade over role counts (first match wins),
//! followed by independent weakness rules. Every view shares this single
//! path; views that want the fuller roster-detail wording opt into
//! [`DiagnosticsMode::Extended`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::roles::RoleCounts;

// ─────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────

pub const MSG_NO_FRONTLINE: &str = "No frontline role! Team needs a tank.";
pub const MSG_NO_SUPPORT: &str = "No support role! Team needs a healer.";
pub const MSG_BALANCED: &str = "Balanced 2-2-2 composition!";
pub const MSG_WORKABLE: &str = "Workable composition.";

pub const WEAK_NO_FRONTLINE: &str = "No frontline protection";
pub const WEAK_NO_SUPPORT: &str = "No healing or support";
pub const WEAK_NO_DAMAGE: &str = "No damage role - Lacks damage output";
pub const WEAK_ONE_DAMAGE: &str = "Only 1 damage role - Poor damage output";
pub const WEAK_ONE_FRONTLINE: &str = "Only 1 frontline role - Consider adding another";
pub const WEAK_ONE_SUPPORT: &str = "Only 1 support role - May struggle with sustained healing";
pub const WEAK_TOO_MUCH_DAMAGE: &str = "Too many damage roles - May lack survivability";

pub const STRENGTH_BALANCED: &str = "Well-balanced team composition";
pub const STRENGTH_MIXED: &str = "Good mix of offense and defense";
pub const STRENGTH_ESSENTIALS: &str = "Has essential roles covered";

/// Damage count at which extended diagnostics flag an overloaded roster
const DAMAGE_OVERLOAD: usize = 4;

// ─────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────

/// Overall quality label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionStatus {
    Bad,
    Okay,
    Great,
}

impl fmt::Display for CompositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositionStatus::Bad => write!(f, "BAD"),
            CompositionStatus::Okay => write!(f, "OKAY"),
            CompositionStatus::Great => write!(f, "GREAT"),
        }
    }
}

/// Which weakness rules run after the cascade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsMode {
    /// Cascade weakness plus damage weaknesses
    #[default]
    Standard,
    /// Also flags a missing support behind a missing frontline, single
    /// frontline or support, and damage overload
    Extended,
}

impl DiagnosticsMode {
    pub fn from_flag(extended: bool) -> Self {
        if extended {
            DiagnosticsMode::Extended
        } else {
            DiagnosticsMode::Standard
        }
    }
}

/// Classification result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionReport {
    pub status: CompositionStatus,
    pub message: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl CompositionReport {
    fn new(status: CompositionStatus, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
        }
    }

    fn strength(mut self, text: &str) -> Self {
        self.strengths.push(text.to_string());
        self
    }

    fn weakness(mut self, text: &str) -> Self {
        self.weaknesses.push(text.to_string());
        self
    }

    fn weakness_if(self, condition: bool, text: &str) -> Self {
        if condition {
            self.weakness(text)
        } else {
            self
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────

/// Classify role counts with standard diagnostics
pub fn classify_composition(counts: &RoleCounts) -> CompositionReport {
    classify_composition_with(counts, DiagnosticsMode::Standard)
}

/// Classify role counts.
///
/// Cascade, first match wins:
/// 1. no frontline → BAD
/// 2. no support → BAD
/// 3. frontline ≥ 2, damage ≥ 2, support ≥ 1 → GREAT
/// 4. otherwise → OKAY
pub fn classify_composition_with(counts: &RoleCounts, mode: DiagnosticsMode) -> CompositionReport {
    let frontline = counts.frontline();
    let damage = counts.damage();
    let support = counts.support();
    let extended = mode == DiagnosticsMode::Extended;

    let report = if frontline == 0 {
        CompositionReport::new(CompositionStatus::Bad, MSG_NO_FRONTLINE).weakness(WEAK_NO_FRONTLINE)
    } else if support == 0 {
        CompositionReport::new(CompositionStatus::Bad, MSG_NO_SUPPORT).weakness(WEAK_NO_SUPPORT)
    } else if frontline >= 2 && damage >= 2 && support >= 1 {
        CompositionReport::new(CompositionStatus::Great, MSG_BALANCED)
            .strength(STRENGTH_BALANCED)
            .strength(STRENGTH_MIXED)
    } else {
        CompositionReport::new(CompositionStatus::Okay, MSG_WORKABLE).strength(STRENGTH_ESSENTIALS)
    };

    report
        .weakness_if(extended && frontline == 0 && support == 0, WEAK_NO_SUPPORT)
        .weakness_if(extended && frontline == 1, WEAK_ONE_FRONTLINE)
        .weakness_if(extended && support == 1, WEAK_ONE_SUPPORT)
        .weakness_if(damage == 0, WEAK_NO_DAMAGE)
        .weakness_if(damage == 1, WEAK_ONE_DAMAGE)
        .weakness_if(extended && damage >= DAMAGE_OVERLOAD, WEAK_TOO_MUCH_DAMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn counts(frontline: usize, damage: usize, support: usize) -> RoleCounts {
        std::iter::repeat(Role::Frontline)
            .take(frontline)
            .chain(std::iter::repeat(Role::Damage).take(damage))
            .chain(std::iter::repeat(Role::Support).take(support))
            .collect()
    }

    #[test]
    fn test_no_frontline_is_bad() {
        let report = classify_composition(&counts(0, 2, 1));
        assert_eq!(report.status, CompositionStatus::Bad);
        assert_eq!(report.message, MSG_NO_FRONTLINE);
        assert!(report.weaknesses.contains(&WEAK_NO_FRONTLINE.to_string()));
        assert!(report.strengths.is_empty());
    }

    #[test]
    fn test_no_support_is_bad() {
        let report = classify_composition(&counts(2, 2, 0));
        assert_eq!(report.status, CompositionStatus::Bad);
        assert_eq!(report.message, MSG_NO_SUPPORT);
        assert_eq!(report.weaknesses, vec![WEAK_NO_SUPPORT.to_string()]);
    }

    #[test]
    fn test_frontline_rule_wins_over_support_rule() {
        let report = classify_composition(&counts(0, 3, 0));
        assert_eq!(report.message, MSG_NO_FRONTLINE);
        assert!(!report.weaknesses.contains(&WEAK_NO_SUPPORT.to_string()));
    }

    #[test]
    fn test_balanced_is_great() {
        let report = classify_composition(&counts(2, 2, 1));
        assert_eq!(report.status, CompositionStatus::Great);
        assert_eq!(report.message, MSG_BALANCED);
        assert_eq!(report.strengths, vec![STRENGTH_BALANCED, STRENGTH_MIXED]);
        assert!(report.weaknesses.is_empty());
    }

    #[test]
    fn test_workable_is_okay() {
        let report = classify_composition(&counts(1, 1, 1));
        assert_eq!(report.status, CompositionStatus::Okay);
        assert_eq!(report.message, MSG_WORKABLE);
        assert_eq!(report.strengths, vec![STRENGTH_ESSENTIALS]);
        assert_eq!(report.weaknesses, vec![WEAK_ONE_DAMAGE]);
    }

    #[test]
    fn test_damage_weaknesses_exclusive() {
        let none = classify_composition(&counts(1, 0, 1));
        assert!(none.weaknesses.contains(&WEAK_NO_DAMAGE.to_string()));
        assert!(!none.weaknesses.contains(&WEAK_ONE_DAMAGE.to_string()));

        let two = classify_composition(&counts(1, 2, 1));
        assert!(two.weaknesses.is_empty());
    }

    #[test]
    fn test_empty_counts() {
        let report = classify_composition(&RoleCounts::default());
        assert_eq!(report.status, CompositionStatus::Bad);
        assert_eq!(report.weaknesses, vec![WEAK_NO_FRONTLINE, WEAK_NO_DAMAGE]);
    }

    #[test]
    fn test_extended_adds_single_role_warnings() {
        let report = classify_composition_with(&counts(1, 1, 1), DiagnosticsMode::Extended);
        assert_eq!(report.status, CompositionStatus::Okay);
        assert_eq!(
            report.weaknesses,
            vec![WEAK_ONE_FRONTLINE, WEAK_ONE_SUPPORT, WEAK_ONE_DAMAGE]
        );
    }

    #[test]
    fn test_extended_reports_both_missing_roles() {
        let report = classify_composition_with(&counts(0, 2, 0), DiagnosticsMode::Extended);
        assert_eq!(report.status, CompositionStatus::Bad);
        assert_eq!(report.message, MSG_NO_FRONTLINE);
        assert_eq!(report.weaknesses, vec![WEAK_NO_FRONTLINE, WEAK_NO_SUPPORT]);

        let standard = classify_composition(&counts(0, 2, 0));
        assert_eq!(standard.weaknesses, vec![WEAK_NO_FRONTLINE]);
    }

    #[test]
    fn test_extended_flags_damage_overload() {
        let standard = classify_composition(&counts(1, 4, 1));
        assert!(!standard.weaknesses.contains(&WEAK_TOO_MUCH_DAMAGE.to_string()));

        let extended = classify_composition_with(&counts(1, 4, 1), DiagnosticsMode::Extended);
        assert!(extended.weaknesses.contains(&WEAK_TOO_MUCH_DAMAGE.to_string()));
    }

    #[test]
    fn test_extended_does_not_change_status() {
        for (f, d, s) in [(0, 2, 1), (0, 2, 0), (2, 2, 0), (2, 2, 2), (1, 1, 1), (3, 4, 1)] {
            let standard = classify_composition(&counts(f, d, s));
            let extended = classify_composition_with(&counts(f, d, s), DiagnosticsMode::Extended);
            assert_eq!(standard.status, extended.status);
            assert_eq!(standard.message, extended.message);
            assert_eq!(standard.strengths, extended.strengths);
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&CompositionStatus::Great).unwrap(), "\"great\"");
        assert_eq!(CompositionStatus::Bad.to_string(), "BAD");
    }
}
