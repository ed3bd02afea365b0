//! Rivals Insights
//!
//! Client-side intelligence for a hero-shooter team builder:
//!
//! - [`analysis`]: role balance, mutual synergies and composition
//!   diagnostics for a roster of characters
//! - [`media`]: resolution of raw image references into absolute,
//!   CDN-optimized URLs
//!
//! Both are pure functions of their inputs. The remaining modules carry
//! the command-line surface (configuration, errors, logging).

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod types;
pub mod version;

pub use analysis::{CompositionReport, CompositionStatus, DiagnosticsMode, TeamInsights};
pub use config::InsightsConfig;
pub use error::{Error, Result};
pub use media::{ImageKind, MediaResolver};
pub use types::{Character, ResolveCharacter, Role, Roster, RosterEntry, RosterSlot};
