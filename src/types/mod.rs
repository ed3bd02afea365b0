//! Type definitions for roster insights
//!
//! Characters, roster slots and rosters as they arrive from the REST
//! backend, plus the [`ResolveCharacter`] seam that lets every analyzer and
//! resolver operation accept either a bare character or a slot wrapping one.

mod character;
mod roster;

pub use character::*;
pub use roster::*;
