//! Roster, roster slot and the character-resolution seam

use serde::{Deserialize, Deserializer, Serialize};

use super::character::{lenient, Character};

/// Maximum number of characters the team builder lets a user pick
pub const ROSTER_CAPACITY: usize = 6;

// ─────────────────────────────────────────────────────────────────
// Character Resolution
// ─────────────────────────────────────────────────────────────────

/// Anything that can stand in for a character in a roster.
///
/// Implemented for bare characters, roster slots and [`RosterEntry`], so
/// analyzer and resolver operations take either shape without probing
/// fields at the call site.
pub trait ResolveCharacter {
    /// The character this entry carries, if any
    fn character(&self) -> Option<&Character>;
}

impl ResolveCharacter for Character {
    fn character(&self) -> Option<&Character> {
        Some(self)
    }
}

impl<T: ResolveCharacter + ?Sized> ResolveCharacter for &T {
    fn character(&self) -> Option<&Character> {
        (**self).character()
    }
}

impl<T: ResolveCharacter> ResolveCharacter for Option<T> {
    fn character(&self) -> Option<&Character> {
        self.as_ref().and_then(ResolveCharacter::character)
    }
}

// ─────────────────────────────────────────────────────────────────
// Roster Slot
// ─────────────────────────────────────────────────────────────────

/// A positioned character within a saved roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSlot {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// 1-based display ordinal; not necessarily contiguous
    #[serde(default, deserialize_with = "lenient_position")]
    pub position: u32,

    /// Embedded character. The key is required so a slot can be told apart
    /// from a bare character; the value may be null when only referenced.
    #[serde(rename = "hero", alias = "character", deserialize_with = "nullable_character")]
    pub character: Option<Character>,
}

fn nullable_character<'de, D>(deserializer: D) -> Result<Option<Character>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient(deserializer)
}

fn lenient_position<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

impl RosterSlot {
    pub fn new(position: u32, character: Character) -> Self {
        Self {
            id: None,
            position,
            character: Some(character),
        }
    }
}

impl ResolveCharacter for RosterSlot {
    fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }
}

// ─────────────────────────────────────────────────────────────────
// Roster Entry
// ─────────────────────────────────────────────────────────────────

/// One roster entry: a slot wrapping a character, or a bare character.
///
/// Deserialization is the single normalization point. Objects with a
/// `hero`/`character` key become slots, everything else a bare character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RosterEntry {
    Slot(RosterSlot),
    Character(Character),
}

impl RosterEntry {
    /// Display position; bare characters sort first
    pub fn position(&self) -> u32 {
        match self {
            RosterEntry::Slot(slot) => slot.position,
            RosterEntry::Character(_) => 0,
        }
    }
}

impl ResolveCharacter for RosterEntry {
    fn character(&self) -> Option<&Character> {
        match self {
            RosterEntry::Slot(slot) => slot.character(),
            RosterEntry::Character(character) => Some(character),
        }
    }
}

impl From<Character> for RosterEntry {
    fn from(character: Character) -> Self {
        RosterEntry::Character(character)
    }
}

impl From<RosterSlot> for RosterEntry {
    fn from(slot: RosterSlot) -> Self {
        RosterEntry::Slot(slot)
    }
}

// ─────────────────────────────────────────────────────────────────
// Roster
// ─────────────────────────────────────────────────────────────────

/// A saved team roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roster {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(alias = "slots")]
    pub members: Vec<RosterEntry>,
}

impl Roster {
    /// Build an unnamed roster from entries
    pub fn from_entries<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<RosterEntry>,
    {
        Self {
            members: entries.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Members in canonical display order (stable sort by position)
    pub fn sorted_members(&self) -> Vec<&RosterEntry> {
        let mut members: Vec<&RosterEntry> = self.members.iter().collect();
        members.sort_by_key(|entry| entry.position());
        members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the roster holds more characters than `capacity` allows
    pub fn exceeds(&self, capacity: usize) -> bool {
        self.members.len() > capacity
    }
}
