//! Character and role definitions

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::trace;

/// Highest difficulty rating a character can carry
pub const MAX_DIFFICULTY: u8 = 3;

// ─────────────────────────────────────────────────────────────────
// Role
// ─────────────────────────────────────────────────────────────────

/// Team-function category of a character.
///
/// The wire names are the site's own (`VANGUARD`, `DUELIST`, `STRATEGIST`);
/// the generic names are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Frontline / tank.
    #[serde(rename = "VANGUARD", alias = "FRONTLINE")]
    Frontline,
    /// Damage dealer.
    #[serde(rename = "DUELIST", alias = "DAMAGE")]
    Damage,
    /// Healer / support.
    #[serde(rename = "STRATEGIST", alias = "SUPPORT")]
    Support,
}

impl Role {
    /// All roles in breakdown order.
    pub fn all() -> &'static [Role] {
        &[Role::Frontline, Role::Damage, Role::Support]
    }

    /// Name used on the wire.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Role::Frontline => "VANGUARD",
            Role::Damage => "DUELIST",
            Role::Support => "STRATEGIST",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Frontline => "Vanguard",
            Role::Damage => "Duelist",
            Role::Support => "Strategist",
        }
    }

    /// Plural label used by the role breakdown.
    pub fn plural_label(&self) -> &'static str {
        match self {
            Role::Frontline => "Vanguards",
            Role::Damage => "Duelists",
            Role::Support => "Strategists",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "VANGUARD" | "FRONTLINE" | "TANK" => Ok(Role::Frontline),
            "DUELIST" | "DAMAGE" | "DPS" => Ok(Role::Damage),
            "STRATEGIST" | "SUPPORT" | "HEALER" => Ok(Role::Support),
            _ => Err(format!(
                "Unknown role '{}'. Valid: VANGUARD, DUELIST, STRATEGIST",
                s
            )),
        }
    }
}

/// Unknown or malformed role strings count as a missing role.
fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = lenient(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Deserialize a field, turning a value of the wrong type into `None`.
///
/// One bad field must not take the rest of the record down with it.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            trace!(error = %e, "Ignoring malformed field");
            Ok(None)
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Character
// ─────────────────────────────────────────────────────────────────

/// A playable character as served by the backend.
///
/// Every field is optional on the wire; malformed records are kept and
/// simply contribute nothing to the fields they lack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Display name, unique across the site
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(deserialize_with = "lenient_role", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Difficulty rating, 1..=MAX_DIFFICULTY
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,

    /// Names this character declares synergy with (directional)
    #[serde(deserialize_with = "nullable_list")]
    pub synergies: Vec<String>,

    /// Wide banner artwork
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,

    /// Portrait artwork
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Legacy banner field
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,

    /// Legacy portrait field
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let list: Option<Vec<Value>> = lenient(deserializer)?;
    Ok(list
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            Value::String(name) => Some(name),
            _ => None,
        })
        .collect())
}

impl Character {
    /// Create a named character with a role and no other data
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: Some(name.into()),
            role: Some(role),
            ..Default::default()
        }
    }

    /// Builder-style synergy declaration
    pub fn with_synergies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synergies = names.into_iter().map(Into::into).collect();
        self
    }

    /// Name, if present and non-blank
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// Whether this character declares synergy with `other`
    pub fn declares_synergy_with(&self, other: &str) -> bool {
        self.synergies.iter().any(|s| s == other)
    }

    /// Difficulty clamped into the valid rating range
    pub fn difficulty_rating(&self) -> Option<u8> {
        self.difficulty
            .filter(|d| *d > 0)
            .map(|d| d.min(MAX_DIFFICULTY))
    }
}
