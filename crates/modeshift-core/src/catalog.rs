//! Static catalog of accessibility modes.
//!
//! The catalog is validated once at construction and never changes afterwards.
//! Built-in modes:
//!
//! - **Recovery**: reduced movement or fatigue
//! - **Low Focus**: cognitive overload, ADHD, or anxiety
//! - **Eye Strain**: migraines or tired eyes
//! - **Voice-First**: hands-free interaction

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Stable identifier of a mode (e.g. "recovery", "eye-strain").
///
/// Ordering is lexicographic; batch operations process modes in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeId(String);

impl ModeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ModeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ModeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A named accessibility feature bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub id: ModeId,
    /// Human-readable display name.
    pub name: String,
    pub description: String,
    /// Feature labels, in display order.
    #[serde(default)]
    pub features: Vec<String>,
}

impl Mode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        features: &[&str],
    ) -> Self {
        Self {
            id: ModeId::new(id),
            name: name.into(),
            description: description.into(),
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Validated, immutable list of modes in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    modes: Vec<Mode>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists, empty ids and duplicate ids.
    pub fn new(modes: Vec<Mode>) -> Result<Self, ValidationError> {
        if modes.is_empty() {
            return Err(ValidationError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for (index, mode) in modes.iter().enumerate() {
            if mode.id.as_str().trim().is_empty() {
                return Err(ValidationError::EmptyModeId { index });
            }
            if !seen.insert(&mode.id) {
                return Err(ValidationError::DuplicateMode(mode.id.clone()));
            }
        }

        Ok(Self { modes })
    }

    /// The four modes shipped with the application.
    pub fn builtin() -> Self {
        Self {
            modes: builtin_modes(),
        }
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    pub fn get(&self, id: &ModeId) -> Option<&Mode> {
        self.modes.iter().find(|m| &m.id == id)
    }

    pub fn contains(&self, id: &ModeId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ModeId> {
        self.modes.iter().map(|m| &m.id)
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_modes() -> Vec<Mode> {
    vec![
        Mode::new(
            "recovery",
            "Recovery Mode",
            "For reduced movement or fatigue",
            &["Larger touch targets", "Voice navigation", "Simplified layouts"],
        ),
        Mode::new(
            "low-focus",
            "Low Focus Mode",
            "For cognitive overload, ADHD, or anxiety",
            &["Reduced clutter", "Step-by-step guidance", "Calm colors"],
        ),
        Mode::new(
            "eye-strain",
            "Eye Strain Mode",
            "For migraines or tired eyes",
            &["High contrast", "Reduced motion", "Larger fonts"],
        ),
        Mode::new(
            "voice-first",
            "Voice-First Mode",
            "Hands-free interaction",
            &["Voice commands", "Audio feedback", "Speech recognition"],
        ),
    ]
}
