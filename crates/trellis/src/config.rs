//! Runtime configuration for layout and drawing.

use serde::{Deserialize, Serialize};

use crate::{canvas::LineStyle, error::Result, geom::Expanse};

/// Tree-wide settings. Every field has a default, so a partial JSON document
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Clip content drawing to the visible part of the content area rather
    /// than to the whole viewport.
    pub clip_content_only: bool,
    /// Line style used when a border is enabled without an explicit style.
    pub default_border_style: LineStyle,
    /// Screen size used when no driver is attached.
    #[serde(with = "expanse_serde")]
    pub fallback_screen: Expanse,
    /// Debug aids.
    pub diagnostics: Diagnostics,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clip_content_only: false,
            default_border_style: LineStyle::Single,
            fallback_screen: Expanse::new(80, 25),
            diagnostics: Diagnostics::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from a JSON document.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize this configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Debug rendering switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnostics {
    /// When set, adornment thickness is painted with this glyph.
    pub thickness_fill: Option<char>,
}

/// Serde adapter for `Expanse`, which lives in a dependency-free crate.
mod expanse_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::geom::Expanse;

    /// Wire form of an expanse.
    #[derive(Serialize, Deserialize)]
    struct Wire {
        /// Width.
        w: u32,
        /// Height.
        h: u32,
    }

    /// Serialize an expanse as `{ "w": .., "h": .. }`.
    pub(super) fn serialize<S: Serializer>(e: &Expanse, s: S) -> Result<S::Ok, S::Error> {
        Wire { w: e.w, h: e.h }.serialize(s)
    }

    /// Deserialize an expanse from `{ "w": .., "h": .. }`.
    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Expanse, D::Error> {
        let wire = Wire::deserialize(d)?;
        Ok(Expanse::new(wire.w, wire.h))
    }
}
