use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque stable token the backend assigns to a whisper. Never minted or
/// interpreted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WhisperId(pub String);

impl WhisperId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Display for WhisperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Light {
    Flicker,
    Candle,
    Clouded,
    Spark,
    Radiant,
}

pub const DEFAULT_LIGHT_GLYPH: &str = "✨";

impl Light {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Light::Flicker),
            2 => Some(Light::Candle),
            3 => Some(Light::Clouded),
            4 => Some(Light::Spark),
            5 => Some(Light::Radiant),
            _ => None,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Light::Flicker | Light::Candle => "🕯️",
            Light::Clouded => "🌥️",
            Light::Spark => "✨",
            Light::Radiant => "🌟",
        }
    }
}

/// Display glyph for a raw light level as reported by the backend. Absent or
/// out-of-range levels fall back to the default glyph.
pub fn light_glyph(raw: Option<u8>) -> &'static str {
    raw.and_then(Light::from_raw)
        .map(Light::glyph)
        .unwrap_or(DEFAULT_LIGHT_GLYPH)
}
