//! Named preset themes that exist independently of palette themes.
//!
//! A preset is just an identity the embedding environment knows how to
//! style. Clearing a palette theme falls back to the recorded preset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Follow the environment's own light/dark defaults.
    #[default]
    System,
    Ocean,
    Forest,
    Sunset,
    Grape,
    Slate,
    Latte,
    None,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::System,
        Preset::Ocean,
        Preset::Forest,
        Preset::Sunset,
        Preset::Grape,
        Preset::Slate,
        Preset::Latte,
        Preset::None,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Preset::System => "system",
            Preset::Ocean => "ocean",
            Preset::Forest => "forest",
            Preset::Sunset => "sunset",
            Preset::Grape => "grape",
            Preset::Slate => "slate",
            Preset::Latte => "latte",
            Preset::None => "none",
        }
    }

    /// Attribute value to publish, `None` when defaults apply.
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            Preset::System | Preset::None => None,
            other => Some(other.id()),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.id() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Preset::ALL.iter().map(Preset::id).collect();
                format!("unknown preset '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}
