//! Palette catalog: builtin palettes plus user palette files.
//!
//! A user palette is a TOML file in the palettes directory:
//!
//! ```toml
//! name = "Harbor Lights"
//! colors = ["#0B3954", "#087E8B", "#BFD7EA", "#FF5A5F", "#C81D25"]
//! tags = ["nautical"]        # optional
//! hubs = ["blue", "cool"]    # optional
//! ```
//!
//! The file stem becomes the palette id. The builtin catalog uses the same
//! table shape inside a `[[palettes]]` array and derives ids from the name
//! and colors.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::builtin::get_builtin_palettes;
use crate::types::{Color, InvalidColor, Palette};

/// Hub that every palette belongs to.
pub const HUB_ALL: &str = "all";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    #[error(transparent)]
    InvalidColor(#[from] InvalidColor),

    #[error("Palette '{0}' has no colors")]
    Empty(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPalette {
    pub id: String,
    pub name: String,
    pub colors: Vec<Color>,
    pub tags: Vec<String>,
    pub hubs: Vec<String>,
    pub is_builtin: bool,
}

impl NamedPalette {
    pub fn palette(&self) -> Palette {
        Palette::new(self.colors.clone()).with_identity(&self.id, &self.name)
    }

    pub fn in_hub(&self, hub: &str) -> bool {
        hub == HUB_ALL || self.hubs.iter().any(|h| h.eq_ignore_ascii_case(hub))
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Deserialize)]
struct PaletteFile {
    name: String,
    colors: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    hubs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    palettes: Vec<PaletteFile>,
}

fn convert_palette(
    id: Option<&str>,
    file: PaletteFile,
    is_builtin: bool,
) -> Result<NamedPalette, CatalogError> {
    let colors = Palette::parse(&file.colors)?.colors;
    let Some(&first) = colors.first() else {
        return Err(CatalogError::Empty(file.name));
    };

    let mut hubs = file.hubs;
    if hubs.is_empty() {
        hubs.push(color_family(first).to_string());
    }
    if !hubs.iter().any(|h| h == HUB_ALL) {
        hubs.push(HUB_ALL.to_string());
    }

    let id = match id {
        Some(id) => id.to_string(),
        None => palette_id(&file.name, &colors),
    };

    Ok(NamedPalette {
        id,
        name: file.name,
        colors,
        tags: file.tags,
        hubs,
        is_builtin,
    })
}

/// Parse a single palette file.
pub fn parse_palette_toml(
    id: &str,
    content: &str,
    is_builtin: bool,
) -> Result<NamedPalette, CatalogError> {
    let file: PaletteFile = toml::from_str(content)?;
    convert_palette(Some(id), file, is_builtin)
}

/// Parse a `[[palettes]]` catalog document.
pub fn parse_catalog_toml(content: &str, is_builtin: bool) -> Result<Vec<NamedPalette>, CatalogError> {
    let file: CatalogFile = toml::from_str(content)?;
    file.palettes
        .into_iter()
        .map(|p| convert_palette(None, p, is_builtin))
        .collect()
}

/// Load every `*.toml` palette in `dir`. Unreadable or invalid files are
/// skipped with a warning.
pub fn load_palettes_from_dir(dir: &Path) -> Vec<NamedPalette> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut palettes = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|e| e == "toml") {
                continue;
            }

            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            let parsed = fs::read_to_string(&path)
                .map_err(CatalogError::from)
                .and_then(|content| parse_palette_toml(&id, &content, false));

            match parsed {
                Ok(palette) => palettes.push(palette),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping palette file"),
            }
        }
    }

    palettes.sort_by(|a, b| a.id.cmp(&b.id));
    debug!(dir = %dir.display(), count = palettes.len(), "loaded user palettes");
    palettes
}

pub fn all_palettes(user_dir: Option<&Path>) -> Vec<NamedPalette> {
    let mut palettes = get_builtin_palettes();
    if let Some(dir) = user_dir {
        palettes.extend(load_palettes_from_dir(dir));
    }
    palettes
}

pub fn palette_by_id(id: &str, user_dir: Option<&Path>) -> Option<NamedPalette> {
    all_palettes(user_dir).into_iter().find(|p| p.id == id)
}

pub fn palettes_for_hub<'a>(hub: &str, palettes: &'a [NamedPalette]) -> Vec<&'a NamedPalette> {
    palettes.iter().filter(|p| p.in_hub(hub)).collect()
}

/// Case-insensitive substring match on name and tags.
pub fn search<'a>(query: &str, palettes: &'a [NamedPalette]) -> Vec<&'a NamedPalette> {
    palettes.iter().filter(|p| p.matches(query)).collect()
}

/// Slugified name followed by the lowercase hex digits of every color.
pub fn palette_id(name: &str, colors: &[Color]) -> String {
    let mut slug = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');

    let mut parts = vec![slug.to_string()];
    parts.extend(colors.iter().map(|c| c.to_hex()[1..].to_lowercase()));
    parts.retain(|p| !p.is_empty());
    parts.join("-")
}

/// Rough color family hub for a color, used when a palette names no hubs.
pub fn color_family(color: Color) -> &'static str {
    let hsl = color.to_hsl();
    if hsl.s < 10.0 {
        return if hsl.l < 15.0 {
            "black"
        } else if hsl.l > 90.0 {
            "white"
        } else {
            "grey"
        };
    }

    match hsl.h {
        h if !(20.0..340.0).contains(&h) => "red",
        h if h < 50.0 => "orange",
        h if h < 70.0 => "yellow",
        h if h < 170.0 => "green",
        h if h < 210.0 => "cyan",
        h if h < 260.0 => "blue",
        h if h < 290.0 => "purple",
        _ => "pink",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_palette_toml() {
        let content = r##"
name = "Harbor"
colors = ["#0b3954", "#087E8B"]
tags = ["nautical"]
"##;
        let palette = parse_palette_toml("harbor", content, false).unwrap();
        assert_eq!(palette.id, "harbor");
        assert_eq!(palette.colors[0], Color::new(0x0b, 0x39, 0x54));
        assert_eq!(palette.hubs, vec!["cyan", "all"]);
        assert!(!palette.is_builtin);
    }

    #[test]
    fn test_parse_palette_rejects_bad_color() {
        let content = r##"
name = "Broken"
colors = ["#0b3954", "teal"]
"##;
        let err = parse_palette_toml("broken", content, false).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidColor(ref c) if c.value == "teal"));
    }

    #[test]
    fn test_parse_palette_rejects_empty() {
        let err = parse_palette_toml("e", "name = \"E\"\ncolors = []\n", false).unwrap_err();
        assert!(matches!(err, CatalogError::Empty(_)));
    }

    #[test]
    fn test_parse_palette_rejects_invalid_toml() {
        let err = parse_palette_toml("x", "name = \"X\ncolors", false).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidToml(_)));
    }

    #[test]
    fn test_palette_id() {
        let colors = [Color::new(0xff, 0x6b, 0x6b), Color::new(0x2e, 0xd5, 0x73)];
        assert_eq!(palette_id("Sunset Dreams", &colors), "sunset-dreams-ff6b6b-2ed573");
        assert_eq!(palette_id("  Café & Co. ", &colors), "caf-co-ff6b6b-2ed573");
        assert_eq!(palette_id("", &colors), "ff6b6b-2ed573");
    }

    #[test]
    fn test_color_family() {
        assert_eq!(color_family(Color::new(255, 0, 0)), "red");
        assert_eq!(color_family(Color::new(255, 0, 40)), "red");
        assert_eq!(color_family(Color::new(255, 159, 67)), "orange");
        assert_eq!(color_family(Color::new(46, 213, 115)), "green");
        assert_eq!(color_family(Color::new(11, 57, 84)), "cyan");
        assert_eq!(color_family(Color::new(30, 102, 245)), "blue");
        assert_eq!(color_family(Color::new(123, 44, 191)), "purple");
        assert_eq!(color_family(Color::new(246, 1, 157)), "pink");
        assert_eq!(color_family(Color::new(128, 128, 128)), "grey");
        assert_eq!(color_family(Color::new(10, 10, 10)), "black");
        assert_eq!(color_family(Color::WHITE), "white");
    }

    #[test]
    fn test_hub_and_search() {
        let palettes = all_palettes(None);
        let green = palettes_for_hub("green", &palettes);
        assert!(green.iter().any(|p| p.name == "Calm Pastures"));
        assert_eq!(palettes_for_hub(HUB_ALL, &palettes).len(), palettes.len());

        let hits = search("WEDDING", &palettes);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Pastel Sky");
    }

    #[test]
    fn test_palette_by_id() {
        let found = palette_by_id("sunset-dreams-ff6b6b-feca57-ff9f43-ffd93d-2ed573", None);
        let palette = found.unwrap().palette();
        assert_eq!(palette.name.as_deref(), Some("Sunset Dreams"));
        assert_eq!(palette.len(), 5);
        assert!(palette_by_id("nope", None).is_none());
    }
}
