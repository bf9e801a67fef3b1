pub mod color;
pub mod config;
pub mod palette;
pub mod preset;
pub mod theme;

use color_eyre::eyre::{bail, eyre, Result};
use palettehub_theme::{catalog, Color, Palette};

use crate::config::palettes_dir;

/// Resolve `palette_id` or an ad-hoc color list into a palette.
pub fn resolve_palette(palette_id: Option<&str>, colors: &[Color]) -> Result<Palette> {
    if !colors.is_empty() {
        return Ok(Palette::new(colors.to_vec()));
    }

    let Some(id) = palette_id else {
        bail!("Pass a palette id or --colors");
    };

    catalog::palette_by_id(id, Some(&palettes_dir()))
        .map(|p| p.palette())
        .ok_or_else(|| eyre!("Palette '{}' not found. See `palettehub palette list`.", id))
}
