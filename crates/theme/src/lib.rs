mod builtin;
pub mod catalog;
pub mod contrast;
pub mod convert;
pub mod derive;
pub mod preset;
pub mod publish;
pub mod store;
mod types;

pub use builtin::get_builtin_palettes;
pub use catalog::{all_palettes, load_palettes_from_dir, palette_by_id, NamedPalette};
pub use derive::{
    derive_roles, DerivedTheme, EngineConfig, ForegroundStrategy, SwatchText, ThemeRoleSet,
    DEFAULT_SLOT_LIMIT,
};
pub use preset::Preset;
pub use publish::{CssVariables, ThemeSink};
pub use store::{ActiveTheme, JsonFileStore, MemoryStore, ThemeManager, ThemePersistence, ThemeState};
pub use types::{Color, ColorScheme, Hsl, InvalidColor, Mode, Palette};

/// Derive roles for a palette and render the variables it would publish as CSS.
///
/// Returns `None` for an empty palette.
pub fn palette_css(palette: &Palette, mode: Mode, config: &EngineConfig) -> Option<String> {
    let roles = derive_roles(&palette.colors, mode, config).into_roles()?;
    let mut sink = CssVariables::new();
    publish::publish(&roles, &mut sink);
    Some(sink.to_css())
}
