//! Palette to theme role derivation.
//!
//! `derive_roles` is a pure function of the palette, the mode and an
//! `EngineConfig`. It picks background, foreground and accent roles out of
//! an arbitrary palette and fills in the derived border, muted and per-swatch
//! text colors. Publishing the result is the job of `crate::publish`.
//!
//! All luminance orderings use a stable sort, so colors with equal luminance
//! keep their palette order and the first occurrence wins.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::contrast::{best_text_color, contrast_ratio, mix_colors, readable_text_color, TextStyle};
use crate::contrast::AA_NORMAL;
use crate::types::{Color, ColorScheme, Mode};

/// Number of palette slots the engine reads.
pub const DEFAULT_SLOT_LIMIT: usize = 5;

const BORDER_MIX: f64 = 0.15;
const MUTED_MIX: f64 = 0.75;
/// Above this an accent is too pale to sit on a light background.
const PALE_ACCENT: f64 = 0.7;
/// Below this an accent is too deep to sit on a dark background.
const DEEP_ACCENT: f64 = 0.3;

/// How the foreground role is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForegroundStrategy {
    /// Highest-contrast palette color if it clears AA, black or white otherwise.
    #[default]
    PreferPalette,
    /// Always pure black or white.
    BlackOrWhite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub slot_limit: usize,
    pub foreground: ForegroundStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot_limit: DEFAULT_SLOT_LIMIT,
            foreground: ForegroundStrategy::PreferPalette,
        }
    }
}

/// Readable text colors for one palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwatchText {
    pub color: Color,
    pub text_high_contrast: Color,
    pub text_subtle: Color,
}

/// Immutable role assignment computed from a palette and a mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeRoleSet {
    pub mode: Mode,
    pub background: Color,
    pub darkest: Color,
    pub foreground: Color,
    pub accent: Color,
    pub accent_contrast: Color,
    pub border: Color,
    pub muted: Color,
    pub color_scheme: ColorScheme,
    pub swatches: Vec<SwatchText>,
}

impl ThemeRoleSet {
    /// `--surface` shares the background color.
    pub fn surface(&self) -> Color {
        self.background
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedTheme {
    /// Empty palette: nothing to publish.
    Inactive,
    Active(ThemeRoleSet),
}

impl DerivedTheme {
    pub fn roles(&self) -> Option<&ThemeRoleSet> {
        match self {
            DerivedTheme::Inactive => None,
            DerivedTheme::Active(roles) => Some(roles),
        }
    }

    pub fn into_roles(self) -> Option<ThemeRoleSet> {
        match self {
            DerivedTheme::Inactive => None,
            DerivedTheme::Active(roles) => Some(roles),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DerivedTheme::Active(_))
    }
}

pub fn derive_roles(colors: &[Color], mode: Mode, config: &EngineConfig) -> DerivedTheme {
    let cols = &colors[..colors.len().min(config.slot_limit)];
    if cols.is_empty() {
        debug!("empty palette, theme inactive");
        return DerivedTheme::Inactive;
    }

    let lightest_first = sorted_by_luminance(cols, Order::Descending);
    let darkest_first = sorted_by_luminance(cols, Order::Ascending);

    let background = lightest_first[0];
    let darkest = darkest_first[0];
    let foreground = pick_foreground(cols, background, config.foreground);
    let accent = pick_accent(cols, background, foreground, &darkest_first, &lightest_first);

    let swatches = cols
        .iter()
        .map(|&color| SwatchText {
            color,
            text_high_contrast: readable_text_color(color, TextStyle::HighContrast),
            text_subtle: readable_text_color(color, TextStyle::Subtle),
        })
        .collect();

    let color_scheme = if background.is_light() {
        ColorScheme::Light
    } else {
        ColorScheme::Dark
    };

    let roles = ThemeRoleSet {
        mode,
        background,
        darkest,
        foreground,
        accent,
        accent_contrast: best_text_color(accent),
        border: mix_colors(background, foreground, BORDER_MIX),
        muted: mix_colors(background, darkest, MUTED_MIX),
        color_scheme,
        swatches,
    };

    debug!(
        slots = cols.len(),
        %mode,
        background = %roles.background,
        foreground = %roles.foreground,
        accent = %roles.accent,
        "derived theme roles"
    );

    DerivedTheme::Active(roles)
}

#[derive(Clone, Copy)]
enum Order {
    Ascending,
    Descending,
}

fn sorted_by_luminance(cols: &[Color], order: Order) -> Vec<Color> {
    let mut keyed: Vec<(f64, Color)> = cols.iter().map(|&c| (c.luminance(), c)).collect();
    // sort_by is stable: equal luminance keeps palette order.
    match order {
        Order::Ascending => keyed.sort_by(|a, b| a.0.total_cmp(&b.0)),
        Order::Descending => keyed.sort_by(|a, b| b.0.total_cmp(&a.0)),
    }
    keyed.into_iter().map(|(_, c)| c).collect()
}

fn pick_foreground(cols: &[Color], background: Color, strategy: ForegroundStrategy) -> Color {
    if strategy == ForegroundStrategy::BlackOrWhite {
        return best_text_color(background);
    }

    let mut best: Option<(Color, f64)> = None;
    for &candidate in cols.iter().filter(|&&c| c != background) {
        let ratio = contrast_ratio(candidate, background);
        if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
            best = Some((candidate, ratio));
        }
    }

    match best {
        Some((color, ratio)) if ratio >= AA_NORMAL => color,
        _ => best_text_color(background),
    }
}

fn pick_accent(
    cols: &[Color],
    background: Color,
    foreground: Color,
    darkest_first: &[Color],
    lightest_first: &[Color],
) -> Color {
    let accent = cols
        .iter()
        .copied()
        .find(|&c| c != background && c != foreground)
        .unwrap_or(cols[2.min(cols.len() - 1)]);

    let is_other = |c: &&Color| **c != background && **c != foreground;
    let luminance = accent.luminance();

    if background.is_light() && luminance > PALE_ACCENT {
        if let Some(&deeper) = darkest_first
            .iter()
            .filter(is_other)
            .find(|c| c.luminance() < 0.5)
        {
            return deeper;
        }
    } else if !background.is_light() && luminance < DEEP_ACCENT {
        if let Some(&paler) = lightest_first
            .iter()
            .filter(is_other)
            .find(|c| c.luminance() > 0.5)
        {
            return paler;
        }
    }

    accent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    fn palette(colors: &[&str]) -> Vec<Color> {
        colors.iter().map(|c| hex(c)).collect()
    }

    fn derive(colors: &[&str], mode: Mode) -> ThemeRoleSet {
        derive_roles(&palette(colors), mode, &EngineConfig::default())
            .into_roles()
            .expect("palette is not empty")
    }

    #[test]
    fn test_empty_palette_is_inactive() {
        let derived = derive_roles(&[], Mode::Full, &EngineConfig::default());
        assert_eq!(derived, DerivedTheme::Inactive);
        assert!(derived.roles().is_none());
    }

    #[test]
    fn test_zero_slot_limit_is_inactive() {
        let config = EngineConfig {
            slot_limit: 0,
            ..EngineConfig::default()
        };
        assert!(!derive_roles(&[Color::WHITE], Mode::Full, &config).is_active());
    }

    #[test]
    fn test_white_grey_black() {
        let roles = derive(&["#FFFFFF", "#808080", "#000000"], Mode::Full);
        assert_eq!(roles.background, Color::WHITE);
        assert_eq!(roles.darkest, Color::BLACK);
        assert_eq!(roles.foreground, Color::BLACK);
        assert_eq!(roles.accent, hex("#808080"));
        assert_eq!(roles.accent_contrast, Color::BLACK);
        assert_eq!(roles.border, hex("#D9D9D9"));
        assert_eq!(roles.muted, hex("#404040"));
        assert_eq!(roles.color_scheme, ColorScheme::Light);
        assert_eq!(roles.surface(), Color::WHITE);
    }

    #[test]
    fn test_foreground_falls_back_when_no_palette_color_clears_aa() {
        let roles = derive(&["#FFFFFF", "#808080", "#999999"], Mode::Full);
        assert_eq!(roles.background, Color::WHITE);
        assert_eq!(roles.foreground, Color::BLACK);
        assert_eq!(roles.accent, hex("#808080"));
    }

    #[test]
    fn test_foreground_prefers_palette_color() {
        let roles = derive(&["#2D6A4F", "#95D5B2", "#B7E4C7", "#FFFFFF", "#1B4332"], Mode::Full);
        assert_eq!(roles.background, Color::WHITE);
        assert_eq!(roles.foreground, hex("#1B4332"));
        // First color that is neither background nor foreground.
        assert_eq!(roles.accent, hex("#2D6A4F"));
        assert_eq!(roles.darkest, hex("#1B4332"));
    }

    #[test]
    fn test_black_or_white_strategy() {
        let config = EngineConfig {
            foreground: ForegroundStrategy::BlackOrWhite,
            ..EngineConfig::default()
        };
        let colors = palette(&["#2D6A4F", "#95D5B2", "#B7E4C7", "#FFFFFF", "#1B4332"]);
        let roles = derive_roles(&colors, Mode::Full, &config).into_roles().unwrap();
        assert_eq!(roles.foreground, Color::BLACK);
    }

    #[test]
    fn test_luminance_ties_keep_palette_order() {
        // Duplicate lightest colors tie exactly; the first occurrence wins.
        let roles = derive(&["#A0A0A0", "#202020", "#A0A0A0"], Mode::Full);
        assert_eq!(roles.background, hex("#A0A0A0"));
        assert_eq!(roles.darkest, hex("#202020"));
    }

    #[test]
    fn test_pale_accent_on_light_background_is_replaced() {
        // Background #FFFFFF, foreground #000000 (palette). The first other
        // color #F0F0F0 is too pale; the darkest remaining candidate under 0.5
        // luminance takes its place.
        let roles = derive(&["#FFFFFF", "#F0F0F0", "#000000", "#336699", "#CC3333"], Mode::Full);
        assert_eq!(roles.foreground, Color::BLACK);
        assert_eq!(roles.accent, hex("#336699"));
    }

    #[test]
    fn test_pale_accent_kept_without_deeper_candidate() {
        let roles = derive(&["#FFFFFF", "#F5F5F5", "#EEEEEE"], Mode::Accent);
        assert_eq!(roles.foreground, Color::BLACK);
        assert_eq!(roles.accent, hex("#F5F5F5"));
        assert_eq!(roles.accent_contrast, Color::BLACK);
    }

    #[test]
    fn test_single_color_palette() {
        let roles = derive(&["#1B4332"], Mode::Full);
        assert_eq!(roles.background, hex("#1B4332"));
        assert_eq!(roles.darkest, hex("#1B4332"));
        assert_eq!(roles.foreground, Color::WHITE);
        // No other color exists, so the accent falls back to the only slot.
        assert_eq!(roles.accent, hex("#1B4332"));
        assert_eq!(roles.color_scheme, ColorScheme::Dark);
        assert_eq!(roles.swatches.len(), 1);
    }

    #[test]
    fn test_two_color_palette_accent_fallback_index() {
        // Both colors are taken by background and foreground.
        let roles = derive(&["#000000", "#FFFFFF"], Mode::Full);
        assert_eq!(roles.background, Color::WHITE);
        assert_eq!(roles.foreground, Color::BLACK);
        assert_eq!(roles.accent, Color::WHITE);
    }

    #[test]
    fn test_slot_limit_truncates_palette() {
        let colors = palette(&[
            "#111111", "#222222", "#333333", "#444444", "#555555", "#FFFFFF", "#EEEEEE",
        ]);
        let roles = derive_roles(&colors, Mode::Full, &EngineConfig::default())
            .into_roles()
            .unwrap();
        assert_eq!(roles.swatches.len(), DEFAULT_SLOT_LIMIT);
        // #FFFFFF sits in slot 6 and is ignored.
        assert_eq!(roles.background, hex("#555555"));

        let wide = EngineConfig {
            slot_limit: 8,
            ..EngineConfig::default()
        };
        let roles = derive_roles(&colors, Mode::Full, &wide).into_roles().unwrap();
        assert_eq!(roles.swatches.len(), 7);
        assert_eq!(roles.background, Color::WHITE);
    }

    #[test]
    fn test_swatch_text() {
        let roles = derive(&["#FFFFFF", "#000000"], Mode::Accent);
        assert_eq!(
            roles.swatches,
            vec![
                SwatchText {
                    color: Color::WHITE,
                    text_high_contrast: Color::BLACK,
                    text_subtle: hex("#4B5563"),
                },
                SwatchText {
                    color: Color::BLACK,
                    text_high_contrast: Color::WHITE,
                    text_subtle: hex("#9CA3AF"),
                },
            ]
        );
    }

    #[test]
    fn test_mode_does_not_change_roles() {
        let colors = ["#FF6B6B", "#FECA57", "#FF9F43", "#FFD93D", "#2ED573"];
        let full = derive(&colors, Mode::Full);
        let accent = derive(&colors, Mode::Accent);
        assert_eq!(full.accent, accent.accent);
        assert_eq!(full.background, accent.background);
        assert_eq!(full.mode, Mode::Full);
        assert_eq!(accent.mode, Mode::Accent);
    }
}
