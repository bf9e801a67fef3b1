//! WCAG 2.1 luminance and contrast math.
//!
//! Luminance and contrast ratio follow the relative luminance definition from
//! WCAG 2.1. On top of them sit the helpers the theme engine needs: black or
//! white text selection, lightness search for a contrasting tint, linear
//! mixing and a pairwise palette report.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::types::{Color, Hsl};

pub const AA_NORMAL: f64 = 4.5;
pub const AA_LARGE: f64 = 3.0;
pub const AAA_NORMAL: f64 = 7.0;
pub const AAA_LARGE: f64 = 4.5;

/// Upper bound on lightness bisection steps in `generate_contrasting_color`.
const MAX_SEARCH_STEPS: u32 = 20;

const MEDIUM_ON_LIGHT: Color = Color::new(0x1f, 0x29, 0x37);
const MEDIUM_ON_DARK: Color = Color::new(0xe5, 0xe7, 0xeb);
const SUBTLE_ON_LIGHT: Color = Color::new(0x4b, 0x55, 0x63);
const SUBTLE_ON_DARK: Color = Color::new(0x9c, 0xa3, 0xaf);

impl Color {
    /// Convert sRGB channel to linear for luminance calculation.
    fn linearize(val: u8) -> f64 {
        let v = f64::from(val) / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }

    /// Calculate relative luminance (0.0 = black, 1.0 = white).
    pub fn luminance(&self) -> f64 {
        0.2126 * Self::linearize(self.r)
            + 0.7152 * Self::linearize(self.g)
            + 0.0722 * Self::linearize(self.b)
    }

    /// Calculate WCAG contrast ratio between two colors (1:1 to 21:1).
    pub fn contrast_ratio(&self, other: &Color) -> f64 {
        let l1 = self.luminance();
        let l2 = other.luminance();
        let lighter = l1.max(l2);
        let darker = l1.min(l2);
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Whether the color reads as a light surface (luminance above 0.5).
    pub fn is_light(&self) -> bool {
        self.luminance() > 0.5
    }
}

pub fn luminance(color: Color) -> f64 {
    color.luminance()
}

/// Symmetric in its arguments; 1.0 for identical colors, 21.0 for black on white.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    a.contrast_ratio(&b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WcagLevel {
    #[default]
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl WcagLevel {
    pub fn label(&self) -> &'static str {
        match self {
            WcagLevel::Aa => "AA",
            WcagLevel::Aaa => "AAA",
        }
    }
}

impl FromStr for WcagLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AA" => Ok(WcagLevel::Aa),
            "AAA" => Ok(WcagLevel::Aaa),
            other => Err(format!("unknown WCAG level '{}' (expected AA or AAA)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    #[default]
    Normal,
    Large,
}

impl TextSize {
    pub fn label(&self) -> &'static str {
        match self {
            TextSize::Normal => "normal",
            TextSize::Large => "large",
        }
    }
}

impl FromStr for TextSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(TextSize::Normal),
            "large" => Ok(TextSize::Large),
            other => Err(format!("unknown text size '{}' (expected normal or large)", other)),
        }
    }
}

/// Minimum contrast ratio for a level and text size.
pub fn contrast_threshold(level: WcagLevel, size: TextSize) -> f64 {
    match (level, size) {
        (WcagLevel::Aa, TextSize::Normal) => AA_NORMAL,
        (WcagLevel::Aa, TextSize::Large) => AA_LARGE,
        (WcagLevel::Aaa, TextSize::Normal) => AAA_NORMAL,
        (WcagLevel::Aaa, TextSize::Large) => AAA_LARGE,
    }
}

pub fn meets_contrast_standard(fg: Color, bg: Color, level: WcagLevel, size: TextSize) -> bool {
    contrast_ratio(fg, bg) >= contrast_threshold(level, size)
}

/// Grade bucket for a ratio against normal-size text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WcagGrade {
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "AA-large")]
    AaLarge,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl WcagGrade {
    pub fn label(&self) -> &'static str {
        match self {
            WcagGrade::Aaa => "AAA",
            WcagGrade::Aa => "AA",
            WcagGrade::AaLarge => "AA-large",
            WcagGrade::Fail => "FAIL",
        }
    }
}

impl fmt::Display for WcagGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

pub fn wcag_grade(ratio: f64) -> WcagGrade {
    if ratio >= AAA_NORMAL {
        WcagGrade::Aaa
    } else if ratio >= AA_NORMAL {
        WcagGrade::Aa
    } else if ratio >= AA_LARGE {
        WcagGrade::AaLarge
    } else {
        WcagGrade::Fail
    }
}

/// Pure black or pure white, whichever contrasts more with `bg`.
///
/// White wins only when its ratio is strictly greater; a tie yields black.
pub fn best_text_color(bg: Color) -> Color {
    let white = contrast_ratio(Color::WHITE, bg);
    let black = contrast_ratio(Color::BLACK, bg);
    if white > black {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightnessPreference {
    /// Go lighter on dark backgrounds and darker on light ones.
    #[default]
    Auto,
    Light,
    Dark,
}

impl FromStr for LightnessPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(LightnessPreference::Auto),
            "light" => Ok(LightnessPreference::Light),
            "dark" => Ok(LightnessPreference::Dark),
            other => Err(format!(
                "unknown lightness preference '{}' (expected auto, light or dark)",
                other
            )),
        }
    }
}

/// Find a tint of `bg` (same hue and saturation) that reaches `min_contrast`.
///
/// Lightness is bisected over `[0, 100]` for at most 20 steps, stopping once
/// the interval is no wider than one point. When no lightness reaches the
/// target the result is `best_text_color(bg)`.
pub fn generate_contrasting_color(
    bg: Color,
    min_contrast: f64,
    preference: LightnessPreference,
) -> Color {
    let Hsl { h, s, .. } = bg.to_hsl();
    let target_lighter = match preference {
        LightnessPreference::Light => true,
        LightnessPreference::Dark => false,
        LightnessPreference::Auto => bg.luminance() < 0.5,
    };

    let mut min_l = 0.0_f64;
    let mut max_l = 100.0_f64;
    let mut steps = 0;

    while steps < MAX_SEARCH_STEPS && max_l - min_l > 1.0 {
        let mid = (min_l + max_l) / 2.0;
        let candidate = Color::from_hsl(Hsl { h, s, l: mid });
        let passes = contrast_ratio(candidate, bg) >= min_contrast;

        match (passes, target_lighter) {
            (true, true) | (false, false) => max_l = mid,
            (true, false) | (false, true) => min_l = mid,
        }
        steps += 1;
    }

    let final_l = if target_lighter { max_l } else { min_l };
    let result = Color::from_hsl(Hsl { h, s, l: final_l });

    if contrast_ratio(result, bg) < min_contrast {
        return best_text_color(bg);
    }
    result
}

/// Per-channel linear interpolation: `ratio = 0` gives `a`, `ratio = 1` gives `b`.
pub fn mix_colors(a: Color, b: Color, ratio: f64) -> Color {
    let lerp = |x: u8, y: u8| f64::from(x) * (1.0 - ratio) + f64::from(y) * ratio;
    crate::convert::clamp_channels(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastPair {
    pub color1: Color,
    pub color2: Color,
    pub ratio: f64,
    pub grade: WcagGrade,
    pub meets_aa: bool,
    pub meets_aaa: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendedText {
    pub color: Color,
    pub text: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityReport {
    pub total_colors: usize,
    pub contrast_pairs: Vec<ContrastPair>,
    pub recommended_text_colors: Vec<RecommendedText>,
    /// Percentage (0-100) of pairs meeting AA for normal text.
    pub overall_score: u8,
}

impl AccessibilityReport {
    pub fn failing_pairs(&self) -> impl Iterator<Item = &ContrastPair> {
        self.contrast_pairs.iter().filter(|p| !p.meets_aa)
    }
}

/// Contrast every pair of palette positions `i < j` and score the palette.
///
/// Palettes with fewer than two colors have no pairs and score 0.
pub fn analyze_palette_accessibility(colors: &[Color]) -> AccessibilityReport {
    let mut contrast_pairs = Vec::new();
    for (i, &color1) in colors.iter().enumerate() {
        for &color2 in &colors[i + 1..] {
            let ratio = contrast_ratio(color1, color2);
            contrast_pairs.push(ContrastPair {
                color1,
                color2,
                ratio,
                grade: wcag_grade(ratio),
                meets_aa: ratio >= AA_NORMAL,
                meets_aaa: ratio >= AAA_NORMAL,
            });
        }
    }

    let recommended_text_colors = colors
        .iter()
        .map(|&color| RecommendedText {
            color,
            text: best_text_color(color),
        })
        .collect();

    let passing = contrast_pairs.iter().filter(|p| p.meets_aa).count();
    let overall_score = if contrast_pairs.is_empty() {
        0
    } else {
        ((passing as f64 / contrast_pairs.len() as f64) * 100.0).round() as u8
    };

    AccessibilityReport {
        total_colors: colors.len(),
        contrast_pairs,
        recommended_text_colors,
        overall_score,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    #[default]
    HighContrast,
    MediumContrast,
    Subtle,
}

impl FromStr for TextStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high-contrast" | "high" => Ok(TextStyle::HighContrast),
            "medium-contrast" | "medium" => Ok(TextStyle::MediumContrast),
            "subtle" => Ok(TextStyle::Subtle),
            other => Err(format!(
                "unknown text style '{}' (expected high-contrast, medium-contrast or subtle)",
                other
            )),
        }
    }
}

/// Text color for a swatch. Only `HighContrast` is computed; the other styles
/// are fixed gray pairs keyed off whether `bg` is light.
pub fn readable_text_color(bg: Color, style: TextStyle) -> Color {
    match style {
        TextStyle::HighContrast => best_text_color(bg),
        TextStyle::MediumContrast if bg.is_light() => MEDIUM_ON_LIGHT,
        TextStyle::MediumContrast => MEDIUM_ON_DARK,
        TextStyle::Subtle if bg.is_light() => SUBTLE_ON_LIGHT,
        TextStyle::Subtle => SUBTLE_ON_DARK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    #[test]
    fn test_luminance_bounds() {
        assert_eq!(luminance(Color::BLACK), 0.0);
        assert!((luminance(Color::WHITE) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_black_on_white_is_21() {
        assert!((contrast_ratio(Color::BLACK, Color::WHITE) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_contrast_with_self_is_one() {
        let c = hex("#FF9F43");
        assert!((contrast_ratio(c, c) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_grey_on_white_fails_aa() {
        let ratio = contrast_ratio(hex("#808080"), Color::WHITE);
        assert!(ratio > 3.9 && ratio < 4.0, "ratio was {ratio}");
        assert!(!meets_contrast_standard(
            hex("#808080"),
            Color::WHITE,
            WcagLevel::Aa,
            TextSize::Normal
        ));
        assert!(meets_contrast_standard(
            hex("#808080"),
            Color::WHITE,
            WcagLevel::Aa,
            TextSize::Large
        ));
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(contrast_threshold(WcagLevel::Aa, TextSize::Normal), 4.5);
        assert_eq!(contrast_threshold(WcagLevel::Aa, TextSize::Large), 3.0);
        assert_eq!(contrast_threshold(WcagLevel::Aaa, TextSize::Normal), 7.0);
        assert_eq!(contrast_threshold(WcagLevel::Aaa, TextSize::Large), 4.5);
    }

    #[test]
    fn test_wcag_grade_buckets() {
        assert_eq!(wcag_grade(21.0), WcagGrade::Aaa);
        assert_eq!(wcag_grade(7.0), WcagGrade::Aaa);
        assert_eq!(wcag_grade(4.5), WcagGrade::Aa);
        assert_eq!(wcag_grade(3.0), WcagGrade::AaLarge);
        assert_eq!(wcag_grade(2.99), WcagGrade::Fail);
    }

    #[test]
    fn test_best_text_color() {
        assert_eq!(best_text_color(Color::WHITE), Color::BLACK);
        assert_eq!(best_text_color(Color::BLACK), Color::WHITE);
        assert_eq!(best_text_color(hex("#1B4332")), Color::WHITE);
        assert_eq!(best_text_color(hex("#FECA57")), Color::BLACK);
    }

    #[test]
    fn test_best_text_color_tie_resolves_to_black() {
        // Equal contrast against black and white happens at luminance
        // sqrt(1.05 * 0.05) - 0.05 ~= 0.179. No 8-bit grey hits it exactly, so
        // check the decision boundary from both sides instead.
        let just_dark = Color::new(117, 117, 117);
        let just_light = Color::new(119, 119, 119);
        assert_eq!(best_text_color(just_dark), Color::WHITE);
        assert_eq!(best_text_color(just_light), Color::BLACK);
        for g in 0..=255u8 {
            let c = Color::new(g, g, g);
            let white = contrast_ratio(Color::WHITE, c);
            let black = contrast_ratio(Color::BLACK, c);
            if white <= black {
                assert_eq!(best_text_color(c), Color::BLACK);
            }
        }
    }

    #[test]
    fn test_generate_contrasting_color_on_dark_goes_lighter() {
        let bg = hex("#1B4332");
        let fg = generate_contrasting_color(bg, AA_NORMAL, LightnessPreference::Auto);
        assert!(contrast_ratio(fg, bg) >= AA_NORMAL);
        assert!(fg.luminance() > bg.luminance());
    }

    #[test]
    fn test_generate_contrasting_color_on_light_goes_darker() {
        let bg = hex("#ECEEDF");
        let fg = generate_contrasting_color(bg, AA_NORMAL, LightnessPreference::Auto);
        assert!(contrast_ratio(fg, bg) >= AA_NORMAL);
        assert!(fg.luminance() < bg.luminance());
    }

    #[test]
    fn test_generate_contrasting_color_falls_back_when_unreachable() {
        // Nothing lighter than white exists, so a "light" search on white can
        // never clear the target.
        let fg = generate_contrasting_color(Color::WHITE, AA_NORMAL, LightnessPreference::Light);
        assert_eq!(fg, best_text_color(Color::WHITE));

        let fg = generate_contrasting_color(hex("#777777"), 21.0, LightnessPreference::Auto);
        assert_eq!(fg, best_text_color(hex("#777777")));
    }

    #[test]
    fn test_mix_colors_endpoints_and_midpoint() {
        let a = hex("#FF6B6B");
        let b = hex("#2ED573");
        assert_eq!(mix_colors(a, b, 0.0), a);
        assert_eq!(mix_colors(a, b, 1.0), b);
        assert_eq!(mix_colors(Color::BLACK, Color::WHITE, 0.5), hex("#808080"));
    }

    #[test]
    fn test_mix_colors_border_ratio() {
        // 255 * 0.85 = 216.75 -> 217
        assert_eq!(mix_colors(Color::WHITE, Color::BLACK, 0.15), hex("#D9D9D9"));
    }

    #[test]
    fn test_analyze_palette_accessibility() {
        let colors = [Color::WHITE, hex("#808080"), Color::BLACK];
        let report = analyze_palette_accessibility(&colors);

        assert_eq!(report.total_colors, 3);
        assert_eq!(report.contrast_pairs.len(), 3);
        // white/grey fails, white/black passes, grey/black passes (~5.3)
        assert_eq!(report.failing_pairs().count(), 1);
        assert_eq!(report.overall_score, 67);
        assert_eq!(report.recommended_text_colors[0].text, Color::BLACK);
        assert_eq!(report.recommended_text_colors[2].text, Color::WHITE);
    }

    #[test]
    fn test_analyze_small_palettes_score_zero() {
        assert_eq!(analyze_palette_accessibility(&[]).overall_score, 0);
        let single = analyze_palette_accessibility(&[Color::WHITE]);
        assert_eq!(single.overall_score, 0);
        assert!(single.contrast_pairs.is_empty());
        assert_eq!(single.recommended_text_colors.len(), 1);
    }

    #[test]
    fn test_readable_text_color_literals() {
        assert_eq!(
            readable_text_color(Color::WHITE, TextStyle::MediumContrast),
            hex("#1f2937")
        );
        assert_eq!(
            readable_text_color(Color::BLACK, TextStyle::MediumContrast),
            hex("#e5e7eb")
        );
        assert_eq!(readable_text_color(Color::WHITE, TextStyle::Subtle), hex("#4b5563"));
        assert_eq!(readable_text_color(Color::BLACK, TextStyle::Subtle), hex("#9ca3af"));
        assert_eq!(
            readable_text_color(Color::BLACK, TextStyle::HighContrast),
            Color::WHITE
        );
    }

    #[test]
    fn test_text_style_parsing() {
        assert_eq!("subtle".parse::<TextStyle>(), Ok(TextStyle::Subtle));
        assert_eq!("High-Contrast".parse::<TextStyle>(), Ok(TextStyle::HighContrast));
        assert!("loud".parse::<TextStyle>().is_err());
        assert_eq!("aaa".parse::<WcagLevel>(), Ok(WcagLevel::Aaa));
        assert_eq!("dark".parse::<LightnessPreference>(), Ok(LightnessPreference::Dark));
    }
}
