//! Publishing derived roles as named styling variables.
//!
//! The engine never touches a rendering surface. A `ThemeSink` receives
//! variable names and `#RRGGBB` values; `CssVariables` is the in-memory sink
//! used by the CLI and the tests, other front ends implement the trait for
//! their own surface.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::derive::ThemeRoleSet;
use crate::types::{Color, ColorScheme, Mode};

pub const VAR_ACCENT: &str = "--accent";
pub const VAR_ACCENT_CONTRAST: &str = "--accent-contrast";
pub const VAR_BACKGROUND: &str = "--background";
pub const VAR_FOREGROUND: &str = "--foreground";
pub const VAR_SURFACE: &str = "--surface";
pub const VAR_BORDER: &str = "--border";
pub const VAR_MUTED: &str = "--muted";

/// Marker value while a full-mode theme is published.
pub const MARKER_FULL: &str = "true";
/// Marker value while an accent-mode theme is published.
pub const MARKER_ACCENT: &str = "accent";

/// A rendering surface that accepts styling variables.
pub trait ThemeSink {
    fn set_var(&mut self, name: &str, value: Color);
    fn remove_var(&mut self, name: &str);
    /// `None` hands the light/dark decision back to the environment.
    fn set_color_scheme(&mut self, scheme: Option<ColorScheme>);
    /// Records which kind of theme is active, `None` when nothing is.
    fn set_marker(&mut self, marker: Option<&str>);
    /// Named preset theme attribute, `None` for environment defaults.
    fn set_preset(&mut self, preset: Option<&str>);
}

pub fn palette_var(slot: usize) -> String {
    format!("--palette-{}", slot + 1)
}

pub fn palette_text_var(slot: usize) -> String {
    format!("--palette-{}-text", slot + 1)
}

pub fn palette_subtle_var(slot: usize) -> String {
    format!("--palette-{}-text-subtle", slot + 1)
}

/// The variables a role set publishes for its mode, in publication order.
pub fn theme_variables(roles: &ThemeRoleSet) -> Vec<(String, Color)> {
    let mut vars = vec![
        (VAR_ACCENT.to_string(), roles.accent),
        (VAR_ACCENT_CONTRAST.to_string(), roles.accent_contrast),
    ];

    if roles.mode == Mode::Full {
        vars.extend([
            (VAR_BACKGROUND.to_string(), roles.background),
            (VAR_FOREGROUND.to_string(), roles.foreground),
            (VAR_SURFACE.to_string(), roles.surface()),
            (VAR_BORDER.to_string(), roles.border),
            (VAR_MUTED.to_string(), roles.muted),
        ]);
    }

    for (slot, swatch) in roles.swatches.iter().enumerate() {
        vars.push((palette_var(slot), swatch.color));
        vars.push((palette_text_var(slot), swatch.text_high_contrast));
        vars.push((palette_subtle_var(slot), swatch.text_subtle));
    }

    vars
}

/// Push a role set into `sink`. Returns the names that were set so they can
/// be retracted later.
pub fn publish<S: ThemeSink + ?Sized>(roles: &ThemeRoleSet, sink: &mut S) -> Vec<String> {
    let vars = theme_variables(roles);
    for (name, value) in &vars {
        sink.set_var(name, *value);
    }

    match roles.mode {
        Mode::Full => {
            sink.set_color_scheme(Some(roles.color_scheme));
            sink.set_marker(Some(MARKER_FULL));
        }
        Mode::Accent => {
            sink.set_color_scheme(None);
            sink.set_marker(Some(MARKER_ACCENT));
        }
    }

    vars.into_iter().map(|(name, _)| name).collect()
}

/// Remove previously published names along with the marker and scheme.
pub fn retract<S: ThemeSink + ?Sized>(names: &[String], sink: &mut S) {
    for name in names {
        sink.remove_var(name);
    }
    sink.set_color_scheme(None);
    sink.set_marker(None);
}

/// In-memory sink that renders to a CSS `:root` block or JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CssVariables {
    pub vars: BTreeMap<String, Color>,
    pub color_scheme: Option<ColorScheme>,
    pub marker: Option<String>,
    pub preset: Option<String>,
}

impl CssVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.vars.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.color_scheme.is_none() && self.marker.is_none()
    }

    pub fn to_css(&self) -> String {
        let mut selector = String::from(":root");
        if let Some(ref preset) = self.preset {
            let _ = write!(selector, "[data-theme=\"{}\"]", preset);
        }
        if let Some(ref marker) = self.marker {
            let _ = write!(selector, "[data-theme-active=\"{}\"]", marker);
        }

        let mut css = format!("{} {{\n", selector);
        if let Some(scheme) = self.color_scheme {
            let _ = writeln!(css, "  color-scheme: {};", scheme);
        }
        for (name, value) in &self.vars {
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        css.push_str("}\n");
        css
    }
}

impl ThemeSink for CssVariables {
    fn set_var(&mut self, name: &str, value: Color) {
        self.vars.insert(name.to_string(), value);
    }

    fn remove_var(&mut self, name: &str) {
        self.vars.remove(name);
    }

    fn set_color_scheme(&mut self, scheme: Option<ColorScheme>) {
        self.color_scheme = scheme;
    }

    fn set_marker(&mut self, marker: Option<&str>) {
        self.marker = marker.map(str::to_string);
    }

    fn set_preset(&mut self, preset: Option<&str>) {
        self.preset = preset.map(str::to_string);
    }
}
