//! Truecolor terminal rendering of palettes and derived themes.

use std::io::{self, Write};

use color_eyre::eyre::Result;
use crossterm::queue;
use crossterm::style::{
    Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor, Stylize,
};
use palettehub_theme::{derive_roles, Color, Mode, Palette, ThemeRoleSet, ThemeState};

use crate::commands::{resolve_palette, theme};
use crate::config::UserConfig;

const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog";

fn term(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// ` #RRGGBB ` on `bg` in `fg`.
pub fn swatch(bg: Color, fg: Color) -> String {
    format!(" {} ", bg).with(term(fg)).on(term(bg)).to_string()
}

fn block<W: Write>(out: &mut W, bg: Color, fg: Color, text: &str) -> io::Result<()> {
    queue!(
        out,
        SetBackgroundColor(term(bg)),
        SetForegroundColor(term(fg)),
        Print(text),
        ResetColor
    )
}

pub fn render_swatches<W: Write>(out: &mut W, roles: &ThemeRoleSet) -> io::Result<()> {
    for swatch in &roles.swatches {
        block(out, swatch.color, swatch.text_high_contrast, &format!(" {} ", swatch.color))?;
    }
    queue!(out, Print("\n"))?;
    for swatch in &roles.swatches {
        block(out, swatch.color, swatch.text_subtle, &format!(" {:<7} ", "subtle"))?;
    }
    queue!(out, Print("\n"))
}

pub fn render_theme<W: Write>(out: &mut W, roles: &ThemeRoleSet) -> io::Result<()> {
    let width = SAMPLE_TEXT.len() + 4;
    let pad = |s: &str| format!("  {:<w$}  ", s, w = width - 4);

    block(out, roles.border, roles.foreground, &" ".repeat(width))?;
    queue!(out, Print("\n"))?;
    block(out, roles.background, roles.foreground, &pad(SAMPLE_TEXT))?;
    queue!(out, Print("\n"))?;
    block(out, roles.background, roles.muted, &pad("Muted secondary text"))?;
    queue!(out, Print("\n"))?;
    block(out, roles.background, roles.foreground, "  ")?;
    block(out, roles.accent, roles.accent_contrast, " Accent button ")?;
    block(out, roles.background, roles.foreground, &" ".repeat(width - 17))?;
    queue!(out, Print("\n"))?;
    block(out, roles.border, roles.foreground, &" ".repeat(width))?;
    queue!(out, Print("\n"))
}

pub fn render<W: Write>(out: &mut W, title: &str, roles: &ThemeRoleSet) -> io::Result<()> {
    queue!(
        out,
        Print(format!(
            "{} ({} mode, {} scheme)\n\n",
            title, roles.mode, roles.color_scheme
        ))
    )?;
    render_swatches(out, roles)?;
    queue!(out, Print("\n"))?;
    render_theme(out, roles)?;
    queue!(
        out,
        Print(format!(
            "\nbackground {}  foreground {}  accent {}  border {}  muted {}\n",
            roles.background, roles.foreground, roles.accent, roles.border, roles.muted
        ))
    )?;
    out.flush()
}

fn title(palette: &Palette) -> String {
    palette
        .name
        .clone()
        .or_else(|| palette.id.clone())
        .unwrap_or_else(|| "Custom palette".to_string())
}

pub fn run(
    config: &UserConfig,
    palette_id: Option<&str>,
    colors: &[Color],
    mode: Option<Mode>,
) -> Result<()> {
    let palette = if palette_id.is_none() && colors.is_empty() {
        let manager = theme::restored(config);
        match manager.state() {
            ThemeState::Applied { palette, .. } => palette.clone(),
            ThemeState::Inactive => {
                println!("No palette theme is applied. Pass a palette id or --colors.");
                return Ok(());
            }
        }
    } else {
        resolve_palette(palette_id, colors)?
    };

    let mode = mode.unwrap_or(Mode::Full);
    let Some(roles) = derive_roles(&palette.colors, mode, &config.engine_config()).into_roles()
    else {
        println!("Palette has no colors.");
        return Ok(());
    };

    let mut stdout = io::stdout().lock();
    render(&mut stdout, &title(&palette), &roles)?;
    Ok(())
}
