mod palette;

pub use palette::PaletteCommands;

use clap::{Parser, Subcommand, ValueEnum};
use palettehub_theme::contrast::{LightnessPreference, TextStyle};
use palettehub_theme::{Color, Mode, Preset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Css,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply a palette as the active theme
    #[command(alias = "a")]
    Apply {
        /// Palette id from `palettehub palette list`
        #[arg(required_unless_present = "colors")]
        palette: Option<String>,

        /// Apply an ad-hoc palette instead of a catalog id
        #[arg(short, long, num_args = 1.., conflicts_with = "palette")]
        colors: Vec<Color>,

        /// Theme mode (full, accent); defaults to the configured mode
        #[arg(short, long)]
        mode: Option<Mode>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Css)]
        format: OutputFormat,
    },

    /// Switch the active theme between full and accent mode
    Mode {
        /// Mode to switch to; toggles when omitted
        mode: Option<Mode>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Css)]
        format: OutputFormat,
    },

    /// Clear the active theme
    #[command(alias = "reset")]
    Clear,

    /// Show the active theme's published variables (default)
    #[command(alias = "s")]
    Show {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Css)]
        format: OutputFormat,
    },

    /// Render palette swatches and a sample theme in the terminal
    #[command(alias = "p")]
    Preview {
        /// Palette id; previews the active theme when omitted
        palette: Option<String>,

        #[arg(short, long, num_args = 1.., conflicts_with = "palette")]
        colors: Vec<Color>,

        #[arg(short, long)]
        mode: Option<Mode>,
    },

    /// Browse the palette catalog
    #[command(alias = "palettes")]
    Palette {
        #[command(subcommand)]
        command: Option<PaletteCommands>,
    },

    /// Check a set of colors for WCAG contrast issues
    #[command(alias = "c")]
    Check {
        #[arg(required = true)]
        colors: Vec<Color>,

        /// Show passing pairs too
        #[arg(short, long)]
        verbose: bool,

        /// Exit with status 1 when any pair fails AA
        #[arg(long)]
        strict: bool,
    },

    /// Contrast ratio and WCAG grade for a text/background pair
    Contrast { foreground: Color, background: Color },

    /// Readable text color for a background
    Text {
        background: Color,

        /// high-contrast, medium-contrast or subtle
        #[arg(short, long, default_value = "high-contrast")]
        style: TextStyle,
    },

    /// Generate a tint of a background that reaches a contrast target
    #[command(alias = "gen")]
    Generate {
        background: Color,

        /// Minimum contrast ratio
        #[arg(long, default_value_t = 4.5)]
        min: f64,

        /// Lightness direction (auto, light, dark)
        #[arg(short, long, default_value = "auto")]
        prefer: LightnessPreference,
    },

    /// Linearly mix two colors (0 = first, 1 = second)
    Mix { first: Color, second: Color, ratio: f64 },

    /// Print RGB, HSL and luminance for a color
    Convert { color: Color },

    /// Show or set the preset theme used when no palette is applied
    Preset { name: Option<Preset> },

    /// Show or edit configuration
    Config {
        /// Print config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(short, long)]
        edit: bool,
    },
}

/// Derive accessible themes from color palettes
#[derive(Debug, Parser)]
#[command(name = "palettehub", version, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}
