mod cli;
mod commands;
mod config;
mod logging;
mod preview;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands, OutputFormat};
use config::{ensure_dirs, LogLevel, UserConfig};

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = ensure_dirs();

    let cli = Cli::parse();
    let config = UserConfig::load();
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);
    let _guard = logging::init(config.log_level, config.log_to_file, log_level_override);

    match cli.command {
        Some(Commands::Apply {
            palette,
            colors,
            mode,
            format,
        }) => commands::theme::apply(&config, palette.as_deref(), &colors, mode, format),
        Some(Commands::Mode { mode, format }) => commands::theme::set_mode(&config, mode, format),
        Some(Commands::Clear) => commands::theme::clear(&config),
        Some(Commands::Show { format }) => commands::theme::show(&config, format),
        Some(Commands::Preview {
            palette,
            colors,
            mode,
        }) => preview::run(&config, palette.as_deref(), &colors, mode),
        Some(Commands::Palette { command }) => commands::palette::run(&config, command),
        Some(Commands::Check {
            colors,
            verbose,
            strict,
        }) => commands::color::check(&colors, verbose, strict),
        Some(Commands::Contrast {
            foreground,
            background,
        }) => commands::color::contrast(foreground, background),
        Some(Commands::Text { background, style }) => commands::color::text(background, style),
        Some(Commands::Generate {
            background,
            min,
            prefer,
        }) => commands::color::generate(background, min, prefer),
        Some(Commands::Mix {
            first,
            second,
            ratio,
        }) => commands::color::mix(first, second, ratio),
        Some(Commands::Convert { color }) => commands::color::convert(color),
        Some(Commands::Preset { name }) => commands::preset::run(config, name),
        Some(Commands::Config { path, reset, edit }) => commands::config::run(path, reset, edit),
        None => commands::theme::show(&config, OutputFormat::Css),
    }
}
