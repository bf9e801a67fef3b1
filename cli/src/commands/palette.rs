use color_eyre::eyre::{eyre, Result};
use palettehub_theme::catalog::{self, NamedPalette};
use palettehub_theme::contrast::{analyze_palette_accessibility, best_text_color};
use palettehub_theme::{derive_roles, Mode};

use crate::cli::PaletteCommands;
use crate::commands::color::print_report;
use crate::config::{palettes_dir, UserConfig};
use crate::preview;

pub fn run(config: &UserConfig, command: Option<PaletteCommands>) -> Result<()> {
    let cmd = command.unwrap_or(PaletteCommands::List {
        hub: None,
        search: None,
        builtin: false,
        user: false,
    });

    match cmd {
        PaletteCommands::List {
            hub,
            search,
            builtin,
            user,
        } => list(hub.as_deref(), search.as_deref(), builtin, user),
        PaletteCommands::Show { id } => show(config, &id),
        PaletteCommands::Path => {
            println!("{}", palettes_dir().display());
            Ok(())
        }
    }
}

fn list(hub: Option<&str>, search: Option<&str>, builtin: bool, user: bool) -> Result<()> {
    let dir = palettes_dir();
    let palettes = if builtin {
        palettehub_theme::get_builtin_palettes()
    } else if user {
        catalog::load_palettes_from_dir(&dir)
    } else {
        catalog::all_palettes(Some(&dir))
    };

    let mut selected: Vec<&NamedPalette> = palettes.iter().collect();
    if let Some(hub) = hub {
        selected.retain(|p| p.in_hub(hub));
    }
    if let Some(query) = search {
        let hits = catalog::search(query, &palettes);
        selected.retain(|p| hits.iter().any(|h| h.id == p.id));
    }

    if selected.is_empty() {
        println!("No palettes found.");
        if user {
            println!("Add palette files to: {}", dir.display());
        }
        return Ok(());
    }

    println!("{:<20} {:<8} {}", "Name", "Source", "Colors");
    println!("{}", "-".repeat(70));
    for palette in &selected {
        let source = if palette.is_builtin { "builtin" } else { "user" };
        let colors: String = palette
            .colors
            .iter()
            .map(|&c| preview::swatch(c, best_text_color(c)))
            .collect();
        println!("{:<20} {:<8} {}", palette.name, source, colors);
        println!("  id: {}", palette.id);
    }
    println!("\n{} palettes", selected.len());

    Ok(())
}

fn show(config: &UserConfig, id: &str) -> Result<()> {
    let palette = catalog::palette_by_id(id, Some(&palettes_dir()))
        .ok_or_else(|| eyre!("Palette '{}' not found. See `palettehub palette list`.", id))?;

    println!("{} ({})", palette.name, palette.id);
    if !palette.tags.is_empty() {
        println!("tags: {}", palette.tags.join(", "));
    }
    println!("hubs: {}", palette.hubs.join(", "));
    println!();

    if let Some(roles) =
        derive_roles(&palette.colors, Mode::Full, &config.engine_config()).into_roles()
    {
        let mut stdout = std::io::stdout().lock();
        preview::render(&mut stdout, &palette.name, &roles)?;
        println!();
    }

    print_report(&analyze_palette_accessibility(&palette.colors), false);
    Ok(())
}
