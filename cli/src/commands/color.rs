use color_eyre::eyre::{ensure, Result};
use palettehub_theme::contrast::{
    analyze_palette_accessibility, best_text_color, contrast_ratio, contrast_threshold,
    generate_contrasting_color, mix_colors, readable_text_color, wcag_grade, AccessibilityReport,
    LightnessPreference, TextSize, TextStyle, WcagLevel, AA_NORMAL,
};
use palettehub_theme::Color;

use crate::preview::swatch;

fn pass_label(pass: bool) -> &'static str {
    if pass {
        "pass"
    } else {
        "FAIL"
    }
}

pub fn print_report(report: &AccessibilityReport, verbose: bool) {
    let failures: Vec<_> = report.failing_pairs().collect();
    let passes: Vec<_> = report.contrast_pairs.iter().filter(|p| p.meets_aa).collect();

    println!("{}", "=".repeat(60));
    println!("WCAG CONTRAST CHECK RESULTS");
    println!("Target: {}:1 (WCAG AA Normal Text)", AA_NORMAL);
    println!("{}", "=".repeat(60));

    if report.contrast_pairs.is_empty() {
        println!("\nNeed at least two colors to compare.");
    } else if failures.is_empty() {
        println!(
            "\n✅ All {} color pairs pass WCAG AA requirements!",
            report.contrast_pairs.len()
        );
    } else {
        println!("\n❌ FAILURES ({} issues)\n", failures.len());
        println!("{:<10} {:<10} {:>9} {:<10}", "Color", "Against", "Ratio", "Grade");
        println!("{}", "-".repeat(44));
        for p in &failures {
            println!(
                "{:<10} {:<10} {:>7.2}:1 {:<10}",
                p.color1, p.color2, p.ratio, p.grade
            );
        }
    }

    if verbose && !passes.is_empty() {
        println!("\n✅ PASSING ({} pairs)\n", passes.len());
        for p in &passes {
            println!(
                "{:<10} {:<10} {:>7.2}:1 {}",
                p.color1, p.color2, p.ratio, p.grade
            );
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("RECOMMENDED TEXT");
    println!("{}", "=".repeat(60));
    for rec in &report.recommended_text_colors {
        println!("{}  {} on {}", swatch(rec.color, rec.text), rec.text, rec.color);
    }

    println!(
        "\nOverall score: {}% of {} pairs pass AA ({} colors)",
        report.overall_score,
        report.contrast_pairs.len(),
        report.total_colors
    );
}

pub fn check(colors: &[Color], verbose: bool, strict: bool) -> Result<()> {
    let report = analyze_palette_accessibility(colors);
    print_report(&report, verbose);

    if strict && report.failing_pairs().next().is_some() {
        std::process::exit(1);
    }
    Ok(())
}

pub fn contrast(foreground: Color, background: Color) -> Result<()> {
    let ratio = contrast_ratio(foreground, background);
    println!("{}  {} on {}", swatch(background, foreground), foreground, background);
    println!("Contrast ratio: {:.2}:1 ({})", ratio, wcag_grade(ratio));
    println!();
    println!("{:<6} {:<8} {:>8} {:<6}", "Level", "Size", "Needs", "Result");
    println!("{}", "-".repeat(32));

    for level in [WcagLevel::Aa, WcagLevel::Aaa] {
        for size in [TextSize::Normal, TextSize::Large] {
            let needs = contrast_threshold(level, size);
            println!(
                "{:<6} {:<8} {:>6.1}:1 {:<6}",
                level.label(),
                size.label(),
                needs,
                pass_label(ratio >= needs)
            );
        }
    }
    Ok(())
}

pub fn text(background: Color, style: TextStyle) -> Result<()> {
    let text = readable_text_color(background, style);
    println!("{}  {}", swatch(background, text), text);
    Ok(())
}

pub fn generate(background: Color, min: f64, prefer: LightnessPreference) -> Result<()> {
    ensure!(
        (1.0..=21.0).contains(&min),
        "Contrast target must be between 1 and 21, got {}",
        min
    );

    let generated = generate_contrasting_color(background, min, prefer);
    let ratio = contrast_ratio(generated, background);
    println!("{}  {}", swatch(background, generated), generated);
    println!("Contrast ratio: {:.2}:1 ({})", ratio, wcag_grade(ratio));
    Ok(())
}

pub fn mix(first: Color, second: Color, ratio: f64) -> Result<()> {
    ensure!(
        (0.0..=1.0).contains(&ratio),
        "Mix ratio must be between 0 and 1, got {}",
        ratio
    );

    let mixed = mix_colors(first, second, ratio);
    println!("{}", swatch(mixed, best_text_color(mixed)));
    Ok(())
}

pub fn convert(color: Color) -> Result<()> {
    let hsl = color.to_hsl();
    println!("{}", swatch(color, best_text_color(color)));
    println!("hex        {}", color);
    println!("rgb        rgb({}, {}, {})", color.r, color.g, color.b);
    println!("hsl        hsl({:.0}, {:.0}%, {:.0}%)", hsl.h, hsl.s, hsl.l);
    println!("luminance  {:.4}", color.luminance());
    Ok(())
}
