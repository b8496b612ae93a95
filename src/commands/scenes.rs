//! Scene listing.

use anyhow::Result;
use serde::Serialize;

use vignette::catalog::SceneCatalog;
use vignette::cli::ScenesArgs;
use vignette::tui::theme::Theme;
use vignette::Config;

use super::{cli_theme, load_catalog};

/// One row of the JSON listing.
#[derive(Debug, Serialize)]
struct SceneEntry<'a> {
    index: usize,
    id: &'a str,
    title: &'a str,
    subtitle: &'a str,
    start_ms: u64,
    duration_ms: u64,
}

#[derive(Debug, Serialize)]
struct Listing<'a> {
    total_ms: u64,
    scenes: Vec<SceneEntry<'a>>,
}

/// Milliseconds as seconds with one decimal.
fn format_seconds(millis: u64) -> String {
    format!("{:.1}s", millis as f64 / 1000.0)
}

/// JSON listing of the catalog.
pub fn render_json(catalog: &SceneCatalog) -> Result<String> {
    let offsets = catalog.offsets();
    let listing = Listing {
        total_ms: catalog.total_duration_ms(),
        scenes: catalog
            .scenes()
            .iter()
            .enumerate()
            .map(|(index, scene)| SceneEntry {
                index,
                id: &scene.id,
                title: &scene.title,
                subtitle: &scene.subtitle,
                start_ms: offsets[index],
                duration_ms: scene.duration_ms,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&listing)?)
}

/// Plain table of the catalog.
pub fn render_table(catalog: &SceneCatalog, theme: &Theme) -> String {
    let id_width = catalog
        .scenes()
        .iter()
        .map(|s| s.id.chars().count())
        .max()
        .unwrap_or(0)
        .max(2);

    let mut out = String::new();
    let header = format!(
        "{:>2}  {:<id_width$}  {:>7}  {:>8}  {}",
        "#", "ID", "START", "DURATION", "TITLE"
    );
    out.push_str(&theme.accent_text(&header));
    out.push('\n');

    for (i, (scene, start)) in catalog.scenes().iter().zip(catalog.offsets()).enumerate() {
        out.push_str(&format!(
            "{:>2}  {:<id_width$}  {:>7}  {:>8}  {}\n",
            i + 1,
            scene.id,
            format_seconds(*start),
            format_seconds(scene.duration_ms),
            scene.title
        ));
    }

    let plural = if catalog.len() == 1 { "" } else { "s" };
    out.push_str(&theme.secondary_text(&format!(
        "Total: {} ({} scene{})",
        format_seconds(catalog.total_duration_ms()),
        catalog.len(),
        plural
    )));
    out.push('\n');
    out
}

/// List the catalog's scenes.
pub fn handle(args: &ScenesArgs, config: &Config) -> Result<()> {
    let catalog = load_catalog(&args.catalog, config)?;
    if args.json {
        println!("{}", render_json(&catalog)?);
    } else {
        print!("{}", render_table(&catalog, &cli_theme(config)));
    }
    Ok(())
}
