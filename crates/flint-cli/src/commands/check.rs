//! Catalog validation command

use anyhow::{Context, Result};
use flint_buff::{BuffCatalog, BuffDefinition, ModeDefinition};
use std::path::Path;

pub fn run(catalog_path: &str) -> Result<()> {
    if !Path::new(catalog_path).exists() {
        anyhow::bail!("Catalog not found: {}", catalog_path);
    }

    let catalog = BuffCatalog::load_from_file(catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path))?;

    if catalog.is_empty() {
        println!("No buff definitions found in {}", catalog_path);
        return Ok(());
    }

    for definition in catalog.iter() {
        print_definition(definition);
    }
    println!();
    println!("OK: {} buff definition(s)", catalog.len());
    Ok(())
}

fn print_definition(definition: &BuffDefinition) {
    println!(
        "{}  duration={}s priority={} time_scale={}",
        definition.name, definition.duration, definition.priority, definition.time_scale
    );
    if !definition.tags.is_empty() {
        println!("  tags: {}", definition.tags.join(", "));
    }
    for executer in &definition.executers {
        println!(
            "  [{}] {}",
            format_mode(executer.mode),
            executer.effects.join(", ")
        );
    }
}

pub fn format_mode(mode: ModeDefinition) -> String {
    match mode {
        ModeDefinition::Continuity => "once".to_string(),
        ModeDefinition::Periodic { interval } => format!("every {}s", interval),
        ModeDefinition::Limited { count } => format!("{}x", count),
    }
}
