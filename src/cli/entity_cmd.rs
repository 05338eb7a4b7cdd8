//! Shared entity command infrastructure
//!
//! This module provides common patterns for show/edit/delete operations,
//! reducing boilerplate across the six entity command files.

use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::{discover_project, format_short_id};
use crate::cli::table::render_detail;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::access::{self, Action};
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::project::Project;
use crate::core::shortid;
use crate::core::Config;
use crate::grid::{ColumnDef, Row};
use crate::yaml::parse_yaml_file;

/// Static configuration for an entity type
pub struct EntityConfig {
    /// Entity prefix (e.g. `EntityPrefix::Cust`)
    pub prefix: EntityPrefix,
    /// Singular name for messages (e.g. "customer")
    pub name: &'static str,
    /// Plural name for messages and the view storage key (e.g. "customers")
    pub name_plural: &'static str,
}

/// Find one record by short ID, full/partial ID, or title substring
pub fn find_entity<E: Entity>(
    project: &Project,
    config: &EntityConfig,
    query: &str,
) -> Result<(E, PathBuf)> {
    let resolved = shortid::parse_entity_reference(query, project);
    let needle = resolved.to_lowercase();
    let mut matches: Vec<(E, PathBuf)> = Vec::new();

    for path in project.iter_entity_files(config.prefix) {
        let Ok(record) = parse_yaml_file::<E>(&path) else {
            continue;
        };
        let id_str = record.id().to_string();
        if id_str.starts_with(&resolved) || record.title().to_lowercase().contains(&needle) {
            matches.push((record, path));
        }
    }

    match matches.len() {
        0 => Err(miette::miette!(
            "No {} found matching '{}'",
            config.name,
            query
        )),
        1 => Ok(matches.remove(0)),
        _ => {
            println!("{} Multiple matches found:", style("!").yellow());
            for (record, _path) in &matches {
                println!(
                    "  {} - {}",
                    format_short_id(record.id()),
                    record.title()
                );
            }
            Err(miette::miette!(
                "Ambiguous query '{}'. Please be more specific.",
                query
            ))
        }
    }
}

/// Generic show command covering every output format
pub fn run_show_generic<E: Entity + Row + Serialize>(
    query: &str,
    config: &EntityConfig,
    columns: &[ColumnDef],
    global: &GlobalOpts,
) -> Result<()> {
    let project = discover_project()?;
    let (record, path) = find_entity::<E>(&project, config, query)?;

    match global.format {
        OutputFormat::Yaml => {
            let content = fs::read_to_string(&path).into_diagnostic()?;
            print!("{}", content);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&record).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Id => {
            println!("{}", record.id());
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {}",
                style("ID").bold(),
                style(record.id().to_string()).cyan()
            );
            print!("{}", render_detail(&record, columns));
            println!("{}", style("─".repeat(60)).dim());
            println!(
                "{}: {} | {}: {}",
                style("Author").dim(),
                record.author(),
                style("Created").dim(),
                record.created().format("%Y-%m-%d %H:%M")
            );
        }
    }

    Ok(())
}

/// Generic edit command: find the record file and open it in the editor
pub fn run_edit_generic<E: Entity>(query: &str, config: &EntityConfig) -> Result<()> {
    let project = discover_project()?;
    let cli_config = Config::load();
    let (_, path) = find_entity::<E>(&project, config, query)?;

    println!(
        "Opening {} in {}...",
        style(path.display()).cyan(),
        style(cli_config.editor()).yellow()
    );
    cli_config.run_editor(&path).into_diagnostic()?;

    Ok(())
}

/// Generic delete command with access check and confirmation
pub fn run_delete_generic<E: Entity>(
    query: &str,
    config: &EntityConfig,
    skip_confirm: bool,
) -> Result<()> {
    let project = discover_project()?;
    let cli_config = Config::load();

    let rules = access::load_rules(&project);
    let role = cli_config.role();
    if !access::can_perform(Action::Delete, config.name, &role, &rules) {
        return Err(miette::miette!(
            "role '{}' is not allowed to delete {} records",
            role,
            config.name
        ));
    }

    let (record, path) = find_entity::<E>(&project, config, query)?;

    if !skip_confirm {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete {} \"{}\"? This cannot be undone",
                config.name,
                record.title()
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    fs::remove_file(&path).into_diagnostic()?;
    println!(
        "{} Deleted {} {}",
        style("✓").green(),
        config.name,
        style(format_short_id(record.id())).cyan()
    );

    Ok(())
}

/// Print the confirmation block for a newly created record
pub fn output_created(
    id: &EntityId,
    file_path: &Path,
    title: &str,
    entity_name: &str,
    global: &GlobalOpts,
) {
    match global.format {
        OutputFormat::Id => {
            println!("{}", id);
        }
        _ => {
            println!(
                "{} Created {} {}",
                style("✓").green(),
                entity_name,
                style(format_short_id(id)).cyan()
            );
            println!("   {}", style(file_path.display()).dim());
            println!("   {}", style(title).yellow());
        }
    }
}
