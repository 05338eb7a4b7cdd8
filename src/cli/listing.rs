//! Shared list-command infrastructure
//!
//! Every entity `list` command builds a grid view with its own columns and
//! filter flags, then hands off here. The view owns search, filtering,
//! sorting, pagination and column visibility; this module only wires CLI
//! flags to view actions and prints the result.

use std::time::Duration;

use chrono::Utc;
use clap::Args;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::entity_cmd::EntityConfig;
use crate::cli::helpers::{discover_project, escape_csv};
use crate::cli::output::effective_format;
use crate::cli::table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Entity;
use crate::core::loader;
use crate::core::project::Project;
use crate::core::shortid::ShortIdIndex;
use crate::core::Config;
use crate::grid::{
    ColumnDef, ColumnLayout, Filter, FilterSet, ListView, MemoryStore, PrefsStore, Row, SortSpec,
    SqliteStore, ViewConfig,
};

/// List options shared by every entity
#[derive(Args, Debug)]
pub struct CommonListArgs {
    /// Search in the entity's text fields (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

    /// Records created in the last N days
    #[arg(long, value_name = "DAYS")]
    pub recent: Option<u32>,

    /// Columns to display (comma separated; the choice is remembered)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Sort by field
    #[arg(long)]
    pub sort: Option<String>,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Page to display (table output)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Show count only, not the records
    #[arg(long)]
    pub count: bool,
}

/// Open the project's durable preference store, degrading to in-memory
pub fn open_prefs_store(project: &Project) -> Box<dyn PrefsStore> {
    match SqliteStore::open(project) {
        Ok(store) => Box::new(store),
        Err(e) => {
            eprintln!(
                "{} {} (column preferences will not persist)",
                style("!").yellow(),
                e
            );
            Box::new(MemoryStore::new())
        }
    }
}

/// Load all records of a type, warning about unparsable files
pub fn load_records<E: Entity>(project: &Project) -> Vec<E> {
    let (records, failures) = loader::load_all::<E>(project);
    for (path, e) in failures {
        eprintln!(
            "{} Failed to parse {}: {}",
            style("!").yellow(),
            path.display(),
            e
        );
    }
    records
}

/// Build a list view over all records of a type, restoring column prefs
pub fn build_view<E: Entity + Row>(
    project: &Project,
    config: &EntityConfig,
    columns: Vec<ColumnDef>,
    search_fields: &[&str],
) -> ListView<E> {
    let records = load_records::<E>(project);
    let store = open_prefs_store(project);
    let layout = ColumnLayout::new(columns, config.name_plural, store);

    ListView::new(
        records,
        layout,
        ViewConfig {
            search_fields: search_fields.iter().map(|s| s.to_string()).collect(),
            default_sort: None,
            page_size: Config::load().page_size(),
            debounce: Duration::from_millis(300),
        },
    )
}

/// Run a list command: apply flags to the view, then print it
pub fn run_list<E: Entity + Row + Serialize>(
    config: &EntityConfig,
    columns: Vec<ColumnDef>,
    search_fields: &[&str],
    mut filters: FilterSet,
    args: &CommonListArgs,
    global: &GlobalOpts,
) -> Result<()> {
    let project = discover_project()?;
    let mut view = build_view::<E>(&project, config, columns, search_fields);

    if let Some(days) = args.recent {
        filters.set(
            "created",
            Filter::DateRange {
                from: Some(Utc::now() - chrono::Duration::days(days as i64)),
                to: None,
            },
        );
    }
    if !filters.is_empty() {
        view.set_filters(filters);
    }
    if let Some(search) = &args.search {
        view.set_search(search.clone());
    }

    match (&args.sort, args.reverse) {
        (Some(field), false) => view.set_sort(Some(SortSpec::asc(field))),
        (Some(field), true) => view.set_sort(Some(SortSpec::desc(field))),
        (None, true) => view.set_sort(Some(SortSpec::desc("created"))),
        (None, false) => {}
    }

    if !args.columns.is_empty() {
        if let Err(e) = view.columns_mut().set_visible(args.columns.clone()) {
            eprintln!("{} {}", style("!").yellow(), e);
        }
    }
    if let Some(size) = args.page_size {
        view.set_page_size(size);
    }
    view.set_page(args.page);

    if args.count {
        println!("{}", view.result_count());
        return Ok(());
    }
    if view.result_count() == 0 {
        println!("No {} found.", config.name_plural);
        return Ok(());
    }

    refresh_short_ids(&project, &view);
    print_view(config, &view, global)
}

/// Re-assign short-id aliases over the current result order
fn refresh_short_ids<E: Entity + Row>(project: &Project, view: &ListView<E>) {
    let mut index = ShortIdIndex::load(project);
    for &i in view.processed() {
        index.record(view.rows()[i].id());
    }
    if let Err(e) = index.save(project) {
        eprintln!(
            "{} Failed to save short-id index: {}",
            style("!").yellow(),
            e
        );
    }
}

fn print_view<E: Entity + Row + Serialize>(
    config: &EntityConfig,
    view: &ListView<E>,
    global: &GlobalOpts,
) -> Result<()> {
    // Structured formats get the whole result set; tables are paginated
    let results: Vec<&E> = view.processed().iter().map(|&i| &view.rows()[i]).collect();

    match effective_format(global.format, true) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&results).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&results).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Id => {
            for record in results {
                println!("{}", record.id());
            }
        }
        OutputFormat::Csv => {
            let columns = view.columns().displayed();
            let header: Vec<String> = columns.iter().map(|c| escape_csv(&c.title)).collect();
            println!("{}", header.join(","));
            for record in results {
                let cells: Vec<String> = columns
                    .iter()
                    .map(|c| escape_csv(&record.field(&c.key).render()))
                    .collect();
                println!("{}", cells.join(","));
            }
        }
        _ => {
            println!("{}", table::render_page(view));
            println!("{}", style(table::page_status(view)).dim());
            println!();
            println!(
                "{} {}(s) found. Use {} to reference by short ID.",
                style(view.result_count()).cyan(),
                config.name,
                style(format!("{}@N", config.prefix)).cyan()
            );
        }
    }

    Ok(())
}
