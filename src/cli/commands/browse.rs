//! `tiller browse` command - interactive list browsing
//!
//! The stateful consumer of the grid: one `ListView` lives for the whole
//! session, every menu action maps onto a view action, and the table is
//! re-rendered from the view after each one. Column choices persist across
//! sessions through the project's preference store.

use std::time::Instant;

use clap::ValueEnum;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::{customer, employee, engagement, partner, proposal, task};
use crate::cli::entity_cmd::EntityConfig;
use crate::cli::helpers::discover_project;
use crate::cli::listing;
use crate::cli::table;
use crate::cli::GlobalOpts;
use crate::core::entity::Entity;
use crate::core::project::Project;
use crate::entities::{Customer, Employee, Engagement, Partner, Proposal, Task};
use crate::grid::{ColumnDef, Filter, ListView, Row, Value};

#[derive(clap::Args, Debug)]
pub struct BrowseArgs {
    /// Record type to browse (prompted when omitted)
    #[arg(value_enum)]
    pub entity: Option<EntityKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Customers,
    Partners,
    Proposals,
    Engagements,
    Tasks,
    Employees,
}

pub fn run(args: BrowseArgs, _global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;

    let kind = match args.entity {
        Some(kind) => kind,
        None => {
            let labels = [
                "customers",
                "partners",
                "proposals",
                "engagements",
                "tasks",
                "employees",
            ];
            let choice = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Browse which records?")
                .items(&labels)
                .default(0)
                .interact()
                .into_diagnostic()?;
            match choice {
                1 => EntityKind::Partners,
                2 => EntityKind::Proposals,
                3 => EntityKind::Engagements,
                4 => EntityKind::Tasks,
                5 => EntityKind::Employees,
                _ => EntityKind::Customers,
            }
        }
    };

    match kind {
        EntityKind::Customers => browse::<Customer>(
            &project,
            &customer::CONFIG,
            customer::columns(),
            customer::detail_columns(),
            customer::search_fields(),
            "stage",
            &["lead", "prospect", "active", "churned"],
        ),
        EntityKind::Partners => browse::<Partner>(
            &project,
            &partner::CONFIG,
            partner::columns(),
            partner::detail_columns(),
            partner::search_fields(),
            "kind",
            &["reseller", "referral", "technology", "integrator"],
        ),
        EntityKind::Proposals => browse::<Proposal>(
            &project,
            &proposal::CONFIG,
            proposal::columns(),
            proposal::detail_columns(),
            proposal::search_fields(),
            "stage",
            &["draft", "sent", "accepted", "declined", "expired"],
        ),
        EntityKind::Engagements => browse::<Engagement>(
            &project,
            &engagement::CONFIG,
            engagement::columns(),
            engagement::detail_columns(),
            engagement::search_fields(),
            "status",
            &["planned", "active", "paused", "completed", "cancelled"],
        ),
        EntityKind::Tasks => browse::<Task>(
            &project,
            &task::CONFIG,
            task::columns(),
            task::detail_columns(),
            task::search_fields(),
            "status",
            &["open", "in_progress", "done", "cancelled"],
        ),
        EntityKind::Employees => browse::<Employee>(
            &project,
            &employee::CONFIG,
            employee::columns(),
            employee::detail_columns(),
            employee::search_fields(),
            "role",
            &["sales", "delivery", "support", "management"],
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn browse<E: Entity + Row>(
    project: &Project,
    config: &EntityConfig,
    columns: Vec<ColumnDef>,
    detail_columns: Vec<ColumnDef>,
    search_fields: &[&str],
    status_field: &str,
    status_values: &[&str],
) -> Result<()> {
    let mut view: ListView<E> = listing::build_view(project, config, columns, search_fields);
    let theme = ColorfulTheme::default();

    loop {
        println!();
        println!("{}", style(format!("▸ {}", config.name_plural)).bold());
        if view.result_count() == 0 {
            println!("No {} match the current view.", config.name_plural);
        } else {
            println!("{}", table::render_page(&view));
        }
        println!("{}", style(table::page_status(&view)).dim());

        let actions = [
            "Next page",
            "Previous page",
            "Search",
            "Filter",
            "Sort",
            "Columns",
            "Select rows",
            "View record",
            "Reset view",
            "Quit",
        ];
        let choice = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&actions)
            .default(0)
            .interact()
            .into_diagnostic()?;

        match choice {
            0 => view.next_page(),
            1 => view.prev_page(),
            2 => prompt_search(&mut view, &theme)?,
            3 => prompt_filter(&mut view, &theme, status_field, status_values)?,
            4 => prompt_sort(&mut view, &theme)?,
            5 => prompt_columns(&mut view, &theme)?,
            6 => prompt_select(&mut view, &theme)?,
            7 => prompt_detail(&mut view, &theme, &detail_columns)?,
            8 => {
                if let Err(e) = view.reset_all() {
                    eprintln!("{} {}", style("!").yellow(), e);
                }
            }
            _ => break,
        }
    }

    Ok(())
}

fn prompt_search<E: Entity + Row>(view: &mut ListView<E>, theme: &ColorfulTheme) -> Result<()> {
    let text: String = Input::with_theme(theme)
        .with_prompt("Search (empty clears)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    // Typed text goes through the debouncer; Enter flushes it immediately
    view.type_search(text, Instant::now());
    view.flush_search();
    Ok(())
}

fn prompt_filter<E: Entity + Row>(
    view: &mut ListView<E>,
    theme: &ColorfulTheme,
    status_field: &str,
    status_values: &[&str],
) -> Result<()> {
    let selected = MultiSelect::with_theme(theme)
        .with_prompt(format!(
            "Show which {} values? (empty or all = no filter)",
            status_field
        ))
        .items(status_values)
        .interact()
        .into_diagnostic()?;

    if selected.is_empty() || selected.len() == status_values.len() {
        view.remove_filter(status_field);
    } else {
        let values: Vec<Value> = selected
            .iter()
            .map(|&i| Value::from(status_values[i]))
            .collect();
        view.set_filter(status_field, Filter::OneOf(values));
    }
    Ok(())
}

fn prompt_sort<E: Entity + Row>(view: &mut ListView<E>, theme: &ColorfulTheme) -> Result<()> {
    let defs: Vec<ColumnDef> = view.columns().defs().to_vec();
    let mut labels: Vec<String> = defs.iter().map(|c| c.title.clone()).collect();
    labels.push("Clear sort".to_string());

    let choice = Select::with_theme(theme)
        .with_prompt("Sort by (repeat to cycle asc/desc/off)")
        .items(&labels)
        .default(0)
        .interact()
        .into_diagnostic()?;

    if choice == defs.len() {
        view.set_sort(None);
    } else {
        view.toggle_sort(&defs[choice].key);
    }
    Ok(())
}

fn prompt_columns<E: Entity + Row>(view: &mut ListView<E>, theme: &ColorfulTheme) -> Result<()> {
    let togglable: Vec<ColumnDef> = view
        .columns()
        .defs()
        .iter()
        .filter(|c| !c.always_visible)
        .cloned()
        .collect();
    let labels: Vec<&str> = togglable.iter().map(|c| c.title.as_str()).collect();
    let defaults: Vec<bool> = togglable
        .iter()
        .map(|c| view.columns().is_visible(&c.key))
        .collect();

    let picked = MultiSelect::with_theme(theme)
        .with_prompt("Visible columns")
        .items(&labels)
        .defaults(&defaults)
        .interact()
        .into_diagnostic()?;

    let keys: Vec<String> = picked.iter().map(|&i| togglable[i].key.clone()).collect();
    if let Err(e) = view.columns_mut().set_visible(keys) {
        eprintln!("{} {}", style("!").yellow(), e);
    }
    Ok(())
}

fn prompt_select<E: Entity + Row>(view: &mut ListView<E>, theme: &ColorfulTheme) -> Result<()> {
    let input: String = Input::with_theme(theme)
        .with_prompt("Row numbers on this page, e.g. 1,3 (empty clears selection)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    if input.trim().is_empty() {
        view.clear_selection();
        return Ok(());
    }

    let page_indices = view.page_indices().to_vec();
    let mut selection: Vec<usize> = view.selected().iter().copied().collect();
    for pick in input.split(',') {
        if let Ok(n) = pick.trim().parse::<usize>() {
            if n >= 1 && n <= page_indices.len() {
                selection.push(page_indices[n - 1]);
            }
        }
    }
    view.set_selected(selection);
    Ok(())
}

fn prompt_detail<E: Entity + Row>(
    view: &mut ListView<E>,
    theme: &ColorfulTheme,
    detail_columns: &[ColumnDef],
) -> Result<()> {
    let input: String = Input::with_theme(theme)
        .with_prompt("Row number on this page")
        .interact_text()
        .into_diagnostic()?;

    let page_indices = view.page_indices().to_vec();
    let Some(index) = input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&n| n >= 1 && n <= page_indices.len())
        .map(|n| page_indices[n - 1])
    else {
        println!("No such row on this page.");
        return Ok(());
    };

    if view.open_detail(index) {
        if let Some(record) = view.detail().and_then(|i| view.row(i)) {
            println!();
            println!("{}", style("─".repeat(60)).dim());
            print!("{}", table::render_detail(record, detail_columns));
            println!("{}", style("─".repeat(60)).dim());
        }
        view.close_detail();
    }
    Ok(())
}
