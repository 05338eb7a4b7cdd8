//! `tiller task` command - task management

use chrono::NaiveDate;
use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::entity_cmd::{self, EntityConfig};
use crate::cli::filters::{PriorityFilter, TaskStatusFilter};
use crate::cli::helpers::discover_project;
use crate::cli::listing::{self, CommonListArgs};
use crate::cli::GlobalOpts;
use crate::core::entity::Priority;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::shortid;
use crate::core::Config;
use crate::entities::task::Task;
use crate::grid::{ColumnDef, Filter, FilterSet, Value};
use crate::yaml::write_yaml_file;

pub const CONFIG: EntityConfig = EntityConfig {
    prefix: EntityPrefix::Task,
    name: "task",
    name_plural: "tasks",
};

pub fn search_fields() -> &'static [&'static str] {
    &["title", "details", "assignee", "tags"]
}

pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "ID").pinned(),
        ColumnDef::new("title", "Title"),
        ColumnDef::new("status", "Status"),
        ColumnDef::new("priority", "Priority"),
        ColumnDef::new("assignee", "Assignee"),
        ColumnDef::new("due", "Due"),
        ColumnDef::new("related", "Related").hidden(),
        ColumnDef::new("created", "Created").hidden(),
    ]
}

pub fn detail_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("title", "Title"),
        ColumnDef::new("status", "Status"),
        ColumnDef::new("priority", "Priority"),
        ColumnDef::new("assignee", "Assignee"),
        ColumnDef::new("due", "Due"),
        ColumnDef::new("related", "Related"),
        ColumnDef::new("details", "Details"),
        ColumnDef::new("tags", "Tags"),
    ]
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks with filtering
    List(ListArgs),

    /// Create a new task
    New(NewArgs),

    /// Show a task's details
    Show(ShowArgs),

    /// Edit a task in your editor
    Edit(EditArgs),

    /// Delete a task
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's', value_enum, default_value = "all")]
    pub status: TaskStatusFilter,

    /// Filter by priority
    #[arg(long, short = 'p', value_enum, default_value = "all")]
    pub priority: PriorityFilter,

    /// Filter by assignee (exact match)
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,

    /// Due on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub due_after: Option<NaiveDate>,

    /// Due on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub due_before: Option<NaiveDate>,

    #[command(flatten)]
    pub common: CommonListArgs,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Task title
    #[arg(long)]
    pub title: Option<String>,

    /// Assignee (employee name)
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,

    /// Priority (low/medium/high/critical)
    #[arg(long, short = 'p', default_value = "medium")]
    pub priority: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,

    /// Record this task relates to (ID or short ID)
    #[arg(long)]
    pub related: Option<String>,

    /// Open in editor after creation
    #[arg(long, short = 'e')]
    pub edit: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Task ID, short ID, or title fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Task ID, short ID, or title fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Task ID, short ID, or title fragment
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: TaskCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TaskCommands::List(args) => run_list(args, global),
        TaskCommands::New(args) => run_new(args, global),
        TaskCommands::Show(args) => {
            entity_cmd::run_show_generic::<Task>(&args.id, &CONFIG, &detail_columns(), global)
        }
        TaskCommands::Edit(args) => entity_cmd::run_edit_generic::<Task>(&args.id, &CONFIG),
        TaskCommands::Delete(args) => {
            entity_cmd::run_delete_generic::<Task>(&args.id, &CONFIG, args.yes)
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let mut filters = FilterSet::new();
    if let Some(f) = args.status.to_filter() {
        filters.set("status", f);
    }
    if let Some(f) = args.priority.to_filter() {
        filters.set("priority", f);
    }
    if let Some(assignee) = &args.assignee {
        filters.set("assignee", Filter::Equals(Value::from(assignee.as_str())));
    }
    if args.due_after.is_some() || args.due_before.is_some() {
        let day = |d: Option<NaiveDate>| {
            d.and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| chrono::TimeZone::from_utc_datetime(&chrono::Utc, &dt))
        };
        filters.set(
            "due",
            Filter::DateRange {
                from: day(args.due_after),
                to: day(args.due_before),
            },
        );
    }

    listing::run_list::<Task>(
        &CONFIG,
        columns(),
        search_fields(),
        filters,
        &args.common,
        global,
    )
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;
    let config = Config::load();

    let priority: Priority = args
        .priority
        .to_lowercase()
        .parse()
        .map_err(|e| miette::miette!("{}. Use low/medium/high/critical", e))?;

    let title = args.title.unwrap_or_else(|| "New Task".to_string());
    let mut task = Task::new(title, config.author());
    task.assignee = args.assignee;
    task.priority = priority;
    task.due = args.due;

    if let Some(related) = &args.related {
        let resolved = shortid::parse_entity_reference(related, &project);
        let id = EntityId::parse(&resolved)
            .map_err(|e| miette::miette!("invalid related reference '{}': {}", related, e))?;
        task.related = Some(id);
    }

    let path = project.entity_path(EntityPrefix::Task, &task.id.to_string());
    write_yaml_file(&path, &task).into_diagnostic()?;

    entity_cmd::output_created(&task.id, &path, &task.title, CONFIG.name, global);

    if args.edit {
        config.run_editor(&path).into_diagnostic()?;
    }

    Ok(())
}
