//! `tiller engagement` command - delivery engagement management

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use crate::cli::entity_cmd::{self, EntityConfig};
use crate::cli::filters::EngagementStatusFilter;
use crate::cli::helpers::discover_project;
use crate::cli::listing::{self, CommonListArgs};
use crate::cli::GlobalOpts;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::shortid;
use crate::core::Config;
use crate::entities::engagement::{Engagement, EngagementKind};
use crate::grid::{ColumnDef, Filter, FilterSet, Value};
use crate::yaml::write_yaml_file;

pub const CONFIG: EntityConfig = EntityConfig {
    prefix: EntityPrefix::Eng,
    name: "engagement",
    name_plural: "engagements",
};

pub fn search_fields() -> &'static [&'static str] {
    &["title", "owner", "tags"]
}

pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "ID").pinned(),
        ColumnDef::new("title", "Title"),
        ColumnDef::new("kind", "Kind"),
        ColumnDef::new("status", "Status"),
        ColumnDef::new("owner", "Owner"),
        ColumnDef::new("billable", "Billable").hidden(),
        ColumnDef::new("start_date", "Start").hidden(),
        ColumnDef::new("end_date", "End").hidden(),
        ColumnDef::new("customer", "Customer").hidden(),
    ]
}

pub fn detail_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("title", "Title"),
        ColumnDef::new("kind", "Kind"),
        ColumnDef::new("status", "Status"),
        ColumnDef::new("customer", "Customer"),
        ColumnDef::new("owner", "Owner"),
        ColumnDef::new("billable", "Billable"),
        ColumnDef::new("start_date", "Start"),
        ColumnDef::new("end_date", "End"),
        ColumnDef::new("tags", "Tags"),
    ]
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum KindFilter {
    Onboarding,
    Consulting,
    Support,
    Training,
    #[default]
    All,
}

impl KindFilter {
    fn to_filter(self) -> Option<Filter> {
        let kind = match self {
            KindFilter::Onboarding => "onboarding",
            KindFilter::Consulting => "consulting",
            KindFilter::Support => "support",
            KindFilter::Training => "training",
            KindFilter::All => return None,
        };
        Some(Filter::Equals(Value::from(kind)))
    }
}

#[derive(Subcommand, Debug)]
pub enum EngagementCommands {
    /// List engagements with filtering
    List(ListArgs),

    /// Create a new engagement
    New(NewArgs),

    /// Show an engagement's details
    Show(ShowArgs),

    /// Edit an engagement in your editor
    Edit(EditArgs),

    /// Delete an engagement
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's', value_enum, default_value = "all")]
    pub status: EngagementStatusFilter,

    /// Filter by kind
    #[arg(long, short = 'k', value_enum, default_value = "all")]
    pub kind: KindFilter,

    /// Filter by customer (ID or short ID)
    #[arg(long)]
    pub customer: Option<String>,

    /// Only billable (true) or non-billable (false) engagements
    #[arg(long)]
    pub billable: Option<bool>,

    #[command(flatten)]
    pub common: CommonListArgs,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Engagement title
    #[arg(long)]
    pub title: Option<String>,

    /// Customer the work is for (ID or short ID)
    #[arg(long)]
    pub customer: Option<String>,

    /// Engagement kind
    #[arg(long, value_enum, default_value = "onboarding")]
    pub kind: NewKind,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Hours are invoiced
    #[arg(long)]
    pub billable: bool,

    /// Open in editor after creation
    #[arg(long, short = 'e')]
    pub edit: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum NewKind {
    Onboarding,
    Consulting,
    Support,
    Training,
}

impl From<NewKind> for EngagementKind {
    fn from(kind: NewKind) -> Self {
        match kind {
            NewKind::Onboarding => EngagementKind::Onboarding,
            NewKind::Consulting => EngagementKind::Consulting,
            NewKind::Support => EngagementKind::Support,
            NewKind::Training => EngagementKind::Training,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Engagement ID, short ID, or title fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Engagement ID, short ID, or title fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Engagement ID, short ID, or title fragment
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: EngagementCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        EngagementCommands::List(args) => run_list(args, global),
        EngagementCommands::New(args) => run_new(args, global),
        EngagementCommands::Show(args) => {
            entity_cmd::run_show_generic::<Engagement>(&args.id, &CONFIG, &detail_columns(), global)
        }
        EngagementCommands::Edit(args) => {
            entity_cmd::run_edit_generic::<Engagement>(&args.id, &CONFIG)
        }
        EngagementCommands::Delete(args) => {
            entity_cmd::run_delete_generic::<Engagement>(&args.id, &CONFIG, args.yes)
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;

    let mut filters = FilterSet::new();
    if let Some(f) = args.status.to_filter() {
        filters.set("status", f);
    }
    if let Some(f) = args.kind.to_filter() {
        filters.set("kind", f);
    }
    if let Some(customer) = &args.customer {
        let resolved = shortid::parse_entity_reference(customer, &project);
        filters.set("customer", Filter::Equals(Value::from(resolved)));
    }
    if let Some(billable) = args.billable {
        filters.set("billable", Filter::Flag(billable));
    }

    listing::run_list::<Engagement>(
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

    let title = args.title.unwrap_or_else(|| "New Engagement".to_string());
    let mut engagement = Engagement::new(title, config.author());
    engagement.kind = args.kind.into();
    engagement.start_date = args.start;
    engagement.billable = args.billable;

    if let Some(customer) = &args.customer {
        let resolved = shortid::parse_entity_reference(customer, &project);
        let id = EntityId::parse(&resolved)
            .map_err(|e| miette::miette!("invalid customer reference '{}': {}", customer, e))?;
        if id.prefix() != EntityPrefix::Cust {
            return Err(miette::miette!("'{}' is not a customer ID", resolved));
        }
        engagement.customer = Some(id);
    }

    let path = project.entity_path(EntityPrefix::Eng, &engagement.id.to_string());
    write_yaml_file(&path, &engagement).into_diagnostic()?;

    entity_cmd::output_created(&engagement.id, &path, &engagement.title, CONFIG.name, global);

    if args.edit {
        config.run_editor(&path).into_diagnostic()?;
    }

    Ok(())
}
