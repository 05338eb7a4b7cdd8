//! `tiller partner` command - partner organization management

use clap::{Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use crate::cli::entity_cmd::{self, EntityConfig};
use crate::cli::filters::ActiveFilter;
use crate::cli::helpers::discover_project;
use crate::cli::listing::{self, CommonListArgs};
use crate::cli::GlobalOpts;
use crate::core::identity::EntityPrefix;
use crate::core::Config;
use crate::entities::partner::{Partner, PartnerKind};
use crate::grid::{ColumnDef, Filter, FilterSet, Value};
use crate::yaml::write_yaml_file;

pub const CONFIG: EntityConfig = EntityConfig {
    prefix: EntityPrefix::Part,
    name: "partner",
    name_plural: "partners",
};

pub fn search_fields() -> &'static [&'static str] {
    &["name", "contact_email", "region", "tags"]
}

pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "ID").pinned(),
        ColumnDef::new("name", "Name"),
        ColumnDef::new("kind", "Kind"),
        ColumnDef::new("region", "Region"),
        ColumnDef::new("active", "Active"),
        ColumnDef::new("contact_email", "Email").hidden(),
        ColumnDef::new("created", "Created").hidden(),
    ]
}

pub fn detail_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name", "Name"),
        ColumnDef::new("kind", "Kind"),
        ColumnDef::new("region", "Region"),
        ColumnDef::new("active", "Active"),
        ColumnDef::new("contact_email", "Email"),
        ColumnDef::new("website", "Website"),
        ColumnDef::new("tags", "Tags"),
    ]
}

/// Partnership kind filter
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum KindFilter {
    Reseller,
    Referral,
    Technology,
    Integrator,
    #[default]
    All,
}

impl KindFilter {
    fn to_filter(self) -> Option<Filter> {
        let kind = match self {
            KindFilter::Reseller => "reseller",
            KindFilter::Referral => "referral",
            KindFilter::Technology => "technology",
            KindFilter::Integrator => "integrator",
            KindFilter::All => return None,
        };
        Some(Filter::Equals(Value::from(kind)))
    }
}

#[derive(Subcommand, Debug)]
pub enum PartnerCommands {
    /// List partners with filtering
    List(ListArgs),

    /// Create a new partner
    New(NewArgs),

    /// Show a partner's details
    Show(ShowArgs),

    /// Edit a partner in your editor
    Edit(EditArgs),

    /// Delete a partner
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by partnership kind
    #[arg(long, short = 'k', value_enum, default_value = "all")]
    pub kind: KindFilter,

    /// Filter by active state
    #[arg(long, value_enum, default_value = "all")]
    pub active: ActiveFilter,

    /// Filter by region (exact match)
    #[arg(long)]
    pub region: Option<String>,

    #[command(flatten)]
    pub common: CommonListArgs,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Organization name
    #[arg(long)]
    pub name: Option<String>,

    /// Partnership kind
    #[arg(long, value_enum, default_value = "reseller")]
    pub kind: NewKind,

    /// Region
    #[arg(long)]
    pub region: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Open in editor after creation
    #[arg(long, short = 'e')]
    pub edit: bool,
}

/// Kind choices for `new` (no `all` variant)
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum NewKind {
    Reseller,
    Referral,
    Technology,
    Integrator,
}

impl From<NewKind> for PartnerKind {
    fn from(kind: NewKind) -> Self {
        match kind {
            NewKind::Reseller => PartnerKind::Reseller,
            NewKind::Referral => PartnerKind::Referral,
            NewKind::Technology => PartnerKind::Technology,
            NewKind::Integrator => PartnerKind::Integrator,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Partner ID, short ID, or name fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Partner ID, short ID, or name fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Partner ID, short ID, or name fragment
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: PartnerCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PartnerCommands::List(args) => run_list(args, global),
        PartnerCommands::New(args) => run_new(args, global),
        PartnerCommands::Show(args) => {
            entity_cmd::run_show_generic::<Partner>(&args.id, &CONFIG, &detail_columns(), global)
        }
        PartnerCommands::Edit(args) => entity_cmd::run_edit_generic::<Partner>(&args.id, &CONFIG),
        PartnerCommands::Delete(args) => {
            entity_cmd::run_delete_generic::<Partner>(&args.id, &CONFIG, args.yes)
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let mut filters = FilterSet::new();
    if let Some(f) = args.kind.to_filter() {
        filters.set("kind", f);
    }
    if let Some(f) = args.active.to_filter() {
        filters.set("active", f);
    }
    if let Some(region) = &args.region {
        filters.set("region", Filter::Equals(Value::from(region.as_str())));
    }

    listing::run_list::<Partner>(
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

    let name = args.name.unwrap_or_else(|| "New Partner".to_string());
    let mut partner = Partner::new(name, config.author());
    partner.kind = args.kind.into();
    partner.region = args.region;
    partner.contact_email = args.email;

    let path = project.entity_path(EntityPrefix::Part, &partner.id.to_string());
    write_yaml_file(&path, &partner).into_diagnostic()?;

    entity_cmd::output_created(&partner.id, &path, &partner.name, CONFIG.name, global);

    if args.edit {
        config.run_editor(&path).into_diagnostic()?;
    }

    Ok(())
}
