//! `tiller customer` command - customer account management

use clap::Subcommand;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::entity_cmd::{self, EntityConfig};
use crate::cli::filters::StageFilter;
use crate::cli::helpers::discover_project;
use crate::cli::listing::{self, CommonListArgs};
use crate::cli::GlobalOpts;
use crate::core::identity::EntityPrefix;
use crate::core::Config;
use crate::entities::customer::{Customer, Stage};
use crate::grid::{ColumnDef, Filter, FilterSet, Value};
use crate::yaml::write_yaml_file;

pub const CONFIG: EntityConfig = EntityConfig {
    prefix: EntityPrefix::Cust,
    name: "customer",
    name_plural: "customers",
};

/// Fields scanned by `--search` and the browse search box
pub fn search_fields() -> &'static [&'static str] {
    &["name", "email", "owner", "region", "tags", "notes"]
}

/// Grid columns for the customer list view
pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "ID").pinned(),
        ColumnDef::new("name", "Name"),
        ColumnDef::new("stage", "Stage"),
        ColumnDef::new("owner", "Owner"),
        ColumnDef::new("annual_revenue", "Revenue").describe("Expected annual revenue"),
        ColumnDef::new("email", "Email").hidden(),
        ColumnDef::new("region", "Region").hidden(),
        ColumnDef::new("created", "Created").hidden(),
    ]
}

/// Fields shown by `show` and the browse record drawer
pub fn detail_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name", "Name"),
        ColumnDef::new("stage", "Stage"),
        ColumnDef::new("owner", "Owner"),
        ColumnDef::new("email", "Email"),
        ColumnDef::new("phone", "Phone"),
        ColumnDef::new("website", "Website"),
        ColumnDef::new("annual_revenue", "Revenue"),
        ColumnDef::new("currency", "Currency"),
        ColumnDef::new("region", "Region"),
        ColumnDef::new("tags", "Tags"),
        ColumnDef::new("notes", "Notes"),
    ]
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommands {
    /// List customers with filtering
    List(ListArgs),

    /// Create a new customer
    New(NewArgs),

    /// Show a customer's details
    Show(ShowArgs),

    /// Edit a customer in your editor
    Edit(EditArgs),

    /// Delete a customer
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by pipeline stage
    #[arg(long, short = 's', value_enum, default_value = "all")]
    pub stage: StageFilter,

    /// Filter by account owner (exact match)
    #[arg(long)]
    pub owner: Option<String>,

    /// Filter by region (exact match)
    #[arg(long)]
    pub region: Option<String>,

    /// Minimum expected annual revenue
    #[arg(long)]
    pub min_revenue: Option<f64>,

    /// Maximum expected annual revenue
    #[arg(long)]
    pub max_revenue: Option<f64>,

    #[command(flatten)]
    pub common: CommonListArgs,
}

/// Stage choices for `new` (no composite variants)
#[derive(Debug, Clone, Copy, clap::ValueEnum, Default, PartialEq, Eq)]
pub enum NewStage {
    #[default]
    Lead,
    Prospect,
    Active,
    Churned,
}

impl From<NewStage> for Stage {
    fn from(stage: NewStage) -> Self {
        match stage {
            NewStage::Lead => Stage::Lead,
            NewStage::Prospect => Stage::Prospect,
            NewStage::Active => Stage::Active,
            NewStage::Churned => Stage::Churned,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Account name
    #[arg(long)]
    pub name: Option<String>,

    /// Pipeline stage
    #[arg(long, short = 's', value_enum, default_value = "lead")]
    pub stage: NewStage,

    /// Primary contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Account owner (employee name)
    #[arg(long)]
    pub owner: Option<String>,

    /// Sales region
    #[arg(long)]
    pub region: Option<String>,

    /// Expected annual revenue
    #[arg(long)]
    pub revenue: Option<f64>,

    /// Tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Use interactive wizard to fill in fields
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Open in editor after creation
    #[arg(long, short = 'e')]
    pub edit: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Customer ID, short ID, or name fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Customer ID, short ID, or name fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Customer ID, short ID, or name fragment
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: CustomerCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CustomerCommands::List(args) => run_list(args, global),
        CustomerCommands::New(args) => run_new(args, global),
        CustomerCommands::Show(args) => {
            entity_cmd::run_show_generic::<Customer>(&args.id, &CONFIG, &detail_columns(), global)
        }
        CustomerCommands::Edit(args) => entity_cmd::run_edit_generic::<Customer>(&args.id, &CONFIG),
        CustomerCommands::Delete(args) => {
            entity_cmd::run_delete_generic::<Customer>(&args.id, &CONFIG, args.yes)
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let mut filters = FilterSet::new();
    if let Some(f) = args.stage.to_filter() {
        filters.set("stage", f);
    }
    if let Some(owner) = &args.owner {
        filters.set("owner", Filter::Equals(Value::from(owner.as_str())));
    }
    if let Some(region) = &args.region {
        filters.set("region", Filter::Equals(Value::from(region.as_str())));
    }
    if args.min_revenue.is_some() || args.max_revenue.is_some() {
        filters.set(
            "annual_revenue",
            Filter::NumberRange {
                min: args.min_revenue,
                max: args.max_revenue,
            },
        );
    }

    listing::run_list::<Customer>(
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
    let author = config.author();

    let mut customer = if args.interactive {
        let theme = ColorfulTheme::default();

        let name: String = Input::with_theme(&theme)
            .with_prompt("Account name")
            .interact_text()
            .into_diagnostic()?;

        let stages = &["lead", "prospect", "active", "churned"];
        let stage = match Select::with_theme(&theme)
            .with_prompt("Pipeline stage")
            .items(stages)
            .default(0)
            .interact()
            .into_diagnostic()?
        {
            1 => Stage::Prospect,
            2 => Stage::Active,
            3 => Stage::Churned,
            _ => Stage::Lead,
        };

        let email: String = Input::with_theme(&theme)
            .with_prompt("Contact email (optional)")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;

        let mut customer = Customer::new(name, author);
        customer.stage = stage;
        if !email.is_empty() {
            customer.email = Some(email);
        }
        customer
    } else {
        let name = args.name.unwrap_or_else(|| "New Customer".to_string());
        let mut customer = Customer::new(name, author);
        customer.stage = args.stage.into();
        customer.email = args.email;
        customer.owner = args.owner;
        customer.region = args.region;
        customer.annual_revenue = args.revenue;
        customer.tags = args.tags;
        customer
    };
    customer.tags.dedup();

    let path = project.entity_path(EntityPrefix::Cust, &customer.id.to_string());
    write_yaml_file(&path, &customer).into_diagnostic()?;

    entity_cmd::output_created(&customer.id, &path, &customer.name, CONFIG.name, global);

    if args.edit {
        config.run_editor(&path).into_diagnostic()?;
    }

    Ok(())
}
