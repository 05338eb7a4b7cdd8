//! `tiller proposal` command - proposal management

use chrono::NaiveDate;
use clap::Subcommand;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::entity_cmd::{self, EntityConfig};
use crate::cli::filters::ProposalStageFilter;
use crate::cli::helpers::discover_project;
use crate::cli::listing::{self, CommonListArgs};
use crate::cli::GlobalOpts;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::shortid;
use crate::core::Config;
use crate::entities::proposal::{Proposal, ProposalStage};
use crate::grid::{ColumnDef, Filter, FilterSet, Value};
use crate::yaml::write_yaml_file;

pub const CONFIG: EntityConfig = EntityConfig {
    prefix: EntityPrefix::Prop,
    name: "proposal",
    name_plural: "proposals",
};

pub fn search_fields() -> &'static [&'static str] {
    &["title", "owner", "tags", "notes"]
}

pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "ID").pinned(),
        ColumnDef::new("title", "Title"),
        ColumnDef::new("stage", "Stage"),
        ColumnDef::new("amount", "Amount"),
        ColumnDef::new("owner", "Owner"),
        ColumnDef::new("valid_until", "Valid until").hidden(),
        ColumnDef::new("customer", "Customer").hidden(),
        ColumnDef::new("created", "Created").hidden(),
    ]
}

pub fn detail_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("title", "Title"),
        ColumnDef::new("stage", "Stage"),
        ColumnDef::new("amount", "Amount"),
        ColumnDef::new("currency", "Currency"),
        ColumnDef::new("customer", "Customer"),
        ColumnDef::new("owner", "Owner"),
        ColumnDef::new("valid_until", "Valid until"),
        ColumnDef::new("tags", "Tags"),
        ColumnDef::new("notes", "Notes"),
    ]
}

#[derive(Subcommand, Debug)]
pub enum ProposalCommands {
    /// List proposals with filtering
    List(ListArgs),

    /// Create a new proposal
    New(NewArgs),

    /// Show a proposal's details
    Show(ShowArgs),

    /// Edit a proposal in your editor
    Edit(EditArgs),

    /// Delete a proposal
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by stage
    #[arg(long, short = 's', value_enum, default_value = "all")]
    pub stage: ProposalStageFilter,

    /// Filter by customer (ID or short ID)
    #[arg(long)]
    pub customer: Option<String>,

    /// Filter by owner (exact match)
    #[arg(long)]
    pub owner: Option<String>,

    /// Minimum amount
    #[arg(long)]
    pub min_amount: Option<f64>,

    /// Maximum amount
    #[arg(long)]
    pub max_amount: Option<f64>,

    #[command(flatten)]
    pub common: CommonListArgs,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Proposal title
    #[arg(long)]
    pub title: Option<String>,

    /// Customer this proposal is for (ID or short ID)
    #[arg(long)]
    pub customer: Option<String>,

    /// Total value
    #[arg(long)]
    pub amount: Option<f64>,

    /// Offer expiry date (YYYY-MM-DD)
    #[arg(long)]
    pub valid_until: Option<NaiveDate>,

    /// Owner (employee name)
    #[arg(long)]
    pub owner: Option<String>,

    /// Use interactive wizard to fill in fields
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Open in editor after creation
    #[arg(long, short = 'e')]
    pub edit: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Proposal ID, short ID, or title fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Proposal ID, short ID, or title fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Proposal ID, short ID, or title fragment
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: ProposalCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProposalCommands::List(args) => run_list(args, global),
        ProposalCommands::New(args) => run_new(args, global),
        ProposalCommands::Show(args) => {
            entity_cmd::run_show_generic::<Proposal>(&args.id, &CONFIG, &detail_columns(), global)
        }
        ProposalCommands::Edit(args) => entity_cmd::run_edit_generic::<Proposal>(&args.id, &CONFIG),
        ProposalCommands::Delete(args) => {
            entity_cmd::run_delete_generic::<Proposal>(&args.id, &CONFIG, args.yes)
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover_project()?;

    let mut filters = FilterSet::new();
    if let Some(f) = args.stage.to_filter() {
        filters.set("stage", f);
    }
    if let Some(customer) = &args.customer {
        let resolved = shortid::parse_entity_reference(customer, &project);
        filters.set("customer", Filter::Equals(Value::from(resolved)));
    }
    if let Some(owner) = &args.owner {
        filters.set("owner", Filter::Equals(Value::from(owner.as_str())));
    }
    if args.min_amount.is_some() || args.max_amount.is_some() {
        filters.set(
            "amount",
            Filter::NumberRange {
                min: args.min_amount,
                max: args.max_amount,
            },
        );
    }

    listing::run_list::<Proposal>(
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

    let mut proposal = if args.interactive {
        let theme = ColorfulTheme::default();

        let title: String = Input::with_theme(&theme)
            .with_prompt("Title")
            .interact_text()
            .into_diagnostic()?;

        let amount: f64 = Input::with_theme(&theme)
            .with_prompt("Amount")
            .default(0.0)
            .interact_text()
            .into_diagnostic()?;

        let stages = &["draft", "sent"];
        let stage = match Select::with_theme(&theme)
            .with_prompt("Stage")
            .items(stages)
            .default(0)
            .interact()
            .into_diagnostic()?
        {
            1 => ProposalStage::Sent,
            _ => ProposalStage::Draft,
        };

        let mut proposal = Proposal::new(title, author);
        proposal.amount = amount;
        proposal.stage = stage;
        proposal
    } else {
        let title = args.title.unwrap_or_else(|| "New Proposal".to_string());
        let mut proposal = Proposal::new(title, author);
        proposal.amount = args.amount.unwrap_or(0.0);
        proposal.valid_until = args.valid_until;
        proposal.owner = args.owner;
        proposal
    };

    if let Some(customer) = &args.customer {
        let resolved = shortid::parse_entity_reference(customer, &project);
        let id = EntityId::parse(&resolved)
            .map_err(|e| miette::miette!("invalid customer reference '{}': {}", customer, e))?;
        if id.prefix() != EntityPrefix::Cust {
            return Err(miette::miette!(
                "'{}' is not a customer ID",
                resolved
            ));
        }
        proposal.customer = Some(id);
    }

    let path = project.entity_path(EntityPrefix::Prop, &proposal.id.to_string());
    write_yaml_file(&path, &proposal).into_diagnostic()?;

    entity_cmd::output_created(&proposal.id, &path, &proposal.title, CONFIG.name, global);

    if args.edit {
        config.run_editor(&path).into_diagnostic()?;
    }

    Ok(())
}
