//! Top-level argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands;

#[derive(Parser, Debug)]
#[command(
    name = "tiller",
    version,
    about = "Tiller CRM - plain-text customer relationship management",
    long_about = "Manage customers, partners, proposals, engagements, tasks and employees\n\
                  as YAML files under version control."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub format: OutputFormat,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table for lists, YAML for single records
    Auto,
    Table,
    Yaml,
    Json,
    Csv,
    /// Record IDs only, one per line (for piping)
    Id,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Tiller project
    Init(commands::init::InitArgs),

    /// Manage customers
    #[command(subcommand, visible_alias = "cust")]
    Customer(commands::customer::CustomerCommands),

    /// Manage partners
    #[command(subcommand, visible_alias = "part")]
    Partner(commands::partner::PartnerCommands),

    /// Manage proposals
    #[command(subcommand, visible_alias = "prop")]
    Proposal(commands::proposal::ProposalCommands),

    /// Manage engagements
    #[command(subcommand, visible_alias = "eng")]
    Engagement(commands::engagement::EngagementCommands),

    /// Manage tasks
    #[command(subcommand)]
    Task(commands::task::TaskCommands),

    /// Manage employees
    #[command(subcommand, visible_alias = "emp")]
    Employee(commands::employee::EmployeeCommands),

    /// Browse records interactively
    Browse(commands::browse::BrowseArgs),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}
