//! `tiller employee` command - team management

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use crate::cli::entity_cmd::{self, EntityConfig};
use crate::cli::filters::ActiveFilter;
use crate::cli::helpers::discover_project;
use crate::cli::listing::{self, CommonListArgs};
use crate::cli::GlobalOpts;
use crate::core::identity::EntityPrefix;
use crate::core::Config;
use crate::entities::employee::{Employee, EmployeeRole};
use crate::grid::{ColumnDef, Filter, FilterSet, Value};
use crate::yaml::write_yaml_file;

pub const CONFIG: EntityConfig = EntityConfig {
    prefix: EntityPrefix::Emp,
    name: "employee",
    name_plural: "employees",
};

pub fn search_fields() -> &'static [&'static str] {
    &["name", "email", "department"]
}

pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("id", "ID").pinned(),
        ColumnDef::new("name", "Name"),
        ColumnDef::new("role", "Role"),
        ColumnDef::new("department", "Department"),
        ColumnDef::new("active", "Active"),
        ColumnDef::new("email", "Email").hidden(),
        ColumnDef::new("hired", "Hired").hidden(),
    ]
}

pub fn detail_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name", "Name"),
        ColumnDef::new("role", "Role"),
        ColumnDef::new("department", "Department"),
        ColumnDef::new("email", "Email"),
        ColumnDef::new("hired", "Hired"),
        ColumnDef::new("active", "Active"),
    ]
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum RoleFilter {
    Sales,
    Delivery,
    Support,
    Management,
    #[default]
    All,
}

impl RoleFilter {
    fn to_filter(self) -> Option<Filter> {
        let role = match self {
            RoleFilter::Sales => "sales",
            RoleFilter::Delivery => "delivery",
            RoleFilter::Support => "support",
            RoleFilter::Management => "management",
            RoleFilter::All => return None,
        };
        Some(Filter::Equals(Value::from(role)))
    }
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommands {
    /// List employees with filtering
    List(ListArgs),

    /// Create a new employee
    New(NewArgs),

    /// Show an employee's details
    Show(ShowArgs),

    /// Edit an employee in your editor
    Edit(EditArgs),

    /// Delete an employee
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by role
    #[arg(long, value_enum, default_value = "all")]
    pub role: RoleFilter,

    /// Filter by active state
    #[arg(long, value_enum, default_value = "all")]
    pub active: ActiveFilter,

    /// Filter by department (exact match)
    #[arg(long, short = 'd')]
    pub department: Option<String>,

    #[command(flatten)]
    pub common: CommonListArgs,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Employee name
    #[arg(long)]
    pub name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Role
    #[arg(long, value_enum, default_value = "sales")]
    pub role: NewRole,

    /// Department
    #[arg(long, short = 'd')]
    pub department: Option<String>,

    /// Hire date (YYYY-MM-DD)
    #[arg(long)]
    pub hired: Option<NaiveDate>,

    /// Open in editor after creation
    #[arg(long, short = 'e')]
    pub edit: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum NewRole {
    Sales,
    Delivery,
    Support,
    Management,
}

impl From<NewRole> for EmployeeRole {
    fn from(role: NewRole) -> Self {
        match role {
            NewRole::Sales => EmployeeRole::Sales,
            NewRole::Delivery => EmployeeRole::Delivery,
            NewRole::Support => EmployeeRole::Support,
            NewRole::Management => EmployeeRole::Management,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Employee ID, short ID, or name fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Employee ID, short ID, or name fragment
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Employee ID, short ID, or name fragment
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: EmployeeCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        EmployeeCommands::List(args) => run_list(args, global),
        EmployeeCommands::New(args) => run_new(args, global),
        EmployeeCommands::Show(args) => {
            entity_cmd::run_show_generic::<Employee>(&args.id, &CONFIG, &detail_columns(), global)
        }
        EmployeeCommands::Edit(args) => entity_cmd::run_edit_generic::<Employee>(&args.id, &CONFIG),
        EmployeeCommands::Delete(args) => {
            entity_cmd::run_delete_generic::<Employee>(&args.id, &CONFIG, args.yes)
        }
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let mut filters = FilterSet::new();
    if let Some(f) = args.role.to_filter() {
        filters.set("role", f);
    }
    if let Some(f) = args.active.to_filter() {
        filters.set("active", f);
    }
    if let Some(department) = &args.department {
        filters.set(
            "department",
            Filter::Equals(Value::from(department.as_str())),
        );
    }

    listing::run_list::<Employee>(
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

    let name = args.name.unwrap_or_else(|| "New Employee".to_string());
    let mut employee = Employee::new(name, config.author());
    employee.email = args.email;
    employee.role = args.role.into();
    employee.department = args.department;
    employee.hired = args.hired;

    let path = project.entity_path(EntityPrefix::Emp, &employee.id.to_string());
    write_yaml_file(&path, &employee).into_diagnostic()?;

    entity_cmd::output_created(&employee.id, &path, &employee.name, CONFIG.name, global);

    if args.edit {
        config.run_editor(&path).into_diagnostic()?;
    }

    Ok(())
}
