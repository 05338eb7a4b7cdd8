//! `tiller init` command - project initialization

use std::path::PathBuf;

use console::style;
use miette::Result;

use crate::core::project::Project;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

pub fn run(args: InitArgs) -> Result<()> {
    let project = Project::init(&args.path).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Initialized Tiller project at {}",
        style("✓").green(),
        style(project.root().display()).cyan()
    );
    println!();
    println!("Next steps:");
    println!(
        "  {}  create your first account",
        style("tiller customer new --name \"Acme Corp\"").yellow()
    );
    println!(
        "  {}              see it in a list",
        style("tiller customer list").yellow()
    );
    println!(
        "  {}                    explore interactively",
        style("tiller browse").yellow()
    );

    Ok(())
}
