use clap::Parser;
use miette::Result;
use tiller::cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Customer(cmd) => commands::customer::run(cmd, &global),
        Commands::Partner(cmd) => commands::partner::run(cmd, &global),
        Commands::Proposal(cmd) => commands::proposal::run(cmd, &global),
        Commands::Engagement(cmd) => commands::engagement::run(cmd, &global),
        Commands::Task(cmd) => commands::task::run(cmd, &global),
        Commands::Employee(cmd) => commands::employee::run(cmd, &global),
        Commands::Browse(args) => commands::browse::run(args, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
