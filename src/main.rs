use ait::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
        Commands::Init(args) => ait::cli::commands::init::run(args, &global),
        Commands::Add(args) => ait::cli::commands::add::run(args, &global),
        Commands::List(args) => ait::cli::commands::list::run(args, &global),
        Commands::Search(args) => ait::cli::commands::search::run(args, &global),
        Commands::Edit(args) => ait::cli::commands::edit::run(args, &global),
        Commands::Cancel(args) => ait::cli::commands::cancel::run(args, &global),
        Commands::Restore(args) => ait::cli::commands::restore::run(args, &global),
        Commands::Import(args) => ait::cli::commands::import::run(args, &global),
        Commands::Export(args) => ait::cli::commands::export::run(args, &global),
        Commands::Report(cmd) => ait::cli::commands::report::run(cmd, &global),
        Commands::Category(cmd) => ait::cli::commands::category::run(cmd, &global),
        Commands::User(cmd) => ait::cli::commands::user::run(cmd, &global),
        Commands::Completions(args) => ait::cli::commands::completions::run(args),
    }
}
