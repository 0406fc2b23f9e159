use clap::Parser;
use dayplan::cli::commands::{Cli, Commands};
use dayplan::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let plan_dir = cli.plan_dir.clone();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = dayplan::tui::run(plan_dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Init(args)) => {
            // Init is handled before plan discovery
            if let Err(e) = handlers::cmd_init(args) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
