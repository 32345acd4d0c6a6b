use clap::Parser;
use std::process;

use tudoo::cli::commands::{Cli, Commands};
use tudoo::cli;
use tudoo::logging;
use tudoo::store::View;

fn main() {
    logging::init();
    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(json_output),
        Commands::Signup { email, password } => cli::auth::run_signup(&email, &password, json_output),
        Commands::Login { email, password } => cli::auth::run_login(&email, &password, json_output),
        Commands::Logout => cli::auth::run_logout(json_output),
        Commands::Dashboard => cli::pages::run_view(View::Dashboard, json_output),
        Commands::Completed => cli::pages::run_view(View::Completed, json_output),
        Commands::Settings => cli::pages::run_settings(json_output),
        Commands::Task(cmd) => cli::task::run(cmd, json_output),
        Commands::Shell { view } => cli::shell::run(view.into(), json_output),
    };

    process::exit(exit_code);
}
