use clap::Parser;
use registration_page::cli::commands::{cmd_check_config, cmd_locators, cmd_register, cmd_signup};
use registration_page::cli::config::{Cli, Commands, load_config};
use registration_page::cli::logging::init_logging;
use registration_page::flow::signup::SignupDetails;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    let config = load_config(cli.config.as_deref())?;

    // Resolve WebDriver endpoint: CLI/env > config > default
    let endpoint = config.resolve_endpoint(cli.webdriver.as_deref());

    match cli.command {
        Commands::Register {
            name,
            email,
            session,
            expect,
        } => {
            let details = SignupDetails { name, email };
            let matched = cmd_register(&config, endpoint, session.as_deref(), &details, expect)?;
            if !matched {
                std::process::exit(1);
            }
        }
        Commands::Signup {
            name,
            email,
            session,
        } => {
            let details = SignupDetails { name, email };
            cmd_signup(&config, endpoint, session.as_deref(), &details)?;
        }
        Commands::CheckConfig => {
            if !cmd_check_config(&config) {
                std::process::exit(1);
            }
        }
        Commands::Locators => {
            cmd_locators(&config)?;
        }
    }

    Ok(())
}
