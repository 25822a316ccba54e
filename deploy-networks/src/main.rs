//! Deployment network registry CLI.
//!
//! ```sh
//! deploy-networks init                # Generate default networks.toml
//! deploy-networks list                # List configured networks
//! deploy-networks show ropsten        # Print a descriptor
//! deploy-networks provider ropsten    # Build the provider from the environment
//! ```

use clap::Parser;
use deploy_networks::cmd::{self, Cli, Commands};
use deploy_networks::telemetry::Telemetry;

#[allow(clippy::print_stderr)]
fn main() {
    let cli = Cli::parse();
    Telemetry::new().with_log_level(cli.log_level()).register();

    let result = match cli.command {
        Commands::Init { output, force } => cmd::init::run(&output, force),
        Commands::List { config } => cmd::list::run(config.as_deref()),
        Commands::Show { network, config } => cmd::show::run(&network, config.as_deref()),
        Commands::Provider { network, config } => {
            cmd::provider::run(&network, config.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
