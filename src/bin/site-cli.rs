use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mtb_site::config::{self, ConfigError};
use mtb_site::routing::{RouteTable, Target};

#[derive(Parser)]
#[command(name = "site-cli")]
#[command(about = "Inspect the site's route table without starting the server", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List route bindings in resolution order
    Routes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which binding a request path resolves to
    Resolve {
        /// Request path, e.g. /admin/login/
        path: String,
    },
    /// Validate configuration and build the table
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            for error in &errors {
                eprintln!("error: {}", error);
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    let table = RouteTable::build(&config)?;

    match cli.command {
        Commands::Routes { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                for (position, binding) in table.bindings().iter().enumerate() {
                    println!("{:>2}  {}", position, binding);
                }
            }
        }
        Commands::Resolve { path } => match table.resolve(&path) {
            Some(resolved) => {
                let binding = resolved.binding;
                match &binding.target {
                    Target::Upstream { address } => {
                        println!("{} -> {} (upstream {})", path, binding.name, address)
                    }
                    Target::Files { root } => println!(
                        "{} -> {} (file {})",
                        path,
                        binding.name,
                        root.join(resolved.remainder).display()
                    ),
                }
            }
            None => {
                eprintln!("{}: no route matched", path);
                std::process::exit(1);
            }
        },
        Commands::Check => {
            println!(
                "ok: {} bindings (debug {})",
                table.len(),
                if config.debug { "on" } else { "off" }
            );
        }
    }

    Ok(())
}
