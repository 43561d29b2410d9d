use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use radix_router::config::load_config;
use radix_router::http::build_router;
use radix_router::routing::HttpMethod;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Inspect a route table without starting the server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a method and path against the table
    Match { method: String, path: String },
    /// Print the compacted route tree
    Tree,
    /// List routes in matching order
    Routes,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let router = build_router(&config.routes)?;

    match cli.command {
        Commands::Match { method, path } => {
            let method: HttpMethod = method.parse()?;
            let result = match router.find_route(method, &path) {
                Some(found) => json!({
                    "matched": true,
                    "method": method,
                    "route": found.pattern,
                    "status": found.handler.status().as_u16(),
                    "params": found.params,
                }),
                None => json!({ "matched": false, "method": method, "path": path }),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Tree => {
            print!("{}", router.tree());
        }
        Commands::Routes => {
            let routes: Vec<_> = router
                .routes()
                .into_iter()
                .map(|binding| {
                    json!({
                        "method": binding.method,
                        "path": binding.pattern,
                        "status": binding.handler.status().as_u16(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
    }

    Ok(())
}
