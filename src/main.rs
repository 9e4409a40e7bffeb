use clap::{Parser, Subcommand};
use log::error;
use serde::Serialize;
use std::process::ExitCode;

use notion_storefront::api::models::{ErrorResponse, ListResponse};
use notion_storefront::api::ApiServer;
use notion_storefront::{CatalogResult, Listing, ProductQuery, Storefront, StorefrontConfig};

#[derive(Parser)]
#[command(name = "notion-storefront", version, about = "Serve a Notion product database as a storefront catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print category facets as JSON
    Categories,
    /// Print matching products as JSON
    Products {
        /// Text matched against product name and code
        #[arg(long, default_value = "")]
        q: String,
        /// Category to filter on ("All" for every category)
        #[arg(long, default_value = "")]
        category: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn report<T: Serialize>(result: CatalogResult<Listing<T>>) -> ExitCode {
    match result {
        Ok(listing) => print_json(&ListResponse::from(listing)),
        Err(e) => {
            error!("{}", e);
            print_json(&ErrorResponse::from(&e));
            ExitCode::FAILURE
        }
    }
}

#[actix_web::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match StorefrontConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            print_json(&ErrorResponse::from(&e));
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Serve { host, port } => {
            let server = ApiServer::new(config).bind_to(host, port);
            match server.run().await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("HTTP server error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::Categories => {
            let result = match Storefront::builder().config(config).build() {
                Ok(storefront) => storefront.categories().await,
                Err(e) => Err(e),
            };
            report(result)
        }
        Command::Products { q, category } => {
            let query = ProductQuery::new(q, category);
            let result = match Storefront::builder().config(config).build() {
                Ok(storefront) => storefront.products(&query).await,
                Err(e) => Err(e),
            };
            report(result)
        }
    }
}
