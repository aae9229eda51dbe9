//! boltgraph CLI: inspect connection routing and query parameters
//!
//! Nothing here needs a running server: the commands show what the client
//! would hand to a Bolt driver.

use anyhow::{anyhow, Context, Result};
use boltgraph::{BoltGraphClient, ClientConfig, DriverValue};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boltgraph", version, about = "Bolt graph client CLI")]
struct Cli {
    /// Connection URI
    #[arg(long, default_value = "bolt://localhost:7687", global = true, env = "BOLTGRAPH_URI")]
    uri: String,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the addresses a routing driver would be given
    Resolve {
        /// Alternate host (repeatable)
        #[arg(long = "host")]
        hosts: Vec<String>,
    },
    /// Show the driver parameters for a Cypher statement
    Params {
        /// The Cypher query string
        cypher: String,

        /// Parameter as key=<json> (repeatable)
        #[arg(long = "param")]
        params: Vec<String>,
    },
    /// Load and validate a YAML client configuration
    CheckConfig {
        /// Path to the configuration file
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Resolve { hosts } => run_resolve(&cli.uri, hosts, &cli.format),
        Commands::Params { cypher, params } => run_params(&cli.uri, cypher, params, &cli.format),
        Commands::CheckConfig { path } => run_check_config(path, &cli.format),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_resolve(uri: &str, hosts: &[String], format: &OutputFormat) -> Result<()> {
    let client = BoltGraphClient::with_hosts(uri, hosts)?;
    let addresses: Vec<_> = match client.address_resolver() {
        Some(resolver) => resolver.resolve(None).into_iter().collect(),
        None => vec![client.uri().address()],
    };
    debug!("Resolved {} address(es) for {}", addresses.len(), client.uri());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&addresses)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Host", "Port"]);
            for address in &addresses {
                table.add_row(vec![address.host.clone(), address.port.to_string()]);
            }
            println!("{}", table);
            println!("Routing: {}", if client.uri().is_routing() { "yes" } else { "no" });
        }
    }
    Ok(())
}

fn run_params(uri: &str, cypher: &str, params: &[String], format: &OutputFormat) -> Result<()> {
    let client = BoltGraphClient::new(uri)?;
    let mut query = client.cypher().raw(cypher);
    for param in params {
        let (key, raw) = param
            .split_once('=')
            .ok_or_else(|| anyhow!("parameter '{}' must look like key=<json>", param))?;
        let value: serde_json::Value =
            serde_json::from_str(raw).with_context(|| format!("parameter '{}' is not valid JSON", key))?;
        query = query.with_param(key, &value)?;
    }

    let built = query.query();
    let driver_params = built.to_driver_parameters(&client)?;
    let mut keys: Vec<&String> = driver_params.keys().collect();
    keys.sort();

    match format {
        OutputFormat::Json => {
            let object: serde_json::Map<String, serde_json::Value> = keys
                .iter()
                .map(|k| ((*k).clone(), driver_params[*k].to_json()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&object)?);
        }
        OutputFormat::Table => {
            println!("{}\n", built.text());
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Parameter", "Type", "Value"]);
            for key in keys {
                let value: &DriverValue = &driver_params[key];
                table.add_row(vec![key.clone(), value.type_name().to_string(), value.to_string()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn run_check_config(path: &str, format: &OutputFormat) -> Result<()> {
    let config = ClientConfig::from_file(path).with_context(|| format!("cannot load {}", path))?;
    let client = BoltGraphClient::from_config(&config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config.redacted())?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Setting", "Value"]);
            table.add_row(vec!["uri".to_string(), client.uri().to_string()]);
            table.add_row(vec![
                "hosts".to_string(),
                client.address_resolver().map(|r| r.len()).unwrap_or(0).to_string(),
            ]);
            table.add_row(vec!["encrypted".to_string(), config.encrypted.to_string()]);
            table.add_row(vec!["property_case".to_string(), format!("{:?}", client.property_case())]);
            table.add_row(vec![
                "database".to_string(),
                config.database.clone().unwrap_or_else(|| "(server default)".to_string()),
            ]);
            println!("{}", table);
        }
    }
    Ok(())
}
