//! Pasture CLI
//!
//! Command-line access to the dashboard shell:
//! - Inspect and resolve the route table
//! - Issue requests through the shared API client
//! - Query fields and sensor series
//! - Generate a default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pasture_dashboard::{
    config::generate_default_config, logging, ApiClient, Config, PastureApi, RequestOptions,
    RouteTable, TimeseriesQuery,
};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pasture")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pasture Manager dashboard shell")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base address (overrides config and PASTURE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List dashboard routes
    Routes,

    /// Resolve a path to its view
    Resolve {
        /// Exact path, e.g. /fields
        path: String,
    },

    /// Print the path of a named route
    Link {
        /// Route name, e.g. Analytics
        name: String,
    },

    /// Send a raw request through the API client
    Request {
        /// HTTP method (GET, POST, PUT, PATCH, DELETE)
        method: String,
        /// Path relative to the base address
        path: String,
        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,
        /// Extra headers in "Name: value" format
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },

    /// Check backend health
    Health,

    /// List fields
    Fields,

    /// Show one field
    Field {
        /// Field ID
        id: String,
    },

    /// Show sensor readings for a field
    Timeseries {
        /// Field ID
        id: String,
        /// Metric type (soil_moisture, ndvi, air_temp, grass_height)
        #[arg(short, long)]
        metric: Option<String>,
        /// Number of periods
        #[arg(short, long, default_value = "48")]
        periods: u32,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.client.base_url = url.trim_end_matches('/').to_string();
    }

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let json = cli.format == "json";

    match cli.command {
        Commands::Routes => {
            let table = RouteTable::dashboard();
            if json {
                let routes: Vec<_> = table
                    .iter()
                    .map(|e| serde_json::json!({"path": e.path, "name": e.name, "view": e.view}))
                    .collect();
                print_json(&routes)?;
            } else {
                println!("{:<12} {}", "PATH", "NAME");
                for entry in table.iter() {
                    println!("{:<12} {}", entry.path, entry.name);
                }
            }
        }

        Commands::Resolve { path } => {
            let table = RouteTable::dashboard();
            let view = table.resolve(&path)?;
            println!("{} -> {}", path, view);
        }

        Commands::Link { name } => {
            let table = RouteTable::dashboard();
            println!("{}", table.resolve_by_name(&name)?);
        }

        Commands::Request {
            method,
            path,
            body,
            headers,
        } => {
            let client = ApiClient::new(config.client)?;
            let method = Method::from_bytes(method.to_uppercase().as_bytes())
                .with_context(|| format!("Invalid HTTP method: {}", method))?;

            let mut options = RequestOptions::new();
            if let Some(body) = body {
                let value: serde_json::Value =
                    serde_json::from_str(&body).context("Request body is not valid JSON")?;
                options = options.json(&value);
            }
            for header in headers {
                let (name, value) = parse_header(&header)?;
                options = options.header(name, value);
            }

            let payload: serde_json::Value = client.send(method, &path, options).await?;
            print_json(&payload)?;
        }

        Commands::Health => {
            let client = ApiClient::new(config.client)?;
            let health = PastureApi::new(&client).health().await?;
            if json {
                print_json(&health)?;
            } else {
                println!("Pasture Dashboard v{}", env!("CARGO_PKG_VERSION"));
                println!("API: {}", client.base_url());
                println!("Status: {}", health.status);
            }
        }

        Commands::Fields => {
            let client = ApiClient::new(config.client)?;
            let fields = PastureApi::new(&client).list_fields().await?;
            if json {
                print_json(&fields)?;
            } else {
                println!("{:<12} {:<12} {:<24} {}", "ID", "FARM", "NAME", "SOIL");
                for field in &fields {
                    println!(
                        "{:<12} {:<12} {:<24} {}",
                        field.id,
                        field.farm_id,
                        field.name,
                        field.soil_type.as_deref().unwrap_or("-")
                    );
                }
                println!();
                println!("{} fields", fields.len());
            }
        }

        Commands::Field { id } => {
            let client = ApiClient::new(config.client)?;
            let field = PastureApi::new(&client).get_field(&id).await?;
            if json {
                print_json(&field)?;
            } else {
                println!("{} ({})", field.name, field.id);
                println!("  Farm: {}", field.farm_id);
                if let Some(soil) = &field.soil_type {
                    println!("  Soil: {}", soil);
                }
                if let Some(date) = &field.establishment_date {
                    println!("  Established: {}", date);
                }
                if let Some(metrics) = &field.latest_metrics {
                    println!("  Latest metrics:");
                    for (name, value) in metrics {
                        println!("    {}: {}", name, value);
                    }
                }
            }
        }

        Commands::Timeseries {
            id,
            metric,
            periods,
        } => {
            let client = ApiClient::new(config.client)?;
            let mut query = TimeseriesQuery::default().periods(periods);
            if let Some(metric) = metric {
                query = query.metric(metric);
            }

            let readings = PastureApi::new(&client)
                .field_timeseries(&id, &query)
                .await?;
            if json {
                print_json(&readings)?;
            } else {
                println!("{:<28} {:<16} {:>10}", "TIMESTAMP", "METRIC", "VALUE");
                for r in &readings {
                    let value = r
                        .metric_value
                        .map(|v| format!("{:.3}", v))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<28} {:<16} {:>10}",
                        r.sensor_ts.as_deref().unwrap_or("-"),
                        r.metric_type.as_deref().unwrap_or("-"),
                        value
                    );
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse a "Name: value" header argument
fn parse_header(raw: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
    let Some((name, value)) = raw.split_once(':') else {
        bail!("Header must be in \"Name: value\" format: {}", raw);
    };

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .with_context(|| format!("Invalid header name in {:?}", raw))?;
    let value = HeaderValue::from_str(value.trim())
        .with_context(|| format!("Invalid header value in {:?}", raw))?;

    Ok((name, value))
}
