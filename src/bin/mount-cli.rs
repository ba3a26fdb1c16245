use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use mount_gateway::config::load_or_default;
use mount_gateway::routing::{MountResolver, MountTable};

#[derive(Parser)]
#[command(name = "mount-cli")]
#[command(about = "Inspect and query mount-gateway", long_about = None)]
struct Cli {
    /// Admin API base URL
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a path offline against a config file
    Resolve {
        path: String,
        #[arg(short, long)]
        tenant: Option<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the mount table of a config file
    Mounts {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Check a running gateway's status
    Status,
    /// List the mounts of a running gateway
    RemoteMounts,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { path, tenant, config } => {
            let resolver = offline_resolver(config)?;
            let ctx = resolver.resolve(&path, tenant.as_deref());
            println!("{}", serde_json::to_string_pretty(&ctx)?);
            if ctx.has_extra_path_segments {
                eprintln!("Warning: path has more segments than its mount allows");
            }
        }
        Commands::Mounts { config } => {
            let resolver = offline_resolver(config)?;
            let table = resolver.table();
            let summary = serde_json::json!({
                "prefix": table.mount_prefix(),
                "parametric": table.has_parametric_mounts(),
                "mounts": table.info(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Status => {
            let res = admin_get(&cli.url, &cli.key, "/admin/status").await?;
            print_response(res).await?;
        }
        Commands::RemoteMounts => {
            let res = admin_get(&cli.url, &cli.key, "/admin/mounts").await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

fn offline_resolver(config: Option<PathBuf>) -> Result<MountResolver, Box<dyn std::error::Error>> {
    let config = load_or_default(config.as_deref())?;
    Ok(MountResolver::new(MountTable::from_config(&config.mounts)?))
}

async fn admin_get(
    url: &str,
    key: &str,
    path: &str,
) -> Result<reqwest::Response, Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", key))?);

    let res = reqwest::Client::new()
        .get(format!("{}{}", url.trim_end_matches('/'), path))
        .headers(headers)
        .send()
        .await?;
    Ok(res)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
