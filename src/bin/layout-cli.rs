use clap::{Parser, Subcommand};
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "layout-cli")]
#[command(about = "Query a running layout service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch layout data for a page
    Layout {
        /// Page path, e.g. /about
        path: String,

        /// Language code
        #[arg(short, long)]
        lang: Option<String>,

        /// Layout service configuration name
        #[arg(long, default_value = "jss")]
        configuration: String,
    },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let endpoint = match cli.command {
        Commands::Layout {
            path,
            lang,
            configuration,
        } => {
            let mut endpoint = base.join(&format!("sitecore/api/layout/render/{configuration}"))?;
            endpoint.query_pairs_mut().append_pair("item", &path);
            if let Some(lang) = lang {
                endpoint.query_pairs_mut().append_pair("sc_lang", &lang);
            }
            endpoint
        }
        Commands::Health => base.join("healthz")?,
    };

    let res = client.get(endpoint).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let outcome = res
        .headers()
        .get("x-layout-outcome")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if let Some(outcome) = outcome {
        eprintln!("Status: {status} ({outcome})");
    } else if !status.is_success() {
        eprintln!("Error: layout service returned status {status}");
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{text}"),
    }
    Ok(())
}
