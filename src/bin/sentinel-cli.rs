use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "sentinel-cli")]
#[command(about = "Operator CLI for the Sentinel relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check relay status
    Status,
    /// Audit an address or transaction hash
    Audit {
        /// Address or transaction hash
        target: String,
        /// "address" or "transaction"; resolution falls back automatically
        #[arg(short, long)]
        kind: Option<String>,
    },
    /// Predict the outcome of an entry function call
    Simulate {
        #[arg(long)]
        sender: String,
        /// address::module::function
        #[arg(long)]
        function: String,
        #[arg(long = "type-arg")]
        type_args: Vec<String>,
        #[arg(long = "arg")]
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Audit { target, kind } => {
            let res = client
                .post(format!("{}/api/audit", cli.url))
                .json(&json!({ "target": target, "type": kind }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Simulate {
            sender,
            function,
            type_args,
            args,
        } => {
            let res = client
                .post(format!("{}/api/simulate", cli.url))
                .json(&json!({
                    "sender": sender,
                    "functionId": function,
                    "typeArgs": type_args,
                    "args": args,
                }))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
