//! Interactive stdin chat with the sales agent.
//!
//! Run with: cargo run -p openai-agent --bin sales_chat
//!
//! Make sure to set environment variables in .env:
//!   OPENAI_API_KEY - API key for the completion service
//!   CATALOG_PATH   - vehicle catalog CSV (default: data/vehicles.csv)

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use inventory::Catalog;
use openai_agent::{OpenAiConfig, SalesAgent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = OpenAiConfig::from_env()?;
    let catalog_path =
        std::env::var("CATALOG_PATH").unwrap_or_else(|_| "data/vehicles.csv".to_string());
    let catalog = Arc::new(Catalog::load_or_empty(&catalog_path));

    println!("Model: {}", config.model);
    println!("Catalog: {} listings from {}", catalog.len(), catalog_path);

    let agent = SalesAgent::from_config(config, catalog)?;
    let user_id =
        std::env::var("SALES_CHAT_USER").unwrap_or_else(|_| "+10000000000".to_string());

    println!("Type a message and press Enter (Ctrl-D to exit).\n");
    print!("> ");
    io::stdout().flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let text = line.trim();
        if !text.is_empty() {
            match agent.handle_message(&user_id, text).await {
                Ok(reply) => println!("{}\n", reply),
                Err(e) => eprintln!("Error: {}\n", e),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }

    Ok(())
}
