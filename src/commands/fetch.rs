use std::time::Duration;
use tokio::time::sleep;

use crate::constants::{dashboard_symbols, SYMBOL_FETCH_DELAY_MS};
use crate::services::FinnhubClient;

/// One-shot fetch of the given symbols (or the configured dashboard list),
/// printed to stdout. Uses the same fetch path as the background worker.
pub async fn run(symbols: Vec<String>) {
    let client = match FinnhubClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let symbols: Vec<String> = if symbols.is_empty() {
        dashboard_symbols()
    } else {
        symbols.iter().map(|s| s.trim().to_uppercase()).collect()
    };

    println!("📊 Fetching {} symbols...\n", symbols.len());

    let mut fetched = 0;
    for (i, symbol) in symbols.iter().enumerate() {
        match client.fetch_quote(symbol).await {
            Ok(Some(q)) => {
                let arrow = if q.is_positive() { "▲" } else { "▼" };
                println!(
                    "{:<6} {:<30} {:>10}  {} {} ({}%)",
                    q.symbol, q.company_name, q.current_price, arrow, q.change, q.percentage_change
                );
                fetched += 1;
            }
            Ok(None) => {
                println!("{:<6} (no quote data)", symbol);
            }
            Err(e) => {
                eprintln!("⚠️  {}: {}", symbol, e);
            }
        }

        if i + 1 < symbols.len() {
            sleep(Duration::from_millis(SYMBOL_FETCH_DELAY_MS)).await;
        }
    }

    println!("\n✅ Fetched {} of {} symbols", fetched, symbols.len());
}
