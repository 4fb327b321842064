use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::constants::{dashboard_symbols, fetch_interval_secs};
use crate::server;
use crate::services::{FinnhubClient, HealthStats, QuoteStore};
use crate::worker;

pub async fn run(port: u16) {
    println!("🚀 Starting stockboard server on port {}", port);

    let client = match FinnhubClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let symbols = dashboard_symbols();
    println!(
        "📈 Tracking {} symbols, refreshing every {}s",
        symbols.len(),
        fetch_interval_secs()
    );

    let shared_store = Arc::new(QuoteStore::new());
    let shared_health_stats = Arc::new(RwLock::new(HealthStats::default()));
    let start_time = Instant::now();

    // Spawn the background quote worker
    println!("⚙️  Spawning quote worker...");
    let worker_store = shared_store.clone();
    let worker_health = shared_health_stats.clone();
    tokio::spawn(async move {
        worker::run_quote_worker(client, worker_store, worker_health, symbols).await;
    });

    // Spawn uptime tracker
    let uptime_health_stats = shared_health_stats.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;
            let mut health = uptime_health_stats.write().await;
            health.uptime_secs = start_time.elapsed().as_secs();
        }
    });

    println!("🌐 Starting HTTP server...");
    println!("   Dashboard:  http://localhost:{}/", port);
    println!("   Quotes API: http://localhost:{}/api/stocks", port);
    println!();

    if let Err(e) = server::serve(shared_store, shared_health_stats, port).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
