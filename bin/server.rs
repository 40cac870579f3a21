// Banking Assistant - Web Server
// Chat endpoint for the operations dashboard

use anyhow::{Context, Result};
use banking_assistant::server::{router, AppState};
use banking_assistant::{init_tracing, AppConfig, Assistant, Snapshot};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");

    println!("🌐 Banking Assistant - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = AppConfig::from_env()?;

    let snapshot = match &config.snapshot_path {
        Some(path) => {
            let snapshot = Snapshot::from_file(path)?;
            println!("✓ Snapshot loaded: {:?}", path);
            snapshot
        }
        None => {
            println!("✓ Using built-in seed data");
            Snapshot::seed()
        }
    };

    let assistant = Assistant::from_config(&config);
    if assistant.has_delegate() {
        println!("✓ Primary classifier: delegate enabled");
    } else {
        println!("✓ Primary classifier: not configured (keyword rules only)");
    }

    let app = router(AppState::new(assistant, snapshot), config.request_timeout);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Server listening");
    println!("\n🚀 Server running on http://{}", config.bind_addr);
    println!("   Chat: POST /api/chat");
    println!("   Data: GET  /api/snapshot");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
