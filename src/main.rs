use anyhow::{Context, Result};
use std::env;
use std::io::{self, BufRead, Write};

use banking_assistant::{init_tracing, AppConfig, Assistant, Snapshot, ToolName};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("warn");

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("ask") => run_ask(&args[2..].join(" ")).await?,
        Some("tools") => run_tools(),
        Some(other) => {
            eprintln!("❌ Unknown command: {}", other);
            eprintln!("   Usage: banking-assistant [ask <message...> | tools]");
            std::process::exit(2);
        }
        None => run_interactive().await?,
    }

    Ok(())
}

fn load() -> Result<(Assistant, Snapshot)> {
    let config = AppConfig::from_env()?;
    let snapshot = match &config.snapshot_path {
        Some(path) => Snapshot::from_file(path)?,
        None => Snapshot::seed(),
    };
    Ok((Assistant::from_config(&config), snapshot))
}

async fn run_ask(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        eprintln!("❌ Nothing to ask. Example: banking-assistant ask balance for C001");
        std::process::exit(2);
    }

    let (assistant, snapshot) = load()?;
    let reply = assistant.classify_and_respond(message, &snapshot).await;
    println!("{}", reply.text);

    Ok(())
}

fn run_tools() {
    println!("🧰 Available tools");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for tool in ToolName::ALL {
        println!("  {}", tool.describe());
    }
}

async fn run_interactive() -> Result<()> {
    let (assistant, snapshot) = load()?;

    println!("🤖 Banking Assistant");
    println!(
        "✓ {} customers, {} accounts, {} transactions loaded",
        snapshot.customers.len(),
        snapshot.accounts.len(),
        snapshot.transactions.len()
    );
    println!("Ask about customers, balances or transactions. Empty line or Ctrl+D to quit.\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin.lock().read_line(&mut line).context("Failed to read input")?;
        if read == 0 || line.trim().is_empty() {
            break;
        }

        let reply = assistant.classify_and_respond(line.trim(), &snapshot).await;
        println!("{}\n", reply.text);
    }

    println!("\n✅ Bye");
    Ok(())
}
