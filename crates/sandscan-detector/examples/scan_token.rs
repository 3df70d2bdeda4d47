use std::env;

use sandscan_core::traits::TransactionSource;
use sandscan_core::utils::{explorer_url, format_timestamp, short_signature};
use sandscan_detector::{detect_sandwiches, ingest, DetectionOptions, ProgramAllowListClassifier};
use sandscan_rpc::{HeliusClient, HeliusConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Uso: {} <HELIUS_API_KEY> <TOKEN_MINT> [LIMIT]", args[0]);
        std::process::exit(1);
    }

    let mint = &args[2];
    let limit: usize = match args.get(3) {
        Some(raw) => raw.parse()?,
        None => 100,
    };

    let client = HeliusClient::new(HeliusConfig::new(args[1].clone()))?;
    let classifier = ProgramAllowListClassifier::with_known_programs();

    println!("🔍 Buscando {limit} transações de {mint}...");
    let raw = client.recent_transactions(mint, limit).await?;
    let records = ingest(&raw, &classifier, mint);

    let options = DetectionOptions::default().max_bracket_seconds(Some(30.0));
    let result = detect_sandwiches(records, &options);

    let dex = result.transactions.iter().filter(|tx| tx.is_dex).count();
    println!(
        "{} transações, {} em DEX, {} possíveis sandwiches",
        result.transactions.len(),
        dex,
        result.potential_sandwiches.len()
    );

    for (i, sandwich) in result.potential_sandwiches.iter().enumerate() {
        let when = sandwich
            .front()
            .timestamp
            .and_then(format_timestamp)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "\n#{} {} em {} (Δ {:.0}s / {:.0}s)",
            i + 1,
            sandwich.pattern_type,
            when,
            sandwich.time_diffs[0],
            sandwich.time_diffs[1]
        );
        for (role, tx) in ["front-run", "vítima", "back-run"].iter().zip(&sandwich.transactions) {
            println!("  {:<9} {} {}", role, short_signature(&tx.signature), explorer_url(&tx.signature));
        }
    }

    Ok(())
}
