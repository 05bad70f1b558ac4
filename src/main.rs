use anyhow::Result;
use std::env;
use std::path::PathBuf;

use stock_registry::{init_logging, Config, LoadOutcome, Registry};

struct Args {
    config_path: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        config_path: None,
        json: false,
    };

    for arg in env::args().skip(1) {
        if arg == "--json" {
            args.json = true;
        } else {
            args.config_path = Some(PathBuf::from(arg));
        }
    }

    args
}

fn main() -> Result<()> {
    let args = parse_args();

    init_logging()?;

    let config = Config::load_or_default(args.config_path.as_ref())?;
    let mut registry = Registry::from_config(&config);
    let outcome = registry.load_from_file(&config)?;

    if args.json {
        print_json(&registry, &outcome)?;
    } else {
        print_report(&registry, &outcome);
    }

    if outcome == LoadOutcome::NothingLoaded {
        std::process::exit(1);
    }

    Ok(())
}

fn print_json(registry: &Registry, outcome: &LoadOutcome) -> Result<()> {
    let report = serde_json::json!({
        "outcome": outcome,
        "loaded": registry.len(),
        "errors": registry.errors(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_report(registry: &Registry, outcome: &LoadOutcome) {
    println!("📈 Stock Registry");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    match outcome {
        LoadOutcome::Loaded { count } => {
            println!("✅ {} ISIN loaded, no errors found", count);
        }
        LoadOutcome::LoadedWithErrors { count } => {
            println!("⚠️  {} ISIN loaded, errors found:", count);
            for line in registry.errors().details() {
                println!("   {}", line);
            }
        }
        LoadOutcome::NothingLoaded => {
            eprintln!("❌ No ISIN loaded.");
            if registry.errors().errors_found {
                eprintln!("   {}", registry.errors().summary());
            }
        }
    }
}
