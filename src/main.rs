use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payflow::application::orchestrator::{RedoPolicy, TransactionOrchestrator};
use payflow::domain::fees::FeeStrategy;
use payflow::infrastructure::audit::AuditLog;
use payflow::interfaces::csv::request_reader::{OpType, Request, RequestReader};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input requests CSV file
    input: PathBuf,

    /// Percentage fee rate applied to each transaction
    #[arg(long, conflicts_with = "fixed_fee")]
    fee_rate: Option<Decimal>,

    /// Flat fee applied to each transaction
    #[arg(long)]
    fixed_fee: Option<Decimal>,

    /// Keep the redo history when a new transaction is processed
    #[arg(long)]
    keep_redo: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let audit = Rc::new(AuditLog::new());
    let policy = if cli.keep_redo {
        RedoPolicy::Preserve
    } else {
        RedoPolicy::ClearOnProcess
    };
    let mut orchestrator =
        TransactionOrchestrator::new(Rc::clone(&audit)).with_redo_policy(policy);
    if let Some(rate) = cli.fee_rate {
        orchestrator.set_fee_strategy(FeeStrategy::percentage(rate));
    }
    if let Some(value) = cli.fixed_fee {
        orchestrator.set_fee_strategy(FeeStrategy::fixed(value));
    }

    // Process requests
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = RequestReader::new(file);
    for request_result in reader.requests() {
        match request_result {
            Ok(request) => {
                if let Err(e) = run_request(&mut orchestrator, request) {
                    eprintln!("Error processing request: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading request: {}", e);
            }
        }
    }

    // Dump the audit trail
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for entry in audit.entries() {
        writeln!(out, "{} {}", entry.at.to_rfc3339(), entry.message).into_diagnostic()?;
    }

    Ok(())
}

fn run_request(
    orchestrator: &mut TransactionOrchestrator,
    request: Request,
) -> payflow::error::Result<()> {
    match request.op {
        OpType::Undo => {
            orchestrator.undo_last()?;
        }
        OpType::Redo => {
            orchestrator.redo_last()?;
        }
        OpType::Payment | OpType::Transfer | OpType::Deposit => {
            orchestrator.process(request.into_transaction()?)?;
        }
    }
    Ok(())
}
