//! Multisig Wallet CLI Application
//!
//! A command-line interface for the threshold-approval wallet ledger.

use clap::{Parser, Subcommand};
use multisig_ledger::cli::{self, AppState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multisig")]
#[command(version = "0.1.0")]
#[command(about = "A threshold-approval multisig wallet", long_about = None)]
struct Cli {
    /// Data directory for wallet storage
    #[arg(short, long, default_value = ".multisig_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new wallet with an owner set and threshold
    Init {
        /// Owner address (repeat for each owner)
        #[arg(short, long = "owner", required = true)]
        owners: Vec<String>,

        /// Confirmations required to execute a transaction
        #[arg(short, long)]
        required: usize,
    },

    /// Submit a new transaction proposal
    Submit {
        /// Acting owner address (defaults to $MULTISIG_OWNER)
        #[arg(short, long)]
        from: Option<String>,

        /// Recipient address
        #[arg(short, long)]
        to: String,

        /// Amount to transfer, as a decimal
        #[arg(short, long)]
        amount: String,

        /// Optional call data, hex-encoded
        #[arg(long)]
        data: Option<String>,
    },

    /// Confirm a pending transaction
    Confirm {
        /// Acting owner address (defaults to $MULTISIG_OWNER)
        #[arg(short, long)]
        from: Option<String>,

        /// Transaction index
        #[arg(short, long)]
        index: u64,
    },

    /// Revoke a prior confirmation
    Revoke {
        /// Acting owner address (defaults to $MULTISIG_OWNER)
        #[arg(short, long)]
        from: Option<String>,

        /// Transaction index
        #[arg(short, long)]
        index: u64,
    },

    /// Execute a fully confirmed transaction
    Execute {
        /// Acting owner address (defaults to $MULTISIG_OWNER)
        #[arg(short, long)]
        from: Option<String>,

        /// Transaction index
        #[arg(short, long)]
        index: u64,
    },

    /// Show transaction details
    Show {
        /// Transaction index
        #[arg(short, long)]
        index: u64,
    },

    /// Show the total transaction count
    Count,

    /// List the owner set
    Owners,

    /// List pending transactions
    Pending,

    /// List executed dispatches
    Journal,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Handle init command separately (doesn't need full state)
    if let Commands::Init { owners, required } = &cli.command {
        return cli::cmd_init(&cli.data_dir, owners, *required);
    }

    // Initialize application state
    let mut state = AppState::open(cli.data_dir.clone())?;

    // Process commands
    match cli.command {
        Commands::Init { .. } => unreachable!(),

        Commands::Submit {
            from,
            to,
            amount,
            data,
        } => {
            let caller = cli::resolve_caller(from.as_deref())?;
            cli::cmd_submit(&mut state, &caller, &to, &amount, data.as_deref())?;
        }

        Commands::Confirm { from, index } => {
            let caller = cli::resolve_caller(from.as_deref())?;
            cli::cmd_confirm(&mut state, &caller, index)?;
        }

        Commands::Revoke { from, index } => {
            let caller = cli::resolve_caller(from.as_deref())?;
            cli::cmd_revoke(&mut state, &caller, index)?;
        }

        Commands::Execute { from, index } => {
            let caller = cli::resolve_caller(from.as_deref())?;
            cli::cmd_execute(&mut state, &caller, index)?;
        }

        Commands::Show { index } => {
            cli::cmd_show(&state, index)?;
        }

        Commands::Count => {
            cli::cmd_count(&state)?;
        }

        Commands::Owners => {
            cli::cmd_owners(&state)?;
        }

        Commands::Pending => {
            cli::cmd_pending(&state)?;
        }

        Commands::Journal => {
            cli::cmd_journal(&state)?;
        }
    }

    Ok(())
}
