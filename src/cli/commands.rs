//! CLI commands for the multisig wallet
//!
//! Implements all command handlers for the CLI interface.

use crate::ledger::{Address, Ledger, OwnerSet, TxStatus};
use crate::storage::{Storage, StorageConfig, WalletState};
use crate::units::{format_units, parse_units};
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Environment variable naming the acting owner address
pub const OWNER_ENV: &str = "MULTISIG_OWNER";

/// Application state
pub struct AppState {
    pub wallet: WalletState,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load application state from an initialized data directory
    pub fn open(data_dir: PathBuf) -> CliResult<Self> {
        let storage_config = StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        };
        let storage = Storage::new(storage_config)?;

        if !storage.exists() {
            return Err(format!(
                "no wallet found in {:?} - run `multisig init` first",
                data_dir
            )
            .into());
        }

        let wallet = storage.load()?;

        Ok(Self {
            wallet,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.wallet)?;
        Ok(())
    }
}

/// Resolve the acting owner from `--from` or the environment
pub fn resolve_caller(from: Option<&str>) -> CliResult<Address> {
    let raw = match from {
        Some(f) => f.to_string(),
        None => std::env::var(OWNER_ENV).map_err(|_| {
            format!("no caller identity: pass --from or set {}", OWNER_ENV)
        })?,
    };

    Ok(raw.parse::<Address>()?)
}

/// Preflight: warn early when the caller is not an owner
///
/// The ledger rejects non-owners anyway; this just gives a friendlier
/// message with the owner list, the way the original wallet frontends do.
fn check_owner(ledger: &Ledger, caller: &Address) -> bool {
    if ledger.owner_set().is_owner(caller) {
        return true;
    }

    println!("❌ {} is not an owner of this wallet", caller);
    println!("   Owners are:");
    for owner in ledger.owners() {
        println!("   └─ {}", owner);
    }
    false
}

/// Initialize a new wallet
pub fn cmd_init(data_dir: &Path, owner_args: &[String], required: usize) -> CliResult<()> {
    let storage_config = StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    };
    let storage = Storage::new(storage_config)?;

    if storage.exists() {
        println!("⚠️  Wallet already exists at {:?}", data_dir);
        return Ok(());
    }

    let mut owners = Vec::with_capacity(owner_args.len());
    for raw in owner_args {
        owners.push(raw.parse::<Address>()?);
    }

    let set = OwnerSet::new(owners, required)?;
    let description = set.description();
    let wallet = WalletState::new(Ledger::new(set));
    storage.save(&wallet)?;

    println!("✅ Multisig wallet initialized ({})", description);
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   Owners:");
    for owner in wallet.ledger.owners() {
        println!("   └─ {}", owner);
    }
    println!("   Required confirmations: {}", required);

    Ok(())
}

/// Submit a new transaction proposal
pub fn cmd_submit(
    state: &mut AppState,
    caller: &Address,
    to: &str,
    amount: &str,
    data: Option<&str>,
) -> CliResult<()> {
    if !check_owner(&state.wallet.ledger, caller) {
        return Ok(());
    }

    let target: Address = to.parse()?;
    let value = parse_units(amount)?;
    let payload = match data {
        Some(d) => hex::decode(d.trim_start_matches("0x"))?,
        None => Vec::new(),
    };

    let index = state.wallet.ledger.submit(caller, target, value, payload)?;
    state.save()?;

    println!("📤 Transaction submitted");
    println!("   ├─ Index: {}", index);
    println!("   ├─ To: {}", target);
    println!("   └─ Amount: {}", format_units(value));
    println!("\n   Owners must now confirm: multisig confirm --index {}", index);

    Ok(())
}

/// Confirm a pending transaction
pub fn cmd_confirm(state: &mut AppState, caller: &Address, index: u64) -> CliResult<()> {
    if !check_owner(&state.wallet.ledger, caller) {
        return Ok(());
    }

    let count = state.wallet.ledger.approve(caller, index)?;
    state.save()?;

    let required = state.wallet.ledger.required_confirmations();
    println!("✅ Transaction {} confirmed ({}/{})", index, count, required);
    if count >= required {
        println!("   Ready to execute: multisig execute --index {}", index);
    }

    Ok(())
}

/// Revoke a prior confirmation
pub fn cmd_revoke(state: &mut AppState, caller: &Address, index: u64) -> CliResult<()> {
    if !check_owner(&state.wallet.ledger, caller) {
        return Ok(());
    }

    let count = state.wallet.ledger.revoke(caller, index)?;
    state.save()?;

    let required = state.wallet.ledger.required_confirmations();
    println!("↩️  Confirmation revoked ({}/{} remain)", count, required);

    Ok(())
}

/// Execute a fully confirmed transaction
pub fn cmd_execute(state: &mut AppState, caller: &Address, index: u64) -> CliResult<()> {
    if !check_owner(&state.wallet.ledger, caller) {
        return Ok(());
    }

    let wallet = &mut state.wallet;
    let result = wallet.ledger.execute(caller, index, &mut wallet.journal);

    // Persist regardless of dispatch outcome: a failed dispatch still
    // marks the transaction executed
    state.save()?;

    let receipt = result?;
    println!("🚀 Transaction {} executed", index);
    println!("   └─ Receipt: {}", receipt.id);

    Ok(())
}

/// Show one transaction
pub fn cmd_show(state: &AppState, index: u64) -> CliResult<()> {
    let ledger = &state.wallet.ledger;
    let tx = ledger.transaction(index)?;
    let required = ledger.required_confirmations();

    let status = match tx.status(required) {
        TxStatus::AwaitingConfirmations => "awaiting confirmations",
        TxStatus::Confirmed => "confirmed, ready to execute",
        TxStatus::Executed => "executed",
    };

    println!("📄 Transaction {}", tx.index);
    println!("   ├─ To: {}", tx.target);
    println!("   ├─ Amount: {}", format_units(tx.value));
    println!("   ├─ Data: 0x{}", hex::encode(&tx.payload));
    println!("   ├─ Executed: {}", tx.executed);
    println!(
        "   ├─ Confirmations: {}/{}",
        tx.confirmation_count(),
        required
    );
    println!("   ├─ Status: {}", status);
    println!(
        "   └─ Submitted: {}",
        tx.submitted_at.format("%Y-%m-%d %H:%M:%S")
    );

    Ok(())
}

/// Show the total transaction count
pub fn cmd_count(state: &AppState) -> CliResult<()> {
    println!(
        "Total transactions: {}",
        state.wallet.ledger.transaction_count()
    );
    Ok(())
}

/// List the owner set
pub fn cmd_owners(state: &AppState) -> CliResult<()> {
    let ledger = &state.wallet.ledger;

    println!("👥 Owners ({})", ledger.owner_set().description());
    for owner in ledger.owners() {
        println!("   └─ {}", owner);
    }

    Ok(())
}

/// List transactions still awaiting execution
pub fn cmd_pending(state: &AppState) -> CliResult<()> {
    let ledger = &state.wallet.ledger;
    let pending = ledger.pending();

    if pending.is_empty() {
        println!("📭 No pending transactions");
        return Ok(());
    }

    let required = ledger.required_confirmations();
    println!("📋 Pending transactions:");
    for tx in pending {
        println!(
            "   #{} | to {} | {} | {}/{} confirmations",
            tx.index,
            tx.target,
            format_units(tx.value),
            tx.confirmation_count(),
            required
        );
    }

    Ok(())
}

/// List executed dispatches from the journal
pub fn cmd_journal(state: &AppState) -> CliResult<()> {
    let entries = state.wallet.journal.entries();

    if entries.is_empty() {
        println!("📭 No executed transactions yet");
        return Ok(());
    }

    println!("🧾 Execution journal:");
    for entry in entries {
        println!(
            "   #{} | to {} | {} | receipt {} | {}",
            entry.index,
            entry.target,
            format_units(entry.value),
            entry.receipt_id,
            entry.dispatched_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr_string(byte: u8) -> String {
        format!("0x{:038x}{:02x}", 0, byte)
    }

    fn init_wallet(data_dir: &Path) -> Vec<String> {
        let owners = vec![addr_string(0xa1), addr_string(0xb2), addr_string(0xc3)];
        cmd_init(data_dir, &owners, 2).unwrap();
        owners
    }

    #[test]
    fn test_init_and_open() {
        let temp_dir = tempfile::tempdir().unwrap();
        let owners = init_wallet(temp_dir.path());

        let state = AppState::open(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(state.wallet.ledger.owners().len(), owners.len());
        assert_eq!(state.wallet.ledger.required_confirmations(), 2);
    }

    #[test]
    fn test_open_uninitialized_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(AppState::open(temp_dir.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_init_rejects_bad_threshold() {
        let temp_dir = tempfile::tempdir().unwrap();
        let owners = vec![addr_string(0xa1), addr_string(0xb2)];
        assert!(cmd_init(temp_dir.path(), &owners, 3).is_err());
    }

    #[test]
    fn test_submit_confirm_execute_flow_persists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let owners = init_wallet(temp_dir.path());
        let a: Address = owners[0].parse().unwrap();
        let b: Address = owners[1].parse().unwrap();

        let mut state = AppState::open(temp_dir.path().to_path_buf()).unwrap();
        cmd_submit(&mut state, &a, &addr_string(0xee), "1.5", None).unwrap();
        cmd_confirm(&mut state, &a, 0).unwrap();
        cmd_confirm(&mut state, &b, 0).unwrap();
        cmd_execute(&mut state, &a, 0).unwrap();

        // Reload from disk: execution and journal entry survived
        let reloaded = AppState::open(temp_dir.path().to_path_buf()).unwrap();
        assert!(reloaded.wallet.ledger.transaction(0).unwrap().executed);
        assert_eq!(reloaded.wallet.journal.entries().len(), 1);
        assert_eq!(
            reloaded.wallet.ledger.transaction(0).unwrap().value,
            parse_units("1.5").unwrap()
        );
    }

    #[test]
    fn test_non_owner_commands_do_not_mutate() {
        let temp_dir = tempfile::tempdir().unwrap();
        let owners = init_wallet(temp_dir.path());
        let a: Address = owners[0].parse().unwrap();
        let stranger: Address = addr_string(0xd4).parse().unwrap();

        let mut state = AppState::open(temp_dir.path().to_path_buf()).unwrap();
        cmd_submit(&mut state, &a, &addr_string(0xee), "1", None).unwrap();

        // The preflight short-circuits; nothing is recorded
        cmd_confirm(&mut state, &stranger, 0).unwrap();
        assert_eq!(
            state.wallet.ledger.transaction(0).unwrap().confirmation_count(),
            0
        );
    }

    #[test]
    fn test_resolve_caller_from_flag() {
        let raw = addr_string(0xa1);
        let caller = resolve_caller(Some(raw.as_str())).unwrap();
        assert_eq!(caller.to_string(), raw);
    }
}
