//! Command-line interface for the multisig wallet

pub mod commands;

pub use commands::{
    cmd_confirm, cmd_count, cmd_execute, cmd_init, cmd_journal, cmd_owners, cmd_pending,
    cmd_revoke, cmd_show, cmd_submit, resolve_caller, AppState, CliResult, OWNER_ENV,
};
