//! Uninstall command implementation.

use anyhow::Result;

use crate::cmd_abstraction::RealCommandExecutor;
use crate::installer::{check_root, remove_profile_fragment, uninstall_service, validate_event_name};
use crate::users::{resolve_primary_user, EtcPasswd};

/// Run the uninstall command
pub async fn run(name: &str) -> Result<()> {
    validate_event_name(name)?;
    check_root()?;

    let executor = RealCommandExecutor::new();
    uninstall_service(&executor, name)?;

    // The profile edit only exists if a uid-1000 account does; a missing
    // account just means there is nothing to clean.
    match resolve_primary_user(&EtcPasswd) {
        Ok(user) => remove_profile_fragment(&user.bashrc_path(), name)?,
        Err(e) => tracing::warn!("Skipping profile cleanup: {}", e),
    }

    println!();
    println!("[OK] EDA event '{}' removed.", name);
    println!();

    Ok(())
}
