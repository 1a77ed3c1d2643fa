//! User command implementation.

use anyhow::Result;

use crate::users::{home_exists, resolve_primary_user, EtcPasswd, PRIMARY_UID};

/// Run the user command
pub async fn run() -> Result<()> {
    let user = resolve_primary_user(&EtcPasswd)?;

    println!();
    println!("Primary user (uid {}): {}", PRIMARY_UID, user.name);
    println!("Home directory: {}", user.home.display());
    println!("Shell profile:  {}", user.bashrc_path().display());
    if !home_exists(&user) {
        println!("Warning: home directory does not exist on disk");
    }
    println!();

    Ok(())
}
