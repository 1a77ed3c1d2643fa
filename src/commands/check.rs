//! Check command implementation.

use anyhow::Result;

use crate::network::{segment_contains, AddressProvider, SystemAddressProvider};

/// Run the check command
pub async fn run(segment: &str) -> Result<()> {
    let provider = SystemAddressProvider;
    let addrs = provider.local_addresses()?;

    if addrs.is_empty() {
        println!("No IPv4 addresses found on this host");
        return Ok(());
    }

    let matched = segment_contains(segment, &addrs)?;

    println!();
    if matched {
        println!("This host is inside {}", segment);
    } else {
        println!("This host is NOT inside {}", segment);
    }
    println!();

    Ok(())
}
