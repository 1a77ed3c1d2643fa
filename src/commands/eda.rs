//! EDA command implementation: the full configuration flow.
//!
//! Fetch the event's config and profile fragment, verify the host sits on
//! one of the configured lab segments, resolve the primary user, then
//! install the service unit and the shell-profile edit.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cmd_abstraction::RealCommandExecutor;
use crate::installer::{
    check_root, install_profile_fragment, install_service, service_path, validate_event_name,
};
use crate::network::{matching_segments, AddressProvider, SystemAddressProvider};
use crate::remote::{EdaEndpoints, Fetcher};
use crate::users::{resolve_primary_user, EtcPasswd};

/// Usage text printed when no event name is given.
pub fn print_usage() {
    println!("Usage: clabcli eda <event-name>");
    println!();
    println!("Configure this machine for an EDA event. The event name selects");
    println!("which configuration to fetch from the lab notice server, e.g.:");
    println!();
    println!("  clabcli eda edaempyren2025summer");
    println!();
    println!("Options:");
    println!("  --dry-run   Fetch and report but don't install anything");
}

/// Run the eda command
pub async fn run(name: Option<&str>, dry_run: bool) -> Result<()> {
    let Some(name) = name else {
        print_usage();
        return Ok(());
    };

    validate_event_name(name)?;

    if !dry_run {
        check_root()?;
    }

    // Fetch both documents for the event.
    let endpoints = EdaEndpoints::for_event(name);
    let fetcher = Fetcher::new()?;
    let (config, fragment) = fetcher
        .fetch_event(&endpoints)
        .await
        .with_context(|| format!("Failed to fetch EDA event '{}'", name))?;

    // Match the host against the configured lab segments. Every rule is an
    // independent check; report each verdict.
    let provider = SystemAddressProvider;
    let addrs = provider
        .local_addresses()
        .context("Failed to enumerate local addresses")?;

    if config.has_network_rules() {
        let verdicts = matching_segments(&config.networks, &addrs)?;
        for v in &verdicts {
            info!(
                "Segment {}: {}",
                v.segment,
                if v.matched { "match" } else { "no match" }
            );
        }
        if !verdicts.iter().any(|v| v.matched) {
            anyhow::bail!(
                "This host is not on any network segment configured for '{}'.\n\
                 Configured segments: {}",
                name,
                config.networks.join(", ")
            );
        }
    } else {
        warn!("Event config has no network rules; skipping segment check");
    }

    // Resolve the primary user for the profile edit.
    let user = resolve_primary_user(&EtcPasswd)?;
    info!("Primary user: {} ({})", user.name, user.home.display());

    if dry_run {
        println!();
        println!("[dry-run] Would write {}", service_path(name).display());
        println!(
            "[dry-run] Would update {} ({} bytes of profile fragment)",
            user.bashrc_path().display(),
            fragment.len()
        );
        println!();
        return Ok(());
    }

    // Install side effects.
    let executor = RealCommandExecutor::new();
    install_service(&executor, name, config.service.as_ref())?;
    install_profile_fragment(&user.bashrc_path(), name, &fragment)?;

    println!();
    println!("[OK] EDA event '{}' configured.", name);
    println!();
    println!("  Service:       {}", service_path(name).display());
    println!("  Shell profile: {}", user.bashrc_path().display());
    println!();
    println!("The profile edit takes effect on {}'s next login.", user.name);
    println!();

    Ok(())
}
