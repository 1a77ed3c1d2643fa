//! # clabcli - Classroom Lab Network Client Configurator
//!
//! Configures a lab/classroom machine for an "EDA" event: fetches the event's
//! JSON configuration and shell-profile fragment from the lab notice server,
//! checks that the machine sits on one of the configured network segments,
//! resolves the conventional primary user (uid 1000), and installs a systemd
//! service plus a managed shell-profile edit for that user.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                       clabcli                          │
//! ├────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                            │
//! │    └── Commands: eda, check, user, uninstall, version  │
//! ├────────────────────────────────────────────────────────┤
//! │  Remote (reqwest + rustls)                             │
//! │    ├── <base>/eda/<name>.json    (configuration)       │
//! │    └── <base>/eda/<name>.bashrc  (profile fragment)    │
//! ├────────────────────────────────────────────────────────┤
//! │  Network (ipnet)                                       │
//! │    └── CIDR segment matching against host addresses    │
//! ├────────────────────────────────────────────────────────┤
//! │  Users                                                 │
//! │    └── uid-1000 resolution from the account database   │
//! ├────────────────────────────────────────────────────────┤
//! │  Installer (CommandExecutor trait)                     │
//! │    ├── eda-<name>.service unit + systemctl             │
//! │    └── managed ~/.bashrc block for the primary user    │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use clabcli::network::{matching_segments, AddressProvider, SystemAddressProvider};
//! use clabcli::remote::{EdaEndpoints, Fetcher};
//! use clabcli::users::{resolve_primary_user, EtcPasswd};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let endpoints = EdaEndpoints::for_event("edaempyren2025summer");
//!     let fetcher = Fetcher::new()?;
//!     let (config, fragment) = fetcher.fetch_event(&endpoints).await?;
//!
//!     let addrs = SystemAddressProvider.local_addresses()?;
//!     let verdicts = matching_segments(&config.networks, &addrs)?;
//!
//!     let user = resolve_primary_user(&EtcPasswd)?;
//!     println!("{} matches, profile at {:?}", verdicts.len(), user.bashrc_path());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`cmd_abstraction`] - Command execution trait (mockable systemctl)
//! - [`commands`] - CLI command implementations
//! - [`config`] - Remote EDA configuration document model
//! - [`error`] - Typed error conditions
//! - [`installer`] - systemd unit and shell-profile installation
//! - [`network`] - Network segment checking
//! - [`remote`] - Endpoint construction and HTTP retrieval
//! - [`users`] - Primary-user (uid 1000) resolution

pub mod cli;
pub mod cmd_abstraction;
pub mod commands;
pub mod config;
pub mod error;
pub mod installer;
pub mod network;
pub mod remote;
pub mod users;

pub use cli::{Cli, Commands};
pub use error::ClabError;
