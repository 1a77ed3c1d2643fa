//! Installation of EDA side effects: systemd unit and shell-profile edit.
//!
//! The unit file lands at /etc/systemd/system/eda-<name>.service and the
//! fetched profile fragment is appended to the primary user's ~/.bashrc
//! inside a marker-delimited block. Re-installing the same event replaces
//! the block instead of duplicating it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::NamedTempFile;
use tracing::info;

use crate::cmd_abstraction::{args_to_strings, CommandExecutor};
use crate::config::ServiceSpec;
use crate::error::ClabError;

const SYSTEMD_DIR: &str = "/etc/systemd/system";

/// Validate an event name before it reaches URLs, unit names, or paths.
///
/// ASCII letters, digits, '-' and '_' only; anything else could smuggle
/// path separators or unit-file directives.
pub fn validate_event_name(name: &str) -> Result<(), ClabError> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ClabError::InvalidEventName(name.to_string()));
    }
    Ok(())
}

/// Unit file name for an event.
pub fn service_name(event: &str) -> String {
    format!("eda-{}.service", event)
}

/// Unit file path for an event.
pub fn service_path(event: &str) -> PathBuf {
    Path::new(SYSTEMD_DIR).join(service_name(event))
}

/// Generate the systemd unit text for an event.
///
/// The config's service section supplies the description and ExecStart;
/// when absent the unit is a described no-op so the event is still visible
/// in systemctl output.
pub fn generate_service_unit(event: &str, spec: Option<&ServiceSpec>) -> String {
    let description = spec
        .filter(|s| !s.description.is_empty())
        .map(|s| s.description.clone())
        .unwrap_or_else(|| format!("CLab EDA session {}", event));
    let exec_start = spec
        .filter(|s| !s.exec_start.is_empty())
        .map(|s| s.exec_start.clone())
        .unwrap_or_else(|| "/bin/true".to_string());

    format!(
        r#"[Unit]
Description={description}
After=network-online.target
Wants=network-online.target

[Service]
Type=oneshot
ExecStart={exec_start}
RemainAfterExit=yes

[Install]
WantedBy=multi-user.target
"#
    )
}

/// Begin marker for the managed bashrc block.
fn block_begin(event: &str) -> String {
    format!("# >>> clabcli eda {} >>>", event)
}

/// End marker for the managed bashrc block.
fn block_end(event: &str) -> String {
    format!("# <<< clabcli eda {} <<<", event)
}

/// Splice the managed block for an event into existing profile text.
///
/// Any previous block for the same event is removed first, so repeated
/// installs are idempotent. Other events' blocks are left alone.
pub fn splice_profile_block(existing: &str, event: &str, fragment: &str) -> String {
    let mut result = strip_profile_block(existing, event);
    if !result.is_empty() && !result.ends_with('\n') {
        result.push('\n');
    }
    result.push_str(&block_begin(event));
    result.push('\n');
    result.push_str(fragment.trim_end_matches('\n'));
    result.push('\n');
    result.push_str(&block_end(event));
    result.push('\n');
    result
}

/// Remove the managed block for an event, leaving everything else intact.
pub fn strip_profile_block(existing: &str, event: &str) -> String {
    let begin = block_begin(event);
    let end = block_end(event);
    let mut result = String::with_capacity(existing.len());
    let mut inside = false;
    for line in existing.lines() {
        if line == begin {
            inside = true;
            continue;
        }
        if line == end {
            inside = false;
            continue;
        }
        if !inside {
            result.push_str(line);
            result.push('\n');
        }
    }
    result
}

/// Write a file atomically via tempfile + rename in the target directory.
fn write_atomic(path: &Path, content: &str) -> Result<(), ClabError> {
    let to_fs_err = |e: std::io::Error| ClabError::FileSystem {
        path: path.display().to_string(),
        source: e,
    };

    let parent = path.parent().unwrap_or(Path::new("/"));
    let mut temp = NamedTempFile::new_in(parent).map_err(to_fs_err)?;
    temp.write_all(content.as_bytes()).map_err(to_fs_err)?;
    temp.as_file().sync_all().map_err(to_fs_err)?;
    temp.persist(path).map_err(|e| ClabError::FileSystem {
        path: path.display().to_string(),
        source: e.error,
    })?;
    Ok(())
}

/// Append the fetched fragment to a user's shell profile (managed block).
pub fn install_profile_fragment(
    bashrc_path: &Path,
    event: &str,
    fragment: &str,
) -> Result<(), ClabError> {
    let existing = match fs::read_to_string(bashrc_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(ClabError::FileSystem {
                path: bashrc_path.display().to_string(),
                source: e,
            })
        }
    };
    let updated = splice_profile_block(&existing, event, fragment);
    write_atomic(bashrc_path, &updated)?;
    info!("Updated {}", bashrc_path.display());
    Ok(())
}

/// Remove the managed block from a user's shell profile.
pub fn remove_profile_fragment(bashrc_path: &Path, event: &str) -> Result<(), ClabError> {
    let existing = match fs::read_to_string(bashrc_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(ClabError::FileSystem {
                path: bashrc_path.display().to_string(),
                source: e,
            })
        }
    };
    let updated = strip_profile_block(&existing, event);
    if updated != existing {
        write_atomic(bashrc_path, &updated)?;
        info!("Cleaned {}", bashrc_path.display());
    }
    Ok(())
}

/// Run one systemctl action, mapping failure to a typed error.
fn systemctl(executor: &dyn CommandExecutor, args: &[&str]) -> Result<(), ClabError> {
    let action = args.join(" ");
    let output = executor
        .execute("systemctl", &args_to_strings(args))
        .map_err(|e| ClabError::Systemctl {
            action: action.clone(),
            detail: e.to_string(),
        })?;
    if !output.success {
        return Err(ClabError::Systemctl {
            action,
            detail: if output.stderr.is_empty() {
                format!("exit code {:?}", output.code)
            } else {
                output.stderr.trim().to_string()
            },
        });
    }
    Ok(())
}

/// Write the unit file and bring the service up.
pub fn install_service(
    executor: &dyn CommandExecutor,
    event: &str,
    spec: Option<&ServiceSpec>,
) -> Result<(), ClabError> {
    validate_event_name(event)?;

    let path = service_path(event);
    info!("Writing {}", path.display());
    write_atomic(&path, &generate_service_unit(event, spec))?;

    systemctl(executor, &["daemon-reload"])?;
    systemctl(executor, &["enable", &service_name(event)])?;
    systemctl(executor, &["start", &service_name(event)])?;
    Ok(())
}

/// Stop and remove the service for an event.
pub fn uninstall_service(executor: &dyn CommandExecutor, event: &str) -> Result<(), ClabError> {
    validate_event_name(event)?;

    // Best effort: the unit may never have been enabled.
    let _ = systemctl(executor, &["stop", &service_name(event)]);
    let _ = systemctl(executor, &["disable", &service_name(event)]);

    let path = service_path(event);
    if path.exists() {
        info!("Removing {}", path.display());
        fs::remove_file(&path).map_err(|e| ClabError::FileSystem {
            path: path.display().to_string(),
            source: e,
        })?;
        systemctl(executor, &["daemon-reload"])?;
    }
    Ok(())
}

/// Fail unless running as root.
pub fn check_root() -> Result<()> {
    // SAFETY: geteuid() reads the effective user ID; no preconditions,
    // never fails, no state modified.
    let euid = unsafe { libc::geteuid() };
    if euid != 0 {
        anyhow::bail!("This operation requires root privileges. Please run with sudo.")
    }
    Ok(())
}
