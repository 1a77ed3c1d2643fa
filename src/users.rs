//! Primary-user resolution for clabcli.
//!
//! The lab client installs a per-user shell-profile edit for the machine's
//! conventional first human account, the one with uid 1000. The account
//! database is read through a trait so tests never depend on the host's
//! real /etc/passwd.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::ClabError;

#[cfg(test)]
use mockall::automock;

/// The uid of the first interactively created account on most distributions.
pub const PRIMARY_UID: u32 = 1000;

/// A resolved login account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryUser {
    pub name: String,
    pub home: PathBuf,
}

impl PrimaryUser {
    /// Conventional shell-profile path for this account.
    pub fn bashrc_path(&self) -> PathBuf {
        self.home.join(".bashrc")
    }
}

/// Source of passwd-style account database text, injectable for testing.
#[cfg_attr(test, automock)]
pub trait PasswdSource: Send + Sync {
    /// Read the raw account database (colon-separated passwd format).
    fn read_passwd(&self) -> io::Result<String>;
}

/// Real source backed by /etc/passwd.
#[derive(Debug, Clone, Copy, Default)]
pub struct EtcPasswd;

impl PasswdSource for EtcPasswd {
    fn read_passwd(&self) -> io::Result<String> {
        std::fs::read_to_string("/etc/passwd")
    }
}

/// Find the account with [`PRIMARY_UID`] in passwd-format text.
///
/// Returns the first matching record; malformed lines are skipped. `None`
/// means no such account exists on this system.
pub fn parse_primary_user(passwd: &str) -> Option<PrimaryUser> {
    for line in passwd.lines() {
        let fields: Vec<&str> = line.split(':').collect();
        // name:password:uid:gid:gecos:home:shell
        if fields.len() < 7 {
            continue;
        }
        let Ok(uid) = fields[2].parse::<u32>() else {
            continue;
        };
        if uid == PRIMARY_UID {
            return Some(PrimaryUser {
                name: fields[0].to_string(),
                home: PathBuf::from(fields[5]),
            });
        }
    }
    None
}

/// Resolve the primary user from a source, erroring when none exists.
pub fn resolve_primary_user(source: &dyn PasswdSource) -> Result<PrimaryUser, ClabError> {
    let passwd = source.read_passwd().map_err(|e| ClabError::FileSystem {
        path: "/etc/passwd".to_string(),
        source: e,
    })?;
    parse_primary_user(&passwd).ok_or(ClabError::NoPrimaryUser)
}

/// Whether the resolved home directory actually exists on disk.
pub fn home_exists(user: &PrimaryUser) -> bool {
    Path::new(&user.home).is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
alice:x:1000:1000:Alice:/home/alice:/bin/bash
bob:x:1001:1001:Bob:/home/bob:/bin/bash
";

    #[test]
    fn test_parse_finds_uid_1000() {
        let user = parse_primary_user(SAMPLE).unwrap();
        assert_eq!(user.name, "alice");
        assert_eq!(user.home, PathBuf::from("/home/alice"));
    }

    #[test]
    fn test_parse_no_uid_1000() {
        let passwd = "root:x:0:0:root:/root:/bin/bash\n";
        assert!(parse_primary_user(passwd).is_none());
    }

    #[test]
    fn test_parse_first_match_wins() {
        let passwd = "\
first:x:1000:1000::/home/first:/bin/bash
second:x:1000:1000::/home/second:/bin/bash
";
        let user = parse_primary_user(passwd).unwrap();
        assert_eq!(user.name, "first");
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let passwd = "\
garbage line without colons
short:x:1000
alice:x:notanumber:1000::/home/x:/bin/bash
alice:x:1000:1000:Alice:/home/alice:/bin/bash
";
        let user = parse_primary_user(passwd).unwrap();
        assert_eq!(user.name, "alice");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_primary_user("").is_none());
    }

    #[test]
    fn test_bashrc_path() {
        let user = PrimaryUser {
            name: "alice".to_string(),
            home: PathBuf::from("/home/alice"),
        };
        assert_eq!(user.bashrc_path(), PathBuf::from("/home/alice/.bashrc"));
    }

    #[test]
    fn test_resolve_with_mock_source() {
        let mut mock = MockPasswdSource::new();
        mock.expect_read_passwd()
            .returning(|| Ok(SAMPLE.to_string()));
        let user = resolve_primary_user(&mock).unwrap();
        assert_eq!(user.name, "alice");
    }

    #[test]
    fn test_resolve_missing_account_is_typed_error() {
        let mut mock = MockPasswdSource::new();
        mock.expect_read_passwd()
            .returning(|| Ok("root:x:0:0:root:/root:/bin/bash\n".to_string()));
        let err = resolve_primary_user(&mock).unwrap_err();
        assert!(matches!(err, ClabError::NoPrimaryUser));
    }

    #[test]
    fn test_resolve_read_failure_is_typed_error() {
        let mut mock = MockPasswdSource::new();
        mock.expect_read_passwd()
            .returning(|| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));
        let err = resolve_primary_user(&mock).unwrap_err();
        assert!(matches!(err, ClabError::FileSystem { .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The parser never panics on arbitrary input.
        #[test]
        fn prop_parse_arbitrary_no_panic(content in ".*") {
            let _ = parse_primary_user(&content);
        }

        /// A well-formed uid-1000 line is always found regardless of what
        /// precedes it.
        #[test]
        fn prop_finds_record_after_noise(noise in "[^:\n]{0,40}", name in "[a-z][a-z0-9]{0,15}") {
            let passwd = format!("{}\n{}:x:1000:1000::/home/{}:/bin/bash\n", noise, name, name);
            let user = parse_primary_user(&passwd);
            prop_assert!(user.is_some());
            prop_assert_eq!(user.unwrap().name, name);
        }
    }
}
