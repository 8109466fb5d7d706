//! Destination URI parsing
//!
//! A destination is written `[protocol://][user@][host:]directory`, the
//! shorthand rsync and scp both accept. Every part except the directory is
//! optional, and malformed input never fails: whatever cannot be attributed
//! to a prefix is absorbed by the directory.

/// Parts of a destination URI. Absent parts were not present in the input;
/// `directory` is always produced (empty only for empty input).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DestUri {
    pub protocol: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
    pub directory: String,
}

/// Split a destination string into protocol, user, host and directory.
///
/// The prefixes are resolved left to right: protocol extends to the last
/// `://`, user to the last `@` after it, host to the first `:` after that.
/// Protocol and user must be non-empty to count; a host may be empty.
pub fn parse_dest(dest: &str) -> DestUri {
    let (protocol, rest) = match dest.rfind("://") {
        Some(idx) if idx > 0 => (Some(dest[..idx].to_string()), &dest[idx + 3..]),
        _ => (None, dest),
    };

    let (user, rest) = match rest.rfind('@') {
        Some(idx) if idx > 0 => (Some(rest[..idx].to_string()), &rest[idx + 1..]),
        _ => (None, rest),
    };

    let (host, directory) = match rest.find(':') {
        Some(idx) => (
            Some(rest[..idx].to_string()),
            rest[idx + 1..].to_string(),
        ),
        None => (None, rest.to_string()),
    };

    DestUri {
        protocol,
        user,
        host,
        directory,
    }
}
