/// Longest value, in bytes, any entry field may hold. Longer values are
/// truncated on a character boundary, never rejected.
pub const FIELD_MAX: usize = 127;

/// Number of rc file lines that make up one entry.
pub const FIELDS_PER_ENTRY: usize = 7;

pub const LOCALHOST: &str = "localhost";
const LOCALHOST_DESCR: &str = "Execute shell on localhost.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEntry {
    pub name: String,
    pub host: String,
    /// Empty lets the ssh client pick the login name.
    pub user: String,
    pub descr: String,
    pub fqdn: String,
    pub ip: String,
    /// Identity file; empty means the ssh client default.
    pub key: String,
}

impl HostEntry {
    /// Builds an entry from the seven rc file fields in file order:
    /// `name, host, user, descr, fqdn, ip, key`.
    pub fn from_fields(fields: [String; FIELDS_PER_ENTRY]) -> Self {
        let [name, host, user, descr, fqdn, ip, key] = fields.map(bounded);
        Self {
            name,
            host,
            user,
            descr,
            fqdn,
            ip,
            key,
        }
    }

    /// The synthetic entry that always occupies the first row.
    pub fn localhost(login: Option<String>) -> Self {
        Self {
            name: LOCALHOST.to_string(),
            host: LOCALHOST.to_string(),
            user: login.map(bounded).unwrap_or_default(),
            descr: LOCALHOST_DESCR.to_string(),
            ..Self::default()
        }
    }

    /// Address handed to ssh: fqdn, then ip, then host. With neither fqdn
    /// nor ip set, `host` is expected to resolve through the ssh config.
    pub fn target(&self) -> &str {
        if !self.fqdn.is_empty() {
            &self.fqdn
        } else if !self.ip.is_empty() {
            &self.ip
        } else {
            &self.host
        }
    }

    /// `user@target`, or the bare target when no user is configured.
    pub fn destination(&self) -> String {
        if self.user.is_empty() {
            self.target().to_string()
        } else {
            format!("{}@{}", self.user, self.target())
        }
    }
}

/// Truncates `value` to at most [`FIELD_MAX`] bytes.
pub fn bounded(mut value: String) -> String {
    if value.len() > FIELD_MAX {
        let mut end = FIELD_MAX;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        tracing::debug!("Truncating {}-byte field to {} bytes", value.len(), end);
        value.truncate(end);
    }
    value
}
