use crate::models::HostEntry;

/// Read-only list of selectable entries.
///
/// Positions are 1-based to match the numbers shown on screen. Position 1
/// is always the synthetic localhost entry, followed by the rc file entries
/// in file order, so [`count`](Self::count) is never zero.
#[derive(Debug, Clone)]
pub struct EntryStore {
    entries: Vec<HostEntry>,
}

impl EntryStore {
    pub fn build(parsed: Vec<HostEntry>) -> Self {
        Self::with_login(parsed, current_login())
    }

    pub fn with_login(parsed: Vec<HostEntry>, login: Option<String>) -> Self {
        let mut entries = Vec::with_capacity(parsed.len() + 1);
        entries.push(HostEntry::localhost(login));
        entries.extend(parsed);
        Self { entries }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Entry at 1-based `position`.
    pub fn get(&self, position: usize) -> Option<&HostEntry> {
        position.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn is_localhost(&self, position: usize) -> bool {
        position == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &HostEntry> {
        self.entries.iter()
    }
}

fn current_login() -> Option<String> {
    match whoami::fallible::username() {
        Ok(name) => Some(name),
        Err(e) => {
            tracing::warn!("Could not determine login name: {}", e);
            None
        }
    }
}
