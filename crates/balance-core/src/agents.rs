//! Agent code to display name lookup
//!
//! Source records carry a raw agent code. The directory maps known codes to the
//! name an operator recognizes; unknown codes are shown as-is.

use serde::Deserialize;

/// One known agent code and its display name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentEntry {
    pub code: String,
    pub name: String,
}

impl AgentEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Ordered, read-only mapping of agent codes to display names.
///
/// Several codes may share one display name. Entry order is kept so that
/// listings (and the agent filter choices built from them) are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentDirectory {
    entries: Vec<AgentEntry>,
}

impl AgentDirectory {
    /// Build a directory from entries. A repeated code keeps its last name.
    pub fn new(entries: Vec<AgentEntry>) -> Self {
        let mut directory = Self {
            entries: Vec::with_capacity(entries.len()),
        };
        for entry in entries {
            match directory.entries.iter_mut().find(|e| e.code == entry.code) {
                Some(existing) => existing.name = entry.name,
                None => directory.entries.push(entry),
            }
        }
        directory
    }

    /// Build a directory from `(code, name)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(code, name)| AgentEntry::new(code, name))
                .collect(),
        )
    }

    /// Display name for a code, if known
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.name.as_str())
    }

    /// Display name for a code, or the code itself when unknown
    pub fn display_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.lookup(code).unwrap_or(code)
    }

    /// Distinct display names in directory order
    pub fn display_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.name.as_str()) {
                names.push(&entry.name);
            }
        }
        names
    }

    pub fn entries(&self) -> &[AgentEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> AgentDirectory {
        AgentDirectory::from_pairs([("259", "Store"), ("257", "Gal"), ("258", "Store")])
    }

    #[test]
    fn test_lookup_known_code() {
        let dir = directory();
        assert_eq!(dir.lookup("257"), Some("Gal"));
        assert_eq!(dir.display_for("259"), "Store");
    }

    #[test]
    fn test_lookup_miss_falls_back_to_code() {
        let dir = directory();
        assert_eq!(dir.lookup("999"), None);
        assert_eq!(dir.display_for("999"), "999");
        assert_eq!(dir.display_for(""), "");
    }

    #[test]
    fn test_display_names_are_distinct_and_ordered() {
        let dir = directory();
        assert_eq!(dir.display_names(), vec!["Store", "Gal"]);
        assert_eq!(dir.len(), 3);
    }

    #[test]
    fn test_repeated_code_keeps_last_name() {
        let dir = AgentDirectory::from_pairs([("1", "First"), ("2", "Other"), ("1", "Second")]);
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.display_for("1"), "Second");
        assert_eq!(dir.entries()[0].code, "1");
    }
}
