//! Record filtering by name, agent and balance
//!
//! Each criterion is an independent predicate; a record is visible when all
//! three accept it. Empty criteria place no constraint.

use std::collections::BTreeSet;

use crate::records::Record;

/// Active filter criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-sensitive substring of the client name
    pub name_pattern: String,
    /// Agent display names to keep
    pub agent_set: BTreeSet<String>,
    /// Substring of the balance's decimal text
    pub balance_pattern: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = pattern.into();
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent_set.insert(agent.into());
        self
    }

    pub fn with_balance(mut self, pattern: impl Into<String>) -> Self {
        self.balance_pattern = pattern.into();
        self
    }

    /// Check or uncheck an agent. Returns whether the agent is now included.
    pub fn toggle_agent(&mut self, agent: &str) -> bool {
        if self.agent_set.remove(agent) {
            false
        } else {
            self.agent_set.insert(agent.to_string());
            true
        }
    }

    /// True when no criterion constrains the result
    pub fn is_empty(&self) -> bool {
        self.name_pattern.is_empty() && self.agent_set.is_empty() && self.balance_pattern.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a record passes all criteria
    pub fn matches(&self, record: &Record) -> bool {
        self.name_matches(record) && self.agent_matches(record) && self.balance_matches(record)
    }

    fn name_matches(&self, record: &Record) -> bool {
        if self.name_pattern.is_empty() {
            return true;
        }
        record
            .name
            .as_deref()
            .is_some_and(|name| name.contains(self.name_pattern.as_str()))
    }

    fn agent_matches(&self, record: &Record) -> bool {
        self.agent_set.is_empty() || self.agent_set.contains(&record.agent_display)
    }

    fn balance_matches(&self, record: &Record) -> bool {
        if self.balance_pattern.is_empty() {
            return true;
        }
        record
            .balance_text()
            .is_some_and(|text| text.contains(self.balance_pattern.as_str()))
    }
}

/// Records passing `criteria`, in collection order
pub fn apply<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}
