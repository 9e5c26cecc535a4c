//! Normalization of raw client entries into canonical records
//!
//! The source returns loosely typed JSON objects. Entries without an identifier
//! are dropped; everything else becomes a [`Record`] with a string id, a
//! resolved agent display name and an optional numeric balance. Fields that do
//! not map to a canonical field are carried along in [`Record::extra`].

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::agents::AgentDirectory;

/// Untyped entry as received from the data source
pub type RawRecord = Value;

/// Source field names for the canonical record fields
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub id: String,
    pub name: String,
    pub agent: String,
    pub balance: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            name: "Name".to_string(),
            agent: "agent_name".to_string(),
            balance: "balance".to_string(),
        }
    }
}

/// Canonical client record
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique, stable identifier
    pub id: String,
    pub name: Option<String>,
    /// Raw agent code from the source (empty when missing)
    pub agent_code: String,
    /// Directory name for `agent_code`, or the code itself when unknown
    pub agent_display: String,
    pub balance: Option<f64>,
    /// Source text of a balance that arrived as a numeric string
    pub balance_source: Option<String>,
    /// Passthrough source fields
    pub extra: Map<String, Value>,
}

impl Record {
    /// Minimal record with no passthrough fields; the agent code doubles as display
    pub fn new(id: impl Into<String>, name: Option<&str>, agent_code: &str, balance: Option<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.map(str::to_string),
            agent_code: agent_code.to_string(),
            agent_display: agent_code.to_string(),
            balance,
            balance_source: None,
            extra: Map::new(),
        }
    }

    /// Balance as text for substring matching.
    ///
    /// A balance that arrived as a string keeps its source text (`"12.50"`
    /// stays `12.50`); numeric balances use [`decimal_text`].
    pub fn balance_text(&self) -> Option<String> {
        let balance = self.balance?;
        Some(self.balance_source.clone().unwrap_or_else(|| decimal_text(balance)))
    }
}

/// Plain decimal text for a number: shortest round-trip form, no trailing `.0`
pub fn decimal_text(value: f64) -> String {
    if value == 0.0 {
        // Also folds -0.0
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Convert raw entries into records, preserving source order.
///
/// Entries with a null or missing identifier are skipped. When two entries
/// share an identifier the later one replaces the earlier one in place.
pub fn normalize(raw: Vec<RawRecord>, directory: &AgentDirectory, fields: &FieldNames) -> Vec<Record> {
    let total = raw.len();
    let mut records: Vec<Record> = Vec::with_capacity(total);
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(total);
    let mut skipped = 0usize;
    let mut duplicates = 0usize;

    for entry in raw {
        let Some(record) = normalize_one(entry, directory, fields) else {
            skipped += 1;
            continue;
        };

        match positions.get(&record.id) {
            Some(&index) => {
                duplicates += 1;
                records[index] = record;
            }
            None => {
                positions.insert(record.id.clone(), records.len());
                records.push(record);
            }
        }
    }

    if duplicates > 0 {
        warn!(duplicates, "duplicate client ids in source, later entries replaced earlier ones");
    }
    debug!(total, kept = records.len(), skipped, "normalized client records");

    records
}

/// Normalize a single entry, or `None` when it has no identifier
fn normalize_one(entry: RawRecord, directory: &AgentDirectory, fields: &FieldNames) -> Option<Record> {
    let Value::Object(mut object) = entry else {
        return None;
    };

    let id = object.remove(&fields.id).as_ref().and_then(coerce_text)?;
    let name = object.remove(&fields.name).as_ref().and_then(coerce_text);
    let agent_code = object
        .remove(&fields.agent)
        .as_ref()
        .and_then(coerce_text)
        .unwrap_or_default();
    let raw_balance = object.remove(&fields.balance);
    let balance = raw_balance.as_ref().and_then(coerce_balance);
    let balance_source = match (&raw_balance, balance) {
        (Some(Value::String(s)), Some(_)) => Some(s.trim().to_string()),
        _ => None,
    };
    let agent_display = directory.display_for(&agent_code).to_string();

    Some(Record {
        id,
        name,
        agent_code,
        agent_display,
        balance,
        balance_source,
        extra: object,
    })
}

/// String form of a scalar value; `None` for null
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            _ => n.as_f64().map(decimal_text).unwrap_or_else(|| n.to_string()),
        }),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Numeric balance from a number or numeric string; anything else is missing
fn coerce_balance(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
