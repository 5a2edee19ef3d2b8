use serde_json::{Map, Value};

pub const UNKNOWN: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalEvent {
    pub date: String,
    pub description: String,
    pub category1: String,
    pub category2: String,
}

impl HistoricalEvent {
    /// Builds an event from a raw backend record. Absent, null or non-string
    /// fields fall back to their placeholder text; this never fails.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        Self {
            date: string_field(record, "date", UNKNOWN),
            description: string_field(record, "description", NO_DESCRIPTION),
            category1: string_field(record, "category1", UNKNOWN),
            category2: string_field(record, "category2", UNKNOWN),
        }
    }

    pub fn categories(&self) -> String {
        format!("{}, {}", self.category1, self.category2)
    }
}

fn string_field(record: &Map<String, Value>, key: &str, default: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}
