use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date layout used for both `@` input tokens and table output (`2024/3/1`)
pub const DATE_LAYOUT: &str = "%Y/%-m/%-d";

/// A single task record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Task label, never empty once created
    pub task: String,
    /// Due date (defaults to the day the entry was added)
    pub date: NaiveDate,
    /// Tags (without the `#` prefix), in input order
    pub tags: Vec<String>,
    /// Priority, 1 to 5 by convention but not enforced
    pub priority: i64,
}

impl Entry {
    pub fn new(task: String, date: NaiveDate) -> Self {
        Entry {
            task,
            date,
            tags: Vec::new(),
            priority: 0,
        }
    }

    /// The date formatted as `YYYY/M/D`
    pub fn date_str(&self) -> String {
        self.date.format(DATE_LAYOUT).to_string()
    }

    /// Tags joined with commas
    pub fn tags_str(&self) -> String {
        self.tags.join(",")
    }
}
