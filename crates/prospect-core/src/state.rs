//! Session state: the aggregate every reader observes.
//!
//! `finds` and `attempts_count` are the record of truth. `log` is a
//! bounded display cache that silently evicts its oldest entries.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Category;

/// Most recent log entries retained.
pub const LOG_CAPACITY: usize = 50;

/// One rolling-display record of an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub descriptor: String,
    pub success: bool,
    /// Present iff `success`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_label: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A successful discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Find {
    pub id: Uuid,
    pub category: Category,
    pub descriptor: String,
    pub unit_amount: f64,
    pub value_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Find {
    /// `"0.012 BTC"`
    pub fn amount_label(&self) -> String {
        format!("{:.3} {}", self.unit_amount, self.category.symbol())
    }

    /// Alert text shown to the user.
    pub fn alert_text(&self) -> String {
        format!(
            "Found {:.6} {} worth ${:.2}",
            self.unit_amount,
            self.category.symbol(),
            self.value_amount
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub running: bool,
    pub attempts_count: u64,
    pub total_value: f64,
    pub log: VecDeque<LogEntry>,
    pub finds: Vec<Find>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the log, evicting the oldest entries past [`LOG_CAPACITY`].
    pub fn push_log(&mut self, entry: LogEntry) {
        self.log.push_back(entry);
        while self.log.len() > LOG_CAPACITY {
            self.log.pop_front();
        }
    }

    /// Record a find together with its success log line.
    pub fn record_find(&mut self, find: Find, entry: LogEntry) {
        self.total_value += find.value_amount;
        self.finds.push(find);
        self.push_log(entry);
    }

    /// Sum over `finds`. Always equal to `total_value`.
    pub fn recomputed_total(&self) -> f64 {
        self.finds.iter().map(|f| f.value_amount).sum()
    }

    /// Clear counters and collections, keeping `running` as is.
    pub fn clear(&mut self) {
        self.attempts_count = 0;
        self.total_value = 0.0;
        self.log.clear();
        self.finds.clear();
    }
}

/// Per-category subtotal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub symbol: &'static str,
    pub unit_amount: f64,
    pub value_amount: f64,
    pub finds: usize,
}

/// Aggregates derived from a state snapshot for summary screens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    pub attempts: u64,
    pub find_count: usize,
    pub total_value: f64,
    pub by_category: Vec<CategoryTotal>,
    pub last_find: Option<Find>,
}

impl SessionStats {
    pub fn from_state(state: &SessionState) -> Self {
        let mut by_category: Vec<CategoryTotal> = Vec::new();
        for find in &state.finds {
            match by_category.iter_mut().find(|t| t.category == find.category) {
                Some(total) => {
                    total.unit_amount += find.unit_amount;
                    total.value_amount += find.value_amount;
                    total.finds += 1;
                }
                None => by_category.push(CategoryTotal {
                    category: find.category,
                    symbol: find.category.symbol(),
                    unit_amount: find.unit_amount,
                    value_amount: find.value_amount,
                    finds: 1,
                }),
            }
        }

        Self {
            attempts: state.attempts_count,
            find_count: state.finds.len(),
            total_value: state.total_value,
            by_category,
            last_find: state.finds.last().cloned(),
        }
    }

    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
