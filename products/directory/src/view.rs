use serde::Serialize;
use thiserror::Error;

use crate::{present::DisplayRecord, record::EmployeeRecord};

/// Failure reported by the data service for the directory query.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result of one directory fetch. Both halves may be set at once when the
/// service reports an error alongside a (possibly empty) record list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    pub records: Option<Vec<EmployeeRecord>>,
    pub error: Option<FetchError>,
}

impl FetchOutcome {
    pub fn records(records: Vec<EmployeeRecord>) -> Self {
        Self {
            records: Some(records),
            error: None,
        }
    }

    pub fn failed(error: FetchError) -> Self {
        Self {
            records: None,
            error: Some(error),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Error,
    Populated,
    Empty,
}

/// Error beats populated beats empty. Absent records classify like an empty
/// list.
pub fn classify(records: Option<&[EmployeeRecord]>, error: Option<&FetchError>) -> Classification {
    if error.is_some() {
        Classification::Error
    } else if records.is_some_and(|records| !records.is_empty()) {
        Classification::Populated
    } else {
        Classification::Empty
    }
}

/// Everything the directory page needs to render one fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirectoryView {
    pub state: Classification,
    pub count: usize,
    pub error: Option<FetchError>,
    pub employees: Vec<DisplayRecord>,
}

impl DirectoryView {
    pub fn present(records: Option<Vec<EmployeeRecord>>, error: Option<FetchError>) -> Self {
        let state = classify(records.as_deref(), error.as_ref());
        let employees = records
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(DisplayRecord::from_record)
            .collect::<Vec<_>>();
        Self {
            state,
            count: employees.len(),
            error,
            employees,
        }
    }

    pub fn from_outcome(outcome: FetchOutcome) -> Self {
        Self::present(outcome.records, outcome.error)
    }

    pub fn count_label(&self) -> String {
        format!("{} employees", self.count)
    }

    pub fn shows_table(&self) -> bool {
        !self.employees.is_empty()
    }

    /// The "no employees" notice is suppressed while an error banner is up.
    pub fn shows_empty_notice(&self) -> bool {
        self.employees.is_empty() && self.error.is_none()
    }
}
