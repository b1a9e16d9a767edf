use std::fmt;

use serde::{Serialize, Serializer};

use crate::record::{EmployeeRecord, RecordKey};

/// Rendered in place of any field the source row does not carry.
pub const MISSING_MARKER: &str = "-";
pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_INITIAL: char = '?';

/// A display value that is either present or explicitly missing. Serializes
/// as the text it renders, so missing cells carry [`MISSING_MARKER`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Present(String),
    Missing,
}

impl Cell {
    fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(text) => Cell::Present(text.to_string()),
            None => Cell::Missing,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Cell::Present(text) => text,
            Cell::Missing => MISSING_MARKER,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render-ready projection of an [`EmployeeRecord`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayRecord {
    pub key: Option<RecordKey>,
    pub display_name: String,
    pub initial: char,
    pub position: Cell,
    pub department: Cell,
    pub email: Cell,
    pub mailto: Option<String>,
}

impl DisplayRecord {
    pub fn from_record(record: &EmployeeRecord) -> Self {
        let email = first_non_empty([record.email.as_deref()]);
        Self {
            key: record.id.clone(),
            display_name: display_name(record),
            initial: initial(record),
            position: Cell::from_value(first_non_empty([
                record.position.as_deref(),
                record.title.as_deref(),
            ])),
            department: Cell::from_value(first_non_empty([record.department.as_deref()])),
            email: Cell::from_value(email),
            mailto: email.map(|address| format!("mailto:{address}")),
        }
    }
}

/// `full_name`, then `name`, then the trimmed `first_name last_name`
/// composition, then [`UNKNOWN_NAME`].
pub fn display_name(record: &EmployeeRecord) -> String {
    let composed = format!(
        "{} {}",
        record.first_name.as_deref().unwrap_or_default(),
        record.last_name.as_deref().unwrap_or_default()
    );
    first_non_empty([
        record.full_name.as_deref(),
        record.name.as_deref(),
        Some(composed.trim()),
    ])
    .unwrap_or(UNKNOWN_NAME)
    .to_string()
}

/// First character of `full_name`, `name` or `first_name`. `last_name` alone
/// never supplies an initial.
pub fn initial(record: &EmployeeRecord) -> char {
    first_non_empty([
        record.full_name.as_deref(),
        record.name.as_deref(),
        record.first_name.as_deref(),
    ])
    .and_then(|source| source.chars().next())
    .unwrap_or(UNKNOWN_INITIAL)
}

fn first_non_empty<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
}
