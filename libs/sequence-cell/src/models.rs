use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SequenceError;

pub const DEFAULT_CODE_WIDTH: usize = 3;
const MAX_SCOPE_LEN: usize = 32;

/// Durable counter row: one per scope, only ever moved forward by an atomic
/// increment or zeroed by an administrative reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub scope: String,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub scope: CodeScope,
    pub value: u64,
    pub code: String,
}

/// Entity types that carry a human-readable sequential code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeScope {
    Supplier,
    Admin,
    Event,
    Appointment,
    Inquiry,
    Leave,
    Inventory,
    Dentist,
}

impl CodeScope {
    pub const ALL: [CodeScope; 8] = [
        CodeScope::Supplier,
        CodeScope::Admin,
        CodeScope::Event,
        CodeScope::Appointment,
        CodeScope::Inquiry,
        CodeScope::Leave,
        CodeScope::Inventory,
        CodeScope::Dentist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CodeScope::Supplier => "supplier",
            CodeScope::Admin => "admin",
            CodeScope::Event => "event",
            CodeScope::Appointment => "appointment",
            CodeScope::Inquiry => "inquiry",
            CodeScope::Leave => "leave",
            CodeScope::Inventory => "inventory",
            CodeScope::Dentist => "dentist",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            CodeScope::Supplier => "SUP",
            CodeScope::Admin => "ADM",
            CodeScope::Event => "EVT",
            CodeScope::Appointment => "APT",
            CodeScope::Inquiry => "INQ",
            CodeScope::Leave => "LV",
            CodeScope::Inventory => "INV",
            CodeScope::Dentist => "DEN",
        }
    }
}

impl fmt::Display for CodeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeScope {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_scope(s)?;
        CodeScope::ALL
            .iter()
            .copied()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| SequenceError::UnknownScope(s.to_string()))
    }
}

pub fn validate_scope(scope: &str) -> Result<(), SequenceError> {
    let well_formed = !scope.is_empty()
        && scope.len() <= MAX_SCOPE_LEN
        && scope
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

    if well_formed {
        Ok(())
    } else {
        Err(SequenceError::InvalidScope(scope.to_string()))
    }
}
