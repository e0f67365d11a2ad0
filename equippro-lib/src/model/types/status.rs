//! Ticket lifecycle status

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Status of a maintenance ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Opened, no technician working on it yet.
    Waiting,
    /// A technician is working on it.
    Underway,
    /// Closed; the close date is set.
    Closed,
}

impl TicketStatus {
    /// Returns the wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Underway => "underway",
            Self::Closed => "closed",
        }
    }

    /// Parses a wire name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "waiting" => Some(Self::Waiting),
            "underway" => Some(Self::Underway),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Reads an optional status, blanking values this client does not know.
///
/// Wire names are matched case-insensitively. Anything else (an unknown
/// name, a number, an object) becomes `None` so that one odd row does not
/// fail a whole list.
pub(crate) fn lenient_status<'de, D>(deserializer: D) -> Result<Option<TicketStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let status = raw.as_str().and_then(TicketStatus::parse);
    if status.is_none() && !raw.is_null() {
        log::warn!("ignoring unknown ticket status {}", raw);
    }
    Ok(status)
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
