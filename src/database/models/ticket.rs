use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::models::column::BoardColumn;
use crate::validation::Entity;

/// Ticket priority, lowercase on the wire and in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub ticket_name: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub done: bool,
    pub column_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Ticket {
    const KIND: &'static str = "Ticket";
    const REQUIRED_FIELDS: &'static [&'static str] = &["ticketName", "priority"];
}

/// Move-ticket response shape: the ticket with its new column embedded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketWithColumn {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub column: BoardColumn,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    pub ticket_name: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub done: Option<bool>,
    pub column_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicket {
    pub ticket_name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub done: Option<bool>,
    pub column_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::Critical).unwrap(), "\"critical\"");
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_priority_rejects_unknown_values() {
        assert!(serde_json::from_str::<Priority>("\"urgent\"").is_err());
    }

    #[test]
    fn test_priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
