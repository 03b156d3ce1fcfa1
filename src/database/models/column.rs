use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::models::ticket::Ticket;
use crate::validation::Entity;

/// A column within a board. The board reference is nullable - a column may
/// exist unowned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub id: Uuid,
    pub column_name: String,
    pub board_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for BoardColumn {
    const KIND: &'static str = "Column";
    const REQUIRED_FIELDS: &'static [&'static str] = &["columnName"];
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnWithTickets {
    #[serde(flatten)]
    pub column: BoardColumn,
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumn {
    pub column_name: String,
    pub board_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateColumn {
    pub column_name: Option<String>,
    pub board_id: Option<Uuid>,
}
