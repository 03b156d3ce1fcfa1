use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::models::column::BoardColumn;
use crate::validation::Entity;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub board_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Board {
    const KIND: &'static str = "Board";
    const REQUIRED_FIELDS: &'static [&'static str] = &["boardName"];
}

/// List-all row: a board annotated with its owned-column count.
/// The count is derived at query time and never persisted.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BoardListing {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub board: Board,
    pub column_count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardWithColumns {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<BoardColumn>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoard {
    pub board_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoard {
    pub board_name: Option<String>,
}
