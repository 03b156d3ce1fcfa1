use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::column::{
    BoardColumn, ColumnWithTickets, CreateColumn, UpdateColumn,
};
use crate::database::repositories::ticket;

pub async fn list(pool: &PgPool) -> Result<Vec<BoardColumn>, sqlx::Error> {
    sqlx::query_as::<_, BoardColumn>("SELECT * FROM columns ORDER BY created_at")
        .fetch_all(pool)
        .await
}

pub async fn list_for_board(pool: &PgPool, board_id: Uuid) -> Result<Vec<BoardColumn>, sqlx::Error> {
    sqlx::query_as::<_, BoardColumn>(
        "SELECT * FROM columns WHERE board_id = $1 ORDER BY created_at",
    )
    .bind(board_id)
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<BoardColumn>, sqlx::Error> {
    sqlx::query_as::<_, BoardColumn>("SELECT * FROM columns WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Column together with its owned tickets; `None` only when the column itself
/// is missing.
pub async fn find_with_tickets(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ColumnWithTickets>, sqlx::Error> {
    let Some(column) = find(pool, id).await? else {
        return Ok(None);
    };
    let tickets = ticket::list_for_column(pool, id).await?;
    Ok(Some(ColumnWithTickets { column, tickets }))
}

pub async fn insert(pool: &PgPool, create: CreateColumn) -> Result<BoardColumn, sqlx::Error> {
    sqlx::query_as::<_, BoardColumn>(
        "INSERT INTO columns (column_name, board_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(create.column_name)
    .bind(create.board_id)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, id: Uuid, patch: &UpdateColumn) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE columns SET \
         column_name = COALESCE($2, column_name), \
         board_id = COALESCE($3, board_id), \
         updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&patch.column_name)
    .bind(patch.board_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Deletes cascade to the column's tickets via the schema's foreign key.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM columns WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
