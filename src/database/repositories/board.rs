use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::board::{
    Board, BoardListing, BoardWithColumns, CreateBoard, UpdateBoard,
};
use crate::database::repositories::column;

/// Every board, each annotated with its owned-column count.
pub async fn list(pool: &PgPool) -> Result<Vec<BoardListing>, sqlx::Error> {
    sqlx::query_as::<_, BoardListing>(
        "SELECT b.*, \
         (SELECT COUNT(*) FROM columns c WHERE c.board_id = b.id) AS column_count \
         FROM boards b \
         ORDER BY b.created_at",
    )
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<Board>, sqlx::Error> {
    sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Board together with its owned columns. An empty column list is not an
/// error; only a missing board yields `None`.
pub async fn find_with_columns(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<BoardWithColumns>, sqlx::Error> {
    let Some(board) = find(pool, id).await? else {
        return Ok(None);
    };
    let columns = column::list_for_board(pool, id).await?;
    Ok(Some(BoardWithColumns { board, columns }))
}

pub async fn insert(pool: &PgPool, create: CreateBoard) -> Result<Board, sqlx::Error> {
    sqlx::query_as::<_, Board>("INSERT INTO boards (board_name) VALUES ($1) RETURNING *")
        .bind(create.board_name)
        .fetch_one(pool)
        .await
}

/// Partial update; absent fields are left untouched, `updated_at` is always
/// refreshed. Returns the number of rows affected.
pub async fn update(pool: &PgPool, id: Uuid, patch: &UpdateBoard) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE boards SET \
         board_name = COALESCE($2, board_name), \
         updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&patch.board_name)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Deletes cascade to the board's columns (and their tickets) via the schema's
/// foreign keys.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM boards WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
