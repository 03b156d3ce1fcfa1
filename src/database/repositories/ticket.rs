use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::ticket::{CreateTicket, Ticket, UpdateTicket};

pub async fn list(pool: &PgPool) -> Result<Vec<Ticket>, sqlx::Error> {
    sqlx::query_as::<_, Ticket>("SELECT * FROM tickets ORDER BY created_at")
        .fetch_all(pool)
        .await
}

pub async fn list_for_column(pool: &PgPool, column_id: Uuid) -> Result<Vec<Ticket>, sqlx::Error> {
    sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE column_id = $1 ORDER BY created_at")
        .bind(column_id)
        .fetch_all(pool)
        .await
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<Ticket>, sqlx::Error> {
    sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &PgPool, create: CreateTicket) -> Result<Ticket, sqlx::Error> {
    sqlx::query_as::<_, Ticket>(
        "INSERT INTO tickets (ticket_name, description, priority, done, column_id) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(create.ticket_name)
    .bind(create.description)
    .bind(create.priority)
    .bind(create.done.unwrap_or(false))
    .bind(create.column_id)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, id: Uuid, patch: &UpdateTicket) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE tickets SET \
         ticket_name = COALESCE($2, ticket_name), \
         description = COALESCE($3, description), \
         priority = COALESCE($4, priority), \
         done = COALESCE($5, done), \
         column_id = COALESCE($6, column_id), \
         updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&patch.ticket_name)
    .bind(&patch.description)
    .bind(patch.priority)
    .bind(patch.done)
    .bind(patch.column_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Reassign the ticket's owning column. Callers are expected to have checked
/// that the destination column exists.
pub async fn assign_column(
    pool: &PgPool,
    ticket_id: Uuid,
    column_id: Uuid,
) -> Result<Ticket, sqlx::Error> {
    sqlx::query_as::<_, Ticket>(
        "UPDATE tickets SET column_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(ticket_id)
    .bind(column_id)
    .fetch_one(pool)
    .await
}
