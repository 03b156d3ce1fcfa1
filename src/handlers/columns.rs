// Column resource handlers, same shape as boards.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::{json_body, parse_body, require_creation_fields};
use crate::database::models::column::{
    BoardColumn, ColumnWithTickets, CreateColumn, UpdateColumn,
};
use crate::database::repositories::column;
use crate::error::ApiError;

fn column_not_found(id: Uuid) -> ApiError {
    ApiError::not_found(format!("Column with id '{}' not found", id))
}

/// GET /columns
pub async fn list_columns(State(pool): State<PgPool>) -> Result<Json<Vec<BoardColumn>>, ApiError> {
    Ok(Json(column::list(&pool).await?))
}

/// GET /columns/:id
pub async fn get_column(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<BoardColumn>, ApiError> {
    let found = column::find(&pool, id).await?.ok_or_else(|| column_not_found(id))?;
    Ok(Json(found))
}

/// GET /columns/tickets/:id - column together with its tickets
pub async fn get_column_tickets(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<ColumnWithTickets>, ApiError> {
    let found = column::find_with_tickets(&pool, id)
        .await?
        .ok_or_else(|| column_not_found(id))?;
    Ok(Json(found))
}

/// POST /columns
pub async fn create_column(
    State(pool): State<PgPool>,
    body: Option<Json<Map<String, Value>>>,
) -> Result<(StatusCode, Json<BoardColumn>), ApiError> {
    let body = json_body(body);
    require_creation_fields::<BoardColumn>(&body)?;

    let create: CreateColumn = parse_body(body)?;
    let saved = column::insert(&pool, create).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /columns/:id - partial field update
pub async fn update_column(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    body: Option<Json<Map<String, Value>>>,
) -> Result<Json<Value>, ApiError> {
    let body = json_body(body);
    if body.is_empty() {
        return Err(ApiError::bad_request("Please specify a request body"));
    }

    let patch: UpdateColumn = parse_body(body)?;
    let affected = column::update(&pool, id, &patch).await?;
    if affected == 0 {
        return Err(column_not_found(id));
    }

    let updated = column::find(&pool, id).await?.ok_or_else(|| column_not_found(id))?;
    Ok(Json(json!({
        "updateResult": { "affected": affected },
        "updatedColumn": updated,
    })))
}

/// DELETE /columns/:id - cascades to the column's tickets
pub async fn delete_column(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if column::delete(&pool, id).await? == 0 {
        return Err(column_not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
