// Board resource handlers: list, get, get-with-columns, create, update, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::{json_body, parse_body, require_creation_fields};
use crate::database::models::board::{Board, BoardListing, BoardWithColumns, CreateBoard, UpdateBoard};
use crate::database::repositories::board;
use crate::error::ApiError;

fn board_not_found(id: Uuid) -> ApiError {
    ApiError::not_found(format!("Board with id '{}' not found", id))
}

/// GET /boards - every board, annotated with its owned-column count
pub async fn list_boards(State(pool): State<PgPool>) -> Result<Json<Vec<BoardListing>>, ApiError> {
    Ok(Json(board::list(&pool).await?))
}

/// GET /boards/:id
pub async fn get_board(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Board>, ApiError> {
    let found = board::find(&pool, id).await?.ok_or_else(|| board_not_found(id))?;
    Ok(Json(found))
}

/// GET /boards/columns/:id - board together with its columns
pub async fn get_board_columns(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<BoardWithColumns>, ApiError> {
    let found = board::find_with_columns(&pool, id)
        .await?
        .ok_or_else(|| board_not_found(id))?;
    Ok(Json(found))
}

/// POST /boards
pub async fn create_board(
    State(pool): State<PgPool>,
    body: Option<Json<Map<String, Value>>>,
) -> Result<(StatusCode, Json<Board>), ApiError> {
    let body = json_body(body);
    require_creation_fields::<Board>(&body)?;

    let create: CreateBoard = parse_body(body)?;
    let saved = board::insert(&pool, create).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /boards/:id - partial field update
pub async fn update_board(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    body: Option<Json<Map<String, Value>>>,
) -> Result<Json<Value>, ApiError> {
    let body = json_body(body);
    if body.is_empty() {
        return Err(ApiError::bad_request("Please specify a request body"));
    }

    let patch: UpdateBoard = parse_body(body)?;
    let affected = board::update(&pool, id, &patch).await?;
    if affected == 0 {
        return Err(board_not_found(id));
    }

    let updated = board::find(&pool, id).await?.ok_or_else(|| board_not_found(id))?;
    Ok(Json(json!({
        "updateResult": { "affected": affected },
        "updatedBoard": updated,
    })))
}

/// DELETE /boards/:id - cascades to the board's columns and their tickets
pub async fn delete_board(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if board::delete(&pool, id).await? == 0 {
        return Err(board_not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
