// Ticket resource handlers plus the move-ticket transition.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::{json_body, parse_body, require_creation_fields};
use crate::database::models::ticket::{
    CreateTicket, Ticket, TicketWithColumn, UpdateTicket,
};
use crate::database::repositories::{column, ticket};
use crate::error::ApiError;
use crate::validation::is_supplied;

fn ticket_not_found(id: Uuid) -> ApiError {
    ApiError::not_found(format!("Ticket with id '{}' not found", id))
}

/// GET /tickets
pub async fn list_tickets(State(pool): State<PgPool>) -> Result<Json<Vec<Ticket>>, ApiError> {
    Ok(Json(ticket::list(&pool).await?))
}

/// GET /tickets/:id
pub async fn get_ticket(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ticket>, ApiError> {
    let found = ticket::find(&pool, id).await?.ok_or_else(|| ticket_not_found(id))?;
    Ok(Json(found))
}

/// POST /tickets
pub async fn create_ticket(
    State(pool): State<PgPool>,
    body: Option<Json<Map<String, Value>>>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let body = json_body(body);
    require_creation_fields::<Ticket>(&body)?;

    let create: CreateTicket = parse_body(body)?;
    let saved = ticket::insert(&pool, create).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// PUT /tickets/:id - partial field update
pub async fn update_ticket(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    body: Option<Json<Map<String, Value>>>,
) -> Result<Json<Value>, ApiError> {
    let body = json_body(body);
    if body.is_empty() {
        return Err(ApiError::bad_request("Please specify a request body"));
    }

    let patch: UpdateTicket = parse_body(body)?;
    let affected = ticket::update(&pool, id, &patch).await?;
    if affected == 0 {
        return Err(ticket_not_found(id));
    }

    let updated = ticket::find(&pool, id).await?.ok_or_else(|| ticket_not_found(id))?;
    Ok(Json(json!({
        "updateResult": { "affected": affected },
        "updatedTicket": updated,
    })))
}

/// DELETE /tickets/:id
pub async fn delete_ticket(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if ticket::delete(&pool, id).await? == 0 {
        return Err(ticket_not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// An id field is checked for supplied-ness (same semantics as the create
/// validation: present, non-null, non-empty) before it is parsed, so an empty
/// `destinationColumnId` still names the destination field, not the ticket.
fn required_uuid(body: &Map<String, Value>, field: &str) -> Result<Uuid, ApiError> {
    if !is_supplied(body.get(field)) {
        return Err(ApiError::bad_request(format!("{} is required", field)));
    }
    serde_json::from_value(body[field].clone())
        .map_err(|err| ApiError::bad_request(format!("{}: {}", field, err)))
}

/// PUT /tickets/move - reassign a ticket to another column.
///
/// Checks run in a fixed order - ticketId, then destinationColumnId, then
/// ticket existence before column existence; the order decides which error
/// message wins when several inputs are bad at once.
pub async fn move_ticket(
    State(pool): State<PgPool>,
    body: Option<Json<Map<String, Value>>>,
) -> Result<Json<TicketWithColumn>, ApiError> {
    let body = json_body(body);

    let ticket_id = required_uuid(&body, "ticketId")?;
    let destination_column_id = required_uuid(&body, "destinationColumnId")?;

    if ticket::find(&pool, ticket_id).await?.is_none() {
        return Err(ticket_not_found(ticket_id));
    }
    let destination = column::find(&pool, destination_column_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "Column with id '{}' not found",
                destination_column_id
            ))
        })?;

    let moved = ticket::assign_column(&pool, ticket_id, destination_column_id).await?;
    Ok(Json(TicketWithColumn {
        ticket: moved,
        column: destination,
    }))
}
