// Router-level tests for the request-validation contracts. Every request here
// is rejected before any datastore or identity-provider round trip, so the
// suite runs without Postgres or Keycloak: the pool is built lazily and never
// actually connects.

mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{body_json, body_string, empty_request, json_request, offline_app};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let response = offline_app().oneshot(empty_request("GET", "/actuator/health")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?, json!({ "status": "UP" }));
    Ok(())
}

#[tokio::test]
async fn unmatched_route_returns_fixed_404_body() -> Result<()> {
    let response = offline_app().oneshot(empty_request("GET", "/no/such/route")).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await?,
        "endpoint not found, did you remember to use the controller?"
    );
    Ok(())
}

#[tokio::test]
async fn create_board_without_name_is_rejected() -> Result<()> {
    let response = offline_app().oneshot(json_request("POST", "/boards", json!({}))).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await?,
        json!("Creating a Board requires the following mandatory fields: boardName")
    );
    Ok(())
}

#[tokio::test]
async fn create_board_without_body_is_rejected() -> Result<()> {
    let response = offline_app().oneshot(empty_request("POST", "/boards")).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await?,
        json!("Creating a Board requires the following mandatory fields: boardName")
    );
    Ok(())
}

#[tokio::test]
async fn create_column_without_name_is_rejected() -> Result<()> {
    let response = offline_app().oneshot(json_request("POST", "/columns", json!({}))).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await?,
        json!("Creating a Column requires the following mandatory fields: columnName")
    );
    Ok(())
}

#[tokio::test]
async fn create_ticket_lists_missing_fields_in_declaration_order() -> Result<()> {
    let response = offline_app().oneshot(json_request("POST", "/tickets", json!({}))).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await?,
        json!("Creating a Ticket requires the following mandatory fields: ticketName, priority")
    );
    Ok(())
}

#[tokio::test]
async fn create_ticket_with_empty_name_is_rejected() -> Result<()> {
    let body = json!({ "ticketName": "", "priority": "high" });
    let response = offline_app().oneshot(json_request("POST", "/tickets", body)).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await?,
        json!("Creating a Ticket requires the following mandatory fields: ticketName")
    );
    Ok(())
}

#[tokio::test]
async fn update_with_empty_body_is_rejected() -> Result<()> {
    for resource in ["boards", "columns", "tickets"] {
        let uri = format!("/{}/3275b578-1b4b-454b-8d0e-d539e69cfafa", resource);
        let response = offline_app().oneshot(json_request("PUT", &uri, json!({}))).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await?, json!("Please specify a request body"));
    }
    Ok(())
}

#[tokio::test]
async fn move_ticket_requires_ticket_id() -> Result<()> {
    let body = json!({ "destinationColumnId": "171c8586-0ff9-4a1e-a00a-83aa0a47682c" });
    let response = offline_app().oneshot(json_request("PUT", "/tickets/move", body)).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await?, json!("ticketId is required"));
    Ok(())
}

#[tokio::test]
async fn move_ticket_requires_destination_column_id() -> Result<()> {
    let body = json!({ "ticketId": "976f8599-1bc6-498b-ab06-edee768af533" });
    let response = offline_app().oneshot(json_request("PUT", "/tickets/move", body)).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await?, json!("destinationColumnId is required"));
    Ok(())
}

#[tokio::test]
async fn move_ticket_with_empty_destination_reports_destination_message() -> Result<()> {
    // An empty string is "missing" under the supplied-ness semantics; it must
    // not collapse into the ticketId error.
    let body = json!({
        "ticketId": "976f8599-1bc6-498b-ab06-edee768af533",
        "destinationColumnId": "",
    });
    let response = offline_app().oneshot(json_request("PUT", "/tickets/move", body)).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await?, json!("destinationColumnId is required"));
    Ok(())
}

#[tokio::test]
async fn move_ticket_with_empty_ticket_id_reports_ticket_message() -> Result<()> {
    let body = json!({
        "ticketId": "",
        "destinationColumnId": "171c8586-0ff9-4a1e-a00a-83aa0a47682c",
    });
    let response = offline_app().oneshot(json_request("PUT", "/tickets/move", body)).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await?, json!("ticketId is required"));
    Ok(())
}

#[tokio::test]
async fn move_ticket_with_no_body_reports_ticket_id_first() -> Result<()> {
    let response = offline_app().oneshot(empty_request("PUT", "/tickets/move")).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await?, json!("ticketId is required"));
    Ok(())
}

#[tokio::test]
async fn login_without_authorization_header_is_rejected() -> Result<()> {
    let response = offline_app().oneshot(empty_request("GET", "/auth/login")).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await?,
        json!("Authorisation header missing or incorrect")
    );
    Ok(())
}

#[tokio::test]
async fn login_with_credentials_missing_separator_is_rejected() -> Result<()> {
    let request = Request::builder()
        .method("GET")
        .uri("/auth/login")
        // base64("useronly")
        .header(header::AUTHORIZATION, "Basic dXNlcm9ubHk=")
        .body(Body::empty())?;
    let response = offline_app().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await?, json!("Invalid Basic auth credentials"));
    Ok(())
}

#[tokio::test]
async fn refresh_without_token_is_rejected() -> Result<()> {
    let response = offline_app()
        .oneshot(json_request("POST", "/auth/refresh", json!({})))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await?, json!("refreshToken is required"));

    let response = offline_app()
        .oneshot(json_request("POST", "/auth/refresh", json!({ "refreshToken": "" })))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await?, json!("refreshToken is required"));
    Ok(())
}
