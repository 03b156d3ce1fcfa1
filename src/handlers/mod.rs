pub mod auth;
pub mod boards;
pub mod columns;
pub mod tickets;

use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::validation::{missing_required_fields, Entity};

/// Missing or unparseable request bodies are treated as empty submissions.
pub(crate) fn json_body(body: Option<Json<Map<String, Value>>>) -> Map<String, Value> {
    body.map(|Json(map)| map).unwrap_or_default()
}

/// Reject a create request that is missing mandatory fields, naming them in
/// declaration order.
pub(crate) fn require_creation_fields<T: Entity>(body: &Map<String, Value>) -> Result<(), ApiError> {
    let missing = missing_required_fields::<T>(body);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "Creating a {} requires the following mandatory fields: {}",
            T::KIND,
            missing.join(", ")
        )))
    }
}

pub(crate) fn parse_body<T: DeserializeOwned>(body: Map<String, Value>) -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(body)).map_err(|err| ApiError::bad_request(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::board::Board;
    use crate::database::models::ticket::Ticket;

    #[test]
    fn test_create_error_names_missing_fields_in_order() {
        let err = require_creation_fields::<Ticket>(&Map::new()).unwrap_err();
        assert_eq!(
            err.to_json(),
            serde_json::json!(
                "Creating a Ticket requires the following mandatory fields: ticketName, priority"
            )
        );
    }

    #[test]
    fn test_complete_create_body_passes() {
        let body = match serde_json::json!({"boardName": "sprint 12"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert!(require_creation_fields::<Board>(&body).is_ok());
    }
}
