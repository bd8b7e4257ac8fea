use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    response::Response,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::errors::ServiceError;
use crate::handlers::common;
use crate::services::inventory::AddItemRequest;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ItemLookupRequest {
    pub item_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteItemRequest {
    /// Internal record identifier, not the item business key.
    pub item_id: Option<String>,
}

/// Get item details enriched with bin data and movement history.
#[utoipa::path(
    post,
    path = "/api/item",
    request_body = ItemLookupRequest,
    responses(
        (status = 200, description = "Item with bin details and movement history"),
        (status = 400, description = "Missing item_name parameter", body = crate::errors::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    payload: Result<Json<ItemLookupRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let item_name = payload
        .ok()
        .and_then(|Json(request)| request.item_name)
        .ok_or_else(|| ServiceError::BadRequest("Missing item_name parameter".to_string()))?;

    let details = state.inventory_service.lookup(&item_name).await?;
    Ok(common::success_data(details))
}

/// Add a new item and record its "in" movement.
#[utoipa::path(
    post,
    path = "/api/item/add",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Item added successfully"),
        (status = 400, description = "Non-JSON body or missing required field", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn add_item(
    State(state): State<AppState>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let Json(request) =
        payload.map_err(|_| ServiceError::BadRequest("Request must be JSON".to_string()))?;

    state.inventory_service.add_item(request).await?;
    Ok(common::success_message("Item added successfully"))
}

/// Delete an item by internal id. Accepts a JSON or form-encoded body.
#[utoipa::path(
    post,
    path = "/api/item/delete",
    request_body = DeleteItemRequest,
    responses(
        (status = 200, description = "Item deleted"),
        (status = 400, description = "Missing item_id parameter", body = crate::errors::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let item_id = extract_item_id(&headers, &body)
        .ok_or_else(|| ServiceError::BadRequest("Missing item_id parameter".to_string()))?;

    state.inventory_service.delete_item(&item_id).await?;
    Ok(common::success_message("Item deleted"))
}

// Clients submit deletes both as JSON and as form posts from the dashboard,
// so the body is sniffed by content type rather than extracted typed.
fn extract_item_id(headers: &HeaderMap, body: &Bytes) -> Option<String> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/json"))
        .unwrap_or(false);

    let item_id = if is_json {
        let payload = serde_json::from_slice::<Value>(body).ok()?;
        payload
            .get("item_id")
            .and_then(Value::as_str)
            .map(str::to_owned)
    } else {
        serde_urlencoded::from_bytes::<HashMap<String, String>>(body)
            .ok()?
            .remove("item_id")
    };

    item_id.filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        headers
    }

    fn form_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded".parse().unwrap(),
        );
        headers
    }

    #[test]
    fn item_id_from_json_body() {
        let body = Bytes::from_static(br#"{"item_id": "65f0aa"}"#);
        assert_eq!(
            extract_item_id(&json_headers(), &body),
            Some("65f0aa".to_string())
        );
    }

    #[test]
    fn item_id_from_form_body() {
        let body = Bytes::from_static(b"item_id=65f0aa&source=dashboard");
        assert_eq!(
            extract_item_id(&form_headers(), &body),
            Some("65f0aa".to_string())
        );
    }

    #[test]
    fn empty_or_absent_item_id_is_none() {
        assert_eq!(
            extract_item_id(&json_headers(), &Bytes::from_static(b"{}")),
            None
        );
        assert_eq!(
            extract_item_id(&json_headers(), &Bytes::from_static(br#"{"item_id": ""}"#)),
            None
        );
        assert_eq!(
            extract_item_id(&form_headers(), &Bytes::from_static(b"other=1")),
            None
        );
    }
}
