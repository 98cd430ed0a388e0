//! Request/response bodies that do not map one-to-one onto a domain command,
//! plus helpers for path and body extraction.

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use blueprint_core::DomainError;
use blueprint_network::{Location, Model, SwitchType, Vendor};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateCourseReviewRequest {
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwitchRequest {
    pub vendor: Vendor,
    pub model: Model,
    pub ip: String,
    pub location: Location,
    pub switch_type: SwitchType,
}

#[derive(Debug, Deserialize)]
pub struct AddNetworkRequest {
    pub address: String,
    pub name: String,
    pub cidr: u8,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListRoutersParams {
    #[serde(rename = "type")]
    pub router_type: Option<blueprint_network::RouterType>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct CreatedId<T> {
    pub uuid: T,
}

#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub username: String,
}

// -------------------------
// Extraction helpers
// -------------------------

/// Parse a path segment into a typed identifier; failures are `InvalidId` (400).
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(errors::domain_error_to_response)
}

/// Unwrap a JSON body, turning malformed input into a 400 with the usual error shape.
pub fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, axum::response::Response> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| errors::json_error(StatusCode::BAD_REQUEST, "malformed_request", rejection.body_text()))
}
