// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use serde::Serialize;

/// The error body used by the account API.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,

    pub error_code: String,

    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, error_code: &str, message: String) -> Self {
        Self { status, error_code: error_code.to_string(), message }
    }

    pub fn not_found(kind: &str, id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "RESOURCE_DOES_NOT_EXIST",
            format!("{kind} {id} does not exist"),
        )
    }

    pub fn conflict(kind: &str, identifier: &str) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            "RESOURCE_ALREADY_EXISTS",
            format!("{kind} matching {identifier} exists already"),
        )
    }

    pub fn invalid(message: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_PARAMETER_VALUE", message)
    }

    pub fn to_http_response(self) -> Result<Response<Body>, http::Error> {
        json_response(self.status, &self)
    }
}

impl From<dbrest::PatchRequestError> for ApiError {
    fn from(e: dbrest::PatchRequestError) -> Self {
        ApiError::invalid(e.to_string())
    }
}

pub fn json_response<T>(
    status: StatusCode,
    body: &T,
) -> Result<Response<Body>, http::Error>
where
    T: Serialize,
{
    match serde_json::to_string(body) {
        Ok(serialized) => Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(serialized.into()),

        Err(e) => Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .header("Content-Type", "application/json")
            .body(
                serde_json::json!(
                    {
                    "error_code": "INTERNAL_ERROR",
                    "message": format!("serializing response failed: {e}"),
                    }
                )
                .to_string()
                .into(),
            ),
    }
}

pub fn deleted_http_response() -> Result<Response<Body>, http::Error> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Content-Type", "application/json")
        .body(Body::empty())
}

/// Turn a store result into the HTTP response for it.
pub fn respond<T>(
    result: Result<T, ApiError>,
    status: StatusCode,
) -> Result<Response<Body>, HttpError>
where
    T: Serialize,
{
    let response = match result {
        Ok(body) => json_response(status, &body),
        Err(error) => error.to_http_response(),
    };

    response.map_err(HttpError::from)
}
