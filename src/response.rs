// SPDX-License-Identifier: MIT

//! Uniform JSON response envelope.
//!
//! Every endpoint answers with `{ result, msg, data }` so the frontend can
//! treat success and error payloads the same way.

use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// The `{result, msg, data}` wrapper shared by all endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub result: &'static str,
    pub msg: String,
    pub data: Value,
}

impl ApiResponse {
    pub fn success(msg: impl Into<String>, data: Value) -> Json<Self> {
        Json(Self {
            result: "success",
            msg: msg.into(),
            data,
        })
    }

    pub fn error(msg: impl Into<String>, data: Value) -> Self {
        Self {
            result: "error",
            msg: msg.into(),
            data,
        }
    }
}
