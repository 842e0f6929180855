//! Inbound function request and name extraction.
//!
//! A [`FunctionRequest`] is the trigger-agnostic view of an HTTP call handed
//! to registered handlers: method, query parameters, and the raw body. It is
//! created per request and never mutated.

use std::collections::HashMap;

use axum::{body::Bytes, http::Method};

/// Snapshot of an inbound HTTP call.
#[derive(Debug, Clone)]
pub struct FunctionRequest {
    pub method: Method,
    pub query: HashMap<String, String>,
    pub body: Bytes,
}

impl FunctionRequest {
    pub fn new(method: Method, query: HashMap<String, String>, body: Bytes) -> Self {
        Self {
            method,
            query,
            body,
        }
    }

    /// Extract the optional `name` parameter.
    ///
    /// A non-empty `name` query parameter wins. Otherwise, for POST requests
    /// only, the body is read as a JSON object with a string `name` field.
    /// A malformed body, a non-object payload, or a missing/empty field all
    /// degrade to `None`; extraction never fails.
    pub fn name(&self) -> Option<String> {
        if let Some(value) = self.query.get("name") {
            if !value.is_empty() {
                return Some(value.clone());
            }
        }

        if self.method != Method::POST {
            return None;
        }

        let json: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        match json.get("name") {
            Some(serde_json::Value::String(name)) if !name.is_empty() => Some(name.clone()),
            _ => None,
        }
    }
}
