//! `Transport` over HTTP
//!
//! `GET` and `DELETE` carry the top-level parameters in the query string,
//! every other method sends them as a JSON body.

use super::client::HttpClient;
use crate::error::Result;
use crate::operation::OperationDescriptor;
use crate::transport::Transport;
use crate::types::Method;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde_json::Value;

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, operation: &OperationDescriptor, params: &Value) -> Result<Value> {
        self.execute(operation, params).await
    }
}

/// Attach `params` to a request the way `method` expects them
pub(crate) fn encode_params(request: RequestBuilder, method: Method, params: &Value) -> RequestBuilder {
    if method.uses_query() {
        request.query(&query_pairs(params))
    } else {
        request.json(params)
    }
}

/// Flatten top-level parameters into query pairs
///
/// Scalars are stringified, arrays are joined with `,`, nulls are skipped
/// and nested objects are sent as compact JSON.
pub fn query_pairs(params: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = params else {
        return Vec::new();
    };

    map.iter()
        .filter_map(|(key, value)| query_value(value).map(|v| (key.clone(), v)))
        .collect()
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}
