use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::models::{
    BudgetRequest, BudgetSummary, GenerateRequest, GenerateResponse, HealthStatus,
    InsightsRequest, NluRequest, NluResult, SpendingInsights,
};

pub const GENERIC_FAILURE: &str = "API request failed";

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response; `message` is the server's `detail` when it sent one.
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Encode(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        RequestOptions {
            method: Method::Get,
            body: None,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn post<B: Serialize>(body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(RequestOptions {
            method: Method::Post,
            body: Some(body),
            headers: Vec::new(),
        })
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// JSON content type first, caller headers override by case-insensitive name.
pub fn merge_headers(extra: &[(String, String)]) -> Vec<(String, String)> {
    let mut merged = vec![("Content-Type".to_string(), "application/json".to_string())];
    for (name, value) in extra {
        match merged
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => *slot = (name.clone(), value.clone()),
            None => merged.push((name.clone(), value.clone())),
        }
    }
    merged
}

pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(Value::Null) | None => GENERIC_FAILURE.to_string(),
            Some(Value::String(_)) => GENERIC_FAILURE.to_string(),
            Some(other) => other.to_string(),
        },
        Err(_) => GENERIC_FAILURE.to_string(),
    }
}

pub fn decode_body<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn fetch<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<R, ApiError> {
        let result = self.fetch_inner(path, options).await;
        match &result {
            Err(ApiError::Server { status, message }) => {
                log::error!("API Error: {path} returned {status}: {message}")
            }
            Err(err) => log::error!("API Error: {path}: {err}"),
            Ok(_) => {}
        }
        result
    }

    async fn fetch_inner<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        let mut builder: RequestBuilder = match options.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };
        for (name, value) in merge_headers(&options.headers) {
            builder = builder.header(&name, &value);
        }

        let request = match &options.body {
            Some(body) => builder
                .body(body.to_string())
                .map_err(|e| ApiError::Encode(e.to_string()))?,
            None => builder
                .build()
                .map_err(|e| ApiError::Encode(e.to_string()))?,
        };

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.ok() {
            return Err(ApiError::Server {
                status: resp.status(),
                message: error_message(&body),
            });
        }

        decode_body(&body)
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let options = RequestOptions::post(body)?;
        self.fetch(path, options).await
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let options = RequestOptions::default().header("Accept", "application/json");
        self.fetch(path, options).await
    }

    pub async fn budget_summary(&self, req: &BudgetRequest) -> Result<BudgetSummary, ApiError> {
        self.post_json("/api/budget-summary", req).await
    }

    pub async fn spending_insights(
        &self,
        req: &InsightsRequest,
    ) -> Result<SpendingInsights, ApiError> {
        self.post_json("/api/spending-insights", req).await
    }

    pub async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
        self.post_json("/api/generate", req).await
    }

    pub async fn analyze_text(&self, req: &NluRequest) -> Result<NluResult, ApiError> {
        self.post_json("/api/nlu", req).await
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("/health").await
    }
}
