use std::fmt;

use gloo_net::http::Request;

use digibloom_core::protocol::{ApiError, CreateFlower};
use digibloom_core::Flower;

/// Base URL for the flower API. Empty means same-origin, which is how the
/// deployed worker serves it; overridable at build time for `wrangler dev`.
fn api_base() -> &'static str {
    option_env!("DIGIBLOOM_API_BASE")
        .or(option_env!("TRUNK_PUBLIC_API_BASE"))
        .map(str::trim)
        .filter(|base| !base.is_empty())
        .unwrap_or("")
}

fn flowers_url() -> String {
    format!("{}/api/flowers", api_base())
}

fn flower_url(slug: &str) -> String {
    format!("{}/api/flowers/{slug}", api_base())
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ApiFailure {
    NotFound,
    Status { code: u16, message: String },
    Network(String),
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::NotFound => write!(f, "not found"),
            ApiFailure::Status { code, message } => write!(f, "server error {code}: {message}"),
            ApiFailure::Network(message) => write!(f, "network error: {message}"),
        }
    }
}

async fn failure_from_response(response: gloo_net::http::Response) -> ApiFailure {
    let code = response.status();
    if code == 404 {
        return ApiFailure::NotFound;
    }
    let message = match response.json::<ApiError>().await {
        Ok(body) => body.error,
        Err(_) => "unexpected response".to_string(),
    };
    ApiFailure::Status { code, message }
}

pub(crate) async fn fetch_flowers() -> Result<Vec<Flower>, ApiFailure> {
    let response = Request::get(&flowers_url())
        .send()
        .await
        .map_err(|err| ApiFailure::Network(err.to_string()))?;
    if !response.ok() {
        return Err(failure_from_response(response).await);
    }
    response
        .json::<Vec<Flower>>()
        .await
        .map_err(|err| ApiFailure::Network(err.to_string()))
}

pub(crate) async fn fetch_flower(slug: &str) -> Result<Flower, ApiFailure> {
    let response = Request::get(&flower_url(slug))
        .send()
        .await
        .map_err(|err| ApiFailure::Network(err.to_string()))?;
    if !response.ok() {
        return Err(failure_from_response(response).await);
    }
    response
        .json::<Flower>()
        .await
        .map_err(|err| ApiFailure::Network(err.to_string()))
}

pub(crate) async fn plant_flower(body: &CreateFlower) -> Result<Flower, ApiFailure> {
    let request = Request::post(&flowers_url())
        .json(body)
        .map_err(|err| ApiFailure::Network(err.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|err| ApiFailure::Network(err.to_string()))?;
    if !response.ok() {
        return Err(failure_from_response(response).await);
    }
    response
        .json::<Flower>()
        .await
        .map_err(|err| ApiFailure::Network(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_same_origin_by_default() {
        assert_eq!(flowers_url(), "/api/flowers");
        assert_eq!(flower_url("hope-ab12cd34"), "/api/flowers/hope-ab12cd34");
    }
}
