//! End-to-end checks against a running API (for example `wrangler dev` with
//! a fresh D1 database). Skipped unless BLOOM_API_BASE_URL is set.

use digibloom_core::protocol::CreateFlower;
use digibloom_core::{Flower, FlowerKind};

fn base_url_from_env() -> Option<String> {
    std::env::var("BLOOM_API_BASE_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
}

#[tokio::test]
async fn plant_fetch_and_list_round_trip() {
    let Some(base_url) = base_url_from_env() else {
        eprintln!("skipping: BLOOM_API_BASE_URL not set");
        return;
    };
    let client = reqwest::Client::new();

    let body = CreateFlower {
        title: "Hope".to_string(),
        message: "Stay strong".to_string(),
        author: None,
        x: 120.7,
        y: 340.2,
        flower: FlowerKind::RedTulip,
    };
    let created: Flower = client
        .post(format!("{base_url}/api/flowers"))
        .json(&body)
        .send()
        .await
        .expect("post flower")
        .error_for_status()
        .expect("created")
        .json()
        .await
        .expect("created body");

    assert_eq!(created.x, 121);
    assert_eq!(created.y, 340);
    assert!(created.slug.starts_with("hope-"), "slug {}", created.slug);
    assert!(!created.id.is_empty());

    let fetched: Flower = client
        .get(format!("{base_url}/api/flowers/{}", created.slug))
        .send()
        .await
        .expect("get flower")
        .error_for_status()
        .expect("found")
        .json()
        .await
        .expect("flower body");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title, "Hope");

    let listed: Vec<Flower> = client
        .get(format!("{base_url}/api/flowers"))
        .query(&[("minX", created.x), ("maxX", created.x)])
        .send()
        .await
        .expect("list flowers")
        .error_for_status()
        .expect("listed")
        .json()
        .await
        .expect("list body");
    assert!(listed.iter().any(|flower| flower.id == created.id));
}

#[tokio::test]
async fn unknown_slug_is_a_404() {
    let Some(base_url) = base_url_from_env() else {
        eprintln!("skipping: BLOOM_API_BASE_URL not set");
        return;
    };
    let response = reqwest::Client::new()
        .get(format!("{base_url}/api/flowers/no-such-flower-00000000"))
        .send()
        .await
        .expect("get flower");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn missing_fields_are_a_400() {
    let Some(base_url) = base_url_from_env() else {
        eprintln!("skipping: BLOOM_API_BASE_URL not set");
        return;
    };
    let response = reqwest::Client::new()
        .post(format!("{base_url}/api/flowers"))
        .json(&serde_json::json!({ "title": "Hope", "x": 1, "y": 2 }))
        .send()
        .await
        .expect("post flower");
    assert_eq!(response.status(), 400);
}
