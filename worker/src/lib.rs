use std::cell::Cell;

use digibloom_core::protocol::{ApiError, CreateFlower, FlowerQuery};
use digibloom_core::slug::{is_valid_slug, slug_for_title, splitmix64};
use digibloom_core::Flower;
use js_sys::Date;
use wasm_bindgen::JsValue;
use worker::*;

const DB_BINDING: &str = "DB";

const SELECT_COLUMNS: &str = "id, slug, title, message, author, x, y, flower, created_at";

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    Router::new()
        .get_async("/api/flowers", list_flowers)
        .get_async("/api/flowers/:slug", get_flower)
        .post_async("/api/flowers", create_flower)
        .run(req, env)
        .await
}

thread_local! {
    static SEED_COUNTER: Cell<u64> = const { Cell::new(0) };
}

/// Entropy for ids and slug suffixes: wall clock mixed with a per-isolate
/// counter so two plantings in the same millisecond still diverge.
fn fresh_seed() -> u64 {
    let count = SEED_COUNTER.with(|counter| {
        let next = counter.get().wrapping_add(1);
        counter.set(next);
        next
    });
    splitmix64((Date::now() as u64) ^ count.wrapping_mul(0x9e3779b97f4a7c15))
}

fn fresh_id() -> String {
    let seed = fresh_seed();
    format!("{:016x}{:016x}", seed, splitmix64(seed ^ 0x5EED_B10C))
}

fn now_iso() -> String {
    Date::new_0().to_iso_string().as_string().unwrap_or_default()
}

fn json_error(status: u16, message: impl Into<String>) -> Result<Response> {
    Response::from_json(&ApiError::new(message)).map(|resp| resp.with_status(status))
}

async fn list_flowers(req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let url = req.url()?;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let query =
        FlowerQuery::from_pairs(pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())));

    let db = ctx.env.d1(DB_BINDING)?;
    let mut sql = format!("SELECT {SELECT_COLUMNS} FROM flowers");
    let mut clauses = Vec::new();
    let mut binds: Vec<JsValue> = Vec::new();
    if let Some(min_x) = query.min_x {
        clauses.push(format!("x >= ?{}", binds.len() + 1));
        binds.push(JsValue::from(min_x as f64));
    }
    if let Some(max_x) = query.max_x {
        clauses.push(format!("x <= ?{}", binds.len() + 1));
        binds.push(JsValue::from(max_x as f64));
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    let statement = db.prepare(&sql).bind(&binds)?;
    match statement.all().await.and_then(|result| result.results::<Flower>()) {
        Ok(flowers) => Response::from_json(&flowers),
        Err(err) => {
            console_error!("flower list query failed: {err}");
            json_error(500, "failed to load flowers")
        }
    }
}

async fn get_flower(_req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let Some(slug) = ctx.param("slug") else {
        return json_error(400, "missing slug");
    };
    if !is_valid_slug(slug) {
        return json_error(400, "invalid slug");
    }

    let db = ctx.env.d1(DB_BINDING)?;
    let sql = format!("SELECT {SELECT_COLUMNS} FROM flowers WHERE slug = ?1");
    let statement = db.prepare(&sql).bind(&[JsValue::from(slug.as_str())])?;
    match statement.first::<Flower>(None).await {
        Ok(Some(flower)) => Response::from_json(&flower),
        Ok(None) => json_error(404, "flower not found"),
        Err(err) => {
            console_error!("flower lookup failed for '{slug}': {err}");
            json_error(500, "failed to load flower")
        }
    }
}

async fn create_flower(mut req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let body: CreateFlower = match req.json().await {
        Ok(body) => body,
        Err(err) => {
            console_log!("rejected planting payload: {err}");
            return json_error(400, "missing or invalid flower fields");
        }
    };
    if let Err(err) = body.validate() {
        return json_error(400, err.to_string());
    }

    let id = fresh_id();
    let slug = slug_for_title(&body.title, fresh_seed());
    let flower = body.into_flower(id, slug, Some(now_iso()));

    let db = ctx.env.d1(DB_BINDING)?;
    let statement = db
        .prepare(
            "INSERT INTO flowers (id, slug, title, message, author, x, y, flower, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&[
            JsValue::from(flower.id.as_str()),
            JsValue::from(flower.slug.as_str()),
            JsValue::from(flower.title.as_str()),
            JsValue::from(flower.message.as_str()),
            flower
                .author
                .as_deref()
                .map(JsValue::from)
                .unwrap_or(JsValue::NULL),
            JsValue::from(flower.x as f64),
            JsValue::from(flower.y as f64),
            JsValue::from(flower.kind.tag()),
            flower
                .created_at
                .as_deref()
                .map(JsValue::from)
                .unwrap_or(JsValue::NULL),
        ])?;
    if let Err(err) = statement.run().await {
        console_error!("flower insert failed: {err}");
        return json_error(500, "failed to save flower");
    }

    console_log!("planted '{}' at ({}, {})", flower.slug, flower.x, flower.y);
    Response::from_json(&flower)
}
