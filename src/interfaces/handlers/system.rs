use actix_web::{web, get, HttpResponse, Responder};
use deadpool_redis::Pool;
use humantime::format_duration;
use chrono::Utc;
use redis::AsyncCommands;
use std::time::Duration;
use serde::Serialize;

use crate::{constants::START_TIME, AppState};

#[derive(Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub uptime: String,
    pub timestamp: String,
    pub start_at: String,
    pub version: String,
    pub rate_limit_backend: String,
    pub redis_status: String,
    pub notifier: String,
}

async fn redis_status(pool: Option<&Pool>) -> &'static str {
    let Some(pool) = pool else {
        return "Not configured";
    };

    match pool.get().await {
        Ok(mut conn) => {
            let pong: redis::RedisResult<String> = conn.ping().await;
            match pong {
                Ok(p) if p == "PONG" => "OK",
                _ => "Unavailable",
            }
        }
        Err(_) => "Unavailable",
    }
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let handler = &state.contact_handler;
    let notifier = if handler.notifier.is_configured() {
        "configured"
    } else {
        "not configured"
    };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "healthy".to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rate_limit_backend: handler.guard.backend().to_string(),
        redis_status: redis_status(state.redis_pool.as_ref()).await.to_string(),
        notifier: notifier.to_string(),
    })
}
