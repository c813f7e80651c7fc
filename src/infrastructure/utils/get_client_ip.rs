use actix_web::HttpRequest;

use crate::constants::UNKNOWN_CLIENT;

/// Rate-limit key for the caller: first hop of `X-Forwarded-For`, then
/// `X-Real-IP`, then the shared `unknown` bucket.
pub fn get_client_ip(req: &HttpRequest) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        let first = forwarded.split(',').next().unwrap_or("").trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }

    header("x-real-ip")
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}
