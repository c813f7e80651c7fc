use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};

use crate::{entities::contact::ContactPayload, utils::get_client_ip::get_client_ip, AppState};

pub async fn submit_contact(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<ContactPayload>,
) -> impl Responder {
    let client_id = get_client_ip(&req);

    match state.contact_handler.submit(&client_id, payload.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_http_response(),
    }
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({
        "error": "Method not allowed"
    }))
}

/// OPTIONS without CORS request headers never reaches the CORS middleware's
/// preflight path, so answer it here.
pub async fn options() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ALLOW, "POST, OPTIONS"))
        .finish()
}
