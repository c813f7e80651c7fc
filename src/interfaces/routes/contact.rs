use actix_web::{http::Method, web};

use crate::handlers::contact;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contact")
            .route(web::post().to(contact::submit_contact))
            .route(web::method(Method::OPTIONS).to(contact::options))
            .default_service(web::to(contact::method_not_allowed))
    );
}
