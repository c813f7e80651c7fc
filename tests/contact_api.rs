
use actix_web::{http::StatusCode, test};
use mockall::predicate;
use portfolio_contact::errors::NotifyError;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn valid_submission_is_forwarded_once() {
    let mut bot = MockBot::new();
    bot.expect_is_configured().return_const(true);
    bot.expect_send()
        .withf(|text: &str| {
            text.contains("New Contact: Jane")
                && text.contains("Email: jane@x.com")
                && text.contains("Message: Hi")
        })
        .times(1)
        .returning(|_| Ok(()));
    let (handler, _) = handler_with(bot);
    let app = spawn_app(handler).await;

    let res = test::call_service(&app, contact_request("203.0.113.7", jane())).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Message sent successfully"));
}

#[actix_rt::test]
async fn forwarded_text_is_exactly_three_lines() {
    let mut bot = MockBot::new();
    bot.expect_is_configured().return_const(true);
    bot.expect_send()
        .with(predicate::eq("New Contact: Jane\nEmail: jane@x.com\nMessage: Hi"))
        .times(1)
        .returning(|_| Ok(()));
    let (handler, _) = handler_with(bot);
    let app = spawn_app(handler).await;

    let body = json!({"name": "  Jane ", "email": "jane@x.com", "message": "\n Hi \n"});
    let res = test::call_service(&app, contact_request("203.0.113.7", body)).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn missing_message_is_rejected_without_forwarding() {
    let (handler, _) = handler_with(bot_expecting(0));
    let app = spawn_app(handler).await;

    let body = json!({"name": "Jane", "email": "jane@x.com"});
    let res = test::call_service(&app, contact_request("203.0.113.7", body)).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!("All fields are required"));
}

#[actix_rt::test]
async fn invalid_email_is_rejected_without_forwarding() {
    let (handler, _) = handler_with(bot_expecting(0));
    let app = spawn_app(handler).await;

    let body = json!({"name": "Jane", "email": "jane@x", "message": "Hi"});
    let res = test::call_service(&app, contact_request("203.0.113.7", body)).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!("Invalid email address"));
}

#[actix_rt::test]
async fn third_submission_within_the_hour_is_rate_limited() {
    let (handler, store) = handler_with(bot_expecting(2));
    let app = spawn_app(handler).await;

    for _ in 0..2 {
        let res = test::call_service(&app, contact_request("203.0.113.7", jane())).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = test::call_service(&app, contact_request("203.0.113.7", jane())).await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!("Too many submissions. Please try again later."));
    assert_eq!(store.tracked_len("203.0.113.7"), Some(2));
}

#[actix_rt::test]
async fn rate_limit_is_checked_before_validation() {
    let (handler, store) = handler_with(bot_expecting(0));
    let app = spawn_app(handler).await;

    // invalid submissions still use up the client's quota
    for _ in 0..2 {
        let res = test::call_service(&app, contact_request("198.51.100.4", json!({}))).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    let res = test::call_service(&app, contact_request("198.51.100.4", json!({}))).await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(store.tracked_len("198.51.100.4"), Some(2));
}

#[actix_rt::test]
async fn null_field_after_quota_is_rate_limited() {
    let (handler, store) = handler_with(bot_expecting(2));
    let app = spawn_app(handler).await;

    for _ in 0..2 {
        let res = test::call_service(&app, contact_request("203.0.113.7", jane())).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let body = json!({"name": "Jane", "email": "jane@x.com", "message": null});
    let res = test::call_service(&app, contact_request("203.0.113.7", body)).await;

    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(store.tracked_len("203.0.113.7"), Some(2));
}

#[actix_rt::test]
async fn null_or_non_string_field_counts_as_missing() {
    let (handler, store) = handler_with(bot_expecting(0));
    let app = spawn_app(handler).await;

    for body in [
        json!({"name": "Jane", "email": "jane@x.com", "message": null}),
        json!({"name": 5, "email": "jane@x.com", "message": "Hi"}),
    ] {
        let res = test::call_service(&app, contact_request("198.51.100.4", body)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["error"], json!("All fields are required"));
    }

    assert_eq!(store.tracked_len("198.51.100.4"), Some(2));
}

#[actix_rt::test]
async fn clients_are_keyed_by_first_forwarded_hop() {
    let (handler, store) = handler_with(bot_expecting(3));
    let app = spawn_app(handler).await;

    for ip in ["203.0.113.7, 10.0.0.1", "203.0.113.7, 10.0.0.2", "198.51.100.4"] {
        let res = test::call_service(&app, contact_request(ip, jane())).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    assert_eq!(store.tracked_len("203.0.113.7"), Some(2));
    assert_eq!(store.tracked_len("198.51.100.4"), Some(1));
}

#[actix_rt::test]
async fn callers_without_headers_share_one_bucket() {
    let (handler, store) = handler_with(bot_expecting(2));
    let app = spawn_app(handler).await;

    for expected in [StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS] {
        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(jane())
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), expected);
    }

    assert_eq!(store.tracked_len("unknown"), Some(2));
}

#[actix_rt::test]
async fn missing_credentials_surface_only_after_validation() {
    let mut bot = MockBot::new();
    bot.expect_is_configured().return_const(false);
    bot.expect_send().never();
    let (handler, _) = handler_with(bot);
    let app = spawn_app(handler).await;

    let bad = json!({"name": "Jane", "email": "nope", "message": "Hi"});
    let res = test::call_service(&app, contact_request("203.0.113.7", bad)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = test::call_service(&app, contact_request("203.0.113.7", jane())).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!("Server configuration error"));
}

#[actix_rt::test]
async fn upstream_failure_is_reported_generically() {
    let mut bot = MockBot::new();
    bot.expect_is_configured().return_const(true);
    bot.expect_send().times(1).returning(|_| {
        Err(NotifyError::Rejected {
            status: 400,
            body: r#"{"ok":false,"description":"Bad Request: chat not found"}"#.to_string(),
        })
    });
    let (handler, _) = handler_with(bot);
    let app = spawn_app(handler).await;

    let res = test::call_service(&app, contact_request("203.0.113.7", jane())).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!("Failed to send message. Please try again."));
    assert!(!body.to_string().contains("chat not found"));
}

#[actix_rt::test]
async fn transport_failure_is_reported_generically() {
    let mut bot = MockBot::new();
    bot.expect_is_configured().return_const(true);
    bot.expect_send()
        .times(1)
        .returning(|_| Err(NotifyError::Transport("operation timed out".to_string())));
    let (handler, _) = handler_with(bot);
    let app = spawn_app(handler).await;

    let res = test::call_service(&app, contact_request("203.0.113.7", jane())).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_rt::test]
async fn malformed_json_is_a_bad_request() {
    let (handler, store) = handler_with(bot_expecting(0));
    let app = spawn_app(handler).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .insert_header(("content-type", "application/json"))
        .insert_header(("x-forwarded-for", "203.0.113.7"))
        .set_payload(r#"{"name": "Jane", "email": "#)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].is_string());
    assert_eq!(store.tracked_len("203.0.113.7"), None);
}

#[actix_rt::test]
async fn other_methods_are_not_allowed() {
    let (handler, _) = handler_with(bot_expecting(0));
    let app = spawn_app(handler).await;

    let req = test::TestRequest::get().uri("/api/contact").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!("Method not allowed"));
}

#[actix_rt::test]
async fn preflight_is_answered_with_cors_headers() {
    let (handler, _) = handler_with(bot_expecting(0));
    let app = spawn_app(handler).await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/contact")
        .insert_header(("origin", "https://portfolio.example"))
        .insert_header(("access-control-request-method", "POST"))
        .insert_header(("access-control-request-headers", "content-type"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let headers = res.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    let methods = headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
}

#[actix_rt::test]
async fn bare_options_request_is_answered() {
    let (handler, _) = handler_with(bot_expecting(0));
    let app = spawn_app(handler).await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/contact")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("allow").unwrap(), "POST, OPTIONS");
}
