use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tonic::transport::Server;
use tonic::transport::server::Router as GrpcRouter;
use tracing::{info, info_span, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::infrastructure::shutdown::shutdown_signal;
use crate::presentation::AppState;
use crate::presentation::grpc::service::GrpcAdService;
use crate::presentation::http::handlers::health_handler;
use crate::presentation::http::middleware::cors::apply_cors;
use crate::presentation::http::middleware::limits::apply_limits;
use crate::presentation::http::middleware::trace::apply_trace;
use crate::presentation::http::openapi::ApiDoc;
use crate::presentation::http::routes;

pub(crate) async fn run(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_app(settings, state.clone())?;
    let grpc = build_grpc(settings, state);

    let listener = TcpListener::bind(&settings.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.http_addr))?;
    let grpc_addr: SocketAddr = settings
        .grpc_addr
        .parse()
        .with_context(|| format!("invalid GRPC_ADDR: {}", settings.grpc_addr))?;

    let (stop_tx, stop_rx) = watch::channel(false);

    let mut http_stop = stop_rx.clone();
    let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
        http_stop.changed().await.ok();
    });
    let mut http = tokio::spawn(serve.into_future());
    info!("HTTP server listening on {}", settings.http_addr);

    let mut grpc_stop = stop_rx;
    let mut grpc = tokio::spawn(grpc.serve_with_shutdown(grpc_addr, async move {
        grpc_stop.changed().await.ok();
    }));
    info!("gRPC server listening on {grpc_addr}");

    tokio::select! {
        joined = &mut http => {
            grpc.abort();
            joined.context("HTTP server task failed")??;
            return Err(anyhow!("HTTP server stopped unexpectedly"));
        }
        joined = &mut grpc => {
            http.abort();
            joined.context("gRPC server task failed")??;
            return Err(anyhow!("gRPC server stopped unexpectedly"));
        }
        _ = shutdown_signal() => {}
    }

    stop_tx.send(true).ok();
    let drain = Duration::from_secs(settings.shutdown_timeout_secs);
    match tokio::time::timeout(drain, async { tokio::join!(http, grpc) }).await {
        Ok((http, grpc)) => {
            http.context("HTTP server task failed")??;
            grpc.context("gRPC server task failed")??;
        }
        Err(_) => warn!(
            timeout_secs = settings.shutdown_timeout_secs,
            "in-flight requests did not finish before shutdown timeout"
        ),
    }

    info!("servers stopped");
    Ok(())
}

pub(crate) fn build_grpc(settings: &Settings, state: AppState) -> GrpcRouter {
    let service = GrpcAdService::new(state)
        .into_server()
        .max_decoding_message_size(settings.grpc_max_decoding_message_size_bytes)
        .max_encoding_message_size(settings.grpc_max_encoding_message_size_bytes);

    Server::builder()
        .concurrency_limit_per_connection(settings.grpc_concurrency_limit)
        .trace_fn(|req| info_span!("grpc", method = %req.uri().path()))
        .add_service(service)
}

pub(crate) fn build_app(settings: &Settings, state: AppState) -> anyhow::Result<Router> {
    let app = build_router(state);
    let app = apply_limits(app, settings);
    let app = apply_trace(app);
    apply_cors(app, settings)
}

pub(crate) fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .merge(routes::router())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tonic::{Code, Request as GrpcRequest};
    use tower::ServiceExt;

    use super::{build_app, build_grpc};
    use crate::application::ad_service::AdService;
    use crate::data::repositories::memory::InMemoryRepository;
    use crate::infrastructure::settings::Settings;
    use crate::presentation::AppState;
    use crate::presentation::grpc::proto::{AdRpc, CreateAdRequest, GetAdRequest};
    use crate::presentation::grpc::service::GrpcAdService;

    fn test_settings() -> Settings {
        Settings {
            http_addr: "127.0.0.1:0".to_string(),
            grpc_addr: "127.0.0.1:0".to_string(),
            cors_origins: vec!["*".to_string()],
            log_level: "info".to_string(),
            http_request_body_limit_bytes: 64 * 1024,
            http_concurrency_limit: 16,
            grpc_concurrency_limit: 16,
            grpc_max_decoding_message_size_bytes: 64 * 1024,
            grpc_max_encoding_message_size_bytes: 64 * 1024,
            shutdown_timeout_secs: 1,
        }
    }

    fn test_state() -> AppState {
        AppState::new(Arc::new(AdService::new(InMemoryRepository::new())))
    }

    fn test_app() -> Router {
        build_app(&test_settings(), test_state()).expect("app must build")
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request must build");

        let response = app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body must be JSON")
        };
        (status, value)
    }

    async fn create_user(app: &Router, nickname: &str, email: &str) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/users",
            Some(json!({ "nickname": nickname, "email": email })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["id"].as_i64().expect("user id")
    }

    async fn create_ad(app: &Router, user_id: i64) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/ads",
            Some(json!({ "title": "hello", "text": "world", "user_id": user_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["id"].as_i64().expect("ad id")
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let app = test_app();
        let (status, body) = send(&app, Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn publish_flow_over_http() {
        let app = test_app();
        let uid = create_user(&app, "J.Cole", "foresthill@drive.com").await;
        let ad_id = create_ad(&app, uid).await;
        assert_eq!((uid, ad_id), (0, 0));

        let (status, body) = send(&app, Method::GET, "/api/v1/ads", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "data": [], "error": null }));

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/ads/0/status",
            Some(json!({ "published": true, "user_id": uid })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["published"], json!(true));
        assert!(body["error"].is_null());

        let (_, body) = send(&app, Method::GET, "/api/v1/ads", None).await;
        let listed = body["data"].as_array().expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], json!(ad_id));
        assert_eq!(listed[0]["author_id"], json!(uid));
    }

    #[tokio::test]
    async fn list_filters_come_from_query() {
        let app = test_app();
        let uid = create_user(&app, "Mac Miller", "swimming@circles.com").await;
        create_ad(&app, uid).await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/ads?published=false&title=hello",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

        let (status, body) = send(&app, Method::GET, "/api/v1/ads?date=yesterday", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["data"].is_null());
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn create_ad_for_unknown_author_is_failed_dependency() {
        let app = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/ads",
            Some(json!({ "title": "hello", "text": "world", "user_id": 9 })),
        )
        .await;
        assert_eq!(status, StatusCode::FAILED_DEPENDENCY);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn invalid_payloads_are_bad_requests() {
        let app = test_app();

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/users",
            Some(json!({ "nickname": "Kendrick", "email": "not-an-email" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uid = create_user(&app, "Kendrick", "section80@damn.com").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/ads",
            Some(json!({ "title": "", "text": "world", "user_id": uid })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap_or_default().contains("title"));

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/ads",
            Some(json!({ "title": "hello" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/v1/ads/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn foreign_delete_is_forbidden() {
        let app = test_app();
        let owner = create_user(&app, "Mac Miller", "swimming@circles.com").await;
        let other = create_user(&app, "Childish Gambino", "because@internet.com").await;
        let ad_id = create_ad(&app, owner).await;

        let uri = format!("/api/v1/ads/{ad_id}?user_id={other}");
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/ads/{ad_id}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, &format!("/api/v1/ads/{ad_id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let uri = format!("/api/v1/ads/{ad_id}?user_id={owner}");
        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "data": null, "error": null }));
    }

    #[tokio::test]
    async fn user_lifecycle_cascades_over_http() {
        let app = test_app();
        let uid = create_user(&app, "Mac Miller", "swimming@circles.com").await;
        let ad_id = create_ad(&app, uid).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/users/{uid}"),
            Some(json!({ "nickname": "KDot", "email": "money@trees.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!({ "id": uid, "nickname": "KDot", "email": "money@trees.com" })
        );

        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/users/{uid}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, &format!("/api/v1/users/{uid}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::GET, &format!("/api/v1/ads/{ad_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn http_and_grpc_share_one_service() {
        let state = test_state();
        let app = build_app(&test_settings(), state.clone()).expect("app must build");
        let grpc = GrpcAdService::new(state.clone());
        let _grpc_router = build_grpc(&test_settings(), state);

        let uid = create_user(&app, "J.Cole", "foresthill@drive.com").await;
        let ad = grpc
            .create_ad(GrpcRequest::new(CreateAdRequest {
                title: "hello".to_string(),
                text: "world".to_string(),
                user_id: Some(uid),
            }))
            .await
            .expect("gRPC create_ad must see the HTTP user")
            .into_inner();

        let (status, body) = send(&app, Method::GET, &format!("/api/v1/ads/{}", ad.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["author_id"], json!(uid));
        assert_eq!(body["data"]["title"], json!("hello"));

        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/users/{uid}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let status = grpc
            .get_ad(GrpcRequest::new(GetAdRequest { ad_id: Some(ad.id) }))
            .await
            .expect_err("cascade must be visible over gRPC");
        assert_eq!(status.code(), Code::NotFound);
    }
}
