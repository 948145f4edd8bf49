use celebrity_atoms::recognition;
use celebrity_shared::messages::{METHOD_NOT_ALLOWED, NOT_FOUND};
use celebrity_shared::MessageBody;
use lambda_http::{
    http::{header::HeaderValue, Method, StatusCode},
    Body, Error, Request, Response,
};
use std::sync::Arc;

use crate::AppState;

fn with_cors_headers(mut resp: Response<Body>, allow_origin: &str) -> Response<Body> {
    let headers = resp.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_str(allow_origin).unwrap_or_else(|_| HeaderValue::from_static("*")),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("OPTIONS,POST"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type,X-Amz-Date,Authorization,X-Api-Key"),
    );

    resp
}

fn finalize_response(
    resp: Result<Response<Body>, Error>,
    allow_origin: &str,
) -> Result<Response<Body>, Error> {
    resp.map(|r| with_cors_headers(r, allow_origin))
}

/// API Gateway may prefix the stage name, e.g. `/dev/rekognition`.
fn matches_route(path: &str, route: &str) -> bool {
    let path = path.trim_end_matches('/');
    let route = route.trim_end_matches('/');
    if !route.starts_with('/') || route.len() < 2 {
        return false;
    }
    path == route || path.ends_with(route)
}

/// Main Lambda handler - routes requests to the recognition endpoint
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    let allow_origin = state.config.cors_allow_origin.as_str();
    tracing::info!(
        "🚀 Rekognition Lambda invoked - Method: {} Path: {}",
        method,
        path
    );

    // Handle CORS preflight
    if *method == Method::OPTIONS {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::Empty)
            .map_err(Box::new)?;
        return Ok(with_cors_headers(resp, allow_origin));
    }

    if !matches_route(path, &state.config.route_path) {
        tracing::warn!("⚠️ No route matched - Method: {} Path: {}", method, path);
        return finalize_response(not_found(), allow_origin);
    }

    match method {
        &Method::POST => finalize_response(
            recognition::recognize_handler(state.recognizer.as_ref(), event.body()).await,
            allow_origin,
        ),
        _ => finalize_response(method_not_allowed(), allow_origin),
    }
}

fn method_not_allowed() -> Result<Response<Body>, Error> {
    recognition::json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &MessageBody::new(METHOD_NOT_ALLOWED),
    )
}

fn not_found() -> Result<Response<Body>, Error> {
    recognition::json_response(StatusCode::NOT_FOUND, &MessageBody::new(NOT_FOUND))
}
