use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use url::Url;

/// Browser clients live on a separate origin. A cleanly parsed frontend
/// URL pins the layer to that origin; anything else falls back to the
/// permissive layer.
pub fn cors_layer(frontend_url: &str) -> CorsLayer {
    match origin_of(frontend_url) {
        Some(origin) => CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(AllowOrigin::exact(origin)),
        None => permissive_cors(),
    }
}

pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any)
}

fn origin_of(raw: &str) -> Option<HeaderValue> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?;
    let origin = match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    };
    HeaderValue::from_str(&origin).ok()
}
