use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer. The site front end is served from its own origin, so any
/// origin, method and header is accepted.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
