use axum::response::Html;

/// Serve the embedded single-page client
pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}
