use axum::response::Html;

/// Management page. Talks to the JSON API only; carries no server state.
const INDEX_HTML: &str = include_str!("../static/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
