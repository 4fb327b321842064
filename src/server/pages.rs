use axum::extract::State;
use axum::response::Html;

use crate::server::render;
use crate::services::SharedQuoteStore;

/// GET / - the dashboard page, with the current snapshot already rendered
/// into the grid. The embedded script takes over from there: clock, theme
/// toggle, and the 10-second re-poll of `/api/stocks`.
pub async fn dashboard_handler(State(store): State<SharedQuoteStore>) -> Html<String> {
    let snapshot = store.snapshot().await;
    Html(render::render_page(&snapshot))
}
