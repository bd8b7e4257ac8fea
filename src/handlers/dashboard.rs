use std::fmt::Write;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::services::stats::DashboardData;
use crate::AppState;

/// Dashboard page: latest items, totals and overall utilization.
///
/// Unlike the JSON API, failures here surface as plain text.
pub async fn dashboard(State(state): State<AppState>) -> Response {
    match state.stats_service.dashboard().await {
        Ok(data) => Html(render(&data)).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error loading dashboard: {}", err),
        )
            .into_response(),
    }
}

fn render(data: &DashboardData) -> String {
    let mut rows = String::new();
    for item in &data.items {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&item.item_id),
            escape(&item.item_name),
            escape(&item.category),
            escape(&item.current_location),
        );
    }

    let zones = data
        .zones
        .iter()
        .map(|zone| escape(zone))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Warehouse Dashboard</title></head>
<body>
<h1>Warehouse Dashboard</h1>
<p>Total items: {total}</p>
<p>Zones: {zones}</p>
<p>Overall utilization: {utilization}</p>
<table>
<tr><th>Item ID</th><th>Name</th><th>Category</th><th>Location</th></tr>
{rows}
</table>
</body>
</html>"#,
        total = data.total_items,
        zones = zones,
        utilization = data.utilization,
        rows = rows,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
