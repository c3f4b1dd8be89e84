use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;

use crate::notify::ToastLog;
use crate::sync::SyncState;

#[derive(Clone)]
pub struct AppState {
    pub state: watch::Receiver<SyncState>,
    pub toasts: Arc<ToastLog>,
}

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/state", get(state_handler))
        .route("/api/points-table", get(points_table_handler))
        .route("/api/schedule", get(schedule_handler))
        .route("/api/notifications", get(notifications_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

async fn index_handler() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}

/// GET /api/state — the full `{snapshot, loading, error}` tuple.
async fn state_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.state.borrow().clone())
}

/// GET /api/points-table
async fn points_table_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let table = state
        .state
        .borrow()
        .snapshot
        .as_ref()
        .map(|s| s.points_table.clone())
        .unwrap_or_default();
    Json(table)
}

/// GET /api/schedule
async fn schedule_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let schedule = state
        .state
        .borrow()
        .snapshot
        .as_ref()
        .map(|s| s.schedule.clone())
        .unwrap_or_default();
    Json(schedule)
}

/// GET /api/notifications — recent toasts, newest first.
async fn notifications_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.toasts.recent())
}

/// Embedded single-file dashboard (HTML + CSS + JS)
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>IPL Dashboard</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  header .error { color: var(--red); font-size: 0.85rem; }
  main { display: grid; grid-template-columns: 2fr 1fr; gap: 1rem; padding: 1rem 2rem; }
  section { background: var(--card); border: 1px solid var(--border); border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
  section h2 { font-size: 1rem; color: var(--muted); margin-bottom: 0.8rem; text-transform: uppercase; letter-spacing: 0.05em; }
  table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
  th, td { text-align: left; padding: 0.4rem 0.5rem; border-bottom: 1px solid var(--border); }
  th { color: var(--muted); font-weight: 600; }
  #featured pre { white-space: pre-wrap; font-size: 0.8rem; color: var(--muted); }
  .toast { padding: 0.5rem; border-left: 3px solid var(--accent); margin-bottom: 0.5rem; font-size: 0.85rem; }
  .loading { color: var(--muted); padding: 2rem; text-align: center; }
</style>
</head>
<body>
<header>
  <h1>IPL Dashboard</h1>
  <span id="status" class="error"></span>
</header>
<main>
  <div>
    <section id="featured"><h2>Featured Match</h2><pre>–</pre></section>
    <section><h2>Points Table</h2>
      <table id="points">
        <thead><tr><th>#</th><th>Team</th><th>M</th><th>W</th><th>L</th><th>Pts</th><th>NRR</th></tr></thead>
        <tbody><tr><td colspan="7" class="loading">Loading…</td></tr></tbody>
      </table>
    </section>
  </div>
  <section><h2>Notifications</h2><div id="toasts"></div></section>
</main>
<script>
async function refresh() {
  try {
    const state = await (await fetch('/api/state')).json();
    document.getElementById('status').textContent = state.error || '';
    if (state.snapshot) {
      document.querySelector('#featured pre').textContent =
        JSON.stringify(state.snapshot.featuredMatch, null, 2) || '–';
      const rows = state.snapshot.pointsTable.map(r =>
        `<tr><td>${r.OrderNo}</td><td>${r.TeamName}</td><td>${r.Matches}</td>` +
        `<td>${r.Wins}</td><td>${r.Loss}</td><td>${r.Points}</td><td>${r.NetRunRate}</td></tr>`);
      document.querySelector('#points tbody').innerHTML = rows.join('');
    }
    const toasts = await (await fetch('/api/notifications')).json();
    document.getElementById('toasts').innerHTML =
      toasts.map(t => `<div class="toast">${t.message}</div>`).join('');
  } catch (e) {
    document.getElementById('status').textContent = 'dashboard fetch failed';
  }
}
refresh();
setInterval(refresh, 10000);
</script>
</body>
</html>
"#;
