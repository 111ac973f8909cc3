//! Live status page
//!
//! Stateless per request, never an error response. The server shares only
//! the read side of the journal and the read-only clock with the check
//! loop; the browser session is never touched from request handlers.

use crate::clock::VirtualClock;
use crate::journal::Journal;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use tracing::info;

/// Number of journal lines shown on the status page
const LOG_TAIL_LINES: usize = 100;

pub struct AppState {
    pub clock: VirtualClock,
    pub journal: Journal,
}

/// GET / — virtual uptime and the journal tail, auto-refreshing
pub async fn status_page(data: web::Data<AppState>) -> impl Responder {
    let virtual_now = data.clock.now().format("%Y-%m-%d %H:%M:%S").to_string();
    let tail = data.journal.tail(LOG_TAIL_LINES).await;

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&virtual_now, &tail))
}

fn render_page(virtual_now: &str, lines: &[String]) -> String {
    format!(
        r#"<html>
  <head>
    <title>Wake Web</title>
    <meta http-equiv="refresh" content="1">
    <style>
      body {{ font-family: monospace; padding: 20px; }}
      .log-box {{
        background-color: #f9f9f9;
        padding: 10px;
        border-radius: 5px;
        border: 1px solid #ccc;
        height: 400px;
        overflow: auto;
        white-space: pre-wrap;
      }}
    </style>
  </head>
  <body>
    <h2>Wake Web</h2>
    <p>🌐 Web running since: <code>{}</code></p>
    <h3>Request Log (last {} entries)</h3>
    <div class="log-box">{}</div>
  </body>
</html>
"#,
        virtual_now,
        LOG_TAIL_LINES,
        lines.join("<br>")
    )
}

/// Serve the status page until the actix system shuts down
pub async fn serve(state: AppState, port: u16) -> std::io::Result<()> {
    let data = web::Data::new(state);
    info!("Server running at http://localhost:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/", web::get().to(status_page))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
