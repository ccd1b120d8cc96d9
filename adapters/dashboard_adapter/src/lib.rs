//! Local web dashboard over the persisted job table.
//!
//! Every page request reloads the file through the `JobReader` port, so the
//! page always reflects the most recent pipeline run.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use hiring_core::analytics::DashboardSummary;
use hiring_core::config::DashboardConfig;
use hiring_core::ports::JobReader;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod render;

pub use render::{escape_html, render_dashboard, render_load_error};

#[derive(Clone)]
struct DashboardState {
    reader: Arc<dyn JobReader>,
    top_n: usize,
}

/// Builds the dashboard router around a reader for the persisted table.
pub fn router(reader: Arc<dyn JobReader>, top_n: usize) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(DashboardState { reader, top_n })
}

async fn dashboard_handler(State(state): State<DashboardState>) -> (StatusCode, Html<String>) {
    let reader = Arc::clone(&state.reader);
    let loaded = tokio::task::spawn_blocking(move || reader.read_jobs()).await;

    match loaded {
        Ok(Ok(jobs)) => {
            let summary = DashboardSummary::from_jobs(&jobs, state.top_n);
            (
                StatusCode::OK,
                Html(render_dashboard(&summary, state.reader.location())),
            )
        }
        Ok(Err(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render_load_error(&e.describe())),
        ),
        Err(e) => {
            tracing::error!(error = %e, "dashboard load task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_load_error("internal error while loading job data")),
            )
        }
    }
}

/// Serves the dashboard until the process is interrupted.
///
/// Blocks the calling thread; owns its own Tokio runtime so the synchronous
/// pipeline code never runs inside one.
pub fn show_dashboard(config: &DashboardConfig, reader: Arc<dyn JobReader>) -> std::io::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(config, reader))
}

async fn serve(config: &DashboardConfig, reader: Arc<dyn JobReader>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    let addr = listener.local_addr()?;
    tracing::info!(
        %addr,
        input = %config.input.display(),
        "dashboard listening"
    );
    println!("Dashboard available at http://{}", addr);

    axum::serve(listener, router(reader, config.top_n))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("dashboard shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use hiring_core::domain::JobPosting;
    use hiring_core::{DashboardLoadError, Error};
    use std::path::{Path, PathBuf};
    use tower::ServiceExt;

    struct FixedReader(Vec<JobPosting>);

    impl JobReader for FixedReader {
        fn read_jobs(&self) -> hiring_core::Result<Vec<JobPosting>> {
            Ok(self.0.clone())
        }

        fn location(&self) -> &Path {
            Path::new("cleaned_jobs.csv")
        }
    }

    struct MissingReader;

    impl JobReader for MissingReader {
        fn read_jobs(&self) -> hiring_core::Result<Vec<JobPosting>> {
            Err(Error::Load {
                path: PathBuf::from("cleaned_jobs.csv"),
                source: DashboardLoadError::Missing,
            })
        }

        fn location(&self) -> &Path {
            Path::new("cleaned_jobs.csv")
        }
    }

    fn job(tags: &str, location: &str) -> JobPosting {
        JobPosting {
            company: "Acme".into(),
            position: "Engineer".into(),
            tags: tags.into(),
            location: location.into(),
            date: Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
            year_month: "2024-03".into(),
        }
    }

    async fn get_page(app: Router) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_dashboard_page_shows_aggregates() {
        let reader = Arc::new(FixedReader(vec![job("go, sql", "Remote"), job("sql, rust", "Berlin")]));

        let (status, html) = get_page(router(reader, 10)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<td>1</td><td>sql</td><td class=\"count\">2</td>"));
        assert!(html.contains("<td>2</td><td>go</td><td class=\"count\">1</td>"));
        assert!(html.contains("<td>3</td><td>rust</td><td class=\"count\">1</td>"));
        assert!(html.contains("title=\"2024-03: 2\""));
        assert!(html.contains("2 jobs loaded from"));
    }

    #[tokio::test]
    async fn test_dashboard_page_reports_load_failure() {
        let (status, html) = get_page(router(Arc::new(MissingReader), 10)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(html.contains("Failed to load cleaned_jobs.csv: file not found, run the pipeline first"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let app = router(Arc::new(FixedReader(vec![])), 10);

        let response = app
            .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
