//! HTTP surface: the dashboard page plus its JSON chart endpoint.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::charts::{self, ChartError};
use crate::logging::{self, obj, v_str, Domain, Level};
use crate::model::Criterion;
use crate::provider::{DataOrigin, DatasetProvider};

/// Initial selections, mirroring the original layout defaults. The default
/// category is applied even when the loaded dataset has no such type; the
/// first render then takes the empty-selection path.
pub const DEFAULT_CATEGORY: &str = "Bug";
pub const DEFAULT_CRITERION: Criterion = Criterion::OverallScore;

const PAGE_TEMPLATE: &str = include_str!("dashboard.html");

pub struct AppState {
    provider: DatasetProvider,
    /// Category options frozen at startup. They do not track later changes
    /// in the data source.
    category_options: Vec<String>,
    page: String,
}

impl AppState {
    /// Loads the dataset once to populate the dropdowns, then renders the
    /// page those options are baked into.
    pub async fn new(provider: DatasetProvider) -> Self {
        let outcome = provider.load().await;
        let category_options = outcome.dataset.category_options();
        logging::log(
            Level::Info,
            Domain::System,
            "options_computed",
            obj(&[
                ("categories", json!(category_options.clone())),
                (
                    "origin",
                    v_str(match &outcome.origin {
                        DataOrigin::Live => "live",
                        DataOrigin::Fallback { .. } => "fallback",
                    }),
                ),
            ]),
        );
        let page = render_page(&category_options);
        Self { provider, category_options, page }
    }

    pub fn category_options(&self) -> &[String] {
        &self.category_options
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/charts", get(charts_endpoint))
        .route("/api/health", get(health))
        .with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.clone())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

#[derive(Debug, Deserialize)]
pub struct ChartsQuery {
    pub category: String,
    pub criterion: String,
}

async fn charts_endpoint(State(state): State<Arc<AppState>>, Query(q): Query<ChartsQuery>) -> Response {
    logging::log(
        Level::Debug,
        Domain::Http,
        "charts_request",
        obj(&[("category", v_str(&q.category)), ("criterion", v_str(&q.criterion))]),
    );
    let criterion = match Criterion::parse(&q.criterion) {
        Some(c) => c,
        None => return chart_error_response(ChartError::UnknownCriterion(q.criterion.clone())),
    };
    // Fresh load on every request; staleness is bounded by the data source,
    // not by any in-process cache.
    let outcome = state.provider.load().await;
    match charts::render(&outcome.dataset, &q.category, criterion) {
        Ok(rendered) => {
            logging::log(
                Level::Info,
                Domain::Render,
                "best_record",
                obj(&[("category", v_str(&q.category)), ("name", v_str(&rendered.best.name))]),
            );
            Json(json!({
                "generation_chart": rendered.generation_chart,
                "legendary_chart": rendered.legendary_chart,
            }))
            .into_response()
        }
        Err(err) => chart_error_response(err),
    }
}

fn chart_error_response(err: ChartError) -> Response {
    logging::log(Level::Warn, Domain::Render, "render_rejected", obj(&[("error", v_str(&err.to_string()))]));
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"error": err.to_string()}))).into_response()
}

fn render_page(category_options: &[String]) -> String {
    let category_opts: String = category_options
        .iter()
        .map(|v| format!("<option value=\"{v}\">{v}</option>"))
        .collect();
    let criterion_opts: String = Criterion::ALL
        .iter()
        .map(|c| format!("<option value=\"{v}\">{v}</option>", v = c.as_str()))
        .collect();
    PAGE_TEMPLATE
        .replace("{{CATEGORY_OPTIONS}}", &category_opts)
        .replace("{{CRITERION_OPTIONS}}", &criterion_opts)
        .replace("{{DEFAULT_CATEGORY}}", DEFAULT_CATEGORY)
        .replace("{{DEFAULT_CRITERION}}", DEFAULT_CRITERION.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bakes_in_options_and_defaults() {
        let page = render_page(&["Fire".to_string(), "Grass".to_string()]);
        assert!(page.contains("<option value=\"Fire\">Fire</option>"));
        assert!(page.contains("<option value=\"Grass\">Grass</option>"));
        assert!(page.contains("<option value=\"overall_score\">overall_score</option>"));
        assert!(page.contains("<option value=\"speed\">speed</option>"));
        assert!(page.contains("let category = \"Bug\";"));
        assert!(page.contains("let criterion = \"overall_score\";"));
    }

    #[test]
    fn page_has_both_chart_panels() {
        let page = render_page(&[]);
        assert!(page.contains("id=\"generation-chart\""));
        assert!(page.contains("id=\"legendary-chart\""));
    }
}
