use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::apis::base::FundsSource;
use crate::clock::{Clock, SystemClock};
use crate::constants::ROW_COUNT_MENU;
use crate::dashboard::export::{export_filename, format_amount, to_csv_bytes};
use crate::dashboard::{
    row_limit, FilterOptions, FilterParams, FundFilter, GroupStat, RunCache, Summary,
};
use crate::domain::{FundRecord, Territory};
use crate::error::{Result, ScraperError};
use crate::pipeline::{Pipeline, PipelineRun};

/// Shared by every handler: one territory, its sources and the run cache
#[derive(Clone)]
pub struct AppState {
    pub territory: Territory,
    pub sources: Arc<Vec<Box<dyn FundsSource>>>,
    pub cache: Arc<RunCache>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        territory: Territory,
        sources: Vec<Box<dyn FundsSource>>,
        cache: RunCache,
    ) -> Self {
        Self {
            territory,
            sources: Arc::new(sources),
            cache: Arc::new(cache),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    async fn current_run(&self) -> Arc<PipelineRun> {
        let territory = self.territory;
        let sources = Arc::clone(&self.sources);
        let clock = Arc::clone(&self.clock);
        self.cache
            .get_or_refresh(|| async move {
                let mut rng = StdRng::from_entropy();
                Pipeline::run(territory, &sources, &mut rng, clock.as_ref()).await
            })
            .await
    }
}

impl IntoResponse for ScraperError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "fonds_scraper",
        "territory": state.territory.slug(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Serialize)]
struct ProjectsResponse<'a> {
    territory: Territory,
    generated_at: String,
    synthetic: bool,
    matching: usize,
    limit: usize,
    projects: Vec<&'a FundRecord>,
}

async fn api_projects(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let params = FilterParams::from_pairs(pairs);
    let run = state.current_run().await;
    let filter = FundFilter::from_params(&params);
    let limit = row_limit(params.limit);
    let matching = filter.apply(&run.table);

    Json(ProjectsResponse {
        territory: run.territory,
        generated_at: run.generated_at.format("%Y-%m-%d %H:%M").to_string(),
        synthetic: run.synthetic,
        matching: matching.len(),
        limit,
        projects: matching.into_iter().take(limit).collect(),
    })
    .into_response()
}

async fn api_summary(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let params = FilterParams::from_pairs(pairs);
    let run = state.current_run().await;
    let filter = FundFilter::from_params(&params);
    Json(Summary::compute(filter.apply(&run.table)))
}

async fn export_csv(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let params = FilterParams::from_pairs(pairs);
    let run = state.current_run().await;
    let filter = FundFilter::from_params(&params);
    let body = to_csv_bytes(filter.apply(&run.table))?;
    let filename = export_filename(run.territory, state.clock.now());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}

async fn refresh(State(state): State<AppState>) -> Redirect {
    info!("Manual refresh requested");
    state.cache.invalidate().await;
    Redirect::to("/")
}

struct BarView {
    label: String,
    amount: String,
    count: usize,
    width: u32,
}

impl BarView {
    fn from_stats(stats: &[GroupStat], max: f64) -> Vec<Self> {
        stats
            .iter()
            .map(|stat| BarView {
                label: stat.label.clone(),
                amount: format_amount(stat.total),
                count: stat.count,
                width: if max > 0.0 {
                    (stat.total / max * 100.0).round() as u32
                } else {
                    0
                },
            })
            .collect()
    }
}

struct OptionView {
    value: String,
    checked: bool,
}

impl OptionView {
    fn list<T>(values: &[T], selection: Option<&HashSet<T>>) -> Vec<Self>
    where
        T: fmt::Display + Eq + Hash,
    {
        values
            .iter()
            .map(|value| OptionView {
                value: value.to_string(),
                checked: selection.map_or(true, |s| s.contains(value)),
            })
            .collect()
    }
}

struct RowView {
    id: String,
    titre: String,
    programme: String,
    secteur: String,
    montant_total: String,
    montant_paye: String,
    statut: String,
    taux_realisation: String,
    commune: String,
    source: String,
}

impl From<&FundRecord> for RowView {
    fn from(record: &FundRecord) -> Self {
        Self {
            id: record.id.clone(),
            titre: record.titre.clone(),
            programme: record.programme.to_string(),
            secteur: record.secteur.clone(),
            montant_total: format_amount(record.montant_total),
            montant_paye: format_amount(record.montant_paye),
            statut: record.statut.to_string(),
            taux_realisation: format!("{:.1} %", record.taux_realisation),
            commune: record.commune.clone(),
            source: record.source.clone(),
        }
    }
}

struct MenuEntry {
    size: usize,
    selected: bool,
}

struct OutcomeView {
    name: String,
    records: usize,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    territory: String,
    generated_at: String,
    synthetic: bool,
    project_count: usize,
    total_engage: String,
    total_paye: String,
    paid_percent: String,
    completed_count: usize,
    completed_percent: String,
    mean_taux: String,
    programme_bars: Vec<BarView>,
    secteur_bars: Vec<BarView>,
    programme_options: Vec<OptionView>,
    secteur_options: Vec<OptionView>,
    statut_options: Vec<OptionView>,
    row_menu: Vec<MenuEntry>,
    rows: Vec<RowView>,
    export_query: String,
    outcomes: Vec<OutcomeView>,
    dropped: usize,
}

async fn index(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>> {
    let params = FilterParams::from_pairs(pairs);
    let run = state.current_run().await;
    let filter = FundFilter::from_params(&params);
    let options = FilterOptions::from_table(&run.table);
    let matching = filter.apply(&run.table);
    let summary = Summary::compute(matching.iter().copied());
    let limit = row_limit(params.limit);

    let template = DashboardTemplate {
        territory: run.territory.label().to_string(),
        generated_at: run.generated_at.format("%d/%m/%Y %H:%M").to_string(),
        synthetic: run.synthetic,
        project_count: summary.project_count,
        total_engage: format_amount(summary.total_engage),
        total_paye: format_amount(summary.total_paye),
        paid_percent: format!("{:.1} %", summary.paid_percent),
        completed_count: summary.completed_count,
        completed_percent: format!("{:.1} %", summary.completed_percent),
        mean_taux: format!("{:.1} %", summary.mean_taux_realisation),
        programme_bars: BarView::from_stats(
            &summary.par_programme,
            summary.max_programme_total(),
        ),
        secteur_bars: BarView::from_stats(&summary.par_secteur, summary.max_secteur_total()),
        programme_options: OptionView::list(&options.programmes, filter.programmes.as_ref()),
        secteur_options: OptionView::list(&options.secteurs, filter.secteurs.as_ref()),
        statut_options: OptionView::list(&options.statuts, filter.statuts.as_ref()),
        row_menu: ROW_COUNT_MENU
            .iter()
            .map(|&size| MenuEntry {
                size,
                selected: size == limit,
            })
            .collect(),
        rows: matching.iter().take(limit).map(|r| RowView::from(*r)).collect(),
        export_query: params.to_query_string(),
        outcomes: run
            .outcomes
            .iter()
            .map(|o| OutcomeView {
                name: o.source_name.to_string(),
                records: o.records,
            })
            .collect(),
        dropped: run.report.dropped_out_of_range,
    };

    Ok(Html(template.render()?))
}

/// Create the dashboard router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/api/projects", get(api_projects))
        .route("/api/summary", get(api_summary))
        .route("/export.csv", get(export_csv))
        .route("/refresh", post(refresh))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Start the dashboard server
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<()> {
    let territory = state.territory;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("🚀 Dashboard for {} running on http://{}", territory.label(), addr);
    info!("💚 Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
