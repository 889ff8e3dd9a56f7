//! Mech Solver HTTP Server

use anyhow::Context;
use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use mech_solver::diagrams::BeamDiagrams;
use mech_solver::prelude::*;
use mech_solver::results::{ReferenceError, SectionCheck};
use mech_solver::thermal::{CycleResult, MarchResult, NtuSweep, StatePoint, TemperatureHistory};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<T>,
}

#[derive(Debug, Serialize)]
struct CantileverResults {
    #[serde(flatten)]
    solution: CantileverResult,
    tip_deflection: f64,
    exact_tip_deflection: f64,
    max_deflection: DeflectionPoint,
    reference_error: ReferenceError,
    #[serde(skip_serializing_if = "Option::is_none")]
    section_check: Option<SectionCheck>,
}

#[derive(Debug, Serialize)]
struct CycleResults {
    states: [StatePoint; 4],
    efficiency: f64,
    peak_pressure: f64,
    pv_polygon: Vec<(f64, f64)>,
}

impl From<CycleResult> for CycleResults {
    fn from(cycle: CycleResult) -> Self {
        Self {
            peak_pressure: cycle.peak_pressure(),
            pv_polygon: cycle.pv_polygon(),
            states: cycle.states,
            efficiency: cycle.efficiency,
        }
    }
}

fn respond<T: Serialize>(route: &str, outcome: MechResult<T>) -> (StatusCode, Json<ApiResponse<T>>) {
    match outcome {
        Ok(results) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(e) => {
            log::warn!("{} rejected: {}", route, e);
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse {
                    success: false,
                    error: Some(e.to_string()),
                    results: None,
                }),
            )
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn cantilever(Json(input): Json<CantileverInput>) -> impl IntoResponse {
    let outcome = input.beam().and_then(|beam| {
        let solution = input.analyze()?;
        Ok(CantileverResults {
            tip_deflection: solution.tip_deflection(),
            exact_tip_deflection: analytical_tip_deflection(
                input.load,
                beam.e(),
                beam.i(),
                beam.length(),
            ),
            max_deflection: solution.max_deflection(),
            reference_error: solution.reference_error(),
            section_check: input.section_check(&solution),
            solution,
        })
    });
    respond("cantilever", outcome)
}


async fn sfd_bmd(Json(beam): Json<SimplySupportedBeam>) -> impl IntoResponse {
    respond::<BeamDiagrams>("sfd-bmd", beam.diagrams())
}

async fn conduction(Json(sim): Json<HeatConduction1D>) -> impl IntoResponse {
    respond::<TemperatureHistory>("conduction", sim.run())
}

async fn exchanger(Json(request): Json<SweepRequest>) -> impl IntoResponse {
    respond::<NtuSweep>("exchanger", request.run())
}

async fn double_pipe(Json(exchanger): Json<DoublePipeExchanger>) -> impl IntoResponse {
    respond::<MarchResult>("double-pipe", exchanger.march())
}

async fn otto(Json(cycle): Json<OttoCycle>) -> impl IntoResponse {
    respond("otto", cycle.solve().map(CycleResults::from))
}

async fn diesel(Json(cycle): Json<DieselCycle>) -> impl IntoResponse {
    respond("diesel", cycle.solve().map(CycleResults::from))
}

fn create_router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/beam/cantilever", post(cantilever))
        .route("/api/v1/beam/sfd-bmd", post(sfd_bmd))
        .route("/api/v1/heat/conduction", post(conduction))
        .route("/api/v1/heat/exchanger", post(exchanger))
        .route("/api/v1/heat/double-pipe", post(double_pipe))
        .route("/api/v1/cycles/otto", post(otto))
        .route("/api/v1/cycles/diesel", post(diesel))
        .layer(cors)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8086".to_string());
    let addr = format!("{}:{}", host, port);

    log::info!("Mech Solver Server listening on http://{}", addr);
    log::info!("  Health check: GET  /health");
    log::info!("  Beams:        POST /api/v1/beam/{{cantilever,sfd-bmd}}");
    log::info!("  Heat:         POST /api/v1/heat/{{conduction,exchanger,double-pipe}}");
    log::info!("  Cycles:       POST /api/v1/cycles/{{otto,diesel}}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, create_router())
        .await
        .context("server terminated")?;
    Ok(())
}
