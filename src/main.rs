use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use talent_ai::config::{AppConfig, ScoringDefaults};
use talent_ai::error::AppError;
use talent_ai::scoring::{
    aggregate_evaluation_responses, apply_score_adjustments, build_result_data,
    AdjustmentPayload, EvaluationRecord, EvaluationResultData, FinalResponse, RaterGroup,
    RaterResponse, ScoringConfig, TemplateSnapshot,
};
use talent_ai::telemetry;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    defaults: ScoringDefaults,
}

#[derive(Parser, Debug)]
#[command(
    name = "Talent Evaluation Orchestrator",
    about = "Run the evaluation scoring service or score a fixture from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score evaluation data for demos and spot checks
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Compute and print the evaluation result for a JSON fixture
    Result(ScoreResultArgs),
}

#[derive(Args, Debug)]
struct ScoreResultArgs {
    /// Path to a JSON fixture with responses, rater groups, and scoring config
    #[arg(long)]
    fixture: PathBuf,
    /// Include the per-item answer listing in the output
    #[arg(long)]
    list_answers: bool,
}

/// Inline evaluation payload: everything the engine needs to score one
/// subject without touching storage.
#[derive(Debug, Deserialize)]
struct EvaluationScoreRequest {
    #[serde(default)]
    subject_name: Option<String>,
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    rater_groups: Vec<RaterGroup>,
    #[serde(default)]
    scoring: Option<ScoringConfig>,
    responses: Vec<RaterResponse>,
    #[serde(default)]
    adjustment: Option<AdjustmentPayload>,
    #[serde(default)]
    template: Option<TemplateSnapshot>,
}

#[derive(Debug, Serialize)]
struct EvaluationScoreResponse {
    base_score: f64,
    adjusted_score: f64,
    applied_manager: f64,
    applied_hq: f64,
    result: EvaluationResultData,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Score {
            command: ScoreCommand::Result(args),
        } => run_score_result(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        defaults: config.scoring,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/evaluations/result", post(evaluation_result_endpoint))
        .layer(prometheus_layer)
        .with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "evaluation scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_score_result(args: ScoreResultArgs) -> Result<(), AppError> {
    let ScoreResultArgs {
        fixture,
        list_answers,
    } = args;

    let raw = fs::read_to_string(fixture)?;
    let request: EvaluationScoreRequest = serde_json::from_str(&raw)?;
    let response = compute_evaluation(request, ScoringDefaults::default());

    render_evaluation_result(&response, list_answers);
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn evaluation_result_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<EvaluationScoreRequest>,
) -> Json<EvaluationScoreResponse> {
    Json(compute_evaluation(payload, state.defaults))
}

/// Run the whole pipeline over an inline payload: aggregate, adjust, grade,
/// and assemble the result record.
fn compute_evaluation(
    request: EvaluationScoreRequest,
    defaults: ScoringDefaults,
) -> EvaluationScoreResponse {
    let EvaluationScoreRequest {
        subject_name,
        department,
        position,
        period,
        rater_groups,
        scoring,
        responses,
        adjustment,
        template,
    } = request;

    let scoring = scoring.unwrap_or(ScoringConfig {
        adjustment_mode: defaults.adjustment_mode,
        adjustment_range: defaults.adjustment_range,
        rating_scale: None,
        scoring_rule: None,
    });

    let aggregation =
        aggregate_evaluation_responses(&responses, &rater_groups, scoring.scoring_rule);
    let adjusted = apply_score_adjustments(
        aggregation.total_score,
        adjustment.as_ref(),
        scoring.adjustment_mode,
        scoring.adjustment_range,
        scoring.rating_scale.as_deref(),
    );

    let response = FinalResponse::from_aggregation(&aggregation, adjusted.adjusted_score)
        .with_rater_comments(&responses);

    let evaluation = EvaluationRecord {
        subject: None,
        evaluatee_name: subject_name.unwrap_or_default(),
        department,
        position,
        period,
        scoring,
    };

    let result = build_result_data(&evaluation, template.as_ref(), &response);

    EvaluationScoreResponse {
        base_score: aggregation.total_score,
        adjusted_score: adjusted.adjusted_score,
        applied_manager: adjusted.applied_manager,
        applied_hq: adjusted.applied_hq,
        result,
    }
}

fn render_evaluation_result(response: &EvaluationScoreResponse, list_answers: bool) {
    let result = &response.result;

    println!("Evaluation result");
    if !result.subject.name.is_empty() {
        println!(
            "Subject: {} {} {}",
            result.subject.name, result.subject.department, result.subject.position
        );
    }
    if !result.subject.period.is_empty() {
        println!("Period: {}", result.subject.period);
    }

    println!(
        "\nBase score {:.2} -> adjusted {:.2} (manager {:+.2}, hq {:+.2})",
        response.base_score, response.adjusted_score, response.applied_manager, response.applied_hq
    );
    println!(
        "Final grade: {} ({})",
        result.final_grade.label(),
        result.summary
    );

    if result.competencies.is_empty() {
        println!("\nCompetencies: none (no template snapshot)");
    } else {
        println!("\nCompetencies");
        for competency in &result.competencies {
            println!("- {}: {:.2}", competency.name, competency.final_score);
        }
    }

    if !result.strengths.is_empty() {
        println!("\nStrengths");
        for line in &result.strengths {
            println!("- {line}");
        }
    }

    if !result.areas_for_improvement.is_empty() {
        println!("\nAreas for improvement");
        for line in &result.areas_for_improvement {
            println!("- {line}");
        }
    }

    if result.peer_feedback.is_empty() {
        println!("\nFeedback: none");
    } else {
        println!("\nFeedback");
        for feedback in &result.peer_feedback {
            println!("- [{}] {}", feedback.title, feedback.comment);
        }
    }

    if let Some(cloud) = &result.word_cloud_data {
        println!("\nWord cloud");
        for entry in cloud {
            println!("- {} ({})", entry.text, entry.value);
        }
    }

    if list_answers {
        println!("\nAnswer details");
        for detail in &result.answer_details {
            println!(
                "- {} | {} | {:.2} | {}",
                detail.item_id, detail.title, detail.score, detail.comment
            );
        }
    }
}
