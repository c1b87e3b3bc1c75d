use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use founder_ai::config::AppConfig;
use founder_ai::error::AppError;
use founder_ai::telemetry;
use founder_ai::workflows::assessment::{
    assessment_router, AnswerSubmission, AnswerValue, AssessmentOutcome, AssessmentService,
    Dimension, InMemorySessionStore, QuestionCatalog, QuestionId, ScoringConfig, SessionStore,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    store: Arc<InMemorySessionStore>,
}

#[derive(Parser, Debug)]
#[command(
    name = "Founder Readiness Assessment",
    about = "Administer founder readiness assessments from the command line or over HTTP",
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
    /// Inspect the assessment offline
    Assessment {
        #[command(subcommand)]
        command: AssessmentCommand,
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
enum AssessmentCommand {
    /// Print the question catalog
    Catalog,
    /// Run a sample respondent through the questionnaire and print the report
    Demo,
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
        Command::Assessment {
            command: AssessmentCommand::Catalog,
        } => run_catalog_listing(),
        Command::Assessment {
            command: AssessmentCommand::Demo,
        } => run_demo(),
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

    let catalog = Arc::new(QuestionCatalog::standard());
    let store = Arc::new(InMemorySessionStore::new(catalog.clone()));
    let service = Arc::new(AssessmentService::new(
        catalog,
        store.clone(),
        ScoringConfig::default(),
    ));

    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        store: store.clone(),
    };

    spawn_expiry_sweep(store, &config);

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(assessment_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "founder readiness assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Periodic sweep that expires idle sessions and evicts terminal ones past
/// the retention window.
fn spawn_expiry_sweep(store: Arc<InMemorySessionStore>, config: &AppConfig) {
    let ttl = config.session.ttl();
    let retention = config.session.retention();
    let interval = std::time::Duration::from_secs(config.session.sweep_interval_seconds);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let outcome = store.expire_stale_sessions(Utc::now(), ttl, retention);
            if outcome.expired > 0 || outcome.evicted > 0 {
                info!(
                    expired = outcome.expired,
                    evicted = outcome.evicted,
                    "session expiry sweep"
                );
            }
        }
    });
}

async fn healthcheck(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "active_sessions": state.store.count_active(),
    }))
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

fn run_catalog_listing() -> Result<(), AppError> {
    let catalog = QuestionCatalog::standard();

    println!("Founder readiness question catalog");
    for question in catalog.all() {
        println!(
            "\n{:2}. [{}] {} ({})",
            question.id.0,
            question.code,
            question.prompt,
            question.dimension.label()
        );
        for option in &question.options {
            println!("    - {} ({})", option.label, option.value);
        }
    }

    Ok(())
}

fn run_demo() -> Result<(), AppError> {
    let catalog = Arc::new(QuestionCatalog::standard());
    let store = Arc::new(InMemorySessionStore::new(catalog.clone()));
    let service = AssessmentService::new(catalog, store, ScoringConfig::default());

    let session = service.start()?;
    service.submit_answers(&session.session_id, &sample_answers())?;
    let outcome = service.result(&session.session_id)?;

    render_outcome(&outcome);
    Ok(())
}

/// A mid-strength sample respondent: confident founder, thin financial
/// planning, launch preparation still underway.
fn sample_answers() -> Vec<AnswerSubmission> {
    let scale = |id: u8, value: u8| AnswerSubmission {
        question_id: QuestionId(id),
        value: AnswerValue::Scale(value),
    };
    let choice = |id: u8, value: &str| AnswerSubmission {
        question_id: QuestionId(id),
        value: AnswerValue::Choice(value.to_string()),
    };

    vec![
        scale(1, 4),
        scale(2, 5),
        scale(3, 4),
        choice(4, "3_5_years"),
        choice(5, "yes"),
        scale(6, 4),
        choice(7, "partial"),
        choice(8, "yes"),
        scale(9, 3),
        choice(10, "no"),
        choice(11, "unclear"),
        scale(12, 2),
        choice(13, "concept"),
        choice(14, "some"),
        scale(15, 3),
    ]
}

fn render_outcome(outcome: &AssessmentOutcome) {
    println!("Founder readiness demo");
    println!("Session: {}", outcome.session_id);

    println!("\nDimension scores");
    for dimension in Dimension::ordered() {
        let score = outcome.report.dimension_scores.get(&dimension);
        let band = outcome.report.bands.get(&dimension);
        if let (Some(score), Some(band)) = (score, band) {
            println!(
                "- {}: {:.1} ({}) - {}",
                dimension.label(),
                score,
                band.label(),
                dimension.interpretation(*band)
            );
        }
    }

    println!(
        "\nComposite: {:.1} ({})",
        outcome.report.composite_score,
        outcome.report.composite_band.label()
    );

    println!("\nRecommendations");
    for recommendation in &outcome.recommendations {
        println!("{}. {}", recommendation.priority, recommendation.text);
    }

    println!("\nNext steps");
    for step in &outcome.next_steps {
        println!("- {step}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_answers_cover_every_question() {
        let catalog = QuestionCatalog::standard();
        let answers = sample_answers();

        assert_eq!(answers.len(), catalog.total_questions());
        for submission in &answers {
            let question = catalog
                .question(submission.question_id)
                .expect("sample answers reference catalog questions");
            assert!(question.accepts(&submission.value));
        }
    }

    #[test]
    fn demo_respondent_produces_a_complete_report() {
        let catalog = Arc::new(QuestionCatalog::standard());
        let store = Arc::new(InMemorySessionStore::new(catalog.clone()));
        let service = AssessmentService::new(catalog, store, ScoringConfig::default());

        let session = service.start().expect("session starts");
        let receipt = service
            .submit_answers(&session.session_id, &sample_answers())
            .expect("sample answers accepted");
        assert!(receipt.complete);

        let outcome = service.result(&session.session_id).expect("result builds");
        assert_eq!(outcome.report.dimension_scores.len(), 5);
        assert!(!outcome.recommendations.is_empty());
    }
}
