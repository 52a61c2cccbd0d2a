//! Command-line entry point: evaluates YAML fixtures and prints reports.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use automation_fit::adapters::{
    load_fixture, FixtureError, InMemoryAssessmentStore, InMemoryQuestionnaireReader,
    InMemorySharedAnswerStore,
};
use automation_fit::application::{
    AssessmentLocks, GetAssessmentReportHandler, GetAssessmentReportQuery,
    RecomputeAssessmentHandler, SubmitAnswersCommand, SubmitAnswersHandler,
};
use automation_fit::config::{AppConfig, ConfigError};
use automation_fit::domain::advisory::{AdvisoryError, AdvisoryLibrary};
use automation_fit::domain::applicability::ConditionGraph;
use automation_fit::domain::foundation::{AssessmentId, DomainError};
use automation_fit::domain::scoring::AssessmentEvaluator;
use automation_fit::telemetry::{self, TelemetryError};

#[derive(Parser, Debug)]
#[command(
    name = "automation-fit",
    about = "Score automation-fit questionnaires for RPA and IPA",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit the fixture's answers and print the assessment report as JSON
    Evaluate {
        /// Questionnaire fixture with an `answers` section
        fixture: PathBuf,
        /// Assessment id to report under (random when omitted)
        #[arg(long)]
        assessment_id: Option<AssessmentId>,
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Validate a fixture and describe its condition graph
    Check {
        fixture: PathBuf,
    },
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    #[error(transparent)]
    Advisory(#[from] AdvisoryError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Failed to read advisory library: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Evaluate {
            fixture,
            assessment_id,
            compact,
        } => evaluate(&config, fixture, assessment_id, compact).await,
        Command::Check { fixture } => check(fixture).await,
    }
}

async fn advisory_library(config: &AppConfig) -> Result<AdvisoryLibrary, AppError> {
    match &config.advisory.library_path {
        Some(path) => {
            let source = tokio::fs::read_to_string(path).await?;
            Ok(AdvisoryLibrary::from_yaml(&source)?)
        }
        None => Ok(AdvisoryLibrary::embedded()?.clone()),
    }
}

async fn evaluate(
    config: &AppConfig,
    path: PathBuf,
    assessment_id: Option<AssessmentId>,
    compact: bool,
) -> Result<(), AppError> {
    let fixture = load_fixture(&path).await?;
    let version = fixture.questionnaire.version_id();
    info!(fixture = %path.display(), version = %version, "Fixture loaded");

    let reader = Arc::new(InMemoryQuestionnaireReader::new());
    reader.insert(fixture.questionnaire).await;
    let store = Arc::new(InMemoryAssessmentStore::new());

    let recompute = Arc::new(RecomputeAssessmentHandler::new(
        reader.clone(),
        store.clone(),
        store.clone(),
        AssessmentEvaluator::new(config.scoring.policy()),
        AssessmentLocks::new(),
    ));
    let submit = SubmitAnswersHandler::new(
        reader.clone(),
        store.clone(),
        Arc::new(InMemorySharedAnswerStore::new()),
        recompute,
    );
    let report = GetAssessmentReportHandler::new(
        reader,
        store.clone(),
        store,
        Arc::new(advisory_library(config).await?),
    );

    let assessment_id = assessment_id.unwrap_or_default();
    submit
        .handle(SubmitAnswersCommand {
            assessment_id,
            questionnaire_version: version,
            answers: fixture.answers,
            use_shared_dimensions: false,
        })
        .await
        .map_err(DomainError::from)?;

    let report = report
        .handle(GetAssessmentReportQuery { assessment_id })
        .await
        .map_err(DomainError::from)?;

    let rendered = if compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{rendered}");
    Ok(())
}

async fn check(path: PathBuf) -> Result<(), AppError> {
    let fixture = load_fixture(&path).await?;
    let questionnaire = &fixture.questionnaire;
    let graph = ConditionGraph::build(questionnaire);

    println!(
        "{} (version {}): {} dimensions, {} questions, {} option scores, {} answers",
        questionnaire.name(),
        questionnaire.version_id(),
        questionnaire.dimensions().len(),
        questionnaire.questions().len(),
        questionnaire.option_scores().len(),
        fixture.answers.len(),
    );
    if graph.is_acyclic() {
        println!("condition graph: acyclic");
    } else {
        let cyclic: Vec<String> = graph.cyclic_questions().iter().map(|q| q.to_string()).collect();
        println!("condition graph: cyclic through questions {}", cyclic.join(", "));
    }
    Ok(())
}
