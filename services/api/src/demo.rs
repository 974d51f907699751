use crate::infra::{parse_timestamp, InMemoryRecruitingStore, RecordingChangeFeed};
use agency_ats::config::AppConfig;
use agency_ats::error::AppError;
use agency_ats::recruiting::{
    ApplicationEventKind, ApplicationId, ApplicationStatus, ApplicationSubmission,
    FitnessReport, FitnessScorer, FilterQuery, FilterSpec, IntakeGuard, JobOpening,
    OpeningDraft, RecruitingService, RecruitingServiceError, ReviewBoard, ReviewerSession,
    ScoringConfig, StatusFilter,
};
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Job opening JSON file (id, title, focus_areas, requirements, created_at)
    #[arg(long)]
    pub(crate) opening: PathBuf,
    /// Application submission JSON file
    #[arg(long)]
    pub(crate) application: PathBuf,
    /// Submission timestamp (RFC 3339). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) applied_at: Option<DateTime<Utc>>,
    /// Print the full report as JSON instead of the text breakdown
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Stop after scoring; skip the reviewer filter walkthrough.
    #[arg(long)]
    pub(crate) skip_filters: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        opening,
        application,
        applied_at,
        json,
    } = args;

    let config = AppConfig::load()?;
    let opening: JobOpening = serde_json::from_slice(&std::fs::read(opening)?)?;
    let submission: ApplicationSubmission =
        serde_json::from_slice(&std::fs::read(application)?)?;
    let applied_at = applied_at.unwrap_or_else(Utc::now);

    let report = score_submission(&config.scoring, &opening, submission, applied_at)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Fitness score for '{}': {}/100", opening.title, report.total);
        render_components(&report);
    }
    Ok(())
}

pub(crate) fn score_submission(
    scoring: &ScoringConfig,
    opening: &JobOpening,
    submission: ApplicationSubmission,
    applied_at: DateTime<Utc>,
) -> Result<FitnessReport, AppError> {
    let application = IntakeGuard::default()
        .application_from_submission(
            submission,
            opening,
            ApplicationId("cli-000001".to_string()),
            applied_at,
        )
        .map_err(RecruitingServiceError::from)?;
    let scorer = FitnessScorer::new(scoring.clone());
    Ok(scorer.score(opening, &application))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryRecruitingStore::default());
    let feed = Arc::new(RecordingChangeFeed::default());
    let service = RecruitingService::new(store.clone(), feed.clone(), ScoringConfig::default());

    println!("Agency ATS walkthrough");
    let published = Utc::now() - Duration::days(5);
    let opening = service.post_opening_at(
        OpeningDraft {
            title: "Frontend Developer".to_string(),
            focus_areas: vec!["React".to_string(), "Node".to_string()],
            requirements: "must know react and node development".to_string(),
        },
        published,
    )?;
    println!(
        "- Published {} '{}' (focus: {})",
        opening.id,
        opening.title,
        opening.focus_areas.join(", ")
    );

    let mut submitted = Vec::new();
    for (submission, delay) in demo_submissions(&opening) {
        let scored = service.submit_at(submission, published + delay)?;
        println!(
            "\n- {} <{}> applied after {}h -> score {}",
            scored.application.full_name,
            scored.application.email,
            delay.num_hours(),
            scored.report.total
        );
        render_components(&scored.report);
        submitted.push(scored.application);
    }

    if args.skip_filters {
        return Ok(());
    }

    let session = ReviewerSession::new("rev-demo", Some("Demo Reviewer".to_string()))?;
    let top_band = FilterQuery {
        score_min: Some(60),
        ..FilterQuery::default()
    }
    .into_spec()?;
    let mut board = ReviewBoard::open(store, top_band).map_err(RecruitingServiceError::from)?;
    println!(
        "\nReview board (score >= 60): {} of {} applications",
        board.rows().len(),
        submitted.len()
    );

    let seen = feed.events().len();
    for application in board.rows().to_vec() {
        service.set_status(&session, &application.id, ApplicationStatus::Shortlisted)?;
        service.toggle_star(&session, &application.id)?;
    }
    if let Some(rejected) = submitted
        .iter()
        .find(|application| application.ats_score.unwrap_or(0) < 30)
    {
        service.set_status(&session, &rejected.id, ApplicationStatus::Rejected)?;
    }

    for event in feed.events_since(seen) {
        board
            .on_event(&event)
            .map_err(RecruitingServiceError::from)?;
        println!("  event {} -> {}", event.application_id, describe(&event.kind));
    }

    board
        .set_filter(FilterSpec {
            status: StatusFilter::Only(ApplicationStatus::Shortlisted),
            starred: true,
            ..FilterSpec::default()
        })
        .map_err(RecruitingServiceError::from)?;
    println!("\nStarred shortlist ({} board refreshes):", board.refreshes());
    for row in board.rows() {
        let view = row.summary_view();
        println!("  - {} [{}] score {}", view.full_name, view.status, view.ats_score);
    }

    let search = FilterSpec {
        search: "gmail".to_string(),
        ..FilterSpec::default()
    };
    let matches = service.list(&search)?;
    println!("\nSearch 'gmail': {} match(es)", matches.len());
    for application in matches {
        println!(
            "  - {} [{}]",
            application.full_name,
            application.status.label()
        );
    }

    let total = feed.events().len();
    println!(
        "\nAudit trail: {} events ({} since the board opened)",
        total,
        total - seen
    );
    Ok(())
}

fn render_components(report: &FitnessReport) {
    for component in &report.components {
        println!(
            "    - {:?}: {:.1} ({})",
            component.factor, component.points, component.notes
        );
    }
}

fn describe(kind: &ApplicationEventKind) -> String {
    match kind {
        ApplicationEventKind::Submitted { ats_score, .. } => format!("submitted ({ats_score})"),
        ApplicationEventKind::StatusChanged { from, to } => format!("{from} -> {to}"),
        ApplicationEventKind::StarToggled { starred } => {
            if *starred {
                "starred".to_string()
            } else {
                "unstarred".to_string()
            }
        }
        ApplicationEventKind::Deleted => "deleted".to_string(),
    }
}

fn demo_submissions(opening: &JobOpening) -> Vec<(ApplicationSubmission, Duration)> {
    vec![
        (
            ApplicationSubmission {
                job_opening_id: opening.id.clone(),
                full_name: "Priya Natarajan".to_string(),
                email: "priya@brightpixel.io".to_string(),
                phone: Some("+44 20 7946 0958".to_string()),
                cover_letter: Some(
                    "I must say react and node development is what I know best".to_string(),
                ),
                portfolio_url: Some("https://priya.dev".to_string()),
            },
            Duration::hours(3),
        ),
        (
            ApplicationSubmission {
                job_opening_id: opening.id.clone(),
                full_name: "Marco Bellini".to_string(),
                email: "marco@outlook.com".to_string(),
                phone: Some("+39 06 6982".to_string()),
                cover_letter: Some("I have 3 years of React and Node experience".to_string()),
                portfolio_url: Some("https://marco.codes".to_string()),
            },
            Duration::hours(30),
        ),
        (
            ApplicationSubmission {
                job_opening_id: opening.id.clone(),
                full_name: "Sam Whitlock".to_string(),
                email: "sam.whitlock@gmail.com".to_string(),
                phone: None,
                cover_letter: None,
                portfolio_url: None,
            },
            Duration::hours(100),
        ),
    ]
}
