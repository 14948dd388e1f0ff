// Soul Link Core command line entry point
// Runs one supervisor operation against the local session store and prints JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use soullink_core::actors::supervisor::{SupervisorHandle, DEFAULT_JOURNAL_LIMIT};
use soullink_core::config::{AppConfig, LogFormat};
use soullink_core::database;
use soullink_core::fs_manager::DataDirManager;
use soullink_core::models::{JournalRequest, QuestionnaireRequest};
use tracing::info;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "soullink-core", version, about = "Journal mood inference and wellness suggestions")]
struct Cli {
    /// Session to operate on; defaults to today's most recent session
    #[arg(long, global = true, env = "SOULLINK_SESSION")]
    session: Option<String>,

    /// User id recorded on submissions
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a journal entry
    Journal {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Submit questionnaire answers (labels such as "agree" or numbers 1-5)
    Questionnaire {
        #[arg(required = true, num_args = 1..)]
        answers: Vec<String>,
    },
    /// Today's mood card
    Mood,
    /// Latest suggestions
    Suggestions,
    /// Rolling wellness metrics
    Wellness,
    /// Recent journal entries, newest first
    Journals {
        #[arg(default_value_t = DEFAULT_JOURNAL_LIMIT)]
        limit: usize,
    },
    /// Every stored session
    Sessions,
    /// A full session document
    Session { id: String },
    /// Service health
    Health,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Bunyan => Registry::default()
            .with(filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(
                "soullink-core".to_string(),
                std::io::stderr,
            ))
            .init(),
    }
}

/// Numbers 1-5 are sent as JSON numbers, everything else as labels.
fn answer_value(raw: &str) -> Value {
    match raw.trim().parse::<u8>() {
        Ok(n) => json!(n),
        Err(_) => json!(raw),
    }
}

async fn run(cli: Cli, supervisor: &SupervisorHandle) -> Result<Value> {
    let session = cli.session;
    let output = match cli.command {
        Command::Journal { text } => {
            let response = supervisor
                .submit_journal(JournalRequest {
                    content: text.join(" "),
                    user_id: cli.user,
                    session_id: session,
                })
                .await?;
            serde_json::to_value(response)?
        }
        Command::Questionnaire { answers } => {
            let answers = answers.iter().map(|a| answer_value(a)).collect();
            let response = supervisor
                .submit_questionnaire(QuestionnaireRequest {
                    answers: Value::Array(answers),
                    user_id: cli.user,
                    session_id: session,
                    submitted_at: Some(chrono::Utc::now().to_rfc3339()),
                })
                .await?;
            serde_json::to_value(response)?
        }
        Command::Mood => serde_json::to_value(supervisor.todays_mood(session).await?)?,
        Command::Suggestions => {
            serde_json::to_value(supervisor.latest_suggestions(session).await?)?
        }
        Command::Wellness => serde_json::to_value(supervisor.wellness(session).await?)?,
        Command::Journals { limit } => {
            serde_json::to_value(supervisor.list_journals(session, Some(limit)).await?)?
        }
        Command::Sessions => {
            let sessions = supervisor.list_sessions().await?;
            json!({ "total": sessions.len(), "sessions": sessions })
        }
        Command::Session { id } => json!({
            "success": true,
            "session_data": supervisor.get_session(id).await?,
        }),
        Command::Health => serde_json::to_value(supervisor.health().await?)?,
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing(LogFormat::from_env()?);

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let data_dir = DataDirManager::new(&config.data_dir);
    data_dir
        .init()
        .with_context(|| format!("Failed to create data directory {:?}", data_dir.data_dir()))?;
    let pool = database::init_db(Some(&data_dir.database_path()))
        .await
        .context("Failed to open the session store")?;

    let supervisor = SupervisorHandle::new(&config, pool);
    info!("Soul Link core ready ({})", config.ai_provider());

    let output = run(cli, &supervisor).await;
    supervisor.shutdown().await.ok();

    println!("{}", serde_json::to_string_pretty(&output?)?);
    Ok(())
}
