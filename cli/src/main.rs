//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use roundtable_application::{
    GroupChatManager, LlmGroupChatManager, LlmGateway, Participant, ParticipantRoster,
    RoundRobinManager, RunGroupChatInput, RunGroupChatUseCase,
};
use roundtable_domain::{Severity, Task};
use roundtable_infrastructure::{
    ConfigLoader, FileConfig, FileParticipantConfig, JsonlConversationLogger, LlmParticipant,
    ManagerKind, OpenAiGateway, OpenAiGatewayConfig,
};
use roundtable_presentation::{Cli, ConsoleFormatter, ConsoleObserver, OutputFormat};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting roundtable");

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?
    };
    apply_overrides(&mut config, &cli);
    check_config(&config)?;

    let task = Task::new(cli.task.clone().unwrap_or_else(|| config.discussion.task.clone()))?;
    let run_config = config.discussion.to_run_config()?;
    let params = config.retry.to_execution_params();

    // === Dependency Injection ===
    let gateway: Arc<dyn LlmGateway> = Arc::new(OpenAiGateway::new(
        OpenAiGatewayConfig::from_provider(&config.provider)?,
    )?);

    let roster = build_roster(&config, &cli.participants, gateway.clone())?;

    let manager: Arc<dyn GroupChatManager> = match config.discussion.parse_manager().0 {
        ManagerKind::Llm => Arc::new(LlmGroupChatManager::new(
            gateway.clone(),
            config.models.parse_moderator().0,
            params.clone(),
        )),
        ManagerKind::RoundRobin => Arc::new(RoundRobinManager::new()),
    };

    let cancellation = CancellationToken::new();
    spawn_ctrl_c_handler(cancellation.clone());

    let mut use_case = RunGroupChatUseCase::new(manager)
        .with_params(params)
        .with_cancellation(cancellation);

    if !cli.quiet && cli.output != OutputFormat::Json {
        use_case = use_case.with_observer(Arc::new(
            ConsoleObserver::new().with_decisions(!cli.hide_decisions),
        ));
    }

    if let Some(path) = &config.logging.conversation_log {
        let logger = JsonlConversationLogger::open(path)
            .with_context(|| format!("failed to open transcript {}", path.display()))?;
        info!("Writing transcript to {}", logger.path().display());
        use_case = use_case.with_logger(Arc::new(logger));
    }

    let topic = run_config.topic().to_string();
    info!(
        "Discussing '{}' with {} ({} rounds max)",
        topic,
        roster.names().join(", "),
        run_config.max_rounds()
    );

    let result = match use_case
        .execute(RunGroupChatInput::new(task, run_config), &roster)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            if e.is_cancelled() {
                warn!("Discussion cancelled");
            }
            bail!(
                "discussion failed after {} message(s): {}",
                e.history.len(),
                e
            );
        }
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&topic, &result),
        OutputFormat::Summary => ConsoleFormatter::format_summary_only(&topic, &result),
        OutputFormat::Json => ConsoleFormatter::format_json(&topic, &result),
    };

    println!("{}", output);

    Ok(())
}

/// Initialize logging based on verbosity level, optionally to a file
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// Command line flags win over every configuration file.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(topic) = &cli.topic {
        config.discussion.topic = topic.clone();
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.discussion.max_rounds = max_rounds;
    }
    if let Some(manager) = cli.manager {
        config.discussion.manager = manager.as_str().to_string();
    }
    if let Some(moderator) = &cli.moderator {
        config.models.moderator = Some(moderator.clone());
    }
    if let Some(path) = &cli.transcript {
        config.logging.conversation_log = Some(path.clone());
    }
}

/// Report every issue; refuse to start when any of them is an error.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("{}", issue),
            Severity::Warning => warn!("{}", issue.message),
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("configuration has {} error(s)", errors);
    }
    Ok(())
}

/// Build the participants, keeping only `selected` names when any are given.
fn build_roster(
    config: &FileConfig,
    selected: &[String],
    gateway: Arc<dyn LlmGateway>,
) -> Result<ParticipantRoster> {
    let available = config.effective_participants();
    let chosen: Vec<FileParticipantConfig> = if selected.is_empty() {
        available
    } else {
        let mut chosen = Vec::with_capacity(selected.len());
        for name in selected {
            match available.iter().find(|p| &p.name == name) {
                Some(p) => chosen.push(p.clone()),
                None => bail!(
                    "unknown participant '{}' (available: {})",
                    name,
                    available
                        .iter()
                        .map(|p| p.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }
        }
        chosen
    };

    let default_model = config.models.parse_participant().0;
    let participants = chosen
        .iter()
        .map(|p| {
            LlmParticipant::from_config(p, &default_model, gateway.clone())
                .map(|participant| Arc::new(participant) as Arc<dyn Participant>)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParticipantRoster::new(participants)?)
}

fn spawn_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nReceived Ctrl+C, stopping the discussion...");
            token.cancel();
        }
    });
}
