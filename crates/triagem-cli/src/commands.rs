use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use eyre::WrapErr;

use triagem_cli::config::{self, TriagemConfig};
use triagem_cli::likert;
use triagem_core::models::response::ResponseSet;
use triagem_core::models::result::ScoreResult;
use triagem_export::render;
use triagem_instruments::catalog::Catalog;
use triagem_session::analytics::ScreeningStats;
use triagem_session::history::compare_with_history;
use triagem_session::manager::SessionManager;
use triagem_storage::results::{JsonlResultSink, ResultRecord, load_history};
use triagem_storage::sessions::FileSessionStore;

/// Everything a command needs, wired from the config.
struct App {
    manager: SessionManager,
    history: Arc<JsonlResultSink>,
}

impl App {
    fn open(config: &TriagemConfig) -> eyre::Result<Self> {
        let policy = config.catalog_policy();
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path, &policy)
                .wrap_err_with(|| format!("loading catalog from {}", path.display()))?,
            None => Catalog::load(&policy)?,
        };

        let store = Arc::new(FileSessionStore::new(config.sessions_dir()));
        let history = Arc::new(JsonlResultSink::new(config.history_path()));
        let manager = SessionManager::new(catalog, store, history.clone());

        let evicted = manager.evict_stale(config.session_max_age(), jiff::Timestamp::now())?;
        if evicted > 0 {
            tracing::info!(evicted, "dropped stale sessions");
        }

        Ok(Self { manager, history })
    }
}

pub fn list(config: &TriagemConfig) -> eyre::Result<()> {
    let app = App::open(config)?;
    for summary in app.manager.list_instruments() {
        println!(
            "{:<12} {} ({} questions, ~{} min)",
            summary.id, summary.name, summary.total_questions, summary.estimated_minutes
        );
    }
    Ok(())
}

pub fn show(config: &TriagemConfig, instrument_id: &str) -> eyre::Result<()> {
    let app = App::open(config)?;
    let instrument = app.manager.get_instrument(instrument_id)?;

    println!("{} [{}]", instrument.name, instrument.id);
    println!("{}", instrument.description);
    println!("Scientific basis: {}", instrument.scientific_basis);
    println!(
        "Scoring: {:?}, {}-{}",
        instrument.algorithm.kind, instrument.algorithm.min_score, instrument.algorithm.max_score
    );

    if !instrument.subscales.is_empty() {
        println!("\nSubscales:");
        for subscale in &instrument.subscales {
            println!(
                "  {:<28} {} ({} questions)",
                subscale.id,
                subscale.name,
                subscale.question_ids.len()
            );
        }
    }

    println!("\nQuestions:");
    for question in &instrument.questions {
        let reversed = if question.reverse_scored { " (reversed)" } else { "" };
        println!("  {:<10} {}{reversed}", question.id, question.prompt);
    }
    Ok(())
}

pub fn take(config: &TriagemConfig, instrument_id: &str) -> eyre::Result<()> {
    let app = App::open(config)?;
    let instrument = app.manager.get_instrument(instrument_id)?;
    let session = app.manager.start(instrument_id)?;

    println!(
        "{} - {} questions, about {} minutes",
        instrument.name,
        instrument.total_questions(),
        instrument.estimated_minutes
    );
    println!("Answer 0-4 or never / rarely / sometimes / often / always.\n");

    let started = Instant::now();
    let total = instrument.questions.len();
    let mut lines = io::stdin().lock().lines();

    for (index, question) in instrument.questions.iter().enumerate() {
        loop {
            print!("[{}/{total}] {} > ", index + 1, question.prompt);
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                println!();
                println!("Input ended. Session {} was saved unfinished.", session.id);
                return Ok(());
            };
            let line = line?;

            let value = match likert::parse_answer(&line) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            };
            match app.manager.record_answer(&session.id, &question.id, value) {
                Ok(_) => break,
                Err(e) if e.validation().is_some() => eprintln!("{e}"),
                Err(e) => return Err(e.into()),
            }
        }
    }

    let result = app
        .manager
        .finalize(&session.id, &ResponseSet::new(), started.elapsed().as_secs())?;
    println!();
    report(&app, &result, None)
}

pub fn score(
    config: &TriagemConfig,
    instrument_id: &str,
    responses_path: &Path,
    elapsed: u64,
    template: Option<&Path>,
    json: bool,
) -> eyre::Result<()> {
    let contents = std::fs::read_to_string(responses_path)
        .wrap_err_with(|| format!("reading {}", responses_path.display()))?;
    let responses = likert::responses_from_json(&contents)?;

    let app = App::open(config)?;
    let session = app.manager.start(instrument_id)?;
    let result = app.manager.finalize(&session.id, &responses, elapsed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    report(&app, &result, template)
}

/// Print the analysis and how it compares with earlier results.
fn report(app: &App, result: &ScoreResult, template: Option<&Path>) -> eyre::Result<()> {
    let text = match template {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading template {}", path.display()))?;
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("custom");
            render::render_with_template(name, &content, result)?
        }
        None => render::render_analysis(result)?,
    };
    println!("{text}");

    let session = app.manager.session(&result.session_id)?;
    let current = ResultRecord::new(result, &session);
    let records = app.history.load_all()?;
    let trend = compare_with_history(&current, &records);

    print!("Trend: {}", trend.trend);
    if let (Some(mean), Some(difference)) = (trend.historical_mean, trend.difference) {
        print!(" (historical mean {mean:.0}%, difference {difference:+.1} points)");
    }
    println!();
    println!("Session: {}", result.session_id);
    Ok(())
}

pub fn history(config: &TriagemConfig, instrument: Option<&str>, json: bool) -> eyre::Result<()> {
    let records: Vec<ResultRecord> = load_history(&config.history_path())?
        .into_iter()
        .filter(|r| instrument.is_none_or(|id| r.result.instrument_id == id))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if records.is_empty() {
        println!("No results yet.");
        return Ok(());
    }

    for record in &records {
        let r = &record.result;
        println!(
            "{}  {:<28} {:<12} {:>3}/{:<3} {:>3}%  {}",
            r.timestamp.strftime("%Y-%m-%d %H:%M"),
            r.session_id,
            r.instrument_id,
            r.total_score,
            r.max_score,
            r.rounded_percentage(),
            r.risk_level
        );
    }
    Ok(())
}

pub fn stats(config: &TriagemConfig, json: bool) -> eyre::Result<()> {
    let records = load_history(&config.history_path())?;
    let stats = ScreeningStats::from_records(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Total sessions: {}", stats.total_sessions);
    if let Some(pct) = stats.average_percentage {
        println!("Average score: {pct:.1}%");
    }
    if let Some(seconds) = stats.mean_completion_seconds {
        println!("Mean completion time: {}m {:02}s", seconds / 60, seconds % 60);
    }

    if !stats.by_instrument.is_empty() {
        println!("\nBy instrument:");
        for (id, count) in &stats.by_instrument {
            println!("  {id:<12} {count}");
        }
        println!("\nBy risk level:");
        for (level, count) in &stats.by_risk_level {
            println!("  {:<12} {count}", level.label());
        }
    }

    if !stats.recent.is_empty() {
        println!("\nRecent:");
        for recent in &stats.recent {
            println!(
                "  {}  {:<12} {:>3}%  {}",
                recent.timestamp.strftime("%Y-%m-%d %H:%M"),
                recent.instrument_id,
                recent.percentage,
                recent.risk_level
            );
        }
    }
    Ok(())
}

pub fn config_show(path: &Path, config: &TriagemConfig) -> eyre::Result<()> {
    let source = if path.exists() { "" } else { " (not created, showing defaults)" };
    println!("# {}{source}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

pub fn config_init(path: &Path, force: bool) -> eyre::Result<()> {
    if path.exists() && !force {
        eyre::bail!("{} already exists; pass --force to overwrite", path.display());
    }
    config::save_config(path, &TriagemConfig::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}
