use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use electroviz_core::config::AppConfig;
use electroviz_core::content::{ContentProvider, GeminiProvider, UnavailableProvider};
use electroviz_core::core::sampler::Sample;
use electroviz_core::core::types::{ContentPayload, Topic, VisualizationKind};
use electroviz_core::error::FetchError;
use electroviz_core::persistence::{BookmarkStore, FileStorage};
use electroviz_core::{FetchTicket, SessionPhase, TopicCatalog, TopicSession};
use log::{error, info};
use std::io::{self, stdout, BufRead, Write};
use std::sync::Arc;
use tokio::sync::mpsc;

type Session = TopicSession<FileStorage>;
type FetchDone = (FetchTicket, Result<ContentPayload, FetchError>);

const BAR_WIDTH: f64 = 40.0;

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    info!("data directory: {}", config.data_dir.display());
    let provider: Arc<dyn ContentProvider> = match GeminiProvider::new(&config) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!("could not build content provider, running offline: {e}");
            Arc::new(UnavailableProvider::new(e.to_string()))
        }
    };

    let bookmarks = BookmarkStore::load(FileStorage::new(&config.data_dir));
    let mut session = TopicSession::new(TopicCatalog::builtin(), bookmarks);
    let mut filter = String::new();

    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<FetchDone>();

    render(&session, &filter)?;
    loop {
        tokio::select! {
            Some((ticket, result)) = done_rx.recv() => {
                session.resolve(&ticket, result);
                render(&session, &filter)?;
            }
            line = line_rx.recv() => {
                let Some(line) = line else { break };
                if !handle_command(line.trim(), &mut session, &mut filter, &provider, &done_tx) {
                    break;
                }
                render(&session, &filter)?;
            }
        }
    }

    println!("\nGoodbye.");
    Ok(())
}

/// Returns `false` when the user asked to quit.
fn handle_command(
    cmd: &str,
    session: &mut Session,
    filter: &mut String,
    provider: &Arc<dyn ContentProvider>,
    done_tx: &mpsc::UnboundedSender<FetchDone>,
) -> bool {
    let (verb, arg) = match cmd.split_once(' ') {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (cmd, ""),
    };

    match verb {
        "exit" | "quit" => return false,
        "search" => *filter = arg.to_string(),
        "back" => session.reset(),
        "open" => {
            if let Some(topic) = pick_topic(session, filter, arg) {
                let ticket = session.select_topic(topic);
                spawn_fetch(ticket, provider, done_tx);
            }
        }
        "related" => {
            let name = arg
                .parse::<usize>()
                .ok()
                .and_then(|n| session.content()?.related_concepts.get(n.checked_sub(1)?).cloned());
            if let Some(name) = name {
                let ticket = session.select_related(&name);
                spawn_fetch(ticket, provider, done_tx);
            }
        }
        "save" => {
            let id = if arg.is_empty() {
                session.active_topic().map(|t| t.id.clone())
            } else {
                pick_topic(session, filter, arg).map(|t| t.id)
            };
            if let Some(id) = id {
                session.toggle_bookmark(&id);
            }
        }
        "r" | "f" | "c" => {
            if let Ok(value) = arg.parse::<f64>() {
                let controls = session.controls_mut();
                match verb {
                    "r" => controls.set_resistance(value),
                    "f" => controls.set_frequency(value),
                    _ => controls.set_capacitance(value),
                }
            }
        }
        _ => {}
    }
    true
}

/// Accepts a 1-based index into the listed topics or a catalog id.
fn pick_topic(session: &Session, filter: &str, arg: &str) -> Option<Topic> {
    let listed = session.catalog().search(filter);
    match arg.parse::<usize>() {
        Ok(n) => listed.get(n.checked_sub(1)?).map(|t| (*t).clone()),
        Err(_) => session.catalog().get(arg).cloned(),
    }
}

fn spawn_fetch(
    ticket: FetchTicket,
    provider: &Arc<dyn ContentProvider>,
    done_tx: &mpsc::UnboundedSender<FetchDone>,
) {
    let provider = Arc::clone(provider);
    let done_tx = done_tx.clone();
    tokio::spawn(async move {
        let result = provider.fetch(ticket.topic_name()).await;
        let _ = done_tx.send((ticket, result));
    });
}

fn render(session: &Session, filter: &str) -> io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    println!("{}", "ElectroViz: electrical engineering, one concept at a time".bold().cyan());
    println!("---------------------------------------------------------------");

    match session.active_topic() {
        None => render_catalog(session, filter),
        Some(topic) => render_topic(session, topic),
    }

    if let Some(e) = session.bookmark_write_error() {
        println!("\n{}", format!("Bookmarks not saved: {e}").yellow());
    }
    print!("\n> ");
    out.flush()
}

fn render_catalog(session: &Session, filter: &str) {
    println!("Commands: open <n|id>, save <n|id>, search <text>, exit\n");
    if !filter.is_empty() {
        println!("Filter: {}\n", filter.italic());
    }
    let listed = session.catalog().search(filter);
    if listed.is_empty() {
        println!("No topics match '{filter}'.");
    }
    for (i, topic) in listed.iter().enumerate() {
        let mark = if session.is_bookmarked(&topic.id) { "★".yellow() } else { " ".stylize() };
        println!(
            " {mark} {:>2}. {} {}  {}",
            i + 1,
            topic.icon.glyph(),
            topic.name.as_str().bold(),
            topic.short_description.as_str().dark_grey()
        );
    }
}

fn render_topic(session: &Session, topic: &Topic) {
    let mark = if session.is_bookmarked(&topic.id) { " ★" } else { "" };
    println!("{} {}{}", topic.icon.glyph(), topic.name.as_str().bold(), mark.yellow());
    println!("{}\n", topic.short_description.as_str().dark_grey());
    println!("Commands: related <n>, save, r/f/c <value>, back, exit\n");

    render_chart(session, topic.visualization);

    match session.phase() {
        SessionPhase::Loading => println!("\n{}", "Generating explanation...".italic()),
        SessionPhase::Degraded => {
            if let Some(notice) = session.last_error() {
                println!("\n{}", notice.yellow());
            }
        }
        SessionPhase::Ready | SessionPhase::Idle => {}
    }

    if let Some(content) = session.content() {
        println!("\n{}\n{}", "Summary".bold(), content.summary);
        println!("\n{}  {}", "Formula".bold(), content.formula.as_str().cyan());
        println!("\n{}\n{}", "Analogy".bold(), content.analogy);
        println!("\n{}\n{}", "In practice".bold(), content.application);
        println!("\n{}\n{}", "Fun fact".bold(), content.fun_fact);

        println!("\n{}", "Related".bold());
        for (i, name) in content.related_concepts.iter().enumerate() {
            println!("  {}. {name}", i + 1);
        }
        println!("\n{}", "Videos".bold());
        for video in &content.video_recommendations {
            println!("  [{}] {}\n      {}", video.language, video.title, video.search_url().dark_grey());
        }
    }
}

fn render_chart(session: &Session, kind: VisualizationKind) {
    let controls = session.controls();
    let caption = match kind {
        VisualizationKind::OhmLaw => format!("Current vs voltage at R = {} Ω", controls.resistance()),
        VisualizationKind::AcWave => format!("AC wave at {}x frequency (DC reference at 5 V)", controls.frequency()),
        VisualizationKind::RcCircuit => format!("Capacitor charging, C = {} µF, R = 1 kΩ", controls.capacitance()),
        VisualizationKind::Generic => {
            println!("{}", "Interactive visualization not available for this topic.".dark_grey());
            return;
        }
    };
    println!("{}", caption.bold());
    if let Some(samples) = session.chart() {
        for line in chart_lines(&samples) {
            println!("{line}");
        }
    }
}

/// Horizontal bars, one per sample, scaled to the series' own range.
fn chart_lines(samples: &[Sample]) -> Vec<String> {
    let (lo, hi) = samples
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), s| (lo.min(s.y), hi.max(s.y)));
    let span = (hi - lo).max(f64::EPSILON);
    let zero = ((0.0 - lo) / span * BAR_WIDTH).round() as usize;

    samples
        .iter()
        .map(|s| {
            let pos = ((s.y - lo) / span * BAR_WIDTH).round() as usize;
            let (start, end) = if pos < zero { (pos, zero) } else { (zero, pos) };
            let bar: String = (0..=BAR_WIDTH as usize)
                .map(|col| if col >= start && col < end.max(start + 1) { '█' } else { ' ' })
                .collect();
            format!("{:>9.4} │{bar}│ {:>7.2}", s.x, s.y)
        })
        .collect()
}
