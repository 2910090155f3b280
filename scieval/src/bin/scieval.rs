use rustyline::error::ReadlineError;
use tracing_subscriber::filter::{LevelFilter, Targets};

const LOGGED_CRATES: [&str; 2] = ["scieval", "mathlex"];

// SCIEVAL_LOG=<level> turns on logging for our crates, default is off
fn log_filter(level: Option<&str>) -> Targets {
    let level = level
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::OFF);
    Targets::new()
        .with_default(LevelFilter::OFF)
        .with_targets(LOGGED_CRATES.iter().map(|&c| (c, level)))
}

fn init_logging() {
    use tracing_subscriber::{fmt::Layer, prelude::*};

    let level = std::env::var("SCIEVAL_LOG").ok();
    tracing_subscriber::registry()
        .with(Layer::new()
            .with_writer(std::io::stderr)
            .with_filter(log_filter(level.as_deref()))
        )
        .init();
}

fn main() -> Result<(), String> {
    init_logging();

    if std::env::args().len() > 1 {
        let input = std::env::args().skip(1).collect::<Vec<String>>().join(" ");
        println!("{}", scieval::eval(&input));
        return Ok(());
    }

    let mut rl = rustyline::DefaultEditor::new().map_err(|e| e.to_string())?;
    let histpath = home::home_dir().map(|h| h.join(".scieval_history"));
    if let Some(ref path) = histpath {
        if rl.load_history(path).is_err() {
            tracing::info!("no history at {}", path.display());
        }
    }
    loop {
        match rl.readline("~> ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(format!("Readline err: {:?}", e)),
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                println!("{}", scieval::eval(&line));
            }
        }
    }
    if let Some(ref path) = histpath {
        rl.save_history(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}
