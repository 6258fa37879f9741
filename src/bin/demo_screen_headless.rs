//! Demo Screen Headless Runner
//!
//! Reads captured terminal output (raw text or an asciicast v2 recording)
//! from stdin or a file and prints the final screen state.

use std::io::{self, Read};
use std::process::ExitCode;

use demo_screen::{AnsiMode, Cast, ReplayConfig, Screen, ScreenConfig, Snapshot};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let defaults = ScreenConfig::default();
    let mut cols: Option<usize> = None;
    let mut rows: Option<usize> = None;
    let mut input_file: Option<String> = None;
    let mut output_format = OutputFormat::Text;
    let mut input_format = InputFormat::Raw;
    let mut ansi_mode = AnsiMode::Preserve;
    let mut replay = ReplayConfig::default();
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--cols" => {
                i += 1;
                if i < args.len() {
                    cols = args[i].parse().ok();
                }
            },
            "-r" | "--rows" => {
                i += 1;
                if i < args.len() {
                    rows = args[i].parse().ok();
                }
            },
            "-f" | "--file" => {
                i += 1;
                if i < args.len() {
                    input_file = Some(args[i].clone());
                }
            },
            "--max-idle" => {
                i += 1;
                if i < args.len() {
                    replay.max_idle_ms = args[i].parse().unwrap_or(replay.max_idle_ms);
                }
            },
            "--speed" => {
                i += 1;
                if i < args.len() {
                    replay.speed = args[i].parse().unwrap_or(replay.speed);
                }
            },
            "--cast" => {
                input_format = InputFormat::Cast;
            },
            "--strip" => {
                ansi_mode = AnsiMode::Strip;
            },
            "-j" | "--json" => {
                output_format = OutputFormat::Json;
            },
            "-t" | "--text" => {
                output_format = OutputFormat::Text;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as input file if no flag
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(args[i].clone());
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    // Read input
    let input_data = match &input_file {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => {
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        },
    };

    let snapshot = match input_format {
        InputFormat::Raw => {
            let config = ScreenConfig::new(
                rows.unwrap_or(defaults.rows),
                cols.unwrap_or(defaults.cols),
            )
            .with_ansi_mode(ansi_mode);
            run_raw(&config, &input_data)
        },
        InputFormat::Cast => run_cast(&input_data, rows, cols, ansi_mode, &replay),
    };

    let snapshot = match snapshot {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    // Output result
    match output_format {
        OutputFormat::Text => {
            println!("Screen State ({}x{}):", snapshot.cols(), snapshot.rows());
            println!("Cursor: ({}, {})", snapshot.cursor_row, snapshot.cursor_col);
            println!("Time: {}ms", snapshot.t_ms);
            println!("---");
            for line in &snapshot.lines {
                println!("{}", line);
            }
            println!("---");
        },
        OutputFormat::Json => match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            },
        },
    }

    ExitCode::SUCCESS
}

fn run_raw(config: &ScreenConfig, data: &[u8]) -> demo_screen::Result<Snapshot> {
    let mut screen = Screen::from_config(config)?;
    screen.feed_bytes(data);
    Ok(screen.snapshot(0.0))
}

fn run_cast(
    data: &[u8],
    rows: Option<usize>,
    cols: Option<usize>,
    ansi_mode: AnsiMode,
    replay: &ReplayConfig,
) -> demo_screen::Result<Snapshot> {
    let cast = Cast::parse(&String::from_utf8_lossy(data))?;
    let recorded = cast.screen_config();
    let config = ScreenConfig::new(rows.unwrap_or(recorded.rows), cols.unwrap_or(recorded.cols))
        .with_ansi_mode(ansi_mode);

    let snapshots = cast.replay_with(&config, replay)?;
    match snapshots.into_iter().last() {
        Some(snapshot) => Ok(snapshot),
        // No output events: show the empty screen
        None => Ok(Screen::from_config(&config)?.snapshot(0.0)),
    }
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy)]
enum InputFormat {
    Raw,
    Cast,
}

fn print_help() {
    println!("Demo Screen Headless Runner");
    println!();
    println!("Usage: demo-screen-headless [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -c, --cols <N>       Set screen width (default: 120, or the recording's)");
    println!("  -r, --rows <N>       Set screen height (default: 40, or the recording's)");
    println!("  -f, --file <PATH>    Read input from file");
    println!("      --cast           Input is an asciicast v2 recording");
    println!("      --strip          Discard all styling");
    println!("      --max-idle <MS>  Cap on replayed pauses (default: 2000)");
    println!("      --speed <X>      Replay speed multiplier (default: 1)");
    println!("  -j, --json           Output snapshot as JSON");
    println!("  -t, --text           Output snapshot as text (default)");
    println!("  -h, --help           Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!();
    println!("Examples:");
    println!("  printf 'Loading\\r\\x1b[32mDone\\x1b[0m' | demo-screen-headless");
    println!("  demo-screen-headless --cast --json session.cast > snapshot.json");
}
