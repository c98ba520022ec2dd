//! journey-runner: headless driver for the Star Journey scene core.
//!
//! Usage:
//!   journey-runner --seed 7 --frames 600 --url http://127.0.0.1:5000/api/journey-data
//!   journey-runner --file journeyData.json --config scene.json --fps 60
//!   journey-runner --file journeyData.json --ipc-mode

use anyhow::Result;
use starjourney_core::{
    camera::Viewport,
    command::HostCommand,
    config::SceneConfig,
    engine::SceneEngine,
    error::LoadError,
    journey::DayRecord,
    loader::{FileJourneySource, HttpJourneySource, JourneyLoader, RetryPolicy},
    overlay::OverlayPanel,
    snapshot::FrameSnapshot,
    types::StarId,
};
use std::collections::BTreeMap;
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Frame {
        #[serde(default = "one")]
        count: u64,
    },
    Command(HostCommand),
    ClickStar {
        id: StarId,
    },
    Quit,
}

fn one() -> u64 { 1 }

#[derive(serde::Serialize)]
struct UiState<'a> {
    #[serde(flatten)]
    snapshot: FrameSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    overlay_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let frames = parse_arg(&args, "--frames", 600u64);
    let fps = parse_arg(&args, "--fps", 60.0f64);
    let width = parse_arg(&args, "--width", 1280.0f32);
    let height = parse_arg(&args, "--height", 720.0f32);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config_path = flag_value(&args, "--config");
    let file = flag_value(&args, "--file");

    let mut config = match config_path {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(url) = flag_value(&args, "--url") {
        config.loader.url = url.to_string();
    }

    if !ipc_mode {
        println!("Star Journey: journey-runner");
        println!("  seed:    {seed}");
        println!("  frames:  {frames} @ {fps} fps");
        println!("  field:   {} ({} points)", config.field.policy_name(), config.field.count());
        println!("  source:  {}", file.unwrap_or(&config.loader.url));
        println!();
    }

    let mut engine = SceneEngine::build(config, seed, Viewport::new(width, height)?)?;

    // The field is ready before the journey resolves; only stars wait.
    let loaded = load_journey(engine.config(), file)?;
    engine.apply_load_result(loaded)?;

    if ipc_mode {
        run_ipc_loop(&mut engine, fps)?;
    } else {
        let events = engine.run_frames(frames, fps);
        print_summary(&engine, frames, &events);
    }

    Ok(())
}

/// Block on the one startup load. A failed load is returned as a value
/// so the scene can run degraded; only runtime setup errors abort.
fn load_journey(config: &SceneConfig, file: Option<&str>) -> Result<Result<Vec<DayRecord>, LoadError>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let policy = RetryPolicy::from_config(&config.loader);
    let result = match file {
        Some(path) => runtime.block_on(JourneyLoader::new(FileJourneySource::new(path), policy).load()),
        None => runtime.block_on(
            JourneyLoader::new(HttpJourneySource::new(config.loader.url.clone()), policy).load(),
        ),
    };
    Ok(result)
}

fn run_ipc_loop(engine: &mut SceneEngine, fps: f64) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let mut error = None;
        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::Frame { count } => {
                engine.run_frames(count, fps);
            }
            IpcCommand::Command(command) => {
                if let Err(e) = engine.handle(command) {
                    log::warn!("command rejected: {e}");
                    error = Some(e.to_string());
                }
            }
            IpcCommand::ClickStar { id } => {
                if let Err(e) = engine.click_star(id) {
                    error = Some(e.to_string());
                }
            }
        }

        let state = build_ui_state(engine, error.as_deref());
        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state<'a>(engine: &SceneEngine, error: Option<&'a str>) -> UiState<'a> {
    UiState {
        overlay_html: engine.overlay().panel().map(OverlayPanel::to_html),
        snapshot: engine.snapshot(),
        error,
    }
}

fn print_summary(engine: &SceneEngine, frames: u64, events: &[starjourney_core::event::SceneEvent]) {
    let snapshot = engine.snapshot();

    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for event in events {
        *counts.entry(event.kind()).or_default() += 1;
    }

    println!("=== RUN SUMMARY ===");
    println!("  frames run:     {frames}");
    println!("  final frame:    {}", snapshot.frame);
    println!("  journey:        {}", snapshot.indicator);
    println!("  field:          {} ({} points)", snapshot.field.policy, snapshot.field.points);
    println!("  field rotation: {:.4} rad", snapshot.field.rotation_y);
    println!("  stars:          {}", snapshot.stars.len());
    println!("  systems:        {}", engine.system_names().join(", "));
    println!(
        "  camera:         ({:.2}, {:.2}, {:.2})",
        snapshot.camera.position[0], snapshot.camera.position[1], snapshot.camera.position[2]
    );

    println!();
    println!("=== EVENTS ===");
    for (kind, count) in &counts {
        println!("  {kind:<28} {count}");
    }

    if let Some(star) = snapshot.stars.first() {
        println!();
        println!("=== FIRST STAR ===");
        println!(
            "  day {} at ({:.2}, {:.2}, {:.2}) scale {:.3} color {}",
            star.day, star.position[0], star.position[1], star.position[2], star.scale, star.color
        );
        if let Some(first) = engine.state().star(star.id) {
            print!("{}", OverlayPanel::from_day(first.payload()).to_text());
        }
    }

    if let Some(panel) = engine.overlay().panel() {
        println!();
        println!("=== SELECTED DAY ===");
        print!("{}", panel.to_text());
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
