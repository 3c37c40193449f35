//! Screen companion: captures the screen, asks a vision model for a short
//! persona comment, and places it as a tooltip next to a draggable icon.
//!
//! Domains:
//!   - comment   pulls the display comment out of a free-form reply
//!   - layout    tooltip / input box / icon geometry
//!   - overlay   click-through, trigger gating, tooltip lifetime, drag
//!   - capture   primary display grab, JPEG encode
//!   - llm       prompts and the Gemini call
//!   - store     store.json persistence
//!   - pipeline  capture → model → extract → store

pub mod capture;
pub mod cli;
pub mod comment;
pub mod config;
pub mod error;
pub mod layout;
pub mod llm;
pub mod overlay;
pub mod pipeline;
pub mod store;

pub use error::{CompanionError, Result};

use layout::icon::{needs_resave, DEFAULT_ICON_SIZE};
use layout::{Rect, Size};
use overlay::{TooltipSession, TriggerGate};
use pipeline::ShotSource;
use store::Store;

/// Milliseconds since the Unix epoch.
pub(crate) fn epoch_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Entry point for the binary: one capture/comment cycle, printed as JSON.
pub fn run() -> Result<()> {
    // CARGO_MANIFEST_DIR keeps `.env.local` lookup independent of the cwd.
    config::load_env_files(std::path::Path::new(env!("CARGO_MANIFEST_DIR")));
    env_logger::init();

    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, cli::USAGE);
            std::process::exit(1);
        }
    };

    if let Some(key) = &args.save_key {
        return config::save_api_key(key);
    }

    let config = config::AppConfig::from_env();
    log::info!("[STARTUP] Data dir {}", config.data_dir.display());
    let store = Store::open(&config.data_dir)?;
    let gate = TriggerGate::new();

    let source = match &args.image {
        Some(path) => ShotSource::File(path.clone()),
        None => ShotSource::Live,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(pipeline::run_capture_and_comment(
        &config,
        &store,
        &gate,
        &args.input,
        source,
    ));

    let icon_size = Size::new(DEFAULT_ICON_SIZE, DEFAULT_ICON_SIZE);
    let stored = store.read()?.icon_pos;
    let requested = args.icon.unwrap_or(stored);
    let icon_pos = layout::clamp_icon_position(requested, &icon_size, &args.viewport);
    if args.icon.is_some() || needs_resave(stored, icon_pos) {
        store.set_icon_pos(icon_pos)?;
    }
    let anchor = Rect::new(icon_pos.x, icon_pos.y, icon_size.width, icon_size.height);

    let mut session = TooltipSession::new();
    session.show(&pipeline::display_text(&result), std::time::Instant::now());
    let tooltip = session.reposition(&anchor, &args.content, &args.viewport);

    let raw = result.as_ref().map(|r| r.raw_message.as_str()).unwrap_or("");
    let output = serde_json::json!({
        "record": result.as_ref().ok(),
        "error": result.as_ref().err().map(|e| e.to_string()),
        "display": session.text(),
        "parsed": comment::parse_comment(raw),
        "tier": result.as_ref().ok().and_then(|r| r.tier),
        "icon": icon_pos,
        "tooltip": tooltip,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    result.map(|_| ())
}
