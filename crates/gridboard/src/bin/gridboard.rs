//! gridboard CLI: read board states from detections or photos.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use gridboard::detect::{load_rgb, read_board_image};
use gridboard::io::{DetectionsInput, ReaderConfig};
use gridboard::overlay::{draw_reading, OverlayStyle};
use gridboard::pipeline::BoardReading;
use gridboard::BoardSpec;
use log::{info, warn, LevelFilter};

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Parser)]
#[command(name = "gridboard")]
#[command(about = "Read the piece layout of a grid board game from photos or detections")]
#[command(version)]
struct Cli {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,

    /// Emit JSON log lines (requires the `tracing` feature).
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign pre-computed markers to cells using pre-computed interior corners.
    Assign {
        /// Detections JSON: `board_size`, `corners`, `markers`.
        #[arg(long)]
        input: PathBuf,

        /// Path to write the board state (JSON).
        #[arg(long)]
        out: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Read one photo.
    Read {
        /// Path to the input image.
        #[arg(long)]
        image: PathBuf,

        /// Path to write the board state (JSON).
        #[arg(long)]
        out: PathBuf,

        /// Optional path for an overlay image with lattice and matches drawn.
        #[arg(long)]
        overlay: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Read every photo in a directory.
    Batch {
        /// Directory with `.jpg`/`.jpeg`/`.png` photos.
        #[arg(long)]
        dir: PathBuf,

        /// Where to write `<stem>.state.json` files (defaults to `--dir`).
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Also write `<stem>_processed.png` overlays next to the states.
        #[arg(long)]
        overlays: bool,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Debug, Clone, Args)]
struct CommonArgs {
    /// Reader configuration JSON (board, reader, corners, markers sections).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of cells per side; overrides the config file.
    #[arg(long)]
    board_size: Option<u32>,
}

impl CommonArgs {
    fn load_config(&self) -> CliResult<ReaderConfig> {
        let mut cfg = match &self.config {
            Some(path) => ReaderConfig::load_json(path)?,
            None => ReaderConfig::default(),
        };
        if let Some(size) = self.board_size {
            cfg.board = BoardSpec::new(size)?;
        }
        Ok(cfg)
    }
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| format!("invalid log level `{s}`"))
}

fn init_logging(level: LevelFilter, json: bool) -> CliResult<()> {
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init();
        gridboard::core::init_tracing(level, json);
    }
    #[cfg(not(feature = "tracing"))]
    {
        gridboard::core::init_with_level(level)?;
        if json {
            warn!("--log-json needs the `tracing` feature; using plain logs");
        }
    }
    Ok(())
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_json)?;

    match cli.command {
        Commands::Assign { input, out, common } => run_assign(&input, &out, &common),
        Commands::Read {
            image,
            out,
            overlay,
            common,
        } => run_read(&image, &out, overlay.as_deref(), &common),
        Commands::Batch {
            dir,
            out_dir,
            overlays,
            common,
        } => run_batch(&dir, out_dir.as_deref(), overlays, &common),
    }
}

// ── assign ─────────────────────────────────────────────────────────────

fn run_assign(input: &Path, out: &Path, common: &CommonArgs) -> CliResult<()> {
    let mut cfg = common.load_config()?;
    let detections = DetectionsInput::load_json(input)?;
    if common.board_size.is_none() {
        if let Some(board) = detections.board_size {
            cfg.board = board;
        }
    }

    let reader = cfg.build_reader();
    let reading = reader.read(detections.corners, &detections.markers)?;
    info!(
        "{} markers -> {} pieces",
        reading.markers.len(),
        reading.pieces.len()
    );

    reading.to_state().write_json(out)?;
    println!("wrote board state to {}", out.display());
    Ok(())
}

// ── read ───────────────────────────────────────────────────────────────

fn read_photo(path: &Path, cfg: &ReaderConfig) -> CliResult<(image::RgbImage, BoardReading)> {
    info!("loading image: {}", path.display());
    let img = load_rgb(path)?;
    let reading = read_board_image(
        &img,
        &cfg.build_corner_detector(),
        &cfg.build_marker_detector(),
        &cfg.build_reader(),
    )?;
    Ok((img, reading))
}

fn write_overlay(mut img: image::RgbImage, reading: &BoardReading, path: &Path) -> CliResult<()> {
    draw_reading(&mut img, reading, &OverlayStyle::default());
    img.save(path)?;
    info!("overlay written to {}", path.display());
    Ok(())
}

fn run_read(image: &Path, out: &Path, overlay: Option<&Path>, common: &CommonArgs) -> CliResult<()> {
    let cfg = common.load_config()?;
    let (img, reading) = read_photo(image, &cfg)?;
    if !reading.board_found() {
        warn!("board not found in {}", image.display());
    }

    reading.to_state().write_json(out)?;
    if let Some(path) = overlay {
        write_overlay(img, &reading, path)?;
    }
    println!(
        "wrote board state with {} pieces to {}",
        reading.pieces.len(),
        out.display()
    );
    Ok(())
}

// ── batch ──────────────────────────────────────────────────────────────

fn is_board_photo(path: &Path) -> bool {
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    let stem_ok = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| !s.contains("_processed"))
        .unwrap_or(false);
    ext_ok && stem_ok
}

fn list_board_photos(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let mut photos = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_board_photo(&path) {
            photos.push(path);
        }
    }
    photos.sort();
    Ok(photos)
}

fn run_batch(dir: &Path, out_dir: Option<&Path>, overlays: bool, common: &CommonArgs) -> CliResult<()> {
    let cfg = common.load_config()?;
    let out_dir = out_dir.unwrap_or(dir);
    fs::create_dir_all(out_dir)?;

    let photos = list_board_photos(dir)?;
    info!("{} photos in {}", photos.len(), dir.display());

    let mut recognized = 0usize;
    for path in &photos {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("board")
            .to_string();
        let (img, reading) = match read_photo(path, &cfg) {
            Ok(v) => v,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        if reading.board_found() {
            recognized += 1;
        }

        let state_path = out_dir.join(format!("{stem}.state.json"));
        if let Err(e) = reading.to_state().write_json(&state_path) {
            warn!("failed to write {}: {}", state_path.display(), e);
            continue;
        }
        if overlays {
            let overlay_path = out_dir.join(format!("{stem}_processed.png"));
            if let Err(e) = write_overlay(img, &reading, &overlay_path) {
                warn!("failed to write {}: {}", overlay_path.display(), e);
            }
        }
    }

    println!("recognized {} of {} boards", recognized, photos.len());
    Ok(())
}
