use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use mapstitch_core::assemble::tile_path;
use mapstitch_core::batch;
use mapstitch_core::convert::{self, BLP_GUIDE, NEXT_STEPS};
use mapstitch_core::store::FsStore;
use mapstitch_core::tileset::{self, OutputFormat, StitchConfig};
use mapstitch_core::VERSION;

const RULE: &str = "============================================================";

#[derive(Parser, Debug)]
#[command(name = "mapstitch", version = VERSION, about = "Map tile assembly for addon textures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Png,
    Tga,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Png => OutputFormat::Png,
            Format::Tga => OutputFormat::Tga,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stitch every configured tile set into one map image
    Assemble {
        /// YAML tile-set list; the built-in city table when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory holding the tiles and receiving the maps
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long)]
        tile_size: Option<u32>,
        /// Square canvas edge to centre each map on
        #[arg(long, conflicts_with = "no_pad")]
        target_size: Option<u32>,
        /// Keep the bare grid size instead of padding to a square
        #[arg(long)]
        no_pad: bool,
        #[arg(long, value_enum)]
        format: Option<Format>,
    },
    /// Load a tile-set list and print the resulting layout
    Inspect { path: Option<PathBuf> },
    /// Write PNG fallbacks for every TGA in a directory
    Convert {
        #[arg(long, default_value = "Maps")]
        dir: PathBuf,
        /// Actually convert; without it only the guidance is printed
        #[arg(long)]
        confirm: bool,
    },
    /// Print how to turn the maps into BLP textures
    Guide,
}

fn load_config(path: Option<&PathBuf>) -> Result<StitchConfig> {
    match path {
        Some(p) => tileset::load_from_path(p),
        None => Ok(StitchConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Assemble { config, dir, tile_size, target_size, no_pad, format } => {
            let mut cfg = load_config(config.as_ref())?;
            if let Some(size) = tile_size { cfg.tile_size = size; }
            if let Some(size) = target_size { cfg.target_size = Some(size); }
            if no_pad { cfg.target_size = None; }
            if let Some(f) = format { cfg.format = f.into(); }
            // Only batch-wide settings can stop the run; bad sets are skipped.
            cfg.validate()?;

            println!("{}", RULE);
            println!("Map Tile Assembler");
            println!("{}", RULE);
            match cfg.target_size {
                Some(t) => println!("Centering maps on {}x{} squares", t, t),
                None => println!("Writing maps at grid size (no padding)"),
            }

            let report = batch::run_with(&FsStore, &dir, &cfg, |o| match &o.result {
                Ok(path) => println!("  ok   {} -> {}", o.name, path.display()),
                Err(e) => println!("  skip {}", e),
            });

            println!("\n{}", RULE);
            println!("Assembled {}/{} maps", report.succeeded(), report.total());
            println!("{}", RULE);
            if report.succeeded() > 0 {
                println!("\n{}", NEXT_STEPS);
            }
        }
        Command::Inspect { path } => {
            let cfg = load_config(path.as_ref())?;
            let layout = cfg.layout();
            println!("tile size: {}px", cfg.tile_size);
            match cfg.target_size {
                Some(t) => println!("target: {}x{}", t, t),
                None => println!("target: none"),
            }
            println!("format: {}", cfg.format.extension());
            println!("background: {:?}", cfg.background);
            for set in &cfg.tile_sets {
                if let Err(e) = layout.check(set) {
                    println!("  {}: will be skipped ({})", set.name, e);
                    continue;
                }
                let (gw, gh) = set.grid_size(cfg.tile_size)?;
                let (ow, oh) = layout.output_size(set)?;
                println!(
                    "  {}: {}x{} grid, {} tiles ({}..{}), {}x{} -> {}x{}",
                    set.name,
                    set.columns,
                    set.rows,
                    set.tile_count,
                    tile_path(Path::new("."), &set.name, 1).display(),
                    tile_path(Path::new("."), &set.name, set.tile_count).display(),
                    gw, gh, ow, oh
                );
            }
        }
        Command::Convert { dir, confirm } => {
            println!("{}\n{}\n{}", RULE, BLP_GUIDE, RULE);
            if !confirm {
                println!("\nNo PNG fallbacks written; pass --confirm to create them.");
                return Ok(());
            }
            println!("\nConverting TGA to PNG in {}", dir.display());
            let report = convert::convert_dir(&dir)?;
            if report.total() == 0 {
                println!("No TGA files found");
                return Ok(());
            }
            for e in &report.failed {
                println!("  failed: {}", e);
            }
            println!("\n{}/{} PNG files created", report.converted.len(), report.total());
            println!("PNG textures may not load in game; prefer BLPConverter output.");
        }
        Command::Guide => {
            println!("{}", BLP_GUIDE);
            println!("\n{}", NEXT_STEPS);
        }
    }
    Ok(())
}
