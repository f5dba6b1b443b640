// polygen: random polygon image generator.
// Two ways to run it:
// • `polygen batch <count> <directory>` writes a numbered series of images.
// • `polygen preview` opens a window; Space draws a new polygon, Tab flips
//   convex/concave, I inverts, S saves a snapshot, ESC quits.

use std::env;
use std::path::PathBuf;
use std::process;

use polygen::batch::{self, BatchEvent};
use polygen::canvas::Color;
use polygen::error::Result;
use polygen::folder::OutputFolder;
use polygen::generator::{GeneratorConfig, PolygonGenerator, ShapeKind};
use polygen::preview;

enum Mode {
    Batch { count: usize, directory: PathBuf },
    Preview,
}

struct Cli {
    mode: Mode,
    config: GeneratorConfig,
    seed: Option<u64>,
    format: String,
    prefix: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        usage();
        return Ok(());
    }
    let cli = match parse(&args) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            usage();
            process::exit(2);
        }
    };

    let generator = match cli.seed {
        Some(seed) => PolygonGenerator::with_seed(cli.config, seed)?,
        None => PolygonGenerator::new(cli.config)?,
    };

    match cli.mode {
        Mode::Preview => preview::run_preview(generator),
        Mode::Batch { count, directory } => {
            let folder = OutputFolder::create(&directory)?;
            println!("writing {count} images to {}", folder.path().display());
            let handle = batch::run_batch(generator, folder, count, cli.prefix, cli.format);
            for event in handle.events().iter() {
                match event {
                    BatchEvent::Saved { index, path } => {
                        println!("[{}/{count}] {}", index + 1, path.display());
                    }
                    BatchEvent::Failed { index, error } => {
                        eprintln!("[{}/{count}] failed: {error}", index + 1);
                    }
                    BatchEvent::Cancelled { completed } => {
                        println!("cancelled after {completed} images");
                    }
                    BatchEvent::Finished { saved, failed } => {
                        println!("done: {saved} saved, {failed} failed");
                    }
                }
            }
            handle.wait();
            Ok(())
        }
    }
}

fn parse(args: &[String]) -> std::result::Result<Cli, String> {
    let mut it = args.iter();
    let mode = match it.next().map(String::as_str) {
        Some("batch") => {
            let count = parsed(it.next(), "batch <count>")?;
            let directory = text(it.next(), "batch <count> <directory>")?;
            Mode::Batch {
                count,
                directory: PathBuf::from(directory),
            }
        }
        Some("preview") => Mode::Preview,
        Some(other) => return Err(format!("unknown mode `{other}`")),
        None => return Err("missing mode: batch or preview".to_string()),
    };

    let mut cli = Cli {
        mode,
        config: GeneratorConfig::default(),
        seed: None,
        format: "jpg".to_string(),
        prefix: "polygon".to_string(),
    };

    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--seed" => cli.seed = Some(parsed(it.next(), flag)?),
            "--vertices" => cli.config.vertex_count = parsed(it.next(), flag)?,
            "--width" => cli.config.width = parsed(it.next(), flag)?,
            "--height" => cli.config.height = parsed(it.next(), flag)?,
            "--margin-w" => cli.config.width_margin = parsed(it.next(), flag)?,
            "--margin-h" => cli.config.height_margin = parsed(it.next(), flag)?,
            "--convex" => cli.config.kind = ShapeKind::Convex,
            "--concave" => cli.config.kind = ShapeKind::Concave,
            "--no-antialias" => cli.config.antialias = false,
            "--format" => cli.format = text(it.next(), flag)?.to_string(),
            "--prefix" => cli.prefix = text(it.next(), flag)?.to_string(),
            "--background" => cli.config.background = parse_color(text(it.next(), flag)?)?,
            "--foreground" => cli.config.foreground = parse_color(text(it.next(), flag)?)?,
            other => return Err(format!("unknown option `{other}`")),
        }
    }
    Ok(cli)
}

fn text<'a>(raw: Option<&'a String>, flag: &str) -> std::result::Result<&'a str, String> {
    raw.map(String::as_str)
        .ok_or_else(|| format!("{flag} needs a value"))
}

fn parsed<T: std::str::FromStr>(
    raw: Option<&String>,
    flag: &str,
) -> std::result::Result<T, String> {
    let raw = text(raw, flag)?;
    raw.parse()
        .map_err(|_| format!("{flag}: cannot parse `{raw}`"))
}

fn parse_color(raw: &str) -> std::result::Result<Color, String> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("colors are R,G,B - got `{raw}`"));
    }
    let channel = |s: &str| {
        s.trim()
            .parse::<u8>()
            .map_err(|_| format!("bad color channel `{s}` in `{raw}`"))
    };
    Ok(Color::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
    ))
}

fn usage() {
    eprintln!("usage:");
    eprintln!("  polygen batch <count> <directory> [options]");
    eprintln!("  polygen preview [options]");
    eprintln!();
    eprintln!("options:");
    eprintln!("  --seed N           reproducible output stream");
    eprintln!("  --vertices N       polygon vertex count (default 5)");
    eprintln!("  --width N          canvas width in pixels (default 480)");
    eprintln!("  --height N         canvas height in pixels (default 480)");
    eprintln!("  --margin-w N       keep vertices N pixels off the right edge");
    eprintln!("  --margin-h N       keep vertices N pixels off the bottom edge");
    eprintln!("  --convex           convex polygons (default)");
    eprintln!("  --concave          concave polygons");
    eprintln!("  --no-antialias     hard pixel edges");
    eprintln!("  --format EXT       image format by extension (default jpg)");
    eprintln!("  --prefix NAME      file name prefix (default polygon)");
    eprintln!("  --background R,G,B background color (default 255,255,255)");
    eprintln!("  --foreground R,G,B polygon color (default 0,0,0)");
}
