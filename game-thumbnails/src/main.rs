use anyhow::{Context, Result};
use clap::Parser;
use image_compositor::{Scene, generate_all};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use std::{io::Write, path::PathBuf};

/// Draws the Othello, Space Shooter and Tetris listing thumbnails
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory the PNG files are written to
    #[arg(short, long, default_value = "images")]
    output_dir: PathBuf,

    /// Seed for star and block placement, random when omitted
    #[arg(short, long)]
    seed: Option<u64>,
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => {
            log::info!("using seed {seed}");
            Box::new(StdRng::seed_from_u64(seed))
        }
        None => Box::new(rand::rng()),
    };

    generate_all(&args.output_dir, rng.as_mut(), |scene, _| {
        println!("Generated {} thumbnail", scene.name());
    })
    .with_context(|| format!("generate thumbnails in {} failed", args.output_dir.display()))?;

    Ok(())
}
