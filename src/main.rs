mod core;
mod decoder;
mod detector;
mod error;

use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Env;
use log::error;

use crate::core::pipeline;
use crate::core::writer::CropWriter;
use crate::decoder::VideoSource;
use crate::detector::CascadeDetector;

#[derive(Parser)]
#[command(author, version, about = "Extract face crops from a video", long_about = None)]
struct Cli {
    /// Video file to scan for faces
    input_video: String,
    /// Directory that receives the numbered crops
    save_directory: String,
    /// Cascade classifier model (LBP or Haar XML)
    #[arg(long, default_value = "lbpcascade_frontalface.xml")]
    cascade: String,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            process::exit(0);
        }
        Err(err) => {
            // Bad invocation: usage goes to stdout, same exit status as
            // every other fatal failure.
            println!("{err}");
            process::exit(-1);
        }
    };

    if let Err(err) = run(&cli) {
        error!("{err:#}. The program terminates.");
        process::exit(-1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut detector =
        CascadeDetector::load(&cli.cascade).context("initializing face detector")?;
    let mut source = VideoSource::open(&cli.input_video).context("opening video source")?;
    let mut writer =
        CropWriter::create(&cli.save_directory).context("preparing output directory")?;

    pipeline::run(&mut source, &mut detector, &mut writer)?;
    Ok(())
}
