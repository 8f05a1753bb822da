use crate::dump::write_placement_dump;
use crate::placement::place_labels;
use crate::scene::parse_scene;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "scatterlabel",
    version,
    about = "Place non-overlapping labels for a set of anchor points"
)]
pub struct Args {
    /// Input scene file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for placed labels (JSON). Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Write a per-candidate diagnostics dump to this path (turns on debug
    /// scoring for the pass)
    #[arg(long = "dump-diagnostics")]
    pub dump_diagnostics: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let input = read_input(args.input.as_deref())?;
    let mut scene = parse_scene(&input)?;
    if args.dump_diagnostics.is_some() {
        scene.options.debug = true;
    }

    let placement = place_labels(scene.area, &scene.anchors, &scene.options);

    let json = serde_json::to_string_pretty(&placement.labels)?;
    match &args.output {
        Some(path) => std::fs::write(path, json + "\n")?,
        None => println!("{json}"),
    }

    if let Some(path) = &args.dump_diagnostics {
        write_placement_dump(path, &placement, scene.area)?;
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
