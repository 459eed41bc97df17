// Render a Lumen scene script to PNG.
// Run with: cargo run --release --bin lumen -- <input.txt> [--raster|--trace] [-o out.png]

use anyhow::{bail, Context, Result};
use lumen_script::ScriptMode;
use lumen_tracer::RenderConfig;
use std::env;
use std::path::PathBuf;

const USAGE: &str = "Usage: lumen <input.txt> [--raster | --trace] [--sequential] [-o <output.png>]";

#[derive(Debug, PartialEq)]
struct Args {
    input: PathBuf,
    mode: Option<ScriptMode>,
    output: Option<PathBuf>,
    parallel: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut input = None;
    let mut mode = None;
    let mut output = None;
    let mut parallel = true;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--raster" => mode = Some(ScriptMode::Raster),
            "--trace" => mode = Some(ScriptMode::Trace),
            "--sequential" => parallel = false,
            "-o" | "--output" => {
                let path = args.next().context("-o needs a file name")?;
                output = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => bail!("unknown option '{}'\n{}", flag, USAGE),
            path => {
                if input.is_some() {
                    bail!("more than one input file\n{}", USAGE);
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    Ok(Args {
        input: input.context(USAGE)?,
        mode,
        output,
        parallel,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = parse_args(env::args().skip(1))?;
    log::info!("Reading {}", args.input.display());

    let config = RenderConfig {
        parallel: args.parallel,
        ..RenderConfig::default()
    };
    let rendered = lumen_script::run_file(&args.input, args.mode, config)
        .with_context(|| format!("Failed to render {}", args.input.display()))?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&rendered.output));
    rendered
        .framebuffer
        .save_png(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["scene.txt"]).unwrap();
        assert_eq!(
            args,
            Args {
                input: PathBuf::from("scene.txt"),
                mode: None,
                output: None,
                parallel: true,
            }
        );
    }

    #[test]
    fn test_flags() {
        let args = parse(&["--trace", "scene.txt", "-o", "out.png", "--sequential"]).unwrap();
        assert_eq!(args.mode, Some(ScriptMode::Trace));
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
        assert!(!args.parallel);
    }

    #[test]
    fn test_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.txt", "b.txt"]).is_err());
        assert!(parse(&["a.txt", "-o"]).is_err());
        assert!(parse(&["a.txt", "--vector"]).is_err());
    }
}
