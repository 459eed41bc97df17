//! Lumen scene-description language.
//!
//! A script is a sequence of whitespace-separated commands, one per line.
//! Raster scripts feed vertices and draw calls to [`lumen_raster`]; trace
//! scripts describe primitives, lights and a camera for [`lumen_tracer`].
//! Both produce a [`Framebuffer`] plus the output file name from `png`.
//!
//! Malformed lines are logged and skipped. Missing textures, I/O failures
//! and scripts with no `png` target abort the run.

mod command;
mod error;
mod raster;
mod trace;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use lumen_core::Framebuffer;
use lumen_tracer::RenderConfig;

pub use command::{tokenize, Command};
pub use error::{ScriptError, ScriptResult};
pub use raster::RasterContext;
pub use trace::TraceContext;

/// Keywords that only appear in trace scripts.
const TRACE_KEYWORDS: &[&str] = &[
    "sphere", "plane", "xyz", "tri", "sun", "bulb", "expose", "eye", "forward", "up", "fisheye",
    "panorama",
];

/// Which renderer a script drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMode {
    Raster,
    Trace,
}

impl ScriptMode {
    /// Trace if any trace-only keyword appears, raster otherwise.
    pub fn detect(source: &str) -> Self {
        if tokenize(source).any(|cmd| TRACE_KEYWORDS.contains(&cmd.keyword)) {
            ScriptMode::Trace
        } else {
            ScriptMode::Raster
        }
    }
}

impl fmt::Display for ScriptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptMode::Raster => write!(f, "raster"),
            ScriptMode::Trace => write!(f, "trace"),
        }
    }
}

impl FromStr for ScriptMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raster" => Ok(ScriptMode::Raster),
            "trace" => Ok(ScriptMode::Trace),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

/// A finished render and the file name the script asked for.
pub struct Rendered {
    pub framebuffer: Framebuffer,
    pub output: String,
    pub mode: ScriptMode,
}

/// Run a script held in memory.
///
/// `base_dir` resolves relative texture paths. `mode` overrides detection.
pub fn run(
    source: &str,
    base_dir: &Path,
    mode: Option<ScriptMode>,
    config: RenderConfig,
) -> ScriptResult<Rendered> {
    let mode = mode.unwrap_or_else(|| ScriptMode::detect(source));
    log::info!("Running {} script", mode);

    let (framebuffer, output) = match mode {
        ScriptMode::Raster => {
            let mut ctx = RasterContext::new(base_dir);
            execute_all(source, |cmd| ctx.execute(cmd))?;
            ctx.into_target().ok_or(ScriptError::NoTarget)?
        }
        ScriptMode::Trace => {
            let mut ctx = TraceContext::new(config);
            execute_all(source, |cmd| ctx.execute(cmd))?;
            ctx.finish()?
        }
    };

    Ok(Rendered {
        framebuffer,
        output,
        mode,
    })
}

/// Read and run a script file; textures resolve next to the file.
pub fn run_file(
    path: impl AsRef<Path>,
    mode: Option<ScriptMode>,
    config: RenderConfig,
) -> ScriptResult<Rendered> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    run(&source, base_dir, mode, config)
}

fn execute_all(
    source: &str,
    mut execute: impl FnMut(&Command<'_>) -> ScriptResult<()>,
) -> ScriptResult<()> {
    let mut skipped = 0;
    for cmd in tokenize(source) {
        match execute(&cmd) {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::warn!("Skipping: {}", e);
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        log::warn!("{} lines skipped", skipped);
    }
    Ok(())
}
