//! Raster script state and command handlers.

use std::path::Path;

use lumen_core::{Framebuffer, TextureCache};
use lumen_math::Transform;
use lumen_raster::{draw_arrays, draw_elements, DrawState, Vertex};

use crate::command::Command;
use crate::error::{ScriptError, ScriptResult};

/// Everything a raster script builds up between commands.
pub struct RasterContext {
    target: Option<(Framebuffer, String)>,
    vertices: Vec<Vertex>,
    elements: Vec<usize>,
    state: DrawState,
    depth_test: bool,
    srgb: bool,
    textures: TextureCache,
}

impl RasterContext {
    /// Texture paths are resolved against `base_dir`.
    pub fn new(base_dir: &Path) -> Self {
        Self {
            target: None,
            vertices: Vec::new(),
            elements: Vec::new(),
            state: DrawState::default(),
            depth_test: false,
            srgb: false,
            textures: TextureCache::with_base_dir(base_dir),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// The render target and output name, once `png` has run.
    pub fn into_target(self) -> Option<(Framebuffer, String)> {
        self.target
    }

    pub fn execute(&mut self, cmd: &Command<'_>) -> ScriptResult<()> {
        match cmd.keyword {
            "png" => self.png(cmd),
            "position" => self.attribute(cmd, 2..=4, Vertex::set_position),
            "color" => self.attribute(cmd, 3..=4, Vertex::set_color),
            "texcoord" => self.attribute(cmd, 2..=2, Vertex::set_texcoord),
            "elements" => {
                self.elements = cmd.args_from(0)?;
                log::debug!("Parsed {} elements", self.elements.len());
                Ok(())
            }
            "drawArraysTriangles" => {
                cmd.expect_args(2)?;
                let (first, count) = (cmd.arg(0)?, cmd.arg(1)?);
                let Some((fb, _)) = self.target.as_mut() else {
                    return Err(missing_target(cmd));
                };
                draw_arrays(fb, &self.state, &self.vertices, first, count);
                Ok(())
            }
            "drawElementsTriangles" => {
                cmd.expect_args(2)?;
                let (count, offset) = (cmd.arg(0)?, cmd.arg(1)?);
                let Some((fb, _)) = self.target.as_mut() else {
                    return Err(missing_target(cmd));
                };
                draw_elements(fb, &self.state, &self.vertices, &self.elements, count, offset);
                Ok(())
            }
            "depth" => {
                self.depth_test = true;
                if let Some((fb, _)) = self.target.as_mut() {
                    fb.enable_depth_test();
                }
                Ok(())
            }
            "sRGB" => {
                self.srgb = true;
                if let Some((fb, _)) = self.target.as_mut() {
                    fb.enable_srgb();
                }
                Ok(())
            }
            "hyp" => {
                self.state.hyperbolic = true;
                Ok(())
            }
            "uniformMatrix" => {
                let values: [f64; 16] = cmd.floats()?;
                self.state.transform = Transform::from_row_major(&values)
                    .ok_or_else(|| cmd.malformed("expected 16 matrix entries"))?;
                Ok(())
            }
            "texture" => {
                cmd.expect_args(1)?;
                self.state.texture = Some(self.textures.load(cmd.args[0])?);
                Ok(())
            }
            other => {
                log::debug!("line {}: ignoring unknown command '{}'", cmd.line, other);
                Ok(())
            }
        }
    }

    fn png(&mut self, cmd: &Command<'_>) -> ScriptResult<()> {
        cmd.expect_args(3)?;
        let (width, height): (u32, u32) = (cmd.arg(0)?, cmd.arg(1)?);
        let mut fb = Framebuffer::new(width, height)?;
        if self.depth_test {
            fb.enable_depth_test();
        }
        if self.srgb {
            fb.enable_srgb();
        }
        log::info!("Creating {}x{} raster target -> {}", width, height, cmd.args[2]);
        self.target = Some((fb, cmd.args[2].to_string()));
        Ok(())
    }

    /// `keyword N v0 v1 ...`: write groups of `N` values into successive
    /// vertices, growing the vertex list as needed.
    fn attribute(
        &mut self,
        cmd: &Command<'_>,
        dims: std::ops::RangeInclusive<usize>,
        set: fn(&mut Vertex, &[f64]),
    ) -> ScriptResult<()> {
        let n: usize = cmd.arg(0)?;
        if !dims.contains(&n) {
            return Err(cmd.malformed(format!(
                "size {} not in {}..={}",
                n,
                dims.start(),
                dims.end()
            )));
        }
        let values: Vec<f64> = cmd.args_from(1)?;
        if values.len() % n != 0 {
            log::warn!(
                "line {}: {} trailing values ignored",
                cmd.line,
                values.len() % n
            );
        }

        for (i, group) in values.chunks_exact(n).enumerate() {
            if i == self.vertices.len() {
                self.vertices.push(Vertex::default());
            }
            set(&mut self.vertices[i], group);
        }
        log::debug!("{}: {} vertices", cmd.keyword, values.len() / n);
        Ok(())
    }
}

fn missing_target(cmd: &Command<'_>) -> ScriptError {
    ScriptError::MissingTarget {
        line: cmd.line,
        command: cmd.keyword.to_string(),
    }
}
