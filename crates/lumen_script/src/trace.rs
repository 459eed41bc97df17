//! Trace script state and command handlers.

use lumen_core::Framebuffer;
use lumen_math::DVec3;
use lumen_tracer::{
    render, Camera, Color, Light, Material, Plane, Projection, RenderConfig, Scene, Sphere,
    Triangle,
};

use crate::command::Command;
use crate::error::{ScriptError, ScriptResult};

/// Scene, camera and output settings collected from a trace script.
pub struct TraceContext {
    target: Option<(u32, u32, String)>,
    scene: Scene,
    vertices: Vec<DVec3>,
    material: Material,
    eye: DVec3,
    forward: DVec3,
    up: DVec3,
    projection: Projection,
    config: RenderConfig,
}

impl Default for TraceContext {
    fn default() -> Self {
        Self {
            target: None,
            scene: Scene::new(),
            vertices: Vec::new(),
            material: Material::WHITE,
            eye: DVec3::ZERO,
            forward: DVec3::new(0.0, 0.0, -1.0),
            up: DVec3::Y,
            projection: Projection::Classic,
            config: RenderConfig::default(),
        }
    }
}

impl TraceContext {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.eye, self.forward, self.up, self.projection)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn execute(&mut self, cmd: &Command<'_>) -> ScriptResult<()> {
        match cmd.keyword {
            "png" => {
                cmd.expect_args(3)?;
                let (width, height): (u32, u32) = (cmd.arg(0)?, cmd.arg(1)?);
                if width == 0 || height == 0 {
                    return Err(cmd.malformed("image size must be non-zero"));
                }
                self.target = Some((width, height, cmd.args[2].to_string()));
            }
            "color" => {
                let [r, g, b] = cmd.floats()?;
                self.material = Material::new(Color::new(r, g, b));
            }
            "sphere" => {
                let [x, y, z, r] = cmd.floats()?;
                self.scene
                    .add(Sphere::new(DVec3::new(x, y, z), r, self.material));
            }
            "plane" => {
                let [a, b, c, d] = cmd.floats()?;
                let plane = Plane::new(a, b, c, d, self.material);
                if plane.is_degenerate() {
                    log::warn!("line {}: plane has no normal and will never be hit", cmd.line);
                }
                self.scene.add(plane);
            }
            "xyz" => {
                let [x, y, z] = cmd.floats()?;
                self.vertices.push(DVec3::new(x, y, z));
            }
            "tri" => {
                cmd.expect_args(3)?;
                let mut corners = [DVec3::ZERO; 3];
                for (i, corner) in corners.iter_mut().enumerate() {
                    let index: i64 = cmd.arg(i)?;
                    *corner = self.vertex(index).ok_or_else(|| {
                        cmd.malformed(format!(
                            "vertex {} out of range ({} vertices)",
                            index,
                            self.vertices.len()
                        ))
                    })?;
                }
                let [a, b, c] = corners;
                self.scene.add(Triangle::new(a, b, c, self.material));
            }
            "sun" => {
                let [x, y, z] = cmd.floats()?;
                self.scene
                    .add_light(Light::directional(DVec3::new(x, y, z), self.material.diffuse));
            }
            "bulb" => {
                let [x, y, z] = cmd.floats()?;
                self.scene
                    .add_light(Light::point(DVec3::new(x, y, z), self.material.diffuse));
            }
            "expose" => {
                let [v] = cmd.floats()?;
                self.config.exposure = Some(v);
            }
            "eye" => self.eye = DVec3::from_array(cmd.floats()?),
            "forward" => self.forward = DVec3::from_array(cmd.floats()?),
            "up" => self.up = DVec3::from_array(cmd.floats()?),
            "fisheye" => self.projection = Projection::Fisheye,
            "panorama" => self.projection = Projection::Panorama,
            other => {
                log::debug!("line {}: ignoring unknown command '{}'", cmd.line, other);
            }
        }
        Ok(())
    }

    /// Resolve a 1-based vertex index; negative indices count from the end.
    fn vertex(&self, index: i64) -> Option<DVec3> {
        let len = self.vertices.len() as i64;
        let i = match index {
            i if i > 0 => i - 1,
            i if i < 0 => len + i,
            _ => return None,
        };
        usize::try_from(i)
            .ok()
            .and_then(|i| self.vertices.get(i).copied())
    }

    /// Trace the collected scene into a new framebuffer.
    pub fn finish(self) -> ScriptResult<(Framebuffer, String)> {
        let (width, height, name) = self.target.clone().ok_or(ScriptError::NoTarget)?;
        let mut fb = Framebuffer::new(width, height)?;
        render(&self.scene, &self.camera(), &mut fb, &self.config);
        Ok((fb, name))
    }
}
