//! Draw calls: transform, clip-space normalization and pixel writes.

use std::sync::Arc;

use lumen_core::{Framebuffer, Texture};
use lumen_math::Transform;

use crate::dda::scan_triangle;
use crate::vertex::Vertex;

/// State shared by every draw call until changed.
#[derive(Clone, Default)]
pub struct DrawState {
    /// Applied to each vertex position before normalization.
    pub transform: Transform,
    /// Texture sampled at each pixel in place of the vertex color.
    pub texture: Option<Arc<Texture>>,
    /// Perspective-correct interpolation of color and texcoords.
    pub hyperbolic: bool,
}

/// Rasterize one triangle. Returns the number of pixels written.
///
/// Triangles with a vertex at `w == 0` after transformation are skipped.
pub fn draw_triangle(fb: &mut Framebuffer, state: &DrawState, tri: [Vertex; 3]) -> usize {
    let clip = tri.map(|v| v.transform(&state.transform));
    if clip.iter().any(|v| v.w == 0.0) {
        log::debug!("Skipping triangle with a vertex at w = 0");
        return 0;
    }

    let (width, height) = (fb.width() as f64, fb.height() as f64);
    let [a, b, c] = clip.map(|v| v.normalize_to_screen(width, height, state.hyperbolic));

    let texture = state.texture.as_deref();
    let mut written = 0;
    scan_triangle(a, b, c, |sample| {
        let v = sample.undo_perspective(state.hyperbolic);
        if fb.write_fragment(&v.to_fragment(), texture) {
            written += 1;
        }
    });
    written
}

/// Rasterize `count / 3` triangles from consecutive vertices at `first`.
///
/// Triangles that reach past the end of `vertices` are skipped.
pub fn draw_arrays(
    fb: &mut Framebuffer,
    state: &DrawState,
    vertices: &[Vertex],
    first: usize,
    count: usize,
) -> usize {
    let mut written = 0;
    let mut drawn = 0;
    let triangles = count / 3;
    for tri in 0..triangles {
        let base = first.saturating_add(tri.saturating_mul(3));
        let end = base.saturating_add(3);
        match vertices.get(base..end) {
            Some(&[a, b, c]) => {
                written += draw_triangle(fb, state, [a, b, c]);
                drawn += 1;
            }
            _ => {
                log::warn!(
                    "drawArraysTriangles: skipping {} triangles from vertex {} ({} vertices)",
                    triangles - tri,
                    base,
                    vertices.len()
                );
                break;
            }
        }
    }
    log::debug!("drawArraysTriangles: {} triangles, {} pixels", drawn, written);
    written
}

/// Rasterize `count / 3` triangles indexed by `elements[offset..offset + count]`.
///
/// Triangles whose element range or vertex indices fall out of range are
/// skipped.
pub fn draw_elements(
    fb: &mut Framebuffer,
    state: &DrawState,
    vertices: &[Vertex],
    elements: &[usize],
    count: usize,
    offset: usize,
) -> usize {
    let mut written = 0;
    let mut drawn = 0;
    let triangles = count / 3;
    for tri in 0..triangles {
        let base = offset.saturating_add(tri.saturating_mul(3));
        if base.saturating_add(3) > elements.len() {
            log::warn!(
                "drawElementsTriangles: skipping {} triangles from element {} ({} elements)",
                triangles - tri,
                base,
                elements.len()
            );
            break;
        }
        let resolved = match elements.get(base..base.saturating_add(3)) {
            Some(&[i, j, k]) => vertices
                .get(i)
                .zip(vertices.get(j))
                .zip(vertices.get(k))
                .map(|((a, b), c)| [*a, *b, *c]),
            _ => None,
        };
        match resolved {
            Some(corners) => {
                written += draw_triangle(fb, state, corners);
                drawn += 1;
            }
            None => log::warn!(
                "drawElementsTriangles: triangle at element {} out of range",
                base
            ),
        }
    }
    log::debug!("drawElementsTriangles: {} triangles, {} pixels", drawn, written);
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::Rgba8;

    fn fb(w: u32, h: u32) -> Framebuffer {
        Framebuffer::new(w, h).unwrap()
    }

    fn full_screen_tri(z: f64, rgb: [f64; 3]) -> [Vertex; 3] {
        let [r, g, b] = rgb;
        [
            Vertex::at(-1.0, -1.0, z, 1.0).with_color(r, g, b, 1.0),
            Vertex::at(3.0, -1.0, z, 1.0).with_color(r, g, b, 1.0),
            Vertex::at(-1.0, 3.0, z, 1.0).with_color(r, g, b, 1.0),
        ]
    }

    #[test]
    fn test_full_screen_triangle_fills_target() {
        let mut target = fb(8, 8);
        let n = draw_triangle(&mut target, &DrawState::default(), full_screen_tri(0.0, [0.0, 1.0, 0.0]));
        assert_eq!(n, 64);
        assert!(target
            .pixels()
            .iter()
            .all(|p| *p == Rgba8::new(0, 255, 0, 255)));
    }

    #[test]
    fn test_depth_picks_closer_triangle_in_any_order() {
        let near = full_screen_tri(-0.5, [1.0, 0.0, 0.0]);
        let far = full_screen_tri(0.5, [0.0, 0.0, 1.0]);
        let red = Rgba8::new(255, 0, 0, 255);

        for order in [[near, far], [far, near]] {
            let mut target = fb(4, 4);
            target.enable_depth_test();
            for tri in order {
                draw_triangle(&mut target, &DrawState::default(), tri);
            }
            assert_eq!(target.get(2, 2), Some(red));
            assert_eq!(target.depth_at(2, 2), Some(-0.5));
        }
    }

    #[test]
    fn test_zero_w_triangle_is_skipped() {
        let mut target = fb(4, 4);
        let mut tri = full_screen_tri(0.0, [1.0, 1.0, 1.0]);
        tri[1].w = 0.0;
        assert_eq!(draw_triangle(&mut target, &DrawState::default(), tri), 0);
        assert!(target.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_transform_moves_geometry() {
        // Small triangle in the lower-left quadrant, pushed right by one
        // clip unit so it lands in the lower-right quadrant.
        let tri = [
            Vertex::at(-1.0, -1.0, 0.0, 1.0).with_color(1.0, 1.0, 1.0, 1.0),
            Vertex::at(-0.1, -1.0, 0.0, 1.0).with_color(1.0, 1.0, 1.0, 1.0),
            Vertex::at(-1.0, -0.1, 0.0, 1.0).with_color(1.0, 1.0, 1.0, 1.0),
        ];
        let state = DrawState {
            transform: Transform::translation(1.0, 0.0, 0.0),
            ..DrawState::default()
        };
        let mut target = fb(10, 10);
        draw_triangle(&mut target, &state, tri);
        assert_eq!(target.get(0, 0), Some(Rgba8::TRANSPARENT));
        assert_eq!(target.get(5, 0), Some(Rgba8::new(255, 255, 255, 255)));
    }

    #[test]
    fn test_hyperbolic_interpolation_differs_from_linear() {
        // Right edge is twice as far away (w = 2), so with perspective
        // correction the midpoint color is pulled toward the near side.
        let tri = [
            Vertex::at(-1.0, -1.0, 0.0, 1.0).with_color(0.0, 0.0, 0.0, 1.0),
            Vertex::at(2.0, -2.0, 0.0, 2.0).with_color(1.0, 0.0, 0.0, 1.0),
            Vertex::at(-1.0, 3.0, 0.0, 1.0).with_color(0.0, 0.0, 0.0, 1.0),
        ];
        let mut linear = fb(16, 16);
        let mut hyper = fb(16, 16);
        draw_triangle(&mut linear, &DrawState::default(), tri);
        draw_triangle(
            &mut hyper,
            &DrawState {
                hyperbolic: true,
                ..DrawState::default()
            },
            tri,
        );
        let l = linear.get(8, 0).unwrap().r;
        let h = hyper.get(8, 0).unwrap().r;
        assert!(h < l, "hyperbolic {h} should be darker than linear {l}");
    }

    #[test]
    fn test_texture_replaces_color() {
        let state = DrawState {
            texture: Some(Arc::new(Texture::solid_color([9, 8, 7, 255]))),
            ..DrawState::default()
        };
        let mut target = fb(4, 4);
        draw_triangle(&mut target, &state, full_screen_tri(0.0, [1.0, 1.0, 1.0]));
        assert_eq!(target.get(1, 1), Some(Rgba8::new(9, 8, 7, 255)));
    }

    #[test]
    fn test_draw_arrays_skips_out_of_range() {
        let verts: Vec<Vertex> = full_screen_tri(0.0, [1.0, 1.0, 1.0]).to_vec();
        let mut target = fb(4, 4);
        // Second triangle would read vertices 3..6.
        let n = draw_arrays(&mut target, &DrawState::default(), &verts, 0, 6);
        assert_eq!(n, 16);
        assert_eq!(draw_arrays(&mut target, &DrawState::default(), &verts, 1, 3), 0);
    }

    #[test]
    fn test_draw_arrays_huge_range_is_skipped() {
        let verts = full_screen_tri(0.0, [1.0, 1.0, 1.0]);
        let state = DrawState::default();
        let mut target = fb(4, 4);

        assert_eq!(draw_arrays(&mut target, &state, &verts, usize::MAX, 3), 0);
        assert_eq!(draw_arrays(&mut target, &state, &verts, usize::MAX - 1, usize::MAX), 0);
        assert_eq!(target.get(0, 0), Some(Rgba8::TRANSPARENT));
        // Stops after the first in-range triangle instead of walking the rest.
        assert_eq!(draw_arrays(&mut target, &state, &verts, 0, usize::MAX), 16);
    }

    #[test]
    fn test_draw_elements_huge_range_is_skipped() {
        let verts = full_screen_tri(0.0, [1.0, 1.0, 1.0]);
        let elements = [0, 1, 2];
        let state = DrawState::default();
        let mut target = fb(4, 4);

        assert_eq!(
            draw_elements(&mut target, &state, &verts, &elements, 3, usize::MAX),
            0
        );
        assert_eq!(
            draw_elements(&mut target, &state, &verts, &elements, usize::MAX, 0),
            16
        );
    }

    #[test]
    fn test_draw_elements_resolves_indices() {
        let mut verts: Vec<Vertex> = full_screen_tri(0.0, [0.0, 0.0, 1.0]).to_vec();
        verts.insert(0, Vertex::default());
        let elements = [9, 1, 2, 3, 1, 2, 40];
        let mut target = fb(4, 4);
        let state = DrawState::default();

        assert_eq!(draw_elements(&mut target, &state, &verts, &elements, 3, 1), 16);
        assert_eq!(target.get(3, 3), Some(Rgba8::new(0, 0, 255, 255)));

        // Element 40 and element 9 are not vertices, offset 5 runs off the end.
        let mut untouched = fb(4, 4);
        assert_eq!(draw_elements(&mut untouched, &state, &verts, &elements, 3, 4), 0);
        assert_eq!(draw_elements(&mut untouched, &state, &verts, &elements, 3, 0), 0);
        assert_eq!(draw_elements(&mut untouched, &state, &verts, &elements, 3, 5), 0);
    }
}
