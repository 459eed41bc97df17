//! DDA edge walking and scanline triangle traversal.

use crate::vertex::Vertex;

/// Axis a DDA walk steps along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Iterator over the integer crossings of a segment along one axis.
///
/// Yields one interpolated vertex for every integer coordinate `k` with
/// `ceil(start) <= k < end`. Every attribute is stepped by the same
/// per-unit delta, so the yielded vertices are exact linear blends.
#[derive(Debug, Clone)]
pub struct Dda {
    p: Vertex,
    step: Vertex,
    coord: f64,
    end: f64,
}

impl Iterator for Dda {
    type Item = Vertex;

    fn next(&mut self) -> Option<Vertex> {
        if self.coord >= self.end {
            return None;
        }
        let current = self.p;
        self.p += self.step;
        self.coord += 1.0;
        Some(current)
    }
}

/// Walk from `a` to `b` along `axis`, in increasing order.
///
/// Endpoints are swapped when `a` lies past `b`. A segment with no extent
/// on the axis (or a non-finite endpoint) yields nothing.
pub fn dda(a: Vertex, b: Vertex, axis: Axis) -> Dda {
    let (mut a, mut b) = (a, b);
    if a.axis(axis) > b.axis(axis) {
        std::mem::swap(&mut a, &mut b);
    }

    let (start, end) = (a.axis(axis), b.axis(axis));
    if start == end || !start.is_finite() || !end.is_finite() {
        return Dda {
            p: a,
            step: Vertex::ZERO,
            coord: 0.0,
            end: 0.0,
        };
    }

    let step = (b - a) / (end - start);
    let first = start.ceil();
    Dda {
        p: a + step * (first - start),
        step,
        coord: first,
        end,
    }
}

/// Emit every pixel-center sample covered by a screen-space triangle.
///
/// Vertices are ordered top (largest y) to bottom. The top-to-mid and
/// top-to-bottom edges bound the upper half, the mid-to-bottom edge and
/// the rest of the long edge bound the lower half. Each row is walked
/// along x between its two boundary samples.
pub fn scan_triangle(v0: Vertex, v1: Vertex, v2: Vertex, mut emit: impl FnMut(Vertex)) {
    let mut sorted = [v0, v1, v2];
    sorted.sort_by(|a, b| b.y.total_cmp(&a.y));
    let [top, mid, bottom] = sorted;

    let mut top_mid: Vec<Vertex> = dda(top, mid, Axis::Y).collect();
    let mut mid_bottom: Vec<Vertex> = dda(mid, bottom, Axis::Y).collect();
    let mut top_bottom: Vec<Vertex> = dda(top, bottom, Axis::Y).collect();

    // Walked bottom-up; rows are consumed top-down.
    top_mid.reverse();
    mid_bottom.reverse();
    top_bottom.reverse();

    for (left, right) in top_mid.iter().zip(&top_bottom) {
        dda(*left, *right, Axis::X).for_each(&mut emit);
    }

    for (left, right) in mid_bottom
        .iter()
        .zip(top_bottom.iter().skip(top_mid.len()))
    {
        dda(*left, *right, Axis::X).for_each(&mut emit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Vertex {
        Vertex::at(x, y, 0.0, 1.0)
    }

    fn expected_count(a: f64, b: f64) -> usize {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let extra = if hi.fract() != 0.0 { 1 } else { 0 };
        (hi.floor() - lo.ceil()) as usize + extra
    }

    #[test]
    fn test_degenerate_edge_emits_nothing() {
        assert_eq!(dda(pt(0.0, 3.5), pt(9.0, 3.5), Axis::Y).count(), 0);
        assert_eq!(dda(pt(2.0, 0.0), pt(2.0, 0.0), Axis::X).count(), 0);
    }

    #[test]
    fn test_sample_count_matches_ceil_and_exclusive_end() {
        for (a, b) in [
            (0.0, 4.0),
            (0.5, 4.0),
            (0.5, 4.5),
            (1.0, 1.2),
            (1.2, 1.8),
            (-2.3, 3.7),
            (7.9, 2.1),
        ] {
            let n = dda(pt(a, 0.0), pt(b, 0.0), Axis::X).count();
            assert_eq!(n, expected_count(a, b), "edge {a} -> {b}");
        }
    }

    #[test]
    fn test_samples_land_on_integers_and_interpolate() {
        let a = pt(0.5, 0.0).with_color(0.0, 0.0, 0.0, 1.0);
        let b = pt(4.5, 0.0).with_color(1.0, 0.0, 0.0, 1.0);
        let samples: Vec<Vertex> = dda(a, b, Axis::X).collect();
        let xs: Vec<f64> = samples.iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0, 4.0]);
        assert!((samples[0].r - 0.125).abs() < 1e-12);
        assert!((samples[3].r - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_direction_does_not_matter() {
        let fwd: Vec<f64> = dda(pt(0.2, 0.0), pt(3.0, 0.0), Axis::X).map(|v| v.x).collect();
        let back: Vec<f64> = dda(pt(3.0, 0.0), pt(0.2, 0.0), Axis::X).map(|v| v.x).collect();
        assert_eq!(fwd, back);
    }

    #[test]
    fn test_non_finite_edge_emits_nothing() {
        assert_eq!(dda(pt(0.0, 0.0), pt(f64::NAN, 5.0), Axis::X).count(), 0);
        assert_eq!(dda(pt(0.0, 0.0), pt(0.0, f64::INFINITY), Axis::Y).count(), 0);
    }

    #[test]
    fn test_scan_triangle_covers_each_pixel_once() {
        let mut hits = Vec::new();
        scan_triangle(pt(0.0, 0.0), pt(4.0, 0.0), pt(0.0, 4.0), |v| {
            hits.push((v.x as i32, v.y as i32));
        });

        let mut dedup = hits.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), hits.len());

        // Rows y = 0..3, row y spans x in [0, 4 - y).
        assert_eq!(hits.len(), 4 + 3 + 2 + 1);
        assert!(hits.contains(&(0, 0)));
        assert!(hits.contains(&(3, 0)));
        assert!(hits.contains(&(0, 3)));
        assert!(!hits.contains(&(4, 0)));
    }

    #[test]
    fn test_scan_triangle_vertex_order_is_irrelevant() {
        let collect = |a, b, c| {
            let mut out = Vec::new();
            scan_triangle(a, b, c, |v| out.push((v.x as i32, v.y as i32)));
            out.sort();
            out
        };
        let (a, b, c) = (pt(0.3, 0.7), pt(6.1, 2.2), pt(2.5, 5.9));
        let base = collect(a, b, c);
        assert!(!base.is_empty());
        assert_eq!(collect(b, c, a), base);
        assert_eq!(collect(c, a, b), base);
        assert_eq!(collect(b, a, c), base);
    }

    #[test]
    fn test_zero_area_triangle_emits_nothing() {
        let mut n = 0;
        scan_triangle(pt(0.0, 2.0), pt(5.0, 2.0), pt(9.0, 2.0), |_| n += 1);
        assert_eq!(n, 0);
    }
}
