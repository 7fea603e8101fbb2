//! Scanline polygon fill with an edge table and an active edge table.
//!
//! Sampling follows pixel centers: scanline row `y` samples the ordinate
//! `y + 0.5` and pixel column `x` the abscissa `x + 0.5`. An edge covers the
//! rows whose centers lie in the half-open range `[start.y, end.y)`, and a
//! span covers the columns whose centers lie in `[left.x, right.x)`. Two
//! triangles sharing an edge therefore never both draw, and never both skip,
//! a pixel on that edge.
//!
//! Per triangle:
//!
//! 1. Each edge crossing at least one row center is put into the edge table
//!    bucket of the first (on-screen) row it covers. Edges crossing none are
//!    flat; they bound no rows and are left out.
//! 2. Rows are swept from the first non-empty bucket: the bucket moves into
//!    the active edge table, active edges are sorted by x and filled pairwise,
//!    edges ending on this row retire, and the rest step to the next row.
//!
//! A triangle thin enough to cross no row center at all is drawn as a single
//! direct span so that it does not disappear.

use std::ops::{Add, Mul, Sub};

use log::trace;

use crate::color::Color;
use crate::geometry::screen_area;
use crate::point2d::Point2D;
use crate::point3d::Point3D;
use crate::screen::ScreenSpace;
use crate::triangle::{ScreenTriangle, ScreenVertex};

/// Triangles with less screen area than this are degenerate.
const MIN_AREA: f64 = 1e-12;

/// Values interpolated linearly across a triangle.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Varyings {
    pub depth: f64,
    pub position: Point3D,
    pub normal: Point3D,
    pub tangent_u: Point3D,
    pub tangent_v: Point3D,
    pub uv: Point2D,
}

impl Varyings {
    pub fn from_vertex(v: &ScreenVertex) -> Self {
        Self {
            depth: v.z,
            position: v.position,
            normal: v.normal,
            tangent_u: v.tangent_u,
            tangent_v: v.tangent_v,
            uv: v.uv,
        }
    }

    pub fn lerp(self, other: Varyings, t: f64) -> Varyings {
        self + (other - self) * t
    }
}

impl Add for Varyings {
    type Output = Varyings;
    fn add(self, o: Varyings) -> Varyings {
        Varyings {
            depth: self.depth + o.depth,
            position: self.position + o.position,
            normal: self.normal + o.normal,
            tangent_u: self.tangent_u + o.tangent_u,
            tangent_v: self.tangent_v + o.tangent_v,
            uv: self.uv + o.uv,
        }
    }
}

impl Sub for Varyings {
    type Output = Varyings;
    fn sub(self, o: Varyings) -> Varyings {
        Varyings {
            depth: self.depth - o.depth,
            position: self.position - o.position,
            normal: self.normal - o.normal,
            tangent_u: self.tangent_u - o.tangent_u,
            tangent_v: self.tangent_v - o.tangent_v,
            uv: self.uv - o.uv,
        }
    }
}

impl Mul<f64> for Varyings {
    type Output = Varyings;
    fn mul(self, s: f64) -> Varyings {
        Varyings {
            depth: self.depth * s,
            position: self.position * s,
            normal: self.normal * s,
            tangent_u: self.tangent_u * s,
            tangent_v: self.tangent_v * s,
            uv: self.uv * s,
        }
    }
}

/// A pixel that passed the depth test and is about to be shaded.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frag {
    pub x: usize,
    pub y: usize,
    pub var: Varyings,
}

/// An edge in the edge table, carrying its interpolants at the current row.
#[derive(Debug, Clone)]
struct Edge {
    /// Last row this edge covers.
    y_max: usize,
    x: f64,
    inverse_slope: f64,
    var: Varyings,
    /// Change of `var` per row.
    step: Varyings,
}

impl Edge {
    fn advance(&mut self) {
        self.x += self.inverse_slope;
        self.var = self.var + self.step;
    }
}

enum EdgeClass {
    /// Inserted into the bucket of the given row.
    Inserted { first: usize, last: usize },
    /// Covers rows, none of them on screen.
    Offscreen,
    /// Covers no row centers.
    Flat,
}

/// Reusable scanline filler. The tables are empty between calls.
#[derive(Debug, Default)]
pub struct ScanlineFiller {
    edge_table: Vec<Vec<Edge>>,
    active: Vec<Edge>,
}

impl ScanlineFiller {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no edge is left in either table.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.edge_table.iter().all(Vec::is_empty)
    }

    /// Fills `tri` into `target`, depth-testing every covered pixel.
    ///
    /// For each pixel whose interpolated depth is strictly nearer than the
    /// stored one, `shader` computes the color, and both color and depth are
    /// written. Returns the number of pixels written. Degenerate or non-finite
    /// triangles write nothing.
    pub fn fill_triangle<F>(&mut self, tri: &ScreenTriangle, target: &mut ScreenSpace, mut shader: F) -> usize
    where
        F: FnMut(&Frag) -> Color,
    {
        if is_degenerate(tri) {
            trace!("skipping degenerate triangle {tri:?}");
            return 0;
        }
        if target.width == 0 || target.height == 0 {
            return 0;
        }
        if self.edge_table.len() < target.height {
            self.edge_table.resize_with(target.height, Vec::new);
        }

        let verts = tri.vertices();
        let (crosses_rows, rows) = self.insert_edges(&verts, target.height);
        if !crosses_rows {
            return fill_sliver(&verts, target, &mut shader);
        }
        let Some(rows) = rows else {
            return 0;
        };

        let (owned, written) = self.sweep(rows, target, &mut shader, SpanRule::Centers);
        if owned {
            return written;
        }
        // Thinner than a column everywhere: one pixel per row instead.
        match self.insert_edges(&verts, target.height) {
            (_, Some(rows)) => self.sweep(rows, target, &mut shader, SpanRule::Midpoint).1,
            (_, None) => 0,
        }
    }

    /// Puts the triangle's edges into the edge table. Returns whether any
    /// edge crosses a row center, and the on-screen rows covered.
    fn insert_edges(&mut self, verts: &[ScreenVertex; 3], height: usize) -> (bool, Option<(usize, usize)>) {
        let mut rows: Option<(usize, usize)> = None;
        let mut crosses_rows = false;
        for i in 0..verts.len() {
            match self.insert_edge(&verts[i], &verts[(i + 1) % verts.len()], height) {
                EdgeClass::Inserted { first, last } => {
                    crosses_rows = true;
                    rows = Some(match rows {
                        Some((lo, hi)) => (lo.min(first), hi.max(last)),
                        None => (first, last),
                    });
                }
                EdgeClass::Offscreen => crosses_rows = true,
                EdgeClass::Flat => {}
            }
        }
        (crosses_rows, rows)
    }

    /// Sweeps rows from `first_row` until both tables are empty. Returns
    /// whether any span owned a column, on screen or not, and the number of
    /// pixels written.
    fn sweep<F>(
        &mut self,
        (first_row, last_row): (usize, usize),
        target: &mut ScreenSpace,
        shader: &mut F,
        rule: SpanRule,
    ) -> (bool, usize)
    where
        F: FnMut(&Frag) -> Color,
    {
        let mut owned = false;
        let mut written = 0;
        let mut y = first_row;
        while y <= last_row || !self.active.is_empty() {
            if let Some(bucket) = self.edge_table.get_mut(y) {
                self.active.append(bucket);
            }

            if self.active.len() >= 2 {
                self.active.sort_by(|a, b| {
                    a.x.total_cmp(&b.x).then(a.inverse_slope.total_cmp(&b.inverse_slope))
                });
                for pair in self.active.chunks_exact(2) {
                    let (span_owned, span_written) = fill_span(y, &pair[0], &pair[1], rule, target, shader);
                    owned |= span_owned;
                    written += span_written;
                }
            }

            self.active.retain(|e| e.y_max > y);
            for edge in &mut self.active {
                edge.advance();
            }
            y += 1;
        }
        (owned, written)
    }

    fn insert_edge(&mut self, v1: &ScreenVertex, v2: &ScreenVertex, height: usize) -> EdgeClass {
        let (start, end) = if v1.y <= v2.y { (v1, v2) } else { (v2, v1) };

        // Rows whose centers lie in [start.y, end.y).
        let first = (start.y - 0.5).ceil();
        let last = (end.y - 0.5).ceil() - 1.0;
        if first > last {
            return EdgeClass::Flat;
        }
        if last < 0.0 || first > (height - 1) as f64 {
            return EdgeClass::Offscreen;
        }
        let first = first.max(0.0);
        let last = last.min((height - 1) as f64);

        let dy = end.y - start.y;
        let inverse_slope = (end.x - start.x) / dy;
        let (v_start, v_end) = (Varyings::from_vertex(start), Varyings::from_vertex(end));
        let step = (v_end - v_start) * (1.0 / dy);

        // Interpolants at the center of the first row.
        let offset = first + 0.5 - start.y;
        let edge = Edge {
            y_max: last as usize,
            x: start.x + inverse_slope * offset,
            inverse_slope,
            var: v_start + step * offset,
            step,
        };
        let (first, last) = (first as usize, last as usize);
        self.edge_table[first].push(edge);
        EdgeClass::Inserted { first, last }
    }
}

/// True for triangles with non-finite coordinates or no screen area. These
/// are never rasterized.
pub fn is_degenerate(tri: &ScreenTriangle) -> bool {
    !tri.is_finite() || screen_area(tri).abs() < MIN_AREA
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum SpanRule {
    /// Columns whose centers lie in `[left, right)`.
    Centers,
    /// The one column under the midpoint.
    Midpoint,
}

/// Half-open column range owned by a span, before clipping to the canvas.
fn span_columns(left: f64, right: f64, rule: SpanRule) -> (f64, f64) {
    match rule {
        SpanRule::Centers => ((left - 0.5).ceil(), (right - 0.5).ceil()),
        SpanRule::Midpoint => {
            let x = ((left + right) * 0.5).floor();
            (x, x + 1.0)
        }
    }
}

/// Fills one span. Returns whether it owns any column and the number of
/// pixels written.
fn fill_span<F>(y: usize, left: &Edge, right: &Edge, rule: SpanRule, target: &mut ScreenSpace, shader: &mut F) -> (bool, usize)
where
    F: FnMut(&Frag) -> Color,
{
    let (first, end) = span_columns(left.x, right.x, rule);
    if !(first < end) {
        return (false, 0);
    }
    let x_start = first.max(0.0);
    let x_end = end.min(target.width as f64);
    if !(x_start < x_end) {
        return (true, 0);
    }

    let width = right.x - left.x;
    let dvar_dx = if width > 0.0 { (right.var - left.var) * (1.0 / width) } else { Varyings::default() };

    let mut written = 0;
    for x in x_start as usize..x_end as usize {
        let sample_x = (x as f64 + 0.5).max(left.x).min(right.x);
        let var = left.var + dvar_dx * (sample_x - left.x);
        written += shade_pixel(Frag { x, y, var }, target, shader);
    }
    (true, written)
}

/// Draws a triangle lying entirely between two row centers as one span on
/// the row containing its vertical midpoint. Columns follow the same center
/// rule as ordinary spans, widened to one column when it owns none.
fn fill_sliver<F>(verts: &[ScreenVertex; 3], target: &mut ScreenSpace, shader: &mut F) -> usize
where
    F: FnMut(&Frag) -> Color,
{
    let mid_y = verts.iter().map(|v| v.y).sum::<f64>() / 3.0;
    if mid_y < 0.0 || mid_y >= target.height as f64 {
        return 0;
    }
    let y = mid_y as usize;

    let left = verts.iter().min_by(|a, b| a.x.total_cmp(&b.x));
    let right = verts.iter().max_by(|a, b| a.x.total_cmp(&b.x));
    let (Some(left), Some(right)) = (left, right) else {
        return 0;
    };
    let (mut first, mut end) = span_columns(left.x, right.x, SpanRule::Centers);
    if !(first < end) {
        (first, end) = span_columns(left.x, right.x, SpanRule::Midpoint);
    }
    let x_start = first.max(0.0);
    let x_end = end.min(target.width as f64);
    if !(x_start < x_end) {
        return 0;
    }

    let (v_left, v_right) = (Varyings::from_vertex(left), Varyings::from_vertex(right));
    let width = right.x - left.x;
    let mut written = 0;
    for x in x_start as usize..x_end as usize {
        let t = if width > 0.0 { ((x as f64 + 0.5 - left.x) / width).clamp(0.0, 1.0) } else { 0.0 };
        written += shade_pixel(Frag { x, y, var: v_left.lerp(v_right, t) }, target, shader);
    }
    written
}

#[inline]
fn shade_pixel<F>(frag: Frag, target: &mut ScreenSpace, shader: &mut F) -> usize
where
    F: FnMut(&Frag) -> Color,
{
    if !target.passes_depth(frag.x, frag.y, frag.var.depth) {
        return 0;
    }
    let color = shader(&frag);
    target.set_pixel(frag.x, frag.y, color);
    target.set_depth(frag.x, frag.y, frag.var.depth);
    1
}

/// Draws a one-pixel line between two points, without depth testing.
///
/// The segment is clipped to the canvas first, so pixels are stepped at most
/// one apart however far the endpoints lie outside it.
pub fn draw_line(from: Point2D, to: Point2D, color: Color, target: &mut ScreenSpace) {
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return;
    }
    let Some((from, to)) = clip_segment(from, to, target.width as f64, target.height as f64) else {
        return;
    };
    let delta = to - from;
    let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;

    for i in 0..=steps {
        let p = from.lerp(to, i as f64 / steps as f64);
        if p.x >= 0.0 && p.y >= 0.0 {
            target.set_pixel(p.x as usize, p.y as usize, color);
        }
    }
}

/// Liang-Barsky clipping of a segment against `[0, width] × [0, height]`.
fn clip_segment(from: Point2D, to: Point2D, width: f64, height: f64) -> Option<(Point2D, Point2D)> {
    let d = to - from;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-d.x, from.x), (d.x, width - from.x), (-d.y, from.y), (d.y, height - from.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((from.lerp(to, t0), from.lerp(to, t1)))
}
