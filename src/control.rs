use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::error::ControlGridError;
use crate::point3d::Point3D;

pub const GRID_SIZE: usize = 4;

/// The 4×4 grid of control points defining a bicubic Bézier patch.
///
/// `points[i][j]`: `i` runs along the surface's u direction, `j` along v.
/// Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlGrid {
    points: [[Point3D; GRID_SIZE]; GRID_SIZE],
}

impl ControlGrid {
    pub fn new(points: [[Point3D; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { points }
    }

    /// Builds a grid by evaluating `f(i, j)` at every position.
    pub fn from_fn(f: impl Fn(usize, usize) -> Point3D) -> Self {
        Self::new(std::array::from_fn(|i| std::array::from_fn(|j| f(i, j))))
    }

    /// Built-in saddle-like patch: a regular grid in x/y with heights
    /// alternating ±0.5.
    pub fn saddle() -> Self {
        Self::from_fn(|i, j| Point3D {
            x: i as f64 - 1.5,
            y: j as f64 - 1.5,
            z: if (i + j) % 2 == 0 { 0.5 } else { -0.5 },
        })
    }

    /// A flat square at z = 0 spanning [-half, half] in x and y.
    pub fn plane(half: f64) -> Self {
        let step = 2.0 * half / (GRID_SIZE - 1) as f64;
        Self::from_fn(|i, j| Point3D {
            x: -half + i as f64 * step,
            y: -half + j as f64 * step,
            z: 0.0,
        })
    }

    pub fn points(&self) -> &[[Point3D; GRID_SIZE]; GRID_SIZE] {
        &self.points
    }

    pub fn point(&self, i: usize, j: usize) -> Point3D {
        self.points[i][j]
    }

    /// Reads a control grid from a file, see [`ControlGrid::parse`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ControlGridError> {
        let path = path.as_ref();
        let io_err = |source| ControlGridError::Io { path: path.to_path_buf(), source };
        let file = File::open(path).map_err(io_err)?;
        let reader = BufReader::new(file);

        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line.map_err(io_err)?);
        }
        Self::parse(&lines.join("\n"))
    }

    /// Parses 16 points, one `x y z` triple per line in row-major order.
    ///
    /// Coordinates may be separated by whitespace or commas. Blank lines and
    /// lines starting with `#` are ignored.
    pub fn parse(text: &str) -> Result<Self, ControlGridError> {
        let mut parsed: Vec<Point3D> = Vec::with_capacity(GRID_SIZE * GRID_SIZE);

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .collect();
            if tokens.len() != 3 {
                return Err(ControlGridError::FieldCount { line: line_no, found: tokens.len() });
            }

            let mut coords = [0.0; 3];
            for (coord, token) in coords.iter_mut().zip(&tokens) {
                *coord = parse_coordinate(line_no, token)?;
            }
            parsed.push(Point3D::new(coords[0], coords[1], coords[2]));
        }

        if parsed.len() != GRID_SIZE * GRID_SIZE {
            return Err(ControlGridError::PointCount { found: parsed.len() });
        }
        Ok(Self::from_fn(|i, j| parsed[i * GRID_SIZE + j]))
    }
}

impl Default for ControlGrid {
    fn default() -> Self {
        Self::saddle()
    }
}

impl FromStr for ControlGrid {
    type Err = ControlGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_coordinate(line: usize, token: &str) -> Result<f64, ControlGridError> {
    let value: f64 = token
        .parse()
        .map_err(|_| ControlGridError::InvalidNumber { line, token: token.to_string() })?;
    if !value.is_finite() {
        return Err(ControlGridError::NonFinite { line, token: token.to_string() });
    }
    Ok(value)
}
