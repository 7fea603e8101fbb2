//! Frame driver: tessellate (cached), transform, rasterize, shade.

use std::ops::AddAssign;
use std::time::{Duration, Instant};

use log::debug;

use crate::config::FrameConfig;
use crate::control::ControlGrid;
use crate::error::{MapKind, RenderError};
use crate::geometry::triangle_to_screen;
use crate::mesh::Mesh;
use crate::point2d::Point2D;
use crate::raster::{ScanlineFiller, draw_line, is_degenerate};
use crate::screen::ScreenSpace;
use crate::shading::{MaterialSource, NormalSource, PhongShader};
use crate::surface::BezierSurface;
use crate::texture::{NormalMap, Texture};
use crate::transform::Transform;
use crate::triangle::ScreenTriangle;

/// Optional pre-decoded maps sampled when the matching mode is enabled.
#[derive(Debug, Clone, Default)]
pub struct SurfaceMaps {
    pub texture: Option<Texture>,
    pub normal_map: Option<NormalMap>,
}

/// What a single frame did.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Triangles handed to the scanline filler.
    pub triangles_rasterized: usize,
    /// Triangles dropped at projection or as degenerate.
    pub triangles_skipped: usize,
    /// Pixels that passed the depth test and were shaded.
    pub fragments_shaded: usize,
    pub mesh_regenerated: bool,
    pub time: Duration,
}

impl AddAssign for FrameStats {
    fn add_assign(&mut self, other: FrameStats) {
        self.triangles_rasterized += other.triangles_rasterized;
        self.triangles_skipped += other.triangles_skipped;
        self.fragments_shaded += other.fragments_shaded;
        self.mesh_regenerated |= other.mesh_regenerated;
        self.time += other.time;
    }
}

/// Renders one Bézier patch frame by frame into an owned pixel buffer.
///
/// The only state kept between frames is the tessellated mesh (keyed on
/// resolution), the reusable edge tables and the buffers themselves. The
/// buffers are overwritten in full every frame.
pub struct Renderer {
    surface: BezierSurface,
    mesh: Option<Mesh>,
    transform: Transform,
    filler: ScanlineFiller,
    projected: Vec<ScreenTriangle>,
    screen: ScreenSpace,
}

impl Renderer {
    pub fn new(grid: ControlGrid) -> Self {
        Self {
            surface: BezierSurface::new(grid),
            mesh: None,
            transform: Transform::identity(),
            filler: ScanlineFiller::new(),
            projected: Vec::new(),
            screen: ScreenSpace::new(0, 0),
        }
    }

    pub fn surface(&self) -> &BezierSurface {
        &self.surface
    }

    /// The cached mesh, if a frame has been rendered.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// The last completed frame.
    pub fn screen(&self) -> &ScreenSpace {
        &self.screen
    }

    /// Renders one frame.
    ///
    /// Fails before touching the buffers if `config` is out of range or a
    /// mapping mode is enabled without its map.
    pub fn render(&mut self, config: &FrameConfig, maps: &SurfaceMaps) -> Result<FrameStats, RenderError> {
        let frame_start = Instant::now();
        config.validate()?;

        let normals = if config.mode.normal_map {
            let map = maps.normal_map.as_ref().ok_or(RenderError::MissingMap(MapKind::NormalMap))?;
            NormalSource::Mapped(map, config.texture_filter)
        } else {
            NormalSource::Geometric
        };
        let material = if config.mode.texture {
            let texture = maps.texture.as_ref().ok_or(RenderError::MissingMap(MapKind::Texture))?;
            MaterialSource::Textured(texture, config.texture_filter)
        } else {
            MaterialSource::Solid(config.object_color)
        };
        let shader = PhongShader { params: config.phong_parameters(), normals, material };

        self.screen.resize(config.canvas_width, config.canvas_height, config.background);

        let mesh_regenerated = !matches!(&self.mesh, Some(m) if m.resolution == config.resolution);
        if mesh_regenerated {
            debug!("regenerating mesh at resolution {}", config.resolution);
            self.mesh = Some(Mesh::generate(&self.surface, config.resolution));
        } else {
            debug!("reusing cached mesh at resolution {}", config.resolution);
        }
        let mesh = self.mesh.get_or_insert_with(|| Mesh::generate(&self.surface, config.resolution));

        let mut stats = FrameStats { mesh_regenerated, ..FrameStats::default() };

        // Transform runs every frame; only tessellation is cached.
        self.transform.update_transform(config.rotation_alpha, config.rotation_beta);
        let resolution = Point2D::new(config.canvas_width as f64, config.canvas_height as f64);
        self.projected.clear();
        for tri in &mesh.triangles {
            match triangle_to_screen(tri, &self.transform, &config.camera, resolution) {
                Some(screen_tri) if !is_degenerate(&screen_tri) => self.projected.push(screen_tri),
                _ => stats.triangles_skipped += 1,
            }
        }

        if config.mode.filled {
            for tri in &self.projected {
                stats.fragments_shaded += self.filler.fill_triangle(tri, &mut self.screen, |frag| shader.shade(frag));
                stats.triangles_rasterized += 1;
            }
        }

        if config.mode.wireframe {
            for tri in &self.projected {
                let [a, b, c] = tri.vertices().map(|v| Point2D::new(v.x, v.y));
                for (from, to) in [(a, b), (b, c), (c, a)] {
                    draw_line(from, to, config.wireframe_color, &mut self.screen);
                }
            }
        }

        stats.time = frame_start.elapsed();
        Ok(stats)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(ControlGrid::default())
    }
}
