//! Software renderer for a single bicubic Bézier patch.
//!
//! A [`ControlGrid`] defines the surface, which is tessellated into a
//! [`Mesh`], rotated and projected, then filled with an edge-table scanline
//! rasterizer into a [`ScreenSpace`] holding color and depth. Pixels are lit
//! with the Phong model, optionally sampling a texture and a normal map.
//! [`Renderer`] drives one frame at a time from a [`FrameConfig`].

pub mod approx;

pub mod camera;
pub mod color;
pub mod config;
pub mod control;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod point2d;
pub mod point3d;
pub mod raster;
pub mod renderer;
pub mod screen;
pub mod shading;
pub mod surface;
pub mod texture;
pub mod transform;
pub mod triangle;

pub use camera::Camera;
pub use color::Color;
pub use config::{FrameConfig, LightAnimation, RenderMode};
pub use control::ControlGrid;
pub use error::{ConfigError, ControlGridError, MapKind, RenderError, TextureError};
pub use mesh::Mesh;
pub use point2d::Point2D;
pub use point3d::Point3D;
pub use renderer::{FrameStats, Renderer, SurfaceMaps};
pub use screen::ScreenSpace;
pub use surface::BezierSurface;
pub use texture::{NormalMap, Texture, TextureFilter};
