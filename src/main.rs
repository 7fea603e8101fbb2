// External crates
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rayon::prelude::*;

// STD library
use std::path::{Path, PathBuf};
use std::time::Instant;

// Internal imports
use bezier_rusterizer::{
    Camera, Color, ControlGrid, FrameConfig, FrameStats, NormalMap, Point3D, RenderMode, Renderer,
    SurfaceMaps, Texture, TextureFilter,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Filter {
    Nearest,
    Bilinear,
}

impl From<Filter> for TextureFilter {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => TextureFilter::Nearest,
            Filter::Bilinear => TextureFilter::Bilinear,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bezier-rusterizer")]
#[command(about = "Scanline renderer for a bicubic Bézier patch", long_about = None)]
struct Cli {
    /// Control-point file: 16 "x y z" lines, row-major (built-in saddle if omitted)
    control_points: Option<PathBuf>,

    /// Output PNG; with --frames > 1 a frame number is appended to the stem
    #[arg(short, long, default_value = "surface.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 800)]
    width: usize,

    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Tessellation resolution (cells per side)
    #[arg(short, long, default_value_t = 10)]
    resolution: usize,

    /// Rotation about Z, radians
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    alpha: f64,

    /// Rotation about X, radians
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    beta: f64,

    #[arg(long, default_value_t = 0.5)]
    kd: f64,

    #[arg(long, default_value_t = 0.5)]
    ks: f64,

    /// Shininess exponent
    #[arg(short, default_value_t = 10.0)]
    m: f64,

    /// Light color as r,g,b in [0, 1]
    #[arg(long, value_parser = parse_triple, default_value = "1,1,1")]
    light_color: [f64; 3],

    /// Object color as r,g,b in [0, 1]
    #[arg(long, value_parser = parse_triple, default_value = "1,0,1")]
    object_color: [f64; 3],

    /// Light position as x,y,z
    #[arg(long, value_parser = parse_triple, default_value = "0,0,3", allow_hyphen_values = true)]
    light_position: [f64; 3],

    /// Texture image replacing the object color
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Normal map image in the surface's tangent frame
    #[arg(long)]
    normal_map: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Filter::Nearest)]
    filter: Filter,

    /// Draw only the wireframe
    #[arg(long)]
    no_fill: bool,

    #[arg(long)]
    no_wireframe: bool,

    /// Orbit the light around the surface
    #[arg(long)]
    animate_light: bool,

    /// Pixels per surface unit
    #[arg(long, default_value_t = 150.0)]
    scale: f64,

    /// Eye distance for the perspective divide
    #[arg(long, default_value_t = 5.0)]
    eye_distance: f64,

    #[arg(long)]
    orthographic: bool,

    /// Number of frames to render; more than one animates the light
    #[arg(long, default_value_t = 1)]
    frames: usize,

    /// Animation frames per second of elapsed light time
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Worker threads (defaults to the number of logical cores)
    #[arg(long)]
    threads: Option<usize>,
}

fn parse_triple(s: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [a, b, c] = parts.as_slice() else {
        return Err(format!("expected three comma-separated numbers, got {s:?}"));
    };
    let num = |t: &str| t.parse::<f64>().map_err(|e| format!("{t:?}: {e}"));
    Ok([num(*a)?, num(*b)?, num(*c)?])
}

impl Cli {
    fn frame_config(&self) -> FrameConfig {
        let [lr, lg, lb] = self.light_color;
        let [or, og, ob] = self.object_color;
        let [lx, ly, lz] = self.light_position;
        FrameConfig {
            canvas_width: self.width,
            canvas_height: self.height,
            resolution: self.resolution,
            rotation_alpha: self.alpha,
            rotation_beta: self.beta,
            kd: self.kd,
            ks: self.ks,
            m: self.m,
            light_color: Color::new(lr, lg, lb),
            object_color: Color::new(or, og, ob),
            light_position: Point3D::new(lx, ly, lz),
            mode: RenderMode {
                filled: !self.no_fill,
                wireframe: !self.no_wireframe,
                texture: self.texture.is_some(),
                normal_map: self.normal_map.is_some(),
                animate_light: self.animate_light || self.frames > 1,
            },
            texture_filter: self.filter.into(),
            camera: if self.orthographic {
                Camera::orthographic(self.scale)
            } else {
                Camera::perspective(self.scale, self.eye_distance)
            },
            ..FrameConfig::default()
        }
    }

    fn maps(&self) -> Result<SurfaceMaps> {
        let texture = self
            .texture
            .as_ref()
            .map(|p| Texture::load(p).with_context(|| format!("loading texture {}", p.display())))
            .transpose()?;
        let normal_map = self
            .normal_map
            .as_ref()
            .map(|p| {
                Texture::load(p)
                    .map(NormalMap::from)
                    .with_context(|| format!("loading normal map {}", p.display()))
            })
            .transpose()?;
        Ok(SurfaceMaps { texture, normal_map })
    }
}

/// `out.png` -> `out_0007.png`
fn frame_path(output: &Path, index: usize) -> PathBuf {
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("frame");
    let ext = output.extension().and_then(|s| s.to_str()).unwrap_or("png");
    output.with_file_name(format!("{stem}_{index:04}.{ext}"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let grid = match &cli.control_points {
        Some(path) => ControlGrid::load(path)
            .with_context(|| format!("loading control points from {}", path.display()))?,
        None => ControlGrid::default(),
    };
    let config = cli.frame_config();
    config.validate().context("invalid render parameters")?;
    let maps = cli.maps()?;

    if cli.frames <= 1 {
        let mut renderer = Renderer::new(grid);
        let stats = renderer.render(&config, &maps)?;
        renderer
            .screen()
            .save(&cli.output)
            .with_context(|| format!("writing {}", cli.output.display()))?;
        info!(
            "{}: {} triangles, {} skipped, {} fragments in {:.2?}",
            cli.output.display(),
            stats.triangles_rasterized,
            stats.triangles_skipped,
            stats.fragments_shaded,
            stats.time
        );
        return Ok(());
    }

    let threads = cli.threads.unwrap_or_else(num_cpus::get);
    info!("Rendering {} frames on {} threads", cli.frames, threads);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("building thread pool")?;

    let start = Instant::now();
    let per_frame: Vec<FrameStats> = pool.install(|| {
        (0..cli.frames)
            .into_par_iter()
            .map_init(
                || Renderer::new(grid.clone()),
                |renderer, index| -> Result<FrameStats> {
                    let frame = FrameConfig { time: index as f64 / cli.fps, ..config.clone() };
                    let stats = renderer.render(&frame, &maps)?;
                    let path = frame_path(&cli.output, index);
                    renderer
                        .screen()
                        .save(&path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    Ok(stats)
                },
            )
            .collect::<Result<Vec<_>>>()
    })?;

    let mut total = FrameStats::default();
    for stats in per_frame {
        total += stats;
    }
    info!(
        "{} frames in {:.2?} ({:.2?} summed render time, {} fragments)",
        cli.frames,
        start.elapsed(),
        total.time,
        total.fragments_shaded
    );
    Ok(())
}
