use std::io::Write;

use bezier_rusterizer::assert_approx_eq;
use bezier_rusterizer::*;

#[test]
fn control_grid_loads_from_file_and_renders() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# flat 4x4 plane, row-major").unwrap();
    for i in 0..4 {
        for j in 0..4 {
            writeln!(file, "{}, {}, 0", i as f64 - 1.5, j as f64 - 1.5).unwrap();
        }
    }
    file.flush().unwrap();

    let grid = ControlGrid::load(file.path()).unwrap();
    assert_approx_eq!(grid.point(3, 0), Point3D::new(1.5, -1.5, 0.0));

    let surface = BezierSurface::new(grid.clone());
    assert_approx_eq!(surface.position(0.5, 0.5), Point3D::ZERO);

    let mut renderer = Renderer::new(grid);
    let stats = renderer.render(&FrameConfig::default(), &SurfaceMaps::default()).unwrap();
    assert!(stats.fragments_shaded > 0);
}

#[test]
fn truncated_control_grid_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for _ in 0..15 {
        writeln!(file, "0 0 0").unwrap();
    }
    file.flush().unwrap();
    let err = ControlGrid::load(file.path()).unwrap_err();
    assert!(matches!(err, ControlGridError::PointCount { found: 15 }));
}

#[test]
fn missing_control_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.txt");
    let err = ControlGrid::load(&path).unwrap_err();
    assert!(matches!(err, ControlGridError::Io { .. }));
    assert!(err.to_string().contains("nope.txt"));
}

#[test]
fn frame_saves_as_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");

    let config = FrameConfig { canvas_width: 64, canvas_height: 48, ..FrameConfig::default() };
    let mut renderer = Renderer::default();
    renderer.render(&config, &SurfaceMaps::default()).unwrap();
    renderer.screen().save(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (64, 48));
    assert_eq!(img.as_raw().as_slice(), renderer.screen().as_bytes());
}

#[test]
fn texture_loads_from_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tex.png");
    image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255])).save(&path).unwrap();

    let texture = Texture::load(&path).unwrap();
    assert_eq!((texture.width, texture.height), (3, 2));
    assert_eq!(texture.sample(0.5, 0.5), [10, 20, 30, 255]);
}
