use bezier_rusterizer::assert_approx_eq;
use bezier_rusterizer::geometry::triangle_to_screen;
use bezier_rusterizer::transform::Transform;
use bezier_rusterizer::*;

fn flat_plane_config() -> FrameConfig {
    FrameConfig {
        canvas_width: 60,
        canvas_height: 60,
        resolution: 1,
        camera: Camera::orthographic(20.0),
        mode: RenderMode { wireframe: false, ..RenderMode::default() },
        ..FrameConfig::default()
    }
}

#[test]
fn flat_plane_fills_exactly_its_square() {
    let config = flat_plane_config();
    let mut renderer = Renderer::new(ControlGrid::plane(1.0));
    let stats = renderer.render(&config, &SurfaceMaps::default()).unwrap();

    assert_eq!(stats.triangles_rasterized, 2);
    assert_eq!(stats.triangles_skipped, 0);
    assert_eq!(stats.fragments_shaded, 1600);

    let screen = renderer.screen();
    for y in 0..60 {
        for x in 0..60 {
            let inside = (10..50).contains(&x) && (10..50).contains(&y);
            let depth = screen.get_depth(x, y).unwrap();
            assert_eq!(depth.is_finite(), inside, "pixel ({x}, {y})");
            if inside {
                assert_eq!(depth, 0.0);
                assert_ne!(screen.get_pixel(x, y), Some(config.background.pack()));
            } else {
                assert_eq!(screen.get_pixel(x, y), Some(config.background.pack()));
            }
        }
    }
}

#[test]
fn flat_plane_normals_face_viewer() {
    let config = flat_plane_config();
    let mesh = Mesh::generate(&BezierSurface::new(ControlGrid::plane(1.0)), 1);
    assert_eq!(mesh.len(), 2);

    let resolution = Point2D::new(60.0, 60.0);
    for tri in &mesh.triangles {
        let screen_tri = triangle_to_screen(tri, &Transform::identity(), &config.camera, resolution).unwrap();
        for v in screen_tri.vertices() {
            assert_approx_eq!(v.normal, Point3D::UP);
        }
    }
}

#[test]
fn uniform_shading_matches_phong_at_center() {
    // Light far above: every pixel sees nearly the same N·L, and the one at
    // the center sees exactly the head-on value.
    let config = FrameConfig { light_position: Point3D::new(0.0, 0.0, 1e6), kd: 0.6, ks: 0.0, ..flat_plane_config() };
    let mut renderer = Renderer::new(ControlGrid::plane(1.0));
    renderer.render(&config, &SurfaceMaps::default()).unwrap();

    let expected = (config.object_color * config.light_color * 0.6).pack();
    assert_eq!(renderer.screen().get_pixel(30, 30), Some(expected));
}

#[test]
fn white_texture_matches_white_material() {
    let solid = FrameConfig { object_color: Color::WHITE, ..flat_plane_config() };
    let mut textured = solid.clone();
    textured.mode.texture = true;
    let maps = SurfaceMaps {
        texture: Some(Texture::from_rgba(2, 2, vec![255; 16]).unwrap()),
        normal_map: None,
    };

    let mut a = Renderer::default();
    let mut b = Renderer::default();
    a.render(&solid, &SurfaceMaps::default()).unwrap();
    b.render(&textured, &maps).unwrap();
    assert_eq!(a.screen().rgba, b.screen().rgba);
}

#[test]
fn normal_map_changes_lighting() {
    let mut config = FrameConfig {
        resolution: 2,
        light_position: Point3D::new(0.0, 0.0, 5.0),
        ..flat_plane_config()
    };
    let mut plain = Renderer::new(ControlGrid::plane(1.0));
    plain.render(&config, &SurfaceMaps::default()).unwrap();

    // Every texel tilts the normal 45° along tangent_u.
    let tilted = Texture::from_fn(4, 4, |_, _| [218, 128, 218, 255]).unwrap();
    let maps = SurfaceMaps { texture: None, normal_map: Some(tilted.into()) };
    config.mode.normal_map = true;
    let mut mapped = Renderer::new(ControlGrid::plane(1.0));
    mapped.render(&config, &maps).unwrap();

    let red = |screen: &ScreenSpace| screen.get_pixel(30, 30).unwrap().to_le_bytes()[0];
    let (plain_red, mapped_red) = (red(plain.screen()), red(mapped.screen()));
    assert!(mapped_red < plain_red, "{mapped_red} vs {plain_red}");
}

#[test]
fn saddle_renders_at_default_settings() {
    let mut renderer = Renderer::default();
    let config = FrameConfig { rotation_alpha: 0.4, rotation_beta: -1.0, ..FrameConfig::default() };
    let stats = renderer.render(&config, &SurfaceMaps::default()).unwrap();
    assert_eq!(stats.triangles_rasterized + stats.triangles_skipped, 200);
    assert!(stats.fragments_shaded > 0);
    assert_eq!(renderer.screen().rgba.len(), 800 * 600);
}

#[test]
fn rerendering_is_deterministic() {
    let config = FrameConfig { rotation_alpha: 1.1, rotation_beta: 0.3, ..FrameConfig::default() };
    let mut renderer = Renderer::default();
    renderer.render(&config, &SurfaceMaps::default()).unwrap();
    let first = renderer.screen().rgba.clone();
    renderer.render(&config, &SurfaceMaps::default()).unwrap();
    assert_eq!(renderer.screen().rgba, first);
}
