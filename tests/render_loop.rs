mod common;

use smoke_wasm::color::Color;
use smoke_wasm::config::SceneConfig;
use smoke_wasm::stats::Panel;
use smoke_wasm::SceneError;

#[test]
fn rotation_advances_by_fixed_step_per_tick() {
    let (mut app, mut renderer) = common::app(42);
    let initial: Vec<f32> = app.scene.smoke.particles().iter().map(|p| p.rotation_z).collect();
    let step = app.config().particles.rotation_step;

    let n = 240;
    for i in 0..n {
        app.tick(|| f64::from(i) * 16.0, &mut renderer).unwrap();
    }

    for (p, start) in app.scene.smoke.particles().iter().zip(&initial) {
        let mut expected = *start;
        for _ in 0..n {
            expected += step;
        }
        assert_eq!(p.rotation_z, expected);
        assert!((p.rotation_z - (start + n as f32 * step)).abs() < 1e-2);
    }
    assert_eq!(renderer.frames, n);
    assert_eq!(app.frame(), u64::from(n));
}

#[test]
fn positions_do_not_move_between_ticks() {
    let (mut app, mut renderer) = common::app(3);
    let before: Vec<_> = app.scene.smoke.particles().iter().map(|p| p.position).collect();
    app.tick(|| 0.0, &mut renderer).unwrap();
    let after: Vec<_> = app.scene.smoke.particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);
    assert_eq!(app.scene.smoke.len(), 150);
}

#[test]
fn tint_change_reaches_material_on_next_tick() {
    let (mut app, mut renderer) = common::app(7);
    let red = Color::from_hex(0xff0000);
    app.params.borrow_mut().tint = red;
    assert_ne!(app.scene.material.color, red);

    app.tick(|| 16.0, &mut renderer).unwrap();
    assert_eq!(app.scene.material.color, red);
}

#[test]
fn fov_change_is_clamped_and_reprojected() {
    let (mut app, mut renderer) = common::app(7);

    app.params.borrow_mut().fov = 45.0;
    app.tick(|| 16.0, &mut renderer).unwrap();
    assert_eq!(app.camera.fov, 45.0);
    assert_eq!(renderer.last_fov, Some(45.0));
    assert_eq!(app.camera.projection_matrix(), app.camera.compute_projection());

    app.params.borrow_mut().fov = 500.0;
    app.tick(|| 32.0, &mut renderer).unwrap();
    assert_eq!(app.camera.fov, 90.0);

    app.params.borrow_mut().fov = -3.0;
    app.tick(|| 48.0, &mut renderer).unwrap();
    assert_eq!(app.camera.fov, 20.0);
    assert_eq!(app.camera.projection_matrix(), app.camera.compute_projection());
}

#[test]
fn stats_sample_every_tick() {
    let (mut app, mut renderer) = common::app(7);
    for i in 1..=100 {
        app.tick(|| f64::from(i) * 10.0, &mut renderer).unwrap();
    }
    let fps = app.stats.fps().expect("a full second elapsed");
    assert!((fps.value - 100.0).abs() < 1e-9);
}

#[test]
fn ms_panel_measures_time_spent_inside_tick() {
    let config = SceneConfig {
        stats_panel: Panel::Ms,
        ..SceneConfig::default()
    };
    let (mut app, mut renderer) = common::app_with(config, 7);

    // begin/end readings for three frames costing 4, 7 and 5 ms
    let mut readings = [16.0, 20.0, 32.0, 39.0, 48.0, 53.0].into_iter();
    for _ in 0..3 {
        app.tick(|| readings.next().unwrap(), &mut renderer).unwrap();
    }

    let ms = app.stats.ms().expect("three frames were sampled");
    assert_eq!(ms.value, 5.0);
    assert_eq!(ms.min, 4.0);
    assert_eq!(ms.max, 7.0);
    assert_eq!(app.stats.label(), "5 MS (4-7)");
}

#[test]
fn render_failure_is_reported_but_state_still_advances() {
    let (mut app, mut renderer) = common::app(7);
    renderer.fail = true;
    let before = app.scene.smoke.particles()[0].rotation_z;
    let err = app.tick(|| 0.0, &mut renderer).unwrap_err();
    assert!(matches!(err, SceneError::WebGlUnavailable));
    assert!(app.scene.smoke.particles()[0].rotation_z > before);
    assert_eq!(app.frame(), 1);
}

#[test]
fn auto_rotate_orbits_the_camera() {
    let mut config = SceneConfig::default();
    config.controls.auto_rotate = true;
    let (mut app, mut renderer) = common::app_with(config, 1);
    let start = app.camera.position;
    app.tick(|| 0.0, &mut renderer).unwrap();
    assert_ne!(app.camera.position, start);
    let radius = app.camera.position.distance(app.camera.target);
    assert!((radius - 400.0).abs() < 1e-2);
}
