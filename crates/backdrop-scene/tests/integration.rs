//! Integration tests for BackdropController
//!
//! These tests drive the controller through a mock host and verify:
//! - Initialization outcomes (started, missing surface, fallback banner)
//! - The per-frame loop and its re-arming
//! - Particle and grid motion bounds over many frames
//! - Pointer smoothing and resize handling
//! - Teardown and per-frame error handling

use backdrop_scene::testing::MockHost;
use backdrop_scene::{
    BackdropController, BackdropError, InitOutcome, LifecycleState, PhysicalSize, SceneConfig,
    ViewportSize, FALLBACK_MESSAGE,
};
use glam::{Mat4, Vec2};

type Controller = BackdropController<backdrop_scene::testing::RecordingBackend>;

fn seeded_config() -> SceneConfig {
    SceneConfig {
        seed: Some(1234),
        ..SceneConfig::default()
    }
}

fn started(host: &mut MockHost, config: SceneConfig) -> Controller {
    let mut controller = Controller::new(config);
    let outcome = pollster::block_on(controller.init(host)).unwrap();
    assert_eq!(outcome, InitOutcome::Started);
    controller
}

/// Fire pending frame callbacks the way the platform scheduler would
fn run_frames(controller: &mut Controller, host: &mut MockHost, frames: usize) {
    for n in 0..frames {
        assert!(host.take_frame_request(), "loop stopped re-arming at frame {n}");
        controller.frame(host, n as f64 / 60.0);
    }
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_success_starts_loop() {
    let mut host = MockHost::new();
    let controller = started(&mut host, seeded_config());

    assert_eq!(controller.lifecycle(), LifecycleState::Running);
    assert_eq!(host.frame_requests(), 1);
    assert!(host.banners().is_empty());
    assert_eq!(host.backends_created(), 1);

    let backend = controller.backend().unwrap();
    assert_eq!(backend.particle_count(), Some(2000));
    assert_eq!(backend.grid_vertex_count(), Some(41 * 4));
    assert_eq!(backend.size(), PhysicalSize::new(1280, 720));
    assert!(host.has_diagnostic_containing("2000 particles"));
}

#[test]
fn test_init_missing_surface_builds_nothing() {
    let mut host = MockHost::without_surface();
    let mut controller = Controller::new(seeded_config());

    let outcome = pollster::block_on(controller.init(&mut host)).unwrap();

    assert_eq!(outcome, InitOutcome::SurfaceMissing);
    assert_eq!(controller.lifecycle(), LifecycleState::Uninitialized);
    assert!(controller.scene().is_none());
    assert_eq!(host.backends_created(), 0);
    assert_eq!(host.frame_requests(), 0);
    assert!(host.banners().is_empty());
    assert!(host.has_diagnostic_containing("bg-canvas"));

    // Nothing to run even if a callback fired anyway
    assert!(!controller.frame(&mut host, 0.0));
    assert_eq!(host.draw_count(), 0);
}

#[test]
fn test_init_backend_failure_shows_one_banner() {
    let mut host = MockHost::with_backend_failure("webgl2 context rejected");
    let mut controller = Controller::new(seeded_config());

    let outcome = pollster::block_on(controller.init(&mut host)).unwrap();

    assert_eq!(outcome, InitOutcome::Fallback);
    assert_eq!(controller.lifecycle(), LifecycleState::Failed);
    assert_eq!(host.banners(), [FALLBACK_MESSAGE.to_string()]);
    assert_eq!(
        host.banners()[0],
        "Interactive background could not load. Your browser may not support WebGL."
    );
    assert_eq!(host.frame_requests(), 0);
    assert_eq!(host.draw_count(), 0);
    assert!(controller.scene().is_none());
    assert!(controller
        .failure_reason()
        .unwrap()
        .contains("webgl2 context rejected"));
}

#[test]
fn test_init_twice_is_rejected() {
    let mut host = MockHost::new();
    let mut controller = started(&mut host, seeded_config());

    let err = pollster::block_on(controller.init(&mut host)).unwrap_err();
    assert_eq!(
        err,
        BackdropError::InvalidTransition {
            from: LifecycleState::Running,
            action: "initialize",
        }
    );
    assert_eq!(host.backends_created(), 1);
    assert_eq!(host.frame_requests(), 1);
}

#[test]
fn test_init_after_failure_is_rejected() {
    let mut host = MockHost::with_backend_failure("no adapter");
    let mut controller = Controller::new(seeded_config());
    pollster::block_on(controller.init(&mut host)).unwrap();

    assert!(pollster::block_on(controller.init(&mut host)).is_err());
    assert_eq!(host.banners().len(), 1);
}

#[test]
fn test_init_uses_configured_canvas_id() {
    let mut host = MockHost::without_surface();
    let config = SceneConfig {
        canvas_id: "hero-background".to_string(),
        ..seeded_config()
    };
    let mut controller = Controller::new(config);
    pollster::block_on(controller.init(&mut host)).unwrap();
    assert!(host.has_diagnostic_containing("#hero-background"));
}

#[test]
fn test_init_respects_pixel_ratio() {
    let mut host = MockHost::new().with_viewport(ViewportSize::new(1000.0, 600.0, 3.0));
    let controller = started(&mut host, seeded_config());
    assert_eq!(
        controller.backend().unwrap().size(),
        PhysicalSize::new(2000, 1200)
    );
}

// =============================================================================
// Frame loop
// =============================================================================

#[test]
fn test_frame_loop_rearms_and_draws() {
    let mut host = MockHost::new();
    let mut controller = started(&mut host, seeded_config());

    run_frames(&mut controller, &mut host, 10);

    assert_eq!(host.draw_count(), 10);
    assert_eq!(controller.frames_rendered(), 10);
    assert_eq!(host.frame_requests(), 11);
    assert!(host.has_pending_frame());
}

#[test]
fn test_frame_uploads_positions_every_frame() {
    let mut host = MockHost::new();
    let mut controller = started(&mut host, seeded_config());

    run_frames(&mut controller, &mut host, 5);

    let backend = controller.backend().unwrap();
    assert_eq!(backend.upload_count(), 5);
    assert_eq!(
        backend.last_positions(),
        controller.scene().unwrap().cloud.positions()
    );
    assert!(!controller.scene().unwrap().cloud.needs_upload());
}

#[test]
fn test_particles_stay_in_band_over_many_frames() {
    let mut host = MockHost::new();
    let config = SceneConfig {
        particles: backdrop_scene::config::ParticleConfig {
            count: 500,
            z_step: 7.0,
            ..Default::default()
        },
        ..seeded_config()
    };
    let mut controller = started(&mut host, config);

    for n in 0..400 {
        let before: Vec<f32> = controller.scene().unwrap().cloud.positions().to_vec();
        assert!(host.take_frame_request());
        controller.frame(&mut host, n as f64 / 60.0);

        let after = controller.scene().unwrap().cloud.positions();
        assert_eq!(after.len(), 1500);
        for (pre, post) in before.chunks_exact(3).zip(after.chunks_exact(3)) {
            assert!((-300.0..=300.0).contains(&post[2]), "z {} out of band", post[2]);
            if pre[2] + 7.0 > 300.0 {
                assert_eq!(post[2], -300.0);
            }
        }
    }
}

#[test]
fn test_buffers_keep_length_and_colors() {
    let mut host = MockHost::new();
    let mut controller = started(&mut host, seeded_config());
    let colors = controller.scene().unwrap().cloud.colors().to_vec();

    run_frames(&mut controller, &mut host, 120);

    let cloud = &controller.scene().unwrap().cloud;
    assert_eq!(cloud.count(), 2000);
    assert_eq!(cloud.positions().len(), 6000);
    assert_eq!(cloud.colors(), colors.as_slice());
}

#[test]
fn test_grid_offset_stays_in_band() {
    let mut host = MockHost::new();
    let mut controller = started(&mut host, seeded_config());
    let band = controller.scene().unwrap().grid.depth_band();

    let mut wrapped = false;
    for n in 0..1000 {
        let before = controller.scene().unwrap().grid.depth_offset();
        assert!(host.take_frame_request());
        controller.frame(&mut host, n as f64 / 60.0);
        let after = controller.scene().unwrap().grid.depth_offset();

        assert!(band.contains(after));
        if before + 0.05 > band.upper {
            assert_eq!(after, band.lower);
            wrapped = true;
        }
    }
    assert!(wrapped, "grid never crossed its band in 1000 frames");
}

#[test]
fn test_same_seed_same_scene() {
    let mut host_a = MockHost::new();
    let mut host_b = MockHost::new();
    let a = started(&mut host_a, seeded_config());
    let b = started(&mut host_b, seeded_config());
    assert_eq!(
        a.scene().unwrap().cloud.positions(),
        b.scene().unwrap().cloud.positions()
    );
}

// =============================================================================
// Pointer
// =============================================================================

#[test]
fn test_pointer_converges_geometrically() {
    let mut host = MockHost::new();
    let mut controller = started(&mut host, seeded_config());

    controller.pointer_moved(1280.0, 0.0);
    let target = controller.scene().unwrap().pointer.target();
    assert_eq!(target, Vec2::new(1.0, 1.0));
    assert_eq!(controller.scene().unwrap().pointer.current(), Vec2::ZERO);

    let f = controller.config().pointer.smoothing;
    for n in 1..=60 {
        assert!(host.take_frame_request());
        controller.frame(&mut host, n as f64 / 60.0);

        let current = controller.scene().unwrap().pointer.current();
        let expected = (1.0 - f).powi(n);
        assert!(((current - target).length() / target.length() - expected).abs() < 1e-4);
    }
}

#[test]
fn test_pointer_ignored_before_start() {
    let mut controller = Controller::new(seeded_config());
    controller.pointer_moved(10.0, 10.0);
    assert!(controller.scene().is_none());
}

// =============================================================================
// Resize
// =============================================================================

#[test]
fn test_resize_sets_exact_aspect_before_next_frame() {
    let mut host = MockHost::new();
    let mut controller = started(&mut host, seeded_config());
    run_frames(&mut controller, &mut host, 2);

    let positions = controller.scene().unwrap().cloud.positions().to_vec();
    controller.resize(ViewportSize::new(900.0, 1600.0, 2.0));

    let scene = controller.scene().unwrap();
    assert_eq!(scene.camera.aspect, 900.0 / 1600.0);
    assert_eq!(
        scene.camera.projection(),
        Mat4::perspective_rh(scene.camera.fov_y, 900.0 / 1600.0, scene.camera.near, scene.camera.far)
    );
    assert_eq!(scene.cloud.positions(), positions.as_slice());

    let backend = controller.backend().unwrap();
    assert_eq!(backend.size(), PhysicalSize::new(1800, 3200));
    assert_eq!(backend.resize_count(), 1);

    // The next frame draws through the new projection
    assert!(host.take_frame_request());
    controller.frame(&mut host, 1.0);
    let scene = controller.scene().unwrap();
    assert_eq!(
        controller.backend().unwrap().last_view_projection(),
        Some(scene.camera.view_projection())
    );
}

#[test]
fn test_resize_ignores_empty_and_unchanged_viewports() {
    let mut host = MockHost::new();
    let mut controller = started(&mut host, seeded_config());

    controller.resize(ViewportSize::new(0.0, 0.0, 1.0));
    controller.resize(ViewportSize::new(1280.0, 720.0, 1.0));
    assert_eq!(controller.backend().unwrap().resize_count(), 0);
}

// =============================================================================
// Frame errors and teardown
// =============================================================================

#[test]
fn test_transient_frame_error_skips_frame() {
    let mut host = MockHost::new()
        .with_draw_errors(vec![BackdropError::FrameSkipped("surface outdated".into())]);
    let mut controller = started(&mut host, seeded_config());

    run_frames(&mut controller, &mut host, 3);

    assert_eq!(controller.lifecycle(), LifecycleState::Running);
    assert_eq!(host.draw_count(), 2);
    assert!(host.has_diagnostic_containing("surface outdated"));
    assert!(host.has_pending_frame());
}

#[test]
fn test_fatal_frame_error_stops_loop() {
    let mut host =
        MockHost::new().with_draw_errors(vec![BackdropError::DeviceLost("out of memory".into())]);
    let mut controller = started(&mut host, seeded_config());

    assert!(host.take_frame_request());
    assert!(!controller.frame(&mut host, 0.0));

    assert_eq!(controller.lifecycle(), LifecycleState::Failed);
    assert!(!host.has_pending_frame());
    assert!(host.banners().is_empty());
    assert!(!controller.frame(&mut host, 0.1));
    assert_eq!(host.draw_count(), 0);
}

#[test]
fn test_stop_cancels_pending_frame() {
    let mut host = MockHost::new();
    let mut controller = started(&mut host, seeded_config());
    run_frames(&mut controller, &mut host, 3);

    controller.stop(&mut host).unwrap();

    assert_eq!(controller.lifecycle(), LifecycleState::Stopped);
    assert_eq!(host.cancelled_frames(), 1);
    assert!(!host.has_pending_frame());
    assert!(controller.scene().is_none());
    assert!(host.has_diagnostic_containing("stopped after 3 frames"));
    assert!(!controller.frame(&mut host, 1.0));
    assert_eq!(host.draw_count(), 3);
}

#[test]
fn test_stop_requires_running() {
    let mut host = MockHost::new();
    let mut controller = Controller::new(seeded_config());
    let err = controller.stop(&mut host).unwrap_err();
    assert_eq!(
        err,
        BackdropError::InvalidTransition {
            from: LifecycleState::Uninitialized,
            action: "stop",
        }
    );

    let mut controller = started(&mut host, seeded_config());
    controller.stop(&mut host).unwrap();
    assert!(controller.stop(&mut host).is_err());
}

#[test]
fn test_suspend_keeps_renderer_for_resume() {
    let mut host = MockHost::new();
    let mut controller = started(&mut host, seeded_config());
    run_frames(&mut controller, &mut host, 2);

    controller.suspend(&mut host);

    assert_eq!(controller.lifecycle(), LifecycleState::Running);
    assert!(!host.has_pending_frame());
    assert_eq!(host.cancelled_frames(), 1);
    assert!(controller.scene().is_some());
    assert_eq!(controller.frames_rendered(), 2);

    controller.resume(&mut host);

    assert!(host.has_pending_frame());
    run_frames(&mut controller, &mut host, 2);
    assert_eq!(controller.frames_rendered(), 4);
    assert_eq!(host.draw_count(), 4);
}

#[test]
fn test_suspend_and_resume_ignored_unless_running() {
    let mut host = MockHost::new();
    let mut controller = Controller::new(seeded_config());
    controller.suspend(&mut host);
    controller.resume(&mut host);
    assert_eq!(host.frame_requests(), 0);
    assert_eq!(controller.lifecycle(), LifecycleState::Uninitialized);

    let mut controller = started(&mut host, seeded_config());
    controller.stop(&mut host).unwrap();
    let requests = host.frame_requests();
    controller.resume(&mut host);
    assert_eq!(host.frame_requests(), requests);
    assert!(!host.has_pending_frame());
    assert_eq!(controller.lifecycle(), LifecycleState::Stopped);
}
