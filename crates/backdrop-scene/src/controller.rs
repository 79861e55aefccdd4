//! Background renderer controller
//!
//! Owns the single renderer context (surface, scene, backend) and drives it
//! through the lifecycle. Event callbacks reach the context only through
//! this controller's methods.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::{SceneConfig, FALLBACK_MESSAGE};
use crate::error::BackdropError;
use crate::host::{GraphicsBackend, Host};
use crate::lifecycle::LifecycleState;
use crate::scene::Scene;
use crate::surface::{Surface, ViewportSize};

/// Result of [`BackdropController::init`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitOutcome {
    /// Scene built, observers may be registered, first frame requested
    Started,
    /// The drawing element is absent; nothing was built
    SurfaceMissing,
    /// The graphics backend failed; the fallback banner is shown
    Fallback,
}

/// Everything that exists only while the renderer is running
struct RendererContext<B> {
    surface: Surface,
    scene: Scene,
    backend: B,
    frames: u64,
}

enum RendererState<B> {
    Uninitialized,
    Running(Box<RendererContext<B>>),
    Failed { reason: String },
    Stopped,
}

/// Controller for one animated background
pub struct BackdropController<B: GraphicsBackend> {
    config: SceneConfig,
    state: RendererState<B>,
}

impl<B: GraphicsBackend> BackdropController<B> {
    /// Create an uninitialized controller
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            state: RendererState::Uninitialized,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> LifecycleState {
        match self.state {
            RendererState::Uninitialized => LifecycleState::Uninitialized,
            RendererState::Running(_) => LifecycleState::Running,
            RendererState::Failed { .. } => LifecycleState::Failed,
            RendererState::Stopped => LifecycleState::Stopped,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.state, RendererState::Running(_))
    }

    /// Why the renderer failed, if it did
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.state {
            RendererState::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    /// The scene, while running
    pub fn scene(&self) -> Option<&Scene> {
        self.context().map(|ctx| &ctx.scene)
    }

    /// The graphics backend, while running
    pub fn backend(&self) -> Option<&B> {
        self.context().map(|ctx| &ctx.backend)
    }

    /// Frames drawn successfully since start
    pub fn frames_rendered(&self) -> u64 {
        self.context().map_or(0, |ctx| ctx.frames)
    }

    fn context(&self) -> Option<&RendererContext<B>> {
        match &self.state {
            RendererState::Running(ctx) => Some(&**ctx),
            _ => None,
        }
    }

    fn context_mut(&mut self) -> Option<&mut RendererContext<B>> {
        match &mut self.state {
            RendererState::Running(ctx) => Some(&mut **ctx),
            _ => None,
        }
    }

    /// Locate the surface, create the backend, build the scene, and request
    /// the first frame
    ///
    /// Initialization failures never escape: a missing element is reported
    /// as a diagnostic, a backend failure becomes the fallback banner. The
    /// only error is calling this outside `Uninitialized`.
    pub async fn init<H>(&mut self, host: &mut H) -> Result<InitOutcome, BackdropError>
    where
        H: Host<Backend = B>,
    {
        let from = self.lifecycle();
        if from != LifecycleState::Uninitialized {
            return Err(BackdropError::InvalidTransition {
                from,
                action: "initialize",
            });
        }

        let element_id = self.config.canvas_id.clone();
        let Some(element) = host.locate_surface(&element_id) else {
            host.diagnostic(&BackdropError::SurfaceMissing(element_id).to_string());
            return Ok(InitOutcome::SurfaceMissing);
        };

        let surface = Surface::new(host.viewport(), self.config.max_pixel_ratio);
        let mut backend = match host.create_backend(element, surface.physical_size()).await {
            Ok(backend) => backend,
            Err(e) => {
                host.diagnostic(&e.to_string());
                host.show_fallback(FALLBACK_MESSAGE);
                self.state = RendererState::Failed {
                    reason: e.to_string(),
                };
                return Ok(InitOutcome::Fallback);
            }
        };

        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let scene = Scene::new(&self.config, surface.aspect(), &mut rng);
        backend.load_scene(&scene);

        let physical = surface.physical_size();
        host.diagnostic(&format!(
            "started: {} particles, {}x{} px",
            scene.cloud.count(),
            physical.width,
            physical.height
        ));

        self.state = RendererState::Running(Box::new(RendererContext {
            surface,
            scene,
            backend,
            frames: 0,
        }));
        host.request_frame();

        Ok(InitOutcome::Started)
    }

    /// Run one frame at wall-clock `time_seconds` and re-arm the loop
    ///
    /// Returns whether the loop is still running. Transient backend errors
    /// skip the frame; fatal ones stop the loop and fail the renderer.
    pub fn frame<H>(&mut self, host: &mut H, time_seconds: f64) -> bool
    where
        H: Host<Backend = B>,
    {
        let Some(ctx) = self.context_mut() else {
            return false;
        };

        ctx.scene.update(time_seconds as f32);
        let drawn = ctx.backend.draw(&ctx.scene.frame_view());
        match drawn {
            Ok(()) => {
                ctx.scene.cloud.mark_uploaded();
                ctx.frames += 1;
            }
            Err(e) if e.is_transient() => {
                host.diagnostic(&e.to_string());
            }
            Err(e) => {
                host.diagnostic(&e.to_string());
                self.state = RendererState::Failed {
                    reason: e.to_string(),
                };
                return false;
            }
        }

        host.request_frame();
        true
    }

    /// Adopt a new viewport size
    ///
    /// Updates the camera aspect and projection and resizes the backing
    /// store. Grid and particles are untouched. Ignored unless running.
    pub fn resize(&mut self, viewport: ViewportSize) {
        let Some(ctx) = self.context_mut() else {
            return;
        };
        if ctx.surface.resize(viewport) {
            ctx.scene.resize(ctx.surface.width(), ctx.surface.height());
            ctx.backend.resize(ctx.surface.physical_size());
        }
    }

    /// Record a pointer position (viewport pixels) as the new target offset
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let Some(ctx) = self.context_mut() else {
            return;
        };
        let (width, height) = (ctx.surface.width(), ctx.surface.height());
        ctx.scene.pointer_moved(x, y, width, height);
    }

    /// Pause a running loop without releasing the renderer
    ///
    /// The pending frame is cancelled and the state stays `Running`, so a
    /// page restored from the back/forward cache can [`resume`](Self::resume).
    pub fn suspend<H>(&mut self, host: &mut H)
    where
        H: Host<Backend = B>,
    {
        if !self.is_running() {
            return;
        }
        host.cancel_frame();
        host.diagnostic("suspended");
    }

    /// Re-arm the loop of a running renderer after [`suspend`](Self::suspend)
    pub fn resume<H>(&mut self, host: &mut H)
    where
        H: Host<Backend = B>,
    {
        if !self.is_running() {
            return;
        }
        host.request_frame();
        host.diagnostic("resumed");
    }

    /// Tear down a running renderer and cancel its pending frame
    pub fn stop<H>(&mut self, host: &mut H) -> Result<(), BackdropError>
    where
        H: Host<Backend = B>,
    {
        let from = self.lifecycle();
        if !from.can_transition_to(LifecycleState::Stopped) {
            return Err(BackdropError::InvalidTransition {
                from,
                action: "stop",
            });
        }

        host.cancel_frame();
        let frames = self.frames_rendered();
        self.state = RendererState::Stopped;
        host.diagnostic(&format!("stopped after {} frames", frames));
        Ok(())
    }
}
