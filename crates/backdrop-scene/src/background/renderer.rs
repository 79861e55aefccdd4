use super::init::*;
use super::render::*;
use super::uniforms::SceneUniforms;
use crate::config::srgb_to_linear;
use crate::error::BackdropError;
use crate::host::GraphicsBackend;
use crate::scene::{FrameView, LineVertex, Scene};
use crate::surface::PhysicalSize;

/// Intermediate struct for GPU resources during initialization
struct GpuResources {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    pipelines: ScenePipelines,
    max_dimension: u32,
}

/// Grid and particle renderer bound to one canvas
pub struct BackgroundRenderer {
    canvas: web_sys::HtmlCanvasElement,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    pipelines: ScenePipelines,
    buffers: Option<SceneBuffers>,
    clear_color: wgpu::Color,
    max_dimension: u32,
}

impl BackgroundRenderer {
    /// Create a renderer drawing into `canvas` at `size` physical pixels
    pub async fn new(
        canvas: web_sys::HtmlCanvasElement,
        size: PhysicalSize,
    ) -> Result<Self, BackdropError> {
        let (instance, surface) = Self::create_surface(&canvas, size)?;
        let gpu = Self::setup_gpu(&instance, &surface, size).await?;

        let mut renderer = Self {
            canvas,
            device: gpu.device,
            queue: gpu.queue,
            surface,
            surface_config: gpu.surface_config,
            bind_group: gpu.bind_group,
            uniform_buffer: gpu.uniform_buffer,
            pipelines: gpu.pipelines,
            buffers: None,
            clear_color: wgpu::Color::BLACK,
            max_dimension: gpu.max_dimension,
        };
        // The first configure used the unclamped size
        renderer.resize(size);
        Ok(renderer)
    }

    /// Create the wgpu instance and surface from canvas
    #[cfg(target_arch = "wasm32")]
    fn create_surface(
        canvas: &web_sys::HtmlCanvasElement,
        size: PhysicalSize,
    ) -> Result<(wgpu::Instance, wgpu::Surface<'static>), BackdropError> {
        canvas.set_width(size.width);
        canvas.set_height(size.height);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| BackdropError::GraphicsInit(format!("failed to create surface: {}", e)))?;

        Ok((instance, surface))
    }

    /// Create the wgpu instance and surface from canvas (non-WASM stub)
    #[cfg(not(target_arch = "wasm32"))]
    fn create_surface(
        _canvas: &web_sys::HtmlCanvasElement,
        _size: PhysicalSize,
    ) -> Result<(wgpu::Instance, wgpu::Surface<'static>), BackdropError> {
        Err(BackdropError::GraphicsInit(
            "BackgroundRenderer only supports WASM targets".to_string(),
        ))
    }

    /// Setup GPU device, queue, surface configuration and pipelines
    async fn setup_gpu(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
        size: PhysicalSize,
    ) -> Result<GpuResources, BackdropError> {
        let (device, queue, adapter) = create_device(instance, surface).await?;
        let max_dimension = device.limits().max_texture_dimension_2d;
        let size = size.clamp_to(max_dimension);

        let surface_config =
            configure_surface(surface, &adapter, &device, size.width, size.height)?;
        let (uniform_buffer, bind_group_layout, bind_group) = create_uniform_resources(&device);
        let pipelines = ScenePipelines {
            grid: create_grid_pipeline(&device, &bind_group_layout, surface_config.format),
            particles: create_particle_pipeline(&device, &bind_group_layout, surface_config.format),
        };

        Ok(GpuResources {
            device,
            queue,
            surface_config,
            bind_group,
            uniform_buffer,
            pipelines,
            max_dimension,
        })
    }

    /// Size of the configured backing store
    pub fn size(&self) -> PhysicalSize {
        PhysicalSize::new(self.surface_config.width, self.surface_config.height)
    }

    /// Colors are authored in sRGB; an sRGB target expects linear input
    fn output_channel(&self, c: f32) -> f32 {
        if self.surface_config.format.is_srgb() {
            srgb_to_linear(c)
        } else {
            c
        }
    }

    /// Get surface texture with error handling
    fn get_surface_texture(&mut self) -> Result<wgpu::SurfaceTexture, BackdropError> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                Err(BackdropError::FrameSkipped(
                    "surface reconfigured".to_string(),
                ))
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                Err(BackdropError::DeviceLost("out of GPU memory".to_string()))
            }
            Err(wgpu::SurfaceError::Timeout) => {
                Err(BackdropError::FrameSkipped("GPU timeout".to_string()))
            }
        }
    }
}

impl GraphicsBackend for BackgroundRenderer {
    fn load_scene(&mut self, scene: &Scene) {
        let grid: Vec<LineVertex> = scene
            .grid
            .line_vertices()
            .into_iter()
            .map(|v| LineVertex {
                position: v.position,
                color: v.color.map(|c| self.output_channel(c)),
            })
            .collect();
        let colors: Vec<f32> = scene
            .cloud
            .colors()
            .iter()
            .map(|&c| self.output_channel(c))
            .collect();

        let [r, g, b] = scene.clear_color().to_rgb().map(|c| self.output_channel(c));
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        self.buffers = Some(SceneBuffers {
            grid_vertices: create_grid_buffer(&self.device, &grid),
            grid_vertex_count: grid.len() as u32,
            positions: create_instance_buffer(
                &self.device,
                "Particle Position Buffer",
                scene.cloud.positions(),
                true,
            ),
            colors: create_instance_buffer(&self.device, "Particle Color Buffer", &colors, false),
            particle_count: scene.cloud.count() as u32,
        });
    }

    fn resize(&mut self, size: PhysicalSize) {
        let size = size.clamp_to(self.max_dimension);
        if size.width == 0 || size.height == 0 {
            return;
        }

        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);

        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), BackdropError> {
        let Some(buffers) = &self.buffers else {
            return Err(BackdropError::FrameSkipped("no scene loaded".to_string()));
        };

        if frame.positions_dirty {
            self.queue
                .write_buffer(&buffers.positions, 0, bytemuck::cast_slice(frame.positions));
        }
        let uniforms = SceneUniforms::from_frame(frame);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let output = self.get_surface_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        // get_surface_texture borrowed self mutably; re-borrow the buffers
        if let Some(buffers) = &self.buffers {
            render_scene_pass(
                &mut encoder,
                &self.pipelines,
                &self.bind_group,
                buffers,
                self.clear_color,
                &view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
