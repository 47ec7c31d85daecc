//! WGPU presenter for the offscreen canvas.
//!
//! [`WgpuRenderer`] owns the surface, device and queue. Each frame it uploads the finished
//! [`Canvas`] into a texture and draws it as a fullscreen quad, scaled uniformly to fit the
//! window and letterboxed with black bars. Sampling is nearest-neighbour so pixels stay sharp.

use crate::renderer::canvas::Canvas;
use crate::renderer::pipeline_builder::{
    BindGroupLayoutBuilder, PipelineBuilder, create_fullscreen_vertices, create_vertex_2d_layout,
};
use anyhow::{Context, Result};

/// Surface, device and the screen blit pipeline.
pub struct WgpuRenderer {
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    screen: ScreenBlitter,
}

impl WgpuRenderer {
    /// Initializes the device for `surface` and the texture that mirrors a
    /// `screen_width` x `screen_height` canvas.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        window_size: (u32, u32),
        screen_size: (u32, u32),
        vsync: bool,
    ) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .context("no compatible graphics adapter found")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .context("failed to create graphics device")?;

        let surface_config = Self::create_surface_config(&surface, &adapter, window_size, vsync)?;
        surface.configure(&device, &surface_config);
        log::info!(
            "Surface configured: {:?}, {}x{}, {:?}",
            surface_config.format,
            surface_config.width,
            surface_config.height,
            surface_config.present_mode
        );

        let screen = ScreenBlitter::new(&device, surface_config.format, screen_size);

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            screen,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        (width, height): (u32, u32),
        vsync: bool,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| capabilities.formats.first())
            .copied()
            .context("surface reports no supported texture formats")?;
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        })
    }

    /// Reconfigures the surface for a new window size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Uploads `canvas` and presents it.
    ///
    /// A lost or outdated surface is reconfigured and the frame is skipped.
    pub fn present(&mut self, canvas: &Canvas) {
        self.screen.upload(&self.queue, canvas);

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return;
            }
            Err(e) => {
                log::warn!("Failed to acquire next surface texture: {e}");
                return;
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Screen Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Screen Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let (x, y, w, h) = letterbox(
                self.screen.size,
                (self.surface_config.width, self.surface_config.height),
            );
            render_pass.set_viewport(x, y, w, h, 0.0, 1.0);
            self.screen.render(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }
}

/// Texture mirror of the canvas and the pipeline that samples it.
struct ScreenBlitter {
    size: (u32, u32),
    texture: wgpu::Texture,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ScreenBlitter {
    fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        (width, height): (u32, u32),
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Screen Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let bind_group_layout = BindGroupLayoutBuilder::new(device)
            .with_label("Screen Bind Group Layout")
            .with_texture(0, wgpu::ShaderStages::FRAGMENT)
            .with_sampler(1, wgpu::ShaderStages::FRAGMENT)
            .build();

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label: Some("Screen Bind Group"),
        });

        let pipeline = PipelineBuilder::new(
            device,
            surface_format,
            include_str!("shaders/screen.wgsl"),
        )
        .with_label("Screen Pipeline")
        .with_vertex_buffer(create_vertex_2d_layout())
        .with_bind_group_layout(&bind_group_layout)
        .with_no_culling()
        .build();

        Self {
            size: (width, height),
            texture,
            pipeline,
            vertex_buffer: create_fullscreen_vertices(device),
            bind_group,
        }
    }

    fn upload(&self, queue: &wgpu::Queue, canvas: &Canvas) {
        let (width, height) = self.size;
        if (canvas.width(), canvas.height()) != self.size {
            log::warn!(
                "Canvas is {}x{}, expected {width}x{height}; skipping upload",
                canvas.width(),
                canvas.height()
            );
            return;
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            canvas.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn render(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..6, 0..1);
    }
}

/// Largest viewport with the screen's aspect ratio that fits in the window, centred.
///
/// Returns `(x, y, width, height)` in window pixels.
pub fn letterbox(screen: (u32, u32), window: (u32, u32)) -> (f32, f32, f32, f32) {
    let (sw, sh) = (screen.0.max(1) as f32, screen.1.max(1) as f32);
    let (ww, wh) = (window.0 as f32, window.1 as f32);
    let scale = (ww / sw).min(wh / sh);
    let (w, h) = (sw * scale, sh * scale);
    ((ww - w) / 2.0, (wh - h) / 2.0, w, h)
}
