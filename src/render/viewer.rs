//! Windowed host for the face engine: owns the wgpu surface, polls the
//! style channel, samples complication sources and repaints on a fixed
//! period.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use wgpu::{self, SurfaceError};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Fullscreen, Window, WindowAttributes},
};

use crate::complications::{sample, ComplicationSlots};
use crate::config::Configuration;
use crate::events::{StyleReceiver, StyleSender};
use crate::face::canvas::DisplayList;
use crate::face::geometry::DialBounds;
use crate::face::text::FontLibrary;
use crate::face::{DrawMode, FaceRenderer, FrameTime, Layers, RenderParams};
use crate::render::tess::FacePainter;
use crate::style::{parse_rgba_hex, StyleSnapshot, COLOR_OPTIONS, FONT_OPTIONS};

const HIGHLIGHT_TINT: &str = "#00000080";

#[derive(Debug)]
enum FaceEvent {
    Cancelled,
}

struct FaceApp {
    cfg: Configuration,
    cancel: CancellationToken,
    style_tx: StyleSender,
    style_rx: StyleReceiver,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    surface_config: Option<wgpu::SurfaceConfiguration>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    painter: Option<FacePainter>,
    renderer: Option<FaceRenderer>,
    fonts: FontLibrary,
    slots: ComplicationSlots,
    draw_mode: DrawMode,
    highlight: bool,
    color_index: usize,
    font_index: usize,
}

impl FaceApp {
    fn new(cfg: Configuration, cancel: CancellationToken, style_tx: StyleSender, style_rx: StyleReceiver) -> Self {
        let mut slots = ComplicationSlots::new();
        for complication in &cfg.complications {
            slots.set_enabled(complication.slot, true);
        }
        let initial = style_rx.borrow().clone();
        let color_index = COLOR_OPTIONS
            .iter()
            .position(|option| option.id == initial.color_id)
            .unwrap_or(0);
        let font_index = FONT_OPTIONS
            .iter()
            .position(|option| option.id == initial.font_id)
            .unwrap_or(0);
        Self {
            cfg,
            cancel,
            style_tx,
            style_rx,
            window: None,
            surface: None,
            surface_config: None,
            device: None,
            queue: None,
            painter: None,
            renderer: None,
            fonts: FontLibrary::system(),
            slots,
            draw_mode: DrawMode::Interactive,
            highlight: false,
            color_index,
            font_index,
        }
    }

    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) -> Option<Arc<Window>> {
        if let Some(window) = self.window.as_ref() {
            return Some(window.clone());
        }

        let mut attrs = WindowAttributes::default().with_title("Concentric Face");
        if self.cfg.window.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        } else {
            attrs = attrs.with_inner_size(PhysicalSize::new(
                self.cfg.window.width,
                self.cfg.window.height,
            ));
        }
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                self.window = Some(window.clone());
                Some(window)
            }
            Err(err) => {
                error!(error = %err, "failed to create face window");
                None
            }
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> Result<()> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("failed to acquire GPU adapter")?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|fmt| fmt.is_srgb())
            .unwrap_or(caps.formats[0]);

        let limits = adapter.limits();
        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("face-device"),
            required_features: wgpu::Features::empty(),
            experimental_features: Default::default(),
            required_limits: limits,
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::default(),
        }))
        .context("failed to acquire GPU device")?;

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        info!(
            width = config.width,
            height = config.height,
            format = ?config.format,
            "face surface configured",
        );

        let painter = FacePainter::new(&device, format);
        let renderer = FaceRenderer::new(self.style_rx.borrow().clone(), &self.fonts)
            .context("resolving face font")?;

        self.surface = Some(surface);
        self.surface_config = Some(config);
        self.device = Some(device);
        self.queue = Some(queue);
        self.painter = Some(painter);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn handle_resize(&mut self, new_size: PhysicalSize<u32>) {
        let surface = match self.surface.as_ref() {
            Some(surface) => surface,
            None => return,
        };
        let device = match self.device.as_ref() {
            Some(device) => device,
            None => return,
        };
        let config = match self.surface_config.as_mut() {
            Some(config) => config,
            None => return,
        };

        config.width = new_size.width.max(1);
        config.height = new_size.height.max(1);
        surface.configure(device, config);
        debug!(width = config.width, height = config.height, "face surface resized");

        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn apply_pending_style(&mut self) {
        let changed = matches!(self.style_rx.has_changed(), Ok(true));
        if !changed {
            return;
        }
        let snapshot = self.style_rx.borrow_and_update().clone();
        if let Some(renderer) = self.renderer.as_mut() {
            if let Err(err) = renderer.set_style(snapshot, &self.fonts) {
                warn!(error = ?err, "style change rejected; keeping previous style");
            }
        }
    }

    fn update_complications(&mut self) {
        let now = Local::now().naive_local();
        for complication in &self.cfg.complications {
            self.slots
                .set_data(complication.slot, sample(&complication.source, now));
        }
    }

    fn cycle_color(&mut self, step: isize) {
        let len = COLOR_OPTIONS.len() as isize;
        self.color_index = ((self.color_index as isize + step).rem_euclid(len)) as usize;
        self.send_style();
    }

    fn cycle_font(&mut self, step: isize) {
        let len = FONT_OPTIONS.len() as isize;
        self.font_index = ((self.font_index as isize + step).rem_euclid(len)) as usize;
        self.send_style();
    }

    fn send_style(&mut self) {
        let snapshot = StyleSnapshot {
            color_id: COLOR_OPTIONS[self.color_index].id.to_string(),
            font_id: FONT_OPTIONS[self.font_index].id.to_string(),
        };
        info!(color = %snapshot.color_id, font = %snapshot.font_id, "style selected");
        self.style_tx.send_replace(snapshot);
    }

    fn handle_key(&mut self, event: KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        match event.logical_key.as_ref() {
            Key::Named(NamedKey::Escape) => {
                self.cancel.cancel();
            }
            Key::Named(NamedKey::ArrowUp) => self.cycle_color(1),
            Key::Named(NamedKey::ArrowDown) => self.cycle_color(-1),
            Key::Named(NamedKey::ArrowRight) => self.cycle_font(1),
            Key::Named(NamedKey::ArrowLeft) => self.cycle_font(-1),
            Key::Character("a") => {
                self.draw_mode = match self.draw_mode {
                    DrawMode::Interactive => DrawMode::Ambient,
                    _ => DrawMode::Interactive,
                };
                info!(mode = ?self.draw_mode, "draw mode toggled");
            }
            Key::Character("h") => {
                self.highlight = !self.highlight;
            }
            _ => {}
        }
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop) {
        self.apply_pending_style();
        self.update_complications();

        let Some(config) = self.surface_config.as_ref() else {
            return;
        };
        let surface_size = PhysicalSize::new(config.width, config.height);
        let bounds = DialBounds::from_surface(config.width, config.height);
        let time = FrameTime::from_time(Local::now().time(), self.cfg.use_24h);
        let params = RenderParams {
            draw_mode: self.draw_mode,
            layers: Layers::all(),
        };

        let mut list = DisplayList::new();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(&mut list, bounds, time, params, &self.slots);
            if self.highlight {
                let tint = parse_rgba_hex(HIGHLIGHT_TINT).unwrap_or([0.0, 0.0, 0.0, 0.5]);
                renderer.render_highlight_layer(&mut list, bounds, &self.slots, tint);
            }
        }

        let (Some(surface), Some(device), Some(queue), Some(painter)) = (
            self.surface.as_ref(),
            self.device.as_ref(),
            self.queue.as_ref(),
            self.painter.as_mut(),
        ) else {
            return;
        };
        let Some(window) = self.window.as_ref().map(Arc::clone) else {
            return;
        };

        painter.prepare(device, &list, surface_size);

        let frame = match surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::Outdated) | Err(SurfaceError::Lost) => {
                info!("face surface lost; reconfiguring");
                self.handle_resize(window.inner_size());
                return;
            }
            Err(SurfaceError::OutOfMemory) => {
                error!("face surface out of memory; exiting event loop");
                event_loop.exit();
                return;
            }
            Err(SurfaceError::Timeout) => {
                warn!("face surface acquisition timed out");
                return;
            }
            Err(SurfaceError::Other) => {
                warn!("face surface reported an unknown error; retrying");
                self.handle_resize(window.inner_size());
                return;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("face-encoder"),
        });

        let clear = list
            .background()
            .map(|color| wgpu::Color {
                r: color[0] as f64,
                g: color[1] as f64,
                b: color[2] as f64,
                a: color[3] as f64,
            })
            .unwrap_or(wgpu::Color::BLACK);

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("face-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            painter.draw(&mut pass);
        }

        queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        event_loop.set_control_flow(ControlFlow::WaitUntil(
            Instant::now() + self.cfg.frame_period,
        ));
    }
}

impl ApplicationHandler<FaceEvent> for FaceApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.cancel.is_cancelled() {
            event_loop.exit();
            return;
        }

        let Some(window) = self.ensure_window(event_loop) else {
            event_loop.exit();
            return;
        };

        if self.device.is_none() {
            if let Err(err) = self.init_gpu(window) {
                error!(error = ?err, "failed to initialize GPU state");
                event_loop.exit();
                return;
            }
        }

        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("face window close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resize(new_size);
            }
            WindowEvent::ScaleFactorChanged {
                mut inner_size_writer,
                ..
            } => {
                let size = window.inner_size();
                let _ = inner_size_writer.request_inner_size(size);
                self.handle_resize(size);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event);
            }
            WindowEvent::RedrawRequested => {
                self.draw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FaceEvent) {
        match event {
            FaceEvent::Cancelled => {
                info!("face received cancellation event");
                event_loop.exit();
            }
        }
    }
}

pub fn run(
    cfg: Configuration,
    cancel: CancellationToken,
    style_tx: StyleSender,
    style_rx: StyleReceiver,
) -> Result<()> {
    let event_loop = EventLoop::<FaceEvent>::with_user_event()
        .build()
        .context("failed to build face event loop")?;
    let proxy = event_loop.create_proxy();

    let cancel_task = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            cancel.cancelled().await;
            let _ = proxy.send_event(FaceEvent::Cancelled);
        })
    };

    let mut app = FaceApp::new(cfg, cancel, style_tx, style_rx);
    let run_result = event_loop.run_app(&mut app);
    cancel_task.abort();

    run_result.context("face event loop failed")
}
