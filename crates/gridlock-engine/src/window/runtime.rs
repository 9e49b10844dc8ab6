use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Vec2;
use crate::core::{App, AppCtx, SessionFlag};
use crate::device::{Gpu, GpuInit};
use crate::render::{RenderThread, RenderThreadConfig};
use crate::scene::Graphics;
use crate::work::{SchedulerConfig, Watchdog, WatchdogConfig, WorkQueue, WorkScheduler};

use super::events::{map_key, map_mouse_button};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Presentation cadence of the render thread.
    pub frame_rate: u32,
    /// Cadence of the periodic `update` callback.
    pub update_rate: u32,

    /// Font handed to the render thread for text commands.
    pub font_bytes: Option<Vec<u8>>,

    pub scheduler: SchedulerConfig,
    pub watchdog: WatchdogConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gridlock".to_string(),
            initial_size: LogicalSize::new(800.0, 800.0),
            frame_rate: 60,
            update_rate: 60,
            font_bytes: None,
            scheduler: SchedulerConfig::default(),
            watchdog: WatchdogConfig::default(),
        }
    }
}

/// Entry point for the runtime.
///
/// `run` owns the calling thread until the session ends: winit insists on
/// driving the platform event loop from the main thread. Everything else
/// happens on the three threads the runtime starts once the window exists:
/// the worker (application callbacks), the watchdog, and the render thread
/// (exclusive owner of the GPU).
pub struct Runtime;

impl Runtime {
    pub fn run<A: App>(config: RuntimeConfig, app: A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut driver = Driver::new(config, app);

        event_loop
            .run_app(&mut driver)
            .context("winit event loop terminated with error")?;

        if let Some(e) = driver.init_error.take() {
            return Err(e);
        }
        Ok(())
    }
}

struct Driver<A: App> {
    config: RuntimeConfig,
    app: Arc<Mutex<A>>,

    graphics: Graphics,
    session: SessionFlag,

    window: Option<Arc<Window>>,
    scheduler: Option<WorkScheduler>,
    watchdog: Option<Watchdog>,
    render: Option<RenderThread>,
    queue: Option<WorkQueue>,

    /// Last observed cursor position, in physical pixels.
    cursor: Vec2,

    /// Handshake for the periodic update: set when the previous update task
    /// has finished, cleared when the next one is submitted. A slow update
    /// therefore delays the following tick instead of stacking tasks.
    needs_update: Arc<AtomicBool>,
    next_update: Instant,

    init_error: Option<anyhow::Error>,
}

impl<A: App> Driver<A> {
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app: Arc::new(Mutex::new(app)),
            graphics: Graphics::default(),
            session: SessionFlag::new(),
            window: None,
            scheduler: None,
            watchdog: None,
            render: None,
            queue: None,
            cursor: Vec2::zero(),
            needs_update: Arc::new(AtomicBool::new(true)),
            next_update: Instant::now(),
            init_error: None,
        }
    }

    fn update_interval(&self) -> Duration {
        Duration::from_secs(1) / self.config.update_rate.max(1)
    }

    fn window_size(&self) -> Vec2 {
        self.window
            .as_ref()
            .map(|w| {
                let size = w.inner_size();
                Vec2::new(size.width as f32, size.height as f32)
            })
            .unwrap_or_default()
    }

    fn ctx(&self, work: &WorkQueue) -> AppCtx {
        AppCtx {
            graphics: self.graphics.clone(),
            work: work.clone(),
            window_size: self.window_size(),
        }
    }

    /// Queues an application callback on the worker thread.
    fn submit(&self, name: &str, f: impl FnOnce(&mut A, &AppCtx) + Send + 'static) {
        let Some(queue) = self.queue.as_ref() else {
            return;
        };
        let app = Arc::clone(&self.app);
        let ctx = self.ctx(queue);
        queue.submit(name, move || {
            let mut app = app.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut app, &ctx);
        });
    }

    fn start_threads(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        // The palette is authored in sRGB and the shaders write it verbatim,
        // so ask for a non-sRGB surface (no second encoding pass).
        let gpu_init = GpuInit {
            prefer_srgb: false,
            ..GpuInit::default()
        };
        let gpu = pollster::block_on(Gpu::new(Arc::clone(&window), gpu_init))
            .context("GPU initialization failed")?;

        let scheduler = WorkScheduler::start(self.session.clone(), self.config.scheduler.clone());
        let watchdog = Watchdog::start(
            self.session.clone(),
            scheduler.monitor(),
            self.config.watchdog.clone(),
        );
        let render = RenderThread::spawn(
            gpu,
            self.graphics.clone(),
            self.session.clone(),
            RenderThreadConfig {
                frame_rate: self.config.frame_rate,
                font_bytes: self.config.font_bytes.clone(),
            },
        );

        self.queue = Some(scheduler.queue());
        self.window = Some(window);
        self.scheduler = Some(scheduler);
        self.watchdog = Some(watchdog);
        self.render = Some(render);

        self.submit("setup", |app, ctx| app.setup(ctx));
        self.submit("draw", |app, ctx| app.draw(ctx));
        self.needs_update.store(true, Ordering::Release);
        self.next_update = Instant::now() + self.update_interval();

        Ok(())
    }

    /// Ends the session and tears the threads down, in dependency order.
    /// Idempotent; later calls find nothing left to join.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.session.invalidate();

        if let Some(render) = self.render.take() {
            render.join();
        }
        if let Some(watchdog) = self.watchdog.take() {
            watchdog.join();
        }
        self.queue = None;
        if let Some(scheduler) = self.scheduler.take() {
            scheduler.join();
        }
        self.window = None;

        event_loop.exit();
    }

    fn tick_update(&mut self) {
        let now = Instant::now();
        if now < self.next_update {
            return;
        }
        self.next_update = now + self.update_interval();

        if self.needs_update.swap(false, Ordering::AcqRel) {
            let needs_update = Arc::clone(&self.needs_update);
            self.submit("update", move |app, ctx| {
                app.update(ctx);
                needs_update.store(true, Ordering::Release);
            });
        }
    }
}

impl<A: App> ApplicationHandler for Driver<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.start_threads(event_loop) {
            log::error!("runtime startup failed: {e:#}");
            self.init_error = Some(e);
            self.shutdown(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.session.is_valid() {
            // The render thread ends the session on fatal surface errors.
            self.shutdown(event_loop);
            return;
        }

        self.tick_update();
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_update));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, shutting down");
                self.shutdown(event_loop);
            }

            WindowEvent::RedrawRequested => {
                self.graphics.make_dirty();
                self.submit("draw", |app, ctx| app.draw(ctx));
            }

            WindowEvent::Resized(size) => {
                let new_size = Vec2::new(size.width as f32, size.height as f32);
                self.submit("resize", move |app, ctx| app.window_resized(ctx, new_size));
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                let button = map_mouse_button(button);
                let at = self.cursor;
                self.submit("mouse-pressed", move |app, ctx| {
                    app.mouse_pressed(ctx, button, at)
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    let key = map_key(event.physical_key);
                    self.submit("key-pressed", move |app, ctx| app.key_pressed(ctx, key));
                }
            }

            WindowEvent::DroppedFile(path) => {
                self.submit("paths-dropped", move |app, ctx| {
                    app.paths_dropped(ctx, vec![path])
                });
            }

            _ => {}
        }
    }
}
