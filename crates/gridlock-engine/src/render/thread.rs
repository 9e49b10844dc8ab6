use std::thread::JoinHandle;

use crate::coords::Viewport;
use crate::core::SessionFlag;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{RenderCtx, RenderTarget, SceneRenderer};
use crate::scene::Graphics;
use crate::time::FramePacer;

/// Render thread configuration.
#[derive(Debug, Clone)]
pub struct RenderThreadConfig {
    /// Presentation cadence in frames per second.
    pub frame_rate: u32,
    /// Font used for text commands. Text is skipped (with one warning) when
    /// absent.
    pub font_bytes: Option<Vec<u8>>,
}

impl Default for RenderThreadConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            font_bytes: None,
        }
    }
}

/// Handle to the dedicated render thread.
///
/// The thread owns the GPU context exclusively for its whole life. It paces
/// itself at the configured frame rate, presents only when the command log
/// has pending work, and exits when the session is invalidated.
pub struct RenderThread {
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    pub fn spawn(
        gpu: Gpu,
        graphics: Graphics,
        session: SessionFlag,
        config: RenderThreadConfig,
    ) -> Self {
        let handle = std::thread::Builder::new()
            .name("gridlock-render".into())
            .spawn(move || render_loop(gpu, graphics, session, config))
            .expect("failed to spawn render thread");

        Self {
            handle: Some(handle),
        }
    }

    /// Waits for the render thread to exit. The session must already be
    /// invalidated.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("render thread panicked");
            }
        }
    }
}

fn render_loop(mut gpu: Gpu, graphics: Graphics, session: SessionFlag, config: RenderThreadConfig) {
    log::info!("render thread started on adapter '{}'", gpu.adapter_name());

    let mut scene = SceneRenderer::new();
    if let Some(bytes) = &config.font_bytes {
        if let Err(e) = scene.load_font(bytes) {
            log::warn!("{e}; text commands will be skipped");
        }
    }

    let mut pacer = FramePacer::from_rate(config.frame_rate.max(1));

    while session.is_valid() {
        if gpu.resize_if_needed() {
            // The old frame no longer matches the surface; repaint fully.
            graphics.make_dirty();
        }

        let size = gpu.size();
        if size.width == 0 || size.height == 0 || !graphics.is_dirty() {
            pacer.sleep_until_next_tick();
            continue;
        }

        // Swapchain images don't retain earlier contents, so every presented
        // frame replays the log from the top. The cursor still decides
        // whether a frame is needed at all.
        graphics.make_dirty();

        match gpu.begin_frame() {
            Ok(mut frame) => {
                let viewport = Viewport::new(size.width as f32, size.height as f32);
                let executed = graphics.render_pending(&mut scene);

                let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), viewport);
                let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
                scene.flush(&ctx, &mut target);

                gpu.submit(frame);
                log::trace!("presented frame ({executed} commands)");
            }
            Err(e) => match gpu.handle_surface_error(e) {
                SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {}
                SurfaceErrorAction::Fatal => {
                    log::error!("fatal surface error, ending session");
                    session.invalidate();
                }
            },
        }

        pacer.sleep_until_next_tick();
    }

    log::info!("render thread exiting");
}
