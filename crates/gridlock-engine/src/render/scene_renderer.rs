use crate::coords::Rect;
use crate::paint::Color;
use crate::render::shapes::{LineRenderer, LineSegment, RectRenderer, TextRenderer, TextRun};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{Command, CommandExecutor};
use crate::text::{FontId, FontLoadError, FontSystem};

/// Executes recorded drawing commands against the GPU.
///
/// Operates in two phases per frame. While the command log's lock is held,
/// [`execute`] snapshots each command into a local buffer; [`flush`] then
/// draws the snapshot with no lock held. Painting order is strict: the
/// snapshot is walked front to back, and consecutive commands of the same
/// kind are folded into a single instanced draw.
///
/// A mid-stream `Clear` becomes a rectangle covering the whole viewport, so
/// it participates in ordering like any other command.
///
/// [`execute`]: CommandExecutor::execute
/// [`flush`]: SceneRenderer::flush
#[derive(Default)]
pub struct SceneRenderer {
    rects: RectRenderer,
    lines: LineRenderer,
    text: TextRenderer,

    fonts: FontSystem,
    font: Option<FontId>,

    commands: Vec<Command>,
    warned_no_font: bool,
}

impl CommandExecutor for SceneRenderer {
    fn execute(&mut self, cmd: &Command) {
        self.commands.push(cmd.clone());
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a font for `Write` commands. The first loaded font becomes the
    /// default used for all text.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let id = self.fonts.load_font(bytes)?;
        if self.font.is_none() {
            self.font = Some(id);
        }
        Ok(id)
    }

    /// Draws the snapshotted commands into `target` and clears the snapshot.
    pub fn flush(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let commands = std::mem::take(&mut self.commands);

        // A leading Clear becomes the pass clear color, which also gives the
        // frame a defined baseline when the stream starts with anything else.
        let mut start = 0;
        let background = match commands.first() {
            Some(Command::Clear { color }) => {
                start = 1;
                *color
            }
            _ => Color::BLACK,
        };
        clear_pass(target, background);

        let viewport_rect = Rect::new(0.0, 0.0, ctx.viewport.width, ctx.viewport.height);

        let mut rects: Vec<(Rect, Color)> = Vec::new();
        let mut segments: Vec<LineSegment> = Vec::new();
        let mut runs: Vec<TextRun> = Vec::new();

        for cmd in &commands[start..] {
            match cmd {
                Command::Clear { color } => {
                    self.drain_lines(ctx, target, &mut segments);
                    self.drain_text(ctx, target, &mut runs);
                    rects.push((viewport_rect, *color));
                }
                Command::Rect { rect, color } => {
                    self.drain_lines(ctx, target, &mut segments);
                    self.drain_text(ctx, target, &mut runs);
                    rects.push((*rect, *color));
                }
                Command::Line {
                    start,
                    end,
                    thickness,
                    color,
                    color2,
                } => {
                    self.drain_rects(ctx, target, &mut rects);
                    self.drain_text(ctx, target, &mut runs);
                    segments.push(LineSegment {
                        start: *start,
                        end: *end,
                        thickness: *thickness,
                        color: *color,
                        color2: *color2,
                    });
                }
                Command::Write {
                    text,
                    rect,
                    color,
                    align,
                } => {
                    self.drain_rects(ctx, target, &mut rects);
                    self.drain_lines(ctx, target, &mut segments);
                    runs.push(TextRun {
                        text: text.clone(),
                        rect: *rect,
                        color: *color,
                        align: *align,
                    });
                }
            }
        }

        self.drain_rects(ctx, target, &mut rects);
        self.drain_lines(ctx, target, &mut segments);
        self.drain_text(ctx, target, &mut runs);
    }

    fn drain_rects(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        rects: &mut Vec<(Rect, Color)>,
    ) {
        if !rects.is_empty() {
            self.rects.render(ctx, target, rects);
            rects.clear();
        }
    }

    fn drain_lines(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        segments: &mut Vec<LineSegment>,
    ) {
        if !segments.is_empty() {
            self.lines.render(ctx, target, segments);
            segments.clear();
        }
    }

    fn drain_text(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        runs: &mut Vec<TextRun>,
    ) {
        if runs.is_empty() {
            return;
        }
        let Some(font) = self.font else {
            if !self.warned_no_font {
                log::warn!("no font loaded; text commands are skipped");
                self.warned_no_font = true;
            }
            runs.clear();
            return;
        };
        self.text.render(ctx, target, runs, &self.fonts, font);
        runs.clear();
    }
}

/// An empty pass that clears the target to `color`.
fn clear_pass(target: &mut RenderTarget<'_>, color: Color) {
    let _ = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("gridlock clear pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color {
                    r: color.r as f64,
                    g: color.g as f64,
                    b: color.b as f64,
                    a: color.a as f64,
                }),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });
}
