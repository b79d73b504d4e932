use crate::assets::Assets;
use crate::capture::{InputCapture, InputEvents};
use crate::config::OverlayConfig;
use crate::overlay::{OverlayState, ScreenCenter, ScreenRect};
use crate::render;
use crate::OverlayResult;
use eframe::egui;
use std::time::{Duration, Instant};

const WINDOW_TITLE: &str = "Input Overlay";
const STATUS_DURATION: Duration = Duration::from_secs(2);

/// Open the overlay window and run the UI loop until it is closed.
pub fn run(
    config: OverlayConfig,
    center: ScreenCenter,
    capture: InputCapture,
    events: InputEvents,
) -> OverlayResult<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(config.window_size)
            .with_position(config.window_pos)
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Box::new(OverlayApp::new(cc, config, center, capture, events))),
    )?;

    Ok(())
}

pub struct OverlayApp {
    overlay: Overlay,
    assets: Assets,
    config: OverlayConfig,
    // Owned so the hook keeps forwarding for as long as the window is open.
    capture: InputCapture,
}

impl OverlayApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        config: OverlayConfig,
        center: ScreenCenter,
        capture: InputCapture,
        events: InputEvents,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        events.set_notify(move || ctx.request_repaint());

        Self {
            overlay: Overlay::new(OverlayState::new(center), events),
            assets: Assets::load(&cc.egui_ctx, &config.asset_dir),
            config,
            capture,
        }
    }

    fn paint(&self, ui: &egui::Ui, now: Instant) {
        let painter = ui.painter();
        let origin = ui.max_rect().min;
        let state = &self.overlay.state;

        render::paint_keyboard(painter, origin, state);

        if let Some(texture) = self.assets.mouse(state.mouse_icon()) {
            render::paint_mouse_icon(
                painter,
                origin,
                texture,
                self.config.mouse_icon_pos.into(),
                self.config.mouse_icon_size.into(),
            );
        }

        if let Some(texture) = self.assets.arrow() {
            render::paint_arrow(
                painter,
                origin,
                texture,
                self.config.arrow_anchor.into(),
                state.arrow_angle(),
            );
        }

        if let Some(text) = self.overlay.status_text(now) {
            render::paint_status(painter, origin, text);
        }
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.overlay.note_capture(self.capture.is_running());

        let applied = self.overlay.pump(overlay_bounds(ctx), now);
        if applied > 0 {
            tracing::trace!(applied, "state changed");
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let drag = ui.interact(
                    ui.max_rect(),
                    ui.id().with("overlay-drag"),
                    egui::Sense::drag(),
                );
                if drag.drag_started_by(egui::PointerButton::Primary)
                    && !self.overlay.state.is_locked()
                {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }

                self.paint(ui, now);
            });

        if let Some(remaining) = self.overlay.status_remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0; 4]
    }
}

/// The window's outer rectangle in screen pixels, matching the hook's coordinates.
fn overlay_bounds(ctx: &egui::Context) -> Option<ScreenRect> {
    ctx.input(|i| {
        let viewport = i.viewport();
        let rect = viewport.outer_rect?;
        Some(to_screen_rect(
            rect,
            viewport.native_pixels_per_point.unwrap_or(1.0),
        ))
    })
}

fn to_screen_rect(rect: egui::Rect, pixels_per_point: f32) -> ScreenRect {
    ScreenRect {
        x: rect.min.x * pixels_per_point,
        y: rect.min.y * pixels_per_point,
        width: rect.width() * pixels_per_point,
        height: rect.height() * pixels_per_point,
    }
}

/// State plus the channel feeding it, independent of the window.
struct Overlay {
    state: OverlayState,
    events: InputEvents,
    lock_status: Option<LockStatus>,
    capture_lost: bool,
}

struct LockStatus {
    locked: bool,
    since: Instant,
}

impl Overlay {
    fn new(state: OverlayState, events: InputEvents) -> Self {
        Self {
            state,
            events,
            lock_status: None,
            capture_lost: false,
        }
    }

    /// Record whether the hook thread is still alive. Once it has died the
    /// overlay stops changing, so this is reported once and then shown for good.
    fn note_capture(&mut self, running: bool) {
        if running || self.capture_lost {
            return;
        }

        self.capture_lost = true;
        tracing::error!("input capture thread exited, the overlay will no longer update");
    }

    /// Apply everything pending on the channel and return how many events arrived.
    fn pump(&mut self, bounds: Option<ScreenRect>, now: Instant) -> usize {
        let events = self.events.drain();
        let applied = events.len();

        for ev in events {
            let was_locked = self.state.is_locked();
            self.state.apply(&ev, bounds);

            if self.state.is_locked() != was_locked {
                self.lock_status = Some(LockStatus {
                    locked: self.state.is_locked(),
                    since: now,
                });
            }
        }

        applied
    }

    fn status_remaining(&self, now: Instant) -> Option<Duration> {
        let status = self.lock_status.as_ref()?;
        let shown_for = now.saturating_duration_since(status.since);

        STATUS_DURATION
            .checked_sub(shown_for)
            .filter(|d| !d.is_zero())
    }

    /// A recent lock toggle wins over the permanent capture notice.
    fn status_text(&self, now: Instant) -> Option<&'static str> {
        match (&self.lock_status, self.status_remaining(now)) {
            (Some(status), Some(_)) if status.locked => Some("Window locked"),
            (Some(_), Some(_)) => Some("Window unlocked"),
            _ if self.capture_lost => Some("Input capture stopped"),
            _ => None,
        }
    }
}
