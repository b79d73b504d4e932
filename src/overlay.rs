use crate::error::OverlayError;
use crate::event::{InputEvent, InputKind, KeyToken, MouseButton, ScrollDirection};
use crate::layout;
use crate::OverlayResult;
use std::collections::BTreeSet;

/// The point the arrow aims from: the primary display's center, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenCenter {
    pub x: i32,
    pub y: i32,
}

impl ScreenCenter {
    pub fn from_display_size(width: u64, height: u64) -> Self {
        Self {
            x: (width / 2) as i32,
            y: (height / 2) as i32,
        }
    }

    /// Query the primary display once.
    pub fn primary() -> OverlayResult<Self> {
        let (width, height) =
            rdev::display_size().map_err(|e| OverlayError::DisplayGeometry(format!("{e:?}")))?;

        tracing::debug!(width, height, "primary display");

        Ok(Self::from_display_size(width, height))
    }
}

/// A screen-space rectangle in pixels. Contains its left/top edges but not its
/// right/bottom ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn contains(&self, p: CursorPosition) -> bool {
        let (px, py) = (p.x as f32, p.y as f32);

        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub x: i32,
    pub y: i32,
}

/// Which mouse image the overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseIcon {
    #[default]
    Normal,
    Left,
    Right,
    Middle,
    ScrollUp,
    ScrollDown,
}

impl MouseIcon {
    pub const ALL: [MouseIcon; 6] = [
        MouseIcon::Normal,
        MouseIcon::Left,
        MouseIcon::Right,
        MouseIcon::Middle,
        MouseIcon::ScrollUp,
        MouseIcon::ScrollDown,
    ];

    fn pressed(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => MouseIcon::Left,
            MouseButton::Right => MouseIcon::Right,
            MouseButton::Middle => MouseIcon::Middle,
        }
    }

    /// File name of the image in the asset directory.
    pub fn asset_name(&self) -> &'static str {
        match self {
            MouseIcon::Normal => "mouse_normal.png",
            MouseIcon::Left => "mouse_left.png",
            MouseIcon::Right => "mouse_right.png",
            MouseIcon::Middle => "Key_rull.png",
            MouseIcon::ScrollUp => "rollup.png",
            MouseIcon::ScrollDown => "rulldown.png",
        }
    }
}

/// Compute the arrow angle for a cursor at `(x, y)`, in degrees within `[0, 360)`.
///
/// 0° points right and angles grow clockwise, following screen coordinates.
pub fn arrow_angle(center: ScreenCenter, x: i32, y: i32) -> f64 {
    let dx = f64::from(x) - f64::from(center.x);
    let dy = f64::from(y) - f64::from(center.y);

    let mut degrees = dy.atan2(dx).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    // A tiny negative angle can round up to exactly 360.
    if degrees >= 360.0 {
        degrees = 0.0;
    }

    degrees
}

/// Everything the overlay displays. Owned and mutated by the UI thread only.
#[derive(Debug)]
pub struct OverlayState {
    center: ScreenCenter,
    pressed: BTreeSet<KeyToken>,
    icon: MouseIcon,
    cursor: Option<CursorPosition>,
    angle: f64,
    locked: bool,
}

impl OverlayState {
    pub fn new(center: ScreenCenter) -> Self {
        Self {
            center,
            pressed: BTreeSet::new(),
            icon: MouseIcon::default(),
            cursor: None,
            angle: 0.0,
            locked: false,
        }
    }

    /// Apply one normalized event.
    ///
    /// `overlay_bounds` is the window's current screen rectangle, used to gate
    /// the lock toggle.
    pub fn apply(&mut self, ev: &InputEvent, overlay_bounds: Option<ScreenRect>) {
        match ev.kind {
            InputKind::KeyPress(token) => self.on_key_press(token),
            InputKind::KeyRelease(token) => self.on_key_release(token),
            InputKind::Button { button, pressed } => {
                self.on_mouse_button(button, pressed, overlay_bounds)
            }
            InputKind::Scroll(direction) => self.on_scroll(direction),
            InputKind::Move { x, y } => self.on_mouse_move(x, y),
        }
    }

    /// Tokens without a key cap are ignored.
    pub fn on_key_press(&mut self, token: KeyToken) {
        if layout::has_key(token) {
            self.pressed.insert(token);
        }
    }

    pub fn on_key_release(&mut self, token: KeyToken) {
        self.pressed.remove(&token);
    }

    pub fn on_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        overlay_bounds: Option<ScreenRect>,
    ) {
        self.icon = if pressed {
            MouseIcon::pressed(button)
        } else {
            MouseIcon::Normal
        };

        if button == MouseButton::Right && !pressed && self.cursor_within(overlay_bounds) {
            self.locked = !self.locked;
            tracing::info!(locked = self.locked, "overlay lock toggled");
        }
    }

    /// The scroll icon stays until the next mouse button or scroll event.
    pub fn on_scroll(&mut self, direction: ScrollDirection) {
        self.icon = match direction {
            ScrollDirection::Up => MouseIcon::ScrollUp,
            ScrollDirection::Down => MouseIcon::ScrollDown,
        };
    }

    pub fn on_mouse_move(&mut self, x: i32, y: i32) {
        self.cursor = Some(CursorPosition { x, y });
        self.angle = arrow_angle(self.center, x, y);
    }

    fn cursor_within(&self, bounds: Option<ScreenRect>) -> bool {
        match (bounds, self.cursor) {
            (Some(bounds), Some(cursor)) => bounds.contains(cursor),
            _ => false,
        }
    }

    pub fn pressed(&self) -> impl Iterator<Item = KeyToken> + '_ {
        self.pressed.iter().copied()
    }

    pub fn is_pressed(&self, token: KeyToken) -> bool {
        self.pressed.contains(&token)
    }

    pub fn mouse_icon(&self) -> MouseIcon {
        self.icon
    }

    pub fn cursor(&self) -> Option<CursorPosition> {
        self.cursor
    }

    /// Arrow rotation in degrees.
    pub fn arrow_angle(&self) -> f64 {
        self.angle
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}
