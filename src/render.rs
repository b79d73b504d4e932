//! Painting the keyboard, the mouse image and the arrow.

use crate::layout::{self, KeyCap, KEY_CAPS};
use crate::overlay::OverlayState;
use eframe::egui::{
    self, emath::Rot2, pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Shape, Stroke, Vec2,
};

const KEY_OUTLINE: Color32 = Color32::from_rgb(0, 128, 128);
const KEY_OUTLINE_WIDTH: f32 = 2.0;
const KEY_LABEL_SIZE: f32 = 14.0;

fn key_fill(pressed: bool) -> Color32 {
    if pressed {
        Color32::from_rgba_unmultiplied(255, 255, 0, 150)
    } else {
        Color32::from_rgba_unmultiplied(255, 255, 255, 30)
    }
}

/// Draw every key, then highlight the pressed ones on top.
pub fn paint_keyboard(painter: &egui::Painter, origin: Pos2, state: &OverlayState) {
    for cap in KEY_CAPS.iter() {
        paint_key(painter, origin, cap, false);
    }

    for cap in state.pressed().filter_map(layout::key_cap) {
        paint_key(painter, origin, cap, true);
    }
}

fn paint_key(painter: &egui::Painter, origin: Pos2, cap: &KeyCap, pressed: bool) {
    let outline = cap
        .outline()
        .iter()
        .map(|&(x, y)| origin + vec2(x, y))
        .collect();

    painter.add(Shape::convex_polygon(
        outline,
        key_fill(pressed),
        Stroke::new(KEY_OUTLINE_WIDTH, KEY_OUTLINE),
    ));

    let (x, y, w, h) = cap.label_box();
    let label_box = Rect::from_min_size(origin + vec2(x, y), vec2(w, h));

    painter.text(
        label_box.center(),
        Align2::CENTER_CENTER,
        cap.label,
        FontId::proportional(KEY_LABEL_SIZE),
        Color32::WHITE,
    );
}

/// Scale `size` to the largest size that fits in `bounds` with the same aspect ratio.
pub fn fit_within(size: Vec2, bounds: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }

    size * (bounds.x / size.x).min(bounds.y / size.y)
}

pub fn paint_mouse_icon(
    painter: &egui::Painter,
    origin: Pos2,
    texture: &egui::TextureHandle,
    pos: Vec2,
    bounds: Vec2,
) {
    let rect = Rect::from_min_size(origin + pos, fit_within(texture.size_vec2(), bounds));

    painter.image(texture.id(), rect, full_uv(), Color32::WHITE);
}

fn full_uv() -> Rect {
    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0))
}

/// Corners of an image of `size` rotated by `angle_degrees` around its own
/// center, with that center placed on `anchor`.
///
/// Corners are returned top-left, top-right, bottom-right, bottom-left of the
/// unrotated image. Positive angles turn clockwise on screen.
pub fn arrow_quad(anchor: Pos2, size: Vec2, angle_degrees: f32) -> [Pos2; 4] {
    let rot = Rot2::from_angle(angle_degrees.to_radians());
    let half = size / 2.0;

    [vec2(0.0, 0.0), vec2(size.x, 0.0), size, vec2(0.0, size.y)]
        .map(|corner| anchor + rot * (corner - half))
}

pub fn paint_arrow(
    painter: &egui::Painter,
    origin: Pos2,
    texture: &egui::TextureHandle,
    anchor: Vec2,
    angle_degrees: f64,
) {
    let quad = arrow_quad(origin + anchor, texture.size_vec2(), angle_degrees as f32);
    let uv = full_uv();
    let uvs = [uv.left_top(), uv.right_top(), uv.right_bottom(), uv.left_bottom()];

    let mut mesh = egui::Mesh::with_texture(texture.id());
    for (pos, uv) in quad.into_iter().zip(uvs) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos,
            uv,
            color: Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);

    painter.add(Shape::mesh(mesh));
}

pub fn paint_status(painter: &egui::Painter, origin: Pos2, text: &str) {
    painter.text(
        origin + vec2(20.0, 320.0),
        Align2::LEFT_TOP,
        text,
        FontId::proportional(16.0),
        Color32::WHITE,
    );
}
