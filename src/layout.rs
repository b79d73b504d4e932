//! The fixed keyboard layout drawn by the overlay.

use crate::event::KeyToken;

/// Height of every key cap.
pub const KEY_HEIGHT: f32 = 60.0;
/// Horizontal lean of the key outline.
pub const KEY_SKEW: f32 = 15.0;

/// A drawn key: its label, the token that lights it and where it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyCap {
    pub label: &'static str,
    /// `None` for decorative caps that never light up.
    pub token: Option<KeyToken>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

const fn letter(label: &'static str, x: f32, y: f32) -> KeyCap {
    KeyCap {
        label,
        token: Some(KeyToken::Letter(label.as_bytes()[0] as char)),
        x,
        y,
        width: 60.0,
    }
}

const fn named(
    label: &'static str,
    token: Option<KeyToken>,
    x: f32,
    y: f32,
    width: f32,
) -> KeyCap {
    KeyCap {
        label,
        token,
        x,
        y,
        width,
    }
}

/// All key caps, in draw order.
pub static KEY_CAPS: [KeyCap; 25] = [
    named("TAB", Some(KeyToken::Tab), 20.0, 50.0, 100.0),
    letter("Q", 120.0, 50.0),
    letter("W", 180.0, 50.0),
    letter("E", 240.0, 50.0),
    letter("R", 300.0, 50.0),
    letter("T", 360.0, 50.0),
    letter("Y", 420.0, 50.0),
    named("CAPS", Some(KeyToken::Caps), 30.0, 110.0, 100.0),
    letter("A", 130.0, 110.0),
    letter("S", 190.0, 110.0),
    letter("D", 250.0, 110.0),
    letter("F", 310.0, 110.0),
    letter("G", 370.0, 110.0),
    letter("H", 430.0, 110.0),
    named("SHIFT", Some(KeyToken::Shift), 40.0, 170.0, 110.0),
    letter("Z", 150.0, 170.0),
    letter("X", 210.0, 170.0),
    letter("C", 270.0, 170.0),
    letter("V", 330.0, 170.0),
    letter("B", 390.0, 170.0),
    letter("N", 450.0, 170.0),
    named("CTRL", Some(KeyToken::Ctrl), 40.0, 230.0, 80.0),
    named("Win", None, 120.0, 230.0, 60.0),
    named("ALT", Some(KeyToken::Alt), 180.0, 230.0, 50.0),
    named("Space", Some(KeyToken::Space), 230.0, 230.0, 300.0),
];

/// The cap lit by `token`, if the layout has one.
pub fn key_cap(token: KeyToken) -> Option<&'static KeyCap> {
    KEY_CAPS.iter().find(|cap| cap.token == Some(token))
}

pub fn has_key(token: KeyToken) -> bool {
    key_cap(token).is_some()
}

impl KeyCap {
    /// Corners of the slanted outline, clockwise from the top left.
    pub fn outline(&self) -> [(f32, f32); 4] {
        let (x, y, w) = (self.x, self.y, self.width);

        [
            (x + KEY_SKEW, y),
            (x + w + KEY_SKEW, y),
            (x + w - KEY_SKEW, y + KEY_HEIGHT),
            (x - KEY_SKEW, y + KEY_HEIGHT),
        ]
    }

    /// The box the label is centered in: `(x, y, width, height)`.
    pub fn label_box(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.width, KEY_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn labels_match_tokens() {
        for cap in KEY_CAPS.iter() {
            if let Some(token) = cap.token {
                assert_eq!(cap.label, token.label());
            }
        }
    }

    #[test]
    fn every_token_appears_once() {
        let tokens: Vec<_> = KEY_CAPS.iter().filter_map(|c| c.token).collect();
        let unique: HashSet<_> = tokens.iter().copied().collect();

        assert_eq!(tokens.len(), unique.len());
        assert_eq!(tokens.len(), 24);
    }

    #[test]
    fn win_is_decorative() {
        let win = KEY_CAPS.iter().find(|c| c.label == "Win").unwrap();
        assert_eq!(win.token, None);
    }

    #[test]
    fn lookup() {
        assert_eq!(key_cap(KeyToken::Space).map(|c| c.width), Some(300.0));
        assert_eq!(
            key_cap(KeyToken::Letter('A')).map(|c| (c.x, c.y)),
            Some((130.0, 110.0))
        );
        assert!(has_key(KeyToken::Ctrl));
        assert!(!has_key(KeyToken::Letter('P')));
        assert!(!has_key(KeyToken::Letter('M')));
    }

    #[test]
    fn outline_leans_right() {
        let tab = key_cap(KeyToken::Tab).unwrap();

        assert_eq!(
            tab.outline(),
            [(35.0, 50.0), (135.0, 50.0), (105.0, 110.0), (5.0, 110.0)]
        );
        assert_eq!(tab.label_box(), (20.0, 50.0, 100.0, 60.0));
    }
}
