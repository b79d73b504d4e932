use crate::error::OverlayError;
use chrono::{DateTime, Utc};
use std::convert::TryFrom;
use std::fmt;

/// A recognized keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyToken {
    /// A letter key, always an uppercase ASCII letter.
    Letter(char),
    Ctrl,
    Shift,
    Alt,
    Tab,
    Space,
    Caps,
}

impl KeyToken {
    /// The token string shown on the overlay (`"A"`, `"CTRL"`, `"Space"`, ...).
    pub fn label(&self) -> &'static str {
        const LETTERS: [&str; 26] = [
            "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q",
            "R", "S", "T", "U", "V", "W", "X", "Y", "Z",
        ];

        match self {
            KeyToken::Letter(c @ 'A'..='Z') => LETTERS[(*c as u8 - b'A') as usize],
            KeyToken::Letter(_) => "?",
            KeyToken::Ctrl => "CTRL",
            KeyToken::Shift => "SHIFT",
            KeyToken::Alt => "ALT",
            KeyToken::Tab => "TAB",
            KeyToken::Space => "Space",
            KeyToken::Caps => "CAPS",
        }
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<rdev::Key> for KeyToken {
    type Error = OverlayError;

    fn try_from(key: rdev::Key) -> Result<Self, Self::Error> {
        use rdev::Key::*;

        let letter = match key {
            KeyA => 'A',
            KeyB => 'B',
            KeyC => 'C',
            KeyD => 'D',
            KeyE => 'E',
            KeyF => 'F',
            KeyG => 'G',
            KeyH => 'H',
            KeyI => 'I',
            KeyJ => 'J',
            KeyK => 'K',
            KeyL => 'L',
            KeyM => 'M',
            KeyN => 'N',
            KeyO => 'O',
            KeyP => 'P',
            KeyQ => 'Q',
            KeyR => 'R',
            KeyS => 'S',
            KeyT => 'T',
            KeyU => 'U',
            KeyV => 'V',
            KeyW => 'W',
            KeyX => 'X',
            KeyY => 'Y',
            KeyZ => 'Z',
            ControlLeft | ControlRight => return Ok(KeyToken::Ctrl),
            ShiftLeft | ShiftRight => return Ok(KeyToken::Shift),
            Alt | AltGr => return Ok(KeyToken::Alt),
            Tab => return Ok(KeyToken::Tab),
            Space => return Ok(KeyToken::Space),
            CapsLock => return Ok(KeyToken::Caps),
            other => return Err(OverlayError::UnrecognizedKey(other)),
        };

        Ok(KeyToken::Letter(letter))
    }
}

/// A recognized mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn label(&self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        }
    }
}

impl TryFrom<rdev::Button> for MouseButton {
    type Error = OverlayError;

    fn try_from(button: rdev::Button) -> Result<Self, Self::Error> {
        match button {
            rdev::Button::Left => Ok(MouseButton::Left),
            rdev::Button::Right => Ok(MouseButton::Right),
            rdev::Button::Middle => Ok(MouseButton::Middle),
            other => Err(OverlayError::UnrecognizedButton(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Direction of a wheel event. A zero vertical delta counts as `Down`.
    pub fn from_delta(delta_y: i64) -> Self {
        if delta_y > 0 {
            ScrollDirection::Up
        } else {
            ScrollDirection::Down
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScrollDirection::Up => "scroll_up",
            ScrollDirection::Down => "scroll_down",
        }
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    /// The time the OS reported the event.
    pub ts: DateTime<Utc>,
    /// What happened.
    pub kind: InputKind,
}

/// The closed set of events the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    KeyPress(KeyToken),
    KeyRelease(KeyToken),
    Button { button: MouseButton, pressed: bool },
    Scroll(ScrollDirection),
    /// Absolute cursor position in screen pixels.
    Move { x: i32, y: i32 },
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::KeyPress(token) => write!(f, "press {token}"),
            InputKind::KeyRelease(token) => write!(f, "release {token}"),
            InputKind::Button { button, pressed } => {
                let action = if *pressed { "down" } else { "up" };
                write!(f, "{} {action}", button.label())
            }
            InputKind::Scroll(direction) => f.write_str(direction.label()),
            InputKind::Move { x, y } => write!(f, "move ({x}, {y})"),
        }
    }
}

impl TryFrom<&rdev::Event> for InputEvent {
    type Error = OverlayError;

    /// Normalize a raw hook event. Keys and buttons outside the recognized set
    /// are returned as `Unrecognized*` errors, which callers drop.
    fn try_from(ev: &rdev::Event) -> Result<Self, Self::Error> {
        let kind = match ev.event_type {
            rdev::EventType::KeyPress(key) => InputKind::KeyPress(KeyToken::try_from(key)?),
            rdev::EventType::KeyRelease(key) => InputKind::KeyRelease(KeyToken::try_from(key)?),
            rdev::EventType::ButtonPress(button) => InputKind::Button {
                button: MouseButton::try_from(button)?,
                pressed: true,
            },
            rdev::EventType::ButtonRelease(button) => InputKind::Button {
                button: MouseButton::try_from(button)?,
                pressed: false,
            },
            rdev::EventType::Wheel { delta_y, .. } => {
                InputKind::Scroll(ScrollDirection::from_delta(delta_y))
            }
            rdev::EventType::MouseMove { x, y } => InputKind::Move {
                x: x as i32,
                y: y as i32,
            },
        };

        Ok(Self {
            ts: DateTime::<Utc>::from(ev.time),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn raw(event_type: rdev::EventType) -> rdev::Event {
        rdev::Event {
            time: SystemTime::now(),
            name: None,
            event_type,
        }
    }

    fn normalize(event_type: rdev::EventType) -> Option<InputKind> {
        InputEvent::try_from(&raw(event_type)).ok().map(|e| e.kind)
    }

    #[test]
    fn letters_become_uppercase_tokens() {
        assert_eq!(
            normalize(rdev::EventType::KeyPress(rdev::Key::KeyA)),
            Some(InputKind::KeyPress(KeyToken::Letter('A')))
        );
        assert_eq!(
            normalize(rdev::EventType::KeyRelease(rdev::Key::KeyZ)),
            Some(InputKind::KeyRelease(KeyToken::Letter('Z')))
        );
        assert_eq!(KeyToken::Letter('Q').label(), "Q");
    }

    #[test]
    fn left_and_right_modifiers_collapse() {
        for (key, token) in [
            (rdev::Key::ControlLeft, KeyToken::Ctrl),
            (rdev::Key::ControlRight, KeyToken::Ctrl),
            (rdev::Key::ShiftLeft, KeyToken::Shift),
            (rdev::Key::ShiftRight, KeyToken::Shift),
            (rdev::Key::Alt, KeyToken::Alt),
            (rdev::Key::AltGr, KeyToken::Alt),
        ] {
            assert_eq!(KeyToken::try_from(key).ok(), Some(token));
        }
    }

    #[test]
    fn named_keys_use_their_token_strings() {
        let labels: Vec<_> = [
            rdev::Key::Tab,
            rdev::Key::Space,
            rdev::Key::CapsLock,
            rdev::Key::ControlLeft,
        ]
        .into_iter()
        .filter_map(|k| KeyToken::try_from(k).ok())
        .map(|t| t.to_string())
        .collect();

        assert_eq!(labels, ["TAB", "Space", "CAPS", "CTRL"]);
    }

    #[test]
    fn unrecognized_keys_are_filtered() {
        for key in [
            rdev::Key::Num1,
            rdev::Key::Escape,
            rdev::Key::F5,
            rdev::Key::MetaLeft,
            rdev::Key::Unknown(999),
        ] {
            assert!(matches!(
                InputEvent::try_from(&raw(rdev::EventType::KeyPress(key))),
                Err(OverlayError::UnrecognizedKey(_))
            ));
        }
    }

    #[test]
    fn mouse_buttons_map_one_to_one() {
        assert_eq!(
            normalize(rdev::EventType::ButtonPress(rdev::Button::Left)),
            Some(InputKind::Button {
                button: MouseButton::Left,
                pressed: true
            })
        );
        assert_eq!(
            normalize(rdev::EventType::ButtonRelease(rdev::Button::Middle)),
            Some(InputKind::Button {
                button: MouseButton::Middle,
                pressed: false
            })
        );
        assert_eq!(
            normalize(rdev::EventType::ButtonPress(rdev::Button::Unknown(4))),
            None
        );
    }

    #[test]
    fn scroll_zero_delta_counts_as_down() {
        let scroll = |delta_x, delta_y| normalize(rdev::EventType::Wheel { delta_x, delta_y });

        assert_eq!(scroll(0, 5), Some(InputKind::Scroll(ScrollDirection::Up)));
        assert_eq!(scroll(0, -3), Some(InputKind::Scroll(ScrollDirection::Down)));
        assert_eq!(scroll(0, 0), Some(InputKind::Scroll(ScrollDirection::Down)));
        assert_eq!(scroll(2, 0), Some(InputKind::Scroll(ScrollDirection::Down)));
    }

    #[test]
    fn moves_pass_through() {
        assert_eq!(
            normalize(rdev::EventType::MouseMove { x: 1060.0, y: 540.0 }),
            Some(InputKind::Move { x: 1060, y: 540 })
        );
        assert_eq!(
            normalize(rdev::EventType::MouseMove { x: -20.0, y: 0.0 }),
            Some(InputKind::Move { x: -20, y: 0 })
        );
    }

    #[test]
    fn timestamp_is_carried_over() {
        let time = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let ev = rdev::Event {
            time,
            name: Some("a".into()),
            event_type: rdev::EventType::KeyPress(rdev::Key::KeyA),
        };

        let normalized = InputEvent::try_from(&ev).unwrap();
        assert_eq!(normalized.ts.timestamp(), 1_700_000_000);
    }

    #[test]
    fn display_matches_vocabulary() {
        let shown = [
            InputKind::KeyPress(KeyToken::Shift),
            InputKind::Button {
                button: MouseButton::Right,
                pressed: false,
            },
            InputKind::Scroll(ScrollDirection::Up),
            InputKind::Move { x: 3, y: 4 },
        ]
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

        assert_eq!(shown, ["press SHIFT", "right up", "scroll_up", "move (3, 4)"]);
    }
}
