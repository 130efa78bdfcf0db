#![forbid(unsafe_code)]

//! Input events as the Folio screens see them.
//!
//! The terminal backend reports far more than the screens care about. This
//! module narrows it down to keys, primary-button pointer gestures, signed
//! wheel steps, and resizes. Anything else (paste, focus, secondary buttons,
//! keys with no binding) is dropped at the boundary so screens never need a
//! catch-all arm for backend noise.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as ct;

/// One input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Pointer(PointerEvent),
    /// The terminal now has `cols` × `rows` cells.
    Resize { cols: u16, rows: u16 },
}

impl Event {
    /// Narrow a Crossterm event. Returns `None` for input with no Folio meaning.
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: ct::Event) -> Option<Self> {
        match event {
            ct::Event::Key(key) => key_from_crossterm(key).map(Event::Key),
            ct::Event::Mouse(mouse) => pointer_from_crossterm(mouse).map(Event::Pointer),
            ct::Event::Resize(cols, rows) => Some(Event::Resize { cols, rows }),
            _ => None,
        }
    }
}

/// A key press, repeat, or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    /// Terminals without the keyboard enhancement protocol only report presses.
    pub repeat: KeyRepeat,
}

impl KeyEvent {
    /// A plain press of `code`.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            repeat: KeyRepeat::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this is the character `c`, regardless of modifiers.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.code == KeyCode::Char(c)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Presses and auto-repeats act; releases do not.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self.repeat, KeyRepeat::Release)
    }
}

/// Keys with a binding somewhere in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Left,
    Right,
    Up,
    Down,
}

/// Press phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyRepeat {
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Held modifier keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
    }
}

/// Pointer gesture with the primary button, or wheel motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Column, 0 at the left edge.
    pub col: u16,
    /// Row, 0 at the top edge.
    pub row: u16,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerKind, col: u16, row: u16) -> Self {
        Self { kind, col, row }
    }
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Primary button went down.
    Press,
    /// Moved with the primary button held.
    Drag,
    /// Primary button came up.
    Release,
    /// Moved with no button held.
    Hover,
    /// Wheel notches: positive scrolls forward (down or right), negative back.
    ///
    /// Horizontal and vertical wheels both count, so trackpads that emit
    /// sideways scrolling drive a horizontal strip naturally.
    Wheel(i8),
}

#[cfg(not(target_arch = "wasm32"))]
fn key_from_crossterm(key: ct::KeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Esc => KeyCode::Escape,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::BackTab => KeyCode::BackTab,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        _ => return None,
    };
    let repeat = match key.kind {
        ct::KeyEventKind::Press => KeyRepeat::Press,
        ct::KeyEventKind::Repeat => KeyRepeat::Repeat,
        ct::KeyEventKind::Release => KeyRepeat::Release,
    };

    let mut modifiers = Modifiers::NONE;
    for (from, to) in [
        (ct::KeyModifiers::SHIFT, Modifiers::SHIFT),
        (ct::KeyModifiers::ALT, Modifiers::ALT),
        (ct::KeyModifiers::CONTROL, Modifiers::CTRL),
    ] {
        modifiers.set(to, key.modifiers.contains(from));
    }

    Some(KeyEvent {
        code,
        modifiers,
        repeat,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn pointer_from_crossterm(mouse: ct::MouseEvent) -> Option<PointerEvent> {
    use ct::MouseButton::Left;
    use ct::MouseEventKind as M;

    let kind = match mouse.kind {
        M::Down(Left) => PointerKind::Press,
        M::Drag(Left) => PointerKind::Drag,
        M::Up(Left) => PointerKind::Release,
        M::Moved => PointerKind::Hover,
        M::ScrollDown | M::ScrollRight => PointerKind::Wheel(1),
        M::ScrollUp | M::ScrollLeft => PointerKind::Wheel(-1),
        M::Down(_) | M::Drag(_) | M::Up(_) => return None,
    };
    Some(PointerEvent::new(kind, mouse.column, mouse.row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_helpers() {
        let key = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(key.is_char('c'));
        assert!(!key.is_char('C'));
        assert!(key.ctrl());
        assert!(key.is_actionable());

        let released = KeyEvent {
            repeat: KeyRepeat::Release,
            ..KeyEvent::new(KeyCode::Enter)
        };
        assert!(!released.is_actionable());
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn mouse(kind: ct::MouseEventKind, column: u16, row: u16) -> ct::Event {
        ct::Event::Mouse(ct::MouseEvent {
            kind,
            column,
            row,
            modifiers: ct::KeyModifiers::NONE,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn primary_drag_keeps_coordinates() {
        let event = Event::from_crossterm(mouse(
            ct::MouseEventKind::Drag(ct::MouseButton::Left),
            12,
            4,
        ));
        assert_eq!(
            event,
            Some(Event::Pointer(PointerEvent::new(PointerKind::Drag, 12, 4)))
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn wheel_axes_collapse_to_signed_steps() {
        let steps = |kind| match Event::from_crossterm(mouse(kind, 0, 0)) {
            Some(Event::Pointer(PointerEvent {
                kind: PointerKind::Wheel(n),
                ..
            })) => n,
            other => panic!("not a wheel event: {other:?}"),
        };
        assert_eq!(steps(ct::MouseEventKind::ScrollDown), 1);
        assert_eq!(steps(ct::MouseEventKind::ScrollRight), 1);
        assert_eq!(steps(ct::MouseEventKind::ScrollUp), -1);
        assert_eq!(steps(ct::MouseEventKind::ScrollLeft), -1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn secondary_buttons_and_unbound_keys_are_dropped() {
        let right = mouse(ct::MouseEventKind::Down(ct::MouseButton::Right), 1, 1);
        assert_eq!(Event::from_crossterm(right), None);

        let caps = ct::Event::Key(ct::KeyEvent::new(
            ct::KeyCode::CapsLock,
            ct::KeyModifiers::NONE,
        ));
        assert_eq!(Event::from_crossterm(caps), None);
        assert_eq!(Event::from_crossterm(ct::Event::FocusGained), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn ctrl_is_mapped() {
        let raw = ct::Event::Key(ct::KeyEvent::new(
            ct::KeyCode::Char('c'),
            ct::KeyModifiers::CONTROL | ct::KeyModifiers::SHIFT,
        ));
        let Some(Event::Key(key)) = Event::from_crossterm(raw) else {
            panic!("expected key event");
        };
        assert!(key.ctrl());
        assert!(key.modifiers.contains(Modifiers::SHIFT));
        assert!(!key.modifiers.contains(Modifiers::ALT));
    }
}
