//! Key chords as the browser reports them: a key plus modifier flags

use std::fmt;

/// `ctrlKey` / `shiftKey` / `altKey` / `metaKey` packed into one byte
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

const CTRL_BIT: u8 = 1;
const SHIFT_BIT: u8 = 1 << 1;
const ALT_BIT: u8 = 1 << 2;
const META_BIT: u8 = 1 << 3;

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(CTRL_BIT);
    pub const SHIFT: Modifiers = Modifiers(SHIFT_BIT);
    /// Option on macOS
    pub const ALT: Modifiers = Modifiers(ALT_BIT);
    /// Cmd on macOS
    pub const META: Modifiers = Modifiers(META_BIT);

    /// From the four `KeyboardEvent` flags
    pub const fn from_flags(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        Modifiers(
            (ctrl as u8) * CTRL_BIT
                | (shift as u8) * SHIFT_BIT
                | (alt as u8) * ALT_BIT
                | (meta as u8) * META_BIT,
        )
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every flag in `other` is held
    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Modifiers::CTRL, "Ctrl"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::META, "Cmd"),
        ];
        let held: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&held.join("+"))
    }
}

/// The non-modifier part of a chord
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Letter, digit or punctuation, lowercased
    Char(char),
    Enter,
    Escape,
    Tab,
    Space,
    /// F1 to F24
    F(u8),
}

impl KeyCode {
    /// Parse a key name, case-insensitively.
    ///
    /// Accepts `KeyboardEvent.key` values (`"Enter"`, `"Escape"`, `" "`) as
    /// well as keymap spellings (`"esc"`, `"return"`, `"f5"`).
    pub fn from_name(name: &str) -> Option<KeyCode> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(if c == ' ' {
                KeyCode::Space
            } else {
                KeyCode::Char(c.to_ascii_lowercase())
            });
        }

        let lower = name.to_ascii_lowercase();
        let code = match lower.as_str() {
            "enter" | "return" => KeyCode::Enter,
            "escape" | "esc" => KeyCode::Escape,
            "tab" => KeyCode::Tab,
            "space" | "spacebar" => KeyCode::Space,
            other => {
                let n: u8 = other.strip_prefix('f')?.parse().ok()?;
                if !(1..=24).contains(&n) {
                    return None;
                }
                KeyCode::F(n)
            }
        };
        Some(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Escape => f.write_str("Escape"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::Space => f.write_str("Space"),
            KeyCode::F(n) => write!(f, "F{}", n),
        }
    }
}

/// One key press with the modifiers held at the time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Bare key, no modifiers
    pub const fn key(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self::new(KeyCode::Char(c.to_ascii_lowercase()), mods)
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.mods, self.key)
        }
    }
}
