//! Adapter to convert browser `KeyboardEvent` data to our Keystroke type

use super::types::{KeyCode, Keystroke, Modifiers};

/// Convert `KeyboardEvent.key` / `KeyboardEvent.code` plus modifier flags.
///
/// Letters and digits come from the physical `code`, since `key` is altered
/// by modifiers (Alt+A yields `"å"` on macOS, Shift+G yields `"G"`).
/// Returns None for bare modifier presses and unknown keys.
pub fn keystroke_from_dom(
    key: &str,
    code: &str,
    ctrl: bool,
    shift: bool,
    alt: bool,
    meta: bool,
) -> Option<Keystroke> {
    let mods = Modifiers::from_flags(ctrl, shift, alt, meta);

    if let Some(physical) = physical_char(code) {
        return Some(Keystroke::new(KeyCode::Char(physical), mods));
    }

    match key {
        "Shift" | "Control" | "Alt" | "Meta" | "AltGraph" | "CapsLock" => None,
        other => KeyCode::from_name(other).map(|key| Keystroke::new(key, mods)),
    }
}

/// Lowercase letter or digit from a physical key code (`"KeyA"`, `"Digit5"`)
fn physical_char(code: &str) -> Option<char> {
    let rest = code
        .strip_prefix("Key")
        .or_else(|| code.strip_prefix("Digit"))?;
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}
