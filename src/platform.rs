//! Keyboard shortcuts that differ per platform

use crossterm::event::KeyModifiers;

/// Extra modifier accepted for the submit and copy shortcuts.
/// Control always works.
#[cfg(target_os = "macos")]
const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

#[cfg(target_os = "macos")]
pub const COPY_SHORTCUT: &str = "Cmd+Y";

#[cfg(not(target_os = "macos"))]
pub const COPY_SHORTCUT: &str = "Ctrl+Y";

/// Whether a key carries the shortcut modifier
pub fn is_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | SHORTCUT_MODIFIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_is_always_a_shortcut() {
        assert!(is_shortcut(KeyModifiers::CONTROL));
        assert!(is_shortcut(KeyModifiers::CONTROL | KeyModifiers::SHIFT));
        assert!(!is_shortcut(KeyModifiers::NONE));
        assert!(!is_shortcut(KeyModifiers::SHIFT));
    }
}
