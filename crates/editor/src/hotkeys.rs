//! Keyboard shortcut routing for the editor.
//!
//! Shortcuts are effective for the lifetime of the editor value: hosts
//! feed [`KeyboardEvent`]s only while an editor session exists, which is
//! the bind-on-mount / unbind-on-unmount lifecycle.

use crate::types::{EditorCommand, KeyboardEvent};

/// Map a keyboard event to an editor command.
///
/// Ctrl/Cmd+Z undoes; Ctrl/Cmd+Shift+Z or Ctrl/Cmd+Y redoes. Key releases
/// and unmodified keys map to nothing.
pub fn command_for_key(event: &KeyboardEvent) -> Option<EditorCommand> {
    if !event.pressed {
        return None;
    }
    let mods = &event.modifiers;
    if !(mods.ctrl || mods.meta) {
        return None;
    }

    if event.key.eq_ignore_ascii_case("z") {
        return Some(if mods.shift {
            EditorCommand::Redo
        } else {
            EditorCommand::Undo
        });
    }
    if event.key.eq_ignore_ascii_case("y") {
        return Some(EditorCommand::Redo);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Modifiers;

    fn key(key: &str, ctrl: bool, meta: bool, shift: bool) -> KeyboardEvent {
        KeyboardEvent {
            key: key.to_owned(),
            pressed: true,
            modifiers: Modifiers {
                shift,
                ctrl,
                alt: false,
                meta,
            },
        }
    }

    #[test]
    fn test_undo_bindings() {
        assert_eq!(
            command_for_key(&key("z", true, false, false)),
            Some(EditorCommand::Undo)
        );
        assert_eq!(
            command_for_key(&key("z", false, true, false)),
            Some(EditorCommand::Undo)
        );
    }

    #[test]
    fn test_redo_bindings() {
        // Browsers report shifted letters uppercase.
        assert_eq!(
            command_for_key(&key("Z", true, false, true)),
            Some(EditorCommand::Redo)
        );
        assert_eq!(
            command_for_key(&key("z", false, true, true)),
            Some(EditorCommand::Redo)
        );
        assert_eq!(
            command_for_key(&key("y", true, false, false)),
            Some(EditorCommand::Redo)
        );
    }

    #[test]
    fn test_unbound_keys_map_to_nothing() {
        assert_eq!(command_for_key(&key("z", false, false, false)), None);
        assert_eq!(command_for_key(&key("x", true, false, false)), None);

        let mut released = key("z", true, false, false);
        released.pressed = false;
        assert_eq!(command_for_key(&released), None);
    }
}
