//! Keybinding configuration for the calendar view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_month: Vec<String>,
    pub prev_month: Vec<String>,
    pub next_accommodation: Vec<String>,
    pub prev_accommodation: Vec<String>,
    pub select: Vec<String>,
    pub clear_selection: Vec<String>,
    pub book: Vec<String>,
    pub reload: Vec<String>,
    pub today: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_left: keys(&["h", "Left"]),
            move_right: keys(&["l", "Right"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            next_month: keys(&["n", "PageDown"]),
            prev_month: keys(&["p", "PageUp"]),
            next_accommodation: keys(&["Tab"]),
            prev_accommodation: keys(&["BackTab", "Shift+Tab"]),
            select: keys(&["Enter", "Space"]),
            clear_selection: keys(&["Esc", "c"]),
            book: keys(&["b"]),
            reload: keys(&["R"]),
            today: keys(&["t"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event. Earlier entries win on conflicts.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 14] = [
            (self.quit.as_slice(), Action::Quit),
            (self.move_left.as_slice(), Action::MoveLeft),
            (self.move_right.as_slice(), Action::MoveRight),
            (self.move_up.as_slice(), Action::MoveUp),
            (self.move_down.as_slice(), Action::MoveDown),
            (self.next_month.as_slice(), Action::NextMonth),
            (self.prev_month.as_slice(), Action::PrevMonth),
            (self.next_accommodation.as_slice(), Action::NextAccommodation),
            (self.prev_accommodation.as_slice(), Action::PrevAccommodation),
            (self.select.as_slice(), Action::Select),
            (self.clear_selection.as_slice(), Action::ClearSelection),
            (self.book.as_slice(), Action::Book),
            (self.reload.as_slice(), Action::Reload),
            (self.today.as_slice(), Action::Today),
        ];

        table
            .iter()
            .find(|(bindings, _)| matches_key(key, bindings))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }
}

fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|parsed| parsed.matches(key))
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored when the binding doesn't ask for it, since
    /// terminals report it inconsistently for uppercase letters.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string such as `"j"`, `"PageDown"`, `"F5"` or `"Ctrl+Shift+a"`.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let (prefix, key_part) = match s.rsplit_once('+') {
        Some((prefix, key)) if !key.is_empty() => (Some(prefix), key),
        _ => (None, s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.into_iter().flat_map(|p| p.split('+')) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key_part)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        _ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(format!("Unknown key: {}", s)),
        },
    };
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_char() {
        let binding = parse_key_string("j").unwrap();
        assert_eq!(binding.code, KeyCode::Char('j'));
        assert_eq!(binding.modifiers, KeyModifiers::NONE);

        let binding = parse_key_string("R").unwrap();
        assert_eq!(binding.code, KeyCode::Char('R'));
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(parse_key_string("Enter").unwrap().code, KeyCode::Enter);
        assert_eq!(parse_key_string("BackTab").unwrap().code, KeyCode::BackTab);
        assert_eq!(parse_key_string("PageDown").unwrap().code, KeyCode::PageDown);
        assert_eq!(parse_key_string("Space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key_string("F1").unwrap().code, KeyCode::F(1));
        assert_eq!(parse_key_string("F12").unwrap().code, KeyCode::F(12));
        assert!(parse_key_string("F13").is_err());
        assert!(parse_key_string("Hyper").is_err());
    }

    #[test]
    fn test_parse_modifiers() {
        let binding = parse_key_string("Ctrl+c").unwrap();
        assert_eq!(binding.code, KeyCode::Char('c'));
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL);

        let binding = parse_key_string("Ctrl+Shift+a").unwrap();
        assert_eq!(binding.code, KeyCode::Char('a'));
        assert_eq!(
            binding.modifiers,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        );

        assert!(parse_key_string("Meta+x").is_err());
    }

    #[test]
    fn test_plus_key_itself() {
        let binding = parse_key_string("+").unwrap();
        assert_eq!(binding.code, KeyCode::Char('+'));
        assert_eq!(binding.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_keybinding_matches() {
        let binding = parse_key_string("Ctrl+c").unwrap();
        assert!(binding.matches(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!binding.matches(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));

        let binding = parse_key_string("R").unwrap();
        assert!(binding.matches(&KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_keybinding_config_get_action() {
        let config = KeybindingConfig::default();
        let action = |code, modifiers| config.get_action(&KeyEvent::new(code, modifiers));

        assert_eq!(action(KeyCode::Char('q'), KeyModifiers::NONE), Action::Quit);
        assert_eq!(action(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
        assert_eq!(action(KeyCode::Char('c'), KeyModifiers::NONE), Action::ClearSelection);
        assert_eq!(action(KeyCode::Left, KeyModifiers::NONE), Action::MoveLeft);
        assert_eq!(action(KeyCode::Char('j'), KeyModifiers::NONE), Action::MoveDown);
        assert_eq!(action(KeyCode::PageDown, KeyModifiers::NONE), Action::NextMonth);
        assert_eq!(action(KeyCode::Enter, KeyModifiers::NONE), Action::Select);
        assert_eq!(action(KeyCode::Char(' '), KeyModifiers::NONE), Action::Select);
        assert_eq!(action(KeyCode::BackTab, KeyModifiers::SHIFT), Action::PrevAccommodation);
        assert_eq!(action(KeyCode::Char('R'), KeyModifiers::SHIFT), Action::Reload);
        assert_eq!(action(KeyCode::Char('z'), KeyModifiers::NONE), Action::None);
    }
}
