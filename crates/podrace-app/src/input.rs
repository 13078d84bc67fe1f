//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key (select).
    Enter,
    /// Tab key (switch list focus).
    Tab,
    /// Escape key (quit).
    Esc,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
}
