use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::engine::Command;
use crate::snake::Direction::*;

/// Translates a key press into a command. Unbound keys give `None`.
pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    let cmd = match ev.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Move(Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Move(Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Move(Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::Move(Right),
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        KeyCode::Char('k') | KeyCode::Char('K') => Command::CycleSkin,
        KeyCode::Char('l') | KeyCode::Char('L') => Command::ShowLeaderboard,
        _ => return None,
    };

    Some(cmd)
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn arrows_and_wasd_move() {
        assert_eq!(command_for(&key(KeyCode::Up)), Some(Command::Move(Up)));
        assert_eq!(command_for(&key(KeyCode::Char('a'))), Some(Command::Move(Left)));
        assert_eq!(command_for(&key(KeyCode::Char('S'))), Some(Command::Move(Down)));
        assert_eq!(command_for(&key(KeyCode::Right)), Some(Command::Move(Right)));
    }

    #[test]
    fn control_keys() {
        assert_eq!(command_for(&key(KeyCode::Esc)), Some(Command::TogglePause));
        assert_eq!(command_for(&key(KeyCode::Char('p'))), Some(Command::TogglePause));
        assert_eq!(command_for(&key(KeyCode::Char('r'))), Some(Command::Restart));
        assert_eq!(command_for(&key(KeyCode::Char('Q'))), Some(Command::Quit));
        assert_eq!(command_for(&key(KeyCode::Char('k'))), Some(Command::CycleSkin));
        assert_eq!(command_for(&key(KeyCode::Char('l'))), Some(Command::ShowLeaderboard));
    }

    #[test]
    fn ctrl_c_quits() {
        let ev = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(command_for(&ev), Some(Command::Quit));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(command_for(&key(KeyCode::Char('x'))), None);
        assert_eq!(command_for(&key(KeyCode::Tab)), None);
        assert_eq!(command_for(&key(KeyCode::Char('c'))), None);
    }
}
