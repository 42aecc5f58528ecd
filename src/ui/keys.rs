use console::Key;

use crate::review::OperatorCommand;
use crate::selection::SelectionCommand;

/// Map a key press to an operator command. Unbound keys map to `None`.
pub fn command_for_key(key: &Key) -> Option<OperatorCommand> {
    let command = match key {
        Key::ArrowRight | Key::Char('l') => SelectionCommand::MoveForward.into(),
        Key::ArrowLeft | Key::Char('h') => SelectionCommand::MoveBackward.into(),
        Key::Char('v') => SelectionCommand::EnterExtendMode.into(),
        Key::Escape => SelectionCommand::ExitExtendMode.into(),
        Key::Char('p') => SelectionCommand::ConfirmSpan.into(),
        Key::Enter => OperatorCommand::ConfirmAndAdvance,
        Key::Char('r') => OperatorCommand::Retry,
        Key::Char('q') | Key::CtrlC => OperatorCommand::Quit,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_vi_keys_move_the_cursor() {
        for key in [Key::ArrowRight, Key::Char('l')] {
            assert_eq!(
                command_for_key(&key),
                Some(OperatorCommand::Select(SelectionCommand::MoveForward))
            );
        }
        for key in [Key::ArrowLeft, Key::Char('h')] {
            assert_eq!(
                command_for_key(&key),
                Some(OperatorCommand::Select(SelectionCommand::MoveBackward))
            );
        }
    }

    #[test]
    fn review_keys_map_to_review_commands() {
        assert_eq!(
            command_for_key(&Key::Enter),
            Some(OperatorCommand::ConfirmAndAdvance)
        );
        assert_eq!(command_for_key(&Key::Char('q')), Some(OperatorCommand::Quit));
        assert_eq!(command_for_key(&Key::CtrlC), Some(OperatorCommand::Quit));
        assert_eq!(command_for_key(&Key::Char('r')), Some(OperatorCommand::Retry));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(command_for_key(&Key::Char('x')), None);
        assert_eq!(command_for_key(&Key::Tab), None);
    }
}
