use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;
use tracing::debug;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Leave the game entirely
    Quit,
    /// Dismiss the title or game-over screen
    Continue,
}

/// Manages input polling, tracks the pointer and translates raw key events
/// into game actions
pub struct InputManager {
    /// Terminals that report key releases continue on key-up, others on key-down
    release_events: bool,
    /// Last cell the mouse was seen over
    pointer: Option<(u16, u16)>,
    oneshot_actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            pointer: None,
            oneshot_actions: Vec::new(),
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before taking actions
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(event);
        }

        Ok(())
    }

    /// Translates one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            // The viewport is recomputed from the terminal size every frame
            Event::Resize(_, _) => {}
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        debug!(code = ?key_event.code, kind = ?key_event.kind, "key event");

        if key_event.kind == KeyEventKind::Press && is_quit_key(&key_event) {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        let continue_kind = if self.release_events {
            KeyEventKind::Release
        } else {
            KeyEventKind::Press
        };
        if key_event.kind == continue_kind && !is_quit_key(&key_event) {
            self.oneshot_actions.push(InputAction::Continue);
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        match mouse_event.kind {
            MouseEventKind::Moved
            | MouseEventKind::Drag(MouseButton::Left)
            | MouseEventKind::Down(MouseButton::Left) => {
                self.pointer = Some((mouse_event.column, mouse_event.row));
            }
            _ => {}
        }
    }

    /// Cell under the mouse, None until the terminal has reported one
    pub fn pointer(&self) -> Option<(u16, u16)> {
        self.pointer
    }

    /// Returns the one-shot actions gathered by the last poll
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }
}

fn is_quit_key(key_event: &KeyEvent) -> bool {
    matches!(
        key_event.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key_event.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        let mut input = InputManager::new(true);
        input.handle_event(key(KeyCode::Char('q'), KeyEventKind::Press));
        input.handle_event(key(KeyCode::Esc, KeyEventKind::Press));
        input.handle_event(Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        )));
        assert_eq!(
            input.actions(),
            &[InputAction::Quit, InputAction::Quit, InputAction::Quit]
        );
    }

    #[test]
    fn test_continue_on_release_when_supported() {
        let mut input = InputManager::new(true);
        input.handle_event(key(KeyCode::Enter, KeyEventKind::Press));
        assert!(input.actions().is_empty());
        input.handle_event(key(KeyCode::Enter, KeyEventKind::Release));
        assert_eq!(input.actions(), &[InputAction::Continue]);
    }

    #[test]
    fn test_continue_on_press_without_release_events() {
        let mut input = InputManager::new(false);
        input.handle_event(key(KeyCode::Char(' '), KeyEventKind::Press));
        assert_eq!(input.actions(), &[InputAction::Continue]);
    }

    #[test]
    fn test_releasing_quit_key_does_not_continue() {
        let mut input = InputManager::new(true);
        input.handle_event(key(KeyCode::Char('q'), KeyEventKind::Release));
        assert!(input.actions().is_empty());
    }

    #[test]
    fn test_pointer_tracks_mouse_motion() {
        let mut input = InputManager::new(true);
        assert_eq!(input.pointer(), None);

        input.handle_event(mouse(MouseEventKind::Moved, 10, 4));
        assert_eq!(input.pointer(), Some((10, 4)));

        input.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 5));
        assert_eq!(input.pointer(), Some((12, 5)));

        // Scrolling does not move the pointer
        input.handle_event(mouse(MouseEventKind::ScrollDown, 40, 20));
        assert_eq!(input.pointer(), Some((12, 5)));
    }

    #[test]
    fn test_other_events_ignored() {
        let mut input = InputManager::new(true);
        input.handle_event(Event::Resize(100, 40));
        input.handle_event(Event::FocusGained);
        assert!(input.actions().is_empty());
        assert_eq!(input.pointer(), None);
    }
}
