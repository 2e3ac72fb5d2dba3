use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::Action;
use crate::model::task::Filter;
use crate::util::unicode;

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Any keypress clears a stale status message
    app.status_message = None;

    // Help overlay intercepts everything
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Insert => handle_insert(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }

        // Cursor movement
        (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
            let len = app.visible_len();
            if len > 0 && app.cursor < len - 1 {
                app.cursor += 1;
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        (KeyModifiers::NONE, KeyCode::Char('g')) => {
            app.cursor = 0;
        }
        (KeyModifiers::SHIFT, KeyCode::Char('G')) | (KeyModifiers::NONE, KeyCode::Char('G')) => {
            app.cursor = app.visible_len().saturating_sub(1);
        }

        // Toggle completion of the task under the cursor
        (KeyModifiers::NONE, KeyCode::Char(' ') | KeyCode::Enter) => {
            if let Some(id) = app.cursor_task_id() {
                let result = app.controller.apply(Action::Toggle(id));
                app.report(result);
                app.clamp_cursor();
            }
        }

        // Delete the task under the cursor
        (KeyModifiers::NONE, KeyCode::Char('d') | KeyCode::Char('x')) => {
            if let Some(id) = app.cursor_task_id() {
                let result = app.controller.apply(Action::Delete(id));
                app.report(result);
                app.clamp_cursor();
            }
        }

        // New task
        (KeyModifiers::NONE, KeyCode::Char('a') | KeyCode::Char('i')) => {
            app.input.clear();
            app.mode = Mode::Insert;
        }

        // Filters
        (KeyModifiers::NONE, KeyCode::Char('1')) => set_filter(app, Filter::All),
        (KeyModifiers::NONE, KeyCode::Char('2')) => set_filter(app, Filter::Pending),
        (KeyModifiers::NONE, KeyCode::Char('3')) => set_filter(app, Filter::Completed),
        (KeyModifiers::NONE, KeyCode::Char('f') | KeyCode::Tab) => {
            set_filter(app, app.controller.filter().next());
        }

        // Clear completed: confirmation only when something is completed
        (KeyModifiers::NONE, KeyCode::Char('c')) => {
            if app.controller.completed_count() > 0 {
                app.mode = Mode::Confirm;
            }
        }

        (KeyModifiers::NONE, KeyCode::Char('?')) => {
            app.show_help = true;
        }

        _ => {}
    }
}

fn set_filter(app: &mut App, filter: Filter) {
    // set_filter never fails; apply keeps the dispatch path uniform
    let _ = app.controller.apply(Action::SetFilter(filter));
    app.cursor = 0;
    app.scroll_offset = 0;
}

fn handle_insert(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.input.clear();
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Enter) => {
            // Whitespace-only input is rejected by the controller; the
            // input line keeps focus either way so several tasks can be
            // typed in a row
            let text = std::mem::take(&mut app.input);
            let result = app.controller.apply(Action::Add(text));
            app.report(result);
        }
        (_, KeyCode::Backspace) => {
            unicode::pop_grapheme(&mut app.input);
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y (or s, "sim")
        (KeyModifiers::NONE, KeyCode::Char('y') | KeyCode::Char('s')) => {
            app.mode = Mode::Navigate;
            let result = app.controller.apply(Action::ClearCompleted);
            app.report(result);
            app.clamp_cursor();
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::io::store::Store;
    use crate::model::config::Config;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        let controller = Controller::new(Store::new(dir.path().join("tarefas.json")));
        App::new(controller, &Config::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add_task(app: &mut App, text: &str) {
        press(app, KeyCode::Char('a'));
        type_text(app, text);
        press(app, KeyCode::Enter);
        press(app, KeyCode::Esc);
    }

    #[test]
    fn insert_mode_adds_task_and_keeps_focus() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Insert);
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        // Task added, buffer cleared, still in insert mode
        assert_eq!(app.controller.tasks().len(), 1);
        assert_eq!(app.controller.tasks()[0].text, "Buy milk");
        assert_eq!(app.mode, Mode::Insert);
        assert!(app.input.is_empty());
    }

    #[test]
    fn whitespace_submit_is_a_no_op_and_stays_in_insert() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(app.controller.tasks().is_empty());
        assert_eq!(app.mode, Mode::Insert);
    }

    #[test]
    fn esc_cancels_insert_without_adding() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "half-typed");
        press(&mut app, KeyCode::Esc);

        assert!(app.controller.tasks().is_empty());
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.input.is_empty());
    }

    #[test]
    fn space_toggles_task_under_cursor() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_task(&mut app, "Buy milk");

        press(&mut app, KeyCode::Char(' '));
        assert!(app.controller.tasks()[0].done);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.controller.tasks()[0].done);
    }

    #[test]
    fn delete_clamps_cursor() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_task(&mut app, "a");
        add_task(&mut app, "b");

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.controller.tasks().len(), 1);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn clear_with_nothing_completed_skips_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_task(&mut app, "a");

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.controller.tasks().len(), 1);
    }

    #[test]
    fn clear_confirmed_removes_completed() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_task(&mut app, "a");
        add_task(&mut app, "b");

        press(&mut app, KeyCode::Char(' ')); // complete "a"
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.mode, Mode::Confirm);
        press(&mut app, KeyCode::Char('y'));

        assert_eq!(app.mode, Mode::Navigate);
        let texts: Vec<&str> = app.controller.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["b"]);
    }

    #[test]
    fn clear_cancelled_leaves_state_untouched() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_task(&mut app, "a");
        press(&mut app, KeyCode::Char(' '));

        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.controller.tasks().len(), 1);
        assert!(app.controller.tasks()[0].done);
    }

    #[test]
    fn confirm_mode_ignores_other_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_task(&mut app, "a");
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('c'));

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, Mode::Confirm);
        assert!(!app.should_quit);
    }

    #[test]
    fn filter_keys_reset_cursor() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_task(&mut app, "a");
        add_task(&mut app, "b");
        press(&mut app, KeyCode::Char('j'));

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.controller.filter(), Filter::Pending);
        assert_eq!(app.cursor, 0);

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.controller.filter(), Filter::Completed);
    }

    #[test]
    fn scenario_completed_filter_shows_only_toggled_task() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_task(&mut app, "Buy milk");
        add_task(&mut app, "Walk dog");

        // Toggle "Buy milk" (cursor starts at 0) then filter to completed
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('3'));

        let visible = app.controller.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].text, "Buy milk");
        assert!(visible[0].done);
    }

    #[test]
    fn help_overlay_intercepts_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        add_task(&mut app, "a");

        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        // 'd' must not delete while help is open
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.controller.tasks().len(), 1);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn q_quits_from_navigate() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
