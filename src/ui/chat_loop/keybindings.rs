//! Keybinding handlers for tab navigation, form editing and the composer
//!
//! Keys that change application state beyond local editing are turned into
//! [`AppAction`]s; cursor movement, text entry and scrolling are applied to
//! the [`App`] directly.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::Input as TAInput;

use crate::core::app::{App, AppAction};
use crate::core::tabs::Tab;

#[derive(Default)]
pub struct KeyOutcome {
    pub actions: Vec<AppAction>,
    pub exit: bool,
    pub redraw: bool,
}

impl KeyOutcome {
    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    fn action(action: AppAction) -> Self {
        Self {
            actions: vec![action],
            exit: false,
            redraw: true,
        }
    }

    fn exit() -> Self {
        Self {
            exit: true,
            ..Self::default()
        }
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    if let Some(outcome) = handle_global_key(app, &key) {
        return outcome;
    }

    match app.ui.tabs.active() {
        Tab::Chat => handle_chat_key(app, key),
        Tab::Health => handle_health_key(app, key),
    }
}

fn handle_global_key(app: &mut App, key: &KeyEvent) -> Option<KeyOutcome> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let outcome = match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => KeyOutcome::exit(),
        KeyCode::F(1) => KeyOutcome::action(AppAction::SelectTab { tab: Tab::Chat }),
        KeyCode::F(2) => KeyOutcome::action(AppAction::SelectTab { tab: Tab::Health }),
        KeyCode::Char(digit @ ('1' | '2')) if alt => {
            let index = if digit == '1' { 0 } else { 1 };
            let tab = Tab::from_index(index)?;
            KeyOutcome::action(AppAction::SelectTab { tab })
        }
        KeyCode::Right if ctrl => KeyOutcome::action(AppAction::CycleTab { forward: true }),
        KeyCode::Left if ctrl => KeyOutcome::action(AppAction::CycleTab { forward: false }),
        KeyCode::Esc => KeyOutcome::action(AppAction::DismissLatestNotification),
        KeyCode::Char('r') if ctrl => KeyOutcome::action(AppAction::ProbeRequested),
        KeyCode::Char('s') if ctrl => KeyOutcome::action(submit_action(app.ui.tabs.active())),
        KeyCode::PageUp => {
            scroll_active_panel(app, PageDirection::Up);
            KeyOutcome::redraw()
        }
        KeyCode::PageDown => {
            scroll_active_panel(app, PageDirection::Down);
            KeyOutcome::redraw()
        }
        _ => return None,
    };
    Some(outcome)
}

fn submit_action(tab: Tab) -> AppAction {
    match tab {
        Tab::Chat => AppAction::SubmitChat,
        Tab::Health => AppAction::SubmitHealthForm,
    }
}

enum PageDirection {
    Up,
    Down,
}

fn scroll_active_panel(app: &mut App, direction: PageDirection) {
    let ui = &mut app.ui;
    let (scroll, page, max) = match ui.tabs.active() {
        Tab::Chat => (
            &mut ui.chat_scroll,
            ui.chat_viewport_height,
            ui.chat_max_scroll,
        ),
        Tab::Health => (
            &mut ui.results_scroll,
            ui.results_viewport_height,
            ui.results_max_scroll,
        ),
    };
    let page = i32::from(page.max(1));
    let lines = match direction {
        PageDirection::Up => -page,
        PageDirection::Down => page,
    };
    scroll.scroll_by(lines, max);
}

fn handle_chat_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Enter if shift || alt => {
            app.ui.apply_composer_edit(|ta| ta.insert_newline());
            KeyOutcome::redraw()
        }
        KeyCode::Enter => KeyOutcome::action(AppAction::SubmitChat),
        KeyCode::Up if shift => {
            let max = app.ui.chat_max_scroll;
            app.ui.chat_scroll.scroll_by(-1, max);
            KeyOutcome::redraw()
        }
        KeyCode::Down if shift => {
            let max = app.ui.chat_max_scroll;
            app.ui.chat_scroll.scroll_by(1, max);
            KeyOutcome::redraw()
        }
        _ => {
            // Let the textarea handle text input, including multi-byte chars
            app.ui.apply_composer_edit(|ta| {
                ta.input(TAInput::from(key));
            });
            KeyOutcome::redraw()
        }
    }
}

fn handle_health_key(app: &mut App, key: KeyEvent) -> KeyOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let form = &mut app.ui.health_form;

    match key.code {
        KeyCode::Enter => return KeyOutcome::action(AppAction::SubmitHealthForm),
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char('u') if ctrl => form.clear_focused(),
        KeyCode::Char(ch) if !ctrl && !alt => form.insert_char(ch),
        _ => return KeyOutcome::default(),
    }
    KeyOutcome::redraw()
}

/// Bracketed paste goes to whichever input has focus on the active tab.
pub fn handle_paste(app: &mut App, text: &str) {
    match app.ui.tabs.active() {
        Tab::Chat => {
            let sanitized = sanitize_pasted_text(text);
            app.ui.apply_composer_edit(|ta| {
                ta.insert_str(sanitized);
            });
        }
        Tab::Health => {
            // Form fields are single-line
            let form = &mut app.ui.health_form;
            for ch in text.chars().filter(|ch| !ch.is_control()) {
                form.insert_char(ch);
            }
        }
    }
}

pub(crate) fn sanitize_pasted_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|ch| *ch == '\n' || *ch == '\t' || !ch.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::health_form::HealthField;
    use crate::utils::test_utils::create_test_app;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            handle_key(app, key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn ctrl_c_requests_exit() {
        let mut app = create_test_app();
        let outcome = handle_key(
            &mut app,
            key_with(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(outcome.exit);
        assert!(outcome.actions.is_empty());
    }

    #[test]
    fn function_keys_select_tabs() {
        let mut app = create_test_app();
        let outcome = handle_key(&mut app, key(KeyCode::F(2)));
        assert!(matches!(
            outcome.actions.as_slice(),
            [AppAction::SelectTab { tab: Tab::Health }]
        ));

        let outcome = handle_key(&mut app, key_with(KeyCode::Char('1'), KeyModifiers::ALT));
        assert!(matches!(
            outcome.actions.as_slice(),
            [AppAction::SelectTab { tab: Tab::Chat }]
        ));
    }

    #[test]
    fn typing_in_chat_fills_composer_and_enter_submits() {
        let mut app = create_test_app();
        type_text(&mut app, "hi there");
        assert_eq!(app.ui.composer_text(), "hi there");

        let outcome = handle_key(&mut app, key(KeyCode::Enter));
        assert!(matches!(outcome.actions.as_slice(), [AppAction::SubmitChat]));
    }

    #[test]
    fn alt_enter_inserts_newline_instead_of_sending() {
        let mut app = create_test_app();
        type_text(&mut app, "one");
        let outcome = handle_key(&mut app, key_with(KeyCode::Enter, KeyModifiers::ALT));
        type_text(&mut app, "two");

        assert!(outcome.actions.is_empty());
        assert_eq!(app.ui.composer_text(), "one\ntwo");
    }

    #[test]
    fn esc_dismisses_and_ctrl_r_reprobes() {
        let mut app = create_test_app();
        let outcome = handle_key(&mut app, key(KeyCode::Esc));
        assert!(matches!(
            outcome.actions.as_slice(),
            [AppAction::DismissLatestNotification]
        ));

        let outcome = handle_key(
            &mut app,
            key_with(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert!(matches!(outcome.actions.as_slice(), [AppAction::ProbeRequested]));
    }

    #[test]
    fn health_keys_edit_focused_field() {
        let mut app = create_test_app();
        app.ui.tabs.select(Tab::Health);

        type_text(&mut app, "120");
        handle_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "8x");
        handle_key(&mut app, key(KeyCode::Backspace));
        handle_key(&mut app, key(KeyCode::BackTab));
        handle_key(
            &mut app,
            key_with(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );

        let form = &app.ui.health_form;
        assert_eq!(form.value(HealthField::BloodGlucose), "");
        assert_eq!(form.value(HealthField::SystolicBp), "8");
        assert_eq!(form.focused(), HealthField::BloodGlucose);
    }

    #[test]
    fn enter_and_ctrl_s_submit_on_health_tab() {
        let mut app = create_test_app();
        app.ui.tabs.select(Tab::Health);

        let outcome = handle_key(&mut app, key(KeyCode::Enter));
        assert!(matches!(
            outcome.actions.as_slice(),
            [AppAction::SubmitHealthForm]
        ));
        let outcome = handle_key(
            &mut app,
            key_with(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );
        assert!(matches!(
            outcome.actions.as_slice(),
            [AppAction::SubmitHealthForm]
        ));
    }

    #[test]
    fn page_keys_scroll_the_transcript() {
        let mut app = create_test_app();
        app.ui.chat_viewport_height = 5;
        app.ui.chat_max_scroll = 20;
        app.ui.chat_scroll.resolve(20);

        handle_key(&mut app, key(KeyCode::PageUp));
        assert_eq!(app.ui.chat_scroll.offset, 15);
        assert!(!app.ui.chat_scroll.follow_tail);

        handle_key(&mut app, key(KeyCode::PageDown));
        assert_eq!(app.ui.chat_scroll.offset, 20);
        assert!(app.ui.chat_scroll.follow_tail);
    }

    #[test]
    fn paste_into_form_drops_line_breaks() {
        let mut app = create_test_app();
        app.ui.tabs.select(Tab::Health);
        handle_paste(&mut app, "13\r\n5");
        assert_eq!(app.ui.health_form.value(HealthField::BloodGlucose), "135");
    }

    #[test]
    fn sanitize_paste_normalizes_line_endings() {
        assert_eq!(sanitize_pasted_text("a\r\nb\rc\u{7}"), "a\nb\nc");
    }
}
