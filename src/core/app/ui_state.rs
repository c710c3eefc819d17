use std::collections::VecDeque;

use ratatui::prelude::Size;
use tui_textarea::{CursorMove, TextArea};

use crate::core::constants::NOTIFICATION_TTL;
use crate::core::health_form::HealthForm;
use crate::core::loading::LoadingIndicator;
use crate::core::message::Message;
use crate::core::notifications::NotificationCenter;
use crate::core::predictions::ResultsPanel;
use crate::core::tabs::TabState;
use crate::ui::theme::Theme;

/// Vertical scroll position of a panel that can follow its newest content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: usize,
    pub follow_tail: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            follow_tail: true,
        }
    }
}

impl ScrollState {
    pub fn scroll_by(&mut self, lines: i32, max_offset: usize) {
        let current = self.offset.min(max_offset);
        let target = current.saturating_add_signed(lines as isize).min(max_offset);
        self.offset = target;
        self.follow_tail = target >= max_offset;
    }

    /// Clamp to the visible range, snapping to the end when following.
    pub fn resolve(&mut self, max_offset: usize) -> usize {
        if self.follow_tail {
            self.offset = max_offset;
        } else {
            self.offset = self.offset.min(max_offset);
        }
        self.offset
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub tabs: TabState,
    pub messages: VecDeque<Message>,
    composer: TextArea<'static>,
    pub chat_scroll: ScrollState,
    pub health_form: HealthForm,
    pub results: ResultsPanel,
    pub results_scroll: ScrollState,
    pub loading: LoadingIndicator,
    pub notifications: NotificationCenter,
    pub theme: Theme,
    pub exit_requested: bool,
    pub last_term_size: Size,
    /// Page height of the transcript and results areas from the last frame.
    pub chat_viewport_height: u16,
    pub results_viewport_height: u16,
    pub chat_max_scroll: usize,
    pub results_max_scroll: usize,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            tabs: TabState::default(),
            messages: VecDeque::new(),
            composer: new_composer(&theme),
            chat_scroll: ScrollState::default(),
            health_form: HealthForm::default(),
            results: ResultsPanel::default(),
            results_scroll: ScrollState {
                offset: 0,
                follow_tail: false,
            },
            loading: LoadingIndicator::default(),
            notifications: NotificationCenter::new(NOTIFICATION_TTL),
            theme,
            exit_requested: false,
            last_term_size: Size::default(),
            chat_viewport_height: 0,
            results_viewport_height: 0,
            chat_max_scroll: 0,
            results_max_scroll: 0,
        }
    }

    pub fn composer(&self) -> &TextArea<'static> {
        &self.composer
    }

    pub fn composer_text(&self) -> String {
        self.composer.lines().join("\n")
    }

    pub fn set_composer_text(&mut self, text: &str) {
        let lines = text.split('\n').map(str::to_string).collect();
        let mut composer = styled_composer(TextArea::new(lines), &self.theme);
        composer.move_cursor(CursorMove::Bottom);
        composer.move_cursor(CursorMove::End);
        self.composer = composer;
    }

    pub fn clear_composer(&mut self) {
        self.composer = new_composer(&self.theme);
    }

    pub fn apply_composer_edit<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        edit(&mut self.composer);
    }

    pub fn composer_line_count(&self) -> usize {
        self.composer.lines().len().max(1)
    }
}

fn new_composer(theme: &Theme) -> TextArea<'static> {
    styled_composer(TextArea::default(), theme)
}

fn styled_composer(mut composer: TextArea<'static>, theme: &Theme) -> TextArea<'static> {
    composer.set_cursor_line_style(theme.input_cursor_line_style);
    composer.set_cursor_style(theme.input_cursor_style);
    composer.set_style(theme.input_text_style);
    composer.set_placeholder_text("Type your message here...");
    composer.set_placeholder_style(theme.hint_style);
    composer
}
