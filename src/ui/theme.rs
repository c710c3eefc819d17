use ratatui::style::{Color, Modifier, Style};

use crate::core::predictions::RiskLevel;

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub system_prefix_style: Style,
    pub system_text_style: Style,

    // Chrome
    pub title_style: Style,
    pub tab_style: Style,
    pub tab_active_style: Style,
    pub border_style: Style,
    pub panel_title_style: Style,
    pub hint_style: Style,
    pub status_ok_style: Style,
    pub status_warn_style: Style,
    pub banner_style: Style,
    pub overlay_style: Style,

    // Health form
    pub form_label_style: Style,
    pub form_label_focused_style: Style,
    pub form_value_style: Style,

    // Risk cards
    pub risk_low_style: Style,
    pub risk_medium_style: Style,
    pub risk_high_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub input_cursor_line_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            system_prefix_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            system_text_style: Style::default().fg(Color::White),

            title_style: Style::default().fg(Color::Gray),
            tab_style: Style::default().fg(Color::DarkGray),
            tab_active_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            border_style: Style::default().fg(Color::Gray),
            panel_title_style: Style::default().fg(Color::Gray),
            hint_style: Style::default().fg(Color::DarkGray),
            status_ok_style: Style::default().fg(Color::Green),
            status_warn_style: Style::default().fg(Color::Yellow),
            banner_style: Style::default().fg(Color::White).bg(Color::Red),
            overlay_style: Style::default().fg(Color::White).bg(Color::DarkGray),

            form_label_style: Style::default().fg(Color::Gray),
            form_label_focused_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            form_value_style: Style::default().fg(Color::White),

            risk_low_style: Style::default().fg(Color::Green),
            risk_medium_style: Style::default().fg(Color::Yellow),
            risk_high_style: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),

            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            input_cursor_line_style: Style::default(),
        }
    }

    pub fn risk_style(&self, level: RiskLevel) -> Style {
        match level {
            RiskLevel::Low => self.risk_low_style,
            RiskLevel::Medium => self.risk_medium_style,
            RiskLevel::High => self.risk_high_style,
        }
    }
}
