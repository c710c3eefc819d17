use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::app::{App, ScrollState, ServerStatus};
use crate::core::health_form::HealthField;
use crate::core::message::TranscriptRole;
use crate::core::tabs::Tab;
use crate::core::text_wrapping::{TextWrapper, WrapConfig};
use crate::ui::theme::Theme;

const USER_PREFIX: &str = "You: ";
const SYSTEM_PREFIX: &str = "Assistant: ";
const MAX_COMPOSER_LINES: u16 = 5;
const MAX_BANNERS: usize = 4;
const FORM_LABEL_WIDTH: usize = 17;
const MIN_RESULTS_HEIGHT: u16 = 6;
const LOADING_TEXT: &str = "Waiting for the server...";

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    app.ui.last_term_size = area.as_size();
    f.render_widget(
        Block::default().style(Style::default().bg(app.ui.theme.background_color)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(f, app, chunks[0]);
    render_tabs(f, app, chunks[1]);

    let active = app.ui.tabs.active();
    let body = render_banners(f, app, active, chunks[2]);
    match active {
        Tab::Chat => render_chat_panel(f, app, body),
        Tab::Health => render_health_panel(f, app, body),
    }

    render_help(f, &app.ui.theme, active, chunks[3]);

    if app.ui.loading.is_visible() {
        render_loading_overlay(f, app, chunks[2]);
    }
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let status_style = match app.session.server_status {
        ServerStatus::Online => theme.status_ok_style,
        ServerStatus::Checking => theme.title_style,
        ServerStatus::Degraded(_) | ServerStatus::Unreachable => theme.status_warn_style,
    };

    let mut spans = vec![
        Span::styled(
            format!(
                "MediChat v{} - {} ",
                env!("CARGO_PKG_VERSION"),
                app.session.backend.base_url()
            ),
            theme.title_style,
        ),
        Span::styled(format!("({})", app.session.server_status.label()), status_style),
    ];
    if let Some(model) = app.session.last_model_used.as_deref() {
        spans.push(Span::styled(format!(" • Model: {model}"), theme.title_style));
    }
    spans.push(Span::styled(
        format!(" • Logging: {}", app.session.logging.get_status_string()),
        theme.title_style,
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.ui.tabs.active().index())
        .style(theme.tab_style)
        .highlight_style(theme.tab_active_style)
        .divider("|");
    f.render_widget(tabs, area);
}

/// Draw the active tab's banners, newest first, and return the space left.
fn render_banners(f: &mut Frame, app: &App, tab: Tab, area: Rect) -> Rect {
    let theme = &app.ui.theme;
    let width = area.width as usize;
    let lines: Vec<Line> = app
        .ui
        .notifications
        .for_tab(tab)
        .take(MAX_BANNERS)
        .map(|entry| {
            let text = format!(" ✖ {}  (Esc to close)", entry.message);
            let pad = width.saturating_sub(UnicodeWidthStr::width(text.as_str()));
            Line::from(Span::styled(
                format!("{text}{}", " ".repeat(pad)),
                theme.banner_style,
            ))
        })
        .collect();

    if lines.is_empty() {
        return area;
    }

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height), Constraint::Min(0)])
        .split(area);
    f.render_widget(Paragraph::new(lines), chunks[0]);
    chunks[1]
}

fn render_chat_panel(f: &mut Frame, app: &mut App, area: Rect) {
    let composer_height = u16::try_from(app.ui.composer_line_count())
        .unwrap_or(u16::MAX)
        .min(MAX_COMPOSER_LINES)
        + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(composer_height)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.ui.theme.border_style)
        .title(Span::styled("Conversation", app.ui.theme.panel_title_style));
    let inner = block.inner(chunks[0]);

    let lines = build_transcript_lines(app, inner.width as usize);
    let max_offset = lines.len().saturating_sub(usize::from(inner.height));
    let offset = app.ui.chat_scroll.resolve(max_offset);
    app.ui.chat_viewport_height = inner.height;
    app.ui.chat_max_scroll = max_offset;

    f.render_widget(block, chunks[0]);
    f.render_widget(Paragraph::new(visible_window(lines, offset, inner.height)), inner);

    let composer_block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.ui.theme.border_style)
        .title(Span::styled(
            "Message (Enter to send, Alt+Enter for new line)",
            app.ui.theme.panel_title_style,
        ));
    let composer_inner = composer_block.inner(chunks[1]);
    f.render_widget(composer_block, chunks[1]);
    f.render_widget(app.ui.composer(), composer_inner);
}

fn build_transcript_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let theme = &app.ui.theme;
    let mut lines = Vec::new();

    for (idx, message) in app.ui.messages.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        let (prefix, prefix_style, text_style) = match message.role {
            TranscriptRole::User => (USER_PREFIX, theme.user_prefix_style, theme.user_text_style),
            TranscriptRole::System => (
                SYSTEM_PREFIX,
                theme.system_prefix_style,
                theme.system_text_style,
            ),
        };
        let indent = UnicodeWidthStr::width(prefix);
        let config = WrapConfig::new(width.saturating_sub(indent).max(1));

        for (line_idx, text) in TextWrapper::wrap_lines(&message.content, &config)
            .into_iter()
            .enumerate()
        {
            let lead = if line_idx == 0 {
                Span::styled(prefix, prefix_style)
            } else {
                Span::raw(" ".repeat(indent))
            };
            lines.push(Line::from(vec![lead, Span::styled(text, text_style)]));
        }
    }

    lines
}

fn render_health_panel(f: &mut Frame, app: &mut App, area: Rect) {
    let form_height = (HealthField::ALL.len() as u16 + 2)
        .min(area.height.saturating_sub(MIN_RESULTS_HEIGHT))
        .max(3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(0)])
        .split(area);

    render_health_form(f, app, chunks[0]);
    render_results(f, app, chunks[1]);
}

fn render_health_form(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let form = &app.ui.health_form;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style)
        .title(Span::styled(
            "Health Data (Enter to submit)",
            theme.panel_title_style,
        ));
    let inner = block.inner(area);

    let mut focused_row = 0u16;
    let lines: Vec<Line> = HealthField::ALL
        .iter()
        .enumerate()
        .map(|(row, field)| {
            let focused = form.focused() == *field;
            if focused {
                focused_row = row as u16;
            }
            let label_style = if focused {
                theme.form_label_focused_style
            } else {
                theme.form_label_style
            };
            let marker = if focused { "› " } else { "  " };
            let label = format!("{marker}{:<width$}", field.label(), width = FORM_LABEL_WIDTH);
            let value = form.value(*field);
            let mut spans = vec![
                Span::styled(label, label_style),
                Span::styled(value.to_string(), theme.form_value_style),
            ];
            if value.is_empty() {
                spans.push(Span::styled(field.hint().to_string(), theme.hint_style));
            } else {
                spans.push(Span::styled(format!("  {}", field.hint()), theme.hint_style));
            }
            Line::from(spans)
        })
        .collect();

    // Keep the focused field on screen when the form is squeezed
    let offset = focused_row.saturating_sub(inner.height.saturating_sub(1));
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);

    if !app.ui.loading.is_visible() && inner.height > 0 {
        let value_width =
            u16::try_from(UnicodeWidthStr::width(form.value(form.focused()))).unwrap_or(u16::MAX);
        let x = inner
            .x
            .saturating_add(2 + FORM_LABEL_WIDTH as u16)
            .saturating_add(value_width);
        let y = inner.y + focused_row - offset;
        if x < inner.right() && y < inner.bottom() {
            f.set_cursor_position(Position::new(x, y));
        }
    }
}

fn render_results(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.ui.theme.border_style)
        .title(Span::styled(
            "Risk Assessment",
            app.ui.theme.panel_title_style,
        ));
    let inner = block.inner(area);

    if app.ui.results.take_reveal_request() {
        app.ui.results_scroll = ScrollState {
            offset: 0,
            follow_tail: false,
        };
    }

    let lines = build_result_lines(app, inner.width as usize);
    let max_offset = lines.len().saturating_sub(usize::from(inner.height));
    let offset = app.ui.results_scroll.resolve(max_offset);
    app.ui.results_viewport_height = inner.height;
    app.ui.results_max_scroll = max_offset;

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(visible_window(lines, offset, inner.height)), inner);
}

/// Slice pre-wrapped lines to the rows on screen; `Paragraph::scroll` is limited to `u16`.
fn visible_window(lines: Vec<Line<'static>>, offset: usize, height: u16) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .skip(offset)
        .take(usize::from(height))
        .collect()
}

fn build_result_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let theme = &app.ui.theme;
    if !app.ui.results.has_results() {
        return vec![Line::from(Span::styled(
            "Submit the form to see your risk predictions.",
            theme.hint_style,
        ))];
    }

    let config = WrapConfig::new(width.saturating_sub(2).max(1));
    let mut lines = Vec::new();
    for (idx, card) in app.ui.results.cards().iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        let style = theme.risk_style(card.level);
        lines.push(Line::from(vec![
            Span::styled("▌ ", style),
            Span::styled(card.title.clone(), style.add_modifier(Modifier::BOLD)),
            Span::styled(format!("  [{} risk]", card.level.as_str()), style),
        ]));
        lines.push(Line::from(vec![
            Span::styled("▌ ", style),
            Span::styled(card.score_line(), style),
        ]));
        for text in TextWrapper::wrap_lines(&card.recommendation, &config) {
            lines.push(Line::from(vec![
                Span::styled("▌ ", style),
                Span::styled(text, theme.system_text_style),
            ]));
        }
    }
    lines
}

fn render_help(f: &mut Frame, theme: &Theme, tab: Tab, area: Rect) {
    let text = match tab {
        Tab::Chat => {
            "F1/F2 tabs • Enter send • Shift+Up/Down PgUp/PgDn scroll • Ctrl+R reconnect • Ctrl+C quit"
        }
        Tab::Health => {
            "F1/F2 tabs • Tab/Up/Down move • Enter submit • Ctrl+U clear field • PgUp/PgDn scroll • Ctrl+C quit"
        }
    };
    f.render_widget(Paragraph::new(Span::styled(text, theme.hint_style)), area);
}

fn render_loading_overlay(f: &mut Frame, app: &App, area: Rect) {
    let text = format!("{} {}", app.ui.loading.frame(), LOADING_TEXT);
    let width = (UnicodeWidthStr::width(text.as_str()) as u16 + 4).min(area.width);
    let popup = centered_rect(width, 3.min(area.height), area);

    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.ui.theme.overlay_style)
        .style(app.ui.theme.overlay_style);
    f.render_widget(
        Paragraph::new(text)
            .style(app.ui.theme.overlay_style)
            .alignment(ratatui::layout::Alignment::Center)
            .block(block),
        popup,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
