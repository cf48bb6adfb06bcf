//! TUI (Terminal User Interface) module for the Wordle assistant
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `App`: key handling and popup state on top of a [`GuessController`]
//! - `TuiInterface`: terminal setup, teardown and drawing
//! - [`run`]: the event loop tying the two together
//!
//! # Key repeat
//! Terminals that support `REPORT_EVENT_TYPES` label auto-repeats, and [`map_key`]
//! drops them. Elsewhere a held key arrives as a stream of presses, so
//! [`RepeatFilter`] drops presses of the same key that follow each other within
//! `REPEAT_WINDOW`. The first repeat after the terminal's initial delay still
//! gets through there.
//!
//! # Submitting
//! Enter validates the guess. When the engine has to run, the loop draws once with
//! the loading popup before calling it, so the indicator is on screen while the
//! candidates are filtered.

use crate::board::{Cell, MAX_ROWS, Row, RowState};
use crate::controller::{GuessController, SubmitError, SubmitOutcome};
use crate::engine::SuggestionEngine;
use crate::feedback::{FeedbackTag, Pattern, WORD_LENGTH};
use crate::settings::Settings;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const MAX_SUGGESTIONS_DISPLAY: usize = 10;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const SHAKE_DURATION: Duration = Duration::from_millis(600);
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const REPEAT_WINDOW: Duration = Duration::from_millis(50);

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);
const PENDING_STYLE: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);

const HELP_TEXT: [&str; 9] = [
    "Type the word you played, then mark each letter's colour.",
    "",
    "A-Z        type a letter          Backspace  delete a letter",
    "1-5        cycle colour of a column (grey > yellow > green)",
    "Tab / Down next suggestion        Shift+Tab / Up  previous",
    "Enter      submit the row         Ctrl+Z     undo last row",
    "Ctrl+R     restart                F1 / ?     this help",
    "Esc        close popup / quit     Ctrl+C     quit",
    "",
];

/// What a key press asks for, independent of the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Letter(char),
    Backspace,
    Submit,
    CycleTag(usize),
    NextSuggestion,
    PreviousSuggestion,
    Undo,
    Restart,
    ShowHelp,
    Dismiss,
    Quit,
}

/// Translate a key event. Only presses count; release and auto-repeat are dropped.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        debug_log!("map_key() - Ignoring non-Press key event: {:?}", key.kind);
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(KeyAction::Quit),
        KeyCode::Char('z') if ctrl => Some(KeyAction::Undo),
        KeyCode::Char('r') if ctrl => Some(KeyAction::Restart),
        KeyCode::Char(_) if ctrl || alt => None,
        // Escape-sequence debris from focus changes
        KeyCode::Char(c) if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD => None,
        KeyCode::Char(c) if c.is_ascii_alphabetic() => Some(KeyAction::Letter(c)),
        KeyCode::Char(c @ '1'..='5') => Some(KeyAction::CycleTag(c as usize - '1' as usize)),
        KeyCode::Char('?') | KeyCode::F(1) => Some(KeyAction::ShowHelp),
        KeyCode::Backspace => Some(KeyAction::Backspace),
        KeyCode::Enter => Some(KeyAction::Submit),
        KeyCode::Tab | KeyCode::Down => Some(KeyAction::NextSuggestion),
        KeyCode::BackTab | KeyCode::Up => Some(KeyAction::PreviousSuggestion),
        KeyCode::Esc => Some(KeyAction::Dismiss),
        _ => None,
    }
}

/// Time-based auto-repeat filter for terminals that report every key as a press.
#[derive(Debug, Default)]
pub struct RepeatFilter {
    active: bool,
    last: Option<(KeyCode, KeyModifiers, Instant)>,
}

impl RepeatFilter {
    /// `active` should be false when the terminal labels repeats itself.
    #[must_use]
    pub fn new(active: bool) -> Self {
        Self { active, last: None }
    }

    /// False when `key` repeats the previous press within `REPEAT_WINDOW`.
    pub fn accept(&mut self, key: &KeyEvent, now: Instant) -> bool {
        if !self.active || key.kind != KeyEventKind::Press {
            return true;
        }
        let repeat = self.last.is_some_and(|(code, modifiers, at)| {
            code == key.code
                && modifiers == key.modifiers
                && now.saturating_duration_since(at) < REPEAT_WINDOW
        });
        self.last = Some((key.code, key.modifiers, now));
        if repeat {
            debug_log!("RepeatFilter::accept() - dropping repeat of {:?}", key.code);
        }
        !repeat
    }
}

/// Follow-up the event loop owes after [`App::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Idle,
    /// Draw the loading popup, then call [`App::resolve`].
    Resolve,
}

/// UI state around the controller: popups, status line, shake timer.
pub struct App<E: SuggestionEngine> {
    controller: GuessController<E>,
    settings: Settings,
    show_help: bool,
    completion_dismissed: bool,
    shake_until: Option<Instant>,
    status: String,
    should_quit: bool,
}

impl<E: SuggestionEngine> App<E> {
    pub fn new(controller: GuessController<E>, settings: Settings) -> Self {
        let show_help = !settings.help_seen();
        Self {
            controller,
            settings,
            show_help,
            completion_dismissed: false,
            shake_until: None,
            status: "Type your first guess".to_string(),
            should_quit: false,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &GuessController<E> {
        &self.controller
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub fn help_visible(&self) -> bool {
        self.show_help
    }

    #[must_use]
    pub fn is_shaking(&self) -> bool {
        self.shake_until.is_some_and(|until| Instant::now() < until)
    }

    fn completion_visible(&self) -> bool {
        !self.completion_dismissed && self.controller.state().completion().is_some()
    }

    fn error_visible(&self) -> bool {
        self.controller.state().error().is_some()
    }

    pub fn apply(&mut self, action: KeyAction) -> Step {
        debug_log!("apply({:?})", action);
        if action == KeyAction::Quit {
            info_log!("apply() - quit requested");
            self.should_quit = true;
            return Step::Idle;
        }

        // Popups are modal: only dismissing (or restarting from the completion popup) gets through.
        if self.show_help {
            if matches!(action, KeyAction::Dismiss | KeyAction::ShowHelp) {
                self.close_help();
            }
            return Step::Idle;
        }
        if self.error_visible() {
            if action == KeyAction::Dismiss {
                self.controller.dismiss_error();
                self.status = "Check the colours and try again".to_string();
            }
            return Step::Idle;
        }
        if self.completion_visible() {
            match action {
                KeyAction::Dismiss => self.completion_dismissed = true,
                KeyAction::Restart => self.restart(),
                KeyAction::Undo => self.undo(),
                _ => {}
            }
            return Step::Idle;
        }

        let step = match action {
            KeyAction::Letter(c) => {
                self.controller.on_letter_key(c);
                Step::Idle
            }
            KeyAction::Backspace => {
                self.controller.on_backspace();
                Step::Idle
            }
            KeyAction::CycleTag(column) => {
                if let Some(row) = self.controller.state().active_index() {
                    self.controller.cycle_tag(row, column);
                }
                Step::Idle
            }
            KeyAction::NextSuggestion => {
                self.controller.select_next_suggestion();
                Step::Idle
            }
            KeyAction::PreviousSuggestion => {
                self.controller.select_previous_suggestion();
                Step::Idle
            }
            KeyAction::Submit => self.submit(),
            KeyAction::Undo => {
                self.undo();
                Step::Idle
            }
            KeyAction::Restart => {
                self.restart();
                Step::Idle
            }
            KeyAction::ShowHelp => {
                self.show_help = true;
                Step::Idle
            }
            KeyAction::Dismiss => {
                self.should_quit = true;
                Step::Idle
            }
            KeyAction::Quit => Step::Idle,
        };

        if self.controller.take_shake() {
            self.shake_until = Some(Instant::now() + SHAKE_DURATION);
        }
        step
    }

    fn submit(&mut self) -> Step {
        match self.controller.submit() {
            Ok(SubmitOutcome::Dispatched) => {
                self.status = "Filtering candidates...".to_string();
                Step::Resolve
            }
            Ok(outcome) => {
                self.report(outcome);
                Step::Idle
            }
            Err(e) => {
                self.report_error(&e);
                Step::Idle
            }
        }
    }

    /// Run the engine call queued by a submit.
    pub fn resolve(&mut self) {
        match self.controller.resolve_pending() {
            Some(Ok(outcome)) => self.report(outcome),
            Some(Err(e)) => self.report_error(&e),
            None => {}
        }
    }

    fn report(&mut self, outcome: SubmitOutcome) {
        let state = self.controller.state();
        self.status = match outcome {
            SubmitOutcome::Won { answer } => {
                self.completion_dismissed = false;
                format!("Solved: {}", answer.to_ascii_uppercase())
            }
            SubmitOutcome::Committed => match state.submitted().last() {
                Some(row) => format!(
                    "{} {} - {} candidates remain",
                    row.word(),
                    pattern_emoji(&row.pattern()),
                    state.suggestions().len()
                ),
                None => String::new(),
            },
            SubmitOutcome::Dispatched => self.status.clone(),
        };
    }

    fn report_error(&mut self, error: &SubmitError) {
        self.status = match error {
            SubmitError::InvalidLength { .. } | SubmitError::Busy => return,
            SubmitError::InvalidWord { word } => {
                format!("{} is not in the word list", word.to_ascii_uppercase())
            }
            SubmitError::NoCandidatesRemain => "No possible answers left".to_string(),
            other => other.to_string(),
        };
    }

    fn undo(&mut self) {
        if self.controller.on_undo() {
            self.completion_dismissed = false;
            self.status = format!(
                "Undone - row {} is editable again",
                self.controller.state().submitted_count() + 1
            );
        } else {
            self.status = "Nothing to undo".to_string();
        }
    }

    fn restart(&mut self) {
        if self.controller.restart() {
            self.completion_dismissed = false;
            self.shake_until = None;
            self.status = "New game - type your first guess".to_string();
        }
    }

    fn close_help(&mut self) {
        self.show_help = false;
        if let Err(e) = self.settings.mark_help_seen() {
            log::warn!("close_help() - could not persist help flag: {e}");
        }
    }

    /// Expire timed signals.
    pub fn tick(&mut self) {
        if self.shake_until.is_some() && !self.is_shaking() {
            self.shake_until = None;
        }
    }
}

fn pattern_emoji(pattern: &Pattern) -> String {
    pattern.tags().iter().map(|t| t.emoji()).collect()
}

/// Main TUI interface component.
///
/// Owns the terminal; restores it on drop.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    keyboard_enhanced: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        // Needed for the terminal to report key releases and auto-repeats separately.
        let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        info_log!(
            "Terminal setup complete: alternate screen, cursor hidden, keyboard enhancement {}",
            keyboard_enhanced
        );
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            keyboard_enhanced,
        })
    }

    #[must_use]
    pub fn labels_key_repeats(&self) -> bool {
        self.keyboard_enhanced
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        if self.keyboard_enhanced {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
            self.keyboard_enhanced = false;
        }
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    pub fn draw<E: SuggestionEngine>(&mut self, app: &App<E>) -> Result<(), io::Error> {
        draw_app(&mut self.terminal, app)
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Draw one frame of `app` on any backend.
pub fn draw_app<B: Backend, E: SuggestionEngine>(
    terminal: &mut Terminal<B>,
    app: &App<E>,
) -> Result<(), io::Error> {
    terminal.draw(|f| render(f, app))?;
    Ok(())
}

/// Event loop. Returns when the player quits.
pub fn run<E: SuggestionEngine>(app: &mut App<E>) -> Result<(), io::Error> {
    let mut tui = TuiInterface::new()?;
    let mut repeats = RepeatFilter::new(!tui.labels_key_repeats());
    loop {
        tui.draw(app)?;
        if app.should_quit() {
            break;
        }

        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            app.tick();
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if !repeats.accept(&key, Instant::now()) {
            continue;
        }
        let Some(action) = map_key(key) else {
            continue;
        };

        if app.apply(action) == Step::Resolve {
            // Paint the loading popup before the engine blocks this thread.
            tui.draw(app)?;
            app.resolve();
        }
    }
    info_log!("run() - exiting");
    tui.cleanup()
}

fn render<E: SuggestionEngine>(f: &mut Frame, app: &App<E>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(15), // Board
            Constraint::Min(6),     // Suggestions
            Constraint::Length(3),  // Status line
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_board(f, chunks[1], app);
    render_suggestions(f, chunks[2], app);
    render_status(f, chunks[3], app.status());
    render_instructions(f, chunks[4], app);

    let state = app.controller().state();
    if state.is_loading() {
        render_popup(
            f,
            "Working",
            vec![Line::from(Span::styled("Filtering candidates...", INFO_STYLE))],
            Color::Yellow,
        );
    } else if let Some(message) = state.error() {
        render_popup(
            f,
            "No answers left",
            vec![
                Line::from(Span::styled(message.to_string(), ERROR_STYLE)),
                Line::from(""),
                Line::from("Esc: close"),
            ],
            Color::Red,
        );
    } else if app.completion_visible()
        && let Some(answer) = state.completion()
    {
        render_popup(
            f,
            "Solved",
            vec![
                Line::from(vec![
                    Span::raw("The correct answer is "),
                    Span::styled(answer.to_ascii_uppercase(), SUCCESS_STYLE),
                ]),
                Line::from(""),
                Line::from("Ctrl+R: new game | Ctrl+Z: undo | Esc: close"),
            ],
            Color::Green,
        );
    }
    if app.help_visible() {
        let mut lines: Vec<Line> = HELP_TEXT.iter().map(|l| Line::from(*l)).collect();
        lines.push(Line::from(Span::styled("Esc: close", INFO_STYLE)));
        render_popup(f, "Help", lines, Color::Cyan);
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDLE ASSISTANT")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board<E: SuggestionEngine>(f: &mut Frame, area: Rect, app: &App<E>) {
    let state = app.controller().state();
    let block = Block::default()
        .title(format!("Guesses {}/{}", state.submitted_count(), MAX_ROWS))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut header = vec![Span::raw("    ")];
    for column in 1..=WORD_LENGTH {
        header.push(Span::styled(format!(" {column} "), PENDING_STYLE));
        header.push(Span::raw(" "));
    }
    render_line(f, inner, inner.y, header);

    let board = state.board();
    let shaking = app.is_shaking();
    for row in board.rows() {
        #[allow(clippy::cast_possible_truncation)]
        let y = inner.y + 1 + row.index as u16 * ROW_SPACING;
        if y >= inner.y + inner.height {
            break;
        }
        render_row(f, inner, y, &row, shaking, app);
    }
}

fn render_row<E: SuggestionEngine>(
    f: &mut Frame,
    area: Rect,
    y: u16,
    row: &Row,
    shaking: bool,
    app: &App<E>,
) {
    let marker = if row.is_active() { "▶ " } else { "  " };
    let mut spans = vec![Span::raw(format!("{marker}  "))];
    for cell in row.cells() {
        let style = if row.is_active() && shaking {
            cell_style(cell).fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            cell_style(cell)
        };
        spans.push(Span::styled(
            format!(" {} ", cell.letter.unwrap_or(' ')),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    if let RowState::Active(guess) = row.state {
        let state = app.controller().state();
        if shaking {
            spans.push(Span::styled(" not accepted", ERROR_STYLE));
        } else if state.is_loading() {
            spans.push(Span::styled(" ...", INFO_STYLE));
        } else if guess.is_complete() && state.completion().is_none() {
            spans.push(Span::styled(" [Enter] submit", SUCCESS_STYLE));
        }
    }
    render_line(f, area, y, spans);
}

fn cell_style(cell: Cell) -> Style {
    let (bg, fg) = match cell.tag {
        None => return PENDING_STYLE,
        Some(FeedbackTag::Grey) => (Color::Gray, Color::Black),
        Some(FeedbackTag::Yellow) => (Color::Yellow, Color::Black),
        Some(FeedbackTag::Green) => (Color::Green, Color::Black),
    };
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
    let paragraph = Paragraph::new(Line::from(spans));
    f.render_widget(
        paragraph,
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_suggestions<E: SuggestionEngine>(f: &mut Frame, area: Rect, app: &App<E>) {
    let state = app.controller().state();
    let suggestions = state.suggestions();
    let selected = state.selected_suggestion();

    let mut lines = vec![Line::from(Span::styled(
        format!("Possible answers ({}):", suggestions.len()),
        INFO_STYLE,
    ))];

    // Keep the selection in view.
    let start = selected
        .map_or(0, |i| i.saturating_sub(MAX_SUGGESTIONS_DISPLAY - 1));
    for (i, word) in suggestions
        .iter()
        .enumerate()
        .skip(start)
        .take(MAX_SUGGESTIONS_DISPLAY)
    {
        let text = format!("  {:>3}. {}", i + 1, word.to_ascii_uppercase());
        if Some(i) == selected {
            lines.push(Line::from(Span::styled(text, SELECTED_STYLE)));
        } else {
            lines.push(Line::from(text));
        }
    }
    let shown_end = start + MAX_SUGGESTIONS_DISPLAY;
    if suggestions.len() > shown_end {
        lines.push(Line::from(format!(
            "  ... and {} more",
            suggestions.len() - shown_end
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Suggestions").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let status_text = if status.is_empty() { "Ready" } else { status };
    let paragraph = Paragraph::new(status_text)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions<E: SuggestionEngine>(f: &mut Frame, area: Rect, app: &App<E>) {
    let state = app.controller().state();
    let text = if app.help_visible() || app.error_visible() {
        "ESC: Close"
    } else if state.is_loading() {
        "Filtering candidates..."
    } else if state.completion().is_some() {
        "Ctrl+R: New game | Ctrl+Z: Undo | ESC: Quit"
    } else if state.active_index().is_none() {
        "Board full | Ctrl+Z: Undo | Ctrl+R: New game | ESC: Quit"
    } else {
        "Type guess | 1-5: Colour | Tab: Suggestion | ENTER: Submit | Ctrl+Z: Undo | F1: Help"
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_popup(f: &mut Frame, title: &str, lines: Vec<Line>, border: Color) {
    #[allow(clippy::cast_possible_truncation)]
    let height = (lines.len() as u16 + 2).min(f.area().height);
    let area = centered_rect(70, height, f.area());
    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GuessHelper;
    use crate::wordbank::{WordLists, load_wordbank_from_str};
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(words: &str) -> App<GuessHelper> {
        let engine = GuessHelper::new(WordLists::new(load_wordbank_from_str(words), &[]));
        let mut app = App::new(GuessController::new(engine), Settings::disabled());
        app.apply(KeyAction::Dismiss);
        app
    }

    fn type_word(app: &mut App<GuessHelper>, word: &str) {
        for c in word.chars() {
            app.apply(KeyAction::Letter(c));
        }
    }

    fn screen(app: &App<GuessHelper>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();
        draw_app(&mut terminal, app).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_map_key_letters_and_controls() {
        assert_eq!(map_key(press(KeyCode::Char('a'))), Some(KeyAction::Letter('a')));
        assert_eq!(map_key(press(KeyCode::Char('Q'))), Some(KeyAction::Letter('Q')));
        assert_eq!(map_key(press(KeyCode::Char('3'))), Some(KeyAction::CycleTag(2)));
        assert_eq!(map_key(press(KeyCode::Char('6'))), None);
        assert_eq!(map_key(press(KeyCode::Enter)), Some(KeyAction::Submit));
        assert_eq!(map_key(press(KeyCode::Backspace)), Some(KeyAction::Backspace));
        assert_eq!(map_key(press(KeyCode::Tab)), Some(KeyAction::NextSuggestion));
        assert_eq!(map_key(press(KeyCode::BackTab)), Some(KeyAction::PreviousSuggestion));
        assert_eq!(map_key(press(KeyCode::F(1))), Some(KeyAction::ShowHelp));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(KeyAction::Dismiss));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            Some(KeyAction::Undo)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(KeyAction::Restart)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(map_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT)), None);
        assert_eq!(map_key(press(KeyCode::Char('\u{FFFD}'))), None);
    }

    #[test]
    fn test_map_key_ignores_repeat_and_release() {
        for kind in [KeyEventKind::Repeat, KeyEventKind::Release] {
            let key = KeyEvent::new_with_kind_and_state(
                KeyCode::Char('a'),
                KeyModifiers::NONE,
                kind,
                KeyEventState::NONE,
            );
            assert_eq!(map_key(key), None);
        }
    }

    #[test]
    fn test_help_shown_until_dismissed() {
        let engine = GuessHelper::new(WordLists::new(load_wordbank_from_str("crane\nslate"), &[]));
        let mut app = App::new(GuessController::new(engine), Settings::disabled());
        assert!(app.help_visible());
        app.apply(KeyAction::Letter('c'));
        assert!(app.controller().state().active_guess().is_empty());
        app.apply(KeyAction::Dismiss);
        assert!(!app.help_visible());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_submit_goes_through_resolve() {
        let mut app = app("crane\nslate\nraise\nclout\nbunch");
        type_word(&mut app, "raise");
        assert_eq!(app.apply(KeyAction::Submit), Step::Resolve);
        assert!(app.controller().state().is_loading());
        assert!(screen(&app).contains("Filtering candidates..."));

        app.resolve();
        let state = app.controller().state();
        assert_eq!(state.submitted_count(), 1);
        assert!(app.status().contains("candidates remain"));
    }

    #[test]
    fn test_invalid_word_shakes() {
        let mut app = app("crane\nslate");
        type_word(&mut app, "zzzzz");
        assert_eq!(app.apply(KeyAction::Submit), Step::Idle);
        assert!(app.is_shaking());
        assert_eq!(app.status(), "ZZZZZ is not in the word list");
        assert_eq!(app.controller().state().submitted_count(), 0);
    }

    #[test]
    fn test_no_candidates_popup_is_modal() {
        let mut app = app("crane\nslate\nraise");
        type_word(&mut app, "crane");
        // All yellow: no word in the list fits.
        for column in 0..5 {
            app.apply(KeyAction::CycleTag(column));
        }
        assert_eq!(app.apply(KeyAction::Submit), Step::Resolve);
        app.resolve();
        assert!(app.controller().state().error().is_some());
        assert!(screen(&app).contains("No answers left"));

        app.apply(KeyAction::Backspace);
        assert_eq!(app.controller().state().active_guess().word(), "CRANE");
        app.apply(KeyAction::Dismiss);
        assert!(app.controller().state().error().is_none());
        assert!(!app.should_quit());
        assert_eq!(app.controller().state().submitted_count(), 0);
    }

    #[test]
    fn test_all_green_shows_completion() {
        let mut app = app("crane\nslate");
        type_word(&mut app, "slate");
        for column in 0..5 {
            app.apply(KeyAction::CycleTag(column));
            app.apply(KeyAction::CycleTag(column));
        }
        assert_eq!(app.apply(KeyAction::Submit), Step::Idle);
        assert!(screen(&app).contains("SLATE"));
        assert_eq!(app.status(), "Solved: SLATE");

        app.apply(KeyAction::Restart);
        assert_eq!(app.controller().state().completion(), None);
        assert!(app.controller().state().active_guess().is_empty());
    }

    #[test]
    fn test_escape_without_popup_quits() {
        let mut app = app("crane\nslate");
        app.apply(KeyAction::Dismiss);
        assert!(app.should_quit());
    }

    #[test]
    fn test_board_renders_six_rows() {
        let app = app("crane\nslate");
        let text = screen(&app);
        assert!(text.contains("WORDLE ASSISTANT"));
        assert!(text.contains("Guesses 0/6"));
        assert!(text.contains("Possible answers (2):"));
    }

    #[test]
    fn test_repeat_filter_drops_rapid_same_key() {
        let mut filter = RepeatFilter::new(true);
        let start = Instant::now();
        let a = press(KeyCode::Char('a'));
        assert!(filter.accept(&a, start));
        assert!(!filter.accept(&a, start + Duration::from_millis(30)));
        // A held key keeps the window sliding.
        assert!(!filter.accept(&a, start + Duration::from_millis(60)));
        assert!(filter.accept(&a, start + Duration::from_millis(200)));
        assert!(filter.accept(&press(KeyCode::Char('b')), start + Duration::from_millis(210)));
        assert!(filter.accept(&a, start + Duration::from_millis(220)));
    }

    #[test]
    fn test_repeat_filter_respects_modifiers_and_inactive_mode() {
        let mut filter = RepeatFilter::new(true);
        let now = Instant::now();
        assert!(filter.accept(&press(KeyCode::Char('z')), now));
        let ctrl_z = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert!(filter.accept(&ctrl_z, now));

        let mut passthrough = RepeatFilter::new(false);
        let key = press(KeyCode::Enter);
        assert!(passthrough.accept(&key, now));
        assert!(passthrough.accept(&key, now));
    }
}
