//! Main application state and logic.

use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::rngs::ThreadRng;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::{icons, Theme};
use super::widgets::{ChoiceGrid, KeyHints, Logo, PromptCard, SessionSummary, StatsBar};
use crate::catalog::{self, Card};
use crate::config::Config;
use crate::evaluate::{choice_options, evaluate};
use crate::session::{PracticeMode, Session};
use crate::stats::StatsStore;

// ══════════════════════════════════════════════════════════════════════════
// Application State
// ══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Practice,
    Feedback,
    Reference,
    Results,
}

/// One answered round, kept for the feedback screen.
struct Outcome {
    card: Card,
    submitted: String,
    is_correct: bool,
}

pub struct App {
    pub screen: Screen,
    pub running: bool,

    // Config and theme
    pub config: Config,
    pub theme: Theme,

    // Persistent statistics
    pub stats: StatsStore,

    // Practice state
    session: Option<Session>,
    current_card: Option<Card>,
    answer_input: String,
    choices: Vec<String>,
    last_outcome: Option<Outcome>,

    // Reference chart scroll offset
    reference_scroll: u16,

    // Status message (shown temporarily)
    status_message: Option<(String, Instant)>,

    rng: ThreadRng,
}

impl App {
    pub fn new(stats: StatsStore, config: Config) -> Self {
        let theme = Theme::from_name(&config.theme);

        Self {
            screen: Screen::Menu,
            running: true,
            config,
            theme,
            stats,
            session: None,
            current_card: None,
            answer_input: String::new(),
            choices: Vec::new(),
            last_outcome: None,
            reference_scroll: 0,
            status_message: None,
            rng: rand::thread_rng(),
        }
    }

    pub fn cycle_theme(&mut self) {
        let new_theme_name = self.theme.name.next();
        self.theme = Theme::new(new_theme_name);
        self.config.theme = new_theme_name.as_str().to_string();
        let _ = self.config.save();
    }

    pub fn toggle_multiple_choice(&mut self) {
        self.config.multiple_choice = !self.config.multiple_choice;
        let _ = self.config.save();
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    // ══════════════════════════════════════════════════════════════════════
    // Practice Flow
    // ══════════════════════════════════════════════════════════════════════

    pub fn start_practice(&mut self, mode: PracticeMode) {
        self.session = Some(Session::start(mode, &mut self.rng));
        self.next_card();
    }

    /// Draw the next card, or move to the results screen when the queue is
    /// drained.
    pub fn next_card(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.next_card() {
            Some(card) => {
                let mode = session.mode;
                self.current_card = Some(card);
                self.answer_input.clear();
                self.choices = if self.config.multiple_choice {
                    choice_options(&card, mode, catalog::all_cards(), &mut self.rng)
                } else {
                    Vec::new()
                };
                self.screen = Screen::Practice;
            }
            None => {
                self.current_card = None;
                self.screen = Screen::Results;
            }
        }
    }

    /// Score one answer: session counters and the persisted record update
    /// together, then the feedback screen takes over.
    pub fn submit_answer(&mut self, submitted: String) {
        let Some(card) = self.current_card else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let is_correct = evaluate(&card, session.mode, &submitted);
        session.record_result(is_correct);

        if let Err(err) = self.stats.record_answer(card.symbol, is_correct) {
            self.set_status(format!("Stats not saved: {err:#}"));
        }

        self.last_outcome = Some(Outcome {
            card,
            submitted,
            is_correct,
        });
        self.screen = Screen::Feedback;
    }

    /// Drop the current card without recording anything.
    pub fn skip_card(&mut self) {
        self.next_card();
    }

    pub fn restart_session(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.restart(&mut self.rng);
            self.next_card();
        }
    }

    pub fn return_to_menu(&mut self) {
        self.session = None;
        self.current_card = None;
        self.last_outcome = None;
        self.screen = Screen::Menu;
    }

    // ══════════════════════════════════════════════════════════════════════
    // Event Handling
    // ══════════════════════════════════════════════════════════════════════

    pub fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.screen {
                    Screen::Menu => self.handle_menu_keys(key.code),
                    Screen::Practice => self.handle_practice_keys(key.code),
                    Screen::Feedback => self.handle_feedback_keys(key.code),
                    Screen::Reference => self.handle_reference_keys(key.code),
                    Screen::Results => self.handle_results_keys(key.code),
                }
            }
        }
        Ok(())
    }

    fn handle_menu_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('1') | KeyCode::Char('h') => {
                self.start_practice(PracticeMode::SymbolToReading)
            }
            KeyCode::Char('2') | KeyCode::Char('r') => {
                self.start_practice(PracticeMode::ReadingToSymbol)
            }
            KeyCode::Char('c') => {
                self.reference_scroll = 0;
                self.screen = Screen::Reference;
            }
            KeyCode::Char('m') => self.toggle_multiple_choice(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
    }

    fn handle_practice_keys(&mut self, key: KeyCode) {
        if self.config.multiple_choice {
            match key {
                KeyCode::Esc => self.return_to_menu(),
                KeyCode::Char(' ') => self.skip_card(),
                KeyCode::Char('t') => self.cycle_theme(),
                KeyCode::Char(c @ '1'..='4') => {
                    let i = c as usize - '1' as usize;
                    if let Some(option) = self.choices.get(i).cloned() {
                        self.submit_answer(option);
                    }
                }
                _ => {}
            }
        } else {
            // Typing mode: letters go into the input, so no letter shortcuts.
            match key {
                KeyCode::Esc => self.return_to_menu(),
                KeyCode::Enter => {
                    let submitted = self.answer_input.clone();
                    self.submit_answer(submitted);
                }
                KeyCode::Backspace => {
                    self.answer_input.pop();
                }
                KeyCode::Char(c) => self.answer_input.push(c),
                _ => {}
            }
        }
    }

    fn handle_feedback_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.return_to_menu(),
            KeyCode::Char(' ') | KeyCode::Enter => self.next_card(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
    }

    fn handle_reference_keys(&mut self, key: KeyCode) {
        let max_scroll = reference_lines_len().saturating_sub(5) as u16;
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.screen = Screen::Menu,
            KeyCode::Up | KeyCode::Char('k') => {
                self.reference_scroll = self.reference_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.reference_scroll = (self.reference_scroll + 1).min(max_scroll);
            }
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
    }

    fn handle_results_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.return_to_menu(),
            KeyCode::Char('r') | KeyCode::Enter => self.restart_session(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Rendering
    // ══════════════════════════════════════════════════════════════════════

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Clear with background
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.colors.bg_dark)),
            area,
        );

        match self.screen {
            Screen::Menu => self.render_menu(frame, area),
            Screen::Practice => self.render_practice(frame, area),
            Screen::Feedback => self.render_feedback(frame, area),
            Screen::Reference => self.render_reference(frame, area),
            Screen::Results => self.render_results(frame, area),
        }
    }

    fn render_menu(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(2),  // Top padding
            Constraint::Length(8),  // Logo
            Constraint::Length(2),  // Spacing
            Constraint::Length(6),  // Mode list
            Constraint::Length(2),  // Multiple choice toggle
            Constraint::Min(3),     // Lifetime stats
            Constraint::Length(3),  // Help
        ])
        .split(area);

        // Logo
        Logo::render_to(&self.theme, chunks[1], frame.buffer_mut());

        // Mode list
        let modes = vec![
            Line::from(vec![
                Span::styled("1 ", self.theme.key_highlight()),
                Span::styled(
                    PracticeMode::SymbolToReading.label(),
                    Style::default().fg(self.theme.colors.text),
                ),
            ]),
            Line::from(vec![
                Span::styled("2 ", self.theme.key_highlight()),
                Span::styled(
                    PracticeMode::ReadingToSymbol.label(),
                    Style::default().fg(self.theme.colors.text),
                ),
            ]),
            Line::from(vec![
                Span::styled("c ", self.theme.key_highlight()),
                Span::styled(
                    format!("{} Reference Chart", icons::BOOK),
                    Style::default().fg(self.theme.colors.text),
                ),
            ]),
        ];
        let list_area = centered_rect(50, 100, chunks[3]);
        let modes = Paragraph::new(modes)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.theme.colors.primary))
                    .title(" Practice ")
                    .title_style(self.theme.highlight()),
            );
        frame.render_widget(modes, list_area);

        // Multiple choice toggle state
        let toggle = Paragraph::new(Line::from(vec![
            Span::styled("Multiple choice: ", Style::default().fg(self.theme.colors.text_muted)),
            if self.config.multiple_choice {
                Span::styled("ON", self.theme.correct())
            } else {
                Span::styled("OFF", Style::default().fg(self.theme.colors.text_dim))
            },
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(toggle, chunks[4]);

        // Lifetime stats
        frame.render_widget(StatsBar::new(&self.stats.stats, &self.theme), chunks[5]);

        // Key hints
        let theme_hint = format!("[{}]", self.theme.name.display_name());
        let hints_data: [(&str, &str); 5] = [
            ("1/2", "practice"),
            ("c", "chart"),
            ("m", "choices"),
            ("t", &theme_hint),
            ("q", "quit"),
        ];
        let hints = KeyHints::new(&hints_data, &self.theme);
        frame.render_widget(hints, chunks[6]);

        self.render_status(frame, chunks[6]);
    }

    fn render_practice(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3),  // Header
            Constraint::Length(1),  // Stats
            Constraint::Length(1),  // Spacing
            Constraint::Min(9),     // Prompt card
            Constraint::Length(7),  // Answer area
            Constraint::Length(2),  // Hints
        ])
        .split(area);

        let Some(session) = self.session.as_ref() else {
            return;
        };

        // Header: mode label and card position
        let position = catalog::all_cards().len() - session.remaining();
        let header = Paragraph::new(Line::from(vec![
            Span::styled(session.mode.label(), self.theme.title()),
            Span::styled(
                format!("   Card {}/{}", position, catalog::all_cards().len()),
                Style::default().fg(self.theme.colors.text_muted),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        // Lifetime stats bar
        frame.render_widget(StatsBar::new(&self.stats.stats, &self.theme), chunks[1]);

        // Prompt card
        if let Some(card) = self.current_card {
            let card_area = centered_rect(60, 100, chunks[3]);
            frame.render_widget(
                PromptCard::new(session.mode.prompt(&card), session.mode.label(), &self.theme),
                card_area,
            );
        }

        // Answer area
        if self.config.multiple_choice {
            let grid_area = centered_rect(70, 100, chunks[4]);
            frame.render_widget(ChoiceGrid::new(&self.choices, &self.theme), grid_area);
        } else {
            self.render_answer_input(frame, chunks[4]);
        }

        // Key hints
        let hints = if self.config.multiple_choice {
            KeyHints::new(&[
                ("1-4", "answer"),
                ("Space", "skip"),
                ("Esc", "menu"),
            ], &self.theme)
        } else {
            KeyHints::new(&[
                ("Enter", "check answer"),
                ("Esc", "menu"),
            ], &self.theme)
        };
        frame.render_widget(hints, chunks[5]);
    }

    fn render_answer_input(&self, frame: &mut Frame, area: Rect) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        let input_area = centered_rect(40, 100, area);
        let chunks = Layout::vertical([
            Constraint::Length(3),  // Input box
            Constraint::Min(0),
        ])
        .split(input_area);

        let style = Style::default().fg(self.theme.colors.accent);
        let input = Paragraph::new(self.answer_input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(style)
                .title(format!(" {} ", session.mode.answer_label()))
                .title_style(style),
        );
        frame.render_widget(input, chunks[0]);

        let cursor_x = chunks[0].x + 1 + self.answer_input.chars().count() as u16;
        frame.set_cursor_position((cursor_x.min(chunks[0].right().saturating_sub(2)), chunks[0].y + 1));
    }

    fn render_feedback(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3),  // Result banner
            Constraint::Length(1),  // Stats
            Constraint::Length(1),  // Spacing
            Constraint::Min(8),     // Card details
            Constraint::Length(2),  // Hints
        ])
        .split(area);

        let Some(outcome) = self.last_outcome.as_ref() else {
            return;
        };

        // Banner
        let (banner, style) = if outcome.is_correct {
            (format!("{} Correct!", icons::CHECK), self.theme.correct())
        } else {
            (format!("{} Incorrect", icons::CROSS), self.theme.incorrect())
        };
        let banner = Paragraph::new(Span::styled(banner, style)).alignment(Alignment::Center);
        frame.render_widget(banner, chunks[0]);

        // Lifetime stats (streak already reflects this answer)
        frame.render_widget(StatsBar::new(&self.stats.stats, &self.theme), chunks[1]);

        // Card details
        let detail_area = centered_rect(50, 100, chunks[3]);
        let submitted = if outcome.submitted.trim().is_empty() {
            "(blank)".to_string()
        } else {
            outcome.submitted.trim().to_string()
        };
        let details = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Hiragana: ", Style::default().fg(self.theme.colors.text_muted)),
                Span::styled(outcome.card.symbol, self.theme.prompt()),
            ]),
            Line::from(vec![
                Span::styled("Romaji: ", Style::default().fg(self.theme.colors.text_muted)),
                Span::styled(outcome.card.reading, Style::default().fg(self.theme.colors.text)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Your answer: ", Style::default().fg(self.theme.colors.text_muted)),
                Span::styled(submitted, style),
            ]),
        ];
        let details = Paragraph::new(details)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.theme.colors.secondary)),
            );
        frame.render_widget(details, detail_area);

        // Key hints
        let hints = KeyHints::new(&[
            ("Space", "next card"),
            ("Esc", "menu"),
        ], &self.theme);
        frame.render_widget(hints, chunks[4]);

        self.render_status(frame, chunks[4]);
    }

    fn render_reference(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3),  // Title
            Constraint::Min(10),    // Chart
            Constraint::Length(2),  // Hints
        ])
        .split(area);

        let title = Paragraph::new(format!("{} Hiragana Reference", icons::BOOK))
            .alignment(Alignment::Center)
            .style(self.theme.title());
        frame.render_widget(title, chunks[0]);

        let chart_area = centered_rect(40, 100, chunks[1]);
        let mut lines: Vec<Line> = Vec::new();
        for (label, cards) in catalog::rows() {
            lines.push(Line::from(Span::styled(
                label.to_string(),
                self.theme.highlight(),
            )));
            for card in cards {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {}", card.symbol), self.theme.prompt()),
                    Span::styled(
                        format!("  {}", card.reading),
                        Style::default().fg(self.theme.colors.text),
                    ),
                ]));
            }
            lines.push(Line::from(""));
        }

        let chart = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.theme.colors.primary)),
            )
            .scroll((self.reference_scroll, 0));
        frame.render_widget(chart, chart_area);

        let hints = KeyHints::new(&[
            ("j/k", "scroll"),
            ("Esc", "back"),
        ], &self.theme);
        frame.render_widget(hints, chunks[2]);
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        let card_area = centered_rect(55, 60, area);
        frame.render_widget(
            SessionSummary::new(session.correct, session.total, session.accuracy(), &self.theme),
            card_area,
        );
    }

    /// Show a recent status message (e.g. a failed stats write) above the
    /// hint bar.
    fn render_status(&self, frame: &mut Frame, hints_area: Rect) {
        if let Some((ref msg, time)) = self.status_message {
            if time.elapsed().as_secs() < 5 {
                let status = Paragraph::new(msg.as_str())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(self.theme.colors.warning));
                let status_area = Rect {
                    x: hints_area.x,
                    y: hints_area.y.saturating_sub(1),
                    width: hints_area.width,
                    height: 1,
                };
                frame.render_widget(status, status_area);
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ══════════════════════════════════════════════════════════════════════════

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Total line count of the reference chart, for scroll clamping.
fn reference_lines_len() -> usize {
    catalog::rows().map(|(_, cards)| cards.len() + 2).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_app(dir: &TempDir, multiple_choice: bool) -> App {
        let stats = StatsStore::load(dir.path().join("stats.json"));
        let config = Config {
            multiple_choice,
            ..Config::default()
        };
        App::new(stats, config)
    }

    #[test]
    fn all_correct_session_reaches_full_accuracy() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, false);

        app.start_practice(PracticeMode::SymbolToReading);
        while app.screen == Screen::Practice {
            let card = app.current_card.unwrap();
            app.submit_answer(card.reading.to_string());
            assert_eq!(app.screen, Screen::Feedback);
            app.next_card();
        }

        assert_eq!(app.screen, Screen::Results);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.total, 46);
        assert_eq!(session.correct, 46);
        assert_eq!(session.accuracy(), 1.0);

        // Lifetime stats marched in step
        assert_eq!(app.stats.stats.total_attempts, 46);
        assert_eq!(app.stats.stats.total_correct, 46);
        assert_eq!(app.stats.stats.streak, 46);
        assert_eq!(app.stats.stats.longest_streak, 46);
    }

    #[test]
    fn wrong_answer_counts_and_breaks_the_streak() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, false);

        app.start_practice(PracticeMode::SymbolToReading);
        let card = app.current_card.unwrap();
        app.submit_answer(card.reading.to_string());
        app.next_card();
        app.submit_answer("definitely wrong".to_string());

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.total, 2);
        assert_eq!(session.correct, 1);
        assert_eq!(app.stats.stats.streak, 0);
        assert_eq!(app.stats.stats.longest_streak, 1);
    }

    #[test]
    fn skip_advances_without_recording() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, true);

        app.start_practice(PracticeMode::ReadingToSymbol);
        let first = app.current_card.unwrap();
        app.skip_card();

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.total, 0);
        assert_eq!(app.stats.stats.total_attempts, 0);
        assert_ne!(app.current_card.unwrap(), first);
    }

    #[test]
    fn multiple_choice_rounds_offer_four_options() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, true);

        app.start_practice(PracticeMode::SymbolToReading);
        let card = app.current_card.unwrap();
        assert_eq!(app.choices.len(), 4);
        assert!(app.choices.contains(&card.reading.to_string()));
    }

    #[test]
    fn restart_reshuffles_with_fresh_counters() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, false);

        app.start_practice(PracticeMode::SymbolToReading);
        let card = app.current_card.unwrap();
        app.submit_answer(card.reading.to_string());
        app.restart_session();

        assert_eq!(app.screen, Screen::Practice);
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.total, 0);
        // Lifetime stats survive the restart
        assert_eq!(app.stats.stats.total_attempts, 1);
    }

    #[test]
    fn returning_to_menu_discards_the_session() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir, false);

        app.start_practice(PracticeMode::SymbolToReading);
        app.return_to_menu();
        assert_eq!(app.screen, Screen::Menu);
        assert!(app.session.is_none());
        assert!(app.current_card.is_none());
    }
}
