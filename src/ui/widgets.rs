//! Custom widgets for the trainer TUI.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::theme::{icons, Theme};
use crate::stats::GlobalStats;

// ══════════════════════════════════════════════════════════════════════════
// Logo Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct Logo<'a> {
    theme: &'a Theme,
}

impl<'a> Logo<'a> {
    const ART: &'static str = r#"
     _  __                    _____           _
    | |/ /__ _ _ __   __ _   |_   _| __ __ _(_)_ __   ___ _ __
    | ' // _` | '_ \ / _` |    | || '__/ _` | | '_ \ / _ \ '__|
    | . \ (_| | | | | (_| |    | || | | (_| | | | | |  __/ |
    |_|\_\__,_|_| |_|\__,_|    |_||_|  \__,_|_|_| |_|\___|_|"#;

    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn render_to(theme: &Theme, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = Self::ART
            .lines()
            .skip(1)
            .map(|line| {
                Line::from(vec![
                    Span::styled(line, Style::default().fg(theme.colors.primary))
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} Hiragana Learning Studio {}", icons::SPARKLE, icons::SPARKLE),
            theme.subtitle(),
        )));

        let para = Paragraph::new(lines)
            .alignment(Alignment::Center);

        para.render(area, buf);
    }
}

impl Widget for Logo<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::render_to(self.theme, area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Lifetime Stats Bar Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct StatsBar<'a> {
    stats: &'a GlobalStats,
    theme: &'a Theme,
}

impl<'a> StatsBar<'a> {
    pub fn new(stats: &'a GlobalStats, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }
}

impl Widget for StatsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::horizontal([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

        // Lifetime correct/attempts
        let correct_text = Line::from(vec![
            Span::raw(format!("{} ", icons::TARGET)),
            Span::styled(
                format!("{}/{}", self.stats.total_correct, self.stats.total_attempts),
                Style::default().fg(self.theme.colors.primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" correct", Style::default().fg(self.theme.colors.text_muted)),
        ]);
        Paragraph::new(correct_text)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        // Lifetime accuracy
        let accuracy_text = Line::from(vec![
            Span::styled("Accuracy: ", Style::default().fg(self.theme.colors.text_muted)),
            Span::styled(
                format!("{:.1}%", self.stats.accuracy() * 100.0),
                Style::default().fg(self.theme.colors.info).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(accuracy_text)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        // Streak
        let streak_text = Line::from(vec![
            Span::raw(format!("{} ", icons::FIRE)),
            Span::styled("Streak: ", Style::default().fg(self.theme.colors.text_muted)),
            Span::styled(self.stats.streak.to_string(), self.theme.streak()),
            Span::styled(
                format!(" (Best: {})", self.stats.longest_streak),
                Style::default().fg(self.theme.colors.text_dim),
            ),
        ]);
        Paragraph::new(streak_text)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Prompt Card Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct PromptCard<'a> {
    prompt: &'a str,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> PromptCard<'a> {
    pub fn new(prompt: &'a str, title: &'a str, theme: &'a Theme) -> Self {
        Self { prompt, title, theme }
    }
}

impl Widget for PromptCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.accent))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.title, self.theme.highlight()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        // Prompt plus an accent rule matching its display width (kana are
        // double-width, so measure rather than count chars).
        let rule_width = UnicodeWidthStr::width(self.prompt).max(2);
        let lines = vec![
            Line::from(Span::styled(self.prompt, self.theme.prompt())),
            Line::from(Span::styled(
                "─".repeat(rule_width),
                Style::default().fg(self.theme.colors.text_dim),
            )),
        ];

        let vertical_padding = inner.height.saturating_sub(lines.len() as u16) / 2;
        let content_area = Rect {
            x: inner.x,
            y: inner.y + vertical_padding,
            width: inner.width,
            height: inner.height.saturating_sub(vertical_padding),
        };

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(content_area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Choice Grid Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct ChoiceGrid<'a> {
    options: &'a [String],
    theme: &'a Theme,
}

impl<'a> ChoiceGrid<'a> {
    pub fn new(options: &'a [String], theme: &'a Theme) -> Self {
        Self { options, theme }
    }
}

impl Widget for ChoiceGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::vertical([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(area);

        for (i, option) in self.options.iter().enumerate().take(4) {
            let cols = Layout::horizontal([
                Constraint::Percentage(50),
                Constraint::Percentage(50),
            ])
            .split(rows[i / 2]);
            let cell = cols[i % 2];

            let button = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.theme.colors.secondary));

            let inner = button.inner(cell);
            button.render(cell, buf);

            let text = Line::from(vec![
                Span::styled(
                    format!("{} ", i + 1),
                    self.theme.key_highlight(),
                ),
                Span::styled(option.as_str(), Style::default().fg(self.theme.colors.text)),
            ]);
            let vertical_padding = inner.height.saturating_sub(1) / 2;
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .render(
                    Rect {
                        y: inner.y + vertical_padding,
                        height: inner.height.saturating_sub(vertical_padding),
                        ..inner
                    },
                    buf,
                );
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Key Hints Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = self
            .hints
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(*key, self.theme.key_highlight()),
                    Span::styled(format!(" {} ", desc), self.theme.key_hint()),
                    Span::styled("│ ", Style::default().fg(self.theme.colors.text_dim)),
                ]
            })
            .collect();

        let line = Line::from(spans);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Session Summary Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct SessionSummary<'a> {
    correct: u32,
    total: u32,
    accuracy: f64,
    theme: &'a Theme,
}

impl<'a> SessionSummary<'a> {
    pub fn new(correct: u32, total: u32, accuracy: f64, theme: &'a Theme) -> Self {
        Self { correct, total, accuracy, theme }
    }

    fn feedback(&self) -> (&'static str, Style) {
        let percent = self.accuracy * 100.0;
        if percent >= 90.0 {
            ("Excellent! You're mastering hiragana!", self.theme.correct())
        } else if percent >= 75.0 {
            ("Great job! Keep practicing!", self.theme.correct())
        } else if percent >= 60.0 {
            (
                "Good progress! Regular practice will help you improve.",
                Style::default().fg(self.theme.colors.secondary),
            )
        } else {
            (
                "Keep studying! You'll get better with practice.",
                Style::default().fg(self.theme.colors.primary),
            )
        }
    }
}

impl Widget for SessionSummary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.success))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("SESSION RESULTS", self.theme.correct()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        let text = if self.total > 0 {
            let (feedback, feedback_style) = self.feedback();
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled("Cards studied: ", Style::default().fg(self.theme.colors.text_muted)),
                    Span::styled(
                        self.total.to_string(),
                        Style::default().fg(self.theme.colors.primary).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Correct answers: ", Style::default().fg(self.theme.colors.text_muted)),
                    Span::styled(
                        self.correct.to_string(),
                        Style::default().fg(self.theme.colors.primary).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Accuracy: ", Style::default().fg(self.theme.colors.text_muted)),
                    Span::styled(
                        format!("{:.1}%", self.accuracy * 100.0),
                        Style::default().fg(self.theme.colors.info).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(""),
                Line::from(Span::styled(feedback, feedback_style)),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Press ", Style::default().fg(self.theme.colors.text_dim)),
                    Span::styled("r", self.theme.key_highlight()),
                    Span::styled(" to practice again, ", Style::default().fg(self.theme.colors.text_dim)),
                    Span::styled("Esc", self.theme.key_highlight()),
                    Span::styled(" for menu", Style::default().fg(self.theme.colors.text_dim)),
                ]),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No cards were studied in this session.",
                    Style::default().fg(self.theme.colors.text_muted),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Press ", Style::default().fg(self.theme.colors.text_dim)),
                    Span::styled("Esc", self.theme.key_highlight()),
                    Span::styled(" for menu", Style::default().fg(self.theme.colors.text_dim)),
                ]),
            ]
        };

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
