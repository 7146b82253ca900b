use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::classify::Classification;
use crate::models::{ScoredReview, SentimentLabel};
use crate::report::{star_bar, truncate};

struct AppState<'a> {
    classification: &'a Classification,
    filter: Option<SentimentLabel>,
    visible: Vec<usize>,
    selected: usize,
    scroll_offset: u16,
}

impl<'a> AppState<'a> {
    fn new(classification: &'a Classification) -> Self {
        let mut state = Self {
            classification,
            filter: None,
            visible: Vec::new(),
            selected: 0,
            scroll_offset: 0,
        };
        state.apply_filter(None);
        state
    }

    fn apply_filter(&mut self, filter: Option<SentimentLabel>) {
        self.filter = filter;
        self.visible = self
            .classification
            .reviews
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.is_none_or(|label| r.sentiment_label == label))
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
        self.scroll_offset = 0;
    }

    // Pressing the active filter's key again clears it.
    fn toggle_filter(&mut self, label: SentimentLabel) {
        if self.filter == Some(label) {
            self.apply_filter(None);
        } else {
            self.apply_filter(Some(label));
        }
    }

    fn current(&self) -> Option<&'a ScoredReview> {
        let idx = *self.visible.get(self.selected)?;
        self.classification.reviews.get(idx)
    }

    fn next(&mut self) {
        if !self.visible.is_empty() && self.selected < self.visible.len() - 1 {
            self.selected += 1;
            self.scroll_offset = 0;
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_offset = 0;
        }
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }
}

fn label_color(label: SentimentLabel) -> Color {
    match label {
        SentimentLabel::Positive => Color::Green,
        SentimentLabel::Neutral => Color::Gray,
        SentimentLabel::Negative => Color::Red,
    }
}

pub fn run_dashboard(title: &str, classification: &Classification) -> Result<()> {
    if classification.is_empty() {
        println!("No reviews found.");
        return Ok(());
    }

    let mut state = AppState::new(classification);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state, title);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    title: &str,
) -> Result<()> {
    let mut list_state = ListState::default();
    list_state.select(Some(0));

    loop {
        terminal.draw(|frame| draw(frame, state, &mut list_state, title))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down | KeyCode::Char('j') => state.next(),
                KeyCode::Up | KeyCode::Char('k') => state.prev(),
                KeyCode::Char('J') | KeyCode::PageDown => state.scroll_down(),
                KeyCode::Char('K') | KeyCode::PageUp => state.scroll_up(),
                KeyCode::Char('p') => state.toggle_filter(SentimentLabel::Positive),
                KeyCode::Char('u') => state.toggle_filter(SentimentLabel::Neutral),
                KeyCode::Char('n') => state.toggle_filter(SentimentLabel::Negative),
                KeyCode::Char('a') => state.apply_filter(None),
                _ => {}
            }
            list_state.select(if state.visible.is_empty() { None } else { Some(state.selected) });
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &AppState, list_state: &mut ListState, title: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(1)])
        .split(frame.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    // Left panel: review list
    let items: Vec<ListItem> = state
        .visible
        .iter()
        .filter_map(|&i| state.classification.reviews.get(i))
        .map(|r| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<8}", r.sentiment_label),
                    Style::default().fg(label_color(r.sentiment_label)),
                ),
                Span::raw(format!(" {:>6.3} ", r.sentiment_score)),
                Span::raw(truncate(&r.review.summary, 40)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let filter_name = state.filter.map(|l| l.as_str()).unwrap_or("All");
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " {} | {} ({}) ",
            title,
            filter_name,
            state.visible.len()
        )))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], list_state);

    // Right panel: review detail
    let detail = Paragraph::new(build_detail(state))
        .block(Block::default().borders(Borders::ALL).title(" Review "))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0));
    frame.render_widget(detail, chunks[1]);

    // Distribution strip
    let summary = &state.classification.summary;
    let mut spans = Vec::new();
    for label in SentimentLabel::ALL {
        spans.push(Span::styled(
            format!(
                " {}: {} ({:.0}%) ",
                label,
                summary.count(label),
                summary.share(label) * 100.0
            ),
            Style::default().fg(label_color(label)),
        ));
    }
    let distribution = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Sentiment "));
    frame.render_widget(distribution, rows[1]);

    let help = Paragraph::new(
        " j/k:navigate  J/K:scroll  p:positive u:neutral n:negative a:all  q:quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[2]);
}

fn build_detail<'a>(state: &AppState<'a>) -> Text<'a> {
    let Some(scored) = state.current() else {
        return Text::raw("No review selected");
    };
    let review = &scored.review;

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        review.summary.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if let Some(title) = &review.job_title {
        lines.push(Line::from(format!("by {}", title)));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "{} (score {:.3}, {} reviews share this label)",
            scored.sentiment_label, scored.sentiment_score, scored.sentiment_count
        ),
        Style::default().fg(label_color(scored.sentiment_label)),
    )));
    lines.push(Line::from(""));

    let ratings = [
        ("Overall", review.rating_overall),
        ("Career opportunities", review.career_opportunities_rating),
        ("Work/life balance", review.work_life_balance_rating),
    ];
    for (name, rating) in ratings {
        if let Some(r) = rating {
            lines.push(Line::from(format!("{:<22} {:.1} {}", name, r, star_bar(r))));
        }
    }
    if let Some(outlook) = &review.rating_business_outlook {
        lines.push(Line::from(format!("{:<22} {}", "Business outlook", outlook)));
    }
    lines.push(Line::from(""));

    for (heading, body) in [("Pros", &review.pros), ("Cons", &review.cons)] {
        let Some(body) = body else { continue };
        lines.push(Line::from(Span::styled(
            heading,
            Style::default().fg(Color::Cyan),
        )));
        for line in body.lines() {
            lines.push(Line::from(format!("  {}", line)));
        }
        lines.push(Line::from(""));
    }

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::normalize::normalize_reviews;
    use crate::sentiment::SentimentAnalyzer;
    use serde_json::json;

    fn sample() -> Classification {
        let raw = serde_json::from_value(json!([
            {"summary": "Great place to work, excellent benefits"},
            {"summary": "Terrible management, toxic culture"},
            {"summary": "Loved the friendly team"},
            {"summary": "It was fine"}
        ]))
        .unwrap();
        classify(&SentimentAnalyzer::new(), normalize_reviews(raw))
    }

    #[test]
    fn test_filter_and_navigation() {
        let classification = sample();
        let mut state = AppState::new(&classification);
        assert_eq!(state.visible.len(), 4);

        state.toggle_filter(SentimentLabel::Positive);
        assert_eq!(state.visible, vec![0, 2]);
        state.next();
        assert_eq!(state.current().unwrap().review.summary, "Loved the friendly team");
        state.next();
        assert_eq!(state.selected, 1);

        state.toggle_filter(SentimentLabel::Positive);
        assert_eq!(state.filter, None);
        assert_eq!(state.selected, 0);
        state.prev();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_empty_filter_has_no_current() {
        let raw = serde_json::from_value(json!([{"summary": "Great team"}])).unwrap();
        let classification = classify(&SentimentAnalyzer::new(), normalize_reviews(raw));
        let mut state = AppState::new(&classification);
        state.toggle_filter(SentimentLabel::Negative);
        assert!(state.current().is_none());
        state.next();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_scroll_saturates() {
        let classification = sample();
        let mut state = AppState::new(&classification);
        state.scroll_up();
        assert_eq!(state.scroll_offset, 0);
        state.scroll_down();
        assert_eq!(state.scroll_offset, 3);
    }
}
