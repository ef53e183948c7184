use crate::config::TeamSettings;
use crate::grouping::{Group, EMPTY_GROUPS_MESSAGE};
use crate::roster::RosterId;
use crate::session::Session;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const EMPTY_ROSTER_HINT: &str = "Add members or move them here.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    AddMember,
    Results,
}

pub struct App {
    pub session: Session,
    pub titles: TeamSettings,
    pub focus: RosterId,
    pub mode: Mode,
    pub input: String,
    state_a: TableState,
    state_b: TableState,
}

impl App {
    pub fn new(session: Session, titles: TeamSettings) -> Self {
        let mut app = Self {
            session,
            titles,
            focus: RosterId::A,
            mode: Mode::Browse,
            input: String::new(),
            state_a: TableState::default(),
            state_b: TableState::default(),
        };
        app.clamp_selection(RosterId::A);
        app.clamp_selection(RosterId::B);
        app
    }

    fn state(&self, roster: RosterId) -> &TableState {
        match roster {
            RosterId::A => &self.state_a,
            RosterId::B => &self.state_b,
        }
    }

    fn state_mut(&mut self, roster: RosterId) -> &mut TableState {
        match roster {
            RosterId::A => &mut self.state_a,
            RosterId::B => &mut self.state_b,
        }
    }

    /// Keep the selection inside the roster after it shrank or grew
    fn clamp_selection(&mut self, roster: RosterId) {
        let len = self.session.store().len(roster);
        let selected = self.state(roster).selected();
        let next = match (len, selected) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.state_mut(roster).select(next);
    }

    fn select_last(&mut self, roster: RosterId) {
        let len = self.session.store().len(roster);
        self.state_mut(roster).select(len.checked_sub(1));
    }

    pub fn selected_member_id(&self) -> Option<String> {
        let index = self.state(self.focus).selected()?;
        self.session
            .store()
            .roster(self.focus)
            .members()
            .get(index)
            .map(|m| m.id.clone())
    }

    pub fn next(&mut self) {
        let len = self.session.store().len(self.focus);
        if len == 0 {
            return;
        }
        let i = match self.state(self.focus).selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state_mut(self.focus).select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.session.store().len(self.focus);
        if len == 0 {
            return;
        }
        let i = match self.state(self.focus).selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state_mut(self.focus).select(Some(i));
    }

    pub fn switch_focus(&mut self) {
        self.focus = self.focus.other();
        self.clamp_selection(self.focus);
    }

    pub fn submit_input(&mut self) {
        if self.session.add(self.focus, &self.input).is_some() {
            self.select_last(self.focus);
        }
        self.input.clear();
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_member_id() {
            self.session.remove(self.focus, &id);
            self.clamp_selection(self.focus);
        }
    }

    /// Keyboard stand-in for dropping the selected member on `dest`
    pub fn move_selected(&mut self, dest: RosterId) {
        let Some(id) = self.selected_member_id() else {
            return;
        };
        if self.session.move_member(self.focus, dest, &id) {
            self.clamp_selection(self.focus);
            self.select_last(dest);
        }
    }

    pub fn generate(&mut self) {
        self.session.generate();
        self.mode = Mode::Results;
    }

    pub fn close_results(&mut self) {
        self.session.close_result();
        self.mode = Mode::Browse;
    }

    /// Apply one key press; returns `false` when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            Mode::AddMember => match key.code {
                KeyCode::Enter => self.submit_input(),
                KeyCode::Esc => {
                    self.input.clear();
                    self.mode = Mode::Browse;
                }
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) => self.input.push(c),
                _ => {}
            },
            Mode::Results => match key.code {
                KeyCode::Esc | KeyCode::Enter => self.close_results(),
                KeyCode::Char('g') => self.generate(),
                _ => {}
            },
            Mode::Browse => match key.code {
                KeyCode::Char('q') => return false,
                KeyCode::Tab | KeyCode::BackTab => self.switch_focus(),
                KeyCode::Char('a') => self.mode = Mode::AddMember,
                KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
                KeyCode::Char('m') => self.move_selected(self.focus.other()),
                KeyCode::Left => self.move_selected(RosterId::A),
                KeyCode::Right => self.move_selected(RosterId::B),
                KeyCode::Char('g') => self.generate(),
                KeyCode::Down | KeyCode::Char('j') => self.next(),
                KeyCode::Up | KeyCode::Char('k') => self.previous(),
                _ => {}
            },
        }
        true
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if !app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let area = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Rosters
            Constraint::Length(3), // Input / status bar
        ])
        .split(area);

    render_header(f, chunks[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_roster(f, columns[0], app, RosterId::A);
    render_roster(f, columns[1], app, RosterId::B);

    if app.mode == Mode::AddMember {
        render_input(f, chunks[2], app);
    } else {
        render_status_bar(f, chunks[2], app);
    }

    if app.mode == Mode::Results {
        render_results(f, area, app);
    }
}

fn roster_color(roster: RosterId) -> Color {
    match roster {
        RosterId::A => Color::Cyan,
        RosterId::B => Color::Magenta,
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let store = app.session.store();
    let spans = vec![
        Span::styled(
            "Team Shuffler",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("{} ({})", app.titles.title(RosterId::A), store.len(RosterId::A)),
            Style::default().fg(roster_color(RosterId::A)),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} ({})", app.titles.title(RosterId::B), store.len(RosterId::B)),
            Style::default().fg(roster_color(RosterId::B)),
        ),
    ];

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_roster(f: &mut Frame, area: Rect, app: &mut App, roster: RosterId) {
    let focused = app.focus == roster && app.mode != Mode::Results;
    let border = if focused {
        Style::default().fg(roster_color(roster)).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = format!(
        " {} ({}) ",
        app.titles.title(roster),
        app.session.store().len(roster)
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);

    let members = app.session.store().roster(roster).members();
    if members.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            format!("  {}", EMPTY_ROSTER_HINT),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    let width = area.width.saturating_sub(6) as usize;
    let rows: Vec<Row> = members
        .iter()
        .map(|m| Row::new(vec![Cell::from(truncate(&m.name, width))]).height(1))
        .collect();

    let table = Table::new(rows, [Constraint::Percentage(100)])
        .block(block)
        .highlight_style(if focused {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        })
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, app.state_mut(roster));
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(
            format!(" New member for {}: ", app.titles.title(app.focus)),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(app.input.as_str()),
        Span::styled("█", Style::default().fg(Color::White)),
    ]);

    let input = Paragraph::new(vec![line]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Enter add | Esc done "),
    );

    f.render_widget(input, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let hints: &[(&str, &str)] = match app.mode {
        Mode::Results => &[("g", "Reshuffle"), ("Esc", "Close")],
        _ => &[
            ("a", "Add"),
            ("d", "Delete"),
            ("m/←/→", "Move"),
            ("Tab", "Team"),
            ("g", "Generate"),
            ("q", "Quit"),
        ],
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {}", label)));
    }

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.session.result() else {
        return;
    };

    let popup = centered_rect(80, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Team Generation Results ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    for (column, roster) in columns.iter().zip(RosterId::ALL) {
        let lines = group_lines(app.titles.title(roster), result.groups(roster), roster);
        f.render_widget(Paragraph::new(lines), *column);
    }
}

fn group_lines(title: &str, groups: &[Group], roster: RosterId) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} Results", title),
            Style::default()
                .fg(roster_color(roster))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
    ];

    if groups.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {}", EMPTY_GROUPS_MESSAGE),
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    for (index, group) in groups.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!(" Group {}", index + 1),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for member in group {
            lines.push(Line::from(format!("   • {}", member.name)));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
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

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len || max_len < 4 {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
