use crate::calc::{
    add_months, build_month_grid, grid_rows, holiday_for, month_name, GridCell, MonthHolidays,
    TaskFilter,
};
use crate::data::affirmation::AffirmationDeck;
use crate::data::task::{due_label, tasks_on};
use crate::data::app_settings::Theme;
use crate::data::{AppSettings, AssigneeData, Task};
use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use std::io::Stdout;
use std::path::PathBuf;
use std::time::Duration as StdDuration;

const HOLIDAY_COLOR: Color = Color::Green;
const TASK_COLOR: Color = Color::Cyan;

/// Colors that follow the `theme` setting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Palette {
    text: Color,
    background: Color,
    selected_fg: Color,
    selected_bg: Color,
    muted: Color,
}

impl Palette {
    pub(crate) fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                text: Color::Black,
                background: Color::White,
                selected_fg: Color::White,
                selected_bg: Color::Blue,
                muted: Color::DarkGray,
            },
            Theme::Dark => Palette {
                text: Color::White,
                background: Color::Black,
                selected_fg: Color::Black,
                selected_bg: Color::White,
                muted: Color::Gray,
            },
        }
    }
}

#[derive(PartialEq, Debug)]
enum Mode {
    Normal,
    Search,
}

pub struct App {
    tasks: Vec<Task>,
    assignees: AssigneeData,
    settings: AppSettings,
    selected_date: NaiveDate,
    today: NaiveDate,
    mode: Mode,
    filter: TaskFilter,
    deck: AffirmationDeck,
    rng: StdRng,
    affirmation: &'static str,
    /// Shown under the task list when tasks could not be fetched.
    offline_reason: Option<String>,
    data_dir: PathBuf,
}

impl App {
    pub fn new(
        tasks: Vec<Task>,
        assignees: AssigneeData,
        settings: AppSettings,
        today: NaiveDate,
        data_dir: PathBuf,
    ) -> Self {
        Self::with_rng(tasks, assignees, settings, today, data_dir, StdRng::from_entropy())
    }

    fn with_rng(
        tasks: Vec<Task>,
        assignees: AssigneeData,
        settings: AppSettings,
        today: NaiveDate,
        data_dir: PathBuf,
        mut rng: StdRng,
    ) -> Self {
        let mut deck = AffirmationDeck::default();
        let affirmation = deck.draw(&mut rng);
        App {
            tasks,
            assignees,
            settings,
            selected_date: today,
            today,
            mode: Mode::Normal,
            filter: TaskFilter::default(),
            deck,
            rng,
            affirmation,
            offline_reason: None,
            data_dir,
        }
    }

    /// Opens the view on `date` instead of today.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn set_offline(&mut self, reason: String) {
        self.offline_reason = Some(reason);
    }

    fn visible_tasks(&self) -> Vec<&Task> {
        tasks_on(&self.tasks, self.selected_date)
            .into_iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    /// Returns true when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.mode {
            Mode::Search => {
                match code {
                    KeyCode::Enter => self.mode = Mode::Normal,
                    KeyCode::Esc => {
                        self.filter.search.clear();
                        self.mode = Mode::Normal;
                    }
                    KeyCode::Backspace => {
                        self.filter.search.pop();
                    }
                    KeyCode::Char(c) => self.filter.search.push(c),
                    _ => {}
                }
                false
            }
            Mode::Normal => {
                match code {
                    KeyCode::Char('q') => return true,
                    KeyCode::Left => self.move_days(-1),
                    KeyCode::Right => self.move_days(1),
                    KeyCode::Up => self.move_days(-7),
                    KeyCode::Down => self.move_days(7),
                    KeyCode::Char('n') | KeyCode::PageDown => {
                        self.selected_date = add_months(self.selected_date, 1)
                    }
                    KeyCode::Char('p') | KeyCode::PageUp => {
                        self.selected_date = add_months(self.selected_date, -1)
                    }
                    KeyCode::Char('t') => self.selected_date = self.today,
                    KeyCode::Char('a') => self.affirmation = self.deck.draw(&mut self.rng),
                    KeyCode::Char('/') | KeyCode::Char('s') => self.mode = Mode::Search,
                    KeyCode::Char('1') => self.cycle_priority("High"),
                    KeyCode::Char('2') => self.cycle_priority("Medium"),
                    KeyCode::Char('3') => self.cycle_priority("Low"),
                    KeyCode::Char('l') => self.cycle_label(),
                    KeyCode::Esc => self.filter = TaskFilter::default(),
                    _ => {}
                }
                false
            }
        }
    }

    fn move_days(&mut self, days: i64) {
        if let Some(date) = self.selected_date.checked_add_signed(Duration::days(days)) {
            self.selected_date = date;
        }
    }

    /// Pressing the same priority twice clears the priority filter.
    fn cycle_priority(&mut self, priority: &str) {
        if self.filter.priority == priority {
            self.filter.priority.clear();
        } else {
            self.filter.priority = priority.to_string();
        }
    }

    /// Steps through the labels on the loaded tasks in name order, then back to none.
    fn cycle_label(&mut self) {
        let next = {
            let mut labels: Vec<&str> = self
                .tasks
                .iter()
                .flat_map(|t| t.labels.iter().flatten())
                .map(String::as_str)
                .collect();
            labels.sort_unstable();
            labels.dedup();
            let next = match labels.iter().position(|l| *l == self.filter.label) {
                Some(i) => labels.get(i + 1),
                None => labels.first(),
            };
            next.map(|l| l.to_string()).unwrap_or_default()
        };
        self.filter.label = next;
    }

    fn palette(&self) -> Palette {
        Palette::for_theme(self.settings.theme)
    }

    pub fn render(&mut self, f: &mut Frame) {
        let palette = self.palette();
        f.render_widget(
            Block::default().style(Style::default().fg(palette.text).bg(palette.background)),
            f.area(),
        );
        let help_height = if self.settings.compact_view { 0 } else { 6 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),           // affirmation
                Constraint::Length(10),          // month grid
                Constraint::Min(4),              // tasks for the selected date
                Constraint::Length(help_height), // key bindings
                Constraint::Length(1),           // data dir footer
            ])
            .split(f.area());

        self.render_affirmation(f, chunks[0]);
        self.render_calendar(f, chunks[1]);
        self.render_tasks(f, chunks[2]);
        if !self.settings.compact_view {
            self.render_help(f, chunks[3]);
        }
        self.render_footer(f, chunks[4]);
    }

    fn render_affirmation(&self, f: &mut Frame, area: Rect) {
        let p = Paragraph::new(Line::from(Span::styled(
            format!("✨ {}", self.affirmation),
            Style::default().add_modifier(Modifier::ITALIC),
        )))
        .wrap(Wrap { trim: true });
        f.render_widget(p, area);
    }

    fn render_calendar(&self, f: &mut Frame, area: Rect) {
        let year = self.selected_date.year();
        let month = self.selected_date.month();
        let holidays = MonthHolidays::new(year, month);
        let palette = self.palette();

        let title = format!("{} {}", month_name(month), year);
        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                format!("{:^27}", title),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            Line::from(" Su  Mo  Tu  We  Th  Fr  Sa"),
        ];

        let cells = build_month_grid(self.selected_date);
        for row in grid_rows(&cells) {
            let mut spans = Vec::new();
            for (col, cell) in row.iter().enumerate() {
                let GridCell::Day(day) = *cell else {
                    spans.push(Span::raw("    "));
                    continue;
                };
                let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                    continue;
                };
                let style = calendar_day_style(
                    &palette,
                    date == self.selected_date,
                    holidays.name_for(day).is_some(),
                    date == self.today,
                    col == 0 || col == 6,
                    !tasks_on(&self.tasks, date).is_empty(),
                );
                spans.push(Span::raw(" "));
                spans.push(Span::styled(format!("{:>2}", day), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        let p = Paragraph::new(lines).block(Block::default().borders(Borders::NONE));
        f.render_widget(p, area);
    }

    fn render_tasks(&self, f: &mut Frame, area: Rect) {
        let date_key = self.selected_date.format("%Y-%m-%d").to_string();
        let mut lines: Vec<Line> = Vec::new();

        let mut header = vec![Span::styled(
            format!("Tasks for {}", date_key),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        let (y, m, day) = (
            self.selected_date.year(),
            self.selected_date.month(),
            self.selected_date.day(),
        );
        if let Some(name) = holiday_for(y, m, day) {
            header.push(Span::styled(
                format!("  🎉 {name}"),
                Style::default().fg(HOLIDAY_COLOR),
            ));
        }
        lines.push(Line::from(header));

        if self.mode == Mode::Search || !self.filter.is_empty() {
            let cursor = if self.mode == Mode::Search { "_" } else { "" };
            let or_any = |value: &str| (if value.is_empty() { "any" } else { value }).to_string();
            lines.push(Line::from(Span::styled(
                format!(
                    "  Search: {}{}  Priority: {}  Label: {}",
                    self.filter.search,
                    cursor,
                    or_any(&self.filter.priority),
                    or_any(&self.filter.label)
                ),
                Style::default().fg(Color::Yellow),
            )));
        }

        let tasks = self.visible_tasks();
        if tasks.is_empty() {
            lines.push(Line::from("  (no tasks)"));
        }
        for task in tasks {
            let mark = if task.completed { "[x]" } else { "[ ]" };
            let assignee = task
                .assignee
                .as_deref()
                .and_then(|id| self.assignees.name_of(id))
                .unwrap_or("");
            let mut text = format!("  {} {} ({})", mark, task.title, task.priority);
            let slot = task.time_slot();
            if !slot.is_empty() {
                text.push_str(&format!(" {slot}"));
            }
            if !assignee.is_empty() {
                text.push_str(&format!(" @{assignee}"));
            }
            let style = if task.completed {
                Style::default().add_modifier(Modifier::CROSSED_OUT | Modifier::DIM)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(text, style)));
        }

        if let Some(reason) = &self.offline_reason {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  Tasks unavailable: {reason}"),
                Style::default().fg(Color::Red),
            )));
        } else {
            let upcoming = self
                .tasks
                .iter()
                .filter(|t| !t.completed)
                .filter_map(|t| t.deadline_date().map(|d| (d, t)))
                .filter(|(d, _)| *d > self.selected_date)
                .min_by_key(|(d, _)| *d);
            if let Some((date, task)) = upcoming {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("  Next: {} ({})", task.title, due_label(date, self.today)),
                    Style::default().fg(TASK_COLOR),
                )));
            }
        }

        let p = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
        f.render_widget(p, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key_rows: Vec<Row> = vec![
            Row::new(vec!["← → ↑ ↓", "Move date", "n / p", "Next/prev month"]),
            Row::new(vec!["t", "Today", "a", "New affirmation"]),
            Row::new(vec!["/ or s", "Search tasks", "1 2 3", "High/Medium/Low"]),
            Row::new(vec!["l", "Cycle label", "Esc", "Clear filter"]),
            Row::new(vec!["q/Ctrl+C", "Quit", "", ""]),
        ];
        let help_table = Table::new(
            key_rows,
            [
                Constraint::Length(12),
                Constraint::Length(18),
                Constraint::Length(12),
                Constraint::Length(18),
            ],
        )
        .block(Block::default().borders(Borders::TOP))
        .column_spacing(1);
        f.render_widget(help_table, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Data  ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                self.data_dir.to_string_lossy().to_string(),
                Style::default().fg(self.palette().muted),
            ),
        ]));
        f.render_widget(footer, area);
    }
}

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Style for a day cell. Selection wins, then holiday, then today.
pub(crate) fn calendar_day_style(
    palette: &Palette,
    is_selected: bool,
    is_holiday: bool,
    is_today: bool,
    is_weekend: bool,
    has_task: bool,
) -> Style {
    if is_selected {
        let (fg, bg) = if is_holiday {
            (Color::Black, HOLIDAY_COLOR)
        } else {
            (palette.selected_fg, palette.selected_bg)
        };
        Style::default()
            .fg(fg)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else if is_holiday {
        let mut s = Style::default().fg(HOLIDAY_COLOR);
        if is_today {
            s = s.add_modifier(Modifier::REVERSED);
        }
        s
    } else if is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if has_task {
        Style::default().fg(TASK_COLOR).add_modifier(Modifier::UNDERLINED)
    } else if is_weekend {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::task;
    use crate::data::affirmation::AFFIRMATIONS;
    use ratatui::backend::TestBackend;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_app(tasks: Vec<Task>, today: NaiveDate) -> App {
        App::with_rng(
            tasks,
            AssigneeData::roster(),
            AppSettings::default(),
            today,
            PathBuf::from("/tmp/data"),
            StdRng::seed_from_u64(1),
        )
    }

    fn light() -> Palette {
        Palette::for_theme(Theme::Light)
    }

    fn rendered(app: &mut App) -> ratatui::buffer::Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn key(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(code, KeyModifiers::empty())
    }

    #[test]
    fn test_style_selected_holiday() {
        let s = calendar_day_style(&light(), true, true, false, false, false);
        assert_eq!(s.bg, Some(HOLIDAY_COLOR));
    }

    #[test]
    fn test_style_selected_plain() {
        let s = calendar_day_style(&light(), true, false, false, false, false);
        assert_eq!(s.bg, Some(Color::Blue));
        let s = calendar_day_style(&Palette::for_theme(Theme::Dark), true, false, false, false, false);
        assert_eq!(s.bg, Some(Color::White));
    }

    #[test]
    fn test_style_holiday_today_reversed() {
        let s = calendar_day_style(&light(), false, true, true, false, false);
        assert_eq!(s.fg, Some(HOLIDAY_COLOR));
        assert!(s.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_style_task_beats_weekend() {
        let s = calendar_day_style(&light(), false, false, false, true, true);
        assert_eq!(s.fg, Some(TASK_COLOR));
    }

    #[test]
    fn test_style_weekend_dim() {
        let s = calendar_day_style(&light(), false, false, false, true, false);
        assert!(s.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_arrow_keys_move_selected_date() {
        let mut app = make_app(vec![], d(2025, 2, 10));
        key(&mut app, KeyCode::Right);
        assert_eq!(app.selected_date, d(2025, 2, 11));
        key(&mut app, KeyCode::Left);
        assert_eq!(app.selected_date, d(2025, 2, 10));
        key(&mut app, KeyCode::Down);
        assert_eq!(app.selected_date, d(2025, 2, 17));
        key(&mut app, KeyCode::Up);
        assert_eq!(app.selected_date, d(2025, 2, 10));
    }

    #[test]
    fn test_n_p_change_month_and_t_returns_today() {
        let mut app = make_app(vec![], d(2025, 1, 31));
        key(&mut app, KeyCode::Char('n'));
        assert_eq!(app.selected_date, d(2025, 2, 28));
        key(&mut app, KeyCode::Char('p'));
        assert_eq!(app.selected_date, d(2025, 1, 28));
        key(&mut app, KeyCode::Char('t'));
        assert_eq!(app.selected_date, d(2025, 1, 31));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = make_app(vec![], d(2025, 1, 1));
        assert!(key(&mut app, KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!key(&mut app, KeyCode::Char('x')));
    }

    #[test]
    fn test_search_mode_filters_tasks_on_selected_date() {
        let tasks = vec![
            task("1", "Buy milk", "Low", "2025-03-01"),
            task("2", "Pay rent", "High", "2025-03-01"),
            task("3", "Buy bread", "Low", "2025-03-02"),
        ];
        let mut app = make_app(tasks, d(2025, 3, 1));
        assert_eq!(app.visible_tasks().len(), 2);

        key(&mut app, KeyCode::Char('/'));
        for c in "MILK".chars() {
            key(&mut app, KeyCode::Char(c));
        }
        // 'q' while searching is text, not quit.
        assert!(!key(&mut app, KeyCode::Char('q')));
        key(&mut app, KeyCode::Backspace);
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        let visible = app.visible_tasks();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");

        key(&mut app, KeyCode::Esc);
        assert!(app.filter.is_empty());
    }

    #[test]
    fn test_priority_keys_toggle_filter() {
        let tasks = vec![
            task("1", "Buy milk", "Low", "2025-03-01"),
            task("2", "Pay rent", "High", "2025-03-01"),
        ];
        let mut app = make_app(tasks, d(2025, 3, 1));
        key(&mut app, KeyCode::Char('1'));
        assert_eq!(app.visible_tasks()[0].id, "2");
        assert_eq!(app.visible_tasks().len(), 1);
        key(&mut app, KeyCode::Char('1'));
        assert_eq!(app.visible_tasks().len(), 2);
    }

    #[test]
    fn test_a_draws_a_new_affirmation() {
        let mut app = make_app(vec![], d(2025, 3, 1));
        let first = app.affirmation;
        key(&mut app, KeyCode::Char('a'));
        assert_ne!(app.affirmation, first);
        assert!(AFFIRMATIONS.contains(&app.affirmation));
    }

    #[test]
    fn test_render_shows_month_holiday_and_tasks() {
        let tasks = vec![task("1", "Carve turkey", "High", "2025-11-27T00:00:00")];
        let mut app = make_app(tasks, d(2025, 11, 27));
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("November 2025"));
        assert!(text.contains("Thanksgiving"));
        assert!(text.contains("Carve turkey"));
    }

    #[test]
    fn test_l_cycles_labels_on_loaded_tasks() {
        let mut work = task("1", "Ship build", "High", "2025-03-01");
        work.labels = Some(vec!["work".to_string(), "urgent".to_string()]);
        let mut home = task("2", "Water plants", "Low", "2025-03-01");
        home.labels = Some(vec!["home".to_string(), "work".to_string()]);
        let mut app = make_app(vec![work, home], d(2025, 3, 1));

        key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.filter.label, "home");
        assert_eq!(app.visible_tasks().len(), 1);
        assert_eq!(app.visible_tasks()[0].id, "2");

        key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.filter.label, "urgent");
        assert_eq!(app.visible_tasks()[0].id, "1");

        key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.filter.label, "work");
        assert_eq!(app.visible_tasks().len(), 2);

        key(&mut app, KeyCode::Char('l'));
        assert!(app.filter.label.is_empty());
    }

    #[test]
    fn test_l_without_labels_keeps_filter_empty() {
        let mut app = make_app(vec![task("1", "Buy milk", "Low", "2025-03-01")], d(2025, 3, 1));
        key(&mut app, KeyCode::Char('l'));
        assert!(app.filter.is_empty());
    }

    #[test]
    fn test_theme_changes_render() {
        let mut light_app = make_app(vec![], d(2025, 3, 1));
        let mut dark_app = make_app(vec![], d(2025, 3, 1));
        dark_app.settings.theme = Theme::Dark;

        let light_buf = rendered(&mut light_app);
        let dark_buf = rendered(&mut dark_app);
        assert_ne!(light_buf, dark_buf);
        assert_eq!(light_buf.content[0].bg, Color::White);
        assert_eq!(dark_buf.content[0].bg, Color::Black);
    }
}
