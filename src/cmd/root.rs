use crate::api::TaskBackend;
use crate::cmd::calendar::fetch_tasks;
use crate::data::{AppSettings, AssigneeData, LocalStore};
use crate::ui::calendar_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::{Local, NaiveDate};

/// Opens the interactive month calendar, on `start` when given.
pub fn run<B: TaskBackend>(store: &LocalStore, backend: &B, start: Option<NaiveDate>) -> Result<()> {
    let (tasks, offline) = fetch_tasks(store, backend);
    let assignees = store.load::<AssigneeData>().or_roster();
    let settings = store.load::<AppSettings>();

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let mut app = App::new(tasks, assignees, settings, today, store.dir().to_path_buf());
    if let Some(date) = start {
        app.select(date);
    }
    if let Some(reason) = offline {
        app.set_offline(reason);
    }

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    result
}
