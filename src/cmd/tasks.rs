use crate::api::TaskBackend;
use crate::calc::TaskFilter;
use crate::data::task::due_label;
use crate::data::{AppSettings, AssigneeData, LocalStore, Session, Task, TaskInput, TaskUpdate};
use crate::ui::celebration::{write_celebration, Celebration};
use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use std::io::Write;
use tracing::info;

fn roster(store: &LocalStore) -> AssigneeData {
    store.load::<AssigneeData>().or_roster()
}

pub fn list<B: TaskBackend, W: Write>(
    store: &LocalStore,
    backend: &B,
    filter: &TaskFilter,
    today: NaiveDate,
    out: &mut W,
) -> Result<()> {
    let session = Session::require(store)?;
    let tasks = backend
        .list_tasks(&session.token)
        .context("Failed to fetch tasks")?;
    let shown = filter.apply(&tasks);
    write_tasks(&shown, tasks.len(), &roster(store), today, out)
}

pub(crate) fn write_tasks<W: Write>(
    tasks: &[&Task],
    total: usize,
    assignees: &AssigneeData,
    today: NaiveDate,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Tasks")?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "  {:<4} {:<26} {:<28} {:<8} {:<14} {:<12} {:<10} {}",
        "Done", "ID", "Title", "Priority", "Due", "Time", "Assignee", "Labels"
    )?;
    for t in tasks {
        let due = t
            .deadline_date()
            .map(|d| due_label(d, today))
            .unwrap_or_else(|| t.deadline.clone());
        let assignee = t
            .assignee
            .as_deref()
            .map(|id| assignees.name_of(id).unwrap_or(id))
            .unwrap_or("");
        let labels = t.labels.as_deref().unwrap_or_default().join(", ");
        writeln!(
            out,
            "  {:<4} {:<26} {:<28} {:<8} {:<14} {:<12} {:<10} {}",
            if t.completed { "[x]" } else { "[ ]" },
            t.id,
            t.title,
            t.priority,
            due,
            t.time_slot(),
            assignee,
            labels
        )?;
    }
    writeln!(out, "---")?;
    if tasks.len() == total {
        writeln!(out, "Total: {} task(s)", total)?;
    } else {
        writeln!(out, "Total: {} of {} task(s)", tasks.len(), total)?;
    }
    Ok(())
}

pub fn add<B: TaskBackend, W: Write>(
    store: &LocalStore,
    backend: &B,
    input: TaskInput,
    out: &mut W,
) -> Result<()> {
    let assignees = roster(store);
    let task = input.validate(assignees.default_id())?;
    let session = Session::require(store)?;
    let id = backend
        .create_task(&session.token, &task)
        .context("Failed to create task")?;
    match id {
        Some(id) => writeln!(out, "Created task '{}' ({}).", task.title, id)?,
        None => writeln!(out, "Created task '{}'.", task.title)?,
    }
    Ok(())
}

fn find_task<B: TaskBackend>(backend: &B, token: &str, task_id: &str) -> Result<Task> {
    backend
        .list_tasks(token)
        .context("Failed to fetch tasks")?
        .into_iter()
        .find(|t| t.id == task_id)
        .ok_or_else(|| anyhow!("no task with id '{}'", task_id))
}

/// Flips completion. Marking a task complete celebrates; un-marking does not.
pub fn toggle<B: TaskBackend, W: Write>(
    store: &LocalStore,
    backend: &B,
    task_id: &str,
    out: &mut W,
) -> Result<()> {
    let session = Session::require(store)?;
    let task = find_task(backend, &session.token, task_id)?;
    let completed = !task.completed;
    backend
        .update_task(&session.token, task_id, &TaskUpdate::completed(completed))
        .context("Failed to update task")?;
    info!(task_id, completed, "task toggled");
    if completed {
        writeln!(out, "Marked '{}' complete.", task.title)?;
        let settings = store.load::<AppSettings>();
        write_celebration(Celebration::Stars, &task.title, settings.sound_enabled, out)?;
    } else {
        writeln!(out, "Marked '{}' not complete.", task.title)?;
    }
    Ok(())
}

pub fn delete<B: TaskBackend, W: Write>(
    store: &LocalStore,
    backend: &B,
    task_id: &str,
    out: &mut W,
) -> Result<()> {
    let session = Session::require(store)?;
    backend
        .delete_task(&session.token, task_id)
        .context("Failed to delete task")?;
    writeln!(out, "Deleted task {}.", task_id)?;
    Ok(())
}

/// `who` is an assignee id or a case-insensitive name.
pub fn assign<B: TaskBackend, W: Write>(
    store: &LocalStore,
    backend: &B,
    task_id: &str,
    who: &str,
    out: &mut W,
) -> Result<()> {
    let assignees = roster(store);
    let Some(assignee) = assignees
        .assignees
        .iter()
        .find(|a| a.id == who || a.name.eq_ignore_ascii_case(who))
    else {
        bail!("unknown assignee '{}'", who);
    };
    let session = Session::require(store)?;
    backend
        .update_task(&session.token, task_id, &TaskUpdate::assignee(&assignee.id))
        .context("Failed to update task")?;
    writeln!(out, "Assigned task {} to {}.", task_id, assignee.name)?;
    Ok(())
}

/// Replaces the task's labels. An empty list clears them.
pub fn label<B: TaskBackend, W: Write>(
    store: &LocalStore,
    backend: &B,
    task_id: &str,
    labels: &[String],
    out: &mut W,
) -> Result<()> {
    let labels: Vec<String> = labels
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    let session = Session::require(store)?;
    backend
        .assign_labels(&session.token, task_id, &labels)
        .context("Failed to assign labels")?;
    if labels.is_empty() {
        writeln!(out, "Cleared labels on task {}.", task_id)?;
    } else {
        writeln!(out, "Labels on task {}: {}", task_id, labels.join(", "))?;
    }
    Ok(())
}
