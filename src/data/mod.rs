pub mod affirmation;
pub mod app_settings;
pub mod assignee;
pub mod checklist;
pub mod config;
pub mod goal;
pub mod ids;
pub mod label;
pub mod note;
pub mod persistence;
pub mod profile;
pub mod session;
pub mod task;

pub use app_settings::{AppSettings, SettingsEdit};
pub use assignee::{Assignee, AssigneeData};
pub use checklist::{Checklist, ChecklistData};
pub use config::ClientConfig;
pub use goal::{GoalData, GoalInput};
pub use label::{Label, NewLabel};
pub use note::{NoteData, NoteInput};
pub use persistence::{LocalStore, Persistable};
pub use profile::{ProfileEdit, UserProfile};
pub use session::Session;
pub use task::{NewTask, Priority, Task, TaskInput, TaskUpdate};
