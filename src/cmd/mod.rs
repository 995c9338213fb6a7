pub mod affirmation;
pub mod assignees;
pub mod auth;
pub mod calendar;
pub mod checklists;
pub mod goals;
pub mod holidays;
pub mod init;
pub mod labels;
pub mod notes;
pub mod profile;
pub mod root;
pub mod settings;
pub mod tasks;
