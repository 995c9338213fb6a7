//! In-memory backend for command tests.

use crate::api::auth::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::api::TaskBackend;
use crate::data::{Label, NewLabel, NewTask, Task, TaskUpdate};
use crate::error::{ApiError, ApiResult};
use std::cell::RefCell;

pub const FAKE_TOKEN: &str = "fake-token";

#[derive(Default)]
pub struct FakeBackend {
    pub tasks: RefCell<Vec<Task>>,
    pub labels: RefCell<Vec<Label>>,
    /// When set, every call fails with this HTTP status and detail.
    pub fail_with: Option<(u16, String)>,
    next_id: RefCell<u32>,
}

impl FakeBackend {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        FakeBackend {
            tasks: RefCell::new(tasks),
            ..Default::default()
        }
    }

    pub fn failing(status: u16, detail: &str) -> Self {
        FakeBackend {
            fail_with: Some((status, detail.to_string())),
            ..Default::default()
        }
    }

    fn check(&self, token: &str) -> ApiResult<()> {
        if let Some((status, detail)) = &self.fail_with {
            return Err(ApiError::Http {
                status: *status,
                detail: detail.clone(),
            });
        }
        if token != FAKE_TOKEN {
            return Err(ApiError::Http {
                status: 401,
                detail: "Invalid token".to_string(),
            });
        }
        Ok(())
    }

    fn next_id(&self) -> String {
        let mut next = self.next_id.borrow_mut();
        *next += 1;
        format!("t{next}")
    }

    fn with_task<F: FnOnce(&mut Task)>(&self, task_id: &str, f: F) -> ApiResult<()> {
        let mut tasks = self.tasks.borrow_mut();
        match tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                f(task);
                Ok(())
            }
            None => Err(ApiError::Http {
                status: 404,
                detail: "Task not found".to_string(),
            }),
        }
    }
}

impl TaskBackend for FakeBackend {
    fn signup(&self, _request: &SignupRequest) -> ApiResult<SignupResponse> {
        self.check(FAKE_TOKEN)?;
        Ok(SignupResponse {
            user_id: "u1".to_string(),
        })
    }

    fn login(&self, _request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.check(FAKE_TOKEN)?;
        Ok(LoginResponse {
            access_token: FAKE_TOKEN.to_string(),
            user_id: Some("u1".to_string()),
        })
    }

    fn list_tasks(&self, token: &str) -> ApiResult<Vec<Task>> {
        self.check(token)?;
        Ok(self.tasks.borrow().clone())
    }

    fn create_task(&self, token: &str, task: &NewTask) -> ApiResult<Option<String>> {
        self.check(token)?;
        let id = self.next_id();
        self.tasks.borrow_mut().push(Task {
            id: id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            deadline: task.deadline.clone(),
            start_time: task.start_time.clone(),
            end_time: task.end_time.clone(),
            labels: Some(task.labels.clone()),
            completed: task.completed,
            assignee: Some(task.assignee.clone()),
        });
        Ok(Some(id))
    }

    fn update_task(&self, token: &str, task_id: &str, update: &TaskUpdate) -> ApiResult<()> {
        self.check(token)?;
        let update = update.clone();
        self.with_task(task_id, move |task| {
            if let Some(title) = update.title {
                task.title = title;
            }
            if let Some(priority) = update.priority {
                task.priority = priority;
            }
            if let Some(deadline) = update.deadline {
                task.deadline = deadline;
            }
            if let Some(completed) = update.completed {
                task.completed = completed;
            }
            if update.assignee.is_some() {
                task.assignee = update.assignee;
            }
            if update.labels.is_some() {
                task.labels = update.labels;
            }
        })
    }

    fn delete_task(&self, token: &str, task_id: &str) -> ApiResult<()> {
        self.check(token)?;
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|t| t.id != task_id);
        if tasks.len() == before {
            return Err(ApiError::Http {
                status: 404,
                detail: "Task not found".to_string(),
            });
        }
        Ok(())
    }

    fn list_labels(&self, token: &str) -> ApiResult<Vec<Label>> {
        self.check(token)?;
        Ok(self.labels.borrow().clone())
    }

    fn create_label(&self, token: &str, label: &NewLabel) -> ApiResult<()> {
        self.check(token)?;
        let id = format!("l{}", self.labels.borrow().len() + 1);
        self.labels.borrow_mut().push(Label {
            id,
            name: label.name.clone(),
        });
        Ok(())
    }

    fn assign_labels(&self, token: &str, task_id: &str, labels: &[String]) -> ApiResult<()> {
        self.check(token)?;
        let labels = labels.to_vec();
        self.with_task(task_id, move |task| task.labels = Some(labels))
    }
}

/// A stored task with the given id, title, priority and deadline.
pub fn task(id: &str, title: &str, priority: &str, deadline: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        priority: priority.parse().unwrap(),
        deadline: deadline.to_string(),
        start_time: None,
        end_time: None,
        labels: None,
        completed: false,
        assignee: None,
    }
}
