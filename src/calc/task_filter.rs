use crate::data::task::Task;

/// Active filters of the task list. Empty strings mean "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub search: String,
    pub priority: String,
    pub label: String,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.priority.is_empty() && self.label.is_empty()
    }

    /// Search is case-insensitive over title or description; priority and label
    /// are exact, case-sensitive matches. All active clauses must hold.
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task) && self.matches_priority(task) && self.matches_label(task)
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let q = self.search.to_lowercase();
        task.title.to_lowercase().contains(&q)
            || task
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&q))
    }

    fn matches_priority(&self, task: &Task) -> bool {
        self.priority.is_empty() || task.priority.as_str() == self.priority
    }

    fn matches_label(&self, task: &Task) -> bool {
        self.label.is_empty() || task.has_label(&self.label)
    }
}
