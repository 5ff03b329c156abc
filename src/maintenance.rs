//! Maintenance schedules

use std::slice;

use jiff::civil::Date;
use smallvec::SmallVec;
use thiserror::Error;

use crate::errors::ErrorKind;

/// Errors raised by maintenance schedule operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaintenanceError {
    /// No task has the given description.
    #[error("no maintenance task described as '{0}'")]
    NotFound(String),
}

impl MaintenanceError {
    /// Error category for callers that only need the broad kind.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NotFound
    }
}

/// A scheduled service item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceTask {
    description: String,
    due_date: Date,
    completed: bool,
}

impl MaintenanceTask {
    /// Creates a pending task.
    pub fn new(description: impl Into<String>, due_date: Date) -> Self {
        Self {
            description: description.into(),
            due_date,
            completed: false,
        }
    }

    /// Free-text description, also used as the removal key.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Date the task is due.
    pub fn due_date(&self) -> Date {
        self.due_date
    }

    /// Whether the task has been completed.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Human readable status.
    pub fn status(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }
}

/// Ordered maintenance tasks for one vehicle.
///
/// Descriptions are not required to be unique; removal takes the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceSchedule {
    tasks: SmallVec<[MaintenanceTask; 4]>,
}

impl MaintenanceSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pending task.
    pub fn add(&mut self, description: impl Into<String>, due_date: Date) {
        self.tasks.push(MaintenanceTask::new(description, due_date));
    }

    /// Removes the first task whose description matches exactly.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceError::NotFound`] when no task matches; the schedule is unchanged.
    pub fn remove(&mut self, description: &str) -> Result<MaintenanceTask, MaintenanceError> {
        let idx = self
            .tasks
            .iter()
            .position(|task| task.description == description)
            .ok_or_else(|| MaintenanceError::NotFound(description.to_string()))?;

        Ok(self.tasks.remove(idx))
    }

    /// Tasks in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, MaintenanceTask> {
        self.tasks.iter()
    }

    /// Pending tasks due on or before `date`.
    pub fn due_by(&self, date: Date) -> impl Iterator<Item = &MaintenanceTask> + '_ {
        self.tasks
            .iter()
            .filter(move |task| !task.completed && task.due_date <= date)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the schedule has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<'a> IntoIterator for &'a MaintenanceSchedule {
    type Item = &'a MaintenanceTask;
    type IntoIter = slice::Iter<'a, MaintenanceTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn add_appends_pending_task() {
        let mut schedule = MaintenanceSchedule::new();

        schedule.add("Oil change", date(2024, 2, 1));

        let task = schedule.iter().next();

        assert_eq!(schedule.len(), 1);
        assert_eq!(task.map(MaintenanceTask::description), Some("Oil change"));
        assert_eq!(task.map(MaintenanceTask::is_completed), Some(false));
        assert_eq!(task.map(MaintenanceTask::status), Some("Pending"));
    }

    #[test]
    fn remove_then_remove_again_is_not_found() -> TestResult {
        let mut schedule = MaintenanceSchedule::new();
        schedule.add("Oil change", date(2024, 2, 1));

        let removed = schedule.remove("Oil change")?;

        assert_eq!(removed.due_date(), date(2024, 2, 1));
        assert!(schedule.is_empty());
        assert_eq!(
            schedule.remove("Oil change"),
            Err(MaintenanceError::NotFound("Oil change".to_string()))
        );

        Ok(())
    }

    #[test]
    fn remove_takes_first_duplicate_only() -> TestResult {
        let mut schedule = MaintenanceSchedule::new();
        schedule.add("Tyres", date(2024, 3, 1));
        schedule.add("Tyres", date(2024, 9, 1));

        let removed = schedule.remove("Tyres")?;

        assert_eq!(removed.due_date(), date(2024, 3, 1));
        assert_eq!(schedule.len(), 1);
        assert_eq!(
            schedule.iter().next().map(MaintenanceTask::due_date),
            Some(date(2024, 9, 1))
        );

        Ok(())
    }

    #[test]
    fn remove_requires_exact_match() {
        let mut schedule = MaintenanceSchedule::new();
        schedule.add("Oil change", date(2024, 2, 1));

        assert!(schedule.remove("oil change").is_err());
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn iteration_is_restartable_and_ordered() {
        let mut schedule = MaintenanceSchedule::new();
        schedule.add("Oil change", date(2024, 2, 1));
        schedule.add("Brake pads", date(2024, 1, 15));

        let first: Vec<_> = schedule.iter().map(MaintenanceTask::description).collect();
        let second: Vec<_> = (&schedule).into_iter().map(MaintenanceTask::description).collect();

        assert_eq!(first, ["Oil change", "Brake pads"]);
        assert_eq!(first, second);
    }

    #[test]
    fn due_by_filters_future_tasks() {
        let mut schedule = MaintenanceSchedule::new();
        schedule.add("Oil change", date(2024, 2, 1));
        schedule.add("Inspection", date(2024, 6, 1));

        let due: Vec<_> = schedule
            .due_by(date(2024, 2, 1))
            .map(MaintenanceTask::description)
            .collect();

        assert_eq!(due, ["Oil change"]);
    }
}
