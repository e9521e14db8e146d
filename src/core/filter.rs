use std::collections::HashMap;

use super::due_date;
use super::task::{Tag, Task};

/// Filters selected in the task list. Each field narrows the result independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilterSpec {
    pub project_id: Option<i64>,
    pub tag_id: Option<i64>,
    /// Date string; only its calendar date is compared.
    pub due_date: Option<String>,
}

impl TaskFilterSpec {
    fn active_project(&self) -> Option<i64> {
        self.project_id.filter(|id| *id != 0)
    }

    fn active_tag(&self) -> Option<i64> {
        self.tag_id.filter(|id| *id != 0)
    }

    fn active_due_date(&self) -> Option<&str> {
        self.due_date.as_deref().filter(|d| !d.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active_project().is_none()
            && self.active_tag().is_none()
            && self.active_due_date().is_none()
    }

    /// Whether a single task passes every active filter.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(project_id) = self.active_project() {
            if task.project_id != project_id {
                return false;
            }
        }
        if let Some(tag_id) = self.active_tag() {
            if !task.has_tag(tag_id) {
                return false;
            }
        }
        if let Some(wanted) = self.active_due_date() {
            // An unparseable filter date matches nothing, like an undated task.
            match (due_date::parse(wanted), task.due_on()) {
                (Some(wanted), Some(due)) if wanted == due => {}
                _ => return false,
            }
        }
        true
    }

    pub fn summary(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut parts = Vec::new();
        if let Some(project_id) = self.active_project() {
            parts.push(format!("project:{project_id}"));
        }
        if let Some(tag_id) = self.active_tag() {
            parts.push(format!("tag:{tag_id}"));
        }
        if let Some(due) = self.active_due_date() {
            parts.push(format!("due:{}", due_date::date_part(due)));
        }
        Some(parts.join(" | "))
    }
}

/// Tasks matching every active filter, in their original order.
pub fn filter_tasks(tasks: &[Task], spec: &TaskFilterSpec) -> Vec<Task> {
    tasks.iter().filter(|t| spec.matches(t)).cloned().collect()
}

/// Tasks ordered by due date ascending, undated last. Ties keep their input order.
pub fn sort_tasks_by_due_date(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    // `sort_by_key` is stable.
    sorted.sort_by_key(|t| {
        let due = t.due_on();
        (due.is_none(), due)
    });
    sorted
}

/// Every distinct tag attached to the given tasks. A tag keeps the position of its
/// first occurrence and the value of its last.
pub fn collect_tags(tasks: &[Task]) -> Vec<Tag> {
    let mut tags: Vec<Tag> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();
    for tag in tasks.iter().flat_map(Task::tags) {
        match index.get(&tag.id) {
            Some(&pos) => tags[pos] = tag.clone(),
            None => {
                index.insert(tag.id, tags.len());
                tags.push(tag.clone());
            }
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, project_id: i64) -> Task {
        Task::new(id, format!("Task {id}"), project_id)
    }

    fn due(id: i64, date: Option<&str>) -> Task {
        let mut t = task(id, 1);
        t.due_date = date.map(str::to_string);
        t
    }

    fn tagged(id: i64, project_id: i64, tag_ids: &[i64]) -> Task {
        let mut t = task(id, project_id);
        t.tags = Some(
            tag_ids
                .iter()
                .map(|&tid| Tag { id: tid, name: format!("tag{tid}") })
                .collect(),
        );
        t
    }

    fn ids(tasks: &[Task]) -> Vec<i64> {
        tasks.iter().map(|t| t.id).collect()
    }

    fn sample() -> Vec<Task> {
        let mut a = tagged(1, 1, &[1, 2]);
        a.due_date = Some("2024-01-15 09:00:00".into());
        let mut b = tagged(2, 2, &[1]);
        b.due_date = Some("2024-01-15T23:00:00Z".into());
        let c = task(3, 1);
        let mut d = tagged(4, 1, &[]);
        d.due_date = Some("2024-01-16".into());
        let mut e = tagged(5, 2, &[2]);
        e.due_date = Some("2024-01-15".into());
        vec![a, b, c, d, e]
    }

    #[test]
    fn filters_by_project() {
        let tasks = vec![task(1, 1), task(2, 1), task(3, 2)];
        let spec = TaskFilterSpec {
            project_id: Some(1),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&tasks, &spec)), vec![1, 2]);
    }

    #[test]
    fn tag_filter_excludes_untagged() {
        let tasks = vec![task(1, 1), tagged(2, 1, &[1]), tagged(3, 1, &[])];
        let spec = TaskFilterSpec {
            tag_id: Some(1),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&tasks, &spec)), vec![2]);
    }

    #[test]
    fn due_filter_compares_calendar_dates() {
        let spec = TaskFilterSpec {
            due_date: Some("2024-01-15".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&sample(), &spec)), vec![1, 2, 5]);

        let spec = TaskFilterSpec {
            due_date: Some("2024-01-15T08:00:00".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&sample(), &spec)), vec![1, 2, 5]);
    }

    #[test]
    fn unparseable_due_filter_matches_nothing() {
        let spec = TaskFilterSpec {
            due_date: Some("someday".into()),
            ..Default::default()
        };
        assert!(filter_tasks(&sample(), &spec).is_empty());
    }

    #[test]
    fn empty_spec_returns_input() {
        let tasks = sample();
        assert_eq!(filter_tasks(&tasks, &TaskFilterSpec::default()), tasks);

        let zeroed = TaskFilterSpec {
            project_id: Some(0),
            tag_id: Some(0),
            due_date: Some(String::new()),
        };
        assert!(zeroed.is_empty());
        assert_eq!(filter_tasks(&tasks, &zeroed), tasks);
    }

    #[test]
    fn filters_commute() {
        let tasks = sample();
        let both = TaskFilterSpec {
            project_id: Some(2),
            tag_id: Some(1),
            due_date: Some("2024-01-15".into()),
        };
        let by_project = TaskFilterSpec {
            project_id: Some(2),
            ..Default::default()
        };
        let by_tag = TaskFilterSpec {
            tag_id: Some(1),
            ..Default::default()
        };
        let by_due = TaskFilterSpec {
            due_date: Some("2024-01-15".into()),
            ..Default::default()
        };

        let combined = filter_tasks(&tasks, &both);
        let chained = filter_tasks(&filter_tasks(&filter_tasks(&tasks, &by_project), &by_tag), &by_due);
        let reversed = filter_tasks(&filter_tasks(&filter_tasks(&tasks, &by_due), &by_tag), &by_project);
        assert_eq!(ids(&combined), vec![2]);
        assert_eq!(combined, chained);
        assert_eq!(combined, reversed);
    }

    #[test]
    fn filter_does_not_mutate_input() {
        let tasks = sample();
        let before = tasks.clone();
        let _ = filter_tasks(
            &tasks,
            &TaskFilterSpec {
                project_id: Some(1),
                ..Default::default()
            },
        );
        assert_eq!(tasks, before);
    }

    #[test]
    fn empty_collections_degrade_to_empty() {
        let spec = TaskFilterSpec {
            project_id: Some(1),
            tag_id: Some(2),
            due_date: Some("2024-01-01".into()),
        };
        assert!(filter_tasks(&[], &spec).is_empty());
        assert!(sort_tasks_by_due_date(&[]).is_empty());
        assert!(collect_tags(&[]).is_empty());
    }

    #[test]
    fn sorts_by_due_date_undated_last() {
        let tasks = vec![
            due(1, Some("2024-01-15")),
            due(2, Some("2024-01-20")),
            due(3, Some("2024-01-10")),
            due(4, None),
        ];
        let before = tasks.clone();
        assert_eq!(ids(&sort_tasks_by_due_date(&tasks)), vec![3, 1, 2, 4]);
        assert_eq!(tasks, before);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let tasks = vec![
            due(1, None),
            due(2, Some("2024-01-15 18:00:00")),
            due(3, None),
            due(4, Some("2024-01-15 08:00:00")),
            due(5, Some("2024-01-14")),
            due(6, Some("not a date")),
        ];
        // Same calendar date keeps input order regardless of time of day.
        assert_eq!(ids(&sort_tasks_by_due_date(&tasks)), vec![5, 2, 4, 1, 3, 6]);
    }

    #[test]
    fn sort_all_undated_keeps_order() {
        let tasks = vec![due(3, None), due(1, None), due(2, None)];
        assert_eq!(ids(&sort_tasks_by_due_date(&tasks)), vec![3, 1, 2]);
    }

    #[test]
    fn summary_lists_active_filters() {
        let spec = TaskFilterSpec {
            project_id: Some(0),
            tag_id: Some(3),
            due_date: Some("2024-02-01 00:00:00".into()),
        };
        assert_eq!(spec.summary().as_deref(), Some("tag:3 | due:2024-02-01"));
        assert_eq!(TaskFilterSpec::default().summary(), None);
    }

    #[test]
    fn tags_are_deduplicated_by_id() {
        let mut a = tagged(1, 1, &[2, 1]);
        let b = tagged(2, 1, &[1, 3]);
        a.tags.as_mut().unwrap()[1].name = "old".into();
        let tags = collect_tags(&[a, task(3, 1), b]);
        assert_eq!(tags.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 1, 3]);
        assert_eq!(tags[1].name, "tag1");
    }
}
