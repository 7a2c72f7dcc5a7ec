use super::task::Task;

/// Narrow a task set to those matching the query: case-insensitive
/// substring over the title and, when present, the description. An empty
/// query returns the set unchanged.
pub fn filter_tasks(tasks: &[Task], query: &str) -> Vec<Task> {
    if query.is_empty() {
        return tasks.to_vec();
    }
    let lq = query.to_lowercase();
    tasks
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&lq)
                || t.description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&lq))
        })
        .cloned()
        .collect()
}
