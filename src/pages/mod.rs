pub mod task_list;

pub use task_list::{Notice, TaskListError, TaskListModel};
