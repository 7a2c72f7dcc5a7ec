pub mod search;
pub mod task;
pub mod temporal;
