mod task;

pub use task::{EMPTY_TASK_CONTENT, Task};
