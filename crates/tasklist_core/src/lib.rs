pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod reveal;
pub mod storage;
pub mod store;

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::model::Task;

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: 0,
            content: "demo".to_string(),
            edit_mode: false,
            done: false,
        };

        assert_eq!(task.id, 0);
        assert_eq!(task.content, "demo");
        assert!(!task.edit_mode);
        assert!(!task.done);
    }

    #[test]
    fn store_error_exposes_code() {
        let err = StoreError::invalid_data("bad payload");
        assert_eq!(err.code(), "invalid_data");
        assert_eq!(err.message(), "bad payload");
    }
}
