use serde::Serialize;

use crate::model::task::Task;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

#[derive(Serialize)]
pub struct ListJson {
    pub filter: String,
    pub total: usize,
    pub completed: usize,
    pub counter: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub id: i64,
}

#[derive(Serialize)]
pub struct ClearedJson {
    pub removed: usize,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        text: task.text.clone(),
        done: task.done,
    }
}

/// One task as a plain-text row: checkbox, id, text.
pub fn task_row(task: &Task) -> String {
    let mark = if task.done { 'x' } else { ' ' };
    format!("[{}] {}  {}", mark, task.id, task.text)
}
