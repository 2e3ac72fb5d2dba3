use serde::{Deserialize, Serialize};

/// A single to-do entry.
///
/// The persisted JSON field names (`texto`, `concluida`) are part of the
/// on-disk format and must not change: existing task files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Creation timestamp in milliseconds; doubles as the task's identity
    pub id: i64,
    /// Task text (non-empty, trimmed)
    #[serde(rename = "texto")]
    pub text: String,
    /// Completion flag
    #[serde(rename = "concluida")]
    pub done: bool,
}

impl Task {
    /// Create a new pending task
    pub fn new(id: i64, text: String) -> Self {
        Task {
            id,
            text,
            done: false,
        }
    }
}

/// Display-only predicate selecting which tasks are shown.
///
/// Never persisted: every startup begins at `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.done,
            Filter::Completed => task.done,
        }
    }

    /// Parse a CLI filter name
    pub fn from_name(name: &str) -> Option<Filter> {
        match name {
            "all" | "todas" => Some(Filter::All),
            "pending" | "pendentes" => Some(Filter::Pending),
            "completed" | "concluidas" => Some(Filter::Completed),
            _ => None,
        }
    }

    /// Stable CLI name (also used in `--json` output)
    pub fn name(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }

    /// Display label for the TUI tab bar
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "Todas",
            Filter::Pending => "Pendentes",
            Filter::Completed => "Concluídas",
        }
    }

    /// The next filter in tab-cycling order
    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }
}
