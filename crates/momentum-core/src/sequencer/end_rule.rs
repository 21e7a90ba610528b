//! End-rule pass: a session should not close on a high-complexity task.

use crate::profile::RatingTable;
use crate::task::{renumber, Level, ScoredTask};

/// A task the session may end on: low complexity, or medium in a Neutral category.
fn is_easy_finish(task: &ScoredTask, ratings: &RatingTable) -> bool {
    match task.complexity() {
        Level::Low => true,
        Level::Medium => ratings.is_neutral(task.category()),
        Level::High => false,
    }
}

/// Swap a high-complexity last task with the earliest easy finish.
///
/// The scan starts at position 1, so a momentum-buffer opener can be the
/// task moved to the end. Only positions change. Returns whether a swap
/// happened.
pub fn enforce_end_rule(tasks: &mut [ScoredTask], ratings: &RatingTable) -> bool {
    let Some(last) = tasks.last() else {
        return false;
    };
    if last.complexity() != Level::High {
        return false;
    }

    let Some(idx) = tasks.iter().position(|t| is_easy_finish(t, ratings)) else {
        return false;
    };

    let last_idx = tasks.len() - 1;
    tracing::debug!(
        moved = %tasks[idx].id(),
        from = idx + 1,
        displaced = %tasks[last_idx].id(),
        "end rule swapped final task"
    );
    tasks.swap(idx, last_idx);
    renumber(tasks);
    true
}
