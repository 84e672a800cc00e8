use tracing::debug;

use crate::contract::{
  self,
  Selector
};
use crate::dom::Dom;

/// Counters derived from the rendered task cards.
///
/// `pending` is the plain difference `total - completed`, so it goes
/// negative when completed markers outnumber cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
  pub total:     usize,
  pub completed: usize,
  pub pending:   i64,
  pub overdue:   usize
}

fn signed(count: usize) -> i64 {
  i64::try_from(count).unwrap_or(i64::MAX)
}

impl TaskCounts {
  pub fn collect<D: Dom>(
    dom: &D
  ) -> Self {
    let total =
      dom.count(contract::TASK_CARD);
    let completed =
      dom.count(contract::TASK_COMPLETED);
    let overdue =
      dom.count(contract::TASK_OVERDUE);

    Self {
      total,
      completed,
      pending: signed(total)
        - signed(completed),
      overdue
    }
  }

  fn targets(
    &self
  ) -> [(Selector, i64); 4] {
    [
      (
        contract::TOTAL_COUNTER,
        signed(self.total)
      ),
      (
        contract::COMPLETED_COUNTER,
        signed(self.completed)
      ),
      (
        contract::PENDING_COUNTER,
        self.pending
      ),
      (
        contract::OVERDUE_COUNTER,
        signed(self.overdue)
      )
    ]
  }
}

/// Recounts the cards and writes each count into its counter element,
/// skipping counters the page does not render.
#[tracing::instrument(skip_all)]
pub fn refresh<D: Dom>(dom: &D) -> TaskCounts {
  let counts = TaskCounts::collect(dom);

  for (selector, value) in counts.targets()
  {
    if let Some(counter) =
      dom.query_first(selector)
    {
      dom.set_text(
        &counter,
        &value.to_string()
      );
    }
  }

  debug!(
    total = counts.total,
    completed = counts.completed,
    pending = counts.pending,
    overdue = counts.overdue,
    "task counters refreshed"
  );
  counts
}
