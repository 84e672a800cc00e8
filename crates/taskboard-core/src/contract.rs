//! Element hooks shared with the server-rendered markup.
//!
//! Every class, id and attribute the behaviors look for is named here, so
//! a change to the templates has exactly one place to land.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
  Class(&'static str),
  Id(&'static str),
  Tag(&'static str),
  Attribute(&'static str)
}

impl Selector {
  pub fn to_css(self) -> String {
    match self {
      | Selector::Class(name) => {
        format!(".{name}")
      }
      | Selector::Id(name) => {
        format!("#{name}")
      }
      | Selector::Tag(name) => {
        name.to_string()
      }
      | Selector::Attribute(name) => {
        format!("[{name}]")
      }
    }
  }
}

impl fmt::Display for Selector {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.to_css())
  }
}

pub const ALERT: Selector =
  Selector::Class("alert");

pub const DELETE_BUTTON: Selector =
  Selector::Class("btn-delete-task");
pub const TOGGLE_BUTTON: Selector =
  Selector::Class("btn-toggle-task");

pub const ATTR_TASK_TITLE: &str =
  "data-task-title";
pub const ATTR_COMPLETED: &str =
  "data-completed";

pub const STATUS_FILTER: Selector =
  Selector::Id("status-filter");
pub const RESPONSIBLE_FILTER: Selector =
  Selector::Id("responsible-filter");
pub const CLEAR_FILTERS: Selector =
  Selector::Id("clear-filters");

/// Status value meaning "no filter"; never written to the query.
pub const STATUS_ALL: &str = "all";
pub const QUERY_STATUS: &str = "status";
pub const QUERY_RESPONSIBLE: &str =
  "responsible";

pub const FORM: Selector =
  Selector::Tag("form");
pub const REQUIRED_FIELD: Selector =
  Selector::Attribute("required");

pub const TASK_CARD: Selector =
  Selector::Class("task-card");
pub const TASK_COMPLETED: Selector =
  Selector::Class("task-completed");
pub const TASK_OVERDUE: Selector =
  Selector::Class("task-overdue");
/// Rendered on cards that are neither completed nor overdue. Not
/// counted: pending is always derived from total and completed.
pub const TASK_PENDING: Selector =
  Selector::Class("task-pending");

pub const TOTAL_COUNTER: Selector =
  Selector::Id("total-tasks");
pub const COMPLETED_COUNTER: Selector =
  Selector::Id("completed-tasks");
pub const PENDING_COUNTER: Selector =
  Selector::Id("pending-tasks");
pub const OVERDUE_COUNTER: Selector =
  Selector::Id("overdue-tasks");

pub const CONFIG_ISLAND: Selector =
  Selector::Id("taskboard-config");
pub const CONFIG_META_PREFIX: &str =
  "taskboard.";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn selectors_render_as_css() {
    assert_eq!(ALERT.to_css(), ".alert");
    assert_eq!(
      STATUS_FILTER.to_css(),
      "#status-filter"
    );
    assert_eq!(FORM.to_css(), "form");
    assert_eq!(
      REQUIRED_FIELD.to_string(),
      "[required]"
    );
  }
}
