pub mod alerts;
pub mod counters;
pub mod filters;
pub mod guards;
pub mod validation;

/// What the host should do with the event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Proceed,
  PreventDefault
}

impl Outcome {
  pub fn from_allowed(
    allowed: bool
  ) -> Self {
    if allowed {
      Outcome::Proceed
    } else {
      Outcome::PreventDefault
    }
  }

  pub fn is_prevented(self) -> bool {
    self == Outcome::PreventDefault
  }

  /// Combines the results of several listeners on one event.
  pub fn merge(self, other: Self) -> Self {
    if self.is_prevented()
      || other.is_prevented()
    {
      Outcome::PreventDefault
    } else {
      Outcome::Proceed
    }
  }
}
