use std::fmt;
use std::time::Duration;

use crate::contract::Selector;

/// Queryable, mutable view of the rendered page.
///
/// Methods take `&self`: the document is shared, mutated in place, and
/// only ever touched from one event handler at a time.
pub trait Dom {
  type Element: Clone
    + PartialEq
    + fmt::Debug;

  /// All matching elements in document order.
  fn query_all(
    &self,
    selector: Selector
  ) -> Vec<Self::Element>;

  /// Matching descendants of `scope`, in document order.
  fn query_within(
    &self,
    scope: &Self::Element,
    selector: Selector
  ) -> Vec<Self::Element>;

  fn query_first(
    &self,
    selector: Selector
  ) -> Option<Self::Element> {
    self
      .query_all(selector)
      .into_iter()
      .next()
  }

  fn count(
    &self,
    selector: Selector
  ) -> usize {
    self.query_all(selector).len()
  }

  fn attribute(
    &self,
    element: &Self::Element,
    name: &str
  ) -> Option<String>;

  /// Current form value; empty for elements without one.
  fn value(
    &self,
    element: &Self::Element
  ) -> String;

  fn add_class(
    &self,
    element: &Self::Element,
    class: &str
  );

  fn remove_class(
    &self,
    element: &Self::Element,
    class: &str
  );

  fn set_text(
    &self,
    element: &Self::Element,
    text: &str
  );
}

/// Window-level services: blocking prompts, location and timers.
pub trait Host {
  type Element;

  /// Blocking yes/no question. Returns `true` when the user accepts.
  fn confirm(
    &self,
    message: &str
  ) -> bool;

  fn alert(&self, message: &str);

  fn pathname(&self) -> String;

  fn navigate(&self, url: &str);

  /// Close `alert` once `delay` has elapsed. Closing an alert that is
  /// already gone must be a no-op.
  fn dismiss_after(
    &self,
    alert: Self::Element,
    delay: Duration
  );
}
