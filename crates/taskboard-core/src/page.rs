use std::fmt;

use tracing::{
  debug,
  info
};

use crate::behaviors::counters::{
  self,
  TaskCounts
};
use crate::behaviors::{
  Outcome,
  alerts,
  filters,
  guards,
  validation
};
use crate::config::Config;
use crate::contract;
use crate::dom::{
  Dom,
  Host
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
  Click,
  Change,
  Submit
}

impl EventKind {
  /// DOM event type name.
  pub fn as_str(self) -> &'static str {
    match self {
      | EventKind::Click => "click",
      | EventKind::Change => "change",
      | EventKind::Submit => "submit"
    }
  }
}

impl fmt::Display for EventKind {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
  DeleteGuard,
  ToggleGuard,
  FilterSync,
  ClearFilters,
  FormValidation
}

/// One listener the host must register.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<E> {
  pub element:  E,
  pub event:    EventKind,
  pub behavior: Behavior
}

/// Everything wired onto the page at load time.
#[derive(Debug, Clone)]
pub struct PageBehaviors<E> {
  config:           Config,
  bindings:         Vec<Binding<E>>,
  alerts_scheduled: usize,
  counts:           TaskCounts
}

impl<E> PageBehaviors<E>
where
  E: Clone + PartialEq + fmt::Debug
{
  /// Scans the document once: schedules alert dismissal, refreshes the
  /// counters and collects the event bindings for every behavior whose
  /// elements are present.
  #[tracing::instrument(skip_all)]
  pub fn install<D, H>(
    dom: &D,
    host: &H,
    config: Config
  ) -> Self
  where
    D: Dom<Element = E>,
    H: Host<Element = E>
  {
    let alerts_scheduled =
      alerts::schedule_auto_dismiss(
        dom, host, &config
      );

    let mut bindings = Vec::new();
    bind_all(
      &mut bindings,
      dom.query_all(
        contract::DELETE_BUTTON
      ),
      EventKind::Click,
      Behavior::DeleteGuard
    );
    bind_all(
      &mut bindings,
      dom.query_all(
        contract::TOGGLE_BUTTON
      ),
      EventKind::Click,
      Behavior::ToggleGuard
    );

    match (
      dom.query_first(
        contract::STATUS_FILTER
      ),
      dom.query_first(
        contract::RESPONSIBLE_FILTER
      )
    ) {
      | (Some(status), Some(responsible)) => {
        bind_all(
          &mut bindings,
          [status, responsible],
          EventKind::Change,
          Behavior::FilterSync
        );
      }
      | _ => {
        debug!(
          "filter selectors incomplete; \
           synchronizer disabled"
        );
      }
    }

    bind_all(
      &mut bindings,
      dom.query_all(contract::FORM),
      EventKind::Submit,
      Behavior::FormValidation
    );
    bind_all(
      &mut bindings,
      dom.query_first(
        contract::CLEAR_FILTERS
      ),
      EventKind::Click,
      Behavior::ClearFilters
    );

    let counts = counters::refresh(dom);

    info!(
      bindings = bindings.len(),
      alerts = alerts_scheduled,
      tasks = counts.total,
      "page behaviors installed"
    );

    Self {
      config,
      bindings,
      alerts_scheduled,
      counts
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn bindings(&self) -> &[Binding<E>] {
    &self.bindings
  }

  /// Bindings registered for `event` on `element`.
  pub fn bindings_for<'a>(
    &'a self,
    element: &'a E,
    event: EventKind
  ) -> impl Iterator<Item = &'a Binding<E>> + 'a
  {
    self.bindings.iter().filter(
      move |binding| {
        binding.event == event
          && &binding.element == element
      }
    )
  }

  pub fn alerts_scheduled(&self) -> usize {
    self.alerts_scheduled
  }

  /// Counts computed at install time.
  pub fn counts(&self) -> TaskCounts {
    self.counts
  }

  /// Runs the behavior behind `binding` for one event.
  #[tracing::instrument(
    skip_all,
    fields(
      behavior = ?binding.behavior,
      event = %binding.event
    )
  )]
  pub fn handle<D, H>(
    &self,
    binding: &Binding<E>,
    dom: &D,
    host: &H
  ) -> Outcome
  where
    D: Dom<Element = E>,
    H: Host<Element = E>
  {
    let locale = self.config.locale;
    match binding.behavior {
      | Behavior::DeleteGuard => {
        guards::confirm_delete(host, locale)
      }
      | Behavior::ToggleGuard => {
        guards::confirm_toggle(
          dom,
          host,
          locale,
          &binding.element
        )
      }
      | Behavior::FilterSync => {
        filters::sync_to_location(
          dom, host
        );
        Outcome::Proceed
      }
      | Behavior::ClearFilters => {
        filters::clear(host);
        Outcome::Proceed
      }
      | Behavior::FormValidation => {
        validation::validate_submission(
          dom,
          host,
          &self.config,
          &binding.element
        )
      }
    }
  }

  /// Re-derives the counters from the current document.
  pub fn refresh_counters<D>(
    &mut self,
    dom: &D
  ) -> TaskCounts
  where
    D: Dom<Element = E>
  {
    self.counts = counters::refresh(dom);
    self.counts
  }
}

fn bind_all<E>(
  bindings: &mut Vec<Binding<E>>,
  elements: impl IntoIterator<Item = E>,
  event: EventKind,
  behavior: Behavior
) {
  for element in elements {
    bindings.push(Binding {
      element,
      event,
      behavior
    });
  }
}
