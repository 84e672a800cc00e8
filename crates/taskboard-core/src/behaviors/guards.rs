use tracing::{
  debug,
  info
};

use super::Outcome;
use crate::contract;
use crate::dom::{
  Dom,
  Host
};
use crate::messages::Locale;

/// Prompt inputs carried by a toggle button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRequest {
  pub title:     String,
  pub completed: bool
}

impl ToggleRequest {
  pub fn from_element<D: Dom>(
    dom: &D,
    button: &D::Element
  ) -> Self {
    let title = dom
      .attribute(
        button,
        contract::ATTR_TASK_TITLE
      )
      .unwrap_or_default();
    let completed = dom
      .attribute(
        button,
        contract::ATTR_COMPLETED
      )
      .is_some_and(|raw| raw == "true");

    Self {
      title,
      completed
    }
  }

  pub fn prompt(
    &self,
    locale: Locale
  ) -> String {
    locale.toggle_prompt(
      &self.title,
      self.completed
    )
  }
}

#[tracing::instrument(skip_all)]
pub fn confirm_delete<H: Host>(
  host: &H,
  locale: Locale
) -> Outcome {
  let accepted =
    host.confirm(locale.delete_prompt());
  if !accepted {
    info!("task deletion canceled");
  }
  Outcome::from_allowed(accepted)
}

#[tracing::instrument(skip_all)]
pub fn confirm_toggle<D, H>(
  dom: &D,
  host: &H,
  locale: Locale,
  button: &D::Element
) -> Outcome
where
  D: Dom,
  H: Host<Element = D::Element>
{
  let request =
    ToggleRequest::from_element(
      dom, button
    );
  debug!(
    title = %request.title,
    completed = request.completed,
    "confirming task toggle"
  );

  let accepted =
    host.confirm(&request.prompt(locale));
  if !accepted {
    info!(
      title = %request.title,
      "task toggle canceled"
    );
  }
  Outcome::from_allowed(accepted)
}
