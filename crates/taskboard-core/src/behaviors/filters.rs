use tracing::debug;
use url::form_urlencoded;

use crate::contract;
use crate::dom::{
  Dom,
  Host
};

/// Current values of the status and responsible selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
  pub status:      String,
  pub responsible: String
}

impl FilterState {
  pub fn new(
    status: impl Into<String>,
    responsible: impl Into<String>
  ) -> Self {
    Self {
      status:      status.into(),
      responsible: responsible.into()
    }
  }

  /// Reads both selectors. `None` when either is missing from the page.
  pub fn read<D: Dom>(
    dom: &D
  ) -> Option<Self> {
    let status = dom.query_first(
      contract::STATUS_FILTER
    )?;
    let responsible = dom.query_first(
      contract::RESPONSIBLE_FILTER
    )?;

    Some(Self {
      status:      dom.value(&status),
      responsible: dom
        .value(&responsible)
    })
  }

  /// Form-encoded query, status before responsible. Empty when no filter
  /// is active.
  pub fn query_string(&self) -> String {
    let mut query =
      form_urlencoded::Serializer::new(
        String::new()
      );
    if self.status != contract::STATUS_ALL
    {
      query.append_pair(
        contract::QUERY_STATUS,
        &self.status
      );
    }
    if !self.responsible.is_empty() {
      query.append_pair(
        contract::QUERY_RESPONSIBLE,
        &self.responsible
      );
    }
    query.finish()
  }

  pub fn target_url(
    &self,
    path: &str
  ) -> String {
    let query = self.query_string();
    if query.is_empty() {
      path.to_string()
    } else {
      format!("{path}?{query}")
    }
  }
}

/// Navigates to the current path filtered by both selectors. Does
/// nothing unless both selectors are present.
#[tracing::instrument(skip_all)]
pub fn sync_to_location<D, H>(
  dom: &D,
  host: &H
) where
  D: Dom,
  H: Host<Element = D::Element>
{
  let Some(state) = FilterState::read(dom)
  else {
    debug!(
      "filter selectors missing; \
       ignoring change"
    );
    return;
  };

  let url =
    state.target_url(&host.pathname());
  debug!(
    status = %state.status,
    responsible = %state.responsible,
    url = %url,
    "applying filters"
  );
  host.navigate(&url);
}

#[tracing::instrument(skip_all)]
pub fn clear<H: Host>(host: &H) {
  let path = host.pathname();
  debug!(path = %path, "clearing filters");
  host.navigate(&path);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sentinel_and_empty_values_are_omitted()
  {
    assert_eq!(
      FilterState::new("completed", "")
        .target_url("/"),
      "/?status=completed"
    );
    assert_eq!(
      FilterState::new("all", "Alice")
        .target_url("/tasks"),
      "/tasks?responsible=Alice"
    );
    assert_eq!(
      FilterState::new("all", "")
        .target_url("/tasks"),
      "/tasks"
    );
  }

  #[test]
  fn both_keys_keep_insertion_order() {
    assert_eq!(
      FilterState::new(
        "pending", "Bob"
      )
      .query_string(),
      "status=pending&responsible=Bob"
    );
  }

  #[test]
  fn values_are_form_encoded() {
    assert_eq!(
      FilterState::new(
        "all",
        "Ana María & Co"
      )
      .query_string(),
      "responsible=Ana+Mar%C3%ADa+%26+Co"
    );
  }
}
