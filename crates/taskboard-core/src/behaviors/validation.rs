use tracing::{
  debug,
  trace
};

use super::Outcome;
use crate::config::Config;
use crate::contract;
use crate::dom::{
  Dom,
  Host
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
  pub valid:   usize,
  pub invalid: usize
}

impl ValidationReport {
  pub fn is_valid(&self) -> bool {
    self.invalid == 0
  }
}

/// Marks every required field of `form`, setting the invalid class on
/// blank ones and clearing it from the rest. Never stops early.
pub fn mark_required_fields<D: Dom>(
  dom: &D,
  form: &D::Element,
  invalid_class: &str
) -> ValidationReport {
  let mut report =
    ValidationReport::default();

  for field in dom.query_within(
    form,
    contract::REQUIRED_FIELD
  ) {
    if dom.value(&field).trim().is_empty()
    {
      trace!(?field, "required field is blank");
      dom.add_class(&field, invalid_class);
      report.invalid += 1;
    } else {
      dom.remove_class(
        &field,
        invalid_class
      );
      report.valid += 1;
    }
  }

  report
}

/// Submit handler: blocks the submission and alerts once when any
/// required field is blank.
#[tracing::instrument(skip_all)]
pub fn validate_submission<D, H>(
  dom: &D,
  host: &H,
  cfg: &Config,
  form: &D::Element
) -> Outcome
where
  D: Dom,
  H: Host<Element = D::Element>
{
  let report = mark_required_fields(
    dom,
    form,
    &cfg.invalid_class
  );
  debug!(
    valid = report.valid,
    invalid = report.invalid,
    "form validated"
  );

  if report.is_valid() {
    return Outcome::Proceed;
  }

  host.alert(
    cfg.locale.required_fields_alert()
  );
  Outcome::PreventDefault
}
