use tracing::debug;

use crate::config::Config;
use crate::contract;
use crate::dom::{
  Dom,
  Host
};

/// Schedules every alert present now for dismissal. Returns how many were
/// scheduled.
#[tracing::instrument(skip_all)]
pub fn schedule_auto_dismiss<D, H>(
  dom: &D,
  host: &H,
  cfg: &Config
) -> usize
where
  D: Dom,
  H: Host<Element = D::Element>
{
  let delay = cfg.alert_dismiss_delay();
  let alerts =
    dom.query_all(contract::ALERT);
  let scheduled = alerts.len();

  for alert in alerts {
    host.dismiss_after(alert, delay);
  }

  debug!(
    scheduled,
    delay_ms = cfg.alert_dismiss_ms,
    "alerts scheduled for dismissal"
  );
  scheduled
}
