use std::time::Duration;

use anyhow::{
  Context,
  anyhow
};
use serde::Deserialize;
use tracing::{
  debug,
  warn
};

use crate::contract::CONFIG_META_PREFIX;
use crate::messages::Locale;

pub const DEFAULT_ALERT_DISMISS_MS: u64 =
  5_000;
/// Largest delay a browser timer accepts.
pub const MAX_ALERT_DISMISS_MS: u64 =
  i32::MAX as u64;
pub const DEFAULT_INVALID_CLASS: &str =
  "is-invalid";

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub locale:           Locale,
  pub alert_dismiss_ms: u64,
  pub invalid_class:    String
}

impl Default for Config {
  fn default() -> Self {
    Self {
      locale:           Locale::default(),
      alert_dismiss_ms:
        DEFAULT_ALERT_DISMISS_MS,
      invalid_class:
        DEFAULT_INVALID_CLASS
          .to_string()
    }
  }
}

impl Config {
  /// Parses the JSON configuration island embedded in the page. Missing
  /// keys keep their defaults.
  #[tracing::instrument(skip(text))]
  pub fn from_json(
    text: &str
  ) -> anyhow::Result<Self> {
    if text.trim().is_empty() {
      debug!(
        "empty config island; using \
         defaults"
      );
      return Ok(Self::default());
    }

    let cfg: Config =
      serde_json::from_str(text)
        .context(
          "failed to parse taskboard \
           config"
        )?;
    cfg.validate()?;
    Ok(cfg)
  }

  /// Applies `key=value` overrides on top of the current values. Keys may
  /// carry the `taskboard.` prefix used by the page's meta tags.
  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix(
          CONFIG_META_PREFIX
        )
        .unwrap_or(&k)
        .trim()
        .to_string();
      let value = v.trim();
      debug!(key = %key, value = %value, "applying override");

      match key.as_str() {
        | "locale" => {
          self.locale =
            Locale::parse(value)
              .ok_or_else(|| {
                anyhow!(
                  "unsupported locale: \
                   {value}"
                )
              })?;
        }
        | "alert.dismiss_ms" => {
          self.alert_dismiss_ms =
            value
              .parse::<u64>()
              .with_context(|| {
                format!(
                  "invalid \
                   alert.dismiss_ms: \
                   {value}"
                )
              })?;
        }
        | "validation.invalid_class" => {
          self.invalid_class =
            value.to_string();
        }
        | _ => {
          warn!(key = %key, "unknown config key; skipping");
        }
      }
    }

    self.validate()
  }

  pub fn alert_dismiss_delay(
    &self
  ) -> Duration {
    Duration::from_millis(
      self.alert_dismiss_ms
    )
  }

  fn validate(
    &self
  ) -> anyhow::Result<()> {
    if self.alert_dismiss_ms
      > MAX_ALERT_DISMISS_MS
    {
      return Err(anyhow!(
        "alert.dismiss_ms must be at \
         most {MAX_ALERT_DISMISS_MS}, \
         got {}",
        self.alert_dismiss_ms
      ));
    }

    let class = self.invalid_class.trim();
    if class.is_empty()
      || class
        .chars()
        .any(char::is_whitespace)
    {
      return Err(anyhow!(
        "invalid_class must be a \
         single class name, got: {:?}",
        self.invalid_class
      ));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_the_rendered_page() {
    let cfg = Config::default();
    assert_eq!(cfg.locale, Locale::Es);
    assert_eq!(
      cfg.alert_dismiss_delay(),
      Duration::from_secs(5)
    );
    assert_eq!(
      cfg.invalid_class,
      "is-invalid"
    );
  }

  #[test]
  fn json_island_fills_missing_keys_with_defaults()
  {
    let cfg = Config::from_json(
      r#"{ "locale": "en" }"#
    )
    .expect("parse config");
    assert_eq!(cfg.locale, Locale::En);
    assert_eq!(
      cfg.alert_dismiss_ms,
      DEFAULT_ALERT_DISMISS_MS
    );

    assert_eq!(
      Config::from_json("   ")
        .expect("blank island"),
      Config::default()
    );
  }

  #[test]
  fn json_island_rejects_unknown_keys() {
    let err = Config::from_json(
      r#"{ "colour": "blue" }"#
    )
    .expect_err("unknown key");
    assert!(
      format!("{err:#}")
        .contains("taskboard config")
    );
  }

  #[test]
  fn dismiss_delay_must_fit_a_browser_timer()
  {
    let mut cfg = Config::default();
    cfg
      .apply_overrides([(
        "alert.dismiss_ms".to_string(),
        MAX_ALERT_DISMISS_MS.to_string()
      )])
      .expect("largest timer delay");

    let err = cfg
      .apply_overrides([(
        "alert.dismiss_ms".to_string(),
        "2147483648".to_string()
      )])
      .expect_err("delay too large");
    assert!(
      err
        .to_string()
        .contains("alert.dismiss_ms")
    );

    assert!(
      Config::from_json(
        r#"{ "alert_dismiss_ms": 4294967295 }"#
      )
      .is_err()
    );
  }

  #[test]
  fn overrides_strip_prefix_and_validate()
  {
    let mut cfg = Config::default();
    cfg
      .apply_overrides([
        (
          "taskboard.locale".to_string(),
          "en".to_string()
        ),
        (
          "alert.dismiss_ms".to_string(),
          "2500".to_string()
        ),
        (
          "taskboard.unknown".to_string(),
          "x".to_string()
        )
      ])
      .expect("apply overrides");
    assert_eq!(cfg.locale, Locale::En);
    assert_eq!(
      cfg.alert_dismiss_ms,
      2_500
    );

    assert!(
      cfg
        .apply_overrides([(
          "alert.dismiss_ms".to_string(),
          "soon".to_string()
        )])
        .is_err()
    );
    assert!(
      cfg
        .apply_overrides([(
          "validation.invalid_class"
            .to_string(),
          "not valid".to_string()
        )])
        .is_err()
    );
  }
}
