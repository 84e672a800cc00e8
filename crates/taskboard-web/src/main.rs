mod browser;
mod listeners;

use anyhow::{
  Context,
  anyhow
};
use gloo::events::EventListener;
use taskboard_core::contract;
use taskboard_core::{
  Config,
  Dom
};
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  HtmlMetaElement
};

use crate::browser::{
  BrowserDom,
  BrowserHost
};

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting taskboard page \
     behaviors"
  );

  let Some(document) = web_sys::window()
    .and_then(|window| window.document())
  else {
    tracing::error!("no document available");
    return;
  };

  if document.ready_state() == "loading" {
    EventListener::once(
      &document,
      "DOMContentLoaded",
      |_| start()
    )
    .forget();
  } else {
    start();
  }
}

fn start() {
  if let Err(err) = boot() {
    tracing::error!(error = %format!("{err:#}"), "page behaviors not installed");
  }
}

fn boot() -> anyhow::Result<()> {
  let window = web_sys::window()
    .ok_or_else(|| anyhow!("no window"))?;
  let document = window
    .document()
    .ok_or_else(|| anyhow!("no document"))?;

  let dom = BrowserDom::new(document.clone());
  let config = load_config(&dom, &document)
    .context("failed to load config")?;

  listeners::install(
    dom,
    BrowserHost::new(window),
    config
  );
  Ok(())
}

/// Defaults, then the JSON island, then `taskboard.*` meta overrides.
fn load_config(
  dom: &BrowserDom,
  document: &Document
) -> anyhow::Result<Config> {
  let mut config = match dom
    .query_first(contract::CONFIG_ISLAND)
  {
    | Some(island) => Config::from_json(
      &island
        .text_content()
        .unwrap_or_default()
    )?,
    | None => Config::default()
  };

  let metas = document
    .query_selector_all(&format!(
      "meta[name^=\"{}\"]",
      contract::CONFIG_META_PREFIX
    ))
    .map_err(|err| {
      anyhow!(
        "meta query failed: {err:?}"
      )
    })?;
  let overrides = (0..metas.length())
    .filter_map(|index| metas.item(index))
    .filter_map(|node| {
      node
        .dyn_into::<HtmlMetaElement>()
        .ok()
    })
    .map(|meta| {
      (meta.name(), meta.content())
    });
  config.apply_overrides(overrides)?;

  tracing::debug!(?config, "config loaded");
  Ok(config)
}
