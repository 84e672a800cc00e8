use std::time::Duration;

use gloo::timers::callback::Timeout;
use js_sys::{
  Function,
  Reflect
};
use taskboard_core::contract::Selector;
use taskboard_core::{
  Dom,
  Host
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  Element,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  NodeList,
  Window
};

/// The live document behind the `Dom` trait.
#[derive(Debug, Clone)]
pub struct BrowserDom {
  document: Document
}

impl BrowserDom {
  pub fn new(document: Document) -> Self {
    Self {
      document
    }
  }
}

fn elements(
  list: Option<NodeList>
) -> Vec<Element> {
  let Some(list) = list else {
    return Vec::new();
  };

  (0..list.length())
    .filter_map(|index| list.item(index))
    .filter_map(|node| {
      node.dyn_into::<Element>().ok()
    })
    .collect()
}

impl Dom for BrowserDom {
  type Element = Element;

  fn query_all(
    &self,
    selector: Selector
  ) -> Vec<Element> {
    elements(
      self
        .document
        .query_selector_all(
          &selector.to_css()
        )
        .ok()
    )
  }

  fn query_within(
    &self,
    scope: &Element,
    selector: Selector
  ) -> Vec<Element> {
    elements(
      scope
        .query_selector_all(
          &selector.to_css()
        )
        .ok()
    )
  }

  fn query_first(
    &self,
    selector: Selector
  ) -> Option<Element> {
    match selector {
      | Selector::Id(id) => {
        self.document.get_element_by_id(id)
      }
      | _ => self
        .document
        .query_selector(&selector.to_css())
        .ok()
        .flatten()
    }
  }

  fn attribute(
    &self,
    element: &Element,
    name: &str
  ) -> Option<String> {
    element.get_attribute(name)
  }

  fn value(&self, element: &Element) -> String {
    if let Some(input) =
      element.dyn_ref::<HtmlInputElement>()
    {
      return input.value();
    }
    if let Some(select) =
      element.dyn_ref::<HtmlSelectElement>()
    {
      return select.value();
    }
    if let Some(area) = element
      .dyn_ref::<HtmlTextAreaElement>()
    {
      return area.value();
    }
    element
      .get_attribute("value")
      .unwrap_or_default()
  }

  fn add_class(
    &self,
    element: &Element,
    class: &str
  ) {
    if let Err(err) =
      element.class_list().add_1(class)
    {
      tracing::warn!(?err, class, "failed to add class");
    }
  }

  fn remove_class(
    &self,
    element: &Element,
    class: &str
  ) {
    if let Err(err) =
      element.class_list().remove_1(class)
    {
      tracing::warn!(?err, class, "failed to remove class");
    }
  }

  fn set_text(
    &self,
    element: &Element,
    text: &str
  ) {
    element.set_text_content(Some(text));
  }
}

/// Window services: native prompts, `location` and gloo timers.
#[derive(Debug, Clone)]
pub struct BrowserHost {
  window: Window
}

impl BrowserHost {
  pub fn new(window: Window) -> Self {
    Self {
      window
    }
  }
}

impl Host for BrowserHost {
  type Element = Element;

  fn confirm(&self, message: &str) -> bool {
    // A runtime without prompts lets the action through.
    self
      .window
      .confirm_with_message(message)
      .unwrap_or(true)
  }

  fn alert(&self, message: &str) {
    if let Err(err) =
      self.window.alert_with_message(message)
    {
      tracing::warn!(?err, "alert dialog unavailable");
    }
  }

  fn pathname(&self) -> String {
    self
      .window
      .location()
      .pathname()
      .unwrap_or_else(|_| "/".to_string())
  }

  fn navigate(&self, url: &str) {
    tracing::info!(url, "navigating");
    if let Err(err) =
      self.window.location().set_href(url)
    {
      tracing::error!(?err, url, "navigation failed");
    }
  }

  fn dismiss_after(
    &self,
    alert: Element,
    delay: Duration
  ) {
    // setTimeout takes a signed 32-bit delay.
    let millis =
      u32::try_from(delay.as_millis())
        .unwrap_or(u32::MAX)
        .min(MAX_TIMEOUT_MS);
    let window = self.window.clone();
    Timeout::new(millis, move || {
      close_alert(&window, &alert);
    })
    .forget();
  }
}

const MAX_TIMEOUT_MS: u32 =
  i32::MAX as u32;

/// Closes through the page's Bootstrap alert plugin. Without the plugin
/// the alert stays on the page.
fn close_alert(
  window: &Window,
  alert: &Element
) {
  if !alert.is_connected() {
    return;
  }

  if close_with_bootstrap(window, alert)
    .is_none()
  {
    tracing::debug!(
      "bootstrap alert plugin \
       missing; alert left in place"
    );
  }
}

fn close_with_bootstrap(
  window: &Window,
  alert: &Element
) -> Option<()> {
  let bootstrap = Reflect::get(
    window.as_ref(),
    &JsValue::from_str("bootstrap")
  )
  .ok()
  .filter(|value| value.is_object())?;
  let plugin = Reflect::get(
    &bootstrap,
    &JsValue::from_str("Alert")
  )
  .ok()
  .filter(|value| value.is_function())?;
  let get_instance: Function =
    Reflect::get(
      &plugin,
      &JsValue::from_str(
        "getOrCreateInstance"
      )
    )
    .ok()?
    .dyn_into()
    .ok()?;
  let instance = get_instance
    .call1(&plugin, alert.as_ref())
    .ok()?;
  let close: Function = Reflect::get(
    &instance,
    &JsValue::from_str("close")
  )
  .ok()?
  .dyn_into()
  .ok()?;

  close.call0(&instance).ok()?;
  Some(())
}
