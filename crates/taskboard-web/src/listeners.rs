use std::rc::Rc;

use gloo::events::{
  EventListener,
  EventListenerOptions
};
use taskboard_core::{
  Config,
  PageBehaviors
};

use crate::browser::{
  BrowserDom,
  BrowserHost
};

struct Page {
  dom:       BrowserDom,
  host:      BrowserHost,
  behaviors: PageBehaviors<web_sys::Element>
}

/// Installs the behaviors and registers one listener per binding. The
/// listeners live as long as the page.
pub fn install(
  dom: BrowserDom,
  host: BrowserHost,
  config: Config
) {
  let behaviors =
    PageBehaviors::install(&dom, &host, config);
  let page = Rc::new(Page {
    dom,
    host,
    behaviors
  });

  for (index, binding) in
    page.behaviors.bindings().iter().enumerate()
  {
    let handler_page = page.clone();
    EventListener::new_with_options(
      &binding.element,
      binding.event.as_str(),
      EventListenerOptions::enable_prevent_default(),
      move |event| {
        let page = &handler_page;
        let binding =
          &page.behaviors.bindings()[index];
        let outcome = page.behaviors.handle(
          binding,
          &page.dom,
          &page.host
        );
        if outcome.is_prevented() {
          event.prevent_default();
        }
      }
    )
    .forget();
  }
}
