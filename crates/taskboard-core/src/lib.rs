pub mod behaviors;
pub mod config;
pub mod contract;
pub mod dom;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod memory;
pub mod messages;
pub mod page;

pub use behaviors::Outcome;
pub use config::Config;
pub use dom::{
  Dom,
  Host
};
pub use messages::Locale;
pub use page::{
  Behavior,
  Binding,
  EventKind,
  PageBehaviors
};
