//! Deterministic in-memory page for driving the behaviors without a
//! browser.
//!
//! [`MemoryDocument`] is a small element tree built with [`ElementSpec`].
//! [`RecordingHost`] answers confirmations from a script, records alerts
//! and navigations, and runs alert dismissals on a virtual clock.
//! [`PageHarness`] ties both to an installed [`PageBehaviors`] and
//! simulates user events.

use std::cell::{
  Cell,
  RefCell
};
use std::collections::{
  BTreeMap,
  BTreeSet,
  VecDeque
};
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;

use crate::behaviors::Outcome;
use crate::behaviors::counters::TaskCounts;
use crate::config::Config;
use crate::contract::Selector;
use crate::dom::{
  Dom,
  Host
};
use crate::page::{
  EventKind,
  PageBehaviors
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
pub struct NodeId(usize);

/// Builder for one element.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
  tag:        String,
  id:         Option<String>,
  classes:    Vec<String>,
  attributes: Vec<(String, String)>,
  value:      Option<String>,
  text:       String
}

impl ElementSpec {
  pub fn new(tag: &str) -> Self {
    Self {
      tag: tag.to_ascii_lowercase(),
      ..Self::default()
    }
  }

  pub fn id(mut self, id: &str) -> Self {
    self.id = Some(id.to_string());
    self
  }

  /// Adds one or more space-separated classes.
  pub fn class(
    mut self,
    classes: &str
  ) -> Self {
    self.classes.extend(
      classes
        .split_whitespace()
        .map(str::to_string)
    );
    self
  }

  pub fn attr(
    mut self,
    name: &str,
    value: &str
  ) -> Self {
    self.attributes.push((
      name.to_ascii_lowercase(),
      value.to_string()
    ));
    self
  }

  pub fn required(self) -> Self {
    self.attr("required", "")
  }

  pub fn value(
    mut self,
    value: &str
  ) -> Self {
    self.value = Some(value.to_string());
    self
  }

  pub fn text(mut self, text: &str) -> Self {
    self.text = text.to_string();
    self
  }
}

#[derive(Debug)]
struct Node {
  tag:        String,
  id:         Option<String>,
  classes:    BTreeSet<String>,
  attributes: BTreeMap<String, String>,
  value:      String,
  text:       String,
  parent:     Option<NodeId>,
  children:   Vec<NodeId>
}

impl Node {
  fn matches(
    &self,
    selector: Selector
  ) -> bool {
    match selector {
      | Selector::Class(name) => {
        self.classes.contains(name)
      }
      | Selector::Id(name) => {
        self.id.as_deref() == Some(name)
      }
      | Selector::Tag(name) => {
        self.tag.eq_ignore_ascii_case(name)
      }
      | Selector::Attribute(name) => {
        self.attributes.contains_key(name)
      }
    }
  }
}

#[derive(Debug)]
struct Tree {
  nodes: Vec<Node>
}

impl Tree {
  fn descendants(
    &self,
    scope: NodeId,
    out: &mut Vec<NodeId>
  ) {
    for &child in &self.nodes[scope.0].children
    {
      out.push(child);
      self.descendants(child, out);
    }
  }

  fn matching(
    &self,
    scope: NodeId,
    selector: Selector
  ) -> Vec<NodeId> {
    let mut all = Vec::new();
    self.descendants(scope, &mut all);
    all.retain(|id| {
      self.nodes[id.0].matches(selector)
    });
    all
  }

  fn is_connected(
    &self,
    mut id: NodeId
  ) -> bool {
    loop {
      if id == MemoryDocument::ROOT {
        return true;
      }
      match self.nodes[id.0].parent {
        | Some(parent) => id = parent,
        | None => return false
      }
    }
  }
}

/// Shared handle to an in-memory element tree. Clones see the same tree.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
  tree: Rc<RefCell<Tree>>
}

impl Default for MemoryDocument {
  fn default() -> Self {
    Self::new()
  }
}

impl MemoryDocument {
  pub const ROOT: NodeId = NodeId(0);

  /// Empty document holding only a `body` root.
  pub fn new() -> Self {
    let root = Node {
      tag:        "body".to_string(),
      id:         None,
      classes:    BTreeSet::new(),
      attributes: BTreeMap::new(),
      value:      String::new(),
      text:       String::new(),
      parent:     None,
      children:   Vec::new()
    };
    Self {
      tree: Rc::new(RefCell::new(Tree {
        nodes: vec![root]
      }))
    }
  }

  pub fn root(&self) -> NodeId {
    Self::ROOT
  }

  /// Appends a new element as the last child of `parent`.
  pub fn append(
    &self,
    parent: NodeId,
    spec: ElementSpec
  ) -> NodeId {
    let mut tree = self.tree.borrow_mut();
    let id = NodeId(tree.nodes.len());
    let mut classes: BTreeSet<String> =
      spec.classes.into_iter().collect();
    let mut attributes: BTreeMap<
      String,
      String
    > = spec.attributes.into_iter().collect();

    if let Some(raw) = attributes.get("class")
    {
      classes.extend(
        raw
          .split_whitespace()
          .map(str::to_string)
      );
    }
    if let Some(dom_id) = &spec.id {
      attributes
        .insert("id".to_string(), dom_id.clone());
    }

    tree.nodes.push(Node {
      tag: spec.tag,
      id: spec.id,
      classes,
      attributes,
      value: spec.value.unwrap_or_default(),
      text: spec.text,
      parent: Some(parent),
      children: Vec::new()
    });
    tree.nodes[parent.0].children.push(id);
    id
  }

  /// Detaches `element` and its subtree. Already detached elements are
  /// left alone.
  pub fn remove(&self, element: NodeId) {
    let mut tree = self.tree.borrow_mut();
    let Some(parent) =
      tree.nodes[element.0].parent.take()
    else {
      return;
    };
    tree.nodes[parent.0]
      .children
      .retain(|child| *child != element);
    trace!(?element, "element removed");
  }

  pub fn is_connected(
    &self,
    element: NodeId
  ) -> bool {
    self.tree.borrow().is_connected(element)
  }

  pub fn set_value(
    &self,
    element: NodeId,
    value: &str
  ) {
    self.tree.borrow_mut().nodes[element.0]
      .value = value.to_string();
  }

  pub fn text(
    &self,
    element: NodeId
  ) -> String {
    self.tree.borrow().nodes[element.0]
      .text
      .clone()
  }

  pub fn has_class(
    &self,
    element: NodeId,
    class: &str
  ) -> bool {
    self.tree.borrow().nodes[element.0]
      .classes
      .contains(class)
  }

  pub fn element_by_id(
    &self,
    id: &str
  ) -> Option<NodeId> {
    let tree = self.tree.borrow();
    let mut all = Vec::new();
    tree.descendants(Self::ROOT, &mut all);
    all.into_iter().find(|node| {
      tree.nodes[node.0].id.as_deref()
        == Some(id)
    })
  }
}

impl Dom for MemoryDocument {
  type Element = NodeId;

  fn query_all(
    &self,
    selector: Selector
  ) -> Vec<NodeId> {
    self
      .tree
      .borrow()
      .matching(Self::ROOT, selector)
  }

  fn query_within(
    &self,
    scope: &NodeId,
    selector: Selector
  ) -> Vec<NodeId> {
    self.tree.borrow().matching(*scope, selector)
  }

  fn attribute(
    &self,
    element: &NodeId,
    name: &str
  ) -> Option<String> {
    self.tree.borrow().nodes[element.0]
      .attributes
      .get(name)
      .cloned()
  }

  fn value(&self, element: &NodeId) -> String {
    self.tree.borrow().nodes[element.0]
      .value
      .clone()
  }

  fn add_class(
    &self,
    element: &NodeId,
    class: &str
  ) {
    self.tree.borrow_mut().nodes[element.0]
      .classes
      .insert(class.to_string());
  }

  fn remove_class(
    &self,
    element: &NodeId,
    class: &str
  ) {
    self.tree.borrow_mut().nodes[element.0]
      .classes
      .remove(class);
  }

  fn set_text(
    &self,
    element: &NodeId,
    text: &str
  ) {
    self.tree.borrow_mut().nodes[element.0]
      .text = text.to_string();
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDismissal {
  pub alert:  NodeId,
  pub due_at: u64
}

/// Host double with a virtual millisecond clock.
#[derive(Debug)]
pub struct RecordingHost {
  document:         MemoryDocument,
  pathname:         String,
  now_ms:           Cell<u64>,
  confirm_default:  Cell<bool>,
  toolkit_loaded:   Cell<bool>,
  confirm_script:   RefCell<VecDeque<bool>>,
  confirm_prompts:  RefCell<Vec<String>>,
  alert_messages:   RefCell<Vec<String>>,
  navigations:      RefCell<Vec<String>>,
  pending:          RefCell<Vec<PendingDismissal>>
}

impl RecordingHost {
  pub fn new(
    document: MemoryDocument,
    pathname: &str
  ) -> Self {
    Self {
      document,
      pathname: pathname.to_string(),
      now_ms: Cell::new(0),
      confirm_default: Cell::new(true),
      toolkit_loaded: Cell::new(true),
      confirm_script: RefCell::new(
        VecDeque::new()
      ),
      confirm_prompts: RefCell::new(Vec::new()),
      alert_messages: RefCell::new(Vec::new()),
      navigations: RefCell::new(Vec::new()),
      pending: RefCell::new(Vec::new())
    }
  }

  /// Answer used once the scripted answers run out.
  pub fn set_confirm_default(
    &self,
    answer: bool
  ) {
    self.confirm_default.set(answer);
  }

  /// Simulates a page without the alert toolkit: due dismissals still
  /// fire but leave the alert in place.
  pub fn set_toolkit_loaded(
    &self,
    loaded: bool
  ) {
    self.toolkit_loaded.set(loaded);
  }

  /// Queues the answer for the next confirmation.
  pub fn answer_next_confirm(
    &self,
    answer: bool
  ) {
    self
      .confirm_script
      .borrow_mut()
      .push_back(answer);
  }

  pub fn now_ms(&self) -> u64 {
    self.now_ms.get()
  }

  pub fn confirm_prompts(&self) -> Vec<String> {
    self.confirm_prompts.borrow().clone()
  }

  pub fn alerts(&self) -> Vec<String> {
    self.alert_messages.borrow().clone()
  }

  pub fn navigations(&self) -> Vec<String> {
    self.navigations.borrow().clone()
  }

  pub fn last_navigation(
    &self
  ) -> Option<String> {
    self.navigations.borrow().last().cloned()
  }

  pub fn pending_dismissals(
    &self
  ) -> Vec<PendingDismissal> {
    let mut pending =
      self.pending.borrow().clone();
    pending.sort_by_key(|entry| {
      (entry.due_at, entry.alert)
    });
    pending
  }

  /// Moves the clock forward and runs every dismissal that fell due.
  /// Returns how many ran.
  pub fn advance_time(
    &self,
    delta_ms: u64
  ) -> usize {
    let now =
      self.now_ms.get().saturating_add(delta_ms);
    self.now_ms.set(now);

    let due: Vec<PendingDismissal> = {
      let mut pending =
        self.pending.borrow_mut();
      let (due, waiting): (
        Vec<_>,
        Vec<_>
      ) = pending
        .drain(..)
        .partition(|entry| entry.due_at <= now);
      *pending = waiting;
      due
    };

    for entry in &due {
      if !self.toolkit_loaded.get() {
        trace!(alert = ?entry.alert, now, "toolkit missing; alert kept");
        continue;
      }
      trace!(alert = ?entry.alert, now, "dismissing alert");
      self.document.remove(entry.alert);
    }
    due.len()
  }
}

impl Host for RecordingHost {
  type Element = NodeId;

  fn confirm(&self, message: &str) -> bool {
    self
      .confirm_prompts
      .borrow_mut()
      .push(message.to_string());
    self
      .confirm_script
      .borrow_mut()
      .pop_front()
      .unwrap_or(self.confirm_default.get())
  }

  fn alert(&self, message: &str) {
    self
      .alert_messages
      .borrow_mut()
      .push(message.to_string());
  }

  fn pathname(&self) -> String {
    self.pathname.clone()
  }

  fn navigate(&self, url: &str) {
    self
      .navigations
      .borrow_mut()
      .push(url.to_string());
  }

  fn dismiss_after(
    &self,
    alert: NodeId,
    delay: Duration
  ) {
    let delay_ms =
      u64::try_from(delay.as_millis())
        .unwrap_or(u64::MAX);
    self.pending.borrow_mut().push(
      PendingDismissal {
        alert,
        due_at: self
          .now_ms
          .get()
          .saturating_add(delay_ms)
      }
    );
  }
}

/// Installed page plus the event plumbing a browser would provide.
#[derive(Debug)]
pub struct PageHarness {
  pub document: MemoryDocument,
  pub host:     RecordingHost,
  behaviors:    PageBehaviors<NodeId>
}

impl PageHarness {
  pub fn install(
    document: MemoryDocument,
    pathname: &str,
    config: Config
  ) -> Self {
    let host = RecordingHost::new(
      document.clone(),
      pathname
    );
    Self::install_with_host(
      document, host, config
    )
  }

  /// Installs against a host prepared by the caller, for example one
  /// with scripted confirm answers.
  pub fn install_with_host(
    document: MemoryDocument,
    host: RecordingHost,
    config: Config
  ) -> Self {
    let behaviors = PageBehaviors::install(
      &document, &host, config
    );
    Self {
      document,
      host,
      behaviors
    }
  }

  pub fn behaviors(
    &self
  ) -> &PageBehaviors<NodeId> {
    &self.behaviors
  }

  pub fn click(
    &self,
    element: NodeId
  ) -> Outcome {
    self.dispatch(element, EventKind::Click)
  }

  /// Sets the control's value, then fires `change` on it.
  pub fn change(
    &self,
    element: NodeId,
    value: &str
  ) -> Outcome {
    self.document.set_value(element, value);
    self.dispatch(element, EventKind::Change)
  }

  pub fn submit(
    &self,
    form: NodeId
  ) -> Outcome {
    self.dispatch(form, EventKind::Submit)
  }

  pub fn advance_time(
    &self,
    delta_ms: u64
  ) -> usize {
    self.host.advance_time(delta_ms)
  }

  pub fn refresh_counters(
    &mut self
  ) -> TaskCounts {
    self
      .behaviors
      .refresh_counters(&self.document)
  }

  /// Runs every listener bound to (`element`, `event`) in registration
  /// order. Detached elements receive no events.
  pub fn dispatch(
    &self,
    element: NodeId,
    event: EventKind
  ) -> Outcome {
    if !self.document.is_connected(element) {
      return Outcome::Proceed;
    }

    self
      .behaviors
      .bindings_for(&element, event)
      .fold(Outcome::Proceed, |acc, binding| {
        acc.merge(self.behaviors.handle(
          binding,
          &self.document,
          &self.host
        ))
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::contract;

  #[test]
  fn queries_follow_document_order_and_skip_detached()
  {
    let doc = MemoryDocument::new();
    let list = doc.append(
      doc.root(),
      ElementSpec::new("div")
    );
    let first = doc.append(
      list,
      ElementSpec::new("div").class("task-card")
    );
    let nested = doc.append(
      first,
      ElementSpec::new("div").class("task-card")
    );
    let last = doc.append(
      list,
      ElementSpec::new("div").class("task-card")
    );

    assert_eq!(
      doc.query_all(contract::TASK_CARD),
      vec![first, nested, last]
    );

    doc.remove(first);
    assert!(!doc.is_connected(nested));
    assert_eq!(
      doc.query_all(contract::TASK_CARD),
      vec![last]
    );
  }

  #[test]
  fn class_attribute_and_builder_classes_merge() {
    let doc = MemoryDocument::new();
    let field = doc.append(
      doc.root(),
      ElementSpec::new("input")
        .attr("class", "form-control is-invalid")
        .class("wide")
    );
    assert!(doc.has_class(field, "is-invalid"));
    assert!(doc.has_class(field, "wide"));

    doc.remove_class(&field, "is-invalid");
    assert!(!doc.has_class(field, "is-invalid"));
  }

  #[test]
  fn scripted_confirm_answers_run_before_default()
  {
    let host = RecordingHost::new(
      MemoryDocument::new(),
      "/"
    );
    host.answer_next_confirm(false);
    assert!(!host.confirm("first"));
    assert!(host.confirm("second"));

    host.set_confirm_default(false);
    host.answer_next_confirm(true);
    assert!(host.confirm("third"));
    assert!(!host.confirm("fourth"));
    assert_eq!(
      host.confirm_prompts(),
      vec!["first", "second", "third", "fourth"]
    );
  }

  #[test]
  fn element_by_id_accepts_borrowed_ids() {
    let doc = MemoryDocument::new();
    let counter = doc.append(
      doc.root(),
      ElementSpec::new("span")
        .id("total-tasks")
    );
    let wanted = String::from("total-tasks");
    assert_eq!(
      doc.element_by_id(&wanted),
      Some(counter)
    );

    doc.remove(counter);
    assert_eq!(
      doc.element_by_id(&wanted),
      None
    );
  }
}
