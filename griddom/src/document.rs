//! The live element tree: native focus, scoped listeners, mutation observers
//! and the queue that delivers their notifications.

use std::collections::{HashMap, HashSet, VecDeque};

use crossterm::event::{Event as CrosstermEvent, KeyEventKind};

use crate::element::{
    collect_ids, contains_or_equal, find_element, find_element_mut, find_path, Content, Element,
};
use crate::error::DomError;
use crate::event::{Event, EventId, EventKind, FocusEvent, Key, KeyEvent, Modifiers};
use crate::focus::{collect_focusable, next_in_order, prev_in_order};
use crate::mutation::{MutationRecord, ObserveOptions};

/// Handle for an installed event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Handle for a connected mutation observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Exclusive ownership of an element, returned by [`Document::claim`].
#[derive(Debug, PartialEq, Eq)]
pub struct ClaimToken {
    id: u64,
    scope: String,
}

impl ClaimToken {
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

#[derive(Debug)]
struct Listener {
    id: ListenerId,
    scope: String,
    kinds: Vec<EventKind>,
}

#[derive(Debug)]
struct Observer {
    id: ObserverId,
    scope: String,
    options: ObserveOptions,
    pending: Vec<MutationRecord>,
}

/// A notification waiting to be handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// An event for one listener.
    Event { listener: ListenerId, event: Event },
    /// A batch of mutation records for one observer.
    Mutations {
        observer: ObserverId,
        records: Vec<MutationRecord>,
    },
}

/// Receives deliveries pulled out of a [`Document`] by [`Document::flush`].
pub trait DeliveryHandler {
    type Error;

    fn handle(&mut self, doc: &mut Document, delivery: &mut Delivery) -> Result<(), Self::Error>;
}

#[derive(Debug)]
pub struct Document {
    root: Element,
    focused: Option<String>,
    listeners: Vec<Listener>,
    observers: Vec<Observer>,
    queue: VecDeque<Delivery>,
    prevented: HashSet<EventId>,
    claims: HashMap<String, u64>,
    next_id: u64,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            focused: None,
            listeners: Vec::new(),
            observers: Vec::new(),
            queue: VecDeque::new(),
            prevented: HashSet::new(),
            claims: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn next_event_id(&mut self) -> EventId {
        EventId(self.next_id())
    }

    // =========================================================================
    // Tree queries
    // =========================================================================

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    /// Whether `id` is `ancestor` or lies below it in the live tree.
    pub fn contains(&self, ancestor: &str, id: &str) -> bool {
        self.get(ancestor)
            .is_some_and(|node| contains_or_equal(node, id))
    }

    pub fn parent_of(&self, id: &str) -> Option<&Element> {
        let path = find_path(&self.root, id)?;
        let parent = path.len().checked_sub(2).map(|i| &path[i])?;
        self.get(parent)
    }

    /// IDs from the root down to `id`, both inclusive.
    pub fn path_to(&self, id: &str) -> Option<Vec<String>> {
        find_path(&self.root, id)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Move native focus to `id`.
    /// Returns false if the element is missing, not focusable, or already focused.
    pub fn focus(&mut self, id: &str) -> bool {
        let Some(element) = self.get(id) else {
            log::trace!("[document] focus({id}): no such element");
            return false;
        };
        if !element.can_focus() {
            log::trace!("[document] focus({id}): element is not focusable");
            return false;
        }
        if self.focused.as_deref() == Some(id) {
            return false;
        }

        let old = self.focused.replace(id.to_string());
        log::debug!("[document] focus {:?} -> {}", old, id);

        // focusout for the old element always precedes focusin for the new one
        if let Some(old_id) = &old {
            let event_id = self.next_event_id();
            self.dispatch(Event::FocusOut(FocusEvent {
                id: event_id,
                target: old_id.clone(),
                related: Some(id.to_string()),
            }));
        }
        let event_id = self.next_event_id();
        self.dispatch(Event::FocusIn(FocusEvent {
            id: event_id,
            target: id.to_string(),
            related: old,
        }));
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        let Some(old) = self.focused.take() else {
            return false;
        };
        log::debug!("[document] blur {}", old);
        let event_id = self.next_event_id();
        self.dispatch(Event::FocusOut(FocusEvent {
            id: event_id,
            target: old,
            related: None,
        }));
        true
    }

    /// Focus the next focusable element (Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_next(&mut self) -> Option<String> {
        let focusable = collect_focusable(&self.root);
        let next = next_in_order(&focusable, self.focused())?;
        self.focus(&next).then_some(next)
    }

    /// Focus the previous focusable element (Shift+Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_prev(&mut self) -> Option<String> {
        let focusable = collect_focusable(&self.root);
        let prev = prev_in_order(&focusable, self.focused())?;
        self.focus(&prev).then_some(prev)
    }

    /// Drop focus if it sits inside the subtree about to be detached.
    fn release_focus_within(&mut self, subtree: &str) {
        let Some(focused) = self.focused.clone() else {
            return;
        };
        if !self.contains(subtree, &focused) {
            return;
        }
        log::debug!("[document] focused {} removed with {}", focused, subtree);
        // Dispatched while still attached so scoped listeners see it
        let event_id = self.next_event_id();
        self.dispatch(Event::FocusOut(FocusEvent {
            id: event_id,
            target: focused,
            related: None,
        }));
        self.focused = None;
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Dispatch a key press at the focused element (or the root).
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> EventId {
        let target = self
            .focused
            .clone()
            .unwrap_or_else(|| self.root.id.clone());
        let event_id = self.next_event_id();
        self.dispatch(Event::KeyDown(KeyEvent {
            id: event_id,
            target,
            key,
            modifiers,
            default_prevented: false,
        }));
        event_id
    }

    /// Whether a key event delivered by the most recent [`flush`](Self::flush)
    /// had its default action suppressed. Earlier flushes are forgotten.
    pub fn default_prevented(&self, id: EventId) -> bool {
        self.prevented.contains(&id)
    }

    /// Turn raw terminal input into key events.
    pub fn process_events(&mut self, raw: &[CrosstermEvent]) -> Vec<EventId> {
        let mut ids = Vec::new();
        for raw_event in raw {
            if let CrosstermEvent::Key(key_event) = raw_event {
                // Only process key press events (not release/repeat on some terminals)
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                ids.push(self.key_down(key_event.code.into(), key_event.modifiers.into()));
            }
        }
        ids
    }

    fn dispatch(&mut self, event: Event) {
        let kind = event.kind();
        let targets: Vec<ListenerId> = self
            .listeners
            .iter()
            .filter(|l| l.kinds.contains(&kind) && self.contains(&l.scope, event.target()))
            .map(|l| l.id)
            .collect();

        log::trace!(
            "[document] dispatch {:?} at {} to {} listener(s)",
            kind,
            event.target(),
            targets.len()
        );

        for listener in targets {
            self.queue.push_back(Delivery::Event {
                listener,
                event: event.clone(),
            });
        }
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Set a data attribute. Returns true if the stored value changed.
    pub fn set_data(
        &mut self,
        id: &str,
        key: &str,
        value: impl Into<String>,
    ) -> Result<bool, DomError> {
        let element = find_element_mut(&mut self.root, id)
            .ok_or_else(|| DomError::NotFound(id.to_string()))?;
        let value = value.into();
        if element.data.get(key) == Some(&value) {
            return Ok(false);
        }
        element.data.insert(key.to_string(), value);
        self.record(MutationRecord::attribute(id, key));
        Ok(true)
    }

    /// Remove a data attribute. Returns true if it was present.
    pub fn remove_data(&mut self, id: &str, key: &str) -> Result<bool, DomError> {
        let element = find_element_mut(&mut self.root, id)
            .ok_or_else(|| DomError::NotFound(id.to_string()))?;
        if element.data.remove(key).is_none() {
            return Ok(false);
        }
        self.record(MutationRecord::attribute(id, key));
        Ok(true)
    }

    /// Set data attributes on many elements inside `scope` in a single walk.
    /// `updates` maps element ids to `(key, value)` pairs. Returns how many
    /// stored values changed; ids not found under `scope` fail with `NotFound`
    /// after the others are applied.
    pub fn set_data_within(
        &mut self,
        scope: &str,
        mut updates: HashMap<String, Vec<(&str, String)>>,
    ) -> Result<usize, DomError> {
        let scope_el = find_element_mut(&mut self.root, scope)
            .ok_or_else(|| DomError::NotFound(scope.to_string()))?;
        let mut records = Vec::new();
        apply_data(scope_el, &mut updates, &mut records);

        let changed = records.len();
        for record in records {
            self.record(record);
        }
        match updates.into_keys().next() {
            Some(missing) => Err(DomError::NotFound(missing)),
            None => Ok(changed),
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn append_child(&mut self, parent: &str, child: Element) -> Result<(), DomError> {
        self.insert_child(parent, usize::MAX, child)
    }

    /// Insert `child` at `index` among `parent`'s children (clamped to the end).
    pub fn insert_child(
        &mut self,
        parent: &str,
        index: usize,
        child: Element,
    ) -> Result<(), DomError> {
        if let Some(duplicate) = collect_ids(&child)
            .into_iter()
            .find(|id| self.get(id).is_some())
        {
            return Err(DomError::DuplicateId(duplicate));
        }

        let added = child.id.clone();
        let parent_el = find_element_mut(&mut self.root, parent)
            .ok_or_else(|| DomError::NotFound(parent.to_string()))?;
        let children = parent_el.child_list_mut();
        let index = index.min(children.len());
        children.insert(index, child);

        log::debug!("[document] inserted {} into {} at {}", added, parent, index);
        self.record(MutationRecord::child_list(parent, vec![added], Vec::new()));
        Ok(())
    }

    /// Detach the element `id` and its subtree, returning it.
    pub fn remove(&mut self, id: &str) -> Result<Element, DomError> {
        if self.root.id == id {
            return Err(DomError::RootRemoval);
        }
        let parent_id = self
            .parent_of(id)
            .map(|p| p.id.clone())
            .ok_or_else(|| DomError::NotFound(id.to_string()))?;

        self.release_focus_within(id);

        let parent = find_element_mut(&mut self.root, &parent_id)
            .ok_or_else(|| DomError::NotFound(parent_id.clone()))?;
        let children = parent.child_list_mut();
        let pos = children
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DomError::NotFound(id.to_string()))?;
        let removed = children.remove(pos);

        log::debug!("[document] removed {} from {}", id, parent_id);
        self.record(MutationRecord::child_list(
            parent_id,
            Vec::new(),
            vec![removed.clone()],
        ));
        Ok(removed)
    }

    /// Swap out every child of `parent` in one mutation, returning the old children.
    pub fn replace_children(
        &mut self,
        parent: &str,
        new_children: Vec<Element>,
    ) -> Result<Vec<Element>, DomError> {
        let old_children = self
            .get(parent)
            .ok_or_else(|| DomError::NotFound(parent.to_string()))?
            .child_elements()
            .to_vec();

        // IDs inside the outgoing children may be reused by the incoming ones
        let outgoing: HashSet<String> = old_children.iter().flat_map(collect_ids).collect();
        let mut incoming = HashSet::new();
        for id in new_children.iter().flat_map(collect_ids) {
            let taken = self.get(&id).is_some() && !outgoing.contains(&id);
            if taken || !incoming.insert(id.clone()) {
                return Err(DomError::DuplicateId(id));
            }
        }

        for old in &old_children {
            self.release_focus_within(&old.id);
        }

        let added: Vec<String> = new_children.iter().map(|c| c.id.clone()).collect();
        let parent_el = find_element_mut(&mut self.root, parent)
            .ok_or_else(|| DomError::NotFound(parent.to_string()))?;
        let removed = std::mem::take(parent_el.child_list_mut());
        *parent_el.child_list_mut() = new_children;

        log::debug!(
            "[document] replaced {} children of {} with {}",
            removed.len(),
            parent,
            added.len()
        );
        self.record(MutationRecord::child_list(parent, added, removed.clone()));
        Ok(removed)
    }

    fn record(&mut self, record: MutationRecord) {
        let matching: Vec<usize> = self
            .observers
            .iter()
            .enumerate()
            .filter(|(_, o)| {
                o.options.wants(&record.kind)
                    && (o.scope == record.target
                        || (o.options.subtree && self.contains(&o.scope, &record.target)))
            })
            .map(|(i, _)| i)
            .collect();

        for i in matching {
            self.observers[i].pending.push(record.clone());
        }
    }

    // =========================================================================
    // Listeners, observers and claims
    // =========================================================================

    /// Listen for `kinds` on events targeted at `scope` or anything below it.
    pub fn listen(&mut self, scope: &str, kinds: &[EventKind]) -> Result<ListenerId, DomError> {
        if self.get(scope).is_none() {
            return Err(DomError::NotFound(scope.to_string()));
        }
        let id = ListenerId(self.next_id());
        self.listeners.push(Listener {
            id,
            scope: scope.to_string(),
            kinds: kinds.to_vec(),
        });
        Ok(id)
    }

    /// Remove a listener and anything still queued for it.
    /// Returns false if it was already gone.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.queue
            .retain(|d| !matches!(d, Delivery::Event { listener, .. } if *listener == id));
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn observe(
        &mut self,
        scope: &str,
        options: ObserveOptions,
    ) -> Result<ObserverId, DomError> {
        if self.get(scope).is_none() {
            return Err(DomError::NotFound(scope.to_string()));
        }
        let id = ObserverId(self.next_id());
        self.observers.push(Observer {
            id,
            scope: scope.to_string(),
            options,
            pending: Vec::new(),
        });
        Ok(id)
    }

    /// Disconnect an observer, dropping records it has not received yet.
    /// Returns false if it was already disconnected.
    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Take exclusive ownership of `scope`.
    pub fn claim(&mut self, scope: &str) -> Result<ClaimToken, DomError> {
        if self.get(scope).is_none() {
            return Err(DomError::NotFound(scope.to_string()));
        }
        if self.claims.contains_key(scope) {
            return Err(DomError::AlreadyClaimed(scope.to_string()));
        }
        let id = self.next_id();
        self.claims.insert(scope.to_string(), id);
        Ok(ClaimToken {
            id,
            scope: scope.to_string(),
        })
    }

    pub fn release(&mut self, token: ClaimToken) -> bool {
        if self.claims.get(&token.scope) == Some(&token.id) {
            self.claims.remove(&token.scope);
            true
        } else {
            false
        }
    }

    pub fn is_claimed(&self, scope: &str) -> bool {
        self.claims.contains_key(scope)
    }

    // =========================================================================
    // Delivery
    // =========================================================================

    /// Next pending notification. Queued events come first; mutation batches
    /// are handed out only once the event queue is empty.
    pub fn next_delivery(&mut self) -> Option<Delivery> {
        if let Some(delivery) = self.queue.pop_front() {
            return Some(delivery);
        }
        let observer = self.observers.iter_mut().find(|o| !o.pending.is_empty())?;
        Some(Delivery::Mutations {
            observer: observer.id,
            records: std::mem::take(&mut observer.pending),
        })
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.observers.iter().all(|o| o.pending.is_empty())
    }

    /// Deliver everything pending (including anything the handler causes)
    /// until the document is idle. Stops at the first handler error.
    pub fn flush<H: DeliveryHandler>(&mut self, handler: &mut H) -> Result<(), H::Error> {
        self.prevented.clear();
        while let Some(mut delivery) = self.next_delivery() {
            handler.handle(self, &mut delivery)?;
            if let Delivery::Event {
                event: Event::KeyDown(key),
                ..
            } = &delivery
            {
                if key.default_prevented {
                    self.prevented.insert(key.id);
                }
            }
        }
        Ok(())
    }
}

fn apply_data(
    element: &mut Element,
    updates: &mut HashMap<String, Vec<(&str, String)>>,
    records: &mut Vec<MutationRecord>,
) {
    if let Some(values) = updates.remove(&element.id) {
        for (key, value) in values {
            if element.data.get(key) != Some(&value) {
                element.data.insert(key.to_string(), value);
                records.push(MutationRecord::attribute(element.id.clone(), key));
            }
        }
    }
    if updates.is_empty() {
        return;
    }
    if let Content::Children(children) = &mut element.content {
        for child in children {
            apply_data(child, updates, records);
        }
    }
}
