// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch registry: listener id → active dispatch closure.
//!
//! The registry is an ordinary owned value. Hosts keep one per document (or per app)
//! and pass it by reference to every [`OutsideClick`](crate::OutsideClick) they manage
//! and to the platform glue that delivers events.
//!
//! ## Invariants
//!
//! - An id has at most one active dispatch closure. Inserting a second closure for an
//!   id that is already registered is refused.
//! - Each entry remembers exactly which `(target, kind)` listener registrations were
//!   made for it, so removal can undo precisely those.
//! - Ids are handed out monotonically and never reused.

use alloc::boxed::Box;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::containment::Containment;
use crate::event::{EventKind, Interaction, ListenerId};
use crate::host::{ListenerHost, ListenerTarget};
use crate::passive::PassiveSupport;
use crate::tree::NodeTree;

/// What a dispatch closure did with an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    /// The instance was disabled when the event arrived.
    Disabled,
    /// The instance had no boundary node.
    NoBoundary,
    /// The instance already processed this event through another registration.
    AlreadyHandled,
    /// The press landed on a scrollbar and scrollbar presses are excluded.
    Scrollbar,
    /// The origin was inside the boundary, ignored, or detached.
    Inside(Containment),
    /// The origin was outside and the handler ran.
    Outside,
    /// The origin was outside but the handler could not be entered, because it was
    /// already running or had been released.
    HandlerUnavailable,
}

/// Dispatch closure installed for one listener id, shared by all its event kinds and
/// targets.
pub type DispatchFn<K> =
    Box<dyn FnMut(&mut Interaction<K>, &dyn NodeTree<Node = K>) -> DispatchOutcome>;

/// Listener registrations made for one id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration<K> {
    /// Every `(target, kind)` pair the host accepted.
    pub listeners: SmallVec<[(ListenerTarget<K>, EventKind); 4]>,
}

impl<K> Default for Registration<K> {
    fn default() -> Self {
        Self {
            listeners: SmallVec::new(),
        }
    }
}

struct Entry<K> {
    dispatch: DispatchFn<K>,
    registration: Registration<K>,
}

/// Owner of all active dispatch closures and the cached passive probe.
pub struct Registry<K> {
    next_id: u64,
    entries: HashMap<ListenerId, Entry<K>>,
    passive: PassiveSupport,
}

impl<K> Default for Registry<K> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: HashMap::new(),
            passive: PassiveSupport::new(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Registry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: SmallVec<[ListenerId; 8]> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        f.debug_struct("Registry")
            .field("next_id", &self.next_id)
            .field("active", &ids)
            .field("passive", &self.passive)
            .finish()
    }
}

impl<K> Registry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh listener id.
    pub fn allocate(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Install the dispatch closure for `id`.
    ///
    /// Returns `false`, leaving the existing entry untouched, if `id` already has one.
    pub fn insert(
        &mut self,
        id: ListenerId,
        dispatch: DispatchFn<K>,
        registration: Registration<K>,
    ) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(
            id,
            Entry {
                dispatch,
                registration,
            },
        );
        true
    }

    /// Erase the entry for `id`, returning the registrations it recorded.
    pub fn remove(&mut self, id: ListenerId) -> Option<Registration<K>> {
        self.entries.remove(&id).map(|entry| entry.registration)
    }

    /// Returns `true` if `id` has an active dispatch closure.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Registrations recorded for `id`.
    pub fn registration(&self, id: ListenerId) -> Option<&Registration<K>> {
        self.entries.get(&id).map(|entry| &entry.registration)
    }

    /// Number of active dispatch closures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no dispatch closure is active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the dispatch closure of `id` for `event`.
    ///
    /// Platform glue calls this once per listener registration the event reaches.
    /// Returns `None` for ids without an active closure.
    pub fn dispatch(
        &mut self,
        id: ListenerId,
        tree: &dyn NodeTree<Node = K>,
        event: &mut Interaction<K>,
    ) -> Option<DispatchOutcome> {
        let entry = self.entries.get_mut(&id)?;
        Some((entry.dispatch)(event, tree))
    }

    /// Whether `host` honors passive listener hints, probed once and cached.
    pub fn passive_supported<H: ListenerHost<K> + ?Sized>(&mut self, host: &mut H) -> bool {
        self.passive.get_or_probe(host)
    }

    /// Drop every entry and the cached probe result without touching any host.
    ///
    /// Id allocation keeps counting so ids stay unique.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.passive = PassiveSupport::new();
    }
}
