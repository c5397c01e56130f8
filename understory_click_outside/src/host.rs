// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform listener registration.
//!
//! [`ListenerHost`] is the only way this crate touches the platform's event system.
//! Registrations are keyed by [`ListenerId`]; when the platform delivers an event to a
//! registration it calls [`Registry::dispatch`](crate::registry::Registry::dispatch)
//! with that id.

use core::cell::Cell;
use core::fmt;

use crate::event::{EventKind, ListenerId};

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget<K> {
    /// The global (window-like) object.
    Global,
    /// A document-like node: the top-level document or an isolated subtree root.
    Context(K),
}

/// Options passed along with a listener registration.
///
/// Reading the passive hint through [`passive`](Self::passive) is recorded. Hosts that
/// honor the hint read it; hosts that do not never look at it, which is what the
/// [passive probe](crate::passive::detect_passive_support) relies on.
#[derive(Debug, Default)]
pub struct ListenerOptions {
    passive: bool,
    inspected: Cell<bool>,
}

impl ListenerOptions {
    /// Options with the given passive hint.
    pub fn new(passive: bool) -> Self {
        Self {
            passive,
            inspected: Cell::new(false),
        }
    }

    /// The passive hint. A passive listener promises not to prevent the default action.
    pub fn passive(&self) -> bool {
        self.inspected.set(true);
        self.passive
    }

    /// Returns `true` once the host read the passive hint.
    pub fn was_inspected(&self) -> bool {
        self.inspected.get()
    }
}

/// Error returned by a [`ListenerHost`] when a registration cannot be made.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostError {
    /// The environment has no listener registration at all.
    Unsupported,
    /// The host refused this particular registration.
    Rejected,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("listener registration is not supported"),
            Self::Rejected => f.write_str("listener registration was rejected"),
        }
    }
}

impl core::error::Error for HostError {}

/// The platform's listener registration, as seen by this crate.
pub trait ListenerHost<K> {
    /// The top-level document, or `None` when the environment has none (server-side or
    /// snapshot rendering). Without a document nothing is ever registered.
    fn document(&self) -> Option<K>;

    /// Register listener `id` for `kind` on `target`.
    fn add_listener(
        &mut self,
        target: ListenerTarget<K>,
        kind: EventKind,
        id: ListenerId,
        options: &ListenerOptions,
    ) -> Result<(), HostError>;

    /// Remove a registration made by [`add_listener`](Self::add_listener).
    ///
    /// Removing a registration that does not exist is a no-op.
    fn remove_listener(&mut self, target: ListenerTarget<K>, kind: EventKind, id: ListenerId);
}
