// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction events: kinds, flags, and the raw event handed to listeners.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_click_outside::event::{EventKind, EventKinds, Interaction};
//!
//! // A single kind is normalized to a one-element list.
//! let kinds = EventKinds::from(EventKind::Click);
//! assert_eq!(kinds.as_slice(), &[EventKind::Click]);
//!
//! // The composed path wins over the direct target when present.
//! let ev = Interaction::new(EventKind::MouseDown, 1_u32, Point::new(4.0, 2.0))
//!     .with_composed_path([7, 3, 1]);
//! assert_eq!(ev.origin(), 7);
//! ```

use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use smallvec::SmallVec;

/// Kind of interaction a listener observes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Primary pointer (mouse) button pressed.
    MouseDown,
    /// Primary pointer (mouse) button released.
    MouseUp,
    /// Full click (press and release on the same node).
    Click,
    /// Unified pointer pressed.
    PointerDown,
    /// Unified pointer released.
    PointerUp,
    /// Touch contact started.
    TouchStart,
    /// Touch contact moved.
    TouchMove,
    /// Touch contact ended.
    TouchEnd,
    /// Any other platform event, by name.
    Custom(&'static str),
}

impl EventKind {
    /// Platform name of this event kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::Click => "click",
            Self::PointerDown => "pointerdown",
            Self::PointerUp => "pointerup",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::Custom(name) => name,
        }
    }

    /// Returns `true` for touch kinds, the only ones registered with a passive hint.
    pub const fn is_touch(self) -> bool {
        matches!(self, Self::TouchStart | Self::TouchMove | Self::TouchEnd)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered, de-duplicated list of event kinds an instance listens for.
///
/// Defaults to primary pointer down and touch start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventKinds(SmallVec<[EventKind; 2]>);

impl EventKinds {
    /// An empty list. An instance configured with no kinds never registers anything.
    pub fn empty() -> Self {
        Self(SmallVec::new())
    }

    /// Append a kind unless it is already present.
    pub fn push(&mut self, kind: EventKind) {
        if !self.0.contains(&kind) {
            self.0.push(kind);
        }
    }

    /// The kinds, in configuration order.
    pub fn as_slice(&self) -> &[EventKind] {
        &self.0
    }

    /// Iterate over the kinds in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.0.iter().copied()
    }

    /// Number of distinct kinds.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no kind is configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `kind` is part of the list.
    pub fn contains(&self, kind: EventKind) -> bool {
        self.0.contains(&kind)
    }
}

impl Default for EventKinds {
    fn default() -> Self {
        Self(SmallVec::from_buf([EventKind::MouseDown, EventKind::TouchStart]))
    }
}

impl From<EventKind> for EventKinds {
    fn from(kind: EventKind) -> Self {
        let mut kinds = Self::empty();
        kinds.push(kind);
        kinds
    }
}

impl<const N: usize> From<[EventKind; N]> for EventKinds {
    fn from(kinds: [EventKind; N]) -> Self {
        kinds.into_iter().collect()
    }
}

impl FromIterator<EventKind> for EventKinds {
    fn from_iter<I: IntoIterator<Item = EventKind>>(iter: I) -> Self {
        let mut kinds = Self::empty();
        for kind in iter {
            kinds.push(kind);
        }
        kinds
    }
}

bitflags::bitflags! {
    /// Default-action and propagation state of an [`Interaction`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        /// A listener asked the platform to skip the default action.
        const DEFAULT_PREVENTED   = 0b0000_0001;
        /// A listener asked the platform to stop propagation.
        const PROPAGATION_STOPPED = 0b0000_0010;
    }
}

/// Identifier of one outside-click listener (one wrapped component instance).
///
/// Assigned monotonically by [`Registry::allocate`](crate::registry::Registry::allocate),
/// starting at `1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub(crate) u64);

impl ListenerId {
    /// Reserved for the passive-listener probe; never handed to an instance.
    pub const PROBE: Self = Self(0);

    /// Raw value of the identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A raw interaction event as delivered by the platform.
///
/// `K` is the node key of the host's node graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Interaction<K> {
    /// Kind of the event.
    pub kind: EventKind,
    /// Direct target. Retargeted to the host when the event crossed an isolated subtree.
    pub target: K,
    /// Composed dispatch path, innermost first, when the platform exposes it.
    pub composed_path: Option<Vec<K>>,
    /// Pointer position in client (viewport) coordinates.
    pub position: Point,
    flags: EventFlags,
    handled: SmallVec<[ListenerId; 2]>,
}

impl<K: Copy> Interaction<K> {
    /// Create an event targeting `target` at `position`.
    pub fn new(kind: EventKind, target: K, position: Point) -> Self {
        Self {
            kind,
            target,
            composed_path: None,
            position,
            flags: EventFlags::empty(),
            handled: SmallVec::new(),
        }
    }

    /// Attach a composed dispatch path (innermost first).
    pub fn with_composed_path(mut self, path: impl IntoIterator<Item = K>) -> Self {
        self.composed_path = Some(path.into_iter().collect());
        self
    }

    /// The innermost node the interaction targeted.
    ///
    /// Prefers the first entry of the composed path, which sees through isolated
    /// subtree retargeting; falls back to the direct target.
    pub fn origin(&self) -> K {
        self.composed_path
            .as_deref()
            .and_then(|path| path.first().copied())
            .unwrap_or(self.target)
    }
}

impl<K> Interaction<K> {
    /// Ask the platform to skip the default action.
    pub fn prevent_default(&mut self) {
        self.flags |= EventFlags::DEFAULT_PREVENTED;
    }

    /// Ask the platform to stop propagating the event.
    pub fn stop_propagation(&mut self) {
        self.flags |= EventFlags::PROPAGATION_STOPPED;
    }

    /// Returns `true` once [`prevent_default`](Self::prevent_default) was called.
    pub fn default_prevented(&self) -> bool {
        self.flags.contains(EventFlags::DEFAULT_PREVENTED)
    }

    /// Returns `true` once [`stop_propagation`](Self::stop_propagation) was called.
    pub fn propagation_stopped(&self) -> bool {
        self.flags.contains(EventFlags::PROPAGATION_STOPPED)
    }

    /// Current default-action and propagation flags.
    pub fn flags(&self) -> EventFlags {
        self.flags
    }

    /// Record that listener `id` processed this event.
    ///
    /// Returns `false` if it already had, in which case the caller must not process
    /// the event again.
    pub fn mark_handled(&mut self, id: ListenerId) -> bool {
        if self.handled.contains(&id) {
            return false;
        }
        self.handled.push(id);
        true
    }

    /// Returns `true` if listener `id` already processed this event.
    pub fn is_handled_by(&self, id: ListenerId) -> bool {
        self.handled.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn default_kinds_are_mouse_down_and_touch_start() {
        let kinds = EventKinds::default();
        assert_eq!(
            kinds.as_slice(),
            &[EventKind::MouseDown, EventKind::TouchStart]
        );
    }

    #[test]
    fn kinds_deduplicate_and_keep_order() {
        let kinds = EventKinds::from([
            EventKind::TouchStart,
            EventKind::Click,
            EventKind::TouchStart,
        ]);
        assert_eq!(kinds.as_slice(), &[EventKind::TouchStart, EventKind::Click]);
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn only_touch_kinds_are_touch() {
        assert!(EventKind::TouchStart.is_touch());
        assert!(EventKind::TouchEnd.is_touch());
        assert!(!EventKind::MouseDown.is_touch());
        assert!(!EventKind::Custom("touchstart").is_touch());
        assert_eq!(EventKind::Custom("wheel").name(), "wheel");
    }

    #[test]
    fn origin_falls_back_to_target() {
        let ev = Interaction::new(EventKind::Click, 5_u32, Point::ZERO);
        assert_eq!(ev.origin(), 5);

        let empty =
            Interaction::new(EventKind::Click, 5_u32, Point::ZERO).with_composed_path(vec![]);
        assert_eq!(empty.origin(), 5);
    }

    #[test]
    fn flags_accumulate() {
        let mut ev = Interaction::new(EventKind::Click, 1_u32, Point::ZERO);
        assert!(ev.flags().is_empty());
        ev.prevent_default();
        assert!(ev.default_prevented());
        assert!(!ev.propagation_stopped());
        ev.stop_propagation();
        assert_eq!(
            ev.flags(),
            EventFlags::DEFAULT_PREVENTED | EventFlags::PROPAGATION_STOPPED
        );
    }

    #[test]
    fn handled_mark_is_per_listener() {
        let mut ev = Interaction::new(EventKind::Click, 1_u32, Point::ZERO);
        assert!(ev.mark_handled(ListenerId(1)));
        assert!(!ev.mark_handled(ListenerId(1)));
        assert!(ev.mark_handled(ListenerId(2)));
        assert!(ev.is_handled_by(ListenerId(2)));
        assert!(!ev.is_handled_by(ListenerId(3)));
    }
}
