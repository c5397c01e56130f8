// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance configuration.

use alloc::borrow::Cow;

use crate::event::{EventKind, EventKinds};
use crate::host::ListenerOptions;

/// Class that exempts an interaction from outside detection when present on its origin
/// or any ancestor.
pub const DEFAULT_IGNORE_CLASS: &str = "ignore-react-onclickoutside";

/// Configuration of one outside-click instance.
///
/// Fixed at mount, except the initial `disabled` flag which only seeds the listening
/// intent; later changes go through
/// [`OutsideClick::set_disabled`](crate::OutsideClick::set_disabled).
///
/// ```
/// use understory_click_outside::{EventKind, OutsideClickConfig};
///
/// let config = OutsideClickConfig::default()
///     .with_event_kinds(EventKind::Click)
///     .with_ignore_class("menu-toggle")
///     .with_exclude_scrollbar(true);
/// assert_eq!(config.event_kinds.as_slice(), &[EventKind::Click]);
/// assert_eq!(config.ignore_class.as_deref(), Some("menu-toggle"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutsideClickConfig {
    /// Event kinds to listen for.
    pub event_kinds: EventKinds,
    /// Ignore marker class; `None` disables the marker.
    pub ignore_class: Option<Cow<'static, str>>,
    /// Prevent the default action of every observed event, inside or outside.
    pub prevent_default: bool,
    /// Stop propagation of every observed event, inside or outside.
    pub stop_propagation: bool,
    /// Treat presses on a scrollbar as not outside.
    pub exclude_scrollbar: bool,
    /// Start without listening.
    pub disabled: bool,
}

impl Default for OutsideClickConfig {
    fn default() -> Self {
        Self {
            event_kinds: EventKinds::default(),
            ignore_class: Some(Cow::Borrowed(DEFAULT_IGNORE_CLASS)),
            prevent_default: false,
            stop_propagation: false,
            exclude_scrollbar: false,
            disabled: false,
        }
    }
}

impl OutsideClickConfig {
    /// Set the observed event kinds. A single kind is accepted as a one-element list.
    #[must_use]
    pub fn with_event_kinds(mut self, kinds: impl Into<EventKinds>) -> Self {
        self.event_kinds = kinds.into();
        self
    }

    /// Set the ignore marker class.
    #[must_use]
    pub fn with_ignore_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.ignore_class = Some(class.into());
        self
    }

    /// Turn the ignore marker off.
    #[must_use]
    pub fn without_ignore_class(mut self) -> Self {
        self.ignore_class = None;
        self
    }

    /// Prevent the default action of observed events.
    #[must_use]
    pub fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }

    /// Stop propagation of observed events.
    #[must_use]
    pub fn with_stop_propagation(mut self, stop_propagation: bool) -> Self {
        self.stop_propagation = stop_propagation;
        self
    }

    /// Ignore presses on scrollbars.
    #[must_use]
    pub fn with_exclude_scrollbar(mut self, exclude_scrollbar: bool) -> Self {
        self.exclude_scrollbar = exclude_scrollbar;
        self
    }

    /// Start disabled.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Registration options for `kind`.
    ///
    /// Only touch kinds are passive, only when the host supports it, and never when
    /// this instance prevents the default action.
    pub fn listener_options(&self, kind: EventKind, passive_supported: bool) -> ListenerOptions {
        ListenerOptions::new(kind.is_touch() && passive_supported && !self.prevent_default)
    }
}
