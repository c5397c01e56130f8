// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Passive-listener support probe.
//!
//! Touch listeners are registered with a passive hint when the host honors it and the
//! instance does not prevent the default action. Whether the host honors the hint is
//! discovered once by registering a throwaway listener and watching whether the host
//! reads the hint.

use tracing::debug;

use crate::event::{EventKind, ListenerId};
use crate::host::{ListenerHost, ListenerOptions, ListenerTarget};

/// Throwaway event kind used by the probe.
pub const PROBE_EVENT: EventKind = EventKind::Custom("testPassiveEventSupport");

/// Returns `true` if `host` reads the passive hint of a registration.
///
/// Hosts without a document, or that fail the probe registration, are reported as not
/// supporting passive listeners.
pub fn detect_passive_support<K, H: ListenerHost<K> + ?Sized>(host: &mut H) -> bool {
    if host.document().is_none() {
        return false;
    }
    let options = ListenerOptions::new(true);
    if host
        .add_listener(ListenerTarget::Global, PROBE_EVENT, ListenerId::PROBE, &options)
        .is_err()
    {
        return false;
    }
    host.remove_listener(ListenerTarget::Global, PROBE_EVENT, ListenerId::PROBE);
    options.was_inspected()
}

/// Lazily probed, cached passive-listener support.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PassiveSupport(Option<bool>);

impl PassiveSupport {
    /// Unprobed state.
    pub const fn new() -> Self {
        Self(None)
    }

    /// Cached result, or `None` before the first probe.
    pub const fn cached(&self) -> Option<bool> {
        self.0
    }

    /// Probe `host` on first use and return the cached result afterwards.
    pub fn get_or_probe<K, H: ListenerHost<K> + ?Sized>(&mut self, host: &mut H) -> bool {
        if let Some(supported) = self.0 {
            return supported;
        }
        let supported = detect_passive_support(host);
        debug!(supported, "probed passive listener support");
        self.0 = Some(supported);
        supported
    }
}
