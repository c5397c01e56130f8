// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance outside-click façade.
//!
//! [`OutsideClick`] is owned by the host component it serves. The host forwards its
//! lifecycle to it:
//!
//! - mounted → [`OutsideClick::mount`]
//! - rendered again → [`OutsideClick::update`] with the current boundary node
//! - `disable_on_click_outside` prop changed → [`OutsideClick::set_disabled`]
//! - about to unmount → [`OutsideClick::unmount`]
//!
//! and may call [`OutsideClick::enable`] / [`OutsideClick::disable`] directly.
//!
//! ## Listening
//!
//! The instance keeps a listening intent (initially `!config.disabled`, then whatever
//! the last enable/disable asked for). Listeners are actually registered only while
//! the intent is set, a boundary node exists, and the host has a document. Enabling
//! installs one dispatch closure in the [`Registry`] and registers it for every
//! configured kind on every document-like context enclosing the boundary, so
//! interactions inside isolated subtrees are observed too. If the host accepts none of
//! those registrations the instance stays disabled and the next enable tries again.
//!
//! ## Dispatch
//!
//! For every event delivered to one of its registrations the closure:
//!
//! 1. does nothing if the instance is disabled or has no boundary node;
//! 2. does nothing if it already processed this very event through another
//!    registration (an instance registered on nested contexts sees the event at each);
//! 3. applies `prevent_default` / `stop_propagation` if configured. This happens
//!    before the inside/outside decision, so inside presses are affected as well;
//! 4. ignores scrollbar presses when `exclude_scrollbar` is set;
//! 5. runs the [region test](crate::containment::locate) and calls the handler with
//!    the raw event when the origin is outside. A handler that is already running is
//!    not entered again.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::config::OutsideClickConfig;
use crate::containment::{enclosing_contexts, locate};
use crate::event::{Interaction, ListenerId};
use crate::handler::{
    Component, ConfigError, Handler, HandlerFactory, HandlerSource, resolve_handler,
};
use crate::host::{ListenerHost, ListenerTarget};
use crate::registry::{DispatchFn, DispatchOutcome, Registration, Registry};
use crate::scrollbar::clicked_scrollbar;
use crate::tree::NodeTree;

/// State shared between the façade and its dispatch closure.
struct Shared<K> {
    boundary: Cell<Option<K>>,
    enabled: Cell<bool>,
    handler: RefCell<Option<Handler<K>>>,
}

/// Outside-click behavior of one wrapped component instance.
pub struct OutsideClick<K> {
    id: ListenerId,
    config: Rc<OutsideClickConfig>,
    shared: Rc<Shared<K>>,
    source: Option<HandlerSource>,
    listening: bool,
    contexts: SmallVec<[K; 2]>,
}

impl<K: fmt::Debug + Copy> fmt::Debug for OutsideClick<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutsideClick")
            .field("id", &self.id)
            .field("boundary", &self.shared.boundary.get())
            .field("enabled", &self.shared.enabled.get())
            .field("listening", &self.listening)
            .field("source", &self.source)
            .field("contexts", &self.contexts)
            .field("config", &self.config)
            .finish()
    }
}

impl<K: Copy + Eq + fmt::Debug + 'static> OutsideClick<K> {
    /// Mount the behavior for `component`.
    ///
    /// Without a document (see [`ListenerHost::document`]) the instance is inert: no
    /// handler is resolved, nothing is ever registered, and every later call is a
    /// no-op. Otherwise the handler is resolved (failing with a [`ConfigError`]) and
    /// listening starts unless `config.disabled` is set.
    pub fn mount<C, H, T>(
        component: &C,
        factory: Option<&HandlerFactory<C, K>>,
        config: OutsideClickConfig,
        boundary: Option<K>,
        registry: &mut Registry<K>,
        host: &mut H,
        tree: &T,
    ) -> Result<Self, ConfigError>
    where
        C: Component<K> + ?Sized,
        H: ListenerHost<K> + ?Sized,
        T: NodeTree<Node = K> + ?Sized,
    {
        let id = registry.allocate();
        let listening = !config.disabled;
        let mut this = Self {
            id,
            config: Rc::new(config),
            shared: Rc::new(Shared {
                boundary: Cell::new(boundary),
                enabled: Cell::new(false),
                handler: RefCell::new(None),
            }),
            source: None,
            listening,
            contexts: SmallVec::new(),
        };

        if host.document().is_none() {
            debug!(id = id.get(), "no document available, outside clicks stay inert");
            return Ok(this);
        }

        let (handler, source) = resolve_handler(component, factory)?.into_parts();
        *this.shared.handler.borrow_mut() = Some(handler);
        this.source = Some(source);

        if boundary.is_none() {
            warn!(
                id = id.get(),
                component = component.name(),
                "no node is associated with the wrapped component; outside clicks are ignored until it renders one"
            );
        }

        if listening {
            this.attach(registry, host, tree);
        }
        Ok(this)
    }

    /// Listener id of this instance.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Configuration the instance was mounted with.
    pub fn config(&self) -> &OutsideClickConfig {
        &self.config
    }

    /// Current boundary node.
    pub fn boundary(&self) -> Option<K> {
        self.shared.boundary.get()
    }

    /// Where the handler was resolved from; `None` for inert instances.
    pub fn handler_source(&self) -> Option<HandlerSource> {
        self.source
    }

    /// Returns `true` if the instance was mounted without a document.
    pub fn is_inert(&self) -> bool {
        self.source.is_none()
    }

    /// Returns `true` while listeners are registered.
    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.get()
    }

    /// Returns `true` if the instance wants to listen, whether or not it currently can.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Document-like contexts the listeners are registered on, innermost first.
    pub fn contexts(&self) -> &[K] {
        &self.contexts
    }

    /// Start listening. Calling it while already enabled changes nothing.
    pub fn enable<H, T>(&mut self, registry: &mut Registry<K>, host: &mut H, tree: &T)
    where
        H: ListenerHost<K> + ?Sized,
        T: NodeTree<Node = K> + ?Sized,
    {
        self.listening = true;
        self.attach(registry, host, tree);
    }

    /// Stop listening. Calling it while already disabled changes nothing.
    pub fn disable<H>(&mut self, registry: &mut Registry<K>, host: &mut H)
    where
        H: ListenerHost<K> + ?Sized,
    {
        self.listening = false;
        self.detach(registry, host);
    }

    /// Follow a change of the `disable_on_click_outside` prop.
    ///
    /// Only edges act: a `true` → `false` change enables, `false` → `true` disables.
    pub fn set_disabled<H, T>(
        &mut self,
        disabled: bool,
        registry: &mut Registry<K>,
        host: &mut H,
        tree: &T,
    ) where
        H: ListenerHost<K> + ?Sized,
        T: NodeTree<Node = K> + ?Sized,
    {
        match (disabled, self.listening) {
            (true, true) => self.disable(registry, host),
            (false, false) => self.enable(registry, host, tree),
            _ => {}
        }
    }

    /// Refresh the boundary node after the wrapped component rendered.
    ///
    /// Losing the boundary unregisters everything while keeping the listening intent;
    /// getting it back registers again. A boundary that moved to different enclosing
    /// contexts is re-registered on the new ones.
    pub fn update<H, T>(
        &mut self,
        boundary: Option<K>,
        registry: &mut Registry<K>,
        host: &mut H,
        tree: &T,
    ) where
        H: ListenerHost<K> + ?Sized,
        T: NodeTree<Node = K> + ?Sized,
    {
        let previous = self.shared.boundary.replace(boundary);
        if self.is_inert() {
            return;
        }
        match boundary {
            None => {
                if previous.is_some() {
                    trace!(id = self.id.get(), "boundary node went away");
                }
                self.detach(registry, host);
            }
            Some(node) if self.listening => {
                if registry.contains(self.id) && previous != boundary {
                    let contexts = enclosing_contexts(tree, node);
                    if !contexts.is_empty() && contexts != self.contexts {
                        debug!(id = self.id.get(), "boundary moved to other contexts");
                        self.detach(registry, host);
                    }
                }
                self.attach(registry, host, tree);
            }
            Some(_) => {}
        }
    }

    /// Tear down: unregister everything and drop the handler.
    pub fn unmount<H>(mut self, registry: &mut Registry<K>, host: &mut H)
    where
        H: ListenerHost<K> + ?Sized,
    {
        self.disable(registry, host);
        self.shared.boundary.set(None);
        self.shared.handler.borrow_mut().take();
        debug!(id = self.id.get(), "unmounted");
    }

    fn attach<H, T>(&mut self, registry: &mut Registry<K>, host: &mut H, tree: &T)
    where
        H: ListenerHost<K> + ?Sized,
        T: NodeTree<Node = K> + ?Sized,
    {
        if self.is_inert() || registry.contains(self.id) {
            return;
        }
        let Some(boundary) = self.shared.boundary.get() else {
            return;
        };
        let Some(document) = host.document() else {
            return;
        };

        let mut contexts = enclosing_contexts(tree, boundary);
        if contexts.is_empty() {
            contexts.push(document);
        }

        let passive = registry.passive_supported(host);
        let mut registration = Registration::default();
        for &context in &contexts {
            let target = ListenerTarget::Context(context);
            for kind in self.config.event_kinds.iter() {
                let options = self.config.listener_options(kind, passive);
                match host.add_listener(target, kind, self.id, &options) {
                    Ok(()) => registration.listeners.push((target, kind)),
                    Err(err) => warn!(
                        id = self.id.get(),
                        kind = kind.name(),
                        ?context,
                        %err,
                        "skipping outside-click listener"
                    ),
                }
            }
        }

        if registration.listeners.is_empty() {
            warn!(id = self.id.get(), "no outside-click listener was accepted, staying disabled");
            return;
        }

        debug!(
            id = self.id.get(),
            kinds = self.config.event_kinds.len(),
            contexts = contexts.len(),
            listeners = registration.listeners.len(),
            "outside clicks enabled"
        );
        let dispatch = self.dispatch_fn();
        registry.insert(self.id, dispatch, registration);
        self.contexts = contexts;
        self.shared.enabled.set(true);
    }

    fn detach<H>(&mut self, registry: &mut Registry<K>, host: &mut H)
    where
        H: ListenerHost<K> + ?Sized,
    {
        self.shared.enabled.set(false);
        self.contexts.clear();
        let Some(registration) = registry.remove(self.id) else {
            return;
        };
        for &(target, kind) in &registration.listeners {
            host.remove_listener(target, kind, self.id);
        }
        debug!(
            id = self.id.get(),
            listeners = registration.listeners.len(),
            "outside clicks disabled"
        );
    }

    fn dispatch_fn(&self) -> DispatchFn<K> {
        let id = self.id;
        let shared = Rc::clone(&self.shared);
        let config = Rc::clone(&self.config);
        Box::new(
            move |event: &mut Interaction<K>, tree: &dyn NodeTree<Node = K>| {
                if !shared.enabled.get() {
                    trace!(id = id.get(), "disabled, ignoring interaction");
                    return DispatchOutcome::Disabled;
                }
                let Some(boundary) = shared.boundary.get() else {
                    trace!(id = id.get(), "no boundary node, ignoring interaction");
                    return DispatchOutcome::NoBoundary;
                };
                if !event.mark_handled(id) {
                    return DispatchOutcome::AlreadyHandled;
                }
                if config.prevent_default {
                    event.prevent_default();
                }
                if config.stop_propagation {
                    event.stop_propagation();
                }
                if config.exclude_scrollbar && clicked_scrollbar(tree, event) {
                    trace!(id = id.get(), "scrollbar press");
                    return DispatchOutcome::Scrollbar;
                }
                let containment =
                    locate(tree, boundary, event.origin(), config.ignore_class.as_deref());
                if !containment.is_outside() {
                    trace!(id = id.get(), ?containment, "interaction not outside");
                    return DispatchOutcome::Inside(containment);
                }
                trace!(id = id.get(), kind = event.kind.name(), "outside interaction");
                let Ok(mut handler) = shared.handler.try_borrow_mut() else {
                    trace!(id = id.get(), "handler already running");
                    return DispatchOutcome::HandlerUnavailable;
                };
                let Some(handler) = handler.as_mut() else {
                    return DispatchOutcome::HandlerUnavailable;
                };
                handler(&*event);
                DispatchOutcome::Outside
            },
        )
    }
}
