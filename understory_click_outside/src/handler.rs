// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-click handler resolution.
//!
//! A wrapped component can receive outside clicks through three sources, tried in
//! order:
//!
//! 1. A [`HandlerFactory`] supplied with the wrapper's configuration. It receives the
//!    component and must produce a handler; producing none is a configuration error.
//! 2. The component's own `handle_click_outside` method, exposed through
//!    [`Component::instance_handler`].
//! 3. A callback handed to the component by its parent, exposed through
//!    [`Component::prop_handler`].
//!
//! Resolution happens once at mount and fails closed.
//!
//! ```
//! use understory_click_outside::handler::{resolve_handler, Component, Handler, HandlerSource};
//!
//! struct Dropdown;
//! impl Component<u32> for Dropdown {
//!     fn name(&self) -> &str { "Dropdown" }
//!     fn prop_handler(&self) -> Option<Handler<u32>> {
//!         Some(Box::new(|_ev| {}))
//!     }
//! }
//!
//! let resolved = resolve_handler(&Dropdown, None).unwrap();
//! assert_eq!(resolved.source(), HandlerSource::PropCallback);
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::event::Interaction;

/// Callback invoked with the raw event when an interaction lands outside.
pub type Handler<K> = Box<dyn FnMut(&Interaction<K>)>;

/// Configuration-supplied handler factory.
///
/// Returning `None` means the factory did not produce a callable handler.
pub type HandlerFactory<C, K> = Box<dyn Fn(&C) -> Option<Handler<K>>>;

/// The component being wrapped, as far as handler resolution is concerned.
pub trait Component<K> {
    /// Display name, used in error messages.
    fn name(&self) -> &str;

    /// The component's `handle_click_outside` method, bound to its state.
    fn instance_handler(&self) -> Option<Handler<K>> {
        None
    }

    /// A `handle_click_outside` callback passed in by the parent.
    fn prop_handler(&self) -> Option<Handler<K>> {
        None
    }
}

/// Which source a handler was resolved from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandlerSource {
    /// Configuration-supplied factory.
    ConfigFactory,
    /// The component's own method.
    InstanceMethod,
    /// A callback passed in by the parent.
    PropCallback,
}

/// A handler together with the source it came from.
pub struct ResolvedHandler<K> {
    handler: Handler<K>,
    source: HandlerSource,
}

impl<K> ResolvedHandler<K> {
    /// Where the handler came from.
    pub fn source(&self) -> HandlerSource {
        self.source
    }

    /// Invoke the handler.
    pub fn call(&mut self, event: &Interaction<K>) {
        (self.handler)(event);
    }

    pub(crate) fn into_parts(self) -> (Handler<K>, HandlerSource) {
        (self.handler, self.source)
    }
}

impl<K> fmt::Debug for ResolvedHandler<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedHandler")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Fatal misconfiguration detected at mount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No factory, method, or prop callback was available.
    MissingHandler {
        /// Name of the wrapped component.
        component: String,
    },
    /// The configured factory produced no handler.
    FactoryNotCallable {
        /// Name of the wrapped component.
        component: String,
    },
}

impl ConfigError {
    /// Name of the wrapped component the error is about.
    pub fn component(&self) -> &str {
        match self {
            Self::MissingHandler { component } | Self::FactoryNotCallable { component } => {
                component
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHandler { component } => write!(
                f,
                "OnClickOutside({component}) lacks a handle_click_outside(event) function for processing outside click events"
            ),
            Self::FactoryNotCallable { component } => write!(
                f,
                "OnClickOutside({component}) lacks a function for processing outside click events specified by the handler factory"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Resolve the outside-click handler for `component`.
///
/// See the [module docs](self) for the resolution order.
pub fn resolve_handler<C: Component<K> + ?Sized, K>(
    component: &C,
    factory: Option<&HandlerFactory<C, K>>,
) -> Result<ResolvedHandler<K>, ConfigError> {
    let (handler, source) = if let Some(factory) = factory {
        let handler = factory(component).ok_or_else(|| ConfigError::FactoryNotCallable {
            component: component.name().into(),
        })?;
        (handler, HandlerSource::ConfigFactory)
    } else if let Some(handler) = component.instance_handler() {
        (handler, HandlerSource::InstanceMethod)
    } else if let Some(handler) = component.prop_handler() {
        (handler, HandlerSource::PropCallback)
    } else {
        return Err(ConfigError::MissingHandler {
            component: component.name().into(),
        });
    };
    Ok(ResolvedHandler { handler, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use core::cell::Cell;
    use kurbo::Point;

    use crate::event::EventKind;

    #[derive(Default)]
    struct Widget {
        method: bool,
        prop: bool,
        calls: Rc<Cell<u32>>,
    }

    impl Component<u32> for Widget {
        fn name(&self) -> &str {
            "Widget"
        }

        fn instance_handler(&self) -> Option<Handler<u32>> {
            let calls = self.calls.clone();
            self.method
                .then(|| Box::new(move |_: &Interaction<u32>| calls.set(calls.get() + 1)) as _)
        }

        fn prop_handler(&self) -> Option<Handler<u32>> {
            self.prop.then(|| Box::new(|_: &Interaction<u32>| {}) as _)
        }
    }

    #[test]
    fn factory_wins_over_method_and_prop() {
        let widget = Widget {
            method: true,
            prop: true,
            ..Widget::default()
        };
        let factory: HandlerFactory<Widget, u32> =
            Box::new(|_: &Widget| -> Option<Handler<u32>> {
                Some(Box::new(|_: &Interaction<u32>| {}))
            });
        let resolved = resolve_handler(&widget, Some(&factory)).unwrap();
        assert_eq!(resolved.source(), HandlerSource::ConfigFactory);
    }

    #[test]
    fn factory_without_handler_is_fatal() {
        let widget = Widget {
            method: true,
            ..Widget::default()
        };
        let factory: HandlerFactory<Widget, u32> = Box::new(|_: &Widget| None);
        let err = resolve_handler(&widget, Some(&factory)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::FactoryNotCallable {
                component: "Widget".into()
            }
        );
    }

    #[test]
    fn method_wins_over_prop_and_keeps_state() {
        let widget = Widget {
            method: true,
            prop: true,
            ..Widget::default()
        };
        let mut resolved = resolve_handler(&widget, None).unwrap();
        assert_eq!(resolved.source(), HandlerSource::InstanceMethod);
        resolved.call(&Interaction::new(EventKind::Click, 1, Point::ZERO));
        assert_eq!(widget.calls.get(), 1);
    }

    #[test]
    fn prop_is_last_resort() {
        let widget = Widget {
            prop: true,
            ..Widget::default()
        };
        let resolved = resolve_handler(&widget, None).unwrap();
        assert_eq!(resolved.source(), HandlerSource::PropCallback);
    }

    #[test]
    fn nothing_to_resolve_names_component() {
        let err = resolve_handler(&Widget::default(), None).unwrap_err();
        assert_eq!(err.component(), "Widget");
        assert!(err.to_string().starts_with("OnClickOutside(Widget) lacks"));
    }
}
