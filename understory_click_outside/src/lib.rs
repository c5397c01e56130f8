// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_click_outside --heading-base-level=0

//! Understory Click Outside: detect interactions that land outside a component.
//!
//! Menus, popovers, and dropdowns close when the user presses somewhere else. This
//! crate answers "was that press outside?" against any node graph, and keeps the
//! listener bookkeeping needed to ask the question for every mounted component.
//!
//! ## Pieces
//!
//! - [`containment`]: the region-membership test. Walks from the event origin toward
//!   the document, hopping from isolated subtree roots to their hosts, honoring an
//!   ignore marker class, and treating detached origins as not outside.
//! - [`scrollbar`]: viewport and container scrollbar hit checks, so presses on a
//!   scrollbar can be excluded.
//! - [`OutsideClick`]: the per-instance façade a host component owns and forwards its
//!   lifecycle to. It resolves the handler, registers one dispatch closure per
//!   instance on every enclosing document-like context, and enables/disables
//!   idempotently.
//! - [`Registry`]: the owned id → dispatch closure map, plus the cached
//!   [passive-listener probe](passive).
//!
//! The crate does not assume any particular UI framework or event system. Hosts plug
//! in through three traits:
//!
//! - [`NodeTree`]: parent/host links, class lists, document and scroll geometry.
//! - [`ListenerHost`]: listener registration on document-like targets.
//! - [`Component`]: where the outside-click handler comes from.
//!
//! ## Workflow
//!
//! 1) Keep one [`Registry`] next to your document.
//! 2) On mount, create an [`OutsideClick`] with [`OutsideClick::mount`]. Misconfigured
//!    components (no handler) fail right there with a [`ConfigError`].
//! 3) After each render call [`OutsideClick::update`] with the current boundary node.
//! 4) When the platform delivers an event to a registration made by the crate, call
//!    [`Registry::dispatch`] with the registration's [`ListenerId`].
//! 5) On unmount call [`OutsideClick::unmount`].
//!
//! ## Region test
//!
//! ```
//! use kurbo::Point;
//! use understory_click_outside::{EventKind, Interaction, NodeTree, is_outside};
//!
//! // 0 = document, 1 = body, 2 = popover, 3 = button in popover, 4 = page content.
//! struct Page;
//! impl NodeTree for Page {
//!     type Node = u32;
//!     fn parent(&self, node: u32) -> Option<u32> {
//!         match node {
//!             1 => Some(0),
//!             2 | 4 => Some(1),
//!             3 => Some(2),
//!             _ => None,
//!         }
//!     }
//!     fn has_class(&self, node: u32, class: &str) -> bool {
//!         node == 4 && class == "keep-open"
//!     }
//!     fn is_document(&self, node: u32) -> bool { node == 0 }
//! }
//!
//! let press = |target| Interaction::new(EventKind::MouseDown, target, Point::ZERO);
//! assert!(!is_outside(&Page, 2, &press(3), None));
//! assert!(is_outside(&Page, 2, &press(4), None));
//! assert!(!is_outside(&Page, 2, &press(4), Some("keep-open")));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to Kurbo and `tracing`.
//! - `libm`: `no_std` math for Kurbo.
//!
//! Diagnostics are emitted through `tracing`; nothing is logged unless the host
//! installs a subscriber.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod containment;
pub mod event;
pub mod handler;
pub mod host;
pub mod passive;
pub mod registry;
pub mod scrollbar;
pub mod tree;

mod outside_click;

pub use config::{DEFAULT_IGNORE_CLASS, OutsideClickConfig};
pub use containment::{Containment, is_outside, locate};
pub use event::{EventFlags, EventKind, EventKinds, Interaction, ListenerId};
pub use handler::{Component, ConfigError, Handler, HandlerFactory, HandlerSource};
pub use host::{HostError, ListenerHost, ListenerOptions, ListenerTarget};
pub use outside_click::OutsideClick;
pub use registry::{DispatchOutcome, Registry};
pub use tree::{NodeTree, ScrollMetrics};
