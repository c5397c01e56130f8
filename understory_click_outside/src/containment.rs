// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region-membership test: did an interaction originate outside a boundary node?
//!
//! ## Walk
//!
//! Starting at the interaction's origin, [`locate`] follows parent links toward the
//! document root:
//!
//! - Reaching the boundary node means the interaction was inside ([`Containment::Boundary`]).
//! - Passing a node (or its corresponding element) that carries the ignore class
//!   exempts the interaction ([`Containment::Ignored`]).
//! - At the root of an isolated subtree the walk hops to the subtree's host and
//!   continues in the enclosing tree.
//! - Ending at the top-level document means the interaction was outside
//!   ([`Containment::Outside`]).
//! - Ending at any other root means the origin was detached from the visible tree
//!   while the event was in flight ([`Containment::Detached`]). Outside-ness cannot be
//!   decided, so it is reported as not outside.
//!
//! ## Minimal example
//!
//! ```
//! use understory_click_outside::containment::{locate, Containment};
//! use understory_click_outside::tree::NodeTree;
//!
//! // 0 = document, 1 = body, 2 = boundary, 3 = child of boundary, 4 = sibling.
//! struct Doc;
//! impl NodeTree for Doc {
//!     type Node = u32;
//!     fn parent(&self, node: u32) -> Option<u32> {
//!         match node {
//!             1 => Some(0),
//!             2 | 4 => Some(1),
//!             3 => Some(2),
//!             _ => None,
//!         }
//!     }
//!     fn has_class(&self, _: u32, _: &str) -> bool { false }
//!     fn is_document(&self, node: u32) -> bool { node == 0 }
//! }
//!
//! assert_eq!(locate(&Doc, 2, 3, None), Containment::Boundary);
//! assert_eq!(locate(&Doc, 2, 4, None), Containment::Outside);
//! ```

use smallvec::SmallVec;

use crate::event::Interaction;
use crate::tree::{NodeTree, carries_class};

/// Where an interaction origin sits relative to a boundary node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Containment {
    /// The origin is the boundary node or one of its descendants.
    Boundary,
    /// The origin or an ancestor carries the ignore class.
    Ignored,
    /// The walk reached the top-level document without meeting the boundary.
    Outside,
    /// The walk reached a root that is not the document.
    Detached,
}

impl Containment {
    /// Returns `true` only for [`Containment::Outside`].
    pub const fn is_outside(self) -> bool {
        matches!(self, Self::Outside)
    }
}

/// Classify `origin` relative to `boundary`.
///
/// `ignore_class` of `None` disables the ignore marker.
pub fn locate<T: NodeTree + ?Sized>(
    tree: &T,
    boundary: T::Node,
    origin: T::Node,
    ignore_class: Option<&str>,
) -> Containment {
    if origin == boundary {
        return Containment::Boundary;
    }

    let mut current = origin;
    loop {
        if current == boundary {
            return Containment::Boundary;
        }
        if let Some(class) = ignore_class
            && carries_class(tree, current, class)
        {
            return Containment::Ignored;
        }
        match tree.parent(current).or_else(|| tree.host(current)) {
            Some(next) => current = next,
            None if tree.is_document(current) => return Containment::Outside,
            None => return Containment::Detached,
        }
    }
}

/// Returns `true` if `event` originated outside `boundary`.
///
/// Scrollbar exclusion is applied by the dispatcher, not here.
pub fn is_outside<T: NodeTree + ?Sized>(
    tree: &T,
    boundary: T::Node,
    event: &Interaction<T::Node>,
    ignore_class: Option<&str>,
) -> bool {
    locate(tree, boundary, event.origin(), ignore_class).is_outside()
}

/// Every document-like context enclosing `node`, innermost first.
///
/// A context is either the top-level document or the root of an isolated subtree.
/// Listeners must be registered on each of them to observe interactions that happen
/// inside isolated subtrees.
pub fn enclosing_contexts<T: NodeTree + ?Sized>(tree: &T, node: T::Node) -> SmallVec<[T::Node; 2]> {
    let mut contexts = SmallVec::new();
    let mut current = node;
    loop {
        while let Some(parent) = tree.parent(current) {
            current = parent;
        }
        let host = tree.host(current);
        if host.is_some() || tree.is_document(current) {
            contexts.push(current);
        }
        match host {
            Some(host) => current = host,
            None => return contexts,
        }
    }
}
