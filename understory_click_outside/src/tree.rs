// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node graph accessors used by the region-membership test.
//!
//! The crate never owns a node graph. Hosts implement [`NodeTree`] over whatever
//! they already have (a DOM binding, a widget tree, a box tree) and the containment
//! walk, context discovery, and scrollbar checks only go through these accessors.

use core::fmt::Debug;

use kurbo::{Rect, Size};

/// Scroll geometry of a scroll container.
///
/// `border_box` is the container's outer box in client coordinates (offset width and
/// height). `client` is the size of its content box, which excludes any scrollbar
/// gutter. A gutter exists on an axis when the border box is larger than the client
/// size on that axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Outer box in client coordinates.
    pub border_box: Rect,
    /// Inner client size, excluding scrollbar gutters.
    pub client: Size,
}

impl ScrollMetrics {
    /// Width reserved for a vertical scrollbar, or `0.0` when there is none.
    pub fn vertical_gutter(&self) -> f64 {
        (self.border_box.width() - self.client.width).max(0.0)
    }

    /// Height reserved for a horizontal scrollbar, or `0.0` when there is none.
    pub fn horizontal_gutter(&self) -> f64 {
        (self.border_box.height() - self.client.height).max(0.0)
    }
}

/// Read-only view of a node graph with isolated subtrees.
///
/// Nodes are small copyable keys. An isolated subtree (shadow-root-like) has a root
/// node with no parent and a [`host`](NodeTree::host) node in the enclosing tree.
pub trait NodeTree {
    /// Node key.
    type Node: Copy + Eq + Debug;

    /// Parent of `node`, or `None` at a root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// For the root of an isolated subtree, the node hosting it.
    fn host(&self, node: Self::Node) -> Option<Self::Node> {
        let _ = node;
        None
    }

    /// For foreign-markup nodes without a class list of their own, the element whose
    /// class list stands in for theirs.
    fn corresponding_element(&self, node: Self::Node) -> Option<Self::Node> {
        let _ = node;
        None
    }

    /// Returns `true` if `node` carries `class` in its class list.
    ///
    /// Nodes without a class list (documents, text) return `false`.
    fn has_class(&self, node: Self::Node, class: &str) -> bool;

    /// Returns `true` only for the top-level document node.
    fn is_document(&self, node: Self::Node) -> bool;

    /// Client size of the root viewport, if known.
    fn viewport_size(&self) -> Option<Size> {
        None
    }

    /// Scroll geometry of `node` if it is a scroll container.
    fn scroll_metrics(&self, node: Self::Node) -> Option<ScrollMetrics> {
        let _ = node;
        None
    }
}

/// Class-list lookup with the corresponding-element fallback.
pub(crate) fn carries_class<T: NodeTree + ?Sized>(tree: &T, node: T::Node, class: &str) -> bool {
    match tree.corresponding_element(node) {
        Some(element) => tree.has_class(element, class),
        None => tree.has_class(node, class),
    }
}
