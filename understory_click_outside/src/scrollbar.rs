// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollbar hit detection.
//!
//! Pressing a scrollbar delivers a pointer-down event whose target is the scrolled
//! element (or the document for the viewport scrollbar), so it would otherwise count
//! as an outside click. When `exclude_scrollbar` is configured these checks suppress
//! it.

use kurbo::{Point, Size};

use crate::event::Interaction;
use crate::tree::{NodeTree, ScrollMetrics};

/// Returns `true` if `position` lies on the root viewport's scrollbars.
///
/// Anything at or beyond the viewport's client width or height is scrollbar area.
pub fn clicked_viewport_scrollbar(viewport: Size, position: Point) -> bool {
    viewport.width <= position.x || viewport.height <= position.y
}

/// Returns `true` if `position` lies in one of a scroll container's scrollbar gutters.
pub fn clicked_container_scrollbar(metrics: &ScrollMetrics, position: Point) -> bool {
    let b = metrics.border_box;
    let on_vertical = metrics.vertical_gutter() > 0.0
        && position.x >= b.x0 + metrics.client.width
        && position.x < b.x1
        && position.y >= b.y0
        && position.y < b.y1;
    let on_horizontal = metrics.horizontal_gutter() > 0.0
        && position.y >= b.y0 + metrics.client.height
        && position.y < b.y1
        && position.x >= b.x0
        && position.x < b.x1;
    on_vertical || on_horizontal
}

/// Returns `true` if `event` landed on the viewport's or the clicked container's
/// scrollbar.
pub fn clicked_scrollbar<T: NodeTree + ?Sized>(tree: &T, event: &Interaction<T::Node>) -> bool {
    if let Some(viewport) = tree.viewport_size()
        && clicked_viewport_scrollbar(viewport, event.position)
    {
        return true;
    }
    tree.scroll_metrics(event.origin())
        .is_some_and(|metrics| clicked_container_scrollbar(&metrics, event.position))
}
