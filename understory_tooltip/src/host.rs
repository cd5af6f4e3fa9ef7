// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits implemented by the host UI.
//!
//! The controller never walks a view tree. The caller resolves the container
//! and the anchor once and passes them to
//! [`TooltipController::new`](crate::TooltipController::new).

use kurbo::{Rect, Size};

/// How the host should size the tooltip surface when attaching it.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum SizeHint {
    /// Let the content decide both dimensions.
    #[default]
    WrapContent,
    /// Lay the content out at this width; height follows the content.
    FixedWidth(f64),
}

/// The container the tooltip surface is drawn into.
pub trait TooltipContainer {
    /// Size of the container, or `None` when it cannot host a tooltip yet
    /// (for example, it is not attached to a window).
    fn bounds(&self) -> Option<Size>;

    /// Adds the surface, or re-lays it out with a new hint if it is already
    /// attached. The host answers with
    /// [`TooltipController::on_measured`](crate::TooltipController::on_measured)
    /// once the surface has a size.
    fn attach(&mut self, hint: SizeHint);

    /// Removes the surface.
    fn detach(&mut self);
}

/// The element a tooltip points at.
pub trait AnchorSource {
    /// Current bounds in container coordinates, or `None` if the element is
    /// gone or not laid out.
    fn anchor_bounds(&self) -> Option<Rect>;
}

impl AnchorSource for Rect {
    fn anchor_bounds(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl AnchorSource for Option<Rect> {
    fn anchor_bounds(&self) -> Option<Rect> {
        *self
    }
}

impl<A: AnchorSource + ?Sized> AnchorSource for &A {
    fn anchor_bounds(&self) -> Option<Rect> {
        (**self).anchor_bounds()
    }
}
