// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tooltip --heading-base-level=0

//! Understory Tooltip: headless tooltip placement, outlines, and lifecycle.
//!
//! This crate computes where a tooltip goes relative to an anchor element,
//! builds its speech-bubble background, and runs its show/hide cycle. It
//! focuses on:
//! - Placement on one side of the anchor with start/center/end alignment and
//!   a gap ([`compute_position`]).
//! - Keeping the tooltip inside the container width ([`adjust_for_viewport`]).
//! - A rounded outline with an arrow notch facing the anchor
//!   ([`build_bubble_path`]).
//! - A lifecycle state machine with deferred attach, a second measurement pass
//!   when the width had to change, enter/exit animations, auto-hide, and
//!   click-to-hide ([`TooltipController`]).
//!
//! It does **not** own a view tree, an event loop, or a renderer. Callers are
//! expected to:
//! - Implement [`TooltipContainer`] and [`AnchorSource`] for their toolkit.
//! - Lay the content out and report its size with
//!   [`TooltipController::on_measured`].
//! - Call [`TooltipController::tick`] from their event loop and draw
//!   [`TooltipController::frame`], for example by filling
//!   [`TooltipFrame::bubble_in_container`] with the configured color.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_tooltip::{
//!     LifecycleState, Position, SizeHint, TooltipConfig, TooltipContainer, TooltipController,
//! };
//!
//! #[derive(Default)]
//! struct Window {
//!     attached: bool,
//! }
//!
//! impl TooltipContainer for Window {
//!     fn bounds(&self) -> Option<Size> {
//!         Some(Size::new(360.0, 640.0))
//!     }
//!     fn attach(&mut self, _hint: SizeHint) {
//!         self.attached = true;
//!     }
//!     fn detach(&mut self) {
//!         self.attached = false;
//!     }
//! }
//!
//! let anchor = Rect::new(100.0, 200.0, 200.0, 250.0);
//! let config = TooltipConfig::default()
//!     .position(Position::Bottom)
//!     .distance_with_view(10.0)
//!     .text("Copied!");
//! let mut tooltip = TooltipController::new(config, Window::default(), anchor);
//!
//! tooltip.show(0).unwrap();
//! tooltip.tick(100); // the surface is attached after the settle delay
//! assert!(tooltip.container().attached);
//!
//! tooltip.on_measured(Size::new(80.0, 40.0), 100);
//! assert_eq!(tooltip.state(), LifecycleState::Visible);
//!
//! let frame = tooltip.frame(500).unwrap();
//! assert_eq!(frame.origin, Point::new(110.0, 260.0));
//! assert_eq!(frame.opacity, 1.0);
//! ```
//!
//! ## Geometry only
//!
//! The geometry functions are usable without the controller:
//!
//! ```rust
//! use kurbo::{Insets, Point, Rect, RoundedRectRadii};
//! use understory_tooltip::{ArrowGeometry, Edge, Position, build_bubble_path};
//!
//! let path = build_bubble_path(
//!     Rect::new(0.0, 0.0, 120.0, 60.0),
//!     RoundedRectRadii::from_single_radius(8.0),
//!     Position::Top,
//!     Some(Point::new(60.0, 90.0)),
//!     ArrowGeometry::default(),
//!     Insets::ZERO,
//! );
//! assert_eq!(path.notch().unwrap().edge, Edge::Bottom);
//! ```
//!
//! ## Logging
//!
//! Lifecycle transitions are reported through `tracing` at `debug` level,
//! scroll and timer details at `trace`. The crate installs no subscriber.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animation;
mod bubble;
mod config;
mod controller;
mod host;
mod placement;
mod scroll;
mod timer;

pub use animation::{
    AnimationPhase, AnimationSample, FadeAnimation, InstantAnimation, TooltipAnimation,
};
pub use bubble::{ArrowGeometry, BubblePath, Notch, bubble_bounds, build_bubble_path};
pub use config::{
    Border, Listener, SHADOW_PADDING, Shadow, TextGravity, TooltipConfig, TooltipContent,
};
pub use controller::{
    LifecycleState, SHOW_SETTLE_DELAY_MS, ShowError, TooltipController, TooltipFrame, TooltipHandle,
};
pub use host::{AnchorSource, SizeHint, TooltipContainer};
pub use placement::{
    Align, Edge, Position, SCREEN_EDGE_MARGIN, ViewportFit, adjust_for_viewport, align_offset,
    compute_position,
};
pub use scroll::ScrollSync;
pub use timer::Deadline;
