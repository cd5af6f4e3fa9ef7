// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Show/hide lifecycle of a single tooltip.
//!
//! ## Usage
//!
//! 1) Build a [`TooltipConfig`] and a [`TooltipController`] with the host's
//!    container and anchor.
//! 2) Call [`TooltipController::show`]. After [`SHOW_SETTLE_DELAY_MS`] a
//!    [`TooltipController::tick`] captures the anchor and attaches the surface.
//! 3) Report the measured surface size with [`TooltipController::on_measured`].
//!    The host may be asked to attach again with a fixed width, followed by a
//!    second measurement.
//! 4) Keep calling [`TooltipController::tick`] from the event loop; draw
//!    [`TooltipController::frame`] while it returns `Some`.
//! 5) Forward taps and scroll offsets with [`TooltipController::on_tap`] and
//!    [`TooltipController::on_scroll`].
//!
//! One controller covers one display cycle. Once [`LifecycleState::Removed`]
//! is reached, create a new controller to show the tooltip again.

use alloc::rc::Rc;
use core::cell::Cell;

use kurbo::{Point, Rect, Size, Vec2};
use tracing::{debug, trace};

use crate::animation::{
    AnimationPhase, AnimationSample, FadeAnimation, Playback, TooltipAnimation,
};
use crate::bubble::{BubblePath, bubble_bounds, build_bubble_path};
use crate::config::{Listener, SHADOW_PADDING, TooltipConfig};
use crate::host::{AnchorSource, SizeHint, TooltipContainer};
use crate::placement::{
    Align, SCREEN_EDGE_MARGIN, ViewportFit, adjust_for_viewport, compute_position,
};
use crate::scroll::ScrollSync;
use crate::timer::Deadline;

/// Delay between [`TooltipController::show`] and attaching the surface, so the
/// host layout can settle after the triggering input.
pub const SHOW_SETTLE_DELAY_MS: u64 = 100;

/// Where a tooltip is in its display cycle.
///
/// States are ordered; a cycle only moves forward, except for one extra
/// `Positioned -> Measuring` pass after a viewport adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LifecycleState {
    /// Not attached. [`TooltipController::show`] may be pending.
    #[default]
    Unmounted,
    /// Attached, waiting for the host to report the surface size.
    Measuring,
    /// Size known, placement being computed.
    Positioned,
    /// On screen. The enter animation may still be running.
    Visible,
    /// Exit animation running.
    Dismissing,
    /// Detached. Terminal.
    Removed,
}

/// Why [`TooltipController::show`] did nothing.
///
/// Tooltips are not critical UI; callers are free to ignore this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShowError {
    /// The container cannot host a tooltip yet.
    #[error("tooltip container is not available")]
    HostUnavailable,
    /// This controller has already been shown.
    #[error("tooltip was already shown")]
    AlreadyShown,
}

/// Close-request token returned by [`TooltipController::show`].
///
/// Clones share the request. The controller honors it on its next call.
#[derive(Clone, Debug, Default)]
pub struct TooltipHandle {
    close_requested: Rc<Cell<bool>>,
}

impl TooltipHandle {
    /// Asks the tooltip to close.
    pub fn close(&self) {
        self.close_requested.set(true);
    }

    /// Returns `true` once [`TooltipHandle::close`] has been called.
    #[must_use]
    pub fn is_close_requested(&self) -> bool {
        self.close_requested.get()
    }
}

/// Everything needed to draw the tooltip at one instant.
#[derive(Clone, Copy, Debug)]
pub struct TooltipFrame<'a> {
    /// Top-left of the surface in container coordinates, including scroll and
    /// animation offsets.
    pub origin: Point,
    /// Measured surface size.
    pub size: Size,
    /// Background outline in surface-local coordinates.
    pub bubble: &'a BubblePath,
    /// Opacity from the running animation.
    pub opacity: f64,
    /// Paint and content options.
    pub config: &'a TooltipConfig,
}

impl TooltipFrame<'_> {
    /// Surface rectangle in container coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Background outline in container coordinates.
    #[must_use]
    pub fn bubble_in_container(&self) -> BubblePath {
        self.bubble.translated(self.origin.to_vec2())
    }
}

#[derive(Clone, Debug)]
struct Placement {
    origin: Point,
    size: Size,
    bubble: BubblePath,
}

/// Horizontal fit decided on the first measurement pass.
#[derive(Clone, Copy, Debug)]
struct Reference {
    rect: Rect,
    align: Align,
}

/// Drives one tooltip from [`show`](Self::show) to removal.
///
/// All methods take the current time in milliseconds from a clock of the
/// caller's choosing; only differences matter.
#[derive(Debug)]
pub struct TooltipController<C, N, A = FadeAnimation> {
    config: TooltipConfig,
    container: C,
    anchor_source: N,
    animation: A,
    state: LifecycleState,
    handle: TooltipHandle,
    attach_timer: Deadline,
    auto_hide: Deadline,
    anchor: Option<Rect>,
    viewport: Size,
    reference: Option<Reference>,
    placement: Option<Placement>,
    playback: Option<Playback>,
    exit_queued: bool,
    scroll: ScrollSync,
    scroll_shift: f64,
}

impl<C: TooltipContainer, N: AnchorSource> TooltipController<C, N> {
    /// Creates a controller with the default fade animation.
    ///
    /// `container` and `anchor` are resolved by the caller and used for the
    /// whole cycle.
    pub fn new(config: TooltipConfig, container: C, anchor: N) -> Self {
        Self {
            config,
            container,
            anchor_source: anchor,
            animation: FadeAnimation::default(),
            state: LifecycleState::Unmounted,
            handle: TooltipHandle::default(),
            attach_timer: Deadline::default(),
            auto_hide: Deadline::default(),
            anchor: None,
            viewport: Size::ZERO,
            reference: None,
            placement: None,
            playback: None,
            exit_queued: false,
            scroll: ScrollSync::default(),
            scroll_shift: 0.0,
        }
    }
}

impl<C: TooltipContainer, N: AnchorSource, A: TooltipAnimation> TooltipController<C, N, A> {
    /// Replaces the animation.
    pub fn with_animation<B: TooltipAnimation>(self, animation: B) -> TooltipController<C, N, B> {
        TooltipController {
            config: self.config,
            container: self.container,
            anchor_source: self.anchor_source,
            animation,
            state: self.state,
            handle: self.handle,
            attach_timer: self.attach_timer,
            auto_hide: self.auto_hide,
            anchor: self.anchor,
            viewport: self.viewport,
            reference: self.reference,
            placement: self.placement,
            playback: self.playback,
            exit_queued: self.exit_queued,
            scroll: self.scroll,
            scroll_shift: self.scroll_shift,
        }
    }

    /// Sets the scroll offset of the anchor's scrollable ancestor at show
    /// time, so the first [`on_scroll`](Self::on_scroll) already moves the
    /// tooltip.
    pub fn with_scroll_baseline(mut self, offset: f64) -> Self {
        self.scroll = ScrollSync::with_baseline(offset);
        self
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// Edits the configuration.
    ///
    /// Placement is computed once the surface has been measured; later edits
    /// to position or alignment apply on the next [`relayout`](Self::relayout).
    pub fn configure(&mut self, edit: impl FnOnce(&mut TooltipConfig)) {
        edit(&mut self.config);
    }

    /// Anchor bounds captured when the surface was attached.
    #[must_use]
    pub fn anchor(&self) -> Option<Rect> {
        self.anchor
    }

    /// The container.
    #[must_use]
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutable access to the container.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Starts the display cycle.
    ///
    /// The surface is attached by the first [`tick`](Self::tick) at least
    /// [`SHOW_SETTLE_DELAY_MS`] later.
    pub fn show(&mut self, now: u64) -> Result<TooltipHandle, ShowError> {
        if self.state != LifecycleState::Unmounted || self.attach_timer.is_armed() {
            return Err(ShowError::AlreadyShown);
        }
        if self.container.bounds().is_none() {
            debug!("tooltip container unavailable; show ignored");
            return Err(ShowError::HostUnavailable);
        }
        self.attach_timer.arm(now, SHOW_SETTLE_DELAY_MS);
        debug!(now, "tooltip show scheduled");
        Ok(self.handle.clone())
    }

    /// Advances timers and animations.
    pub fn tick(&mut self, now: u64) {
        self.poll_close_request(now);
        if self.attach_timer.fire(now) {
            self.attach();
        }
        if let Some(playback) = self.playback
            && playback.is_finished(now)
        {
            self.complete_animation(now);
        }
        if self.auto_hide.fire(now) {
            debug!(now, "tooltip auto-hide elapsed");
            self.close(now);
        }
    }

    fn attach(&mut self) {
        let Some(viewport) = self.container.bounds() else {
            debug!("tooltip container went away before attach");
            return;
        };
        self.viewport = viewport;
        self.anchor = self.anchor_source.anchor_bounds();
        trace!(anchor = ?self.anchor, ?viewport, "tooltip anchor captured");
        self.container.attach(SizeHint::WrapContent);
        self.transition(LifecycleState::Measuring);
    }

    /// Reports the measured surface size.
    ///
    /// While measuring, this places the tooltip; after that it behaves like
    /// [`relayout`](Self::relayout).
    pub fn on_measured(&mut self, size: Size, now: u64) {
        self.poll_close_request(now);
        match self.state {
            LifecycleState::Measuring => self.measured(size, now),
            LifecycleState::Positioned | LifecycleState::Visible | LifecycleState::Dismissing => {
                self.relayout(size);
            }
            LifecycleState::Unmounted | LifecycleState::Removed => {}
        }
    }

    fn measured(&mut self, size: Size, now: u64) {
        if self.anchor.is_none() {
            self.anchor = self.anchor_source.anchor_bounds();
        }
        let Some(anchor) = self.anchor else {
            trace!("tooltip anchor not positionable yet");
            return;
        };
        self.transition(LifecycleState::Positioned);

        let reference = match self.reference {
            // The surface was re-attached with a fixed width that already fits.
            Some(reference) if self.config.position.is_horizontal() => reference,
            // Wrapped content may have changed width; shift against it again.
            Some(_) => {
                let reference = self.fit(anchor, size).0;
                self.reference = Some(reference);
                reference
            }
            None => {
                let (reference, fit) = self.fit(anchor, size);
                self.reference = Some(reference);
                if fit.changed {
                    let hint = if self.config.position.is_horizontal() {
                        SizeHint::FixedWidth(fit.width.max(0.0))
                    } else {
                        SizeHint::WrapContent
                    };
                    debug!(?hint, "tooltip adjusted for viewport; measuring again");
                    self.container.attach(hint);
                    self.transition(LifecycleState::Measuring);
                    return;
                }
                reference
            }
        };

        self.placement = Some(self.place(anchor, reference, size));
        self.transition(LifecycleState::Visible);
        if self.config.auto_hide {
            self.auto_hide.arm(now, self.config.duration_ms);
        }
        self.start_playback(AnimationPhase::Enter, now);
    }

    fn fit(&self, anchor: Rect, size: Size) -> (Reference, ViewportFit) {
        let fit = adjust_for_viewport(
            anchor,
            size,
            self.config.position,
            self.config.align,
            self.viewport.width,
            SCREEN_EDGE_MARGIN,
            self.config.distance_with_view,
        );
        let reference = Reference {
            rect: fit.anchor,
            align: fit.align_or(self.config.align),
        };
        (reference, fit)
    }

    fn place(&self, anchor: Rect, reference: Reference, size: Size) -> Placement {
        let origin = compute_position(
            reference.rect,
            size,
            self.config.position,
            reference.align,
            self.config.distance_with_view,
        );
        let bubble = build_bubble_path(
            bubble_bounds(size, SHADOW_PADDING),
            self.config.radii(),
            self.config.position,
            Some(anchor.center() - origin.to_vec2()),
            self.config.arrow(),
            self.config.margin,
        );
        Placement {
            origin,
            size,
            bubble,
        }
    }

    /// Recomputes placement and outline from the captured anchor with the
    /// current configuration.
    ///
    /// The surface is not re-attached, so a width reduction that would be
    /// needed for the new placement is not applied.
    pub fn relayout(&mut self, size: Size) {
        if !matches!(
            self.state,
            LifecycleState::Positioned | LifecycleState::Visible | LifecycleState::Dismissing
        ) {
            return;
        }
        let Some(anchor) = self.anchor else {
            return;
        };
        let reference = self.fit(anchor, size).0;
        self.reference = Some(reference);
        self.placement = Some(self.place(anchor, reference, size));
        trace!(?size, "tooltip relayout");
    }

    /// Requests dismissal.
    ///
    /// - Before the surface is attached: cancels the pending show.
    /// - While measuring: detaches right away; nothing was drawn yet.
    /// - During the enter animation: the exit starts when it completes.
    /// - Visible: starts the exit animation.
    /// - Already dismissing or removed: nothing.
    pub fn close(&mut self, now: u64) {
        match self.state {
            LifecycleState::Unmounted => {
                if self.attach_timer.is_armed() {
                    self.attach_timer.cancel();
                    debug!("tooltip show cancelled");
                    self.transition(LifecycleState::Removed);
                }
            }
            LifecycleState::Measuring | LifecycleState::Positioned => {
                self.container.detach();
                self.transition(LifecycleState::Removed);
                self.notify(self.config.on_hide.clone());
            }
            LifecycleState::Visible => {
                self.auto_hide.cancel();
                if matches!(self.playback, Some(p) if p.phase == AnimationPhase::Enter) {
                    trace!("tooltip close queued behind enter animation");
                    self.exit_queued = true;
                } else {
                    self.begin_exit(now);
                }
            }
            LifecycleState::Dismissing | LifecycleState::Removed => {}
        }
    }

    /// Removes the tooltip at once, without an exit animation.
    ///
    /// Unlike [`close`](Self::close), this never waits for a running
    /// animation: anything on screen is detached and the hide listener runs.
    /// A pending show is cancelled without listeners.
    pub fn close_now(&mut self) {
        self.auto_hide.cancel();
        self.exit_queued = false;
        self.playback = None;
        match self.state {
            LifecycleState::Unmounted => {
                if self.attach_timer.is_armed() {
                    self.attach_timer.cancel();
                    debug!("tooltip show cancelled");
                    self.transition(LifecycleState::Removed);
                }
            }
            LifecycleState::Measuring
            | LifecycleState::Positioned
            | LifecycleState::Visible
            | LifecycleState::Dismissing => {
                self.container.detach();
                self.transition(LifecycleState::Removed);
                self.notify(self.config.on_hide.clone());
            }
            LifecycleState::Removed => {}
        }
    }

    /// Reports a tap on the tooltip surface.
    pub fn on_tap(&mut self, now: u64) {
        self.poll_close_request(now);
        if self.config.click_to_hide && self.state == LifecycleState::Visible {
            debug!("tooltip tapped");
            self.close(now);
        }
    }

    /// Reports the absolute scroll offset of the anchor's scrollable ancestor.
    ///
    /// The tooltip moves by the negative of the change to stay next to its
    /// anchor. Placement is not recomputed.
    pub fn on_scroll(&mut self, offset: f64) {
        if let Some(delta) = self.scroll.update(offset) {
            self.scroll_by(delta);
        }
    }

    /// Reports a scroll change directly.
    pub fn scroll_by(&mut self, delta: f64) {
        if matches!(
            self.state,
            LifecycleState::Unmounted | LifecycleState::Removed
        ) {
            return;
        }
        self.scroll_shift -= delta;
        trace!(delta, shift = self.scroll_shift, "tooltip scrolled");
    }

    /// Completes the running animation now.
    ///
    /// For hosts that animate the surface themselves and report completion.
    pub fn finish_animation(&mut self, now: u64) {
        if self.playback.is_some() {
            self.complete_animation(now);
        }
    }

    /// What to draw, or `None` while nothing is placed on screen.
    #[must_use]
    pub fn frame(&self, now: u64) -> Option<TooltipFrame<'_>> {
        if !matches!(
            self.state,
            LifecycleState::Visible | LifecycleState::Dismissing
        ) {
            return None;
        }
        let placement = self.placement.as_ref()?;
        let sample = match self.playback {
            Some(playback) => self
                .animation
                .sample(playback.phase, playback.progress(now)),
            None => AnimationSample::SHOWN,
        };
        Some(TooltipFrame {
            origin: placement.origin + Vec2::new(0.0, self.scroll_shift) + sample.offset,
            size: placement.size,
            bubble: &placement.bubble,
            opacity: sample.opacity,
            config: &self.config,
        })
    }

    fn poll_close_request(&mut self, now: u64) {
        if self.handle.is_close_requested() {
            self.close(now);
        }
    }

    fn begin_exit(&mut self, now: u64) {
        self.exit_queued = false;
        self.transition(LifecycleState::Dismissing);
        self.start_playback(AnimationPhase::Exit, now);
    }

    fn start_playback(&mut self, phase: AnimationPhase, now: u64) {
        let playback = Playback::start(phase, now, self.animation.duration_ms(phase));
        self.playback = Some(playback);
        if playback.is_finished(now) {
            self.complete_animation(now);
        }
    }

    fn complete_animation(&mut self, now: u64) {
        let Some(playback) = self.playback.take() else {
            return;
        };
        match playback.phase {
            AnimationPhase::Enter => {
                trace!("tooltip enter animation finished");
                self.notify(self.config.on_display.clone());
                if self.exit_queued {
                    self.begin_exit(now);
                }
            }
            AnimationPhase::Exit => {
                self.container.detach();
                self.transition(LifecycleState::Removed);
                self.notify(self.config.on_hide.clone());
            }
        }
    }

    fn notify(&self, listener: Option<Listener>) {
        if let Some(listener) = listener {
            listener();
        }
    }

    fn transition(&mut self, next: LifecycleState) {
        debug_assert!(
            next > self.state
                || (self.state == LifecycleState::Positioned
                    && next == LifecycleState::Measuring),
            "tooltip cannot go from {:?} to {:?}",
            self.state,
            next
        );
        debug!(from = ?self.state, to = ?next, "tooltip state");
        self.state = next;
    }
}
