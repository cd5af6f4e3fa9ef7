// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter/exit animations.
//!
//! An animation is a pure description: a duration per phase and a sample
//! function from progress to opacity and offset. The controller owns the
//! clock; hosts with their own animation engine can use [`InstantAnimation`]
//! and report completion through
//! [`TooltipController::finish_animation`](crate::TooltipController::finish_animation),
//! or read the samples from [`TooltipFrame`](crate::TooltipFrame).

use kurbo::Vec2;

/// Which transition is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    /// Showing.
    Enter,
    /// Hiding.
    Exit,
}

/// Visual state at one point of an animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSample {
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Translation applied on top of the placement.
    pub offset: Vec2,
}

impl AnimationSample {
    /// Fully shown, not moved.
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        offset: Vec2::ZERO,
    };
}

/// A pluggable enter/exit animation.
pub trait TooltipAnimation {
    /// Length of `phase` in milliseconds. Zero completes immediately.
    fn duration_ms(&self, phase: AnimationPhase) -> u64;

    /// Sample `phase` at `progress` in `0.0..=1.0`.
    fn sample(&self, phase: AnimationPhase, progress: f64) -> AnimationSample;
}

/// Linear opacity fade. This is the default animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FadeAnimation {
    /// Length of each phase in milliseconds.
    pub duration_ms: u64,
}

impl Default for FadeAnimation {
    fn default() -> Self {
        Self { duration_ms: 400 }
    }
}

impl TooltipAnimation for FadeAnimation {
    fn duration_ms(&self, _phase: AnimationPhase) -> u64 {
        self.duration_ms
    }

    fn sample(&self, phase: AnimationPhase, progress: f64) -> AnimationSample {
        let progress = progress.clamp(0.0, 1.0);
        let opacity = match phase {
            AnimationPhase::Enter => progress,
            AnimationPhase::Exit => 1.0 - progress,
        };
        AnimationSample {
            opacity,
            offset: Vec2::ZERO,
        }
    }
}

/// No animation: both phases complete as soon as they start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstantAnimation;

impl TooltipAnimation for InstantAnimation {
    fn duration_ms(&self, _phase: AnimationPhase) -> u64 {
        0
    }

    fn sample(&self, phase: AnimationPhase, _progress: f64) -> AnimationSample {
        match phase {
            AnimationPhase::Enter => AnimationSample::SHOWN,
            AnimationPhase::Exit => AnimationSample {
                opacity: 0.0,
                offset: Vec2::ZERO,
            },
        }
    }
}

impl<A: TooltipAnimation + ?Sized> TooltipAnimation for &A {
    fn duration_ms(&self, phase: AnimationPhase) -> u64 {
        (**self).duration_ms(phase)
    }

    fn sample(&self, phase: AnimationPhase, progress: f64) -> AnimationSample {
        (**self).sample(phase, progress)
    }
}

/// A running phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Playback {
    pub(crate) phase: AnimationPhase,
    started_at: u64,
    duration_ms: u64,
}

impl Playback {
    pub(crate) fn start(phase: AnimationPhase, now: u64, duration_ms: u64) -> Self {
        Self {
            phase,
            started_at: now,
            duration_ms,
        }
    }

    pub(crate) fn progress(&self, now: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at).min(self.duration_ms);
        elapsed as f64 / self.duration_ms as f64
    }

    pub(crate) fn is_finished(&self, now: u64) -> bool {
        now.saturating_sub(self.started_at) >= self.duration_ms
    }
}
