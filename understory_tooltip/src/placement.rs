// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor-relative placement: side, alignment, and viewport adjustment.
//!
//! All functions here are pure. Rectangles are in container coordinates with
//! `x0`/`y0` as the left/top edge and `x1`/`y1` as the right/bottom edge.

use kurbo::{Point, Rect, Size};

/// Distance kept between a horizontally placed tooltip and the container edge
/// when its width has to be reduced.
pub const SCREEN_EDGE_MARGIN: f64 = 30.0;

/// Which side of the anchor the tooltip is placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Position {
    /// Left of the anchor; the arrow sits on the tooltip's right edge.
    Left,
    /// Right of the anchor; the arrow sits on the tooltip's left edge.
    Right,
    /// Above the anchor; the arrow sits on the tooltip's bottom edge.
    Top,
    /// Below the anchor; the arrow sits on the tooltip's top edge.
    #[default]
    Bottom,
}

impl Position {
    /// Returns `true` for [`Position::Left`] and [`Position::Right`].
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The tooltip edge that faces the anchor and carries the arrow.
    #[must_use]
    pub const fn arrow_edge(self) -> Edge {
        match self {
            Self::Left => Edge::Right,
            Self::Right => Edge::Left,
            Self::Top => Edge::Bottom,
            Self::Bottom => Edge::Top,
        }
    }
}

/// Alignment along the anchor edge the tooltip is placed against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Align the leading edges (left or top).
    Start,
    /// Center the tooltip on the anchor.
    #[default]
    Center,
    /// Align the trailing edges (right or bottom).
    End,
}

/// One edge of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The `x0` edge.
    Left,
    /// The `y0` edge.
    Top,
    /// The `x1` edge.
    Right,
    /// The `y1` edge.
    Bottom,
}

/// Displacement of a span of length `mine` against a span of length `theirs`.
#[must_use]
pub fn align_offset(mine: f64, theirs: f64, align: Align) -> f64 {
    match align {
        Align::Start => 0.0,
        Align::Center => (theirs - mine) / 2.0,
        Align::End => theirs - mine,
    }
}

/// Computes the tooltip origin for an anchor, a measured tooltip size, and a
/// placement.
///
/// `gap` is the distance between the anchor edge and the facing tooltip edge.
///
/// ```rust
/// use kurbo::{Point, Rect, Size};
/// use understory_tooltip::{Align, Position, compute_position};
///
/// let anchor = Rect::new(100.0, 200.0, 200.0, 250.0);
/// let origin = compute_position(
///     anchor,
///     Size::new(80.0, 40.0),
///     Position::Bottom,
///     Align::Center,
///     10.0,
/// );
/// assert_eq!(origin, Point::new(110.0, 260.0));
/// ```
#[must_use]
pub fn compute_position(
    anchor: Rect,
    tooltip: Size,
    position: Position,
    align: Align,
    gap: f64,
) -> Point {
    match position {
        Position::Left | Position::Right => {
            let x = if position == Position::Left {
                anchor.x0 - tooltip.width - gap
            } else {
                anchor.x1 + gap
            };
            let y = anchor.y0 + align_offset(tooltip.height, anchor.height(), align);
            Point::new(x, y)
        }
        Position::Top | Position::Bottom => {
            let y = if position == Position::Bottom {
                anchor.y1 + gap
            } else {
                anchor.y0 - tooltip.height - gap
            };
            let x = anchor.x0 + align_offset(tooltip.width, anchor.width(), align);
            Point::new(x, y)
        }
    }
}

/// Result of [`adjust_for_viewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportFit {
    /// Whether the tooltip width or the reference rectangle changed.
    ///
    /// When set, the tooltip has to be measured again before the bubble path
    /// is built, because a narrower width usually rewraps the content.
    pub changed: bool,
    /// Reference rectangle to place against. Shifted horizontally for
    /// [`Position::Top`]/[`Position::Bottom`], otherwise the input anchor.
    pub anchor: Rect,
    /// Tooltip width to use. Reduced for [`Position::Left`]/[`Position::Right`]
    /// overflows, otherwise the input width.
    ///
    /// This is the raw result and can be negative when the anchor hugs the
    /// container edge; callers that size a surface should clamp it.
    pub width: f64,
    /// Alignment forced by a shift, if it differs from the requested one.
    ///
    /// A shifted reference rectangle is always placed with [`Align::Center`].
    pub forced_align: Option<Align>,
}

impl ViewportFit {
    /// The alignment to place with: the forced one, or `fallback`.
    #[must_use]
    pub fn align_or(&self, fallback: Align) -> Align {
        self.forced_align.unwrap_or(fallback)
    }
}

/// Keeps a tooltip inside the horizontal extent of its container.
///
/// Horizontal placements reduce the tooltip width so it fits between the
/// anchor and the container edge, keeping `edge_margin` (usually
/// [`SCREEN_EDGE_MARGIN`]) and `gap` free. Vertical placements keep the width
/// and shift the reference rectangle instead, forcing [`Align::Center`]; a
/// tooltip at least as wide as the container is centered on it.
///
/// Applying the function to its own output reports `changed == false`.
#[must_use]
pub fn adjust_for_viewport(
    anchor: Rect,
    tooltip: Size,
    position: Position,
    align: Align,
    viewport_width: f64,
    edge_margin: f64,
    gap: f64,
) -> ViewportFit {
    let unchanged = ViewportFit {
        changed: false,
        anchor,
        width: tooltip.width,
        forced_align: None,
    };
    match position {
        Position::Left => {
            if tooltip.width > anchor.x0 {
                ViewportFit {
                    changed: true,
                    width: anchor.x0 - edge_margin - gap,
                    ..unchanged
                }
            } else {
                unchanged
            }
        }
        Position::Right => {
            if anchor.x1 + tooltip.width > viewport_width {
                ViewportFit {
                    changed: true,
                    width: viewport_width - anchor.x1 - edge_margin - gap,
                    ..unchanged
                }
            } else {
                unchanged
            }
        }
        Position::Top | Position::Bottom => {
            let half = tooltip.width / 2.0;
            let center_x = anchor.center().x;
            // A tooltip at least as wide as the container cannot fit; it is
            // centered on the container instead.
            let wide = tooltip.width >= viewport_width;
            let target = if wide {
                viewport_width / 2.0
            } else {
                center_x.clamp(half, viewport_width - half)
            };
            let shift = target - center_x;
            if shift == 0.0 {
                return unchanged;
            }
            let (x0, x1) = if wide {
                (0.0, viewport_width)
            } else {
                let x0 = (anchor.x0 + shift).clamp(0.0, viewport_width);
                (x0, (anchor.x1 + shift).clamp(x0, viewport_width))
            };
            ViewportFit {
                changed: true,
                anchor: Rect::new(x0, anchor.y0, x1, anchor.y1),
                width: tooltip.width,
                forced_align: (align != Align::Center).then_some(Align::Center),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIONS: [Position; 4] = [
        Position::Left,
        Position::Right,
        Position::Top,
        Position::Bottom,
    ];
    const ALIGNS: [Align; 3] = [Align::Start, Align::Center, Align::End];

    #[test]
    fn bottom_center_scenario() {
        let anchor = Rect::new(100.0, 200.0, 200.0, 250.0);
        let origin = compute_position(
            anchor,
            Size::new(80.0, 40.0),
            Position::Bottom,
            Align::Center,
            10.0,
        );
        assert_eq!(origin, Point::new(110.0, 260.0));
    }

    #[test]
    fn facing_edge_sits_exactly_gap_away() {
        let anchor = Rect::new(120.0, 300.0, 220.0, 340.0);
        let size = Size::new(90.0, 36.0);
        let gap = 12.0;
        for position in POSITIONS {
            for align in ALIGNS {
                let o = compute_position(anchor, size, position, align, gap);
                let tip = Rect::from_origin_size(o, size);
                let distance = match position {
                    Position::Left => anchor.x0 - tip.x1,
                    Position::Right => tip.x0 - anchor.x1,
                    Position::Top => anchor.y0 - tip.y1,
                    Position::Bottom => tip.y0 - anchor.y1,
                };
                assert_eq!(distance, gap, "{position:?}/{align:?}");
            }
        }
    }

    #[test]
    fn align_offsets() {
        assert_eq!(align_offset(80.0, 100.0, Align::Start), 0.0);
        assert_eq!(align_offset(80.0, 100.0, Align::Center), 10.0);
        assert_eq!(align_offset(80.0, 100.0, Align::End), 20.0);
        // Wider than the anchor: the tooltip overhangs on both sides.
        assert_eq!(align_offset(140.0, 100.0, Align::Center), -20.0);
    }

    #[test]
    fn vertical_alignment_for_side_placements() {
        let anchor = Rect::new(50.0, 100.0, 90.0, 160.0);
        let size = Size::new(30.0, 20.0);
        let start = compute_position(anchor, size, Position::Right, Align::Start, 0.0);
        let end = compute_position(anchor, size, Position::Right, Align::End, 0.0);
        assert_eq!(start, Point::new(90.0, 100.0));
        assert_eq!(end, Point::new(90.0, 140.0));
    }

    #[test]
    fn right_overflow_shrinks_width() {
        let anchor = Rect::new(300.0, 100.0, 350.0, 140.0);
        let fit = adjust_for_viewport(
            anchor,
            Size::new(80.0, 40.0),
            Position::Right,
            Align::Center,
            360.0,
            SCREEN_EDGE_MARGIN,
            4.0,
        );
        assert!(fit.changed);
        assert_eq!(fit.width, 360.0 - 350.0 - 30.0 - 4.0);
        assert_eq!(fit.anchor, anchor);
        assert_eq!(fit.forced_align, None);
    }

    #[test]
    fn left_overflow_shrinks_width() {
        let anchor = Rect::new(60.0, 100.0, 120.0, 140.0);
        let fit = adjust_for_viewport(
            anchor,
            Size::new(80.0, 40.0),
            Position::Left,
            Align::Center,
            360.0,
            SCREEN_EDGE_MARGIN,
            5.0,
        );
        assert!(fit.changed);
        assert_eq!(fit.width, 60.0 - 30.0 - 5.0);
    }

    #[test]
    fn fitting_side_placements_are_untouched() {
        let anchor = Rect::new(150.0, 100.0, 200.0, 140.0);
        for position in [Position::Left, Position::Right] {
            let fit = adjust_for_viewport(
                anchor,
                Size::new(80.0, 40.0),
                position,
                Align::Start,
                400.0,
                SCREEN_EDGE_MARGIN,
                0.0,
            );
            assert!(!fit.changed);
            assert_eq!(fit.width, 80.0);
        }
    }

    #[test]
    fn right_edge_overflow_shifts_anchor_and_centers() {
        // Center at 340, half width 50 -> 30 past the edge.
        let anchor = Rect::new(320.0, 10.0, 360.0, 30.0);
        let fit = adjust_for_viewport(
            anchor,
            Size::new(100.0, 40.0),
            Position::Bottom,
            Align::Start,
            360.0,
            SCREEN_EDGE_MARGIN,
            0.0,
        );
        assert!(fit.changed);
        assert_eq!(fit.forced_align, Some(Align::Center));
        assert_eq!(fit.align_or(Align::Start), Align::Center);
        assert_eq!(fit.anchor, Rect::new(290.0, 10.0, 330.0, 30.0));
        assert_eq!(fit.width, 100.0);
    }

    #[test]
    fn left_edge_underflow_shifts_anchor_right() {
        let anchor = Rect::new(0.0, 10.0, 20.0, 30.0);
        let fit = adjust_for_viewport(
            anchor,
            Size::new(60.0, 40.0),
            Position::Top,
            Align::End,
            360.0,
            SCREEN_EDGE_MARGIN,
            0.0,
        );
        assert!(fit.changed);
        assert_eq!(fit.anchor, Rect::new(20.0, 10.0, 40.0, 30.0));
        assert_eq!(fit.forced_align, Some(Align::Center));
    }

    #[test]
    fn shifted_anchor_is_clamped_to_the_container() {
        // Tooltip wider than the container: the shift overshoots the left edge.
        let anchor = Rect::new(300.0, 0.0, 360.0, 20.0);
        let fit = adjust_for_viewport(
            anchor,
            Size::new(800.0, 40.0),
            Position::Bottom,
            Align::Center,
            360.0,
            SCREEN_EDGE_MARGIN,
            0.0,
        );
        assert!(fit.changed);
        assert!(fit.anchor.x0 <= fit.anchor.x1);
        assert_eq!(fit.anchor, Rect::new(0.0, 0.0, 360.0, 20.0));
        assert_eq!(fit.forced_align, None, "already centered");
        assert_eq!(fit.align_or(Align::Center), Align::Center);

        let origin = compute_position(
            fit.anchor,
            Size::new(800.0, 40.0),
            Position::Bottom,
            Align::Center,
            0.0,
        );
        assert_eq!(origin, Point::new(-220.0, 20.0), "overflows both sides evenly");
    }

    #[test]
    fn partly_offscreen_anchor_is_clamped_and_still_fits() {
        let anchor = Rect::new(-200.0, 0.0, 100.0, 20.0);
        let tooltip = Size::new(100.0, 40.0);
        let fit = adjust_for_viewport(
            anchor,
            tooltip,
            Position::Top,
            Align::Center,
            360.0,
            SCREEN_EDGE_MARGIN,
            0.0,
        );
        assert!(fit.changed);
        assert_eq!(fit.anchor, Rect::new(0.0, 0.0, 200.0, 20.0));
        let center = fit.anchor.center().x;
        assert!(center - 50.0 >= 0.0 && center + 50.0 <= 360.0);
    }

    #[test]
    fn adjustment_is_idempotent() {
        let cases = [
            (Rect::new(300.0, 100.0, 350.0, 140.0), Position::Right, 100.0),
            (Rect::new(20.0, 100.0, 60.0, 140.0), Position::Left, 100.0),
            (Rect::new(320.0, 10.0, 360.0, 30.0), Position::Bottom, 100.0),
            (Rect::new(0.0, 10.0, 20.0, 30.0), Position::Top, 100.0),
            (Rect::new(300.0, 0.0, 360.0, 20.0), Position::Bottom, 800.0),
            (Rect::new(0.0, 0.0, 40.0, 20.0), Position::Top, 360.0),
        ];
        for (anchor, position, width) in cases {
            let first = adjust_for_viewport(
                anchor,
                Size::new(width, 40.0),
                position,
                Align::Start,
                360.0,
                SCREEN_EDGE_MARGIN,
                6.0,
            );
            assert!(first.changed, "{position:?} should need adjusting");
            let second = adjust_for_viewport(
                first.anchor,
                Size::new(first.width, 40.0),
                position,
                first.align_or(Align::Start),
                360.0,
                SCREEN_EDGE_MARGIN,
                6.0,
            );
            assert!(!second.changed, "{position:?} adjusted twice");
        }
    }

    #[test]
    fn arrow_edge_faces_anchor() {
        assert_eq!(Position::Bottom.arrow_edge(), Edge::Top);
        assert_eq!(Position::Top.arrow_edge(), Edge::Bottom);
        assert_eq!(Position::Left.arrow_edge(), Edge::Right);
        assert_eq!(Position::Right.arrow_edge(), Edge::Left);
    }
}
