// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Speech-bubble outline: a rounded rectangle with an arrow notch.

use kurbo::{BezPath, Insets, Point, Rect, RoundedRectRadii, Size};

use crate::placement::{Edge, Position};

/// Arrow dimensions and skew.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowGeometry {
    /// Half of the arrow base, measured along the edge.
    pub width: f64,
    /// How far the tip reaches past the bubble body.
    pub height: f64,
    /// Offset of the base center from the anchor center, along the edge.
    pub source_margin: f64,
    /// Offset of the tip from the anchor center, along the edge.
    pub target_margin: f64,
}

impl Default for ArrowGeometry {
    fn default() -> Self {
        Self {
            width: 15.0,
            height: 15.0,
            source_margin: 0.0,
            target_margin: 0.0,
        }
    }
}

/// The three points of the arrow, in path order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Notch {
    /// Bubble edge carrying the arrow.
    pub edge: Edge,
    /// First base point met when walking the outline clockwise.
    pub base_start: Point,
    /// Arrow tip; lies on the outer bounds.
    pub tip: Point,
    /// Second base point.
    pub base_end: Point,
}

/// Closed outline of a tooltip background.
///
/// An empty path means the anchor was not known when the path was built.
#[derive(Clone, Debug, Default)]
pub struct BubblePath {
    path: BezPath,
    body: Rect,
    notch: Option<Notch>,
}

impl BubblePath {
    /// An empty outline.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// The outline.
    #[must_use]
    pub fn as_bez_path(&self) -> &BezPath {
        &self.path
    }

    /// Consumes `self`, returning the outline.
    #[must_use]
    pub fn into_bez_path(self) -> BezPath {
        self.path
    }

    /// The rounded body without the arrow.
    #[must_use]
    pub fn body(&self) -> Rect {
        self.body
    }

    /// The arrow, if the path is not empty.
    #[must_use]
    pub fn notch(&self) -> Option<Notch> {
        self.notch
    }

    /// Moves the outline, for example from tooltip-local into container
    /// coordinates.
    #[must_use]
    pub fn translated(&self, offset: kurbo::Vec2) -> Self {
        let mut path = self.path.clone();
        path.apply_affine(kurbo::Affine::translate(offset));
        Self {
            path,
            body: self.body + offset,
            notch: self.notch.map(|n| Notch {
                edge: n.edge,
                base_start: n.base_start + offset,
                tip: n.tip + offset,
                base_end: n.base_end + offset,
            }),
        }
    }
}

/// Area available to the bubble inside a measured tooltip surface.
///
/// The surface keeps `shadow_padding` free on every side for the shadow.
#[must_use]
pub fn bubble_bounds(surface: Size, shadow_padding: f64) -> Rect {
    Rect::new(
        shadow_padding,
        shadow_padding,
        surface.width - shadow_padding,
        surface.height - shadow_padding,
    )
}

/// Builds the bubble outline.
///
/// - `bounds` is the outer extent in tooltip-local coordinates; the arrow tip
///   touches it on the side facing the anchor.
/// - The body is `bounds` inset by `arrow.height` on the anchor side and by
///   `margin` on the other three sides.
/// - `anchor_center` is the anchor's center in the same local coordinates.
///   Without it the result is empty: the tooltip has not been placed yet.
/// - Negative radii are treated as zero, and every radius is limited to half
///   the shorter side of the body.
///
/// The outline runs clockwise from the top-left corner and is closed.
#[must_use]
pub fn build_bubble_path(
    bounds: Rect,
    radii: RoundedRectRadii,
    position: Position,
    anchor_center: Option<Point>,
    arrow: ArrowGeometry,
    margin: Insets,
) -> BubblePath {
    let Some(center) = anchor_center else {
        return BubblePath::empty();
    };

    let inset = |side: Edge, side_margin: f64| {
        if position.arrow_edge() == side {
            arrow.height
        } else {
            side_margin
        }
    };
    let left = bounds.x0 + inset(Edge::Left, margin.x0);
    let top = bounds.y0 + inset(Edge::Top, margin.y0);
    let right = bounds.x1 - inset(Edge::Right, margin.x1);
    let bottom = bounds.y1 - inset(Edge::Bottom, margin.y1);
    let body = Rect::new(left, top, right, bottom);

    let limit = (body.width().min(body.height()) / 2.0).max(0.0);
    let clamp = |r: f64| r.max(0.0).min(limit);
    let tl = clamp(radii.top_left);
    let tr = clamp(radii.top_right);
    let br = clamp(radii.bottom_right);
    let bl = clamp(radii.bottom_left);

    let along = if position.is_horizontal() {
        center.y
    } else {
        center.x
    };
    let target = along + arrow.target_margin;
    let source = {
        let source = along + arrow.source_margin;
        let (lo, hi) = match position.arrow_edge() {
            Edge::Top => (left + tl, right - tr),
            Edge::Bottom => (left + bl, right - br),
            Edge::Right => (top + tr, bottom - br),
            Edge::Left => (top + tl, bottom - bl),
        };
        let (lo, hi) = (lo + arrow.width, hi - arrow.width);
        if lo <= hi { source.clamp(lo, hi) } else { source }
    };

    let mut path = BezPath::new();
    let mut notch = None;

    path.move_to((left + tl, top));
    if position == Position::Bottom {
        notch = Some(push_notch(
            &mut path,
            Edge::Top,
            Point::new(source - arrow.width, top),
            Point::new(target, bounds.y0),
            Point::new(source + arrow.width, top),
        ));
    }
    path.line_to((right - tr, top));
    path.quad_to((right, top), (right, top + tr));

    if position == Position::Left {
        notch = Some(push_notch(
            &mut path,
            Edge::Right,
            Point::new(right, source - arrow.width),
            Point::new(bounds.x1, target),
            Point::new(right, source + arrow.width),
        ));
    }
    path.line_to((right, bottom - br));
    path.quad_to((right, bottom), (right - br, bottom));

    if position == Position::Top {
        notch = Some(push_notch(
            &mut path,
            Edge::Bottom,
            Point::new(source + arrow.width, bottom),
            Point::new(target, bounds.y1),
            Point::new(source - arrow.width, bottom),
        ));
    }
    path.line_to((left + bl, bottom));
    path.quad_to((left, bottom), (left, bottom - bl));

    if position == Position::Right {
        notch = Some(push_notch(
            &mut path,
            Edge::Left,
            Point::new(left, source + arrow.width),
            Point::new(bounds.x0, target),
            Point::new(left, source - arrow.width),
        ));
    }
    path.line_to((left, top + tl));
    path.quad_to((left, top), (left + tl, top));
    path.close_path();

    BubblePath { path, body, notch }
}

fn push_notch(
    path: &mut BezPath,
    edge: Edge,
    base_start: Point,
    tip: Point,
    base_end: Point,
) -> Notch {
    path.line_to(base_start);
    path.line_to(tip);
    path.line_to(base_end);
    Notch {
        edge,
        base_start,
        tip,
        base_end,
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::PathEl;

    use super::*;

    fn end_points(path: &BubblePath) -> Vec<Point> {
        path.as_bez_path()
            .elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) | PathEl::QuadTo(_, p) => Some(p),
                PathEl::CurveTo(_, _, p) => Some(p),
                PathEl::ClosePath => None,
            })
            .collect()
    }

    fn outside_body(path: &BubblePath) -> Vec<Point> {
        let body = path.body();
        end_points(path)
            .into_iter()
            .filter(|p| p.x < body.x0 || p.x > body.x1 || p.y < body.y0 || p.y > body.y1)
            .collect()
    }

    fn build(position: Position, radius: f64) -> BubblePath {
        let bounds = Rect::new(4.0, 4.0, 196.0, 96.0);
        build_bubble_path(
            bounds,
            RoundedRectRadii::from_single_radius(radius),
            position,
            Some(bounds.center()),
            ArrowGeometry::default(),
            Insets::ZERO,
        )
    }

    #[test]
    fn missing_anchor_gives_empty_path() {
        let path = build_bubble_path(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            RoundedRectRadii::from_single_radius(8.0),
            Position::Bottom,
            None,
            ArrowGeometry::default(),
            Insets::ZERO,
        );
        assert!(path.is_empty());
        assert!(path.notch().is_none());
    }

    #[test]
    fn path_is_closed_with_single_notch_facing_anchor() {
        let cases = [
            (Position::Bottom, Edge::Top),
            (Position::Top, Edge::Bottom),
            (Position::Left, Edge::Right),
            (Position::Right, Edge::Left),
        ];
        for (position, edge) in cases {
            let path = build(position, 10.0);
            let elements = path.as_bez_path().elements();
            assert_eq!(elements.last(), Some(&PathEl::ClosePath), "{position:?}");
            assert_eq!(
                elements
                    .iter()
                    .filter(|el| matches!(el, PathEl::ClosePath))
                    .count(),
                1
            );

            let outside = outside_body(&path);
            assert_eq!(outside.len(), 1, "{position:?} should have one tip");
            let notch = path.notch().unwrap();
            assert_eq!(notch.edge, edge);
            assert_eq!(outside[0], notch.tip);

            let body = path.body();
            match edge {
                Edge::Top => assert_eq!(notch.tip.y, 4.0),
                Edge::Bottom => assert_eq!(notch.tip.y, 96.0),
                Edge::Left => assert_eq!(notch.tip.x, 4.0),
                Edge::Right => assert_eq!(notch.tip.x, 196.0),
            }
            match edge {
                Edge::Top => assert_eq!(notch.base_start.y, body.y0),
                Edge::Bottom => assert_eq!(notch.base_start.y, body.y1),
                Edge::Left => assert_eq!(notch.base_start.x, body.x0),
                Edge::Right => assert_eq!(notch.base_start.x, body.x1),
            }
        }
    }

    #[test]
    fn arrow_side_is_inset_by_arrow_height() {
        let path = build(Position::Bottom, 0.0);
        assert_eq!(path.body(), Rect::new(4.0, 19.0, 196.0, 96.0));
        let path = build(Position::Left, 0.0);
        assert_eq!(path.body(), Rect::new(4.0, 4.0, 181.0, 96.0));
    }

    #[test]
    fn margins_inset_the_other_sides() {
        let path = build_bubble_path(
            Rect::new(0.0, 0.0, 200.0, 100.0),
            RoundedRectRadii::from_single_radius(0.0),
            Position::Top,
            Some(Point::new(100.0, 50.0)),
            ArrowGeometry::default(),
            Insets::new(1.0, 2.0, 3.0, 4.0),
        );
        // Bottom carries the arrow, so its margin is replaced by the arrow height.
        assert_eq!(path.body(), Rect::new(1.0, 2.0, 197.0, 85.0));
    }

    #[test]
    fn negative_radius_matches_zero() {
        for position in [Position::Top, Position::Right] {
            let negative = build(position, -5.0);
            let zero = build(position, 0.0);
            assert_eq!(
                negative.as_bez_path().elements(),
                zero.as_bez_path().elements()
            );
        }
    }

    #[test]
    fn arrow_follows_anchor_center_and_margins() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 80.0);
        let arrow = ArrowGeometry {
            width: 10.0,
            height: 12.0,
            source_margin: 6.0,
            target_margin: -4.0,
        };
        let path = build_bubble_path(
            bounds,
            RoundedRectRadii::from_single_radius(8.0),
            Position::Bottom,
            Some(Point::new(90.0, -30.0)),
            arrow,
            Insets::ZERO,
        );
        let notch = path.notch().unwrap();
        assert_eq!(notch.base_start, Point::new(86.0, 12.0));
        assert_eq!(notch.base_end, Point::new(106.0, 12.0));
        assert_eq!(notch.tip, Point::new(86.0, 0.0));
    }

    #[test]
    fn side_arrow_uses_vertical_anchor_center() {
        let bounds = Rect::new(0.0, 0.0, 120.0, 100.0);
        let arrow = ArrowGeometry {
            source_margin: 5.0,
            ..ArrowGeometry::default()
        };
        let path = build_bubble_path(
            bounds,
            RoundedRectRadii::from_single_radius(4.0),
            Position::Right,
            Some(Point::new(-40.0, 40.0)),
            arrow,
            Insets::ZERO,
        );
        let notch = path.notch().unwrap();
        assert_eq!(notch.edge, Edge::Left);
        // Clockwise on the left edge walks upwards.
        assert_eq!(notch.base_start, Point::new(15.0, 60.0));
        assert_eq!(notch.tip, Point::new(0.0, 40.0));
        assert_eq!(notch.base_end, Point::new(15.0, 30.0));
    }

    #[test]
    fn arrow_base_stays_on_the_straight_edge() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 80.0);
        let path = build_bubble_path(
            bounds,
            RoundedRectRadii::from_single_radius(10.0),
            Position::Top,
            Some(Point::new(-50.0, 120.0)),
            ArrowGeometry::default(),
            Insets::ZERO,
        );
        let notch = path.notch().unwrap();
        // Base is pushed right of the bottom-left corner; the tip still aims at
        // the anchor.
        assert_eq!(notch.base_end.x, 10.0);
        assert_eq!(notch.base_start.x, 40.0);
        assert_eq!(notch.tip.x, -50.0);
    }

    #[test]
    fn radii_are_limited_by_the_body() {
        let path = build_bubble_path(
            Rect::new(0.0, 0.0, 100.0, 40.0),
            RoundedRectRadii::from_single_radius(500.0),
            Position::Left,
            Some(Point::new(150.0, 20.0)),
            ArrowGeometry {
                width: 2.0,
                ..ArrowGeometry::default()
            },
            Insets::ZERO,
        );
        assert_eq!(
            path.as_bez_path().elements().first(),
            Some(&PathEl::MoveTo(Point::new(20.0, 0.0)))
        );
    }

    #[test]
    fn translated_moves_everything() {
        let path = build(Position::Bottom, 6.0);
        let moved = path.translated(kurbo::Vec2::new(10.0, 20.0));
        assert_eq!(moved.body(), path.body() + kurbo::Vec2::new(10.0, 20.0));
        assert_eq!(
            moved.notch().unwrap().tip,
            path.notch().unwrap().tip + kurbo::Vec2::new(10.0, 20.0)
        );
        assert_eq!(
            moved.as_bez_path().elements().len(),
            path.as_bez_path().elements().len()
        );
    }

    #[test]
    fn bounds_leave_room_for_the_shadow() {
        assert_eq!(
            bubble_bounds(Size::new(100.0, 60.0), 4.0),
            Rect::new(4.0, 4.0, 96.0, 56.0)
        );
    }
}
