// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip configuration.
//!
//! [`TooltipConfig`] is a plain value with public fields and by-value setters
//! for chaining. Build it once, then hand it to
//! [`TooltipController::new`](crate::TooltipController::new).
//!
//! ```rust
//! use kurbo::Insets;
//! use understory_tooltip::{Align, Position, TooltipConfig};
//!
//! let config = TooltipConfig::default()
//!     .position(Position::Right)
//!     .align(Align::Start)
//!     .text("Saved")
//!     .corner_radius(-5.0)
//!     .padding(Insets::uniform(8.0))
//!     .auto_hide_after(true, 2_500)
//!     .click_to_hide(true);
//!
//! assert_eq!(config.corner_radius, 0.0);
//! assert_eq!(config.duration_ms, 2_500);
//! ```

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use kurbo::{Insets, RoundedRectRadii};
use peniko::Color;

use crate::bubble::ArrowGeometry;
use crate::placement::{Align, Edge, Position};

/// Space kept around the bubble on every side of the surface for the shadow.
pub const SHADOW_PADDING: f64 = 4.0;

/// Callback run on a lifecycle milestone.
pub type Listener = Rc<dyn Fn()>;

/// What the tooltip shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TooltipContent {
    /// A text label laid out by the host.
    Text(String),
    /// A host-owned content element, identified by an opaque key.
    Custom(u64),
}

impl Default for TooltipContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// Where a text label sits inside the content box.
///
/// Only matters when the box is larger than the text, for example after the
/// surface was attached with a fixed width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextGravity {
    /// Horizontal placement.
    pub horizontal: Align,
    /// Vertical placement.
    pub vertical: Align,
}

impl TextGravity {
    /// Top-left.
    pub const START: Self = Self {
        horizontal: Align::Start,
        vertical: Align::Start,
    };
    /// Centered both ways.
    pub const CENTER: Self = Self {
        horizontal: Align::Center,
        vertical: Align::Center,
    };
}

impl Default for TextGravity {
    fn default() -> Self {
        Self::START
    }
}

/// Outline stroke drawn on top of the bubble fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
}

/// Drop shadow behind the bubble.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Whether the shadow is drawn.
    pub enabled: bool,
    /// Shadow color.
    pub color: Color,
    /// Blur radius.
    pub blur: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Color::from_rgba8(0xAA, 0xAA, 0xAA, 0xFF),
            blur: 8.0,
        }
    }
}

/// Options for one tooltip.
#[derive(Clone)]
pub struct TooltipConfig {
    /// Side of the anchor.
    pub position: Position,
    /// Alignment along the anchor edge.
    pub align: Align,
    /// Half of the arrow base.
    pub arrow_width: f64,
    /// Arrow length past the bubble body.
    pub arrow_height: f64,
    /// Offset of the arrow base from the anchor center.
    pub arrow_source_margin: f64,
    /// Offset of the arrow tip from the anchor center.
    pub arrow_target_margin: f64,
    /// Corner radius of the bubble body; never negative.
    pub corner_radius: f64,
    /// Space between the bubble body and the content.
    pub padding: Insets,
    /// Space between the bubble bounds and the body on the non-arrow sides.
    pub margin: Insets,
    /// Gap between the anchor and the tooltip.
    pub distance_with_view: f64,
    /// Bubble fill.
    pub color: Color,
    /// Optional bubble outline.
    pub border: Option<Border>,
    /// Bubble shadow.
    pub shadow: Shadow,
    /// Auto-hide delay in milliseconds, counted from the moment the tooltip
    /// becomes visible.
    pub duration_ms: u64,
    /// Dismiss after [`Self::duration_ms`].
    pub auto_hide: bool,
    /// Dismiss when the tooltip surface is tapped.
    pub click_to_hide: bool,
    /// What to show.
    pub content: TooltipContent,
    /// Text color for [`TooltipContent::Text`].
    pub text_color: Color,
    /// Text size for [`TooltipContent::Text`], in host units.
    pub text_size: f64,
    /// Placement of the text inside the content box.
    pub text_gravity: TextGravity,
    /// Font family for the text; `None` uses the host's default.
    pub typeface: Option<String>,
    /// Run once the enter animation has finished.
    pub on_display: Option<Listener>,
    /// Run once the exit animation has finished and the surface is detached.
    pub on_hide: Option<Listener>,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        let arrow = ArrowGeometry::default();
        Self {
            position: Position::Bottom,
            align: Align::Center,
            arrow_width: arrow.width,
            arrow_height: arrow.height,
            arrow_source_margin: arrow.source_margin,
            arrow_target_margin: arrow.target_margin,
            corner_radius: 15.0,
            padding: Insets::new(30.0, 20.0, 30.0, 30.0),
            margin: Insets::ZERO,
            distance_with_view: 0.0,
            color: Color::from_rgba8(0x1F, 0x7C, 0x82, 0xFF),
            border: None,
            shadow: Shadow::default(),
            duration_ms: 4_000,
            auto_hide: true,
            click_to_hide: false,
            content: TooltipContent::default(),
            text_color: Color::WHITE,
            text_size: 14.0,
            text_gravity: TextGravity::START,
            typeface: None,
            on_display: None,
            on_hide: None,
        }
    }
}

impl fmt::Debug for TooltipConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TooltipConfig")
            .field("position", &self.position)
            .field("align", &self.align)
            .field("arrow_width", &self.arrow_width)
            .field("arrow_height", &self.arrow_height)
            .field("arrow_source_margin", &self.arrow_source_margin)
            .field("arrow_target_margin", &self.arrow_target_margin)
            .field("corner_radius", &self.corner_radius)
            .field("padding", &self.padding)
            .field("margin", &self.margin)
            .field("distance_with_view", &self.distance_with_view)
            .field("color", &self.color)
            .field("border", &self.border)
            .field("shadow", &self.shadow)
            .field("duration_ms", &self.duration_ms)
            .field("auto_hide", &self.auto_hide)
            .field("click_to_hide", &self.click_to_hide)
            .field("content", &self.content)
            .field("text_color", &self.text_color)
            .field("text_size", &self.text_size)
            .field("text_gravity", &self.text_gravity)
            .field("typeface", &self.typeface)
            .field("on_display", &self.on_display.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .finish()
    }
}

impl TooltipConfig {
    /// Sets the side of the anchor.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Sets the alignment along the anchor edge.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Sets half of the arrow base.
    #[must_use]
    pub fn arrow_width(mut self, width: f64) -> Self {
        self.arrow_width = width;
        self
    }

    /// Sets the arrow length.
    #[must_use]
    pub fn arrow_height(mut self, height: f64) -> Self {
        self.arrow_height = height;
        self
    }

    /// Shifts the arrow base along the edge.
    #[must_use]
    pub fn arrow_source_margin(mut self, margin: f64) -> Self {
        self.arrow_source_margin = margin;
        self
    }

    /// Shifts the arrow tip along the edge.
    #[must_use]
    pub fn arrow_target_margin(mut self, margin: f64) -> Self {
        self.arrow_target_margin = margin;
        self
    }

    /// Sets the corner radius. Negative values become zero.
    #[must_use]
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    /// Sets the content padding.
    #[must_use]
    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the body margin. All four sides are independent.
    #[must_use]
    pub fn margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the gap between anchor and tooltip.
    #[must_use]
    pub fn distance_with_view(mut self, distance: f64) -> Self {
        self.distance_with_view = distance;
        self
    }

    /// Sets the bubble fill.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Adds an outline.
    #[must_use]
    pub fn border(mut self, color: Color, width: f64) -> Self {
        self.border = Some(Border { color, width });
        self
    }

    /// Turns the shadow on or off.
    #[must_use]
    pub fn shadow(mut self, enabled: bool) -> Self {
        self.shadow.enabled = enabled;
        self
    }

    /// Sets the shadow color.
    #[must_use]
    pub fn shadow_color(mut self, color: Color) -> Self {
        self.shadow.color = color;
        self
    }

    /// Sets the auto-hide delay in milliseconds.
    #[must_use]
    pub fn duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Turns auto-hide on or off.
    #[must_use]
    pub fn auto_hide(mut self, auto_hide: bool) -> Self {
        self.auto_hide = auto_hide;
        self
    }

    /// Turns auto-hide on or off and sets its delay.
    #[must_use]
    pub fn auto_hide_after(mut self, auto_hide: bool, duration_ms: u64) -> Self {
        self.auto_hide = auto_hide;
        self.duration_ms = duration_ms;
        self
    }

    /// Dismiss on tap.
    #[must_use]
    pub fn click_to_hide(mut self, click_to_hide: bool) -> Self {
        self.click_to_hide = click_to_hide;
        self
    }

    /// Shows a text label.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = TooltipContent::Text(text.into());
        self
    }

    /// Shows a host-owned element instead of text.
    #[must_use]
    pub fn custom_content(mut self, key: u64) -> Self {
        self.content = TooltipContent::Custom(key);
        self
    }

    /// Sets the text color.
    #[must_use]
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Sets the text size.
    #[must_use]
    pub fn text_size(mut self, size: f64) -> Self {
        self.text_size = size;
        self
    }

    /// Sets where the text sits inside the content box.
    #[must_use]
    pub fn text_gravity(mut self, gravity: TextGravity) -> Self {
        self.text_gravity = gravity;
        self
    }

    /// Sets the font family of the text.
    #[must_use]
    pub fn typeface(mut self, family: impl Into<String>) -> Self {
        self.typeface = Some(family.into());
        self
    }

    /// Runs `listener` once the tooltip is fully shown.
    #[must_use]
    pub fn on_display(mut self, listener: impl Fn() + 'static) -> Self {
        self.on_display = Some(Rc::new(listener));
        self
    }

    /// Runs `listener` once the tooltip is gone.
    #[must_use]
    pub fn on_hide(mut self, listener: impl Fn() + 'static) -> Self {
        self.on_hide = Some(Rc::new(listener));
        self
    }

    /// Arrow parameters for [`build_bubble_path`](crate::build_bubble_path).
    #[must_use]
    pub fn arrow(&self) -> ArrowGeometry {
        ArrowGeometry {
            width: self.arrow_width,
            height: self.arrow_height,
            source_margin: self.arrow_source_margin,
            target_margin: self.arrow_target_margin,
        }
    }

    /// Corner radii of the bubble body.
    #[must_use]
    pub fn radii(&self) -> RoundedRectRadii {
        RoundedRectRadii::from_single_radius(self.corner_radius.max(0.0))
    }

    /// Insets a host should apply around the content inside the surface.
    ///
    /// This is the padding plus the margin, the arrow on the anchor side, and
    /// the shadow padding on every side.
    #[must_use]
    pub fn content_insets(&self) -> Insets {
        let edge = self.position.arrow_edge();
        let arrow = |side: Edge| {
            if edge == side {
                self.arrow_height
            } else {
                0.0
            }
        };
        Insets::new(
            self.padding.x0 + self.margin.x0 + arrow(Edge::Left) + SHADOW_PADDING,
            self.padding.y0 + self.margin.y0 + arrow(Edge::Top) + SHADOW_PADDING,
            self.padding.x1 + self.margin.x1 + arrow(Edge::Right) + SHADOW_PADDING,
            self.padding.y1 + self.margin.y1 + arrow(Edge::Bottom) + SHADOW_PADDING,
        )
    }
}
