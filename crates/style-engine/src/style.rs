//! Concrete style objects handed to the rendering surface.
//!
//! A [`Style`] has four optional parts: area fill, outline stroke, point
//! image and text label. Colors serialize as `[r, g, b, a]`.

use serde::{Deserialize, Serialize};
use symbology_common::symbology::VectorBase;
use symbology_common::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// A filled and outlined circle marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    pub radius: f64,
    pub fill: Fill,
    pub stroke: Stroke,
}

/// An image marker anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconStyle {
    pub src: String,
    /// Anchor as fractions of the image size.
    pub anchor: [f64; 2],
    /// Rotation in radians.
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
    /// Tint; absent when the icon is drawn with its own colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImageStyle {
    Circle(CircleStyle),
    Icon(IconStyle),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub text: String,
    pub fill: Fill,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextStyle>,
}

impl Stroke {
    pub fn from_base(base: &VectorBase) -> Self {
        Self {
            color: base.stroke_color(),
            width: base.stroke_width,
        }
    }
}

impl Style {
    /// Area style: fill and outline.
    pub fn area(fill: Color, stroke: Stroke) -> Self {
        Self {
            fill: Some(Fill { color: fill }),
            stroke: Some(stroke),
            ..Default::default()
        }
    }

    /// Point style: a circle marker carrying the fill and outline.
    pub fn circle(radius: f64, fill: Color, stroke: Stroke) -> Self {
        Self {
            image: Some(ImageStyle::Circle(CircleStyle {
                radius,
                fill: Fill { color: fill },
                stroke,
            })),
            ..Default::default()
        }
    }

    pub fn icon(icon: IconStyle) -> Self {
        Self {
            image: Some(ImageStyle::Icon(icon)),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: Option<TextStyle>) -> Self {
        self.text = text;
        self
    }

    /// Fill color of the area or of the circle marker.
    pub fn fill_color(&self) -> Option<Color> {
        match (&self.fill, &self.image) {
            (Some(fill), _) => Some(fill.color),
            (None, Some(ImageStyle::Circle(circle))) => Some(circle.fill.color),
            _ => None,
        }
    }

    pub fn circle_radius(&self) -> Option<f64> {
        match &self.image {
            Some(ImageStyle::Circle(circle)) => Some(circle.radius),
            _ => None,
        }
    }
}
