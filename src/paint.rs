//! Fill and stroke attributes.
//!
//! Shapes keep paint as the caller set it ([`Fill`], [`Stroke`]); adapters
//! receive the resolved form ([`ResolvedFill`], [`ResolvedStroke`]) with
//! every default filled in and gradient stops normalised.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::basics::{round_half_up, PointD};

// ============================================================================
// Gradient stops
// ============================================================================

/// A colour stop as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, `0..=1`. Missing stops are spread
    /// evenly by index.
    pub offset: Option<f64>,
    pub color: String,
    pub opacity: Option<f64>,
}

impl GradientStop {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            offset: None,
            color: color.into(),
            opacity: None,
        }
    }

    pub fn at(offset: f64, color: impl Into<String>) -> Self {
        Self {
            offset: Some(offset),
            ..Self::new(color)
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// A stop ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStop {
    /// Offset snapped to whole percent, as a fraction in `[0, 1]`.
    pub offset: f64,
    pub color: String,
    /// Clamped to `[0, 1]`.
    pub opacity: f64,
}

impl ResolvedStop {
    /// Offset as an SVG percentage, e.g. `"33%"`.
    pub fn offset_percent(&self) -> String {
        format!("{}%", round_half_up(self.offset * 100.0))
    }
}

/// Fill in missing offsets (`i / (n - 1)`, 0 for a lone stop), snap
/// offsets to whole percent, then clamp offsets and opacities to `[0, 1]`.
pub fn resolve_stops(stops: &[GradientStop]) -> Vec<ResolvedStop> {
    let len = stops.len();
    stops
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            let offset = stop.offset.unwrap_or_else(|| {
                if len > 1 {
                    i as f64 / (len - 1) as f64
                } else {
                    0.0
                }
            });
            ResolvedStop {
                offset: (round_half_up(offset * 100.0) / 100.0).clamp(0.0, 1.0),
                color: stop.color.clone(),
                opacity: stop.opacity.unwrap_or(1.0).clamp(0.0, 1.0),
            }
        })
        .collect()
}

// ============================================================================
// Fill
// ============================================================================

/// Linear gradient: a horizontal axis across the shape, rotated about the
/// shape centre by `rotation` degrees.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearGradient {
    pub stops: Vec<GradientStop>,
    pub rotation: f64,
}

/// Radial gradient. Centre, focus and radius are fractions of the shape's
/// box and default to 0.5.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RadialGradient {
    pub stops: Vec<GradientStop>,
    pub cx: Option<f64>,
    pub cy: Option<f64>,
    pub fx: Option<f64>,
    pub fy: Option<f64>,
    pub r: Option<f64>,
}

/// Shape fill as set by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fill {
    None,
    /// Solid colour; without a colour nothing is painted.
    Solid {
        color: Option<String>,
        opacity: Option<f64>,
    },
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Default for Fill {
    fn default() -> Self {
        Fill::Solid {
            color: None,
            opacity: None,
        }
    }
}

impl Fill {
    /// Solid fill; the colour `"none"` is treated as no colour.
    pub fn solid(color: impl Into<String>) -> Self {
        let color = color.into();
        Fill::Solid {
            color: if color == "none" { None } else { Some(color) },
            opacity: None,
        }
    }

    pub fn with_opacity(self, opacity: f64) -> Self {
        match self {
            Fill::Solid { color, .. } => Fill::Solid {
                color,
                opacity: Some(opacity),
            },
            other => other,
        }
    }

    /// `true` when the fill paints anything. Finished paths are closed
    /// exactly when this holds.
    pub fn is_painted(&self) -> bool {
        match self {
            Fill::None => false,
            Fill::Solid { color, .. } => color.is_some(),
            Fill::Linear(_) | Fill::Radial(_) => true,
        }
    }

    /// Resolve against a shape box of `width` by `height`.
    pub fn resolve(&self, width: f64, height: f64) -> ResolvedFill {
        match self {
            Fill::None | Fill::Solid { color: None, .. } => ResolvedFill::None,
            Fill::Solid {
                color: Some(color),
                opacity,
            } => ResolvedFill::Solid {
                color: color.clone(),
                opacity: opacity.unwrap_or(1.0),
            },
            Fill::Linear(g) => ResolvedFill::Linear {
                stops: resolve_stops(&g.stops),
                rotation: g.rotation,
                pivot: PointD::new(width / 2.0, height / 2.0),
                start: PointD::new(0.0, height / 2.0),
                end: PointD::new(width, height / 2.0),
            },
            Fill::Radial(g) => ResolvedFill::Radial {
                stops: resolve_stops(&g.stops),
                cx: g.cx.unwrap_or(0.5),
                cy: g.cy.unwrap_or(0.5),
                fx: g.fx.unwrap_or(0.5),
                fy: g.fy.unwrap_or(0.5),
                r: g.r.unwrap_or(0.5),
            },
        }
    }
}

/// Fill with all defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedFill {
    None,
    Solid {
        color: String,
        opacity: f64,
    },
    /// Axis from `start` to `end` in shape-local user space, rotated by
    /// `rotation` degrees about `pivot`.
    Linear {
        stops: Vec<ResolvedStop>,
        rotation: f64,
        pivot: PointD,
        start: PointD,
        end: PointD,
    },
    /// Fractions of the shape box.
    Radial {
        stops: Vec<ResolvedStop>,
        cx: f64,
        cy: f64,
        fx: f64,
        fy: f64,
        r: f64,
    },
}

// ============================================================================
// Stroke
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    #[default]
    Round,
    Bevel,
    /// Miter join with the given miter limit.
    Miter(f64),
}

impl LineJoin {
    pub fn as_str(self) -> &'static str {
        match self {
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
            LineJoin::Miter(_) => "miter",
        }
    }
}

/// Dash pattern: solid, or alternating dash/gap lengths.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashPattern {
    #[default]
    None,
    Dashes(Vec<f64>),
}

impl fmt::Display for DashPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashPattern::None => f.write_str("none"),
            DashPattern::Dashes(d) => {
                for (i, v) in d.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{v}")?;
                }
                Ok(())
            }
        }
    }
}

/// Shape stroke as set by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Option<String>,
    pub weight: f64,
    pub opacity: Option<f64>,
    pub dash: DashPattern,
    pub linecap: Option<LineCap>,
    pub linejoin: Option<LineJoin>,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Some("#000".to_string()),
            weight: 1.0,
            opacity: Some(1.0),
            dash: DashPattern::None,
            linecap: None,
            linejoin: None,
        }
    }
}

impl Stroke {
    pub fn new(color: impl Into<String>, weight: f64) -> Self {
        Self {
            color: Some(color.into()),
            weight,
            ..Self::default()
        }
    }

    /// Amount the stroke widens a shape's bounds on every side.
    pub fn bounds_weight(&self) -> f64 {
        if self.weight.is_nan() {
            0.0
        } else {
            self.weight
        }
    }

    /// `None` unless the weight is positive.
    pub fn resolve(&self) -> Option<ResolvedStroke> {
        if self.weight.is_nan() || self.weight <= 0.0 {
            return None;
        }
        let linejoin = match self.linejoin.unwrap_or_default() {
            LineJoin::Miter(limit) => LineJoin::Miter(limit.max(1.0)),
            other => other,
        };
        Some(ResolvedStroke {
            color: self.color.clone().unwrap_or_else(|| "#000000".to_string()),
            weight: self.weight,
            opacity: self.opacity.unwrap_or(1.0),
            dash: self.dash.clone(),
            linecap: self.linecap.unwrap_or_default(),
            linejoin,
        })
    }
}

/// Stroke with all defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStroke {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub dash: DashPattern,
    pub linecap: LineCap,
    pub linejoin: LineJoin,
}

// ============================================================================
// Tests
// ============================================================================
