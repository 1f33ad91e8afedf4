use std::str::FromStr;

use crate::foundation::error::DistortError;

/// Easing functions used to map normalized tween progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Exponential ease-in.
    InExpo,
    /// Exponential ease-out.
    OutExpo,
    /// Exponential ease-in/out.
    InOutExpo,
}

impl Ease {
    /// Every supported curve, in declaration order.
    pub const ALL: [Ease; 10] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InOutExpo,
    ];

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            // The exponential curves never reach their endpoints on their own.
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::InOutExpo => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }
}

impl FromStr for Ease {
    type Err = DistortError;

    /// Accepts variant names (`OutExpo`), snake case (`out_expo`) and the dotted tween-library
    /// spelling (`expo.out`, `power1.inOut`, `none`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        let ease = match norm.as_str() {
            "linear" | "none" => Self::Linear,
            "inquad" | "quad.in" | "power1.in" => Self::InQuad,
            "outquad" | "quad.out" | "power1.out" => Self::OutQuad,
            "inoutquad" | "quad.inout" | "power1.inout" => Self::InOutQuad,
            "incubic" | "cubic.in" | "power2.in" => Self::InCubic,
            "outcubic" | "cubic.out" | "power2.out" => Self::OutCubic,
            "inoutcubic" | "cubic.inout" | "power2.inout" => Self::InOutCubic,
            "inexpo" | "expo.in" => Self::InExpo,
            "outexpo" | "expo.out" | "expo.easeout" => Self::OutExpo,
            "inoutexpo" | "expo.inout" => Self::InOutExpo,
            _ => {
                return Err(DistortError::configuration(format!(
                    "unknown easing '{}'",
                    s.trim()
                )));
            }
        };
        Ok(ease)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
