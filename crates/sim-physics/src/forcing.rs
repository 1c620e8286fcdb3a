//! Time-dependent scalar profiles
//!
//! Used as rest-position, field-force and gravity inputs. The UI keeps a
//! catalog of template instances and copies the selected one into the running
//! body, so the body never aliases a value that the panel is still editing.

use std::fmt;

/// A closed family of `f(t) -> f32` profiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForcingFunction {
    /// `A`
    Constant { a: f32 },
    /// `A` before `c`, `B` from `c` onwards
    Step { a: f32, b: f32, c: f32 },
    /// `sgn(A·sin(ωt + φ))`
    SignSine { a: f32, omega: f32, phi: f32 },
    /// `A·sin(ωt + φ)`
    Sine { a: f32, omega: f32, phi: f32 },
}

impl ForcingFunction {
    pub fn constant(a: f32) -> Self {
        Self::Constant { a }
    }

    pub fn step(a: f32, b: f32, c: f32) -> Self {
        Self::Step { a, b, c }
    }

    pub fn sign_sine(a: f32, omega: f32, phi: f32) -> Self {
        Self::SignSine { a, omega, phi }
    }

    pub fn sine(a: f32, omega: f32, phi: f32) -> Self {
        Self::Sine { a, omega, phi }
    }

    /// Evaluate the profile at time `t` (seconds).
    pub fn evaluate(&self, t: f32) -> f32 {
        match *self {
            Self::Constant { a } => a,
            Self::Step { a, b, c } => {
                if t < c {
                    a
                } else {
                    b
                }
            }
            Self::SignSine { a, omega, phi } => sign(a * (omega * t + phi).sin()),
            Self::Sine { a, omega, phi } => a * (omega * t + phi).sin(),
        }
    }

    /// Formula shown next to the parameter editors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "A",
            Self::Step { .. } => "(t < c) ? A : B",
            Self::SignSine { .. } => "sgn(A·sin(wt+o))",
            Self::Sine { .. } => "A·sin(wt+o)",
        }
    }

    /// The four templates offered by a selection combo, all scaled by `amplitude`.
    pub fn catalog(amplitude: f32) -> [Self; 4] {
        [
            Self::constant(amplitude),
            Self::step(amplitude, 0.0, 0.0),
            Self::sign_sine(amplitude, 1.0, 0.0),
            Self::sine(amplitude, 1.0, 0.0),
        ]
    }
}

impl Default for ForcingFunction {
    fn default() -> Self {
        Self::constant(0.0)
    }
}

impl fmt::Display for ForcingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// `f32::signum` maps zero to one, the profiles need a true three-way sign.
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
