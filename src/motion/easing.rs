//! Easing curves.
//!
//! Each curve maps normalized progress `u` to eased progress. Curves are
//! only guaranteed meaningful on `[0, 1]`; the motion engine never
//! evaluates outside that range, it holds or snaps instead.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Easing {
    /// `u` unchanged.
    Linear,
    /// Slow start: `u^p`.
    In(f32),
    /// Slow finish: `1 - (1-u)^p`.
    Out(f32),
    /// Slow start and finish, built from mirrored `In`/`Out` halves.
    InOut(f32),
    /// `3u² - 2u³`.
    Smoothstep,
    /// Linear with a sine wobble of the given amplitude: `u + a·sin(2πu)`.
    Sin(f32),
}

impl Default for Easing {
    fn default() -> Self {
        Easing::InOut(2.0)
    }
}

impl Easing {
    /// Evaluate the curve at `u`.
    ///
    /// ```
    /// use bartok::motion::Easing;
    ///
    /// assert_eq!(Easing::Linear.ease(0.25), 0.25);
    /// assert_eq!(Easing::Smoothstep.ease(0.5), 0.5);
    /// assert_eq!(Easing::InOut(2.0).ease(1.0), 1.0);
    /// ```
    #[must_use]
    pub fn ease(self, u: f32) -> f32 {
        match self {
            Easing::Linear => u,
            Easing::In(p) => u.powf(p),
            Easing::Out(p) => 1.0 - (1.0 - u).powf(p),
            Easing::InOut(p) => {
                if u <= 0.5 {
                    0.5 * (u * 2.0).powf(p)
                } else {
                    0.5 + 0.5 * (1.0 - (1.0 - (2.0 * (u - 0.5))).powf(p))
                }
            }
            Easing::Smoothstep => u * u * (3.0 - 2.0 * u),
            Easing::Sin(a) => u + a * (std::f32::consts::TAU * u).sin(),
        }
    }
}
