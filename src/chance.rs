use rand::Rng;

use crate::error::{PapergenError, PapergenResult};

/// A biased-coin draw carried across the renderer boundary.
///
/// The configuration resolver only fixes the probability; the rendering
/// engine samples it at the point of use. Deferring the draw keeps the
/// resolved request serializable and leaves the draw order under the
/// engine's control, which is what makes seeded runs reproducible.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Chance {
    p: f64,
}

impl Chance {
    pub fn new(p: f64) -> PapergenResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(PapergenError::config(format!(
                "probability {p} is outside [0, 1]"
            )));
        }
        Ok(Self { p })
    }

    /// A draw that always comes up true.
    pub fn always() -> Self {
        Self { p: 1.0 }
    }

    /// A draw that always comes up false.
    pub fn never() -> Self {
        Self { p: 0.0 }
    }

    pub fn probability(self) -> f64 {
        self.p
    }

    pub fn sample(self, rng: &mut impl Rng) -> bool {
        rng.random_bool(self.p)
    }
}
