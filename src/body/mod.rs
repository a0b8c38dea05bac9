use crate::{
    inertia::InertiaParams, propeller::PropellerParams, Effectiveness, Error, InertiaModel,
    Propeller, Result, Wrench,
};
use log::debug;
use serde::{Deserialize, Serialize};

mod builder;
pub use builder::Builder;

/// Propellers closer than this in every axis component, and in every location
/// component relative to the body size, are considered identical.
const DUPLICATE_TOLERANCE: f64 = 1e-9;

/// A rigid airframe and its ordered set of propellers.
///
/// The propeller order defines the index used by speed vectors and by the
/// columns of the [`Effectiveness`] matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BodyParams")]
pub struct Body {
    inertia: InertiaModel,
    propellers: Vec<Propeller>,
}

/// Unvalidated body description, as read from a configuration source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BodyParams {
    pub inertia: InertiaParams,
    pub propellers: Vec<PropellerParams>,
}

impl Body {
    pub fn new(inertia: InertiaModel, propellers: Vec<Propeller>) -> Result<Self> {
        if propellers.is_empty() {
            return Err(Error::EmptyBody);
        }

        let size = propellers
            .iter()
            .map(|prop| prop.location().amax())
            .fold(0., f64::max);
        let location_tolerance = DUPLICATE_TOLERANCE * size;

        for (first, a) in propellers.iter().enumerate() {
            if let Some(offset) = propellers[first + 1..]
                .iter()
                .position(|b| a.coincides_with(b, location_tolerance, DUPLICATE_TOLERANCE))
            {
                return Err(Error::DuplicatePropeller {
                    first,
                    second: first + 1 + offset,
                });
            }
        }

        debug!(
            "Created body with mass {} kg and {} propellers",
            inertia.mass(),
            propellers.len()
        );

        Ok(Self {
            inertia,
            propellers,
        })
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn inertia(&self) -> &InertiaModel {
        &self.inertia
    }

    pub fn propellers(&self) -> &[Propeller] {
        &self.propellers
    }

    pub fn propeller(&self, index: usize) -> Option<&Propeller> {
        self.propellers.get(index)
    }

    /// Number of propellers.
    pub fn len(&self) -> usize {
        self.propellers.len()
    }

    /// Always `false`, a body has at least one propeller.
    pub fn is_empty(&self) -> bool {
        self.propellers.is_empty()
    }

    /// Maximum speed of every propeller, in propeller order.
    pub fn max_speeds(&self) -> Vec<f64> {
        self.propellers.iter().map(Propeller::max_speed).collect()
    }

    /// Verify that `values` has one entry per propeller.
    pub fn check_len(&self, values: &[f64]) -> Result<()> {
        if values.len() != self.propellers.len() {
            return Err(Error::DimensionMismatch {
                expected: self.propellers.len(),
                actual: values.len(),
            });
        }
        Ok(())
    }

    /// Verify that `speeds` has one entry per propeller, each within `[0, max_speed]`.
    pub fn check_speeds(&self, speeds: &[f64]) -> Result<()> {
        self.check_len(speeds)?;

        self.propellers
            .iter()
            .zip(speeds)
            .enumerate()
            .try_for_each(|(index, (prop, &speed))| prop.check_speed(index, speed))
    }

    /// Clamp each commanded speed into its propeller's range.
    ///
    /// Evaluation through [`Body::wrench`] rejects out of range speeds, this is
    /// the explicit opt-in for callers that prefer saturation.
    pub fn saturate(&self, speeds: &[f64]) -> Result<Vec<f64>> {
        self.check_len(speeds)?;

        Ok(self
            .propellers
            .iter()
            .zip(speeds)
            .map(|(prop, &speed)| prop.clamp_speed(speed))
            .collect())
    }

    /// Net body-frame wrench for the commanded propeller speeds (rad/s).
    pub fn wrench(&self, speeds: &[f64]) -> Result<Wrench> {
        crate::compute_wrench(self, speeds)
    }

    /// Effectiveness matrix mapping squared propeller speeds to the wrench.
    pub fn effectiveness(&self) -> Effectiveness {
        Effectiveness::new(self)
    }

    /// Total mass times `gravity`, the thrust needed to hover.
    pub fn weight(&self, gravity: f64) -> f64 {
        self.inertia.mass() * gravity
    }
}

impl TryFrom<BodyParams> for Body {
    type Error = Error;

    fn try_from(params: BodyParams) -> Result<Self> {
        let propellers = params
            .propellers
            .into_iter()
            .map(Propeller::try_from)
            .collect::<Result<Vec<_>>>()?;

        Self::new(InertiaModel::try_from(params.inertia)?, propellers)
    }
}
