use super::Body;
use crate::{InertiaModel, Propeller, Result};

/// Incrementally assembles a [`Body`], validating it on [`Builder::build`].
///
/// ```
/// use rotor_actuation::{Body, Handedness, InertiaModel, Propeller};
/// use nalgebra::Vector3;
///
/// let prop = |x: f64, handedness| {
///     Propeller::new(Vector3::new(x, 0., 0.), -Vector3::z(), handedness, 1e-5, 1e-6, 1000.)
/// };
///
/// let body = Body::builder()
///     .inertia(InertiaModel::new(0.8, 0.01, 0.01, 0.02, 0., 0., 0.)?)
///     .propeller(prop(0.2, Handedness::CounterClockwise)?)
///     .propeller(prop(-0.2, Handedness::Clockwise)?)
///     .build()?;
///
/// assert_eq!(body.len(), 2);
/// # Ok::<(), rotor_actuation::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    inertia: InertiaModel,
    propellers: Vec<Propeller>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            inertia: InertiaModel::unit(),
            propellers: Vec::new(),
        }
    }
}

impl Builder {
    pub fn inertia(mut self, inertia: InertiaModel) -> Self {
        self.inertia = inertia;
        self
    }

    pub fn propeller(mut self, propeller: Propeller) -> Self {
        self.propellers.push(propeller);
        self
    }

    pub fn propellers(mut self, propellers: impl IntoIterator<Item = Propeller>) -> Self {
        self.propellers.extend(propellers);
        self
    }

    pub fn build(self) -> Result<Body> {
        Body::new(self.inertia, self.propellers)
    }
}
