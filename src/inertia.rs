use crate::{Error, Result};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// Tolerance of the positive-semidefinite check, relative to the largest principal moment.
const PSD_TOLERANCE: f64 = 1e-9;

/// Mass and moments of inertia of a rigid body about its centre of mass.
///
/// ```
/// use rotor_actuation::InertiaModel;
///
/// let inertia = InertiaModel::new(1.2, 0.03, 0.03, 0.05, 0., 0., 0.).unwrap();
/// assert_eq!(inertia.tensor()[(2, 2)], 0.05);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InertiaParams")]
pub struct InertiaModel {
    /// Total mass (kg).
    mass: f64,
    /// Moment of inertia about the x axis (kg·m²).
    ix: f64,
    /// Moment of inertia about the y axis (kg·m²).
    iy: f64,
    /// Moment of inertia about the z axis (kg·m²).
    iz: f64,
    /// Product of inertia (x-y).
    ixy: f64,
    /// Product of inertia (x-z).
    ixz: f64,
    /// Product of inertia (y-z).
    iyz: f64,
}

/// Unvalidated inertia description, as read from a body description.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct InertiaParams {
    pub mass: f64,
    pub ix: f64,
    pub iy: f64,
    pub iz: f64,
    #[serde(default)]
    pub ixy: f64,
    #[serde(default)]
    pub ixz: f64,
    #[serde(default)]
    pub iyz: f64,
}

impl InertiaModel {
    pub fn new(mass: f64, ix: f64, iy: f64, iz: f64, ixy: f64, ixz: f64, iyz: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0. {
            return Err(Error::InvalidInertia(format!(
                "mass must be positive, got {mass}"
            )));
        }
        if [ix, iy, iz, ixy, ixz, iyz].iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidInertia(
                "moments and products of inertia must be finite".into(),
            ));
        }

        let inertia = Self {
            mass,
            ix,
            iy,
            iz,
            ixy,
            ixz,
            iyz,
        };

        let tensor = inertia.tensor();
        let scale = ix.abs().max(iy.abs()).max(iz.abs());
        let smallest = tensor.symmetric_eigenvalues().min();
        if smallest < -PSD_TOLERANCE * scale {
            return Err(Error::InvalidInertia(format!(
                "inertia tensor is not positive-semidefinite (eigenvalue {smallest})"
            )));
        }

        Ok(inertia)
    }

    /// Unit mass with an identity inertia tensor.
    pub fn unit() -> Self {
        Self {
            mass: 1.,
            ix: 1.,
            iy: 1.,
            iz: 1.,
            ixy: 0.,
            ixz: 0.,
            iyz: 0.,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Principal moments `(ix, iy, iz)`.
    pub fn moments(&self) -> [f64; 3] {
        [self.ix, self.iy, self.iz]
    }

    /// Products of inertia `(ixy, ixz, iyz)`.
    pub fn products(&self) -> [f64; 3] {
        [self.ixy, self.ixz, self.iyz]
    }

    /// The symmetric inertia tensor, with products of inertia negated off the diagonal.
    pub fn tensor(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.ix, -self.ixy, -self.ixz, //
            -self.ixy, self.iy, -self.iyz, //
            -self.ixz, -self.iyz, self.iz,
        )
    }

    /// Inverse of the inertia tensor, or `None` for a singular (degenerate) body.
    pub fn inverse(&self) -> Option<Matrix3<f64>> {
        self.tensor().try_inverse()
    }
}

impl TryFrom<InertiaParams> for InertiaModel {
    type Error = Error;

    fn try_from(params: InertiaParams) -> Result<Self> {
        Self::new(
            params.mass,
            params.ix,
            params.iy,
            params.iz,
            params.ixy,
            params.ixz,
            params.iyz,
        )
    }
}
