use crate::{Error, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Axes shorter than this cannot be normalized.
const MIN_AXIS_NORM: f64 = 1e-12;

/// Spin direction of a propeller viewed along its thrust axis.
///
/// The reaction torque on the airframe is `sign() * torque_coeff * ω² * axis`,
/// so a counter-clockwise propeller pushes the body about `+axis` and a
/// clockwise one about `-axis`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Handedness {
    CounterClockwise,
    Clockwise,
}

impl Handedness {
    pub fn sign(self) -> f64 {
        match self {
            Self::CounterClockwise => 1.,
            Self::Clockwise => -1.,
        }
    }
}

impl TryFrom<i8> for Handedness {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            1 => Ok(Self::CounterClockwise),
            -1 => Ok(Self::Clockwise),
            other => Err(Error::InvalidPropeller(format!(
                "handedness must be +1 or -1, got {other}"
            ))),
        }
    }
}

impl From<Handedness> for i8 {
    fn from(handedness: Handedness) -> Self {
        match handedness {
            Handedness::CounterClockwise => 1,
            Handedness::Clockwise => -1,
        }
    }
}

/// A single propeller modelled as a quadratic actuator disk.
///
/// ```
/// use rotor_actuation::{Handedness, Propeller};
/// use nalgebra::Vector3;
///
/// let prop = Propeller::new(
///     Vector3::new(0., 0., -1.),
///     Vector3::new(0., 0., -2.),
///     Handedness::CounterClockwise,
///     5.15e-6,
///     1.72e-6,
///     3927.,
/// )
/// .unwrap();
///
/// // The axis is normalized on construction
/// assert_eq!(prop.axis(), Vector3::new(0., 0., -1.));
/// approx::assert_relative_eq!(prop.thrust(1000.).z, -5.15, epsilon = 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PropellerParams", into = "PropellerParams")]
pub struct Propeller {
    location: Vector3<f64>,
    axis: Vector3<f64>,
    handedness: Handedness,
    force_coeff: f64,
    torque_coeff: f64,
    max_speed: f64,
}

/// Unvalidated propeller description, as read from a body description.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PropellerParams {
    /// Hub position relative to the centre of mass (m).
    pub location: [f64; 3],
    /// Thrust direction, not necessarily normalized.
    pub axis: [f64; 3],
    /// +1 for counter-clockwise, -1 for clockwise.
    pub handedness: i8,
    pub force_coeff: f64,
    pub torque_coeff: f64,
    /// Maximum angular speed (rad/s).
    pub max_speed: f64,
}

impl Propeller {
    pub fn new(
        location: Vector3<f64>,
        axis: Vector3<f64>,
        handedness: Handedness,
        force_coeff: f64,
        torque_coeff: f64,
        max_speed: f64,
    ) -> Result<Self> {
        if location.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidPropeller(format!(
                "location must be finite, got {location:?}"
            )));
        }

        let norm = axis.norm();
        if !norm.is_finite() || norm <= MIN_AXIS_NORM {
            return Err(Error::InvalidPropeller(format!(
                "axis {:?} cannot be normalized",
                axis.as_slice()
            )));
        }

        for (name, value) in [
            ("force coefficient", force_coeff),
            ("torque coefficient", torque_coeff),
            ("maximum speed", max_speed),
        ] {
            if !value.is_finite() || value <= 0. {
                return Err(Error::InvalidPropeller(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        Ok(Self {
            location,
            axis: axis / norm,
            handedness,
            force_coeff,
            torque_coeff,
            max_speed,
        })
    }

    pub fn location(&self) -> Vector3<f64> {
        self.location
    }

    /// Unit thrust direction.
    pub fn axis(&self) -> Vector3<f64> {
        self.axis
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn force_coeff(&self) -> f64 {
        self.force_coeff
    }

    pub fn torque_coeff(&self) -> f64 {
        self.torque_coeff
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Thrust force per unit squared speed.
    pub fn thrust_per_speed_squared(&self) -> Vector3<f64> {
        self.axis * self.force_coeff
    }

    /// Reaction torque about the propeller axis per unit squared speed.
    pub fn reaction_per_speed_squared(&self) -> Vector3<f64> {
        self.axis * (self.handedness.sign() * self.torque_coeff)
    }

    /// Thrust force vector at angular speed `speed` (rad/s).
    pub fn thrust(&self, speed: f64) -> Vector3<f64> {
        self.thrust_per_speed_squared() * speed.powi(2)
    }

    /// Reaction torque the spinning propeller exerts on the airframe.
    pub fn reaction_torque(&self, speed: f64) -> Vector3<f64> {
        self.reaction_per_speed_squared() * speed.powi(2)
    }

    /// Moment of this propeller's thrust about the centre of mass.
    pub fn thrust_moment(&self, speed: f64) -> Vector3<f64> {
        self.location.cross(&self.thrust(speed))
    }

    /// Magnitude of the thrust at `max_speed`.
    pub fn max_thrust(&self) -> f64 {
        self.force_coeff * self.max_speed.powi(2)
    }

    /// Returns `true` if `speed` lies in `[0, max_speed]`.
    pub fn accepts(&self, speed: f64) -> bool {
        self.check_speed(0, speed).is_ok()
    }

    /// Strict range check of the speed commanded to the propeller at `index`.
    pub fn check_speed(&self, index: usize, speed: f64) -> Result<()> {
        check_speed_range(index, speed, self.max_speed)
    }

    /// Saturate `speed` into `[0, max_speed]`, mapping NaN to zero.
    pub fn clamp_speed(&self, speed: f64) -> f64 {
        if speed.is_nan() {
            return 0.;
        }
        speed.clamp(0., self.max_speed)
    }

    /// Returns `true` if both propellers share location, axis and handedness.
    pub(crate) fn coincides_with(
        &self,
        other: &Self,
        location_tolerance: f64,
        axis_tolerance: f64,
    ) -> bool {
        self.handedness == other.handedness
            && (self.location - other.location).amax() <= location_tolerance
            && (self.axis - other.axis).amax() <= axis_tolerance
    }
}

/// Fails with [`Error::SpeedOutOfRange`] unless `speed` lies in `[0, max_speed]`.
pub(crate) fn check_speed_range(index: usize, speed: f64, max_speed: f64) -> Result<()> {
    if !(0. ..=max_speed).contains(&speed) {
        return Err(Error::SpeedOutOfRange {
            index,
            speed,
            max_speed,
        });
    }
    Ok(())
}

impl TryFrom<PropellerParams> for Propeller {
    type Error = Error;

    fn try_from(params: PropellerParams) -> Result<Self> {
        Self::new(
            Vector3::from(params.location),
            Vector3::from(params.axis),
            Handedness::try_from(params.handedness)?,
            params.force_coeff,
            params.torque_coeff,
            params.max_speed,
        )
    }
}

impl From<Propeller> for PropellerParams {
    fn from(propeller: Propeller) -> Self {
        Self {
            location: propeller.location.into(),
            axis: propeller.axis.into(),
            handedness: propeller.handedness.into(),
            force_coeff: propeller.force_coeff,
            torque_coeff: propeller.torque_coeff,
            max_speed: propeller.max_speed,
        }
    }
}
