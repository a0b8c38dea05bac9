//! Named airframes.
//!
//! Every preset uses a unit mass and identity inertia tensor. Propellers share
//! the coefficients `5.15e-6` N/(rad/s)² and `1.72e-6` N·m/(rad/s)² with a
//! 3927 rad/s limit, except the dualquad's upper layer.

use crate::{Body, Error, Handedness, InertiaModel, Propeller, Result};
use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;
use nalgebra::Vector3;

const FORCE_COEFF: f64 = 5.15e-6;
const TORQUE_COEFF: f64 = 1.72e-6;
const MAX_SPEED: f64 = 3927.;

// Larger, slower propellers of the dualquad's upper layer
const HEAVY_FORCE_COEFF: f64 = 5.40e-5;
const HEAVY_TORQUE_COEFF: f64 = 3.60e-5;
const HEAVY_MAX_SPEED: f64 = 1963.;

const CCW: Handedness = Handedness::CounterClockwise;
const CW: Handedness = Handedness::Clockwise;

/// A named body from the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Six propellers evenly spaced on a ring of radius `arm_length`.
    Biquadcopter,
    /// Coaxial pair thrusting in opposite directions.
    Countercopter,
    /// A single propeller.
    Monocopter,
    /// Two stacked quad layers with different propeller types.
    Dualquad,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Self::Biquadcopter,
        Self::Countercopter,
        Self::Monocopter,
        Self::Dualquad,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Biquadcopter => "biquadcopter",
            Self::Countercopter => "countercopter",
            Self::Monocopter => "monocopter",
            Self::Dualquad => "dualquad",
        }
    }

    /// Construct the body, scaling ring geometry by `arm_length` (m).
    ///
    /// Bodies with fixed geometry ignore the scale, but it must still be a positive length.
    pub fn build(self, arm_length: f64) -> Result<Body> {
        check_scale(arm_length)?;

        match self {
            Self::Biquadcopter => biquadcopter(arm_length),
            Self::Countercopter => countercopter(),
            Self::Monocopter => monocopter(),
            Self::Dualquad => dualquad(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPreset(s.to_owned()))
    }
}

/// Look up a preset by name and build it.
///
/// ```
/// use rotor_actuation::catalog;
///
/// let body = catalog::body("Biquadcopter", 0.25)?;
/// assert_eq!(body.len(), 6);
///
/// assert!(catalog::body("tricopter", 0.25).is_err());
/// # Ok::<(), rotor_actuation::Error>(())
/// ```
pub fn body(name: &str, arm_length: f64) -> Result<Body> {
    name.parse::<Preset>()?.build(arm_length)
}

/// Six propellers on a horizontal ring, 60° apart.
///
/// Propellers 0 and 3 thrust along `-z`, the other four along `+y`.
pub fn biquadcopter(arm_length: f64) -> Result<Body> {
    check_scale(arm_length)?;

    let ring = |index: u8, axis: Vector3<f64>, handedness| {
        let angle = f64::from(index) * PI / 3.;
        light_propeller(
            Vector3::new(arm_length * angle.cos(), arm_length * angle.sin(), 0.),
            axis,
            handedness,
        )
    };

    let up = -Vector3::z();
    let side = Vector3::y();

    unit_body(vec![
        ring(0, up, CCW)?,
        ring(1, side, CW)?,
        ring(2, side, CCW)?,
        ring(3, up, CW)?,
        ring(4, side, CW)?,
        ring(5, side, CCW)?,
    ])
}

/// Two coaxial propellers above and below the centre of mass, thrusting away
/// from each other with the same handedness.
pub fn countercopter() -> Result<Body> {
    unit_body(vec![
        light_propeller(-Vector3::z(), -Vector3::z(), CCW)?,
        light_propeller(Vector3::z(), Vector3::z(), CCW)?,
    ])
}

/// A single propeller below the centre of mass, thrusting along `-z`.
pub fn monocopter() -> Result<Body> {
    unit_body(vec![light_propeller(-Vector3::z(), -Vector3::z(), CCW)?])
}

/// A quad of light propellers thrusting along `-z`, stacked with a quad of
/// heavy propellers at the same corners thrusting along `+z`.
pub fn dualquad() -> Result<Body> {
    const CORNERS: [(f64, f64, Handedness); 4] =
        [(1., 1., CCW), (-1., 1., CW), (-1., -1., CCW), (1., -1., CW)];

    let lower = CORNERS.iter().map(|&(x, y, handedness)| {
        light_propeller(Vector3::new(x, y, 0.), -Vector3::z(), handedness)
    });
    let upper = CORNERS.iter().map(|&(x, y, handedness)| {
        Propeller::new(
            Vector3::new(x, y, 0.),
            Vector3::z(),
            handedness,
            HEAVY_FORCE_COEFF,
            HEAVY_TORQUE_COEFF,
            HEAVY_MAX_SPEED,
        )
    });

    unit_body(lower.chain(upper).collect::<Result<Vec<_>>>()?)
}

fn light_propeller(
    location: Vector3<f64>,
    axis: Vector3<f64>,
    handedness: Handedness,
) -> Result<Propeller> {
    Propeller::new(location, axis, handedness, FORCE_COEFF, TORQUE_COEFF, MAX_SPEED)
}

fn unit_body(propellers: Vec<Propeller>) -> Result<Body> {
    Body::new(InertiaModel::unit(), propellers)
}

fn check_scale(arm_length: f64) -> Result<()> {
    if !arm_length.is_finite() || arm_length <= 0. {
        return Err(Error::InvalidScale(arm_length));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{biquadcopter, body, dualquad, Preset};
    use crate::{Error, Handedness};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
            assert_eq!(preset.to_string(), preset.name());
        }
        assert_eq!(" DualQuad ".parse::<Preset>(), Ok(Preset::Dualquad));
        assert_eq!(
            "hexacopter".parse::<Preset>(),
            Err(Error::UnknownPreset("hexacopter".into()))
        );
    }

    #[test]
    fn propeller_counts() {
        let counts: Vec<usize> = Preset::ALL
            .iter()
            .map(|preset| preset.build(1.).unwrap().len())
            .collect();
        assert_eq!(counts, vec![6, 2, 1, 8]);
    }

    #[test]
    fn biquadcopter_ring_geometry() {
        let body = biquadcopter(2.).unwrap();

        for (i, prop) in body.propellers().iter().enumerate() {
            assert_relative_eq!(prop.location().norm(), 2., epsilon = 1e-12);
            assert_eq!(prop.location().z, 0.);

            let expected = if i % 3 == 0 { -Vector3::z() } else { Vector3::y() };
            assert_eq!(prop.axis(), expected);
        }
        assert_relative_eq!(
            body.propellers()[3].location(),
            Vector3::new(-2., 0., 0.),
            epsilon = 1e-12
        );

        let handedness: Vec<f64> = body
            .propellers()
            .iter()
            .map(|p| p.handedness().sign())
            .collect();
        assert_eq!(handedness, vec![1., -1., 1., -1., -1., 1.]);
    }

    #[test]
    fn dualquad_mixes_propeller_types() {
        let body = dualquad().unwrap();
        let (lower, upper) = body.propellers().split_at(4);

        for (low, high) in lower.iter().zip(upper) {
            assert_eq!(low.location(), high.location());
            assert_eq!(low.axis(), -high.axis());
            assert_eq!(low.handedness(), high.handedness());
            assert!(high.force_coeff() > low.force_coeff());
            assert!(high.max_speed() < low.max_speed());
        }
        assert_eq!(lower[0].handedness(), Handedness::CounterClockwise);
        assert_eq!(lower[1].handedness(), Handedness::Clockwise);
    }

    #[test]
    fn invalid_scale() {
        assert_eq!(body("biquadcopter", 0.), Err(Error::InvalidScale(0.)));
        assert!(matches!(
            body("monocopter", f64::NAN),
            Err(Error::InvalidScale(_))
        ));
        assert!(matches!(biquadcopter(-1.), Err(Error::InvalidScale(_))));
    }

    #[test]
    fn tiny_ring_is_still_valid() {
        for arm_length in [1e-10, 1e-300] {
            assert_eq!(biquadcopter(arm_length).unwrap().len(), 6);
        }
    }
}
