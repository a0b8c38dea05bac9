use crate::{Body, Result};
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use log::trace;
use nalgebra::{Vector3, Vector6};

/// Net force and torque acting on a rigid body, in its body frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Wrench {
    /// Net force (N).
    pub force: Vector3<f64>,
    /// Net torque about the centre of mass (N·m).
    pub torque: Vector3<f64>,
}

impl Wrench {
    pub fn new(force: Vector3<f64>, torque: Vector3<f64>) -> Self {
        Self { force, torque }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Stacks the wrench as `[force; torque]`.
    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::new(
            self.force.x,
            self.force.y,
            self.force.z,
            self.torque.x,
            self.torque.y,
            self.torque.z,
        )
    }

    pub fn from_vector(v: &Vector6<f64>) -> Self {
        Self {
            force: Vector3::new(v[0], v[1], v[2]),
            torque: Vector3::new(v[3], v[4], v[5]),
        }
    }
}

impl Add for Wrench {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            force: self.force + rhs.force,
            torque: self.torque + rhs.torque,
        }
    }
}

impl AddAssign for Wrench {
    fn add_assign(&mut self, rhs: Self) {
        self.force += rhs.force;
        self.torque += rhs.torque;
    }
}

impl Sum for Wrench {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, w| acc + w)
    }
}

/// Compute the net wrench produced by spinning each propeller of `body` at `speeds` (rad/s).
///
/// Each propeller contributes its thrust `k_f ω² a` and a torque made of the
/// thrust moment `r × k_f ω² a` plus its reaction `h k_τ ω² a`. Contributions
/// are summed with no interaction between propellers.
///
/// Speeds outside `[0, max_speed]` are rejected rather than clamped, see [`Body::saturate`].
///
/// ```
/// use rotor_actuation::{catalog, compute_wrench};
///
/// let body = catalog::monocopter()?;
/// let wrench = compute_wrench(&body, &[1000.])?;
///
/// approx::assert_relative_eq!(wrench.force.z, -5.15, epsilon = 1e-9);
/// approx::assert_relative_eq!(wrench.torque.z, -1.72, epsilon = 1e-9);
/// # Ok::<(), rotor_actuation::Error>(())
/// ```
pub fn compute_wrench(body: &Body, speeds: &[f64]) -> Result<Wrench> {
    body.check_speeds(speeds)?;

    Ok(body
        .propellers()
        .iter()
        .zip(speeds)
        .enumerate()
        .map(|(index, (prop, &speed))| {
            let force = prop.thrust(speed);
            let torque = prop.location().cross(&force) + prop.reaction_torque(speed);
            trace!("Propeller {index} at {speed} rad/s: force {force:?}, torque {torque:?}");

            Wrench::new(force, torque)
        })
        .sum())
}
