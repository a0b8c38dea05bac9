use crate::{propeller::check_speed_range, Body, Error, Result, Wrench};
use log::debug;
use nalgebra::{DMatrix, DVector, Matrix6xX, Vector6};

/// The linear map from squared propeller speeds to the body wrench.
///
/// Column `i` holds the wrench produced by propeller `i` per unit of `ω_i²`:
/// `[k_f a ; r × k_f a + h k_τ a]`. Since every propeller is purely quadratic
/// in its own speed, `B · ω²` reproduces [`compute_wrench`](crate::compute_wrench)
/// exactly. The matrix only depends on the body, so it can be built once and cached.
///
/// ```
/// use rotor_actuation::{catalog, Effectiveness};
///
/// let body = catalog::dualquad()?;
/// let b = Effectiveness::new(&body);
///
/// assert_eq!(b.matrix().shape(), (6, 8));
/// // Thrust is always vertical, so lateral force is out of reach
/// assert!(!b.is_fully_actuated(1e-12));
/// # Ok::<(), rotor_actuation::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Effectiveness {
    matrix: Matrix6xX<f64>,
    max_speeds: Vec<f64>,
}

impl Effectiveness {
    pub fn new(body: &Body) -> Self {
        let columns: Vec<Vector6<f64>> = body
            .propellers()
            .iter()
            .map(|prop| {
                let force = prop.thrust_per_speed_squared();
                let torque = prop.location().cross(&force) + prop.reaction_per_speed_squared();
                Wrench::new(force, torque).to_vector()
            })
            .collect();

        debug!("Built 6x{} effectiveness matrix", columns.len());

        Self {
            matrix: Matrix6xX::from_columns(&columns),
            max_speeds: body.max_speeds(),
        }
    }

    pub fn matrix(&self) -> &Matrix6xX<f64> {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix6xX<f64> {
        self.matrix
    }

    /// Number of propellers, i.e. columns.
    pub fn propeller_count(&self) -> usize {
        self.matrix.ncols()
    }

    /// Wrench contribution of propeller `index` per unit squared speed.
    pub fn column(&self, index: usize) -> Option<Vector6<f64>> {
        (index < self.propeller_count()).then(|| self.matrix.column(index).into_owned())
    }

    /// Apply the matrix to squared propeller speeds (rad²/s²).
    pub fn wrench(&self, speeds_squared: &[f64]) -> Result<Wrench> {
        if speeds_squared.len() != self.propeller_count() {
            return Err(Error::DimensionMismatch {
                expected: self.propeller_count(),
                actual: speeds_squared.len(),
            });
        }

        let w = &self.matrix * DVector::from_column_slice(speeds_squared);
        Ok(Wrench::from_vector(&w))
    }

    /// Square `speeds` (rad/s) and apply the matrix, rejecting speeds outside `[0, max_speed]`.
    pub fn wrench_from_speeds(&self, speeds: &[f64]) -> Result<Wrench> {
        if speeds.len() != self.propeller_count() {
            return Err(Error::DimensionMismatch {
                expected: self.propeller_count(),
                actual: speeds.len(),
            });
        }

        let mut squared = Vec::with_capacity(speeds.len());
        for (index, (&speed, &max_speed)) in speeds.iter().zip(&self.max_speeds).enumerate() {
            check_speed_range(index, speed, max_speed)?;
            squared.push(speed * speed);
        }

        self.wrench(&squared)
    }

    /// Number of independent wrench directions the propellers can produce.
    ///
    /// Singular values at or below `eps` are treated as zero.
    pub fn rank(&self, eps: f64) -> usize {
        DMatrix::from_column_slice(6, self.propeller_count(), self.matrix.as_slice()).rank(eps)
    }

    /// Returns `true` if every force and torque direction can be commanded.
    ///
    /// Rank deficient bodies are valid, it is up to the caller to handle
    /// under-actuation before inverting the matrix.
    pub fn is_fully_actuated(&self, eps: f64) -> bool {
        self.rank(eps) == 6
    }
}

/// Build the effectiveness matrix of `body`.
pub fn build_matrix(body: &Body) -> Effectiveness {
    Effectiveness::new(body)
}

#[cfg(test)]
mod tests {
    use super::build_matrix;
    use crate::{catalog, compute_wrench, Body, Error, Preset};
    use approx::assert_relative_eq;
    use nalgebra::Vector6;

    const RANK_EPS: f64 = 1e-12;

    /// Deterministic speed vectors spread over each propeller's range.
    fn speed_sets(body: &Body) -> Vec<Vec<f64>> {
        let max = body.max_speeds();
        let n = max.len();

        [0., 0.25, 0.5, 1.]
            .iter()
            .map(|fraction| max.iter().map(|m| m * fraction).collect::<Vec<f64>>())
            .chain((0..3).map(|shift| {
                (0..n)
                    .map(|i| max[i] * ((i + shift) % n + 1) as f64 / (n + 1) as f64)
                    .collect::<Vec<f64>>()
            }))
            .collect()
    }

    #[test]
    fn matrix_reproduces_wrench_for_every_preset() {
        for preset in Preset::ALL {
            let body = preset.build(0.5).unwrap();
            let b = build_matrix(&body);

            for speeds in speed_sets(&body) {
                let squared: Vec<f64> = speeds.iter().map(|w| w * w).collect();
                let expected = compute_wrench(&body, &speeds).unwrap();

                let from_matrix = b.wrench(&squared).unwrap();
                assert_relative_eq!(from_matrix.force, expected.force, epsilon = 1e-9);
                assert_relative_eq!(from_matrix.torque, expected.torque, epsilon = 1e-9);

                let from_speeds = b.wrench_from_speeds(&speeds).unwrap();
                assert_relative_eq!(from_speeds.force, expected.force, epsilon = 1e-9);
                assert_relative_eq!(from_speeds.torque, expected.torque, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn monocopter_column() {
        let b = build_matrix(&catalog::monocopter().unwrap());

        assert_eq!(b.propeller_count(), 1);
        assert_relative_eq!(
            b.column(0).unwrap(),
            Vector6::new(0., 0., -5.15e-6, 0., 0., -1.72e-6)
        );
        assert_eq!(b.column(1), None);
    }

    #[test]
    fn monocopter_is_under_actuated() {
        let b = build_matrix(&catalog::monocopter().unwrap());

        assert!(b.rank(RANK_EPS) <= 2);
        assert!(!b.is_fully_actuated(RANK_EPS));
    }

    #[test]
    fn preset_ranks() {
        let rank = |body: Body| build_matrix(&body).rank(RANK_EPS);

        assert_eq!(rank(catalog::monocopter().unwrap()), 1);
        assert_eq!(rank(catalog::countercopter().unwrap()), 1);
        assert_eq!(rank(catalog::dualquad().unwrap()), 4);
        assert_eq!(rank(catalog::biquadcopter(0.5).unwrap()), 4);
    }

    #[test]
    fn rejects_wrong_length() {
        let b = build_matrix(&catalog::countercopter().unwrap());

        assert_eq!(
            b.wrench(&[1., 2., 3.]),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert!(matches!(
            b.wrench_from_speeds(&[1000., 5000.]),
            Err(Error::SpeedOutOfRange { index: 1, .. })
        ));
        assert!(matches!(
            b.wrench_from_speeds(&[-1., 1000.]),
            Err(Error::SpeedOutOfRange { index: 0, .. })
        ));
        assert!(matches!(
            b.wrench_from_speeds(&[1000., f64::NAN]),
            Err(Error::SpeedOutOfRange { index: 1, .. })
        ));
        assert_eq!(
            b.wrench_from_speeds(&[1000.]),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn matrix_is_independent_of_speed() {
        let body = catalog::biquadcopter(0.3).unwrap();
        assert_eq!(build_matrix(&body), body.effectiveness());
        assert_eq!(build_matrix(&body).into_matrix().shape(), (6, 6));
    }
}
