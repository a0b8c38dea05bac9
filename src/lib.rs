//! # rotor-actuation
//! Force and torque model for multirotor airframes.
//!
//! # Body description
//! [`InertiaModel`] holds the mass and inertia tensor of the airframe.
//!
//! [`Propeller`] models one propeller as a quadratic actuator disk
//! (see [`Handedness`] for the reaction torque sign convention).
//!
//! [`Body`] combines both into an ordered, validated airframe
//! (see [`catalog`] for the named presets).
//!
//! # Actuation
//! [`compute_wrench`] sums the force and torque of every propeller at the commanded speeds.
//!
//! [`Effectiveness`] is the linear map from squared propeller speeds to that
//! same [`Wrench`], the input of a control allocation solver.
//!
//! ```
//! use rotor_actuation::{build_matrix, catalog, compute_wrench};
//!
//! let body = catalog::biquadcopter(0.25)?;
//! let speeds = [1500.; 6];
//!
//! let wrench = compute_wrench(&body, &speeds)?;
//! let b = build_matrix(&body);
//! let squared: Vec<f64> = speeds.iter().map(|w| w * w).collect();
//!
//! approx::assert_relative_eq!(b.wrench(&squared)?.force, wrench.force, epsilon = 1e-9);
//! # Ok::<(), rotor_actuation::Error>(())
//! ```

pub mod body;
pub use body::Body;

pub mod catalog;
pub use catalog::Preset;

pub mod effectiveness;
pub use effectiveness::{build_matrix, Effectiveness};

mod error;
pub use error::{Error, Result};

pub mod inertia;
pub use inertia::InertiaModel;

pub mod propeller;
pub use propeller::{Handedness, Propeller};

pub mod wrench;
pub use wrench::{compute_wrench, Wrench};
