use thiserror::Error;

/// An error raised while building a body or evaluating its actuation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid inertia: {0}")]
    InvalidInertia(String),

    #[error("invalid propeller: {0}")]
    InvalidPropeller(String),

    #[error("body has no propellers")]
    EmptyBody,

    #[error("propellers {first} and {second} are identical")]
    DuplicatePropeller { first: usize, second: usize },

    #[error("expected {expected} propeller values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("speed {speed} of propeller {index} is outside [0, {max_speed}]")]
    SpeedOutOfRange {
        index: usize,
        speed: f64,
        max_speed: f64,
    },

    #[error("unknown body preset `{0}`")]
    UnknownPreset(String),

    #[error("invalid preset scale {0}, expected a positive length")]
    InvalidScale(f64),
}

pub type Result<T> = core::result::Result<T, Error>;
