//! Error type shared by constructors and structural mutation.
//!
//! Only construction-time and mutation-time invariant violations surface as
//! errors. Degenerate draws are no-ops that log a diagnostic instead.

use thiserror::Error;

/// Errors raised by geometry constructors and mutators.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeomError {
    /// Line or ray direction rounds to `(0, 0)`.
    #[error("direction vector cannot be zero")]
    ZeroDirection,
    /// Ribbon boundaries do not share a slope.
    #[error("lines must be parallel")]
    NotParallel,
    /// Half-ribbon rays share a slope but point in opposite directions.
    #[error("rays must be parallel, not anti-parallel")]
    AntiParallel,
    /// An event needs exactly two coordinates.
    #[error("an event takes exactly 2 coordinates, got {got}")]
    Arity { got: usize },
    /// Fixed-arity shapes reject structural mutation.
    #[error("cannot append to object of type '{kind}'")]
    FixedArity { kind: &'static str },
    /// Point groups only hold events.
    #[error("point groups only hold events, got '{kind}'")]
    NotAnEvent { kind: &'static str },
    /// Appending the member would make a collection contain itself.
    #[error("a collection cannot contain itself")]
    Cycle,
    /// The worldline never changes position.
    #[error("object is not moving")]
    Stationary,
    /// The worldline has no single crossing with the probe line.
    #[error("worldline has no single crossing with the probe line")]
    NoCrossing,
}

pub type Result<T> = std::result::Result<T, GeomError>;
