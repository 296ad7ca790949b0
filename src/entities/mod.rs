mod field;
mod form;
mod location;
mod route;
mod sequence;

pub use field::Field;
pub use form::Form;
pub use location::{Coordinates, LocationCandidate};
pub use route::{DirectionsRequest, RouteLeg, RouteOutcome, RouteResult, TravelMode};
pub use sequence::{Position, TravelSequenceEntry};
