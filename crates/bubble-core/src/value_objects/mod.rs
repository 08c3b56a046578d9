//! Value objects - identifiers, identity, and geometry

mod fingerprint;
mod geo;
mod id;

pub use fingerprint::Fingerprint;
pub use geo::{distance_km, EARTH_RADIUS_KM};
pub use id::{BubbleId, IdParseError, SuggestionId};
