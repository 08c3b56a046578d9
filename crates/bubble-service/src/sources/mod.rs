//! Event sources and venue resolution
//!
//! The sources generate mock events against real, lazily-geocoded venue
//! coordinates. Swapping a source for a live feed only means implementing
//! `EventSource` against that feed's API.

mod catalog;
mod geocoder;
mod mock;

pub use catalog::{COMMUNITY, EVENTBRITE, STUDENT};
pub use geocoder::NominatimResolver;
pub use mock::{MockEventSource, SourceProfile};
