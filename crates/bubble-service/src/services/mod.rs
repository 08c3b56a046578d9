//! Services - business logic for bubbles, suggestions, and timers

mod bubble;
mod context;
mod error;
mod importer;
mod purge;
mod suggestion;
mod sweep;

pub use bubble::BubbleService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use importer::{ImportReport, Importer};
pub use purge::PurgeService;
pub use suggestion::SuggestionService;
pub use sweep::{spawn_sweep, SweepService};
