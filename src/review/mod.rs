pub mod registry;
pub mod session;
pub mod view;

pub use registry::{FlightGuard, ReviewKey, SessionRegistry};
pub use session::{EditError, ReviewSession};
pub use view::{ParticipantRow, ReviewView};
