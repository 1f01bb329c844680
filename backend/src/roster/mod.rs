pub mod builder;
pub mod overlap;
pub mod rejection;
pub mod selection;
pub mod session;

pub use rejection::RosterRejection;
pub use session::RosterSession;
