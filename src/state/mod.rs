pub mod poll;
pub mod session;

pub use poll::use_poll;
pub use session::{Session, SessionAction, SessionContext, use_session};
