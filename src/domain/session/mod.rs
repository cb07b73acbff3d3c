//! Session domain module

mod response_session;
mod timer;

pub use response_session::{InvalidStateTransition, ResponseSession, SessionState};
pub use timer::{PracticeTimer, TimerState};
