//! Auth domain module

mod session;

pub use session::{AuthSession, Role};
