//! Command implementations
//!
//! Each command returns whether it succeeded; the CLI turns that into the
//! process exit code.

mod analyze;
mod init;
mod item;
mod notes;
mod party;
mod property;
mod session;
mod status;

pub use analyze::analyze;
pub use init::init;
pub use item::item;
pub use notes::notes;
pub use party::party;
pub use property::property;
pub use status::status;
