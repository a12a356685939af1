//! Durable, versioned save data
//!
//! The gateway is the only code that reads or writes the store on behalf of a
//! session; everything else works on decoded envelopes.

mod envelope;
pub mod gateway;
pub mod migrate;
mod store;

pub use envelope::{CLASSIC_KEY, ClassicSave, Envelope, HEX_KEY};
pub use gateway::{Opened, open_envelope};
pub use store::{FileStore, MemoryStore, Store};
