//! Access control
//!
//! The login gate guarding every mutating or content-revealing operation.
//! There is no credential verification; the gate is a session flag only.

pub mod gate;

pub use gate::LoginGate;
