//! # Discord Adapters
//!
//! Bridges between serenity and the command system: registration calls,
//! interaction responses, event conversion and presence.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

pub mod event;
pub mod presence;
pub mod registrar;
pub mod responder;

pub use event::interaction_event;
pub use presence::apply_presence;
pub use registrar::SerenityRegistrar;
pub use responder::SerenityResponder;
