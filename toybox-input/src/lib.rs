//! Translates raw platform input into per-frame signal state and named triggers.
//! The entry point of this crate is [InputSystem].

pub mod debug;
pub mod keys;
pub mod settings;
pub mod signal;
pub mod system;
pub mod tracker;
pub mod trigger;
pub mod triggers;

pub mod prelude {
	pub use crate::{InputSystem, SignalId, SignalState, TriggerKey};
}

pub use keys::*;
pub use settings::{LookupPolicy, Settings};
pub use signal::{InputState, SignalData, SignalFlag, SignalId, SignalState, process_signal};
pub use system::{FramePhase, InputSystem};
pub use tracker::{EventSource, PlatformEvent, Tracker};
pub use trigger::{Predicate, Trigger, TriggerKey, TriggerRegistry};
