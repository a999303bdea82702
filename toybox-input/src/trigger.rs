use smallvec::SmallVec;
use std::fmt;

use crate::{InputState, SignalData, SignalId};


/// Stable identifier for a trigger: the 64 bit FNV-1a hash of its name.
/// Distinct names that hash to the same key are not detected.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerKey(pub u64);

impl TriggerKey {
	pub const fn from_name(name: &str) -> TriggerKey {
		const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
		const PRIME: u64 = 0x0000_0100_0000_01b3;

		let bytes = name.as_bytes();
		let mut hash = OFFSET_BASIS;
		let mut i = 0;

		while i < bytes.len() {
			hash ^= bytes[i] as u64;
			hash = hash.wrapping_mul(PRIME);
			i += 1;
		}

		TriggerKey(hash)
	}
}

impl From<&str> for TriggerKey {
	fn from(name: &str) -> TriggerKey {
		TriggerKey::from_name(name)
	}
}

impl From<&String> for TriggerKey {
	fn from(name: &String) -> TriggerKey {
		TriggerKey::from_name(name)
	}
}

impl fmt::Debug for TriggerKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TriggerKey({:#018x})", self.0)
	}
}


/// A named event derived from signal state, evaluated once per frame.
#[derive(Debug, Clone)]
pub struct Trigger {
	pub name: String,
	pub key: TriggerKey,

	/// Signal data a predicate chose to pass on to consumers. At most one entry per [`SignalId`].
	pub input_data: SmallVec<[SignalData; 2]>,

	pub triggered_this_frame: bool,

	/// Set by the consumer via [`InputSystem::if_triggered`](crate::InputSystem::if_triggered).
	pub handled: bool,
}

impl Trigger {
	pub fn new(name: impl Into<String>) -> Trigger {
		let name = name.into();
		let key = TriggerKey::from_name(&name);

		Trigger {
			name,
			key,
			input_data: SmallVec::new(),
			triggered_this_frame: false,
			handled: false,
		}
	}

	pub fn input(&self, id: SignalId) -> Option<&SignalData> {
		self.input_data.iter().find(|data| data.id == id)
	}

	/// Store `data` for consumers, replacing any previous entry for the same signal.
	pub fn set_input(&mut self, data: SignalData) {
		match self.input_data.iter_mut().find(|existing| existing.id == data.id) {
			Some(existing) => *existing = data,
			None => self.input_data.push(data),
		}
	}
}


/// Decides whether a trigger fires given the current [`InputState`].
/// Anything that must persist between frames can live in the closure's captures.
pub type Predicate = Box<dyn FnMut(&mut Trigger, &InputState) -> bool>;


struct Entry {
	trigger: Trigger,
	predicate: Predicate,
}


/// Triggers in registration order.
#[derive(Default)]
pub struct TriggerRegistry {
	entries: Vec<Entry>,
}

impl TriggerRegistry {
	pub fn new() -> TriggerRegistry {
		TriggerRegistry::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	fn position(&self, key: TriggerKey) -> Option<usize> {
		self.entries.iter().position(|entry| entry.trigger.key == key)
	}

	/// Returns false and leaves the existing trigger in place if `name` is taken and `replace` is not set.
	pub fn add<F>(&mut self, name: &str, predicate: F, replace: bool) -> bool
		where F: FnMut(&mut Trigger, &InputState) -> bool + 'static
	{
		let entry = Entry {
			trigger: Trigger::new(name),
			predicate: Box::new(predicate),
		};

		match self.position(entry.trigger.key) {
			Some(index) if replace => {
				log::debug!("Replacing trigger '{name}'");
				self.entries[index] = entry;
			}

			Some(_) => {
				log::error!("Trigger '{name}' is already registered - pass replace to overwrite it");
				return false
			}

			None => self.entries.push(entry),
		}

		true
	}

	pub fn remove(&mut self, key: TriggerKey) -> bool {
		match self.position(key) {
			Some(index) => {
				self.entries.remove(index);
				true
			}

			None => false,
		}
	}

	pub fn get(&self, key: TriggerKey) -> Option<&Trigger> {
		self.entries.iter()
			.map(|entry| &entry.trigger)
			.find(|trigger| trigger.key == key)
	}

	pub fn get_mut(&mut self, key: TriggerKey) -> Option<&mut Trigger> {
		self.entries.iter_mut()
			.map(|entry| &mut entry.trigger)
			.find(|trigger| trigger.key == key)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
		self.entries.iter().map(|entry| &entry.trigger)
	}

	/// Run every predicate against `state` and record whether it fired.
	pub fn evaluate(&mut self, state: &InputState) {
		for entry in self.entries.iter_mut() {
			entry.trigger.handled = false;
			entry.trigger.triggered_this_frame = (entry.predicate)(&mut entry.trigger, state);
		}
	}

	pub fn reset(&mut self) {
		for entry in self.entries.iter_mut() {
			entry.trigger.triggered_this_frame = false;
		}
	}
}

impl fmt::Debug for TriggerRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list()
			.entries(self.iter())
			.finish()
	}
}
