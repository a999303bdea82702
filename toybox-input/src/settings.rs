use serde::Deserialize;


/// What to do when a trigger is looked up that was never registered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
	/// Panic. Catches misspelled trigger names during development.
	Checked,
	/// Treat the trigger as not firing.
	Unchecked,
}

impl Default for LookupPolicy {
	fn default() -> LookupPolicy {
		match cfg!(debug_assertions) {
			true => LookupPolicy::Checked,
			false => LookupPolicy::Unchecked,
		}
	}
}


#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Squared magnitude a raw signal value must exceed to be considered active.
	pub activity_threshold: f32,

	pub unknown_trigger: LookupPolicy,

	/// Bound on platform events buffered between polls.
	pub max_queued_events: usize,
}

impl Default for Settings {
	fn default() -> Settings {
		Settings {
			activity_threshold: f32::EPSILON,
			unknown_trigger: LookupPolicy::default(),
			max_queued_events: crate::tracker::DEFAULT_EVENT_CAPACITY,
		}
	}
}


#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn partial_tables_use_defaults() {
		let settings: Settings = toml::from_str("unknown_trigger = \"unchecked\"").unwrap();

		assert_eq!(settings.unknown_trigger, LookupPolicy::Unchecked);
		assert_eq!(settings.activity_threshold, f32::EPSILON);
		assert_eq!(settings.max_queued_events, 256);
	}

	#[test]
	fn threshold_override() {
		let settings: Settings = toml::from_str("activity_threshold = 0.5\nmax_queued_events = 8").unwrap();

		assert_eq!(settings.activity_threshold, 0.5);
		assert_eq!(settings.max_queued_events, 8);
	}
}
