use common::math::{Vec2, Vec2i};
use strum::IntoEnumIterator;
use tracing::instrument;

use crate::settings::{LookupPolicy, Settings};
use crate::signal::{InputState, SignalData, SignalFlag, SignalId, SignalState};
use crate::tracker::{EventSource, PlatformEvent, Tracker};
use crate::trigger::{Trigger, TriggerKey, TriggerRegistry};


/// Where the [`InputSystem`] is within the current frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FramePhase {
	/// Previous frame retired, waiting for [`InputSystem::poll`].
	Retired,
	/// Raw input captured and classified.
	Polled,
	/// Triggers evaluated and ready to be consumed.
	Evaluated,
}


/// Turns raw platform input into per-signal transition state and named triggers.
///
/// Each frame must run, in order:
/// 1. [`poll`] - drain platform events, sample buttons and classify every signal
/// 2. [`evaluate_triggers`] - run every registered trigger predicate
/// 3. consumers query [`is_triggered`]/[`if_triggered`]
/// 4. [`end_frame`] - move this frame into the previous frame slot and clear triggers
///
/// [`poll`]: InputSystem::poll
/// [`evaluate_triggers`]: InputSystem::evaluate_triggers
/// [`is_triggered`]: InputSystem::is_triggered
/// [`if_triggered`]: InputSystem::if_triggered
/// [`end_frame`]: InputSystem::end_frame
pub struct InputSystem {
	state: InputState,
	triggers: TriggerRegistry,
	settings: Settings,

	phase: FramePhase,
	frame: u64,

	quit_callback: Option<Box<dyn FnMut()>>,
	resize_callback: Option<Box<dyn FnMut(Vec2i)>>,
}

impl InputSystem {
	pub fn new(settings: Settings) -> InputSystem {
		log::info!("Input settings: {settings:?}");

		InputSystem {
			state: InputState::new(),
			triggers: TriggerRegistry::new(),
			settings,

			phase: FramePhase::Retired,
			frame: 0,

			quit_callback: None,
			resize_callback: None,
		}
	}

	/// Called from [`poll`](InputSystem::poll) when the platform asks to quit.
	pub fn on_quit(&mut self, callback: impl FnMut() + 'static) {
		self.quit_callback = Some(Box::new(callback));
	}

	/// Called from [`poll`](InputSystem::poll) with the new window size whenever it changes.
	pub fn on_resize(&mut self, callback: impl FnMut(Vec2i) + 'static) {
		self.resize_callback = Some(Box::new(callback));
	}

	/// A [`Tracker`] sized according to [`Settings::max_queued_events`].
	pub fn new_tracker(&self) -> Tracker {
		Tracker::with_capacity(self.settings.max_queued_events)
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn state(&self) -> &InputState {
		&self.state
	}

	pub fn signal(&self, id: SignalId) -> &SignalData {
		self.state.signal(id)
	}

	pub fn phase(&self) -> FramePhase {
		self.phase
	}

	/// Number of frames retired so far.
	pub fn frame(&self) -> u64 {
		self.frame
	}
}


/// Frame lifecycle.
impl InputSystem {
	/// Capture raw input from `source` and classify every signal against the previous frame.
	#[instrument(skip_all, name="input poll")]
	pub fn poll(&mut self, dt: f32, source: &mut impl EventSource) {
		debug_assert_eq!(self.phase, FramePhase::Retired, "InputSystem::poll called twice without end_frame");

		let mut focus_lost = false;

		while let Some(event) = source.next_event() {
			match event {
				PlatformEvent::QuitRequested => {
					log::info!("Quit requested");

					if let Some(callback) = self.quit_callback.as_mut() {
						callback();
					}
				}

				PlatformEvent::Resized(size) => {
					if let Some(callback) = self.resize_callback.as_mut() {
						callback(size);
					}
				}

				PlatformEvent::PointerMotion(delta) => {
					self.state.signal_mut(SignalId::MouseMove).value_raw += delta;
				}

				PlatformEvent::Scroll(amount) => {
					self.state.signal_mut(SignalId::MouseScroll).value_raw += amount;
				}

				PlatformEvent::FocusLost => focus_lost = true,
			}
		}

		for id in SignalId::iter().filter(|id| !id.is_motion()) {
			let down = id.bindings().iter().any(|&button| source.is_down(button));
			let value = if down { 1.0 } else { 0.0 };

			self.state.signal_mut(id).value_raw = Vec2::new(value, 0.0);
		}

		self.state.classify(dt, self.settings.activity_threshold);

		// Anything interrupted by losing focus is canceled rather than finished.
		if focus_lost {
			for id in SignalId::iter() {
				if self.state.state(id) == SignalState::Finished {
					self.cancel(id);
				}
			}
		}

		self.phase = FramePhase::Polled;
	}

	/// Run every trigger predicate against the state computed by the last [`poll`](InputSystem::poll).
	#[instrument(skip_all, name="input evaluate triggers")]
	pub fn evaluate_triggers(&mut self) {
		debug_assert_eq!(self.phase, FramePhase::Polled, "InputSystem::evaluate_triggers called out of order");

		self.triggers.evaluate(&self.state);
		self.phase = FramePhase::Evaluated;
	}

	/// Retire this frame's signals into the previous frame slot and clear all triggers.
	pub fn end_frame(&mut self) {
		debug_assert_ne!(self.phase, FramePhase::Retired, "InputSystem::end_frame called without poll");

		self.state.retire();
		self.triggers.reset();

		self.phase = FramePhase::Retired;
		self.frame += 1;
	}

	/// Force `id` into the [`SignalState::Canceled`] state for this frame.
	/// Must be called after [`poll`](InputSystem::poll), since classification overwrites it.
	/// If the underlying button is still held next frame, the signal starts again.
	pub fn cancel(&mut self, id: SignalId) {
		let signal = self.state.signal_mut(id);
		signal.flag = SignalFlag::Inactive;
		signal.state = SignalState::Canceled;
		signal.time_active = 0.0;
		signal.value_raw = Vec2::zero();
	}
}


/// Triggers.
impl InputSystem {
	/// Register a trigger. If `name` is already taken this fails unless `replace` is set.
	pub fn add_trigger<F>(&mut self, name: &str, predicate: F, replace: bool) -> bool
		where F: FnMut(&mut Trigger, &InputState) -> bool + 'static
	{
		self.triggers.add(name, predicate, replace)
	}

	pub fn remove_trigger(&mut self, key: impl Into<TriggerKey>) -> bool {
		self.triggers.remove(key.into())
	}

	pub fn has_trigger(&self, key: impl Into<TriggerKey>) -> bool {
		self.triggers.get(key.into()).is_some()
	}

	pub fn trigger(&self, key: impl Into<TriggerKey>) -> Option<&Trigger> {
		self.triggers.get(key.into())
	}

	pub fn triggers(&self) -> impl Iterator<Item = &Trigger> {
		self.triggers.iter()
	}

	/// Whether the trigger fired this frame.
	/// Unknown triggers are handled according to [`Settings::unknown_trigger`].
	pub fn is_triggered(&self, key: impl Into<TriggerKey>) -> bool {
		let key = key.into();

		match self.triggers.get(key) {
			Some(trigger) => trigger.triggered_this_frame,
			None => unknown_trigger(self.settings.unknown_trigger, key),
		}
	}

	/// Calls `callback` if the trigger fired this frame, and stores its result as the trigger's `handled` flag.
	/// Returns whether the trigger fired.
	pub fn if_triggered(&mut self, key: impl Into<TriggerKey>, callback: impl FnOnce(&Trigger) -> bool) -> bool {
		let key = key.into();

		let Some(trigger) = self.triggers.get_mut(key) else {
			return unknown_trigger(self.settings.unknown_trigger, key)
		};

		if !trigger.triggered_this_frame {
			return false
		}

		trigger.handled = callback(trigger);
		true
	}
}


fn unknown_trigger(policy: LookupPolicy, key: TriggerKey) -> bool {
	match policy {
		LookupPolicy::Checked => panic!("No trigger registered for {key:?}"),
		LookupPolicy::Unchecked => {
			log::trace!("Unknown trigger {key:?}");
			false
		}
	}
}
