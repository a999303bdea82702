use common::math::Vec2;
use strum::{EnumCount, EnumIter, FromRepr, IntoStaticStr};

#[cfg(doc)]
use SignalState::*;


/// Every input channel tracked by the [`InputSystem`](crate::InputSystem).
/// The discriminant doubles as the index into both frame buffers of [`InputState`], and never changes.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(EnumCount, EnumIter, FromRepr, IntoStaticStr)]
#[repr(u32)]
pub enum SignalId {
	/// Relative pointer motion accumulated over the frame.
	MouseMove,
	MouseLeft,
	MouseMiddle,
	MouseRight,
	/// Scroll amount accumulated over the frame.
	MouseScroll,

	Alt,
	Shift,
	Ctrl,

	Escape, Enter, Space, Tab, Backspace, Delete,
	ArrowUp, ArrowDown, ArrowLeft, ArrowRight,

	A, B, C, D, E, F, G, H, I, J, K, L, M,
	N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

	Digit0, Digit1, Digit2, Digit3, Digit4,
	Digit5, Digit6, Digit7, Digit8, Digit9,

	F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

impl SignalId {
	pub fn index(self) -> usize {
		self as usize
	}

	pub fn name(self) -> &'static str {
		self.into()
	}

	/// Whether raw values for this signal come from the event queue rather than from sampling button state.
	pub fn is_motion(self) -> bool {
		matches!(self, SignalId::MouseMove | SignalId::MouseScroll)
	}
}


#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SignalFlag {
	#[default]
	Inactive,
	Active,
}


/// Edge classification of a signal across two consecutive frames.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SignalState {
	/// Inactive last frame and this frame.
	#[default]
	None,
	/// Became active this frame.
	Started,
	/// Became inactive this frame.
	Finished,
	/// Active last frame and this frame.
	Going,
	/// Forcefully interrupted. Never produced by [`process_signal`], only by
	/// [`InputSystem::cancel`](crate::InputSystem::cancel) or by losing focus.
	Canceled,
}


#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SignalData {
	pub id: SignalId,
	pub flag: SignalFlag,
	pub state: SignalState,

	/// Seconds this signal has been continuously [`SignalFlag::Active`].
	pub time_active: f32,

	/// Motion delta, scroll amount, or 1.0/0.0 in `x` for buttons.
	pub value_raw: Vec2,
}

impl SignalData {
	/// A blank signal carrying only its id.
	pub fn new(id: SignalId) -> SignalData {
		SignalData {
			id,
			flag: SignalFlag::Inactive,
			state: SignalState::None,
			time_active: 0.0,
			value_raw: Vec2::zero(),
		}
	}

	pub fn is_active(&self) -> bool {
		self.flag == SignalFlag::Active
	}

	/// [`None`] or [`Canceled`].
	pub fn is_idle(&self) -> bool {
		matches!(self.state, SignalState::None | SignalState::Canceled)
	}

	/// [`Started`] or [`Going`].
	pub fn is_down(&self) -> bool {
		matches!(self.state, SignalState::Started | SignalState::Going)
	}

	pub fn magnitude_sq(&self) -> f32 {
		self.value_raw.x * self.value_raw.x + self.value_raw.y * self.value_raw.y
	}
}


/// Maps the previous and current activity bits onto a transition.
///
/// | prev | cur | state      |
/// |------|-----|------------|
/// | 0    | 0   | [`None`]     |
/// | 0    | 1   | [`Started`]  |
/// | 1    | 0   | [`Finished`] |
/// | 1    | 1   | [`Going`]    |
pub fn process_signal(prev_active: bool, cur_active: bool) -> SignalState {
	let code = (prev_active as u8) << 1 | cur_active as u8;

	match code {
		0b00 => SignalState::None,
		0b01 => SignalState::Started,
		0b10 => SignalState::Finished,
		_ => SignalState::Going,
	}
}


/// Signal data for the previous and current frame, indexed by [`SignalId`].
#[derive(Clone, Debug)]
pub struct InputState {
	pub prev_frame: [SignalData; SignalId::COUNT],
	pub this_frame: [SignalData; SignalId::COUNT],
}

impl InputState {
	pub fn new() -> InputState {
		InputState {
			prev_frame: blank_frame(),
			this_frame: blank_frame(),
		}
	}

	/// The current frame's data for `id`.
	pub fn signal(&self, id: SignalId) -> &SignalData {
		&self.this_frame[id.index()]
	}

	pub fn signal_mut(&mut self, id: SignalId) -> &mut SignalData {
		&mut self.this_frame[id.index()]
	}

	/// Last frame's data for `id`.
	pub fn prev(&self, id: SignalId) -> &SignalData {
		&self.prev_frame[id.index()]
	}

	pub fn state(&self, id: SignalId) -> SignalState {
		self.signal(id).state
	}

	/// Derive flag, time_active and state for every signal from the raw values written this frame.
	/// `threshold` is the squared magnitude a raw value must exceed to count as active.
	pub fn classify(&mut self, dt: f32, threshold: f32) {
		for (prev, current) in self.prev_frame.iter().zip(self.this_frame.iter_mut()) {
			current.flag = match current.magnitude_sq() > threshold {
				true => SignalFlag::Active,
				false => SignalFlag::Inactive,
			};

			current.time_active = match current.is_active() {
				true => prev.time_active + dt,
				false => 0.0,
			};

			current.state = process_signal(prev.is_active(), current.is_active());
		}
	}

	/// Move this frame into the previous frame slot and start the next frame blank.
	pub fn retire(&mut self) {
		self.prev_frame = self.this_frame;

		for signal in self.this_frame.iter_mut() {
			*signal = SignalData::new(signal.id);
		}
	}
}

impl Default for InputState {
	fn default() -> InputState {
		InputState::new()
	}
}


fn blank_frame() -> [SignalData; SignalId::COUNT] {
	std::array::from_fn(|index| {
		let id = SignalId::from_repr(index as u32)
			.expect("SignalId discriminants must be contiguous");

		SignalData::new(id)
	})
}
