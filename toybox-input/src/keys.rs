use crate::SignalId;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;


/// A physical input that is either held or not.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Button {
	Key(KeyCode),
	Mouse(MouseButton),
}

impl Button {
	pub fn is_mouse(&self) -> bool {
		matches!(self, Button::Mouse(_))
	}

	pub fn is_key(&self) -> bool {
		matches!(self, Button::Key(_))
	}
}

impl From<KeyCode> for Button {
	fn from(o: KeyCode) -> Button {
		Button::Key(o)
	}
}

impl From<MouseButton> for Button {
	fn from(o: MouseButton) -> Button {
		Button::Mouse(o)
	}
}


impl SignalId {
	/// Physical buttons that drive this signal. A signal is down if any of them are.
	/// Motion signals have no bindings.
	pub fn bindings(self) -> &'static [Button] {
		use Button::{Key, Mouse};
		use SignalId as S;

		match self {
			S::MouseMove | S::MouseScroll => &[],

			S::MouseLeft => &[Mouse(MouseButton::Left)],
			S::MouseMiddle => &[Mouse(MouseButton::Middle)],
			S::MouseRight => &[Mouse(MouseButton::Right)],

			S::Alt => &[Key(KeyCode::AltLeft), Key(KeyCode::AltRight)],
			S::Shift => &[Key(KeyCode::ShiftLeft), Key(KeyCode::ShiftRight)],
			S::Ctrl => &[Key(KeyCode::ControlLeft), Key(KeyCode::ControlRight)],

			S::Escape => &[Key(KeyCode::Escape)],
			S::Enter => &[Key(KeyCode::Enter), Key(KeyCode::NumpadEnter)],
			S::Space => &[Key(KeyCode::Space)],
			S::Tab => &[Key(KeyCode::Tab)],
			S::Backspace => &[Key(KeyCode::Backspace)],
			S::Delete => &[Key(KeyCode::Delete)],

			S::ArrowUp => &[Key(KeyCode::ArrowUp)],
			S::ArrowDown => &[Key(KeyCode::ArrowDown)],
			S::ArrowLeft => &[Key(KeyCode::ArrowLeft)],
			S::ArrowRight => &[Key(KeyCode::ArrowRight)],

			S::A => &[Key(KeyCode::KeyA)],
			S::B => &[Key(KeyCode::KeyB)],
			S::C => &[Key(KeyCode::KeyC)],
			S::D => &[Key(KeyCode::KeyD)],
			S::E => &[Key(KeyCode::KeyE)],
			S::F => &[Key(KeyCode::KeyF)],
			S::G => &[Key(KeyCode::KeyG)],
			S::H => &[Key(KeyCode::KeyH)],
			S::I => &[Key(KeyCode::KeyI)],
			S::J => &[Key(KeyCode::KeyJ)],
			S::K => &[Key(KeyCode::KeyK)],
			S::L => &[Key(KeyCode::KeyL)],
			S::M => &[Key(KeyCode::KeyM)],
			S::N => &[Key(KeyCode::KeyN)],
			S::O => &[Key(KeyCode::KeyO)],
			S::P => &[Key(KeyCode::KeyP)],
			S::Q => &[Key(KeyCode::KeyQ)],
			S::R => &[Key(KeyCode::KeyR)],
			S::S => &[Key(KeyCode::KeyS)],
			S::T => &[Key(KeyCode::KeyT)],
			S::U => &[Key(KeyCode::KeyU)],
			S::V => &[Key(KeyCode::KeyV)],
			S::W => &[Key(KeyCode::KeyW)],
			S::X => &[Key(KeyCode::KeyX)],
			S::Y => &[Key(KeyCode::KeyY)],
			S::Z => &[Key(KeyCode::KeyZ)],

			S::Digit0 => &[Key(KeyCode::Digit0), Key(KeyCode::Numpad0)],
			S::Digit1 => &[Key(KeyCode::Digit1), Key(KeyCode::Numpad1)],
			S::Digit2 => &[Key(KeyCode::Digit2), Key(KeyCode::Numpad2)],
			S::Digit3 => &[Key(KeyCode::Digit3), Key(KeyCode::Numpad3)],
			S::Digit4 => &[Key(KeyCode::Digit4), Key(KeyCode::Numpad4)],
			S::Digit5 => &[Key(KeyCode::Digit5), Key(KeyCode::Numpad5)],
			S::Digit6 => &[Key(KeyCode::Digit6), Key(KeyCode::Numpad6)],
			S::Digit7 => &[Key(KeyCode::Digit7), Key(KeyCode::Numpad7)],
			S::Digit8 => &[Key(KeyCode::Digit8), Key(KeyCode::Numpad8)],
			S::Digit9 => &[Key(KeyCode::Digit9), Key(KeyCode::Numpad9)],

			S::F1 => &[Key(KeyCode::F1)],
			S::F2 => &[Key(KeyCode::F2)],
			S::F3 => &[Key(KeyCode::F3)],
			S::F4 => &[Key(KeyCode::F4)],
			S::F5 => &[Key(KeyCode::F5)],
			S::F6 => &[Key(KeyCode::F6)],
			S::F7 => &[Key(KeyCode::F7)],
			S::F8 => &[Key(KeyCode::F8)],
			S::F9 => &[Key(KeyCode::F9)],
			S::F10 => &[Key(KeyCode::F10)],
			S::F11 => &[Key(KeyCode::F11)],
			S::F12 => &[Key(KeyCode::F12)],
		}
	}
}


#[cfg(test)]
mod test {
	use super::*;
	use strum::IntoEnumIterator;

	#[test]
	fn only_motion_signals_are_unbound() {
		for id in SignalId::iter() {
			assert_eq!(id.bindings().is_empty(), id.is_motion(), "{id:?}");
		}
	}

	#[test]
	fn modifiers_bind_both_sides() {
		assert!(SignalId::Ctrl.bindings().contains(&Button::Key(KeyCode::ControlLeft)));
		assert!(SignalId::Ctrl.bindings().contains(&Button::Key(KeyCode::ControlRight)));
		assert!(SignalId::Shift.bindings().contains(&Button::Key(KeyCode::ShiftRight)));
		assert!(SignalId::Alt.bindings().contains(&Button::Key(KeyCode::AltLeft)));
	}
}
