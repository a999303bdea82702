//! Stock triggers used by the demo harness UI and camera controls.
//! Register them all with [`register_builtin`].

use crate::{InputState, InputSystem, SignalId, SignalState, Trigger, TriggerKey};


pub const MOUSE_MOVED: TriggerKey = TriggerKey::from_name("MouseMoved");
pub const MOUSE_MID_MOVE: TriggerKey = TriggerKey::from_name("MouseMidMove");
pub const MOUSE_MID_SCROLL: TriggerKey = TriggerKey::from_name("MouseMidScroll");
pub const MOUSE_LEFT_DOWN: TriggerKey = TriggerKey::from_name("MouseLeftDown");
pub const MOUSE_RIGHT_DOWN: TriggerKey = TriggerKey::from_name("MouseRightDown");
pub const MOUSE_RIGHT_HELD: TriggerKey = TriggerKey::from_name("MouseRightHeld");
pub const ESC_DOWN: TriggerKey = TriggerKey::from_name("EscDown");


pub fn register_builtin(input: &mut InputSystem) {
	input.add_trigger("MouseMoved", mouse_moved, false);
	input.add_trigger("MouseMidMove", mouse_mid_move, false);
	input.add_trigger("MouseMidScroll", mouse_mid_scroll, false);
	input.add_trigger("MouseLeftDown", mouse_left_down, false);
	input.add_trigger("MouseRightDown", mouse_right_down, false);
	input.add_trigger("MouseRightHeld", mouse_right_held, false);
	input.add_trigger("EscDown", esc_down, false);
}


/// Any non-idle pointer motion, including the frame motion stops.
pub fn mouse_moved(_: &mut Trigger, state: &InputState) -> bool {
	!state.signal(SignalId::MouseMove).is_idle()
}

/// Middle button drag.
pub fn mouse_mid_move(_: &mut Trigger, state: &InputState) -> bool {
	state.state(SignalId::MouseMiddle) == SignalState::Going
		&& !state.signal(SignalId::MouseMove).is_idle()
}

/// Any scrolling. The scroll signal is passed on as input data.
pub fn mouse_mid_scroll(trigger: &mut Trigger, state: &InputState) -> bool {
	let scroll = state.signal(SignalId::MouseScroll);
	trigger.set_input(*scroll);
	!scroll.is_idle()
}

pub fn mouse_left_down(_: &mut Trigger, state: &InputState) -> bool {
	state.state(SignalId::MouseLeft) == SignalState::Started
}

pub fn mouse_right_down(_: &mut Trigger, state: &InputState) -> bool {
	state.state(SignalId::MouseRight) == SignalState::Started
}

/// Press and hold of the right button. Ctrl is passed on as input data so consumers can detect modified drags.
pub fn mouse_right_held(trigger: &mut Trigger, state: &InputState) -> bool {
	trigger.set_input(*state.signal(SignalId::Ctrl));
	state.signal(SignalId::MouseRight).is_down()
}

pub fn esc_down(_: &mut Trigger, state: &InputState) -> bool {
	state.state(SignalId::Escape) == SignalState::Started
}
