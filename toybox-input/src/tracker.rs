use common::math::{Vec2, Vec2i};
use std::collections::VecDeque;
use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::keys::Button;


/// Scroll deltas reported in pixels are converted to lines using this.
pub const PIXELS_PER_SCROLL_LINE: f32 = 50.0;

pub const DEFAULT_EVENT_CAPACITY: usize = 256;


/// Discrete platform events consumed once per [`InputSystem::poll`](crate::InputSystem::poll).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PlatformEvent {
	QuitRequested,
	Resized(Vec2i),
	PointerMotion(Vec2),
	Scroll(Vec2),
	FocusLost,
}

impl PlatformEvent {
	/// Relative input that accumulates over a frame.
	pub fn is_delta(&self) -> bool {
		matches!(self, PlatformEvent::PointerMotion(_) | PlatformEvent::Scroll(_))
	}
}


/// Scroll amount in lines.
pub fn scroll_lines(delta: MouseScrollDelta) -> Vec2 {
	match delta {
		MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
		MouseScrollDelta::PixelDelta(pos) => Vec2::new(
			pos.x as f32 / PIXELS_PER_SCROLL_LINE,
			pos.y as f32 / PIXELS_PER_SCROLL_LINE,
		),
	}
}


/// Anything that can feed raw input to an [`InputSystem`](crate::InputSystem).
/// Neither method may block.
pub trait EventSource {
	/// Pop the next pending event, or `None` once the queue is drained.
	fn next_event(&mut self) -> Option<PlatformEvent>;

	/// Whether `button` is held right now.
	fn is_down(&self, button: Button) -> bool;
}


/// Collects winit events between frames and remembers which buttons are held.
#[derive(Debug)]
pub struct Tracker {
	pub active_buttons: Vec<Button>,

	events: VecDeque<PlatformEvent>,
	capacity: usize,

	focused: bool,
}

impl Default for Tracker {
	fn default() -> Tracker {
		Tracker::with_capacity(DEFAULT_EVENT_CAPACITY)
	}
}

impl Tracker {
	pub fn with_capacity(capacity: usize) -> Tracker {
		let capacity = capacity.max(1);

		Tracker {
			active_buttons: Vec::new(),
			events: VecDeque::with_capacity(capacity),
			capacity,
			focused: true,
		}
	}

	pub fn pending_events(&self) -> usize {
		self.events.len()
	}

	/// Queue `event` for the next poll.
	/// Consecutive deltas of the same kind are merged. When full, only delta events are ever dropped,
	/// so quit, resize and focus events always reach the next poll.
	pub fn push_event(&mut self, event: PlatformEvent) {
		match (self.events.back_mut(), event) {
			(Some(PlatformEvent::PointerMotion(total)), PlatformEvent::PointerMotion(delta))
			| (Some(PlatformEvent::Scroll(total)), PlatformEvent::Scroll(delta)) => {
				*total += delta;
				return
			}

			_ => {}
		}

		if self.events.len() >= self.capacity {
			match self.events.iter().position(PlatformEvent::is_delta) {
				Some(index) => {
					log::warn!("Input event queue full, dropping {:?}", self.events[index]);
					self.events.remove(index);
				}

				None if event.is_delta() => {
					log::warn!("Input event queue full, dropping {event:?}");
					return
				}

				None => {}
			}
		}

		self.events.push_back(event);
	}

	pub fn track_button(&mut self, button: impl Into<Button>, down: bool) {
		let button = button.into();

		if down {
			if !self.active_buttons.contains(&button) {
				self.active_buttons.push(button);
			}
		} else {
			self.active_buttons.retain(|active_button| *active_button != button);
		}
	}

	pub fn track_focus_lost(&mut self) {
		self.focused = false;
		self.active_buttons.clear();
		self.push_event(PlatformEvent::FocusLost);
	}

	pub fn track_focus_gained(&mut self) {
		self.focused = true;
	}

	pub fn on_window_event(&mut self, event: &WindowEvent) {
		match event {
			WindowEvent::KeyboardInput{ event, .. } => {
				if event.repeat {
					return
				}

				if let PhysicalKey::Code(code) = event.physical_key {
					self.track_button(code, event.state == ElementState::Pressed);
				}
			}

			WindowEvent::MouseInput{ button, state, .. } => {
				self.track_button(*button, *state == ElementState::Pressed);
			}

			WindowEvent::MouseWheel{ delta, .. } => {
				self.push_event(PlatformEvent::Scroll(scroll_lines(*delta)));
			}

			WindowEvent::Resized(size) => {
				let size = Vec2i::new(size.width as i32, size.height as i32);
				self.push_event(PlatformEvent::Resized(size));
			}

			WindowEvent::CloseRequested => self.push_event(PlatformEvent::QuitRequested),

			WindowEvent::Focused(false) => self.track_focus_lost(),
			WindowEvent::Focused(true) => self.track_focus_gained(),

			_ => {}
		}
	}

	pub fn on_device_event(&mut self, event: &DeviceEvent) {
		// Device events arrive regardless of focus.
		if !self.focused {
			return
		}

		if let DeviceEvent::MouseMotion{ delta: (x, y) } = *event {
			self.push_event(PlatformEvent::PointerMotion(Vec2::new(x as f32, y as f32)));
		}
	}
}

impl EventSource for Tracker {
	fn next_event(&mut self) -> Option<PlatformEvent> {
		self.events.pop_front()
	}

	fn is_down(&self, button: Button) -> bool {
		self.active_buttons.contains(&button)
	}
}



#[cfg(test)]
mod test {
	use super::*;
	use crate::keys::{KeyCode, MouseButton};

	#[test]
	fn tracks_held_buttons() {
		let mut tracker = Tracker::default();
		tracker.track_button(KeyCode::KeyW, true);
		tracker.track_button(KeyCode::KeyW, true);
		tracker.track_button(MouseButton::Left, true);

		assert_eq!(tracker.active_buttons.len(), 2);
		assert!(tracker.is_down(Button::Key(KeyCode::KeyW)));

		tracker.track_button(KeyCode::KeyW, false);
		assert!(!tracker.is_down(Button::Key(KeyCode::KeyW)));
		assert!(tracker.is_down(Button::Mouse(MouseButton::Left)));
	}

	#[test]
	fn focus_loss_releases_everything() {
		let mut tracker = Tracker::default();
		tracker.track_button(KeyCode::Escape, true);
		tracker.track_focus_lost();

		assert!(tracker.active_buttons.is_empty());
		assert_eq!(tracker.next_event(), Some(PlatformEvent::FocusLost));

		tracker.on_device_event(&DeviceEvent::MouseMotion{ delta: (4.0, 2.0) });
		assert_eq!(tracker.next_event(), None);

		tracker.track_focus_gained();
		tracker.on_device_event(&DeviceEvent::MouseMotion{ delta: (4.0, 2.0) });
		assert_eq!(tracker.next_event(), Some(PlatformEvent::PointerMotion(Vec2::new(4.0, 2.0))));
	}

	#[test]
	fn consecutive_deltas_merge() {
		let mut tracker = Tracker::default();
		tracker.push_event(PlatformEvent::Scroll(Vec2::new(0.0, 1.0)));
		tracker.push_event(PlatformEvent::Scroll(Vec2::new(0.0, 2.0)));
		tracker.push_event(PlatformEvent::PointerMotion(Vec2::new(1.0, 1.0)));
		tracker.push_event(PlatformEvent::PointerMotion(Vec2::new(2.0, -1.0)));

		assert_eq!(tracker.pending_events(), 2);
		assert_eq!(tracker.next_event(), Some(PlatformEvent::Scroll(Vec2::new(0.0, 3.0))));
		assert_eq!(tracker.next_event(), Some(PlatformEvent::PointerMotion(Vec2::new(3.0, 0.0))));
		assert_eq!(tracker.next_event(), None);
	}

	#[test]
	fn full_queue_drops_oldest_delta() {
		let mut tracker = Tracker::with_capacity(3);
		tracker.push_event(PlatformEvent::QuitRequested);
		tracker.push_event(PlatformEvent::PointerMotion(Vec2::new(1.0, 0.0)));
		tracker.push_event(PlatformEvent::Scroll(Vec2::new(0.0, 1.0)));
		tracker.push_event(PlatformEvent::PointerMotion(Vec2::new(2.0, 0.0)));

		assert_eq!(tracker.pending_events(), 3);
		assert_eq!(tracker.next_event(), Some(PlatformEvent::QuitRequested));
		assert_eq!(tracker.next_event(), Some(PlatformEvent::Scroll(Vec2::new(0.0, 1.0))));
		assert_eq!(tracker.next_event(), Some(PlatformEvent::PointerMotion(Vec2::new(2.0, 0.0))));
	}

	#[test]
	fn full_queue_never_drops_control_events() {
		let mut tracker = Tracker::with_capacity(1);
		tracker.push_event(PlatformEvent::QuitRequested);
		tracker.push_event(PlatformEvent::PointerMotion(Vec2::new(5.0, 0.0)));
		tracker.track_focus_lost();

		assert_eq!(tracker.next_event(), Some(PlatformEvent::QuitRequested));
		assert_eq!(tracker.next_event(), Some(PlatformEvent::FocusLost));
		assert_eq!(tracker.next_event(), None);
	}

	#[test]
	fn scroll_deltas_convert_to_lines() {
		use winit::dpi::PhysicalPosition;

		assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(1.0, -2.0)), Vec2::new(1.0, -2.0));

		let pixels = MouseScrollDelta::PixelDelta(PhysicalPosition::new(100.0, -25.0));
		assert_eq!(scroll_lines(pixels), Vec2::new(100.0 / PIXELS_PER_SCROLL_LINE, -25.0 / PIXELS_PER_SCROLL_LINE));
	}

	#[test]
	fn window_events_map_to_platform_events() {
		use winit::dpi::PhysicalSize;

		let mut tracker = Tracker::default();
		tracker.track_button(KeyCode::KeyA, true);

		tracker.on_window_event(&WindowEvent::CloseRequested);
		tracker.on_window_event(&WindowEvent::Resized(PhysicalSize::new(800, 600)));
		tracker.on_window_event(&WindowEvent::Focused(false));

		assert_eq!(tracker.next_event(), Some(PlatformEvent::QuitRequested));
		assert_eq!(tracker.next_event(), Some(PlatformEvent::Resized(Vec2i::new(800, 600))));
		assert_eq!(tracker.next_event(), Some(PlatformEvent::FocusLost));
		assert_eq!(tracker.next_event(), None);
		assert!(!tracker.is_down(Button::Key(KeyCode::KeyA)));

		tracker.on_window_event(&WindowEvent::Focused(true));
		tracker.on_device_event(&DeviceEvent::MouseMotion{ delta: (1.0, 0.0) });
		assert_eq!(tracker.next_event(), Some(PlatformEvent::PointerMotion(Vec2::new(1.0, 0.0))));
	}
}
