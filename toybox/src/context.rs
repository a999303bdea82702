use crate::prelude::*;
use crate::App;

use std::cell::Cell;
use std::rc::Rc;


/// Per-session state handed to the [`App`]. Owns the one [`input::InputSystem`] for this process.
pub struct Context {
	pub input: input::InputSystem,
	pub cfg: cfg::Config,

	events: input::Tracker,

	wants_quit: Rc<Cell<bool>>,
	window_size: Rc<Cell<Vec2i>>,
}

impl Context {
	/// Builds the input system from the `[input]` config section and registers the stock triggers.
	pub fn new(cfg: cfg::Config) -> anyhow::Result<Context> {
		let input_settings: input::Settings = cfg.section("input")?;
		let mut input = input::InputSystem::new(input_settings);
		triggers::register_builtin(&mut input);

		let wants_quit = Rc::new(Cell::new(false));
		let window_size = Rc::new(Cell::new(Vec2i::zero()));

		input.on_quit({
			let wants_quit = wants_quit.clone();
			move || wants_quit.set(true)
		});

		input.on_resize({
			let window_size = window_size.clone();
			move |new_size| {
				log::debug!("Window resized to {new_size:?}");
				window_size.set(new_size);
			}
		});

		let events = input.new_tracker();

		Ok(Context {
			input,
			cfg,
			events,
			wants_quit,
			window_size,
		})
	}

	pub fn window_size(&self) -> Vec2i {
		self.window_size.get()
	}

	pub fn wants_quit(&self) -> bool {
		self.wants_quit.get()
	}

	pub fn request_quit(&self) {
		self.wants_quit.set(true);
	}

	/// Raw platform input waiting for the next frame.
	pub fn events_mut(&mut self) -> &mut input::Tracker {
		&mut self.events
	}

	/// Run one full input frame around `app`.
	pub fn update(&mut self, dt: f32, app: &mut impl App) {
		self.input.poll(dt, &mut self.events);
		self.input.evaluate_triggers();

		app.present(self);

		self.input.end_frame();
	}
}

impl Context {
	pub(crate) fn on_window_event(&mut self, event: &host::WindowEvent) {
		self.events.on_window_event(event);
	}

	pub(crate) fn on_device_event(&mut self, event: &host::DeviceEvent) {
		self.events.on_device_event(event);
	}

	pub(crate) fn notify_resized(&mut self, new_size: Vec2i) {
		self.events.push_event(input::PlatformEvent::Resized(new_size));
	}

	pub(crate) fn shutdown(&mut self) {
		if let Err(error) = self.cfg.save() {
			log::error!("Failed to save config: {error:?}");
		}
	}
}



#[cfg(test)]
mod test {
	use super::*;
	use input::{KeyCode, MouseButton, PlatformEvent, SignalId};

	#[derive(Default)]
	struct ClickCounter {
		clicks: u32,
		frames: u32,
	}

	impl App for ClickCounter {
		fn present(&mut self, ctx: &mut Context) {
			self.frames += 1;

			if ctx.input.is_triggered(triggers::MOUSE_LEFT_DOWN) {
				self.clicks += 1;
			}

			if ctx.input.if_triggered(triggers::ESC_DOWN, |_| true) {
				ctx.request_quit();
			}
		}
	}

	fn new_context() -> Context {
		Context::new(cfg::Config::default()).unwrap()
	}

	#[test]
	fn stock_triggers_are_registered() {
		let ctx = new_context();
		assert!(ctx.input.has_trigger(triggers::MOUSE_MOVED));
		assert!(ctx.input.has_trigger("EscDown"));
	}

	#[test]
	fn update_runs_whole_frame() {
		let mut ctx = new_context();
		let mut app = ClickCounter::default();

		ctx.events_mut().track_button(MouseButton::Left, true);
		ctx.update(0.016, &mut app);
		ctx.update(0.016, &mut app);

		ctx.events_mut().track_button(MouseButton::Left, false);
		ctx.update(0.016, &mut app);

		ctx.events_mut().track_button(MouseButton::Left, true);
		ctx.update(0.016, &mut app);

		assert_eq!(app.frames, 4);
		assert_eq!(app.clicks, 2);
		assert_eq!(ctx.input.frame(), 4);
		assert_eq!(ctx.input.state().prev(SignalId::MouseLeft).state, input::SignalState::Started);
	}

	#[test]
	fn quit_from_platform_and_from_app() {
		let mut ctx = new_context();
		let mut app = ClickCounter::default();

		ctx.events_mut().push_event(PlatformEvent::QuitRequested);
		assert!(!ctx.wants_quit());
		ctx.update(0.016, &mut app);
		assert!(ctx.wants_quit());

		let mut ctx = new_context();
		ctx.events_mut().track_button(KeyCode::Escape, true);
		ctx.update(0.016, &mut app);
		assert!(ctx.wants_quit());
	}

	#[test]
	fn resize_reaches_context() {
		let mut ctx = new_context();
		let mut app = ClickCounter::default();

		ctx.notify_resized(Vec2i::new(1280, 720));
		assert_eq!(ctx.window_size(), Vec2i::zero());

		ctx.update(0.016, &mut app);
		assert_eq!(ctx.window_size(), Vec2i::new(1280, 720));
	}
}
