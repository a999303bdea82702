//! Application shell for input driven demos.
//! Opens a window, loads config, and runs one [`InputSystem`](input::InputSystem) frame around every [`App::present`].

pub mod prelude;
pub use crate::prelude::*;

pub mod context;
pub use context::Context;

use std::time::Instant;


pub trait App {
	fn present(&mut self, _: &mut Context);
}


pub fn run<F, A>(title: &str, start_app: F) -> anyhow::Result<()>
	where A: App + 'static
		, F: FnOnce(&mut Context) -> anyhow::Result<A>
{
	run_with_settings(host::Settings::new(title), start_app)
}


pub fn run_with_settings<F, A>(settings: host::Settings<'_>, start_app: F) -> anyhow::Result<()>
	where A: App + 'static
		, F: FnOnce(&mut Context) -> anyhow::Result<A>
{
	let app_name = settings.initial_title.to_owned();

	host::start(settings, move |host| {
		use anyhow::Context as _;

		let cfg = cfg::Config::for_app_name(&app_name)
			.context("Failed to load config")?;

		let mut context = Context::new(cfg)?;

		let size = host.window.inner_size();
		context.notify_resized(Vec2i::new(size.width as i32, size.height as i32));

		let app = start_app(&mut context)?;

		Ok(HostedApp {
			context,
			app,
			last_frame: Instant::now(),
		})
	})
}




struct HostedApp<A: App> {
	context: Context,
	app: A,
	last_frame: Instant,
}


impl<A: App> host::HostedApp for HostedApp<A> {
	fn window_event(&mut self, _: &host::winit::event_loop::ActiveEventLoop, event: host::WindowEvent) {
		self.context.on_window_event(&event);
	}

	fn device_event(&mut self, _: &host::winit::event_loop::ActiveEventLoop, _: host::DeviceId, event: host::DeviceEvent) {
		self.context.on_device_event(&event);
	}

	fn draw(&mut self, event_loop: &host::winit::event_loop::ActiveEventLoop) {
		let now = Instant::now();
		let dt = (now - self.last_frame).as_secs_f32();
		self.last_frame = now;

		self.context.update(dt, &mut self.app);

		if self.context.wants_quit() {
			event_loop.exit();
		}
	}

	fn shutdown(&mut self, _: &host::winit::event_loop::ActiveEventLoop) {
		self.context.shutdown();
	}
}
