pub use winit;

use winit::application::ApplicationHandler;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

pub use winit::event::{DeviceEvent, DeviceId, StartCause, WindowEvent};

pub mod prelude {
	pub use winit;
}


pub struct Settings<'title> {
	pub initial_title: &'title str,
	pub initial_size: Option<(u32, u32)>,
	pub install_logger: bool,
}

impl<'title> Settings<'title> {
	pub fn new(initial_title: &'title str) -> Self {
		Settings {
			initial_title,
			initial_size: None,
			install_logger: true,
		}
	}

	pub fn with_size(self, width: u32, height: u32) -> Self {
		Settings {
			initial_size: Some((width, height)),
			.. self
		}
	}

	pub fn no_logger(self) -> Self {
		Settings {
			install_logger: false,
			.. self
		}
	}
}


/// Everything a hosted app gets to keep from the host.
pub struct Host {
	pub window: Window,
}


/// Receives the event loop callbacks once the window exists.
pub trait HostedApp {
	fn new_events(&mut self, _: &ActiveEventLoop, _: StartCause) {}
	fn window_event(&mut self, _: &ActiveEventLoop, _: WindowEvent) {}
	fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, _: DeviceEvent) {}
	fn draw(&mut self, _: &ActiveEventLoop);
	fn shutdown(&mut self, _: &ActiveEventLoop) {}
}


pub fn start<F, H>(settings: Settings<'_>, start_hostee: F) -> anyhow::Result<()>
	where F: FnOnce(&Host) -> anyhow::Result<H>
		, H: HostedApp + 'static
{
	if settings.install_logger {
		init_logging()?;
	}

	let event_loop = EventLoop::new()?;
	event_loop.set_control_flow(ControlFlow::Poll);

	let mut attributes = Window::default_attributes()
		.with_title(settings.initial_title);

	if let Some((width, height)) = settings.initial_size {
		attributes = attributes.with_inner_size(winit::dpi::PhysicalSize::new(width, height));
	}

	let mut app_host = ApplicationHost {
		attributes,
		start_hostee: Some(start_hostee),
		hosted: None,
		error: None,
	};

	event_loop.run_app(&mut app_host)?;

	match app_host.error {
		Some(error) => Err(error),
		None => Ok(()),
	}
}


/// Installs a terminal logger for `log`, a fmt subscriber for `tracing` spans, and routes panics through the logger.
pub fn init_logging() -> anyhow::Result<()> {
	use simplelog::*;

	let level = match cfg!(debug_assertions) {
		true => LevelFilter::Debug,
		false => LevelFilter::Info,
	};

	let config = ConfigBuilder::new()
		.add_filter_ignore_str("winit")
		.add_filter_ignore_str("calloop")
		.build();

	TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)?;
	log_panics::init();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(tracing::Level::INFO)
		.with_writer(std::io::stderr)
		.finish();

	tracing::subscriber::set_global_default(subscriber)?;

	Ok(())
}



struct ApplicationHost<F, H> {
	attributes: winit::window::WindowAttributes,
	start_hostee: Option<F>,
	hosted: Option<(Host, H)>,
	error: Option<anyhow::Error>,
}

impl<F, H> ApplicationHost<F, H>
	where F: FnOnce(&Host) -> anyhow::Result<H>
		, H: HostedApp
{
	fn try_start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
		let Some(start_hostee) = self.start_hostee.take() else {
			return Ok(())
		};

		let window = event_loop.create_window(self.attributes.clone())?;
		let host = Host { window };

		let hostee = start_hostee(&host)?;
		self.hosted = Some((host, hostee));

		Ok(())
	}
}

impl<F, H> ApplicationHandler for ApplicationHost<F, H>
	where F: FnOnce(&Host) -> anyhow::Result<H>
		, H: HostedApp
{
	fn resumed(&mut self, event_loop: &ActiveEventLoop) {
		if let Err(error) = self.try_start(event_loop) {
			log::error!("Failed to start: {error:?}");
			self.error = Some(error);
			event_loop.exit();
		}
	}

	fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
		if let Some((_, hostee)) = self.hosted.as_mut() {
			hostee.new_events(event_loop, cause);
		}
	}

	fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
		let Some((host, hostee)) = self.hosted.as_mut() else {
			return
		};

		match event {
			WindowEvent::RedrawRequested => {
				hostee.draw(event_loop);
				host.window.request_redraw();
			}

			event => hostee.window_event(event_loop, event),
		}
	}

	fn device_event(&mut self, event_loop: &ActiveEventLoop, device_id: DeviceId, event: DeviceEvent) {
		if let Some((_, hostee)) = self.hosted.as_mut() {
			hostee.device_event(event_loop, device_id, event);
		}
	}

	fn about_to_wait(&mut self, _: &ActiveEventLoop) {
		if let Some((host, _)) = self.hosted.as_ref() {
			host.window.request_redraw();
		}
	}

	fn exiting(&mut self, event_loop: &ActiveEventLoop) {
		if let Some((_, hostee)) = self.hosted.as_mut() {
			hostee.shutdown(event_loop);
		}
	}
}
