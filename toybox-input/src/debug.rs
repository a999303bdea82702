use crate::*;


/// Number of frames a fired trigger stays listed in [`triggers_ui`].
const RECENT_FRAMES: u32 = 30;


/// Table of every signal that is active or changed this frame.
pub fn signals_ui(ui: &mut egui::Ui, input: &InputSystem) {
	ui.label(format!("Frame: {}", input.frame()));
	ui.label(format!("Mouse delta: {:?}", input.signal(SignalId::MouseMove).value_raw));
	ui.label(format!("Scroll: {:?}", input.signal(SignalId::MouseScroll).value_raw));

	ui.separator();

	egui::Grid::new(ui.id().with("signals"))
		.striped(true)
		.show(ui, |ui| {
			ui.label("Signal");
			ui.label("State");
			ui.label("Time active");
			ui.end_row();

			for signal in input.state().this_frame.iter() {
				if !signal.is_active() && signal.state == SignalState::None {
					continue
				}

				ui.label(signal.id.name());
				ui.label(format!("{:?}", signal.state));
				ui.label(format!("{:.2}s", signal.time_active));
				ui.end_row();
			}
		});
}


/// Lists registered triggers, highlighting the ones that fired in the last few frames.
pub fn triggers_ui(ui: &mut egui::Ui, input: &InputSystem) {
	#[derive(Clone, Default)]
	struct State {
		recently_fired: Vec<(String, u32)>,
	}

	let state_id = ui.id().with("state");
	let mut state: State = ui.data_mut(|map| std::mem::take(map.get_temp_mut_or_default(state_id)));

	for (_, timer) in state.recently_fired.iter_mut() {
		*timer = timer.saturating_sub(1);
	}

	state.recently_fired.retain(|(_, timer)| *timer > 0);

	for trigger in input.triggers().filter(|trigger| trigger.triggered_this_frame) {
		match state.recently_fired.iter_mut().find(|(name, _)| *name == trigger.name) {
			Some((_, timer)) => *timer = RECENT_FRAMES,
			None => state.recently_fired.push((trigger.name.clone(), RECENT_FRAMES)),
		}
	}

	ui.horizontal_wrapped(|ui| {
		ui.label("Registered: ");
		for trigger in input.triggers() {
			ui.label(&trigger.name);
		}
	});

	ui.horizontal_wrapped(|ui| {
		ui.label("Recently fired: ");
		for (name, _) in state.recently_fired.iter() {
			ui.label(name);
		}
	});

	ui.data_mut(move |map| map.insert_temp(state_id, state));
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn debug_views_render_headless() {
		let mut input = InputSystem::new(Settings::default());
		triggers::register_builtin(&mut input);

		let mut tracker = Tracker::default();
		tracker.track_button(KeyCode::Escape, true);
		input.poll(0.1, &mut tracker);
		input.evaluate_triggers();

		let ctx = egui::Context::default();
		let _ = ctx.run(egui::RawInput::default(), |ctx| {
			egui::CentralPanel::default().show(ctx, |ui| {
				signals_ui(ui, &input);
				triggers_ui(ui, &input);
			});
		});
	}
}
