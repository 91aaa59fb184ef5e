use ember::{PerspectiveCamera, PointerButton, SketchSession, SurfaceRect};
use glam::{vec3, Vec3};

fn configure_tracing() -> anyhow::Result<()> {
	let max_level = if cfg!(debug_assertions) {
		tracing::Level::TRACE
	} else {
		tracing::Level::INFO
	};
	tracing::subscriber::set_global_default(
		tracing_subscriber::FmtSubscriber::builder()
			.with_max_level(max_level)
			.finish(),
	)?;
	Ok(())
}

/// Drags the pointer from `from` to `to` in pixel steps, with a little
/// jitter standing in for hand tremor. The sub-step wobble exercises the
/// minimum-step filter the way a real pointer would.
fn drag(
	session: &mut SketchSession,
	camera: &PerspectiveCamera,
	from: (f32, f32),
	to: (f32, f32),
	steps: u32,
) {
	session.pointer_down(camera, PointerButton::Primary, from.0, from.1);
	for i in 1..=steps {
		let t = i as f32 / steps as f32;
		let jitter = || 2.0 * fastrand::f32() - 1.0;
		session.pointer_move(
			camera,
			from.0 + t * (to.0 - from.0) + jitter(),
			from.1 + t * (to.1 - from.1) + jitter(),
		);
	}
	session.pointer_up(PointerButton::Primary);
}

fn main() -> anyhow::Result<()> {
	if let Err(error) = configure_tracing() {
		// We can technically continue without logging.
		tracing::error!(error = error.to_string());
	}

	let config = ember::config()
		.start_color("#00f0ff")
		.end_color("#ff00e5")
		.build()?;
	let surface = SurfaceRect::from_size(1280.0, 720.0);
	let mut session = SketchSession::new(config, surface);
	let camera = PerspectiveCamera::looking_at(
		vec3(0.0, 0.0, 5.0),
		Vec3::ZERO,
		Vec3::Y,
		75f32.to_radians(),
		1280.0 / 720.0,
	);

	// A free-floating stroke across the view, then a second one starting
	// from the middle of the first, which snaps onto it.
	drag(&mut session, &camera, (340.0, 360.0), (940.0, 360.0), 120);
	drag(&mut session, &camera, (640.0, 360.0), (640.0, 120.0), 60);

	// Hover near the junction, the way an idle pointer would.
	session.pointer_move(&camera, 643.0, 357.0);

	for (index, stroke) in session.strokes().iter().enumerate() {
		tracing::info!(
			stroke = index,
			points = stroke.len(),
			width = stroke.width(),
			"stroke"
		);
	}
	tracing::info!(
		strokes = session.strokes().len(),
		total_points = session.strokes().total_points(),
		hover = ?session.hover_marker(),
		"session summary"
	);

	session.teardown();
	Ok(())
}
