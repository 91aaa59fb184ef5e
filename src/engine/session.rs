use crate::camera::CameraProjection;
use crate::config::SketchConfig;
use crate::engine::{nearest_point, Gradient, Stroke, StrokeCollection};
use crate::geom::{Plane, Ray};
use crate::input::{PointerButton, SurfaceRect};
use glam::Vec3;

/// Camera pose snapshotted at event time. Only pointer-down needs it; the
/// plane it resolves then serves the whole stroke, however the camera moves
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CameraPose {
	position: Vec3,
	view_direction: Vec3,
}

impl CameraPose {
	fn of(camera: &impl CameraProjection) -> Self {
		Self {
			position: camera.position(),
			view_direction: camera.view_direction(),
		}
	}
}

/// A drawing plane and an active stroke exist exactly while a drag is in
/// progress; the `Drawing` variant carries both, so neither can leak into
/// the idle state.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DrawState {
	Idle,
	Drawing { plane: Plane, stroke: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SessionEvent {
	PointerDown { ray: Ray, pose: CameraPose },
	PointerMove { ray: Ray },
	PointerUp,
	Clear,
}

/// One drawing surface's worth of interaction state: the stroke collection,
/// the in-progress stroke and its plane, and the advisory hover marker.
/// Instantiated per surface; several sessions can coexist.
///
/// Events arrive through the `pointer_*` and `key_down` methods. All
/// runtime failure modes (ray parallel to the plane, movement below the
/// step threshold, events in the wrong state) are silent no-ops; drawing
/// recovers on the next event that makes sense.
#[derive(Debug)]
pub struct SketchSession {
	config: SketchConfig,
	surface: SurfaceRect,
	gradient: Gradient,
	strokes: StrokeCollection,
	state: DrawState,
	hover: Option<Vec3>,
	detached: bool,
}

impl SketchSession {
	pub fn new(config: SketchConfig, surface: SurfaceRect) -> Self {
		let gradient = Gradient::new(config.start_color, config.end_color, config.gradient_steps);
		Self {
			config,
			surface,
			gradient,
			strokes: StrokeCollection::default(),
			state: DrawState::Idle,
			hover: None,
			detached: false,
		}
	}

	pub fn config(&self) -> &SketchConfig {
		&self.config
	}

	/// Completed and in-progress strokes, in draw order, for the rendering
	/// collaborator to consume each frame.
	pub fn strokes(&self) -> &StrokeCollection {
		&self.strokes
	}

	/// Where the hover indicator should be shown, if anywhere. Advisory
	/// only; present while idle over snappable geometry.
	pub fn hover_marker(&self) -> Option<Vec3> {
		self.hover
	}

	pub fn is_drawing(&self) -> bool {
		matches!(self.state, DrawState::Drawing { .. })
	}

	/// Tracks host resizes so pointer coordinates keep mapping correctly.
	pub fn set_surface(&mut self, surface: SurfaceRect) {
		self.surface = surface;
	}

	/// Swaps the gradient endpoints for points appended from now on.
	/// Already-drawn geometry keeps its baked colors.
	pub fn set_gradient(&mut self, start: Vec3, end: Vec3) {
		self.gradient = Gradient::new(start, end, self.config.gradient_steps);
	}

	pub fn pointer_down(
		&mut self,
		camera: &impl CameraProjection,
		button: PointerButton,
		x: f32,
		y: f32,
	) {
		if self.detached || button != self.config.draw_button {
			return;
		}
		let ray = camera.pick_ray(self.surface.to_ndc(x, y));
		self.state = self.transition(SessionEvent::PointerDown {
			ray,
			pose: CameraPose::of(camera),
		});
	}

	pub fn pointer_move(&mut self, camera: &impl CameraProjection, x: f32, y: f32) {
		if self.detached {
			return;
		}
		let ray = camera.pick_ray(self.surface.to_ndc(x, y));
		self.state = self.transition(SessionEvent::PointerMove { ray });
	}

	pub fn pointer_up(&mut self, button: PointerButton) {
		if self.detached || button != self.config.draw_button {
			return;
		}
		self.state = self.transition(SessionEvent::PointerUp);
	}

	pub fn key_down(&mut self, key: char) {
		if self.detached || key != self.config.clear_key {
			return;
		}
		self.state = self.transition(SessionEvent::Clear);
	}

	/// Removes every stroke and the hover indicator, abandoning any stroke
	/// in progress. Stroke storage is released with the strokes, before this
	/// returns. Idempotent.
	pub fn clear(&mut self) {
		if self.detached {
			return;
		}
		self.state = self.transition(SessionEvent::Clear);
	}

	/// Releases everything and detaches the session from its host; all
	/// later events are ignored. Safe to call more than once.
	pub fn teardown(&mut self) {
		if self.detached {
			return;
		}
		self.state = self.transition(SessionEvent::Clear);
		self.detached = true;
		tracing::debug!("session detached");
	}

	fn transition(&mut self, event: SessionEvent) -> DrawState {
		match (self.state, event) {
			(DrawState::Idle, SessionEvent::PointerDown { ray, pose }) => {
				let plane = self.resolve_plane(&ray, pose);
				let Some(origin) = plane.intersect(&ray) else {
					// The plane faces the camera through a point in front of
					// it, so the down ray missing it means a degenerate
					// projection; stay idle.
					tracing::warn!("pointer-down ray missed its own drawing plane");
					return DrawState::Idle;
				};
				self.hover = None;
				let stroke = Stroke::start(origin, self.gradient.color_at(0), self.config.stroke_width);
				let index = self.strokes.push(stroke);
				tracing::debug!(stroke = index, ?origin, "stroke started");
				DrawState::Drawing { plane, stroke: index }
			}
			(state @ DrawState::Drawing { .. }, SessionEvent::PointerDown { .. }) => {
				tracing::warn!("pointer-down while a stroke is already in progress");
				state
			}
			(DrawState::Idle, SessionEvent::PointerMove { ray }) => {
				self.hover = nearest_point(&ray, &self.strokes, self.config.snap_threshold)
					.map(|hit| hit.point);
				DrawState::Idle
			}
			(state @ DrawState::Drawing { plane, stroke }, SessionEvent::PointerMove { ray }) => {
				// No intersection (ray parallel to the plane) drops this
				// frame's move; so does a sub-threshold step.
				if let Some(candidate) = plane.intersect(&ray) {
					if let Some(stroke) = self.strokes.get_mut(stroke) {
						stroke.try_append(candidate, self.config.min_step_distance, &self.gradient);
					}
				}
				state
			}
			(DrawState::Drawing { stroke, .. }, SessionEvent::PointerUp) => {
				let points = self.strokes.get(stroke).map_or(0, Stroke::len);
				tracing::debug!(stroke, points, "stroke finalized");
				DrawState::Idle
			}
			(DrawState::Idle, SessionEvent::PointerUp) => {
				tracing::warn!("pointer-up with no stroke in progress");
				DrawState::Idle
			}
			(state, SessionEvent::Clear) => {
				if matches!(state, DrawState::Drawing { .. }) {
					tracing::debug!("abandoning the stroke in progress");
				}
				let strokes = self.strokes.len();
				self.strokes.clear();
				self.hover = None;
				tracing::debug!(strokes, "collection cleared");
				DrawState::Idle
			}
		}
	}

	/// The plane a new stroke is drawn on: anchored at the nearest existing
	/// geometry when the down ray passes within the snap threshold, else at
	/// the default distance straight along the view direction. Either way it
	/// faces the camera.
	fn resolve_plane(&self, ray: &Ray, pose: CameraPose) -> Plane {
		let anchor = nearest_point(ray, &self.strokes, self.config.snap_threshold)
			.map(|hit| hit.point)
			.unwrap_or_else(|| {
				pose.position + self.config.default_draw_distance * pose.view_direction
			});
		Plane::new(-pose.view_direction, anchor)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::camera::PerspectiveCamera;
	use approx::assert_abs_diff_eq;
	use glam::vec3;

	const WIDTH: f32 = 800.0;
	const HEIGHT: f32 = 800.0;

	fn session() -> SketchSession {
		SketchSession::new(SketchConfig::default(), SurfaceRect::from_size(WIDTH, HEIGHT))
	}

	/// The reference scene: camera 5 units up the Z axis, looking at the
	/// origin.
	fn camera() -> PerspectiveCamera {
		PerspectiveCamera::looking_at(
			vec3(0.0, 0.0, 5.0),
			Vec3::ZERO,
			Vec3::Y,
			75f32.to_radians(),
			WIDTH / HEIGHT,
		)
	}

	fn center() -> (f32, f32) {
		(WIDTH / 2.0, HEIGHT / 2.0)
	}

	fn draw_line(session: &mut SketchSession, camera: &PerspectiveCamera, from: (f32, f32), to: (f32, f32), steps: usize) {
		session.pointer_down(camera, PointerButton::Primary, from.0, from.1);
		for i in 1..=steps {
			let t = i as f32 / steps as f32;
			session.pointer_move(
				camera,
				from.0 + t * (to.0 - from.0),
				from.1 + t * (to.1 - from.1),
			);
		}
		session.pointer_up(PointerButton::Primary);
	}

	#[test]
	fn test_unsnapped_down_anchors_at_default_distance() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		session.pointer_down(&camera, PointerButton::Primary, cx, cy);

		// Nothing to snap to, so the plane anchor is 5 units along the view
		// direction and the center ray hits it exactly there.
		assert!(session.is_drawing());
		let first = session.strokes().iter().next().unwrap().points()[0];
		let expected = camera.position() + 5.0 * camera.view_direction();
		assert_abs_diff_eq!(first.distance(expected), 0.0, epsilon = 1e-5);
	}

	#[test]
	fn test_off_center_down_lands_on_the_default_plane() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		session.pointer_down(&camera, PointerButton::Primary, cx + 120.0, cy - 80.0);

		let first = session.strokes().iter().next().unwrap().points()[0];
		// Off-center clicks intersect the same camera-facing plane through
		// (0, 0, 0), which for this camera is z = 0.
		assert_abs_diff_eq!(first.z, 0.0, epsilon = 1e-4);
		assert!(first.x > 0.0);
		assert!(first.y > 0.0);
	}

	#[test]
	fn test_down_near_existing_vertex_snaps_to_it() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		draw_line(&mut session, &camera, (cx, cy), (cx + 200.0, cy), 40);
		assert_eq!(session.strokes().len(), 1);
		let first_vertex = session.strokes().iter().next().unwrap().points()[0];

		// Click again from a camera pulled back to z = 8. Without the snap
		// the plane would sit at z = 3; anchored on the old vertex it stays
		// at z = 0, and a click straight at the vertex starts the new
		// stroke exactly there.
		let pulled_back = PerspectiveCamera::looking_at(
			vec3(0.0, 0.0, 8.0),
			Vec3::ZERO,
			Vec3::Y,
			75f32.to_radians(),
			WIDTH / HEIGHT,
		);
		session.pointer_down(&pulled_back, PointerButton::Primary, cx, cy);
		assert_eq!(session.strokes().len(), 2);
		let snapped = session.strokes().iter().nth(1).unwrap().points()[0];
		assert_abs_diff_eq!(snapped.distance(first_vertex), 0.0, epsilon = 1e-4);
		session.pointer_up(PointerButton::Primary);

		// A click that only passes near the vertex still lands on the
		// snapped plane rather than the default one.
		session.pointer_down(&pulled_back, PointerButton::Primary, cx + 30.0, cy);
		let near = session.strokes().iter().nth(2).unwrap().points()[0];
		assert_abs_diff_eq!(near.z, 0.0, epsilon = 1e-4);
		assert!(near.x > 0.0);
	}

	#[test]
	fn test_moves_only_append_spaced_points() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		session.pointer_down(&camera, PointerButton::Primary, cx, cy);

		// A one-pixel wiggle is well under the minimum step at this draw
		// distance; the stroke must not grow.
		session.pointer_move(&camera, cx + 1.0, cy);
		assert_eq!(session.strokes().iter().next().unwrap().len(), 1);

		session.pointer_move(&camera, cx + 100.0, cy);
		assert_eq!(session.strokes().iter().next().unwrap().len(), 2);

		let points = session.strokes().iter().next().unwrap().points().to_vec();
		for pair in points.windows(2) {
			assert!(pair[0].distance(pair[1]) >= session.config().min_step_distance);
		}
	}

	#[test]
	fn test_plane_survives_camera_motion_within_a_stroke() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		session.pointer_down(&camera, PointerButton::Primary, cx, cy);

		// The camera orbits mid-drag; new points still land on the plane
		// established at pointer-down (z = 0 for this start pose).
		let orbited = PerspectiveCamera::looking_at(
			vec3(3.0, 0.0, 4.0),
			Vec3::ZERO,
			Vec3::Y,
			75f32.to_radians(),
			WIDTH / HEIGHT,
		);
		session.pointer_move(&orbited, cx + 150.0, cy + 60.0);
		let stroke = session.strokes().iter().next().unwrap();
		assert_eq!(stroke.len(), 2);
		assert_abs_diff_eq!(stroke.points()[1].z, 0.0, epsilon = 1e-4);
	}

	#[test]
	fn test_only_the_draw_button_draws() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		session.pointer_down(&camera, PointerButton::Secondary, cx, cy);
		assert!(!session.is_drawing());
		assert!(session.strokes().is_empty());

		// Releasing an orbit button mid-stroke must not finalize it.
		session.pointer_down(&camera, PointerButton::Primary, cx, cy);
		session.pointer_up(PointerButton::Middle);
		assert!(session.is_drawing());
		session.pointer_up(PointerButton::Primary);
		assert!(!session.is_drawing());
	}

	#[test]
	fn test_finalized_strokes_stay_in_the_collection() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		draw_line(&mut session, &camera, (cx - 100.0, cy), (cx + 100.0, cy), 20);
		assert!(!session.is_drawing());
		assert_eq!(session.strokes().len(), 1);
		assert!(session.strokes().iter().next().unwrap().len() > 1);
	}

	#[test]
	fn test_hover_marker_tracks_nearby_geometry_while_idle() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		draw_line(&mut session, &camera, (cx, cy), (cx + 200.0, cy), 40);

		session.pointer_move(&camera, cx + 2.0, cy + 2.0);
		assert!(session.hover_marker().is_some());

		// Far from any stroke the marker hides again.
		session.pointer_move(&camera, cx, cy - 350.0);
		assert_eq!(session.hover_marker(), None);
	}

	#[test]
	fn test_hover_marker_hides_while_drawing() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		draw_line(&mut session, &camera, (cx, cy), (cx + 200.0, cy), 40);
		session.pointer_move(&camera, cx + 2.0, cy);
		assert!(session.hover_marker().is_some());

		session.pointer_down(&camera, PointerButton::Primary, cx + 2.0, cy);
		assert_eq!(session.hover_marker(), None);
	}

	#[test]
	fn test_clear_resets_everything() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		for offset in [-150.0, 0.0, 150.0] {
			draw_line(&mut session, &camera, (cx + offset, cy), (cx + offset, cy + 120.0), 15);
		}
		assert_eq!(session.strokes().len(), 3);
		session.pointer_move(&camera, cx + 2.0, cy + 2.0);

		session.key_down('c');
		assert!(session.strokes().is_empty());
		assert_eq!(session.hover_marker(), None);
		assert!(!session.is_drawing());

		// Idempotent: clearing again changes nothing.
		session.clear();
		assert!(session.strokes().is_empty());
	}

	#[test]
	fn test_clear_abandons_a_stroke_in_progress() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		session.pointer_down(&camera, PointerButton::Primary, cx, cy);
		session.pointer_move(&camera, cx + 100.0, cy);
		assert!(session.is_drawing());

		session.key_down('c');
		assert!(!session.is_drawing());
		assert!(session.strokes().is_empty());

		// The released pointer afterwards is a harmless no-op.
		session.pointer_up(PointerButton::Primary);
		assert!(!session.is_drawing());
	}

	#[test]
	fn test_other_keys_are_ignored() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		draw_line(&mut session, &camera, (cx, cy), (cx + 100.0, cy), 10);
		session.key_down('x');
		assert_eq!(session.strokes().len(), 1);
	}

	#[test]
	fn test_defensive_events_are_no_ops() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();

		session.pointer_up(PointerButton::Primary);
		assert!(!session.is_drawing());

		// A duplicate down while drawing keeps the current stroke.
		session.pointer_down(&camera, PointerButton::Primary, cx, cy);
		session.pointer_down(&camera, PointerButton::Primary, cx + 50.0, cy);
		assert_eq!(session.strokes().len(), 1);
		assert!(session.is_drawing());
	}

	#[test]
	fn test_teardown_is_idempotent_and_final() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		draw_line(&mut session, &camera, (cx, cy), (cx + 100.0, cy), 10);

		session.teardown();
		assert!(session.strokes().is_empty());
		session.teardown();

		// Events after teardown do nothing.
		session.pointer_down(&camera, PointerButton::Primary, cx, cy);
		session.pointer_move(&camera, cx + 100.0, cy);
		assert!(session.strokes().is_empty());
		assert!(!session.is_drawing());
	}

	#[test]
	fn test_gradient_swap_applies_to_new_points_only() {
		let mut session = session();
		let camera = camera();
		let (cx, cy) = center();
		session.pointer_down(&camera, PointerButton::Primary, cx, cy);
		session.pointer_move(&camera, cx + 100.0, cy);

		let before = session.strokes().iter().next().unwrap().colors().to_vec();
		session.set_gradient(Vec3::ONE, Vec3::ONE);
		session.pointer_move(&camera, cx + 200.0, cy);

		let stroke = session.strokes().iter().next().unwrap();
		assert_eq!(&stroke.colors()[..before.len()], &before[..]);
		assert_eq!(*stroke.colors().last().unwrap(), Vec3::ONE);
	}

	#[test]
	fn test_resize_rescales_pointer_mapping() {
		let mut session = session();
		let camera = camera();
		session.set_surface(SurfaceRect::from_size(400.0, 400.0));
		session.pointer_down(&camera, PointerButton::Primary, 200.0, 200.0);

		// (200, 200) is the center of the resized surface, so the stroke
		// starts on the view axis.
		let first = session.strokes().iter().next().unwrap().points()[0];
		let expected = camera.position() + 5.0 * camera.view_direction();
		assert_abs_diff_eq!(first.distance(expected), 0.0, epsilon = 1e-5);
	}
}
