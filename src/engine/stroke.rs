use crate::engine::Gradient;
use glam::Vec3;

/// Flattened geometry in upload-ready form: xyz position triples and
/// parallel rgb color triples. Rebuilt from the canonical point sequence
/// after every accepted point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineBuffers {
	pub positions: Vec<f32>,
	pub colors: Vec<f32>,
}

impl LineBuffers {
	fn rebuild(&mut self, points: &[Vec3], colors: &[Vec3]) {
		self.positions.clear();
		self.positions.extend(points.iter().flat_map(|p| p.to_array()));
		self.colors.clear();
		self.colors.extend(colors.iter().flat_map(|c| c.to_array()));
	}
}

/// One continuous drawn line, from pointer-down to pointer-up.
///
/// The point sequence is canonical: the renderable buffers and the collision
/// view are both derived from it, so the two can never disagree about what
/// was drawn. Strokes are append-only while active and untouched afterwards
/// until the collection is cleared.
#[derive(Debug, Clone)]
pub struct Stroke {
	points: Vec<Vec3>,
	colors: Vec<Vec3>,
	width: f32,
	buffers: LineBuffers,
}

impl Stroke {
	/// A stroke exists from its first point onward.
	pub(crate) fn start(origin: Vec3, color: Vec3, width: f32) -> Self {
		let mut stroke = Self {
			points: vec![origin],
			colors: vec![color],
			width,
			buffers: LineBuffers::default(),
		};
		stroke.buffers.rebuild(&stroke.points, &stroke.colors);
		stroke
	}

	/// Appends `candidate` unless it is closer than `min_step` to the last
	/// accepted point. Rejection is a no-op; pointer jitter below the step
	/// threshold never produces degenerate segments. Returns whether the
	/// point was accepted.
	pub(crate) fn try_append(&mut self, candidate: Vec3, min_step: f32, gradient: &Gradient) -> bool {
		if let Some(last) = self.points.last() {
			if candidate.distance(*last) < min_step {
				return false;
			}
		}
		self.colors.push(gradient.color_at(self.points.len()));
		self.points.push(candidate);
		self.buffers.rebuild(&self.points, &self.colors);
		true
	}

	/// The collision view: the raw point polyline, never rendered.
	pub fn points(&self) -> &[Vec3] {
		&self.points
	}

	pub fn colors(&self) -> &[Vec3] {
		&self.colors
	}

	/// The renderable view.
	pub fn buffers(&self) -> &LineBuffers {
		&self.buffers
	}

	pub fn width(&self) -> f32 {
		self.width
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}
}
