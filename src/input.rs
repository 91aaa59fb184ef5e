use glam::Vec2;

/// Device-pixel bounding rectangle of the render surface, as reported by the
/// host. Updated on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
	pub left: f32,
	pub top: f32,
	pub width: f32,
	pub height: f32,
}

impl SurfaceRect {
	pub fn from_size(width: f32, height: f32) -> Self {
		Self {
			left: 0.0,
			top: 0.0,
			width,
			height,
		}
	}

	/// Maps raw pointer coordinates into normalized device coordinates in
	/// [-1, 1] on both axes, Y pointing up. Pure; coordinates outside the
	/// surface simply map outside the canonical range and are the caller's
	/// to ignore.
	pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
		Vec2::new(
			(x - self.left) / self.width * 2.0 - 1.0,
			-((y - self.top) / self.height * 2.0 - 1.0),
		)
	}
}

/// The middle and secondary buttons are conventionally claimed by the host's
/// orbit controls; only the configured drawing button reaches the stroke
/// machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
	Primary,
	Middle,
	Secondary,
}
