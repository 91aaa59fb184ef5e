use crate::geom::Ray;
use glam::{Vec2, Vec3};

/// Projection collaborator. The session never computes projection itself:
/// the host's camera turns normalized device coordinates into world-space
/// pick rays and reports where it sits and looks.
pub trait CameraProjection {
	fn pick_ray(&self, ndc: Vec2) -> Ray;
	fn position(&self) -> Vec3;
	fn view_direction(&self) -> Vec3;
}

/// Pinhole perspective camera. A reference implementation for hosts without
/// their own projection (headless runs, tests); interactive hosts usually
/// implement [`CameraProjection`] over the camera their renderer already
/// owns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
	position: Vec3,
	forward: Vec3,
	right: Vec3,
	up: Vec3,
	tan_half_fov: f32,
	aspect: f32,
}

impl PerspectiveCamera {
	/// `fov_y` is the vertical field of view in radians.
	pub fn looking_at(position: Vec3, target: Vec3, up: Vec3, fov_y: f32, aspect: f32) -> Self {
		let forward = (target - position).normalize();
		let right = forward.cross(up).normalize();
		let up = right.cross(forward);
		Self {
			position,
			forward,
			right,
			up,
			tan_half_fov: (0.5 * fov_y).tan(),
			aspect,
		}
	}

	pub fn set_aspect(&mut self, aspect: f32) {
		self.aspect = aspect;
	}
}

impl CameraProjection for PerspectiveCamera {
	fn pick_ray(&self, ndc: Vec2) -> Ray {
		let direction = self.forward
			+ ndc.x * self.tan_half_fov * self.aspect * self.right
			+ ndc.y * self.tan_half_fov * self.up;
		Ray::new(self.position, direction)
	}

	fn position(&self) -> Vec3 {
		self.position
	}

	fn view_direction(&self) -> Vec3 {
		self.forward
	}
}
