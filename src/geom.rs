use glam::Vec3;

/// Rays with directions this close to perpendicular to a plane normal are
/// treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
	origin: Vec3,
	direction: Vec3,
}

impl Ray {
	pub fn new(origin: Vec3, direction: Vec3) -> Self {
		Self {
			origin,
			direction: direction.normalize(),
		}
	}

	pub fn origin(&self) -> Vec3 {
		self.origin
	}

	pub fn direction(&self) -> Vec3 {
		self.direction
	}

	pub fn point_at(&self, t: f32) -> Vec3 {
		self.origin + t * self.direction
	}

	/// Closest point on the ray to `point`. The ray parameter is clamped to
	/// zero, so points behind the origin resolve to the origin itself.
	pub fn closest_point_to(&self, point: Vec3) -> Vec3 {
		let t = (point - self.origin).dot(self.direction).max(0.0);
		self.point_at(t)
	}

	pub fn distance_to_point(&self, point: Vec3) -> f32 {
		self.closest_point_to(point).distance(point)
	}

	/// Closest point on the segment `[a, b]` to the ray, paired with its
	/// distance to the ray. The segment parameter is clamped to the segment
	/// and the ray parameter to the ray's forward half; a degenerate segment
	/// falls back to the vertex `a`.
	pub fn closest_point_on_segment(&self, a: Vec3, b: Vec3) -> (Vec3, f32) {
		let v = b - a;
		let c = v.length_squared();
		if c <= f32::EPSILON {
			return (a, self.distance_to_point(a));
		}

		let w = self.origin - a;
		let dot_dirs = self.direction.dot(v);
		let d = self.direction.dot(w);
		let e = v.dot(w);
		let denom = c - dot_dirs * dot_dirs;

		// Unconstrained ray parameter, or the origin when near parallel.
		let mut s = if denom.abs() > PARALLEL_EPSILON {
			((dot_dirs * e - c * d) / denom).max(0.0)
		} else {
			0.0
		};
		let mut t = (dot_dirs * s + e) / c;
		// Re-derive the ray parameter when the segment clamp moved us.
		if t < 0.0 {
			t = 0.0;
			s = (-d).max(0.0);
		} else if t > 1.0 {
			t = 1.0;
			s = (dot_dirs - d).max(0.0);
		}

		let on_segment = a + t * v;
		(on_segment, on_segment.distance(self.point_at(s)))
	}
}

/// A drawing plane: the surface one stroke's pointer motion is projected
/// onto. Defined by a unit normal and any point on the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
	normal: Vec3,
	point: Vec3,
}

impl Plane {
	pub fn new(normal: Vec3, point: Vec3) -> Self {
		Self {
			normal: normal.normalize(),
			point,
		}
	}

	pub fn normal(&self) -> Vec3 {
		self.normal
	}

	pub fn anchor(&self) -> Vec3 {
		self.point
	}

	/// Intersection of `ray` with the plane, or `None` when the ray is
	/// parallel to it or the hit lies behind the ray origin. Both cases mean
	/// "no point this frame" rather than an error.
	pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
		let denom = ray.direction().dot(self.normal);
		if denom.abs() < PARALLEL_EPSILON {
			return None;
		}
		let t = (self.point - ray.origin()).dot(self.normal) / denom;
		(t >= 0.0).then(|| ray.point_at(t))
	}
}
