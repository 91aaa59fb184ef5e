use crate::engine::{Stroke, StrokeCollection};
use crate::geom::Ray;
use glam::Vec3;
use itertools::Itertools;
use ordered_float::OrderedFloat;

/// The closest point a pick ray came to existing stroke geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapHit {
	pub point: Vec3,
	pub distance: f32,
}

/// Finds the single closest point across every stroke's vertices and
/// consecutive segments, or `None` when nothing comes within `threshold` of
/// the ray (including the empty collection). Equidistant candidates resolve
/// to the first one visited, which keeps results stable across repeated
/// queries. O(total vertices); runs on discrete pointer events only.
pub fn nearest_point(ray: &Ray, strokes: &StrokeCollection, threshold: f32) -> Option<SnapHit> {
	strokes
		.iter()
		.flat_map(|stroke| candidates(ray, stroke))
		.min_by_key(|hit| OrderedFloat(hit.distance))
		.filter(|hit| hit.distance <= threshold)
}

fn candidates<'a>(ray: &'a Ray, stroke: &'a Stroke) -> impl Iterator<Item = SnapHit> + 'a {
	let vertices = stroke.points().iter().map(|&vertex| SnapHit {
		point: vertex,
		distance: ray.distance_to_point(vertex),
	});
	let segments = stroke
		.points()
		.iter()
		.copied()
		.tuple_windows()
		.map(|(a, b)| {
			let (point, distance) = ray.closest_point_on_segment(a, b);
			SnapHit { point, distance }
		});
	vertices.chain(segments)
}
