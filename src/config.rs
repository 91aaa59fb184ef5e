use crate::input::PointerButton;
use bon::builder;
use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid {which} color: {source}")]
	Color {
		which: &'static str,
		source: csscolorparser::ParseColorError,
	},
	#[error("{name} must be positive, got {value}")]
	NonPositive { name: &'static str, value: f32 },
	#[error("gradient_steps must be at least 1")]
	NoGradientSteps,
}

/// Everything tunable about a sketching session. Defaults reproduce the
/// stock look: neon cyan fading to magenta, snap within 0.8 units, strokes
/// floating 5 units out when nothing is snapped onto.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchConfig {
	pub start_color: Vec3,
	pub end_color: Vec3,
	pub snap_threshold: f32,
	pub min_step_distance: f32,
	pub default_draw_distance: f32,
	pub gradient_steps: u32,
	pub draw_button: PointerButton,
	pub clear_key: char,
	pub stroke_width: f32,
}

impl Default for SketchConfig {
	fn default() -> Self {
		Self {
			start_color: Vec3::new(0.0, 240.0 / 255.0, 1.0),
			end_color: Vec3::new(1.0, 0.0, 229.0 / 255.0),
			snap_threshold: 0.8,
			min_step_distance: 0.05,
			default_draw_distance: 5.0,
			gradient_steps: 200,
			draw_button: PointerButton::Primary,
			clear_key: 'c',
			stroke_width: 3.0,
		}
	}
}

/// Builds a validated [`SketchConfig`]. Gradient endpoints accept any CSS
/// color form (`"#00f0ff"`, `"rgb(…)"`, named colors), matching what the
/// host's color inputs produce.
#[builder(finish_fn = build)]
pub fn config<'a>(
	#[builder(default = "#00f0ff")] start_color: &'a str,
	#[builder(default = "#ff00e5")] end_color: &'a str,
	#[builder(default = 0.8)] snap_threshold: f32,
	#[builder(default = 0.05)] min_step_distance: f32,
	#[builder(default = 5.0)] default_draw_distance: f32,
	#[builder(default = 200)] gradient_steps: u32,
	#[builder(default = PointerButton::Primary)] draw_button: PointerButton,
	#[builder(default = 'c')] clear_key: char,
	#[builder(default = 3.0)] stroke_width: f32,
) -> Result<SketchConfig, ConfigError> {
	use ConfigError::*;

	for (name, value) in [
		("snap_threshold", snap_threshold),
		("min_step_distance", min_step_distance),
		("default_draw_distance", default_draw_distance),
		("stroke_width", stroke_width),
	] {
		// Also rejects NaN.
		if !(value > 0.0) {
			Err(NonPositive { name, value })?;
		}
	}
	if gradient_steps == 0 {
		Err(NoGradientSteps)?;
	}

	Ok(SketchConfig {
		start_color: parse_color("start", start_color)?,
		end_color: parse_color("end", end_color)?,
		snap_threshold,
		min_step_distance,
		default_draw_distance,
		gradient_steps,
		draw_button,
		clear_key,
		stroke_width,
	})
}

fn parse_color(which: &'static str, css: &str) -> Result<Vec3, ConfigError> {
	let color = csscolorparser::parse(css).map_err(|source| ConfigError::Color { which, source })?;
	Ok(Vec3::new(color.r, color.g, color.b))
}
