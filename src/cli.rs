use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use miette::{miette, Result};

#[derive(Parser)]
#[command(
    name = "aabb-bounds",
    about = "Computes axis-aligned bounding boxes for the models of a glTF scene.",
    version
)]
pub struct CliArgs {
    #[arg(long = "console-logging-level")]
    pub console_logging_output_level_filter: Option<String>,

    #[arg(long = "log-directory", default_value = "logs")]
    pub log_directory_path: PathBuf,

    /// Disables the rolling log file.
    #[arg(long = "no-log-file")]
    pub no_log_file: bool,

    #[arg(short = 'i', long = "input-file-path")]
    pub input_file_path: PathBuf,

    #[arg(short = 'o', long = "output-file-path")]
    pub output_file_path: Option<PathBuf>,

    /// Translation applied to every vertex before it is enclosed, as `x,y,z`.
    #[arg(long = "translation", value_parser = parse_vec3, allow_hyphen_values = true)]
    pub translation: Option<Vec3>,

    /// Uniform scale applied to every vertex (before the translation).
    #[arg(long = "uniform-scale", default_value_t = 1.0, allow_negative_numbers = true)]
    pub uniform_scale: f32,

    /// Per-axis factors each model box is resized by around its center, as `x,y,z`.
    #[arg(long = "box-scale", value_parser = parse_vec3, allow_hyphen_values = true)]
    pub box_scale: Option<Vec3>,

    #[arg(
        long = "clip-min",
        value_parser = parse_vec3,
        allow_hyphen_values = true,
        requires = "clip_max"
    )]
    pub clip_min: Option<Vec3>,

    #[arg(
        long = "clip-max",
        value_parser = parse_vec3,
        allow_hyphen_values = true,
        requires = "clip_min"
    )]
    pub clip_max: Option<Vec3>,

    #[arg(
        long = "ray-origin",
        value_parser = parse_vec3,
        allow_hyphen_values = true,
        requires = "ray_direction"
    )]
    pub ray_origin: Option<Vec3>,

    #[arg(
        long = "ray-direction",
        value_parser = parse_vec3,
        allow_hyphen_values = true,
        requires = "ray_origin"
    )]
    pub ray_direction: Option<Vec3>,
}


/// Parses a vector given as three comma-separated components (e.g. `1,-2.5,0`).
pub fn parse_vec3(value: &str) -> std::result::Result<Vec3, String> {
    let components = value
        .split(',')
        .map(|component| {
            component
                .trim()
                .parse::<f32>()
                .map_err(|error| format!("invalid vector component \"{component}\": {error}"))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let &[x, y, z] = components.as_slice() else {
        return Err(format!(
            "expected three comma-separated components, got {}",
            components.len()
        ));
    };

    Ok(Vec3::new(x, y, z))
}



/// Rejects box scale factors with a negative component.
pub fn validate_box_scale(box_scale: Option<Vec3>) -> Result<Option<Vec3>> {
    if let Some(factors) = box_scale {
        if factors.cmplt(Vec3::ZERO).any() {
            return Err(miette!(
                "box scale factors must not be negative, got {factors}"
            ));
        }
    }

    Ok(box_scale)
}
