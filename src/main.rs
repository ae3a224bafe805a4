use std::{str::FromStr, time::Instant};

use aabb_bounds::bounds::AxisAlignedBox;
use clap::Parser;
use glam::{Mat4, Vec3};
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{validate_box_scale, CliArgs},
    logging::{initialize_tracing, LogFileOptions},
    report::{export_report_to_file, BoundsReport},
    scene_loader::{
        clip_model_bounds,
        compute_bounds_for_models,
        load_gltf_scene_from_file,
        scale_model_bounds,
        unite_model_bounds,
    },
};


mod cli;
mod logging;
mod report;
mod scene_loader;


fn main() -> Result<()> {
    let cli_args = CliArgs::parse();


    let console_logging_output_level_filter = {
        if let Some(output_filter) = &cli_args.console_logging_output_level_filter {
            EnvFilter::from_str(output_filter)
                .into_diagnostic()
                .wrap_err("invalid console-logging-level option")?
        } else {
            EnvFilter::new("info")
        }
    };

    let log_file_options = (!cli_args.no_log_file).then(|| LogFileOptions {
        directory_path: cli_args.log_directory_path.clone(),
        file_name_prefix: "aabb-bounds".to_string(),
        level_filter: EnvFilter::new("debug"),
    });

    let logging_guard = initialize_tracing(
        console_logging_output_level_filter,
        log_file_options,
    )
    .wrap_err("Failed to initialize logging.")?;


    let placement = Mat4::from_translation(cli_args.translation.unwrap_or(Vec3::ZERO))
        * Mat4::from_scale(Vec3::splat(cli_args.uniform_scale));

    let clip_region = match (cli_args.clip_min, cli_args.clip_max) {
        (Some(clip_min), Some(clip_max)) => Some(
            AxisAlignedBox::checked_from_min_and_max(clip_min, clip_max)
                .wrap_err("invalid clip region")?,
        ),
        _ => None,
    };

    let box_scale = validate_box_scale(cli_args.box_scale)?;


    info!(
        "Loading GLTF scene from {}.",
        cli_args.input_file_path.display()
    );

    let gltf_scene = load_gltf_scene_from_file(&cli_args.input_file_path)
        .wrap_err("Failed to load GLTF scene.")?;


    let time_bounds_start = Instant::now();

    let mut model_bounds = compute_bounds_for_models(&gltf_scene.models, &placement);

    if let Some(box_scale) = box_scale {
        scale_model_bounds(&mut model_bounds, box_scale);
    }

    if let Some(clip_region) = &clip_region {
        clip_model_bounds(&mut model_bounds, clip_region);
    }

    let scene_bounds = unite_model_bounds(&model_bounds);

    let time_bounds_total = time_bounds_start.elapsed();

    info!(
        "Computed bounds for {} models ({} vertices) in {:.3} ms.",
        model_bounds.len(),
        model_bounds
            .iter()
            .map(|model| model.vertex_count)
            .sum::<usize>(),
        time_bounds_total.as_secs_f64() * 1000.0
    );

    if scene_bounds.is_empty() {
        warn!("The scene has no extent (no vertices, or everything was clipped away).");
    }


    let mut report = BoundsReport::from_model_bounds(&model_bounds, scene_bounds);

    if let (Some(ray_origin), Some(ray_direction)) = (cli_args.ray_origin, cli_args.ray_direction) {
        if ray_direction == Vec3::ZERO {
            return Err(miette!("ray direction must not be the zero vector"));
        }

        report.cast_ray(ray_origin, ray_direction);
    }

    print!("{report}");

    if let Some(output_file_path) = &cli_args.output_file_path {
        export_report_to_file(output_file_path, &report)
            .wrap_err("Failed to export bounds report.")?;

        info!("Wrote bounds report to {}.", output_file_path.display());
    }


    drop(logging_guard);
    Ok(())
}
