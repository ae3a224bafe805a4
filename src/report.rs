use std::{
    fmt::{self, Display, Formatter},
    fs::File,
    io::{prelude::Write, BufWriter},
    path::Path,
};

use aabb_bounds::bounds::{AxisAlignedBox, RaySpan};
use glam::Vec3;
use miette::{Context, IntoDiagnostic, Result};

use crate::scene_loader::ModelBounds;


pub struct ReportEntry {
    pub label: String,
    pub bounds: AxisAlignedBox,
}


pub struct RayHit {
    pub label: String,
    /// Distance reported by [`AxisAlignedBox::intersect_ray`].
    pub distance: f32,
    pub span: RaySpan,
}


pub struct RayCastReport {
    pub origin: Vec3,
    pub direction: Vec3,
    pub hits: Vec<RayHit>,
}


/// Human-readable summary of the computed boxes (and, optionally, a ray cast against them).
pub struct BoundsReport {
    pub entries: Vec<ReportEntry>,
    pub ray_cast: Option<RayCastReport>,
}

impl BoundsReport {
    pub fn from_model_bounds(model_bounds: &[ModelBounds], scene_bounds: AxisAlignedBox) -> Self {
        let mut entries = model_bounds
            .iter()
            .map(|model| ReportEntry {
                label: format!("model {}", model.primitive_index),
                bounds: model.bounds,
            })
            .collect::<Vec<_>>();

        entries.push(ReportEntry {
            label: "scene".to_string(),
            bounds: scene_bounds,
        });

        Self {
            entries,
            ray_cast: None,
        }
    }

    /// Casts a ray against every entry, keeping the hits ordered by distance.
    pub fn cast_ray(&mut self, origin: Vec3, direction: Vec3) {
        let mut hits = self
            .entries
            .iter()
            .filter_map(|entry| {
                let distance = entry.bounds.intersect_ray(origin, direction)?;
                let span = entry.bounds.intersect_ray_span(origin, direction)?;

                Some(RayHit {
                    label: entry.label.clone(),
                    distance,
                    span,
                })
            })
            .collect::<Vec<_>>();

        hits.sort_by(|first, second| first.distance.total_cmp(&second.distance));

        self.ray_cast = Some(RayCastReport {
            origin,
            direction,
            hits,
        });
    }
}

impl Display for BoundsReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry.label)?;

            if entry.bounds.is_empty() {
                writeln!(f, "\t(no extent)")?;
                continue;
            }

            writeln!(f, "{}", entry.bounds)?;
            writeln!(f, "\tcenter: {}", entry.bounds.center())?;
            writeln!(f, "\tvolume: {}", entry.bounds.volume())?;
            writeln!(
                f,
                "\tshortest side: {}",
                entry.bounds.shortest_side_length()
            )?;
            writeln!(
                f,
                "\tlongest side: {}",
                entry.bounds.longest_side_length()
            )?;
        }

        if let Some(ray_cast) = &self.ray_cast {
            writeln!(
                f,
                "ray from {} towards {}",
                ray_cast.origin, ray_cast.direction
            )?;

            if ray_cast.hits.is_empty() {
                writeln!(f, "\t(no hits)")?;
            }

            for hit in &ray_cast.hits {
                writeln!(
                    f,
                    "\t{}: t = {} (inside from t = {} to t = {})",
                    hit.label, hit.distance, hit.span.near, hit.span.far
                )?;
            }
        }

        Ok(())
    }
}



pub fn export_report_to_file<P>(output_file_path: P, report: &BoundsReport) -> Result<()>
where
    P: AsRef<Path>,
{
    let file = File::create(output_file_path)
        .into_diagnostic()
        .wrap_err("Failed to open file.")?;

    let mut buffered_file = BufWriter::new(file);

    write!(buffered_file, "{report}")
        .into_diagnostic()
        .wrap_err("Failed to write to file.")?;

    let mut file = buffered_file
        .into_inner()
        .into_diagnostic()
        .wrap_err("Failed to flush buffered writer.")?;

    file.flush()
        .into_diagnostic()
        .wrap_err("Failed to flush unbuffered file.")?;


    Ok(())
}



#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> BoundsReport {
        let model_bounds = [
            ModelBounds {
                primitive_index: 0,
                vertex_count: 8,
                bounds: AxisAlignedBox::from_min_and_max(Vec3::ZERO, Vec3::ONE),
            },
            ModelBounds {
                primitive_index: 1,
                vertex_count: 8,
                bounds: AxisAlignedBox::from_min_and_max(
                    Vec3::new(3.0, 0.0, 0.0),
                    Vec3::new(4.0, 1.0, 1.0),
                ),
            },
            ModelBounds {
                primitive_index: 2,
                vertex_count: 0,
                bounds: AxisAlignedBox::empty(),
            },
        ];

        let scene_bounds = AxisAlignedBox::from_min_and_max(Vec3::ZERO, Vec3::new(4.0, 1.0, 1.0));

        BoundsReport::from_model_bounds(&model_bounds, scene_bounds)
    }

    #[test]
    fn report_lists_models_then_scene() {
        let report = sample_report();

        let labels = report
            .entries
            .iter()
            .map(|entry| entry.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, ["model 0", "model 1", "model 2", "scene"]);

        let rendered = report.to_string();
        assert!(rendered.contains("model 2\n\t(no extent)\n"));
        assert!(rendered.contains("\tvolume: 4\n"));
        assert!(rendered.contains("\tmin: [3, 0, 0]\n"));
    }

    #[test]
    fn ray_hits_are_sorted_by_distance() {
        let mut report = sample_report();
        report.cast_ray(Vec3::new(5.0, 0.5, 0.5), Vec3::NEG_X);

        let ray_cast = report.ray_cast.as_ref().expect("ray cast should be recorded");
        let hit_labels = ray_cast
            .hits
            .iter()
            .map(|hit| hit.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(hit_labels, ["model 1", "scene", "model 0"]);

        assert_eq!(ray_cast.hits[0].distance, 1.0);
        assert_eq!(ray_cast.hits[0].span, RaySpan { near: 1.0, far: 2.0 });
        assert_eq!(ray_cast.hits[2].distance, 4.0);
    }

    #[test]
    fn report_without_hits_says_so() {
        let mut report = sample_report();
        report.cast_ray(Vec3::new(0.5, 5.0, 0.5), Vec3::Y);

        assert!(report.to_string().contains("\t(no hits)\n"));
    }
}
