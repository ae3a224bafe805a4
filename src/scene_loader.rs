//! Loading glTF scenes and enclosing their models in bounding boxes.

use std::path::Path;

use aabb_bounds::bounds::AxisAlignedBox;
use easy_gltf::Model;
use glam::{Mat4, Vec3};
use miette::{miette, Result};
use tracing::{debug, warn};


pub fn load_gltf_scene_from_file<P>(gltf_file_path: P) -> Result<easy_gltf::Scene>
where
    P: AsRef<Path>,
{
    let gltf_scenes = easy_gltf::load(gltf_file_path)
        .map_err(|error| miette!("Failed to load GLTF file: {error:?}"))?;

    if gltf_scenes.len() > 1 {
        warn!("The provided GLTF file contains more than one scene; we'll use the first one only.");
    }

    let Some(first_scene) = gltf_scenes.into_iter().next() else {
        return Err(miette!("Provided GLTF file contains no scenes."));
    };

    Ok(first_scene)
}



/// Bounding box of a single glTF model (primitive).
#[derive(Clone, Debug, PartialEq)]
pub struct ModelBounds {
    pub primitive_index: usize,
    pub vertex_count: usize,
    pub bounds: AxisAlignedBox,
}


/// Encloses every vertex of `model`, transformed by `placement`, in a box.
///
/// Vertices are used as a plain point cloud, so this works for any primitive mode
/// (triangles, lines or points).
pub fn compute_model_bounds(model: &Model, placement: &Mat4) -> ModelBounds {
    let model_vertices = model.vertices();

    let bounds = AxisAlignedBox::from_points_transformed(
        model_vertices.iter().map(|vertex| {
            Vec3::new(
                vertex.position.x,
                vertex.position.y,
                vertex.position.z,
            )
        }),
        placement,
    );

    debug!(
        "Model primitive {} has {} vertices.",
        model.primitive_index(),
        model_vertices.len()
    );

    ModelBounds {
        primitive_index: model.primitive_index(),
        vertex_count: model_vertices.len(),
        bounds,
    }
}


pub fn compute_bounds_for_models(models: &[Model], placement: &Mat4) -> Vec<ModelBounds> {
    models
        .iter()
        .map(|model| compute_model_bounds(model, placement))
        .collect()
}


/// The smallest box containing every model box.
///
/// Models without vertices (or clipped away entirely) do not contribute;
/// with no contributing models, the result has no extent.
pub fn unite_model_bounds(model_bounds: &[ModelBounds]) -> AxisAlignedBox {
    model_bounds
        .iter()
        .fold(AxisAlignedBox::empty(), |scene_bounds, model| {
            AxisAlignedBox::unite(&scene_bounds, &model.bounds)
        })
}


/// Resizes each non-empty model box around its own center.
pub fn scale_model_bounds(model_bounds: &mut [ModelBounds], factors: Vec3) {
    for model in model_bounds.iter_mut() {
        model.bounds.scale(factors);
    }
}


/// Restricts every model box to `clip_region`.
///
/// Boxes lying entirely outside the region are replaced by [`AxisAlignedBox::empty`].
pub fn clip_model_bounds(model_bounds: &mut [ModelBounds], clip_region: &AxisAlignedBox) {
    for model in model_bounds.iter_mut() {
        if model.bounds.is_empty() {
            continue;
        }

        match AxisAlignedBox::intersection(&model.bounds, clip_region) {
            Some(clipped_bounds) => {
                model.bounds = clipped_bounds;
            }
            None => {
                warn!(
                    "Model primitive {} lies entirely outside the clip region.",
                    model.primitive_index
                );

                model.bounds = AxisAlignedBox::empty();
            }
        }
    }
}
