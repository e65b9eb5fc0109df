//! Dynamic-geometry section of the state tree
//!
//! Dynamic objects are mesh + material + instance-transform groups supplied
//! by the host each time they change. The group list is an array leaf under
//! the merge contract: a delta replaces it wholesale.

use crate::foundation::math::{Mat4, Vec3, Vec4};
use std::sync::Arc;

/// Primitive topology of a dynamic mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Triangle list
    Triangles,
    /// Line list
    Lines,
    /// Point list
    Points,
}

/// Geometry for one dynamic object group
///
/// Shared behind an [`Arc`] so that state snapshots never deep-copy vertex
/// data.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMesh {
    /// Primitive topology
    pub primitive: PrimitiveKind,

    /// Vertex positions
    pub positions: Vec<Vec3>,

    /// Optional vertex normals, parallel to `positions`
    pub normals: Option<Vec<Vec3>>,

    /// Triangle/line/point indices into `positions`
    pub indices: Vec<u32>,
}

/// Material variants for dynamic objects
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicMaterial {
    /// Flat, unshaded color
    Unlit {
        /// RGBA base color
        base_color: Vec4,
    },
    /// Physically based GGX shading
    Ggx {
        /// RGBA base color
        base_color: Vec4,
        /// Metallic factor in `[0, 1]`
        metallic: f32,
        /// Roughness factor in `[0, 1]`
        roughness: f32,
    },
}

/// One mesh + material + instance-transform group
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicObject {
    /// Shared geometry
    pub mesh: Arc<DynamicMesh>,

    /// Material for every instance in the group
    pub material: DynamicMaterial,

    /// One transform per rendered instance
    pub instances: Vec<Mat4>,
}

/// Dynamic-geometry configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicState {
    /// Current object groups
    pub objects: Vec<DynamicObject>,
}

/// Partial update for the dynamic section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicChanges {
    /// Replacement object-group list
    pub objects: Option<Vec<DynamicObject>>,
}

impl DynamicChanges {
    /// Fold a later update over this one; later leaves win
    #[must_use]
    pub fn merged(self, later: Self) -> Self {
        Self {
            objects: later.objects.or(self.objects),
        }
    }

    /// Produce a new section value with this update applied
    #[must_use]
    pub fn applied_to(&self, base: &DynamicState) -> DynamicState {
        match &self.objects {
            Some(objects) => DynamicState {
                objects: objects.clone(),
            },
            None => base.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Arc<DynamicMesh> {
        Arc::new(DynamicMesh {
            primitive: PrimitiveKind::Triangles,
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            normals: None,
            indices: vec![0, 1, 2, 0, 2, 3],
        })
    }

    #[test]
    fn test_group_list_replaces_wholesale() {
        let base = DynamicState {
            objects: vec![DynamicObject {
                mesh: quad(),
                material: DynamicMaterial::Unlit {
                    base_color: Vec4::new(1.0, 0.0, 0.0, 1.0),
                },
                instances: vec![Mat4::identity(), Mat4::identity()],
            }],
        };
        let next = DynamicChanges {
            objects: Some(Vec::new()),
        }
        .applied_to(&base);
        assert!(next.objects.is_empty());
    }

    #[test]
    fn test_mesh_sharing_survives_clone() {
        let mesh = quad();
        let state = DynamicState {
            objects: vec![DynamicObject {
                mesh: Arc::clone(&mesh),
                material: DynamicMaterial::Ggx {
                    base_color: Vec4::new(0.5, 0.5, 0.5, 1.0),
                    metallic: 0.1,
                    roughness: 0.8,
                },
                instances: vec![Mat4::identity()],
            }],
        };
        let copy = state.clone();
        assert!(Arc::ptr_eq(&copy.objects[0].mesh, &mesh));
    }
}
