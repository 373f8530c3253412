//! Vehicle model boundary: named sub-objects made of node trees.

use std::collections::HashMap;

use serde::Serialize;

use crate::geometry::{MeshData, Placement, Shape};

/// Sub-objects of the vehicle that receive derived materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelPart {
    Body,
    Wheels,
    Windows,
    MetalElements,
    Spoiler,
    FrontLamps,
    BackLamps,
}

impl ModelPart {
    pub const ALL: [ModelPart; 7] = [
        ModelPart::Body,
        ModelPart::Wheels,
        ModelPart::Windows,
        ModelPart::MetalElements,
        ModelPart::Spoiler,
        ModelPart::FrontLamps,
        ModelPart::BackLamps,
    ];

    /// Node names to look up, in order of preference. Asset files in the
    /// wild carry misspelled lamp names, so those are accepted too.
    pub fn node_names(&self) -> &'static [&'static str] {
        match self {
            ModelPart::Body => &["body"],
            ModelPart::Wheels => &["wheels"],
            ModelPart::Windows => &["windows_1", "windows"],
            ModelPart::MetalElements => &["metal_elements"],
            ModelPart::Spoiler => &["spoiler"],
            ModelPart::FrontLamps => &["frontligts", "frontlamps"],
            ModelPart::BackLamps => &["backlamps", "backlights", "backligts"],
        }
    }
}

/// Opaque handle of a renderable mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MeshHandle(pub u32);

/// Node of a model hierarchy. Groups have no mesh, leaves usually do.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    pub name: String,
    pub mesh: Option<MeshHandle>,
    pub children: Vec<ModelNode>,
}

impl ModelNode {
    pub fn group(name: impl Into<String>, children: Vec<ModelNode>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            children,
        }
    }

    pub fn leaf(name: impl Into<String>, mesh: MeshHandle) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            children: Vec::new(),
        }
    }

    /// Every mesh in this subtree, depth first
    pub fn meshes(&self) -> Vec<MeshHandle> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.extend(node.mesh);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// Source of named model sub-objects
pub trait ModelProvider {
    /// Top-level node with the given name, if the model has one
    fn named_node(&self, name: &str) -> Option<&ModelNode>;

    /// Node for `part`, trying each accepted name in turn
    fn sub_object(&self, part: ModelPart) -> Option<&ModelNode> {
        part.node_names().iter().find_map(|name| self.named_node(name))
    }

    /// Meshes of `part`, empty when the model lacks it
    fn sub_object_meshes(&self, part: ModelPart) -> Vec<MeshHandle> {
        self.sub_object(part).map(ModelNode::meshes).unwrap_or_default()
    }
}

/// Model assembled from primitive shapes at startup
#[derive(Debug, Clone, Default)]
pub struct ProceduralCarModel {
    roots: Vec<ModelNode>,
    meshes: HashMap<MeshHandle, MeshData>,
}

impl ModelProvider for ProceduralCarModel {
    fn named_node(&self, name: &str) -> Option<&ModelNode> {
        self.roots.iter().find(|node| node.name == name)
    }
}

impl ProceduralCarModel {
    /// Roughly 4 m long coupe with its nose toward +X, wheels on the ground
    pub fn coupe() -> Self {
        let mut model = Self::default();
        let half_pi = std::f32::consts::FRAC_PI_2;

        let body = vec![
            model.add("body_lower", Shape::cuboid(4.0, 0.6, 1.8), Placement::at(0.0, 0.55, 0.0)),
            model.add("body_cabin", Shape::cuboid(1.9, 0.5, 1.5), Placement::at(-0.2, 1.1, 0.0)),
        ];
        model.push_root(ModelPart::Body, body);

        let wheel = Shape::Cylinder { radius: 0.35, height: 0.25, segments: 16 };
        let wheels = [(1.3, 0.85), (1.3, -0.85), (-1.3, 0.85), (-1.3, -0.85)]
            .into_iter()
            .enumerate()
            .map(|(i, (x, z))| {
                model.add(
                    &format!("wheel_{i}"),
                    wheel,
                    Placement::at(x, 0.35, z).rotated_x(half_pi),
                )
            })
            .collect();
        model.push_root(ModelPart::Wheels, wheels);

        let windows = vec![
            model.add("windshield", Shape::cuboid(0.04, 0.4, 1.4), Placement::at(0.78, 1.1, 0.0)),
            model.add("rear_window", Shape::cuboid(0.04, 0.35, 1.3), Placement::at(-1.18, 1.12, 0.0)),
            model.add("side_window_l", Shape::cuboid(1.6, 0.35, 0.04), Placement::at(-0.2, 1.12, 0.78)),
            model.add("side_window_r", Shape::cuboid(1.6, 0.35, 0.04), Placement::at(-0.2, 1.12, -0.78)),
        ];
        model.push_root(ModelPart::Windows, windows);

        let metal = vec![
            model.add("grille", Shape::cuboid(0.04, 0.2, 1.0), Placement::at(2.01, 0.55, 0.0)),
            model.add("bumper_bar", Shape::cuboid(0.1, 0.08, 1.7), Placement::at(2.02, 0.3, 0.0)),
            model.add("mirror_l", Shape::cuboid(0.15, 0.1, 0.12), Placement::at(0.6, 1.0, 0.95)),
            model.add("mirror_r", Shape::cuboid(0.15, 0.1, 0.12), Placement::at(0.6, 1.0, -0.95)),
        ];
        model.push_root(ModelPart::MetalElements, metal);

        let spoiler = vec![
            model.add("wing", Shape::cuboid(0.4, 0.05, 1.6), Placement::at(-1.85, 1.2, 0.0)),
            model.add("strut_l", Shape::cuboid(0.05, 0.3, 0.05), Placement::at(-1.85, 1.0, 0.5)),
            model.add("strut_r", Shape::cuboid(0.05, 0.3, 0.05), Placement::at(-1.85, 1.0, -0.5)),
        ];
        model.push_root(ModelPart::Spoiler, spoiler);

        let front = vec![
            model.add("headlight_l", Shape::cuboid(0.04, 0.12, 0.35), Placement::at(2.01, 0.7, 0.6)),
            model.add("headlight_r", Shape::cuboid(0.04, 0.12, 0.35), Placement::at(2.01, 0.7, -0.6)),
        ];
        model.push_root(ModelPart::FrontLamps, front);

        let back = vec![
            model.add("taillight_l", Shape::cuboid(0.04, 0.12, 0.4), Placement::at(-2.01, 0.7, 0.6)),
            model.add("taillight_r", Shape::cuboid(0.04, 0.12, 0.4), Placement::at(-2.01, 0.7, -0.6)),
        ];
        model.push_root(ModelPart::BackLamps, back);

        model
    }

    /// Drop the sub-object for `part`
    pub fn without(mut self, part: ModelPart) -> Self {
        self.roots.retain(|node| !part.node_names().contains(&node.name.as_str()));
        self
    }

    /// Rename the top-level node of `part`
    pub fn renamed(mut self, part: ModelPart, name: &str) -> Self {
        for node in &mut self.roots {
            if part.node_names().contains(&node.name.as_str()) {
                node.name = name.to_string();
            }
        }
        self
    }

    /// World-space geometry of a mesh
    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(&handle)
    }

    pub fn mesh_table(&self) -> &HashMap<MeshHandle, MeshData> {
        &self.meshes
    }

    fn add(&mut self, name: &str, shape: Shape, placement: Placement) -> ModelNode {
        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes
            .insert(handle, shape.mesh().transformed(&placement.matrix()));
        ModelNode::leaf(name, handle)
    }

    fn push_root(&mut self, part: ModelPart, children: Vec<ModelNode>) {
        let name = part.node_names()[0];
        self.roots.push(ModelNode::group(name, children));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupe_has_every_part() {
        let model = ProceduralCarModel::coupe();
        for part in ModelPart::ALL {
            let node = model.sub_object(part).unwrap_or_else(|| panic!("missing {:?}", part));
            assert!(!node.meshes().is_empty());
            for mesh in node.meshes() {
                assert!(model.mesh(mesh).is_some());
            }
        }
    }

    #[test]
    fn test_meshes_traverse_nested_groups() {
        let tree = ModelNode::group(
            "root",
            vec![
                ModelNode::leaf("a", MeshHandle(1)),
                ModelNode::group(
                    "inner",
                    vec![ModelNode::leaf("b", MeshHandle(2)), ModelNode::group("empty", vec![])],
                ),
                ModelNode::leaf("c", MeshHandle(3)),
            ],
        );
        assert_eq!(tree.meshes(), vec![MeshHandle(1), MeshHandle(2), MeshHandle(3)]);
    }

    #[test]
    fn test_alias_lookup() {
        let model = ProceduralCarModel::coupe()
            .renamed(ModelPart::FrontLamps, "frontlamps")
            .renamed(ModelPart::BackLamps, "backligts")
            .renamed(ModelPart::Windows, "windows");
        assert_eq!(model.sub_object(ModelPart::FrontLamps).unwrap().name, "frontlamps");
        assert_eq!(model.sub_object(ModelPart::BackLamps).unwrap().name, "backligts");
        assert!(model.sub_object(ModelPart::Windows).is_some());
    }

    #[test]
    fn test_without_removes_part() {
        let model = ProceduralCarModel::coupe().without(ModelPart::Spoiler);
        assert!(model.sub_object(ModelPart::Spoiler).is_none());
        assert!(model.sub_object(ModelPart::Body).is_some());
    }

    #[test]
    fn test_car_sits_on_ground() {
        let model = ProceduralCarModel::coupe();
        let lowest = model
            .mesh_table()
            .values()
            .filter_map(MeshData::bounds)
            .map(|(min, _)| min.y)
            .fold(f32::MAX, f32::min);
        assert!(lowest.abs() < 1e-4, "lowest point {lowest}");
    }
}
