//! Authoritative scene: flat node storage, subject management, world-space
//! bounds.
//!
//! Everything visible is a [`SceneNode`]: the primary subject (a splat
//! cloud or its mesh fallback) or placeholder geometry shown until a load
//! resolves. The scene owns the nodes; loaders hand finished nodes to the
//! host, which inserts them here.

mod bounds;

pub use bounds::Aabb;
use glam::{Mat4, Quat, Vec3};

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// What a node represents, for subject bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Gaussian-splat point cloud (preferred subject representation).
    Splat,
    /// Triangle-mesh fallback subject.
    Mesh,
    /// Stand-in geometry shown while nothing else is loaded.
    Placeholder,
}

impl NodeKind {
    /// Whether this kind counts as the primary subject.
    #[must_use]
    pub const fn is_subject(self) -> bool {
        matches!(self, Self::Splat | Self::Mesh)
    }
}

/// One renderable node with a local-space bounding box and a TRS transform.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Display name (asset path stem, usually).
    pub name: String,
    /// Node classification.
    pub kind: NodeKind,
    /// Translation.
    pub position: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Non-uniform scale.
    pub scale: Vec3,
    /// Bounds in the node's local space.
    pub local_bounds: Aabb,
    /// True when the decoder populates geometry progressively after the
    /// load resolves; the host then delays camera fitting instead of
    /// fitting immediately.
    pub streaming: bool,
}

impl SceneNode {
    /// Node at the origin with identity orientation and unit scale.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_bounds: Aabb::EMPTY,
            streaming: false,
        }
    }

    /// Local-to-world transform.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.position,
        )
    }

    /// Bounds in world space.
    #[must_use]
    pub fn world_bounds(&self) -> Aabb {
        self.local_bounds.transformed(&self.transform())
    }
}

/// A node as stored in the scene, paired with host-side metadata.
#[derive(Clone, Debug)]
pub struct SceneEntry {
    /// The node data.
    pub node: SceneNode,
    /// Hidden nodes are skipped by bounds traversal and rendering.
    pub visible: bool,
    id: u32,
}

impl SceneEntry {
    /// Scene-assigned node ID.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The authoritative scene. Owns all nodes in a flat list.
///
/// Invariant: at most one subject node ([`NodeKind::is_subject`]) exists at
/// a time; [`Scene::set_subject`] replaces any previous one.
pub struct Scene {
    entries: Vec<SceneEntry>,
    next_node_id: u32,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation last consumed by the renderer.
    rendered_generation: u64,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_node_id: 0,
            generation: 0,
            rendered_generation: 0,
        }
    }

    // -- Mutation tracking --

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Total mutations applied so far. Doubles as a teardown-safety probe:
    /// after the host is torn down this must stop advancing.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether scene data changed since the last `mark_rendered()`.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark the current generation as rendered.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    // -- Node management --

    /// Insert a node. Returns the assigned node ID.
    pub fn add_node(&mut self, node: SceneNode) -> u32 {
        let id = self.next_node_id;
        self.next_node_id += 1;
        self.entries.push(SceneEntry {
            node,
            visible: true,
            id,
        });
        self.invalidate();
        id
    }

    /// Remove a node by ID. Returns the removed node, if any.
    pub fn remove_node(&mut self, id: u32) -> Option<SceneNode> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(idx);
        self.invalidate();
        Some(entry.node)
    }

    /// Install `node` as the primary subject, removing any previous subject
    /// node first. Returns the new subject's ID.
    pub fn set_subject(&mut self, node: SceneNode) -> u32 {
        self.entries.retain(|e| !e.node.kind.is_subject());
        self.add_node(node)
    }

    /// Current subject entry, if one is loaded.
    #[must_use]
    pub fn subject(&self) -> Option<&SceneEntry> {
        self.entries.iter().find(|e| e.node.kind.is_subject())
    }

    /// Remove every placeholder node. Returns how many were removed.
    pub fn remove_placeholders(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|e| e.node.kind != NodeKind::Placeholder);
        let removed = before - self.entries.len();
        if removed > 0 {
            self.invalidate();
        }
        removed
    }

    /// Read access to a node entry.
    #[must_use]
    pub fn entry(&self, id: u32) -> Option<&SceneEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.entries.len()
    }

    /// Toggle visibility.
    pub fn set_visible(&mut self, id: u32, visible: bool) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.id == id) {
            if e.visible != visible {
                e.visible = visible;
                self.invalidate();
            }
        }
    }

    /// Remove all nodes.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.invalidate();
    }

    // -- Bounds --

    /// World-space bounds over all visible nodes (for camera fitting).
    /// Empty when no visible node carries usable bounds.
    #[must_use]
    pub fn world_bounds(&self) -> Aabb {
        let mut bounds = Aabb::EMPTY;
        for e in self.entries.iter().filter(|e| e.visible) {
            bounds.union(&e.node.world_bounds());
        }
        bounds
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_subject(kind: NodeKind) -> SceneNode {
        let mut n = SceneNode::new("subject", kind);
        n.local_bounds = Aabb::centered_cube(Vec3::ZERO, 0.5);
        n
    }

    #[test]
    fn at_most_one_subject() {
        let mut scene = Scene::new();
        let _ = scene.set_subject(unit_subject(NodeKind::Mesh));
        let splat_id = scene.set_subject(unit_subject(NodeKind::Splat));

        let subjects: Vec<_> = scene
            .entries()
            .iter()
            .filter(|e| e.node.kind.is_subject())
            .collect();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].id(), splat_id);
        assert_eq!(subjects[0].node.kind, NodeKind::Splat);
    }

    #[test]
    fn placeholder_removal_counts_and_invalidates() {
        let mut scene = Scene::new();
        let _ = scene.add_node(SceneNode::new("grid", NodeKind::Placeholder));
        let _ = scene.add_node(SceneNode::new("axes", NodeKind::Placeholder));
        scene.mark_rendered();

        assert_eq!(scene.remove_placeholders(), 2);
        assert!(scene.is_dirty());
        // A second removal is a no-op and must not bump the generation
        let gen = scene.generation();
        assert_eq!(scene.remove_placeholders(), 0);
        assert_eq!(scene.generation(), gen);
    }

    #[test]
    fn world_bounds_applies_node_transform() {
        let mut scene = Scene::new();
        let mut node = unit_subject(NodeKind::Splat);
        node.position = Vec3::new(10.0, 0.0, 0.0);
        node.scale = Vec3::splat(2.0);
        let _ = scene.set_subject(node);

        let bounds = scene.world_bounds();
        assert_eq!(bounds.center(), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(bounds.size(), Vec3::splat(2.0));
    }

    #[test]
    fn world_bounds_skips_hidden_nodes() {
        let mut scene = Scene::new();
        let id = scene.set_subject(unit_subject(NodeKind::Mesh));
        scene.set_visible(id, false);
        assert!(scene.world_bounds().is_empty());
    }

    #[test]
    fn empty_scene_has_empty_bounds() {
        assert!(Scene::new().world_bounds().is_empty());
    }
}
