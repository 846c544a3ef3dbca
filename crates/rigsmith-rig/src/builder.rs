//! Rig construction.
//!
//! [`RigBuilder`] owns every bone while the rig is assembled. Bones refer to
//! their parent by [`BoneId`], an index into the builder's bone list, so the
//! tree holds no shared mutable references. [`RigBuilder::finish`] checks
//! connectivity and geometry and hands back an immutable [`Rig`].

use std::collections::HashMap;

use rigsmith_spec::SkeletonBone;

use crate::error::{RigError, RigResult};
use crate::math::{self, Vec3};

/// Handle to a bone inside one rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoneId(usize);

impl BoneId {
    /// Position of the bone in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Side of a mirrored pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Rig bone name suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Side::Left => "_L",
            Side::Right => "_R",
        }
    }

    /// Humanoid bone name prefix.
    pub fn schema_prefix(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Rig name of one side of a mirrored pair.
    pub fn bone_name(self, base: &str) -> String {
        format!("{}{}", base, self.suffix())
    }
}

/// Roll convention for a mirrored pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoneKind {
    Arm,
    Leg,
    Other,
}

impl BoneKind {
    /// Rolls in degrees as `(left, right)`.
    pub fn rolls(self) -> (f64, f64) {
        match self {
            BoneKind::Arm => (0.0, 180.0),
            BoneKind::Leg => (90.0, 90.0),
            BoneKind::Other => (0.0, 0.0),
        }
    }
}

/// Left and right halves of a mirrored pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonePair {
    pub left: BoneId,
    pub right: BoneId,
}

impl BonePair {
    /// A pair whose halves share one bone, used to parent both sides to a
    /// center bone.
    pub fn both(id: BoneId) -> Self {
        Self {
            left: id,
            right: id,
        }
    }

    pub fn get(&self, side: Side) -> BoneId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// One bone of a rig.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    pub head: Vec3,
    pub tail: Vec3,
    /// Rotation about the bone axis, in radians.
    pub roll: f64,
    /// Envelope radius at head and tail.
    pub radius: f64,
    pub parent: Option<BoneId>,
}

impl Bone {
    pub fn length(&self) -> f64 {
        math::distance(self.head, self.tail)
    }

    pub fn roll_degrees(&self) -> f64 {
        self.roll.to_degrees()
    }
}

/// Assembles a rig one bone at a time.
#[derive(Debug, Default)]
pub struct RigBuilder {
    bones: Vec<Bone>,
    by_name: HashMap<String, BoneId>,
}

impl RigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bone and returns its handle.
    ///
    /// # Errors
    /// * [`RigError::DuplicateName`] if a bone with this name already exists
    /// * [`RigError::UnknownParent`] if `parent` was not issued by this builder
    pub fn add_bone(
        &mut self,
        name: &str,
        head: Vec3,
        tail: Vec3,
        parent: Option<BoneId>,
        radius: f64,
        roll_degrees: f64,
    ) -> RigResult<BoneId> {
        if self.by_name.contains_key(name) {
            return Err(RigError::DuplicateName {
                name: name.to_string(),
            });
        }
        if let Some(parent) = parent {
            if parent.0 >= self.bones.len() {
                return Err(RigError::UnknownParent {
                    bone: name.to_string(),
                });
            }
        }

        let id = BoneId(self.bones.len());
        self.bones.push(Bone {
            name: name.to_string(),
            head,
            tail,
            roll: roll_degrees.to_radians(),
            radius,
            parent,
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Adds `base_L` at the given coordinates and `base_R` reflected across
    /// the YZ plane.
    ///
    /// Each side is parented to the matching side of `parents`.
    pub fn add_mirrored_pair(
        &mut self,
        base: &str,
        head: Vec3,
        tail: Vec3,
        parents: BonePair,
        radius: f64,
        kind: BoneKind,
    ) -> RigResult<BonePair> {
        let (left_roll, right_roll) = kind.rolls();
        let left = self.add_bone(
            &Side::Left.bone_name(base),
            head,
            tail,
            Some(parents.left),
            radius,
            left_roll,
        )?;
        let right = self.add_bone(
            &Side::Right.bone_name(base),
            math::mirror_x(head),
            math::mirror_x(tail),
            Some(parents.right),
            radius,
            right_roll,
        )?;
        Ok(BonePair { left, right })
    }

    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.0)
    }

    pub fn id_of(&self, name: &str) -> Option<BoneId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Like [`RigBuilder::bone`], but a foreign handle is an error.
    pub fn require(&self, id: BoneId) -> RigResult<&Bone> {
        self.bones.get(id.0).ok_or_else(|| unknown_handle(id))
    }

    fn bone_mut(&mut self, id: BoneId) -> RigResult<&mut Bone> {
        self.bones.get_mut(id.0).ok_or_else(|| unknown_handle(id))
    }

    /// Rigidly turns a bone around the vertical axis through `pivot`.
    pub fn rotate_about_z(&mut self, id: BoneId, pivot: Vec3, degrees: f64) -> RigResult<()> {
        let bone = self.bone_mut(id)?;
        bone.head = math::rotate_z_about(bone.head, pivot, degrees);
        bone.tail = math::rotate_z_about(bone.tail, pivot, degrees);
        Ok(())
    }

    pub fn set_roll(&mut self, id: BoneId, degrees: f64) -> RigResult<()> {
        self.bone_mut(id)?.roll = degrees.to_radians();
        Ok(())
    }

    /// Validates the assembled bones and freezes them into a [`Rig`].
    ///
    /// # Errors
    /// * [`RigError::UnknownParent`] if `root` was not issued by this builder
    /// * [`RigError::Geometry`] if a bone has a non-finite position or no length
    /// * [`RigError::DetachedBone`] if a bone other than `root` has no parent
    pub fn finish(self, root: BoneId) -> RigResult<Rig> {
        let root_name = self.require(root)?.name.clone();

        for (index, bone) in self.bones.iter().enumerate() {
            let finite = bone.head.iter().chain(bone.tail.iter()).all(|c| c.is_finite());
            let length = bone.length();
            if !finite || length <= 0.0 {
                return Err(RigError::geometry(format!("{}.length", bone.name), length));
            }
            // Parents always precede children, so walking up from any bone
            // terminates; only a parentless non-root bone can be detached.
            if bone.parent.is_none() && index != root.0 {
                return Err(RigError::DetachedBone {
                    bone: bone.name.clone(),
                    root: root_name,
                });
            }
        }
        if self.bones[root.0].parent.is_some() {
            return Err(RigError::DetachedBone {
                bone: root_name.clone(),
                root: root_name,
            });
        }

        Ok(Rig {
            bones: self.bones,
            by_name: self.by_name,
            root,
        })
    }
}

fn unknown_handle(id: BoneId) -> RigError {
    RigError::UnknownParent {
        bone: format!("#{}", id.0),
    }
}

/// A finished, immutable rig.
#[derive(Debug, Clone)]
pub struct Rig {
    bones: Vec<Bone>,
    by_name: HashMap<String, BoneId>,
    root: BoneId,
}

impl Rig {
    pub fn root(&self) -> &Bone {
        &self.bones[self.root.0]
    }

    pub fn root_id(&self) -> BoneId {
        self.root
    }

    pub fn get(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id.0)
    }

    pub fn id_of(&self, name: &str) -> Option<BoneId> {
        self.by_name.get(name).copied()
    }

    /// Looks up a bone by name.
    pub fn find(&self, name: &str) -> Option<&Bone> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn parent(&self, id: BoneId) -> Option<&Bone> {
        self.get(id)?.parent.and_then(|p| self.get(p))
    }

    /// Iterates bones in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Bone> {
        self.bones.iter()
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Walks from a bone's parent up to the root.
    pub fn ancestors(&self, id: BoneId) -> impl Iterator<Item = &Bone> {
        let mut next = self.get(id).and_then(|b| b.parent);
        std::iter::from_fn(move || {
            let bone = self.get(next?)?;
            next = bone.parent;
            Some(bone)
        })
    }

    /// Direct children of a bone, in creation order.
    pub fn children(&self, id: BoneId) -> impl Iterator<Item = &Bone> {
        self.bones.iter().filter(move |b| b.parent == Some(id))
    }

    /// Flattens the rig into serializable records.
    pub fn to_skeleton_bones(&self) -> Vec<SkeletonBone> {
        self.bones
            .iter()
            .map(|bone| SkeletonBone {
                bone: bone.name.clone(),
                head: bone.head,
                tail: bone.tail,
                parent: bone
                    .parent
                    .and_then(|p| self.get(p))
                    .map(|p| p.name.clone()),
                roll: bone.roll_degrees(),
                radius: bone.radius,
            })
            .collect()
    }
}
