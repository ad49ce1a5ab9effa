use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Integer cell address in the voxel grid.
///
/// One unit cube occupies each cell; the cube's center sits exactly on the
/// coordinate, so its faces lie on the half-integer planes around it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Nearest cell to a continuous position, rounding each axis independently.
    ///
    /// Halves round away from zero (`f32::round`), so `-0.5` maps to `-1`.
    pub fn from_position(position: Vec3) -> Self {
        let r = position.round();
        Self::new(r.x as i32, r.y as i32, r.z as i32)
    }

    /// The neighbouring cell across the given face.
    pub fn adjacent(self, face: Face) -> Self {
        self + face.normal()
    }

    /// Cell center in world space.
    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl Add<IVec3> for VoxelCoord {
    type Output = VoxelCoord;

    fn add(self, rhs: IVec3) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Packed `0xRRGGBB` display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Normalized RGBA with full opacity.
    pub fn to_rgba_f32(self) -> [f32; 4] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b, 1.0]
    }
}

/// Material of a single voxel.
///
/// Numeric ids are stable: `Air` is 0 and the placeable blocks follow in
/// declaration order, which is also the order of the number-key hotbar.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum BlockType {
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
    Wood,
    Leaves,
}

impl BlockType {
    /// Every block a user can place, in hotbar order (ids 1..=N).
    pub const PLACEABLE: [BlockType; 5] = [
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Wood,
        BlockType::Leaves,
    ];

    /// Look up a block by numeric id. Unknown ids yield `None`.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Air),
            1 => Some(Self::Grass),
            2 => Some(Self::Dirt),
            3 => Some(Self::Stone),
            4 => Some(Self::Wood),
            5 => Some(Self::Leaves),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn is_air(self) -> bool {
        self == Self::Air
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Air => "Air",
            Self::Grass => "Grass",
            Self::Dirt => "Dirt",
            Self::Stone => "Stone",
            Self::Wood => "Wood",
            Self::Leaves => "Leaves",
        }
    }

    /// Display color. `None` only for `Air`, which is never drawn.
    pub fn color(self) -> Option<Rgb> {
        match self {
            Self::Air => None,
            Self::Grass => Some(Rgb(0x7C_FC_00)),
            Self::Dirt => Some(Rgb(0x8B_45_13)),
            Self::Stone => Some(Rgb(0x80_80_80)),
            Self::Wood => Some(Rgb(0x8B_45_13)),
            Self::Leaves => Some(Rgb(0x22_8B_22)),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One of the six axis-aligned faces of a voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Outward unit normal.
    pub fn normal(self) -> IVec3 {
        match self {
            Self::PosX => IVec3::X,
            Self::NegX => IVec3::NEG_X,
            Self::PosY => IVec3::Y,
            Self::NegY => IVec3::NEG_Y,
            Self::PosZ => IVec3::Z,
            Self::NegZ => IVec3::NEG_Z,
        }
    }

    /// Face on the given axis (0 = x, 1 = y, 2 = z) on its positive or negative side.
    pub fn from_axis(axis: usize, positive: bool) -> Option<Self> {
        match (axis, positive) {
            (0, true) => Some(Self::PosX),
            (0, false) => Some(Self::NegX),
            (1, true) => Some(Self::PosY),
            (1, false) => Some(Self::NegY),
            (2, true) => Some(Self::PosZ),
            (2, false) => Some(Self::NegZ),
            _ => None,
        }
    }
}
