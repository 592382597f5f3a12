use common::shapes::Rectangle;
use smallvec::SmallVec;

pub(crate) const FLAG_NE: u8 = 0b0001;
pub(crate) const FLAG_NW: u8 = 0b0010;
pub(crate) const FLAG_SW: u8 = 0b0100;
pub(crate) const FLAG_SE: u8 = 0b1000;

pub(crate) const NODE_COUNT: usize = 4;

/// Arena index of the root node. The root is never recycled, so 0 also
/// serves as the absent-child / free-list-end sentinel.
pub(crate) const ROOT_NODE: u32 = 0;
pub(crate) const NO_NODE: u32 = 0;

/// Leaves currently holding an object. Straddlers rarely span more than a
/// handful of leaves, so the list stays inline.
pub(crate) type NodeList = SmallVec<[u32; 4]>;

/// Stable opaque handle identifying one tracked object. Two distinct objects
/// with identical rectangles must carry distinct ids; the same logical object
/// must keep its id across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub fn new(raw: u32) -> Self {
        ObjectId(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Capability required of anything indexable by the tree: a current
/// axis-aligned bounding rectangle and a stable identity.
pub trait Bounded {
    fn id(&self) -> ObjectId;
    fn bounding_box(&self) -> Rectangle;
}

/// 4-bit quadrant overlap mask for a rectangle against a node midpoint.
/// Bit order matches child slot order: NE, NW, SW, SE. The tests are strict,
/// so a rectangle that straddles the vertical or horizontal midline sets bits
/// in two (or all four) quadrants, and a rectangle that only touches a
/// midline sets none on the far side.
#[inline(always)]
pub(crate) fn quadrant_mask(mid_x: f32, mid_y: f32, rect: &Rectangle) -> u8 {
    let overlaps_top = rect.top() < mid_y;
    let overlaps_bottom = rect.bottom() > mid_y;
    let overlaps_left = rect.left() < mid_x;
    let overlaps_right = rect.right() > mid_x;

    let mut mask = 0;
    if overlaps_top && overlaps_right {
        mask |= FLAG_NE;
    }
    if overlaps_top && overlaps_left {
        mask |= FLAG_NW;
    }
    if overlaps_bottom && overlaps_left {
        mask |= FLAG_SW;
    }
    if overlaps_bottom && overlaps_right {
        mask |= FLAG_SE;
    }
    mask
}
