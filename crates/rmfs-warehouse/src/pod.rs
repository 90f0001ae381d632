//! Inventory pod state.

use rmfs_core::{ItemType, PodId, Point, SlotId};

use crate::{WarehouseError, WarehouseResult};

/// A movable shelf holding a single item type.
///
/// `slot` is the slot the pod stands on, `None` while a robot carries it.
/// `in_use` covers the whole trip: from the moment a robot is sent for the
/// pod until it is set down again.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pod {
    pub id:     PodId,
    pub item:   ItemType,
    pub pos:    Point,
    pub in_use: bool,
    pub slot:   Option<SlotId>,
}

impl Pod {
    pub fn new(id: PodId, item: ItemType, slot: SlotId, pos: Point) -> Self {
        Self { id, item, pos, in_use: false, slot: Some(slot) }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        !self.in_use
    }

    /// A robot has been dispatched for this pod.
    pub fn reserve(&mut self) -> WarehouseResult<()> {
        if self.in_use {
            return Err(WarehouseError::PodInUse(self.id));
        }
        self.in_use = true;
        Ok(())
    }

    /// Take the pod off its slot; returns the slot it leaves.
    pub fn lift(&mut self) -> WarehouseResult<SlotId> {
        if !self.in_use {
            return Err(WarehouseError::PodNotInUse(self.id));
        }
        self.slot.take().ok_or(WarehouseError::PodNotStored(self.id))
    }

    /// Travel with the carrying robot.
    #[inline]
    pub fn move_to(&mut self, pos: Point) {
        self.pos = pos;
    }

    /// Put the pod down on `slot` and release it.
    pub fn store(&mut self, slot: SlotId, pos: Point) -> WarehouseResult<()> {
        if !self.in_use {
            return Err(WarehouseError::PodNotInUse(self.id));
        }
        if self.slot.is_some() {
            return Err(WarehouseError::Invariant(format!("{} stored while still on a slot", self.id)));
        }
        self.in_use = false;
        self.slot = Some(slot);
        self.pos = pos;
        Ok(())
    }
}
