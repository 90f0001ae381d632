//! Storage slot grid.
//!
//! # Geometry
//!
//! The floor holds `2 * pick_aisles` storage rows.  Rows come in back-to-back
//! pairs separated by a picking aisle:
//!
//! ```text
//!   y
//!   ...
//!   9.5  ▪▪▪▪▪   ▪▪▪▪▪   ▪▪▪▪▪      row 3
//!   6.5  ▪▪▪▪▪   ▪▪▪▪▪   ▪▪▪▪▪      row 2
//!   5.5  ▪▪▪▪▪   ▪▪▪▪▪   ▪▪▪▪▪      row 1
//!                                   (aisle)
//!   2.5  ▪▪▪▪▪   ▪▪▪▪▪   ▪▪▪▪▪      row 0
//!        0.5     7.5     14.5       x
//!   0    ■ stations along y = 0
//! ```
//!
//! Every row is cut into `cross_aisles + 1` blocks of five slots spaced one
//! metre apart; consecutive blocks are three metres apart.  The first row
//! sits at `y = 2.5`; the row pitch is `+3` after even rows and `+1` after odd
//! rows.  Slots are numbered row-major.

use rmfs_core::{LayoutConfig, Point, SLOTS_PER_BLOCK, SlotId};

use crate::{WarehouseError, WarehouseResult};

const FIRST_X: f64 = 0.5;
const FIRST_Y: f64 = 2.5;
const SLOT_PITCH: f64 = 1.0;
const CROSS_AISLE_PITCH: f64 = 3.0;

/// One storage location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub pos:      Point,
    /// `true` while a pod stands on the slot or is on its way to it.
    pub occupied: bool,
}

/// The fixed slot grid plus per-slot occupancy.
#[derive(Clone, Debug)]
pub struct Layout {
    slots:         Vec<Slot>,
    rows:          u32,
    slots_per_row: u32,
}

impl Layout {
    /// Lay out every slot for `config`, all initially occupied.
    pub fn build(config: &LayoutConfig) -> Self {
        let rows = config.row_count();
        let slots_per_row = config.slots_per_row();
        let mut slots = Vec::with_capacity(config.slot_count());

        let mut y = FIRST_Y;
        for row in 0..rows {
            let mut x = FIRST_X;
            for col in 0..slots_per_row {
                if col > 0 {
                    x += if col % SLOTS_PER_BLOCK == 0 { CROSS_AISLE_PITCH } else { SLOT_PITCH };
                }
                slots.push(Slot { pos: Point::new(x, y), occupied: true });
            }
            y += if row % 2 == 0 { 3.0 } else { 1.0 };
        }

        Self { slots, rows, slots_per_row }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn slots_per_row(&self) -> u32 {
        self.slots_per_row
    }

    #[inline]
    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id.index()]
    }

    #[inline]
    pub fn pos(&self, id: SlotId) -> Point {
        self.slots[id.index()].pos
    }

    /// `(row, column)` of a slot.
    pub fn row_col(&self, id: SlotId) -> (u32, u32) {
        (id.0 / self.slots_per_row, id.0 % self.slots_per_row)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Mark `id` vacant after its pod has been lifted.
    pub fn release(&mut self, id: SlotId) -> WarehouseResult<()> {
        let slot = &mut self.slots[id.index()];
        if !slot.occupied {
            return Err(WarehouseError::SlotVacant(id));
        }
        slot.occupied = false;
        Ok(())
    }

    /// Mark `id` occupied (a pod is being brought to it).
    pub fn claim(&mut self, id: SlotId) -> WarehouseResult<()> {
        let slot = &mut self.slots[id.index()];
        if slot.occupied {
            return Err(WarehouseError::SlotOccupied(id));
        }
        slot.occupied = true;
        Ok(())
    }

    /// Number of vacant slots.
    pub fn vacant_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.occupied).count()
    }
}
