//! Whole-warehouse consistency check.
//!
//! O(robots + pods + slots + stations).  Too slow to run after every event in
//! long sweeps, cheap enough for tests and debug tooling.

use rmfs_core::{RobotId, SlotId};

use crate::{Warehouse, WarehouseError, WarehouseResult};

fn violated(msg: String) -> WarehouseError {
    WarehouseError::Invariant(msg)
}

impl Warehouse {
    /// Verify every cross-entity invariant; returns the first violation.
    ///
    /// - a pod is in use iff exactly one robot carries it, and a carried pod
    ///   is where its robot is;
    /// - the free-robot, free-pod, and free-station indexes mirror entity state;
    /// - every pod belongs to exactly one item type;
    /// - stored pods stand on distinct occupied slots;
    /// - vacant slots are exactly the vacated pool, and every lifted pod is
    ///   matched by a vacated slot or a claimed storage destination.
    pub fn audit(&self) -> WarehouseResult<()> {
        // ── Robots ↔ pods ─────────────────────────────────────────────────
        let mut carrier: Vec<Option<RobotId>> = vec![None; self.pods.len()];
        for robot in &self.robots {
            let is_indexed = self.free_robots.contains(&robot.id);
            if robot.is_free() != is_indexed {
                return Err(violated(format!("{} free={} but indexed={is_indexed}", robot.id, robot.is_free())));
            }
            let Some(pod) = robot.carried_pod else { continue };
            if let Some(other) = carrier[pod.index()].replace(robot.id) {
                return Err(violated(format!("{pod} carried by both {other} and {}", robot.id)));
            }
            let p = &self.pods[pod.index()];
            if !p.in_use {
                return Err(violated(format!("{pod} carried by {} but not in use", robot.id)));
            }
            if p.pos != robot.pos {
                return Err(violated(format!("{pod} at {} but its robot {} is at {}", p.pos, robot.id, robot.pos)));
            }
        }

        // ── Pods ──────────────────────────────────────────────────────────
        let mut on_slot = vec![false; self.layout.len()];
        let mut lifted = 0usize;
        for pod in &self.pods {
            if pod.in_use != carrier[pod.id.index()].is_some() {
                return Err(violated(format!("{} in_use={} without a matching carrier", pod.id, pod.in_use)));
            }
            let is_indexed = self.free_pods[pod.item.index()].contains(pod.id);
            if pod.is_free() != is_indexed {
                return Err(violated(format!("{} free={} but indexed={is_indexed}", pod.id, pod.is_free())));
            }
            match pod.slot {
                Some(slot) => {
                    if std::mem::replace(&mut on_slot[slot.index()], true) {
                        return Err(violated(format!("two pods stored on {slot}")));
                    }
                    if !self.layout.slot(slot).occupied {
                        return Err(violated(format!("{} stands on vacant {slot}", pod.id)));
                    }
                    if pod.pos != self.layout.pos(slot) {
                        return Err(violated(format!("{} is off its {slot}", pod.id)));
                    }
                }
                None => lifted += 1,
            }
        }

        // ── Item partition ────────────────────────────────────────────────
        let mut owner = vec![false; self.pods.len()];
        for (item, pods) in self.item_pods.iter().enumerate() {
            for &pod in pods {
                if std::mem::replace(&mut owner[pod.index()], true) {
                    return Err(violated(format!("{pod} listed under more than one item type")));
                }
                if self.pods[pod.index()].item.index() != item {
                    return Err(violated(format!("{pod} listed under the wrong item type")));
                }
            }
        }
        if owner.iter().any(|&o| !o) {
            return Err(violated("a pod belongs to no item type".to_owned()));
        }

        // ── Stations ──────────────────────────────────────────────────────
        for station in &self.stations {
            let is_indexed = self.free_stations.contains(&station.id);
            if station.is_free() != is_indexed {
                return Err(violated(format!("{} free={} but indexed={is_indexed}", station.id, station.is_free())));
            }
            if station.serving().is_none() && station.line_len() > 0 {
                return Err(violated(format!("{} has a line but serves nobody", station.id)));
            }
            if station.serving().is_some() && station.is_free() {
                return Err(violated(format!("{} is serving while marked free", station.id)));
            }
        }

        // ── Slots ─────────────────────────────────────────────────────────
        for (i, slot) in self.layout.slots().iter().enumerate() {
            let id = SlotId(i as u32);
            if !slot.occupied != self.vacated.contains(id) {
                return Err(violated(format!("{id} vacant={} but pooled={}", !slot.occupied, self.vacated.contains(id))));
            }
        }
        let returning = self.robots.iter().filter(|r| r.dest_slot.is_some()).count();
        if lifted != self.vacated.len() + returning {
            return Err(violated(format!(
                "{lifted} lifted pods but {} vacated slots and {returning} pods on their way back",
                self.vacated.len()
            )));
        }
        Ok(())
    }
}
