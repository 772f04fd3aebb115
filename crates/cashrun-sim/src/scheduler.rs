//! Cooperative task scheduler.
//!
//! Tasks are plain values resumed once per tick. Each task belongs to an
//! owner entity and runs in a lane; an owner has at most one task per lane,
//! so spawning into an occupied lane cancels the previous task. A cancelled
//! task is dropped on the spot and never resumed again, even when it is
//! cancelled while it is the one being resumed.

use std::collections::BTreeMap;

use hecs::Entity;

/// Stable handle of a scheduled task. Ids increase in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// Independent task slots per owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// AI state behavior, or the player's respawn countdown.
    Behavior,
    /// Sprite animation playback.
    Animation,
    /// Weapon fire recovery.
    Recovery,
    /// Colour flash or damage overlay.
    Effect,
}

#[derive(Debug)]
struct Slot<T> {
    owner: Entity,
    lane: Lane,
    /// `None` while the task is checked out for resuming.
    task: Option<T>,
}

/// Owner/lane keyed task table.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    slots: BTreeMap<TaskId, Slot<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            slots: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Schedule `task`, replacing whatever `owner` had in `lane`.
    pub fn spawn(&mut self, owner: Entity, lane: Lane, task: T) -> TaskId {
        self.cancel_lane(owner, lane);
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.slots.insert(
            id,
            Slot {
                owner,
                lane,
                task: Some(task),
            },
        );
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.slots.remove(&id).is_some()
    }

    pub fn cancel_lane(&mut self, owner: Entity, lane: Lane) -> usize {
        let before = self.slots.len();
        self.slots
            .retain(|_, slot| !(slot.owner == owner && slot.lane == lane));
        before - self.slots.len()
    }

    /// Cancel every task of `owner`.
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.owner != owner);
        before - self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Ids of all tasks ready to resume, in spawn order. Tasks spawned after
    /// this call wait for the next snapshot.
    pub fn pending_ids(&self) -> Vec<TaskId> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.task.is_some())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Check a task out for resuming. The slot stays reserved until it is
    /// parked or finished; cancelling it meanwhile releases the slot.
    pub fn take(&mut self, id: TaskId) -> Option<(Entity, T)> {
        let slot = self.slots.get_mut(&id)?;
        let task = slot.task.take()?;
        Some((slot.owner, task))
    }

    /// Return a resumed task. Dropped if the slot was cancelled meanwhile.
    pub fn park(&mut self, id: TaskId, task: T) -> bool {
        match self.slots.get_mut(&id) {
            Some(slot) if slot.task.is_none() => {
                slot.task = Some(task);
                true
            }
            _ => false,
        }
    }

    /// Release the slot of a task that ran to completion.
    pub fn finish(&mut self, id: TaskId) {
        if self.slots.get(&id).is_some_and(|slot| slot.task.is_none()) {
            self.slots.remove(&id);
        }
    }

    pub fn has_task(&self, owner: Entity, lane: Lane) -> bool {
        self.slots
            .values()
            .any(|slot| slot.owner == owner && slot.lane == lane)
    }

    /// The parked task in `owner`'s lane, if any.
    pub fn task(&self, owner: Entity, lane: Lane) -> Option<&T> {
        self.slots
            .values()
            .find(|slot| slot.owner == owner && slot.lane == lane)
            .and_then(|slot| slot.task.as_ref())
    }

    pub fn task_count(&self, owner: Entity) -> usize {
        self.slots.values().filter(|slot| slot.owner == owner).count()
    }
}

#[cfg(test)]
mod tests {
    use hecs::World;

    use super::*;

    fn owners(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn(())).collect()
    }

    #[test]
    fn test_spawn_replaces_same_lane() {
        let owner = owners(1)[0];
        let mut scheduler = Scheduler::new();
        scheduler.spawn(owner, Lane::Behavior, "patrol");
        scheduler.spawn(owner, Lane::Animation, "walk");
        scheduler.spawn(owner, Lane::Behavior, "chase");

        assert_eq!(scheduler.len(), 2);
        assert_eq!(scheduler.task(owner, Lane::Behavior), Some(&"chase"));
        assert_eq!(scheduler.task(owner, Lane::Animation), Some(&"walk"));
    }

    #[test]
    fn test_cancelled_while_running_is_not_parked() {
        let owner = owners(1)[0];
        let mut scheduler = Scheduler::new();
        let id = scheduler.spawn(owner, Lane::Behavior, 1);

        let (taken_owner, task) = scheduler.take(id).unwrap();
        assert_eq!(taken_owner, owner);
        assert!(scheduler.has_task(owner, Lane::Behavior));

        scheduler.cancel_owner(owner);
        assert!(!scheduler.park(id, task));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_replaced_while_running_keeps_replacement() {
        let owner = owners(1)[0];
        let mut scheduler = Scheduler::new();
        let id = scheduler.spawn(owner, Lane::Behavior, 1);
        scheduler.take(id).unwrap();

        scheduler.spawn(owner, Lane::Behavior, 2);
        scheduler.finish(id);

        assert_eq!(scheduler.task(owner, Lane::Behavior), Some(&2));
    }

    #[test]
    fn test_pending_ids_in_spawn_order() {
        let ids = owners(3);
        let mut scheduler = Scheduler::new();
        let first = scheduler.spawn(ids[2], Lane::Effect, 'a');
        let second = scheduler.spawn(ids[0], Lane::Effect, 'b');
        let third = scheduler.spawn(ids[1], Lane::Effect, 'c');

        assert_eq!(scheduler.pending_ids(), vec![first, second, third]);

        scheduler.take(second);
        assert_eq!(scheduler.pending_ids(), vec![first, third]);
    }

    #[test]
    fn test_finish_releases_slot() {
        let owner = owners(1)[0];
        let mut scheduler = Scheduler::new();
        let id = scheduler.spawn(owner, Lane::Recovery, ());
        scheduler.take(id);
        scheduler.finish(id);
        assert!(!scheduler.has_task(owner, Lane::Recovery));
        assert_eq!(scheduler.task_count(owner), 0);
    }
}
