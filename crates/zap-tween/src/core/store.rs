// core/store.rs
//
// Flat storage for one tweener kind: components, tween records and the dense
// list of active slots. Commands queue up and apply at the start of each tick.
//
// Usage:
//   let mut store = TweenStore::new(PositionTweener);
//   store.spawn(EntityId(0), Transform::default());
//   store.push_request(TweenRequest::new(EntityId(0), TweenBuilder::new(1.0, Vec3::X)));
//   store.tick(dt);
//   for id in store.drain_completed() { /* ... */ }

use std::collections::HashMap;
use std::thread;

use crate::api::error::{Result, TweenError};
use crate::api::types::EntityId;
use crate::extensions::builder::TweenBuilder;
use crate::extensions::tween::{tick_record, TickOutcome, TweenData};
use crate::input::queue::{CommandQueue, TweenCommand};
use crate::tweeners::Tweener;

/// Dense storage of components and their tween records for one tweener kind.
///
/// Slots live in parallel flat Vecs. A separate dense list holds the indices of
/// active slots (swap-removed on deactivation), so a tick touches only live
/// records. Designed for thousands of entities, not millions.
pub struct TweenStore<T: Tweener> {
    tweener: T,
    ids: Vec<EntityId>,
    components: Vec<T::Component>,
    records: Vec<TweenData<T::Value>>,
    index: HashMap<EntityId, usize>,
    /// Slot indices with the enable flag set.
    active: Vec<usize>,
    /// Per slot: position inside `active`, if any.
    active_pos: Vec<Option<usize>>,
    pending: CommandQueue<T::Value>,
    /// Entities whose tweens finished naturally, to be polled.
    completed: Vec<EntityId>,
}

impl<T> TweenStore<T>
where
    T: Tweener,
    T::Value: Default,
{
    pub fn new(tweener: T) -> Self {
        Self::with_capacity(tweener, 256)
    }

    /// Create a store with a specific entity capacity.
    pub fn with_capacity(tweener: T, capacity: usize) -> Self {
        Self {
            tweener,
            ids: Vec::with_capacity(capacity),
            components: Vec::with_capacity(capacity),
            records: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            active: Vec::with_capacity(capacity),
            active_pos: Vec::with_capacity(capacity),
            pending: CommandQueue::new(),
            completed: Vec::new(),
        }
    }

    /// Add an entity with an idle tween slot.
    /// Spawning an id that already exists replaces its component and keeps its record.
    pub fn spawn(&mut self, id: EntityId, component: T::Component) {
        if let Some(&idx) = self.index.get(&id) {
            self.components[idx] = component;
            return;
        }
        self.index.insert(id, self.ids.len());
        self.ids.push(id);
        self.components.push(component);
        self.records.push(TweenData::default());
        self.active_pos.push(None);
    }
}

impl<T: Tweener> TweenStore<T> {
    /// Remove an entity. Returns its component if it was present.
    pub fn despawn(&mut self, id: EntityId) -> Option<T::Component> {
        let idx = self.index.remove(&id)?;
        self.deactivate_slot(idx);

        let last = self.ids.len() - 1;
        self.ids.swap_remove(idx);
        self.records.swap_remove(idx);
        self.active_pos.swap_remove(idx);
        let component = self.components.swap_remove(idx);

        if idx != last {
            // The former last slot now lives at `idx`.
            self.index.insert(self.ids[idx], idx);
            if let Some(pos) = self.active_pos[idx] {
                self.active[pos] = idx;
            }
        }
        Some(component)
    }

    pub fn tweener(&self) -> &T {
        &self.tweener
    }

    pub fn component(&self, id: EntityId) -> Option<&T::Component> {
        self.index.get(&id).map(|&idx| &self.components[idx])
    }

    pub fn component_mut(&mut self, id: EntityId) -> Option<&mut T::Component> {
        self.index.get(&id).map(|&idx| &mut self.components[idx])
    }

    pub fn record(&self, id: EntityId) -> Option<&TweenData<T::Value>> {
        self.index.get(&id).map(|&idx| &self.records[idx])
    }

    /// Iterate over all entities and their components.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T::Component)> {
        self.ids.iter().copied().zip(self.components.iter())
    }

    /// Whether the entity's tween is currently enabled.
    pub fn is_active(&self, id: EntityId) -> bool {
        self.index
            .get(&id)
            .is_some_and(|&idx| self.active_pos[idx].is_some())
    }

    /// Number of enabled tweens.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of entities in the store.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Build a tween on the entity's record right away.
    pub fn activate(&mut self, id: EntityId, builder: &TweenBuilder<T::Value>) -> Result<()> {
        let idx = *self.index.get(&id).ok_or(TweenError::UnknownEntity(id))?;
        builder.build(&self.tweener, &mut self.records[idx], &self.components[idx])?;
        self.activate_slot(idx);
        log::debug!("tween activated on {} ({} active)", id, self.active.len());
        Ok(())
    }

    /// Clear the entity's enable flag right away. Cancelling an idle tween is a no-op.
    pub fn cancel(&mut self, id: EntityId) -> Result<()> {
        let idx = *self.index.get(&id).ok_or(TweenError::UnknownEntity(id))?;
        if self.records[idx].is_active() {
            self.records[idx].cancel();
            self.deactivate_slot(idx);
            log::debug!("tween cancelled on {}", id);
        }
        Ok(())
    }

    /// Queue a command; it is applied at the start of the next tick.
    pub fn push_request(&mut self, command: impl Into<TweenCommand<T::Value>>) {
        self.pending.push(command);
    }

    /// Number of queued commands.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Apply every queued command. A rejected command is logged and dropped;
    /// the rest still apply. Returns the number of commands applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        for command in self.pending.drain() {
            let result = match &command {
                TweenCommand::Activate(request) => self.activate(request.entity, &request.builder),
                TweenCommand::Cancel(entity) => self.cancel(*entity),
            };
            match result {
                Ok(()) => applied += 1,
                Err(err) => log::warn!("dropping tween command for {}: {}", command.entity(), err),
            }
        }
        applied
    }

    /// Apply queued commands, then advance every active tween by `dt` seconds.
    /// Returns the number of tweens that finished this tick.
    pub fn tick(&mut self, dt: f32) -> usize {
        self.apply_pending();

        let mut finished = Vec::new();
        for &idx in &self.active {
            let outcome = tick_record(&self.tweener, &mut self.records[idx], &mut self.components[idx], dt);
            if outcome == TickOutcome::Finished {
                finished.push(idx);
            }
        }
        self.finish_slots(&mut finished);

        log::trace!("tween tick: {} active, {} finished", self.active.len(), finished.len());
        finished.len()
    }

    /// Drain ids of entities whose tweens finished naturally.
    ///
    /// Within one tick, ids come out in slot order (spawn order, as reshuffled by
    /// `despawn`) for both `tick` and `tick_parallel`.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = EntityId> + '_ {
        self.completed.drain(..)
    }

    /// Remove every entity and pending command.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.components.clear();
        self.records.clear();
        self.index.clear();
        self.active.clear();
        self.active_pos.clear();
        self.pending.drain();
        self.completed.clear();
    }

    fn activate_slot(&mut self, idx: usize) {
        if self.active_pos[idx].is_none() {
            self.active_pos[idx] = Some(self.active.len());
            self.active.push(idx);
        }
    }

    fn deactivate_slot(&mut self, idx: usize) {
        if let Some(pos) = self.active_pos[idx].take() {
            self.active.swap_remove(pos);
            if let Some(&moved) = self.active.get(pos) {
                self.active_pos[moved] = Some(pos);
            }
        }
    }

    /// Retire finished slots in slot order.
    fn finish_slots(&mut self, finished: &mut [usize]) {
        finished.sort_unstable();
        for &idx in finished.iter() {
            let id = self.ids[idx];
            self.deactivate_slot(idx);
            self.completed.push(id);
            log::debug!("tween finished on {}", id);
        }
    }
}

impl<T> TweenStore<T>
where
    T: Tweener + Sync,
    T::Component: Send,
    T::Value: Send,
{
    /// Same as [`TweenStore::tick`], with the sweep split across `workers` threads.
    ///
    /// Active slots are sorted and cut into contiguous slot ranges, one per
    /// worker, so write sets are disjoint. Results are identical to `tick` for
    /// any worker count.
    pub fn tick_parallel(&mut self, dt: f32, workers: usize) -> usize {
        self.apply_pending();
        if self.active.is_empty() {
            return 0;
        }

        let mut order = self.active.clone();
        order.sort_unstable();
        let per_worker = order.len().div_ceil(workers.max(1));

        let tweener = &self.tweener;
        let mut components: &mut [T::Component] = &mut self.components;
        let mut records: &mut [TweenData<T::Value>] = &mut self.records;

        let mut finished: Vec<usize> = thread::scope(|scope| {
            let mut handles = Vec::new();
            let mut base = 0;

            for group in order.chunks(per_worker) {
                let end = group[group.len() - 1] + 1;
                let (group_components, rest) = std::mem::take(&mut components).split_at_mut(end - base);
                components = rest;
                let (group_records, rest) = std::mem::take(&mut records).split_at_mut(end - base);
                records = rest;
                let offset = base;
                base = end;

                handles.push(scope.spawn(move || {
                    let mut done = Vec::new();
                    for &idx in group {
                        let local = idx - offset;
                        let outcome = tick_record(tweener, &mut group_records[local], &mut group_components[local], dt);
                        if outcome == TickOutcome::Finished {
                            done.push(idx);
                        }
                    }
                    done
                }));
            }

            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });

        self.finish_slots(&mut finished);

        log::trace!(
            "parallel tween tick: {} workers, {} active, {} finished",
            workers,
            self.active.len(),
            finished.len()
        );
        finished.len()
    }
}
