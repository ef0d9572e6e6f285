//! Per-target buff collection

use crate::buff::Buff;
use crate::signal::Signal;
use crate::tags::TagMatch;
use flint_core::BuffId;

/// The active buffs on one target.
///
/// Buffs are kept sorted by ascending priority; equal priorities keep their
/// insertion order. After `tick` returns no buff in the collection is over.
///
/// Removal comes in two flavours:
/// - `remove_buff` evicts immediately and fires only `on_buff_removed`.
///   Payloads are **not** rolled back.
/// - `manual_remove_buff` (and the `remove_buffs_by_*` helpers) only flag the
///   buff. The next `tick` runs its full teardown (rollback, the buff's own
///   remove signal) and then evicts it.
pub struct BuffSystem<T> {
    target: T,
    buffs: Vec<Buff<T>>,
    next_id: BuffId,

    on_buff_added: Signal<Buff<T>>,
    on_buff_removed: Signal<Buff<T>>,
    on_buffs_cleared: Signal<T>,
}

impl<T: Clone> BuffSystem<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            buffs: Vec::new(),
            next_id: BuffId(1),
            on_buff_added: Signal::new(),
            on_buff_removed: Signal::new(),
            on_buffs_cleared: Signal::new(),
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Tick every buff and evict the ones that finished.
    ///
    /// Walks the collection back to front so an eviction never shifts an
    /// element that has not been visited yet.
    pub fn tick(&mut self, dt: f64) {
        let mut i = self.buffs.len();
        while i > 0 {
            i -= 1;
            self.buffs[i].tick(dt);
            if self.buffs[i].is_over() {
                let buff = self.buffs.remove(i);
                tracing::debug!(buff = ?buff.id(), name = buff.name(), "buff expired");
                self.on_buff_removed.emit(&buff);
            }
        }
    }

    /// Bind the buff to this system's target, fire its apply signal and insert
    /// it in priority order.
    pub fn add_buff(&mut self, mut buff: Buff<T>) -> BuffId {
        let id = self.next_id;
        self.next_id = id.next();

        buff.set_id(id);
        buff.set_target(self.target.clone());
        buff.trigger_apply_event();
        tracing::debug!(buff = %id, name = buff.name(), priority = buff.priority(), "buff added");

        self.buffs.push(buff);
        self.sort_buffs();

        if let Some(added) = self.buffs.iter().find(|b| b.id() == Some(id)) {
            self.on_buff_added.emit(added);
        }
        id
    }

    pub fn add_buffs(&mut self, buffs: impl IntoIterator<Item = Buff<T>>) -> Vec<BuffId> {
        buffs.into_iter().map(|buff| self.add_buff(buff)).collect()
    }

    /// Stable sort by ascending priority
    pub fn sort_buffs(&mut self) {
        self.buffs.sort_by_key(Buff::priority);
    }

    /// Evict a buff right away, skipping its teardown.
    ///
    /// Returns the evicted buff, or `None` if the id isn't present.
    pub fn remove_buff(&mut self, id: BuffId) -> Option<Buff<T>> {
        let index = self.index_of(id)?;
        let buff = self.buffs.remove(index);
        tracing::debug!(buff = %id, name = buff.name(), "buff removed");
        self.on_buff_removed.emit(&buff);
        Some(buff)
    }

    /// Flag a buff for removal on the next tick. Returns false if the id
    /// isn't present.
    pub fn manual_remove_buff(&mut self, id: BuffId) -> bool {
        match self.get_mut(id) {
            Some(buff) => {
                buff.mark_over();
                true
            }
            None => false,
        }
    }

    /// Drop every buff without teardown
    pub fn clear(&mut self) {
        let count = self.buffs.len();
        self.buffs.clear();
        tracing::debug!(count, "buffs cleared");
        self.on_buffs_cleared.emit(&self.target);
    }

    // ─── Access ─────────────────────────────────────────────────────────────

    pub fn get(&self, id: BuffId) -> Option<&Buff<T>> {
        self.buffs.iter().find(|b| b.id() == Some(id))
    }

    pub fn get_mut(&mut self, id: BuffId) -> Option<&mut Buff<T>> {
        self.buffs.iter_mut().find(|b| b.id() == Some(id))
    }

    pub fn contains(&self, id: BuffId) -> bool {
        self.index_of(id).is_some()
    }

    /// Buffs in current order
    pub fn iter(&self) -> impl Iterator<Item = &Buff<T>> {
        self.buffs.iter()
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    fn index_of(&self, id: BuffId) -> Option<usize> {
        self.buffs.iter().position(|b| b.id() == Some(id))
    }

    // ─── Notifications ──────────────────────────────────────────────────────

    pub fn on_buff_added(&mut self) -> &mut Signal<Buff<T>> {
        &mut self.on_buff_added
    }

    pub fn on_buff_removed(&mut self) -> &mut Signal<Buff<T>> {
        &mut self.on_buff_removed
    }

    pub fn on_buffs_cleared(&mut self) -> &mut Signal<T> {
        &mut self.on_buffs_cleared
    }

    // ─── Tag queries ────────────────────────────────────────────────────────

    fn find_first<S: AsRef<str>>(&self, policy: TagMatch, tags: &[S]) -> Option<&Buff<T>> {
        self.buffs.iter().find(|b| policy.matches(b.tags(), tags))
    }

    fn find_every<S: AsRef<str>>(&self, policy: TagMatch, tags: &[S]) -> Vec<&Buff<T>> {
        self.buffs
            .iter()
            .filter(|b| policy.matches(b.tags(), tags))
            .collect()
    }

    /// Does any buff carry at least one of `tags`?
    pub fn has_any_buff<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        self.find_first(TagMatch::Any, tags).is_some()
    }

    /// Does any buff carry all of `tags`?
    pub fn has_all_buff<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        self.find_first(TagMatch::All, tags).is_some()
    }

    pub fn find_buff_by_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> Option<&Buff<T>> {
        self.find_first(TagMatch::Any, tags)
    }

    pub fn find_buff_by_all_tags<S: AsRef<str>>(&self, tags: &[S]) -> Option<&Buff<T>> {
        self.find_first(TagMatch::All, tags)
    }

    pub fn find_all_buffs_by_any_tag<S: AsRef<str>>(&self, tags: &[S]) -> Vec<&Buff<T>> {
        self.find_every(TagMatch::Any, tags)
    }

    pub fn find_all_buffs_by_all_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<&Buff<T>> {
        self.find_every(TagMatch::All, tags)
    }

    /// Flag every buff carrying any of `tags` for removal on the next tick.
    /// Returns how many were flagged.
    pub fn remove_buffs_by_any_tag<S: AsRef<str>>(&mut self, tags: &[S]) -> usize {
        self.flag_matching(TagMatch::Any, tags)
    }

    /// Flag every buff carrying all of `tags` for removal on the next tick.
    /// Returns how many were flagged.
    pub fn remove_buffs_by_all_tags<S: AsRef<str>>(&mut self, tags: &[S]) -> usize {
        self.flag_matching(TagMatch::All, tags)
    }

    fn flag_matching<S: AsRef<str>>(&mut self, policy: TagMatch, tags: &[S]) -> usize {
        let mut flagged = 0;
        for buff in self.buffs.iter_mut().rev() {
            if policy.matches(buff.tags(), tags) {
                buff.mark_over();
                flagged += 1;
            }
        }
        flagged
    }
}

impl<T> std::fmt::Debug for BuffSystem<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuffSystem")
            .field("buffs", &self.buffs)
            .finish()
    }
}
