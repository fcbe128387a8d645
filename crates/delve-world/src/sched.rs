use std::collections::{HashMap, HashSet, VecDeque};

/// Minimum ticks between consecutive rebuilds of the same chunk.
pub const REBUILD_INTERVAL_TICKS: u64 = 5;

/// Throttled rebuild queue. The caller asks for at most one chunk per tick
/// (the global throttle); a chunk is handed out again only after
/// `min_interval` ticks have passed since its last rebuild, so an edit storm
/// (explosions, multi-block placements) spreads its cost over many frames
/// instead of stalling one.
#[derive(Debug)]
pub struct RebuildScheduler {
    queue: VecDeque<(usize, usize)>,
    queued: HashSet<(usize, usize)>,
    last_built: HashMap<(usize, usize), u64>,
    pub min_interval: u64,
}

impl Default for RebuildScheduler {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            queued: HashSet::new(),
            last_built: HashMap::new(),
            min_interval: REBUILD_INTERVAL_TICKS,
        }
    }
}

impl RebuildScheduler {
    pub fn mark(&mut self, gx: usize, gz: usize) {
        if self.queued.insert((gx, gz)) {
            self.queue.push_back((gx, gz));
        }
    }

    #[inline]
    pub fn is_pending(&self, gx: usize, gz: usize) -> bool {
        self.queued.contains(&(gx, gz))
    }

    /// Pops the first queued chunk whose per-chunk cooldown has elapsed.
    /// Chunks still cooling down rotate to the back of the queue.
    pub fn pop_due(&mut self, tick: u64) -> Option<(usize, usize)> {
        for _ in 0..self.queue.len() {
            let c = self.queue.pop_front()?;
            if self
                .last_built
                .get(&c)
                .is_none_or(|&t| tick.saturating_sub(t) >= self.min_interval)
            {
                self.queued.remove(&c);
                self.last_built.insert(c, tick);
                return Some(c);
            }
            self.queue.push_back(c);
        }
        None
    }

    /// Records a rebuild done outside the queue (immediate loads), so the
    /// cooldown still applies to subsequent edits.
    pub fn note_built(&mut self, gx: usize, gz: usize, tick: u64) {
        self.last_built.insert((gx, gz), tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rebuild_is_immediate_then_throttled() {
        let mut s = RebuildScheduler::default();
        s.mark(1, 1);
        assert_eq!(s.pop_due(0), Some((1, 1)));
        s.mark(1, 1);
        for tick in 1..REBUILD_INTERVAL_TICKS {
            assert_eq!(s.pop_due(tick), None);
        }
        assert_eq!(s.pop_due(REBUILD_INTERVAL_TICKS), Some((1, 1)));
    }

    #[test]
    fn marking_twice_queues_once() {
        let mut s = RebuildScheduler::default();
        s.mark(2, 3);
        s.mark(2, 3);
        assert_eq!(s.pop_due(0), Some((2, 3)));
        assert_eq!(s.pop_due(0), None);
    }

    #[test]
    fn cooled_chunk_does_not_starve_others() {
        let mut s = RebuildScheduler::default();
        s.mark(0, 0);
        assert_eq!(s.pop_due(0), Some((0, 0)));
        s.mark(0, 0);
        s.mark(4, 4);
        // (0,0) is cooling down; (4,4) should still come out this tick.
        assert_eq!(s.pop_due(1), Some((4, 4)));
        assert_eq!(s.pop_due(1), None);
    }
}
