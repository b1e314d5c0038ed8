//! Exhaustive enumeration of hidden-card layouts
//!
//! [`Multinomial`] walks every way of splitting `0..n` into groups of given
//! sizes. [`Handoff`] runs that walk on a producer thread and hands each
//! partition over a rendezvous channel, so the consumer pulls one at a time
//! and may stop whenever it likes.

use std::sync::mpsc::{sync_channel, Receiver};
use std::thread::{self, JoinHandle};

use super::deal::Deal;
use super::determinize::Unknowns;
use super::state::State;

/// One way of splitting the index pool, a group per requested size
pub type Partition = Vec<Vec<usize>>;

/// k-of-n index combinations in lexicographic order
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Combinations {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        // Rightmost index that can still move up
        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                break;
            }
        }
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// One group choice in the partition walk
#[derive(Clone, Debug)]
struct Level {
    pool: Vec<usize>,
    combos: Combinations,
    group: Vec<usize>,
    rest: Vec<usize>,
}

impl Level {
    fn new(pool: Vec<usize>, size: usize) -> Option<Self> {
        let mut level = Level {
            combos: Combinations::new(pool.len(), size),
            pool,
            group: Vec::new(),
            rest: Vec::new(),
        };
        level.advance().then_some(level)
    }

    /// Move to the next combination of the pool; false when exhausted
    fn advance(&mut self) -> bool {
        let Some(combo) = self.combos.next() else {
            return false;
        };
        let mut taken = vec![false; self.pool.len()];
        for &i in &combo {
            taken[i] = true;
        }
        self.group = combo.iter().map(|&i| self.pool[i]).collect();
        self.rest = self
            .pool
            .iter()
            .zip(&taken)
            .filter(|&(_, &t)| !t)
            .map(|(&v, _)| v)
            .collect();
        true
    }
}

/// Lazy iterator over every partition of `0..sum(sizes)` into groups of the
/// given sizes. The first group takes each combination of the pool in turn
/// and the remaining groups partition what is left; the last group takes
/// the remainder.
#[derive(Clone, Debug)]
pub struct Multinomial {
    sizes: Vec<usize>,
    levels: Vec<Level>,
    started: bool,
    done: bool,
}

impl Multinomial {
    pub fn new(sizes: &[usize]) -> Self {
        Multinomial {
            sizes: sizes.to_vec(),
            levels: Vec::with_capacity(sizes.len().saturating_sub(1)),
            started: false,
            done: false,
        }
    }

    /// Rebuild the levels below `depth` from the first combination of each
    fn fill_from(&mut self, depth: usize, mut pool: Vec<usize>) -> bool {
        self.levels.truncate(depth);
        for d in depth..self.sizes.len() - 1 {
            let Some(level) = Level::new(pool, self.sizes[d]) else {
                return false;
            };
            pool = level.rest.clone();
            self.levels.push(level);
        }
        true
    }

    fn current(&self) -> Partition {
        let mut groups: Partition = self.levels.iter().map(|l| l.group.clone()).collect();
        let last = match self.levels.last() {
            Some(level) => level.rest.clone(),
            None => (0..self.sizes.iter().sum::<usize>()).collect(),
        };
        groups.push(last);
        groups
    }
}

impl Iterator for Multinomial {
    type Item = Partition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.sizes.is_empty() {
            self.done = true;
            return Some(Vec::new());
        }

        if !self.started {
            self.started = true;
            let total: usize = self.sizes.iter().sum();
            if !self.fill_from(0, (0..total).collect()) {
                self.done = true;
                return None;
            }
            return Some(self.current());
        }

        // Advance the deepest level that still has combinations left
        for depth in (0..self.levels.len()).rev() {
            if self.levels[depth].advance() {
                let rest = self.levels[depth].rest.clone();
                if self.fill_from(depth + 1, rest) {
                    return Some(self.current());
                }
            }
        }
        self.done = true;
        None
    }
}

fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u64, |acc, i| acc * (n - i) as u64 / (i + 1) as u64)
}

/// Number of partitions [`Multinomial`] yields for `sizes`
pub fn multinomial_coefficient(sizes: &[usize]) -> u64 {
    let mut n: usize = sizes.iter().sum();
    let mut count = 1;
    for &k in sizes {
        count *= binomial(n, k);
        n -= k;
    }
    count
}

/// Partitions produced on another thread, one at a time.
///
/// The channel has no buffer: the producer blocks until each partition is
/// taken. Dropping the handoff disconnects the channel, the producer's next
/// send fails and its thread exits.
pub struct Handoff {
    receiver: Option<Receiver<Partition>>,
    producer: Option<JoinHandle<()>>,
}

/// Start enumerating the partitions for `sizes` on a producer thread
pub fn spawn_multinomial(sizes: &[usize]) -> Handoff {
    let sizes = sizes.to_vec();
    Handoff::spawn(move || Multinomial::new(&sizes))
}

impl Handoff {
    /// Run the iterator built by `source` on a producer thread
    fn spawn<F, I>(source: F) -> Self
    where
        F: FnOnce() -> I + Send + 'static,
        I: Iterator<Item = Partition>,
    {
        let (sender, receiver) = sync_channel(0);
        let producer = thread::spawn(move || {
            for partition in source() {
                if sender.send(partition).is_err() {
                    break;
                }
            }
        });
        Handoff {
            receiver: Some(receiver),
            producer: Some(producer),
        }
    }
}

impl Iterator for Handoff {
    type Item = Partition;

    /// Panics with the producer's panic if it died before finishing
    fn next(&mut self) -> Option<Self::Item> {
        match self.receiver.as_ref()?.recv() {
            Ok(partition) => Some(partition),
            Err(_) => {
                self.receiver = None;
                if let Some(producer) = self.producer.take() {
                    if let Err(payload) = producer.join() {
                        std::panic::resume_unwind(payload);
                    }
                }
                None
            }
        }
    }
}

impl Drop for Handoff {
    fn drop(&mut self) {
        // Receiver first, so a producer blocked in send wakes up and exits
        self.receiver.take();
        if let Some(producer) = self.producer.take() {
            let _ = producer.join();
        }
    }
}

/// Every complete deal consistent with seat 0's view of `state`.
///
/// Deals where a seat holds a suit it showed out of are skipped. `state`
/// must pass [`State::validate`].
pub fn enumerate_deals(state: &State) -> impl Iterator<Item = Deal> {
    let unknowns = Unknowns::from_state(state);
    spawn_multinomial(&unknowns.quotas).filter_map(move |partition| {
        let groups = unknowns.groups_of(partition);
        unknowns
            .satisfies(&groups)
            .then(|| unknowns.complete(groups))
    })
}
