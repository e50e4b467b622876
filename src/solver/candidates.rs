//! Exhaustive enumeration of possible secrets.
//!
//! A [`CandidateSpace`] lists every ordered sequence of `length` distinct
//! values from `[min, max)`, `P(max - min, length)` sequences in total. The
//! enumeration grows factorially with the domain, so it is built once per
//! settings value and shared read-only behind an [`Arc`]; agents copy it into
//! their own working list at the start of every round.
//!
//! [`CandidateCache`] memoises spaces per settings value and can be shared
//! across threads.

use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::game::GameSettings;

/// Upper bound on the up-front allocation for an enumeration.
const MAX_PREALLOCATED: usize = 1 << 20;

/// Every possible secret for one settings value, in canonical order.
///
/// Canonical order is lexicographic over ascending domain values: for
/// `{min: 0, max: 4, length: 2}` it starts `[0,1], [0,2], [0,3], [1,0]`.
#[derive(Debug, Clone)]
pub struct CandidateSpace {
    settings: GameSettings,
    candidates: Arc<[Vec<i32>]>,
}

impl CandidateSpace {
    /// Enumerate all candidates for `settings`.
    pub fn generate(settings: GameSettings) -> Self {
        let values: Vec<i32> = settings.values().collect();
        let expected = usize::try_from(settings.permutation_count()).unwrap_or(usize::MAX);

        let mut collector = Vec::with_capacity(expected.min(MAX_PREALLOCATED));
        let mut used = vec![false; values.len()];
        let mut buffer = Vec::with_capacity(settings.length());
        permute(&values, &mut used, &mut buffer, settings.length(), &mut collector);

        debug!(
            min = settings.min(),
            max = settings.max(),
            length = settings.length(),
            candidates = collector.len(),
            "generated candidate space"
        );

        Self {
            settings,
            candidates: collector.into(),
        }
    }

    /// Settings this space was generated for.
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the space is empty (never true for valid settings).
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// All candidates in canonical order.
    pub fn as_slice(&self) -> &[Vec<i32>] {
        &self.candidates
    }

    /// Iterate candidates in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &[i32]> {
        self.candidates.iter().map(Vec::as_slice)
    }

    /// Whether `sequence` is one of the candidates.
    pub fn contains(&self, sequence: &[i32]) -> bool {
        self.candidates
            .binary_search_by(|c| c.as_slice().cmp(sequence))
            .is_ok()
    }

    /// A fresh, independently mutable copy of every candidate.
    pub fn working_set(&self) -> Vec<Vec<i32>> {
        self.candidates.to_vec()
    }
}

/// Backtracking over positions: `used[i]` marks `values[i]` as taken by the
/// prefix in `buffer`. Both are restored before returning.
fn permute(
    values: &[i32],
    used: &mut [bool],
    buffer: &mut Vec<i32>,
    length: usize,
    collector: &mut Vec<Vec<i32>>,
) {
    if buffer.len() == length {
        collector.push(buffer.clone());
        return;
    }

    for (i, &value) in values.iter().enumerate() {
        if used[i] {
            continue;
        }
        used[i] = true;
        buffer.push(value);

        permute(values, used, buffer, length, collector);

        buffer.pop();
        used[i] = false;
    }
}

/// Candidate spaces memoised by settings value.
///
/// Reads take a shared lock; generation happens outside the lock so a slow
/// enumeration never blocks lookups of other settings. If two threads race
/// on the same settings the first insert wins.
#[derive(Debug, Default)]
pub struct CandidateCache {
    spaces: RwLock<FxHashMap<GameSettings, Arc<CandidateSpace>>>,
}

impl CandidateCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the space for `settings`, generating it on first use.
    pub fn get_or_generate(&self, settings: &GameSettings) -> Arc<CandidateSpace> {
        if let Some(space) = self.get(settings) {
            return space;
        }

        let generated = Arc::new(CandidateSpace::generate(*settings));
        let mut spaces = self.spaces.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(spaces.entry(*settings).or_insert(generated))
    }

    /// Return the space for `settings` if it was generated already.
    pub fn get(&self, settings: &GameSettings) -> Option<Arc<CandidateSpace>> {
        let spaces = self.spaces.read().unwrap_or_else(PoisonError::into_inner);
        spaces.get(settings).cloned()
    }

    /// Number of cached spaces.
    pub fn len(&self) -> usize {
        self.spaces.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached space.
    pub fn clear(&self) {
        self.spaces.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn settings(min: i32, max: i32, length: usize) -> GameSettings {
        GameSettings::new(min, max, length).unwrap()
    }

    #[test]
    fn test_small_space_in_canonical_order() {
        let space = CandidateSpace::generate(settings(0, 4, 2));
        let expected: Vec<Vec<i32>> = vec![
            vec![0, 1],
            vec![0, 2],
            vec![0, 3],
            vec![1, 0],
            vec![1, 2],
            vec![1, 3],
            vec![2, 0],
            vec![2, 1],
            vec![2, 3],
            vec![3, 0],
            vec![3, 1],
            vec![3, 2],
        ];
        assert_eq!(space.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_size_matches_permutation_count() {
        for (min, max, length) in [(0, 10, 4), (0, 6, 6), (-3, 3, 2), (5, 6, 1), (0, 8, 3)] {
            let s = settings(min, max, length);
            let space = CandidateSpace::generate(s);
            assert_eq!(space.len() as u128, s.permutation_count(), "{:?}", s);
        }
    }

    #[test]
    fn test_candidates_are_distinct_and_in_domain() {
        let s = settings(-2, 5, 3);
        let space = CandidateSpace::generate(s);

        let mut seen = FxHashSet::default();
        for candidate in space.iter() {
            assert_eq!(candidate.len(), 3);
            assert!(candidate.iter().all(|&v| s.contains(v)));
            let unique: FxHashSet<i32> = candidate.iter().copied().collect();
            assert_eq!(unique.len(), 3);
            assert!(seen.insert(candidate.to_vec()), "duplicate {:?}", candidate);
        }
    }

    #[test]
    fn test_canonical_order_is_sorted() {
        let space = CandidateSpace::generate(settings(0, 7, 3));
        assert!(space.as_slice().windows(2).all(|w| w[0] < w[1]));
        assert!(space.contains(&[6, 0, 5]));
        assert!(!space.contains(&[6, 6, 5]));
        assert!(!space.contains(&[7, 0, 5]));
    }

    #[test]
    fn test_working_set_is_independent() {
        let space = CandidateSpace::generate(settings(0, 4, 2));
        let mut working = space.working_set();
        working.retain(|c| c[0] == 3);
        assert_eq!(working.len(), 3);
        assert_eq!(space.len(), 12);
    }

    #[test]
    fn test_cache_generates_once() {
        let cache = CandidateCache::new();
        let s = settings(0, 5, 3);
        assert!(cache.get(&s).is_none());

        let first = cache.get_or_generate(&s);
        let second = cache.get_or_generate(&s);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        let other = cache.get_or_generate(&settings(0, 5, 2));
        assert_eq!(other.len(), 20);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_shared_between_threads() {
        let cache = Arc::new(CandidateCache::new());
        let s = settings(0, 6, 3);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_or_generate(&s).len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 120);
        }
        assert_eq!(cache.len(), 1);
    }
}
