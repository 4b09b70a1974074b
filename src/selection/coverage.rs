//! Greedy maximum-coverage resolution.
//!
//! Given the requested codes and the candidate documents in recency order,
//! repeatedly pick the candidate covering the most still-uncovered codes.
//! Ties go to the candidate scanned first, so the outcome is fully
//! determined by the order the caller passes in.

use crate::document::{CodeSet, Document};

/// Anything that owns a set of codes and can be chosen to cover a query.
pub trait Coverable {
    fn codes(&self) -> &CodeSet;
}

impl Coverable for Document {
    fn codes(&self) -> &CodeSet {
        &self.codes
    }
}

impl<C: Coverable + ?Sized> Coverable for &C {
    fn codes(&self) -> &CodeSet {
        (**self).codes()
    }
}

/// One greedy iteration's winner.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverPick<'a, C> {
    pub candidate: &'a C,
    /// 1-based iteration number.
    pub round: usize,
    /// Target codes this pick removed from the uncovered set, in target order.
    pub covered: Vec<String>,
}

/// Outcome of one resolution. `picks` is in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage<'a, C> {
    pub picks: Vec<CoverPick<'a, C>>,
    pub uncovered: Vec<String>,
}

impl<'a, C> Coverage<'a, C> {
    pub fn selected(&self) -> impl Iterator<Item = &'a C> + '_ {
        self.picks.iter().map(|pick| pick.candidate)
    }

    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty()
    }
}

/// Select candidates greedily until every target code is covered or no
/// candidate adds anything.
///
/// `candidates` order is the tie-break order and is never re-sorted here.
pub fn resolve<'a, C: Coverable>(target: &CodeSet, candidates: &'a [C]) -> Coverage<'a, C> {
    let mut remaining = target.clone();
    let mut pool: Vec<&'a C> = candidates.iter().collect();
    let mut picks = Vec::new();

    while !remaining.is_empty() && !pool.is_empty() {
        let mut best: Option<(usize, usize)> = None;
        for (pos, candidate) in pool.iter().enumerate() {
            let gain = candidate
                .codes()
                .iter()
                .filter(|code| remaining.contains(code))
                .count();
            // Strict: an equal gain later in the pool never displaces the leader.
            if gain > best.map_or(0, |(_, best_gain)| best_gain) {
                best = Some((pos, gain));
            }
        }

        let Some((pos, gain)) = best else {
            break;
        };

        let winner = pool.remove(pos);
        let covered: Vec<String> = remaining
            .iter()
            .filter(|code| winner.codes().contains(code))
            .map(str::to_string)
            .collect();
        debug_assert_eq!(covered.len(), gain);

        for code in &covered {
            remaining.remove(code);
        }

        picks.push(CoverPick {
            candidate: winner,
            round: picks.len() + 1,
            covered,
        });
    }

    Coverage {
        picks,
        uncovered: remaining.to_vec(),
    }
}
