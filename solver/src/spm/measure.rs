use std::cmp::Ordering;
use std::mem::size_of;

use crate::error::SolveError;
use crate::game::{Arena, Player, VertexId};
use crate::{Map, Set};

/// Value of a vertex in a progress measure.
///
/// Finite measures have one counter per distinct priority of the counted
/// player's parity, lowest first. They are compared starting from the
/// counter of the highest priority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Measure {
    Finite(Box<[u32]>),
    Top,
}

impl Measure {
    pub fn is_top(&self) -> bool {
        matches!(self, Measure::Top)
    }
}

impl PartialOrd for Measure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Measure {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Measure::Top, Measure::Top) => Ordering::Equal,
            (Measure::Top, Measure::Finite(_)) => Ordering::Greater,
            (Measure::Finite(_), Measure::Top) => Ordering::Less,
            (Measure::Finite(a), Measure::Finite(b)) => Iterator::cmp(a.iter().rev(), b.iter().rev()),
        }
    }
}

/// Where a priority sits among the counters of a [`MeasureSpace`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Level {
    /// First counter of a priority not lower than this one.
    slot: usize,
    /// Whether the priority owns the counter at `slot`.
    counted: bool,
}

/// The measures available to one lifting run.
///
/// Only the priorities present in the subgame matter, and only through their
/// order and parity, so each distinct priority of the counted player's parity
/// gets one counter. A counter may not exceed the number of vertices with its
/// priority, and when a size bound is given the counters may not sum up to
/// more than it. Anything beyond that is `Top`.
#[derive(Debug)]
pub struct MeasureSpace {
    counted: Player,
    levels: Map<usize, Level>,
    ceilings: Box<[u32]>,
    size_bound: Option<usize>,
}

impl MeasureSpace {
    pub fn new(
        arena: &Arena,
        subgame: &Set<VertexId>,
        counted: Player,
        size_bound: Option<usize>,
    ) -> Result<Self, SolveError> {
        let mut priorities = subgame.iter().map(|&v| arena.priority_of(v)).collect::<Vec<_>>();
        priorities.sort_unstable();

        let mut levels = Map::default();
        let mut ceilings = Vec::new();
        for run in priorities.chunk_by(|a, b| a == b) {
            let counted_here = Player::of_priority(run[0]) == counted;
            levels.insert(run[0], Level { slot: ceilings.len(), counted: counted_here });

            if counted_here {
                let ceiling = u32::try_from(run.len())
                    .map_err(|_| SolveError::ArenaTooLarge { vertices: subgame.len(), priorities: levels.len() })?;
                ceilings.push(ceiling);
            }
        }

        table_size(subgame.len(), ceilings.len())?;

        Ok(Self { counted, levels, ceilings: ceilings.into_boxed_slice(), size_bound })
    }

    pub fn counted(&self) -> Player {
        self.counted
    }

    pub fn counters(&self) -> usize {
        self.ceilings.len()
    }

    pub fn zero(&self) -> Measure {
        Measure::Finite(vec![0; self.ceilings.len()].into_boxed_slice())
    }

    /// The level of a priority present in the subgame this space was built for.
    pub fn level(&self, priority: usize) -> Level {
        match self.levels.get(&priority) {
            Some(&level) => level,
            None => unreachable!("priority {priority} isn't in the measured subgame"),
        }
    }

    /// Least measure that a vertex at the given level needs when its chosen
    /// successor has measure `m`.
    ///
    /// Counters of lower priorities are irrelevant and reset. If the priority
    /// favours the counted player the result must also be strictly bigger on
    /// the remaining counters, which may overflow to `Top`.
    pub fn prog(&self, level: Level, m: &Measure) -> Measure {
        let Measure::Finite(m) = m else { return Measure::Top };

        let mut next = m.clone();
        next[..level.slot].fill(0);

        if !level.counted {
            return Measure::Finite(next);
        }

        let mut rest = next[level.slot..].iter().map(|&c| c as usize).sum::<usize>();
        for i in level.slot..next.len() {
            rest -= next[i] as usize;

            let fits_ceiling = next[i] < self.ceilings[i];
            let fits_bound = self.size_bound.map_or(true, |b| rest + next[i] as usize + 1 <= b);
            if fits_ceiling && fits_bound {
                next[i] += 1;
                return Measure::Finite(next);
            }

            next[i] = 0;
        }

        Measure::Top
    }
}

/// Bytes needed to give `vertices` measures of `counters` counters each.
pub fn table_size(vertices: usize, counters: usize) -> Result<usize, SolveError> {
    let bytes = vertices.checked_mul(counters).and_then(|n| n.checked_mul(size_of::<u32>()));
    match bytes {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(bytes),
        _ => Err(SolveError::ArenaTooLarge { vertices, priorities: counters }),
    }
}
