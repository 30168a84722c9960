/// What happens to a single cell between two generations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Fate {
    Born,
    Died,
    Unchanged,
}

/// The number of distinct neighbour counts, `0..=8`
const COUNTS: usize = 9;
type FateTable = [[Fate; COUNTS]; 2];

/// Lookup table for the B3/S23 ruleset, indexed by `[alive][neighbours]`
const FATES: FateTable = generate_fates();

/// Builds the table behind [`fate`]
///
/// A live cell survives with 2 or 3 live neighbours and dies otherwise; a
/// dead cell is born with exactly 3.
const fn generate_fates() -> FateTable {
    let mut table = [[Fate::Unchanged; COUNTS]; 2];
    let mut n = 0;
    while n < COUNTS {
        table[0][n] = if n == 3 { Fate::Born } else { Fate::Unchanged };
        table[1][n] = if n < 2 || n > 3 { Fate::Died } else { Fate::Unchanged };
        n += 1;
    }
    table
}

#[inline]
pub(super) fn fate(alive: bool, neighbours: usize) -> Fate {
    debug_assert!(neighbours < COUNTS, "a cell has at most 8 neighbours");
    FATES[usize::from(alive)][neighbours]
}
