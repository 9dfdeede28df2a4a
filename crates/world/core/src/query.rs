//! Spatial queries over candidate sets.
//!
//! All entry points take candidate iterators of positioned values; predicate
//! filtering composes through ordinary iterator adapters before the call.
//! "No match" is `None`/empty, never an error. Ties always resolve to the
//! first-encountered candidate, so results are stable in input order.

use crate::path::{self, PathAlgorithm, PathOptions, PathOptionsError};
use crate::position::{Position, Positioned};
use crate::room::WorldSnapshot;

// Auto algorithm selection: Dijkstra's flood fill beats per-target A* once
// the target set grows or the nearest target is already close.
const DIJKSTRA_TARGET_THRESHOLD: usize = 4;
const DIJKSTRA_NEARBY_RANGE: u32 = 4;

/// All candidates within `range` cells of `origin`, in input order.
///
/// Candidates in other rooms are never in linear range. No implicit sort.
pub fn find_in_range<'a, T, I>(origin: Position, candidates: I, range: u32) -> Vec<&'a T>
where
    T: Positioned,
    I: IntoIterator<Item = &'a T>,
{
    candidates
        .into_iter()
        .filter(|candidate| origin.in_range_to(*candidate, range))
        .collect()
}

/// The candidate with the least linear range to `origin`.
///
/// Ties break to the first-encountered candidate; an empty (or entirely
/// cross-room) candidate set yields `None`.
pub fn find_closest_by_range<'a, T, I>(origin: Position, candidates: I) -> Option<&'a T>
where
    T: Positioned,
    I: IntoIterator<Item = &'a T>,
{
    let mut best: Option<(&'a T, u32)> = None;
    for candidate in candidates {
        let Ok(range) = origin.range_to(candidate) else {
            continue;
        };
        // Strict `<` keeps the first-encountered candidate on ties.
        if best.is_none_or(|(_, best_range)| range < best_range) {
            best = Some((candidate, range));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// The candidate with the cheapest path from `origin`.
///
/// Runs a combined multi-target search (or one A* per candidate, depending
/// on the resolved algorithm) and returns the candidate whose path costs the
/// least; ties break to the first-encountered. Unreachable candidates are
/// skipped; if none is reachable the result is `None`.
pub fn find_closest_by_path<'a, T, I>(
    origin: Position,
    candidates: I,
    world: &WorldSnapshot,
    options: &PathOptions,
) -> Result<Option<&'a T>, PathOptionsError>
where
    T: Positioned,
    I: IntoIterator<Item = &'a T>,
{
    options.validate()?;

    let candidates: Vec<&'a T> = candidates.into_iter().collect();
    if candidates.is_empty() {
        return Ok(None);
    }
    let goals: Vec<Position> = candidates.iter().map(|c| c.pos()).collect();

    let index = match resolve_algorithm(origin, &goals, options.algorithm) {
        PathAlgorithm::Dijkstra => path::search_closest(origin, &goals, world, options, false),
        _ => path::search_closest(origin, &goals, world, options, true),
    };
    Ok(index.map(|i| candidates[i]))
}

/// Resolves `Auto` into a concrete algorithm from the shape of the target
/// set. A performance hint only; both algorithms return the same winner.
fn resolve_algorithm(origin: Position, goals: &[Position], requested: PathAlgorithm) -> PathAlgorithm {
    match requested {
        PathAlgorithm::Auto => {
            let nearby = goals
                .iter()
                .any(|goal| origin.in_range_to(goal, DIJKSTRA_NEARBY_RANGE));
            if goals.len() >= DIJKSTRA_TARGET_THRESHOLD || nearby {
                PathAlgorithm::Dijkstra
            } else {
                PathAlgorithm::AStar
            }
        }
        explicit => explicit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::RoomName;
    use crate::room::RoomSnapshot;

    fn name() -> RoomName {
        "W1N1".parse().unwrap()
    }

    fn pos_at(x: u8, y: u8) -> Position {
        Position::new(x, y, name()).unwrap()
    }

    fn world() -> WorldSnapshot {
        WorldSnapshot::from_rooms([RoomSnapshot::empty(name())])
    }

    #[test]
    fn find_in_range_preserves_input_order() {
        let candidates = [pos_at(0, 0), pos_at(5, 5), pos_at(1, 1)];
        let found = find_in_range(pos_at(0, 0), &candidates, 2);
        assert_eq!(found, vec![&candidates[0], &candidates[2]]);
    }

    #[test]
    fn find_in_range_skips_other_rooms() {
        let foreign = Position::new(0, 0, "W2N1".parse().unwrap()).unwrap();
        let candidates = [foreign, pos_at(1, 1)];
        let found = find_in_range(pos_at(0, 0), &candidates, 30);
        assert_eq!(found, vec![&candidates[1]]);
    }

    #[test]
    fn closest_by_range_of_nothing_is_none() {
        let candidates: [Position; 0] = [];
        assert_eq!(find_closest_by_range(pos_at(0, 0), &candidates), None);
    }

    #[test]
    fn closest_by_range_breaks_ties_first_encountered() {
        let candidates = [pos_at(2, 0), pos_at(0, 2), pos_at(1, 0)];
        let closest = find_closest_by_range(pos_at(0, 0), &candidates).unwrap();
        assert_eq!(closest, &candidates[2]);

        // Equal ranges: the earlier candidate wins.
        let tied = [pos_at(3, 0), pos_at(0, 3)];
        assert_eq!(
            find_closest_by_range(pos_at(0, 0), &tied),
            Some(&tied[0])
        );
    }

    #[test]
    fn in_range_set_contains_the_closest_when_reachable() {
        let candidates = [pos_at(4, 4), pos_at(2, 2), pos_at(9, 9)];
        let closest = find_closest_by_range(pos_at(0, 0), &candidates).unwrap();
        let in_range = find_in_range(pos_at(0, 0), &candidates, 4);
        assert!(in_range.contains(&closest));
    }

    #[test]
    fn closest_by_path_of_nothing_is_none() {
        let world = world();
        let candidates: [Position; 0] = [];
        let closest =
            find_closest_by_path(pos_at(0, 0), &candidates, &world, &PathOptions::default());
        assert_eq!(closest.unwrap(), None);
    }

    #[test]
    fn closest_by_path_agrees_across_algorithms_on_open_ground() {
        let world = world();
        let candidates = [pos_at(20, 20), pos_at(6, 6), pos_at(30, 5)];
        for algorithm in [
            PathAlgorithm::Auto,
            PathAlgorithm::AStar,
            PathAlgorithm::Dijkstra,
        ] {
            let options = PathOptions {
                algorithm,
                ..PathOptions::default()
            };
            let closest = find_closest_by_path(pos_at(5, 5), &candidates, &world, &options)
                .unwrap()
                .unwrap();
            assert_eq!(closest, &candidates[1], "algorithm {algorithm:?}");
        }
    }

    #[test]
    fn closest_by_path_rejects_invalid_options() {
        let world = world();
        let candidates = [pos_at(1, 1)];
        let options = PathOptions {
            plain_cost: 0,
            ..PathOptions::default()
        };
        assert!(find_closest_by_path(pos_at(0, 0), &candidates, &world, &options).is_err());
    }
}
