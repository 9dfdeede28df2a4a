//! Best-first search engine shared by A* and Dijkstra modes.
//!
//! The two modes differ only in the heuristic: A* steers by Chebyshev
//! distance times the cheapest step cost (admissible, integer arithmetic
//! only), Dijkstra runs with a zero heuristic and floods outward, which is
//! what makes combined multi-target searches cheap.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use arrayvec::ArrayVec;

use crate::object::{ObjectKind, StructureKind};
use crate::position::{Direction, Position, RoomName};
use crate::room::WorldSnapshot;
use crate::terrain::Terrain;

use super::{Path, PathOptions, PathStep};

/// Roads force this step cost unless the search ignores them.
const ROAD_COST: u32 = 1;

fn chebyshev(a: (i32, i32), b: (i32, i32)) -> u32 {
    let dx = (a.0 - b.0).unsigned_abs();
    let dy = (a.1 - b.1).unsigned_abs();
    dx.max(dy)
}

struct Search<'a> {
    world: &'a WorldSnapshot,
    options: &'a PathOptions,
    goal_worlds: Vec<(i32, i32)>,
    // A target's own cell never blocks on account of the entities standing
    // on it, otherwise paths to creeps or spawns could never terminate.
    goal_cells: BTreeSet<Position>,
    use_heuristic: bool,
    min_step_cost: u32,
}

struct Outcome {
    /// Index of the reached goal, `None` when the search fell short.
    reached: Option<usize>,
    /// Node to reconstruct the (possibly partial) path to.
    end: Position,
    cost: u32,
    ops_used: u32,
    parents: BTreeMap<Position, (Position, Direction)>,
}

impl<'a> Search<'a> {
    fn new(
        world: &'a WorldSnapshot,
        options: &'a PathOptions,
        goals: &[Position],
        use_heuristic: bool,
    ) -> Self {
        let min_step_cost = if options.ignore_roads {
            options.plain_cost.min(options.swamp_cost)
        } else {
            ROAD_COST.min(options.plain_cost).min(options.swamp_cost)
        };
        Self {
            world,
            options,
            goal_worlds: goals.iter().map(|g| g.world_xy()).collect(),
            goal_cells: goals.iter().copied().collect(),
            use_heuristic,
            min_step_cost,
        }
    }

    /// Linear distance (beyond `range`) to the nearest goal.
    fn goal_distance(&self, position: Position) -> u32 {
        let p = position.world_xy();
        self.goal_worlds
            .iter()
            .map(|&g| chebyshev(p, g).saturating_sub(self.options.range))
            .min()
            .unwrap_or(0)
    }

    fn heuristic(&self, position: Position) -> u64 {
        if !self.use_heuristic {
            return 0;
        }
        u64::from(self.goal_distance(position)) * u64::from(self.min_step_cost)
    }

    /// First goal (in input order) the position satisfies, if any.
    fn satisfied_goal(&self, position: Position) -> Option<usize> {
        let p = position.world_xy();
        self.goal_worlds
            .iter()
            .position(|&g| chebyshev(p, g) <= self.options.range)
    }

    /// Cost of stepping onto a cell, `None` when impassable.
    fn cell_cost(&self, position: Position) -> Option<u32> {
        let Some(room) = self.world.room(position.room()) else {
            // Rooms without visibility are traversed blind at plain cost.
            return Some(self.options.plain_cost);
        };
        let terrain = room.terrain_at(position)?;
        let mut cost = match terrain {
            Terrain::Plain => self.options.plain_cost,
            Terrain::Swamp => self.options.swamp_cost,
            Terrain::Wall => return None,
        };
        let is_goal_cell = self.goal_cells.contains(&position);
        for object in room.objects_at(position) {
            match &object.kind {
                ObjectKind::Creep { .. } => {
                    if !self.options.ignore_creeps && !is_goal_cell {
                        return None;
                    }
                }
                ObjectKind::Structure(StructureKind::Road) => {
                    if !self.options.ignore_roads {
                        cost = ROAD_COST;
                    }
                }
                ObjectKind::Structure(kind) if kind.is_walkable() => {}
                ObjectKind::Structure(kind) => {
                    let passable = is_goal_cell
                        || (self.options.ignore_destructible_structures
                            && kind.is_destructible());
                    if !passable {
                        return None;
                    }
                }
                ObjectKind::Flag { .. } | ObjectKind::ConstructionSite(_) => {}
            }
        }
        Some(cost)
    }

    fn run(&self, origin: Position) -> Outcome {
        let mut parents = BTreeMap::new();
        if let Some(index) = self.satisfied_goal(origin) {
            return Outcome {
                reached: Some(index),
                end: origin,
                cost: 0,
                ops_used: 0,
                parents,
            };
        }

        let mut g_scores: BTreeMap<Position, u32> = BTreeMap::new();
        g_scores.insert(origin, 0);
        let mut open: BinaryHeap<Reverse<(u64, u64, Position)>> = BinaryHeap::new();
        let mut seq: u64 = 0;
        open.push(Reverse((self.heuristic(origin), seq, origin)));
        let mut closed: BTreeSet<Position> = BTreeSet::new();
        let mut rooms_entered: BTreeSet<RoomName> = BTreeSet::new();
        rooms_entered.insert(origin.room());

        let mut ops_used: u32 = 0;
        // Closest approach so far, for partial results: (distance, cost, node).
        let mut best = (self.goal_distance(origin), 0, origin);
        // Cheapest goal settled so far: (index, cost, node).
        let mut winner: Option<(usize, u32, Position)> = None;

        while let Some(Reverse((f, _, position))) = open.pop() {
            if let Some((_, winner_cost, _)) = winner {
                // The heuristic never overestimates, so once every open f
                // exceeds the winner's cost no cheaper goal can surface.
                if f > u64::from(winner_cost) {
                    break;
                }
            }
            if !closed.insert(position) {
                continue;
            }
            let g = g_scores[&position];

            if let Some(index) = self.satisfied_goal(position) {
                let better = match winner {
                    None => true,
                    Some((winner_index, winner_cost, _)) => {
                        g < winner_cost || (g == winner_cost && index < winner_index)
                    }
                };
                if better {
                    winner = Some((index, g, position));
                }
                // Goal nodes are never expanded; any farther goal routed
                // through this cell would cost strictly more.
                continue;
            }

            let distance = self.goal_distance(position);
            if distance < best.0 || (distance == best.0 && g < best.1) {
                best = (distance, g, position);
            }

            ops_used += 1;
            if ops_used >= self.options.max_ops {
                break;
            }

            let mut neighbors: ArrayVec<(Position, Direction, u32), 8> = ArrayVec::new();
            for direction in Direction::ALL {
                let Some(next) = position.step(direction) else {
                    continue;
                };
                if closed.contains(&next) {
                    continue;
                }
                let unseen_room = !rooms_entered.contains(&next.room());
                if unseen_room && rooms_entered.len() >= usize::from(self.options.max_rooms) {
                    continue;
                }
                if let Some(cost) = self.cell_cost(next) {
                    if unseen_room {
                        rooms_entered.insert(next.room());
                    }
                    neighbors.push((next, direction, cost));
                }
            }

            for (next, direction, cost) in neighbors {
                let tentative = g.saturating_add(cost);
                if g_scores.get(&next).is_none_or(|&old| tentative < old) {
                    g_scores.insert(next, tentative);
                    parents.insert(next, (position, direction));
                    seq += 1;
                    open.push(Reverse((
                        u64::from(tentative) + self.heuristic(next),
                        seq,
                        next,
                    )));
                }
            }
        }

        match winner {
            Some((index, cost, end)) => Outcome {
                reached: Some(index),
                end,
                cost,
                ops_used,
                parents,
            },
            None => Outcome {
                reached: None,
                end: best.2,
                cost: best.1,
                ops_used,
                parents,
            },
        }
    }

    fn into_path(self, origin: Position, outcome: Outcome) -> Path {
        let mut reversed: Vec<PathStep> = Vec::new();
        let mut cursor = outcome.end;
        while cursor != origin {
            let Some(&(parent, direction)) = outcome.parents.get(&cursor) else {
                break;
            };
            let (dx, dy) = direction.delta();
            reversed.push(PathStep {
                x: cursor.x(),
                y: cursor.y(),
                dx,
                dy,
                direction,
            });
            cursor = parent;
        }
        reversed.reverse();
        Path {
            steps: reversed,
            cost: outcome.cost,
            ops_used: outcome.ops_used,
            incomplete: outcome.reached.is_none(),
        }
    }
}

/// Path from `origin` to within `options.range` of `goal`.
pub(crate) fn search_path(
    origin: Position,
    goal: Position,
    world: &WorldSnapshot,
    options: &PathOptions,
    use_heuristic: bool,
) -> Path {
    let goals = [goal];
    let search = Search::new(world, options, &goals, use_heuristic);
    let outcome = search.run(origin);
    search.into_path(origin, outcome)
}

/// Combined multi-target search; returns the index of the cheapest-reached
/// goal, ties broken by input order.
pub(crate) fn search_closest(
    origin: Position,
    goals: &[Position],
    world: &WorldSnapshot,
    options: &PathOptions,
    use_heuristic: bool,
) -> Option<usize> {
    Search::new(world, options, goals, use_heuristic)
        .run(origin)
        .reached
}
