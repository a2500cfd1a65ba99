//! Routing trait and default shortest-path implementation.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ct_core::ModuleId;

use crate::{Direction, ModuleGraph, RoutingError, RoutingResult};

/// The first step of a route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hop {
    /// Side of the current module to hand the box over on.
    pub direction: Direction,
    pub next: ModuleId,
    pub next_name: String,
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable path finder over a [`ModuleGraph`].
pub trait Router: Send + Sync {
    /// Modules from `from` to `to`, both included.
    fn path(&self, graph: &ModuleGraph, from: ModuleId, to: ModuleId) -> RoutingResult<Vec<ModuleId>>;

    /// Direction and neighbour for the first step from module `from` towards
    /// module `to`, both given by name.
    fn next_hop(&self, graph: &ModuleGraph, from: &str, to: &str) -> RoutingResult<Hop> {
        if from == to {
            return Err(RoutingError::SameModule(from.to_owned()));
        }
        let f = graph.id(from).ok_or_else(|| RoutingError::UnknownModule(from.to_owned()))?;
        let t = graph.id(to).ok_or_else(|| RoutingError::UnknownModule(to.to_owned()))?;

        let path = self.path(graph, f, t)?;
        let no_route = || RoutingError::NoRoute { from: from.to_owned(), to: to.to_owned() };
        let &next = path.get(1).ok_or_else(no_route)?;
        let direction = graph.direction(f, next).ok_or_else(no_route)?;
        Ok(Hop { direction, next, next_name: graph.name(next).to_owned() })
    }
}

// ── ShortestPathRouter ────────────────────────────────────────────────────────

/// Dijkstra with unit link cost.
///
/// Among equally short paths the one found first wins; the heap orders by
/// `(hops, ModuleId)` and neighbours are scanned in ascending id order, so
/// the choice is deterministic.
pub struct ShortestPathRouter;

impl Router for ShortestPathRouter {
    fn path(&self, graph: &ModuleGraph, from: ModuleId, to: ModuleId) -> RoutingResult<Vec<ModuleId>> {
        let n = graph.module_count();
        let mut dist = vec![u32::MAX; n];
        let mut prev = vec![ModuleId::INVALID; n];
        dist[from.index()] = 0;

        let mut heap: BinaryHeap<Reverse<(u32, ModuleId)>> = BinaryHeap::new();
        heap.push(Reverse((0, from)));

        while let Some(Reverse((cost, module))) = heap.pop() {
            if module == to {
                return Ok(reconstruct(&prev, from, to));
            }
            // Skip stale heap entries.
            if cost > dist[module.index()] {
                continue;
            }
            for (neighbour, _) in graph.neighbours(module) {
                let next_cost = cost + 1;
                if next_cost < dist[neighbour.index()] {
                    dist[neighbour.index()] = next_cost;
                    prev[neighbour.index()] = module;
                    heap.push(Reverse((next_cost, neighbour)));
                }
            }
        }

        Err(RoutingError::NoRoute {
            from: graph.name(from).to_owned(),
            to:   graph.name(to).to_owned(),
        })
    }
}

fn reconstruct(prev: &[ModuleId], from: ModuleId, to: ModuleId) -> Vec<ModuleId> {
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        path.push(cur);
    }
    path.reverse();
    path
}
