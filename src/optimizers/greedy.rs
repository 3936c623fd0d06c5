//! 贪心最佳优先构造
//!
//! 从起点出发，每一步把所有未访问城市按到当前城市的距离打分，走向分数最低的那个；全部访问完之后回到起点。
//! 每一步都记录完整的候选列表，前端据此逐步回放。

use super::{Solver, SolverRun};
use crate::context::Context;
use crate::interfaces::Interface;
use crate::results::{Neighbor, Step};

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyBestFirst;

impl Solver for GreedyBestFirst {
    fn name(&self) -> &'static str {
        "GBFS"
    }

    fn solve(&self, context: &Context, _interface: &dyn Interface) -> SolverRun {
        let size = context.len();
        if size < 2 {
            return SolverRun::default();
        }
        let matrix = &context.matrix;
        // 候选城市总是按输入顺序排列，距离相同时取序号最小者
        let mut unvisited: Vec<usize> = (1..size).collect();
        let mut path = vec![0];
        let mut current = 0;
        let mut trace = Vec::with_capacity(size);
        while let Some(next) = matrix.nearest(current, unvisited.iter().copied()) {
            let neighbors = unvisited
                .iter()
                .map(|&city| Neighbor {
                    name: context.name(city).to_string(),
                    h: matrix.get(current, city),
                })
                .collect();
            trace.push(Step::new(
                trace.len() + 1,
                context.name(current),
                neighbors,
                context.name(next),
                context.names(&path),
            ));
            unvisited.retain(|&city| city != next);
            path.push(next);
            current = next;
        }
        path.push(0);
        trace.push(Step::new(
            trace.len() + 1,
            context.name(current),
            vec![],
            context.name(0),
            context.names(&path),
        ));
        SolverRun {
            distance: matrix.path_length(&path),
            tour: path,
            trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::City;

    struct Silent;

    impl Interface for Silent {
        fn post(&self, _message: crate::interfaces::Message) {}
    }

    #[test]
    fn walks_to_nearest_city_first() {
        let context = Context::new(vec![
            City::new("A", 0.0, 0.0),
            City::new("D", 0.0, 3.0),
            City::new("B", 0.0, 1.0),
            City::new("C", 0.0, 2.0),
        ]);
        let run = GreedyBestFirst.solve(&context, &Silent);
        assert_eq!(context.names(&run.tour), ["A", "B", "C", "D", "A"]);
        assert_eq!(run.trace.len(), 4);
        assert_eq!(run.trace[0].partial_path, ["A"]);
        assert_eq!(run.trace[0].chosen_city, "B");
        let last = &run.trace[3];
        assert!(last.neighbors.is_empty());
        assert_eq!(last.current_city, "D");
        assert_eq!(last.chosen_edge.to, "A");
        assert_eq!(last.partial_path, ["A", "B", "C", "D", "A"]);
    }

    #[test]
    fn single_city_yields_empty_run() {
        let context = Context::new(vec![City::new("A", 0.0, 0.0)]);
        let run = GreedyBestFirst.solve(&context, &Silent);
        assert!(run.tour.is_empty());
        assert!(run.trace.is_empty());
        assert_eq!(run.distance, 0.0);
    }
}
