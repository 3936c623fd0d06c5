//! 参考解：最近邻构造加 2-opt 局部搜索
//!
//! 参考解只用于给其他求解方法打分，本身不发送任何消息，也不记录轨迹。

use crate::distance::DistanceMatrix;
use crate::tour::close;

/// 2-opt 只接受改进量超过该阈值的交换，避免浮点误差导致死循环
const IMPROVEMENT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTour {
    /// 闭合环路，起点在末尾重复
    pub tour: Vec<usize>,
    pub distance: f64,
}

/// 从 0 号城市出发，每次走向最近的未访问城市，返回开放序列
pub fn nearest_neighbor_tour(matrix: &DistanceMatrix) -> Vec<usize> {
    let size = matrix.size();
    if size == 0 {
        return vec![];
    }
    let mut order = Vec::with_capacity(size);
    let mut unvisited: Vec<usize> = (1..size).collect();
    let mut current = 0;
    order.push(current);
    while let Some(next) = matrix.nearest(current, unvisited.iter().copied()) {
        unvisited.retain(|&city| city != next);
        order.push(next);
        current = next;
    }
    order
}

/// 首次改进的 2-opt：找到任何一个改进就立即翻转，然后从头重新扫描，直到没有改进
///
/// 0 号位置不参与翻转，因此起点保持不变。翻转 `order[i..=j]` 会去掉边 `(i-1, i)`
/// 和 `(j, j+1)`；`i = 1, j = n-1` 时两条边都连着起点，翻转不改变环路，故跳过。
pub fn two_opt(matrix: &DistanceMatrix, order: &[usize]) -> Vec<usize> {
    let mut order = order.to_vec();
    let n = order.len();
    if n < 4 {
        return order;
    }
    'scan: loop {
        for i in 1..n - 1 {
            for j in i + 1..n {
                if i == 1 && j == n - 1 {
                    continue;
                }
                let (a, b) = (order[i - 1], order[i]);
                let (c, d) = (order[j], order[(j + 1) % n]);
                let delta = matrix.get(a, c) + matrix.get(b, d) - matrix.get(a, b) - matrix.get(c, d);
                if delta < -IMPROVEMENT_EPSILON {
                    order[i..=j].reverse();
                    continue 'scan;
                }
            }
        }
        break;
    }
    order
}

/// 最近邻与 2-opt 两者中较短的那个
pub fn reference_tour(matrix: &DistanceMatrix) -> ReferenceTour {
    if matrix.size() < 2 {
        return ReferenceTour {
            tour: vec![],
            distance: 0.0,
        };
    }
    let greedy = nearest_neighbor_tour(matrix);
    let improved = two_opt(matrix, &greedy);
    let greedy_length = matrix.cycle_length(&greedy);
    let improved_length = matrix.cycle_length(&improved);
    let (order, distance) = if improved_length < greedy_length {
        (improved, improved_length)
    } else {
        (greedy, greedy_length)
    };
    ReferenceTour {
        tour: close(&order),
        distance,
    }
}

pub fn reference_distance(matrix: &DistanceMatrix) -> f64 {
    reference_tour(matrix).distance
}
