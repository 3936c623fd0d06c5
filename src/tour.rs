//! 环路的表示
//!
//! 所有求解方法输出的环路都是闭合形式：起点在末尾重复一次，长度为 n + 1。
//! 鲸鱼优化算法内部使用 [`PinnedTour`]，起点不在可变部分之中，任何算子都无法移动它。

use crate::distance::DistanceMatrix;
use rand::seq::SliceRandom;
use rand::Rng;

/// 把开放序列闭合：在末尾追加起点
pub fn close(order: &[usize]) -> Vec<usize> {
    let mut closed = order.to_vec();
    if let Some(&start) = order.first() {
        closed.push(start);
    }
    closed
}

/// 固定起点的排列：起点之外的城市按访问顺序排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedTour {
    start: usize,
    rest: Vec<usize>,
}

impl PinnedTour {
    pub fn new(start: usize, rest: Vec<usize>) -> Self {
        debug_assert!(!rest.contains(&start), "起点不能出现在可变部分中");
        Self { start, rest }
    }

    /// 以 0 号城市为起点、其余城市按输入顺序排列
    pub fn identity(size: usize) -> Self {
        Self::new(0, (1..size).collect())
    }

    /// 以 0 号城市为起点、其余城市随机排列
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut tour = Self::identity(size);
        tour.rest.shuffle(rng);
        tour
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn rest(&self) -> &[usize] {
        &self.rest
    }

    /// 可变部分只以切片形式暴露：交换、翻转都不会破坏排列
    pub fn rest_mut(&mut self) -> &mut [usize] {
        &mut self.rest
    }

    /// 城市总数（含起点）
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// 起点之后访问的第一个城市；只有一个城市时就是起点本身
    pub fn successor_of_start(&self) -> usize {
        self.rest.first().copied().unwrap_or(self.start)
    }

    pub fn open(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len());
        order.push(self.start);
        order.extend_from_slice(&self.rest);
        order
    }

    pub fn closed(&self) -> Vec<usize> {
        close(&self.open())
    }

    pub fn length(&self, matrix: &DistanceMatrix) -> f64 {
        let mut previous = self.start;
        let mut total = 0.0;
        for &city in &self.rest {
            total += matrix.get(previous, city);
            previous = city;
        }
        total + matrix.get(previous, self.start)
    }
}
