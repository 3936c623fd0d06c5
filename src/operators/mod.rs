//! 算子接口，以及排列上的变异、杂交算子的实现
//!

use crate::tour::PinnedTour;
use rand::Rng;

pub mod permutation;

pub trait Mutation {
    /// 基于现有的一个环路通过随机扰动创建一个新的环路，起点保持不变
    fn mutate<R: Rng + ?Sized>(&self, tour: &PinnedTour, rng: &mut R) -> PinnedTour;
}

pub trait Crossover {
    /// 基于两个环路创建一个新的环路，起点与第一个环路相同
    fn crossover<R: Rng + ?Sized>(
        &self,
        first: &PinnedTour,
        second: &PinnedTour,
        rng: &mut R,
    ) -> PinnedTour;
}
