//! 求解方法接口，以及若干求解方法的实现
//!
//! - [`greedy`]：贪心最佳优先构造（GBFS），每一步都走向最近的未访问城市
//! - [`whale`]：鲸鱼优化算法（WCO），在排列空间上进化一个种群
//! - [`reference`]：最近邻 + 2-opt，用作质量评分的参考

use crate::context::Context;
use crate::interfaces::Interface;
use crate::results::Step;

pub mod greedy;
pub mod reference;
pub mod whale;

/// 求解方法的原始输出，尚未附加参考距离和质量
#[derive(Debug, Clone, Default)]
pub struct SolverRun {
    /// 闭合环路（城市序号），起点在末尾重复
    pub tour: Vec<usize>,
    pub distance: f64,
    pub trace: Vec<Step>,
}

pub trait Solver {
    /// 算法标识，也是合并结果中的键
    fn name(&self) -> &'static str;

    /// 求解。城市少于两个时返回空结果
    fn solve(&self, context: &Context, interface: &dyn Interface) -> SolverRun;
}
