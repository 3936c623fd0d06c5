//! 鲸鱼优化算法
//!
//! 原始的鲸鱼优化算法在连续空间中工作，这里用排列算子代替位置更新：
//!
//! - 包围猎物（|A| < 1）：向当前最优解靠拢，以顺序杂交为主，偶尔直接对最优解做交换变异；
//! - 搜索猎物（|A| ≥ 1）：向种群中随机的另一头鲸鱼靠拢，算子同上；
//! - 螺旋更新：在自身附近做翻转变异或交换变异。
//!
//! 每一轮迭代先基于迭代开始时的种群快照为所有个体生成候选，再按个体顺序依次归并到种群和全局最优解中。
//! 全局最优解只在归并这一步被写入。

use super::{Solver, SolverRun};
use crate::context::Context;
use crate::interfaces::{Interface, Message};
use crate::objectives::tour_length::TourLength;
use crate::objectives::Objective;
use crate::operators::permutation::{InversionMutation, OrderCrossover, SwapMutation};
use crate::operators::{Crossover, Mutation};
use crate::results::{Neighbor, Step};
use crate::tour::PinnedTour;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

pub const DEFAULT_POPULATION: usize = 30;
pub const DEFAULT_ITERATIONS: usize = 100;
pub const DEFAULT_MAX_TRACE_STEPS: usize = 50;
pub const DEFAULT_NEIGHBOR_PREVIEW: usize = 3;
pub const DEFAULT_REPORT_INTERVAL: usize = 10;

/// 选择包围或搜索（而不是螺旋更新）的概率
const ENCIRCLE_PROBABILITY: f64 = 0.5;
/// 包围和搜索时使用顺序杂交（而不是交换变异）的概率
const CROSSOVER_RATE: f64 = 0.7;
/// 螺旋更新时使用翻转变异（而不是交换变异）的概率
const INVERSION_RATE: f64 = 0.5;

/// 鲸鱼优化算法的参数，缺省时使用上面的默认值
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhaleOptimization {
    pub population: Option<usize>,
    pub iterations: Option<usize>,
    /// 随机数种子；给定时求解过程完全可复现
    pub seed: Option<u64>,
    /// 轨迹的最大长度，0 表示不下采样
    pub max_trace_steps: Option<usize>,
    /// 轨迹中展示的起点近邻个数
    pub neighbor_preview: Option<usize>,
    pub report_interval: Option<usize>,
}

/// 种群中的一个个体及其环路长度
#[derive(Debug, Clone)]
pub struct Whale {
    pub tour: PinnedTour,
    pub distance: f64,
}

/// 一次搜索的结果：全局最优解，以及每轮迭代一条的完整轨迹
#[derive(Debug, Clone)]
pub struct Search {
    pub best: Whale,
    pub trace: Vec<Step>,
}

impl WhaleOptimization {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// 少于两个城市时没有可搜索的环路，返回 `None`
    pub fn optimize<O: Objective<Decision = PinnedTour>, R: Rng + ?Sized>(
        &self,
        context: &Context,
        objective: &O,
        rng: &mut R,
        interface: &dyn Interface,
    ) -> Option<Search> {
        if context.len() < 2 {
            return None;
        }
        let population_size = self.population.unwrap_or(DEFAULT_POPULATION).max(1);
        let iterations = self.iterations.unwrap_or(DEFAULT_ITERATIONS);
        let report_interval = self.report_interval.unwrap_or(DEFAULT_REPORT_INTERVAL).max(1);
        let preview = self.preview(context);

        let mut population: Vec<Whale> = (0..population_size)
            .map(|_| {
                let tour = PinnedTour::random(context.len(), rng);
                let distance = objective.evaluate(&tour);
                Whale { tour, distance }
            })
            .collect();
        let mut best = population[0].clone();
        for whale in &population[1..] {
            if whale.distance < best.distance {
                best = whale.clone();
            }
        }

        let mut trace = Vec::with_capacity(iterations);
        for iteration in 0..iterations {
            if iteration % report_interval == 0 {
                interface.post(Message::Progress {
                    algorithm: self.name().to_string(),
                    iteration,
                    best_distance: best.distance,
                });
            }
            // 收敛因子从 2 线性减小到 0
            let a = 2.0 - 2.0 * iteration as f64 / iterations as f64;
            let proposals: Vec<Whale> = (0..population.len())
                .map(|index| {
                    let tour = propose(index, &population, &best.tour, a, rng);
                    let distance = objective.evaluate(&tour);
                    Whale { tour, distance }
                })
                .collect();
            let mut improved = false;
            for (whale, proposal) in population.iter_mut().zip(proposals) {
                if proposal.distance < best.distance {
                    best = proposal.clone();
                    improved = true;
                }
                if proposal.distance < whale.distance {
                    *whale = proposal;
                }
            }
            if improved {
                interface.post(Message::BetterSolution {
                    algorithm: self.name().to_string(),
                    iteration,
                    distance: best.distance,
                    tour: context.names(&best.tour.closed()),
                });
            }
            trace.push(record(context, &best, preview.clone(), iteration + 1));
        }
        Some(Search { best, trace })
    }

    /// 起点的若干个最近邻，按距离升序，距离相同时按输入顺序
    fn preview(&self, context: &Context) -> Vec<Neighbor> {
        let count = self.neighbor_preview.unwrap_or(DEFAULT_NEIGHBOR_PREVIEW);
        let matrix = &context.matrix;
        let mut others: Vec<usize> = (1..context.len()).collect();
        others.sort_by(|&x, &y| matrix.get(0, x).total_cmp(&matrix.get(0, y)));
        others
            .into_iter()
            .take(count)
            .map(|city| Neighbor {
                name: context.name(city).to_string(),
                h: matrix.get(0, city),
            })
            .collect()
    }
}

/// 基于种群快照为第 `index` 头鲸鱼生成一个候选解
fn propose<R: Rng + ?Sized>(
    index: usize,
    population: &[Whale],
    best: &PinnedTour,
    a: f64,
    rng: &mut R,
) -> PinnedTour {
    let r: f64 = rng.random();
    let p: f64 = rng.random();
    let coefficient = 2.0 * a * r - a;
    let current = &population[index].tour;
    if p < ENCIRCLE_PROBABILITY {
        let guide = if coefficient.abs() < 1.0 {
            best
        } else {
            &population[partner(index, population.len(), rng)].tour
        };
        if rng.random::<f64>() < CROSSOVER_RATE {
            OrderCrossover.crossover(current, guide, rng)
        } else {
            SwapMutation.mutate(guide, rng)
        }
    } else if rng.random::<f64>() < INVERSION_RATE {
        InversionMutation.mutate(current, rng)
    } else {
        SwapMutation.mutate(current, rng)
    }
}

/// 均匀地选出另一头鲸鱼；种群只有一头时就是它自己
fn partner<R: Rng + ?Sized>(index: usize, size: usize, rng: &mut R) -> usize {
    if size < 2 {
        return index;
    }
    let other = rng.random_range(0..size - 1);
    if other >= index {
        other + 1
    } else {
        other
    }
}

fn record(context: &Context, best: &Whale, neighbors: Vec<Neighbor>, step: usize) -> Step {
    let tour = &best.tour;
    let mut entry = Step::new(
        step,
        context.name(tour.start()),
        neighbors,
        context.name(tour.successor_of_start()),
        context.names(&tour.open()),
    );
    entry.current_best_distance = Some(best.distance);
    entry
}

/// 轨迹过长时等间隔采样，保持时间顺序并重新编号
pub fn downsample(trace: Vec<Step>, limit: usize) -> Vec<Step> {
    if limit == 0 || trace.len() <= limit {
        return trace;
    }
    let interval = (trace.len() / limit).max(1);
    let mut sampled: Vec<Step> = trace.into_iter().step_by(interval).take(limit).collect();
    for (index, step) in sampled.iter_mut().enumerate() {
        step.step = index + 1;
    }
    sampled
}

impl Solver for WhaleOptimization {
    fn name(&self) -> &'static str {
        "WCO"
    }

    fn solve(&self, context: &Context, interface: &dyn Interface) -> SolverRun {
        let objective = TourLength::new(&context.matrix);
        let mut rng = self.rng();
        let Some(Search { best, trace }) = self.optimize(context, &objective, &mut rng, interface)
        else {
            return SolverRun::default();
        };
        let limit = self.max_trace_steps.unwrap_or(DEFAULT_MAX_TRACE_STEPS);
        SolverRun {
            tour: best.tour.closed(),
            distance: best.distance,
            trace: downsample(trace, limit),
        }
    }
}
