//! 求解结果的组装
//!
//! 把求解方法输出的环路、轨迹和计时，与参考距离、解质量一起打包为统一的 [`SolverResult`]，这也是边界层序列化给前端的记录。
//! 内存中的数值不做舍入；只在序列化时按前端的显示习惯舍入。

use crate::context::Context;
use crate::distance::{City, Edge};
use crate::interfaces::{Interface, Message};
use crate::objectives::quality::solution_quality;
use crate::optimizers::greedy::GreedyBestFirst;
use crate::optimizers::reference::reference_tour;
use crate::optimizers::whale::WhaleOptimization;
use crate::optimizers::Solver;
use serde::{Deserialize, Serialize, Serializer};
use serde_with::skip_serializing_none;
use web_time::Instant;

fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

pub fn round_2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 2))
}

pub fn round_4<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 4))
}

fn round_2_option<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => round_2(value, serializer),
        None => serializer.serialize_none(),
    }
}

/// 轨迹中的一条有向边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub from: String,
    pub to: String,
}

/// 一个候选城市及其启发值（到当前城市的距离）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub name: String,
    #[serde(serialize_with = "round_2")]
    pub h: f64,
}

/// 轨迹中的一步决策
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub step: usize,
    pub current_city: String,
    pub neighbors: Vec<Neighbor>,
    pub chosen_city: String,
    pub considered_edge: Link,
    pub chosen_edge: Link,
    pub partial_path: Vec<String>,
    #[serde(serialize_with = "round_2_option", default)]
    pub current_best_distance: Option<f64>,
}

impl Step {
    pub fn new(
        step: usize,
        current_city: &str,
        neighbors: Vec<Neighbor>,
        chosen_city: &str,
        partial_path: Vec<String>,
    ) -> Self {
        let edge = Link {
            from: current_city.to_string(),
            to: chosen_city.to_string(),
        };
        Self {
            step,
            current_city: current_city.to_string(),
            neighbors,
            chosen_city: chosen_city.to_string(),
            considered_edge: edge.clone(),
            chosen_edge: edge,
            partial_path,
            current_best_distance: None,
        }
    }
}

/// 一种求解方法的完整结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverResult {
    /// 闭合环路，起点在末尾重复
    #[serde(rename = "best_solution")]
    pub tour: Vec<String>,
    #[serde(rename = "best_distance", serialize_with = "round_2")]
    pub total_distance: f64,
    #[serde(rename = "execution_time", serialize_with = "round_4")]
    pub elapsed_seconds: f64,
    pub cities: Vec<City>,
    pub edges: Vec<Edge>,
    #[serde(rename = "steps")]
    pub trace: Vec<Step>,
    #[serde(rename = "starting_point")]
    pub start_city: String,
    #[serde(rename = "algorithm")]
    pub algorithm_name: String,
    #[serde(rename = "optimal_distance", serialize_with = "round_2")]
    pub reference_distance: f64,
    #[serde(rename = "solution_quality")]
    pub quality_percent: f64,
}

impl SolverResult {
    /// 城市少于两个时的空结果
    pub fn empty(algorithm: &str) -> Self {
        Self {
            tour: vec![],
            total_distance: 0.0,
            elapsed_seconds: 0.0,
            cities: vec![],
            edges: vec![],
            trace: vec![],
            start_city: String::new(),
            algorithm_name: algorithm.to_string(),
            reference_distance: 0.0,
            quality_percent: 0.0,
        }
    }
}

/// 运行一种求解方法，并附加参考距离和解质量
pub fn run_solver<S: Solver + ?Sized>(
    solver: &S,
    context: &Context,
    interface: &dyn Interface,
) -> SolverResult {
    if context.len() < 2 {
        return SolverResult::empty(solver.name());
    }
    let start_time = Instant::now();
    let run = solver.solve(context, interface);
    let reference = reference_tour(&context.matrix);
    let quality_percent = solution_quality(run.distance, reference.distance);
    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    interface.post(Message::Finished {
        algorithm: solver.name().to_string(),
        distance: run.distance,
        reference: reference.distance,
        quality: quality_percent,
        elapsed: elapsed_seconds,
    });
    SolverResult {
        tour: context.names(&run.tour),
        total_distance: run.distance,
        elapsed_seconds,
        cities: context.cities.clone(),
        edges: context.edges(),
        trace: run.trace,
        start_city: context.name(0).to_string(),
        algorithm_name: solver.name().to_string(),
        reference_distance: reference.distance,
        quality_percent,
    }
}

/// 两种求解方法在同一组城市上的结果，按算法名称作键
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(rename = "GBFS")]
    pub greedy: SolverResult,
    #[serde(rename = "WCO")]
    pub whale: SolverResult,
}

pub fn compare(
    context: &Context,
    whale: &WhaleOptimization,
    interface: &dyn Interface,
) -> Comparison {
    Comparison {
        greedy: run_solver(&GreedyBestFirst, context, interface),
        whale: run_solver(whale, context, interface),
    }
}
