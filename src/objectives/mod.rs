//! 目标函数接口，以及环路长度和解质量的实现
//!

pub mod quality;
pub mod tour_length;

pub trait Objective {
    type Decision;
    /// 计算一个解的目标值，越小越好
    fn evaluate(&self, decision: &Self::Decision) -> f64;
}
