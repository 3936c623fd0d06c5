//! libtsp 是使用 Rust 实现的旅行商问题（TSP）启发式求解库，面向地理坐标点。
//!
//! 它提供两种求解方法：贪心最佳优先构造（GBFS）和鲸鱼优化算法（WCO）。每种方法除了给出最终的环路之外，还给出逐步的决策轨迹，供前端回放。
//! 两种方法共享同一个距离矩阵，并以最近邻 + 2-opt 得到的参考环路作为分母来计算解的质量。
//!
//! tsp 是使用 libtsp 实现的命令行程序，同时可以作为 HTTP 服务器运行。

pub mod config;
pub mod context;
pub mod distance;
pub mod interfaces;
pub mod objectives;
pub mod operators;
pub mod optimizers;
pub mod results;
pub mod server;
pub mod tour;

use std::fmt::Display;
use wasm_bindgen::JsError;

/// 错误类型
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub message: String,
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self { message: value }
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<Error> for JsError {
    fn from(value: Error) -> Self {
        JsError::new(&value.message)
    }
}
