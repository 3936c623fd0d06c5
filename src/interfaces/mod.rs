//! 前端接口：命令行、HTTP 服务器和浏览器
//!
//! 三种前端共享同一个边界：接收城市列表和可选的起点名称，校验之后把起点旋转到列表最前面，再交给求解方法。
//! 求解过程中需要向用户反馈的数据统一通过 [`Interface`] 特征发送。

use crate::config::Config;
use crate::context::Context;
use crate::distance::City;
use crate::results::{compare, Comparison};
use crate::Error;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

pub mod command_line;
pub mod server;
pub mod web;

/// 向用户反馈的消息类型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    Progress {
        algorithm: String,
        iteration: usize,
        best_distance: f64,
    },
    BetterSolution {
        algorithm: String,
        iteration: usize,
        distance: f64,
        tour: Vec<String>,
    },
    Finished {
        algorithm: String,
        distance: f64,
        reference: f64,
        quality: f64,
        elapsed: f64,
    },
}

/// 定义了向用户报告消息的接口，用于统一命令行、服务器和图形界面的输出方式
///
/// 各个前端只需要各自实现 post 方法，就可向用户报告各种数据
pub trait Interface {
    fn post(&self, message: Message);
}

/// 一次求解请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteRequest {
    pub cities: Vec<City>,
    #[serde(default)]
    pub starting_point: Option<String>,
}

impl RouteRequest {
    /// 校验城市列表，把起点旋转到最前面，并构建上下文
    pub fn into_context(self, max_cities: usize) -> Result<Context, Error> {
        let RouteRequest {
            mut cities,
            starting_point,
        } = self;
        validate_cities(&cities, max_cities)?;
        if let Some(name) = starting_point.as_deref().filter(|name| !name.is_empty()) {
            rotate_to_start(&mut cities, name)?;
        }
        Ok(Context::new(cities))
    }
}

/// 边界校验：至少两个城市，名称非空且唯一，坐标有限且在合法范围内
pub fn validate_cities(cities: &[City], max_cities: usize) -> Result<(), Error> {
    if cities.len() < 2 {
        return Err("Need at least 2 cities".into());
    }
    if cities.len() > max_cities {
        return Err(format!(
            "Too many cities: {} (at most {max_cities})",
            cities.len()
        )
        .into());
    }
    let mut names = FxHashSet::default();
    for city in cities {
        if city.name.trim().is_empty() {
            return Err("City name must not be empty".into());
        }
        if !names.insert(city.name.as_str()) {
            return Err(format!("Duplicate city name: {}", city.name).into());
        }
        if !city.latitude.is_finite() || !(-90.0..=90.0).contains(&city.latitude) {
            return Err(format!("Invalid latitude for {}: {}", city.name, city.latitude).into());
        }
        if !city.longitude.is_finite() || !(-180.0..=180.0).contains(&city.longitude) {
            return Err(format!("Invalid longitude for {}: {}", city.name, city.longitude).into());
        }
    }
    Ok(())
}

/// 循环旋转城市列表，使指定的起点位于最前面，其余城市的相对顺序不变
pub fn rotate_to_start(cities: &mut [City], name: &str) -> Result<(), Error> {
    let position = cities
        .iter()
        .position(|city| city.name == name)
        .ok_or_else(|| Error::from(format!("Unknown starting point: {name}")))?;
    cities.rotate_left(position);
    Ok(())
}

/// 对同一组城市分别运行两种求解方法
pub fn calculate_route(
    request: RouteRequest,
    config: &Config,
    interface: &dyn Interface,
) -> Result<Comparison, Error> {
    let context = request.into_context(config.max_cities())?;
    Ok(compare(&context, &config.whale(), interface))
}
