//! 距离度量与距离矩阵
//!
//! 城市之间的距离按大圆距离（haversine 公式）计算，地球半径取 6371 公里。距离矩阵在每次请求中只构建一次，之后所有求解方法都通过共享引用只读访问。

use crate::results::round_2;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// 地球半径，单位为公里
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// 城市：名称在一次请求中唯一，经纬度以度为单位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl City {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn distance_to(&self, other: &City) -> f64 {
        haversine(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// 两点之间的大圆距离，单位为公里
///
/// 输入为 NaN 时结果也是 NaN，由调用方负责校验。
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlon / 2.0).sin().powi(2);
    // 舍入误差可能让 a 略大于 1
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());
    EARTH_RADIUS_KM * c
}

/// 全连接图中的一条无向边，用于前端绘制背景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(serialize_with = "round_2")]
    pub distance: f64,
}

/// 按行存储的 n×n 距离矩阵，对称且对角线为零
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    pub fn new(cities: &[City]) -> Self {
        let size = cities.len();
        let mut data = vec![0.0; size * size];
        for (i, j) in (0..size).tuple_combinations() {
            let distance = cities[i].distance_to(&cities[j]);
            data[i * size + j] = distance;
            data[j * size + i] = distance;
        }
        Self { data, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// 闭合序列（首尾相同）中相邻城市的距离之和
    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|pair| self.get(pair[0], pair[1])).sum()
    }

    /// 开放序列的环路长度，包含最后一个城市回到起点的边
    pub fn cycle_length(&self, order: &[usize]) -> f64 {
        match (order.first(), order.last()) {
            (Some(&first), Some(&last)) => self.path_length(order) + self.get(last, first),
            _ => 0.0,
        }
    }

    /// 候选城市中离 `from` 最近的一个
    ///
    /// 按候选的给出顺序扫描，距离相同时取最先出现的那个。
    pub fn nearest(&self, from: usize, candidates: impl IntoIterator<Item = usize>) -> Option<usize> {
        let mut nearest: Option<(usize, f64)> = None;
        for candidate in candidates {
            let distance = self.get(from, candidate);
            match nearest {
                Some((_, best)) if distance >= best => {}
                _ => nearest = Some((candidate, distance)),
            }
        }
        nearest.map(|(city, _)| city)
    }

    /// 所有 i < j 的城市对，按输入顺序排列
    pub fn edges(&self, cities: &[City]) -> Vec<Edge> {
        (0..self.size)
            .tuple_combinations()
            .map(|(i, j)| Edge {
                from: cities[i].name.clone(),
                to: cities[j].name.clone(),
                distance: self.get(i, j),
            })
            .collect()
    }
}
