//! 一次求解请求的上下文：城市列表与距离矩阵
//!
//! 上下文在构建时计算一次距离矩阵，之后所有求解方法都只读地共享它。0 号城市总是起点。

use crate::distance::{City, DistanceMatrix, Edge};

#[derive(Debug, Clone)]
pub struct Context {
    pub cities: Vec<City>,
    pub matrix: DistanceMatrix,
}

impl Context {
    pub fn new(cities: Vec<City>) -> Self {
        let matrix = DistanceMatrix::new(&cities);
        Self { cities, matrix }
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn name(&self, index: usize) -> &str {
        &self.cities[index].name
    }

    /// 把城市序号序列转换为城市名称序列
    pub fn names(&self, indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| self.cities[i].name.clone()).collect()
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.matrix.edges(&self.cities)
    }
}
