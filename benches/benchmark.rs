use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tsp::context::Context;
use tsp::distance::City;
use tsp::interfaces::{Interface, Message};
use tsp::optimizers::greedy::GreedyBestFirst;
use tsp::optimizers::reference::reference_tour;
use tsp::optimizers::whale::WhaleOptimization;
use tsp::optimizers::Solver;

struct Silent;

impl Interface for Silent {
    fn post(&self, _message: Message) {}
}

/// 越南的 30 个城市，坐标取自省会
fn cities() -> Vec<City> {
    [
        ("Hanoi", 21.0278, 105.8342),
        ("Haiphong", 20.8449, 106.6881),
        ("Halong", 20.9517, 107.0800),
        ("Namdinh", 20.4388, 106.1621),
        ("Ninhbinh", 20.2506, 105.9745),
        ("Thanhhoa", 19.8067, 105.7852),
        ("Vinh", 18.6796, 105.6813),
        ("Hatinh", 18.3428, 105.9057),
        ("Donghoi", 17.4689, 106.6223),
        ("Dongha", 16.8163, 107.1003),
        ("Hue", 16.4637, 107.5909),
        ("Danang", 16.0544, 108.2022),
        ("Tamky", 15.5736, 108.4740),
        ("Quangngai", 15.1214, 108.8044),
        ("Quynhon", 13.7830, 109.2197),
        ("Tuyhoa", 13.0882, 109.0929),
        ("Nhatrang", 12.2388, 109.1967),
        ("Phanrang", 11.5643, 108.9886),
        ("Phanthiet", 10.9289, 108.1021),
        ("Dalat", 11.9404, 108.4583),
        ("Buonmathuot", 12.6667, 108.0500),
        ("Pleiku", 13.9833, 108.0000),
        ("Kontum", 14.3497, 108.0005),
        ("Hochiminh", 10.7758, 106.7019),
        ("Vungtau", 10.4114, 107.1362),
        ("Bienhoa", 10.9574, 106.8427),
        ("Mytho", 10.3600, 106.3600),
        ("Cantho", 10.0452, 105.7469),
        ("Rachgia", 10.0125, 105.0809),
        ("Camau", 9.1769, 105.1524),
    ]
    .into_iter()
    .map(|(name, lat, lng)| City::new(name, lat, lng))
    .collect()
}

fn bench_solver<S: Solver>(name: &str, solver: &S, c: &mut Criterion) {
    let context = Context::new(cities());
    c.bench_function(name, |b| b.iter(|| solver.solve(black_box(&context), &Silent)));
}

fn distance_matrix(c: &mut Criterion) {
    let cities = cities();
    c.bench_function("距离矩阵", |b| b.iter(|| Context::new(black_box(cities.clone()))));
}

fn greedy(c: &mut Criterion) {
    bench_solver("贪心构造", &GreedyBestFirst, c);
}

fn whale(c: &mut Criterion) {
    let solver = WhaleOptimization {
        seed: Some(42),
        ..Default::default()
    };
    bench_solver("鲸鱼优化", &solver, c);
}

fn reference(c: &mut Criterion) {
    let context = Context::new(cities());
    c.bench_function("参考环路", |b| b.iter(|| reference_tour(black_box(&context.matrix))));
}

criterion_group!(benches, distance_matrix, greedy, whale, reference);
criterion_main!(benches);
