use super::*;
use crate::optimizers::greedy::GreedyBestFirst;
use crate::results::{run_solver, SolverResult};
use tracing::{debug, info};

/// 纯 Rust 的 Web API 接口，供 HTTP 服务器在阻塞线程中调用
#[derive(Default)]
pub struct WebApi {
    config: Config,
    callback: Option<Box<dyn Fn(&Message) + Send + Sync>>,
}

impl WebApi {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            callback: None,
        }
    }

    /// 设置消息回调函数；未设置时消息写入日志
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: Fn(&Message) + Send + Sync + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// 两种求解方法的合并结果
    pub fn calculate_route(&self, request: RouteRequest) -> Result<Comparison, Error> {
        calculate_route(request, &self.config, self)
    }

    pub fn greedy(&self, request: RouteRequest) -> Result<SolverResult, Error> {
        let context = request.into_context(self.config.max_cities())?;
        Ok(run_solver(&GreedyBestFirst, &context, self))
    }

    pub fn whale(&self, request: RouteRequest) -> Result<SolverResult, Error> {
        let context = request.into_context(self.config.max_cities())?;
        Ok(run_solver(&self.config.whale(), &context, self))
    }
}

impl Interface for WebApi {
    fn post(&self, message: Message) {
        if let Some(ref callback) = self.callback {
            callback(&message);
            return;
        }
        match message {
            Message::Progress {
                algorithm,
                iteration,
                best_distance,
            } => debug!("[{algorithm}] iteration {iteration}: best {best_distance:.2} km"),
            Message::BetterSolution {
                algorithm,
                iteration,
                distance,
                ..
            } => debug!("[{algorithm}] iteration {iteration}: improved to {distance:.2} km"),
            Message::Finished {
                algorithm,
                distance,
                quality,
                elapsed,
                ..
            } => info!("[{algorithm}] {distance:.2} km, quality {quality:.1}%, {elapsed:.4} s"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn request() -> RouteRequest {
        RouteRequest {
            cities: vec![
                City::new("Hanoi", 21.0278, 105.8342),
                City::new("Danang", 16.0544, 108.2022),
                City::new("Hochiminh", 10.7758, 106.7019),
            ],
            starting_point: Some("Danang".to_string()),
        }
    }

    #[test]
    fn callback_receives_every_finished_message() {
        let finished = Arc::new(Mutex::new(vec![]));
        let mut api = WebApi::new(Config::default());
        let sink = finished.clone();
        api.set_callback(move |message| {
            if let Message::Finished { algorithm, .. } = message {
                sink.lock().unwrap().push(algorithm.clone());
            }
        });
        let comparison = api.calculate_route(request()).unwrap();
        assert_eq!(comparison.greedy.start_city, "Danang");
        assert_eq!(*finished.lock().unwrap(), ["GBFS", "WCO"]);
    }

    #[test]
    fn single_solver_endpoints_validate_input() {
        let api = WebApi::default();
        let mut too_small = request();
        too_small.cities.truncate(1);
        assert!(api.greedy(too_small.clone()).is_err());
        assert!(api.whale(too_small).is_err());
        assert_eq!(api.greedy(request()).unwrap().algorithm_name, "GBFS");
    }

    #[test]
    fn held_config_limits_every_endpoint() {
        let config = Config::from_yaml("server:\n  max_cities: 2\n").unwrap();
        let api = WebApi::new(config);
        assert!(api.calculate_route(request()).is_err());
        assert!(api.greedy(request()).is_err());
        assert!(api.whale(request()).is_err());
        let mut pair = request();
        pair.cities.truncate(2);
        pair.starting_point = None;
        assert_eq!(api.whale(pair).unwrap().algorithm_name, "WCO");
    }
}
