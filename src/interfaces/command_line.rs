use crate::config::Config;
use crate::distance::City;
use crate::interfaces::{Interface, Message, RouteRequest};
use crate::optimizers::reference::ReferenceTour;
use crate::results::{Comparison, SolverResult};
use crate::Error;
use chrono::Local;
use clap::{Parser, Subcommand};
use csv::ReaderBuilder;
use serde::Serialize;
use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};

/// 命令行参数的定义
#[derive(Parser, Clone)]
#[command(name = "tsp")]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
pub struct CommandLineArgs {
    #[command(subcommand)]
    pub command: Command,
    /// 配置文件，默认为 config.yaml，不存在时使用默认配置
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// 城市列表，每行为「名称、纬度、经度」，以制表符分隔，默认为 cities.txt
    #[arg(short = 'i', long, value_name = "FILE")]
    pub cities: Option<PathBuf>,
    /// 起点名称，默认为城市列表中的第一个
    #[arg(short, long)]
    pub start: Option<String>,
    /// 随机数种子，覆盖配置文件中的设置
    #[arg(long)]
    pub seed: Option<u64>,
    /// 把结果以 JSON 格式保存到带时间戳的输出目录中
    #[arg(short, long)]
    pub output: bool,
}

/// 命令行中所有可用的子命令
#[derive(Subcommand, Clone)]
pub enum Command {
    /// 对同一组城市运行两种求解方法并比较结果
    Solve,
    /// 只运行贪心最佳优先构造
    Greedy,
    /// 只运行鲸鱼优化算法
    Whale,
    /// 计算最近邻 + 2-opt 参考环路
    Reference,
    /// 启动 HTTP 服务器
    Serve {
        /// 监听端口，默认为配置文件中的设置或 5000
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// 通过命令行来使用 libtsp 的入口，实现了界面特征
pub struct CommandLine {
    pub args: CommandLineArgs,
    pub output_dir: Option<PathBuf>,
}

impl CommandLine {
    pub fn new(args: CommandLineArgs) -> Result<Self, Error> {
        let output_dir = if args.output {
            let time = Local::now().format("%m-%d+%H_%M_%S").to_string();
            let dir = PathBuf::from(format!("output-{time}"));
            create_dir_all(&dir).map_err(|e| format!("无法创建输出目录 {}: {e}", dir.display()))?;
            Some(dir)
        } else {
            None
        };
        Ok(Self { args, output_dir })
    }

    /// 读取配置文件，并用命令行中的种子覆盖配置
    pub fn config(&self) -> Result<Config, Error> {
        let mut config = match &self.args.config {
            Some(path) => Config::load(path)?,
            None => {
                let path = Path::new("config.yaml");
                if path.exists() {
                    Config::load(path)?
                } else {
                    Config::default()
                }
            }
        };
        if let Some(seed) = self.args.seed {
            let mut whale = config.whale();
            whale.seed = Some(seed);
            config.whale = Some(whale);
        }
        Ok(config)
    }

    pub fn request(&self) -> Result<RouteRequest, Error> {
        let path = self
            .args
            .cities
            .clone()
            .unwrap_or_else(|| PathBuf::from("cities.txt"));
        Ok(RouteRequest {
            cities: read_cities(&path)?,
            starting_point: self.args.start.clone(),
        })
    }

    pub fn report_result(&self, result: &SolverResult) -> Result<(), Error> {
        println!(
            "{}：{:.2} km，参考 {:.2} km，质量 {:.1}%，用时 {:.4} s",
            result.algorithm_name,
            result.total_distance,
            result.reference_distance,
            result.quality_percent,
            result.elapsed_seconds
        );
        println!("路线：{}", result.tour.join(" → "));
        self.save(&format!("{}.json", result.algorithm_name), result)
    }

    pub fn report_comparison(&self, comparison: &Comparison) -> Result<(), Error> {
        for result in [&comparison.greedy, &comparison.whale] {
            self.report_result(result)?;
        }
        let (greedy, whale) = (&comparison.greedy, &comparison.whale);
        let (winner, margin) = if whale.total_distance < greedy.total_distance {
            ("WCO", greedy.total_distance - whale.total_distance)
        } else {
            ("GBFS", whale.total_distance - greedy.total_distance)
        };
        println!("{winner} 的环路更短，相差 {margin:.2} km");
        self.save("comparison.json", comparison)
    }

    pub fn report_reference(&self, names: &[String], reference: &ReferenceTour) {
        println!("参考距离：{:.2} km", reference.distance);
        println!("路线：{}", names.join(" → "));
    }

    fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), Error> {
        let Some(dir) = &self.output_dir else {
            return Ok(());
        };
        let path = dir.join(name);
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| format!("结果序列化错误: {e}"))?;
        write(&path, content).map_err(|e| format!("无法写入 {}: {e}", path.display()))?;
        println!("结果保存在 {} 中", path.display());
        Ok(())
    }
}

/// 从制表符分隔的文本文件中读取城市列表
pub fn read_cities(path: &Path) -> Result<Vec<City>, Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("无法读取城市列表 {}: {e}", path.display()))?;
    let mut cities = Vec::new();
    for record in reader.deserialize() {
        let city: City = record.map_err(|e| format!("{} 格式错误: {e}", path.display()))?;
        cities.push(city);
    }
    Ok(cities)
}

impl Interface for CommandLine {
    fn post(&self, message: Message) {
        match message {
            Message::Progress {
                algorithm,
                iteration,
                best_distance,
            } => println!("[{algorithm}] 已执行 {iteration} 轮，当前最优 {best_distance:.2} km"),
            Message::BetterSolution {
                algorithm,
                iteration,
                distance,
                ..
            } => println!(
                "[{algorithm}] {} 第 {iteration} 轮搜索到更短的环路：{distance:.2} km",
                Local::now().format("%H:%M:%S")
            ),
            Message::Finished {
                algorithm, elapsed, ..
            } => println!("[{algorithm}] 求解完成，用时 {elapsed:.4} s"),
        }
    }
}
