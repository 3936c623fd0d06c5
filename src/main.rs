//! tsp: 带回放轨迹的旅行商问题求解［命令行版］
//!
//! `tsp` 是一个使用 Rust 编写的命令行程序。用户提供城市列表以及可选的配置文件，本程序能够分别用贪心最佳优先构造和鲸鱼优化算法求解，并以最近邻 + 2-opt 的参考环路为基准评估解的质量。
//! 它也可以作为 HTTP 服务器运行，为前端提供求解接口。

use clap::Parser;
use tsp::interfaces::command_line::{Command, CommandLine, CommandLineArgs};
use tsp::interfaces::calculate_route;
use tsp::optimizers::greedy::GreedyBestFirst;
use tsp::optimizers::reference::reference_tour;
use tsp::results::run_solver;
use tsp::server::start_server;
use tsp::Error;

fn main() -> Result<(), Error> {
    let args = CommandLineArgs::parse();
    let command = args.command.clone();
    let cli = CommandLine::new(args)?;
    let config = cli.config()?;
    match command {
        Command::Serve { port } => {
            let port = port.unwrap_or_else(|| config.port());
            let runtime =
                tokio::runtime::Runtime::new().map_err(|e| format!("无法启动异步运行时: {e}"))?;
            runtime.block_on(start_server(config, port))?;
        }
        Command::Solve => {
            let comparison = calculate_route(cli.request()?, &config, &cli)?;
            cli.report_comparison(&comparison)?;
        }
        Command::Greedy => {
            let context = cli.request()?.into_context(config.max_cities())?;
            let result = run_solver(&GreedyBestFirst, &context, &cli);
            cli.report_result(&result)?;
        }
        Command::Whale => {
            let context = cli.request()?.into_context(config.max_cities())?;
            let result = run_solver(&config.whale(), &context, &cli);
            cli.report_result(&result)?;
        }
        Command::Reference => {
            let context = cli.request()?.into_context(config.max_cities())?;
            let reference = reference_tour(&context.matrix);
            cli.report_reference(&context.names(&reference.tour), &reference);
        }
    }
    Ok(())
}
