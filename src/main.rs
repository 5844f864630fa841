use futures::future::join_all;
use std::process::ExitCode;
use tracing::{error, info, warn};
use vapor_market::analyzer::{Analyzer, MarketAnalyzer};
use vapor_market::config::{AppConfig, InputConfig, load_config};
use vapor_market::model::{AnalysisResult, Report};
use vapor_market::source;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    let analyzer = MarketAnalyzer::new();
    info!("Inputs to process: {}", config.inputs.len());

    // Process all inputs concurrently
    let tasks: Vec<_> = config
        .inputs
        .iter()
        .map(|input| process_input(input, &analyzer))
        .collect();
    let results = join_all(tasks).await;

    let output: serde_json::Map<String, serde_json::Value> = results
        .into_iter()
        .flatten()
        .filter_map(|(name, analysis)| match serde_json::to_value(&analysis) {
            Ok(value) => Some((name, value)),
            Err(e) => {
                warn!("Failed to serialize analysis for {}: {}", name, e);
                None
            }
        })
        .collect();

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => {
            error!("Failed to render output: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

/// Loads a single input and analyzes it. Failures are logged and yield `None`.
async fn process_input(input: &InputConfig, analyzer: &MarketAnalyzer) -> Option<(String, AnalysisResult)> {
    info!("Processing input: {} ({:?})", input.name, input.format);

    let snapshot = match source::from_config(input).load().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Failed to load {}: {}", input.name, e);
            return None;
        }
    };

    let analysis = analyzer.analyze(Some(&snapshot));
    log_summary(&input.name, &analysis);
    Some((input.name.clone(), analysis))
}

fn log_summary(name: &str, analysis: &AnalysisResult) {
    let direction = match &analysis.trends {
        Report::Ready(trends) => format!("{:?}", trends.last7d.direction),
        Report::Unavailable { status } => format!("{:?}", status),
    };
    info!(
        "{}: price {:.2} | 7d {} | {}",
        name, analysis.current_price, direction, analysis.recommendations.summary
    );
}
