//! Command-line entry point: batch extraction of Chinese VAT invoice PDFs
//! into a timestamped summary table.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::warn;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use fapiao::{
    BatchRunner, BatchWorker, DeepSeekClient, InvoiceInterpreter, LlmConfig, PdfTokenSource,
    ProgressEvent,
};

/// 发票数据提取 - Extract structured data from Chinese VAT invoice PDFs
#[derive(Parser)]
#[command(name = "fapiao")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the invoice PDF files
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Chat model to use
    #[arg(long)]
    model: Option<String>,

    /// API host override (defaults to DEEPSEEK_API_HOST or the public host)
    #[arg(long)]
    api_host: Option<String>,

    /// Timeout for a single model call, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        let _ = tracing_log::LogTracer::init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> fapiao::Result<()> {
    let mut config = LlmConfig::from_env();
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if let Some(host) = cli.api_host {
        config = config.with_base_url(host);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let client = DeepSeekClient::new(config).map_err(fapiao::InterpretError::Llm)?;
    let interpreter = InvoiceInterpreter::new(Box::new(PdfTokenSource), Box::new(client));
    let runner = BatchRunner::new(interpreter);

    let directory = cli.directory.clone();
    let worker = BatchWorker::spawn(runner, directory);

    let cancel = worker.cancel_handle();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("收到中断信号，处理完当前文件后停止...");
        cancel.cancel();
    }) {
        warn!("Failed to install interrupt handler: {}", e);
    }

    while let Some(event) = worker.recv_progress() {
        match event {
            ProgressEvent::Started { total_files } => {
                println!("找到 {} 个PDF文件，开始处理...", total_files);
            }
            ProgressEvent::FileStarted {
                index,
                total,
                file_name,
            } => {
                println!("正在处理 ({}/{}): {}", index + 1, total, file_name);
            }
            ProgressEvent::FileFailed { file_name, error } => {
                println!("处理文件 {} 时出错: {}", file_name, error);
            }
            ProgressEvent::Completed { .. } => {}
        }
    }

    let summary = worker.join()?;
    if summary.cancelled {
        println!("已取消，共处理了 {} 个PDF文件", summary.files);
        if let Some(path) = summary.output {
            println!("部分汇总文件已保存: {}", path.display());
        }
    } else {
        match summary.output {
            Some(path) => {
                println!(
                    "处理完成！共处理了 {} 个PDF文件，生成了 {} 行数据",
                    summary.files, summary.rows
                );
                println!("汇总文件已保存: {}", path.display());
            }
            None => println!("在目录 {} 中未找到PDF文件", cli.directory.display()),
        }
    }

    Ok(())
}
