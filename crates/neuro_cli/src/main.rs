use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use neuro_diagnostics::Emitter;
use neuro_driver::{
    default_output_path, read_source, write_output, CompileError, Settings, SourceFile,
    STDOUT_PATH,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "neuroc")]
#[command(about = "neuro 编译器 - 用补全服务填充函数桩", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 只输出错误
    #[arg(short, long, global = true)]
    quiet: bool,

    /// 输出调试日志
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 生成 TypeScript 源文件
    Compile {
        /// 输入文件
        input: PathBuf,

        /// 输出文件 (默认: build/<文件名>.ts)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 生成并用 ts-node 运行
    Run {
        /// 输入文件
        input: PathBuf,

        /// 输出文件 (默认: build/<文件名>.ts)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 只检查语法
    Check {
        /// 输入文件
        input: PathBuf,

        /// 上一次的输出，用于检查固定函数
        #[arg(long)]
        previous: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    match cli.command {
        Commands::Compile { input, output } => {
            cmd_compile(&input, output, cli.quiet).await?;
        }
        Commands::Run { input, output } => {
            let output = cmd_compile(&input, output, cli.quiet).await?;
            cmd_run(&output, cli.quiet)?;
        }
        Commands::Check { input, previous } => cmd_check(&input, previous.as_deref())?,
    }

    Ok(())
}

/// `RUST_LOG` 优先；否则默认 warn，`--quiet` 为 error，`--verbose` 为 debug
fn init_tracing(quiet: bool, verbose: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// 编译命令，返回输出路径
async fn cmd_compile(input: &Path, output: Option<PathBuf>, quiet: bool) -> Result<PathBuf> {
    let output = output.unwrap_or_else(|| default_output_path(input));
    let to_stdout = output == Path::new(STDOUT_PATH);
    // 输出到 stdout 时不打印进度
    let quiet = quiet || to_stdout;

    status(quiet, format!("📦 编译 {} ...", input.display()));

    // 1. 解析。在创建补全服务之前，没有 API key 也能看到语法错误
    let file = SourceFile::load(input, Some(&output)).unwrap_or_else(|e| fail(&e, input));
    status(quiet, format!("  ✅ 解析成功 ({} 个顶层结构)", file.program.len()));

    // 2. 生成
    let provider = Settings::load()
        .provider()
        .unwrap_or_else(|e| fail(&CompileError::from(e), input));
    status(quiet, format!("  ⚙️  生成代码 (模型 {})...", provider.config().model));
    let compiled = file
        .compile(&provider)
        .await
        .unwrap_or_else(|e| fail(&e, input));

    let sink = compiled.diagnostics(&input.display().to_string());
    if sink.warning_count() > 0 || !quiet {
        Emitter::new().emit_all(sink.diagnostics(), None);
    }

    // 3. 写出
    if to_stdout {
        println!("{}", compiled.code);
    } else {
        status(quiet, format!("  📝 写入 {}", output.display()));
        write_output(&output, &compiled.code).unwrap_or_else(|e| fail(&e, input));
        status(
            quiet,
            format!(
                "✅ 成功生成 {} ({} 个函数生成, {} 个函数固定, {} 个警告)",
                output.display(),
                compiled.report.requested,
                compiled.report.pinned,
                sink.warning_count()
            ),
        );
    }

    Ok(output)
}

/// 运行命令
fn cmd_run(output: &Path, quiet: bool) -> Result<()> {
    if output == Path::new(STDOUT_PATH) {
        anyhow::bail!("cannot run output written to {}", STDOUT_PATH);
    }

    status(quiet, format!("🚀 运行 {} ...", output.display()));

    let status = std::process::Command::new("npx")
        .arg("ts-node")
        .arg(output)
        .status()
        .with_context(|| format!("Running npx ts-node {}", output.display()))?;

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}

/// 检查命令
fn cmd_check(input: &Path, previous: Option<&Path>) -> Result<()> {
    println!("🔍 检查 {} ...", input.display());

    let file = SourceFile::load(input, previous).unwrap_or_else(|e| fail(&e, input));
    println!("✅ 无错误 ({} 个顶层结构)", file.program.len());
    Ok(())
}

fn status(quiet: bool, message: impl AsRef<str>) {
    if !quiet {
        println!("{}", message.as_ref());
    }
}

/// 输出诊断并以状态码 1 退出
fn fail(err: &CompileError, input: &Path) -> ! {
    // 解析错误附带源码片段
    let source = match err {
        CompileError::Parse(_) => read_source(input).ok(),
        _ => None,
    };

    eprintln!("❌ 发现错误:");
    err.emit(Some(&input.display().to_string()), source.as_deref());
    std::process::exit(1);
}
