//! Neuro Compiler Driver
//!
//! 编译器驱动模块，串联所有阶段：
//! 读取源文件 → 解析（合并上一次输出中的固定函数）→ 逐个生成 → 拼接输出。
//! 解析失败时不会开始生成；生成失败时不会产生任何输出。

pub mod config;
pub mod error;

pub use config::Settings;
pub use error::{CompileError, CompileResult};

use neuro_codegen::{assemble, CompletionProvider, GenerationReport, Generator};
use neuro_diagnostics::{Diagnostic, DiagnosticSink};
use neuro_syntax::{parse_program, Program};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// 输出到标准输出时使用的路径
pub const STDOUT_PATH: &str = "/dev/stdout";

/// 默认输出目录
pub const BUILD_DIR: &str = "build";

/// 编译结果
#[derive(Debug)]
pub struct CompilationOutput {
    /// 生成的源码
    pub code: String,
    /// 生成统计
    pub report: GenerationReport,
}

impl CompilationOutput {
    /// 生成过程中值得告诉用户的事：空回复是警告，沿用的固定函数是注释
    pub fn diagnostics(&self, file_path: &str) -> DiagnosticSink {
        let mut sink = DiagnosticSink::new();

        for name in &self.report.empty_responses {
            sink.add(
                Diagnostic::warning(format!("completion for `{}` returned no content", name))
                    .with_file(file_path)
                    .with_note("an empty body was emitted for this function"),
            );
        }
        if self.report.pinned > 0 {
            sink.add(
                Diagnostic::note(format!(
                    "{} pinned function(s) reused from the previous output",
                    self.report.pinned
                ))
                .with_file(file_path),
            );
        }

        sink
    }
}

/// 已读取并解析的源文件
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
    pub program: Program,
}

impl SourceFile {
    /// 读取并解析源文件
    ///
    /// # Arguments
    /// * `input` - neuro 源文件
    /// * `previous` - 上一次生成的输出；为 `None` 或文件不存在时没有函数被固定
    pub fn load(input: &Path, previous: Option<&Path>) -> CompileResult<Self> {
        let source = read_source(input)?;
        let previous = match previous {
            Some(path) => read_previous_output(path)?,
            None => String::new(),
        };
        let program = parse(&source, &previous)?;

        Ok(Self {
            path: input.to_path_buf(),
            source,
            program,
        })
    }

    /// 生成并拼接
    ///
    /// # Example
    /// ```no_run
    /// use neuro_driver::{default_output_path, SourceFile, Settings};
    /// use std::path::Path;
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let input = Path::new("hello.neuro");
    /// let output = default_output_path(input);
    ///
    /// let file = SourceFile::load(input, Some(&output))?;
    /// let provider = Settings::load().provider()?;
    /// let compiled = file.compile(&provider).await?;
    /// println!("{}", compiled.code);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn compile<P>(&self, provider: &P) -> CompileResult<CompilationOutput>
    where
        P: CompletionProvider + ?Sized,
    {
        generate(&self.program, provider).await
    }
}

/// 解析源码
///
/// # Arguments
/// * `source` - neuro 源码
/// * `previous` - 上一次生成的输出，没有时为空串
pub fn parse(source: &str, previous: &str) -> CompileResult<Program> {
    let program = parse_program(source, previous)?;
    info!(constructs = program.len(), "parsed successfully");
    Ok(program)
}

/// 生成并拼接已解析的程序
pub async fn generate<P>(program: &Program, provider: &P) -> CompileResult<CompilationOutput>
where
    P: CompletionProvider + ?Sized,
{
    let generated = Generator::new(provider).generate(program).await?;
    info!(
        requested = generated.report.requested,
        pinned = generated.report.pinned,
        "generation finished"
    );

    Ok(CompilationOutput {
        code: assemble(&generated.blocks),
        report: generated.report,
    })
}

/// 默认输出路径：`build/<文件名>.ts`
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    Path::new(BUILD_DIR).join(format!("{}.ts", name))
}

/// 读取源文件
pub fn read_source(path: &Path) -> CompileResult<String> {
    fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// 读取上一次的输出；文件不存在或输出到 stdout 时视为空
pub fn read_previous_output(path: &Path) -> CompileResult<String> {
    if path == Path::new(STDOUT_PATH) {
        return Ok(String::new());
    }
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(CompileError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// 写出生成结果，必要时创建目录
pub fn write_output(path: &Path, code: &str) -> CompileResult<()> {
    let io_error = |source: io::Error| CompileError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, code).map_err(io_error)
}
