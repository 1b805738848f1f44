use async_trait::async_trait;
use neuro_codegen::{CompletionProvider, CompletionRequest, ProviderError};
use neuro_driver::{read_previous_output, write_output, CompileError, SourceFile};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::tempdir;

/// 每次调用返回带序号的函数体，方便看出是否重新生成
#[derive(Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl CompletionProvider for CountingProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Some(format!(
            "function {}() {{\n  return {};\n}}",
            request.function, n
        )))
    }
}

const SOURCE: &str = "pinned function stable(): number {\n  // a fixed number\n}\n\nfunction fresh(): number {\n  // another number\n}\n";

#[tokio::test]
async fn second_run_reuses_pinned_bodies() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("app.neuro");
    let output = dir.path().join("build").join("app.neuro.ts");
    fs::write(&input, SOURCE).unwrap();

    let provider = CountingProvider::default();

    let first = SourceFile::load(&input, Some(&output))
        .unwrap()
        .compile(&provider)
        .await
        .unwrap();
    assert_eq!(
        first.code,
        "function stable() {\n  return 1;\n}\n\nfunction fresh() {\n  return 2;\n}"
    );
    write_output(&output, &first.code).unwrap();

    let second = SourceFile::load(&input, Some(&output))
        .unwrap()
        .compile(&provider)
        .await
        .unwrap();
    assert_eq!(
        second.code,
        "function stable() {\n  return 1;\n}\n\nfunction fresh() {\n  return 3;\n}"
    );
    assert_eq!(second.report.pinned, 1);
    assert_eq!(second.report.requested, 1);
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempdir().unwrap();

    let result = SourceFile::load(&dir.path().join("nope.neuro"), Some(&dir.path().join("out.ts")));

    assert!(matches!(result, Err(CompileError::Io { .. })));
}

#[test]
fn missing_previous_output_reads_as_empty() {
    let dir = tempdir().unwrap();
    assert_eq!(read_previous_output(&dir.path().join("absent.ts")).unwrap(), "");
}

#[test]
fn write_output_creates_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("out.ts");

    write_output(&path, "main();").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "main();");
}

#[test]
fn check_reports_all_header_errors() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.neuro");
    fs::write(&input, "function (): void {\n}\n\nfunction g: void {\n}\n").unwrap();

    match SourceFile::load(&input, None) {
        Err(CompileError::Parse(failure)) => assert_eq!(failure.errors.len(), 2),
        other => panic!("expected parse failure, got {:?}", other),
    }
}

#[tokio::test]
async fn type_fields_do_not_break_the_second_run() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tool.neuro");
    let output = dir.path().join("tool.neuro.ts");
    fs::write(
        &input,
        "type Tool = {\n    functionName: string;\n}\n\npinned function main(): void {\n    // print the tool\n}\n",
    )
    .unwrap();

    let provider = CountingProvider::default();

    let first = SourceFile::load(&input, Some(&output))
        .unwrap()
        .compile(&provider)
        .await
        .unwrap();
    write_output(&output, &first.code).unwrap();

    let second = SourceFile::load(&input, Some(&output))
        .unwrap()
        .compile(&provider)
        .await
        .unwrap();

    assert_eq!(second.code, first.code);
    assert_eq!(second.report.pinned, 1);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}
