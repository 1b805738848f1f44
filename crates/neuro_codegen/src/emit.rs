//! Structural Emission
//!
//! 不需要补全服务的部分：函数桩、联合类型、导出的文本还原，
//! 以及系统指令和补全结果的后处理。

use neuro_syntax::{ExportList, FunctionStub, UnionType};

/// 程序入口函数名
pub const ENTRY_POINT: &str = "main";

/// 输出末尾追加的入口调用
pub const ENTRY_POINT_CALL: &str = "main();";

const FENCE: &str = "```";

/// `function name(a: A, b: B): R {`
pub fn render_signature(stub: &FunctionStub) -> String {
    let args = stub
        .args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let return_type = if stub.return_type.is_empty() {
        "void"
    } else {
        stub.return_type.as_str()
    };
    format!("function {}({}): {} {{", stub.name, args, return_type)
}

/// 函数桩：签名加上原注释作为唯一的函数体内容
pub fn render_stub(stub: &FunctionStub) -> String {
    if stub.comment.is_empty() {
        format!("{}\n}}", render_signature(stub))
    } else {
        format!("{}\n{}\n}}", render_signature(stub), stub.comment)
    }
}

/// `type Name = A | B | C;`
pub fn render_union(union: &UnionType) -> String {
    format!("type {} = {};", union.name, union.tags.join(" | "))
}

/// `export { A, B };`
pub fn render_export(exports: &ExportList) -> String {
    format!("export {{ {} }};", exports.names.join(", "))
}

/// 发给补全服务的系统指令
pub fn system_instruction(function: &str) -> String {
    format!(
        "Auto complete only the TypeScript function called {function} as purely plain TypeScript. \
         Only complete the function given and assume the others are implemented. \
         Respond with the single function {function}, signature and body, and nothing else. \
         Do not wrap the code in markdown. Do not explain the code. \
         Do not provide the code for other functions or types."
    )
}

/// 去掉补全结果外层的 markdown 代码围栏（首行和末行）
pub fn strip_fence(text: &str) -> String {
    if !text.starts_with(FENCE) {
        return text.to_string();
    }

    let lines: Vec<&str> = text.trim_end().split('\n').collect();
    if lines.len() <= 2 {
        return String::new();
    }
    lines[1..lines.len() - 1].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuro_syntax::Argument;
    use pretty_assertions::assert_eq;

    fn stub(comment: &str) -> FunctionStub {
        FunctionStub {
            name: "greet".to_string(),
            args: vec![
                Argument {
                    name: "name".to_string(),
                    ty: "string".to_string(),
                },
                Argument {
                    name: "loud".to_string(),
                    ty: String::new(),
                },
            ],
            return_type: "string".to_string(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_render_stub_with_comment() {
        assert_eq!(
            render_stub(&stub("    // say hello")),
            "function greet(name: string, loud): string {\n    // say hello\n}"
        );
    }

    #[test]
    fn test_render_stub_without_comment() {
        assert_eq!(
            render_stub(&stub("")),
            "function greet(name: string, loud): string {\n}"
        );
    }

    #[test]
    fn test_empty_return_type_renders_void() {
        let mut f = stub("");
        f.return_type.clear();
        assert!(render_signature(&f).ends_with("): void {"));
    }

    #[test]
    fn test_render_union() {
        let union = UnionType {
            name: "Shade".to_string(),
            tags: vec!["Red".to_string(), "Green".to_string(), "Blue".to_string()],
        };
        assert_eq!(render_union(&union), "type Shade = Red | Green | Blue;");
    }

    #[test]
    fn test_render_export() {
        let exports = ExportList {
            names: vec!["greet".to_string(), "Shade".to_string()],
        };
        assert_eq!(render_export(&exports), "export { greet, Shade };");
    }

    #[test]
    fn test_system_instruction_names_function() {
        let text = system_instruction("greet");
        assert!(text.contains("function called greet"));
        assert!(text.contains("Do not wrap the code in markdown"));
    }

    #[test]
    fn test_strip_fence() {
        assert_eq!(
            strip_fence("```typescript\nfunction f() {\n  return 1;\n}\n```"),
            "function f() {\n  return 1;\n}"
        );
        assert_eq!(
            strip_fence("```ts\nfunction f() {\n}\n```\n"),
            "function f() {\n}"
        );
    }

    #[test]
    fn test_unfenced_text_is_untouched() {
        let text = "function f() {\n}\n";
        assert_eq!(strip_fence(text), text);
    }

    #[test]
    fn test_fence_only() {
        assert_eq!(strip_fence("```"), "");
        assert_eq!(strip_fence("```\n```"), "");
    }
}
