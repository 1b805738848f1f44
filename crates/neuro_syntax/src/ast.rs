//! Program Model
//!
//! 解析结果：按源码顺序排列的顶层结构。顺序同时决定输出顺序
//! 和生成时上下文累积的顺序。

use std::fmt;

/// 函数参数 `name: type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    /// 没有写类型时为空串
    pub ty: String,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ty.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}: {}", self.name, self.ty)
        }
    }
}

/// 等待生成的函数桩
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionStub {
    pub name: String,
    pub args: Vec<Argument>,
    /// 缺省为 `void`
    pub return_type: String,
    /// 函数体内的注释行，按源码顺序用 `\n` 连接
    pub comment: String,
}

/// 固定函数：沿用上一次生成的函数体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedFunction {
    pub stub: FunctionStub,
    /// 上一次输出中从函数头到 `}` 的原文
    pub body: String,
}

/// 原样输出的类型定义块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub body: String,
}

/// 联合类型 `union type Name = A | B;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionType {
    pub name: String,
    pub tags: Vec<String>,
}

/// 导出列表 `export A, B`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportList {
    pub names: Vec<String>,
}

/// 顶层结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    Function(FunctionStub),
    Pinned(PinnedFunction),
    Type(TypeDefinition),
    Union(UnionType),
    Export(ExportList),
}

impl Construct {
    /// 函数名（仅函数和固定函数有）
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Construct::Function(stub) => Some(&stub.name),
            Construct::Pinned(pinned) => Some(&pinned.stub.name),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Construct::Function(_) => "function",
            Construct::Pinned(_) => "pinned function",
            Construct::Type(_) => "type definition",
            Construct::Union(_) => "union type",
            Construct::Export(_) => "export",
        }
    }
}

/// 整个程序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub constructs: Vec<Construct>,
}

impl Program {
    pub fn new(constructs: Vec<Construct>) -> Self {
        Self { constructs }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Construct> {
        self.constructs.iter()
    }

    pub fn len(&self) -> usize {
        self.constructs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructs.is_empty()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Construct;
    type IntoIter = std::slice::Iter<'a, Construct>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
