//! 错误类型

use crate::diagcodes::DiagSpecError;
use std::io;
use thiserror::Error;

/// 分析过程中可能出现的错误
#[derive(Debug, Error)]
pub enum Error {
    /// 指示的文本为空，由调用方保证不会出现
    #[error("line {line_no}: directive must have at least one symbol (# or similar)")]
    BlankDirective {
        /// 行号
        line_no: usize,
    },

    /// 诊断选择字符串有误
    #[error("bad diagnostics specification: {0}")]
    DiagSpec(#[from] DiagSpecError),

    /// 白名单文件格式有误
    #[error("{path}:{line_no}: malformed whitelist entry '{text}'")]
    Whitelist {
        /// 白名单文件
        path: String,
        /// 行号
        line_no: usize,
        /// 该行内容
        text: String,
    },

    /// 读取文件失败
    #[error("cannot read {path}: {source}")]
    Io {
        /// 文件路径
        path: String,
        /// 原始错误
        #[source]
        source: io::Error,
    },

    /// 文件名模式有误
    #[error("bad file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// 命令行参数有误
    #[error("{0}")]
    Args(String),
}

/// 本crate的Result
pub type Result<T> = std::result::Result<T, Error>;
