//! 诊断结果

use crate::diagcodes::DiagCode;
use crate::directive::Directive;
use std::fmt;

/// 一条诊断
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断种类
    pub code: DiagCode,
    /// 行号
    pub line_no: usize,
    /// 说明
    pub message: String,
    /// 对应的源代码行
    pub text: Option<String>,
}

impl Diagnostic {
    /// 构造方法
    pub fn new(code: DiagCode, line_no: usize, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            line_no,
            message: message.into(),
            text: None,
        }
    }

    /// 针对某条指示的诊断，带上指示的源代码行
    pub fn at(code: DiagCode, directive: &Directive, message: impl Into<String>) -> Self {
        Diagnostic {
            text: Some(directive.to_string()),
            ..Self::new(code, directive.get_line_no(), message)
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
