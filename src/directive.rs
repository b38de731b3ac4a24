//! 预处理指示
//!
//! 一条指示可以通过续行符跨越多个物理行，创建后不再修改

use crate::context::Context;
use crate::error::{Error, Result};
use crate::keywords::{
    is_close_directive, is_open_directive, KW_IF, KW_IFDEF, KW_IFNDEF, P_IF, P_IFDEF, P_IFNDEF,
    PREDEFINED_MACROS, VARIADIC_MACROS,
};
use crate::tokenize::{combine_lines, merge_leading_symbol, tokenize};
use std::fmt;

/// 经过终结符解析的预处理指示
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    /// 起始行号，从1开始
    line_no: usize,
    /// 原始的物理行
    lines: Vec<String>,
    /// 拼接后的逻辑行
    full_text: String,
    /// 逻辑行的终结符，第一个为关键字
    tokens: Vec<String>,
    /// 进入第一行时的上下文
    context: Context,
}

impl Directive {
    /// 构造方法
    pub fn new<S: AsRef<str>>(lines: &[S], line_no: usize, context: Context) -> Result<Self> {
        let lines: Vec<String> = lines.iter().map(|line| line.as_ref().to_string()).collect();
        let full_text = combine_lines(&lines);
        let tokens = merge_leading_symbol(tokenize(&full_text));
        if tokens.is_empty() {
            return Err(Error::BlankDirective { line_no });
        }
        Ok(Directive {
            line_no,
            lines,
            full_text,
            tokens,
            context,
        })
    }

    /// 构造处于普通代码中的单行指示
    pub fn from_line(line: &str, line_no: usize) -> Result<Self> {
        Self::new(&[line], line_no, Context::Outside)
    }

    /// 起始行号
    pub fn get_line_no(&self) -> usize {
        self.line_no
    }

    /// 最后一行的行号
    pub fn get_last_line_no(&self) -> usize {
        self.line_no + self.lines.len() - 1
    }

    /// 所有物理行
    pub fn get_lines(&self) -> &[String] {
        &self.lines
    }

    /// 第一行的原始文本
    pub fn get_raw_text(&self) -> &str {
        &self.lines[0]
    }

    /// 拼接后的逻辑行
    pub fn get_full_text(&self) -> &str {
        &self.full_text
    }

    /// 所有终结符
    pub fn get_tokens(&self) -> &[String] {
        &self.tokens
    }

    /// 规范化后的关键字，如`#define`
    pub fn get_hashword(&self) -> &str {
        &self.tokens[0]
    }

    /// 进入指示时的上下文
    pub fn get_context(&self) -> Context {
        self.context
    }

    /// 指示是否位于普通代码中（不在注释或字符串里）
    pub fn in_code(&self) -> bool {
        self.context == Context::Outside
    }

    /// 是否为多行指示
    pub fn is_multi_line(&self) -> bool {
        self.lines.len() > 1
    }

    /// 是否打开一个条件块
    pub fn is_open(&self) -> bool {
        is_open_directive(self.get_hashword())
    }

    /// 是否关闭一个条件块
    pub fn is_close(&self) -> bool {
        is_close_directive(self.get_hashword())
    }

    /// 关键字之后、注释之前的终结符
    pub fn tokens_without_comment(&self) -> &[String] {
        let args = &self.tokens[1..];
        let end = args
            .iter()
            .position(|token| token.contains("//") || token.contains("/*"))
            .unwrap_or(args.len());
        &args[..end]
    }

    /// `#ifndef X`或者`#if !defined(X)`
    pub fn is_ifndef(&self) -> bool {
        match self.get_hashword() {
            KW_IFNDEF | P_IFNDEF => true,
            KW_IF | P_IF => {
                self.tokens.len() >= 3 && self.tokens[1] == "!" && self.tokens[2] == "defined"
            }
            _ => false,
        }
    }

    /// `#ifdef X`或者`#if defined(X)`
    pub fn is_ifdef(&self) -> bool {
        match self.get_hashword() {
            KW_IFDEF | P_IFDEF => true,
            KW_IF | P_IF => self.tokens.len() >= 2 && self.tokens[1] == "defined",
            _ => false,
        }
    }

    /// 关键字后第一个由字母数字下划线组成的符号，跳过`defined`
    pub fn first_symbol(&self) -> Option<&str> {
        self.tokens[1..]
            .iter()
            .map(|token| token.as_str())
            .find(|token| is_alnum_underscore(token) && *token != "defined")
    }

    /// 是否用到了无法用语言本身替代的预处理技巧
    ///
    /// 包括预定义宏、`##`拼接、`#x`字符串化和可变参数
    pub fn uses_macro_tricks(&self) -> bool {
        self.tokens_without_comment().iter().any(|token| {
            token == "##"
                || token.starts_with('#')
                || PREDEFINED_MACROS.contains(token.as_str())
                || VARIADIC_MACROS.contains(token.as_str())
        })
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_raw_text().trim_end())
    }
}

/// 是否只由字母数字下划线组成
pub fn is_alnum_underscore(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
