//! 作用于整个文件的结构检查
//!
//! 三项检查互相独立：#if/#endif是否配对、嵌套是否过深、远处的#endif是否带注释。
//! 某项检查遇到多余的#endif时只终止它自己

use crate::bracket::{match_brackets, BracketVisitor};
use crate::diagcodes::DiagCode;
use crate::diagnostic::Diagnostic;
use crate::directive::Directive;
use crate::keywords::{CPLUSPLUS, KW_DEFINE, P_DEFINE};
use crate::threshold::Thresholds;
use log::trace;

/// 结构检查器
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralAnalyzer {
    /// 阈值
    thresholds: Thresholds,
}

impl StructuralAnalyzer {
    /// 构造方法
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// 执行所有结构检查
    pub fn run(&self, directives: &[Directive]) -> Vec<Diagnostic> {
        let mut result = self.excessive_ifdef_nesting(directives);
        result.extend(self.unmarked_remote_endif(directives));
        result.extend(self.unbalanced_if_endif(directives));
        result
    }

    /// 检查#if和#endif是否配对
    ///
    /// 只报告第一个多余的#endif，之后的状态已不可信
    pub fn unbalanced_if_endif(&self, directives: &[Directive]) -> Vec<Diagnostic> {
        let mut balance = Balance::default();
        let unclosed = match_brackets(directives, &mut balance);

        // 从最内层开始报告
        for opener in unclosed.into_iter().rev() {
            balance.result.push(Diagnostic::at(
                DiagCode::UnbalancedIf,
                opener,
                "Unbalanced opening directive found",
            ));
        }
        balance.result
    }

    /// 检查#if嵌套是否过深
    pub fn excessive_ifdef_nesting(&self, directives: &[Directive]) -> Vec<Diagnostic> {
        let mut nesting = Nesting {
            max_level: self.nesting_limit(directives),
            result: vec![],
        };
        match_brackets(directives, &mut nesting);
        nesting.result
    }

    /// 检查远处的#endif是否带有注释
    ///
    /// 注释的内容是否与#if的条件对应无法可靠判断，只要求存在
    pub fn unmarked_remote_endif(&self, directives: &[Directive]) -> Vec<Diagnostic> {
        let mut remote = RemoteEndif {
            max_distance: self.thresholds.ifdef_endif_distance,
            result: vec![],
        };
        match_brackets(directives, &mut remote);
        remote.result
    }

    /// 计算文件允许的嵌套层数
    pub fn nesting_limit(&self, directives: &[Directive]) -> usize {
        let mut max_level = self.thresholds.ifdef_nesting;
        if sense_for_include_guard(directives) {
            max_level += 1;
        }
        // 多个__cplusplus说明是extern "C"的写法，不是包住整个文件
        if count_cplusplus_guards(directives) == 1 {
            max_level += 1;
        }
        trace!("nesting limit is {}", max_level);
        max_level
    }
}

/// 是否为头文件保护的形式
///
/// 第一条是`#ifndef X`，第二条是`#define X`，最后一条是`#endif`
pub fn sense_for_include_guard(directives: &[Directive]) -> bool {
    if directives.len() < 3 {
        return false;
    }
    let first = &directives[0];
    let second = &directives[1];
    let last = &directives[directives.len() - 1];

    if !first.is_ifndef() || !last.is_close() {
        return false;
    }
    if !matches!(second.get_hashword(), KW_DEFINE | P_DEFINE) {
        return false;
    }
    match (first.first_symbol(), second.first_symbol()) {
        (Some(guard), Some(defined)) => guard == defined,
        _ => false,
    }
}

/// 统计`#ifdef __cplusplus`的个数
pub fn count_cplusplus_guards(directives: &[Directive]) -> usize {
    directives
        .iter()
        .filter(|d| d.is_ifdef() && d.first_symbol() == Some(CPLUSPLUS))
        .count()
}

/// 配对检查，只处理下溢
#[derive(Default)]
struct Balance {
    result: Vec<Diagnostic>,
}

impl<'a> BracketVisitor<'a> for Balance {
    fn on_underflow(&mut self, closer: &'a Directive) {
        self.result.push(Diagnostic::at(
            DiagCode::UnbalancedEndif,
            closer,
            "Unbalanced closing directive found",
        ));
    }
}

/// 嵌套深度检查
struct Nesting {
    max_level: usize,
    result: Vec<Diagnostic>,
}

impl<'a> BracketVisitor<'a> for Nesting {
    fn on_open(&mut self, opener: &'a Directive, enclosing: &[&'a Directive]) {
        if enclosing.len() + 1 <= self.max_level {
            return;
        }
        let mut message = "Nesting of if-endif is too deep.".to_string();
        for outer in enclosing.iter().rev() {
            message.push_str(&format!(
                " Earlier, an if-block was opened at line {}.",
                outer.get_line_no()
            ));
        }
        self.result.push(Diagnostic::at(DiagCode::DeepNest, opener, message));
    }
}

/// 远处#endif的注释检查
struct RemoteEndif {
    max_distance: usize,
    result: Vec<Diagnostic>,
}

impl<'a> BracketVisitor<'a> for RemoteEndif {
    fn on_close(&mut self, opener: &'a Directive, closer: &'a Directive) {
        let distance = closer.get_line_no().saturating_sub(opener.get_line_no());
        // 距离较近时能直接看到，不需要注释
        if distance <= self.max_distance {
            return;
        }
        // #endif之外至少还要有一个终结符
        if closer.get_tokens().len() >= 2 {
            return;
        }
        self.result.push(Diagnostic::at(
            DiagCode::UnmarkedEndif,
            closer,
            format!(
                "No trailing comment to match opening directive '{}' at line {} ({} lines apart)",
                opener.get_raw_text().trim(),
                opener.get_line_no(),
                distance
            ),
        ));
    }
}
