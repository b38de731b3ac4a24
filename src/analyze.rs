//! 分析入口：提取指示，执行单条检查和结构检查，按启用集合过滤

use crate::diagcodes::EnabledSet;
use crate::diagnostic::Diagnostic;
use crate::directive::Directive;
use crate::error::Result;
use crate::preprocess::{extract_directives, split_lines};
use crate::simple::run_simple_checks;
use crate::structural::StructuralAnalyzer;
use crate::threshold::Thresholds;
use crate::utils::read_file;
use log::debug;

/// 分析选项
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// 启用的诊断
    pub enabled: EnabledSet,
    /// 阈值
    pub thresholds: Thresholds,
    /// 对用到预处理技巧的宏也给出建议
    pub analyze_true_preprocessor: bool,
}

/// 分析已经拆分好的物理行
pub fn analyze_lines<S: AsRef<str>>(lines: &[S], options: &Options) -> Result<Vec<Diagnostic>> {
    let directives = extract_directives(lines)?;
    Ok(analyze_directives(&directives, options))
}

/// 分析一段源代码
pub fn analyze_text(text: &str, options: &Options) -> Result<Vec<Diagnostic>> {
    analyze_lines(&split_lines(text), options)
}

/// 分析一个文件，`-`表示标准输入
pub fn analyze_file(path: &str, options: &Options) -> Result<Vec<Diagnostic>> {
    let text = read_file(path)?;
    debug!("analyzing {} ({} bytes)", path, text.len());
    analyze_text(&text, options)
}

/// 分析提取出的指示，结果按行号和编号排序
pub fn analyze_directives(directives: &[Directive], options: &Options) -> Vec<Diagnostic> {
    let mut result = run_simple_checks(directives, options);

    // 注释和字符串里的指示不参与结构检查
    let code: Vec<Directive> = directives.iter().filter(|d| d.in_code()).cloned().collect();
    let structural = StructuralAnalyzer::new(options.thresholds).run(&code);
    result.extend(
        structural
            .into_iter()
            .filter(|diagnostic| options.enabled.contains(diagnostic.code)),
    );

    result.sort_by_key(|diagnostic| (diagnostic.line_no, diagnostic.code));
    debug!(
        "{} diagnostic(s) from {} directive(s)",
        result.len(),
        directives.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagcodes::DiagCode;

    fn codes(text: &str, options: &Options) -> Vec<(usize, DiagCode)> {
        analyze_text(text, options)
            .unwrap()
            .iter()
            .map(|d| (d.line_no, d.code))
            .collect()
    }

    #[test]
    fn test_clean_header() {
        let text = "\
#ifndef CLEAN_H
#define CLEAN_H

#include <stddef.h>

int f(void);

#endif // CLEAN_H
";
        assert!(codes(text, &Options::default()).is_empty());
    }

    #[test]
    fn test_diagnostics_are_sorted() {
        let text = "#ifdef A\n#unknown\n";
        assert_eq!(
            codes(text, &Options::default()),
            [(1, DiagCode::UnbalancedIf), (2, DiagCode::Unknown)]
        );
    }

    #[test]
    fn test_disabled_structural_diagnostics() {
        let options = Options {
            enabled: EnabledSet::from_spec("all,-7").unwrap(),
            ..Options::default()
        };
        assert!(codes("#ifdef A\n", &options).is_empty());
    }

    #[test]
    fn test_commented_out_directives_do_not_unbalance() {
        let text = "#ifdef A\n/*\n#endif\n*/\n#endif\n";
        assert_eq!(codes(text, &Options::default()), [(3, DiagCode::WrongContext)]);
    }

    #[test]
    fn test_guarded_deep_nesting() {
        let text = "\
#ifndef G_H
#define G_H
#ifdef A
#ifdef B
#endif
#endif
#endif // G_H
";
        assert!(codes(text, &Options::default()).is_empty());

        let unguarded = "#ifdef X\n#ifdef A\n#ifdef B\n#endif\n#endif\n#endif // X\n";
        assert_eq!(codes(unguarded, &Options::default()), [(3, DiagCode::DeepNest)]);
    }
}
