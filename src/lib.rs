//! C/C++预处理指示的静态检查
//!
//! 不做宏展开，也不计算条件表达式，只对指示本身的写法和#if/#endif的结构给出诊断
//!

#![deny(missing_docs)]

mod analyze;
mod args;
mod bracket;
mod context;
mod diagcodes;
mod diagnostic;
mod directive;
mod error;
mod error_print;
mod keywords;
mod logger;
mod preprocess;
mod simple;
mod structural;
mod threshold;
mod tokenize;
mod utils;
mod whitelist;

use log::{error, info};
use std::io::Write;

pub use analyze::{analyze_directives, analyze_file, analyze_lines, analyze_text, Options};
pub use args::{parse_args, usage, Args};
pub use bracket::{match_brackets, BracketVisitor};
pub use context::{update_language_context, Context, ContextToken};
pub use diagcodes::{parse_diag_spec, DiagCode, DiagSpecError, EnabledSet};
pub use diagnostic::Diagnostic;
pub use directive::Directive;
pub use error::{Error, Result};
pub use error_print::{format_diagnostic, print_diagnostics, print_registry};
pub use logger::{init as init_logger, level_for};
pub use preprocess::{extract_directives, split_lines};
pub use simple::{run_simple_checks, SimpleCheck, SIMPLE_CHECKS};
pub use structural::{count_cplusplus_guards, sense_for_include_guard, StructuralAnalyzer};
pub use threshold::Thresholds;
pub use tokenize::{combine_lines, extract_multiline_sequence, tokenize};
pub use utils::{expand_inputs, read_file};
pub use whitelist::Whitelist;

/// 分析命令行给出的所有输入，诊断写到`out`，返回输出的诊断条数
///
/// 某个输入读取失败时记录日志并继续分析其余输入，最后返回第一个读取错误
pub fn run(args: &Args, out: &mut impl Write) -> Result<usize> {
    let options = args.options()?;
    let inputs = expand_inputs(&args.inputs)?;
    let mut total = 0;
    let mut failure = None;

    for input in &inputs {
        let mut diagnostics = match analyze_file(input, &options) {
            Ok(diagnostics) => diagnostics,
            Err(err @ Error::Io { .. }) => {
                error!("{}", err);
                failure.get_or_insert(err);
                continue;
            }
            Err(err) => return Err(err),
        };
        if let Some(path) = &args.whitelist {
            let whitelist = Whitelist::read(path, input)?;
            diagnostics = whitelist.filter(diagnostics);
        }
        info!("{}: {} diagnostic(s)", input, diagnostics.len());
        total += diagnostics.len();

        if !args.quiet {
            print_diagnostics(out, input, &diagnostics).map_err(|source| Error::Io {
                path: "<stdout>".to_string(),
                source,
            })?;
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(total),
    }
}
