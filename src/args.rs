//! 命令行参数解析

use crate::analyze::Options;
use crate::diagcodes::EnabledSet;
use crate::error::{Error, Result};
use crate::logger::{level_names, LOG_ENV};
use crate::threshold::Thresholds;

/// 解析好的命令行参数
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    /// 输入文件或模式
    pub inputs: Vec<String>,
    /// -q选项，不输出诊断
    pub quiet: bool,
    /// -D选项，诊断选择字符串
    pub diagnostics: String,
    /// -w选项，白名单文件
    pub whitelist: Option<String>,
    /// --analyze-true-preprocessor选项
    pub analyze_true_preprocessor: bool,
    /// --max-nesting选项
    pub max_nesting: Option<usize>,
    /// --max-endif-distance选项
    pub max_endif_distance: Option<usize>,
    /// -l选项，列出所有诊断
    pub list: bool,
    /// --help选项
    pub help: bool,
    /// -v的个数
    pub verbosity: usize,
}

impl Args {
    /// 创建空对象
    pub fn new() -> Args {
        Args::default()
    }

    /// 根据参数构造分析选项
    pub fn options(&self) -> Result<Options> {
        let mut thresholds = Thresholds::default();
        if let Some(max_nesting) = self.max_nesting {
            thresholds.ifdef_nesting = max_nesting;
        }
        if let Some(max_endif_distance) = self.max_endif_distance {
            thresholds.ifdef_endif_distance = max_endif_distance;
        }
        Ok(Options {
            enabled: EnabledSet::from_spec(&self.diagnostics)?,
            thresholds,
            analyze_true_preprocessor: self.analyze_true_preprocessor,
        })
    }

    fn parse_io(args: &[String]) -> Result<Self> {
        let mut result = Args::new();

        // 跳过程序名
        let mut i = 1;
        while i < args.len() {
            let arg = args[i].as_str();

            // 如果存在help，则直接显示用法说明
            if arg.eq("--help") || arg.eq("-h") {
                result.help = true;
                i += 1;
                continue;
            }

            if arg.eq("-q") || arg.eq("--quiet") {
                result.quiet = true;
                i += 1;
                continue;
            }

            if arg.eq("-l") || arg.eq("--list") {
                result.list = true;
                i += 1;
                continue;
            }

            if arg.eq("--analyze-true-preprocessor") {
                result.analyze_true_preprocessor = true;
                i += 1;
                continue;
            }

            // 解析-v，可以写成-vvv
            if arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v') {
                result.verbosity += arg.len() - 1;
                i += 1;
                continue;
            }

            if arg.eq("-D") || arg.eq("--diagnostics") {
                result.diagnostics = take_value(args, i)?.to_string();
                i += 2;
                continue;
            }

            if let Some(spec) = arg.strip_prefix("-D") {
                result.diagnostics = spec.to_string();
                i += 1;
                continue;
            }

            if arg.eq("-w") || arg.eq("--whitelist") {
                result.whitelist = Some(take_value(args, i)?.to_string());
                i += 2;
                continue;
            }

            if arg.eq("--max-nesting") {
                result.max_nesting = Some(take_number(args, i)?);
                i += 2;
                continue;
            }

            if arg.eq("--max-endif-distance") {
                result.max_endif_distance = Some(take_number(args, i)?);
                i += 2;
                continue;
            }

            // 解析为-的参数
            if arg.starts_with('-') && arg.len() > 1 {
                return Err(Error::Args(format!("unknown argument: {}", arg)));
            }

            result.inputs.push(arg.to_string());
            i += 1;
        }

        if result.inputs.is_empty() && !result.help && !result.list {
            return Err(Error::Args("no input files".to_string()));
        }
        Ok(result)
    }
}

/// 取出选项`args[i]`后面的值
fn take_value(args: &[String], i: usize) -> Result<&str> {
    match args.get(i + 1) {
        Some(value) => Ok(value.as_str()),
        None => Err(Error::Args(format!("option {} requires an argument", args[i]))),
    }
}

/// 取出选项`args[i]`后面的非负整数
fn take_number(args: &[String], i: usize) -> Result<usize> {
    let value = take_value(args, i)?;
    value
        .parse()
        .map_err(|_| Error::Args(format!("invalid value for {}: {}", args[i], value)))
}

/// 解析命令行参数，`args[0]`为程序名
pub fn parse_args(args: &[String]) -> Result<Args> {
    Args::parse_io(args)
}

/// 程序的使用说明
pub fn usage() -> String {
    format!(
        "\
usage: cppsa [options] <file|pattern>...

  -q, --quiet                  do not print diagnostics, only set the exit status
  -D<spec>, --diagnostics <spec>
                               select diagnostics, e.g. -D-all,1,7 or -Dall,-14
  -w, --whitelist <file>       suppress the (line, code) pairs listed in <file>
  --analyze-true-preprocessor  also suggest replacements for macros relying on
                               token pasting, stringification or variadics
  --max-nesting <n>            allowed #if nesting depth (default {})
  --max-endif-distance <n>     lines an #endif may be from its #if without a
                               comment (default {})
  -l, --list                   list all diagnostics and exit
  -v                           more logging, may be repeated; {} overrides
                               ({})
  -h, --help                   show this message

Use - to read from standard input.",
        Thresholds::default().ifdef_nesting,
        Thresholds::default().ifdef_endif_distance,
        LOG_ENV,
        level_names().join("|").to_lowercase()
    )
}
