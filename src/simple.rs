//! 只作用于单条指示的诊断
//!
//! 每项检查都是对一条指示的独立模式匹配，没有共享状态

use crate::analyze::Options;
use crate::diagcodes::DiagCode;
use crate::diagnostic::Diagnostic;
use crate::directive::Directive;
use crate::keywords::{
    directive_contains_condition, directive_is_definition, ALL_DIRECTIVES, KW_IF, P_IF,
    PREPROCESSOR_PREFIXES,
};
use crate::threshold::Thresholds;
use crate::tokenize::line_ends_with_continuation;

/// 检查函数
pub type SimpleCheck = fn(&Directive, &Thresholds) -> Option<Diagnostic>;

/// 所有单条指示的检查
pub const SIMPLE_CHECKS: [(DiagCode, SimpleCheck); 13] = [
    (DiagCode::Unknown, unknown_directive),
    (DiagCode::Multiline, multi_line),
    (DiagCode::Whitespace, leading_whitespace),
    (DiagCode::ComplexIfCondition, complex_if_condition),
    (DiagCode::SpaceAfterLeading, space_after_hash),
    (DiagCode::SuggestInlineFunction, suggest_inline),
    (DiagCode::If0DeadCode, if_0_dead_code),
    (DiagCode::IfAlwaysTrue, if_always_true),
    (DiagCode::SuggestVoidFunction, suggest_void),
    (DiagCode::SuggestConst, suggest_constant),
    (DiagCode::TooLongDefine, too_long_define),
    (DiagCode::MultilineConditional, multiline_conditional),
    (DiagCode::WrongContext, wrong_context),
];

/// 可以用常量包住字面量的宏
const CONSTANT_WRAPPERS: [&str; 11] = [
    "INT8_C", "INT16_C", "INT32_C", "INT64_C", "UINT8_C", "UINT16_C", "UINT32_C", "UINT64_C",
    "INTMAX_C", "UINTMAX_C", "BIT",
];

/// 对所有指示执行启用的检查
pub fn run_simple_checks(directives: &[Directive], options: &Options) -> Vec<Diagnostic> {
    let mut result = vec![];
    for directive in directives {
        for (code, check) in SIMPLE_CHECKS.iter() {
            if !options.enabled.contains(*code) {
                continue;
            }
            // 注释或字符串里的指示只报告位置不对
            if !directive.in_code() && *code != DiagCode::WrongContext {
                continue;
            }
            // 用到预处理技巧的宏无法用语言本身替代，不给出建议
            if is_suggestion(*code)
                && !options.analyze_true_preprocessor
                && directive.uses_macro_tricks()
            {
                continue;
            }
            if let Some(diagnostic) = check(directive, &options.thresholds) {
                result.push(diagnostic);
            }
        }
    }
    result
}

/// 是否为建议类的诊断
fn is_suggestion(code: DiagCode) -> bool {
    matches!(
        code,
        DiagCode::SuggestInlineFunction | DiagCode::SuggestVoidFunction | DiagCode::SuggestConst
    )
}

/// 未知指示
pub fn unknown_directive(directive: &Directive, _: &Thresholds) -> Option<Diagnostic> {
    // 注释里的装饰性文字，如 ### title ###
    if !directive.in_code() {
        return None;
    }
    let hashword = directive.get_hashword();
    if ALL_DIRECTIVES.contains(hashword) {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::Unknown,
        directive,
        format!("Unknown directive {}", hashword),
    ))
}

/// 多行指示
pub fn multi_line(directive: &Directive, _: &Thresholds) -> Option<Diagnostic> {
    if !directive.is_multi_line() && !line_ends_with_continuation(directive.get_raw_text()) {
        return None;
    }
    Some(Diagnostic::at(DiagCode::Multiline, directive, "Multi-line directive"))
}

/// 指示以空白开头
pub fn leading_whitespace(directive: &Directive, _: &Thresholds) -> Option<Diagnostic> {
    let first = directive.get_raw_text().chars().next()?;
    if PREPROCESSOR_PREFIXES.contains(&first) {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::Whitespace,
        directive,
        "Preprocessor directive starts with whitespace",
    ))
}

/// 非字母数字符号的个数
fn count_non_alnum(txt: &str) -> usize {
    txt.chars()
        .filter(|c| !c.is_whitespace() && !c.is_ascii_alphanumeric() && *c != '_')
        .count()
}

/// 条件表达式过于复杂
///
/// 没有真正解析表达式，只检查逻辑/比较运算符、终结符数量和符号数量
pub fn complex_if_condition(directive: &Directive, thresholds: &Thresholds) -> Option<Diagnostic> {
    let hashword = directive.get_hashword();
    if !directive_contains_condition(hashword) {
        return None;
    }
    let args = directive.tokens_without_comment();

    let has_operators = args.iter().any(|token| {
        token.contains("&&") || token.contains("||") || token.contains('<') || token.contains('>')
    });
    let too_many_tokens = args.len() > thresholds.condition_tokens;
    let non_alnum: usize =
        count_non_alnum(hashword) + args.iter().map(|token| count_non_alnum(token)).sum::<usize>();

    if !has_operators && !too_many_tokens && non_alnum <= thresholds.condition_non_alnum {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::ComplexIfCondition,
        directive,
        "Logical condition looks to be overly complex",
    ))
}

/// 起始符号和关键字之间有空格
pub fn space_after_hash(directive: &Directive, _: &Thresholds) -> Option<Diagnostic> {
    let second = directive.get_raw_text().trim().chars().nth(1)?;
    if second != ' ' && second != '\t' {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::SpaceAfterLeading,
        directive,
        "Space between leading symbol and keyword",
    ))
}

/// 是否为标识符中的字符
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// 宏名后是否紧跟左括号，即函数宏
fn name_has_glued_paren(full_text: &str) -> bool {
    let rest = full_text.trim_start();
    // 跳过起始符号
    let Some(prefix) = rest.chars().next() else {
        return false;
    };
    let rest = rest[prefix.len_utf8()..].trim_start();
    // 跳过关键字
    let rest = rest.trim_start_matches(is_ident_char).trim_start();
    // 跳过宏名
    let after_name = rest.trim_start_matches(is_ident_char);
    after_name.len() != rest.len() && after_name.starts_with('(')
}

/// 宏定义的各个部分
struct MacroDefinition<'a> {
    /// 宏名
    name: &'a str,
    /// 函数宏的形参
    params: Option<Vec<&'a str>>,
    /// 宏体，不含注释
    body: &'a [String],
}

/// 解析#define
fn parse_definition(directive: &Directive) -> Option<MacroDefinition<'_>> {
    if !directive_is_definition(directive.get_hashword()) {
        return None;
    }
    let args = directive.tokens_without_comment();
    let name = args.first()?.as_str();

    if !name_has_glued_paren(directive.get_full_text()) {
        return Some(MacroDefinition {
            name,
            params: None,
            body: &args[1..],
        });
    }

    // args[1]为左括号
    let close = args.iter().position(|token| token == ")").unwrap_or(args.len());
    let params = args[2.min(close)..close]
        .iter()
        .map(|token| token.as_str())
        .filter(|token| *token != ",")
        .collect();
    let body = if close < args.len() { &args[close + 1..] } else { &[] };
    Some(MacroDefinition {
        name,
        params: Some(params),
        body,
    })
}

/// 跳过开头的括号参数列表，不论是否紧跟宏名
fn skip_parameter_list(body: &[String]) -> &[String] {
    if body.first().map(|token| token.as_str()) != Some("(") {
        return body;
    }
    match body.iter().position(|token| token == ")") {
        Some(close) => &body[close + 1..],
        None => &[],
    }
}

/// 建议使用static inline函数
pub fn suggest_inline(directive: &Directive, _: &Thresholds) -> Option<Diagnostic> {
    let definition = parse_definition(directive)?;
    let params = definition.params?;
    if params.is_empty() {
        return None;
    }
    // do { } while (0) 由suggest_void处理
    if definition.body.first().map(|token| token.as_str()) == Some("do") {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::SuggestInlineFunction,
        directive,
        "Suggest defining a static inline function instead",
    ))
}

/// 条件常量
fn constant_condition(directive: &Directive, value: &str) -> bool {
    matches!(directive.get_hashword(), KW_IF | P_IF)
        && directive.tokens_without_comment() == [value]
}

/// #if 0
pub fn if_0_dead_code(directive: &Directive, _: &Thresholds) -> Option<Diagnostic> {
    if !constant_condition(directive, "0") {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::If0DeadCode,
        directive,
        "Code block is always excluded, consider removing it",
    ))
}

/// #if 1
pub fn if_always_true(directive: &Directive, _: &Thresholds) -> Option<Diagnostic> {
    if !constant_condition(directive, "1") {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::IfAlwaysTrue,
        directive,
        "Condition is always true, consider removing it",
    ))
}

/// 宏体以do开头，建议使用static void函数
pub fn suggest_void(directive: &Directive, _: &Thresholds) -> Option<Diagnostic> {
    let definition = parse_definition(directive)?;
    let body = skip_parameter_list(definition.body);
    if body.first().map(|token| token.as_str()) != Some("do") {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::SuggestVoidFunction,
        directive,
        "Suggest defining a static void function instead",
    ))
}

/// 是否为数值字面量，允许正负号和整数后缀
fn is_number_literal(token: &str) -> bool {
    let token = token.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(token);
    let token = token.trim_end_matches(|c: char| matches!(c, 'u' | 'U' | 'l' | 'L'));
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    token.starts_with(|c: char| c.is_ascii_digit())
        && token.chars().all(|c| c.is_ascii_digit() || c == '.')
        && token.matches('.').count() <= 1
}

/// 是否为字符串或字符字面量
fn is_string_literal(token: &str) -> bool {
    token.len() >= 2
        && ((token.starts_with('"') && token.ends_with('"'))
            || (token.starts_with('\'') && token.ends_with('\'')))
}

/// 宏体是否为一个常量
fn is_constant_body(body: &[String]) -> bool {
    match body {
        [literal] => is_number_literal(literal) || is_string_literal(literal),
        [wrapper, open, literal, close] => {
            CONSTANT_WRAPPERS.contains(&wrapper.as_str())
                && open == "("
                && close == ")"
                && is_number_literal(literal.trim_start_matches('~'))
        }
        _ => false,
    }
}

/// 建议使用有类型的常量
pub fn suggest_constant(directive: &Directive, _: &Thresholds) -> Option<Diagnostic> {
    let definition = parse_definition(directive)?;
    if definition.params.is_some() || !is_constant_body(definition.body) {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::SuggestConst,
        directive,
        format!(
            "Suggest replacing macro {} with a typed constant or enum",
            definition.name
        ),
    ))
}

/// 宏定义行数过多
pub fn too_long_define(directive: &Directive, thresholds: &Thresholds) -> Option<Diagnostic> {
    let lines = directive.get_lines().len();
    if !directive_is_definition(directive.get_hashword()) || lines <= thresholds.define_lines {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::TooLongDefine,
        directive,
        format!("Macro definition is too long ({} lines)", lines),
    ))
}

/// 条件表达式跨越多行
pub fn multiline_conditional(
    directive: &Directive,
    thresholds: &Thresholds,
) -> Option<Diagnostic> {
    if !directive_contains_condition(directive.get_hashword())
        || directive.get_lines().len() <= thresholds.multiline_conditional
    {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::MultilineConditional,
        directive,
        "Condition spans several lines",
    ))
}

/// 指示位于注释或字符串中
pub fn wrong_context(directive: &Directive, _: &Thresholds) -> Option<Diagnostic> {
    if directive.in_code() {
        return None;
    }
    Some(Diagnostic::at(
        DiagCode::WrongContext,
        directive,
        format!("Preprocessor directive inside {}", directive.get_context()),
    ))
}
