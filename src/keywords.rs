//! C/C++预处理器关键字

use lazy_static::lazy_static;
use std::collections::HashSet;

/// 指示: include
pub const KW_INCLUDE: &str = "#include";
/// 指示: define
pub const KW_DEFINE: &str = "#define";
/// 指示: undef
pub const KW_UNDEF: &str = "#undef";
/// 指示: ifdef
pub const KW_IFDEF: &str = "#ifdef";
/// 指示: ifndef
pub const KW_IFNDEF: &str = "#ifndef";
/// 指示: if
pub const KW_IF: &str = "#if";
/// 指示: else
pub const KW_ELSE: &str = "#else";
/// 指示: elif
pub const KW_ELIF: &str = "#elif";
/// 指示: endif
pub const KW_ENDIF: &str = "#endif";
/// 指示: error
pub const KW_ERROR: &str = "#error";
/// 指示: pragma
pub const KW_PRAGMA: &str = "#pragma";
/// 指示: line
pub const KW_LINE: &str = "#line";

/// 元语言指示: %if
pub const P_IF: &str = "%if";
/// 元语言指示: %ifdef
pub const P_IFDEF: &str = "%ifdef";
/// 元语言指示: %ifndef
pub const P_IFNDEF: &str = "%ifndef";
/// 元语言指示: %endif
pub const P_ENDIF: &str = "%endif";
/// 元语言指示: %define
pub const P_DEFINE: &str = "%define";
/// 元语言指示: %else
pub const P_ELSE: &str = "%else";

/// 标准指示列表
pub const STD_DIRECTIVES: [&str; STD_DIRECTIVE_COUNT] = [
    KW_INCLUDE, KW_DEFINE, KW_UNDEF, KW_IFDEF, KW_IFNDEF, KW_IF, KW_ELSE, KW_ELIF, KW_ENDIF,
    KW_ERROR, KW_PRAGMA, KW_LINE,
];

/// 标准指示数量
const STD_DIRECTIVE_COUNT: usize = 12;

/// 元语言指示列表
pub const META_DIRECTIVES: [&str; META_DIRECTIVE_COUNT] =
    [P_IF, P_IFDEF, P_IFNDEF, P_ENDIF, P_DEFINE, P_ELSE];

/// 元语言指示数量
const META_DIRECTIVE_COUNT: usize = 6;

/// 指示的起始符号
pub const PREPROCESSOR_PREFIXES: [char; 2] = ['#', '%'];

/// __cplusplus需要特殊对待，所以不放在预定义宏里
pub const CPLUSPLUS: &str = "__cplusplus";

lazy_static! {
    /// 所有已知的指示
    pub static ref ALL_DIRECTIVES: HashSet<&'static str> = STD_DIRECTIVES
        .iter()
        .chain(META_DIRECTIVES.iter())
        .copied()
        .collect();

    /// 标准预定义宏
    pub static ref PREDEFINED_MACROS: HashSet<&'static str> = [
        "__FILE__",
        "__LINE__",
        "__DATE__",
        "__TIME__",
        "__func__",
        "__FUNCTION__",
    ]
    .into_iter()
    .collect();

    /// 可变参数宏相关的符号
    pub static ref VARIADIC_MACROS: HashSet<&'static str> =
        ["...", "__VA_ARGS__", "__VA_OPT__"].into_iter().collect();
}

/// 是否为打开条件块的指示
pub fn is_open_directive(hashword: &str) -> bool {
    matches!(hashword, KW_IF | KW_IFDEF | KW_IFNDEF | P_IF | P_IFDEF | P_IFNDEF)
}

/// 是否为关闭条件块的指示
pub fn is_close_directive(hashword: &str) -> bool {
    matches!(hashword, KW_ENDIF | P_ENDIF)
}

/// 是否为携带条件表达式的指示
pub fn directive_contains_condition(hashword: &str) -> bool {
    matches!(hashword, KW_IF | KW_ELIF | P_IF)
}

/// 是否为宏定义
///
/// %define不能被替换成内联函数，所以不在此列
pub fn directive_is_definition(hashword: &str) -> bool {
    hashword == KW_DEFINE
}

/// 行首（忽略空白）是否为指示的起始符号
pub fn line_is_preprocessor_directive(line: &str) -> bool {
    line.trim()
        .chars()
        .next()
        .map_or(false, |c| PREPROCESSOR_PREFIXES.contains(&c))
}
