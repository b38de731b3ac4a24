//! 诊断编号，以及选择启用哪些诊断的规则字符串
//!
//! 编号一经分配就不能复用，外部的白名单会保存这些编号

use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// 诊断种类
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum DiagCode {
    /// 未知指示
    Unknown = 1,
    /// 多行指示
    Multiline = 2,
    /// 指示前有空白
    Whitespace = 3,
    /// #if嵌套过深
    DeepNest = 4,
    /// 条件表达式过于复杂
    ComplexIfCondition = 5,
    /// 起始符号后有空格
    SpaceAfterLeading = 6,
    /// 没有闭合的#if
    UnbalancedIf = 7,
    /// 远处的#endif没有注释
    UnmarkedEndif = 8,
    /// 建议使用内联函数
    SuggestInlineFunction = 9,
    /// 没有对应#if的#endif
    UnbalancedEndif = 10,
    /// #if 0
    If0DeadCode = 11,
    /// #if 1
    IfAlwaysTrue = 12,
    /// 建议使用void函数
    SuggestVoidFunction = 13,
    /// 建议使用常量
    SuggestConst = 14,
    /// 宏定义过长
    TooLongDefine = 15,
    /// 条件跨越多行
    MultilineConditional = 16,
    /// 指示位于注释或字符串中
    WrongContext = 17,
}

impl DiagCode {
    /// 所有诊断
    pub const ALL: [DiagCode; 17] = [
        DiagCode::Unknown,
        DiagCode::Multiline,
        DiagCode::Whitespace,
        DiagCode::DeepNest,
        DiagCode::ComplexIfCondition,
        DiagCode::SpaceAfterLeading,
        DiagCode::UnbalancedIf,
        DiagCode::UnmarkedEndif,
        DiagCode::SuggestInlineFunction,
        DiagCode::UnbalancedEndif,
        DiagCode::If0DeadCode,
        DiagCode::IfAlwaysTrue,
        DiagCode::SuggestVoidFunction,
        DiagCode::SuggestConst,
        DiagCode::TooLongDefine,
        DiagCode::MultilineConditional,
        DiagCode::WrongContext,
    ];

    /// 编号
    pub fn number(self) -> u32 {
        self as u32
    }

    /// 根据编号查找
    pub fn from_number(number: u32) -> Option<DiagCode> {
        Self::ALL.into_iter().find(|code| code.number() == number)
    }

    /// 名称
    pub fn name(self) -> &'static str {
        match self {
            DiagCode::Unknown => "unknown",
            DiagCode::Multiline => "multiline",
            DiagCode::Whitespace => "whitespace",
            DiagCode::DeepNest => "deepnest",
            DiagCode::ComplexIfCondition => "complex_if_condition",
            DiagCode::SpaceAfterLeading => "space_after_leading",
            DiagCode::UnbalancedIf => "unbalanced_if",
            DiagCode::UnmarkedEndif => "unmarked_endif",
            DiagCode::SuggestInlineFunction => "suggest_inline_function",
            DiagCode::UnbalancedEndif => "unbalanced_endif",
            DiagCode::If0DeadCode => "if_0_dead_code",
            DiagCode::IfAlwaysTrue => "if_always_true",
            DiagCode::SuggestVoidFunction => "suggest_void_function",
            DiagCode::SuggestConst => "suggest_const",
            DiagCode::TooLongDefine => "too_long_define",
            DiagCode::MultilineConditional => "multiline_conditional",
            DiagCode::WrongContext => "wrong_context",
        }
    }
}

impl fmt::Display for DiagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{}", self.number())
    }
}

/// 诊断规则字符串的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagSpecError {
    /// 0不是合法的编号
    #[error("diagnostic code 0 is not allowed")]
    ZeroCode,
    /// 未知的编号
    #[error("unknown diagnostic code {0}")]
    UnknownCode(u32),
    /// 无法识别的片段
    #[error("unrecognized token '{0}'")]
    BadToken(String),
}

/// 将规则字符串按从左到右的顺序作用在编号全集`universe`上
///
/// 没有任何有效片段（空字符串或只有逗号）时得到全集；`all`并入全集；`-all`清空；
/// `N`加入N；`-N`移除N
pub fn parse_diag_spec(
    spec: &str,
    universe: &BTreeSet<u32>,
) -> Result<BTreeSet<u32>, DiagSpecError> {
    // 多余的逗号产生的空片段直接忽略
    let tokens: Vec<&str> = spec
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.is_empty() {
        return Ok(universe.clone());
    }

    let mut result = BTreeSet::new();
    for token in tokens {
        if token == "all" {
            result.extend(universe.iter().copied());
            continue;
        }
        if token == "-all" {
            result.clear();
            continue;
        }

        let (negative, digits) = match token.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, token),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DiagSpecError::BadToken(token.to_string()));
        }
        let number: u32 = digits
            .parse()
            .map_err(|_| DiagSpecError::BadToken(token.to_string()))?;
        if number == 0 {
            return Err(DiagSpecError::ZeroCode);
        }

        if negative {
            // 移除不存在的编号不算错误
            result.remove(&number);
        } else if universe.contains(&number) {
            result.insert(number);
        } else {
            return Err(DiagSpecError::UnknownCode(number));
        }
    }
    Ok(result)
}

/// 启用的诊断集合
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnabledSet {
    codes: BTreeSet<DiagCode>,
}

impl EnabledSet {
    /// 启用所有诊断
    pub fn all() -> Self {
        EnabledSet {
            codes: DiagCode::ALL.into_iter().collect(),
        }
    }

    /// 根据规则字符串构造
    pub fn from_spec(spec: &str) -> Result<Self, DiagSpecError> {
        let universe: BTreeSet<u32> = DiagCode::ALL.iter().map(|code| code.number()).collect();
        let numbers = parse_diag_spec(spec, &universe)?;
        Ok(EnabledSet {
            codes: numbers.into_iter().filter_map(DiagCode::from_number).collect(),
        })
    }

    /// 是否启用
    pub fn contains(&self, code: DiagCode) -> bool {
        self.codes.contains(&code)
    }

    /// 是否一个都没有启用
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// 遍历启用的诊断
    pub fn iter(&self) -> impl Iterator<Item = DiagCode> + '_ {
        self.codes.iter().copied()
    }
}

impl Default for EnabledSet {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> BTreeSet<u32> {
        [1, 2, 5, 99].into_iter().collect()
    }

    fn set(numbers: &[u32]) -> BTreeSet<u32> {
        numbers.iter().copied().collect()
    }

    #[test]
    fn test_codes_are_stable() {
        for (i, code) in DiagCode::ALL.into_iter().enumerate() {
            assert_eq!(code.number(), i as u32 + 1);
            assert_eq!(DiagCode::from_number(code.number()), Some(code));
        }
        assert_eq!(DiagCode::from_number(0), None);
        assert_eq!(DiagCode::from_number(18), None);
        assert_eq!(DiagCode::UnmarkedEndif.to_string(), "W8");
    }

    #[test]
    fn test_names_are_unique() {
        let names: BTreeSet<&str> = DiagCode::ALL.iter().map(|code| code.name()).collect();
        assert_eq!(names.len(), DiagCode::ALL.len());
    }

    #[test]
    fn test_keyword_all() {
        assert_eq!(parse_diag_spec("all", &universe()), Ok(universe()));
    }

    #[test]
    fn test_default_empty() {
        assert_eq!(parse_diag_spec("", &universe()), Ok(universe()));
        assert_eq!(parse_diag_spec("  ", &universe()), Ok(universe()));
    }

    #[test]
    fn test_only_commas_means_all() {
        assert_eq!(parse_diag_spec(",", &universe()), Ok(universe()));
        assert_eq!(parse_diag_spec(" , ,", &universe()), Ok(universe()));
        assert_eq!(EnabledSet::from_spec(",,").unwrap(), EnabledSet::all());
    }

    #[test]
    fn test_single_and_comma_numbers() {
        assert_eq!(parse_diag_spec("1", &universe()), Ok(set(&[1])));
        assert_eq!(parse_diag_spec("1,99", &universe()), Ok(set(&[1, 99])));
        assert_eq!(parse_diag_spec("1,1,1,1,", &universe()), Ok(set(&[1])));
    }

    #[test]
    fn test_minus_all() {
        assert_eq!(parse_diag_spec("1,2,-all", &universe()), Ok(set(&[])));
    }

    #[test]
    fn test_minus_number() {
        assert_eq!(parse_diag_spec("all,-99", &universe()), Ok(set(&[1, 2, 5])));
        assert_eq!(parse_diag_spec("2,5,-2", &universe()), Ok(set(&[5])));
        assert_eq!(parse_diag_spec("1,2,5,-99", &universe()), Ok(set(&[1, 2, 5])));
        assert_eq!(parse_diag_spec("all,-100", &universe()), Ok(universe()));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_diag_spec("1,0", &universe()), Err(DiagSpecError::ZeroCode));
        assert_eq!(parse_diag_spec("100", &universe()), Err(DiagSpecError::UnknownCode(100)));
        assert_eq!(
            parse_diag_spec("1,bad_token", &universe()),
            Err(DiagSpecError::BadToken("bad_token".to_string()))
        );
        assert!(parse_diag_spec("-", &universe()).is_err());
        assert!(parse_diag_spec("+3", &universe()).is_err());
    }

    #[test]
    fn test_enabled_set() {
        let enabled = EnabledSet::from_spec("all,-2").unwrap();
        assert!(!enabled.contains(DiagCode::Multiline));
        assert!(enabled.contains(DiagCode::UnmarkedEndif));
        assert!(EnabledSet::from_spec("-all").unwrap().is_empty());
        assert_eq!(EnabledSet::from_spec("").unwrap(), EnabledSet::all());
        assert_eq!(EnabledSet::from_spec("17").unwrap().iter().count(), 1);
    }
}
