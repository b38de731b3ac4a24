//! 各项诊断使用的阈值

/// 阈值配置
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    /// #if允许的嵌套层数，头文件保护和__cplusplus会各加一层
    pub ifdef_nesting: usize,
    /// 条件表达式允许的终结符数量
    pub condition_tokens: usize,
    /// 条件表达式允许的非字母数字符号数量
    pub condition_non_alnum: usize,
    /// 宏定义允许的行数
    pub define_lines: usize,
    /// 条件表达式允许的行数
    pub multiline_conditional: usize,
    /// #if与#endif之间超过此行数时，#endif需要带注释
    pub ifdef_endif_distance: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            ifdef_nesting: 2,
            condition_tokens: 5,
            condition_non_alnum: 6,
            define_lines: 5,
            multiline_conditional: 1,
            ifdef_endif_distance: 4,
        }
    }
}
