//! 源文件的滚动词法上下文
//!
//! 用一个有限状态机跟踪每个位置处于代码、块注释、行注释还是字符串中，
//! 状态跨行保持，直到遇到对应的结束符号

use std::fmt;

/// 词法上下文
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Context {
    /// 普通代码
    Outside,
    /// 块注释 /* */
    BlockComment,
    /// 行注释 //
    LineComment,
    /// 字符串
    QuotedString,
}

impl Context {
    /// 所有状态
    pub const ALL: [Context; 4] = [
        Context::Outside,
        Context::BlockComment,
        Context::LineComment,
        Context::QuotedString,
    ];

    /// 状态转移
    ///
    /// 每个状态对每个终结符都给出下一状态，由match的穷尽检查保证
    pub fn transfer(self, token: ContextToken) -> Context {
        use ContextToken::*;
        match self {
            Context::Outside => match token {
                BlockOpen => Context::BlockComment,
                LineComment => Context::LineComment,
                Quote => Context::QuotedString,
                BlockClose | Newline | Backslash => Context::Outside,
            },
            // 块注释不嵌套，换行也不会结束
            Context::BlockComment => match token {
                BlockClose => Context::Outside,
                BlockOpen | LineComment | Newline | Backslash | Quote => Context::BlockComment,
            },
            Context::LineComment => match token {
                Newline => Context::Outside,
                BlockOpen | BlockClose | LineComment | Backslash | Quote => Context::LineComment,
            },
            // 未闭合的字符串在这里不做修复
            Context::QuotedString => match token {
                Quote => Context::Outside,
                BlockOpen | BlockClose | LineComment | Newline | Backslash => {
                    Context::QuotedString
                }
            },
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Context::Outside => "normal environment",
            Context::BlockComment => "multi-line comment",
            Context::LineComment => "single-line comment",
            Context::QuotedString => "quoted string",
        };
        write!(f, "{}", name)
    }
}

/// 影响上下文的终结符
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextToken {
    /// /*
    BlockOpen,
    /// */
    BlockClose,
    /// //
    LineComment,
    /// 换行符
    Newline,
    /// 反斜杠
    Backslash,
    /// 双引号
    Quote,
}

impl ContextToken {
    /// 所有终结符，起始位置相同时按此顺序取第一个
    pub const ALL: [ContextToken; 6] = [
        ContextToken::BlockOpen,
        ContextToken::BlockClose,
        ContextToken::LineComment,
        ContextToken::Newline,
        ContextToken::Backslash,
        ContextToken::Quote,
    ];

    /// 终结符的文本
    pub fn text(self) -> &'static str {
        match self {
            ContextToken::BlockOpen => "/*",
            ContextToken::BlockClose => "*/",
            ContextToken::LineComment => "//",
            ContextToken::Newline => "\n",
            ContextToken::Backslash => "\\",
            ContextToken::Quote => "\"",
        }
    }
}

/// 查找最早出现的终结符，返回终结符及其位置
fn find_next_token(txt: &str) -> Option<(ContextToken, usize)> {
    let mut found: Option<(ContextToken, usize)> = None;
    for token in ContextToken::ALL {
        if let Some(pos) = txt.find(token.text()) {
            // 位置相同时保留优先级更高的
            if found.map_or(true, |(_, min_pos)| pos < min_pos) {
                found = Some((token, pos));
            }
        }
    }
    found
}

/// 从`old_state`开始扫描`lines`，返回扫描结束时的上下文
pub fn update_language_context<S: AsRef<str>>(lines: &[S], old_state: Context) -> Context {
    let buffer: String = lines.iter().map(|line| line.as_ref()).collect();
    let mut context = old_state;
    let mut pos = 0;

    while pos < buffer.len() {
        let Some((token, delta)) = find_next_token(&buffer[pos..]) else {
            break;
        };
        pos += delta + token.text().len();

        if token == ContextToken::Backslash {
            // 跳过反斜杠以及其后的一个字符，避免续行符改变上下文
            if let Some(c) = buffer[pos..].chars().next() {
                pos += c.len_utf8();
            }
            continue;
        }
        context = context.transfer(token);
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use ContextToken::*;

    #[test]
    fn test_transfer_table_is_total() {
        let expected = [
            (Context::Outside, [
                Context::BlockComment,
                Context::Outside,
                Context::LineComment,
                Context::Outside,
                Context::Outside,
                Context::QuotedString,
            ]),
            (Context::BlockComment, [
                Context::BlockComment,
                Context::Outside,
                Context::BlockComment,
                Context::BlockComment,
                Context::BlockComment,
                Context::BlockComment,
            ]),
            (Context::LineComment, [
                Context::LineComment,
                Context::LineComment,
                Context::LineComment,
                Context::Outside,
                Context::LineComment,
                Context::LineComment,
            ]),
            (Context::QuotedString, [
                Context::QuotedString,
                Context::QuotedString,
                Context::QuotedString,
                Context::QuotedString,
                Context::QuotedString,
                Context::Outside,
            ]),
        ];
        assert_eq!(expected.len(), Context::ALL.len());
        for (state, row) in expected {
            for (token, next) in ContextToken::ALL.into_iter().zip(row) {
                assert_eq!(state.transfer(token), next, "{:?} on {:?}", state, token);
            }
        }
    }

    #[test]
    fn test_find_next_token_prefers_earliest() {
        assert_eq!(find_next_token("ab \" /* x"), Some((Quote, 3)));
        assert_eq!(find_next_token("x */ //"), Some((BlockClose, 2)));
        assert_eq!(find_next_token("plain text"), None);
    }

    #[test]
    fn test_into_comment() {
        let lines = ["aaaa /*   \n", "bbbb \n"];
        assert_eq!(update_language_context(&lines, Context::Outside), Context::BlockComment);
    }

    #[test]
    fn test_after_comment_closed() {
        let lines = ["aaaa /*   \n", "bbbb \n", "ccc */ dddd\n"];
        assert_eq!(update_language_context(&lines, Context::Outside), Context::Outside);
    }

    #[test]
    fn test_inside_comment() {
        let lines = ["/*aaaa /*   \n"];
        assert_eq!(update_language_context(&lines, Context::Outside), Context::BlockComment);

        let lines = ["/* bbbb \n", "// cccc"];
        assert_eq!(update_language_context(&lines, Context::Outside), Context::BlockComment);
    }

    #[test]
    fn test_slash_comment() {
        let lines = ["aaaa //   \n"];
        assert_eq!(update_language_context(&lines, Context::Outside), Context::Outside);

        let lines = ["bbbb // /*  \n"];
        assert_eq!(update_language_context(&lines, Context::Outside), Context::Outside);

        let lines = ["\ncccc // dddd"];
        assert_eq!(update_language_context(&lines, Context::Outside), Context::LineComment);
    }

    #[test]
    fn test_quoted_string() {
        let lines = ["char *s = \"/* not a comment\";\n"];
        assert_eq!(update_language_context(&lines, Context::Outside), Context::Outside);

        let lines = ["puts(\"open\n"];
        assert_eq!(update_language_context(&lines, Context::Outside), Context::QuotedString);
    }

    #[test]
    fn test_backslash_skips_next_char() {
        // 转义的引号不结束字符串
        let lines = ["\"a \\\" b\n"];
        assert_eq!(update_language_context(&lines, Context::Outside), Context::QuotedString);

        // 续行的行注释延续到下一行
        let lines = ["// comment \\\n", "#define A\n"];
        assert_eq!(update_language_context(&lines[..1], Context::Outside), Context::LineComment);
        assert_eq!(update_language_context(&lines, Context::Outside), Context::Outside);
    }
}
