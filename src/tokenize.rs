//! 指示文本的终结符解析，以及续行的拼接

/// 特殊终结符，按优先级排列
///
/// 在同一位置上按此顺序尝试，第一个匹配的被消耗
const SPECIALS: [&str; 8] = ["(", ")", ",", "\\", "##", "!", "//", "/*"];

/// 查找在`pos`处开始的特殊终结符
fn match_special(txt: &str, pos: usize) -> Option<&'static str> {
    let rest = &txt[pos..];
    SPECIALS.iter().copied().find(|special| rest.starts_with(special))
}

/// 读取`pos`处的字符
fn read_char(txt: &str, pos: usize) -> Option<char> {
    txt[pos..].chars().next()
}

/// 对指示文本进行终结符解析
pub fn tokenize(txt: &str) -> Vec<String> {
    let mut tokens: Vec<String> = vec![];
    let mut pos = 0;

    while let Some(c) = read_char(txt, pos) {
        // 跳过所有空白符
        if c.is_whitespace() {
            pos += c.len_utf8();
            continue;
        }

        // 匹配特殊终结符
        if let Some(special) = match_special(txt, pos) {
            tokens.push(special.to_string());
            pos += special.len();
            continue;
        }

        // 其他情况，一直读取到空白符或者下一个特殊终结符
        let old_pos = pos;
        pos += c.len_utf8();
        while let Some(c) = read_char(txt, pos) {
            if c.is_whitespace() || match_special(txt, pos).is_some() {
                break;
            }
            pos += c.len_utf8();
        }
        tokens.push(txt[old_pos..pos].to_string());
    }

    tokens
}

/// 起始符号和关键字之间有空格时（如`# define`），将两者合并
///
/// 只对指示的终结符使用，普通文本开头的单个字符不能合并
pub fn merge_leading_symbol(mut tokens: Vec<String>) -> Vec<String> {
    if tokens.len() > 1 && tokens[0].chars().count() == 1 {
        let keyword = tokens.remove(1);
        tokens[0].push_str(&keyword);
    }
    tokens
}

/// 去掉行尾空白后，是否以反斜杠结尾
pub fn line_ends_with_continuation(line: &str) -> bool {
    line.trim_end().ends_with('\\')
}

/// 从`start`行开始，取出由续行符连接起来的所有行
///
/// 被转义的反斜杠（`\\`）不做特殊处理
pub fn extract_multiline_sequence<S: AsRef<str>>(lines: &[S], start: usize) -> &[S] {
    let mut end = start;
    while end < lines.len() {
        let continued = line_ends_with_continuation(lines[end].as_ref());
        end += 1;
        if !continued {
            break;
        }
    }
    &lines[start..end]
}

/// 拼接多行为一个逻辑行
///
/// 去掉每行首尾的空白以及行尾的反斜杠，行之间以一个空格分隔
pub fn combine_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut result = String::new();
    for line in lines {
        let line = line.as_ref().trim();
        let line = line.strip_suffix('\\').unwrap_or(line);
        if !result.is_empty() && !result.ends_with(char::is_whitespace) {
            result.push(' ');
        }
        result.push_str(line);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("\n").is_empty());
        assert!(tokenize("  \t ").is_empty());
    }

    #[test]
    fn test_tokenize_alnum() {
        assert_eq!(tokenize("word"), ["word"]);
        assert_eq!(tokenize("word another"), ["word", "another"]);
        assert_eq!(tokenize("#word another"), ["#word", "another"]);
        assert_eq!(tokenize("#word(another)"), ["#word", "(", "another", ")"]);
        assert_eq!(tokenize("#word(another)\n"), ["#word", "(", "another", ")"]);
        assert_eq!(tokenize("word(pa, pb)"), ["word", "(", "pa", ",", "pb", ")"]);
        assert_eq!(tokenize("u_n ds2 45c 3.14"), ["u_n", "ds2", "45c", "3.14"]);
    }

    #[test]
    fn test_token_pasting() {
        assert_eq!(tokenize("a##b"), ["a", "##", "b"]);
    }

    #[test]
    fn test_single_char_first_token_is_kept() {
        assert_eq!(tokenize("x (y)"), ["x", "(", "y", ")"]);
        assert_eq!(tokenize("# define A"), ["#", "define", "A"]);
    }

    #[test]
    fn test_tokenize_backslash() {
        assert_eq!(tokenize("\\"), ["\\"]);
        assert_eq!(tokenize("word\\"), ["word", "\\"]);
        assert_eq!(tokenize("word\\\n"), ["word", "\\"]);
    }

    #[test]
    fn test_tokenize_comments() {
        assert_eq!(tokenize("statement /* comment"), ["statement", "/*", "comment"]);
        assert_eq!(tokenize("statement /*comment"), ["statement", "/*", "comment"]);
        assert_eq!(tokenize("statement // comment"), ["statement", "//", "comment"]);
        assert_eq!(tokenize("statement//comment"), ["statement", "//", "comment"]);
    }

    #[test]
    fn test_tokenize_macro_definitions() {
        assert_eq!(
            tokenize("#define LOST()lost"),
            ["#define", "LOST", "(", ")", "lost"]
        );
        assert_eq!(
            tokenize("#define FOUND( x) not_found"),
            ["#define", "FOUND", "(", "x", ")", "not_found"]
        );
        assert_eq!(tokenize("#if !defined(X)"), ["#if", "!", "defined", "(", "X", ")"]);
    }

    #[test]
    fn test_merge_leading_symbol() {
        assert_eq!(merge_leading_symbol(tokenize("# define A")), ["#define", "A"]);
        assert_eq!(merge_leading_symbol(tokenize("#\tifdef B")), ["#ifdef", "B"]);
        assert_eq!(merge_leading_symbol(tokenize("#")), ["#"]);
    }

    #[test]
    fn test_line_ends_with_continuation() {
        assert!(line_ends_with_continuation("text text\\"));
        assert!(line_ends_with_continuation("text text\\  "));
        assert!(line_ends_with_continuation("text text\\\n"));
        assert!(line_ends_with_continuation("text text\\\n\r"));
        assert!(line_ends_with_continuation("text text\\\t"));
        assert!(line_ends_with_continuation("\\"));

        assert!(!line_ends_with_continuation(""));
        assert!(!line_ends_with_continuation("    \n"));
        assert!(!line_ends_with_continuation("just a text\n"));
    }

    #[test]
    fn test_extract_multiline_sequence() {
        assert_eq!(extract_multiline_sequence(&["line 1\\", "line2\\", "line3"], 0).len(), 3);
        assert_eq!(extract_multiline_sequence(&["line 1\\", "line2\\", "line3\\"], 0).len(), 3);
        assert_eq!(extract_multiline_sequence(&["line 1\n", "line2\\", "line3"], 0).len(), 1);
        assert_eq!(extract_multiline_sequence(&["line 1\\"], 0).len(), 1);
        assert_eq!(extract_multiline_sequence(&["line 1\\\n", "line2", "line3\\"], 0).len(), 2);
        assert_eq!(extract_multiline_sequence(&["a", "b\\", "c"], 1), ["b\\", "c"]);
    }

    #[test]
    fn test_combine_lines() {
        assert_eq!(combine_lines(&["aa\\", "bb"]), "aa bb");
        assert_eq!(combine_lines(&["cc\\"]), "cc");
        assert_eq!(combine_lines(&["dd\\\n", "ee"]), "dd ee");
        assert_eq!(combine_lines(&["ff\t\\", "gg"]), "ff\tgg");
        assert_eq!(combine_lines(&["hh", "jj"]), "hh jj");
    }
}
