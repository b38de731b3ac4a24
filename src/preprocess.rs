//! 从源文件的物理行中提取预处理指示

use crate::context::{update_language_context, Context};
use crate::directive::Directive;
use crate::error::Result;
use crate::keywords::line_is_preprocessor_directive;
use crate::tokenize::extract_multiline_sequence;
use log::{debug, trace};

/// 将文本拆分为物理行，保留换行符
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// 提取所有指示
///
/// 一边扫描一边跟踪上下文，每条指示记录的是进入它第一行时的上下文
pub fn extract_directives<S: AsRef<str>>(lines: &[S]) -> Result<Vec<Directive>> {
    let mut result = vec![];
    let mut context = Context::Outside;
    let mut cursor = 0;

    while cursor < lines.len() {
        if !line_is_preprocessor_directive(lines[cursor].as_ref()) {
            // 普通代码行只推进上下文
            context = update_language_context(&lines[cursor..cursor + 1], context);
            cursor += 1;
            continue;
        }

        let sequence = extract_multiline_sequence(lines, cursor);
        let directive = Directive::new(sequence, cursor + 1, context)?;
        trace!(
            "line {}: {} ({} line(s), {})",
            directive.get_line_no(),
            directive.get_hashword(),
            sequence.len(),
            context
        );
        context = update_language_context(sequence, context);
        cursor += sequence.len();
        result.push(directive);
    }

    debug!("extracted {} directive(s) from {} line(s)", result.len(), lines.len());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_keeps_newlines() {
        assert_eq!(split_lines("a\nb\n"), ["a\n", "b\n"]);
        assert_eq!(split_lines("a\nb"), ["a\n", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_extract_directives() {
        let text = "#include <stdio.h>\nint x;\n  #define A(x) \\\n    (x + 1)\n#endif\n";
        let dirs = extract_directives(&split_lines(text)).unwrap();
        let summary: Vec<(usize, &str)> = dirs
            .iter()
            .map(|d| (d.get_line_no(), d.get_hashword()))
            .collect();
        assert_eq!(summary, [(1, "#include"), (3, "#define"), (5, "#endif")]);
        assert_eq!(dirs[1].get_lines().len(), 2);
        assert_eq!(dirs[1].get_full_text(), "#define A(x) (x + 1)");
    }

    #[test]
    fn test_directive_inside_block_comment() {
        let text = "/* start\n#define A\n*/\n#define B\n";
        let dirs = extract_directives(&split_lines(text)).unwrap();
        assert_eq!(dirs.len(), 2);
        assert_eq!(dirs[0].get_context(), Context::BlockComment);
        assert_eq!(dirs[1].get_context(), Context::Outside);
    }

    #[test]
    fn test_directive_after_continued_line_comment() {
        let text = "// comment \\\n#define A\n#define B\n";
        let dirs = extract_directives(&split_lines(text)).unwrap();
        assert_eq!(dirs[0].get_context(), Context::LineComment);
        assert_eq!(dirs[1].get_context(), Context::Outside);
    }

    #[test]
    fn test_directive_inside_quotes() {
        let text = "const char *s = \"abc\\\n#define A\\\nxyz\";\n#define B\n";
        let dirs = extract_directives(&split_lines(text)).unwrap();
        assert_eq!(dirs.len(), 2);
        assert_eq!(dirs[0].get_context(), Context::QuotedString);
        assert_eq!(dirs[1].get_context(), Context::Outside);
    }

    #[test]
    fn test_comment_opened_by_directive() {
        let text = "#endif /* multi\n#if A\n*/\n";
        let dirs = extract_directives(&split_lines(text)).unwrap();
        assert_eq!(dirs[0].get_context(), Context::Outside);
        assert_eq!(dirs[1].get_context(), Context::BlockComment);
    }
}
