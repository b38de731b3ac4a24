//! 条件块的括号匹配
//!
//! #if系列指示相当于左括号，#endif相当于右括号。各项结构检查共用同一个栈的
//! 压入、弹出和下溢处理，只在回调里做各自的判断

use crate::directive::Directive;

/// 匹配过程中的回调，默认什么也不做
pub trait BracketVisitor<'a> {
    /// 遇到开指令，`enclosing`为仍然打开的外层指令，先打开的在前
    fn on_open(&mut self, _opener: &'a Directive, _enclosing: &[&'a Directive]) {}

    /// 遇到闭指令，并弹出了与之匹配的开指令
    fn on_close(&mut self, _opener: &'a Directive, _closer: &'a Directive) {}

    /// 遇到没有匹配开指令的闭指令，此后不再扫描
    fn on_underflow(&mut self, _closer: &'a Directive) {}
}

/// 按顺序匹配开闭指令，返回扫描结束后仍未闭合的开指令，先打开的在前
pub fn match_brackets<'a, I, V>(directives: I, visitor: &mut V) -> Vec<&'a Directive>
where
    I: IntoIterator<Item = &'a Directive>,
    V: BracketVisitor<'a>,
{
    let mut stack: Vec<&'a Directive> = vec![];
    for directive in directives {
        if directive.is_open() {
            visitor.on_open(directive, &stack);
            stack.push(directive);
        } else if directive.is_close() {
            match stack.pop() {
                Some(opener) => visitor.on_close(opener, directive),
                None => {
                    // 栈的状态已不可信，终止扫描
                    visitor.on_underflow(directive);
                    break;
                }
            }
        }
    }
    stack
}
