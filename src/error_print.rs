//! 诊断的输出格式

use crate::diagcodes::DiagCode;
use crate::diagnostic::Diagnostic;
use std::io::{self, Write};

/// 格式化一条诊断：`文件:行号: W编号: 说明`，下一行缩进4格给出源代码
pub fn format_diagnostic(file_name: &str, diagnostic: &Diagnostic) -> String {
    let mut out = format!("{}:{}: {}", file_name, diagnostic.line_no, diagnostic);
    if let Some(text) = &diagnostic.text {
        for line in text.lines() {
            out.push_str("\n    ");
            out.push_str(line.trim_end());
        }
    }
    out
}

/// 输出一个文件的所有诊断
pub fn print_diagnostics(
    out: &mut impl Write,
    file_name: &str,
    diagnostics: &[Diagnostic],
) -> io::Result<()> {
    for diagnostic in diagnostics {
        writeln!(out, "{}", format_diagnostic(file_name, diagnostic))?;
    }
    Ok(())
}

/// 输出所有诊断的编号和名称
pub fn print_registry(out: &mut impl Write) -> io::Result<()> {
    for code in DiagCode::ALL {
        writeln!(out, "{:>4}  {}", code.to_string(), code.name())?;
    }
    Ok(())
}
