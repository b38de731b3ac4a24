//! 白名单：按(行号, 编号)屏蔽已知的诊断
//!
//! 每行一条，`<行号>, <编号>`或`<文件>, <行号>, <编号>`，编号可以带`W`前缀。
//! 三段式只对同名的文件生效。空行和以`#`开头的行忽略

use crate::diagnostic::Diagnostic;
use crate::error::{Error, Result};
use crate::utils::read_file;
use log::debug;
use std::collections::HashSet;

/// 一个输入文件的白名单
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Whitelist {
    /// (行号, 编号)
    entries: HashSet<(usize, u32)>,
}

impl Whitelist {
    /// 读取白名单文件中属于`input_file`的条目
    pub fn read(path: &str, input_file: &str) -> Result<Self> {
        let text = read_file(path)?;
        Self::parse(&text, path, input_file)
    }

    /// 解析白名单文本，`path`只用于报错
    pub fn parse(text: &str, path: &str, input_file: &str) -> Result<Self> {
        let mut entries = HashSet::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let malformed = || Error::Whitelist {
                path: path.to_string(),
                line_no: idx + 1,
                text: line.to_string(),
            };

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let (file, line_no, code) = match fields.as_slice() {
                [line_no, code] => (None, *line_no, *code),
                [file, line_no, code] => (Some(*file), *line_no, *code),
                _ => return Err(malformed()),
            };
            // 先检查格式，属于其他文件的条目也不能写错
            let line_no: usize = line_no.parse().map_err(|_| malformed())?;
            let code = code.strip_prefix('W').unwrap_or(code);
            let code: u32 = code.parse().map_err(|_| malformed())?;
            if file.map_or(true, |file| file == input_file) {
                entries.insert((line_no, code));
            }
        }
        debug!("{} whitelist entries for {}", entries.len(), input_file);
        Ok(Self { entries })
    }

    /// 条目个数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 某条诊断是否被屏蔽
    pub fn suppresses(&self, diagnostic: &Diagnostic) -> bool {
        self.entries
            .contains(&(diagnostic.line_no, diagnostic.code.number()))
    }

    /// 去掉被屏蔽的诊断，保持原有顺序
    pub fn filter(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics
            .into_iter()
            .filter(|diagnostic| !self.suppresses(diagnostic))
            .collect()
    }
}
