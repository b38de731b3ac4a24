use crate::error::{Error, Result};
use log::warn;
use std::fs::File;
use std::io;
use std::io::Read;

/// 读取文件，不是合法UTF-8的字节替换为U+FFFD
pub fn read_file(path: &str) -> Result<String> {
    let mut buffer = vec![];
    let io_error = |source| Error::Io {
        path: path.to_string(),
        source,
    };
    if path.eq("-") {
        // 如果文件名是"-"，那么就从输入中读取
        let stdin = io::stdin();
        let mut handle = stdin.lock();
        handle.read_to_end(&mut buffer).map_err(io_error)?;
    } else {
        let mut file = File::open(path).map_err(io_error)?;
        file.read_to_end(&mut buffer).map_err(io_error)?;
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// 是否包含通配符
fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(|c| matches!(c, '*' | '?' | '['))
}

/// 展开输入文件列表中的通配符
///
/// 没有通配符的参数原样保留，由读取时报告是否存在；
/// 匹配不到任何文件的模式给出警告后忽略
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<String>> {
    let mut result = vec![];
    for input in inputs {
        if input.eq("-") || !has_glob_meta(input) {
            result.push(input.clone());
            continue;
        }

        let before = result.len();
        for entry in glob::glob(input)? {
            match entry {
                Ok(path) => result.push(path.to_string_lossy().into_owned()),
                Err(err) => warn!("skipping {}: {}", err.path().display(), err.error()),
            }
        }
        if result.len() == before {
            warn!("pattern {} matches no files", input);
        }
    }
    Ok(result)
}
