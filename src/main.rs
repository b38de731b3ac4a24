use cppsa::{init_logger, level_for, parse_args, print_registry, run, usage};
use std::env;
use std::io::stdout;
use std::process::exit;

/// 参数、诊断选择字符串或读取文件出错时的退出码
const EXIT_ERROR: i32 = 2;

fn main() {
    // 获取命令行参数
    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("cppsa: {}", err);
            eprintln!("{}", usage());
            exit(EXIT_ERROR);
        }
    };
    init_logger(level_for(args.verbosity));

    if args.help {
        println!("{}", usage());
        exit(libc::EXIT_SUCCESS);
    }

    let mut out = stdout().lock();
    if args.list {
        let status = match print_registry(&mut out) {
            Ok(()) => libc::EXIT_SUCCESS,
            Err(_) => EXIT_ERROR,
        };
        exit(status);
    }

    // 有诊断时返回失败
    match run(&args, &mut out) {
        Ok(0) => exit(libc::EXIT_SUCCESS),
        Ok(_) => exit(libc::EXIT_FAILURE),
        Err(err) => {
            eprintln!("cppsa: {}", err);
            exit(EXIT_ERROR);
        }
    }
}
