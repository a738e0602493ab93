//! # xtask - 开发辅助工具
//!
//! 本地质量门禁与演示入口。
//!
//! ## 命令
//!
//! - `check-all`: fmt、clippy、test
//! - `cov-runtime`: action-runtime 覆盖率
//! - `cov-workspace`: workspace 覆盖率（排除 xtask）
//! - `demo [args...]`: 运行 host-cli 演示程序，其余参数原样传递

use std::process::{Command, ExitCode};

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn cargo<const N: usize>(step_args: [&str; N]) -> (String, Command) {
    let mut cmd = Command::new("cargo");
    cmd.args(step_args);
    (format!("cargo {}", step_args.join(" ")), cmd)
}

fn require_llvm_cov() -> anyhow::Result<()> {
    let available = Command::new("cargo")
        .args(["llvm-cov", "--version"])
        .status()
        .is_ok_and(|s| s.success());
    if !available {
        anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview"
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            for step in [
                cargo(["fmt", "--all", "--", "--check"]),
                cargo(["clippy", "--workspace", "--all-targets"]),
                cargo(["test", "--workspace"]),
            ] {
                let (name, mut cmd) = step;
                run(&name, &mut cmd)?;
            }
        }
        "cov-runtime" => {
            require_llvm_cov()?;
            let (name, mut cmd) = cargo(["llvm-cov", "-p", "action-runtime", "--html"]);
            run(&name, &mut cmd)?;
            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "cov-workspace" => {
            require_llvm_cov()?;
            let (name, mut cmd) =
                cargo(["llvm-cov", "--workspace", "--exclude", "xtask", "--html"]);
            run(&name, &mut cmd)?;
            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "demo" => {
            let rest: Vec<String> = args.collect();
            let mut cmd = Command::new("cargo");
            cmd.args(["run", "-p", "host-cli", "--"]).args(&rest);
            run(&format!("cargo run -p host-cli -- {}", rest.join(" ")), &mut cmd)?;
        }
        "help" | "-h" | "--help" => print_help(),
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo run -p xtask -- <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-runtime     运行 action-runtime 覆盖率报告
  cov-workspace   运行 workspace 覆盖率报告
  demo [args...]  运行演示程序，例如：demo --all --speed 2
"#
    );
}
