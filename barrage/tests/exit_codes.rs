use std::process::Command;

use anyhow::Context as _;
use barrage_testserver::{TargetBehavior, TestServer, closed_addr};

fn status_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

fn run_barrage(args: &[&str]) -> anyhow::Result<std::process::Output> {
    let exe = env!("CARGO_BIN_EXE_barrage");
    Command::new(exe)
        .args(args)
        .output()
        .context("run barrage binary")
}

#[test]
fn invalid_flags_exit_30() -> anyhow::Result<()> {
    for args in [
        vec!["localhost", "--connections", "0"],
        vec!["localhost", "--duration", "abc"],
        vec!["localhost", "--interval", "nope"],
        vec!["localhost", "--bogus"],
        vec![],
    ] {
        let out = run_barrage(&args)?;
        anyhow::ensure!(
            status_code(out.status) == 30,
            "expected exit code 30 for {args:?}, got {}\nstdout:\n{}\nstderr:\n{}",
            status_code(out.status),
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }

    Ok(())
}

#[test]
fn blank_host_exit_30() -> anyhow::Result<()> {
    let out = run_barrage(&["  ", "-d", "1"])?;

    anyhow::ensure!(
        status_code(out.status) == 30,
        "expected exit code 30, got {}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stderr)
    );
    Ok(())
}

#[test]
fn help_exits_0() -> anyhow::Result<()> {
    let out = run_barrage(&["--help"])?;

    anyhow::ensure!(out.status.success(), "expected --help to succeed");
    let stdout = String::from_utf8_lossy(&out.stdout);
    anyhow::ensure!(stdout.contains("--connections"), "stdout:\n{stdout}");
    anyhow::ensure!(stdout.contains("--interval"), "stdout:\n{stdout}");
    Ok(())
}

#[tokio::test]
async fn failed_requests_still_exit_0() -> anyhow::Result<()> {
    let addr = closed_addr().await.context("reserve closed port")?;
    let port = addr.port().to_string();

    let out = tokio::task::spawn_blocking(move || {
        run_barrage(&["127.0.0.1", "-p", port.as_str(), "-c", "2", "-d", "1", "-i", "0.2"])
    })
    .await
    .context("spawn_blocking join")??;

    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    anyhow::ensure!(
        out.status.success(),
        "expected success, got {}\nstdout:\n{}\nstderr:\n{}",
        status_code(out.status),
        stdout,
        String::from_utf8_lossy(&out.stderr)
    );
    anyhow::ensure!(
        stdout.contains("Successful Requests: 0"),
        "stdout:\n{stdout}"
    );
    Ok(())
}

#[tokio::test]
async fn error_statuses_still_exit_0() -> anyhow::Result<()> {
    let server = TestServer::start_with(TargetBehavior::default().with_status(500))
        .await
        .context("start test server")?;
    let port = server.port().to_string();

    let out = tokio::task::spawn_blocking(move || {
        run_barrage(&["127.0.0.1", "-p", port.as_str(), "-c", "2", "-d", "1", "-i", "0.5"])
    })
    .await
    .context("spawn_blocking join")??;

    server.shutdown().await;

    anyhow::ensure!(
        status_code(out.status) == 0,
        "expected exit code 0, got {}\nstdout:\n{}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    Ok(())
}
