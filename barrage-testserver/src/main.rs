use std::net::SocketAddr;
use std::time::Duration;

use barrage_testserver::TargetBehavior;
use tokio::net::TcpListener;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut bind_addr: SocketAddr = "127.0.0.1:0".parse()?;
    let mut behavior = TargetBehavior::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--bind" => {
                let addr = args.next().ok_or_else(|| {
                    anyhow::anyhow!("--bind requires an address, e.g. 127.0.0.1:0")
                })?;
                bind_addr = addr.parse()?;
            }
            "--status" => {
                let status = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--status requires a code, e.g. 503"))?;
                behavior = behavior.with_status(status.parse()?);
            }
            "--delay-ms" => {
                let ms = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--delay-ms requires a number, e.g. 50"))?;
                behavior = behavior.with_delay(Duration::from_millis(ms.parse()?));
            }
            "-h" | "--help" => {
                eprintln!(
                    "barrage-testserver\n\nUSAGE:\n  barrage-testserver [--bind 127.0.0.1:0] [--status 200] [--delay-ms 0]\n\nOUTPUT:\n  Prints HTTP_URL=<url> to stdout once ready."
                );
                return Ok(());
            }
            other => {
                return Err(anyhow::anyhow!("unknown argument: {other}"));
            }
        }
    }

    let listener = TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    let stats = barrage_testserver::TestServerStats::default();
    let app = barrage_testserver::router(stats, behavior)?;

    println!("HTTP_URL=http://{addr}");

    let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = tokio::signal::ctrl_c().await;
    });

    serve.await?;
    Ok(())
}
