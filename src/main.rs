use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    fluxgen::init_tracing();
    let args: Vec<String> = std::env::args().collect();
    let code = fluxgen::run_cli(args).await;
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
