//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg`
//! and serves `static/` on a local HTTP port (default 8000, or the first
//! argument).

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::process::{Command, Stdio};

    use anyhow::{bail, Context};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port: u16 = match std::env::args().nth(1) {
        Some(arg) => arg.parse().with_context(|| format!("invalid port {arg:?}"))?,
        None => 8000,
    };

    log::info!("building WASM pkg");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(st) => bail!("wasm-pack finished with {st}"),
        Err(e) => log::warn!(
            "wasm-pack not runnable ({e}); serving whatever is already in static/pkg. \
             Install it from https://rustwasm.github.io/wasm-pack/"
        ),
    }

    log::info!("serving static/ at http://127.0.0.1:{port}/ (smoke) and /text.html (reveal)");
    let status = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status()
        .context("failed to start http server")?;
    if !status.success() {
        bail!("http server exited with {status}");
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
