//! Run the HTTP API server

use crate::server;

/// Serve the JSON API until interrupted
pub fn serve(addr: &str) -> anyhow::Result<()> {
    let root = std::env::current_dir()?;
    println!("planroll API on http://{addr} (Ctrl-C to stop)");
    server::serve(&root, addr)
}
