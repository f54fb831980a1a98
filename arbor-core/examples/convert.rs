//! Example: Convert a markup or object file to the tree listing.
//!
//! Run with: cargo run --example convert -- path/to/input.txt
//!
//! Unrecognized input produces no output; malformed input reports the
//! read error and exits nonzero. Set RUST_LOG=trace to watch the
//! readers work.

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args().nth(1).expect("usage: convert <file>");
    let src = std::fs::read_to_string(&path).expect("readable input file");

    match arbor_core::read(&src) {
        Ok(Some(doc)) => println!("{doc}"),
        Ok(None) => {}
        Err(err) => {
            eprintln!("conversion failed: {err}");
            std::process::exit(1);
        }
    }
}
