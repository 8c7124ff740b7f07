pub mod aggregator;
pub mod config;
pub mod contract;
pub mod controller;
pub mod history;
pub mod kv_store;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod presenter;
pub mod runtime;
pub mod selection;
pub mod snippet;

#[cfg(test)]
mod tests {
    mod cursor_latency_test {
        include!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../tests/perf/cursor_latency_test.rs"
        ));
    }
}
