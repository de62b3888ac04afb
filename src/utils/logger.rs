use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

fn default_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

fn init(filter: EnvFilter, json: bool) {
    let base = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let layer = if json {
        base.json().boxed()
    } else {
        base.compact().boxed()
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}

pub fn init_cli_logger(verbose: bool) {
    let directive = if verbose {
        "reef_chain=debug,info"
    } else {
        "reef_chain=info"
    };
    init(default_filter(directive), false);
}

/// JSON lines on stderr, for running behind a log collector.
pub fn init_json_logger() {
    init(default_filter("reef_chain=info"), true);
}
