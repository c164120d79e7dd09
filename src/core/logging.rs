use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::from_default_env().add_directive("sessio=info".parse().unwrap()))
        .init();
}

#[cfg(test)]
mod tests {
    // init_logging installs a global subscriber and can only be called once
    // per process, so there is nothing meaningful to assert in isolation.
}
