/// Installs the process-wide `env_logger`.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies (winit logs
/// come through the same filter). A second call is a no-op.
pub fn init(default_filter: &str) {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();

    if let Err(err) = result {
        log::debug!("logger already installed: {err}");
    }
}
