use input_overlay::{
    app, logging, InputCapture, OverlayConfig, OverlayError, OverlayResult, ScreenCenter,
};

fn main() -> Result<(), OverlayError> {
    let config = OverlayConfig::from_env();
    logging::init(config.debug);

    run(config).map_err(|e| {
        tracing::error!("input overlay failed: {e}");
        e
    })
}

fn run(config: OverlayConfig) -> OverlayResult<()> {
    let center = ScreenCenter::primary()?;

    // No window without a working hook.
    let (capture, events) = InputCapture::start()?;

    app::run(config, center, capture, events)
}
