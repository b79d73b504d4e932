use futures::StreamExt;
use input_overlay::{logging, InputCapture, OverlayError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), OverlayError> {
    logging::init(false);

    let (capture, mut events) = InputCapture::start()?;

    while let Some(ev) = events.next().await {
        println!("[{}] {}", ev.ts.format("%H:%M:%S%.3f"), ev.kind);
    }

    capture.stop();

    Ok(())
}
