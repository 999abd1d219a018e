//! Console client example
//!
//! Drives the download controller from a terminal instead of a messenger
//! web view. Each line typed is submitted like a press of the download
//! button; `open` hands the last artifact's link to the "host", which here
//! just prints it.
//!
//! Start a server first (e.g. `cargo run --example api_server`), then:
//!
//! ```text
//! cargo run --example console_client -- http://localhost:8000
//! ```

use tokio::io::{AsyncBufReadExt, BufReader};
use video_dl::controller::{
    DownloadController, HostEnvironment, HttpDownloadApi, ImpactStyle, Messages,
    NotificationKind, ThemeParams, ViewState,
};

/// Host that renders haptics and links as terminal output
struct ConsoleHost {
    origin: String,
}

impl HostEnvironment for ConsoleHost {
    fn expand(&self) {}

    fn ready(&self) {
        println!("Paste a video link and press Enter (`open` to fetch the file, `quit` to exit)");
    }

    fn theme_params(&self) -> ThemeParams {
        ThemeParams::default()
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn impact_occurred(&self, style: ImpactStyle) {
        println!("  · haptic: {}", style.as_str());
    }

    fn notification_occurred(&self, kind: NotificationKind) {
        println!("  · notification: {}", kind.as_str());
    }

    fn open_link(&self, url: &str) {
        println!("  → {}", url);
    }
}

fn render(view: &ViewState) {
    if view.result_visible {
        println!("  {}", view.video_title);
        if !view.video_size.is_empty() {
            println!("  {}", view.video_size);
        }
    }
    if let Some(status) = &view.status {
        println!("  [{}] {}", status.kind.css_class(), status.message);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let origin = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000".to_string());
    let messages = match std::env::var("VIDEO_DL_LANG").as_deref() {
        Ok("ru") => Messages::russian(),
        _ => Messages::english(),
    };

    let api = HttpDownloadApi::new(&origin)?;
    let host = ConsoleHost { origin };
    let mut controller = DownloadController::with_messages(host, api, messages);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "quit" | "exit" => break,
            "open" => {
                if controller.open_artifact().is_none() {
                    println!("  nothing downloaded yet");
                }
            }
            _ => {
                controller.set_url_input(line.as_str());
                controller.on_key_press("Enter").await;
            }
        }
        render(controller.view());
    }

    Ok(())
}
