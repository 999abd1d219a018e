//! User-visible strings of the download controller

/// Status strings shown by the controller
///
/// Two tables ship: [`Messages::english`] (the default) and
/// [`Messages::russian`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Shown when the URL field is empty
    pub empty_url: String,
    /// Shown when the URL has no http(s) scheme
    pub bad_scheme: String,
    /// Shown when the server answers `success: true`
    pub ready: String,
    /// Shown when the server reports a failure without a message
    pub download_failed: String,
    /// Prefix for transport failures, followed by `": <message>"`
    pub network_error: String,
    /// Shown when the artifact link is handed to the host
    pub opening_file: String,
    /// Label in front of the size, followed by `" <n> <unit>"`
    pub size_label: String,
    /// Megabyte unit
    pub megabytes: String,
    /// Title used when the server reports none
    pub untitled: String,
}

impl Messages {
    /// English strings
    pub fn english() -> Self {
        Self {
            empty_url: "Enter a video link!".into(),
            bad_scheme: "Invalid link format!".into(),
            ready: "✅ Video is ready!".into(),
            download_failed: "Download failed".into(),
            network_error: "Network error".into(),
            opening_file: "📥 Opening file...".into(),
            size_label: "Size:".into(),
            megabytes: "MB".into(),
            untitled: "video".into(),
        }
    }

    /// Russian strings
    pub fn russian() -> Self {
        Self {
            empty_url: "Введи ссылку на видео!".into(),
            bad_scheme: "Неверный формат ссылки!".into(),
            ready: "✅ Видео готово!".into(),
            download_failed: "Ошибка загрузки".into(),
            network_error: "Ошибка сети".into(),
            opening_file: "📥 Открываю файл...".into(),
            size_label: "Размер:".into(),
            megabytes: "МБ".into(),
            untitled: "видео".into(),
        }
    }

    /// Error status for a server-reported failure
    pub fn server_error(&self, error: Option<&str>) -> String {
        let reason = error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(&self.download_failed);
        format!("❌ {}", reason)
    }

    /// Error status for a transport failure
    pub fn transport_error(&self, message: &str) -> String {
        format!("❌ {}: {}", self.network_error, message)
    }

    /// Size line for the result panel
    pub fn size_line(&self, megabytes: &str) -> String {
        format!("{} {} {}", self.size_label, megabytes, self.megabytes)
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}
