use anyhow::Context;

/// System clipboard through `arboard`. A handle is opened per write since
/// some platforms do not allow sharing one across threads.
pub struct SystemClipboard;

impl client_core::Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("failed to open clipboard")?;
        clipboard
            .set_text(text.to_owned())
            .context("failed to write clipboard text")
    }
}
