//! System clipboard access for the terminal binary.

use anyhow::{anyhow, Result};
use copypasta::{ClipboardContext, ClipboardProvider};

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut ctx = ClipboardContext::new().map_err(|e| anyhow!("clipboard unavailable: {e}"))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| anyhow!("clipboard write failed: {e}"))?;
    log::debug!("[clipboard] copied {} chars", text.chars().count());
    Ok(())
}
