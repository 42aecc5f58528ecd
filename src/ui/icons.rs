//! Shared UI icons.

use console::Emoji;

pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static INFO: Emoji<'_, '_> = Emoji("💡 ", "[i]");
pub static HOURGLASS: Emoji<'_, '_> = Emoji("⏳ ", "...");
pub static SCROLL: Emoji<'_, '_> = Emoji("📜 ", "");
pub static SAVED: Emoji<'_, '_> = Emoji("💾 ", "[S]");
