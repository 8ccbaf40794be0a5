//! CLI command implementations.

pub mod config;
pub mod db;
pub mod items;
pub mod serve;

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

use gc_core::config::AppConfig;
use gc_core::error::GcResult;
use gc_models::Database;

/// Open (and migrate) the configured database.
pub fn open_database(config: &AppConfig) -> GcResult<Database> {
    let db_path = config.effective_db_path()?;
    Database::init(&db_path, &config.database)
}

/// Table with the house style applied.
pub fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Truncate to `max_chars` characters, appending an ellipsis if cut.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("피아노 레슨", 10), "피아노 레슨");
        assert_eq!(truncate("주말 오전에 방문 가능한 분을 찾습니다", 8), "주말 오전...");
    }
}
