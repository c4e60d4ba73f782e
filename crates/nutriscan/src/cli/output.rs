//! Output helpers for CLI commands.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build a table with the house preset and a header row.
pub fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    table
}

/// Shorten an id for table display, keeping enough to disambiguate.
pub fn short_id(id: &str) -> String {
    if id.chars().count() <= 16 {
        id.to_string()
    } else {
        let head: String = id.chars().take(15).collect();
        format!("{head}…")
    }
}

/// Render an optional field as a dash when absent.
pub fn dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_truncates_long_ids() {
        assert_eq!(short_id("abc"), "abc");
        let long = "local_0123456789abcdef0123456789abcdef";
        let short = short_id(long);
        assert!(short.starts_with("local_012345678"));
        assert!(short.ends_with('…'));
    }

    #[test]
    fn short_id_handles_multibyte_ids() {
        let id = "héllo-wörld-idéntifiér-0123456789";
        let short = short_id(id);
        assert_eq!(short.chars().count(), 16);
        assert!(short.ends_with('…'));
    }

    #[test]
    fn dash_renders_missing_values() {
        assert_eq!(dash(&None), "-");
        assert_eq!(dash(&Some("x".into())), "x");
    }
}
