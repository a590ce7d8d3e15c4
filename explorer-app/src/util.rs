use std::path::{Path, PathBuf};

/// Asks for a destination and writes `bytes` there.
///
/// Returns `Ok(None)` when the dialog was cancelled.
pub fn save_with_dialog(
    default_name: &str,
    filter_name: &str,
    extension: &str,
    bytes: &[u8],
) -> std::io::Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter(filter_name, &[extension])
        .set_file_name(default_name)
        .save_file()
    else {
        return Ok(None);
    };
    std::fs::write(&path, bytes)?;
    log::info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(Some(path))
}

/// Writes the page into the temp directory, replacing the previous one.
pub fn write_temp_page(html: &str) -> std::io::Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("kg_explorer_{}.html", std::process::id()));
    std::fs::write(&path, html)?;
    log::debug!("wrote network page to {}", path.display());
    Ok(path)
}

/// `file://` url for a local path.
pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// `"1 node"` / `"3 nodes"`.
pub fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralizes() {
        assert_eq!(plural(1, "edge", "edges"), "1 edge");
        assert_eq!(plural(0, "edge", "edges"), "0 edges");
    }

    #[test]
    fn temp_page_is_overwritten() {
        let first = write_temp_page("<p>one</p>").unwrap();
        let second = write_temp_page("<p>two</p>").unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "<p>two</p>");
        assert!(file_url(&second).starts_with("file://"));
        std::fs::remove_file(second).ok();
    }
}
