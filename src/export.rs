//! Export of the statistics panel to a plain-text file.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::stats::StatLine;

/// Write the given statistics rows to a timestamped file under `dir`.
/// Returns the path of the written file.
pub fn export_statistics(lines: &[StatLine], dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Не вдалося створити директорію: {}", dir.display()))?;

    let now = Local::now();
    let path = dir.join(format!("session-{}.txt", now.format("%Y%m%d-%H%M%S")));

    let mut out = String::new();
    out.push_str("# Статистика виступів\n");
    out.push_str(&format!("# Експортовано: {}\n", now.format("%Y-%m-%d %H:%M:%S")));
    out.push('\n');
    for line in lines {
        out.push_str(&line.format());
        out.push('\n');
    }

    fs::write(&path, out)
        .with_context(|| format!("Не вдалося записати файл: {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lines() -> Vec<StatLine> {
        vec![
            StatLine {
                name: "Аліса".to_string(),
                percentage: 75.0,
                speech_count: 3,
                speech_time: 9.0,
            },
            StatLine {
                name: "Богдан".to_string(),
                percentage: 25.0,
                speech_count: 1,
                speech_time: 3.0,
            },
        ]
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = std::env::temp_dir().join("talk_meter_export_test");
        let _ = fs::remove_dir_all(&dir);

        let path = export_statistics(&sample_lines(), &dir).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("# Статистика виступів\n"));
        assert!(content.contains("# Експортовано: "));
        assert!(content.contains("Аліса: 75.00% (3 speaks, 9.00s)\n"));
        assert!(content.contains("Богдан: 25.00% (1 speaks, 3.00s)\n"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_creates_missing_directory() {
        let dir = std::env::temp_dir()
            .join("talk_meter_export_test_nested")
            .join("deeper");
        let _ = fs::remove_dir_all(dir.parent().unwrap());

        let path = export_statistics(&[], &dir).unwrap();
        assert!(path.exists());
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("session-"));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("txt"));

        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn test_export_empty_stats_has_only_header() {
        let dir = std::env::temp_dir().join("talk_meter_export_test_empty");
        let _ = fs::remove_dir_all(&dir);

        let path = export_statistics(&[], &dir).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2); // two header lines, no rows

        let _ = fs::remove_dir_all(&dir);
    }
}
