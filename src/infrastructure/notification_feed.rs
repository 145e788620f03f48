use crate::domain::notification::Notification;
use crate::error::{Result, YukonError};
use crate::ports::NotificationSource;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Reads the JSON notification feed produced by the analysis tool.
///
/// The feed is a JSON array of records in either notification shape.
pub struct JsonNotificationFeed;

impl JsonNotificationFeed {
    pub fn parse(json: &str) -> Result<Vec<Notification>> {
        serde_json::from_str(json).map_err(|e| YukonError::Feed(e.to_string()))
    }
}

impl NotificationSource for JsonNotificationFeed {
    fn load(&self, path: &Path) -> Result<Vec<Notification>> {
        let file = File::open(path).map_err(|e| YukonError::io(path, e))?;
        let notifications: Vec<Notification> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| YukonError::Feed(format!("{}: {}", path.display(), e)))?;

        info!(
            path = %path.display(),
            notifications = notifications.len(),
            "Loaded notification feed"
        );
        Ok(notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_feed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"[{{"useCase": "Create New File", "method": "void FileIO::openFile(string)",
                 "codeFile": "FileIO.cpp", "codeLine": 78,
                 "callGraphPath": "MainWindow::btnOpen_Click(Object,EventArgs)->FileIO::openFile(string)"}}]"#
        )
        .unwrap();

        let notifications = JsonNotificationFeed.load(&path).unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].path_frames().len(), 2);
    }

    #[test]
    fn test_bad_feed() {
        assert!(matches!(
            JsonNotificationFeed::parse("{\"not\": \"an array\"}"),
            Err(YukonError::Feed(_))
        ));
        assert!(matches!(
            JsonNotificationFeed::parse("[{\"codeLine\": 1}]"),
            Err(YukonError::Feed(_))
        ));
        assert!(JsonNotificationFeed::parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_missing_feed_is_io() {
        let dir = tempdir().unwrap();
        let result = JsonNotificationFeed.load(&dir.path().join("nope.json"));
        assert!(result.unwrap_err().is_not_found());
    }
}
