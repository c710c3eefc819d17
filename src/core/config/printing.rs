use crate::core::config::data::Config;
use crate::core::constants::DEFAULT_BASE_URL;

impl Config {
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec!["Current configuration:".to_string()];
        match &self.base_url {
            Some(url) => lines.push(format!("  base-url: {url}")),
            None => lines.push(format!("  base-url: (unset, using {DEFAULT_BASE_URL})")),
        }
        match &self.transcript_log {
            Some(path) => lines.push(format!("  transcript-log: {path}")),
            None => lines.push("  transcript-log: (unset)".to_string()),
        }
        lines
    }

    pub fn print_all(&self) {
        for line in self.describe() {
            println!("{line}");
        }
    }
}
