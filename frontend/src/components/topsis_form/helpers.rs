//! Small formatting helpers for the form view.

use gloo_file::File;
use num_format::{Locale, ToFormattedString};

use super::state::SelectedFile;

impl From<&web_sys::File> for SelectedFile {
    fn from(file: &web_sys::File) -> Self {
        let file = File::from(file.clone());
        Self {
            name: file.name(),
            size: file.size(),
        }
    }
}

/// Renders a file summary such as `data.csv (12,480 bytes)`.
pub fn describe_file(file: &SelectedFile) -> String {
    format!(
        "{} ({} bytes)",
        file.name,
        file.size.to_formatted_string(&Locale::en)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_in_file_size() {
        let file = SelectedFile {
            name: "data.csv".to_string(),
            size: 1_234_567,
        };
        assert_eq!(describe_file(&file), "data.csv (1,234,567 bytes)");
    }
}
