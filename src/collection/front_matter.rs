//! YAML front matter parsing.

use crate::error::PublishError;
use crate::item::ItemMetadata;
use std::path::Path;

const DELIMITER: &str = "---";

/// Split `content` into its front matter block and the remaining body.
///
/// Front matter must start on the first line with `---` and end with a line
/// that is exactly `---` or `...`.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let first_line_end = content.find('\n')?;
    if content[..first_line_end].trim_end() != DELIMITER {
        return None;
    }

    let rest = &content[first_line_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == DELIMITER || trimmed == "..." {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse the front matter of `content` into item metadata.
///
/// Content without front matter yields empty metadata.
pub fn parse(path: &Path, content: &str) -> Result<ItemMetadata, PublishError> {
    let Some((yaml, _body)) = split(content) else {
        return Ok(ItemMetadata::new());
    };
    if yaml.trim().is_empty() {
        return Ok(ItemMetadata::new());
    }
    serde_yaml::from_str(yaml).map_err(|source| PublishError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })
}
