//! Snapshot of a game's files on disk.

use serde::{Deserialize, Serialize};

/// A file or directory in a game's scanned file tree.
///
/// A directory's recorded `size` may be missing from a scan; [`total_size`]
/// falls back to the sum of its children.
///
/// [`total_size`]: FileNode::total_size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// File or directory name (not the full path).
    pub name: String,

    /// Size in bytes.
    #[serde(default)]
    pub size: u64,

    /// Child nodes. Empty for plain files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

impl FileNode {
    /// Creates a leaf file node.
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            children: Vec::new(),
        }
    }

    /// Creates a directory node whose size is the sum of its children.
    pub fn dir(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        let size = children
            .iter()
            .map(|c| c.size)
            .fold(0, u64::saturating_add);
        Self {
            name: name.into(),
            size,
            children,
        }
    }

    /// Returns true if the node has children.
    pub fn is_dir(&self) -> bool {
        !self.children.is_empty()
    }

    /// Size of this node in bytes: the recorded size or the sum of the
    /// children's total sizes, whichever is larger.
    pub fn total_size(&self) -> u64 {
        self.children
            .iter()
            .map(FileNode::total_size)
            .fold(0, u64::saturating_add)
            .max(self.size)
    }

    /// Iterates over this node and all of its descendants, depth-first, pre-order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Depth-first iterator returned by [`FileNode::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a FileNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a FileNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FileNode {
        FileNode::dir(
            "Hollow Knight",
            vec![
                FileNode::file("hollow_knight.exe", 600),
                FileNode::dir(
                    "data",
                    vec![
                        FileNode::file("level0.assets", 300),
                        FileNode::file("sharedassets.assets", 100),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_dir_size_is_sum_of_children() {
        let tree = sample_tree();
        assert_eq!(tree.total_size(), 1000);
        assert_eq!(tree.children[1].size, 400);
    }

    #[test]
    fn test_total_size_without_recorded_dir_size() {
        let json = r#"{"name":"A","children":[
            {"name":"big.iso","size":5000},
            {"name":"extras","children":[{"name":"manual.pdf","size":25}]}
        ]}"#;
        let tree: FileNode = serde_json::from_str(json).unwrap();
        assert_eq!(tree.size, 0);
        assert_eq!(tree.total_size(), 5025);
    }

    #[test]
    fn test_sizes_saturate() {
        let tree = FileNode::dir(
            "huge",
            vec![FileNode::file("a", u64::MAX), FileNode::file("b", 1)],
        );
        assert_eq!(tree.size, u64::MAX);
        assert_eq!(tree.total_size(), u64::MAX);
    }

    #[test]
    fn test_walk_is_preorder() {
        let tree = sample_tree();
        let names: Vec<&str> = tree.walk().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Hollow Knight",
                "hollow_knight.exe",
                "data",
                "level0.assets",
                "sharedassets.assets"
            ]
        );
    }

    #[test]
    fn test_file_is_not_dir() {
        assert!(!FileNode::file("a.txt", 1).is_dir());
        assert!(sample_tree().is_dir());
    }
}
