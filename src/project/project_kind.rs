use serde::{Deserialize, Serialize};
use std::fmt;

/// Which external toolchain a source tree requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    /// Cargo package at the tree root
    NativeRust,
    /// C or C++ sources somewhere in the tree
    NativeCxx,
    Unsupported,
}

impl ProjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProjectKind::NativeRust => "native-rust",
            ProjectKind::NativeCxx => "native-cxx",
            ProjectKind::Unsupported => "unsupported",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ProjectKind::Unsupported)
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ProjectKind::NativeRust).unwrap(),
            "\"native-rust\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectKind::NativeCxx).unwrap(),
            "\"native-cxx\""
        );
    }

    #[test]
    fn test_project_kind_deserialization() {
        let kind: ProjectKind = serde_json::from_str("\"unsupported\"").unwrap();
        assert_eq!(kind, ProjectKind::Unsupported);
    }

    #[test]
    fn test_display_matches_serde_name() {
        for kind in [
            ProjectKind::NativeRust,
            ProjectKind::NativeCxx,
            ProjectKind::Unsupported,
        ] {
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind)
            );
        }
    }

    #[test]
    fn test_is_supported() {
        assert!(ProjectKind::NativeRust.is_supported());
        assert!(ProjectKind::NativeCxx.is_supported());
        assert!(!ProjectKind::Unsupported.is_supported());
    }
}
