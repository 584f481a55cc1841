//! Namespaces partition the event vocabularies and routing rules per domain.

use std::{fmt, str::FromStr};

use serde::Serialize;

/// One interaction domain with its own connections and rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceKind {
    Chat,
    Contract,
    Deal,
    Notification,
}

impl NamespaceKind {
    pub const ALL: [NamespaceKind; 4] = [
        NamespaceKind::Chat,
        NamespaceKind::Contract,
        NamespaceKind::Deal,
        NamespaceKind::Notification,
    ];

    /// Path segment used in `/ws/{namespace}`
    pub fn as_str(&self) -> &'static str {
        match self {
            NamespaceKind::Chat => "chat",
            NamespaceKind::Contract => "contract",
            NamespaceKind::Deal => "deal",
            NamespaceKind::Notification => "notification",
        }
    }
}

impl fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown namespace name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown namespace: {0}")]
pub struct UnknownNamespace(pub String);

impl FromStr for NamespaceKind {
    type Err = UnknownNamespace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamespaceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownNamespace(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_round_trips_through_path_segment() {
        // テスト項目: パスセグメントから全ての名前空間を解決できる
        for kind in NamespaceKind::ALL {
            // when (操作):
            let parsed: NamespaceKind = kind.as_str().parse().unwrap();

            // then (期待する結果):
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_namespace_is_rejected() {
        // テスト項目: 未知の名前空間はエラーになる
        // when (操作):
        let result = "payments".parse::<NamespaceKind>();

        // then (期待する結果):
        assert_eq!(result, Err(UnknownNamespace("payments".to_string())));
    }
}
