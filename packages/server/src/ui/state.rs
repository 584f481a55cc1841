//! Server state.

use std::{collections::HashMap, sync::Arc};

use crate::{domain::NamespaceKind, ui::namespace::NamespaceChannel};

/// Shared application state
pub struct AppState {
    /// 名前空間ごとのチャンネル（状態は名前空間間で共有しない）
    pub channels: HashMap<NamespaceKind, Arc<NamespaceChannel>>,
}

impl AppState {
    pub fn new(channels: impl IntoIterator<Item = Arc<NamespaceChannel>>) -> Self {
        Self {
            channels: channels
                .into_iter()
                .map(|channel| (channel.kind(), channel))
                .collect(),
        }
    }

    /// Channel serving a namespace path segment
    pub fn channel(&self, namespace: &str) -> Option<Arc<NamespaceChannel>> {
        let kind: NamespaceKind = namespace.parse().ok()?;
        self.channels.get(&kind).cloned()
    }

    /// Channels in a stable order
    pub fn ordered(&self) -> impl Iterator<Item = &Arc<NamespaceChannel>> {
        NamespaceKind::ALL
            .into_iter()
            .filter_map(|kind| self.channels.get(&kind))
    }
}
