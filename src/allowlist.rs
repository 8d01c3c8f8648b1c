//! Trusted-sender registry
//!
//! Senders on the allow-list are exempt from every spam check.

use std::collections::HashSet;
use tokio::sync::RwLock;

/// Set of sender identifiers considered trusted
#[derive(Default)]
pub struct AllowList {
    users: RwLock<HashSet<String>>,
}

impl AllowList {
    pub fn new() -> Self {
        AllowList::default()
    }

    /// Idempotent union insert.
    pub async fn add(&self, ids: &[String]) {
        let mut users = self.users.write().await;
        for id in ids {
            users.insert(id.clone());
        }
    }

    /// Idempotent removal; removing an absent id is a no-op.
    pub async fn remove(&self, ids: &[String]) {
        let mut users = self.users.write().await;
        for id in ids {
            users.remove(id);
        }
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.users.read().await.contains(id)
    }

    /// All trusted ids, in no particular order.
    pub async fn list(&self) -> Vec<String> {
        self.users.read().await.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_contains() {
        let list = AllowList::new();
        list.add(&["id1".to_string(), "id2".to_string()]).await;

        assert!(list.contains("id1").await);
        assert!(list.contains("id2").await);
        assert!(!list.contains("id3").await);
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let list = AllowList::new();
        list.add(&["id1".to_string()]).await;
        list.add(&["id1".to_string()]).await;

        assert_eq!(list.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let list = AllowList::new();
        list.add(&["id1".to_string(), "id2".to_string()]).await;
        list.remove(&["id1".to_string()]).await;

        assert!(!list.contains("id1").await);
        assert!(list.contains("id2").await);
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let list = AllowList::new();
        list.add(&["id1".to_string()]).await;
        list.remove(&["missing".to_string()]).await;

        assert_eq!(list.list().await.len(), 1);
    }
}
