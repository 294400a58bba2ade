//! Connection pool: all active connections indexed by user email.

use std::sync::Arc;

use dashmap::DashMap;

use noteshare_core::types::id::ConnectionId;

use super::handle::ConnectionHandle;

/// Thread-safe pool of all active WebSocket connections.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    /// Email → connection handles, oldest first (one user can have several tabs open).
    by_user: DashMap<String, Vec<Arc<ConnectionHandle>>>,
    /// Connection ID → connection handle for direct lookup.
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionPool {
    /// Creates a new empty connection pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to the pool.
    pub fn add(&self, handle: Arc<ConnectionHandle>) {
        self.by_id.insert(handle.id, handle.clone());
        self.by_user
            .entry(handle.email.clone())
            .or_default()
            .push(handle);
    }

    /// Removes a connection from the pool.
    pub fn remove(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.by_id.remove(conn_id)?;
        self.by_user.remove_if_mut(&handle.email, |_, connections| {
            connections.retain(|c| c.id != *conn_id);
            connections.is_empty()
        });
        Some(handle)
    }

    /// Gets all connections for a user, oldest first.
    pub fn get_user_connections(&self, email: &str) -> Vec<Arc<ConnectionHandle>> {
        self.by_user
            .get(email)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Gets a specific connection by ID.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.by_id.get(conn_id).map(|entry| entry.value().clone())
    }

    /// Returns total number of active connections.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }

    /// Returns number of unique connected users.
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }

    /// Returns all connection handles.
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.by_id
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn handle(email: &str) -> Arc<ConnectionHandle> {
        let (tx, _rx) = mpsc::channel(1);
        Arc::new(ConnectionHandle::new(email.to_string(), tx))
    }

    #[test]
    fn test_add_and_remove() {
        let pool = ConnectionPool::new();
        let first = handle("bob@x.com");
        let second = handle("bob@x.com");
        let other = handle("alice@x.com");
        pool.add(first.clone());
        pool.add(second.clone());
        pool.add(other.clone());

        assert_eq!(pool.connection_count(), 3);
        assert_eq!(pool.user_count(), 2);
        let ids: Vec<_> = pool.get_user_connections("bob@x.com").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);

        assert!(pool.remove(&first.id).is_some());
        assert!(pool.remove(&first.id).is_none());
        assert_eq!(pool.get_user_connections("bob@x.com").len(), 1);

        pool.remove(&second.id);
        assert_eq!(pool.user_count(), 1);
        assert!(pool.get_user_connections("bob@x.com").is_empty());
        assert!(pool.get(&other.id).is_some());
    }
}
