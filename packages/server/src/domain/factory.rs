//! Domain factories for server-assigned identifiers.

use super::{ConnectionId, error::ValueObjectError};

/// Factory for generating ConnectionId instances.
///
/// Every transport session gets a fresh UUID v4.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for consistency
    /// with the domain error handling pattern.
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        ConnectionId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Factory for server-assigned message ids (the `id` of `receive_message`).
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new message id.
    pub fn generate() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_factory_generate() {
        // テスト項目: ConnectionIdFactory::generate() で UUID v4 形式の ID を生成できる
        // when (操作):
        let connection_id = ConnectionIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_eq!(connection_id.as_str().len(), 36);
    }

    #[test]
    fn test_connection_id_factory_generate_uniqueness() {
        // テスト項目: 毎回異なる ID が生成される
        // when (操作):
        let id1 = ConnectionIdFactory::generate().unwrap();
        let id2 = ConnectionIdFactory::generate().unwrap();

        // then (期待する結果):
        assert_ne!(id1, id2);
        assert_ne!(MessageIdFactory::generate(), MessageIdFactory::generate());
    }
}
