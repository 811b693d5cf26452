//! Integration tests for local persistence
//!
//! Covers the namespaced storage layer and the session save/restore cycle
//! built on top of it.

use todohub::session::{self, clear_session, load_session, persist_session, stored_token};
use todohub::storage::{storage_clear, storage_delete, storage_get, storage_keys, storage_set};
use todohub::types::{AuthUser, Session};

mod storage_tests {
    use super::*;

    #[test]
    fn test_storage_set_and_get() {
        let namespace = "test-store-1";
        let key = "test_key";
        let value = r#"{"name": "test", "count": 42}"#;

        storage_set(namespace, key, value).expect("Failed to set storage");

        let retrieved = storage_get(namespace, key);
        assert_eq!(retrieved, Some(value.to_string()));

        // Cleanup
        storage_delete(namespace, key).expect("Failed to delete");
    }

    #[test]
    fn test_storage_get_nonexistent() {
        let namespace = "test-store-nonexistent";
        let result = storage_get(namespace, "nonexistent_key");
        assert_eq!(result, None);
    }

    #[test]
    fn test_storage_delete() {
        let namespace = "test-store-delete";
        let key = "to_delete";

        storage_set(namespace, key, "value").expect("Failed to set");
        assert!(storage_get(namespace, key).is_some());

        storage_delete(namespace, key).expect("Failed to delete");
        assert!(storage_get(namespace, key).is_none());
    }

    #[test]
    fn test_storage_keys() {
        let namespace = "test-store-keys";

        storage_set(namespace, "key1", "value1").expect("Failed to set key1");
        storage_set(namespace, "key2", "value2").expect("Failed to set key2");
        storage_set(namespace, "key3", "value3").expect("Failed to set key3");

        let keys = storage_keys(namespace);
        assert!(keys.contains(&"key1".to_string()));
        assert!(keys.contains(&"key2".to_string()));
        assert!(keys.contains(&"key3".to_string()));

        // Cleanup
        storage_clear(namespace).expect("Failed to clear");
    }

    #[test]
    fn test_storage_clear() {
        let namespace = "test-store-clear";

        storage_set(namespace, "key1", "value1").expect("Failed to set");
        storage_set(namespace, "key2", "value2").expect("Failed to set");

        storage_clear(namespace).expect("Failed to clear");

        assert!(storage_get(namespace, "key1").is_none());
        assert!(storage_get(namespace, "key2").is_none());
        assert!(storage_keys(namespace).is_empty());
    }

    #[test]
    fn test_storage_isolation() {
        let ns1 = "test-store-isolation-1";
        let ns2 = "test-store-isolation-2";

        storage_set(ns1, "shared_key", "first_value").expect("Failed to set ns1");
        storage_set(ns2, "shared_key", "second_value").expect("Failed to set ns2");

        assert_eq!(
            storage_get(ns1, "shared_key"),
            Some("first_value".to_string())
        );
        assert_eq!(
            storage_get(ns2, "shared_key"),
            Some("second_value".to_string())
        );

        // Cleanup
        storage_clear(ns1).expect("Failed to clear ns1");
        storage_clear(ns2).expect("Failed to clear ns2");
    }

    #[test]
    fn test_storage_special_characters_in_key() {
        let namespace = "test-store-special";
        let key = "user:preferences:theme"; // Contains colons
        let value = "dark";

        storage_set(namespace, key, value).expect("Failed to set");

        // Key gets sanitized, so check through the key listing
        let keys = storage_keys(namespace);
        assert!(!keys.is_empty());

        storage_clear(namespace).expect("Failed to clear");
    }
}

mod session_tests {
    use super::*;

    // The session helpers all read and write the one fixed namespace, so the
    // whole lifecycle runs as a single test to keep the steps ordered.
    #[test]
    fn test_session_persist_load_clear_lifecycle() {
        let session = Session {
            user: AuthUser {
                id: 42,
                email: "ada@example.com".to_string(),
                name: Some("Ada".to_string()),
            },
            token: "header.payload.signature".to_string(),
        };

        persist_session(&session).expect("Failed to persist session");

        assert_eq!(stored_token(), Some("header.payload.signature".to_string()));

        let restored = load_session().expect("Persisted session should load back");
        assert_eq!(restored.user.id, 42);
        assert_eq!(restored.user.email, "ada@example.com");
        assert_eq!(restored.user.name.as_deref(), Some("Ada"));
        assert_eq!(restored.token, "header.payload.signature");

        // A corrupted user record reads back as signed out, not a panic
        storage_set(session::SESSION_NAMESPACE, "user", "{not json")
            .expect("Failed to overwrite user record");
        assert!(load_session().is_none());

        clear_session();
        assert!(load_session().is_none());
        assert_eq!(stored_token(), None);
    }
}
