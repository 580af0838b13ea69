//! # Integration Test Flows
//!
//! Tests that independent filter clients, the adapters, and the engine work
//! together against one shared store.
//!
//! ## Flows Tested:
//!
//! 1. **Writer → Reader**: separately constructed clients see each other's adds
//! 2. **Timeouts**: a slow store surfaces `StoreUnavailable(Timeout)` per call
//! 3. **Partial outage**: a failing shard only affects elements routed to it
//! 4. **Configuration**: env-style and JSON configuration drive identical filters

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    use shard_bloom::{
        BitStore, FilterConfig, FilterConfigBuilder, FilterError, InMemoryBitStore,
        MembershipFilter, ShardedBloomFilter, StoreError, TimeoutBitStore,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn multi_shard_config() -> FilterConfig {
        FilterConfigBuilder::new()
            .key_prefix("orders")
            .capacity(10_000)
            .error_rate(0.001)
            .shard_bit_width(1 << 15)
            .build()
            .unwrap()
    }

    /// Store that answers after a fixed delay
    struct SlowStore {
        inner: InMemoryBitStore,
        delay: Duration,
    }

    #[async_trait]
    impl BitStore for SlowStore {
        async fn set_bit(&self, key: &str, offset: u32, value: bool) -> Result<(), StoreError> {
            tokio::time::sleep(self.delay).await;
            self.inner.set_bit(key, offset, value).await
        }

        async fn get_bit(&self, key: &str, offset: u32) -> Result<bool, StoreError> {
            tokio::time::sleep(self.delay).await;
            self.inner.get_bit(key, offset).await
        }
    }

    /// Store where one shard key is unreachable
    struct PartitionedStore {
        inner: InMemoryBitStore,
        down_key: String,
    }

    #[async_trait]
    impl BitStore for PartitionedStore {
        async fn set_bit(&self, key: &str, offset: u32, value: bool) -> Result<(), StoreError> {
            if key == self.down_key {
                return Err(StoreError::ConnectionError(format!("{} unreachable", key)));
            }
            self.inner.set_bit(key, offset, value).await
        }

        async fn get_bit(&self, key: &str, offset: u32) -> Result<bool, StoreError> {
            if key == self.down_key {
                return Err(StoreError::ConnectionError(format!("{} unreachable", key)));
            }
            self.inner.get_bit(key, offset).await
        }
    }

    // =============================================================================
    // WRITER → READER
    // =============================================================================

    #[tokio::test]
    async fn test_independent_clients_share_state() {
        crate::init_test_tracing();

        let store = Arc::new(InMemoryBitStore::new());
        let writer = ShardedBloomFilter::new(store.clone(), multi_shard_config()).unwrap();
        let reader = ShardedBloomFilter::new(
            TimeoutBitStore::new(store.clone()),
            multi_shard_config(),
        )
        .unwrap();

        for i in 0..200 {
            writer.add(&format!("order-{}", i)).await.unwrap();
        }

        for i in 0..200 {
            let element = format!("order-{}", i);
            assert_eq!(writer.locate(&element), reader.locate(&element));
            assert!(reader.contains(&element).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_keys_stay_inside_prefix_namespace() {
        let store = Arc::new(InMemoryBitStore::new());
        let filter = ShardedBloomFilter::new(store.clone(), multi_shard_config()).unwrap();
        let shard_count = filter.params().shard_count;
        assert_eq!(shard_count, 5);

        filter
            .add_all((0..1_000).map(|i| format!("order-{}", i)))
            .await
            .unwrap();

        let expected: Vec<String> = (0..shard_count).map(|i| format!("orders_{}", i)).collect();
        assert_eq!(store.keys().await, expected);
        for key in &expected {
            assert!(store.len_bytes(key).await <= (1 << 15) / 8);
        }
    }

    #[tokio::test]
    async fn test_prefixes_isolate_filters() {
        let store = Arc::new(InMemoryBitStore::new());
        let a = ShardedBloomFilter::new(
            store.clone(),
            FilterConfig::new("tenant_a", 1_000, 0.01).unwrap(),
        )
        .unwrap();
        let b = ShardedBloomFilter::new(
            store.clone(),
            FilterConfig::new("tenant_b", 1_000, 0.01).unwrap(),
        )
        .unwrap();

        a.add("alice@example.com").await.unwrap();

        assert!(a.contains("alice@example.com").await.unwrap());
        assert!(!b.contains("alice@example.com").await.unwrap());
    }

    // =============================================================================
    // FAILURE HANDLING
    // =============================================================================

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let slow = SlowStore {
            inner: InMemoryBitStore::new(),
            delay: Duration::from_millis(200),
        };
        let store = TimeoutBitStore::with_timeout(slow, Duration::from_millis(20));
        let filter = ShardedBloomFilter::new(store, multi_shard_config()).unwrap();

        let add = filter.add("late").await;
        assert!(matches!(
            add,
            Err(FilterError::StoreUnavailable(StoreError::Timeout))
        ));

        let lookup = filter.contains("late").await;
        assert!(matches!(
            lookup,
            Err(FilterError::StoreUnavailable(StoreError::Timeout))
        ));
        assert!(lookup.unwrap_err().is_retryable());

        // Nothing reached the store
        assert_eq!(filter.store().inner().inner.total_ones().await, 0);
    }

    #[tokio::test]
    async fn test_partitioned_shard_only_fails_its_elements() {
        let config = multi_shard_config();
        let probe = ShardedBloomFilter::new(InMemoryBitStore::new(), config.clone()).unwrap();
        let down_key = probe.shard_key_for("order-0");

        let filter = ShardedBloomFilter::new(
            PartitionedStore {
                inner: InMemoryBitStore::new(),
                down_key: down_key.clone(),
            },
            config,
        )
        .unwrap();

        let mut failed = 0;
        for i in 0..300 {
            let element = format!("order-{}", i);
            match filter.add(&element).await {
                Ok(()) => assert!(filter.contains(&element).await.unwrap()),
                Err(FilterError::StoreUnavailable(_)) => {
                    assert_eq!(filter.shard_key_for(&element), down_key);
                    assert!(filter.contains(&element).await.is_err());
                    failed += 1;
                }
                Err(other) => panic!("unexpected error: {}", other),
            }
        }

        assert!(failed > 0 && failed < 300);
    }

    // =============================================================================
    // CONFIGURATION
    // =============================================================================

    #[tokio::test]
    async fn test_json_config_matches_builder() {
        let from_json = FilterConfig::from_json_str(
            r#"{
                "key_prefix": "orders",
                "capacity": 10000,
                "error_rate": 0.001,
                "shard_bit_width": 32768
            }"#,
        )
        .unwrap();
        assert_eq!(from_json, multi_shard_config());

        let store = Arc::new(InMemoryBitStore::new());
        let a = ShardedBloomFilter::new(store.clone(), from_json).unwrap();
        let b = ShardedBloomFilter::new(store.clone(), multi_shard_config()).unwrap();

        a.add(&12345u32).await.unwrap();
        assert!(b.contains("12345").await.unwrap());
        assert_eq!(a.params(), b.params());
    }

    #[tokio::test]
    async fn test_default_config_scenario() {
        let filter =
            ShardedBloomFilter::new(InMemoryBitStore::new(), FilterConfig::default()).unwrap();

        assert_eq!(filter.params().hash_count, 24);
        assert_eq!(filter.params().shard_count, 1);

        filter.add("sbs").await.unwrap();
        assert!(filter.contains("sbs").await.unwrap());
        assert!(!filter.contains("totally-unrelated-value").await.unwrap());
    }
}
