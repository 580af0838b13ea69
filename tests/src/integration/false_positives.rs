//! # False Positive Rate
//!
//! Fills a filter to capacity and probes it with values that were never
//! inserted. When the shard address space equals `m`, the observed rate must
//! track the theoretical (1 - e^(-kn/m))^k.

#[cfg(test)]
mod tests {
    use shard_bloom::domain::calculate_fpr;
    use shard_bloom::{
        FilterConfigBuilder, InMemoryBitStore, MembershipFilter, Metrics, ShardedBloomFilter,
    };
    use std::sync::Arc;

    const CAPACITY: u64 = 10_000;
    const PROBES: u64 = 50_000;

    async fn observed_rate(shard_bit_width: Option<u64>) -> (f64, f64) {
        let mut builder = FilterConfigBuilder::new()
            .key_prefix("fpr")
            .capacity(CAPACITY)
            .error_rate(0.01);
        if let Some(width) = shard_bit_width {
            builder = builder.shard_bit_width(width);
        }
        let config = builder.build().unwrap();

        let metrics = Arc::new(Metrics::new());
        let filter =
            ShardedBloomFilter::with_metrics(InMemoryBitStore::new(), config, metrics.clone())
                .unwrap();

        for i in 0..CAPACITY {
            filter.add(&format!("member-{}", i)).await.unwrap();
        }

        metrics.reset();
        for i in 0..PROBES {
            filter.contains(&format!("probe-{}", i)).await.unwrap();
        }

        let params = filter.params();
        let theoretical = calculate_fpr(params.size_bits, CAPACITY, params.hash_count);
        (metrics.observed_positive_rate(), theoretical)
    }

    #[tokio::test]
    async fn test_observed_rate_tracks_theory_when_shard_equals_m() {
        crate::init_test_tracing();

        // m for (10_000, 0.01)
        let (observed, theoretical) = observed_rate(Some(95_851)).await;

        assert!(theoretical > 0.009 && theoretical < 0.011);
        assert!(
            observed > theoretical * 0.6 && observed < theoretical * 1.4,
            "observed {} vs theoretical {}",
            observed,
            theoretical
        );
    }

    #[tokio::test]
    async fn test_full_width_shard_stays_below_bound() {
        // Offsets spread over 2^32 bits, far more than m
        let (observed, theoretical) = observed_rate(None).await;

        assert!(
            observed <= theoretical,
            "observed {} exceeds theoretical {}",
            observed,
            theoretical
        );
    }

    #[tokio::test]
    async fn test_rate_rises_past_capacity() {
        let config = FilterConfigBuilder::new()
            .key_prefix("overfull")
            .capacity(1_000)
            .error_rate(0.01)
            .shard_bit_width(9_586)
            .build()
            .unwrap();
        let metrics = Arc::new(Metrics::new());
        let filter =
            ShardedBloomFilter::with_metrics(InMemoryBitStore::new(), config, metrics.clone())
                .unwrap();

        // Five times the planned capacity
        for i in 0..5_000u32 {
            filter.add(&i).await.unwrap();
        }
        metrics.reset();
        for i in 0..5_000 {
            filter.contains(&format!("absent-{}", i)).await.unwrap();
        }

        assert!(metrics.observed_positive_rate() > 0.1);
    }
}
