#[cfg(test)]
mod tests {
    use crate::{EnginePolicy, MatchingEngine, Side};
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_default_caps() {
        let policy = EnginePolicy::default();
        assert_eq!(policy.primary_retries, 10);
        assert_eq!(policy.scan_limit, 100);
        assert_eq!(policy.fallback_retries, 50);
        assert_eq!(policy.match_iterations, 100);
    }

    #[test]
    fn test_policy_is_plumbed_through_engine() {
        let policy = EnginePolicy {
            primary_retries: 3,
            scan_limit: 16,
            fallback_retries: 5,
            match_iterations: 8,
        };
        let engine = MatchingEngine::with_policy(policy);
        assert_eq!(engine.policy(), policy);
    }

    #[test]
    fn test_zero_match_iterations_disables_crossing() {
        let engine = MatchingEngine::with_policy(EnginePolicy {
            match_iterations: 0,
            ..EnginePolicy::default()
        });

        engine.admit(Side::Buy, "ACME", 100, 250.0);
        engine.admit(Side::Sell, "ACME", 100, 245.0);

        // With the sweep disabled the crossed orders simply rest.
        assert_eq!(engine.book().bids("ACME").peek().unwrap().quantity, 100);
        assert_eq!(engine.book().asks("ACME").peek().unwrap().quantity, 100);
        assert_eq!(engine.book().spread("ACME"), Some(-5.0));
    }

    #[test]
    fn test_zero_insert_caps_escalate_to_background_inserter() {
        // Exhausted retry caps must degrade to deferred insertion, never to a lost order.
        let engine = MatchingEngine::with_policy(EnginePolicy {
            primary_retries: 0,
            fallback_retries: 0,
            ..EnginePolicy::default()
        });

        engine.admit(Side::Buy, "ACME", 100, 250.0);
        engine.admit(Side::Sell, "ACME", 100, 245.0);

        // Each admit-time sweep ran before its order landed, so both orders rest once
        // the background inserters catch up.
        let deadline = Instant::now() + Duration::from_secs(5);
        while engine.book().bids("ACME").is_empty() || engine.book().asks("ACME").is_empty() {
            assert!(
                Instant::now() < deadline,
                "background inserters never landed the orders"
            );
            thread::sleep(Duration::from_millis(5));
        }

        // An explicit sweep then resolves the crossed book as usual.
        engine.match_symbol("ACME");
        assert!(engine.book().bids("ACME").is_empty());
        assert!(engine.book().asks("ACME").is_empty());
    }

    #[test]
    fn test_match_iterations_cap_leaves_residual_work() {
        // One iteration per sweep: each admission resolves at most one fill.
        let engine = MatchingEngine::with_policy(EnginePolicy {
            match_iterations: 1,
            ..EnginePolicy::default()
        });

        engine.admit(Side::Buy, "ACME", 100, 250.0);
        engine.admit(Side::Buy, "ACME", 100, 251.0);
        engine.admit(Side::Sell, "ACME", 200, 245.0);

        // The single admission sweep filled only the best bid.
        assert_eq!(engine.book().bids("ACME").total_quantity(), 100);
        assert_eq!(engine.book().asks("ACME").total_quantity(), 100);

        // Explicit sweeps finish the job.
        engine.match_symbol("ACME");
        engine.match_symbol("ACME");
        assert!(engine.book().bids("ACME").is_empty());
        assert!(engine.book().asks("ACME").is_empty());
    }
}
