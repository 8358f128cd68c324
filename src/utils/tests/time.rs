#[cfg(test)]
mod tests {
    use crate::current_time_millis;
    use std::thread;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    #[test]
    fn test_current_time_millis_increases() {
        let time1 = current_time_millis();
        // Sleep for a bit to ensure time passes
        thread::sleep(Duration::from_millis(5));
        let time2 = current_time_millis();

        // The second time should be greater than the first
        assert!(time2 > time1, "Time should increase between calls");
    }

    #[test]
    fn test_current_time_millis_is_reasonably_current() {
        let time_from_function = current_time_millis();
        let time_direct = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64;

        // Allow a small difference due to execution time between the two calls
        let difference = time_direct.abs_diff(time_from_function);
        assert!(
            difference <= 10,
            "Time difference should be small, but got {difference}ms"
        );
    }
}
