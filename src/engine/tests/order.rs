#[cfg(test)]
mod tests {
    use crate::Side;
    use crate::engine::order::Order;
    use crate::engine::snapshot::OrderSnapshot;

    #[test]
    fn test_new_order_fields() {
        let order = Order::new(Side::Buy, "ACME", 100, 150.0);

        assert_eq!(order.side(), Side::Buy);
        assert_eq!(order.symbol(), "ACME");
        assert_eq!(order.price(), 150.0);
        assert_eq!(order.quantity(), 100);
        assert_eq!(order.version(), 0, "Version starts at zero");
    }

    #[test]
    fn test_try_decrement_success() {
        let order = Order::new(Side::Sell, "ACME", 100, 150.0);

        assert!(order.try_decrement(100, 40));
        assert_eq!(order.quantity(), 40);

        assert!(order.try_decrement(40, 0));
        assert_eq!(order.quantity(), 0);
    }

    #[test]
    fn test_try_decrement_stale_expected_fails() {
        let order = Order::new(Side::Buy, "ACME", 100, 150.0);

        assert!(order.try_decrement(100, 60));
        // A second decrement based on the old observation must lose.
        assert!(!order.try_decrement(100, 0));
        assert_eq!(order.quantity(), 60);
    }

    #[test]
    fn test_version_bump_is_cas_guarded() {
        let order = Order::new(Side::Buy, "ACME", 10, 1.0);

        assert!(order.try_bump_version(0));
        assert_eq!(order.version(), 1);
        assert!(!order.try_bump_version(0), "Stale expected version must fail");
        assert_eq!(order.version(), 1);
    }

    #[test]
    fn test_snapshot_captures_current_state() {
        let order = Order::new(Side::Sell, "ACME", 75, 99.5);
        order.try_decrement(75, 30);

        let snapshot = OrderSnapshot::capture(&order);
        assert_eq!(snapshot.side, Side::Sell);
        assert_eq!(snapshot.symbol, "ACME");
        assert_eq!(snapshot.price, 99.5);
        assert_eq!(snapshot.quantity, 30);
    }

    #[test]
    fn test_side_display_and_opposite() {
        assert_eq!(Side::Buy.to_string(), "BUY");
        assert_eq!(Side::Sell.to_string(), "SELL");
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_outranks_is_strict() {
        // Higher price wins on the bid side, lower on the ask side; ties never outrank.
        assert!(Side::Buy.outranks(151.0, 150.0));
        assert!(!Side::Buy.outranks(150.0, 151.0));
        assert!(!Side::Buy.outranks(150.0, 150.0));

        assert!(Side::Sell.outranks(150.0, 151.0));
        assert!(!Side::Sell.outranks(151.0, 150.0));
        assert!(!Side::Sell.outranks(150.0, 150.0));
    }

    #[test]
    fn test_order_display() {
        let order = Order::new(Side::Buy, "ACME", 100, 150.0);
        assert_eq!(order.to_string(), "Order{BUY ACME, qty=100, price=150.00}");
    }
}
