#[cfg(test)]
mod tests {
    use super::super::analysis::analyze_events;
    use super::super::config::ReportConfig;
    use super::super::events::EventLog;
    use super::super::report::format_report;
    use serde_json::json;

    fn render(events: serde_json::Value) -> String {
        let log = EventLog::from_json(&events.to_string()).unwrap();
        let report = analyze_events(log.events(), &ReportConfig::default()).unwrap();
        format_report(&report)
    }

    #[test]
    fn test_full_report_layout() {
        let output = render(json!([
            {"tick": 0, "village_id": "village_a", "event_type": {
                "type": "TradeExecuted", "trade_type": "Buy", "resource": "Wood",
                "quantity": 10, "price": 2, "total_value": 20}},
            {"tick": 0, "village_id": "village_a", "event_type": {
                "type": "TradeExecuted", "trade_type": "Sell", "resource": "Food",
                "quantity": 5, "price": 3, "total_value": 15}},
            {"tick": 0, "village_id": "market", "event_type": {
                "type": "AuctionCleared", "clearing_prices": {"Wood": 2.0, "Food": "3"}}},
            {"tick": 1, "village_id": "village_b", "event_type": {
                "type": "OrderPlaced", "order_type": "Bid", "resource": "Wood",
                "quantity": 4, "price": 2.5}},
            {"tick": 1, "village_id": "village_a", "event_type": {
                "type": "WorkerAllocation", "food_workers": 5, "wood_workers": 3,
                "construction_workers": 1, "idle_workers": 0}},
            {"tick": 1, "village_id": "village_a", "event_type": {"type": "WorkerBorn"}}
        ]));

        let expected = "
Total events: 6
Total trades: 2
Total auction clearings: 1
Total orders placed: 1

=== Village Trade Summary ===

village_a:
  Buys: 1 trades
  Sells: 1 trades
  Total spent: 20.00
  Total earned: 15.00
  Net profit: -5.00
  Sample buys:
    Tick 0: 10 Wood @ 2 = 20
  Sample sells:
    Tick 0: 5 Food @ 3 = 15

=== Auction Clearing Prices ===

Tick 0:
  Wood: 2.0
  Food: 3

Average wood price: 2.00
Average food price: 3.00

=== Orders by Village ===

village_b:
  Total bids: 1
  Total asks: 0

=== Sample Orders (first 5) ===
Tick 1 - village_b: Bid 4 Wood @ 2.5

=== Worker Allocation Patterns ===

village_a (first 5 ticks):
  Tick 1: Food=5, Wood=3, Construction=1, Idle=0
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_order_sample_prints_logged_side_tag() {
        let output = render(json!([
            {"tick": 0, "village_id": "village_a", "event_type": {
                "type": "OrderPlaced", "order_type": "bid", "resource": "Wood",
                "quantity": 1, "price": 2}},
            {"tick": 0, "village_id": "village_a", "event_type": {
                "type": "OrderPlaced", "order_type": "Offer", "resource": "Wood",
                "quantity": 1, "price": 2}}
        ]));

        assert!(output.contains("village_a:\n  Total bids: 0\n  Total asks: 2\n"));
        assert!(output.contains("Tick 0 - village_a: bid 1 Wood @ 2\n"));
        assert!(output.contains("Tick 0 - village_a: Offer 1 Wood @ 2\n"));
        assert!(!output.contains("Ask 1 Wood"));
    }

    #[test]
    fn test_small_clearing_price_uses_exponent_form() {
        let output = render(json!([
            {"tick": 0, "village_id": "market", "event_type": {
                "type": "AuctionCleared", "clearing_prices": {"Wood": 0.00001}}}
        ]));
        assert!(output.contains("\nTick 0:\n  Wood: 1e-05\n"));
        assert!(output.contains("Average wood price: 0.00\n"));
    }

    #[test]
    fn test_empty_log_prints_only_headers() {
        let output = render(json!([]));
        assert!(output.starts_with("\nTotal events: 0\n"));
        assert!(output.contains("=== Village Trade Summary ===\n\n=== Auction Clearing Prices ===\n\n"));
        assert!(!output.contains("Average"));
        assert!(output.ends_with("=== Worker Allocation Patterns ===\n"));
    }

    #[test]
    fn test_food_average_without_wood_has_no_gap() {
        let output = render(json!([
            {"tick": 2, "village_id": "market", "event_type": {
                "type": "AuctionCleared", "clearing_prices": {"Food": 1.25}}}
        ]));
        assert!(output.contains("\nTick 2:\n  Food: 1.25\nAverage food price: 1.25\n"));
        assert!(!output.contains("Average wood price"));
    }

    #[test]
    fn test_sell_only_village_has_no_buy_sample() {
        let output = render(json!([
            {"tick": 4, "village_id": "village_b", "event_type": {
                "type": "TradeExecuted", "trade_type": "Sell", "resource": "Wood",
                "quantity": "1.5", "price": "2", "total_value": "3.250"}}
        ]));
        assert!(!output.contains("Sample buys:"));
        assert!(output.contains("  Sample sells:\n    Tick 4: 1.5 Wood @ 2 = 3.250\n"));
        assert!(output.contains("  Total earned: 3.25\n  Net profit: 3.25\n"));
    }
}
