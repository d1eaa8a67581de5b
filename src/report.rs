//! Text rendering of a [`TradeReport`].

use crate::analysis::TradeReport;
use crate::classify::Record;
use crate::events::TradeExecuted;

/// Render the full report. Totals and averages get two decimals, every other
/// number is printed as it appeared in the log.
pub fn format_report(report: &TradeReport<'_>) -> String {
    let mut output = String::new();

    output.push_str(&format!("\nTotal events: {}\n", report.total_events));
    output.push_str(&format!("Total trades: {}\n", report.total_trades));
    output.push_str(&format!("Total auction clearings: {}\n", report.total_auction_clearings));
    output.push_str(&format!("Total orders placed: {}\n", report.total_orders));

    format_trades(report, &mut output);
    format_auction(report, &mut output);
    format_orders(report, &mut output);
    format_allocations(report, &mut output);

    output
}

fn format_trades(report: &TradeReport<'_>, output: &mut String) {
    output.push_str("\n=== Village Trade Summary ===\n");

    for village in &report.trades {
        output.push_str(&format!("\n{}:\n", village.village_id));
        output.push_str(&format!("  Buys: {} trades\n", village.buys));
        output.push_str(&format!("  Sells: {} trades\n", village.sells));
        output.push_str(&format!("  Total spent: {:.2}\n", village.total_spent));
        output.push_str(&format!("  Total earned: {:.2}\n", village.total_earned));
        output.push_str(&format!("  Net profit: {:.2}\n", village.net_profit()));

        if !village.sample_buys.is_empty() {
            output.push_str("  Sample buys:\n");
            push_trade_lines(&village.sample_buys, output);
        }
        if !village.sample_sells.is_empty() {
            output.push_str("  Sample sells:\n");
            push_trade_lines(&village.sample_sells, output);
        }
    }
}

fn push_trade_lines(trades: &[Record<'_, TradeExecuted>], output: &mut String) {
    for trade in trades {
        let data = trade.data;
        output.push_str(&format!(
            "    Tick {}: {} {} @ {} = {}\n",
            trade.tick, data.quantity, data.resource, data.price, data.total_value
        ));
    }
}

fn format_auction(report: &TradeReport<'_>, output: &mut String) {
    output.push_str("\n=== Auction Clearing Prices ===\n");

    for clearing in &report.auction.examined {
        output.push_str(&format!("\nTick {}:\n", clearing.tick));
        for (resource, price) in clearing.data.clearing_prices.iter() {
            output.push_str(&format!("  {}: {}\n", resource, price));
        }
    }

    // Only the first tracked resource's line is preceded by a blank line.
    for (i, series) in report.auction.tracked.iter().enumerate() {
        if let Some(average) = series.average() {
            let gap = if i == 0 { "\n" } else { "" };
            output.push_str(&format!(
                "{}Average {} price: {:.2}\n",
                gap,
                series.resource.to_lowercase(),
                average
            ));
        }
    }
}

fn format_orders(report: &TradeReport<'_>, output: &mut String) {
    output.push_str("\n=== Orders by Village ===\n");

    for village in &report.orders.villages {
        output.push_str(&format!("\n{}:\n", village.village_id));
        output.push_str(&format!("  Total bids: {}\n", village.bids));
        output.push_str(&format!("  Total asks: {}\n", village.asks));
    }

    output.push_str(&format!("\n=== Sample Orders (first {}) ===\n", report.order_sample_size));
    for order in &report.orders.sample {
        let data = order.data;
        output.push_str(&format!(
            "Tick {} - {}: {} {} {} @ {}\n",
            order.tick, order.village_id, data.order_type, data.quantity, data.resource, data.price
        ));
    }
}

fn format_allocations(report: &TradeReport<'_>, output: &mut String) {
    output.push_str("\n=== Worker Allocation Patterns ===\n");

    for village in &report.allocations {
        output.push_str(&format!(
            "\n{} (first {} ticks):\n",
            village.village_id, report.allocation_sample_size
        ));
        for alloc in &village.records {
            let data = alloc.data;
            output.push_str(&format!(
                "  Tick {}: Food={}, Wood={}, Construction={}, Idle={}\n",
                alloc.tick,
                data.food_workers,
                data.wood_workers,
                data.construction_workers,
                data.idle_workers
            ));
        }
    }
}
