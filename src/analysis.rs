//! Aggregation of classified events into report figures.

use crate::classify::{Record, classify};
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::events::{
    AuctionCleared, Event, OrderPlaced, OrderSide, TradeExecuted, TradeSide, WorkerAllocation,
};
use std::collections::HashMap;

/// Everything the text report shows for one event log.
#[derive(Debug)]
pub struct TradeReport<'a> {
    pub total_events: usize,
    pub total_trades: usize,
    pub total_auction_clearings: usize,
    pub total_orders: usize,
    pub total_allocations: usize,
    pub unrecognized: usize,
    pub trades: Vec<VillageTrades<'a>>,
    pub auction: AuctionPrices<'a>,
    pub orders: OrderFlow<'a>,
    pub allocations: Vec<VillageAllocations<'a>>,
    pub order_sample_size: usize,
    pub allocation_sample_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VillageTrades<'a> {
    pub village_id: &'a str,
    pub buys: usize,
    pub sells: usize,
    pub total_spent: f64,
    pub total_earned: f64,
    pub sample_buys: Vec<Record<'a, TradeExecuted>>,
    pub sample_sells: Vec<Record<'a, TradeExecuted>>,
}

impl<'a> VillageTrades<'a> {
    fn new(village_id: &'a str) -> Self {
        Self {
            village_id,
            buys: 0,
            sells: 0,
            total_spent: 0.0,
            total_earned: 0.0,
            sample_buys: Vec::new(),
            sample_sells: Vec::new(),
        }
    }

    pub fn net_profit(&self) -> f64 {
        self.total_earned - self.total_spent
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuctionPrices<'a> {
    /// The leading clearings that were printed and averaged.
    pub examined: Vec<Record<'a, AuctionCleared>>,
    pub tracked: Vec<TrackedPrices>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackedPrices {
    pub resource: String,
    pub prices: Vec<f64>,
}

impl TrackedPrices {
    pub fn average(&self) -> Option<f64> {
        if self.prices.is_empty() {
            return None;
        }
        Some(self.prices.iter().sum::<f64>() / self.prices.len() as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderFlow<'a> {
    pub villages: Vec<VillageOrders<'a>>,
    /// Leading orders of the whole log, ungrouped.
    pub sample: Vec<Record<'a, OrderPlaced>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VillageOrders<'a> {
    pub village_id: &'a str,
    pub bids: usize,
    pub asks: usize,
}

impl VillageOrders<'_> {
    pub fn total(&self) -> usize {
        self.bids + self.asks
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VillageAllocations<'a> {
    pub village_id: &'a str,
    pub records: Vec<Record<'a, WorkerAllocation>>,
}

/// Groups keyed by village id, kept in order of first appearance.
struct ByVillage<'a, T> {
    groups: Vec<T>,
    index: HashMap<&'a str, usize>,
}

impl<'a, T> ByVillage<'a, T> {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn get_or_insert_with(&mut self, village_id: &'a str, make: impl FnOnce() -> T) -> &mut T {
        let groups = &mut self.groups;
        let slot = *self.index.entry(village_id).or_insert_with(|| {
            groups.push(make());
            groups.len() - 1
        });
        &mut groups[slot]
    }

    fn into_groups(self) -> Vec<T> {
        self.groups
    }
}

/// Classify `events` and compute every section of the report.
pub fn analyze_events<'a>(
    events: &'a [Event],
    config: &ReportConfig,
) -> Result<TradeReport<'a>, ReportError> {
    let buckets = classify(events);

    let trades = summarize_trades(&buckets.trades, config.trade_sample_size)?;
    let auction = track_auction_prices(
        &buckets.auctions,
        config.auction_window,
        &config.tracked_resources,
    )?;
    let orders = summarize_orders(&buckets.orders, config.order_sample_size);
    let allocations = sample_allocations(
        &buckets.allocations,
        &config.allocation_villages,
        config.allocation_sample_size,
    );

    Ok(TradeReport {
        total_events: events.len(),
        total_trades: buckets.trades.len(),
        total_auction_clearings: buckets.auctions.len(),
        total_orders: buckets.orders.len(),
        total_allocations: buckets.allocations.len(),
        unrecognized: buckets.dropped,
        trades,
        auction,
        orders,
        allocations,
        order_sample_size: config.order_sample_size,
        allocation_sample_size: config.allocation_sample_size,
    })
}

/// Per-village trade totals over the whole bucket, with the first
/// `sample_size` buys and sells kept for display.
pub fn summarize_trades<'a>(
    trades: &[Record<'a, TradeExecuted>],
    sample_size: usize,
) -> Result<Vec<VillageTrades<'a>>, ReportError> {
    let mut villages = ByVillage::new();

    for trade in trades {
        let summary =
            villages.get_or_insert_with(trade.village_id, || VillageTrades::new(trade.village_id));
        let value = trade.data.total_value.to_f64("total_value")?;

        match trade.data.trade_type {
            TradeSide::Buy => {
                summary.buys += 1;
                summary.total_spent += value;
                if summary.sample_buys.len() < sample_size {
                    summary.sample_buys.push(*trade);
                }
            }
            TradeSide::Sell => {
                summary.sells += 1;
                summary.total_earned += value;
                if summary.sample_sells.len() < sample_size {
                    summary.sample_sells.push(*trade);
                }
            }
        }
    }

    Ok(villages.into_groups())
}

/// Prices of the tracked resources over the first `window` clearings only.
pub fn track_auction_prices<'a>(
    auctions: &[Record<'a, AuctionCleared>],
    window: usize,
    tracked_resources: &[String],
) -> Result<AuctionPrices<'a>, ReportError> {
    let examined: Vec<_> = auctions.iter().take(window).copied().collect();
    let mut tracked: Vec<TrackedPrices> = tracked_resources
        .iter()
        .map(|resource| TrackedPrices {
            resource: resource.clone(),
            prices: Vec::new(),
        })
        .collect();

    for clearing in &examined {
        for (resource, price) in clearing.data.clearing_prices.iter() {
            if let Some(series) = tracked.iter_mut().find(|t| t.resource == resource) {
                series.prices.push(price.to_f64("clearing_prices")?);
            }
        }
    }

    if auctions.len() > window {
        log::debug!("Averaging the first {} of {} auction clearings", window, auctions.len());
    }

    Ok(AuctionPrices { examined, tracked })
}

pub fn summarize_orders<'a>(
    orders: &[Record<'a, OrderPlaced>],
    sample_size: usize,
) -> OrderFlow<'a> {
    let mut villages = ByVillage::new();

    for order in orders {
        let counts = villages.get_or_insert_with(order.village_id, || VillageOrders {
            village_id: order.village_id,
            bids: 0,
            asks: 0,
        });
        match order.data.order_type.side() {
            OrderSide::Bid => counts.bids += 1,
            OrderSide::Ask => counts.asks += 1,
        }
    }

    OrderFlow {
        villages: villages.into_groups(),
        sample: orders.iter().take(sample_size).copied().collect(),
    }
}

/// Leading allocation records of each requested village. Villages without
/// any record are left out.
pub fn sample_allocations<'a>(
    allocations: &[Record<'a, WorkerAllocation>],
    villages: &[String],
    sample_size: usize,
) -> Vec<VillageAllocations<'a>> {
    villages
        .iter()
        .filter_map(|village| {
            let records: Vec<_> = allocations
                .iter()
                .filter(|alloc| alloc.village_id == village.as_str())
                .take(sample_size)
                .copied()
                .collect();
            let first = records.first()?;
            Some(VillageAllocations {
                village_id: first.village_id,
                records,
            })
        })
        .collect()
}
