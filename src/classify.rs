//! Routing of decoded events into per-kind buckets.

use crate::events::{AuctionCleared, Event, EventType, OrderPlaced, TradeExecuted, WorkerAllocation};

/// An event of a known kind, borrowed out of the log.
#[derive(Debug, PartialEq)]
pub struct Record<'a, T> {
    pub tick: u64,
    pub village_id: &'a str,
    pub data: &'a T,
}

// Derived Clone/Copy would require `T: Copy`.
impl<T> Clone for Record<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Record<'_, T> {}

impl<'a, T> Record<'a, T> {
    fn new(event: &'a Event, data: &'a T) -> Self {
        Self {
            tick: event.tick,
            village_id: &event.village_id,
            data,
        }
    }
}

/// Events split by kind, each bucket in log order.
#[derive(Debug, Default)]
pub struct EventBuckets<'a> {
    pub trades: Vec<Record<'a, TradeExecuted>>,
    pub auctions: Vec<Record<'a, AuctionCleared>>,
    pub orders: Vec<Record<'a, OrderPlaced>>,
    pub allocations: Vec<Record<'a, WorkerAllocation>>,
    /// Unrecognized events, which are in no bucket.
    pub dropped: usize,
}

impl EventBuckets<'_> {
    /// Number of events that landed in some bucket.
    pub fn classified_len(&self) -> usize {
        self.trades.len() + self.auctions.len() + self.orders.len() + self.allocations.len()
    }
}

pub fn classify(events: &[Event]) -> EventBuckets<'_> {
    let mut buckets = EventBuckets::default();

    for event in events {
        match &event.event_type {
            EventType::TradeExecuted(trade) => buckets.trades.push(Record::new(event, trade)),
            EventType::AuctionCleared(auction) => {
                buckets.auctions.push(Record::new(event, auction))
            }
            EventType::OrderPlaced(order) => buckets.orders.push(Record::new(event, order)),
            EventType::WorkerAllocation(alloc) => {
                buckets.allocations.push(Record::new(event, alloc))
            }
            EventType::Unrecognized => {
                log::trace!("Skipping {}", event);
                buckets.dropped += 1;
            }
        }
    }

    log::debug!(
        "Classified {} events: {} trades, {} auction clearings, {} orders, {} allocations, {} unrecognized",
        events.len(),
        buckets.trades.len(),
        buckets.auctions.len(),
        buckets.orders.len(),
        buckets.allocations.len(),
        buckets.dropped
    );

    buckets
}
