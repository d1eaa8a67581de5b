use crate::error::ReportError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// One record of a simulation event log.
///
/// Decoding is strict for the four event kinds the report understands and
/// permissive for everything else: an `event_type` that is not an object, or
/// whose `type` tag is missing or unknown, becomes [`EventType::Unrecognized`]
/// and such records do not need a `tick` or `village_id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEvent")]
pub struct Event {
    pub timestamp: Option<DateTime<Utc>>,
    pub tick: u64,
    pub village_id: String,
    pub event_type: EventType,
}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(default)]
    timestamp: Option<Value>,
    #[serde(default)]
    tick: Option<Value>,
    #[serde(default)]
    village_id: Option<Value>,
    event_type: Value,
}

impl TryFrom<RawEvent> for Event {
    type Error = String;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let event_type = EventType::decode(raw.event_type)?;
        let timestamp = raw
            .timestamp
            .and_then(|value| serde_json::from_value(value).ok());

        if event_type == EventType::Unrecognized {
            return Ok(Event {
                timestamp,
                tick: raw.tick.and_then(|v| v.as_u64()).unwrap_or_default(),
                village_id: match raw.village_id {
                    Some(Value::String(id)) => id,
                    _ => String::new(),
                },
                event_type,
            });
        }

        Ok(Event {
            timestamp,
            tick: required(raw.tick, "tick")?,
            village_id: required(raw.village_id, "village_id")?,
            event_type,
        })
    }
}

fn required<T: DeserializeOwned>(value: Option<Value>, field: &str) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("missing field `{}`", field))?;
    serde_json::from_value(value).map_err(|e| format!("invalid field `{}`: {}", field, e))
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventType {
    TradeExecuted(TradeExecuted),
    AuctionCleared(AuctionCleared),
    OrderPlaced(OrderPlaced),
    WorkerAllocation(WorkerAllocation),
    Unrecognized,
}

impl EventType {
    /// Decode an `event_type` value by its `type` tag.
    pub fn decode(value: Value) -> Result<Self, String> {
        let tag = value.get("type").and_then(Value::as_str).map(str::to_owned);

        match tag.as_deref() {
            Some("TradeExecuted") => payload(value, "TradeExecuted").map(EventType::TradeExecuted),
            Some("AuctionCleared") => {
                payload(value, "AuctionCleared").map(EventType::AuctionCleared)
            }
            Some("OrderPlaced") => payload(value, "OrderPlaced").map(EventType::OrderPlaced),
            Some("WorkerAllocation") => {
                payload(value, "WorkerAllocation").map(EventType::WorkerAllocation)
            }
            _ => Ok(EventType::Unrecognized),
        }
    }
}

fn payload<T: DeserializeOwned>(value: Value, tag: &str) -> Result<T, String> {
    serde_json::from_value(value).map_err(|e| format!("invalid {} event: {}", tag, e))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeExecuted {
    pub trade_type: TradeSide,
    pub resource: String,
    pub quantity: Amount,
    pub price: Amount,
    pub total_value: Amount,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuctionCleared {
    pub clearing_prices: ClearingPrices,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderPlaced {
    pub order_type: OrderTag,
    pub resource: String,
    pub quantity: Amount,
    pub price: Amount,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkerAllocation {
    pub food_workers: Amount,
    pub wood_workers: Amount,
    pub construction_workers: Amount,
    pub idle_workers: Amount,
}

/// Side of an executed trade. Only the exact tag `"Buy"` is a buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl<'de> Deserialize<'de> for TradeSide {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(if value.as_str() == Some("Buy") {
            TradeSide::Buy
        } else {
            TradeSide::Sell
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Bid,
    Ask,
}

/// The `order_type` of a placed order as it appeared in the log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct OrderTag(Value);

impl OrderTag {
    /// Only the exact tag `"Bid"` is a bid.
    pub fn side(&self) -> OrderSide {
        if self.0.as_str() == Some("Bid") {
            OrderSide::Bid
        } else {
            OrderSide::Ask
        }
    }
}

impl From<Value> for OrderTag {
    fn from(value: Value) -> Self {
        OrderTag(value)
    }
}

impl fmt::Display for OrderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_as_logged(&self.0, f)
    }
}

/// A numeric payload field exactly as it appeared in the log.
///
/// Simulators write amounts either as JSON numbers or as decimal strings, so
/// the raw value is kept for display and only coerced to `f64` where it is
/// summed or averaged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Amount(Value);

impl Amount {
    pub fn to_f64(&self, field: &'static str) -> Result<f64, ReportError> {
        let parsed = match &self.0 {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| ReportError::InvalidNumber {
            field,
            value: self.to_string(),
        })
    }
}

impl From<Value> for Amount {
    fn from(value: Value) -> Self {
        Amount(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_as_logged(&self.0, f)
    }
}

/// Strings are written without quotes, floats in [`float_repr`] form,
/// everything else as JSON.
fn write_as_logged(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::String(s) => f.write_str(s),
        Value::Number(n) if n.is_f64() => {
            f.write_str(&float_repr(n.as_f64().unwrap_or_default()))
        }
        other => write!(f, "{}", other),
    }
}

/// Shortest round-trip rendering of a float. Positional between 1e-4 and
/// 1e16 with at least one fractional digit, otherwise a mantissa with a
/// signed, two-digit exponent (`1e-05`, `2.5e+16`).
pub fn float_repr(x: f64) -> String {
    let sci = format!("{:e}", x);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(unsigned) => ("-", unsigned),
        None => ("", mantissa),
    };

    if !(-4..16).contains(&exp) {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exp.abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    if exp < 0 {
        let zeros = "0".repeat((-exp - 1) as usize);
        return format!("{}0.{}{}", sign, zeros, digits);
    }

    let point = exp as usize + 1;
    if digits.len() <= point {
        let zeros = "0".repeat(point - digits.len());
        format!("{}{}{}.0", sign, digits, zeros)
    } else {
        format!("{}{}.{}", sign, &digits[..point], &digits[point..])
    }
}

/// Clearing prices of one auction round, in the order the log lists them.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearingPrices(Vec<(String, Amount)>);

impl ClearingPrices {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Amount)> {
        self.0.iter().map(|(resource, price)| (resource.as_str(), price))
    }
}

impl<'de> Deserialize<'de> for ClearingPrices {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ClearingPricesVisitor)
    }
}

struct ClearingPricesVisitor;

impl<'de> Visitor<'de> for ClearingPricesVisitor {
    type Value = ClearingPrices;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of resource names to clearing prices")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut prices = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((resource, price)) = map.next_entry::<String, Amount>()? {
            prices.push((resource, price));
        }
        Ok(ClearingPrices(prices))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] Village {}: ", self.tick, self.village_id)?;

        match &self.event_type {
            EventType::TradeExecuted(trade) => {
                write!(
                    f,
                    "{:?} {} {} at {} (total {})",
                    trade.trade_type, trade.quantity, trade.resource, trade.price, trade.total_value
                )
            }
            EventType::AuctionCleared(auction) => {
                write!(f, "Auction cleared")?;
                for (resource, price) in auction.clearing_prices.iter() {
                    write!(f, " {}={}", resource, price)?;
                }
                Ok(())
            }
            EventType::OrderPlaced(order) => {
                write!(
                    f,
                    "Placed {} order for {} {} at {}",
                    order.order_type, order.quantity, order.resource, order.price
                )
            }
            EventType::WorkerAllocation(alloc) => {
                write!(
                    f,
                    "Allocated workers - F:{} W:{} C:{} I:{}",
                    alloc.food_workers,
                    alloc.wood_workers,
                    alloc.construction_workers,
                    alloc.idle_workers
                )
            }
            EventType::Unrecognized => write!(f, "unrecognized event"),
        }
    }
}

/// A fully loaded event log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn load_from_file(path: &Path) -> Result<Self, ReportError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let log = Self::from_json(&json)?;

        log::info!("Loaded {} events from {}", log.len(), path.display());
        if let Some((first, last)) = log.time_span() {
            log::info!("Log recorded between {} and {}", first, last);
        }

        Ok(log)
    }

    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let events: Vec<Event> = serde_json::from_str(json)?;
        Ok(Self { events })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Earliest and latest recorded wall-clock time, if any event carries one.
    pub fn time_span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let mut stamps = self.events.iter().filter_map(|e| e.timestamp);
        let first = stamps.next()?;
        Some(stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }
}
