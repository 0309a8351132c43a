//! Order record, order lines, and the status lifecycle.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId};
use serde::{Deserialize, Serialize};

use crate::OrderError;

/// Order lifecycle status.
///
/// Pending is the only initial state. Completed and Cancelled are nominally
/// terminal, but the update-status operation is permissive and accepts any
/// of the three values regardless of the current state; reverting a
/// terminal order to Pending is possible and deliberate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// The uppercase wire form of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    /// Parses a status case-insensitively, normalizing to the uppercase set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(OrderError::InvalidStatus(s.to_string())),
        }
    }
}

/// One product/quantity entry within an order.
///
/// Name and unit price are snapshotted from the catalog at order time and
/// never change afterwards, independent of later product updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The referenced product. Reference only; no integrity is enforced
    /// after creation.
    pub product_id: ProductId,

    /// Product name at order time.
    pub name: String,

    /// Price per unit at order time, in cents.
    pub unit_price: Money,

    /// Quantity ordered, always >= 1.
    pub quantity: i64,
}

impl OrderLine {
    /// Returns the total price for this line (unit price x quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// A requested line item as submitted by a client, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRequest {
    /// The requested product.
    pub product_id: ProductId,

    /// Requested quantity; absent or non-positive values are rejected.
    pub quantity: Option<i64>,
}

/// A validated order that has not been persisted yet.
///
/// The store assigns the identifier and timestamps on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_email: Option<String>,
    pub lines: Vec<OrderLine>,
    pub total_amount: Money,
}

/// A persisted order record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_email: Option<String>,
    pub status: OrderStatus,
    /// Ordered line sequence; never empty.
    pub lines: Vec<OrderLine>,
    /// Sum of line totals, fixed at creation.
    pub total_amount: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Recomputes the total from the lines.
    ///
    /// Always equals `total_amount`; the invariant is checked in tests.
    pub fn recomputed_total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total())
    }
}
