//! Record-to-relation conversion.
//!
//! [`normalize_item`] is the heart of the converter: it takes one raw
//! listing and produces everything the listing contributes to the output.
//! Conversion is all or nothing.  The result is buffered in a
//! [`NormalizedItem`] rather than written directly, so a record that fails
//! halfway through (say, on the third bid) leaves no partial rows behind.

pub mod currency;
pub mod datetime;

use aucload_types::{BidRow, CategoryRow, ItemRecord, ItemRow};

use crate::error::RecordError;
use crate::registry::UserProfile;
use currency::normalize_currency;
use datetime::normalize_datetime;

/// Everything one listing contributes to the output.
///
/// `users` holds the user snapshots the listing carries, in observation
/// order: bidders in bid order, then the seller.  The caller feeds them to
/// the run's registry only after deciding to commit the item.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NormalizedItem {
    pub item: ItemRow,
    pub categories: Vec<CategoryRow>,
    pub bids: Vec<BidRow>,
    pub users: Vec<(String, UserProfile)>,
}

/// Converts one listing into its relation rows and user snapshots.
///
/// Required fields are the ones the relation keys and timestamps are built
/// from; everything else degrades to a NULL column.  The first missing
/// required field or malformed timestamp fails the whole record.
pub fn normalize_item(record: ItemRecord) -> Result<NormalizedItem, RecordError> {
    let item_id = require(record.item_id, "ItemID")?;
    let seller = require(record.seller, "Seller")?;
    let seller_id = require(seller.user_id, "Seller.UserID")?;
    let seller_rating = require(seller.rating, "Seller.Rating")?;
    let started = require(record.started, "Started")?;
    let ends = require(record.ends, "Ends")?;
    let started = normalize_timestamp(&started, "Started")?;
    let ends = normalize_timestamp(&ends, "Ends")?;

    let categories = record
        .categories
        .into_iter()
        .map(|category| CategoryRow {
            item_id: item_id.clone(),
            category,
        })
        .collect();

    let mut bids = Vec::new();
    let mut users = Vec::new();
    for (index, envelope) in record.bids.unwrap_or_default().into_iter().enumerate() {
        let bid = envelope.bid;
        let bidder = require_bid(bid.bidder, index, "Bidder")?;
        let bidder_id = require_bid(bidder.user_id, index, "Bidder.UserID")?;
        let bidder_rating = require_bid(bidder.rating, index, "Bidder.Rating")?;
        let time = require_bid(bid.time, index, "Time")?;
        let amount = require_bid(bid.amount, index, "Amount")?;
        let time = normalize_timestamp(&time, &format!("Bids[{index}].Time"))?;
        users.push((
            bidder_id.clone(),
            UserProfile {
                rating: bidder_rating,
                location: bidder.location,
                country: bidder.country,
            },
        ));
        bids.push(BidRow {
            bidder_id,
            item_id: item_id.clone(),
            time,
            amount: normalize_currency(&amount),
        });
    }

    // The seller snapshot goes last so that, under last-write-wins, it
    // prevails over a bid the seller placed elsewhere in the same item.
    // Sellers usually carry no address of their own; fall back to the
    // item's.
    users.push((
        seller_id.clone(),
        UserProfile {
            rating: seller_rating,
            location: seller.location.or(record.location),
            country: seller.country.or(record.country),
        },
    ));

    let item = ItemRow {
        item_id,
        name: record.name,
        currently: record.currently.as_deref().map(normalize_currency),
        buy_price: record.buy_price.as_deref().map(normalize_currency),
        first_bid: record.first_bid.as_deref().map(normalize_currency),
        number_of_bids: record.number_of_bids,
        description: record.description,
        ends,
        started,
        seller_id,
    };

    Ok(NormalizedItem {
        item,
        categories,
        bids,
        users,
    })
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, RecordError> {
    value.ok_or_else(|| RecordError::missing_field(field))
}

fn require_bid<T>(value: Option<T>, index: usize, field: &str) -> Result<T, RecordError> {
    value.ok_or_else(|| RecordError::missing_field(&format!("Bids[{index}].{field}")))
}

fn normalize_timestamp(value: &str, field: &str) -> Result<String, RecordError> {
    normalize_datetime(value)
        .map_err(|source| RecordError::malformed_timestamp(field, value, source))
}
