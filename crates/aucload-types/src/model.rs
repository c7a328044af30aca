//! Deserialization model for auction listing archives.
//!
//! These structs match the archive JSON field for field.  Nothing is
//! required at this layer: presence checks live in the normalizer, which can
//! report a missing field with the context serde does not have.  Integer
//! fields accept both JSON numbers and numeric strings, since the archive
//! uses the two interchangeably.

use serde::de::{Error as DeError, Unexpected};
use serde::{Deserialize, Deserializer};

/// One auction listing, as found in the `Items` array of an archive file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "ItemID")]
    pub item_id: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// Category tags; an item may carry any number of them, including none.
    #[serde(rename = "Category", default)]
    pub categories: Vec<String>,
    /// Current highest bid, currency-formatted (`$3,453.23`).
    #[serde(rename = "Currently")]
    pub currently: Option<String>,
    /// Buy-it-now price; most listings have none.
    #[serde(rename = "Buy_Price")]
    pub buy_price: Option<String>,
    /// Opening bid set by the seller, currency-formatted.
    #[serde(rename = "First_Bid")]
    pub first_bid: Option<String>,
    #[serde(rename = "Number_of_Bids", default, deserialize_with = "loose_int")]
    pub number_of_bids: i64,
    /// Bid history, oldest first.  `null` in the archive when nobody has
    /// bid yet.
    #[serde(rename = "Bids")]
    pub bids: Option<Vec<BidEnvelope>>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    /// Auction start, `Mon-DD-YY HH:MM:SS`.
    #[serde(rename = "Started")]
    pub started: Option<String>,
    /// Auction end, `Mon-DD-YY HH:MM:SS`.
    #[serde(rename = "Ends")]
    pub ends: Option<String>,
    #[serde(rename = "Seller")]
    pub seller: Option<UserRecord>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

/// A seller or bidder sub-record.  Both share one shape and both feed the
/// Users relation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "UserID")]
    pub user_id: Option<String>,
    #[serde(rename = "Rating", default, deserialize_with = "loose_opt_int")]
    pub rating: Option<i64>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
}

/// The archive nests every bid under a single-key `Bid` object.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BidEnvelope {
    #[serde(rename = "Bid")]
    pub bid: BidRecord,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BidRecord {
    #[serde(rename = "Bidder")]
    pub bidder: Option<UserRecord>,
    /// When the bid was placed, `Mon-DD-YY HH:MM:SS`.
    #[serde(rename = "Time")]
    pub time: Option<String>,
    /// Bid amount, currency-formatted.
    #[serde(rename = "Amount")]
    pub amount: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseInt {
    Int(i64),
    Str(String),
}

impl LooseInt {
    fn parse<E: DeError>(self) -> Result<i64, E> {
        match self {
            LooseInt::Int(n) => Ok(n),
            LooseInt::Str(s) => s.trim().parse().map_err(|_| {
                DeError::invalid_value(Unexpected::Str(&s), &"an integer or a numeric string")
            }),
        }
    }
}

/// Accepts `13`, `"13"` or `null`; `null` and an absent field both become 0.
fn loose_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LooseInt>::deserialize(deserializer)? {
        None => Ok(0),
        Some(value) => value.parse(),
    }
}

/// Like [`loose_int`], but keeps absence observable.
fn loose_opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LooseInt>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
