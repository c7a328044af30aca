//! The four output relations and their row types.
//!
//! Row fields are already normalized: currency fields are bare numerals,
//! timestamps are `YYYY-MM-DD HH:MM:SS`.  `Option` marks the columns the
//! archive may leave empty; the encoder turns those into the NULL sentinel.

use std::fmt::{self, Display};

/// A target relation produced by a run.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Relation {
    Items,
    Users,
    Categories,
    Bids,
}

impl Relation {
    /// Every relation, in the order the files are conventionally listed.
    pub const ALL: [Relation; 4] = [
        Relation::Items,
        Relation::Users,
        Relation::Categories,
        Relation::Bids,
    ];

    /// Name of the flat file backing this relation.
    pub fn file_name(&self) -> &'static str {
        match self {
            Relation::Items => "Items.dat",
            Relation::Users => "Users.dat",
            Relation::Categories => "Categories.dat",
            Relation::Bids => "Bids.dat",
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Relation::Items => "Items",
            Relation::Users => "Users",
            Relation::Categories => "Categories",
            Relation::Bids => "Bids",
        };
        write!(f, "{name}")
    }
}

/// One row of the Items relation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ItemRow {
    pub item_id: String,
    /// Free text, quoted in the output.
    pub name: Option<String>,
    /// Normalized current price; `None` when the archive had no value.
    pub currently: Option<String>,
    pub buy_price: Option<String>,
    pub first_bid: Option<String>,
    pub number_of_bids: i64,
    /// Free text, quoted in the output.
    pub description: Option<String>,
    pub ends: String,
    pub started: String,
    pub seller_id: String,
}

/// One row of the Users relation.  A user id appears at most once per run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserRow {
    pub user_id: String,
    pub rating: i64,
    /// Free text, quoted in the output.
    pub location: Option<String>,
    pub country: Option<String>,
}

/// One row of the Categories relation: one row per (item, category) pair.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CategoryRow {
    pub item_id: String,
    pub category: String,
}

/// One row of the Bids relation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BidRow {
    pub bidder_id: String,
    pub item_id: String,
    pub time: String,
    pub amount: String,
}
