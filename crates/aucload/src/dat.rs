//! Row encoding for the `.dat` relation files.
//!
//! One line per row, columns joined by [`COLUMN_SEPARATOR`].  Free-text
//! columns (names, descriptions, locations) are always wrapped in quotes
//! and escaped; key and numeric columns are written bare.  This is the only
//! module that knows the escaping rules.

use aucload_types::{BidRow, CategoryRow, ItemRow, UserRow};

/// Separator between columns.  Not a comma: the archive's free text is full
/// of commas.
pub const COLUMN_SEPARATOR: char = '|';

/// Wrapped around free-text columns.
pub const QUOTE: char = '"';

/// Written in place of an absent optional column.
pub const NULL_SENTINEL: &str = "NULL";

/// A row that can be rendered as one line of a relation file.
pub trait DatRecord {
    /// Appends the row's columns to `line`, without a trailing newline.
    fn encode(&self, line: &mut String);
}

/// Renders a complete line, newline included.
pub fn encode_line<R: DatRecord>(row: &R) -> String {
    let mut line = String::new();
    row.encode(&mut line);
    line.push('\n');
    line
}

struct RowBuilder<'a> {
    line: &'a mut String,
    first: bool,
}

impl<'a> RowBuilder<'a> {
    fn new(line: &'a mut String) -> Self {
        Self { line, first: true }
    }

    fn sep(&mut self) {
        if self.first {
            self.first = false;
        } else {
            self.line.push(COLUMN_SEPARATOR);
        }
    }

    /// A bare column: keys, numerals, normalized timestamps.
    fn raw(&mut self, value: &str) {
        self.sep();
        self.line.push_str(value);
    }

    /// A bare column that may be absent.
    fn raw_opt(&mut self, value: Option<&str>) {
        self.raw(value.unwrap_or(NULL_SENTINEL));
    }

    /// A quoted free-text column; absent values become the quoted sentinel.
    fn text(&mut self, value: Option<&str>) {
        self.sep();
        self.line.push(QUOTE);
        push_escaped(self.line, value.unwrap_or(NULL_SENTINEL));
        self.line.push(QUOTE);
    }
}

/// Escapes free text so it cannot break the row apart: the column separator
/// becomes a space and quotes are doubled.
fn push_escaped(line: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            COLUMN_SEPARATOR => line.push(' '),
            QUOTE => {
                line.push(QUOTE);
                line.push(QUOTE);
            }
            other => line.push(other),
        }
    }
}

impl DatRecord for ItemRow {
    fn encode(&self, line: &mut String) {
        let mut row = RowBuilder::new(line);
        row.raw(&self.item_id);
        row.text(self.name.as_deref());
        row.raw_opt(self.currently.as_deref());
        row.raw_opt(self.buy_price.as_deref());
        row.raw_opt(self.first_bid.as_deref());
        row.raw(&self.number_of_bids.to_string());
        row.text(self.description.as_deref());
        row.raw(&self.ends);
        row.raw(&self.started);
        row.raw(&self.seller_id);
    }
}

impl DatRecord for UserRow {
    fn encode(&self, line: &mut String) {
        let mut row = RowBuilder::new(line);
        row.raw(&self.user_id);
        row.raw(&self.rating.to_string());
        row.text(self.location.as_deref());
        row.raw_opt(self.country.as_deref());
    }
}

impl DatRecord for CategoryRow {
    fn encode(&self, line: &mut String) {
        let mut row = RowBuilder::new(line);
        row.raw(&self.item_id);
        row.raw(&self.category);
    }
}

impl DatRecord for BidRow {
    fn encode(&self, line: &mut String) {
        let mut row = RowBuilder::new(line);
        row.raw(&self.bidder_id);
        row.raw(&self.item_id);
        row.raw(&self.time);
        row.raw(&self.amount);
    }
}

#[cfg(test)]
mod test {
    use super::encode_line;
    use aucload_types::{BidRow, CategoryRow, ItemRow, UserRow};

    fn item_row() -> ItemRow {
        ItemRow {
            item_id: "1045".to_string(),
            name: Some("Art deco lamp".to_string()),
            currently: Some("3453.23".to_string()),
            buy_price: None,
            first_bid: Some("1500.00".to_string()),
            number_of_bids: 2,
            description: Some("Lovely lamp.".to_string()),
            ends: "2001-12-06 06:44:54".to_string(),
            started: "2001-12-01 09:00:00".to_string(),
            seller_id: "carol".to_string(),
        }
    }

    #[test]
    fn item_row_layout() {
        assert_eq!(
            encode_line(&item_row()),
            "1045|\"Art deco lamp\"|3453.23|NULL|1500.00|2|\"Lovely lamp.\"|\
             2001-12-06 06:44:54|2001-12-01 09:00:00|carol\n"
        );
    }

    #[test]
    fn free_text_is_escaped() {
        let row = ItemRow {
            name: Some("lamp|rare".to_string()),
            description: Some("a \"deco\" | classic".to_string()),
            ..item_row()
        };
        let line = encode_line(&row);
        assert!(line.contains("|\"lamp rare\"|"));
        assert!(line.contains("|\"a \"\"deco\"\"   classic\"|"));
    }

    #[test]
    fn absent_text_becomes_the_quoted_sentinel() {
        let row = ItemRow {
            name: None,
            description: None,
            ..item_row()
        };
        let line = encode_line(&row);
        assert_eq!(
            line,
            "1045|\"NULL\"|3453.23|NULL|1500.00|2|\"NULL\"|\
             2001-12-06 06:44:54|2001-12-01 09:00:00|carol\n"
        );
    }

    #[test]
    fn empty_currency_stays_an_empty_column() {
        // An empty string is a present-but-empty value, not an absent one.
        let row = ItemRow {
            currently: Some(String::new()),
            ..item_row()
        };
        assert!(encode_line(&row).starts_with("1045|\"Art deco lamp\"||NULL|"));
    }

    #[test]
    fn user_row_layout() {
        let row = UserRow {
            user_id: "bob".to_string(),
            rating: -3,
            location: None,
            country: None,
        };
        assert_eq!(encode_line(&row), "bob|-3|\"NULL\"|NULL\n");
    }

    #[test]
    fn category_and_bid_rows_are_bare() {
        let category = CategoryRow {
            item_id: "1045".to_string(),
            category: "Antiques".to_string(),
        };
        assert_eq!(encode_line(&category), "1045|Antiques\n");

        let bid = BidRow {
            bidder_id: "alice".to_string(),
            item_id: "1045".to_string(),
            time: "2001-12-04 10:15:00".to_string(),
            amount: "2000.00".to_string(),
        };
        assert_eq!(encode_line(&bid), "alice|1045|2001-12-04 10:15:00|2000.00\n");
    }
}
