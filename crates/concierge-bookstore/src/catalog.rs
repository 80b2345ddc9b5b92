//! Book catalog and discounts
//!
//! Both tables are fixed at build time and never change while the program
//! runs. Prices are exact decimals; iteration order is the order listed here.

use rust_decimal::Decimal;
use std::fmt;

/// Catalog section a book belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Fiction
    Fiction,
    /// Non-fiction
    NonFiction,
}

impl Category {
    /// Category key as shown to customers and the model
    pub fn key(self) -> &'static str {
        match self {
            Category::Fiction => "fiction",
            Category::NonFiction => "non_fiction",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Category::Fiction => "Fiction",
            Category::NonFiction => "Non-fiction",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Book {
    pub title: &'static str,
    pub category: Category,
    cents: i64,
}

impl Book {
    const fn new(title: &'static str, category: Category, cents: i64) -> Self {
        Self {
            title,
            category,
            cents,
        }
    }

    /// Price in dollars
    pub fn price(&self) -> Decimal {
        Decimal::new(self.cents, 2)
    }
}

/// The catalog: fiction first, then non-fiction
pub const CATALOG: &[Book] = &[
    Book::new("1984", Category::Fiction, 1099),
    Book::new("To Kill a Mockingbird", Category::Fiction, 949),
    Book::new("The Great Gatsby", Category::Fiction, 899),
    Book::new("Brave New World", Category::Fiction, 1125),
    Book::new("The Catcher in the Rye", Category::Fiction, 1050),
    Book::new("Sapiens", Category::NonFiction, 1499),
    Book::new("Educated", Category::NonFiction, 1375),
    Book::new("Atomic Habits", Category::NonFiction, 1625),
    Book::new("The Power of Habit", Category::NonFiction, 1250),
    Book::new("Thinking, Fast and Slow", Category::NonFiction, 1799),
];

/// A standing promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discount {
    /// Short identifier
    pub key: &'static str,
    /// Customer-facing description
    pub description: &'static str,
}

/// Available discounts, in presentation order
pub const DISCOUNTS: &[Discount] = &[
    Discount {
        key: "bulk",
        description: "Buy 2, Get 1 Free on select Fiction books",
    },
    Discount {
        key: "threshold",
        description: "10% Discount on purchases above $50",
    },
    Discount {
        key: "loyalty",
        description: "Loyalty Members get an extra 5% off on every order",
    },
];

/// Look a book up by exact title
pub fn find_book(title: &str) -> Option<&'static Book> {
    CATALOG.iter().find(|book| book.title == title)
}

/// Titles in a category, in catalog order
pub fn titles(category: Category) -> Vec<&'static str> {
    CATALOG
        .iter()
        .filter(|book| book.category == category)
        .map(|book| book.title)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_book_is_exact() {
        let book = find_book("Sapiens").unwrap();
        assert_eq!(book.category, Category::NonFiction);
        assert_eq!(book.price().to_string(), "14.99");

        assert!(find_book("sapiens").is_none());
        assert!(find_book("Sapiens ").is_none());
    }

    #[test]
    fn test_titles_keep_catalog_order() {
        assert_eq!(
            titles(Category::Fiction),
            vec![
                "1984",
                "To Kill a Mockingbird",
                "The Great Gatsby",
                "Brave New World",
                "The Catcher in the Rye"
            ]
        );
        assert_eq!(titles(Category::NonFiction).len(), 5);
    }

    #[test]
    fn test_titles_are_unique() {
        for (i, book) in CATALOG.iter().enumerate() {
            assert!(CATALOG[i + 1..].iter().all(|other| other.title != book.title));
        }
    }

    #[test]
    fn test_category_keys() {
        assert_eq!(Category::Fiction.to_string(), "fiction");
        assert_eq!(Category::NonFiction.key(), "non_fiction");
        assert_eq!(Category::NonFiction.label(), "Non-fiction");
    }
}
