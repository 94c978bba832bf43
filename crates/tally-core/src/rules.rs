//! # Points Rules
//!
//! The loyalty-points rule engine: four independent sub-rules, summed.
//!
//! ## Rule Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule            Reads                 Awards                           │
//! │  ──────────────  ────────────────────  ──────────────────────────────── │
//! │  Retailer name   retailer              1 per alphanumeric character     │
//! │  Total           total                 50 if whole units                │
//! │                                        25 if multiple of 0.25           │
//! │                                        (0 for a zero total)             │
//! │  Items           items                 5 per pair of items              │
//! │                                        ceil(price × 0.2) per item whose │
//! │                                        trimmed description length % 3   │
//! │                                        == 0                             │
//! │  Date/time       purchaseDate          6 if the day is odd              │
//! │                  purchaseTime          10 if 14:00 < time < 16:00       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Partial Failure
//! A field that does not parse costs only the points that depend on it.
//! Each rule returns a [`RuleOutcome`] carrying its points AND the errors it
//! hit; [`calculate_points`] sums the points and collects the errors. A
//! receipt with errors still gets a score.
//!
//! ```rust
//! use tally_core::{calculate_points, Item, Receipt};
//!
//! let receipt = Receipt {
//!     retailer: "Target".to_string(),
//!     purchase_date: "2022-01-01".to_string(),
//!     purchase_time: "13:01".to_string(),
//!     items: vec![Item::new("Emils Cheese Pizza", "12.25")],
//!     total: "not-a-number".to_string(),
//! };
//!
//! let card = calculate_points(&receipt);
//! assert_eq!(card.points, 6 + 0 + 3 + 6);
//! assert!(card.had_error());
//! ```

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

use crate::error::CalculationError;
use crate::money::Money;
use crate::types::{Item, Points, Receipt};

// =============================================================================
// Rule Constants
// =============================================================================

/// Awarded when the total has no cents.
pub const ROUND_TOTAL_POINTS: Points = 50;

/// Awarded when the total is a multiple of [`QUARTER`].
pub const QUARTER_MULTIPLE_POINTS: Points = 25;

/// The 0.25 step used by the total rule.
pub const QUARTER: Money = Money::from_cents(25);

/// Awarded for every two items.
pub const ITEM_PAIR_POINTS: Points = 5;

/// Trimmed description lengths divisible by this earn a price bonus.
pub const DESCRIPTION_LENGTH_DIVISOR: usize = 3;

/// Share of the item price awarded as points, in basis points (20%).
pub const ITEM_PRICE_RATE_BPS: u32 = 2000;

/// Awarded when the purchase day of month is odd.
pub const ODD_DAY_POINTS: Points = 6;

/// Awarded for purchases strictly inside the afternoon window.
pub const AFTERNOON_POINTS: Points = 10;

/// Afternoon window bounds, minutes after midnight (exclusive).
const AFTERNOON_START_MINUTE: u32 = 14 * 60;
const AFTERNOON_END_MINUTE: u32 = 16 * 60;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

const DATE_SHAPE_REASON: &str = "expected YYYY-MM-DD";
const TIME_SHAPE_REASON: &str = "expected H:MM or HH:MM";

// =============================================================================
// Rule Outcome
// =============================================================================

/// What a single rule produced: its points and any parse failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    pub points: Points,
    pub errors: Vec<CalculationError>,
}

impl RuleOutcome {
    /// A clean result.
    pub fn awarded(points: Points) -> Self {
        RuleOutcome {
            points,
            errors: Vec::new(),
        }
    }

    /// Adds points, saturating.
    fn add(&mut self, points: Points) {
        self.points = self.points.saturating_add(points);
    }

    /// Records a failure. Points already earned are kept.
    fn fail(&mut self, error: CalculationError) {
        self.errors.push(error);
    }

    /// True when any input of this rule failed to parse.
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

// =============================================================================
// Scorecard
// =============================================================================

/// Points per rule, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub retailer: Points,
    pub total: Points,
    pub items: Points,
    pub date_time: Points,
}

/// The result of scoring one receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorecard {
    /// Sum of all rules.
    pub points: Points,
    pub breakdown: PointsBreakdown,
    /// Every parse failure hit by any rule, in rule order.
    pub errors: Vec<CalculationError>,
}

impl Scorecard {
    /// The calculation-error flag.
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Scores a receipt.
///
/// Deterministic and side-effect free. Never fails: unparsable fields are
/// reported in [`Scorecard::errors`] and score 0 for the rule reading them.
pub fn calculate_points(receipt: &Receipt) -> Scorecard {
    let retailer = retailer_name_points(&receipt.retailer);
    let total = total_points(&receipt.total);
    let items = item_points(&receipt.items);
    let date_time = date_time_points(&receipt.purchase_date, &receipt.purchase_time);

    let breakdown = PointsBreakdown {
        retailer: retailer.points,
        total: total.points,
        items: items.points,
        date_time: date_time.points,
    };

    let mut card = Scorecard {
        points: 0,
        breakdown,
        errors: Vec::new(),
    };
    for outcome in [retailer, total, items, date_time] {
        card.points = card.points.saturating_add(outcome.points);
        card.errors.extend(outcome.errors);
    }

    card
}

// =============================================================================
// Rules
// =============================================================================

/// One point per alphanumeric character (Unicode letters and digits).
///
/// ```rust
/// use tally_core::rules::retailer_name_points;
///
/// assert_eq!(retailer_name_points("abc!!$123").points, 6);
/// ```
pub fn retailer_name_points(retailer: &str) -> RuleOutcome {
    let count = retailer.chars().filter(|c| c.is_alphanumeric()).count();
    RuleOutcome::awarded(saturate(count))
}

/// 50 for a whole-unit total, plus 25 for a multiple of 0.25.
///
/// A zero total scores nothing even though it is both.
pub fn total_points(total: &str) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    let amount = match total.parse::<Money>() {
        Ok(amount) => amount,
        Err(source) => {
            outcome.fail(CalculationError::InvalidTotal {
                value: total.to_string(),
                source,
            });
            return outcome;
        }
    };

    if amount.is_zero() {
        return outcome;
    }
    if amount.is_whole_units() {
        outcome.add(ROUND_TOTAL_POINTS);
    }
    if amount.is_multiple_of(QUARTER) {
        outcome.add(QUARTER_MULTIPLE_POINTS);
    }

    outcome
}

/// 5 per pair of items, plus a price bonus for qualifying descriptions.
///
/// ## Description Bonus
/// The description is trimmed of surrounding whitespace and its length in
/// bytes checked against [`DESCRIPTION_LENGTH_DIVISOR`]. An empty description
/// has length 0 and qualifies. Qualifying items earn `ceil(price × 0.2)`,
/// never less than 0. An unparsable price only loses that item's bonus.
pub fn item_points(items: &[Item]) -> RuleOutcome {
    let pairs = saturate(items.len() / 2);
    let mut outcome = RuleOutcome::awarded(pairs.saturating_mul(ITEM_PAIR_POINTS));

    for (index, item) in items.iter().enumerate() {
        let description_len = item.short_description.trim().len();
        if description_len % DESCRIPTION_LENGTH_DIVISOR != 0 {
            continue;
        }

        match item.price.parse::<Money>() {
            Ok(price) => {
                let bonus = price.ceil_units_at_rate(ITEM_PRICE_RATE_BPS).max(0);
                outcome.add(Points::try_from(bonus).unwrap_or(Points::MAX));
            }
            Err(source) => outcome.fail(CalculationError::InvalidItemPrice {
                index,
                value: item.price.clone(),
                source,
            }),
        }
    }

    outcome
}

/// 6 for an odd day of month, plus 10 inside the 14:00-16:00 window.
///
/// Date and time are parsed independently; a bad date still lets the time
/// score and vice versa. The window is exclusive at both ends.
pub fn date_time_points(purchase_date: &str, purchase_time: &str) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    match parse_purchase_date(purchase_date) {
        Ok(date) => {
            if date.day() % 2 == 1 {
                outcome.add(ODD_DAY_POINTS);
            }
        }
        Err(reason) => outcome.fail(CalculationError::InvalidPurchaseDate {
            value: purchase_date.to_string(),
            reason,
        }),
    }

    match parse_purchase_time(purchase_time) {
        Ok(time) => {
            let minute_of_day = time.hour() * 60 + time.minute();
            if minute_of_day > AFTERNOON_START_MINUTE && minute_of_day < AFTERNOON_END_MINUTE {
                outcome.add(AFTERNOON_POINTS);
            }
        }
        Err(reason) => outcome.fail(CalculationError::InvalidPurchaseTime {
            value: purchase_time.to_string(),
            reason,
        }),
    }

    outcome
}

/// `YYYY-MM-DD` with zero-padded month and day. chrono alone would also
/// take `2024-1-1`.
fn parse_purchase_date(value: &str) -> Result<NaiveDate, String> {
    let shaped = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(DATE_SHAPE_REASON.to_string());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| e.to_string())
}

/// One or two hour digits, then exactly two minute digits.
fn parse_purchase_time(value: &str) -> Result<NaiveTime, String> {
    let shaped = value.split_once(':').is_some_and(|(hour, minute)| {
        (1..=2).contains(&hour.len())
            && minute.len() == 2
            && hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit())
    });
    if !shaped {
        return Err(TIME_SHAPE_REASON.to_string());
    }

    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|e| e.to_string())
}

fn saturate(n: usize) -> Points {
    Points::try_from(n).unwrap_or(Points::MAX)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn target_receipt() -> Receipt {
        Receipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            items: vec![
                Item::new("Mountain Dew 12PK", "6.49"),
                Item::new("Emils Cheese Pizza", "12.25"),
                Item::new("Knorr Creamy Chicken", "1.26"),
                Item::new("Doritos Nacho Cheese", "3.35"),
                Item::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
            ],
            total: "35.35".to_string(),
        }
    }

    fn corner_market_receipt() -> Receipt {
        Receipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".to_string(),
            purchase_time: "14:33".to_string(),
            items: vec![Item::new("Gatorade", "2.25"); 4],
            total: "9.00".to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Retailer
    // -------------------------------------------------------------------------

    #[test]
    fn test_retailer_name_points() {
        assert_eq!(retailer_name_points("").points, 0);
        assert_eq!(retailer_name_points("abc123").points, 6);
        assert_eq!(retailer_name_points("abc 123").points, 6);
        assert_eq!(retailer_name_points("   abc 123   ").points, 6);
        assert_eq!(retailer_name_points("abc!!$123").points, 6);
        assert_eq!(retailer_name_points("M&M Corner Market").points, 14);
    }

    #[test]
    fn test_retailer_name_points_unicode() {
        // Letters and digits outside ASCII still count
        assert_eq!(retailer_name_points("Caf\u{e9} 42").points, 6);
        assert!(!retailer_name_points("日本").had_error());
        assert_eq!(retailer_name_points("日本").points, 2);
    }

    // -------------------------------------------------------------------------
    // Total
    // -------------------------------------------------------------------------

    #[test]
    fn test_total_points() {
        assert_eq!(total_points("0").points, 0);
        assert_eq!(total_points("0.00").points, 0);
        assert_eq!(total_points("1.00").points, 75);
        assert_eq!(total_points("1.75").points, 25);
        assert_eq!(total_points("1.40").points, 0);
        assert_eq!(total_points("35.35").points, 0);
        assert_eq!(total_points("9.00").points, 75);
    }

    #[test]
    fn test_total_points_parse_error() {
        let outcome = total_points("");
        assert_eq!(outcome.points, 0);
        assert!(outcome.had_error());
        assert!(matches!(
            outcome.errors[0],
            CalculationError::InvalidTotal { .. }
        ));

        let outcome = total_points("$35.35");
        assert_eq!(outcome.points, 0);
        assert!(outcome.had_error());
    }

    #[test]
    fn test_total_points_beyond_cents() {
        let outcome = total_points("2.001");
        assert_eq!(outcome.points, 0);
        assert!(!outcome.had_error());

        // 1e2 is a whole multiple of 0.25
        let outcome = total_points("1e2");
        assert_eq!(outcome.points, 75);
        assert!(!outcome.had_error());

        assert_eq!(total_points("2.2500").points, 25);
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    #[test]
    fn test_item_points_single_item() {
        assert_eq!(item_points(&[Item::new("abc123", "1.00")]).points, 1);
        assert_eq!(item_points(&[Item::new("abc1234", "1.00")]).points, 0);
    }

    #[test]
    fn test_item_points_trims_descriptions() {
        let items = [Item::new("abc 12", "1.00"), Item::new("   abc123   ", "1.00")];
        let outcome = item_points(&items);
        assert_eq!(outcome.points, 7);
        assert!(!outcome.had_error());
    }

    #[test]
    fn test_item_points_pairs() {
        let items = [Item::new("abc123", "1.00"), Item::new("abc1234", "1.00")];
        assert_eq!(item_points(&items).points, 6);

        let items = vec![Item::new("abc1234", "1.00"); 3];
        assert_eq!(item_points(&items).points, 5);

        assert_eq!(item_points(&[]).points, 0);
    }

    #[test]
    fn test_item_points_empty_description_qualifies() {
        let outcome = item_points(&[Item::new("   ", "5.01")]);
        assert_eq!(outcome.points, 2);
    }

    #[test]
    fn test_item_points_sub_cent_and_exponent_prices() {
        // 1.005 × 0.2 = 0.201 → 1
        let outcome = item_points(&[Item::new("abc", "1.005")]);
        assert_eq!(outcome.points, 1);
        assert!(!outcome.had_error());

        // 1e2 × 0.2 = 20
        let outcome = item_points(&[Item::new("abc", "1e2")]);
        assert_eq!(outcome.points, 20);
        assert!(!outcome.had_error());
    }

    #[test]
    fn test_item_points_negative_price_scores_zero() {
        let outcome = item_points(&[Item::new("abc", "-10.00")]);
        assert_eq!(outcome.points, 0);
        assert!(!outcome.had_error());
    }

    #[test]
    fn test_item_points_bad_price_only_affects_that_item() {
        let items = [
            Item::new("abc123", ""),
            Item::new("abc123", "1.00"),
            Item::new("xyz", "oops"),
        ];
        let outcome = item_points(&items);

        // one pair + the single parsable bonus
        assert_eq!(outcome.points, 5 + 1);
        assert_eq!(outcome.errors.len(), 2);
        assert!(matches!(
            outcome.errors[0],
            CalculationError::InvalidItemPrice { index: 0, .. }
        ));
        assert!(matches!(
            outcome.errors[1],
            CalculationError::InvalidItemPrice { index: 2, .. }
        ));
    }

    #[test]
    fn test_item_points_skips_price_of_non_qualifying_item() {
        // Price is never read when the description does not qualify
        let outcome = item_points(&[Item::new("abcd", "not a price")]);
        assert_eq!(outcome.points, 0);
        assert!(!outcome.had_error());
    }

    // -------------------------------------------------------------------------
    // Date / time
    // -------------------------------------------------------------------------

    #[test]
    fn test_date_time_points() {
        assert_eq!(date_time_points("2024-01-01", "11:00").points, 6);
        assert_eq!(date_time_points("2024-01-02", "11:00").points, 0);
        assert_eq!(date_time_points("2024-01-01", "15:00").points, 16);
        assert_eq!(date_time_points("2024-01-02", "15:00").points, 10);
    }

    #[test]
    fn test_afternoon_window_is_exclusive() {
        assert_eq!(date_time_points("2024-01-02", "14:00").points, 0);
        assert_eq!(date_time_points("2024-01-02", "14:01").points, 10);
        assert_eq!(date_time_points("2024-01-02", "15:59").points, 10);
        assert_eq!(date_time_points("2024-01-02", "16:00").points, 0);
    }

    #[test]
    fn test_bad_date_keeps_time_points() {
        let outcome = date_time_points("2024-01-00", "11:00");
        assert_eq!(outcome.points, 0);
        assert!(matches!(
            outcome.errors.as_slice(),
            [CalculationError::InvalidPurchaseDate { .. }]
        ));

        let outcome = date_time_points("not a date", "15:00");
        assert_eq!(outcome.points, 10);
        assert!(outcome.had_error());
    }

    #[test]
    fn test_bad_time_keeps_date_points() {
        let outcome = date_time_points("2024-01-02", "25:00");
        assert_eq!(outcome.points, 0);
        assert!(matches!(
            outcome.errors.as_slice(),
            [CalculationError::InvalidPurchaseTime { .. }]
        ));

        let outcome = date_time_points("2024-01-01", "");
        assert_eq!(outcome.points, 6);
        assert!(outcome.had_error());
    }

    #[test]
    fn test_date_must_be_zero_padded() {
        for date in ["2024-1-1", "2024-01-1", "24-01-01", "2024/01/01", "2024-01-01 ", "+2024-01-01"] {
            let outcome = date_time_points(date, "11:00");
            assert_eq!(outcome.points, 0, "{date}");
            assert!(
                matches!(
                    outcome.errors.as_slice(),
                    [CalculationError::InvalidPurchaseDate { .. }]
                ),
                "{date}"
            );
        }
    }

    #[test]
    fn test_time_shapes() {
        // single-digit hour is fine, single-digit minute is not
        assert_eq!(date_time_points("2024-01-02", "9:05").points, 0);
        assert!(!date_time_points("2024-01-02", "9:05").had_error());

        for time in ["15:4", "150:00", "15:00:00", "15-00", " 15:00"] {
            let outcome = date_time_points("2024-01-02", time);
            assert_eq!(outcome.points, 0, "{time}");
            assert!(
                matches!(
                    outcome.errors.as_slice(),
                    [CalculationError::InvalidPurchaseTime { .. }]
                ),
                "{time}"
            );
        }
    }

    // -------------------------------------------------------------------------
    // Composition
    // -------------------------------------------------------------------------

    #[test]
    fn test_target_receipt_scores_28() {
        let card = calculate_points(&target_receipt());

        assert_eq!(card.points, 28);
        assert_eq!(
            card.breakdown,
            PointsBreakdown {
                retailer: 6,
                total: 0,
                items: 16,
                date_time: 6,
            }
        );
        assert!(!card.had_error());
    }

    #[test]
    fn test_corner_market_receipt_scores_109() {
        let card = calculate_points(&corner_market_receipt());

        assert_eq!(card.points, 109);
        assert_eq!(card.breakdown.retailer, 14);
        assert_eq!(card.breakdown.total, 75);
        assert_eq!(card.breakdown.items, 10);
        assert_eq!(card.breakdown.date_time, 10);
    }

    #[test]
    fn test_errors_do_not_abort_other_rules() {
        let mut receipt = target_receipt();
        receipt.total = "thirty five".to_string();
        receipt.purchase_time = "1pm".to_string();
        receipt.items[1].price = "12,25".to_string();

        let card = calculate_points(&receipt);

        // retailer 6 + items (10 pairs + 3 Klarbrunn) + odd day 6
        assert_eq!(card.points, 6 + 13 + 6);
        assert!(card.had_error());
        assert_eq!(card.errors.len(), 3);
        assert_eq!(card.errors[0].field(), "total");
        assert_eq!(card.errors[1].field(), "items.price");
        assert_eq!(card.errors[2].field(), "purchaseTime");
    }

    #[test]
    fn test_empty_receipt_scores_zero_with_errors() {
        let card = calculate_points(&Receipt::default());

        assert_eq!(card.points, 0);
        // total, date, time
        assert_eq!(card.errors.len(), 3);
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let receipt = target_receipt();
        assert_eq!(calculate_points(&receipt), calculate_points(&receipt));
    }
}
