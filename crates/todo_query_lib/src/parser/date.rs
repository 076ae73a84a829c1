//! Parsing the date given to the `date` command.
use chrono::NaiveDate;
use nom::{
    bytes::complete as bytes, character::complete as character, combinator, sequence, IResult,
    Parser,
};

use crate::{Error, InvalidDateSnafu};

fn number(min: usize, max: usize) -> impl Fn(&str) -> IResult<&str, u32> {
    move |i| {
        let (i, ds) = bytes::take_while_m_n(min, max, |c: char| c.is_ascii_digit()).parse(i)?;
        // UNWRAP: safe because we only took a handful of ascii digits.
        Ok((i, ds.parse().unwrap()))
    }
}

/// Eat `yyyy`, `yyyy-m[m]` or `yyyy-m[m]-d[d]`, returning the parts that were
/// given.
///
/// ```rust
/// use todo_query_lib::parser::date::*;
///
/// assert_eq!(date_parts("2024"), Ok(("", (2024, None, None))));
/// assert_eq!(date_parts("2024-6"), Ok(("", (2024, Some(6), None))));
/// assert_eq!(date_parts("2024-06-15"), Ok(("", (2024, Some(6), Some(15)))));
/// assert!(date_parts("24-06").is_err());
/// ```
#[allow(clippy::type_complexity)]
pub fn date_parts(i: &str) -> IResult<&str, (i32, Option<u32>, Option<u32>)> {
    let (i, year) = number(4, 4)(i)?;
    let (i, month) =
        combinator::opt(sequence::preceded(character::char('-'), number(1, 2))).parse(i)?;
    let (i, day) = match month {
        Some(_) => {
            combinator::opt(sequence::preceded(character::char('-'), number(1, 2))).parse(i)?
        }
        None => (i, None),
    };
    Ok((i, (year as i32, month, day)))
}

/// Parse a date query, filling in the first month and day for any parts
/// that were left out.
///
/// ```rust
/// use chrono::NaiveDate;
/// use todo_query_lib::parser::date::parse_date_query;
///
/// let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// assert_eq!(parse_date_query("2024").unwrap(), ymd(2024, 1, 1));
/// assert_eq!(parse_date_query("2024-06").unwrap(), ymd(2024, 6, 1));
/// assert_eq!(parse_date_query("2024-06-15").unwrap(), ymd(2024, 6, 15));
/// assert!(parse_date_query("yesterday").is_err());
/// ```
pub fn parse_date_query(input: &str) -> Result<NaiveDate, Error> {
    let parsed = combinator::all_consuming(date_parts).parse(input);
    let Ok((_, (year, month, day))) = parsed else {
        return InvalidDateSnafu { input }.fail();
    };
    NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))
        .ok_or_else(|| InvalidDateSnafu { input }.build())
}
