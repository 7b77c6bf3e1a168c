use chrono::{Datelike, Days, NaiveDate};

/// The last calendar day of the given quarter (1..=4).
pub fn quarter_end(year: i32, quarter: u32) -> NaiveDate {
    let (month, day) = match quarter {
        1 => (3, 31),
        2 => (6, 30),
        3 => (9, 30),
        _ => (12, 31),
    };
    // The (month, day) pairs above are valid for every year.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// The most recent quarter end on or before `date`.
pub fn quarter_end_on_or_before(date: NaiveDate) -> NaiveDate {
    let quarter = (date.month0() / 3) + 1;
    let candidate = quarter_end(date.year(), quarter);
    if candidate <= date {
        candidate
    } else if quarter == 1 {
        quarter_end(date.year() - 1, 4)
    } else {
        quarter_end(date.year(), quarter - 1)
    }
}

/// `count` consecutive quarter ends starting at the given quarter, ascending.
pub fn quarter_ends_from(year: i32, quarter: u32, count: usize) -> Vec<NaiveDate> {
    let mut year = year;
    let mut quarter = quarter;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(quarter_end(year, quarter));
        quarter += 1;
        if quarter > 4 {
            quarter = 1;
            year += 1;
        }
    }
    out
}

/// The `count` quarter ends ending with the last one on or before `end_hint`,
/// ascending.
pub fn trailing_quarter_ends(end_hint: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let last = quarter_end_on_or_before(end_hint);
    let mut year = last.year();
    let mut quarter = (last.month0() / 3) + 1;
    // Step back count - 1 quarters to find the first period.
    for _ in 1..count {
        if quarter == 1 {
            quarter = 4;
            year -= 1;
        } else {
            quarter -= 1;
        }
    }
    quarter_ends_from(year, quarter, count)
}

/// The `count` year ends (Dec 31) ending with the last one on or before
/// `end_hint`, ascending.
pub fn trailing_year_ends(end_hint: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut last_year = end_hint.year();
    if quarter_end(last_year, 4) > end_hint {
        last_year -= 1;
    }
    (0..count)
        .rev()
        .map(|back| quarter_end(last_year - back as i32, 4))
        .collect()
}

/// Every year end from `start_year` through the last one on or before `today`.
pub fn year_ends_through(start_year: i32, today: NaiveDate) -> Vec<NaiveDate> {
    (start_year..=today.year())
        .map(|year| quarter_end(year, 4))
        .filter(|date| *date <= today)
        .collect()
}

/// Every calendar day in `[start, end]`, ascending.
pub fn calendar_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut day = start;
    while day <= end {
        out.push(day);
        match day.checked_add_days(Days::new(1)) {
            Some(next) => day = next,
            None => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn quarter_end_on_or_before_snaps_backwards() {
        assert_eq!(quarter_end_on_or_before(d(2024, 2, 10)), d(2023, 12, 31));
        assert_eq!(quarter_end_on_or_before(d(2024, 3, 31)), d(2024, 3, 31));
        assert_eq!(quarter_end_on_or_before(d(2024, 8, 1)), d(2024, 6, 30));
    }

    #[test]
    fn trailing_quarter_ends_are_ascending_and_sized() {
        let ends = trailing_quarter_ends(d(2024, 5, 15), 8);
        assert_eq!(ends.len(), 8);
        assert_eq!(*ends.last().unwrap(), d(2024, 3, 31));
        assert_eq!(ends[0], d(2022, 6, 30));
        assert!(ends.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn trailing_year_ends_skip_the_unfinished_year() {
        let ends = trailing_year_ends(d(2024, 5, 15), 5);
        assert_eq!(ends, vec![
            d(2019, 12, 31),
            d(2020, 12, 31),
            d(2021, 12, 31),
            d(2022, 12, 31),
            d(2023, 12, 31),
        ]);
        // On Dec 31 itself the year counts as finished.
        assert_eq!(*trailing_year_ends(d(2024, 12, 31), 5).last().unwrap(), d(2024, 12, 31));
    }

    #[test]
    fn calendar_days_is_inclusive() {
        let days = calendar_days(d(2024, 1, 30), d(2024, 2, 2));
        assert_eq!(days.len(), 4);
        assert_eq!(days[0], d(2024, 1, 30));
        assert_eq!(days[3], d(2024, 2, 2));
        assert_eq!(calendar_days(d(2024, 1, 1), d(2024, 1, 1)).len(), 1);
    }
}
