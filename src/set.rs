use std::ops::Range;
use std::slice;
use std::sync::LazyLock;
use std::vec;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IntervalError;
use crate::interval::DateInterval;

static EMPTY_SET: LazyLock<DateIntervalSet> = LazyLock::new(|| {
    let mut set = DateIntervalSet::new();
    set.freeze();
    set
});

static WHOLE_SET: LazyLock<DateIntervalSet> = LazyLock::new(|| {
    let mut set = DateIntervalSet::new();
    set.push_sorted(DateInterval::whole());
    set.freeze();
    set
});

/// Sorted intervals that never share a day.
///
/// Adjacent members (one ending the day before the next starts) stay separate
/// until [`DateIntervalSet::merge`] joins them. A frozen set rejects every
/// mutation with [`IntervalError::ReadOnly`]; cloning yields an unfrozen copy.
/// Every mutator either completes or fails before touching the members.
#[derive(Debug)]
pub struct DateIntervalSet<T = ()> {
    items:  Vec<DateInterval<T>>,
    frozen: bool,
}

impl DateIntervalSet<()> {
    /// The frozen, process-wide empty set.
    pub fn empty_set() -> &'static Self {
        &EMPTY_SET
    }

    /// The frozen, process-wide set holding only `0001-01-01..=9999-12-31`.
    pub fn whole_set() -> &'static Self {
        &WHOLE_SET
    }
}

impl<T> Default for DateIntervalSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DateIntervalSet<T> {
    /// An empty, writable set.
    pub const fn new() -> Self {
        Self {
            items:  Vec::new(),
            frozen: false,
        }
    }

    /// Builds a set from intervals already in strictly increasing, non-overlapping order.
    ///
    /// # Errors
    /// Returns `IntervalError::OutOfOrder` at the first interval that does not
    /// start after the previous one ends.
    pub fn from_sorted<I>(intervals: I) -> Result<Self, IntervalError>
    where
        I: IntoIterator<Item = DateInterval<T>>,
    {
        let mut set = Self::new();
        for interval in intervals {
            set.append(interval)?;
        }
        Ok(set)
    }

    /// Checks if the set rejects mutation
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Makes the set permanently read-only.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    fn check_writable(&self, operation: &'static str) -> Result<(), IntervalError> {
        if self.frozen {
            debug!(operation, "rejected mutation of read-only interval set");
            return Err(IntervalError::ReadOnly);
        }
        Ok(())
    }

    /// Adds an interval after all current members.
    ///
    /// The empty interval is ignored.
    ///
    /// # Errors
    /// Returns `IntervalError::ReadOnly` on a frozen set and
    /// `IntervalError::OutOfOrder` unless `interval` starts after the last member ends.
    pub fn append(&mut self, interval: DateInterval<T>) -> Result<(), IntervalError> {
        self.check_writable("append")?;
        let Some((first, _)) = interval.bounds() else {
            return Ok(());
        };
        if let Some(tail) = self.items.last().and_then(DateInterval::last) {
            if first <= tail {
                debug!(%first, last = %tail, "rejected out-of-order append");
                return Err(IntervalError::OutOfOrder { first, last: tail });
            }
        }
        self.items.push(interval);
        Ok(())
    }

    /// Appends without checks; callers guarantee ordering.
    pub(crate) fn push_sorted(&mut self, interval: DateInterval<T>) {
        debug_assert!(!interval.is_empty());
        self.items.push(interval);
    }

    /// Position of the member containing `date`.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let index = self
            .items
            .partition_point(|member| member.last().is_some_and(|last| last < date));
        self.items
            .get(index)
            .filter(|member| member.contains(date))
            .map(|_| index)
    }

    /// Indexes of the members sharing at least one day with `[first, last]`.
    fn overlapping(&self, first: NaiveDate, last: NaiveDate) -> Range<usize> {
        let start = self
            .items
            .partition_point(|member| member.last().is_some_and(|end| end < first));
        let end = self
            .items
            .partition_point(|member| member.first().is_some_and(|begin| begin <= last));
        start..end.max(start)
    }

    /// Returns the member at `index` in ascending order
    pub fn get(&self, index: usize) -> Option<&DateInterval<T>> {
        self.items.get(index)
    }

    /// Iterates members in ascending order.
    pub fn iter(&self) -> slice::Iter<'_, DateInterval<T>> {
        self.items.iter()
    }

    /// Number of member intervals, not days.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the set has no members
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the earliest member
    pub fn first(&self) -> Option<&DateInterval<T>> {
        self.items.first()
    }

    /// Returns the latest member
    pub fn last(&self) -> Option<&DateInterval<T>> {
        self.items.last()
    }

    /// Days covered by all members.
    pub fn total_days(&self) -> i64 {
        self.items.iter().map(DateInterval::days).sum()
    }

    /// Whether any member shares a date with `interval`.
    pub fn is_crossed<U>(&self, interval: &DateInterval<U>) -> bool {
        interval
            .bounds()
            .is_some_and(|(first, last)| !self.overlapping(first, last).is_empty())
    }

    /// Whether every day of `interval` is covered, with no gaps between the members involved.
    pub fn contains_whole<U>(&self, interval: &DateInterval<U>) -> bool {
        let Some((first, last)) = interval.bounds() else {
            return false;
        };
        let Some(start) = self.index_of(first) else {
            return false;
        };
        let mut reach = self.items[start].last();
        for member in &self.items[start + 1..] {
            match reach {
                Some(end) if end >= last => return true,
                Some(end) if end.succ_opt() == member.first() => reach = member.last(),
                _ => return false,
            }
        }
        reach.is_some_and(|end| end >= last)
    }

    /// Removes every member.
    ///
    /// # Errors
    /// Returns `IntervalError::ReadOnly` on a frozen set.
    pub fn clear(&mut self) -> Result<(), IntervalError> {
        self.check_writable("clear")?;
        self.items.clear();
        Ok(())
    }
}

impl<T: Clone> DateIntervalSet<T> {
    /// Smallest interval covering all members, tagged from the first member.
    pub fn hull(&self) -> Option<DateInterval<T>> {
        match (self.items.first(), self.items.last()) {
            (Some(head), Some(tail)) => Some(head.union(tail)),
            _ => None,
        }
    }

    /// The parts of the members lying inside `interval`, with member tags.
    pub fn cross<U>(&self, interval: &DateInterval<U>) -> Self {
        let Some((first, last)) = interval.bounds() else {
            return Self::new();
        };
        let items = self.items[self.overlapping(first, last)]
            .iter()
            .filter_map(|member| member.try_intersect(interval))
            .collect();
        Self { items, frozen: false }
    }

    /// Inserts `interval`, overwriting whatever the set held for its days.
    ///
    /// The empty interval is ignored.
    ///
    /// # Errors
    /// Returns `IntervalError::ReadOnly` on a frozen set.
    pub fn add(&mut self, interval: DateInterval<T>) -> Result<(), IntervalError> {
        self.check_writable("add")?;
        let Some((first, last)) = interval.bounds() else {
            return Ok(());
        };
        self.cut(first, last);
        let index = self
            .items
            .partition_point(|member| member.first().is_some_and(|begin| begin < first));
        debug!(%first, %last, index, "inserted interval");
        self.items.insert(index, interval);
        Ok(())
    }

    /// Removes the days of `interval` from the set.
    ///
    /// Members inside it disappear, members overlapping one end are trimmed, and a
    /// member strictly containing it is split in two. The empty interval is ignored.
    ///
    /// # Errors
    /// Returns `IntervalError::ReadOnly` on a frozen set.
    pub fn remove<U>(&mut self, interval: &DateInterval<U>) -> Result<(), IntervalError> {
        self.check_writable("remove")?;
        if let Some((first, last)) = interval.bounds() {
            self.cut(first, last);
        }
        Ok(())
    }

    fn cut(&mut self, first: NaiveDate, last: NaiveDate) {
        let overlapping = self.overlapping(first, last);
        if overlapping.is_empty() {
            return;
        }
        let before = first.pred_opt();
        let after = last.succ_opt();

        let mut replacement = Vec::with_capacity(2);
        for member in &self.items[overlapping.clone()] {
            let Some((begin, end)) = member.bounds() else {
                continue;
            };
            let keeps_head = begin < first;
            let keeps_tail = end > last;
            match (keeps_head, keeps_tail) {
                (false, false) => debug!(%begin, %end, "removed covered member"),
                (true, false) => debug!(%begin, %end, %first, "trimmed member end"),
                (false, true) => debug!(%begin, %end, %last, "trimmed member start"),
                (true, true) => debug!(%begin, %end, %first, %last, "split member around removal"),
            }
            if keeps_head {
                if let Some(head_end) = before {
                    replacement.push(DateInterval::new(begin, head_end, member.tag().clone()));
                }
            }
            if keeps_tail {
                if let Some(tail_start) = after {
                    replacement.push(DateInterval::new(tail_start, end, member.tag().clone()));
                }
            }
        }
        let replacement: Vec<_> = replacement.into_iter().filter_map(Result::ok).collect();
        self.items.splice(overlapping, replacement);
    }

    /// Splits the member containing `date` into `..=date` and `date + 1..`.
    ///
    /// Nothing changes when no member contains `date` or `date` is a member's last day.
    ///
    /// # Errors
    /// Returns `IntervalError::ReadOnly` on a frozen set.
    pub fn split(&mut self, date: NaiveDate) -> Result<(), IntervalError> {
        self.check_writable("split")?;
        let Some(index) = self.index_of(date) else {
            return Ok(());
        };
        let member = &self.items[index];
        let (Some((begin, end)), Some(next)) = (member.bounds(), date.succ_opt()) else {
            return Ok(());
        };
        if date >= end {
            return Ok(());
        }
        let head = DateInterval::new(begin, date, member.tag().clone())?;
        let tail = DateInterval::new(next, end, member.tag().clone())?;
        debug!(%begin, %end, %date, index, "split member");
        self.items.splice(index..=index, [head, tail]);
        Ok(())
    }
}

impl<T: Clone + PartialEq> DateIntervalSet<T> {
    /// Joins members that touch without a gap, optionally only when their tags are equal.
    ///
    /// The joined member keeps the tag of the earlier one.
    ///
    /// # Errors
    /// Returns `IntervalError::ReadOnly` on a frozen set.
    pub fn merge(&mut self, require_equal_tags: bool) -> Result<(), IntervalError> {
        self.check_writable("merge")?;
        let mut merged: Vec<DateInterval<T>> = Vec::with_capacity(self.items.len());
        for member in self.items.drain(..) {
            if let Some(previous) = merged.last_mut() {
                let touches = previous.last().and_then(|end| end.succ_opt()) == member.first();
                if touches && (!require_equal_tags || previous.tag() == member.tag()) {
                    debug!(previous = %previous, next = %member, "merged adjacent members");
                    *previous = previous.union(&member);
                    continue;
                }
            }
            merged.push(member);
        }
        self.items = merged;
        Ok(())
    }
}

impl<T: Clone> Clone for DateIntervalSet<T> {
    /// Copies the members; the copy is never frozen.
    fn clone(&self) -> Self {
        Self {
            items:  self.items.clone(),
            frozen: false,
        }
    }
}

impl<T: PartialEq> PartialEq for DateIntervalSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for DateIntervalSet<T> {}

impl<'a, T> IntoIterator for &'a DateIntervalSet<T> {
    type Item = &'a DateInterval<T>;
    type IntoIter = slice::Iter<'a, DateInterval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for DateIntervalSet<T> {
    type Item = DateInterval<T>;
    type IntoIter = vec::IntoIter<DateInterval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Serialize)]
struct DateIntervalSetRef<'a, T> {
    intervals: &'a [DateInterval<T>],
    read_only: bool,
}

#[derive(Deserialize)]
struct DateIntervalSetRepr<T> {
    intervals: Vec<DateInterval<T>>,
    #[serde(default)]
    read_only: bool,
}

impl<T: Serialize> Serialize for DateIntervalSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        DateIntervalSetRef {
            intervals: &self.items,
            read_only: self.frozen,
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for DateIntervalSet<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = DateIntervalSetRepr::<T>::deserialize(deserializer)?;
        let mut set = Self::from_sorted(repr.intervals).map_err(serde::de::Error::custom)?;
        if repr.read_only {
            set.freeze();
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{bounds_of, date, interval, set_of, tagged};

    fn years_2019_and_2021() -> DateIntervalSet {
        set_of(&[((2019, 1, 1), (2019, 12, 31)), ((2021, 1, 1), (2021, 12, 31))])
    }

    #[test]
    fn test_index_of() {
        let set = years_2019_and_2021();
        assert_eq!(set.index_of(date(2020, 6, 15)), None);
        assert_eq!(set.index_of(date(2019, 7, 1)), Some(0));
        assert_eq!(set.index_of(date(2021, 12, 31)), Some(1));
        assert_eq!(set.index_of(date(2018, 12, 31)), None);
        assert_eq!(set.index_of(date(2022, 1, 1)), None);
        assert_eq!(DateIntervalSet::<()>::new().index_of(date(2020, 1, 1)), None);
    }

    #[test]
    fn test_append_requires_increasing_order() {
        let mut set = years_2019_and_2021();
        let result = set.append(interval((2021, 12, 31), (2022, 1, 5)));
        assert_eq!(
            result,
            Err(IntervalError::OutOfOrder {
                first: date(2021, 12, 31),
                last:  date(2021, 12, 31),
            })
        );
        assert_eq!(set.len(), 2);

        set.append(DateInterval::empty()).expect("empty is ignored");
        set.append(interval((2022, 1, 1), (2022, 1, 5))).expect("adjacent is allowed");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_from_sorted() {
        let set = DateIntervalSet::from_sorted([
            interval((2020, 1, 1), (2020, 1, 10)),
            interval((2020, 2, 1), (2020, 2, 10)),
        ])
        .expect("sorted");
        assert_eq!(set.len(), 2);
        assert!(DateIntervalSet::from_sorted([
            interval((2020, 2, 1), (2020, 2, 10)),
            interval((2020, 1, 1), (2020, 1, 10)),
        ])
        .is_err());
    }

    #[test]
    fn test_remove_cases() {
        struct TestCase {
            removed:     ((i32, u32, u32), (i32, u32, u32)),
            expected:    Vec<((i32, u32, u32), (i32, u32, u32))>,
            description: &'static str,
        }

        let cases = [
            TestCase {
                removed:     ((2020, 1, 1), (2020, 12, 31)),
                expected:    vec![((2019, 1, 1), (2019, 12, 31)), ((2021, 1, 1), (2021, 12, 31))],
                description: "gap between members",
            },
            TestCase {
                removed:     ((2018, 6, 1), (2019, 12, 31)),
                expected:    vec![((2021, 1, 1), (2021, 12, 31))],
                description: "covers a member",
            },
            TestCase {
                removed:     ((2018, 6, 1), (2019, 3, 31)),
                expected:    vec![((2019, 4, 1), (2019, 12, 31)), ((2021, 1, 1), (2021, 12, 31))],
                description: "trims the start",
            },
            TestCase {
                removed:     ((2019, 10, 1), (2020, 3, 1)),
                expected:    vec![((2019, 1, 1), (2019, 9, 30)), ((2021, 1, 1), (2021, 12, 31))],
                description: "trims the end",
            },
            TestCase {
                removed:     ((2019, 5, 1), (2019, 5, 31)),
                expected:    vec![
                    ((2019, 1, 1), (2019, 4, 30)),
                    ((2019, 6, 1), (2019, 12, 31)),
                    ((2021, 1, 1), (2021, 12, 31)),
                ],
                description: "splits a member",
            },
            TestCase {
                removed:     ((2019, 7, 1), (2021, 6, 30)),
                expected:    vec![((2019, 1, 1), (2019, 6, 30)), ((2021, 7, 1), (2021, 12, 31))],
                description: "spans two members",
            },
            TestCase {
                removed:     ((2019, 1, 1), (2019, 1, 1)),
                expected:    vec![((2019, 1, 2), (2019, 12, 31)), ((2021, 1, 1), (2021, 12, 31))],
                description: "first day only",
            },
        ];

        for case in &cases {
            let mut set = years_2019_and_2021();
            set.remove(&interval(case.removed.0, case.removed.1))
                .expect("writable");
            let expected: Vec<_> = case
                .expected
                .iter()
                .filter_map(|&(first, last)| interval(first, last).bounds())
                .collect();
            assert_eq!(bounds_of(&set), expected, "{}", case.description);
        }
    }

    #[test]
    fn test_remove_keeps_member_tags() {
        let mut set = DateIntervalSet::new();
        set.append(tagged((2020, 1, 1), (2020, 12, 31), "year")).expect("writable");
        set.remove(&interval((2020, 6, 1), (2020, 6, 30))).expect("writable");
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|member| *member.tag() == "year"));
    }

    #[test]
    fn test_add_overwrites() {
        let mut set = DateIntervalSet::new();
        set.append(tagged((2020, 1, 1), (2020, 3, 31), "old")).expect("writable");
        set.append(tagged((2020, 5, 1), (2020, 5, 31), "old")).expect("writable");
        set.add(tagged((2020, 3, 15), (2020, 5, 10), "new")).expect("writable");

        let members: Vec<_> = set.iter().copied().collect();
        assert_eq!(
            members,
            vec![
                tagged((2020, 1, 1), (2020, 3, 14), "old"),
                tagged((2020, 3, 15), (2020, 5, 10), "new"),
                tagged((2020, 5, 11), (2020, 5, 31), "old"),
            ]
        );

        set.add(tagged((2019, 1, 1), (2019, 1, 1), "early")).expect("writable");
        assert_eq!(set.first().map(|member| *member.tag()), Some("early"));
        set.add(DateInterval::empty()).expect("empty is ignored");
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_add_then_remove_clears_only_the_interval() {
        let original = set_of(&[
            ((2020, 1, 1), (2020, 1, 31)),
            ((2020, 3, 1), (2020, 4, 30)),
            ((2020, 6, 1), (2020, 6, 30)),
        ]);
        let changed = interval((2020, 1, 20), (2020, 3, 10));

        let mut set = original.clone();
        set.add(changed).expect("writable");
        set.remove(&changed).expect("writable");

        let mut expected = original.clone();
        expected.remove(&changed).expect("writable");
        assert_eq!(set, expected);
        assert!(!set.is_crossed(&changed));
        for day in changed.iter() {
            assert_eq!(set.index_of(day), None);
        }
        assert_eq!(set.index_of(date(2020, 1, 19)), Some(0));
        assert_eq!(set.index_of(date(2020, 3, 11)), Some(1));
    }

    #[test]
    fn test_split() {
        let mut set = DateIntervalSet::new();
        set.append(tagged((2020, 1, 1), (2020, 1, 31), 'a')).expect("writable");
        set.split(date(2020, 1, 10)).expect("writable");
        let members: Vec<_> = set.iter().copied().collect();
        assert_eq!(
            members,
            vec![tagged((2020, 1, 1), (2020, 1, 10), 'a'), tagged((2020, 1, 11), (2020, 1, 31), 'a')]
        );

        set.split(date(2020, 1, 31)).expect("last day is a no-op");
        set.split(date(2020, 2, 15)).expect("outside is a no-op");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_merge() {
        let mut set = DateIntervalSet::new();
        set.append(tagged((2020, 1, 1), (2020, 1, 31), 1)).expect("writable");
        set.append(tagged((2020, 2, 1), (2020, 2, 29), 1)).expect("writable");
        set.append(tagged((2020, 3, 1), (2020, 3, 31), 2)).expect("writable");
        set.append(tagged((2020, 4, 2), (2020, 4, 30), 2)).expect("writable");

        let mut strict = set.clone();
        strict.merge(true).expect("writable");
        let members: Vec<_> = strict.iter().copied().collect();
        assert_eq!(
            members,
            vec![
                tagged((2020, 1, 1), (2020, 2, 29), 1),
                tagged((2020, 3, 1), (2020, 3, 31), 2),
                tagged((2020, 4, 2), (2020, 4, 30), 2),
            ]
        );

        set.merge(false).expect("writable");
        let members: Vec<_> = set.iter().copied().collect();
        assert_eq!(
            members,
            vec![tagged((2020, 1, 1), (2020, 3, 31), 1), tagged((2020, 4, 2), (2020, 4, 30), 2)]
        );
    }

    #[test]
    fn test_cross_and_contains_whole() {
        let set = set_of(&[
            ((2020, 1, 1), (2020, 1, 31)),
            ((2020, 2, 1), (2020, 2, 29)),
            ((2020, 3, 2), (2020, 3, 31)),
        ]);

        let crossed = set.cross(&interval((2020, 1, 15), (2020, 3, 5)));
        assert_eq!(
            bounds_of(&crossed),
            vec![
                (date(2020, 1, 15), date(2020, 1, 31)),
                (date(2020, 2, 1), date(2020, 2, 29)),
                (date(2020, 3, 2), date(2020, 3, 5)),
            ]
        );
        assert!(set.is_crossed(&interval((2020, 3, 1), (2020, 3, 2))));
        assert!(!set.is_crossed(&interval((2020, 3, 1), (2020, 3, 1))));
        assert!(!set.is_crossed(&DateInterval::<()>::empty()));

        assert!(set.contains_whole(&interval((2020, 1, 10), (2020, 2, 20))));
        assert!(set.contains_whole(&interval((2020, 3, 2), (2020, 3, 31))));
        assert!(!set.contains_whole(&interval((2020, 2, 10), (2020, 3, 5))));
        assert!(!set.contains_whole(&interval((2019, 12, 31), (2020, 1, 5))));
        assert!(!set.contains_whole(&interval((2020, 3, 30), (2020, 4, 1))));
    }

    #[test]
    fn test_summaries() {
        let set = years_2019_and_2021();
        assert_eq!(set.total_days(), 730);
        assert_eq!(set.hull(), Some(interval((2019, 1, 1), (2021, 12, 31))));
        assert_eq!(DateIntervalSet::<()>::new().hull(), None);
        assert_eq!(set.first().and_then(DateInterval::first), Some(date(2019, 1, 1)));
        assert_eq!(set.last().and_then(DateInterval::last), Some(date(2021, 12, 31)));
        assert_eq!((&set).into_iter().count(), 2);
    }

    #[test]
    fn test_frozen_set_rejects_mutation() {
        let mut set = years_2019_and_2021();
        set.freeze();
        let snapshot = set.clone();

        assert_eq!(set.append(interval((2022, 1, 1), (2022, 1, 1))), Err(IntervalError::ReadOnly));
        assert_eq!(set.add(interval((2020, 1, 1), (2020, 1, 1))), Err(IntervalError::ReadOnly));
        assert_eq!(set.add(DateInterval::empty()), Err(IntervalError::ReadOnly));
        assert_eq!(set.remove(&interval((2019, 1, 1), (2019, 1, 1))), Err(IntervalError::ReadOnly));
        assert_eq!(set.split(date(2019, 6, 1)), Err(IntervalError::ReadOnly));
        assert_eq!(set.merge(false), Err(IntervalError::ReadOnly));
        assert_eq!(set.clear(), Err(IntervalError::ReadOnly));
        assert_eq!(set, snapshot);

        assert!(set.is_frozen());
        let mut copy = set.clone();
        assert!(!copy.is_frozen());
        copy.clear().expect("clones are writable");
        assert!(copy.is_empty());
    }

    #[test]
    fn test_shared_constants() {
        let empty = DateIntervalSet::empty_set();
        assert!(empty.is_empty());
        assert!(empty.is_frozen());

        let whole = DateIntervalSet::whole_set();
        assert!(whole.is_frozen());
        assert_eq!(whole.len(), 1);
        assert!(whole.first().is_some_and(DateInterval::is_whole));
        assert!(whole.contains_whole(&interval((1, 1, 1), (9999, 12, 31))));

        let mut writable = whole.clone();
        writable.remove(&interval((2000, 1, 1), (2000, 12, 31))).expect("clone is writable");
        assert_eq!(writable.len(), 2);
        assert_eq!(DateIntervalSet::whole_set().len(), 1);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut set = DateIntervalSet::new();
        set.append(tagged((2020, 1, 1), (2020, 1, 31), 7u8)).expect("writable");
        set.freeze();
        let json = serde_json::to_string(&set).expect("serializes");
        assert_eq!(
            json,
            r#"{"intervals":[{"first":"2020-01-01","last":"2020-01-31","tag":7}],"read_only":true}"#
        );
        let parsed: DateIntervalSet<u8> = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(parsed, set);
        assert!(parsed.is_frozen());

        let overlapping = r#"{"intervals":[
            {"first":"2020-01-01","last":"2020-01-31","tag":0},
            {"first":"2020-01-31","last":"2020-02-10","tag":0}
        ]}"#;
        assert!(serde_json::from_str::<DateIntervalSet<u8>>(overlapping).is_err());
    }
}
