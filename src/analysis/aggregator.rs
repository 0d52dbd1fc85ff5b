//! Award aggregation and grouping.
//!
//! Every function borrows its records and returns a fresh value; nothing
//! here mutates the input. Functions that add up `AWARDS` stop at the first
//! malformed record in iteration order and return its error unchanged.
//!
//! A record lacking the field a grouping or listing keys on is not dropped:
//! it lands under the `None` key, so its `AWARDS` is still counted.

use crate::error::AggregateError;
use crate::models::{FiscalYear, Record};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::debug;

/// Records partitioned by a key, with keys kept in first-seen order.
///
/// Every input record belongs to exactly one group.
#[derive(Debug, Clone)]
pub struct Groups<'a, K> {
    entries: Vec<(K, Vec<&'a Record>)>,
    index: HashMap<K, usize>,
}

impl<'a, K> Groups<'a, K>
where
    K: Copy + Eq + Hash,
{
    fn build<I, F>(records: I, key_of: F) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
        F: Fn(&'a Record) -> K,
    {
        let mut groups = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };

        for record in records {
            let key = key_of(record);
            let slot = *groups.index.entry(key).or_insert_with(|| {
                groups.entries.push((key, Vec::new()));
                groups.entries.len() - 1
            });
            groups.entries[slot].1.push(record);
        }

        groups
    }

    /// Records sharing `key`, in their original relative order.
    pub fn get(&self, key: K) -> Option<&[&'a Record]> {
        self.index
            .get(&key)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    /// Group keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &[&'a Record])> + '_ {
        self.entries
            .iter()
            .map(|(key, records)| (*key, records.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Total number of awards across `records`.
pub fn sum_awards<'a, I>(records: I) -> Result<f64, AggregateError>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .try_fold(0.0, |total, record| record.award_count().map(|n| total + n))
}

/// Records flagged as Hawaiian heritage.
pub fn filter_hawaiian<'a, I>(records: I) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().filter(|r| r.is_hawaiian()).collect()
}

/// Total awards among Hawaiian-heritage records only.
///
/// Non-Hawaiian records are filtered out before their `AWARDS` is inspected.
pub fn sum_hawaiian_awards<'a, I>(records: I) -> Result<f64, AggregateError>
where
    I: IntoIterator<Item = &'a Record>,
{
    sum_awards(filter_hawaiian(records))
}

/// Share of all awards that went to Hawaiian-heritage recipients, in percent.
///
/// Fails with [`AggregateError::ZeroTotal`] when the overall total is zero,
/// which includes an empty data set.
pub fn percentage_hawaiian<'a, I>(records: I) -> Result<f64, AggregateError>
where
    I: IntoIterator<Item = &'a Record> + Clone,
{
    let hawaiian = sum_hawaiian_awards(records.clone())?;
    let total = sum_awards(records)?;

    if total == 0.0 {
        return Err(AggregateError::ZeroTotal);
    }

    debug!("Hawaiian awards: {} of {}", hawaiian, total);
    Ok((hawaiian / total) * 100.0)
}

/// Records whose fiscal year equals `year` (type-sensitive).
pub fn filter_by_year<'a, I>(records: I, year: &FiscalYear) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().filter(|r| r.in_year(year)).collect()
}

/// Total awards for a single fiscal year.
pub fn sum_awards_by_year<'a, I>(records: I, year: &FiscalYear) -> Result<f64, AggregateError>
where
    I: IntoIterator<Item = &'a Record>,
{
    sum_awards(filter_by_year(records, year))
}

/// Distinct campuses in first-seen order; `None` stands for "no campus".
pub fn list_campuses<'a, I>(records: I) -> Vec<Option<&'a str>>
where
    I: IntoIterator<Item = &'a Record>,
{
    distinct(records.into_iter().map(Record::campus))
}

/// Partition records by campus. Records without a campus form the `None` group.
pub fn group_by_campus<'a, I>(records: I) -> Groups<'a, Option<&'a str>>
where
    I: IntoIterator<Item = &'a Record>,
{
    Groups::build(records, Record::campus)
}

/// Total awards per campus, in first-seen campus order.
pub fn sum_awards_by_campus<'a, I>(
    records: I,
) -> Result<Vec<(Option<&'a str>, f64)>, AggregateError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let groups = group_by_campus(records);
    debug!("Summing awards for {} campuses", groups.len());
    sum_groups(&groups)
}

/// Partition records by fiscal year. Records without a year form the `None` group.
pub fn group_by_year<'a, I>(records: I) -> Groups<'a, Option<&'a FiscalYear>>
where
    I: IntoIterator<Item = &'a Record>,
{
    Groups::build(records, |r| r.fiscal_year.as_ref())
}

/// Total awards per fiscal year, in first-seen year order.
pub fn yearly_awards<'a, I>(
    records: I,
) -> Result<Vec<(Option<&'a FiscalYear>, f64)>, AggregateError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let groups = group_by_year(records);
    debug!("Summing awards for {} fiscal years", groups.len());
    sum_groups(&groups)
}

/// Highest yearly award total, or `None` for an empty data set.
pub fn max_yearly_awards<'a, I>(records: I) -> Result<Option<f64>, AggregateError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let max = yearly_awards(records)?
        .into_iter()
        .map(|(_, total)| total)
        .reduce(f64::max);

    Ok(max)
}

/// Doctoral degree records.
pub fn filter_doctoral<'a, I>(records: I) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().filter(|r| r.is_doctoral()).collect()
}

/// Distinct doctoral program names in first-seen order; `None` stands for
/// a doctoral record with no program name.
pub fn list_doctoral_programs<'a, I>(records: I) -> Vec<Option<&'a str>>
where
    I: IntoIterator<Item = &'a Record>,
{
    distinct(filter_doctoral(records).into_iter().map(Record::program))
}

fn sum_groups<'a, K>(groups: &Groups<'a, K>) -> Result<Vec<(K, f64)>, AggregateError>
where
    K: Copy + Eq + Hash,
{
    groups
        .iter()
        .map(|(key, records)| sum_awards(records.iter().copied()).map(|total| (key, total)))
        .collect()
}

fn distinct<T>(values: impl Iterator<Item = T>) -> Vec<T>
where
    T: Copy + Eq + Hash,
{
    let mut seen = HashSet::new();
    values.filter(|value| seen.insert(*value)).collect()
}
