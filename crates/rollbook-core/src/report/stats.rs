//! Pure, read-only descriptive statistics over scanned record sets.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, NaiveDate};

use crate::types::{Registration, RegistrationStatus, Student};

/// Registered/Dropped tallies for one grouping bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub registered: usize,
    pub dropped: usize,
}

impl StatusBreakdown {
    pub fn total(&self) -> usize {
        self.registered + self.dropped
    }

    /// dropped / (dropped + registered) * 100, or 0 for an empty bucket.
    pub fn drop_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.dropped as f64 / self.total() as f64 * 100.0
        }
    }

    fn bump(&mut self, status: RegistrationStatus) {
        match status {
            RegistrationStatus::Registered => self.registered += 1,
            RegistrationStatus::Dropped => self.dropped += 1,
        }
    }
}

/// Group counts over the student file.
#[derive(Debug, Default)]
pub struct StudentStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub by_major: BTreeMap<String, usize>,
    pub by_year: BTreeMap<u8, usize>,
}

impl StudentStats {
    pub fn compute(students: &[Student]) -> Self {
        let mut stats = Self::default();
        for s in students {
            stats.total += 1;
            match s.status {
                crate::types::ActivityStatus::Active => stats.active += 1,
                crate::types::ActivityStatus::Inactive => stats.inactive += 1,
            }
            *stats.by_major.entry(s.major.clone()).or_default() += 1;
            *stats.by_year.entry(s.year_level).or_default() += 1;
        }
        stats
    }

    pub fn most_common_year(&self) -> Option<(u8, usize)> {
        most_common(&self.by_year).map(|(y, n)| (*y, n))
    }

    pub fn most_common_major(&self) -> Option<(&str, usize)> {
        most_common(&self.by_major).map(|(m, n)| (m.as_str(), n))
    }

    pub fn least_common_major(&self) -> Option<(&str, usize)> {
        least_common(&self.by_major).map(|(m, n)| (m.as_str(), n))
    }
}

/// Counts and breakdowns over the registration file, joined with the student
/// file for the per-major and per-year groupings.
#[derive(Debug, Default)]
pub struct RegistrationStats {
    pub overall: StatusBreakdown,
    /// Distinct student ids holding at least one Registered record.
    pub distinct_registered_students: usize,
    pub by_course: BTreeMap<String, StatusBreakdown>,
    pub by_major: BTreeMap<String, StatusBreakdown>,
    pub by_year: BTreeMap<u8, StatusBreakdown>,
    /// Registrations per calendar day (UTC), any status.
    pub by_day: BTreeMap<NaiveDate, usize>,
}

impl RegistrationStats {
    /// `students` is the resolver's batch map; registrations whose student
    /// id does not resolve are counted in the totals and per-course buckets
    /// but omitted from the per-major and per-year groupings.
    pub fn compute(
        registrations: &[Registration],
        students: &HashMap<String, Student>,
    ) -> Self {
        let mut stats = Self::default();
        let mut registered_students: HashSet<&str> = HashSet::new();

        for r in registrations {
            stats.overall.bump(r.status);
            if r.status == RegistrationStatus::Registered {
                registered_students.insert(r.student_id.as_str());
            }
            stats
                .by_course
                .entry(r.course_id.clone())
                .or_default()
                .bump(r.status);
            if let Some(student) = students.get(&r.student_id) {
                stats
                    .by_major
                    .entry(student.major.clone())
                    .or_default()
                    .bump(r.status);
                stats
                    .by_year
                    .entry(student.year_level)
                    .or_default()
                    .bump(r.status);
            }
            if let Some(day) = timestamp_date(r.registration_date) {
                *stats.by_day.entry(day).or_default() += 1;
            }
        }

        stats.distinct_registered_students = registered_students.len();
        stats
    }

    /// Courses sorted descending by registered count (ties by course id).
    pub fn popular_courses(&self) -> Vec<(&str, &StatusBreakdown)> {
        let mut out: Vec<_> = self
            .by_course
            .iter()
            .map(|(id, b)| (id.as_str(), b))
            .collect();
        out.sort_by(|a, b| b.1.registered.cmp(&a.1.registered).then(a.0.cmp(b.0)));
        out
    }

    /// Courses sorted descending by drop rate (ties by course id).
    pub fn courses_by_drop_rate(&self) -> Vec<(&str, &StatusBreakdown)> {
        let mut out: Vec<_> = self
            .by_course
            .iter()
            .map(|(id, b)| (id.as_str(), b))
            .collect();
        out.sort_by(|a, b| {
            b.1.drop_rate()
                .partial_cmp(&a.1.drop_rate())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(b.0))
        });
        out
    }

    /// The `n` busiest calendar days by registration count.
    pub fn busiest_days(&self, n: usize) -> Vec<(NaiveDate, usize)> {
        let mut out: Vec<_> = self.by_day.iter().map(|(d, c)| (*d, *c)).collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        out.truncate(n);
        out
    }
}

/// Truncate a Unix timestamp to its UTC calendar date. Returns `None` for
/// timestamps outside chrono's representable range.
pub fn timestamp_date(ts: f64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts as i64, 0).map(|dt| dt.date_naive())
}

/// First key (in map order) with the highest count.
fn most_common<K: Ord>(counts: &BTreeMap<K, usize>) -> Option<(&K, usize)> {
    let mut best: Option<(&K, usize)> = None;
    for (k, &n) in counts {
        match best {
            Some((_, m)) if n <= m => {}
            _ => best = Some((k, n)),
        }
    }
    best
}

/// First key (in map order) with the lowest count.
fn least_common<K: Ord>(counts: &BTreeMap<K, usize>) -> Option<(&K, usize)> {
    let mut best: Option<(&K, usize)> = None;
    for (k, &n) in counts {
        match best {
            Some((_, m)) if n >= m => {}
            _ => best = Some((k, n)),
        }
    }
    best
}
