//! Grouped counts over user records for the dashboard charts.
//!
//! Everything here is pure: callers fetch the users and pass the reference
//! year, so the same input always yields the same output.

use std::collections::HashMap;

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::model::user::{EmploymentStatus, Manglic, Qualification, Sex, User};

/// Free-text dimensions keep only their most frequent values.
pub const TOP_VALUES: usize = 10;

pub const AGE_GROUPS: [&str; 5] = ["18-25", "26-30", "31-35", "36-40", "40+"];

const MIN_FEET: u32 = 3;
const MAX_FEET: u32 = 7;

static HEIGHT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d+)\s*ft\s*(?:and\s*)?(\d+)\s*inch(?:es)?\s*$").expect("height pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: u64,
}

impl Bucket {
    fn new(label: impl Into<String>, count: u64) -> Self {
        Bucket { label: label.into(), count }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub age_groups: Vec<Bucket>,
    pub gender: Vec<Bucket>,
    pub manglic: Vec<Bucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStats {
    pub states: Vec<Bucket>,
    pub districts: Vec<Bucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationStats {
    pub qualifications: Vec<Bucket>,
    pub employment: Vec<Bucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalStats {
    pub heights: Vec<Bucket>,
    pub complexions: Vec<Bucket>,
    pub blood_groups: Vec<Bucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    pub total_users: u64,
    pub demographics: Demographics,
    pub location: LocationStats,
    pub education: EducationStats,
    pub physical: PhysicalStats,
}

/// Region and district breakdown of one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateInsight {
    pub state: String,
    pub regions: Vec<Bucket>,
    pub districts: Vec<Bucket>,
}

/// Counts distinct free-text values, remembering first-seen order.
#[derive(Debug, Default)]
struct Tally {
    index: HashMap<String, usize>,
    buckets: Vec<Bucket>,
}

impl Tally {
    fn add(&mut self, value: Option<&str>) {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        match self.index.get(value) {
            Some(&i) => self.buckets[i].count += 1,
            None => {
                self.index.insert(value.to_string(), self.buckets.len());
                self.buckets.push(Bucket::new(value, 1));
            }
        }
    }

    /// Count descending; equal counts keep first-seen order.
    fn ranked(mut self) -> Vec<Bucket> {
        self.buckets.sort_by(|a, b| b.count.cmp(&a.count));
        self.buckets
    }

    fn top(self, n: usize) -> Vec<Bucket> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Index of the age bucket for a person born in `birth_year`.
pub fn age_group(current_year: i32, birth_year: i32) -> usize {
    match current_year - birth_year {
        age if age <= 25 => 0,
        age if age <= 30 => 1,
        age if age <= 35 => 2,
        age if age <= 40 => 3,
        _ => 4,
    }
}

/// Parses `"<feet> ft and <inches> inches"` into `(feet, inches)`.
pub fn parse_height(raw: &str) -> Option<(u32, u32)> {
    let caps = HEIGHT_PATTERN.captures(raw)?;
    let feet: u32 = caps[1].parse().ok()?;
    let inches: u32 = caps[2].parse().ok()?;
    if !(MIN_FEET..=MAX_FEET).contains(&feet) || inches > 11 {
        return None;
    }
    Some((feet, inches))
}

pub fn height_label(feet: u32, inches: u32) -> String {
    format!("{} ft and {} inches", feet, inches)
}

fn height_slot(feet: u32, inches: u32) -> usize {
    ((feet - MIN_FEET) * 12 + inches) as usize
}

fn dense<T: Copy + PartialEq, const N: usize>(
    all: [T; N],
    label: fn(&T) -> &'static str,
    values: impl Iterator<Item = Option<T>>,
) -> Vec<Bucket> {
    let mut counts = [0u64; N];
    for value in values.flatten() {
        if let Some(i) = all.iter().position(|known| *known == value) {
            counts[i] += 1;
        }
    }
    all.iter()
        .zip(counts)
        .map(|(value, count)| Bucket::new(label(value), count))
        .collect()
}

/// Computes every dashboard dimension in one pass over `users`.
pub fn aggregate(users: &[User], current_year: i32) -> UserAnalytics {
    let mut ages = [0u64; AGE_GROUPS.len()];
    let mut heights = vec![0u64; ((MAX_FEET - MIN_FEET + 1) * 12) as usize];
    let mut states = Tally::default();
    let mut districts = Tally::default();
    let mut complexions = Tally::default();
    let mut blood_groups = Tally::default();

    for user in users {
        if let Some(dob) = user.date_of_birth {
            ages[age_group(current_year, dob.year())] += 1;
        }
        if let Some((feet, inches)) = user.height.as_deref().and_then(parse_height) {
            heights[height_slot(feet, inches)] += 1;
        }
        states.add(user.state.as_deref());
        districts.add(user.district.as_deref());
        complexions.add(user.complexion.as_deref());
        blood_groups.add(user.blood_group.as_deref());
    }

    let heights = (MIN_FEET..=MAX_FEET)
        .flat_map(|feet| (0..12).map(move |inches| (feet, inches)))
        .map(|(feet, inches)| Bucket::new(height_label(feet, inches), heights[height_slot(feet, inches)]))
        .collect();

    UserAnalytics {
        total_users: users.len() as u64,
        demographics: Demographics {
            age_groups: AGE_GROUPS.iter().zip(ages).map(|(label, count)| Bucket::new(*label, count)).collect(),
            gender: dense(Sex::ALL, Sex::as_str, users.iter().map(|u| u.sex)),
            manglic: dense(Manglic::ALL, Manglic::as_str, users.iter().map(|u| u.manglic)),
        },
        location: LocationStats {
            states: states.top(TOP_VALUES),
            districts: districts.top(TOP_VALUES),
        },
        education: EducationStats {
            qualifications: dense(
                Qualification::ALL,
                Qualification::as_str,
                users.iter().map(|u| u.highest_qualification),
            ),
            employment: dense(
                EmploymentStatus::ALL,
                EmploymentStatus::as_str,
                users.iter().map(|u| u.employment_status),
            ),
        },
        physical: PhysicalStats {
            heights,
            complexions: complexions.top(TOP_VALUES),
            blood_groups: blood_groups.top(TOP_VALUES),
        },
    }
}

/// Per-state region and district counts. Records without all three of
/// state, district and region are left out.
pub fn location_insights(users: &[User]) -> Vec<StateInsight> {
    let mut order: Vec<String> = Vec::new();
    let mut per_state: HashMap<String, (Tally, Tally)> = HashMap::new();

    for user in users {
        let fields = [&user.state, &user.district, &user.region]
            .map(|f| f.as_deref().map(str::trim).filter(|v| !v.is_empty()));
        let [Some(state), Some(district), Some(region)] = fields else {
            continue;
        };
        let (regions, districts) = per_state.entry(state.to_string()).or_insert_with(|| {
            order.push(state.to_string());
            (Tally::default(), Tally::default())
        });
        regions.add(Some(region));
        districts.add(Some(district));
    }

    order
        .into_iter()
        .filter_map(|state| {
            let (regions, districts) = per_state.remove(&state)?;
            Some(StateInsight {
                state,
                regions: regions.ranked(),
                districts: districts.ranked(),
            })
        })
        .collect()
}
