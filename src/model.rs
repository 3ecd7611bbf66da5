// src/model.rs
//! Record types shared by the scraper and the dashboard.
//!
//! Column headers follow the dataset file layout produced by the scraper
//! (`Category,Rang,Fullname,Age_year,Location,total_time,run_link,run_year,age_group`),
//! so files written by older runs keep loading.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("empty value")]
    Empty,
    #[error("invalid rank {0:?}")]
    Rank(String),
    #[error("invalid finish time {0:?}")]
    Time(String),
    #[error("invalid age group {0:?}")]
    AgeGroup(String),
}

/// One runner's result in one race year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerResult {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Rang")]
    pub rank: Rank,
    #[serde(rename = "Fullname")]
    pub fullname: String,
    #[serde(rename = "Age_year")]
    pub birth_year: i32,
    #[serde(rename = "Location")]
    pub location: String,
    pub total_time: Option<FinishTime>,
    pub run_link: String,
    pub run_year: i32,
    pub age_group: AgeGroup,
}

impl RunnerResult {
    pub fn age(&self) -> i32 {
        self.run_year - self.birth_year
    }
}

/* ---------------- Rank ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rank {
    Place(u32),
    Dnf,
    Dsq,
    Out,
}

impl FromStr for Rank {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('.');
        match s {
            "" => Err(FieldError::Empty),
            "DNF" => Ok(Rank::Dnf),
            "DSQ" => Ok(Rank::Dsq),
            "OUT" => Ok(Rank::Out),
            digits => digits
                .parse()
                .map(Rank::Place)
                .map_err(|_| FieldError::Rank(s.to_string())),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Place(n) => write!(f, "{n}"),
            Rank::Dnf => f.write_str("DNF"),
            Rank::Dsq => f.write_str("DSQ"),
            Rank::Out => f.write_str("OUT"),
        }
    }
}

impl TryFrom<String> for Rank {
    type Error = FieldError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rank> for String {
    fn from(r: Rank) -> Self {
        r.to_string()
    }
}

/* ---------------- FinishTime ---------------- */

/// Finish time with tenth-of-second resolution.
///
/// Accepts the provider's `h:mm.ss,t` notation as well as `h:mm:ss[.t]`.
/// Displays as `h:mm:ss.t`, which parses back to the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinishTime {
    tenths: u32,
}

impl FinishTime {
    pub fn from_tenths(tenths: u32) -> Self {
        Self { tenths }
    }

    pub fn tenths(&self) -> u32 {
        self.tenths
    }
}

impl FromStr for FinishTime {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FieldError::Empty);
        }
        let bad = || FieldError::Time(s.to_string());

        // Two colons means h:mm:ss, where a dot can only be the fraction.
        let colon_style = s.matches(':').count() >= 2;
        let (clock, frac) = if let Some((clock, frac)) = s.rsplit_once(',') {
            (clock, Some(frac))
        } else if colon_style {
            match s.rsplit_once('.') {
                Some((clock, frac)) => (clock, Some(frac)),
                None => (s, None),
            }
        } else {
            (s, None)
        };

        let parts = clock
            .split([':', '.'])
            .map(|p| p.parse::<u32>().map_err(|_| bad()))
            .collect::<Result<Vec<_>, _>>()?;

        let (h, m, sec) = match parts.as_slice() {
            [sec] => (0, 0, *sec),
            [m, sec] => (0, *m, *sec),
            [h, m, sec] => (*h, *m, *sec),
            _ => return Err(bad()),
        };
        if sec >= 60 || (parts.len() == 3 && m >= 60) {
            return Err(bad());
        }

        let tenth = match frac {
            None => 0,
            Some(f) => f
                .chars()
                .next()
                .and_then(|c| c.to_digit(10))
                .ok_or_else(bad)?,
        };

        let tenths = h
            .checked_mul(3600)
            .and_then(|t| t.checked_add(m.checked_mul(60)?))
            .and_then(|t| t.checked_add(sec))
            .and_then(|t| t.checked_mul(10))
            .and_then(|t| t.checked_add(tenth))
            .ok_or_else(bad)?;
        Ok(Self { tenths })
    }
}

impl fmt::Display for FinishTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.tenths / 10;
        write!(
            f,
            "{}:{:02}:{:02}.{}",
            secs / 3600,
            (secs / 60) % 60,
            secs % 60,
            self.tenths % 10
        )
    }
}

impl TryFrom<String> for FinishTime {
    type Error = FieldError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FinishTime> for String {
    fn from(t: FinishTime) -> Self {
        t.to_string()
    }
}

/* ---------------- AgeGroup ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AgeGroup {
    UpTo20,
    From20To30,
    From30To40,
    From40To50,
    Over50,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::UpTo20,
        AgeGroup::From20To30,
        AgeGroup::From30To40,
        AgeGroup::From40To50,
        AgeGroup::Over50,
    ];

    /// Bucket an age; upper bounds are inclusive.
    pub fn from_age(age: i32) -> Self {
        match age {
            ..=20 => AgeGroup::UpTo20,
            21..=30 => AgeGroup::From20To30,
            31..=40 => AgeGroup::From30To40,
            41..=50 => AgeGroup::From40To50,
            _ => AgeGroup::Over50,
        }
    }

    /// `None` when the runner would not have been born yet.
    pub fn from_years(run_year: i32, birth_year: i32) -> Option<Self> {
        let age = run_year - birth_year;
        (age > 0).then(|| Self::from_age(age))
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::UpTo20 => "0-20",
            AgeGroup::From20To30 => "20-30",
            AgeGroup::From30To40 => "30-40",
            AgeGroup::From40To50 => "40-50",
            AgeGroup::Over50 => "50+",
        }
    }
}

impl FromStr for AgeGroup {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AgeGroup::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| FieldError::AgeGroup(s.to_string()))
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for AgeGroup {
    type Error = FieldError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AgeGroup> for String {
    fn from(g: AgeGroup) -> Self {
        g.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_time_notation() {
        let t: FinishTime = "2:45.12,3".parse().unwrap();
        assert_eq!(t.tenths(), ((2 * 3600) + 45 * 60 + 12) * 10 + 3);
        assert_eq!(t.to_string(), "2:45:12.3");

        let short: FinishTime = "59.07,9".parse().unwrap();
        assert_eq!(short.to_string(), "0:59:07.9");
    }

    #[test]
    fn parses_colon_notation_and_canonical_form() {
        let t: FinishTime = "3:01:09".parse().unwrap();
        assert_eq!(t.to_string(), "3:01:09.0");
        let back: FinishTime = t.to_string().parse().unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn rejects_garbage_times() {
        assert_eq!("".parse::<FinishTime>(), Err(FieldError::Empty));
        assert!("abc".parse::<FinishTime>().is_err());
        assert!("1:75:00".parse::<FinishTime>().is_err());
        assert!("1:2:3:4:5".parse::<FinishTime>().is_err());
    }

    #[test]
    fn oversized_times_are_rejected() {
        assert_eq!(
            "500000:00:00".parse::<FinishTime>(),
            Err(FieldError::Time("500000:00:00".into()))
        );
        assert!("99999999.00,0".parse::<FinishTime>().is_err());
        // Largest hour count that still fits
        assert!("119304:00:00".parse::<FinishTime>().is_ok());
    }

    #[test]
    fn ranks() {
        assert_eq!("12.".parse::<Rank>(), Ok(Rank::Place(12)));
        assert_eq!("DNF".parse::<Rank>(), Ok(Rank::Dnf));
        assert_eq!("OUT".parse::<Rank>(), Ok(Rank::Out));
        assert!("x1".parse::<Rank>().is_err());
        assert!(Rank::Place(1) < Rank::Place(2));
        assert!(Rank::Place(9999) < Rank::Dnf);
    }

    #[test]
    fn age_group_bounds_are_inclusive_above() {
        assert_eq!(AgeGroup::from_age(20), AgeGroup::UpTo20);
        assert_eq!(AgeGroup::from_age(21), AgeGroup::From20To30);
        assert_eq!(AgeGroup::from_age(30), AgeGroup::From20To30);
        assert_eq!(AgeGroup::from_age(50), AgeGroup::From40To50);
        assert_eq!(AgeGroup::from_age(51), AgeGroup::Over50);
        assert_eq!(AgeGroup::from_years(2022, 2022), None);
        assert_eq!(AgeGroup::from_years(2022, 1985), Some(AgeGroup::From30To40));
    }

    #[test]
    fn age_group_labels_parse_back() {
        for g in AgeGroup::ALL {
            assert_eq!(g.label().parse::<AgeGroup>(), Ok(g));
        }
        assert!("60+".parse::<AgeGroup>().is_err());
    }
}
