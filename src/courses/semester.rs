//! Semester labels
//!
//! Course folders live under a directory named after the upcoming term.
//! Registration for the next term opens well before the current one ends, so
//! the label points ahead: November already belongs to next year's spring.

use chrono::Datelike;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Spring,
    Summer,
    Fall,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Term::Spring => "Spring",
            Term::Summer => "Summer",
            Term::Fall => "Fall",
        };
        f.write_str(name)
    }
}

/// A term and its year, displayed as e.g. `Spring 2024`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Semester {
    pub term: Term,
    pub year: i32,
}

impl Semester {
    /// Semester to set up for at the given date
    ///
    /// - November, December: spring of the next year
    /// - June through October: fall of this year
    /// - January through May: summer of this year
    pub fn resolve<D: Datelike>(now: &D) -> Self {
        let year = now.year();
        match now.month() {
            11 | 12 => Semester {
                term: Term::Spring,
                year: year + 1,
            },
            6..=10 => Semester {
                term: Term::Fall,
                year,
            },
            _ => Semester {
                term: Term::Summer,
                year,
            },
        }
    }

    /// Semester for the local date right now
    pub fn current() -> Self {
        Self::resolve(&chrono::Local::now())
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.term, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn label_for(year: i32, month: u32) -> String {
        let date = NaiveDate::from_ymd_opt(year, month, 15).unwrap();
        Semester::resolve(&date).label()
    }

    #[test]
    fn test_november_and_december_roll_to_next_spring() {
        assert_eq!(label_for(2023, 11), "Spring 2024");
        assert_eq!(label_for(2023, 12), "Spring 2024");
    }

    #[test]
    fn test_june_through_october_is_fall() {
        assert_eq!(label_for(2024, 6), "Fall 2024");
        assert_eq!(label_for(2024, 8), "Fall 2024");
        assert_eq!(label_for(2024, 10), "Fall 2024");
    }

    #[test]
    fn test_january_through_may_is_summer() {
        assert_eq!(label_for(2024, 1), "Summer 2024");
        assert_eq!(label_for(2024, 3), "Summer 2024");
        assert_eq!(label_for(2024, 5), "Summer 2024");
    }

    #[test]
    fn test_month_boundaries() {
        let last_of_october = NaiveDate::from_ymd_opt(2024, 10, 31).unwrap();
        let first_of_november = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        assert_eq!(Semester::resolve(&last_of_october).term, Term::Fall);
        assert_eq!(
            Semester::resolve(&first_of_november),
            Semester {
                term: Term::Spring,
                year: 2025
            }
        );
    }
}
