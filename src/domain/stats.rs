//! Aggregate descriptive figures over the stored passengers.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::passenger::{Passenger, Sex};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PassengerStatistics {
    pub total: usize,
    pub survival: SurvivalCounts,
    pub by_pclass: ClassCounts,
    pub by_sex: SexCounts,
    pub age: NumericSummary,
    pub fare: NumericSummary,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SurvivalCounts {
    pub survived: usize,
    pub died: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassCounts {
    pub first: usize,
    pub second: usize,
    pub third: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SexCounts {
    pub male: usize,
    pub female: usize,
}

/// Min/mean/max over the records where the field is present. Absent values
/// are excluded from the aggregate, never treated as zero.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NumericSummary {
    pub count: usize,
    pub min: Option<f64>,
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    fn from_values(values: impl Iterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        if count == 0 {
            return Self {
                count: 0,
                min: None,
                mean: None,
                max: None,
            };
        }
        Self {
            count,
            min: Some(min),
            mean: Some(sum / count as f64),
            max: Some(max),
        }
    }
}

impl PassengerStatistics {
    pub fn compute<'a>(records: impl Iterator<Item = &'a Passenger> + Clone) -> Self {
        let mut total = 0usize;
        let mut survived = 0usize;
        let mut by_pclass = ClassCounts {
            first: 0,
            second: 0,
            third: 0,
        };
        let mut male = 0usize;

        for p in records.clone() {
            total += 1;
            if p.survived == 1 {
                survived += 1;
            }
            match p.pclass {
                1 => by_pclass.first += 1,
                2 => by_pclass.second += 1,
                _ => by_pclass.third += 1,
            }
            if p.sex == Sex::Male {
                male += 1;
            }
        }

        let age = NumericSummary::from_values(records.clone().filter_map(|p| p.age));
        let fare = NumericSummary::from_values(records.filter_map(|p| p.fare));

        Self {
            total,
            survival: SurvivalCounts {
                survived,
                died: total - survived,
            },
            by_pclass,
            by_sex: SexCounts {
                male,
                female: total - male,
            },
            age,
            fare,
        }
    }
}
