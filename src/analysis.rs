//! Structured analysis of a single logged workout.
//!
//! Unlike [`crate::workout`], which estimates time from free text, this works
//! on explicit exercise data (sets, reps, weights) and derives volume totals,
//! an intensity score, readable insights and follow-up suggestions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Average reps per set below which more reps are suggested.
pub const MIN_REPS_PER_SET: f64 = 8.0;

/// Session length, in minutes, below which a longer workout is suggested.
pub const MIN_SESSION_MINUTES: u32 = 30;

/// Exercise count below which more variety is suggested.
pub const MIN_EXERCISES: usize = 3;

/// Upper bound on the suggested next session length, in minutes.
pub const MAX_TARGET_MINUTES: u32 = 90;

/// One exercise within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    /// Reps performed in each set.
    #[serde(default)]
    pub reps: Vec<u32>,
    /// Load used in each set, in kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Vec<f64>>,
    /// Rest between sets, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Exercise {
    pub fn new(name: impl Into<String>, reps: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            sets: reps.len() as u32,
            reps,
            weight: None,
            rest_time: None,
            notes: None,
        }
    }

    pub fn with_weight(mut self, weight: Vec<f64>) -> Self {
        self.weight = Some(weight);
        self
    }

    fn total_weight(&self) -> f64 {
        self.weight.iter().flatten().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRate {
    pub avg: u32,
    pub max: u32,
}

/// A logged workout. Stored workout notes keep this shape in `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub exercises: Vec<Exercise>,
    /// Minutes
    pub duration: u32,
    /// ISO date of the session, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<HeartRate>,
}

impl WorkoutSession {
    pub fn new(exercises: Vec<Exercise>, duration: u32) -> Self {
        Self {
            exercises,
            duration,
            date: None,
            calories_burned: None,
            heart_rate: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_calories(mut self, calories: f64) -> Self {
        self.calories_burned = Some(calories);
        self
    }

    pub fn with_heart_rate(mut self, avg: u32, max: u32) -> Self {
        self.heart_rate = Some(HeartRate { avg, max });
        self
    }

    fn validate(&self) -> Result<()> {
        if self.exercises.is_empty() {
            return Err(Error::InvalidArgument("workout has no exercises".to_string()));
        }
        for exercise in &self.exercises {
            if exercise.name.trim().is_empty() {
                return Err(Error::InvalidArgument("exercise name must not be empty".to_string()));
            }
            if exercise
                .weight
                .iter()
                .flatten()
                .any(|w| !w.is_finite() || *w < 0.0)
            {
                return Err(Error::InvalidArgument(format!(
                    "exercise {} has an invalid weight",
                    exercise.name
                )));
            }
        }
        if let Some(calories) = self.calories_burned {
            if !calories.is_finite() || calories < 0.0 {
                return Err(Error::InvalidArgument(format!(
                    "calories burned must be a non-negative number, got {}",
                    calories
                )));
            }
        }
        Ok(())
    }
}

/// Volume totals of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub exercises: usize,
    pub total_sets: u64,
    pub total_reps: u64,
    /// Sum of per-set loads, in kilograms.
    pub total_weight: f64,
    pub average_reps_per_set: f64,
    /// Kilograms moved per minute.
    pub intensity: f64,
    /// Minutes
    pub duration: u32,
    pub calories_burned: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextWorkout {
    pub suggested_exercises: Vec<String>,
    /// Minutes
    pub target_duration: u32,
}

/// Result of analyzing one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutAnalysis {
    pub summary: AnalysisSummary,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_workout: NextWorkout,
}

/// Analyze a session's volume and suggest adjustments.
pub fn analyze_workout(session: &WorkoutSession) -> Result<WorkoutAnalysis> {
    session.validate()?;

    let exercises = session.exercises.len();
    let total_sets: u64 = session.exercises.iter().map(|e| u64::from(e.sets)).sum();
    let total_reps: u64 = session
        .exercises
        .iter()
        .flat_map(|e| e.reps.iter())
        .map(|r| u64::from(*r))
        .sum();
    let total_weight: f64 = session.exercises.iter().map(Exercise::total_weight).sum();

    let average_reps_per_set = if total_sets == 0 {
        0.0
    } else {
        total_reps as f64 / total_sets as f64
    };
    let intensity = if session.duration == 0 {
        0.0
    } else {
        total_weight / f64::from(session.duration)
    };
    let calories_burned = session.calories_burned.unwrap_or(0.0);

    let mut insights = vec![
        format!(
            "Completed {} exercises with {} total sets",
            exercises, total_sets
        ),
        format!(
            "Total reps: {} (avg {:.1} reps/set)",
            total_reps, average_reps_per_set
        ),
    ];
    if calories_burned > 0.0 {
        insights.push(format!("Calories burned: {}", calories_burned));
    }
    insights.push(format!("Workout duration: {} minutes", session.duration));
    insights.push(format!("Intensity score: {:.2} kg/min", intensity));
    if let Some(hr) = session.heart_rate {
        insights.push(format!("Heart rate: avg {} bpm, max {} bpm", hr.avg, hr.max));
    }

    let mut recommendations = Vec::new();
    if average_reps_per_set < MIN_REPS_PER_SET {
        recommendations
            .push("Consider increasing reps per set for better muscle engagement".to_string());
    }
    if session.duration < MIN_SESSION_MINUTES {
        recommendations.push("Consider extending workout duration for better results".to_string());
    }
    if exercises < MIN_EXERCISES {
        recommendations.push("Add more exercises to target different muscle groups".to_string());
    }

    let next_workout = NextWorkout {
        suggested_exercises: session
            .exercises
            .iter()
            .take(3)
            .map(|e| e.name.clone())
            .collect(),
        target_duration: session.duration.saturating_add(10).min(MAX_TARGET_MINUTES),
    };

    debug!(
        exercises,
        total_sets,
        total_reps,
        recommendations = recommendations.len(),
        "Analyzed workout"
    );

    Ok(WorkoutAnalysis {
        summary: AnalysisSummary {
            exercises,
            total_sets,
            total_reps,
            total_weight,
            average_reps_per_set,
            intensity,
            duration: session.duration,
            calories_burned,
        },
        insights,
        recommendations,
        next_workout,
    })
}
