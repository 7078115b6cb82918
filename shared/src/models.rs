//! Data models for the FitTrack client
//!
//! Everything here is plain data: the stores own the mutation rules and
//! the persistence layer snapshots these types as JSON blobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use crate::units::VolumeUnit;

/// Default daily calorie goal before the user sets one.
pub const DEFAULT_CALORIE_GOAL: u32 = 2000;
/// Default daily step goal before the user sets one.
pub const DEFAULT_STEP_GOAL: u32 = 10_000;
/// Default daily water goal in milliliters before the user sets one.
pub const DEFAULT_WATER_GOAL_ML: f64 = 2000.0;

// ============================================================================
// Support chat
// ============================================================================

/// A single support-chat message.
///
/// Exactly one side of every message is the admin identity; user-to-user
/// and admin-to-admin messages are rejected at send time. Records never
/// change after creation except for `is_read`, which only moves from
/// unread to read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

// ============================================================================
// Diary and water tracking
// ============================================================================

/// Diary section a food or exercise entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiarySection {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
    Exercise,
}

impl DiarySection {
    /// Every section, in display order
    pub const ALL: [DiarySection; 5] = [
        DiarySection::Breakfast,
        DiarySection::Lunch,
        DiarySection::Dinner,
        DiarySection::Snacks,
        DiarySection::Exercise,
    ];

    /// The sections whose entries count toward food calories
    pub const FOOD: [DiarySection; 4] = [
        DiarySection::Breakfast,
        DiarySection::Lunch,
        DiarySection::Dinner,
        DiarySection::Snacks,
    ];

    /// Whether entries in this section count as food (vs. exercise)
    pub fn is_food(self) -> bool {
        !matches!(self, DiarySection::Exercise)
    }

    /// Human-readable section title
    pub fn label(self) -> &'static str {
        match self {
            DiarySection::Breakfast => "Breakfast",
            DiarySection::Lunch => "Lunch",
            DiarySection::Dinner => "Dinner",
            DiarySection::Snacks => "Snacks",
            DiarySection::Exercise => "Exercise",
        }
    }

    /// Lowercase key used in serialized form and CSV rows
    pub fn key(self) -> &'static str {
        match self {
            DiarySection::Breakfast => "breakfast",
            DiarySection::Lunch => "lunch",
            DiarySection::Dinner => "dinner",
            DiarySection::Snacks => "snacks",
            DiarySection::Exercise => "exercise",
        }
    }
}

impl fmt::Display for DiarySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for DiarySection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(DiarySection::Breakfast),
            "lunch" => Ok(DiarySection::Lunch),
            "dinner" => Ok(DiarySection::Dinner),
            "snacks" => Ok(DiarySection::Snacks),
            "exercise" => Ok(DiarySection::Exercise),
            _ => Err(format!("Unknown diary section: {}", s)),
        }
    }
}

/// One named food or exercise entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiaryEntry {
    pub name: String,
    pub calories: u32,
}

/// Itemized entries for the five diary sections
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diary {
    pub breakfast: Vec<DiaryEntry>,
    pub lunch: Vec<DiaryEntry>,
    pub dinner: Vec<DiaryEntry>,
    pub snacks: Vec<DiaryEntry>,
    pub exercise: Vec<DiaryEntry>,
}

impl Diary {
    /// The entries logged under a section
    pub fn section(&self, section: DiarySection) -> &[DiaryEntry] {
        match section {
            DiarySection::Breakfast => &self.breakfast,
            DiarySection::Lunch => &self.lunch,
            DiarySection::Dinner => &self.dinner,
            DiarySection::Snacks => &self.snacks,
            DiarySection::Exercise => &self.exercise,
        }
    }

    pub fn section_mut(&mut self, section: DiarySection) -> &mut Vec<DiaryEntry> {
        match section {
            DiarySection::Breakfast => &mut self.breakfast,
            DiarySection::Lunch => &mut self.lunch,
            DiarySection::Dinner => &mut self.dinner,
            DiarySection::Snacks => &mut self.snacks,
            DiarySection::Exercise => &mut self.exercise,
        }
    }

    /// Sum of calories logged under a section
    pub fn section_total(&self, section: DiarySection) -> u32 {
        self.section(section).iter().map(|e| e.calories).sum()
    }

    /// Sum of calories across the four food sections
    pub fn food_total(&self) -> u32 {
        DiarySection::FOOD
            .iter()
            .map(|section| self.section_total(*section))
            .sum()
    }

    /// Sum of calories burned in the exercise section
    pub fn exercise_total(&self) -> u32 {
        self.section_total(DiarySection::Exercise)
    }
}

/// One logged drink, kept in the unit it was entered with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterEntry {
    pub amount: f64,
    pub unit: VolumeUnit,
}

impl WaterEntry {
    /// The entry's amount in canonical milliliters
    pub fn amount_ml(&self) -> f64 {
        self.unit.to_ml(self.amount)
    }
}

/// The persisted fitness state: goals, aggregates, and itemized logs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FitnessProfile {
    pub calorie_goal: u32,
    pub food_calories: u32,
    pub exercise_calories: u32,
    pub step_count: u32,
    pub step_goal: u32,
    pub water_intake_ml: f64,
    pub water_goal_ml: f64,
    pub water_unit: VolumeUnit,
    pub diary: Diary,
    pub water_log: Vec<WaterEntry>,
}

impl Default for FitnessProfile {
    fn default() -> Self {
        Self {
            calorie_goal: DEFAULT_CALORIE_GOAL,
            food_calories: 0,
            exercise_calories: 0,
            step_count: 0,
            step_goal: DEFAULT_STEP_GOAL,
            water_intake_ml: 0.0,
            water_goal_ml: DEFAULT_WATER_GOAL_ML,
            water_unit: VolumeUnit::default(),
            diary: Diary::default(),
            water_log: Vec::new(),
        }
    }
}

// ============================================================================
// Profile and accounts
// ============================================================================

/// Editable contact card shown on the profile screen
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

/// Stored sign-in pair for the device-local account gate.
///
/// Passwords are kept verbatim: the gate simulates a backend on a single
/// device and is not an authentication boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Which side of the support chat an identity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// The signed-in identity, persisted between launches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_totals() {
        let mut diary = Diary::default();
        diary.breakfast.push(DiaryEntry {
            name: "Oatmeal".to_string(),
            calories: 300,
        });
        diary.lunch.push(DiaryEntry {
            name: "Salad".to_string(),
            calories: 200,
        });
        diary.exercise.push(DiaryEntry {
            name: "Running".to_string(),
            calories: 250,
        });

        assert_eq!(diary.section_total(DiarySection::Breakfast), 300);
        assert_eq!(diary.food_total(), 500);
        assert_eq!(diary.exercise_total(), 250);
    }

    #[test]
    fn test_food_sections_exclude_exercise() {
        for section in DiarySection::FOOD {
            assert!(section.is_food());
        }
        assert!(!DiarySection::Exercise.is_food());
        assert_eq!(DiarySection::ALL.len(), 5);
    }

    #[test]
    fn test_section_parsing_matches_keys() {
        for section in DiarySection::ALL {
            assert_eq!(section.key().parse::<DiarySection>().unwrap(), section);
        }
        assert!("brunch".parse::<DiarySection>().is_err());
    }

    #[test]
    fn test_water_entry_normalizes_to_ml() {
        let entry = WaterEntry {
            amount: 8.45,
            unit: VolumeUnit::Oz,
        };
        assert!((entry.amount_ml() - 249.896).abs() < 0.001);
    }

    #[test]
    fn test_fitness_profile_defaults() {
        let profile = FitnessProfile::default();
        assert_eq!(profile.calorie_goal, DEFAULT_CALORIE_GOAL);
        assert_eq!(profile.step_goal, DEFAULT_STEP_GOAL);
        assert_eq!(profile.water_goal_ml, DEFAULT_WATER_GOAL_ML);
        assert_eq!(profile.water_intake_ml, 0.0);
        assert!(profile.water_log.is_empty());
    }
}
