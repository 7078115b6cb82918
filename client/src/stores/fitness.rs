//! Fitness ledger
//!
//! Owns the daily fitness state: calorie and step goals, itemized diary
//! entries, and the water log. Derived figures (food and exercise
//! totals, remaining calories, progress ratios) are recomputed from the
//! itemized logs on every mutation, and every mutation enqueues a full
//! snapshot through the background writer.

use crate::config::GoalConfig;
use crate::error::{ClientError, ClientResult};
use crate::persist::{PersistHandle, SaveTicket};
use fittrack_shared::models::{DiaryEntry, DiarySection, FitnessProfile, WaterEntry};
use fittrack_shared::units::VolumeUnit;
use fittrack_shared::validation::{
    validate_entry_calories, validate_entry_name, validate_water_amount, validate_water_goal,
};
use tracing::{debug, error};

/// Storage key for the serialized fitness state
pub const STORAGE_KEY: &str = "fitness_profile";

/// Ratio of `current` against `goal`, clamped to [0, 1].
///
/// A zero or non-finite goal reads as no progress, never NaN or
/// infinity.
fn progress_ratio(current: f64, goal: f64) -> f64 {
    if goal <= 0.0 || !goal.is_finite() {
        return 0.0;
    }
    (current / goal).clamp(0.0, 1.0)
}

/// The fitness tracking store
#[derive(Debug)]
pub struct FitnessLedger {
    profile: FitnessProfile,
    persist: PersistHandle,
}

impl FitnessLedger {
    /// Fresh ledger seeded with the configured default goals
    pub(crate) fn new(goals: &GoalConfig, persist: PersistHandle) -> Self {
        let profile = FitnessProfile {
            calorie_goal: goals.calories,
            step_goal: goals.steps,
            water_goal_ml: goals.water_ml,
            ..FitnessProfile::default()
        };
        Self { profile, persist }
    }

    /// Ledger rehydrated from a persisted snapshot
    pub(crate) fn with_profile(profile: FitnessProfile, persist: PersistHandle) -> Self {
        Self { profile, persist }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a food or exercise entry to a diary section.
    ///
    /// The section's aggregate (food or exercise calories) is recomputed
    /// from the itemized entries, so it stays consistent even if a
    /// manual override was applied earlier.
    pub fn add_diary_entry(
        &mut self,
        section: DiarySection,
        name: &str,
        calories: u32,
    ) -> ClientResult<(DiaryEntry, SaveTicket)> {
        validate_entry_name(name).map_err(ClientError::Validation)?;
        validate_entry_calories(calories).map_err(ClientError::Validation)?;

        let entry = DiaryEntry {
            name: name.trim().to_string(),
            calories,
        };
        self.profile.diary.section_mut(section).push(entry.clone());

        if section.is_food() {
            self.profile.food_calories = self.profile.diary.food_total();
        } else {
            self.profile.exercise_calories = self.profile.diary.exercise_total();
        }

        debug!(section = %section, calories, "diary entry added");
        Ok((entry, self.persist_profile()))
    }

    /// Log a drink in the given unit; intake is re-summed in milliliters
    pub fn add_water(
        &mut self,
        amount: f64,
        unit: VolumeUnit,
    ) -> ClientResult<(WaterEntry, SaveTicket)> {
        validate_water_amount(amount).map_err(ClientError::Validation)?;

        let entry = WaterEntry { amount, unit };
        self.profile.water_log.push(entry.clone());
        self.profile.water_intake_ml = self
            .profile
            .water_log
            .iter()
            .map(WaterEntry::amount_ml)
            .sum();

        debug!(amount, unit = %unit, "water logged");
        Ok((entry, self.persist_profile()))
    }

    pub fn set_calorie_goal(&mut self, goal: u32) -> SaveTicket {
        self.profile.calorie_goal = goal;
        self.persist_profile()
    }

    pub fn set_step_goal(&mut self, goal: u32) -> SaveTicket {
        self.profile.step_goal = goal;
        self.persist_profile()
    }

    pub fn set_steps(&mut self, count: u32) -> SaveTicket {
        self.profile.step_count = count;
        self.persist_profile()
    }

    /// Set the daily water goal in canonical milliliters. Zero reads as
    /// "no goal"; progress against it is 0.
    pub fn set_water_goal_ml(&mut self, goal_ml: f64) -> ClientResult<SaveTicket> {
        validate_water_goal(goal_ml).map_err(ClientError::Validation)?;
        self.profile.water_goal_ml = goal_ml;
        Ok(self.persist_profile())
    }

    /// Switch the unit water figures are displayed in
    pub fn set_water_unit(&mut self, unit: VolumeUnit) -> SaveTicket {
        self.profile.water_unit = unit;
        self.persist_profile()
    }

    /// Manually override the food aggregate. The next diary entry in a
    /// food section recomputes it from the itemized log.
    pub fn set_food_calories(&mut self, calories: u32) -> SaveTicket {
        self.profile.food_calories = calories;
        self.persist_profile()
    }

    /// Manually override the exercise aggregate. The next exercise
    /// entry recomputes it from the itemized log.
    pub fn set_exercise_calories(&mut self, calories: u32) -> SaveTicket {
        self.profile.exercise_calories = calories;
        self.persist_profile()
    }

    /// Reset everything to the built-in defaults
    pub fn clear(&mut self) -> SaveTicket {
        self.profile = FitnessProfile::default();
        self.persist_profile()
    }

    /// Replace the whole state, e.g. from an imported snapshot
    pub fn restore(&mut self, profile: FitnessProfile) -> SaveTicket {
        self.profile = profile;
        self.persist_profile()
    }

    // ========================================================================
    // Derived figures
    // ========================================================================

    /// Calories left for the day: goal - food + exercise. Negative when
    /// the user ate past the goal.
    pub fn remaining_calories(&self) -> i64 {
        i64::from(self.profile.calorie_goal) - i64::from(self.profile.food_calories)
            + i64::from(self.profile.exercise_calories)
    }

    /// Net intake: food - exercise. Negative when burn exceeds intake.
    pub fn net_calories(&self) -> i64 {
        i64::from(self.profile.food_calories) - i64::from(self.profile.exercise_calories)
    }

    /// Net calories against the calorie goal, clamped to [0, 1]
    pub fn calorie_progress(&self) -> f64 {
        progress_ratio(self.net_calories() as f64, f64::from(self.profile.calorie_goal))
    }

    /// Steps against the step goal, clamped to [0, 1]
    pub fn step_progress(&self) -> f64 {
        progress_ratio(
            f64::from(self.profile.step_count),
            f64::from(self.profile.step_goal),
        )
    }

    /// Water intake against the water goal, clamped to [0, 1]
    pub fn water_progress(&self) -> f64 {
        progress_ratio(self.profile.water_intake_ml, self.profile.water_goal_ml)
    }

    /// Total water intake converted to the requested unit
    pub fn water_intake_in(&self, unit: VolumeUnit) -> f64 {
        unit.from_ml(self.profile.water_intake_ml)
    }

    /// Water goal converted to the requested unit
    pub fn water_goal_in(&self, unit: VolumeUnit) -> f64 {
        unit.from_ml(self.profile.water_goal_ml)
    }

    /// Sum of calories logged under one diary section
    pub fn section_total(&self, section: DiarySection) -> u32 {
        self.profile.diary.section_total(section)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn calorie_goal(&self) -> u32 {
        self.profile.calorie_goal
    }

    pub fn food_calories(&self) -> u32 {
        self.profile.food_calories
    }

    pub fn exercise_calories(&self) -> u32 {
        self.profile.exercise_calories
    }

    pub fn step_count(&self) -> u32 {
        self.profile.step_count
    }

    pub fn step_goal(&self) -> u32 {
        self.profile.step_goal
    }

    pub fn water_intake_ml(&self) -> f64 {
        self.profile.water_intake_ml
    }

    pub fn water_goal_ml(&self) -> f64 {
        self.profile.water_goal_ml
    }

    /// The unit water figures are currently displayed in
    pub fn water_unit(&self) -> VolumeUnit {
        self.profile.water_unit
    }

    /// The full state, e.g. for export
    pub fn profile(&self) -> &FitnessProfile {
        &self.profile
    }

    fn persist_profile(&self) -> SaveTicket {
        match serde_json::to_string(&self.profile) {
            Ok(payload) => self.persist.put(STORAGE_KEY, payload),
            Err(err) => {
                error!(error = %err, "failed to serialize fitness state");
                SaveTicket::failed(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_add_food_entries_sums_section() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        ledger
            .add_diary_entry(DiarySection::Breakfast, "Oatmeal", 300)
            .unwrap();
        ledger
            .add_diary_entry(DiarySection::Lunch, "Salad", 200)
            .unwrap();

        assert_eq!(ledger.food_calories(), 500);
        assert_eq!(ledger.section_total(DiarySection::Breakfast), 300);
        assert_eq!(ledger.section_total(DiarySection::Lunch), 200);
        assert_eq!(ledger.exercise_calories(), 0);
    }

    #[test]
    fn test_exercise_entries_do_not_count_as_food() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        ledger
            .add_diary_entry(DiarySection::Exercise, "Running", 250)
            .unwrap();

        assert_eq!(ledger.food_calories(), 0);
        assert_eq!(ledger.exercise_calories(), 250);
        assert_eq!(ledger.net_calories(), -250);
    }

    #[test]
    fn test_remaining_calories_includes_exercise_credit() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);
        ledger.set_calorie_goal(2000);

        ledger
            .add_diary_entry(DiarySection::Dinner, "Pasta", 800)
            .unwrap();
        ledger
            .add_diary_entry(DiarySection::Exercise, "Cycling", 300)
            .unwrap();

        // 2000 - 800 + 300
        assert_eq!(ledger.remaining_calories(), 1500);
        assert_eq!(ledger.net_calories(), 500);
    }

    #[test]
    fn test_remaining_calories_can_go_negative() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);
        ledger.set_calorie_goal(500);

        ledger
            .add_diary_entry(DiarySection::Dinner, "Feast", 900)
            .unwrap();

        assert_eq!(ledger.remaining_calories(), -400);
    }

    #[test]
    fn test_rejects_blank_name_and_zero_calories() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        assert!(ledger
            .add_diary_entry(DiarySection::Lunch, "   ", 100)
            .is_err());
        assert!(ledger
            .add_diary_entry(DiarySection::Lunch, "Toast", 0)
            .is_err());
        assert_eq!(ledger.food_calories(), 0);
    }

    #[test]
    fn test_entry_names_are_trimmed() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        let (entry, _save) = ledger
            .add_diary_entry(DiarySection::Snacks, "  Apple  ", 80)
            .unwrap();
        assert_eq!(entry.name, "Apple");
    }

    #[test]
    fn test_manual_override_loses_to_recomputation() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        ledger
            .add_diary_entry(DiarySection::Breakfast, "Oatmeal", 300)
            .unwrap();
        ledger.set_food_calories(9999);
        assert_eq!(ledger.food_calories(), 9999);

        ledger
            .add_diary_entry(DiarySection::Lunch, "Salad", 200)
            .unwrap();
        assert_eq!(ledger.food_calories(), 500);
    }

    #[test]
    fn test_water_mixed_units_sum_in_ml() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        ledger.add_water(500.0, VolumeUnit::Ml).unwrap();
        ledger.add_water(8.45, VolumeUnit::Oz).unwrap();

        // 500 + 8.45 * 29.5735
        assert!((ledger.water_intake_ml() - 749.896075).abs() < 1e-6);
        assert!((ledger.water_intake_in(VolumeUnit::Oz) - 25.357).abs() < 0.001);
    }

    #[test]
    fn test_water_rejects_nonpositive_amounts() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        assert!(ledger.add_water(0.0, VolumeUnit::Ml).is_err());
        assert!(ledger.add_water(-50.0, VolumeUnit::Oz).is_err());
        assert!(ledger.add_water(f64::NAN, VolumeUnit::Ml).is_err());
        assert_eq!(ledger.water_intake_ml(), 0.0);
    }

    #[test]
    fn test_display_unit_does_not_rewrite_intake() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        ledger.add_water(500.0, VolumeUnit::Ml).unwrap();
        ledger.set_water_unit(VolumeUnit::Oz);

        assert_eq!(ledger.water_unit(), VolumeUnit::Oz);
        assert_eq!(ledger.water_intake_ml(), 500.0);
    }

    #[test]
    fn test_clear_resets_to_defaults() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        ledger.set_calorie_goal(1234);
        ledger
            .add_diary_entry(DiarySection::Lunch, "Salad", 200)
            .unwrap();
        ledger.add_water(250.0, VolumeUnit::Ml).unwrap();
        ledger.clear();

        assert_eq!(ledger.profile(), &FitnessProfile::default());
    }

    #[rstest]
    #[case(0, 10_000, 0.0)]
    #[case(5_000, 10_000, 0.5)]
    #[case(10_000, 10_000, 1.0)]
    #[case(15_000, 10_000, 1.0)]
    #[case(3_000, 0, 0.0)]
    fn test_step_progress_table(#[case] steps: u32, #[case] goal: u32, #[case] expected: f64) {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        ledger.set_step_goal(goal);
        ledger.set_steps(steps);
        assert!((ledger.step_progress() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_goals_read_as_no_progress() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        ledger.set_calorie_goal(0);
        ledger.set_step_goal(0);
        ledger.set_water_goal_ml(0.0).unwrap();
        ledger
            .add_diary_entry(DiarySection::Lunch, "Salad", 200)
            .unwrap();
        ledger.set_steps(5000);
        ledger.add_water(500.0, VolumeUnit::Ml).unwrap();

        assert_eq!(ledger.calorie_progress(), 0.0);
        assert_eq!(ledger.step_progress(), 0.0);
        assert_eq!(ledger.water_progress(), 0.0);
    }

    #[test]
    fn test_negative_net_calories_clamps_progress_to_zero() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        ledger
            .add_diary_entry(DiarySection::Exercise, "Marathon", 2500)
            .unwrap();
        assert!(ledger.net_calories() < 0);
        assert_eq!(ledger.calorie_progress(), 0.0);
    }

    #[test]
    fn test_water_goal_rejects_negative_and_nan() {
        let (persist, _rx) = PersistHandle::detached();
        let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

        assert!(ledger.set_water_goal_ml(-1.0).is_err());
        assert!(ledger.set_water_goal_ml(f64::NAN).is_err());
        assert!(ledger.set_water_goal_ml(0.0).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: progress ratios always land in [0, 1]
        #[test]
        fn prop_progress_ratio_bounds(current in -10000.0f64..100000.0, goal in -100.0f64..50000.0) {
            let ratio = progress_ratio(current, goal);
            prop_assert!((0.0..=1.0).contains(&ratio),
                "Ratio {} out of bounds for current={}, goal={}", ratio, current, goal);
        }

        /// Property: zero goal is never an error, always zero progress
        #[test]
        fn prop_zero_goal_zero_progress(current in 0.0f64..100000.0) {
            prop_assert_eq!(progress_ratio(current, 0.0), 0.0);
        }

        /// Property: food total always equals the sum of food-section entries
        #[test]
        fn prop_food_total_matches_entries(
            entries in prop::collection::vec(
                (prop::sample::select(DiarySection::ALL.to_vec()), 1u32..2000),
                0..20,
            )
        ) {
            let (persist, _rx) = PersistHandle::detached();
            let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

            for (section, calories) in &entries {
                ledger.add_diary_entry(*section, "entry", *calories).unwrap();
            }

            let expected_food: u32 = entries
                .iter()
                .filter(|(section, _)| section.is_food())
                .map(|(_, calories)| calories)
                .sum();
            let expected_exercise: u32 = entries
                .iter()
                .filter(|(section, _)| !section.is_food())
                .map(|(_, calories)| calories)
                .sum();

            prop_assert_eq!(ledger.food_calories(), expected_food);
            prop_assert_eq!(ledger.exercise_calories(), expected_exercise);
            prop_assert_eq!(
                ledger.net_calories(),
                i64::from(expected_food) - i64::from(expected_exercise)
            );
        }

        /// Property: water intake in ml equals the converted sum of the log
        #[test]
        fn prop_water_intake_is_converted_sum(
            amounts in prop::collection::vec(
                (0.1f64..1000.0, prop::sample::select(vec![VolumeUnit::Ml, VolumeUnit::Oz])),
                0..15,
            )
        ) {
            let (persist, _rx) = PersistHandle::detached();
            let mut ledger = FitnessLedger::new(&GoalConfig::default(), persist);

            let mut expected = 0.0f64;
            for (amount, unit) in &amounts {
                ledger.add_water(*amount, *unit).unwrap();
                expected += unit.to_ml(*amount);
            }

            prop_assert!((ledger.water_intake_ml() - expected).abs() < 1e-6,
                "Intake {} != expected {}", ledger.water_intake_ml(), expected);
        }
    }
}
