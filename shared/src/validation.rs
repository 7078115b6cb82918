//! Input validation functions
//!
//! Validation utilities for user input. Everything returns a
//! `Result<(), String>` with a message suitable for showing in the UI.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"));

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate chat message content
pub fn validate_message_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Message cannot be empty".to_string());
    }
    Ok(())
}

/// Validate a diary entry name
pub fn validate_entry_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Entry name cannot be empty".to_string());
    }
    Ok(())
}

/// Validate a diary entry's calorie value
pub fn validate_entry_calories(calories: u32) -> Result<(), String> {
    if calories == 0 {
        return Err("Calories must be greater than 0".to_string());
    }
    if calories > 50000 {
        return Err("Calorie value unreasonably high".to_string());
    }
    Ok(())
}

/// Validate a logged water amount (in the unit it was entered with)
pub fn validate_water_amount(amount: f64) -> Result<(), String> {
    if amount.is_nan() || amount.is_infinite() {
        return Err("Water amount must be a valid number".to_string());
    }
    if amount <= 0.0 {
        return Err("Water amount must be greater than 0".to_string());
    }
    if amount > 10000.0 {
        return Err("Water amount unreasonably high".to_string());
    }
    Ok(())
}

/// Validate a water goal in milliliters. Zero is allowed and reads as
/// "no goal set".
pub fn validate_water_goal(goal_ml: f64) -> Result<(), String> {
    if goal_ml.is_nan() || goal_ml.is_infinite() {
        return Err("Water goal must be a valid number".to_string());
    }
    if goal_ml < 0.0 {
        return Err("Water goal cannot be negative".to_string());
    }
    Ok(())
}

/// Validate a profile display name
pub fn validate_profile_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    Ok(())
}

/// Validate an age in years
pub fn validate_age(age: u32) -> Result<(), String> {
    if age == 0 {
        return Err("Please enter a valid age".to_string());
    }
    if age > 150 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}
