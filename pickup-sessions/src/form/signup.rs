use chrono::Utc;
use serde::{Deserialize, Serialize};
use crate::balance::{Player, SKILL_MAX, SKILL_MIN};
use crate::error::{Result, SessionError};

/// Sign-up form submission from the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub player_id: String,
    pub skill_level: u8,
    #[serde(default)]
    pub wants_waitlist: bool,
}

impl SignupRequest {
    /// Turns a validated request into a player at position `signup_order`
    ///
    /// Anyone signing up past `capacity` goes straight to the waitlist.
    pub fn into_player(self, signup_order: u32, capacity: usize) -> Player {
        Player {
            id: self.player_id.trim().to_string(),
            name: self.name.trim().to_string(),
            skill_level: self.skill_level,
            is_waitlisted: self.wants_waitlist || signup_order as usize > capacity,
            signup_order,
            created_at: Utc::now(),
        }
    }
}

/// Validates a sign-up submission
pub fn validate_signup(req: &SignupRequest) -> Result<()> {
    // Validate name
    if req.name.trim().is_empty() {
        return Err(SessionError::InvalidSignup("Name is required".to_string()));
    }

    // Validate player ID (letters, digits, '-' and '_')
    let id = req.player_id.trim();
    if id.is_empty() {
        return Err(SessionError::InvalidSignup("Player ID is required".to_string()));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(SessionError::InvalidSignup(
            "Player ID may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }

    if req.skill_level < SKILL_MIN || req.skill_level > SKILL_MAX {
        return Err(SessionError::InvalidSignup(format!(
            "Skill level must be between {} and {}",
            SKILL_MIN, SKILL_MAX
        )));
    }

    Ok(())
}
