/// Interviewer password floor: 8+ characters with at least one ASCII
/// uppercase letter and one digit.
pub fn password_meets_policy(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}
