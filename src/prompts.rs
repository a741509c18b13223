pub const COACH_NOVA_SYSTEM: &str = include_str!("../data/prompts/coach_nova_system.txt");
pub const MOOD_MENTOR_SYSTEM: &str = include_str!("../data/prompts/mood_mentor_system.txt");

pub const COACH_NOVA_DEFLECTION: &str = "Let's focus on your physical and mental wellness goals.";
pub const MOOD_MENTOR_DEFLECTION: &str =
    "I'm here for emotional support. Let's talk about how you're feeling.";

pub const COACH_NOVA_GREETING: &str = "Hello! I am Coach Nova, your personal mental and physical health coach. How can I assist you today?";
pub const MOOD_MENTOR_GREETING: &str =
    "Hello! I am Mood Mentor, your supportive AI therapist. How are you feeling today?";

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
